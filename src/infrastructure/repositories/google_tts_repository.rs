use super::tts_repository::TtsRepository;
use crate::domain::tts::{AudioEncoding, AudioSettings, SsmlGender, VoiceInfo, VoiceSettings};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub const GOOGLE_TTS_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1";

/// How requests to Google Cloud Text-to-Speech are authorized
#[derive(Debug, Clone)]
pub enum GoogleCredentials {
    /// `?key=` query parameter
    ApiKey(String),
    /// OAuth bearer token, e.g. from `gcloud auth print-access-token`
    AccessToken(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest<'a> {
    pub input: SynthesisInput<'a>,
    pub voice: VoiceSelection<'a>,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
pub struct SynthesisInput<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection<'a> {
    pub language_code: &'a str,
    pub name: &'a str,
    pub ssml_gender: SsmlGender,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub audio_encoding: AudioEncoding,
    pub speaking_rate: f32,
    pub pitch: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct ListVoicesResponse {
    #[serde(default)]
    voices: Vec<GoogleVoice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVoice {
    name: String,
    #[serde(default)]
    language_codes: Vec<String>,
    #[serde(default)]
    ssml_gender: Option<String>,
}

/// Google Cloud Text-to-Speech over its REST API
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    endpoint: String,
    credentials: GoogleCredentials,
}

impl GoogleTtsRepository {
    pub fn new(credentials: GoogleCredentials) -> Self {
        Self::with_endpoint(GOOGLE_TTS_ENDPOINT.to_string(), credentials)
    }

    pub fn with_endpoint(endpoint: String, credentials: GoogleCredentials) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint,
            credentials,
        }
    }

    pub fn build_request<'a>(
        text: &'a str,
        voice: &'a VoiceSettings,
        audio: &AudioSettings,
    ) -> SynthesizeRequest<'a> {
        SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &voice.language_code,
                name: &voice.name,
                ssml_gender: voice.ssml_gender,
            },
            audio_config: AudioConfig {
                audio_encoding: audio.audio_encoding,
                speaking_rate: audio.speaking_rate,
                pitch: audio.pitch,
            },
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            GoogleCredentials::ApiKey(key) => request.query(&[("key", key.as_str())]),
            GoogleCredentials::AccessToken(token) => request.bearer_auth(token),
        }
    }

    async fn error_body(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        format!("Google TTS returned {}: {}", status, body.trim())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    fn provider(&self) -> &'static str {
        "google"
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
        audio: &AudioSettings,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice = %voice.name,
            language = %voice.language_code,
            text_length = text.len(),
            "Calling Google TTS text:synthesize"
        );

        let request = self
            .http_client
            .post(format!("{}/text:synthesize", self.endpoint))
            .json(&Self::build_request(text, voice, audio));

        let response = self.authorize(request).send().await.map_err(|e| {
            tracing::error!(error = %e, "Google TTS request failed");
            format!("Google TTS request failed: {}", e)
        })?;

        if !response.status().is_success() {
            let message = Self::error_body(response).await;
            tracing::error!(error = %message, voice = %voice.name, "Google TTS synthesis failed");
            return Err(message);
        }

        let body: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Google TTS response: {}", e))?;

        let audio_data = STANDARD
            .decode(body.audio_content.as_bytes())
            .map_err(|e| format!("Google TTS returned invalid base64 audio: {}", e))?;

        tracing::info!(
            provider = "google",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }

    async fn list_voices(&self, language_prefix: &str) -> Result<Vec<VoiceInfo>, String> {
        let request = self
            .http_client
            .get(format!("{}/voices", self.endpoint))
            .query(&[("languageCode", language_prefix)]);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| format!("Google TTS request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(Self::error_body(response).await);
        }

        let body: ListVoicesResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Google voices: {}", e))?;

        Ok(body
            .voices
            .into_iter()
            .filter(|voice| {
                voice
                    .language_codes
                    .iter()
                    .any(|code| code.starts_with(language_prefix))
            })
            .map(|voice| VoiceInfo {
                name: voice.name,
                language_codes: voice.language_codes,
                gender: voice.ssml_gender.unwrap_or_default(),
            })
            .collect())
    }
}
