use crate::e2e::helpers;

use helpers::fakes::{fake_audio, ConcatMode};
use helpers::TestContext;
use markdown_tts::domain::tts::{
    Assembler, AssemblyOutcome, SynthesisOutcome, SynthesizedArtifact, TtsServiceApi,
    TtsServiceError, VoiceSettings,
};
use pretty_assertions::assert_eq;
use test_context::test_context;

const THREE_SENTENCES: &str = "First sentence. Second sentence. Third sentence.";

/// Budget that puts each of the three sentences in its own chunk
const ONE_SENTENCE_BUDGET: usize = 20;

fn write_segments(ctx: &TestContext, texts: &[&str]) -> Vec<SynthesizedArtifact> {
    std::fs::create_dir_all(ctx.cache_dir()).unwrap();
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let path = ctx.cache_dir().join(format!("segment-{:03}.mp3", i + 1));
            std::fs::write(&path, fake_audio(text)).unwrap();
            SynthesizedArtifact {
                path,
                from_cache: false,
            }
        })
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_concatenate_segments_in_order(ctx: &TestContext) {
    let segments = write_segments(ctx, &["one", "two", "three"]);
    let output = ctx.cache_dir().join("document.mp3");

    let outcome = Assembler::new(ctx.concatenator.clone())
        .assemble(&segments, &output)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AssemblyOutcome::Concatenated {
            path: output.clone(),
            segments: 3
        }
    );
    assert_eq!(std::fs::read(&output).unwrap(), b"[one][two][three]".to_vec());
    assert!(segments.iter().all(|segment| !segment.path.exists()));
    assert_eq!(ctx.cache_entries(), vec!["document.mp3".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_segments_that_were_already_cached(ctx: &TestContext) {
    let mut segments = write_segments(ctx, &["one", "two", "three"]);
    segments[0].from_cache = true;
    let output = ctx.cache_dir().join("document.mp3");

    Assembler::new(ctx.concatenator.clone())
        .assemble(&segments, &output)
        .await
        .unwrap();

    assert!(segments[0].path.exists(), "cache entries outlive the run");
    assert!(!segments[1].path.exists());
    assert!(!segments[2].path.exists());
    assert_eq!(ctx.cache_entries(), vec!["document.mp3", "segment-001.mp3"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_first_segment_without_a_tool(ctx: &mut TestContext) {
    let concatenator = ctx.with_concatenator(ConcatMode::Missing);
    let segments = write_segments(ctx, &["one", "two", "three"]);
    let output = ctx.cache_dir().join("document.mp3");

    let outcome = Assembler::new(concatenator.clone())
        .assemble(&segments, &output)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AssemblyOutcome::FirstSegmentOnly {
            path: output.clone(),
            segments: 3,
            dropped_segments: 2
        }
    );
    assert_eq!(std::fs::read(&output).unwrap(), fake_audio("one"));
    assert!(concatenator.calls().is_empty());
    assert!(
        segments.iter().all(|segment| segment.path.exists()),
        "segments stay for a later full merge"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_segments_when_the_tool_fails(ctx: &mut TestContext) {
    let concatenator = ctx.with_concatenator(ConcatMode::Failing);
    let segments = write_segments(ctx, &["one", "two", "three"]);
    let output = ctx.cache_dir().join("document.mp3");

    let result = Assembler::new(concatenator).assemble(&segments, &output).await;

    assert!(matches!(result, Err(TtsServiceError::Assembly(_))));
    assert!(!output.exists());
    assert!(segments.iter().all(|segment| segment.path.exists()));
    assert_eq!(
        ctx.cache_entries(),
        vec!["segment-001.mp3", "segment-002.mp3", "segment-003.mp3"]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_assemble_long_text_from_ordered_chunks(ctx: &TestContext) {
    let service = ctx.tts_service(ONE_SENTENCE_BUDGET);

    let outcome = service
        .synthesize_text(THREE_SENTENCES, &VoiceSettings::default())
        .await
        .unwrap();

    assert!(matches!(outcome, SynthesisOutcome::Assembled { segments: 3, .. }));
    assert_eq!(
        ctx.backend.calls(),
        vec!["First sentence.", "Second sentence.", "Third sentence."]
    );
    assert_eq!(
        std::fs::read(outcome.path()).unwrap(),
        b"[First sentence.][Second sentence.][Third sentence.]".to_vec()
    );
    assert_eq!(ctx.cache_entries().len(), 1, "segment artifacts are removed");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_degraded_assembly(ctx: &mut TestContext) {
    ctx.with_concatenator(ConcatMode::Missing);
    let service = ctx.tts_service(ONE_SENTENCE_BUDGET);

    let outcome = service
        .synthesize_text(THREE_SENTENCES, &VoiceSettings::default())
        .await
        .unwrap();

    assert!(outcome.is_degraded());
    assert_eq!(
        outcome,
        SynthesisOutcome::AssembledDegraded {
            path: outcome.path().to_path_buf(),
            segments: 3,
            dropped_segments: 2
        }
    );
    assert_eq!(std::fs::read(outcome.path()).unwrap(), fake_audio("First sentence."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stay_degraded_while_the_tool_is_missing(ctx: &mut TestContext) {
    ctx.with_concatenator(ConcatMode::Missing);
    let service = ctx.tts_service(ONE_SENTENCE_BUDGET);
    let voice = VoiceSettings::default();

    service.synthesize_text(THREE_SENTENCES, &voice).await.unwrap();
    let second = service.synthesize_text(THREE_SENTENCES, &voice).await.unwrap();

    assert!(second.is_degraded(), "degraded audio is never a cache hit");
    assert_eq!(ctx.backend.call_count(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_merge_fully_once_the_tool_is_installed(ctx: &mut TestContext) {
    ctx.with_concatenator(ConcatMode::Missing);
    let degraded = ctx
        .tts_service(ONE_SENTENCE_BUDGET)
        .synthesize_text(THREE_SENTENCES, &VoiceSettings::default())
        .await
        .unwrap();
    assert!(degraded.is_degraded());

    ctx.with_concatenator(ConcatMode::Working);
    let full = ctx
        .tts_service(ONE_SENTENCE_BUDGET)
        .synthesize_text(THREE_SENTENCES, &VoiceSettings::default())
        .await
        .unwrap();

    assert!(matches!(full, SynthesisOutcome::Assembled { segments: 3, .. }));
    assert_ne!(full.path(), degraded.path());
    assert_eq!(
        std::fs::read(full.path()).unwrap(),
        b"[First sentence.][Second sentence.][Third sentence.]".to_vec()
    );
    assert_eq!(ctx.backend.call_count(), 3, "segments come from the cache");
    assert!(!degraded.path().exists());
    assert!(ctx
        .cache_entries()
        .iter()
        .all(|name| !name.contains(".degraded.")));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_abort_on_the_first_failing_chunk(ctx: &TestContext) {
    ctx.backend.fail_when_contains("Second");
    let service = ctx.tts_service(ONE_SENTENCE_BUDGET);

    let result = service
        .synthesize_text(THREE_SENTENCES, &VoiceSettings::default())
        .await;

    assert!(matches!(result, Err(TtsServiceError::Synthesis(_))));
    assert_eq!(
        ctx.backend.calls(),
        vec!["First sentence.", "Second sentence."],
        "third chunk is never requested"
    );
    assert!(ctx.concatenator.calls().is_empty());
}
