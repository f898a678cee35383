use crate::e2e::helpers;

use helpers::fixtures::{numbered_sentences, GLOVE_DOCUMENT, GLOVE_NORMALIZED};
use helpers::TestContext;
use markdown_tts::controllers::{ReadOptions, ReadReport};
use markdown_tts::domain::tts::SynthesisOutcome;
use markdown_tts::error::AppError;
use pretty_assertions::assert_eq;
use test_context::test_context;

const BUDGET: usize = 4500;

fn no_play() -> ReadOptions {
    ReadOptions {
        no_play: true,
        ..ReadOptions::default()
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_preview_without_calling_the_backend(ctx: &TestContext) {
    ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);
    let options = ReadOptions {
        dry_run: true,
        ..ReadOptions::default()
    };

    let report = ctx.controller(BUDGET).read("glove", &options).await.unwrap();

    assert_eq!(
        report,
        ReadReport::DryRun {
            source: ctx.root().join("content/main/glove.md"),
            char_count: GLOVE_NORMALIZED.chars().count(),
            byte_len: GLOVE_NORMALIZED.len(),
            preview: GLOVE_NORMALIZED.to_string(),
            planned_segments: 1,
        }
    );
    assert_eq!(ctx.backend.call_count(), 0);
    assert!(ctx.cache_entries().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_read_a_twelve_kilobyte_document_in_three_chunks(ctx: &TestContext) {
    let text = numbered_sentences(120);
    ctx.write_document("content/main/saga/long-tale.md", &text);

    let report = ctx.controller(BUDGET).read("long-tale", &no_play()).await.unwrap();

    let ReadReport::Saved { outcome, .. } = report else {
        panic!("expected a saved report, got {:?}", report);
    };
    assert!(matches!(outcome, SynthesisOutcome::Assembled { segments: 3, .. }));

    let calls = ctx.backend.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("Sentence 0001"));
    assert!(calls[1].starts_with("Sentence 0046"));
    assert!(calls[2].starts_with("Sentence 0091"));
    assert!(calls.iter().all(|chunk| chunk.len() <= BUDGET));

    let expected: Vec<u8> = calls
        .iter()
        .flat_map(|chunk| helpers::fakes::fake_audio(chunk))
        .collect();
    assert_eq!(std::fs::read(outcome.path()).unwrap(), expected);
    assert_eq!(calls.join(" "), text);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reuse_the_assembled_document_on_a_second_read(ctx: &TestContext) {
    ctx.write_document("content/main/long-tale.md", &numbered_sentences(120));
    let controller = ctx.controller(BUDGET);

    let first = controller.read("long-tale", &no_play()).await.unwrap();
    let second = controller.read("long-tale", &no_play()).await.unwrap();

    let (ReadReport::Saved { outcome: first, .. }, ReadReport::Saved { outcome: second, .. }) =
        (first, second)
    else {
        panic!("expected saved reports");
    };
    assert_eq!(second, SynthesisOutcome::Cached { path: first.path().to_path_buf() });
    assert_eq!(ctx.backend.call_count(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_a_voice_override(ctx: &TestContext) {
    ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);
    let controller = ctx.controller(BUDGET);
    let with_voice = ReadOptions {
        voice: Some("en-GB-Neural2-B".to_string()),
        no_play: true,
        ..ReadOptions::default()
    };

    controller.read("glove", &no_play()).await.unwrap();
    controller.read("glove", &with_voice).await.unwrap();

    assert_eq!(ctx.backend.call_count(), 2, "another voice is another cache entry");
    assert_eq!(ctx.cache_entries().len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_on_documents_without_speakable_text(ctx: &TestContext) {
    ctx.write_document("content/main/blank.md", "![cover](cover.png)\n\n---\n\n```\ncode\n```\n");

    let result = ctx.controller(BUDGET).read("blank", &no_play()).await;

    assert!(matches!(result, Err(AppError::EmptyContent(_))));
    assert_eq!(ctx.backend.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unknown_documents(ctx: &TestContext) {
    ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);

    let result = ctx.controller(BUDGET).read("mitten", &no_play()).await;

    let Err(error) = result else {
        panic!("expected DocumentNotFound");
    };
    assert!(matches!(&error, AppError::DocumentNotFound(name) if name == "mitten"));
    assert_eq!(error.exit_status(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_playback_without_a_player(ctx: &TestContext) {
    ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);

    let result = ctx
        .controller(BUDGET)
        .read("glove", &ReadOptions::default())
        .await;

    assert!(matches!(result, Err(AppError::Playback(_))));
    assert_eq!(ctx.backend.call_count(), 1, "audio is still synthesized and cached");
}
