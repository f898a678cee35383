use crate::e2e::helpers;

use helpers::fixtures::{GLOVE_DOCUMENT, GLOVE_NORMALIZED};
use helpers::TestContext;
use markdown_tts::domain::document::{DocumentServiceApi, DocumentServiceError};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_prefer_exact_name_over_longer_match(ctx: &TestContext) {
    ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);
    ctx.write_document("content/sagas/school-daze/glove-student.md", "Glove at school.");

    let found = ctx
        .document_service()
        .locate("glove")
        .await
        .unwrap()
        .expect("glove should be found");

    assert_eq!(found.path, ctx.root().join("content/main/glove.md"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_match_names_case_insensitively(ctx: &TestContext) {
    ctx.write_document("content/main/Glove.md", GLOVE_DOCUMENT);

    let found = ctx.document_service().locate("GLOVE").await.unwrap();

    assert_eq!(
        found.map(|m| m.path),
        Some(ctx.root().join("content/main/Glove.md"))
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unknown_names_as_not_found(ctx: &TestContext) {
    ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);

    let found = ctx.document_service().locate("mitten").await.unwrap();

    assert!(found.is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_resolution_for_unknown_names(ctx: &TestContext) {
    let result = ctx.document_service().resolve("mitten").await;

    assert!(matches!(result, Err(DocumentServiceError::NotFound(name)) if name == "mitten"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_an_existing_markdown_path_directly(ctx: &TestContext) {
    let path = ctx.write_document("notes/elsewhere.md", "Outside the content roots.");

    let resolved = ctx
        .document_service()
        .resolve(&path.to_string_lossy())
        .await
        .unwrap();

    assert_eq!(resolved, path);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_load_and_normalize_a_document(ctx: &TestContext) {
    let path = ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);

    let document = ctx.document_service().load(&path).await.unwrap();

    assert_eq!(document.raw_text, GLOVE_DOCUMENT);
    assert_eq!(document.normalized_text, GLOVE_NORMALIZED);
    assert!(!document.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_documents_under_content_roots(ctx: &TestContext) {
    ctx.write_document("content/main/glove.md", GLOVE_DOCUMENT);
    ctx.write_document("content/main/saga/boot.md", "Boot.");
    ctx.write_document("drafts/ignored.md", "Not under a content root.");

    let documents = ctx.document_service().list_documents().await.unwrap();

    let paths: Vec<PathBuf> = documents.iter().map(|d| d.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("content/main/glove.md"),
            PathBuf::from("content/main/saga/boot.md"),
        ]
    );
    assert_eq!(documents[0].name, "glove");
}
