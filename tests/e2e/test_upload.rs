use crate::e2e::helpers;

use helpers::api_client::MultipartForm;
use helpers::fixtures::{blank_pdf, docx_document};
use helpers::mocks::FAKE_MP3_HEADER;
use helpers::{TestContext, TestOptions, TEST_MAX_UPLOAD_BYTES};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use test_context::test_context;

fn output_codes(job: &Value) -> Vec<String> {
    job["outputs"]
        .as_array()
        .expect("Missing outputs")
        .iter()
        .map(|o| o["language_code"].as_str().unwrap().to_string())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_translate_and_voice_a_text_upload(ctx: &TestContext) {
    let form = MultipartForm::new().file("file", "hello.txt", b"Hello world");

    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();

    let job_id = body["job_id"].as_str().expect("Missing job_id");
    assert!(!job_id.is_empty());

    let job = &body["job"];
    assert_eq!(job["status"], "completed");
    assert_eq!(job["source_filename"], "hello.txt");
    assert_eq!(job["source_language"], "en");
    assert!(job["error"].is_null());
    assert_eq!(output_codes(job), vec!["hi", "te", "kn"]);

    let hindi = &job["outputs"][0];
    assert_eq!(hindi["language"], "Hindi");
    assert_eq!(hindi["translated_text"], "[hi] Hello world");

    for output in job["outputs"].as_array().unwrap() {
        let audio = ctx.artifact_file(output["audio_path"].as_str().unwrap());
        let text = ctx.artifact_file(output["text_path"].as_str().unwrap());
        assert!(audio.exists(), "Missing audio {}", audio.display());
        assert!(text.exists(), "Missing text {}", text.display());
    }

    let records = ctx.jobs.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, job_id);
    assert!(ctx.upload_dir_is_empty(), "Staged upload was not removed");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_generated_artifacts(ctx: &TestContext) {
    let form = MultipartForm::new().file("file", "hello.md", b"# Hello");
    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let output = &response.body.as_ref().unwrap()["job"]["outputs"][1];

    let audio = ctx
        .client
        .get(output["audio_path"].as_str().unwrap())
        .await
        .unwrap();
    audio.assert_status(StatusCode::OK);
    assert!(audio.body_bytes.starts_with(FAKE_MP3_HEADER));

    let text = ctx
        .client
        .get(output["text_path"].as_str().unwrap())
        .await
        .unwrap();
    text.assert_status(StatusCode::OK);
    assert_eq!(String::from_utf8(text.body_bytes.clone()).unwrap(), "[te] # Hello");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_docx_paragraphs_in_order(ctx: &TestContext) {
    let document = docx_document(&["First paragraph", "Second paragraph"]);
    let form = MultipartForm::new()
        .text("job_name", "quarterly report")
        .file("file", "Report.DOCX", &document);

    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let job = &response.body.as_ref().unwrap()["job"];
    assert_eq!(job["job_name"], "quarterly report");
    assert_eq!(
        job["outputs"][2]["translated_text"],
        "[kn] First paragraph\nSecond paragraph"
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unsupported_formats(ctx: &TestContext) {
    let form = MultipartForm::new().file("file", "data.csv", b"a,b,c");

    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unsupported file type");
    assert!(ctx.jobs.records().is_empty());
    assert!(ctx.tts.calls.lock().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_file(ctx: &TestContext) {
    let form = MultipartForm::new().text("job_name", "nothing attached");

    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No file uploaded");
    assert!(ctx.jobs.records().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_record_an_error_job_for_a_blank_pdf(ctx: &TestContext) {
    let form = MultipartForm::new().file("file", "scan.pdf", &blank_pdf());

    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Could not extract text from the file.");

    let records = ctx.jobs.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].job.source_filename, "scan.pdf");
    assert!(records[0].job.outputs.is_empty());
    assert_eq!(
        records[0].job.error.as_deref(),
        Some("Could not extract text from the file.")
    );
    assert!(ctx.upload_dir_is_empty());
}

#[tokio::test]
async fn it_should_fail_the_whole_job_when_one_language_fails() {
    let ctx = TestContext::start(TestOptions {
        failing_tts_language: Some("te".to_string()),
    })
    .await;
    let form = MultipartForm::new().file("file", "hello.txt", b"Hello world");

    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Processing failed");

    // Kannada is never attempted once Telugu fails
    assert_eq!(*ctx.tts.calls.lock(), vec!["hi".to_string(), "te".to_string()]);

    let records = ctx.jobs.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].job.outputs.is_empty());
    assert!(records[0]
        .job
        .error
        .as_deref()
        .unwrap()
        .contains("no voice available for 'te'"));
    assert!(ctx.upload_dir_is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_uploads_over_the_size_limit(ctx: &TestContext) {
    let oversized = vec![b'a'; TEST_MAX_UPLOAD_BYTES * 2];
    let form = MultipartForm::new().file("file", "big.txt", &oversized);

    let response = ctx
        .client
        .post_multipart("/api/translate-upload", form)
        .await
        .unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(ctx.jobs.records().is_empty());
}
