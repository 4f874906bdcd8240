use crate::e2e::helpers;

use helpers::fake_backend::{FakeMode, SAMPLES_PER_WORD};
use helpers::{assert_tts_response, audio_id, TestContext};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_text_to_speech(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts",
            &json!({ "text": "Hello world", "voice": "af_heart", "speed": 1.0 }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_tts_response(body);
    // two words at 0.1s each
    assert_eq!(body.get("duration").and_then(|v| v.as_f64()), Some(0.2));
    assert!(body.get("phonemes").is_none());

    let audio = ctx
        .client
        .get(&format!("/audio/{}", audio_id(body)))
        .await
        .unwrap();
    audio.assert_status(StatusCode::OK);
    assert_eq!(ctx.audio_files(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_defaults_for_voice_and_speed(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Default voice please." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_tts_response(response.body.as_ref().unwrap());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_phonemes_when_requested(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts",
            &json!({
                "text": "Hello there. Kokoro speaks!",
                "voice": "af_heart",
                "return_phonemes": true
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body.get("phonemes").and_then(|v| v.as_str()),
        Some("hello there. | kokoro speaks!")
    );
    // four words across two chunks
    assert_eq!(body.get("duration").and_then(|v| v.as_f64()), Some(0.4));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_scale_duration_with_speed(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts",
            &json!({ "text": "One two three four", "voice": "am_adam", "speed": 2.0 }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let expected = (4 * SAMPLES_PER_WORD / 2) as f64 / 24000.0;
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("duration").and_then(|v| v.as_f64()), Some(expected));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    for text in ["", "   \n\t"] {
        let response = ctx
            .client
            .post("/tts", &json!({ "text": text, "voice": "af_heart" }))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Text cannot be empty");
    }

    assert_eq!(ctx.audio_files(), 0);
    assert_eq!(ctx.factory.created(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_limit(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts",
            &json!({ "text": "x".repeat(5001), "voice": "af_heart" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text too long (max 5000 characters)");
    assert_eq!(ctx.audio_files(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_text_at_limit(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts",
            &json!({ "text": "x".repeat(5000), "voice": "af_heart" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_enforce_speed_range(ctx: &TestContext) {
    for speed in [0.49, 2.01, 0.0, 2.0000001, 0.49999999] {
        let response = ctx
            .client
            .post(
                "/tts",
                &json!({ "text": "Hello", "voice": "af_heart", "speed": speed }),
            )
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Speed must be between 0.5 and 2.0");
    }

    for speed in [0.5, 2.0] {
        let response = ctx
            .client
            .post(
                "/tts",
                &json!({ "text": "Hello", "voice": "af_heart", "speed": speed }),
            )
            .await
            .unwrap();

        response.assert_status(StatusCode::OK);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_lang_code(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hola", "voice": "ef_dora" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unsupported lang_code: e");

    let response = ctx
        .client
        .post(
            "/tts",
            &json!({ "text": "Hola", "voice": "af_heart", "lang_code": "z" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unsupported lang_code: z");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_voice(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello", "voice": "af_nobody" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Voice af_nobody not available for lang_code a");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_voice_from_other_lang_code(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/tts",
            &json!({ "text": "Hello", "voice": "af_heart", "lang_code": "b" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Voice af_heart not available for lang_code b");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_text_field(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "voice": "af_heart" }))
        .await
        .unwrap();

    assert!(response.status.is_client_error());
    assert_eq!(ctx.audio_files(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_initialize_each_pipeline_once(ctx: &TestContext) {
    for text in ["First.", "Second.", "Third."] {
        ctx.client
            .post("/tts", &json!({ "text": text, "voice": "af_sarah" }))
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    assert_eq!(ctx.factory.created(), 1);
    assert_eq!(ctx.audio_files(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_share_pipeline_across_concurrent_requests(ctx: &TestContext) {
    let requests = (0..6).map(|i| {
        let client = ctx.client.clone();
        async move {
            client
                .post(
                    "/tts",
                    &json!({ "text": format!("Request number {}.", i), "voice": "bm_isaac" }),
                )
                .await
                .unwrap()
        }
    });

    let responses = futures::future::join_all(requests).await;

    let mut ids: Vec<String> = responses
        .iter()
        .map(|response| {
            response.assert_status(StatusCode::OK);
            audio_id(response.body.as_ref().unwrap())
        })
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 6);
    assert_eq!(ctx.factory.created(), 1);
}

#[tokio::test]
async fn it_should_fail_when_backend_produces_no_audio() {
    let ctx = TestContext::with_mode(FakeMode::Silent).await.unwrap();

    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello world", "voice": "af_heart" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("no audio produced");
    assert_eq!(ctx.audio_files(), 0);
}

#[tokio::test]
async fn it_should_surface_backend_init_failure_and_retry() {
    let ctx = TestContext::with_mode(FakeMode::BrokenInit).await.unwrap();

    for _ in 0..2 {
        let response = ctx
            .client
            .post("/tts", &json!({ "text": "Hello world", "voice": "af_heart" }))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
            .assert_error_message("sidecar unreachable");
    }

    let health = ctx.client.get("/health").await.unwrap();
    assert_eq!(
        health.body.as_ref().and_then(|b| b.get("pipelines_loaded")),
        Some(&json!([]))
    );
}
