use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_voice_catalog(ctx: &TestContext) {
    let response = ctx.client.get("/voices").await.unwrap();

    response.assert_status(StatusCode::OK);

    assert_eq!(
        response.body,
        Some(json!({
            "voices": {
                "a": ["af_heart", "af_sky", "af_sarah", "af_nicole", "af_sweet", "am_adam", "am_michael"],
                "b": ["bf_ema", "bm_isaac"]
            }
        }))
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_load_pipelines_when_listing_voices(ctx: &TestContext) {
    ctx.client
        .get("/voices")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    assert_eq!(ctx.factory.created(), 0);
}
