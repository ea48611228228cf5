//! Custom voice model and word CRUD against a mock server.

mod common;

use common::MockServerFixture;
use mockito::Matcher;
use watson_lib_rust::text_to_speech::{
    CreateVoiceModelOptions, Translation, UpdateVoiceModelOptions, Word,
};
use watson_lib_rust::Error;

const MODEL_ID: &str = "7c5d3ec5-2dd7-4b77-8b4c-9a3a3a1e2f10";

fn model_path(suffix: &str) -> String {
    format!("/v1/customizations/{}{}", MODEL_ID, suffix)
}

#[tokio::test]
async fn test_create_voice_model() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/customizations")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "test-model",
            "language": "en-GB",
            "description": "a custom voice model"
        })))
        .with_status(201)
        .with_body(format!(r#"{{"customization_id":"{}"}}"#, MODEL_ID))
        .create_async()
        .await;

    let options = CreateVoiceModelOptions::new("test-model")
        .language("en-GB")
        .description("a custom voice model");
    let response = fixture
        .text_to_speech()
        .create_voice_model(&options)
        .await
        .expect("create_voice_model failed");
    assert_eq!(response.status.as_u16(), 201);
    assert_eq!(response.result.customization_id, MODEL_ID);
    assert!(response.result.words.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_voice_model_requires_name() {
    let fixture = MockServerFixture::new().await;
    let err = fixture
        .text_to_speech()
        .create_voice_model(&CreateVoiceModelOptions::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn test_list_voice_models_by_language() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", "/v1/customizations")
        .match_query(Matcher::UrlEncoded("language".into(), "en-GB".into()))
        .with_status(200)
        .with_body(format!(
            r#"{{"customizations":[{{"customization_id":"{}","name":"test-model","language":"en-GB","owner":"owner-1","created":"2019-03-27T10:00:00.000Z","last_modified":"2019-03-27T10:00:00.000Z","description":"a custom voice model"}}]}}"#,
            MODEL_ID
        ))
        .create_async()
        .await;

    let response = fixture
        .text_to_speech()
        .list_voice_models(Some("en-GB"))
        .await
        .unwrap();
    let models = response.result.customizations;
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].language.as_deref(), Some("en-GB"));
    assert!(models[0].words.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_and_get_voice_model() {
    let mut fixture = MockServerFixture::new().await;
    let update = fixture
        .server
        .mock("POST", model_path("").as_str())
        .match_body(Matcher::Json(serde_json::json!({
            "description": "Updated custom voice model",
            "words": [
                {"word": "NCAA", "translation": "N C double A"},
                {"word": "iPhone", "translation": "I phone"}
            ]
        })))
        .with_status(200)
        .create_async()
        .await;
    let get = fixture
        .mock_json(
            "GET",
            &model_path(""),
            200,
            &format!(
                r#"{{"customization_id":"{}","name":"test-model","language":"en-US","description":"Updated custom voice model","words":[{{"word":"NCAA","translation":"N C double A"}},{{"word":"iPhone","translation":"I phone"}}]}}"#,
                MODEL_ID
            ),
        )
        .await;

    let tts = fixture.text_to_speech();
    let options = UpdateVoiceModelOptions {
        description: Some("Updated custom voice model".into()),
        words: vec![
            Word::new("NCAA", "N C double A"),
            Word::new("iPhone", "I phone"),
        ],
        ..Default::default()
    };
    let updated = tts.update_voice_model(MODEL_ID, &options).await.unwrap();
    assert_eq!(updated.status.as_u16(), 200);

    let model = tts.get_voice_model(MODEL_ID).await.unwrap().result;
    assert_eq!(model.description.as_deref(), Some("Updated custom voice model"));
    assert_eq!(model.words.len(), 2);
    assert_eq!(model.words[1], Word::new("iPhone", "I phone"));

    update.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn test_word_lifecycle() {
    let mut fixture = MockServerFixture::new().await;
    let add_words = fixture
        .server
        .mock("POST", model_path("/words").as_str())
        .match_body(Matcher::Json(serde_json::json!({
            "words": [{"word": "MACLs", "translation": "mackles"}]
        })))
        .with_status(200)
        .create_async()
        .await;
    let add_word = fixture
        .server
        .mock("PUT", model_path("/words/IEEE").as_str())
        .match_body(Matcher::Json(serde_json::json!({"translation": "I triple E"})))
        .with_status(200)
        .create_async()
        .await;
    let list = fixture
        .mock_json(
            "GET",
            &model_path("/words"),
            200,
            r#"{"words":[{"word":"IEEE","translation":"I triple E"},{"word":"MACLs","translation":"mackles"},{"word":"NCAA","translation":"N C double A"}]}"#,
        )
        .await;
    let get_word = fixture
        .mock_json(
            "GET",
            &model_path("/words/NCAA"),
            200,
            r#"{"translation":"N C double A"}"#,
        )
        .await;
    let delete_word = fixture
        .mock_empty("DELETE", &model_path("/words/MACLs"), 204)
        .await;
    let delete_model = fixture.mock_empty("DELETE", &model_path(""), 204).await;

    let tts = fixture.text_to_speech();
    tts.add_words(MODEL_ID, &[Word::new("MACLs", "mackles")])
        .await
        .expect("add_words failed");
    tts.add_word(
        MODEL_ID,
        "IEEE",
        &Translation {
            translation: "I triple E".into(),
            part_of_speech: None,
        },
    )
    .await
    .expect("add_word failed");

    let words = tts.list_words(MODEL_ID).await.unwrap().result.words;
    assert_eq!(words.len(), 3);

    let word = tts.get_word(MODEL_ID, "NCAA").await.unwrap();
    assert_eq!(word.result.translation, "N C double A");

    let deleted = tts.delete_word(MODEL_ID, "MACLs").await.unwrap();
    assert_eq!(deleted.status.as_u16(), 204);
    let deleted = tts.delete_voice_model(MODEL_ID).await.unwrap();
    assert_eq!(deleted.status.as_u16(), 204);

    add_words.assert_async().await;
    add_word.assert_async().await;
    list.assert_async().await;
    get_word.assert_async().await;
    delete_word.assert_async().await;
    delete_model.assert_async().await;
}

#[tokio::test]
async fn test_word_path_segment_is_encoded() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "GET",
            &model_path("/words/Wi%20Fi"),
            200,
            r#"{"translation":"why fie"}"#,
        )
        .await;

    let word = fixture
        .text_to_speech()
        .get_word(MODEL_ID, "Wi Fi")
        .await
        .unwrap();
    assert_eq!(word.result.translation, "why fie");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_customization_arguments_are_validated() {
    let fixture = MockServerFixture::new().await;
    let tts = fixture.text_to_speech();

    assert!(matches!(
        tts.get_voice_model("").await.unwrap_err(),
        Error::Validation { .. }
    ));
    assert!(matches!(
        tts.add_words(MODEL_ID, &[]).await.unwrap_err(),
        Error::Validation { .. }
    ));
    assert!(matches!(
        tts.delete_word(MODEL_ID, "").await.unwrap_err(),
        Error::Validation { .. }
    ));
    let empty = Translation {
        translation: String::new(),
        part_of_speech: None,
    };
    assert!(matches!(
        tts.add_word(MODEL_ID, "IEEE", &empty).await.unwrap_err(),
        Error::Validation { .. }
    ));
}

#[tokio::test]
async fn test_unknown_model_is_not_found() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v1/customizations/missing",
            404,
            r#"{"code":404,"error":"Model missing not found"}"#,
        )
        .await;

    let err = fixture
        .text_to_speech()
        .get_voice_model("missing")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_retryable());
}
