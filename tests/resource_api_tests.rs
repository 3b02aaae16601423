//! Integration tests for the typed endpoint wrappers against a mock server.
//!
//! Every test checks both sides of the exchange: what went over the wire
//! (path, method, query, body) and how the response was decoded.

mod common;

use common::{
    TEST_TIMEOUT, TEST_TOKEN, client_for, parse_multipart, query_values, single_request, with_timeout,
};
use dialogflow::{
    ContextObject, EntityEntry, EntityObject, ErrorType, IntentObject, LanguageTag, Message,
    QueryEvent, QueryRequest, UserEntityObject,
};
use serde_json::{Value, json};
use std::io::Write;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok_status() -> Value {
    json!({"code": 200, "errorType": "success"})
}

// =============================================================================
// Intents
// =============================================================================

#[tokio::test]
async fn test_list_intents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/intents"))
        .and(query_param("v", "20150910"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "3e5f",
                "name": "weather",
                "contextIn": [],
                "contextOut": [{"name": "weather", "lifespan": 5}],
                "actions": ["weather.get"],
                "parameters": [{"name": "city", "value": "$geo-city", "dataType": "@sys.geo-city", "required": true}],
                "priority": 500000,
                "fallbackIntent": false
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let intents = with_timeout(TEST_TIMEOUT, client.intents()).await.unwrap();

    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].name, "weather");
    assert_eq!(intents[0].context_out[0].lifespan, 5);
    assert!(intents[0].parameters[0].required);
    assert_eq!(intents[0].parameters[0].data_type, "@sys.geo-city");
}

#[tokio::test]
async fn test_get_intent_decodes_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/intents/3e5f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "3e5f",
            "name": "weather",
            "auto": true,
            "userSays": [{"data": [{"text": "weather in "}, {"text": "Paris", "alias": "city", "meta": "@sys.geo-city"}], "isTemplate": false}],
            "responses": [{
                "action": "weather.get",
                "messages": [
                    {"type": 0, "speech": "It is sunny"},
                    {"type": "2", "title": "More?", "replies": ["yes", "no"]},
                    {"type": "simple_response", "platform": "google", "textToSpeech": "Sunny"}
                ]
            }],
            "priority": 500000
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let intent = client.intent("3e5f").await.unwrap();

    assert!(intent.auto);
    assert_eq!(intent.user_says[0].data[1].alias.as_deref(), Some("city"));
    let messages = &intent.responses[0].messages;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].as_speech(), Some(&["It is sunny".to_string()][..]));
    assert_eq!(messages[1].type_code(), Some(2));
    assert!(messages[2].is_unknown());
    assert_eq!(messages[2].platform(), Some("google"));
}

#[tokio::test]
async fn test_create_intent_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/intents"))
        .and(header("content-type", "application/json;charset=utf-8"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "new-id", "status": ok_status()})),
        )
        .mount(&server)
        .await;

    let intent = IntentObject {
        name: "greeting".to_string(),
        templates: vec!["hello".to_string()],
        ..IntentObject::default()
    };
    let client = client_for(&server);
    let response = client.create_intent(&intent).await.unwrap().check().unwrap();
    assert_eq!(response.id.as_deref(), Some("new-id"));

    let request = single_request(&server).await;
    let sent: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent["name"], "greeting");
    assert_eq!(sent["templates"], json!(["hello"]));
    assert!(sent.get("id").is_none());
}

#[tokio::test]
async fn test_update_and_delete_intent() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/intents/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/intents/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let intent = IntentObject {
        name: "renamed".to_string(),
        ..IntentObject::default()
    };
    client.update_intent("abc", &intent).await.unwrap().check().unwrap();
    client.delete_intent("abc").await.unwrap().check().unwrap();
}

// =============================================================================
// Entities
// =============================================================================

#[tokio::test]
async fn test_list_and_get_entities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/entities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "e1", "name": "fruit", "count": 2, "preview": "apple, banana"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/entities/fruit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e1",
            "name": "fruit",
            "entries": [{"value": "apple", "synonyms": ["apple", "green apple"]}],
            "isEnum": false,
            "automatedExpansion": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let summaries = client.entities().await.unwrap();
    assert_eq!(summaries[0].count, 2);

    let entity = client.entity("fruit").await.unwrap();
    assert!(entity.automated_expansion);
    assert_eq!(entity.entries[0].synonyms, vec!["apple", "green apple"]);
}

#[tokio::test]
async fn test_entity_name_is_path_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/entities/my%20fruit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "my fruit"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entity = client.entity("my fruit").await.unwrap();
    assert_eq!(entity.name, "my fruit");
}

#[tokio::test]
async fn test_entity_mutations_use_expected_methods() {
    let server = MockServer::start().await;
    let ok = ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()}));
    for (verb, route) in [
        ("POST", "/v1/entities"),
        ("PUT", "/v1/entities"),
        ("PUT", "/v1/entities/fruit"),
        ("POST", "/v1/entities/fruit/entries"),
        ("PUT", "/v1/entities/fruit/entries"),
        ("DELETE", "/v1/entities/fruit/entries"),
        ("DELETE", "/v1/entities/fruit"),
    ] {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ok.clone())
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let entity = EntityObject {
        name: "fruit".to_string(),
        entries: vec![EntityEntry::new("apple", ["apple", "pomme"])],
        ..EntityObject::default()
    };
    let entries = vec![EntityEntry::new("pear", ["pear"])];

    client.create_entity(&entity).await.unwrap();
    client
        .create_or_update_entities(std::slice::from_ref(&entity))
        .await
        .unwrap();
    client.update_entity("fruit", &entity).await.unwrap();
    client.add_entity_entries("fruit", &entries).await.unwrap();
    client.update_entity_entries("fruit", &entries).await.unwrap();
    client
        .delete_entity_entries("fruit", &["pear"])
        .await
        .unwrap();
    client.delete_entity("fruit").await.unwrap();
}

#[tokio::test]
async fn test_delete_entity_entries_sends_values() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/entities/fruit/entries"))
        .and(body_json(json!(["apple", "pear"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .delete_entity_entries("fruit", &["apple", "pear"])
        .await
        .unwrap();
}

// =============================================================================
// User entities
// =============================================================================

#[tokio::test]
async fn test_create_user_entities_wraps_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/userEntities"))
        .and(body_json(json!({
            "sessionId": "s-1",
            "entities": [{
                "sessionId": "s-1",
                "name": "fruit",
                "extend": true,
                "entries": [{"value": "durian", "synonyms": ["durian"]}]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entity = UserEntityObject {
        session_id: "s-1".to_string(),
        name: "fruit".to_string(),
        extend: true,
        entries: vec![EntityEntry::new("durian", ["durian"])],
        ..UserEntityObject::default()
    };
    client
        .create_user_entities("s-1", &[entity])
        .await
        .unwrap()
        .check()
        .unwrap();
}

#[tokio::test]
async fn test_user_entity_get_update_delete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/userEntities/fruit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessionId": "s-1",
            "name": "fruit",
            "extend": false,
            "entries": [{"value": "durian", "synonyms": []}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/userEntities/fruit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/userEntities/fruit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entity = client.user_entity("fruit").await.unwrap();
    assert_eq!(entity.session_id, "s-1");
    assert_eq!(entity.entries[0].value, "durian");

    client.update_user_entity("fruit", &entity).await.unwrap();
    client.delete_user_entity("fruit").await.unwrap();
}

// =============================================================================
// Contexts
// =============================================================================

#[tokio::test]
async fn test_create_contexts_sends_session_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/contexts"))
        .and(query_param("sessionId", "abc"))
        .and(body_json(json!([{"name": "weather", "lifespan": 5}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "names": ["weather"],
            "status": ok_status()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_contexts("abc", &[ContextObject::new("weather", 5)])
        .await
        .unwrap();
    assert_eq!(created.names, vec!["weather"]);

    let request = single_request(&server).await;
    assert_eq!(query_values(&request, "v"), vec!["20150910"]);
}

#[tokio::test]
async fn test_list_get_and_delete_contexts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/contexts"))
        .and(query_param("sessionId", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "weather", "lifespan": 4, "parameters": {"city": "Rome"}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/contexts/weather"))
        .and(query_param("sessionId", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"name": "weather", "lifespan": 4}
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/contexts/weather"))
        .and(query_param("sessionId", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": ok_status()})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/contexts"))
        .and(query_param("sessionId", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deleted": ["weather", "shopping"],
            "status": ok_status()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let contexts = client.contexts("abc").await.unwrap();
    assert_eq!(contexts[0].parameters["city"], "Rome");

    let context = client.context("abc", "weather").await.unwrap();
    assert_eq!(context.lifespan, Some(4));

    client.delete_context("abc", "weather").await.unwrap();
    let deleted = client.delete_contexts("abc").await.unwrap();
    assert_eq!(deleted.deleted.len(), 2);
}

#[tokio::test]
async fn test_delete_contexts_sends_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/contexts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_contexts("abc").await.unwrap();

    let request = single_request(&server).await;
    assert!(request.body.is_empty());
    assert!(request.headers.get("content-type").is_none());
}

// =============================================================================
// Query
// =============================================================================

#[tokio::test]
async fn test_query_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "b340a1f7",
            "timestamp": "2017-09-19T21:16:44.832Z",
            "lang": "en",
            "result": {
                "source": "agent",
                "resolvedQuery": "weather in Paris",
                "action": "weather.get",
                "actionIncomplete": false,
                "parameters": {"city": "Paris"},
                "contexts": [],
                "metadata": {"intentId": "3e5f", "intentName": "weather", "webhookUsed": "true"},
                "fulfillment": {
                    "speech": "It is sunny in Paris",
                    "messages": [{"type": 0, "speech": "It is sunny in Paris"}]
                },
                "score": 0.92
            },
            "status": ok_status(),
            "sessionId": "s-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = QueryRequest::new("s-1", "weather in Paris")
        .with_lang(LanguageTag::English)
        .with_timezone("Europe/Paris");
    let response = client.query_text(&query).await.unwrap();

    assert_eq!(response.lang, Some(LanguageTag::English));
    assert_eq!(response.result.action, "weather.get");
    assert!(response.result.metadata.webhook_used());
    assert_eq!(
        response.result.fulfillment.messages,
        vec![Message::text("It is sunny in Paris")]
    );
    response.status.as_ref().unwrap().check().unwrap();

    let request = single_request(&server).await;
    let sent: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent["query"], json!(["weather in Paris"]));
    assert_eq!(sent["sessionId"], "s-1");
    assert_eq!(sent["lang"], "en");
    assert_eq!(sent["timezone"], "Europe/Paris");
}

#[tokio::test]
async fn test_query_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"fulfillment": {"speech": "Welcome!"}},
            "sessionId": "s-2"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let event = QueryEvent {
        name: "WELCOME".to_string(),
        ..QueryEvent::default()
    };
    let response = client
        .query_text(&QueryRequest::event("s-2", event))
        .await
        .unwrap();
    assert_eq!(response.result.fulfillment.speech, "Welcome!");

    let request = single_request(&server).await;
    let sent: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(sent["event"]["name"], "WELCOME");
    assert!(sent.get("query").is_none());
}

#[tokio::test]
async fn test_query_voice_sends_request_and_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"resolvedQuery": "hello"},
            "sessionId": "s-3"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let audio_path = dir.path().join("hello.wav");
    std::fs::File::create(&audio_path)
        .unwrap()
        .write_all(b"RIFF-fake-audio")
        .unwrap();

    let client = client_for(&server);
    let response = client
        .query_voice(&QueryRequest::new("s-3", ""), audio_path.as_path())
        .await
        .unwrap();
    assert_eq!(response.result.resolved_query, "hello");

    let request = single_request(&server).await;
    let parts = parse_multipart(&request);
    let (request_name, request_json) = &parts["request"];
    assert!(request_name.is_none());
    let sent: Value = serde_json::from_slice(request_json).unwrap();
    assert_eq!(sent["sessionId"], "s-3");

    let (file_name, audio) = &parts["voiceData"];
    assert_eq!(file_name.as_deref(), Some("hello.wav"));
    assert_eq!(audio.as_slice(), b"RIFF-fake-audio");
}

#[tokio::test]
async fn test_query_voice_missing_file_sends_nothing() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .query_voice(&QueryRequest::new("s-3", ""), "/definitely/not/here.wav")
        .await
        .unwrap_err();
    assert!(matches!(err, dialogflow::DialogflowError::Filesystem { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// Text to speech
// =============================================================================

#[tokio::test]
async fn test_tts_returns_raw_audio() {
    let audio: Vec<u8> = vec![0x52, 0x49, 0x46, 0x46, 0x00, 0xff, 0x10, 0x80];
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tts"))
        .and(query_param("text", "hello world"))
        .and(header("accept-language", "en"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/wav")
                .set_body_bytes(audio.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bytes = client
        .tts("hello world", &LanguageTag::English)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), audio.as_slice());
}

// =============================================================================
// Status objects on error responses
// =============================================================================

#[tokio::test]
async fn test_error_status_body_is_decoded_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/entities/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "id": "req-1",
            "status": {
                "code": 404,
                "errorType": "not_found",
                "errorId": "err-1",
                "errorDetails": "Entity 'ghost' not found"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.delete_entity("ghost").await.unwrap();
    let status = response.status.clone().unwrap();
    assert_eq!(status.error_type, ErrorType::NotFound);
    assert!(!status.is_success());

    let err = response.check().unwrap_err();
    assert_eq!(err.status().map(|s| s.code), Some(404));
    assert!(err.to_string().contains("Entity 'ghost' not found"));
}

fn not_found_body(details: &str) -> Value {
    json!({
        "id": "req-1",
        "timestamp": "2017-09-19T21:16:44.832Z",
        "status": {
            "code": 404,
            "errorType": "not_found",
            "errorId": "err-1",
            "errorDetails": details
        }
    })
}

#[tokio::test]
async fn test_missing_intent_decodes_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/intents/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body("Intent not found")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let intent = client.intent("nope").await.unwrap();
    assert!(intent.name.is_empty());
    let status = intent.status.unwrap();
    assert_eq!(status.error_type, ErrorType::NotFound);
    assert_eq!(status.code, 404);
}

#[tokio::test]
async fn test_missing_entity_decodes_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/entities/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body("Entity not found")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entity = client.entity("nope").await.unwrap();
    assert!(entity.entries.is_empty());
    let status = entity.status.unwrap();
    assert_eq!(status.error_type, ErrorType::NotFound);
    assert!(status.check().is_err());
}

#[tokio::test]
async fn test_missing_user_entity_decodes_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/userEntities/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(not_found_body("User entity not found")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let entity = client.user_entity("nope").await.unwrap();
    assert_eq!(entity.id.as_deref(), Some("req-1"));
    let status = entity.status.unwrap();
    assert_eq!(status.error_type, ErrorType::NotFound);
    assert_eq!(status.error_details.as_deref(), Some("User entity not found"));
}
