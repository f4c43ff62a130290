//! Integration tests for the Pokémon ability tool


use lookup_tools::testing::fixtures;
use lookup_tools::tools::ToolError;
use serde_json::{json, Value};
use test_helpers::tool_system_against;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOOL: &str = "pokemon.ability.get";

async fn mount_static(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/ability/static"))
        .and(header("user-agent", "mcp-pokemon/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::static_ability()))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_ability_get_defaults_to_english() {
    let mock_server = MockServer::start().await;
    mount_static(&mock_server).await;

    let tools = tool_system_against(&mock_server, &[TOOL]).await;
    let result = tools
        .execute_tool(TOOL, &json!({"nameOrId": "Static"}))
        .await
        .unwrap();

    let summary: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(summary["id"], json!(9));
    assert_eq!(
        summary["short_effect"],
        json!("Has a 30% chance of paralyzing attacking Pokémon on contact.")
    );
    assert_eq!(summary["generation"], json!("generation-iii"));
    assert_eq!(summary["pokemon_with_ability"], json!(["pikachu", "raichu"]));
    assert_eq!(
        summary["url"],
        json!(format!("{}/ability/9", mock_server.uri()))
    );
}

#[tokio::test]
async fn test_ability_get_unsupported_language_falls_back_to_first_entry() {
    let mock_server = MockServer::start().await;
    mount_static(&mock_server).await;

    let tools = tool_system_against(&mock_server, &[TOOL]).await;
    let result = tools
        .execute_tool(TOOL, &json!({"nameOrId": "static", "lang": "xx"}))
        .await
        .unwrap();

    let summary: Value = serde_json::from_str(&result).unwrap();
    let first_entry = &fixtures::static_ability()["effect_entries"][0];
    assert_eq!(summary["effect"], first_entry["effect"]);
    assert_eq!(summary["short_effect"], first_entry["short_effect"]);
}

#[tokio::test]
async fn test_ability_get_without_pokemon_returns_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ability/mountaineer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10060,
            "name": "mountaineer",
            "effect_entries": [],
            "pokemon": []
        })))
        .mount(&mock_server)
        .await;

    let tools = tool_system_against(&mock_server, &[TOOL]).await;
    let result = tools
        .execute_tool(TOOL, &json!({"nameOrId": "mountaineer"}))
        .await
        .unwrap();

    let summary: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(summary["pokemon_with_ability"], json!([]));
    assert_eq!(summary["effect"], Value::Null);
    assert_eq!(summary["generation"], Value::Null);
}

#[tokio::test]
async fn test_ability_get_not_found_is_a_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ability/telepathy2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let tools = tool_system_against(&mock_server, &[TOOL]).await;
    let result = tools
        .execute_tool(TOOL, &json!({"nameOrId": "Telepathy2"}))
        .await
        .unwrap();

    assert_eq!(result, "No ability found for \"Telepathy2\".");
}

#[tokio::test]
async fn test_ability_get_rate_limited_is_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ability/static"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&mock_server)
        .await;

    let tools = tool_system_against(&mock_server, &[TOOL]).await;
    let error = tools
        .execute_tool(TOOL, &json!({"nameOrId": "static"}))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "PokéAPI error 429: slow down");
}

#[tokio::test]
async fn test_ability_get_empty_language_falls_back_to_first_entry() {
    let mock_server = MockServer::start().await;
    mount_static(&mock_server).await;

    let tools = tool_system_against(&mock_server, &[TOOL]).await;
    let result = tools
        .execute_tool(TOOL, &json!({"nameOrId": "static", "lang": ""}))
        .await
        .unwrap();

    let summary: Value = serde_json::from_str(&result).unwrap();
    let first_entry = &fixtures::static_ability()["effect_entries"][0];
    assert_eq!(summary["short_effect"], first_entry["short_effect"]);
}

#[tokio::test]
async fn test_ability_get_rejects_non_string_language() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::static_ability()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let tools = tool_system_against(&mock_server, &[TOOL]).await;
    let result = tools
        .execute_tool(TOOL, &json!({"nameOrId": "static", "lang": 9}))
        .await;

    match result {
        Err(ToolError::Validation { field, .. }) => assert_eq!(field, "lang"),
        other => panic!("expected validation error, got {other:?}"),
    }
}
