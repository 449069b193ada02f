//! Director integration tests: shipped configuration and full responses.

use narrative_director::core::config::DirectorConfig;
use narrative_director::core::director::NarrativeDirector;
use serde_json::{json, Value};
use std::path::Path;

#[test]
fn shipped_config_matches_defaults() {
    let config = DirectorConfig::load_from_ron(Path::new("director_data/default.ron")).unwrap();
    assert_eq!(config, DirectorConfig::default());
}

#[test]
fn response_for_fixture_body() {
    let body: Value =
        serde_json::from_slice(&std::fs::read("tests/fixtures/full_behavior.json").unwrap())
            .unwrap();
    let director = NarrativeDirector::new(
        DirectorConfig::load_from_ron(Path::new("director_data/default.ron")).unwrap(),
    );

    let response: Value =
        serde_json::from_str(&director.plan_at(&body, 1).to_json().unwrap()).unwrap();

    assert_eq!(
        response,
        json!({
            "nextNode": "start",
            "contentVariant": "default",
            "dialogue": "Welcome",
            "metadata": {
                "dominantEmotion": "engaged",
                "confidence": 0.85,
                "timestampMs": 1_717_171_717_171i64,
            },
        })
    );
}

#[test]
fn custom_config_changes_path_only() {
    let config = DirectorConfig::parse_ron(
        r#"(next_node: "ambush", dialogue: "Something stirs.", confidence: 0.3)"#,
    )
    .unwrap();
    let path = NarrativeDirector::new(config).plan_at(&json!({ "timestampMs": 10 }), 1);

    assert_eq!(path.next_node, "ambush");
    assert_eq!(path.content_variant, "default");
    assert_eq!(path.dialogue, "Something stirs.");
    assert_eq!(path.metadata["confidence"], json!(0.3));
    assert_eq!(path.metadata["timestampMs"], json!(10));
}

#[test]
fn malformed_body_fields_still_get_a_path() {
    let director = NarrativeDirector::with_defaults();
    let path = director.plan_at(
        &json!({ "sessionId": 5, "timestampMs": "soon", "recentChoices": {} }),
        777,
    );
    assert_eq!(path.next_node, "start");
    assert_eq!(path.metadata["timestampMs"], json!(777));
}
