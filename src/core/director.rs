//! Narrative director: behavior payload in, path recommendation out.
//!
//! The recommendation does not depend on the payload. Only the metadata
//! timestamp follows the input, falling back to the current time.

use serde::Serialize;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::core::config::DirectorConfig;
use crate::core::convert::{
    to_emotion_prediction_object, to_player_behavior_proto, ConvertError, EmotionFields,
};
use crate::schema::behavior::PlayerBehaviorData;
use crate::schema::PlainObject;

/// Response body for a narrative-path request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativePath {
    pub next_node: String,
    pub content_variant: String,
    pub dialogue: String,
    /// Exported emotion prediction.
    pub metadata: PlainObject,
}

impl NarrativePath {
    pub fn to_json(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Stub planner serving the configured path for every request.
#[derive(Debug, Clone)]
pub struct NarrativeDirector {
    config: DirectorConfig,
}

impl NarrativeDirector {
    pub fn new(config: DirectorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(DirectorConfig::default())
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// Plan a path, stamping the metadata with the current time when the
    /// payload carries no timestamp.
    pub fn plan(&self, payload: &Value) -> NarrativePath {
        self.plan_at(payload, epoch_millis())
    }

    /// Plan a path with an explicit fallback time.
    pub fn plan_at(&self, payload: &Value, now_ms: i64) -> NarrativePath {
        self.plan_behavior(&to_player_behavior_proto(payload), now_ms)
    }

    /// Plan a path for an already converted behavior record.
    ///
    /// A zero timestamp on the record is treated like a missing one.
    pub fn plan_behavior(&self, behavior: &PlayerBehaviorData, now_ms: i64) -> NarrativePath {
        let timestamp_ms = match behavior.timestamp_ms() {
            0 => now_ms,
            observed => observed,
        };

        debug!(
            session_id = behavior.session_id(),
            timestamp_ms,
            choices = behavior.recent_choices().len(),
            "planning narrative path"
        );

        let metadata = to_emotion_prediction_object(EmotionFields {
            dominant_emotion: Some(self.config.dominant_emotion.clone()),
            confidence: Some(self.config.confidence),
            timestamp_ms: Some(timestamp_ms),
        });

        NarrativePath {
            next_node: self.config.next_node.clone(),
            content_variant: self.config.content_variant.clone(),
            dialogue: self.config.dialogue.clone(),
            metadata,
        }
    }
}

impl Default for NarrativeDirector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Milliseconds since the Unix epoch; `0` if the clock is before it.
pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_serves_configured_path() {
        let director = NarrativeDirector::with_defaults();
        let path = director.plan_at(&json!({ "sessionId": "s1" }), 99);
        assert_eq!(path.next_node, "start");
        assert_eq!(path.content_variant, "default");
        assert_eq!(path.dialogue, "Welcome");
        assert_eq!(path.metadata["dominantEmotion"], json!("engaged"));
        assert_eq!(path.metadata["confidence"], json!(0.85));
    }

    #[test]
    fn plan_uses_payload_timestamp() {
        let director = NarrativeDirector::with_defaults();
        let path = director.plan_at(&json!({ "timestampMs": 1_700_000_000_000i64 }), 99);
        assert_eq!(path.metadata["timestampMs"], json!(1_700_000_000_000i64));
    }

    #[test]
    fn plan_falls_back_to_now_without_timestamp() {
        let director = NarrativeDirector::with_defaults();
        assert_eq!(director.plan_at(&json!({}), 1234).metadata["timestampMs"], json!(1234));
        assert_eq!(
            director.plan_at(&json!({ "timestampMs": 0 }), 1234).metadata["timestampMs"],
            json!(1234)
        );
    }

    #[test]
    fn plan_with_clock_stamps_recent_time() {
        let before = epoch_millis();
        let path = NarrativeDirector::default().plan(&Value::Null);
        let stamped = path.metadata["timestampMs"].as_i64().unwrap();
        assert!(stamped >= before);
    }

    #[test]
    fn plan_behavior_matches_plan_at() {
        let director = NarrativeDirector::with_defaults();
        let behavior = PlayerBehaviorData::new()
            .with_session_id("s2")
            .with_timestamp_ms(55);
        assert_eq!(
            director.plan_behavior(&behavior, 1),
            director.plan_at(&json!({ "sessionId": "s2", "timestampMs": 55 }), 1)
        );
    }

    #[test]
    fn empty_configured_emotion_exports_blank() {
        let director = NarrativeDirector::new(DirectorConfig {
            dominant_emotion: String::new(),
            ..Default::default()
        });
        let path = director.plan_at(&json!({}), 5);
        assert_eq!(path.metadata["dominantEmotion"], json!(""));
    }

    #[test]
    fn path_serializes_with_camel_case_keys() {
        let path = NarrativeDirector::with_defaults().plan_at(&json!({}), 7);
        let value: Value = serde_json::from_str(&path.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "nextNode": "start",
                "contentVariant": "default",
                "dialogue": "Welcome",
                "metadata": {
                    "dominantEmotion": "engaged",
                    "confidence": 0.85,
                    "timestampMs": 7,
                },
            })
        );
    }
}
