//! Payload conversion between loose JSON bodies and protocol records.
//!
//! Inbound: a request body becomes a live `PlayerBehaviorData`, filling only
//! the fields the body actually carries. Outbound: emotion fields become an
//! `EmotionPrediction` and are exported straight to a plain object.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::presence::{as_integer, populate, unrecognized_keys, FieldRule, Presence};
use crate::schema::behavior::{keys, PlayerBehaviorData};
use crate::schema::emotion::EmotionPrediction;
use crate::schema::PlainObject;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Optional inputs for an emotion prediction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmotionFields {
    pub dominant_emotion: Option<String>,
    pub confidence: Option<f64>,
    pub timestamp_ms: Option<i64>,
}

const BEHAVIOR_FIELDS: &[FieldRule<PlayerBehaviorData>] = &[
    FieldRule {
        key: keys::SESSION_ID,
        presence: Presence::Truthy,
        apply: apply_session_id,
    },
    FieldRule {
        key: keys::TIMESTAMP_MS,
        presence: Presence::NotNull,
        apply: apply_timestamp_ms,
    },
    FieldRule {
        key: keys::DECISION_LATENCY_MS,
        presence: Presence::NotNull,
        apply: apply_decision_latency_ms,
    },
    FieldRule {
        key: keys::ACTION_FREQUENCY,
        presence: Presence::NotNull,
        apply: apply_action_frequency,
    },
    FieldRule {
        key: keys::RECENT_CHOICES,
        presence: Presence::Sequence,
        apply: apply_recent_choices,
    },
];

fn apply_session_id(record: &mut PlayerBehaviorData, value: &Value) -> bool {
    match value.as_str() {
        Some(session_id) => {
            record.set_session_id(session_id);
            true
        }
        None => false,
    }
}

fn apply_timestamp_ms(record: &mut PlayerBehaviorData, value: &Value) -> bool {
    match as_integer(value) {
        Some(timestamp_ms) => {
            record.set_timestamp_ms(timestamp_ms);
            true
        }
        None => false,
    }
}

fn apply_decision_latency_ms(record: &mut PlayerBehaviorData, value: &Value) -> bool {
    match value.as_f64() {
        Some(latency_ms) => {
            record.set_decision_latency_ms(latency_ms);
            true
        }
        None => false,
    }
}

fn apply_action_frequency(record: &mut PlayerBehaviorData, value: &Value) -> bool {
    match value.as_f64() {
        Some(frequency) => {
            record.set_action_frequency(frequency);
            true
        }
        None => false,
    }
}

// A sequence with any non-integer element is dropped whole.
fn apply_recent_choices(record: &mut PlayerBehaviorData, value: &Value) -> bool {
    let choices: Option<Vec<i64>> = value
        .as_array()
        .and_then(|items| items.iter().map(as_integer).collect());
    match choices {
        Some(choices) => {
            record.set_recent_choices(choices);
            true
        }
        None => false,
    }
}

/// Build a live behavior record from a request body.
///
/// Never fails: a non-object body yields an empty record, unknown keys are
/// ignored and values of the wrong shape are left unset.
pub fn to_player_behavior_proto(payload: &Value) -> PlayerBehaviorData {
    let mut record = PlayerBehaviorData::new();

    let Some(fields) = payload.as_object() else {
        if !payload.is_null() {
            debug!(kind = json_kind(payload), "ignoring non-object behavior payload");
        }
        return record;
    };

    let population = populate(&mut record, fields, BEHAVIOR_FIELDS);

    let ignored = unrecognized_keys(fields, BEHAVIOR_FIELDS);
    if !ignored.is_empty() {
        trace!(?ignored, "ignoring unrecognized behavior keys");
    }

    debug!(
        applied = population.applied,
        mismatched = population.mismatched,
        "converted player behavior payload"
    );
    record
}

/// Parse a raw JSON request body into a behavior record.
///
/// Unlike `to_player_behavior_proto`, malformed JSON and non-object bodies
/// are errors here. A literal `null` body counts as empty.
pub fn parse_player_behavior_json(bytes: &[u8]) -> Result<PlayerBehaviorData, ConvertError> {
    let payload: Value = serde_json::from_slice(bytes)?;
    match payload {
        Value::Object(_) | Value::Null => Ok(to_player_behavior_proto(&payload)),
        other => Err(ConvertError::NotAnObject(json_kind(&other))),
    }
}

/// Build an emotion prediction and export it as a plain object.
///
/// `dominant_emotion` is kept only when non-empty; `confidence` and
/// `timestamp_ms` are kept whenever given, zero included.
pub fn to_emotion_prediction_object(fields: EmotionFields) -> PlainObject {
    let mut prediction = EmotionPrediction::new();

    if let Some(emotion) = fields.dominant_emotion.filter(|e| !e.is_empty()) {
        prediction.set_dominant_emotion(emotion);
    }
    if let Some(confidence) = fields.confidence {
        prediction.set_confidence(confidence);
    }
    if let Some(timestamp_ms) = fields.timestamp_ms {
        prediction.set_timestamp_ms(timestamp_ms);
    }

    prediction.to_object()
}

/// Serialize a prediction with every field emitted, unset ones as zero values.
pub fn emotion_prediction_to_json(prediction: &EmotionPrediction) -> Result<String, ConvertError> {
    Ok(serde_json::to_string(&prediction.to_object())?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
