//! Emotion prediction record.

use serde_json::Value;

use super::PlainObject;

pub mod keys {
    pub const DOMINANT_EMOTION: &str = "dominantEmotion";
    pub const CONFIDENCE: &str = "confidence";
    pub const TIMESTAMP_MS: &str = "timestampMs";
}

/// The emotion a player is predicted to be feeling.
///
/// `confidence` is a probability in spirit but is stored as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionPrediction {
    dominant_emotion: Option<String>,
    confidence: Option<f64>,
    timestamp_ms: Option<i64>,
}

impl EmotionPrediction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emotion label such as `"engaged"`, or `""` when unset.
    pub fn dominant_emotion(&self) -> &str {
        self.dominant_emotion.as_deref().unwrap_or("")
    }

    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms.unwrap_or(0)
    }

    pub fn has_dominant_emotion(&self) -> bool {
        self.dominant_emotion.is_some()
    }

    pub fn has_confidence(&self) -> bool {
        self.confidence.is_some()
    }

    pub fn has_timestamp_ms(&self) -> bool {
        self.timestamp_ms.is_some()
    }

    pub fn set_dominant_emotion(&mut self, emotion: impl Into<String>) {
        self.dominant_emotion = Some(emotion.into());
    }

    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = Some(confidence);
    }

    pub fn set_timestamp_ms(&mut self, timestamp_ms: i64) {
        self.timestamp_ms = Some(timestamp_ms);
    }

    pub fn with_dominant_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.set_dominant_emotion(emotion);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.set_confidence(confidence);
        self
    }

    pub fn with_timestamp_ms(mut self, timestamp_ms: i64) -> Self {
        self.set_timestamp_ms(timestamp_ms);
        self
    }

    /// Snapshot all three fields; unset ones export as `""` or `0`.
    pub fn to_object(&self) -> PlainObject {
        let mut object = PlainObject::new();
        object.insert(
            keys::DOMINANT_EMOTION.to_string(),
            Value::from(self.dominant_emotion()),
        );
        object.insert(keys::CONFIDENCE.to_string(), Value::from(self.confidence()));
        object.insert(keys::TIMESTAMP_MS.to_string(), Value::from(self.timestamp_ms()));
        object
    }
}
