//! Player behavior telemetry record.

use serde_json::Value;

use super::PlainObject;

/// Wire keys for `PlayerBehaviorData`, shared by request bodies and exports.
pub mod keys {
    pub const SESSION_ID: &str = "sessionId";
    pub const TIMESTAMP_MS: &str = "timestampMs";
    pub const DECISION_LATENCY_MS: &str = "decisionLatencyMs";
    pub const ACTION_FREQUENCY: &str = "actionFrequency";
    pub const RECENT_CHOICES: &str = "recentChoices";
}

/// One observation of how a player is behaving.
///
/// Every field is independently optional. Getters return the type's zero
/// value for unset fields; use the `has_*` methods to tell an explicit zero
/// from an absent value. Setters never validate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerBehaviorData {
    session_id: Option<String>,
    timestamp_ms: Option<i64>,
    decision_latency_ms: Option<f64>,
    action_frequency: Option<f64>,
    recent_choices: Option<Vec<i64>>,
}

impl PlayerBehaviorData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or("")
    }

    /// Epoch milliseconds at which the behavior was observed.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms.unwrap_or(0)
    }

    pub fn decision_latency_ms(&self) -> f64 {
        self.decision_latency_ms.unwrap_or(0.0)
    }

    pub fn action_frequency(&self) -> f64 {
        self.action_frequency.unwrap_or(0.0)
    }

    /// Recent choice indices, oldest first.
    pub fn recent_choices(&self) -> &[i64] {
        self.recent_choices.as_deref().unwrap_or(&[])
    }

    pub fn has_session_id(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn has_timestamp_ms(&self) -> bool {
        self.timestamp_ms.is_some()
    }

    pub fn has_decision_latency_ms(&self) -> bool {
        self.decision_latency_ms.is_some()
    }

    pub fn has_action_frequency(&self) -> bool {
        self.action_frequency.is_some()
    }

    pub fn has_recent_choices(&self) -> bool {
        self.recent_choices.is_some()
    }

    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    pub fn set_timestamp_ms(&mut self, timestamp_ms: i64) {
        self.timestamp_ms = Some(timestamp_ms);
    }

    pub fn set_decision_latency_ms(&mut self, latency_ms: f64) {
        self.decision_latency_ms = Some(latency_ms);
    }

    pub fn set_action_frequency(&mut self, frequency: f64) {
        self.action_frequency = Some(frequency);
    }

    /// Replace the whole choice sequence.
    pub fn set_recent_choices(&mut self, choices: impl Into<Vec<i64>>) {
        self.recent_choices = Some(choices.into());
    }

    /// Append one choice to the end of the sequence.
    pub fn add_recent_choice(&mut self, choice: i64) {
        self.recent_choices.get_or_insert_with(Vec::new).push(choice);
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.set_session_id(session_id);
        self
    }

    pub fn with_timestamp_ms(mut self, timestamp_ms: i64) -> Self {
        self.set_timestamp_ms(timestamp_ms);
        self
    }

    pub fn with_decision_latency_ms(mut self, latency_ms: f64) -> Self {
        self.set_decision_latency_ms(latency_ms);
        self
    }

    pub fn with_action_frequency(mut self, frequency: f64) -> Self {
        self.set_action_frequency(frequency);
        self
    }

    pub fn with_recent_choices(mut self, choices: impl Into<Vec<i64>>) -> Self {
        self.set_recent_choices(choices);
        self
    }

    /// Snapshot every declared field, unset ones as their zero value.
    ///
    /// Non-finite floats have no JSON representation and export as `null`.
    pub fn to_object(&self) -> PlainObject {
        let mut object = PlainObject::new();
        object.insert(keys::SESSION_ID.to_string(), Value::from(self.session_id()));
        object.insert(keys::TIMESTAMP_MS.to_string(), Value::from(self.timestamp_ms()));
        object.insert(
            keys::DECISION_LATENCY_MS.to_string(),
            Value::from(self.decision_latency_ms()),
        );
        object.insert(
            keys::ACTION_FREQUENCY.to_string(),
            Value::from(self.action_frequency()),
        );
        object.insert(
            keys::RECENT_CHOICES.to_string(),
            Value::from(self.recent_choices().to_vec()),
        );
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_reads_zero_values() {
        let record = PlayerBehaviorData::new();
        assert_eq!(record.session_id(), "");
        assert_eq!(record.timestamp_ms(), 0);
        assert_eq!(record.decision_latency_ms(), 0.0);
        assert_eq!(record.action_frequency(), 0.0);
        assert!(record.recent_choices().is_empty());
        assert!(!record.has_session_id());
        assert!(!record.has_recent_choices());
    }

    #[test]
    fn setters_accept_out_of_range_values() {
        let mut record = PlayerBehaviorData::new();
        record.set_decision_latency_ms(-25.0);
        record.set_timestamp_ms(-1);
        assert_eq!(record.decision_latency_ms(), -25.0);
        assert_eq!(record.timestamp_ms(), -1);
    }

    #[test]
    fn explicit_zero_is_distinct_from_unset() {
        let record = PlayerBehaviorData::new().with_action_frequency(0.0);
        assert!(record.has_action_frequency());
        assert!(!record.has_decision_latency_ms());
        assert_eq!(record.action_frequency(), 0.0);
    }

    #[test]
    fn add_recent_choice_preserves_insertion_order() {
        let mut record = PlayerBehaviorData::new();
        record.add_recent_choice(3);
        record.add_recent_choice(1);
        record.add_recent_choice(2);
        assert_eq!(record.recent_choices(), &[3, 1, 2]);
    }

    #[test]
    fn to_object_fills_unset_fields() {
        let record = PlayerBehaviorData::new().with_session_id("abc");
        let object = Value::Object(record.to_object());
        assert_eq!(
            object,
            json!({
                "sessionId": "abc",
                "timestampMs": 0,
                "decisionLatencyMs": 0.0,
                "actionFrequency": 0.0,
                "recentChoices": [],
            })
        );
    }

    #[test]
    fn to_object_exports_set_values() {
        let record = PlayerBehaviorData::new()
            .with_timestamp_ms(1_700_000_000_000)
            .with_decision_latency_ms(420.5)
            .with_recent_choices(vec![2, 0, 1]);
        let object = record.to_object();
        assert_eq!(object["timestampMs"], json!(1_700_000_000_000i64));
        assert_eq!(object["decisionLatencyMs"], json!(420.5));
        assert_eq!(object["recentChoices"], json!([2, 0, 1]));
        assert_eq!(object.len(), 5);
    }

    #[test]
    fn non_finite_latency_exports_as_null() {
        let record = PlayerBehaviorData::new().with_decision_latency_ms(f64::NAN);
        assert_eq!(record.to_object()["decisionLatencyMs"], Value::Null);
    }
}
