//! Protocol records exchanged with the rest of the narrative services.

pub mod behavior;
pub mod emotion;

use serde_json::{Map, Value};

/// Plain key/value snapshot of a record, ready for JSON serialization.
pub type PlainObject = Map<String, Value>;
