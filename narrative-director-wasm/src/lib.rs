//! WASM bindings for narrative-director: lets a JS host serve narrative paths.

use wasm_bindgen::prelude::*;

use narrative_director::core::config::DirectorConfig;
use narrative_director::core::convert::{
    parse_player_behavior_json, to_emotion_prediction_object, EmotionFields,
};
use narrative_director::core::director::{NarrativeDirector, NarrativePath};
use narrative_director::schema::PlainObject;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct PreviewOutput {
    behavior: PlainObject,
    path: NarrativePath,
}

// ---------------------------------------------------------------------------
// DirectorHandle, the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct DirectorHandle {
    director: NarrativeDirector,
}

#[wasm_bindgen]
impl DirectorHandle {
    /// Create a director from RON configuration, or the built-in defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_ron: Option<String>) -> Result<DirectorHandle, JsError> {
        let config = match config_ron {
            Some(source) => DirectorConfig::parse_ron(&source)
                .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?,
            None => DirectorConfig::default(),
        };
        Ok(DirectorHandle {
            director: NarrativeDirector::new(config),
        })
    }

    /// Plan a narrative path for a request body given as a JSON string.
    ///
    /// `now_ms` is the host clock, used when the body has no timestamp.
    /// Returns the response body as a JSON string.
    pub fn plan_path(&self, body_json: &str, now_ms: f64) -> Result<String, JsError> {
        let behavior = parse_player_behavior_json(body_json.as_bytes())
            .map_err(|e| JsError::new(&format!("Invalid payload: {e}")))?;
        self.director
            .plan_behavior(&behavior, now_ms as i64)
            .to_json()
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Like `plan_path`, but also returns the converted behavior record.
    pub fn preview(&self, body_json: &str, now_ms: f64) -> Result<String, JsError> {
        let behavior = parse_player_behavior_json(body_json.as_bytes())
            .map_err(|e| JsError::new(&format!("Invalid payload: {e}")))?;
        let output = PreviewOutput {
            path: self.director.plan_behavior(&behavior, now_ms as i64),
            behavior: behavior.to_object(),
        };
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Convert `{dominantEmotion, confidence, timestampMs}` JSON into the
    /// zero-value-filled prediction object.
    pub fn emotion_object(fields_json: &str) -> Result<String, JsError> {
        let fields: EmotionFields = serde_json::from_str(fields_json)
            .map_err(|e| JsError::new(&format!("Invalid emotion fields: {e}")))?;
        serde_json::to_string(&to_emotion_prediction_object(fields))
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Node the director currently recommends.
    pub fn next_node(&self) -> String {
        self.director.config().next_node.clone()
    }
}
