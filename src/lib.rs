//! Narrative Director: player-behavior telemetry in, narrative path out.
//!
//! Converts loosely-typed request bodies into typed protocol records and
//! exports emotion predictions back to plain JSON objects. The path
//! recommendation itself is a static, configurable stub.

pub mod core;
pub mod schema;
