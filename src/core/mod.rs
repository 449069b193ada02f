//! Conversion, presence rules, configuration and the path director.

pub mod config;
pub mod convert;
pub mod director;
pub mod presence;
