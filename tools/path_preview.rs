//! Path Preview: runs a request body through the converter and director.
//!
//! Usage: path_preview [--config <file.ron>] [--input <file.json>] [--now <ms>]
//!
//! Reads the body from `--input` or stdin and prints the converted behavior
//! record followed by the narrative-path response.

use narrative_director::core::config::DirectorConfig;
use narrative_director::core::convert::parse_player_behavior_json;
use narrative_director::core::director::{epoch_millis, NarrativeDirector};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: path_preview [--config <file.ron>] [--input <file.json>] [--now <ms>]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("narrative_director=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path = None;
    let mut input_path = None;
    let mut now_ms = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--input" if i + 1 < args.len() => {
                i += 1;
                input_path = Some(args[i].clone());
            }
            "--now" if i + 1 < args.len() => {
                i += 1;
                now_ms = Some(args[i].parse::<i64>().unwrap_or_else(|_| {
                    eprintln!("Error: --now must be an integer number of milliseconds");
                    process::exit(1);
                }));
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => DirectorConfig::load_from_ron(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => DirectorConfig::default(),
    };

    let body = read_body(input_path.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error reading request body: {}", e);
        process::exit(1);
    });

    let behavior = parse_player_behavior_json(&body).unwrap_or_else(|e| {
        eprintln!("Invalid payload: {}", e);
        process::exit(1);
    });
    info!(session_id = behavior.session_id(), "payload accepted");

    let director = NarrativeDirector::new(config);
    let path = director.plan_behavior(&behavior, now_ms.unwrap_or_else(epoch_millis));

    println!("--- Behavior Record ---");
    print_pretty(&Value::Object(behavior.to_object()));
    println!("--- Narrative Path ---");
    match serde_json::to_value(&path) {
        Ok(value) => print_pretty(&value),
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            process::exit(1);
        }
    }
}

fn read_body(path: Option<&str>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut body = Vec::new();
            std::io::stdin().read_to_end(&mut body)?;
            Ok(body)
        }
    }
}

fn print_pretty(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Serialization error: {}", e),
    }
}
