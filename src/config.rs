use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::config::AiConfig;

pub const DEFAULT_LIBRARY_FILE: &str = "prompt_library.json";
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 2000;

#[derive(Clone, Debug)]
pub struct Config {
    pub library_path: PathBuf,
    pub shutdown_grace: Duration,
    pub ai: Option<AiConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let library_path = env::var("PROMPTCRAFT_LIBRARY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LIBRARY_FILE));
        let shutdown_grace = Duration::from_millis(parse_grace_ms(
            env::var("PROMPTCRAFT_SHUTDOWN_GRACE_MS").ok().as_deref(),
        ));
        let ai = AiConfig::from_env();
        Self {
            library_path,
            shutdown_grace,
            ai,
        }
    }
}

fn parse_grace_ms(raw: Option<&str>) -> u64 {
    match raw {
        None => DEFAULT_SHUTDOWN_GRACE_MS,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value, "invalid PROMPTCRAFT_SHUTDOWN_GRACE_MS; using default");
            DEFAULT_SHUTDOWN_GRACE_MS
        }),
    }
}
