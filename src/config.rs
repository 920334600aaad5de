use std::env;
use std::path::PathBuf;

use crate::services::aggregator::DEFAULT_TREND_DAYS;
use crate::services::report::DEFAULT_WRAP_WIDTH;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub routine_file: PathBuf,

    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub companion_temperature: f32,
    pub music_temperature: f32,
    pub llm_rate_limit_per_minute: u32,

    pub report_wrap_width: usize,
    pub trend_days: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            routine_file: env::var("ROUTINE_FILE")
                .unwrap_or_else(|_| "routines.csv".into())
                .into(),

            llm_api_key: env::var("LLM_API_KEY").unwrap_or_else(|_| String::new()),
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".into()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "llama3-8b-8192".into()),
            companion_temperature: env::var("COMPANION_TEMPERATURE")
                .unwrap_or_else(|_| "0.7".into())
                .parse()
                .unwrap_or(0.7),
            music_temperature: env::var("MUSIC_TEMPERATURE")
                .unwrap_or_else(|_| "0.6".into())
                .parse()
                .unwrap_or(0.6),
            llm_rate_limit_per_minute: env::var("LLM_RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            report_wrap_width: env::var("REPORT_WRAP_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_WRAP_WIDTH),
            trend_days: env::var("TREND_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TREND_DAYS),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn llm_enabled(&self) -> bool {
        !self.llm_api_key.is_empty()
    }
}

#[cfg(test)]
impl Config {
    /// Defaults without touching the process environment.
    pub fn for_tests(routine_file: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            routine_file,
            llm_api_key: String::new(),
            llm_base_url: "http://127.0.0.1:9".into(),
            llm_model: "llama3-8b-8192".into(),
            companion_temperature: 0.7,
            music_temperature: 0.6,
            llm_rate_limit_per_minute: 10,
            report_wrap_width: DEFAULT_WRAP_WIDTH,
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}
