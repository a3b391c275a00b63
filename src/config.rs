use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/search";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        endpoint: get_env_or_default("SITESEARCH_ENDPOINT", DEFAULT_ENDPOINT),
    }
});

pub struct Config {
    pub endpoint: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
