pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub poll_interval: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let practicum_token = env_required("PRACTICUM_TOKEN")?;
        let telegram_token = env_required("TELEGRAM_TOKEN")?;
        let telegram_chat_id = env_required("TELEGRAM_CHAT_ID")?;

        let endpoint = env_or("REVIEWBOT_ENDPOINT", DEFAULT_ENDPOINT);

        let poll_interval: u64 = env_or("REVIEWBOT_POLL_INTERVAL", "600")
            .parse()
            .map_err(|e| format!("Invalid REVIEWBOT_POLL_INTERVAL: {e}"))?;

        let log_level = env_or("REVIEWBOT_LOG_LEVEL", "info");

        Ok(Config {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
            log_level,
        })
    }
}

// Empty values count as missing.
fn env_required(key: &str) -> Result<String, String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("Missing required environment variable: {key}")),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
