#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_key: None,
            timeout_ms: 2000,
        }
    }

    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("SEARCHBRIDGE_URL").ok()?;
        let timeout_ms = std::env::var("SEARCHBRIDGE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(2000);

        Some(Self {
            base_url: normalize_base_url(&base_url),
            api_key: std::env::var("SEARCHBRIDGE_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            timeout_ms,
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
