use std::time::Duration;

use url::Url;

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiMode {
    /// Straight to the provider with a client-side key. Local development only.
    Direct { base_url: Url, api_key: String },
    /// Through the request forwarder, which holds the key.
    Forwarded { endpoint: Url },
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub mode: ApiMode,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl ClientSettings {
    pub fn new(mode: ApiMode) -> Self {
        Self {
            mode,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}
