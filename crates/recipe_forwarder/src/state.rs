use std::sync::Arc;
use std::time::Duration;

use crate::config::ForwarderConfig;
use crate::error::ForwardError;

pub struct ForwarderState {
    pub config: ForwarderConfig,
    pub client: reqwest::Client,
}

impl ForwarderState {
    pub fn new(config: ForwarderConfig) -> Result<Arc<Self>, ForwardError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|err| ForwardError::Internal(err.to_string()))?;
        Ok(Arc::new(Self { config, client }))
    }
}
