//! HTTP transport to the companion device
//!
//! The device exposes a small REST surface on the local network (the
//! reference hardware is a Raspberry Pi). Commands are plain JSON POSTs;
//! the response body is ignored, delivery is all we care about.
//!
//! Timeouts are short by design: a hardware command that hasn't been
//! accepted within a couple of seconds is stale, and the dispatcher must
//! not stall a pipeline run waiting for a dead device. No retry here
//! either; if retry policy ever arrives it belongs in the dispatcher, not
//! the transport.

use std::time::Duration;

use crate::{ActuatorLink, LinkError};

/// Default per-command timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Device base address, e.g. `http://raspberry-pi:8080/api`
    pub base_url: String,
    /// Bound on each outbound call
    pub timeout: Duration,
}

impl HttpConfig {
    /// Create new configuration with the device base address
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set per-command timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// ureq-backed actuator transport
pub struct HttpLink {
    config: HttpConfig,
    agent: ureq::Agent,
}

impl HttpLink {
    /// Create transport, validating the base address
    pub fn new(config: HttpConfig) -> Result<Self, LinkError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(LinkError::Unreachable(format!(
                "base url must start with http:// or https://, got {}",
                config.base_url
            )));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&format!("CradleSense/{}", env!("CARGO_PKG_VERSION")))
            .build();

        Ok(Self { config, agent })
    }
}

impl ActuatorLink for HttpLink {
    fn send(&self, path: &str, payload: &serde_json::Value) -> Result<(), LinkError> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&payload.to_string());

        match response {
            // Response body deliberately dropped: fire and forget
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => Err(LinkError::Rejected(code)),
            Err(ureq::Error::Transport(t)) => {
                let message = t.to_string();
                if message.contains("timed out") {
                    Err(LinkError::Timeout)
                } else {
                    Err(LinkError::Unreachable(message))
                }
            }
        }
    }
}
