use std::env;
use std::time::Duration;

/// Configuration for the upload and handoff workflow
#[derive(Debug, Clone)]
pub struct HandoffConfig {
    /// Messaging deep-link base (default: "https://wa.me")
    pub base_url: String,

    /// Recipient id appended to the base URL (default: "556198574343")
    pub recipient_id: String,

    /// Delay between organization progress steps (default: 800 ms)
    pub progress_step_delay: Duration,

    /// Pause after the last progress step before the summary (default: 1000 ms)
    pub summary_delay: Duration,

    /// Maximum preview thumbnail edge in pixels (default: 256)
    pub preview_size: u32,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            recipient_id: "556198574343".to_string(),
            progress_step_delay: Duration::from_millis(800),
            summary_delay: Duration::from_millis(1000),
            preview_size: 256,
        }
    }
}

impl HandoffConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            base_url: env::var("HANDOFF_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default.base_url),

            recipient_id: env::var("HANDOFF_RECIPIENT").unwrap_or(default.recipient_id),

            progress_step_delay: env::var("PROGRESS_STEP_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.progress_step_delay),

            summary_delay: env::var("SUMMARY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.summary_delay),

            preview_size: env::var("PREVIEW_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size: &u32| *size > 0)
                .unwrap_or(default.preview_size),
        }
    }

    /// Create config for development and tests (no artificial delays)
    pub fn development() -> Self {
        Self {
            progress_step_delay: Duration::ZERO,
            summary_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Prefix every handoff URL starts with, e.g. `https://wa.me/556198574343?text=`
    pub fn link_prefix(&self) -> String {
        format!("{}/{}?text=", self.base_url, self.recipient_id)
    }
}
