//! `[contact]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[contact]` section in bych4n.toml - contact form timings.
///
/// Submission is simulated; `success_rate` is the probability that a
/// simulated submission succeeds.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// How long a success or failure message stays visible.
    #[serde(default = "defaults::contact::message_timeout_ms")]
    #[educe(Default = defaults::contact::message_timeout_ms())]
    pub message_timeout_ms: u64,

    #[serde(default = "defaults::contact::simulated_delay_ms")]
    #[educe(Default = defaults::contact::simulated_delay_ms())]
    pub simulated_delay_ms: u64,

    #[serde(default = "defaults::contact::success_rate")]
    #[educe(Default = defaults::contact::success_rate())]
    pub success_rate: f64,
}

impl ContactConfig {
    pub const fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }

    pub const fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}
