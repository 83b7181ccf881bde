use crate::error::GeolocatorError;

use serde::Deserialize;
use std::num::NonZeroU64;
use std::time::Duration;

/// Timeout value, configured in whole seconds.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "NonZeroU64")]
pub struct NonZeroDuration(Duration);

impl NonZeroDuration {
    pub fn new(duration: Duration) -> Option<Self> {
        if duration.is_zero() {
            None
        } else {
            Some(NonZeroDuration(duration))
        }
    }

    pub fn from_non_zero_secs(secs: NonZeroU64) -> Self {
        Self(Duration::from_secs(secs.get()))
    }

    pub fn get(self) -> Duration {
        self.0
    }
}

impl From<NonZeroU64> for NonZeroDuration {
    fn from(secs: NonZeroU64) -> Self {
        Self::from_non_zero_secs(secs)
    }
}

impl TryFrom<Duration> for NonZeroDuration {
    type Error = GeolocatorError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::new(duration)
            .ok_or_else(|| GeolocatorError::InvalidParameter("timeout must be positive".into()))
    }
}

impl From<NonZeroDuration> for Duration {
    fn from(duration: NonZeroDuration) -> Self {
        duration.0
    }
}
