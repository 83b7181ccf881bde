use crate::error::GeolocatorError;
use crate::non_zero_duration::NonZeroDuration;

use std::num::NonZeroU64;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    /// Time allowed to establish the connection.
    Connect,
    /// Time allowed for the whole request, connection included.
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    connect: NonZeroDuration,
    transfer: NonZeroDuration,
}

impl Timeouts {
    pub fn new(connect: NonZeroDuration, transfer: NonZeroDuration) -> Self {
        Self { connect, transfer }
    }

    pub fn default_timeout() -> NonZeroDuration {
        NonZeroDuration::from_non_zero_secs(
            NonZeroU64::new(DEFAULT_TIMEOUT_SECONDS).expect("default timeout is non-zero"),
        )
    }

    pub fn connect(&self) -> Duration {
        self.connect.get()
    }

    pub fn transfer(&self) -> Duration {
        self.transfer.get()
    }

    pub fn set(&mut self, kind: TimeoutKind, duration: Duration) -> Result<(), GeolocatorError> {
        let duration: NonZeroDuration = duration.try_into()?;
        match kind {
            TimeoutKind::Connect => self.connect = duration,
            TimeoutKind::Transfer => self.transfer = duration,
        }
        Ok(())
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::new(Self::default_timeout(), Self::default_timeout())
    }
}
