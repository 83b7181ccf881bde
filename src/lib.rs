pub mod config;
mod error;
pub mod fetch;
mod geolocator;
mod identifier;
mod location;
mod non_zero_duration;
mod precision;
mod timeouts;

pub use crate::config::{parse_config, Config, EndpointPair, Endpoints};
pub use crate::error::{GeolocatorError, TransportError};
pub use crate::geolocator::Geolocator;
pub use crate::identifier::Identifier;
pub use crate::location::Location;
pub use crate::non_zero_duration::NonZeroDuration;
pub use crate::precision::Precision;
pub use crate::timeouts::{TimeoutKind, Timeouts};
