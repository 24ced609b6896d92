use std::time::Duration;

use crate::{Coordinates, LocationError};

/// Options passed to the device's location sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the sensor may return. Zero forces a fresh reading.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// A device capability that yields the current position.
///
/// Implementations translate their platform's failure causes into
/// [`LocationError`]; a missing capability is [`LocationError::Unsupported`].
#[allow(async_fn_in_trait)]
pub trait PositionSource {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, LocationError>;
}
