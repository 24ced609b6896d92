use core::fmt::Display;

use thiserror::Error;

const LOOKUP_FALLBACK: &str = "Unable to get your location";

/// Everything that can stop a location request.
///
/// The `Display` output is the message shown under the location field, so
/// the wording here is user-facing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Geolocation is not supported by your browser")]
    Unsupported,
    #[error("Please allow location access in your browser settings")]
    PermissionDenied,
    #[error("Location information is unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("{}", .0.as_deref().unwrap_or(LOOKUP_FALLBACK))]
    Lookup(Option<String>),
    #[error("An unknown error occurred")]
    Unknown,
}

impl LocationError {
    /// Maps a `GeolocationPositionError.code` to its cause.
    #[must_use]
    pub const fn from_position_error_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    /// Wraps a failed reverse-geocoding lookup, keeping its message unless it
    /// is blank.
    pub fn lookup(err: impl Display) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::Lookup(None)
        } else {
            Self::Lookup(Some(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_codes_map_to_documented_messages() {
        assert_eq!(
            LocationError::from_position_error_code(1).to_string(),
            "Please allow location access in your browser settings"
        );
        assert_eq!(
            LocationError::from_position_error_code(2).to_string(),
            "Location information is unavailable"
        );
        assert_eq!(
            LocationError::from_position_error_code(3).to_string(),
            "Location request timed out"
        );
    }

    #[test]
    fn test_unrecognised_codes_are_unknown() {
        for code in [0, 4, 42, u16::MAX] {
            assert_eq!(
                LocationError::from_position_error_code(code),
                LocationError::Unknown
            );
        }
        assert_eq!(LocationError::Unknown.to_string(), "An unknown error occurred");
    }

    #[test]
    fn test_unsupported_message() {
        assert_eq!(
            LocationError::Unsupported.to_string(),
            "Geolocation is not supported by your browser"
        );
    }

    #[test]
    fn test_lookup_keeps_error_message() {
        let err = LocationError::lookup("connection refused");
        assert_eq!(err, LocationError::Lookup(Some("connection refused".to_owned())));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_blank_lookup_message_uses_fallback() {
        assert_eq!(LocationError::lookup("  ").to_string(), "Unable to get your location");
        assert_eq!(LocationError::Lookup(None).to_string(), "Unable to get your location");
    }
}
