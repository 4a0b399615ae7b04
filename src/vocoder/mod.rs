// AMBE-3000 style vocoder control: packet framing, requests, responses and
// the request/response exchange with the device over a serial transport.

pub mod device;
pub mod packet;
pub mod request;
pub mod response;

pub use device::VocoderDevice;
pub use packet::{PacketField, PacketType};
pub use request::Request;
pub use response::Response;

use crate::serial::SerialError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("No response within {0:?}")]
    TransportTimeout(Duration),

    #[error("Device reported failure: {0}")]
    ProtocolFailure(Response),

    #[error("Serial error: {0}")]
    Serial(SerialError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<SerialError> for DeviceError {
    fn from(err: SerialError) -> Self {
        match err {
            SerialError::Timeout(after) => DeviceError::TransportTimeout(after),
            other => DeviceError::Serial(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;

/// Exchange settings
#[derive(Debug, Clone)]
pub struct VocoderConfig {
    /// How long to wait for the response to one request
    pub response_timeout: Duration,

    /// Attempts per request when the device does not answer
    pub max_attempts: u32,
}

impl Default for VocoderConfig {
    fn default() -> Self {
        Self {
            response_timeout: Duration::from_secs(1),
            max_attempts: 3,
        }
    }
}

impl VocoderConfig {
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_timeout_is_transport_timeout() {
        let err: DeviceError = SerialError::Timeout(Duration::from_millis(5)).into();
        assert!(matches!(err, DeviceError::TransportTimeout(d) if d == Duration::from_millis(5)));

        let err: DeviceError = SerialError::NotOpen.into();
        assert!(matches!(err, DeviceError::Serial(SerialError::NotOpen)));
    }

    #[test]
    fn test_config_builders() {
        let config = VocoderConfig::default();
        assert_eq!(config.response_timeout, Duration::from_secs(1));
        assert_eq!(config.max_attempts, 3);

        let config = config.with_max_attempts(0);
        assert_eq!(config.max_attempts, 1);
    }
}
