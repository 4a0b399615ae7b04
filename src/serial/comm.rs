// Serial port abstraction with async support
// Wraps the serialport crate with tokio timeouts

use super::Transport;
use std::io::{self, Read, Write};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

#[derive(Error, Debug)]
pub enum SerialError {
    #[error("Serial port error: {0}")]
    Port(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Port not open")]
    NotOpen,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SerialError>;

/// Baud rate of an AMBE-3000 style vocoder on its UART interface
pub const VOCODER_BAUD_RATE: u32 = 460_800;

/// Serial port configuration
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub stop_bits: serialport::StopBits,
    pub parity: serialport::Parity,
    pub flow_control: serialport::FlowControl,

    /// Per-operation read/write timeout
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: VOCODER_BAUD_RATE,
            data_bits: serialport::DataBits::Eight,
            stop_bits: serialport::StopBits::One,
            parity: serialport::Parity::None,
            flow_control: serialport::FlowControl::None,
            timeout: Duration::from_millis(500),
        }
    }
}

impl SerialConfig {
    pub fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable RTS/CTS flow control
    pub fn with_hardware_flow(mut self) -> Self {
        self.flow_control = serialport::FlowControl::Hardware;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(SerialError::InvalidConfig("baud rate must be non-zero".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(SerialError::InvalidConfig("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Async serial port wrapper
pub struct SerialPort {
    port: Option<Box<dyn serialport::SerialPort>>,
    config: SerialConfig,
    port_name: String,
}

impl SerialPort {
    /// Open a serial port with the given configuration
    pub fn open(port_name: &str, config: SerialConfig) -> Result<Self> {
        config.validate()?;

        let port = serialport::new(port_name, config.baud_rate)
            .data_bits(config.data_bits)
            .stop_bits(config.stop_bits)
            .parity(config.parity)
            .flow_control(config.flow_control)
            .timeout(config.timeout)
            .open()
            .map_err(|e| SerialError::Port(e.to_string()))?;

        tracing::debug!("Opened {} at {} baud", port_name, config.baud_rate);

        Ok(Self {
            port: Some(port),
            config,
            port_name: port_name.to_string(),
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Read exactly `buf.len()` bytes with timeout
    pub async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        timeout(self.config.timeout, async {
            let mut total_read = 0;
            while total_read < buf.len() {
                match port.read(&mut buf[total_read..]) {
                    Ok(0) => {
                        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "Port closed"))
                    }
                    Ok(n) => total_read += n,
                    Err(ref e) if e.kind() == io::ErrorKind::TimedOut => {
                        tokio::time::sleep(Duration::from_millis(1)).await;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            Ok(())
        })
        .await
        .map_err(|_| SerialError::Timeout(self.config.timeout))?
        .map_err(SerialError::Io)
    }

    /// Write all bytes with timeout
    pub async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        timeout(self.config.timeout, async {
            port.write_all(buf)?;
            port.flush()
        })
        .await
        .map_err(|_| SerialError::Timeout(self.config.timeout))?
        .map_err(SerialError::Io)
    }

    /// Drop any unread input, e.g. stale frames from an earlier exchange
    pub fn clear_input(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;
        port.clear(serialport::ClearBuffer::Input)
            .map_err(|e| SerialError::Port(e.to_string()))
    }

    pub fn close(mut self) -> Result<()> {
        self.port.take();
        Ok(())
    }
}

impl Transport for SerialPort {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        SerialPort::write_all(self, buf).await
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        SerialPort::read_exact(self, buf).await
    }

    async fn clear_input(&mut self) -> Result<()> {
        SerialPort::clear_input(self)
    }
}

/// List available serial ports
pub fn list_ports() -> Result<Vec<String>> {
    serialport::available_ports()
        .map_err(|e| SerialError::Port(e.to_string()))?
        .into_iter()
        .map(|p| Ok(p.port_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_config() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 460_800);
        assert_eq!(config.data_bits, serialport::DataBits::Eight);

        let config = SerialConfig::new(115_200).with_timeout(Duration::from_secs(5));
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.with_hardware_flow().flow_control,
            serialport::FlowControl::Hardware
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = SerialPort::open("/dev/null", SerialConfig::new(0)).err();
        assert!(matches!(err, Some(SerialError::InvalidConfig(_))));
    }

    #[test]
    fn test_list_ports() {
        // Must not fail even if no ports are available
        let result = list_ports();
        assert!(result.is_ok());
    }
}
