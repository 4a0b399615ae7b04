// Serial transport for device control
pub mod comm;

#[cfg(test)]
pub mod mock;

pub use comm::{list_ports, Result, SerialConfig, SerialError, SerialPort, VOCODER_BAUD_RATE};

/// Byte transport a device exchange runs over.
///
/// Reads that cannot be satisfied in time return [`SerialError::Timeout`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Discard buffered input; a no-op where the transport has none
    async fn clear_input(&mut self) -> Result<()> {
        Ok(())
    }
}
