//! Bus adapters
//!
//! Bridges ecosystem bus implementations onto the sidereon-hal traits,
//! so the drivers run unchanged on any board with an embedded-hal HAL.

use sidereon_hal::i2c::{I2cBus, I2cConfig};

/// Any embedded-hal 1.0 I2C implementation as an [`I2cBus`].
///
/// The clock rate of an embedded-hal bus is fixed when the bus is
/// constructed, so `configure` is a no-op here; build the bus at the
/// rate the device wants (see [`I2cConfig::FAST`]).
pub struct EhI2c<T> {
    inner: T,
}

impl<T> EhI2c<T> {
    /// Wrap an embedded-hal I2C bus.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Give the wrapped bus back.
    pub fn release(self) -> T {
        self.inner
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for EhI2c<T> {
    type Error = T::Error;

    fn configure(&mut self, _config: I2cConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(address, buf)
    }
}
