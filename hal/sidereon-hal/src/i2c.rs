//! I2C bus abstractions
//!
//! Traits for I2C master operations, implemented by chip-specific HALs
//! or by test doubles. Drivers that talk to addressed memories issue a
//! plain `write` carrying the target offset (a "dummy write") and then
//! `read` from the device's current internal address, so the two
//! operations are deliberately separate transactions here rather than a
//! combined write-then-read.

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Apply the bus clock configuration.
    ///
    /// Called once during device bring-up. Implementations whose clock
    /// rate is fixed at construction may treat this as a no-op.
    fn configure(&mut self, config: I2cConfig) -> Result<(), Self::Error>;

    /// Write `data` to the device at the given 7-bit address as a single
    /// transaction (START, address+W, payload, STOP).
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes from the device at the given 7-bit address
    /// (START, address+R, payload, STOP). For addressed memories this
    /// reads from the device's current internal address pointer, which
    /// auto-increments per byte transferred.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
