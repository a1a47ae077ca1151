//! AT24C32 I2C EEPROM driver
//!
//! The AT24C32 is a 4 KiB serial EEPROM, most often met as the spare
//! storage on DS3231 RTC breakout boards at bus address 0x57. The mount
//! uses it for settings that must survive power cycles.
//!
//! # Protocol
//!
//! Cells are selected with a two-byte big-endian offset:
//! - Random read: a "dummy write" transaction carrying only the offset
//!   sets the device's internal address pointer, then a plain read
//!   returns the cell. The pointer auto-increments per byte read.
//! - Byte write: one transaction carrying offset MSB, offset LSB and the
//!   data byte. The device then runs a self-timed write cycle (up to
//!   10 ms) during which it does not acknowledge anything on the bus.
//!
//! # Access optimizations
//!
//! - A sequential-read cache skips the dummy write whenever the next read
//!   is at the previous offset + 1, which roughly halves bus traffic when
//!   decoding multi-byte values.
//! - All typed access goes through update-if-changed byte writes
//!   (provided by [`NvStorage`]), so re-saving an unchanged value costs
//!   no settle delay and no cell wear.
//!
//! # Failure behavior
//!
//! Transient bus faults are silent: a failed read yields
//! 0xFF, exactly what an erased cell reads as, and writes are
//! fire-and-forget. A wrapping [`bus_faults`](At24c32::bus_faults)
//! counter is kept for diagnostics. The only surfaced error is
//! [`NvsError::OutOfRange`].

use sidereon_hal::i2c::{I2cBus, I2cConfig};
use sidereon_hal::nvs::{NvStorage, NvsError};
use sidereon_hal::time::{deadline_passed, MonotonicClock};

/// I2C address of the EEPROM on a DS3231 RTC module
pub const DEFAULT_ADDRESS: u8 = 0x57;

/// Device capacity in bytes (AT24C32 = 32 Kibit)
pub const CAPACITY: u16 = 4096;

/// Worst-case self-timed write cycle in milliseconds
pub const SETTLE_MS: u32 = 10;

/// Value a failed read degrades to; matches an erased cell
pub const READ_SENTINEL: u8 = 0xFF;

/// Sequential cache sentinel, far outside any valid offset
const SEQ_NONE: i16 = -32767;

/// AT24C32 driver configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct At24c32Config {
    /// 7-bit bus address (0x50-0x57 depending on the A0-A2 straps)
    pub address: u8,
    /// Device capacity in bytes
    pub capacity: u16,
    /// Post-write settle delay in milliseconds
    pub settle_ms: u32,
    /// Bus clock configuration applied by [`At24c32::init`]
    pub bus: I2cConfig,
}

impl Default for At24c32Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            capacity: CAPACITY,
            settle_ms: SETTLE_MS,
            bus: I2cConfig::FAST, // the AT24C32 is fast-mode capable
        }
    }
}

/// AT24C32 EEPROM driver
///
/// Owns its bus and clock handles for the process lifetime. All methods
/// take `&mut self` and the internal timing/cache state is not safe for
/// concurrent mutation; serialize access externally if the device is
/// shared.
///
/// A write can block the caller for up to the full settle delay, so do
/// not call into this driver from a time-critical interrupt context.
pub struct At24c32<I2C, CLK> {
    i2c: I2C,
    clock: CLK,
    config: At24c32Config,
    /// Offset of the most recent successful read, SEQ_NONE when the
    /// device's internal pointer is not in a known state
    last_seq: i16,
    /// Earliest millisecond timestamp the next bus transaction may start
    next_op_ms: u32,
    bus_faults: u32,
}

impl<I2C, CLK, E> At24c32<I2C, CLK>
where
    I2C: I2cBus<Error = E>,
    CLK: MonotonicClock,
{
    /// Create a new driver. Does not touch the bus; call
    /// [`init`](Self::init) once before the first access.
    pub fn new(i2c: I2C, clock: CLK, config: At24c32Config) -> Self {
        // Arm the gate so a device mid-write-cycle across a reset is
        // given its settle time before the first transaction
        let next_op_ms = clock.now_ms().wrapping_add(config.settle_ms);
        Self {
            i2c,
            clock,
            config,
            last_seq: SEQ_NONE,
            next_op_ms,
            bus_faults: 0,
        }
    }

    /// One-time bring-up: applies the bus clock configuration and resets
    /// the access state.
    pub fn init(&mut self) -> Result<(), E> {
        self.i2c.configure(self.config.bus)?;
        self.last_seq = SEQ_NONE;
        self.next_op_ms = self.clock.now_ms().wrapping_add(self.config.settle_ms);
        Ok(())
    }

    /// Check whether the device acknowledges on the bus.
    ///
    /// Reads one byte from the current address, so the sequential cache
    /// is invalidated as a side effect. A device mid-write-cycle does not
    /// acknowledge and reads as absent.
    pub fn probe(&mut self) -> bool {
        self.wait_for_gate();
        let mut scratch = [0u8; 1];
        let present = self.i2c.read(self.config.address, &mut scratch).is_ok();
        self.last_seq = SEQ_NONE;
        present
    }

    /// The driver configuration.
    pub fn config(&self) -> &At24c32Config {
        &self.config
    }

    /// Number of bus transactions that failed since construction
    /// (wrapping). Reads that failed returned [`READ_SENTINEL`]; writes
    /// that failed were dropped. Intended for diagnostics only.
    pub fn bus_faults(&self) -> u32 {
        self.bus_faults
    }

    /// Give the bus and clock handles back.
    pub fn release(self) -> (I2C, CLK) {
        (self.i2c, self.clock)
    }

    /// Spin until the post-write settle window has passed.
    ///
    /// Bounded by the settle delay; wrap-safe against the 32-bit
    /// millisecond counter rolling over.
    fn wait_for_gate(&self) {
        while !deadline_passed(self.clock.now_ms(), self.next_op_ms) {}
    }

    /// An addressing transaction is needed unless the device's
    /// auto-incremented pointer already sits at `offset`.
    fn needs_addressing(&self, offset: u16) -> bool {
        offset as i32 != self.last_seq as i32 + 1
    }

    fn note_fault(&mut self) {
        self.bus_faults = self.bus_faults.wrapping_add(1);
    }
}

impl<I2C, CLK, E> NvStorage for At24c32<I2C, CLK>
where
    I2C: I2cBus<Error = E>,
    CLK: MonotonicClock,
{
    fn capacity(&self) -> u16 {
        self.config.capacity
    }

    fn read_byte(&mut self, offset: u16) -> Result<u8, NvsError> {
        if offset >= self.config.capacity {
            return Err(NvsError::OutOfRange);
        }

        self.wait_for_gate();

        if self.needs_addressing(offset) {
            // Dummy write: set the device's internal address pointer
            if self.i2c.write(self.config.address, &offset.to_be_bytes()).is_err() {
                self.note_fault();
            }
        }

        let mut data = [READ_SENTINEL; 1];
        match self.i2c.read(self.config.address, &mut data) {
            Ok(()) => {
                self.last_seq = offset as i16;
                Ok(data[0])
            }
            Err(_) => {
                // Pointer state unknown after a NACKed transfer
                self.note_fault();
                self.last_seq = SEQ_NONE;
                Ok(READ_SENTINEL)
            }
        }
    }

    fn write_byte(&mut self, offset: u16, value: u8) -> Result<(), NvsError> {
        if offset >= self.config.capacity {
            return Err(NvsError::OutOfRange);
        }

        self.wait_for_gate();

        let [msb, lsb] = offset.to_be_bytes();
        if self.i2c.write(self.config.address, &[msb, lsb, value]).is_err() {
            self.note_fault();
        }

        // Self-timed write cycle starts at STOP; gate every following
        // transaction, and assume nothing about the pointer afterwards
        self.next_op_ms = self.clock.now_ms().wrapping_add(self.config.settle_ms);
        self.last_seq = SEQ_NONE;

        Ok(())
    }
}
