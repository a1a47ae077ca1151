//! Non-volatile storage abstractions
//!
//! Byte-addressed persistent storage for small typed values (mount
//! alignment, backlash, site data and the like). The trait requires only
//! the raw byte primitives; update-if-changed semantics and the typed
//! multi-byte accessors are layered on top as provided methods, so every
//! implementation gets the same wear-reduction and encoding behavior.
//!
//! Layout is entirely caller-defined: a stored value is just an
//! interpretation of the range `[offset, offset + size)`, and nothing here
//! checks for overlapping ranges. Multi-byte values are encoded
//! little-endian regardless of the host, so an image written by one build
//! reads back identically on another.

/// Length in bytes of a fixed string cell.
pub const STRING_LEN: usize = 16;

/// Errors from non-volatile storage operations
///
/// Transient bus faults are not represented here: reads
/// degrade to an erased-cell sentinel and writes are fire-and-forget,
/// matching what the hardware itself does. The only hard error is asking
/// for a range the device does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NvsError {
    /// `offset + size` exceeds the device capacity
    OutOfRange,
}

/// Byte-addressed non-volatile storage
///
/// Implementations provide the raw single-byte primitives; everything
/// else is derived. All multi-byte accessors validate their whole span
/// against [`capacity`](Self::capacity) before touching the device, so a
/// range error never leaves a partially written value behind.
pub trait NvStorage {
    /// Total device capacity in bytes. Valid offsets are `0..capacity()`.
    fn capacity(&self) -> u16;

    /// Read the byte at `offset`.
    ///
    /// Implementations may return an erased-cell sentinel (`0xFF`) when
    /// the underlying transport fails; see the driver documentation.
    fn read_byte(&mut self, offset: u16) -> Result<u8, NvsError>;

    /// Physically write the byte at `offset`, unconditionally.
    ///
    /// Prefer [`update_byte`](Self::update_byte): every physical write
    /// costs a device settle delay and one write-cycle of cell wear.
    fn write_byte(&mut self, offset: u16, value: u8) -> Result<(), NvsError>;

    /// Write the byte at `offset` only if it differs from what is stored.
    fn update_byte(&mut self, offset: u16, value: u8) -> Result<(), NvsError> {
        if self.read_byte(offset)? != value {
            self.write_byte(offset, value)?;
        }
        Ok(())
    }

    /// Read `buf.len()` consecutive bytes starting at `offset`.
    fn read_bytes(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), NvsError> {
        span_in_bounds(offset, buf.len(), self.capacity())?;
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.read_byte(offset + i as u16)?;
        }
        Ok(())
    }

    /// Update `data.len()` consecutive bytes starting at `offset`,
    /// skipping the physical write for every byte that already matches.
    fn update_bytes(&mut self, offset: u16, data: &[u8]) -> Result<(), NvsError> {
        span_in_bounds(offset, data.len(), self.capacity())?;
        for (i, &value) in data.iter().enumerate() {
            self.update_byte(offset + i as u16, value)?;
        }
        Ok(())
    }

    /// Store a 16-bit integer at `offset` (2 bytes, little-endian).
    fn write_u16(&mut self, offset: u16, value: u16) -> Result<(), NvsError> {
        self.update_bytes(offset, &value.to_le_bytes())
    }

    /// Read back a 16-bit integer from `offset`.
    fn read_u16(&mut self, offset: u16) -> Result<u16, NvsError> {
        let mut raw = [0u8; 2];
        self.read_bytes(offset, &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }

    /// Store a 32-bit integer at `offset` (4 bytes, little-endian).
    fn write_i32(&mut self, offset: u16, value: i32) -> Result<(), NvsError> {
        self.update_bytes(offset, &value.to_le_bytes())
    }

    /// Read back a 32-bit integer from `offset`.
    fn read_i32(&mut self, offset: u16) -> Result<i32, NvsError> {
        let mut raw = [0u8; 4];
        self.read_bytes(offset, &mut raw)?;
        Ok(i32::from_le_bytes(raw))
    }

    /// Store a 32-bit float at `offset` (4 bytes, IEEE 754 bit pattern,
    /// little-endian). Round-trips bit-exactly, NaN payloads included.
    fn write_f32(&mut self, offset: u16, value: f32) -> Result<(), NvsError> {
        self.update_bytes(offset, &value.to_le_bytes())
    }

    /// Read back a 32-bit float from `offset`.
    fn read_f32(&mut self, offset: u16) -> Result<f32, NvsError> {
        let mut raw = [0u8; 4];
        self.read_bytes(offset, &mut raw)?;
        Ok(f32::from_le_bytes(raw))
    }

    /// Store a fixed [`STRING_LEN`]-byte string cell at `offset`.
    ///
    /// All 16 bytes are written, embedded NULs and padding included; the
    /// caller pads shorter text (see [`fixed_str`]).
    fn write_str(&mut self, offset: u16, text: &[u8; STRING_LEN]) -> Result<(), NvsError> {
        self.update_bytes(offset, text)
    }

    /// Read a fixed [`STRING_LEN`]-byte string cell from `offset` into a
    /// caller-provided buffer. Always transfers all 16 bytes.
    fn read_str(&mut self, offset: u16, buf: &mut [u8; STRING_LEN]) -> Result<(), NvsError> {
        self.read_bytes(offset, buf)
    }

    /// Read a string cell as printable text, stopping at the first NUL.
    ///
    /// Bytes outside the printable ASCII range come back as `?`. Meant
    /// for display paths; use [`read_str`](Self::read_str) when the raw
    /// cell contents matter.
    fn read_str_lossy(&mut self, offset: u16) -> Result<heapless::String<STRING_LEN>, NvsError> {
        let mut raw = [0u8; STRING_LEN];
        self.read_bytes(offset, &mut raw)?;
        let mut text = heapless::String::new();
        for &b in raw.iter().take_while(|&&b| b != 0) {
            let c = if (0x20..0x7F).contains(&b) { b as char } else { '?' };
            let _ = text.push(c);
        }
        Ok(text)
    }
}

/// NUL-pad (and truncate) `text` into a fixed string cell.
pub fn fixed_str(text: &str) -> [u8; STRING_LEN] {
    let mut cell = [0u8; STRING_LEN];
    for (slot, &b) in cell.iter_mut().zip(text.as_bytes()) {
        *slot = b;
    }
    cell
}

fn span_in_bounds(offset: u16, len: usize, capacity: u16) -> Result<(), NvsError> {
    if offset as usize + len > capacity as usize {
        return Err(NvsError::OutOfRange);
    }
    Ok(())
}
