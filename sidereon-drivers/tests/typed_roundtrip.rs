//! Property tests for the typed accessor layer, run against an emulated
//! EEPROM through the public driver API only.

use std::cell::Cell;

use proptest::prelude::*;

use sidereon_drivers::nvs::{At24c32, At24c32Config};
use sidereon_hal::i2c::{I2cBus, I2cConfig};
use sidereon_hal::nvs::{fixed_str, NvStorage, STRING_LEN};
use sidereon_hal::time::MonotonicClock;

const MEM: usize = 4096;

/// Emulated AT24C32: dummy writes set the address pointer, data writes
/// store a cell, reads auto-increment the pointer.
struct FakeEeprom {
    mem: Vec<u8>,
    ptr: u16,
    data_writes: u32,
}

impl FakeEeprom {
    fn new() -> Self {
        Self {
            mem: vec![0xFF; MEM],
            ptr: 0,
            data_writes: 0,
        }
    }
}

impl I2cBus for FakeEeprom {
    type Error = ();

    fn configure(&mut self, _config: I2cConfig) -> Result<(), ()> {
        Ok(())
    }

    fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), ()> {
        match *data {
            [msb, lsb] => {
                self.ptr = u16::from_be_bytes([msb, lsb]);
            }
            [msb, lsb, value] => {
                let at = u16::from_be_bytes([msb, lsb]);
                self.mem[at as usize] = value;
                self.ptr = (at + 1) % MEM as u16;
                self.data_writes += 1;
            }
            _ => return Err(()),
        }
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), ()> {
        for slot in buf.iter_mut() {
            *slot = self.mem[self.ptr as usize];
            self.ptr = (self.ptr + 1) % MEM as u16;
        }
        Ok(())
    }
}

/// Advances one millisecond per poll so settle spins terminate.
struct TickClock {
    now: Cell<u32>,
}

impl MonotonicClock for TickClock {
    fn now_ms(&self) -> u32 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(1));
        t
    }
}

fn device() -> At24c32<FakeEeprom, TickClock> {
    let mut nv = At24c32::new(
        FakeEeprom::new(),
        TickClock { now: Cell::new(0) },
        At24c32Config::default(),
    );
    nv.init().unwrap();
    nv
}

proptest! {
    #[test]
    fn u16_roundtrip(offset in 0u16..=(MEM as u16 - 2), value: u16) {
        let mut nv = device();
        nv.write_u16(offset, value).unwrap();
        prop_assert_eq!(nv.read_u16(offset).unwrap(), value);
    }

    #[test]
    fn i32_roundtrip(offset in 0u16..=(MEM as u16 - 4), value: i32) {
        let mut nv = device();
        nv.write_i32(offset, value).unwrap();
        prop_assert_eq!(nv.read_i32(offset).unwrap(), value);
    }

    #[test]
    fn f32_roundtrip_bit_exact(offset in 0u16..=(MEM as u16 - 4), bits: u32) {
        // NaN payloads included: the cell stores the exact bit pattern
        let value = f32::from_bits(bits);
        let mut nv = device();
        nv.write_f32(offset, value).unwrap();
        prop_assert_eq!(nv.read_f32(offset).unwrap().to_bits(), bits);
    }

    #[test]
    fn string_roundtrip(offset in 0u16..=(MEM as u16 - STRING_LEN as u16), text in "[ -~]{0,16}") {
        let cell = fixed_str(&text);
        let mut nv = device();
        nv.write_str(offset, &cell).unwrap();

        let mut out = [0u8; STRING_LEN];
        nv.read_str(offset, &mut out).unwrap();
        prop_assert_eq!(out, cell);
    }

    #[test]
    fn rewriting_equal_value_is_physically_free(offset in 0u16..=(MEM as u16 - 4), value: i32) {
        let mut nv = device();
        nv.write_i32(offset, value).unwrap();
        nv.write_i32(offset, value).unwrap();

        let (bus, _clock) = nv.release();
        // Second write found every byte already matching
        prop_assert!(bus.data_writes <= 4);
    }
}
