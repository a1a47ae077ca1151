//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in sidereon-hal for the mount controller's peripherals:
//!
//! - Non-volatile storage (AT24C32 I2C EEPROM)
//! - Bus adapters for ecosystem HAL implementations

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod nvs;
