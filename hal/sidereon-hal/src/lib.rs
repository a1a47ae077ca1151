//! Sidereon Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the Sidereon driver
//! crates are written against. Chip-specific HALs (or test doubles)
//! implement them, so the same driver code runs on any board that can
//! provide an I2C bus and a millisecond counter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Mount firmware / application code      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sidereon-drivers (device drivers)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sidereon-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C master operations
//! - [`time::MonotonicClock`] - free-running millisecond counter
//! - [`nvs::NvStorage`] - typed byte-addressed persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod nvs;
pub mod time;

// Re-export key traits at crate root for convenience
pub use i2c::{I2cBus, I2cConfig};
pub use nvs::{NvStorage, NvsError};
pub use time::MonotonicClock;
