//! Non-volatile storage drivers
//!
//! Persistence for mount state that must survive power cycles: alignment
//! model, site coordinates, backlash, labels. Drivers here implement the
//! [`NvStorage`](sidereon_hal::nvs::NvStorage) trait; the typed accessors
//! and update-if-changed semantics come with the trait, so a driver only
//! supplies correctly timed, correctly addressed byte transactions.

pub mod at24c32;

pub use at24c32::{At24c32, At24c32Config};
