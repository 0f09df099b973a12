//! Memory-Mapped IO Devices.
//!
//! This module contains the devices attached to a hart machine. The test
//! finisher is the only one: it turns guest writes into exit and reset requests.

/// Test finisher (pass/fail exit and hart reset control).
pub mod finisher;

pub use finisher::Finisher;

pub use crate::soc::traits::Device;
