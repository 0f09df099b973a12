//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for address routing.
//! 2. **Access:** Word read/write at device-relative offsets.
//! 3. **Access Sizes:** Byte, half and doubleword accessors that default to rejecting the access.
//!
//! All implementors must be `Send + Sync` so a device can be shared with hart threads.

use tracing::warn;

/// Trait for memory-mapped I/O devices.
///
/// Devices implement the 32-bit accessors. Other widths are rejected by
/// default: reads return 0, writes are dropped, and both are logged as guest
/// errors. Devices that accept them override the defaults.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"finisher"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) for this device's MMIO region.
    fn address_range(&self) -> (u64, u64);
    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u64, val: u32);

    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u64) -> u8 {
        reject(self.name(), offset, 1);
        0
    }
    /// Reads two bytes (little-endian) at the given offset.
    fn read_u16(&mut self, offset: u64) -> u16 {
        reject(self.name(), offset, 2);
        0
    }
    /// Reads eight bytes (little-endian) at the given offset.
    fn read_u64(&mut self, offset: u64) -> u64 {
        reject(self.name(), offset, 8);
        0
    }
    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u64, _val: u8) {
        reject(self.name(), offset, 1);
    }
    /// Writes two bytes (little-endian) at the given offset.
    fn write_u16(&mut self, offset: u64, _val: u16) {
        reject(self.name(), offset, 2);
    }
    /// Writes eight bytes (little-endian) at the given offset.
    fn write_u64(&mut self, offset: u64, _val: u64) {
        reject(self.name(), offset, 8);
    }

    /// True if `addr` falls inside this device's region.
    fn contains(&self, addr: u64) -> bool {
        let (base, size) = self.address_range();
        addr >= base && addr - base < size
    }
}

fn reject(name: &str, offset: u64, size: u8) {
    warn!(target: "guest_error", device = name, offset, size, "unsupported access size");
}
