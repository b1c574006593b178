#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod measurement;
pub mod registers;

// Re-export main types
pub use device::{CycleCounts, Rm3100Config, Rm3100Driver};
pub use interface::I2cInterface;
pub use measurement::{Gain, MagDataUT, MagSample, RawMagData};

/// RM3100 I2C address when both SA0 and SA1 pins are low (default: 0x20)
///
/// The SA0/SA1 pins select one of four addresses in the 0x20..=0x23 range.
/// Use [`I2cInterface::default()`] for this configuration, or
/// [`I2cInterface::new()`] with one of the other addresses.
pub const I2C_ADDRESS_SA_LOW: u8 = 0x20;

/// RM3100 I2C address when SA0 is high and SA1 is low (0x21)
pub const I2C_ADDRESS_SA0_HIGH: u8 = 0x21;

/// Expected value of the `REVID` register
pub const REVID_VALUE: u8 = 0x22;

/// Default per-axis cycle count programmed by [`Rm3100Config::default()`]
///
/// 200 decimal, stored as 0x00 (MSB) / 0xC8 (LSB) in each axis pair.
pub const DEFAULT_CYCLE_COUNT: u16 = 0x00C8;

/// Default continuous measurement mode mask programmed by
/// [`Rm3100Config::default()`]
///
/// Starts continuous sampling on all three axes.
pub const DEFAULT_CMM_MASK: u8 = 0xF9;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `REVID` register value (contains the actual value read)
    InvalidDevice(u8),
    /// A configuration register did not read back with the value written
    InvalidConfig,
    /// Measurement requested before the gain was derived (call `init` first)
    NotConfigured,
    /// The data-ready flag did not assert within the allowed wait
    Timeout,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
