//! Gain model and measurement decoding for the RM3100
//!
//! The RM3100 reports each axis as a 24-bit two's-complement count. The
//! count-to-microtesla scale factor (gain) is a fixed linear function of the
//! configured cycle count. Everything in this module is pure: decoding a
//! sample depends only on the nine register bytes and the gain in hand.

/// Counts-per-microtesla scale factor derived from the cycle count
///
/// Derived once after configuration, from the cycle count the device reads
/// back, and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gain {
    counts_per_ut: f32,
}

impl Gain {
    /// Derive the gain from a cycle count
    ///
    /// `gain = 0.3671 * cc + 1.5`, an empirical linear fit for the RM3100
    /// family. Only the X-axis cycle count is used even though all axes
    /// share the configured value; the gain is not derived per axis.
    #[must_use]
    pub fn from_cycle_count(cycle_count: u16) -> Self {
        Self {
            counts_per_ut: 0.3671 * f32::from(cycle_count) + 1.5,
        }
    }

    /// The scale factor in counts per microtesla
    #[must_use]
    pub const fn counts_per_ut(self) -> f32 {
        self.counts_per_ut
    }

    /// Convert a raw axis count to microteslas
    #[must_use]
    pub fn counts_to_ut(self, raw: i32) -> f32 {
        raw as f32 / self.counts_per_ut
    }
}

/// Magnetometer data as raw signed counts per axis
///
/// Each axis is the sign extension of a 24-bit two's-complement register
/// triple to 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawMagData {
    /// X-axis field (raw counts)
    pub x: i32,
    /// Y-axis field (raw counts)
    pub y: i32,
    /// Z-axis field (raw counts)
    pub z: i32,
}

impl RawMagData {
    /// Decode the nine measurement register bytes
    ///
    /// Register order is X-MSB, X-MID, X-LSB, Y-MSB, Y-MID, Y-LSB,
    /// Z-MSB, Z-MID, Z-LSB, big-endian within each 24-bit field.
    #[must_use]
    pub fn from_registers(bytes: &[u8; 9]) -> Self {
        Self {
            x: decode_axis(bytes[0], bytes[1], bytes[2]),
            y: decode_axis(bytes[3], bytes[4], bytes[5]),
            z: decode_axis(bytes[6], bytes[7], bytes[8]),
        }
    }
}

/// Sign-extend a 24-bit two's-complement register triple to `i32`
///
/// The 24-bit width does not match a native integer width, so the sign bit
/// is inspected and replicated upward explicitly instead of leaning on a
/// fixed-width signed cast.
fn decode_axis(msb: u8, mid: u8, lsb: u8) -> i32 {
    let mut value = (u32::from(msb) << 16) | (u32::from(mid) << 8) | u32::from(lsb);
    if msb & 0x80 != 0 {
        value |= 0xFF00_0000;
    }
    value as i32
}

/// Magnetometer data in microteslas (µT)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataUT {
    /// X-axis magnetic field in µT
    pub x: f32,
    /// Y-axis magnetic field in µT
    pub y: f32,
    /// Z-axis magnetic field in µT
    pub z: f32,
}

impl MagDataUT {
    /// Calculate the magnitude of the magnetic field vector in µT
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Calculate the horizontal field magnitude in µT
    ///
    /// Euclidean norm of the X and Y components of the current sample. This
    /// is a static magnitude, not a time derivative.
    #[must_use]
    pub fn horizontal_magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }
}

/// One decoded measurement cycle
///
/// Raw counts, the microtesla conversion, and the derived horizontal field
/// magnitude. Recreated on every cycle; no history is retained.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagSample {
    /// Raw signed counts per axis
    pub raw: RawMagData,
    /// Field strength per axis in µT
    pub field: MagDataUT,
    /// Horizontal field magnitude in µT
    pub horizontal_ut: f32,
}

impl MagSample {
    /// Decode a sample from the nine measurement register bytes
    ///
    /// Pure function of the input bytes and the gain: identical inputs
    /// produce bit-identical outputs.
    #[must_use]
    pub fn decode(bytes: &[u8; 9], gain: Gain) -> Self {
        let raw = RawMagData::from_registers(bytes);
        let field = MagDataUT {
            x: gain.counts_to_ut(raw.x),
            y: gain.counts_to_ut(raw.y),
            z: gain.counts_to_ut(raw.z),
        };
        let horizontal_ut = field.horizontal_magnitude();

        Self {
            raw,
            field,
            horizontal_ut,
        }
    }
}
