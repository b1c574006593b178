//! High-level driver API for the RM3100
//!
//! This module provides the configuration sequencer and sample acquisition
//! paths on top of the register interface: cycle-count programming with
//! read-back, gain derivation, continuous mode control, and the data-ready
//! wait that gates each measurement cycle.

use crate::measurement::{Gain, MagSample, RawMagData};
use crate::registers::Rm3100 as RegisterDevice;
use crate::{Error, DEFAULT_CMM_MASK, DEFAULT_CYCLE_COUNT, REVID_VALUE};

use device_driver::RegisterInterface;

/// First register of the cycle-count block (CCX MSB, 0x04)
///
/// The device auto-increments through CCX LSB, CCY MSB/LSB and CCZ MSB/LSB,
/// so one 6-byte transaction covers all three axis pairs.
const CC_BLOCK_START: u8 = 0x04;

/// First register of the measurement block (MX MSB, 0x24)
///
/// Nine consecutive bytes: X, Y, Z as MSB/MID/LSB triples.
const MEASUREMENT_BLOCK_START: u8 = 0x24;

/// Interval between data-ready polls in [`Rm3100Driver::wait_for_data_ready`]
const DRDY_POLL_INTERVAL_MS: u32 = 1;

/// Per-axis cycle counts as read back from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleCounts {
    /// X-axis cycle count
    pub x: u16,
    /// Y-axis cycle count
    pub y: u16,
    /// Z-axis cycle count
    pub z: u16,
}

/// Startup configuration for [`Rm3100Driver::init`]
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rm3100Config {
    /// Cycle count programmed into all three axis register pairs
    ///
    /// Higher values trade sampling rate for sensitivity.
    pub cycle_count: u16,
    /// Continuous measurement mode mask written to CMM
    pub cmm_mask: u8,
}

impl Default for Rm3100Config {
    fn default() -> Self {
        Self {
            cycle_count: DEFAULT_CYCLE_COUNT,
            cmm_mask: DEFAULT_CMM_MASK,
        }
    }
}

/// Main driver for the RM3100
pub struct Rm3100Driver<I> {
    device: RegisterDevice<I>,
    gain: Option<Gain>,
}

impl<I> Rm3100Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new RM3100 driver instance
    ///
    /// This verifies the `REVID` register but does not configure the device.
    /// Call [`init()`](Self::init) after construction to program the cycle
    /// counts and start continuous sampling.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `REVID` register contains an unexpected value
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let device = RegisterDevice::new(interface);
        let mut driver = Self { device, gain: None };

        let rev_id = driver.read_revision_id()?;
        if rev_id != REVID_VALUE {
            return Err(Error::InvalidDevice(rev_id));
        }

        Ok(driver)
    }

    /// Configure the device and derive the gain
    ///
    /// Programs the cycle-count registers, reads them back, derives the gain
    /// from the read-back X-axis value, then writes and confirms the
    /// continuous measurement mode mask. The write and its read-back are
    /// independent bus transactions; the device state is never inferred from
    /// the write alone.
    ///
    /// # Errors
    ///
    /// Any bus error aborts startup. `InvalidConfig` is returned when a
    /// register does not read back with the value written.
    pub fn init(&mut self, config: Rm3100Config) -> Result<(), Error<I::Error>> {
        self.set_cycle_counts(config.cycle_count)?;

        let counts = self.read_cycle_counts()?;
        if counts.x != config.cycle_count
            || counts.y != config.cycle_count
            || counts.z != config.cycle_count
        {
            return Err(Error::InvalidConfig);
        }

        // The gain comes from what the device reports, not from the value
        // requested. Only the X-axis count feeds the fit; all axes share it.
        self.gain = Some(Gain::from_cycle_count(counts.x));

        self.set_continuous_mode(config.cmm_mask)?;
        if self.continuous_mode()? != config.cmm_mask {
            return Err(Error::InvalidConfig);
        }

        Ok(())
    }

    /// Read the `REVID` register
    ///
    /// Should return 0x22 for a valid RM3100
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_revision_id(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.rev_id().read()?;
        Ok(reg.value())
    }

    /// Write the same cycle count to all three axis register pairs
    ///
    /// Issues a single 6-byte write starting at CCX MSB so the whole block
    /// updates in one transaction. For a partial update of the block, use
    /// [`write_registers()`](Self::write_registers) with the wanted start
    /// address instead.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_cycle_counts(&mut self, cycle_count: u16) -> Result<(), Error<I::Error>> {
        let [msb, lsb] = cycle_count.to_be_bytes();
        let payload = [msb, lsb, msb, lsb, msb, lsb];
        self.write_registers(CC_BLOCK_START, &payload)
    }

    /// Read the cycle-count registers for all three axes
    ///
    /// One 6-byte read from CCX MSB; pairs are big-endian in X, Y, Z order.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_cycle_counts(&mut self) -> Result<CycleCounts, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.read_registers(CC_BLOCK_START, &mut buffer)?;

        Ok(CycleCounts {
            x: u16::from_be_bytes([buffer[0], buffer[1]]),
            y: u16::from_be_bytes([buffer[2], buffer[3]]),
            z: u16::from_be_bytes([buffer[4], buffer[5]]),
        })
    }

    /// Write the continuous measurement mode mask
    ///
    /// The mask is passed through opaquely; see the RM3100 testboard
    /// datasheet for the individual bits. [`DEFAULT_CMM_MASK`] starts
    /// continuous sampling on all three axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_continuous_mode(&mut self, mask: u8) -> Result<(), Error<I::Error>> {
        self.device.cmm().write(|w| {
            w.set_value(mask);
        })?;
        Ok(())
    }

    /// Read the continuous measurement mode mask back
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn continuous_mode(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.cmm().read()?;
        Ok(reg.value())
    }

    /// Write the continuous-mode update rate register (TMRC)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_update_rate(&mut self, raw: u8) -> Result<(), Error<I::Error>> {
        self.device.tmrc().write(|w| {
            w.set_value(raw);
        })?;
        Ok(())
    }

    /// Read the continuous-mode update rate register (TMRC)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn update_rate(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.tmrc().read()?;
        Ok(reg.value())
    }

    /// Request a single measurement via the POLL register
    ///
    /// Bits 4..=6 of the mask select the X/Y/Z axes. Useful when continuous
    /// mode is not running; wait for data-ready afterwards as usual.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn request_single_measurement(&mut self, axes_mask: u8) -> Result<(), Error<I::Error>> {
        self.device.poll().write(|w| {
            w.set_value(axes_mask);
        })?;
        Ok(())
    }

    /// Check whether a completed measurement is available to read
    ///
    /// Reads the DRDY bit of the STATUS register.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        let status = self.device.status().read()?;
        Ok(status.drdy())
    }

    /// Block until data-ready asserts, or until the timeout elapses
    ///
    /// Polls STATUS at a 1 ms interval. An indefinite busy-wait on the flag
    /// is not offered; a flag that never asserts surfaces as
    /// [`Error::Timeout`] instead.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    /// * `timeout_ms` - Maximum time to wait for the flag
    ///
    /// # Errors
    ///
    /// Returns `Timeout` if the flag does not assert in time, or a bus error
    /// if communication with the device fails.
    pub fn wait_for_data_ready<D>(
        &mut self,
        delay: &mut D,
        timeout_ms: u32,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let mut waited_ms = 0;
        loop {
            if self.data_ready()? {
                return Ok(());
            }
            if waited_ms >= timeout_ms {
                return Err(Error::Timeout);
            }
            delay.delay_ms(DRDY_POLL_INTERVAL_MS);
            waited_ms += DRDY_POLL_INTERVAL_MS;
        }
    }

    /// Read the measurement registers as raw signed counts
    ///
    /// One 9-byte read from MX MSB, decoded into sign-extended 32-bit counts
    /// per axis. Does not require the gain, so this works before `init`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<RawMagData, Error<I::Error>> {
        let mut buffer = [0u8; 9];
        self.read_registers(MEASUREMENT_BLOCK_START, &mut buffer)?;
        Ok(RawMagData::from_registers(&buffer))
    }

    /// Read and decode one full sample
    ///
    /// Raw counts, the microtesla conversion and the horizontal field
    /// magnitude, from a single 9-byte read. All-or-nothing: a bus error
    /// yields no partial sample.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` if [`init()`](Self::init) has not derived the
    /// gain yet, or a bus error if communication with the device fails.
    pub fn read_sample(&mut self) -> Result<MagSample, Error<I::Error>> {
        let gain = self.gain.ok_or(Error::NotConfigured)?;

        let mut buffer = [0u8; 9];
        self.read_registers(MEASUREMENT_BLOCK_START, &mut buffer)?;
        Ok(MagSample::decode(&buffer, gain))
    }

    /// Wait for data-ready, then read and decode one sample
    ///
    /// One iteration of the sampling loop: blocks on the data-ready flag
    /// (bounded by `timeout_ms`), then performs the measurement read. The
    /// cadence between samples is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `Timeout`, `NotConfigured`, or a bus error as for
    /// [`wait_for_data_ready()`](Self::wait_for_data_ready) and
    /// [`read_sample()`](Self::read_sample).
    pub fn next_sample<D>(
        &mut self,
        delay: &mut D,
        timeout_ms: u32,
    ) -> Result<MagSample, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.wait_for_data_ready(delay, timeout_ms)?;
        self.read_sample()
    }

    /// The gain derived by [`init()`](Self::init), if any
    #[must_use]
    pub fn gain(&self) -> Option<Gain> {
        self.gain
    }

    /// Write a contiguous run of registers in one transaction
    ///
    /// The device writes `bytes[0]` to `start`, `bytes[1]` to `start + 1`,
    /// and so on (register auto-increment). This is the raw access path the
    /// typed operations are built on; it also expresses partial
    /// configurations such as rewriting only the CCZ pair.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_registers(&mut self, start: u8, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .write_register(start, bytes.len() as u32 * 8, bytes)?;
        Ok(())
    }

    /// Read a contiguous run of registers in one transaction
    ///
    /// Fills `buffer` starting from register `start`, relying on the
    /// device-side auto-increment.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_registers(&mut self, start: u8, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .read_register(start, buffer.len() as u32 * 8, buffer)?;
        Ok(())
    }
}
