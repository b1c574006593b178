//! Bus interface implementation for the RM3100
//!
//! This module provides an implementation of the `device-driver` register
//! interface for I2C communication with the RM3100.

use crate::I2C_ADDRESS_SA_LOW;

use device_driver::RegisterInterface;

/// I2C interface for the RM3100
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x20, SA0/SA1 LOW)
    ///
    /// This is the most common configuration where both address select pins
    /// are pulled low or left floating.
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut mag = Rm3100Driver::new(interface)?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_SA_LOW,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// The SA0/SA1 pins place the RM3100 anywhere in 0x20..=0x23. For the
    /// all-low configuration, prefer [`default()`](Self::default).
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        // write_read keeps the bus claimed between the address phase and the
        // read (repeated start); the device auto-increments from `address`.
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Create a buffer with address + data
        let mut buffer = [0u8; 17]; // Max: 1 address + 16 data bytes
        buffer[0] = address;
        let len = write_data.len().min(16);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}
