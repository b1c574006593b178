//! Register definitions for the RM3100
//!
//! The RM3100 exposes a flat 8-bit register space. The register address
//! auto-increments across consecutive bytes of a transaction, so the
//! cycle-count block (0x04..=0x09) and the measurement block (0x24..=0x2C)
//! can each be covered by a single addressed access. The measurement block
//! is read raw by the driver (nine bytes, three 24-bit values) and is not
//! modelled here.

device_driver::create_device!(
    device_name: Rm3100,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// POLL - Single measurement trigger (0x00)
        ///
        /// Bits 4..=6 request a single measurement of X/Y/Z respectively.
        register Poll {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Poll request mask (PMX/PMY/PMZ in bits 4..=6)
            value: uint = 0..8,
        },

        /// CMM - Continuous Measurement Mode (0x01)
        ///
        /// Bitmask controlling start/alarm/continuous-sampling behaviour.
        /// Treated as opaque by this driver; see the RM3100 testboard
        /// datasheet for the individual bits.
        register Cmm {
            const ADDRESS = 0x01;
            const SIZE_BITS = 8;

            /// Raw mode mask
            value: uint = 0..8,
        },

        /// CCX1 - X-axis cycle count MSB (0x04)
        register CcxMsb {
            const ADDRESS = 0x04;
            const SIZE_BITS = 8;

            /// High byte of the X-axis cycle count
            value: uint = 0..8,
        },

        /// CCX0 - X-axis cycle count LSB (0x05)
        register CcxLsb {
            const ADDRESS = 0x05;
            const SIZE_BITS = 8;

            /// Low byte of the X-axis cycle count
            value: uint = 0..8,
        },

        /// CCY1 - Y-axis cycle count MSB (0x06)
        register CcyMsb {
            const ADDRESS = 0x06;
            const SIZE_BITS = 8;

            /// High byte of the Y-axis cycle count
            value: uint = 0..8,
        },

        /// CCY0 - Y-axis cycle count LSB (0x07)
        register CcyLsb {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;

            /// Low byte of the Y-axis cycle count
            value: uint = 0..8,
        },

        /// CCZ1 - Z-axis cycle count MSB (0x08)
        register CczMsb {
            const ADDRESS = 0x08;
            const SIZE_BITS = 8;

            /// High byte of the Z-axis cycle count
            value: uint = 0..8,
        },

        /// CCZ0 - Z-axis cycle count LSB (0x09)
        register CczLsb {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;

            /// Low byte of the Z-axis cycle count
            value: uint = 0..8,
        },

        /// TMRC - Continuous mode update rate (0x0B)
        register Tmrc {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;

            /// Raw rate divider
            value: uint = 0..8,
        },

        /// STATUS - Measurement status (0x34)
        register Status {
            const ADDRESS = 0x34;
            const SIZE_BITS = 8;

            reserved_6_0: uint = 0..7,
            /// Data ready: a completed measurement is available to read
            drdy: bool = 7,
        },

        /// REVID - Silicon revision identifier (0x36)
        ///
        /// Expected value: 0x22
        register RevId {
            const ADDRESS = 0x36;
            const SIZE_BITS = 8;

            /// Revision identifier
            value: uint = 0..8,
        },
    }
);
