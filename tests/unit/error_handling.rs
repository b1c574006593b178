//! Unit tests for error propagation
//!
//! The driver is fail-fast: no retries, no masking. Any bus error aborts
//! the operation that encountered it.

use crate::common::create_mock_driver;
use crate::common::mock_interface::{MockError, MockInterface};
use rm3100::{Error, Rm3100Config, Rm3100Driver};

#[test]
fn test_invalid_revision_id() {
    let interface = MockInterface::new();
    interface.set_revision_id(0x00);

    let result = Rm3100Driver::new(interface);
    assert!(matches!(result, Err(Error::InvalidDevice(0x00))));
}

#[test]
fn test_bus_error_during_construction() {
    let interface = MockInterface::new();
    interface.fail_next_read();

    let result = Rm3100Driver::new(interface);
    assert!(matches!(
        result,
        Err(Error::Bus(MockError::Communication))
    ));
}

#[test]
fn test_bus_error_aborts_configuration() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();
    let result = driver.init(Rm3100Config::default());
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));

    // Startup aborted: no gain was derived
    assert!(driver.gain().is_none());
}

#[test]
fn test_bus_error_during_readback_aborts_configuration() {
    let (mut driver, interface) = create_mock_driver();

    // The cycle-count write succeeds, the read-back fails
    interface.fail_next_read();
    let result = driver.init(Rm3100Config::default());
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    assert!(driver.gain().is_none());
}

#[test]
fn test_unlatched_cycle_count_rejected() {
    let (mut driver, interface) = create_mock_driver();

    // The device drops the CCX MSB write, so the read-back cannot match
    interface.make_read_only(0x04);
    interface.set_register(0x04, 0x12);

    let result = driver.init(Rm3100Config::default());
    assert!(matches!(result, Err(Error::InvalidConfig)));
    assert!(driver.gain().is_none());
}

#[test]
fn test_unlatched_cmm_rejected() {
    let (mut driver, interface) = create_mock_driver();

    interface.make_read_only(0x01);

    let result = driver.init(Rm3100Config::default());
    assert!(matches!(result, Err(Error::InvalidConfig)));
}

#[test]
fn test_bus_error_during_sample_read() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(Rm3100Config::default()).unwrap();

    interface.set_mag_data(7492, 0, 0);
    interface.fail_next_read();

    // All-or-nothing: a failed 9-byte read yields no partial sample
    let result = driver.read_sample();
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));

    // The next cycle is unaffected
    let sample = driver.read_sample().unwrap();
    assert_eq!(sample.raw.x, 7492);
}

#[test]
fn test_sample_before_configuration() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_mag_data(7492, 0, 0);

    let result = driver.read_sample();
    assert!(matches!(result, Err(Error::NotConfigured)));

    // Raw counts do not need the gain
    let raw = driver.read_raw().unwrap();
    assert_eq!(raw.x, 7492);
}

#[test]
fn test_bus_error_during_status_poll() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_next_read();

    let result = driver.data_ready();
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
}
