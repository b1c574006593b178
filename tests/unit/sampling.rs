//! Unit tests for sample acquisition and decoding through the driver

use crate::common::test_utils::assert_float_eq;
use crate::common::{create_mock_driver, Operation};
use rm3100::Rm3100Config;

#[test]
fn test_read_raw_sign_extension() {
    let (mut driver, interface) = create_mock_driver();

    // X = max positive 24-bit, Y = min negative 24-bit, Z = 1
    interface.set_mag_bytes([0x7F, 0xFF, 0xFF, 0x80, 0x00, 0x00, 0x00, 0x00, 0x01]);

    let raw = driver.read_raw().unwrap();
    assert_eq!(raw.x, 8_388_607);
    assert_eq!(raw.y, -8_388_608);
    assert_eq!(raw.z, 1);
}

#[test]
fn test_read_raw_roundtrip_counts() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_mag_data(7492, -7492, 123_456);

    let raw = driver.read_raw().unwrap();
    assert_eq!(raw.x, 7492);
    assert_eq!(raw.y, -7492);
    assert_eq!(raw.z, 123_456);
}

#[test]
fn test_read_raw_single_transaction() {
    let (mut driver, interface) = create_mock_driver();
    interface.clear_operations();

    driver.read_raw().unwrap();

    // One 9-byte read starting at MX MSB
    assert_eq!(
        interface.operations(),
        vec![Operation::Read {
            address: 0x24,
            len: 9,
        }]
    );
}

#[test]
fn test_read_sample_microtesla_conversion() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(Rm3100Config::default()).unwrap();

    // gain = 74.92; 7492 counts -> 100 uT
    interface.set_mag_data(7492, -7492, 0);

    let sample = driver.read_sample().unwrap();
    assert_eq!(sample.raw.x, 7492);
    assert_eq!(sample.raw.y, -7492);
    assert_eq!(sample.raw.z, 0);
    assert_float_eq(sample.field.x, 100.0, 0.01);
    assert_float_eq(sample.field.y, -100.0, 0.01);
    assert_float_eq(sample.field.z, 0.0, 0.001);
}

#[test]
fn test_read_sample_horizontal_magnitude() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(Rm3100Config::default()).unwrap();

    interface.set_mag_data(225, 300, 9999);

    // The horizontal magnitude is the Euclidean norm of the X and Y
    // components; the Z component plays no part
    let sample = driver.read_sample().unwrap();
    let expected =
        (sample.field.x * sample.field.x + sample.field.y * sample.field.y).sqrt();
    assert_float_eq(sample.horizontal_ut, expected, 1e-4);
}

#[test]
fn test_read_sample_idempotent() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(Rm3100Config::default()).unwrap();

    interface.set_mag_data(1234, -5678, 9012);

    let first = driver.read_sample().unwrap();
    let second = driver.read_sample().unwrap();

    assert_eq!(first.raw, second.raw);
    assert_eq!(first.field.x.to_bits(), second.field.x.to_bits());
    assert_eq!(first.field.y.to_bits(), second.field.y.to_bits());
    assert_eq!(first.field.z.to_bits(), second.field.z.to_bits());
    assert_eq!(first.horizontal_ut.to_bits(), second.horizontal_ut.to_bits());
}

#[test]
fn test_sequential_samples_are_independent() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(Rm3100Config::default()).unwrap();

    interface.set_mag_data(1000, 0, 0);
    let first = driver.read_sample().unwrap();

    interface.set_mag_data(2000, 0, 0);
    let second = driver.read_sample().unwrap();

    assert_eq!(first.raw.x, 1000);
    assert_eq!(second.raw.x, 2000);
    assert!(second.field.x > first.field.x);
}

#[test]
fn test_read_sample_zero_field() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(Rm3100Config::default()).unwrap();

    interface.set_mag_data(0, 0, 0);

    let sample = driver.read_sample().unwrap();
    assert_eq!(sample.raw.x, 0);
    assert_float_eq(sample.field.x, 0.0, f32::EPSILON);
    assert_float_eq(sample.horizontal_ut, 0.0, f32::EPSILON);
}
