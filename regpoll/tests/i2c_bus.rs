//! The embedded-hal adapter, checked against a mock I2C controller.
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use regpoll::{
    Error, I2cBus, PollerConfig, RegisterBus, RegisterPoller, RegisterSpec, TransportErrorKind,
    ValueFormat, Width, WordOrder,
};

const DEVICE: u8 = 0x67;

#[test]
fn byte_read_is_write_read_of_register() -> Result<(), regpoll::TransportError> {
    let expectations = [I2cTransaction::write_read(DEVICE, vec![1], vec![7])];
    let mut i2c = I2cMock::new(&expectations);
    let mut bus = I2cBus::new(i2c.clone(), WordOrder::default());
    assert_eq!(bus.read_byte(DEVICE, 1)?, 7);
    i2c.done();
    Ok(())
}

#[test]
fn word_order() -> Result<(), regpoll::TransportError> {
    let expectations = [
        I2cTransaction::write_read(DEVICE, vec![4], vec![0x01, 0x2C]),
        I2cTransaction::write_read(DEVICE, vec![4], vec![0x2C, 0x01]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let mut big = I2cBus::new(i2c.clone(), WordOrder::BigEndian);
    assert_eq!(big.read_word(DEVICE, 4)?, 300);
    let mut little = I2cBus::new(big.into_inner(), WordOrder::LittleEndian);
    assert_eq!(little.read_word(DEVICE, 4)?, 300);
    i2c.done();
    Ok(())
}

#[test]
fn nack_maps_to_no_acknowledge() {
    let expectations = [I2cTransaction::write_read(DEVICE, vec![10], vec![0])
        .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
    let mut i2c = I2cMock::new(&expectations);
    let mut bus = I2cBus::new(i2c.clone(), WordOrder::default());
    let err = bus.read_byte(DEVICE, 10).expect_err("device does not acknowledge");
    assert_eq!(err.kind(), TransportErrorKind::NoAcknowledge);
    assert_eq!(err.to_string(), "NoAcknowledge");
    assert!(std::error::Error::source(&err).is_some());
    i2c.done();
}

/// A full pass through the poller over the mock controller.
#[test]
fn poller_over_i2c() -> Result<(), Error> {
    let expectations = [
        I2cTransaction::write_read(DEVICE, vec![1], vec![0x00]),
        I2cTransaction::write_read(DEVICE, vec![4], vec![0x03, 0xFF]),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let config = PollerConfig {
        format: ValueFormat::Hex,
        registers: vec![
            RegisterSpec::new("REG_STATUS", 1, Width::Byte),
            RegisterSpec::new("REG_JOYS1X", 4, Width::Word),
        ],
        ..Default::default()
    };
    let bus = I2cBus::new(i2c.clone(), WordOrder::BigEndian);
    let mut poller = RegisterPoller::new(bus, config, Vec::new())?;
    poller.poll_once()?;
    let (_, out) = poller.into_inner();
    assert_eq!(
        String::from_utf8_lossy(&out),
        "REG_STATUS      : 0000\nREG_JOYS1X      : 03FF\n\x1b[3A\n"
    );
    i2c.done();
    Ok(())
}
