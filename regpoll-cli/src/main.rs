use anyhow::Context;
use clap::Parser;
use regpoll::{CancelToken, RegisterPoller};

mod cli;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = cli::Cli::parse();
    let config = cli.poller_config();
    log::info!(
        "polling {} registers on device {:#04X}, bus {}, every {:?}",
        config.registers.len(),
        config.device_address,
        cli.bus,
        config.interval,
    );

    let bus = open_bus(&cli)?;
    let mut poller = RegisterPoller::new(bus, config, std::io::stdout())?;
    if cli.once {
        poller.poll_once()?;
        poller.finish()?;
        return Ok(());
    }

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("failed to install Ctrl-C handler")?;
    poller.run(&cancel)?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn open_bus(cli: &cli::Cli) -> anyhow::Result<regpoll::linux::LinuxBus> {
    Ok(regpoll::linux::LinuxBus::open(
        cli.bus,
        cli.address,
        cli.word_order.into(),
    )?)
}

#[cfg(not(target_os = "linux"))]
fn open_bus(_cli: &cli::Cli) -> anyhow::Result<NoBus> {
    anyhow::bail!("I2C buses can only be opened through Linux i2c-dev")
}

/// Stands in for a bus on platforms without one.
#[cfg(not(target_os = "linux"))]
enum NoBus {}

#[cfg(not(target_os = "linux"))]
impl regpoll::RegisterBus for NoBus {
    fn read_byte(&mut self, _: u8, _: u8) -> Result<u8, regpoll::TransportError> {
        match *self {}
    }

    fn read_word(&mut self, _: u8, _: u8) -> Result<u16, regpoll::TransportError> {
        match *self {}
    }
}
