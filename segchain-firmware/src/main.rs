//! Segchain demo firmware
//!
//! Drives a wall of 20 MAX7219 modules (10 columns by 2 rows, wired in the
//! reference serpentine) from an RP2040 over SPI0:
//!
//! | Signal | Pin    |
//! |--------|--------|
//! | CLK    | GPIO18 |
//! | DIN    | GPIO19 |
//! | CS     | GPIO17 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use segchain_core::config::ChainConfig;
use segchain_drivers::{EmbeddedHalTransport, SegmentDisplay};

mod scene;

use crate::scene::Marquee;

/// Chain wiring; chip_select matches the CS pin below
const CHAIN: ChainConfig = ChainConfig::new(17, 10, 2);

/// Panel brightness (0-15)
const BRIGHTNESS: u8 = 6;

/// Delay between refreshes
const FRAME_INTERVAL_MS: u64 = 80;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("segchain firmware starting");

    let p = embassy_rp::init(Default::default());

    let mut spi_config = spi::Config::default();
    spi_config.frequency = CHAIN.spi.frequency;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);

    let transport = unwrap!(EmbeddedHalTransport::new(spi, cs));
    let mut display = unwrap!(SegmentDisplay::new(transport, CHAIN));

    if let Err(e) = display.init() {
        error!("chain init failed: {}", Debug2Format(&e));
        return;
    }
    if let Err(e) = display.set_brightness(BRIGHTNESS) {
        warn!("brightness not applied: {}", Debug2Format(&e));
    }

    let (width, height) = display.extent();
    info!(
        "{} modules ready, {}x{} dots",
        CHAIN.module_count(),
        width,
        height
    );

    let mut marquee = Marquee::new();
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS));

    loop {
        // Drawing onto the framebuffer is infallible
        let _ = marquee.draw(&mut display);

        if let Err(e) = display.update() {
            warn!("refresh failed: {}", Debug2Format(&e));
        }

        ticker.next().await;
    }
}
