//! KSP Link - controller firmware
//!
//! Runs the device side of the KSP Link serial protocol on an RP2040 board.
//! The host plugin streams vessel telemetry over UART0; this firmware
//! answers its handshake, keeps the latest snapshot, and streams control
//! records back built from the panel inputs.
//!
//! Pins:
//! - GPIO0 / GPIO1: UART0 TX / RX to the host
//! - GPIO15: stage button (active low)
//! - GPIO25: link LED, lit while the host is talking to us

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as RpUartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ksplink_core::{Session, SessionEvent};
use ksplink_hal::{IoSerial, UartConfig};
use ksplink_protocol::{FrameError, MainControl, VesselData, WireRecord, FRAME_OVERHEAD};

mod clock;

use crate::clock::EmbassyClock;

// link.toml, validated by build.rs
include!(concat!(env!("OUT_DIR"), "/link_config.rs"));

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
// RX holds at least one full telemetry frame plus the next frame's header
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("KSP Link firmware starting...");

    let p = embassy_rp::init(Default::default());

    let link_uart = UartConfig {
        baudrate: UART_BAUDRATE,
        ..UartConfig::default()
    };
    let mut uart_config = RpUartConfig::default();
    uart_config.baudrate = link_uart.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 512]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);

    info!(
        "UART0 at {} baud, telemetry frame takes {} us",
        link_uart.baudrate,
        link_uart.transfer_time_us(VesselData::SIZE + FRAME_OVERHEAD)
    );

    let mut led = Output::new(p.PIN_25, Level::Low);
    let stage_button = Input::new(p.PIN_15, Pull::Up);

    info!(
        "Link config: idle timeout {} ms, control refresh {} ms",
        LINK_CONFIG.idle_timeout_ms, LINK_CONFIG.control_refresh_ms
    );

    let mut session = Session::new(IoSerial::new(uart), EmbassyClock, LINK_CONFIG);

    loop {
        match session.poll() {
            Ok(SessionEvent::HandshakeAnswered(_)) => info!("Handshake answered"),
            Ok(SessionEvent::Telemetry) => {
                if let Some(vessel) = session.vessel() {
                    trace!("Telemetry: alt {} m", vessel.alt);
                }
            }
            Ok(SessionEvent::Rejected(FrameError::ChecksumMismatch { expected, actual })) => {
                debug!("Checksum mismatch: expected {=u8:#x}, got {=u8:#x}", expected, actual);
            }
            Ok(SessionEvent::Rejected(e)) => debug!("Frame rejected: {}", e),
            Ok(_) => {}
            Err(e) => warn!("Handshake reply failed: {}", e),
        }

        session.set_main_control(MainControl::Stage, stage_button.is_low());

        if let Err(e) = session.send_control_if_due() {
            warn!("Control send failed: {}", e);
        }

        led.set_level(if session.is_connected() {
            Level::High
        } else {
            Level::Low
        });

        embassy_futures::yield_now().await;
    }
}
