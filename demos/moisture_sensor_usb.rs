//! Moisture Sensor with USB Telemetry
//!
//! This example samples a capacitive soil moisture probe, turns each sample
//! into a moisture reading and streams it to the host as one text record per
//! line (`43.72,3,50000\n`).
//!
//! # Hardware
//!
//! - Raspberry Pi Pico 2 (RP2350)
//! - Capacitive moisture probe, signal on GP26 (ADC0)
//! - USB connection to the host
//!
//! # Usage
//!
//! 1. Flash this firmware:
//!    ```bash
//!    cargo run --example moisture_sensor_usb --no-default-features \
//!        --features embedded --target thumbv8m.main-none-eabihf --release
//!    ```
//!
//! 2. Watch the dashboard:
//!    ```bash
//!    cargo run --bin moisture_host
//!    ```
//!
//! # Architecture
//!
//! - **USB Task**: Handles USB enumeration (spawned separately for reliability)
//! - **Main**: Samples the probe through `SensorPort`, evaluates it with the
//!   default `SensorProfile` and publishes through `RecordLink`
//!
//! Sampling pauses while no host is connected.

#![no_std]
#![no_main]
#![allow(static_mut_refs)]

use defmt::*;
use embassy_rp::adc::{Adc, Channel as AdcChannel};
use embassy_rp::gpio::Pull;
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_rp::{bind_interrupts, peripherals};
use embassy_time::{Duration, Timer};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config};
use {defmt_rtt as _, panic_probe as _};

use moisture::adapters::{Rp2350MoistureSensor, UsbCdcLink};
use moisture::{LinkError, Record, RecordLink, SensorPort, SensorProfile};

// ============================================================================
// Boot Image
// ============================================================================

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ============================================================================
// Sensor Configuration
// ============================================================================

/// How often to sample the probe (milliseconds)
const SAMPLE_INTERVAL_MS: u64 = 500;

/// USB serial number (bump to make Windows re-read the descriptors)
const USB_SERIAL: &str = "MOIST01";

// ============================================================================
// Interrupt Bindings
// ============================================================================

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<peripherals::USB>;
});

type UsbDriver = Driver<'static, peripherals::USB>;

// ============================================================================
// Main Entry Point
// ============================================================================

#[embassy_executor::main]
async fn main(spawner: embassy_executor::Spawner) {
    info!("=== Moisture Sensor with USB ===");

    let p = embassy_rp::init(Default::default());

    // Blocking ADC reads, one conversion per sample
    let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
    let probe = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let mut sensor = Rp2350MoistureSensor::new(adc, probe);

    info!("Setting up USB...");
    let driver = Driver::new(p.USB, Irqs);

    let mut config = Config::new(0x2e8a, 0x000b);
    config.manufacturer = Some("Raspberry Pi");
    config.product = Some("Moisture Sensor");
    config.serial_number = Some(USB_SERIAL);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    static mut CONFIG_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut BOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut MSOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut CONTROL_BUF: [u8; 64] = [0; 64];
    static mut STATE: State = State::new();

    let mut builder = unsafe {
        Builder::new(
            driver,
            config,
            &mut CONFIG_DESCRIPTOR,
            &mut BOS_DESCRIPTOR,
            &mut MSOS_DESCRIPTOR,
            &mut CONTROL_BUF,
        )
    };

    let class = unsafe { CdcAcmClass::new(&mut builder, &mut STATE, 64) };
    let usb = builder.build();

    // Spawn USB as dedicated task for reliable enumeration
    spawner.spawn(usb_device_task(usb).expect("usb task"));

    let mut link = UsbCdcLink::new(class);
    let profile = SensorProfile::default();

    loop {
        link.wait_connection().await;
        info!("USB connected");
        sample_loop(&mut sensor, &mut link, &profile).await;
        info!("USB disconnected");
    }
}

// ============================================================================
// USB Device Task
// ============================================================================

/// USB device task - runs USB stack (spawned separately for reliable enumeration)
#[embassy_executor::task]
async fn usb_device_task(mut usb: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    usb.run().await
}

// ============================================================================
// Sampling
// ============================================================================

/// Sample and publish until the host goes away
async fn sample_loop(
    sensor: &mut impl SensorPort,
    link: &mut impl RecordLink,
    profile: &SensorProfile,
) {
    loop {
        match sensor.read_raw().await {
            Ok(raw) => {
                let reading = profile.evaluate(raw);
                info!("{}", Display2Format(&reading.summary()));

                match link.send_record(&Record::from(&reading)).await {
                    Ok(()) => {}
                    Err(LinkError::Disconnected) => return,
                    Err(e) => warn!("Send failed: {}", e),
                }
            }
            Err(e) => warn!("Probe read failed: {}", e),
        }

        Timer::after(Duration::from_millis(SAMPLE_INTERVAL_MS)).await;
    }
}
