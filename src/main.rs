// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::{error, info, LevelFilter};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use imob::hw::{logger, BoardPins, CycleDelay, LineConfig, Usart};
use imob::odometry::{Odometer, OdometrySensor, Transform};
use imob::Error;

const BAUD_RATE: u32 = 115_200;
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Must exceed one full protocol exchange.
const POLL_INTERVAL_MS: u32 = 50;

/// ADNS-5020 resolution.
#[cfg(not(feature = "mcs12085"))]
const SENSOR_CPI: u16 = 1000;

/// Sensor mounting relative to the chassis.
const MOUNT_ANGLE_DEG: f32 = 0.0;
const MOUNT_SCALE: f32 = 1.0;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);

    // USART3 (DBG)
    let usart_cfg = Config {
        baud_rate: BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, usart_cfg);
    let _ = logger::init(Usart::new(serial), LOG_LEVEL);

    let delay = CycleDelay::new(clocks.sysclk().raw());
    let mut poll = delay;
    let sensor = pins.sensor;

    #[cfg(not(feature = "mcs12085"))]
    let mut odometer = {
        use imob::drivers::{Adns5020, Adns5020Config};

        let lines = LineConfig::new(sensor.sclk, sensor.sdio)
            .with_chip_select(sensor.ncs)
            .with_reset(sensor.nreset);
        match Adns5020::new(lines, delay, Adns5020Config { cpi: SENSOR_CPI }) {
            Ok(adns) => Odometer::new(adns),
            Err(e) => halt(e),
        }
    };

    #[cfg(feature = "mcs12085")]
    let mut odometer = {
        use imob::drivers::Mcs12085;

        Odometer::new(Mcs12085::new(LineConfig::new(sensor.sclk, sensor.sdio), delay))
    };

    odometer.set_transform(Transform::from_degrees(MOUNT_ANGLE_DEG, MOUNT_SCALE));

    if let Err(e) = odometer.reset() {
        halt(e);
    }

    #[cfg(not(feature = "mcs12085"))]
    if let Err(e) = odometer.sensor_mut().identify() {
        error!("identify failed: {}", e);
    }

    run(&mut odometer, &mut poll)
}

/// Poll the sensor forever, logging every reading that carries motion.
fn run<S: OdometrySensor, D: DelayNs>(odometer: &mut Odometer<S>, delay: &mut D) -> ! {
    info!("polling every {} ms", POLL_INTERVAL_MS);

    loop {
        match odometer.step() {
            Ok(reading) if reading.sample.motion => {
                info!(
                    "{} {} D:{:.1}",
                    reading,
                    odometer.position(),
                    odometer.distance()
                );
            }
            Ok(_) => {}
            Err(e) => {
                error!("sensor: {}", e);
                if let Err(e) = odometer.reset() {
                    error!("sensor reset: {}", e);
                }
            }
        }

        delay.delay_ms(POLL_INTERVAL_MS);
    }
}

fn halt(e: Error) -> ! {
    error!("halted: {}", e);
    loop {
        cortex_m::asm::nop();
    }
}
