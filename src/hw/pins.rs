// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767ZI Nucleo board.
//!
//! The sensor sits on the Arduino header: D13 (PA5) SCLK, D12 (PA6) SDIO, D10 (PD14) NCS,
//! D9 (PD15) NRESET. The MCS-12085 uses SCLK and SDIO only.

use stm32f7xx_hal::{
    gpio::{gpiod, Alternate, PinState},
    pac,
    prelude::*,
};

use super::gpio::{PushPullLine, SdioPin};

pub struct BoardPins {
    pub usart3: Usart3Pins,
    pub sensor: SensorPins,
}

/// ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

pub struct SensorPins {
    pub sclk: PushPullLine<'A', 5>,
    pub sdio: SdioPin<'A', 6>,
    pub ncs: PushPullLine<'D', 14>,
    pub nreset: PushPullLine<'D', 15>,
}

impl BoardPins {
    pub fn new(gpioa: pac::GPIOA, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();

        Self {
            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            // Clock idles high, chip deselected, reset released.
            sensor: SensorPins {
                sclk: PushPullLine::new(gpioa.pa5, PinState::High),
                sdio: SdioPin::new(gpioa.pa6),
                ncs: PushPullLine::new(gpiod.pd14, PinState::High),
                nreset: PushPullLine::new(gpiod.pd15, PinState::High),
            },
        }
    }
}
