// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! GPIO lines for the sensor bus.
//!
//! - `PushPullLine` is a plain push-pull output (clock, chip-select, reset).
//! - `SdioPin` is the bidirectional data line. Switching direction reconfigures the pad between
//!   floating input and push-pull output.

use core::convert::Infallible;
use core::mem;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, Floating, Input, Output, PinState, PushPull};

use crate::hw::bitlink::{DataLine, Direction};

/// Push-pull output, generic over any GPIO pin.
pub struct PushPullLine<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> PushPullLine<P, N> {
    /// Configure as push-pull output at the given level.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>, initial: PinState) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(initial);
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for PushPullLine<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for PushPullLine<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }
}

enum Pad<const P: char, const N: u8> {
    Input(gpio::Pin<P, N, Input<Floating>>),
    Output(gpio::Pin<P, N, Output<PushPull>>),
    /// Only observable while the pad is being reconfigured.
    Switching,
}

/// Bidirectional data line. Starts as a floating input.
pub struct SdioPin<const P: char, const N: u8> {
    pad: Pad<P, N>,
    /// Last driven level, restored when switching back to output.
    level: bool,
}

impl<const P: char, const N: u8> SdioPin<P, N> {
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        Self {
            pad: Pad::Input(pin.into_floating_input()),
            level: false,
        }
    }
}

impl<const P: char, const N: u8> ErrorType for SdioPin<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> DataLine for SdioPin<P, N> {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Infallible> {
        self.pad = match (mem::replace(&mut self.pad, Pad::Switching), direction) {
            (Pad::Input(pin), Direction::Output) => {
                let mut pin = pin.into_push_pull_output();
                if self.level {
                    pin.set_high();
                } else {
                    pin.set_low();
                }
                Pad::Output(pin)
            }
            (Pad::Output(pin), Direction::Input) => Pad::Input(pin.into_floating_input()),
            (pad, _) => pad,
        };
        Ok(())
    }

    fn set_level(&mut self, high: bool) -> Result<(), Infallible> {
        self.level = high;
        if let Pad::Output(pin) = &mut self.pad {
            if high {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
        Ok(())
    }

    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(match &self.pad {
            Pad::Input(pin) => pin.is_high(),
            _ => self.level,
        })
    }
}
