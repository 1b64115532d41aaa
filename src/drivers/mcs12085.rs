// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCS-12085 optical mouse sensor over its 2-wire command interface (SCK, SDIO).
//!
//! There is no chip-select. Each exchange is one command byte from the host followed by one
//! response byte from the chip, with a turnaround pause on either side of the response. The delta
//! registers clear when read.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::Result;
use crate::hw::bitlink::{BitLink, DataLine, Direction};
use crate::hw::lines::{LineConfig, NoPin};
use crate::odometry::{OdometrySensor, Sample};

// Command bytes
pub mod cmd {
    pub const READ_DX: u8 = 0x02;
    pub const READ_DY: u8 = 0x03;
}

// Timings (us)
pub const T_HALF_BIT_US: u32 = 25;
/// Command to response.
pub const T_WRITE_READ_US: u32 = 100;
/// Response to next command.
pub const T_READ_WRITE_US: u32 = 250;

/// Two's complement interpretation of a delta byte.
#[inline]
pub fn decode(raw: u8) -> i8 {
    raw as i8
}

pub struct Mcs12085<CLK, DATA, D> {
    link: BitLink<CLK, DATA, D>,
}

impl<CLK, DATA, D> Mcs12085<CLK, DATA, D>
where
    CLK: OutputPin,
    DATA: DataLine,
    D: DelayNs,
{
    /// Only the clock and data lines are used.
    pub fn new(lines: LineConfig<CLK, DATA, NoPin, NoPin>, delay: D) -> Self {
        Self {
            link: BitLink::new(lines.clock, lines.data, delay, T_HALF_BIT_US),
        }
    }

    pub fn free(self) -> (LineConfig<CLK, DATA, NoPin, NoPin>, D) {
        let (clock, data, delay) = self.link.free();
        (LineConfig::new(clock, data), delay)
    }

    /// Idle the bus: clock high, data driven low.
    pub fn init(&mut self) -> Result<()> {
        self.link.idle()?;
        self.link.set_direction(Direction::Output)?;
        self.link.set_level(false)
    }

    /// Send one command byte and release the data line for the response.
    pub fn write(&mut self, command: u8) -> Result<()> {
        self.link.write_byte(command)?;
        self.link.set_direction(Direction::Input)
    }

    /// Clock in the response byte and take the data line back, driven low.
    pub fn read_response(&mut self) -> Result<u8> {
        let raw = self.link.read_byte()?;
        self.link.set_direction(Direction::Output)?;
        self.link.set_level(false)?;
        Ok(raw)
    }

    fn exchange(&mut self, command: u8) -> Result<u8> {
        self.write(command)?;
        self.link.delay_us(T_WRITE_READ_US);
        let raw = self.read_response()?;
        self.link.delay_us(T_READ_WRITE_US);
        Ok(raw)
    }

    /// X movement since the previous read.
    pub fn read_x(&mut self) -> Result<i8> {
        self.exchange(cmd::READ_DX).map(decode)
    }

    /// Y movement since the previous read.
    pub fn read_y(&mut self) -> Result<i8> {
        self.exchange(cmd::READ_DY).map(decode)
    }
}

impl<CLK, DATA, D> OdometrySensor for Mcs12085<CLK, DATA, D>
where
    CLK: OutputPin,
    DATA: DataLine,
    D: DelayNs,
{
    fn reset(&mut self) -> Result<()> {
        self.init()
    }

    fn read_sample(&mut self) -> Result<Sample> {
        let dx = self.read_x()?;
        let dy = self.read_y()?;
        Ok(Sample::from_deltas(dx, dy))
    }
}
