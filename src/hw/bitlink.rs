// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-wire bit-banged serial link (clock + bidirectional data).
//!
//! - `DataLine` is a GPIO whose direction can be switched at runtime.
//! - `BitLink` shifts single bytes MSB first with a fixed half-period per clock phase.
//!
//! The clock idles high. For every bit the clock goes low, stays low for one half-period, goes
//! high and stays high for another half-period. A chip latches host data on the rising edge and
//! presents its own data on the falling edge, so the host drives during the low phase and samples
//! right after the rising edge.
//!
//! The half-period is a datasheet minimum. Delays may only be longer, never shorter.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::error::{Error, Result};

/// Direction of the shared data line, seen from the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// High impedance, the chip drives the line.
    Input,
    /// Push-pull, the host drives the line.
    Output,
}

/// GPIO used as a half-duplex data line.
///
/// # Invariants
///
/// - `set_level` is only meaningful while the line is an output.
/// - `is_high` reads the pad in either direction.
pub trait DataLine: ErrorType {
    /// Reconfigure the pad direction.
    fn set_direction(&mut self, direction: Direction) -> core::result::Result<(), Self::Error>;

    /// Drive the line high (`true`) or low (`false`).
    fn set_level(&mut self, high: bool) -> core::result::Result<(), Self::Error>;

    /// Sample the line.
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error>;
}

/// Clocked byte transfer over one clock output and one bidirectional data line.
///
/// The link owns the delay provider; protocol layers built on it wait through [`BitLink::delay_us`]
/// so that every timing window in a transaction comes from the same source.
pub struct BitLink<CLK, DATA, D> {
    clock: CLK,
    data: DATA,
    delay: D,
    half_period_us: u32,
    direction: Direction,
}

impl<CLK, DATA, D> BitLink<CLK, DATA, D>
where
    CLK: OutputPin,
    DATA: DataLine,
    D: DelayNs,
{
    /// Wrap the lines. Nothing is driven until [`idle`](Self::idle) or a transfer.
    ///
    /// The data line is assumed to start as an input.
    pub fn new(clock: CLK, data: DATA, delay: D, half_period_us: u32) -> Self {
        Self {
            clock,
            data,
            delay,
            half_period_us,
            direction: Direction::Input,
        }
    }

    /// Release the lines and the delay provider.
    pub fn free(self) -> (CLK, DATA, D) {
        (self.clock, self.data, self.delay)
    }

    /// Return the clock to its idle (high) level.
    pub fn idle(&mut self) -> Result<()> {
        self.clock.set_high().map_err(|_| Error::Pin)
    }

    /// Current data line direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Switch the data line direction. Only call between bytes.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.data.set_direction(direction).map_err(|_| Error::Pin)?;
        self.direction = direction;
        Ok(())
    }

    /// Drive the data line while it is an output.
    pub fn set_level(&mut self, high: bool) -> Result<()> {
        self.data.set_level(high).map_err(|_| Error::Pin)
    }

    /// Busy-wait for at least `us` microseconds.
    #[inline]
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Shift one byte out, MSB first.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        if self.direction != Direction::Output {
            self.set_direction(Direction::Output)?;
        }

        for bit in (0..8).rev() {
            self.clock.set_low().map_err(|_| Error::Pin)?;
            self.set_level(byte & (1 << bit) != 0)?;
            self.delay.delay_us(self.half_period_us);
            self.clock.set_high().map_err(|_| Error::Pin)?;
            self.delay.delay_us(self.half_period_us);
        }

        Ok(())
    }

    /// Shift one byte in, MSB first.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.direction != Direction::Input {
            self.set_direction(Direction::Input)?;
        }

        let mut byte = 0u8;
        for bit in (0..8).rev() {
            self.clock.set_low().map_err(|_| Error::Pin)?;
            self.delay.delay_us(self.half_period_us);
            self.clock.set_high().map_err(|_| Error::Pin)?;
            if self.data.is_high().map_err(|_| Error::Pin)? {
                byte |= 1 << bit;
            }
            self.delay.delay_us(self.half_period_us);
        }

        Ok(byte)
    }
}
