// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pixel grab: one 15x15 image of the sensor array.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::{reg, Adns5020};
use crate::error::Result;
use crate::hw::bitlink::DataLine;

/// Side of the square pixel array.
pub const FRAME_SIDE: usize = 15;

/// Pixels per frame.
pub const FRAME_LEN: usize = FRAME_SIDE * FRAME_SIDE;

/// Bit 7 of every PIXEL_GRAB read. Not part of the pixel value.
const PIXEL_VALID: u8 = 0x80;

/// A complete pixel capture. Each value is 7 bits.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: [u8; FRAME_LEN],
}

impl Frame {
    #[inline]
    pub fn pixels(&self) -> &[u8; FRAME_LEN] {
        &self.pixels
    }

    /// Pixel at `(row, col)`, `None` outside the array.
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        if row < FRAME_SIDE && col < FRAME_SIDE {
            Some(self.pixels[row * FRAME_SIDE + col])
        } else {
            None
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame").field("len", &FRAME_LEN).finish()
    }
}

/// `FRAME:` followed by every pixel as two uppercase hex digits.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FRAME:")?;
        for pixel in self.pixels.iter() {
            write!(f, "{:02X}", pixel)?;
        }
        Ok(())
    }
}

impl<CLK, DATA, CS, RST, D> Adns5020<CLK, DATA, CS, RST, D>
where
    CLK: OutputPin,
    DATA: DataLine,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Capture one frame.
    ///
    /// The validity bit of each read is not checked; the chip is assumed to keep up with the host
    /// clock.
    pub fn capture_frame(&mut self) -> Result<Frame> {
        self.ensure_active()?;

        // Any write restarts the grab at pixel 0.
        self.write_register(reg::PIXEL_GRAB, 0x01)?;

        let mut pixels = [0u8; FRAME_LEN];
        for pixel in pixels.iter_mut() {
            *pixel = self.read_register(reg::PIXEL_GRAB)? & !PIXEL_VALID;
        }
        self.deselect()?;

        Ok(Frame { pixels })
    }
}
