// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-poll sensor sample and the accumulated position.

use core::fmt;

/// Image quality bytes returned alongside a burst read.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Telemetry {
    /// Surface quality (number of features seen).
    pub squal: u8,
    pub shutter_upper: u8,
    pub shutter_lower: u8,
    pub max_pixel: u8,
    pub pixel_sum: u8,
}

impl Telemetry {
    /// Shutter period in clock cycles.
    #[inline]
    pub fn shutter(&self) -> u16 {
        u16::from_be_bytes([self.shutter_upper, self.shutter_lower])
    }
}

/// One motion report as read from a sensor.
///
/// `dx`/`dy` are the bytes the chip returned, reinterpreted as two's complement. They are only
/// meaningful when `motion` is set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub motion: bool,
    pub dx: i8,
    pub dy: i8,
    pub telemetry: Option<Telemetry>,
}

impl Sample {
    /// Sample from a sensor that has no motion flag: any non-zero delta counts as motion.
    pub fn from_deltas(dx: i8, dy: i8) -> Self {
        Self {
            motion: dx != 0 || dy != 0,
            dx,
            dy,
            telemetry: None,
        }
    }

    /// Deltas with the zero-motion policy applied.
    #[inline]
    pub fn effective_delta(&self) -> (i8, i8) {
        if self.motion {
            (self.dx, self.dy)
        } else {
            (0, 0)
        }
    }

    /// Telemetry with the zero-motion policy applied: without motion the quality reads as zero.
    pub fn effective_telemetry(&self) -> Option<Telemetry> {
        self.telemetry.map(|t| {
            if self.motion {
                t
            } else {
                Telemetry { squal: 0, ..t }
            }
        })
    }
}

/// Accumulated raw counts since the last explicit position reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{} Y:{}", self.x, self.y)
    }
}
