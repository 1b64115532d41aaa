// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dead-reckoning integration of sensor samples.
//!
//! Works in `no_std` and does not allocate memory.

use core::fmt;

use micromath::F32Ext;

use super::sample::{Position, Sample};
use super::transform::Transform;

/// Result of integrating one sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reading {
    /// The sample exactly as the sensor returned it.
    pub sample: Sample,
    /// Transformed delta. Zero when the sample carried no motion.
    pub dx: f32,
    pub dy: f32,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dx, dy) = self.sample.effective_delta();
        write!(f, "DX:{:>4} DY:{:>4}", dx, dy)?;
        if let Some(t) = self.sample.effective_telemetry() {
            write!(
                f,
                " SQ:{:>4} SU:{:>4} SL:{:>4} MP:{:>4} PS:{:>4}",
                t.squal, t.shutter_upper, t.shutter_lower, t.max_pixel, t.pixel_sum
            )?;
        }
        Ok(())
    }
}

/// Running position and travelled distance.
pub struct Accumulator {
    transform: Transform,
    position: Position,
    /// Path length in transformed units
    distance: f32,
    last: Option<Reading>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            position: Position::default(),
            distance: 0.0,
            last: None,
        }
    }

    /// Use a non-identity mounting transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Integrate one sample.
    ///
    /// Position accumulates raw counts; the transformed delta is only reported and summed into
    /// the travelled distance. Samples without motion leave both untouched.
    pub fn integrate(&mut self, sample: Sample) -> Reading {
        let reading = if sample.motion {
            // Counts wrap; consumers work with differences between positions.
            self.position.x = self.position.x.wrapping_add(sample.dx as i32);
            self.position.y = self.position.y.wrapping_add(sample.dy as i32);

            let (dx, dy) = self.transform.apply(sample.dx as f32, sample.dy as f32);
            self.distance += F32Ext::sqrt(dx * dx + dy * dy);

            Reading { sample, dx, dy }
        } else {
            Reading {
                sample,
                dx: 0.0,
                dy: 0.0,
            }
        };

        self.last = Some(reading);
        reading
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Most recent reading, including its telemetry.
    #[inline]
    pub fn last_reading(&self) -> Option<&Reading> {
        self.last.as_ref()
    }

    /// Zero position and distance.
    pub fn reset_position(&mut self) {
        self.position = Position::default();
        self.distance = 0.0;
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
