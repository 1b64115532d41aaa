// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sensor-agnostic odometer used by the host loop.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! odometer.reset()?;
//!
//! loop {
//!     let reading = odometer.step()?;
//!     delay.delay_ms(50);
//! }
//! ```

use log::trace;

use super::accumulator::{Accumulator, Reading};
use super::sample::{Position, Sample};
use super::transform::Transform;
use crate::error::Result;

/// Capability shared by every optical-flow sensor driver.
pub trait OdometrySensor {
    /// Bring the chip into a known, sampling-ready state.
    fn reset(&mut self) -> Result<()>;

    /// Perform one protocol exchange. Delta registers are consumed by this call.
    fn read_sample(&mut self) -> Result<Sample>;
}

/// A sensor plus its dead-reckoning state. Call [`step`](Self::step) once per poll interval.
pub struct Odometer<S> {
    sensor: S,
    accumulator: Accumulator,
}

impl<S: OdometrySensor> Odometer<S> {
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            accumulator: Accumulator::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.accumulator.set_transform(transform);
        self
    }

    /// Reset the sensor. Accumulated position is kept.
    pub fn reset(&mut self) -> Result<()> {
        self.sensor.reset()
    }

    /// Read one sample and integrate it.
    pub fn step(&mut self) -> Result<Reading> {
        let sample = self.sensor.read_sample()?;
        let reading = self.accumulator.integrate(sample);
        if sample.motion {
            trace!("odometer: {} -> {}", reading, self.accumulator.position());
        }
        Ok(reading)
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.accumulator.position()
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.accumulator.distance()
    }

    #[inline]
    pub fn last_reading(&self) -> Option<&Reading> {
        self.accumulator.last_reading()
    }

    pub fn reset_position(&mut self) {
        self.accumulator.reset_position();
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.accumulator.set_transform(transform);
    }

    #[inline]
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Mutable access to the driver for chip-specific calls.
    #[inline]
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn free(self) -> S {
        self.sensor
    }
}
