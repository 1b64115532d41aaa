// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Odometry
//!
//! Sensor-independent dead reckoning on top of the drivers in [`crate::drivers`].
//!
//! - [`sample`] – per-poll samples, telemetry and the accumulated position
//! - [`transform`] – mounting rotation and scale
//! - [`accumulator`] – position and distance integration
//! - [`odometer`] – the `OdometrySensor` capability and the polling wrapper

pub mod accumulator;
pub mod odometer;
pub mod sample;
pub mod transform;

pub use accumulator::{Accumulator, Reading};
pub use odometer::{Odometer, OdometrySensor};
pub use sample::{Position, Sample, Telemetry};
pub use transform::Transform;
