// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensor Drivers
//!
//! Optical-flow sensor drivers built on [`crate::hw::bitlink`]. Both implement
//! [`OdometrySensor`](crate::odometry::OdometrySensor).
//!
//! ## Existing drivers
//!
//! - [`adns5020`] – Avago ADNS-5020, addressed registers with chip-select, burst read and pixel grab
//! - [`mcs12085`] – MCS-12085, command bytes without chip-select

pub mod adns5020;
pub mod mcs12085;

pub use adns5020::{Adns5020, Adns5020Config};
pub use mcs12085::Mcs12085;
