// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # IMOB Odometer Firmware
//!
//! This crate contains the optical-flow odometer of the IMOB ground vehicle, written in Rust,
//! targeting an STM32F767 MCU. Two mouse sensor chips are supported: the ADNS-5020 and the
//! MCS-12085.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Bit-banged sensor bus, line assignment, board support |
//! | [`drivers`] | Sensor drivers (ADNS-5020, MCS-12085) |
//! | [`odometry`] | Sample integration, mounting transform, polling wrapper |
//! | [`error`] | Crate-wide error type |
//!
//! The library builds for the host without any feature so drivers can be tested against the
//! simulated wire in `hw::mock`. The `board` feature adds STM32F767 support and the firmware
//! binary.
//!
//! ## Getting Started
//!
//! Run the tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board (ADNS-5020; add `mcs12085` for the other chip):
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod drivers;
pub mod error;
pub mod hw;
pub mod odometry;

pub use error::{Error, Result};
