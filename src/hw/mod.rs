// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! Bus primitives shared by the sensor drivers, plus STM32F767 board support behind the `board`
//! feature.

pub mod bitlink;
pub mod lines;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "board")]
pub mod delay;
#[cfg(feature = "board")]
pub mod gpio;
#[cfg(feature = "board")]
pub mod logger;
#[cfg(feature = "board")]
pub mod pins;
#[cfg(feature = "board")]
pub mod usart;

pub use bitlink::{BitLink, DataLine, Direction};
pub use lines::{LineConfig, NoPin};

#[cfg(feature = "board")]
pub use delay::CycleDelay;
#[cfg(feature = "board")]
pub use gpio::{PushPullLine, SdioPin};
#[cfg(feature = "board")]
pub use pins::BoardPins;
#[cfg(feature = "board")]
pub use usart::Usart;
