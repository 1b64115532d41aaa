// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line assignment for one sensor.
//!
//! A `LineConfig` bundles the clock, data and the optional chip-select and reset lines. Optional
//! lines that are not wired use [`NoPin`], which changes the driver's behavior at compile time
//! rather than through a sentinel pin number.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Placeholder for an optional line that is not wired.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Lines owned by a single sensor driver.
///
/// Build with [`LineConfig::new`] and add optional lines with the `with_*` methods:
///
/// ```ignore
/// let lines = LineConfig::new(sclk, sdio).with_chip_select(ncs);
/// ```
pub struct LineConfig<CLK, DATA, CS = NoPin, RST = NoPin> {
    pub clock: CLK,
    pub data: DATA,
    pub chip_select: Option<CS>,
    pub reset: Option<RST>,
}

impl<CLK, DATA> LineConfig<CLK, DATA, NoPin, NoPin> {
    /// Clock and data only.
    pub fn new(clock: CLK, data: DATA) -> Self {
        Self {
            clock,
            data,
            chip_select: None,
            reset: None,
        }
    }
}

impl<CLK, DATA, CS, RST> LineConfig<CLK, DATA, CS, RST> {
    /// Add an active-low chip-select line.
    pub fn with_chip_select<C>(self, chip_select: C) -> LineConfig<CLK, DATA, C, RST> {
        LineConfig {
            clock: self.clock,
            data: self.data,
            chip_select: Some(chip_select),
            reset: self.reset,
        }
    }

    /// Add an active-low hardware reset line.
    pub fn with_reset<R>(self, reset: R) -> LineConfig<CLK, DATA, CS, R> {
        LineConfig {
            clock: self.clock,
            data: self.data,
            chip_select: self.chip_select,
            reset: Some(reset),
        }
    }
}
