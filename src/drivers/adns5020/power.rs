// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reset and sleep sequencing for the ADNS-5020.
//!
//! ```text
//!        reset() / power_up()
//!   Off ──────────────────────> Resetting ───> Active
//!    ^  ^                           │            │
//!    │  └───── failed step ─────────┘            │
//!    └────────────────── power_down() ───────────┘
//! ```
//!
//! The chip forgets its resolution on every reset, so every path into `Active` rewrites
//! MOUSE_CONTROL.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use super::{reg, Adns5020, MouseControl, RESET_MAGIC, T_PD_US, T_WAKEUP_US};
use crate::error::{Error, Result};
use crate::hw::bitlink::DataLine;

/// Host-side view of the chip's power state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PowerState {
    /// Never reset, or put to sleep.
    Off,
    /// Reset sequence in progress.
    Resetting,
    /// Reset, configured and sampling.
    Active,
}

impl<CLK, DATA, CS, RST, D> Adns5020<CLK, DATA, CS, RST, D>
where
    CLK: OutputPin,
    DATA: DataLine,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Pulse NRESET low, then wait for the chip to wake up.
    pub fn hard_reset(&mut self) -> Result<()> {
        let rst = self.reset.as_mut().ok_or(Error::NoResetLine)?;

        rst.set_low().map_err(|_| Error::Pin)?;
        self.link.delay_us(T_PD_US);
        rst.set_high().map_err(|_| Error::Pin)?;
        self.link.delay_us(T_WAKEUP_US);
        Ok(())
    }

    /// Reset through the CHIP_RESET register.
    pub fn soft_reset(&mut self) -> Result<()> {
        self.write_register(reg::CHIP_RESET, RESET_MAGIC)?;
        self.link.delay_us(T_WAKEUP_US);
        Ok(())
    }

    /// Reset the chip and re-apply the stored resolution.
    ///
    /// Uses the reset line when one is wired, the CHIP_RESET register otherwise. If any step fails
    /// the chip is left `Off`.
    pub fn reset(&mut self) -> Result<()> {
        self.state = PowerState::Resetting;

        if let Err(e) = self.reset_sequence() {
            self.state = PowerState::Off;
            warn!("ADNS-5020 reset failed: {}", e);
            return Err(e);
        }

        self.state = PowerState::Active;
        info!("ADNS-5020 ready at {} CPI", self.resolution.cpi());
        Ok(())
    }

    fn reset_sequence(&mut self) -> Result<()> {
        if self.reset.is_some() {
            debug!("ADNS-5020 hard reset");
            self.hard_reset()?;
        } else {
            debug!("ADNS-5020 soft reset");
            self.soft_reset()?;
        }

        self.write_register(reg::MOUSE_CONTROL, self.resolution.control().bits())?;
        self.deselect()
    }

    /// Put the chip to sleep. The resolution bit is kept in the control word.
    pub fn power_down(&mut self) -> Result<()> {
        if self.state != PowerState::Off {
            let control = self.resolution.control() | MouseControl::POWER_DOWN;
            self.select()?;
            self.write_register(reg::MOUSE_CONTROL, control.bits())?;
            self.deselect()?;
            debug!("ADNS-5020 powered down");
        }
        self.state = PowerState::Off;
        Ok(())
    }

    /// Wake the chip with a full reset.
    pub fn power_up(&mut self) -> Result<()> {
        self.state = PowerState::Active;
        debug!("ADNS-5020 powering up");
        self.reset()
    }
}
