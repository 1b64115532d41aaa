// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Avago ADNS-5020 optical mouse sensor over its 3-wire serial port (SCLK, SDIO, NCS).
//!
//! This module handles register framing and the burst motion read. Reset and sleep sequencing live
//! in [`power`], pixel capture in [`frame`].
//!
//! A transaction is bracketed by chip-select. Register reads leave the chip selected so several
//! reads can share one frame; the caller releases it with [`Adns5020::deselect`]. Writes always end
//! the frame themselves.

use bitflags::bitflags;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::hw::bitlink::{BitLink, DataLine, Direction};
use crate::hw::lines::LineConfig;
use crate::odometry::{OdometrySensor, Sample, Telemetry};

pub mod frame;
pub mod power;

pub use frame::Frame;
pub use power::PowerState;

// Register addresses
pub mod reg {
    pub const PRODUCT_ID: u8 = 0x00;
    pub const REVISION_ID: u8 = 0x01;
    pub const MOTION: u8 = 0x02;
    pub const DELTA_X: u8 = 0x03;
    pub const DELTA_Y: u8 = 0x04;
    pub const SQUAL: u8 = 0x05;
    pub const SHUTTER_UPPER: u8 = 0x06;
    pub const SHUTTER_LOWER: u8 = 0x07;
    pub const MAXIMUM_PIXEL: u8 = 0x08;
    pub const PIXEL_SUM: u8 = 0x09;
    pub const PIXEL_GRAB: u8 = 0x0B;
    pub const MOUSE_CONTROL: u8 = 0x0D;
    pub const CHIP_RESET: u8 = 0x3A;
    pub const INVERSE_PRODUCT_ID: u8 = 0x3F;
    pub const BURST_MODE: u8 = 0x63;
}

/// Value read from [`reg::PRODUCT_ID`] on a genuine part.
pub const PRODUCT_ID: u8 = 0x12;

/// Magic value for [`reg::CHIP_RESET`].
pub const RESET_MAGIC: u8 = 0x5A;

/// Bytes streamed after [`reg::BURST_MODE`].
pub const BURST_LEN: usize = 7;

// Timings (us). Each is a datasheet minimum rounded up.
pub const T_HALF_BIT_US: u32 = 10;
/// Settle time after turning the SDIO line around.
pub const T_HOLD_US: u32 = 10;
pub const T_NCS_SCLK_US: u32 = 1;
pub const T_SCLK_NCS_READ_US: u32 = 1;
pub const T_SCLK_NCS_WRITE_US: u32 = 20;
pub const T_NCS_SDIO_US: u32 = 1;
/// Address to first data byte in burst mode.
pub const T_SRAD_US: u32 = 4;
pub const T_BEXIT_US: u32 = 1;
/// Write to next command.
pub const T_SWW_US: u32 = 30;
pub const T_PD_US: u32 = 50_000;
pub const T_WAKEUP_US: u32 = 55_000;

bitflags! {
    /// MOUSE_CONTROL register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MouseControl: u8 {
        /// 1000 CPI when set, 500 CPI when clear.
        const RES_1000_CPI = 0b0000_0001;
        /// Enter sleep. Any register write afterwards wakes the chip.
        const POWER_DOWN = 0b0000_0010;
    }
}

/// Sensor resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Cpi500,
    Cpi1000,
}

impl Resolution {
    /// Nearest supported level for a requested CPI.
    pub fn from_cpi(cpi: u16) -> Self {
        if cpi >= 750 {
            Resolution::Cpi1000
        } else {
            Resolution::Cpi500
        }
    }

    #[inline]
    pub fn cpi(self) -> u16 {
        match self {
            Resolution::Cpi500 => 500,
            Resolution::Cpi1000 => 1000,
        }
    }

    /// Control register bits selecting this level.
    #[inline]
    pub fn control(self) -> MouseControl {
        match self {
            Resolution::Cpi500 => MouseControl::empty(),
            Resolution::Cpi1000 => MouseControl::RES_1000_CPI,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Adns5020Config {
    /// Requested resolution, mapped with [`Resolution::from_cpi`].
    pub cpi: u16,
}

impl Default for Adns5020Config {
    fn default() -> Self {
        Self { cpi: 500 }
    }
}

/// Product and revision read by [`Adns5020::identify`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub product_id: u8,
    pub revision_id: u8,
    /// Bitwise complement of the product ID on a working link.
    pub inverse_product_id: u8,
}

impl Identity {
    /// Genuine part, and the product ID survived the link intact.
    #[inline]
    pub fn is_expected(&self) -> bool {
        self.product_id == PRODUCT_ID && self.inverse_product_id == !PRODUCT_ID
    }
}

/// Registers read one by one by [`Adns5020::read_motion`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MotionReport {
    pub motion: u8,
    pub dx: u8,
    pub dy: u8,
    pub squal: u8,
}

impl MotionReport {
    #[inline]
    pub fn has_motion(&self) -> bool {
        self.motion != 0
    }
}

impl From<MotionReport> for Sample {
    fn from(report: MotionReport) -> Self {
        Sample {
            motion: report.has_motion(),
            dx: report.dx as i8,
            dy: report.dy as i8,
            telemetry: Some(Telemetry {
                squal: report.squal,
                ..Telemetry::default()
            }),
        }
    }
}

/// MOTION byte plus the seven bytes streamed in burst mode, as read off the wire.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BurstReport {
    pub motion: u8,
    /// DELTA_X, DELTA_Y, SQUAL, SHUTTER_UPPER, SHUTTER_LOWER, MAXIMUM_PIXEL, PIXEL_SUM
    pub payload: [u8; BURST_LEN],
}

impl BurstReport {
    #[inline]
    pub fn has_motion(&self) -> bool {
        self.motion != 0
    }

    #[inline]
    pub fn dx(&self) -> i8 {
        self.payload[0] as i8
    }

    #[inline]
    pub fn dy(&self) -> i8 {
        self.payload[1] as i8
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            squal: self.payload[2],
            shutter_upper: self.payload[3],
            shutter_lower: self.payload[4],
            max_pixel: self.payload[5],
            pixel_sum: self.payload[6],
        }
    }
}

impl From<BurstReport> for Sample {
    fn from(report: BurstReport) -> Self {
        Sample {
            motion: report.has_motion(),
            dx: report.dx(),
            dy: report.dy(),
            telemetry: Some(report.telemetry()),
        }
    }
}

/// ADNS-5020 driver instance.
pub struct Adns5020<CLK, DATA, CS, RST, D> {
    link: BitLink<CLK, DATA, D>,
    chip_select: Option<CS>,
    reset: Option<RST>,
    selected: bool,
    resolution: Resolution,
    state: PowerState,
}

impl<CLK, DATA, CS, RST, D> Adns5020<CLK, DATA, CS, RST, D>
where
    CLK: OutputPin,
    DATA: DataLine,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the lines and park them: clock high, chip deselected, reset released.
    ///
    /// The chip is left unconfigured ([`PowerState::Off`]) until [`reset`](Self::reset) or
    /// [`power_up`](Self::power_up).
    pub fn new(
        lines: LineConfig<CLK, DATA, CS, RST>,
        delay: D,
        config: Adns5020Config,
    ) -> Result<Self> {
        let LineConfig {
            clock,
            data,
            chip_select,
            reset,
        } = lines;

        let mut sensor = Self {
            link: BitLink::new(clock, data, delay, T_HALF_BIT_US),
            chip_select,
            reset,
            selected: false,
            resolution: Resolution::from_cpi(config.cpi),
            state: PowerState::Off,
        };

        sensor.link.idle()?;
        if let Some(rst) = sensor.reset.as_mut() {
            rst.set_high().map_err(|_| Error::Pin)?;
        }
        sensor.deselect()?;

        Ok(sensor)
    }

    /// Release the lines and the delay provider.
    pub fn free(self) -> (LineConfig<CLK, DATA, CS, RST>, D) {
        let (clock, data, delay) = self.link.free();
        (
            LineConfig {
                clock,
                data,
                chip_select: self.chip_select,
                reset: self.reset,
            },
            delay,
        )
    }

    #[inline]
    pub fn power_state(&self) -> PowerState {
        self.state
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Assert chip-select. No-op if already selected.
    pub fn select(&mut self) -> Result<()> {
        if self.selected {
            return Ok(());
        }
        if let Some(cs) = self.chip_select.as_mut() {
            cs.set_low().map_err(|_| Error::Pin)?;
            self.link.delay_us(T_NCS_SCLK_US);
        }
        self.selected = true;
        Ok(())
    }

    /// De-assert chip-select and float SDIO.
    pub fn deselect(&mut self) -> Result<()> {
        if let Some(cs) = self.chip_select.as_mut() {
            cs.set_high().map_err(|_| Error::Pin)?;
            self.link.delay_us(T_SCLK_NCS_READ_US);
            self.link.delay_us(T_NCS_SDIO_US);
        }
        self.link.set_direction(Direction::Input)?;
        self.selected = false;
        Ok(())
    }

    fn turn(&mut self, direction: Direction) -> Result<()> {
        if self.link.direction() != direction {
            self.link.set_direction(direction)?;
        }
        self.link.delay_us(T_HOLD_US);
        Ok(())
    }

    fn send(&mut self, byte: u8) -> Result<()> {
        self.turn(Direction::Output)?;
        self.link.write_byte(byte)
    }

    fn receive(&mut self) -> Result<u8> {
        self.turn(Direction::Input)?;
        self.link.read_byte()
    }

    fn ensure_active(&self) -> Result<()> {
        match self.state {
            PowerState::Active => Ok(()),
            _ => Err(Error::NotActive),
        }
    }

    /// Read one register. The chip stays selected.
    pub fn read_register(&mut self, address: u8) -> Result<u8> {
        self.select()?;
        self.send(address & 0x7F)?;
        self.receive()
    }

    /// Write one register and end the frame.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<()> {
        self.select()?;
        self.send(address | 0x80)?;
        self.send(value)?;
        self.link.delay_us(T_SCLK_NCS_WRITE_US);
        self.deselect()?;
        self.link.delay_us(T_SWW_US);
        Ok(())
    }

    /// Read MOTION, DELTA_X, DELTA_Y and SQUAL register by register.
    pub fn read_motion(&mut self) -> Result<MotionReport> {
        self.ensure_active()?;

        // Reading MOTION freezes the deltas until they are read.
        let motion = self.read_register(reg::MOTION)?;
        let dx = self.read_register(reg::DELTA_X)?;
        let dy = self.read_register(reg::DELTA_Y)?;
        let squal = self.read_register(reg::SQUAL)?;
        self.deselect()?;

        Ok(MotionReport {
            motion,
            dx,
            dy,
            squal,
        })
    }

    /// Read MOTION then the seven burst registers in one frame.
    ///
    /// The burst is always performed, so the payload is what the chip returned even when MOTION
    /// reports nothing.
    pub fn read_burst(&mut self) -> Result<BurstReport> {
        self.ensure_active()?;

        let motion = self.read_register(reg::MOTION)?;
        self.send(reg::BURST_MODE)?;
        self.link.delay_us(T_SRAD_US);

        let mut payload = [0u8; BURST_LEN];
        for byte in payload.iter_mut() {
            *byte = self.receive()?;
        }

        self.deselect()?;
        self.link.delay_us(T_BEXIT_US);

        Ok(BurstReport { motion, payload })
    }

    /// Read the product and revision IDs. A mismatch is only logged.
    pub fn identify(&mut self) -> Result<Identity> {
        let product_id = self.read_register(reg::PRODUCT_ID)?;
        let revision_id = self.read_register(reg::REVISION_ID)?;
        let inverse_product_id = self.read_register(reg::INVERSE_PRODUCT_ID)?;
        self.deselect()?;

        let identity = Identity {
            product_id,
            revision_id,
            inverse_product_id,
        };
        if identity.is_expected() {
            info!("ADNS-5020 prodId={:#04x} rev={:#04x}", product_id, revision_id);
        } else {
            warn!(
                "ADNS-5020 unknown device: prodId={:#04x} (expected {:#04x}) inv={:#04x} rev={:#04x}",
                product_id, PRODUCT_ID, inverse_product_id, revision_id
            );
        }
        Ok(identity)
    }

    /// Select the nearest supported resolution.
    ///
    /// The control register is written right away only while active; otherwise the level is
    /// applied by the next reset.
    pub fn set_resolution(&mut self, cpi: u16) -> Result<()> {
        self.resolution = Resolution::from_cpi(cpi);
        debug!("ADNS-5020 resolution {} CPI", self.resolution.cpi());

        if self.state == PowerState::Active {
            self.write_register(reg::MOUSE_CONTROL, self.resolution.control().bits())?;
        }
        Ok(())
    }
}

impl<CLK, DATA, CS, RST, D> OdometrySensor for Adns5020<CLK, DATA, CS, RST, D>
where
    CLK: OutputPin,
    DATA: DataLine,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    fn reset(&mut self) -> Result<()> {
        Adns5020::reset(self)
    }

    fn read_sample(&mut self) -> Result<Sample> {
        self.read_burst().map(Sample::from)
    }
}
