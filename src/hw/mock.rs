// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Simulated sensor wire for host tests.
//!
//! A [`Sim`] owns a shared [`Wire`] and hands out pins and a delay provider that all act on it.
//! Every pin edge and delay is recorded as an [`Event`] so tests can check ordering and timing.
//! The far side of the wire is a [`Device`] model that sees host bits on rising clock edges and
//! presents its own bits on falling edges, the same as the real chips.

use core::convert::Infallible;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::adns5020::reg;
use crate::drivers::mcs12085::cmd;
use crate::hw::bitlink::{DataLine, Direction};

/// Something observed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Clock driven to the given level.
    Clock(bool),
    /// Data driven to the given level.
    Data(bool),
    /// Data line direction changed.
    Direction(Direction),
    /// Chip-select asserted (`true`) or released (`false`).
    Select(bool),
    /// Reset line driven to the given level.
    Reset(bool),
    /// Busy wait, in nanoseconds.
    Delay(u64),
}

/// Model of the chip on the far side of the wire.
pub trait Device {
    /// Host bit latched on a rising clock edge while the host drives the data line.
    fn clock_in(&mut self, bit: bool);

    /// Bit presented on a falling clock edge while the host listens.
    fn clock_out(&mut self) -> bool;

    fn select(&mut self, _asserted: bool) {}

    fn reset_line(&mut self, _high: bool) {}
}

pub struct Wire<D> {
    device: D,
    events: Vec<Event>,
    clock: bool,
    direction: Direction,
    host_level: bool,
    device_level: bool,
    cs_wired: bool,
    selected: bool,
    elapsed_ns: u64,
}

impl<D: Device> Wire<D> {
    fn listening(&self) -> bool {
        !self.cs_wired || self.selected
    }

    fn set_clock(&mut self, high: bool) {
        self.events.push(Event::Clock(high));
        let was_high = self.clock;
        self.clock = high;

        if !self.listening() {
            return;
        }

        match (was_high, high) {
            (true, false) if self.direction == Direction::Input => {
                self.device_level = self.device.clock_out();
            }
            (false, true) if self.direction == Direction::Output => {
                self.device.clock_in(self.host_level);
            }
            _ => {}
        }
    }

    fn set_select(&mut self, asserted: bool) {
        self.events.push(Event::Select(asserted));
        self.selected = asserted;
        self.device.select(asserted);
    }

    fn set_reset(&mut self, high: bool) {
        self.events.push(Event::Reset(high));
        self.device.reset_line(high);
    }

    fn wait(&mut self, ns: u64) {
        self.events.push(Event::Delay(ns));
        self.elapsed_ns += ns;
    }
}

/// Test handle for a simulated wire.
pub struct Sim<D> {
    wire: Rc<RefCell<Wire<D>>>,
}

impl<D: Device> Sim<D> {
    pub fn new(device: D) -> Self {
        Self {
            wire: Rc::new(RefCell::new(Wire {
                device,
                events: Vec::new(),
                clock: false,
                direction: Direction::Input,
                host_level: false,
                device_level: false,
                cs_wired: false,
                selected: false,
                elapsed_ns: 0,
            })),
        }
    }

    pub fn clock(&self) -> SimClock<D> {
        SimClock(self.wire.clone())
    }

    pub fn data(&self) -> SimData<D> {
        SimData(self.wire.clone())
    }

    /// Wire a chip-select line. From now on the device ignores the clock while not selected.
    pub fn chip_select(&self) -> SimSelect<D> {
        self.wire.borrow_mut().cs_wired = true;
        SimSelect(self.wire.clone())
    }

    pub fn reset(&self) -> SimReset<D> {
        SimReset(self.wire.clone())
    }

    pub fn delay(&self) -> SimDelay<D> {
        SimDelay(self.wire.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.wire.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.wire.borrow_mut().events.clear();
    }

    pub fn clock_level(&self) -> bool {
        self.wire.borrow().clock
    }

    pub fn direction(&self) -> Direction {
        self.wire.borrow().direction
    }

    pub fn host_level(&self) -> bool {
        self.wire.borrow().host_level
    }

    pub fn is_selected(&self) -> bool {
        self.wire.borrow().selected
    }

    pub fn elapsed_us(&self) -> u64 {
        self.wire.borrow().elapsed_ns / 1_000
    }

    pub fn device(&self) -> Ref<'_, D> {
        Ref::map(self.wire.borrow(), |w| &w.device)
    }

    pub fn device_mut(&self) -> RefMut<'_, D> {
        RefMut::map(self.wire.borrow_mut(), |w| &mut w.device)
    }
}

/// Extract the delays of an event log, in nanoseconds.
pub fn delays(events: &[Event]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Delay(ns) => Some(*ns),
            _ => None,
        })
        .collect()
}

pub struct SimClock<D>(Rc<RefCell<Wire<D>>>);

impl<D> ErrorType for SimClock<D> {
    type Error = Infallible;
}

impl<D: Device> OutputPin for SimClock<D> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_clock(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_clock(true);
        Ok(())
    }
}

pub struct SimData<D>(Rc<RefCell<Wire<D>>>);

impl<D> ErrorType for SimData<D> {
    type Error = Infallible;
}

impl<D: Device> DataLine for SimData<D> {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Infallible> {
        let mut wire = self.0.borrow_mut();
        wire.events.push(Event::Direction(direction));
        wire.direction = direction;
        Ok(())
    }

    fn set_level(&mut self, high: bool) -> Result<(), Infallible> {
        let mut wire = self.0.borrow_mut();
        wire.events.push(Event::Data(high));
        wire.host_level = high;
        Ok(())
    }

    fn is_high(&mut self) -> Result<bool, Infallible> {
        let wire = self.0.borrow();
        Ok(match wire.direction {
            Direction::Input => wire.device_level,
            Direction::Output => wire.host_level,
        })
    }
}

/// Active-low chip-select.
pub struct SimSelect<D>(Rc<RefCell<Wire<D>>>);

impl<D> ErrorType for SimSelect<D> {
    type Error = Infallible;
}

impl<D: Device> OutputPin for SimSelect<D> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_select(true);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_select(false);
        Ok(())
    }
}

pub struct SimReset<D>(Rc<RefCell<Wire<D>>>);

impl<D> ErrorType for SimReset<D> {
    type Error = Infallible;
}

impl<D: Device> OutputPin for SimReset<D> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_reset(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_reset(true);
        Ok(())
    }
}

/// Recording delay. Takes no real time.
pub struct SimDelay<D>(Rc<RefCell<Wire<D>>>);

impl<D: Device> DelayNs for SimDelay<D> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().wait(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().wait(us as u64 * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().wait(ms as u64 * 1_000_000);
    }
}

#[derive(Default)]
struct ShiftIn {
    value: u8,
    count: u8,
}

impl ShiftIn {
    fn push(&mut self, bit: bool) -> Option<u8> {
        self.value = (self.value << 1) | bit as u8;
        self.count += 1;
        if self.count == 8 {
            let byte = self.value;
            *self = Self::default();
            Some(byte)
        } else {
            None
        }
    }
}

#[derive(Default)]
struct ShiftOut {
    queue: VecDeque<u8>,
    current: u8,
    remaining: u8,
}

impl ShiftOut {
    fn next_bit(&mut self) -> bool {
        if self.remaining == 0 {
            self.current = self.queue.pop_front().unwrap_or(0);
            self.remaining = 8;
        }
        let bit = self.current & 0x80 != 0;
        self.current <<= 1;
        self.remaining -= 1;
        bit
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Wired loopback: every bit the host writes comes back on the next read.
#[derive(Default)]
pub struct Loopback {
    bits: VecDeque<bool>,
}

impl Device for Loopback {
    fn clock_in(&mut self, bit: bool) {
        self.bits.push_back(bit);
    }

    fn clock_out(&mut self) -> bool {
        self.bits.pop_front().unwrap_or(false)
    }
}

/// ADNS-5020 register model.
///
/// Address bytes with bit 7 set start a write, otherwise a read. Burst mode streams `burst`, the
/// pixel grab register returns `0x80 | index` for successive pixels.
pub struct RegisterChip {
    pub registers: [u8; 128],
    pub burst: [u8; 7],
    pub writes: Vec<(u8, u8)>,
    pub reads: Vec<u8>,
    /// Number of times the reset line was pulled low.
    pub hard_resets: u32,
    input: ShiftIn,
    output: ShiftOut,
    pending_write: Option<u8>,
    pixel_index: u8,
}

impl RegisterChip {
    pub fn new() -> Self {
        let mut registers = [0u8; 128];
        registers[reg::PRODUCT_ID as usize] = 0x12;
        registers[reg::REVISION_ID as usize] = 0x01;
        registers[reg::INVERSE_PRODUCT_ID as usize] = !0x12;
        Self {
            registers,
            burst: [0; 7],
            writes: Vec::new(),
            reads: Vec::new(),
            hard_resets: 0,
            input: ShiftIn::default(),
            output: ShiftOut::default(),
            pending_write: None,
            pixel_index: 0,
        }
    }

    pub fn with_register(mut self, address: u8, value: u8) -> Self {
        self.registers[address as usize] = value;
        self
    }

    pub fn with_burst(mut self, burst: [u8; 7]) -> Self {
        self.burst = burst;
        self
    }

    /// Last value written to `address`, if any.
    pub fn last_write(&self, address: u8) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(a, _)| *a == address)
            .map(|(_, v)| *v)
    }

    fn byte_received(&mut self, byte: u8) {
        if let Some(address) = self.pending_write.take() {
            self.registers[address as usize] = byte;
            self.writes.push((address, byte));
            if address == reg::PIXEL_GRAB {
                self.pixel_index = 0;
            }
            return;
        }

        if byte & 0x80 != 0 {
            self.pending_write = Some(byte & 0x7F);
            return;
        }

        self.reads.push(byte);
        match byte {
            reg::BURST_MODE => self.output.queue.extend(self.burst),
            reg::PIXEL_GRAB => {
                self.output.queue.push_back(0x80 | self.pixel_index);
                self.pixel_index = self.pixel_index.wrapping_add(1);
            }
            address => self.output.queue.push_back(self.registers[address as usize]),
        }
    }
}

impl Default for RegisterChip {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for RegisterChip {
    fn clock_in(&mut self, bit: bool) {
        if let Some(byte) = self.input.push(bit) {
            self.byte_received(byte);
        }
    }

    fn clock_out(&mut self) -> bool {
        self.output.next_bit()
    }

    fn select(&mut self, asserted: bool) {
        if !asserted {
            self.input = ShiftIn::default();
            self.output.clear();
            self.pending_write = None;
        }
    }

    fn reset_line(&mut self, high: bool) {
        if !high {
            self.hard_resets += 1;
        }
    }
}

/// MCS-12085 command model. Delta registers clear when read.
#[derive(Default)]
pub struct CommandChip {
    pub dx: u8,
    pub dy: u8,
    pub commands: Vec<u8>,
    input: ShiftIn,
    output: ShiftOut,
}

impl CommandChip {
    pub fn with_motion(dx: u8, dy: u8) -> Self {
        Self {
            dx,
            dy,
            ..Self::default()
        }
    }

    fn byte_received(&mut self, command: u8) {
        self.commands.push(command);
        let response = match command {
            cmd::READ_DX => core::mem::take(&mut self.dx),
            cmd::READ_DY => core::mem::take(&mut self.dy),
            _ => 0,
        };
        self.output.clear();
        self.output.queue.push_back(response);
    }
}

impl Device for CommandChip {
    fn clock_in(&mut self, bit: bool) {
        if let Some(byte) = self.input.push(bit) {
            self.byte_received(byte);
        }
    }

    fn clock_out(&mut self) -> bool {
        self.output.next_bit()
    }
}
