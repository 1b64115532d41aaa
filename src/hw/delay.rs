// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait delay from the core clock.

use embedded_hal::delay::DelayNs;

/// Cycle-counting delay. Every wait is rounded up to whole core cycles, so it is never shorter
/// than requested. Interrupts only make it longer.
#[derive(Copy, Clone, Debug)]
pub struct CycleDelay {
    sysclk_hz: u32,
}

impl CycleDelay {
    pub fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let mut cycles = (ns as u64 * self.sysclk_hz as u64).div_ceil(1_000_000_000);
        while cycles > 0 {
            let chunk = cycles.min(u32::MAX as u64) as u32;
            cortex_m::asm::delay(chunk);
            cycles -= chunk as u64;
        }
    }
}
