// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! [`log`] backend writing to the debug USART.
//!
//! Initialize once at startup, before the first log macro:
//!
//! ```ignore
//! logger::init(usart, LevelFilter::Info)?;
//! info!("ready");
//! ```
//!
//! Each record is one line:
//!
//! ```text
//! INFO imob::drivers::adns5020::power - ADNS-5020 ready at 1000 CPI
//! ```

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use stm32f7xx_hal::pac::USART3;

use super::usart::Usart;

/// Debug port the logger writes to.
pub type DebugUsart = Usart<USART3>;

struct UsartLogger {
    sink: Mutex<RefCell<Option<DebugUsart>>>,
}

impl log::Log for UsartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        interrupt::free(|cs| {
            if let Some(usart) = self.sink.borrow(cs).borrow_mut().as_mut() {
                let _ = writeln!(
                    usart,
                    "{} {} - {}\r",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        });
    }

    fn flush(&self) {
        interrupt::free(|cs| {
            if let Some(usart) = self.sink.borrow(cs).borrow_mut().as_mut() {
                usart.flush();
            }
        });
    }
}

static LOGGER: UsartLogger = UsartLogger {
    sink: Mutex::new(RefCell::new(None)),
};

/// Install the USART logger with the given maximum level.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(usart: DebugUsart, level: LevelFilter) -> Result<(), SetLoggerError> {
    interrupt::free(|cs| {
        LOGGER.sink.borrow(cs).replace(Some(usart));
    });
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
