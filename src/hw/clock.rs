// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond clock driven by the SysTick exception.
//!
//! The handler only increments an atomic counter, nothing else is shared with it. Call
//! [`SysTickClock::on_tick`] from the `SysTick` exception handler.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};
use stm32f7xx_hal::rcc::Clocks;

use crate::drivers::mdd::Clock;

static MILLIS: AtomicU32 = AtomicU32::new(0);

#[derive(Copy, Clone)]
pub struct SysTickClock {
    _private: (),
}

impl SysTickClock {
    /// Start SysTick at 1 kHz from the core clock.
    pub fn start(mut syst: SYST, clocks: &Clocks) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(clocks.sysclk().raw() / 1_000 - 1);
        syst.clear_current();
        syst.enable_counter();
        syst.enable_interrupt();
        Self { _private: () }
    }

    #[inline]
    pub fn on_tick() {
        MILLIS.fetch_add(1, Ordering::Relaxed);
    }
}

impl Clock for SysTickClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        MILLIS.load(Ordering::Relaxed)
    }
}
