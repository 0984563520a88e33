// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Quadrature encoder support via STM32F7 timers in encoder mode.
//!
//! This module configures TIM2 (32-bit) and TIM3 (16-bit) registers for encoder mode and exposes
//! both as a [`TickCounter`]. The count is read as a signed value centred on zero, so the wrap
//! threshold of the attached encoder must stay below the counter's signed range (`i16::MAX` for
//! TIM3).
//!
//! The timer clocks must be enabled in RCC before calling the constructors.

use stm32f7xx_hal::pac;

use crate::drivers::encoder::TickCounter;

pub struct TimerEncoder<TIM> {
    tim: TIM,
}

impl<TIM> TimerEncoder<TIM> {
    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

impl TimerEncoder<pac::TIM2> {
    /// Configure TIM2 as a quadrature encoder with full 32-bit range.
    pub fn tim2(tim2: pac::TIM2) -> Self {
        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.arr.write(|w| w.bits(0xFFFF_FFFF));

        // Encoder mode 3: count on both TI1 and TI2 edges (x4)
        tim.smcr.modify(|_, w| w.sms().bits(0b011));
        tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());
        tim.ccer.modify(|_, w| {
            w.cc1p()
                .clear_bit()
                .cc2p()
                .clear_bit()
                .cc1e()
                .set_bit()
                .cc2e()
                .set_bit()
        });

        tim.cnt.write(|w| w.bits(0));
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    #[inline]
    fn raw(&self) -> u32 {
        self.tim.cnt.read().cnt().bits()
    }
}

impl TickCounter for TimerEncoder<pac::TIM2> {
    #[inline]
    fn ticks(&self) -> i32 {
        self.raw() as i32
    }

    fn rewind(&mut self, ticks: i32) {
        self.tim
            .cnt
            .modify(|r, w| w.bits(r.bits().wrapping_sub(ticks as u32)));
    }
}

impl TimerEncoder<pac::TIM3> {
    /// Configure TIM3 as a quadrature encoder with full 16-bit range.
    pub fn tim3(tim3: pac::TIM3) -> Self {
        let tim = tim3;

        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

        tim.smcr.modify(|_, w| w.sms().bits(0b011));
        tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());
        tim.ccer.modify(|_, w| {
            w.cc1p()
                .clear_bit()
                .cc2p()
                .clear_bit()
                .cc1e()
                .set_bit()
                .cc2e()
                .set_bit()
        });

        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    #[inline]
    fn raw(&self) -> u16 {
        self.tim.cnt.read().cnt().bits()
    }
}

impl TickCounter for TimerEncoder<pac::TIM3> {
    #[inline]
    fn ticks(&self) -> i32 {
        self.raw() as i16 as i32
    }

    fn rewind(&mut self, ticks: i32) {
        self.tim.cnt.modify(|r, w| unsafe {
            w.bits((r.bits() as u16).wrapping_sub(ticks as u16) as u32)
        });
    }
}
