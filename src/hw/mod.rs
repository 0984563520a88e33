// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU Peripheral Wrappers
//!
//! Thin STM32F7 wrappers that plug the board's peripherals into the traits used by the rest of
//! the crate.

pub mod clock;
pub mod encoder;
pub mod pwm;
pub mod usart;

pub use clock::SysTickClock;
pub use encoder::TimerEncoder;
pub use pwm::PwmOutput;
pub use usart::UsartLink;
