// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Drivebase Firmware
//!
//! Velocity control for wheeled robot drivebases (differential, 3-wheel omni, 4-wheel omni and
//! mecanum), written in Rust for `no_std` targets. The reference board is an STM32F777.
//!
//! A body-frame velocity command goes through the kinematics model to per-wheel targets. Each
//! wheel's quadrature count becomes a calibrated velocity estimate, and a filtered PID turns target
//! and measurement into a duty cycle for the motor driver.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Drivebase, encoder and link settings with defaults |
//! | [`kinematics`] | Per-variant wheel target tables and dead-reckoning odometry |
//! | [`drivers`] | Encoder processing, H-bridge driver, motor-driver board link |
//! | [`motors`] | Drive wheel combining actuator and encoder |
//! | [`control`] | PID and the drivebase controller |
//! | [`protocol`] | Command and telemetry wire formats |
//! | `hw` | MCU-level wrappers around timers, PWM, USART and SysTick (`firmware` feature) |
//!
//! ## Getting Started
//!
//! Run the unit tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module below.
mod fmt;

pub mod config;
pub mod control;
pub mod drivers;
pub mod kinematics;
pub mod motors;
pub mod protocol;

#[cfg(feature = "firmware")]
pub mod hw;

#[cfg(test)]
mod test_util;
