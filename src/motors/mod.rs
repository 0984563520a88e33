// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! This module contains motor-level wrappers that sit above device-level drivers in `drivers`.
//!
//! ## Modules
//!
//! - [`drive_motor`] - One drive wheel: actuator, optional encoder and velocity feedback.

pub mod drive_motor;

pub use drive_motor::DriveMotor;

/// What a stopped motor does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopMode {
    /// Both bridge inputs low, the wheel spins down freely.
    #[default]
    Coast,
    /// Both bridge inputs high, the wheel is held.
    Brake,
}
