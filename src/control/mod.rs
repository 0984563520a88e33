// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! This module provides the building blocks for closed-loop wheel velocity control.
//!
//! ## Modules
//!
//! - [`pid`] - General-purpose PID controller with selectable filter placement.
//! - [`drive_controller`] - Drivebase controller: kinematics, per-wheel PID and actuator dispatch.
//!
//! Received command frames are applied with [`DriveController::apply`].

mod command;
pub mod drive_controller;
pub mod pid;

pub use drive_controller::{ControlMode, DriveController, DriveError, DriveState, WheelCommand};
pub use pid::{FilterMode, Gains, Pid, Term};
