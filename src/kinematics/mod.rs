// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Kinematics
//!
//! ## Modules
//!
//! - [`model`] - Body velocity to wheel targets for each drivebase variant.
//! - [`odometry`] - Dead-reckoning pose from measured wheel velocities.

pub mod model;
pub mod odometry;

pub use model::{DriveVariant, KinematicsModel, VelocityUnit, WheelTargets};
pub use odometry::{Odometry, Pose, PoseDelta, WheelMount};
