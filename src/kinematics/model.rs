// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Forward kinematics: body-frame velocity to per-wheel target velocity.
//!
//! Every drivebase variant is a fixed coefficient table selected once at configuration time, so the
//! control tick only ever does a `match` and a handful of multiply-adds.
//!
//! Wheel order for the 4-wheel variants is front-right, front-left, back-right, back-left. The
//! differential base uses right, left.

use core::f32::consts::{FRAC_1_SQRT_2, PI};

use micromath::F32Ext;

use crate::config::MAX_WHEELS;

/// sqrt(3) / 2, the lateral coefficient of the two rear omni wheels.
const HALF_SQRT_3: f32 = 0.866_025_4;

/// Below this magnitude (rad/s) a differential turn is treated as pure translation.
const MIN_TURN_RATE: f32 = 1.0e-6;

/// Drivebase geometry variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveVariant {
    /// Two wheels on a common axle.
    Differential,
    /// Three omni wheels, 120° apart, wheel 0 along the forward axis.
    Omni3,
    /// Four omni wheels at ±45°.
    Omni4,
    /// Four mecanum wheels with 45° rollers.
    Mecanum,
}

impl DriveVariant {
    /// Number of driven wheels for this variant.
    #[inline]
    pub const fn wheel_count(self) -> usize {
        match self {
            DriveVariant::Differential => 2,
            DriveVariant::Omni3 => 3,
            DriveVariant::Omni4 | DriveVariant::Mecanum => 4,
        }
    }
}

/// Unit of the per-wheel targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VelocityUnit {
    /// Wheel rotations per second.
    Rotational,
    /// Wheel rim speed in mm/s.
    Linear,
}

/// Per-wheel targets produced by [`KinematicsModel::forward`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelTargets {
    speeds: [f32; MAX_WHEELS],
    len: usize,
}

impl WheelTargets {
    /// Targets for the configured wheels only.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.speeds[..self.len]
    }

    /// Target of one wheel, `0.0` past the configured wheel count.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.as_slice().get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Forward kinematics for one drivebase.
///
/// Geometry parameters:
/// - `wheel_radius_mm`: drive wheel radius, used for the rotational unit conversion
/// - `turning_radius_mm`: distance from the robot centre to the wheels (half the track for the
///   differential base)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KinematicsModel {
    variant: DriveVariant,
    wheel_radius_mm: f32,
    turning_radius_mm: f32,
    unit: VelocityUnit,
}

impl KinematicsModel {
    pub fn new(
        variant: DriveVariant,
        wheel_radius_mm: f32,
        turning_radius_mm: f32,
        unit: VelocityUnit,
    ) -> Self {
        Self {
            variant,
            wheel_radius_mm,
            turning_radius_mm,
            unit,
        }
    }

    #[inline]
    pub fn variant(&self) -> DriveVariant {
        self.variant
    }

    #[inline]
    pub fn unit(&self) -> VelocityUnit {
        self.unit
    }

    #[inline]
    pub fn wheel_radius_mm(&self) -> f32 {
        self.wheel_radius_mm
    }

    #[inline]
    pub fn turning_radius_mm(&self) -> f32 {
        self.turning_radius_mm
    }

    #[inline]
    pub fn wheel_count(&self) -> usize {
        self.variant.wheel_count()
    }

    /// Compute wheel targets for a body velocity.
    ///
    /// `vx`, `vy`: body velocity in mm/s (`vy` is ignored by the differential base)
    /// `omega_deg_s`: yaw rate in deg/s
    pub fn forward(&self, vx: f32, vy: f32, omega_deg_s: f32) -> WheelTargets {
        let omega = omega_deg_s * PI / 180.0;
        let r = self.turning_radius_mm;
        let yaw = r * omega;

        let mut speeds = [0.0; MAX_WHEELS];
        match self.variant {
            DriveVariant::Differential => {
                let (right, left) = if omega.abs() < MIN_TURN_RATE {
                    (vx, vx)
                } else {
                    let turn = vx / omega;
                    ((turn + r) * omega, (turn - r) * omega)
                };
                speeds[0] = right;
                speeds[1] = left;
            }
            DriveVariant::Omni3 => {
                speeds[0] = -vx + yaw;
                speeds[1] = vx / 2.0 - vy * HALF_SQRT_3 + yaw;
                speeds[2] = vx / 2.0 + vy * HALF_SQRT_3 + yaw;
            }
            DriveVariant::Omni4 => {
                let s = FRAC_1_SQRT_2;
                speeds[0] = -s * vx + s * vy + yaw;
                speeds[1] = s * vx + s * vy + yaw;
                speeds[2] = s * vx - s * vy + yaw;
                speeds[3] = -s * vx - s * vy + yaw;
            }
            DriveVariant::Mecanum => {
                let s = FRAC_1_SQRT_2;
                speeds[0] = (vx - vy) * s + yaw;
                speeds[1] = (-vx - vy) * s + yaw;
                speeds[2] = (-vx + vy) * s + yaw;
                speeds[3] = (vx + vy) * s + yaw;
            }
        }

        let len = self.wheel_count();
        for speed in speeds.iter_mut().take(len) {
            *speed = self.convert(*speed);
        }

        WheelTargets { speeds, len }
    }

    /// Convert a rim speed in mm/s to the configured output unit.
    #[inline]
    pub fn convert(&self, rim_mm_s: f32) -> f32 {
        match self.unit {
            VelocityUnit::Rotational => rim_mm_s / (2.0 * PI * self.wheel_radius_mm),
            VelocityUnit::Linear => rim_mm_s,
        }
    }
}
