// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dead-reckoning pose integrator driven by measured wheel velocities.
//!
//! Open loop: errors accumulate and nothing corrects them.

use core::f32::consts::PI;

use heapless::Vec;
use micromath::F32Ext;

use crate::config::MAX_WHEELS;

/// Where a wheel sits on the chassis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelMount {
    /// Mount angle relative to the forward axis (degrees).
    pub angle_deg: f32,
    /// Wheel diameter (mm).
    pub diameter_mm: f32,
}

impl WheelMount {
    pub const fn new(angle_deg: f32, diameter_mm: f32) -> Self {
        Self {
            angle_deg,
            diameter_mm,
        }
    }

    /// Rim speed in mm/s for a wheel turning at `rps`.
    #[inline]
    pub fn rim_speed(&self, rps: f32) -> f32 {
        rps * PI * self.diameter_mm
    }
}

/// Planar pose. `theta_deg` is kept in `[0, 360)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pose {
    pub x_mm: f32,
    pub y_mm: f32,
    pub theta_deg: f32,
}

/// Pose change produced by one integration step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PoseDelta {
    pub dx_mm: f32,
    pub dy_mm: f32,
    pub dtheta_deg: f32,
}

pub struct Odometry {
    mounts: Vec<WheelMount, MAX_WHEELS>,
    rotation_diameter_mm: f32,
    pose: Pose,
}

impl Odometry {
    /// Create an integrator for the given wheel mounts.
    ///
    /// `rotation_diameter_mm`: diameter of the circle the wheels travel when the robot spins in
    /// place. Mounts beyond [`MAX_WHEELS`] are ignored.
    pub fn new(mounts: &[WheelMount], rotation_diameter_mm: f32) -> Self {
        let mut stored = Vec::new();
        for mount in mounts.iter().take(MAX_WHEELS) {
            // Capacity is MAX_WHEELS, take() keeps us within it.
            let _ = stored.push(*mount);
        }

        Self {
            mounts: stored,
            rotation_diameter_mm,
            pose: Pose::default(),
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[inline]
    pub fn mounts(&self) -> &[WheelMount] {
        &self.mounts
    }

    pub fn reset(&mut self) {
        self.pose = Pose::default();
    }

    /// Integrate one step of wheel velocities (rotations/s) over `dt` seconds.
    ///
    /// Velocities are paired with mounts by index; extra entries on either side are ignored.
    pub fn integrate(&mut self, wheel_rps: &[f32], dt: f32) -> PoseDelta {
        let mut delta = PoseDelta::default();
        let mut dtheta_rad = 0.0;

        for (mount, rps) in self.mounts.iter().zip(wheel_rps) {
            let travel = mount.rim_speed(*rps) * dt;
            let angle = mount.angle_deg * PI / 180.0;

            delta.dx_mm -= travel * angle.cos();
            delta.dy_mm += travel * angle.sin();
            dtheta_rad -= travel / self.rotation_diameter_mm;
        }
        delta.dtheta_deg = dtheta_rad * 180.0 / PI;

        self.pose.x_mm += delta.dx_mm;
        self.pose.y_mm += delta.dy_mm;
        self.pose.theta_deg = wrap_degrees(self.pose.theta_deg + delta.dtheta_deg);

        delta
    }
}

/// Wrap an angle into `[0, 360)`.
fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg % 360.0;
    if wrapped < 0.0 {
        // -1e-6 % 360 + 360 rounds to 360.0 in f32.
        let shifted = wrapped + 360.0;
        if shifted >= 360.0 {
            0.0
        } else {
            shifted
        }
    } else {
        wrapped
    }
}
