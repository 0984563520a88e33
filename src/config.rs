// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Drivebase configuration.
//!
//! Every struct here has a `Default` matching the reference hardware and `with_*` builders for the
//! fields a board usually overrides:
//!
//! ```
//! use drivebase::config::DriveConfig;
//! use drivebase::kinematics::DriveVariant;
//!
//! let cfg = DriveConfig::new(DriveVariant::Mecanum, 30.0, 150.0).with_duty_limit(80.0);
//! assert_eq!(cfg.duty_limit, 80.0);
//! ```

use crate::control::{ControlMode, FilterMode};
use crate::kinematics::{DriveVariant, VelocityUnit};
use crate::motors::StopMode;

/// Wheel slots owned by one drivebase.
pub const MAX_WHEELS: usize = 4;

/// Control tick cadence (ms).
pub const CONTROL_PERIOD_MS: u32 = 10;

/// Actuator duty span, `[-DEFAULT_DUTY_LIMIT, DEFAULT_DUTY_LIMIT]` percent.
pub const DEFAULT_DUTY_LIMIT: f32 = 100.0;

/// Drivebase geometry and control loop settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriveConfig {
    pub variant: DriveVariant,
    /// Drive wheel radius (mm).
    pub wheel_radius_mm: f32,
    /// Robot centre to wheel distance (mm).
    pub turning_radius_mm: f32,
    /// Unit of wheel targets and measured velocities.
    pub unit: VelocityUnit,
    pub mode: ControlMode,
    /// PID filter mode applied to every wheel.
    pub filter_mode: FilterMode,
    /// What `stop()` does to the actuators.
    pub stop_mode: StopMode,
    pub control_period_ms: u32,
    /// Duty commands are clamped to `±duty_limit`.
    pub duty_limit: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            variant: DriveVariant::Omni4,
            wheel_radius_mm: 30.0,
            turning_radius_mm: 150.0,
            unit: VelocityUnit::Rotational,
            mode: ControlMode::ClosedLoopVelocity,
            filter_mode: FilterMode::Derivative,
            stop_mode: StopMode::Coast,
            control_period_ms: CONTROL_PERIOD_MS,
            duty_limit: DEFAULT_DUTY_LIMIT,
        }
    }
}

impl DriveConfig {
    pub fn new(variant: DriveVariant, wheel_radius_mm: f32, turning_radius_mm: f32) -> Self {
        Self {
            variant,
            wheel_radius_mm,
            turning_radius_mm,
            ..Default::default()
        }
    }

    pub fn with_unit(mut self, unit: VelocityUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_mode(mut self, mode: ControlMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    pub fn with_stop_mode(mut self, stop_mode: StopMode) -> Self {
        self.stop_mode = stop_mode;
        self
    }

    /// Set the tick cadence. Zero is bumped to 1 ms.
    pub fn with_control_period_ms(mut self, period_ms: u32) -> Self {
        self.control_period_ms = period_ms.max(1);
        self
    }

    /// Set the duty span. Negative limits are taken by magnitude.
    pub fn with_duty_limit(mut self, limit: f32) -> Self {
        self.duty_limit = if limit < 0.0 { -limit } else { limit };
        self
    }

    /// Tick period in seconds, the `dt` handed to the PID loop.
    #[inline]
    pub fn control_period_s(&self) -> f32 {
        self.control_period_ms as f32 / 1000.0
    }
}

/// Calibration of one wheel encoder.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Counts per wheel revolution after quadrature decoding and gearing.
    pub pulses_per_rev: u32,
    pub wheel_diameter_mm: f32,
    /// Minimum spacing between velocity updates (ms).
    pub sampling_period_ms: u32,
    /// Raw count magnitude beyond which the hardware counter is re-centered.
    pub wrap_threshold: i32,
    /// Ticks removed from the hardware counter per re-center.
    pub wrap_span: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            pulses_per_rev: 8192,
            wheel_diameter_mm: 100.0,
            sampling_period_ms: CONTROL_PERIOD_MS,
            wrap_threshold: 30_000,
            wrap_span: 30_000,
        }
    }
}

impl EncoderConfig {
    pub fn new(pulses_per_rev: u32, wheel_diameter_mm: f32) -> Self {
        Self {
            pulses_per_rev: pulses_per_rev.max(1),
            wheel_diameter_mm,
            ..Default::default()
        }
    }

    pub fn with_sampling_period_ms(mut self, period_ms: u32) -> Self {
        self.sampling_period_ms = period_ms.max(1);
        self
    }

    /// Set the re-center threshold and span. Both are taken by magnitude; a zero span disables
    /// re-centering. The span is clamped to twice the threshold so a re-centered count always
    /// lands back inside `±threshold`.
    pub fn with_wrap(mut self, threshold: i32, span: i32) -> Self {
        let threshold = threshold.saturating_abs();
        self.wrap_threshold = threshold;
        self.wrap_span = span.saturating_abs().min(threshold.saturating_mul(2));
        self
    }
}

/// Delivery timing for confirmed sends on the motor-driver link.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Retransmission interval (ms).
    pub resend_interval_ms: u32,
    /// Give up after this long without an acknowledgement (ms).
    pub max_wait_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            resend_interval_ms: 10,
            max_wait_ms: 100,
        }
    }
}

impl LinkConfig {
    pub fn new(resend_interval_ms: u32, max_wait_ms: u32) -> Self {
        Self {
            resend_interval_ms,
            max_wait_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_override_defaults() {
        let cfg = DriveConfig::new(DriveVariant::Omni3, 25.0, 120.0)
            .with_mode(ControlMode::OpenLoopDuty)
            .with_stop_mode(StopMode::Brake)
            .with_duty_limit(-60.0)
            .with_control_period_ms(0);

        assert_eq!(cfg.variant, DriveVariant::Omni3);
        assert_eq!(cfg.mode, ControlMode::OpenLoopDuty);
        assert_eq!(cfg.stop_mode, StopMode::Brake);
        assert_eq!(cfg.duty_limit, 60.0);
        assert_eq!(cfg.control_period_ms, 1);
        assert_eq!(cfg.unit, VelocityUnit::Rotational);
    }

    #[test]
    fn control_period_in_seconds() {
        assert_eq!(DriveConfig::default().control_period_s(), 0.01);
    }

    #[test]
    fn encoder_wrap_is_taken_by_magnitude() {
        let cfg = EncoderConfig::new(0, 60.0).with_wrap(-1000, -900);
        assert_eq!(cfg.pulses_per_rev, 1);
        assert_eq!(cfg.wrap_threshold, 1000);
        assert_eq!(cfg.wrap_span, 900);
    }

    #[test]
    fn encoder_wrap_span_is_capped_at_twice_threshold() {
        let cfg = EncoderConfig::new(100, 60.0).with_wrap(100, 1_000);
        assert_eq!(cfg.wrap_span, 200);

        let cfg = EncoderConfig::new(100, 60.0).with_wrap(i32::MAX, i32::MAX);
        assert_eq!(cfg.wrap_span, i32::MAX);
    }
}
