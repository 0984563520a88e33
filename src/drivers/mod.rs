// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-level drivers that sit above the raw `hw/` layer and below the
//! motor and control logic. Nothing here touches a specific MCU; every driver is generic over the
//! `embedded-hal` traits or the small traits defined below.
//!
//! ## Existing drivers
//!
//! - [`encoder`] – Quadrature encoder wrap tracking and velocity estimation
//! - [`h_bridge`] – Two-input PWM H-bridge (IN1/IN2) motor driver
//! - [`mdd`] – Serial link to an external motor-driver board with acknowledged delivery

pub mod encoder;
pub mod h_bridge;
pub mod mdd;

pub use encoder::{Encoder, EncoderCounter, EncoderReading, QuadratureTicks, TickCounter};
pub use h_bridge::HBridge;
pub use mdd::{Clock, MotorDriverLink};

/// A motor output stage driven by a signed duty cycle.
pub trait Actuator {
    /// Drive at `duty_percent` in `[-100, 100]`. Positive is forward.
    fn set_duty(&mut self, duty_percent: f32);

    /// Release the motor so it spins down freely.
    fn coast(&mut self);

    /// Short the motor windings.
    fn brake(&mut self);
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    #[inline]
    fn set_duty(&mut self, duty_percent: f32) {
        (**self).set_duty(duty_percent)
    }

    #[inline]
    fn coast(&mut self) {
        (**self).coast()
    }

    #[inline]
    fn brake(&mut self) {
        (**self).brake()
    }
}
