// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Drive wheel built from an [`Actuator`] and an optional [`Encoder`].
//!
//! Either part may be missing. A wheel without an actuator ignores duty commands, a wheel without
//! an encoder reports zero velocity unless an external measurement is supplied.

use crate::drivers::encoder::{Encoder, EncoderReading, TickCounter};
use crate::drivers::Actuator;
use crate::kinematics::VelocityUnit;
use crate::motors::StopMode;

pub struct DriveMotor<A, C> {
    actuator: Option<A>,
    encoder: Option<Encoder<C>>,

    /// Velocity supplied from outside, takes precedence over the encoder
    external_velocity: Option<f32>,
    /// Result of the last encoder poll
    reading: EncoderReading,
}

impl<A, C> Default for DriveMotor<A, C> {
    fn default() -> Self {
        Self {
            actuator: None,
            encoder: None,
            external_velocity: None,
            reading: EncoderReading::default(),
        }
    }
}

impl<A: Actuator, C: TickCounter> DriveMotor<A, C> {
    /// Install an actuator, returning the previous one.
    pub fn attach_actuator(&mut self, actuator: A) -> Option<A> {
        self.actuator.replace(actuator)
    }

    /// Install an encoder, returning the previous one.
    pub fn attach_encoder(&mut self, encoder: Encoder<C>) -> Option<Encoder<C>> {
        self.reading = EncoderReading::default();
        self.encoder.replace(encoder)
    }

    pub fn actuator(&self) -> Option<&A> {
        self.actuator.as_ref()
    }

    pub fn encoder(&self) -> Option<&Encoder<C>> {
        self.encoder.as_ref()
    }

    pub fn encoder_mut(&mut self) -> Option<&mut Encoder<C>> {
        self.encoder.as_mut()
    }

    /// Command a signed duty in percent.
    pub fn drive(&mut self, duty_percent: f32) {
        if let Some(actuator) = self.actuator.as_mut() {
            actuator.set_duty(duty_percent);
        }
    }

    pub fn stop(&mut self, mode: StopMode) {
        if let Some(actuator) = self.actuator.as_mut() {
            match mode {
                StopMode::Coast => actuator.coast(),
                StopMode::Brake => actuator.brake(),
            }
        }
    }

    /// Sample the encoder. Returns `None` if no encoder is attached.
    pub fn poll(&mut self, now_ms: u32) -> Option<EncoderReading> {
        let encoder = self.encoder.as_mut()?;
        self.reading = encoder.poll(now_ms);
        Some(self.reading)
    }

    /// Last polled encoder reading.
    pub fn reading(&self) -> Option<EncoderReading> {
        self.encoder.as_ref().map(|_| self.reading)
    }

    /// Override the measured velocity, in the drivebase's target unit. `None` returns to encoder
    /// feedback.
    pub fn set_external_velocity(&mut self, velocity: Option<f32>) {
        self.external_velocity = velocity;
    }

    /// Measured wheel velocity in `unit`: external override, else encoder, else `0.0`.
    pub fn measured(&self, unit: VelocityUnit) -> f32 {
        if let Some(v) = self.external_velocity {
            return v;
        }
        match self.reading() {
            Some(r) => match unit {
                VelocityUnit::Rotational => r.rps,
                VelocityUnit::Linear => r.linear_mm_s,
            },
            None => 0.0,
        }
    }

    /// Zero the encoder position.
    pub fn reset_encoder(&mut self) {
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.reset();
        }
        self.reading = EncoderReading::default();
    }
}
