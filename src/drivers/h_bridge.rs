// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-input PWM H-bridge.
//!
//! | Command | IN1  | IN2  |
//! |---------|------|------|
//! | forward | PWM  | low  |
//! | reverse | low  | PWM  |
//! | coast   | low  | low  |
//! | brake   | high | high |

use embedded_hal::pwm::SetDutyCycle;

use super::Actuator;

/// H-bridge motor driver with one PWM channel per input.
pub struct HBridge<IN1: SetDutyCycle, IN2: SetDutyCycle> {
    in1: IN1,
    in2: IN2,
    duty_percent: f32,
}

impl<IN1: SetDutyCycle, IN2: SetDutyCycle> HBridge<IN1, IN2> {
    /// Create a driver with both inputs low.
    pub fn new(in1: IN1, in2: IN2) -> Self {
        let mut bridge = Self {
            in1,
            in2,
            duty_percent: 0.0,
        };
        bridge.coast();
        bridge
    }

    /// Tear down the driver and return its PWM channels.
    pub fn free(self) -> (IN1, IN2) {
        (self.in1, self.in2)
    }

    /// Last commanded duty after clamping, `0.0` after coast or brake.
    #[inline]
    pub fn duty_percent(&self) -> f32 {
        self.duty_percent
    }
}

/// Scale a duty magnitude in percent onto `[0, max]`.
fn scale(magnitude: f32, max: u16) -> u16 {
    let fraction = if magnitude > 100.0 { 1.0 } else { magnitude / 100.0 };
    (fraction * max as f32) as u16
}

impl<IN1: SetDutyCycle, IN2: SetDutyCycle> Actuator for HBridge<IN1, IN2> {
    fn set_duty(&mut self, duty_percent: f32) {
        let duty = duty_percent.clamp(-100.0, 100.0);

        if duty > 0.0 {
            let on = scale(duty, self.in1.max_duty_cycle());
            self.in2.set_duty_cycle_fully_off().ok();
            self.in1.set_duty_cycle(on).ok();
        } else if duty < 0.0 {
            let on = scale(-duty, self.in2.max_duty_cycle());
            self.in1.set_duty_cycle_fully_off().ok();
            self.in2.set_duty_cycle(on).ok();
        } else {
            self.in1.set_duty_cycle_fully_off().ok();
            self.in2.set_duty_cycle_fully_off().ok();
        }

        self.duty_percent = duty;
    }

    fn coast(&mut self) {
        self.in1.set_duty_cycle_fully_off().ok();
        self.in2.set_duty_cycle_fully_off().ok();
        self.duty_percent = 0.0;
    }

    fn brake(&mut self) {
        self.in1.set_duty_cycle_fully_on().ok();
        self.in2.set_duty_cycle_fully_on().ok();
        self.duty_percent = 0.0;
    }
}
