// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Adapter from the HAL's PWM channels to `embedded_hal::pwm::SetDutyCycle`.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::prelude::_embedded_hal_PwmPin as PwmPin;

/// One enabled timer PWM output.
pub struct PwmOutput<P> {
    channel: P,
}

impl<P: PwmPin<Duty = u16>> PwmOutput<P> {
    /// Enable the channel at zero duty.
    pub fn new(mut channel: P) -> Self {
        channel.set_duty(0);
        channel.enable();
        Self { channel }
    }

    pub fn free(mut self) -> P {
        self.channel.disable();
        self.channel
    }
}

impl<P: PwmPin<Duty = u16>> ErrorType for PwmOutput<P> {
    type Error = Infallible;
}

impl<P: PwmPin<Duty = u16>> SetDutyCycle for PwmOutput<P> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        self.channel.get_max_duty()
    }

    #[inline]
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.channel.set_duty(duty);
        Ok(())
    }
}
