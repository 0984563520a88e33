// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reference firmware: a differential drivebase on the STM32F777.
//!
//! - USART1 (PA9/PA10) receives command frames and acknowledges each applied frame with its
//!   sequence number.
//! - TIM4 CH1..CH4 (PD12..PD15) drive two H-bridges.
//! - TIM2 (PA0/PA1) and TIM3 (PA6/PA7) count the wheel encoders.
//! - SysTick provides the millisecond clock for the 10 ms control tick.
//!
//! The controller starts on the first motion command and stops again when no motion command has
//! arrived for [`COMMAND_TIMEOUT_MS`], which also unlocks reconfiguration.

#![no_main]
#![no_std]

use cortex_m_rt::{entry, exception};
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use embedded_hal_nb::serial::{Read, Write};

use drivebase::config::{DriveConfig, EncoderConfig};
use drivebase::control::DriveController;
use drivebase::drivers::encoder::TickCounter;
use drivebase::drivers::mdd::Clock;
use drivebase::drivers::{Actuator, HBridge};
use drivebase::hw::{PwmOutput, SysTickClock, TimerEncoder, UsartLink};
use drivebase::kinematics::DriveVariant;
use drivebase::protocol::{CommandId, Parser};

/// Stop the drivebase after this long without a motion command.
const COMMAND_TIMEOUT_MS: u32 = 500;

const WHEEL_RADIUS_MM: f32 = 30.0;
const HALF_TRACK_MM: f32 = 150.0;
const ENCODER_PPR: u32 = 8192;

/// One of the two sides of a differential base, for peripherals whose types differ per side.
enum Side<R, L> {
    Right(R),
    Left(L),
}

impl<R: Actuator, L: Actuator> Actuator for Side<R, L> {
    fn set_duty(&mut self, duty_percent: f32) {
        match self {
            Side::Right(r) => r.set_duty(duty_percent),
            Side::Left(l) => l.set_duty(duty_percent),
        }
    }

    fn coast(&mut self) {
        match self {
            Side::Right(r) => r.coast(),
            Side::Left(l) => l.coast(),
        }
    }

    fn brake(&mut self) {
        match self {
            Side::Right(r) => r.brake(),
            Side::Left(l) => l.brake(),
        }
    }
}

impl<R: TickCounter, L: TickCounter> TickCounter for Side<R, L> {
    fn ticks(&self) -> i32 {
        match self {
            Side::Right(r) => r.ticks(),
            Side::Left(l) => l.ticks(),
        }
    }

    fn rewind(&mut self, ticks: i32) {
        match self {
            Side::Right(r) => r.rewind(ticks),
            Side::Left(l) => l.rewind(ticks),
        }
    }
}

fn is_motion(id: CommandId) -> bool {
    matches!(
        id,
        CommandId::MotorRps
            | CommandId::MotorPwm
            | CommandId::Mecanum
            | CommandId::Omni3
            | CommandId::Omni4
    )
}

#[exception]
fn SysTick() {
    SysTickClock::on_tick();
}

#[entry]
fn main() -> ! {
    // Peripherals
    let Some(dp) = pac::Peripherals::take() else {
        panic!("peripherals already taken");
    };
    let Some(cp) = cortex_m::Peripherals::take() else {
        panic!("core peripherals already taken");
    };

    // Encoder timer clocks
    dp.RCC
        .apb1enr
        .modify(|_, w| w.tim2en().set_bit().tim3en().set_bit());

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();
    let clock = SysTickClock::start(cp.SYST, &clocks);

    // GPIO
    let gpioa = dp.GPIOA.split();
    let gpiod = dp.GPIOD.split();

    // USART1 (command link)
    let tx = gpioa.pa9.into_alternate::<7>();
    let rx = gpioa.pa10.into_alternate::<7>();
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (tx, rx), &clocks, usart_cfg);
    let mut link = UsartLink::new(serial);

    // Encoders (TIM2 right, TIM3 left)
    let _enc_right = (gpioa.pa0.into_alternate::<1>(), gpioa.pa1.into_alternate::<1>());
    let _enc_left = (gpioa.pa6.into_alternate::<2>(), gpioa.pa7.into_alternate::<2>());
    let enc_right = TimerEncoder::tim2(dp.TIM2);
    let enc_left = TimerEncoder::tim3(dp.TIM3);

    // TIM4 PWM, two inputs per H-bridge
    let pwm_pins = (
        gpiod.pd12.into_alternate::<2>(),
        gpiod.pd13.into_alternate::<2>(),
        gpiod.pd14.into_alternate::<2>(),
        gpiod.pd15.into_alternate::<2>(),
    );
    let (ch1, ch2, ch3, ch4) = dp.TIM4.pwm_hz(pwm_pins, 20.kHz(), &clocks).split();
    let right = HBridge::new(PwmOutput::new(ch1), PwmOutput::new(ch2));
    let left = HBridge::new(PwmOutput::new(ch3), PwmOutput::new(ch4));

    // Drivebase
    let cfg = DriveConfig::new(DriveVariant::Differential, WHEEL_RADIUS_MM, HALF_TRACK_MM);
    let enc_cfg = EncoderConfig::new(ENCODER_PPR, 2.0 * WHEEL_RADIUS_MM);

    let mut drive = DriveController::new(cfg);
    drive.attach_motor(0, Side::Right(right));
    drive.attach_motor(1, Side::Left(left));
    drive.attach_encoder(0, Side::Right(enc_right), enc_cfg);
    drive.attach_encoder(1, Side::Left(enc_left), enc_cfg);

    let mut parser = Parser::new();
    let mut last_motion_ms = clock.now_ms();

    defmt::info!("drivebase ready");

    loop {
        let now = clock.now_ms();

        loop {
            let byte = match link.read() {
                Ok(b) => b,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => {
                    defmt::warn!("usart error: {}", defmt::Debug2Format(&e));
                    parser.reset();
                    break;
                }
            };

            let Some(frame) = parser.push(byte) else {
                continue;
            };

            match drive.apply(&frame) {
                Ok(()) => {
                    if is_motion(frame.id) {
                        last_motion_ms = now;
                        drive.start();
                    }
                    nb::block!(link.write(frame.seq)).ok();
                }
                Err(e) => defmt::warn!("command {} rejected: {}", frame.id, e),
            }
        }

        if drive.is_running() && now.wrapping_sub(last_motion_ms) > COMMAND_TIMEOUT_MS {
            defmt::warn!("command timeout");
            drive.stop();
        }

        drive.poll(now);
    }
}
