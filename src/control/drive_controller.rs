// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Closed-loop velocity controller for a whole drivebase.
//!
//! The controller owns one slot per wheel (actuator, optional encoder, PID and last command) and a
//! [`KinematicsModel`] that turns body velocity into wheel targets. While running, every control
//! tick samples each wheel, evaluates its PID (or passes the target straight through in open-loop
//! mode) and dispatches the clamped duty to the actuator.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! controller.set_target_velocity(100.0, 0.0, 0.0);
//! controller.start();
//!
//! loop {
//!     controller.poll(clock.now_ms());
//! }
//! ```
//!
//! Reconfiguring geometry, variant or control mode is only allowed while idle.

use thiserror::Error;

use crate::config::{DriveConfig, EncoderConfig, MAX_WHEELS};
use crate::control::{FilterMode, Pid};
use crate::drivers::encoder::{Encoder, EncoderReading, TickCounter};
use crate::drivers::Actuator;
use crate::kinematics::{DriveVariant, KinematicsModel};
use crate::motors::{DriveMotor, StopMode};

/// How wheel targets reach the actuators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    /// Targets are duty cycles (percent), sent without feedback.
    OpenLoopDuty,
    /// Targets are velocities, tracked by the per-wheel PID.
    #[default]
    ClosedLoopVelocity,
}

/// Lifecycle of the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveState {
    #[default]
    Idle,
    Running,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveError {
    /// The operation is only allowed while idle.
    #[error("drivebase is running")]
    Running,
    /// A body-velocity command for a different variant arrived while running.
    #[error("command for {requested:?} while running as {configured:?}")]
    VariantMismatch {
        configured: DriveVariant,
        requested: DriveVariant,
    },
}

/// Last command state of one wheel, for diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelCommand {
    /// Velocity target (closed loop) or duty (open loop).
    pub target: f32,
    /// Feedback used on the last tick.
    pub measured: f32,
    /// Duty dispatched on the last tick, percent.
    pub duty: f32,
}

struct WheelSlot<A, C> {
    motor: DriveMotor<A, C>,
    pid: Pid,
    command: WheelCommand,
}

pub struct DriveController<A, C> {
    config: DriveConfig,
    model: KinematicsModel,
    state: DriveState,
    wheels: [WheelSlot<A, C>; MAX_WHEELS],

    /// Time of the last control tick, `None` until the first tick after `start()`
    last_tick_ms: Option<u32>,
}

fn model_for(config: &DriveConfig) -> KinematicsModel {
    KinematicsModel::new(
        config.variant,
        config.wheel_radius_mm,
        config.turning_radius_mm,
        config.unit,
    )
}

impl<A: Actuator, C: TickCounter> DriveController<A, C> {
    /// Create an idle controller with no motors attached and all gains at zero.
    pub fn new(config: DriveConfig) -> Self {
        let wheels = core::array::from_fn(|_| WheelSlot {
            motor: DriveMotor::default(),
            pid: Pid::default().with_filter_mode(config.filter_mode),
            command: WheelCommand::default(),
        });

        Self {
            config,
            model: model_for(&config),
            state: DriveState::Idle,
            wheels,
            last_tick_ms: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    #[inline]
    pub fn model(&self) -> &KinematicsModel {
        &self.model
    }

    #[inline]
    pub fn state(&self) -> DriveState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == DriveState::Running
    }

    /// Wheels driven by the configured variant.
    #[inline]
    pub fn wheel_count(&self) -> usize {
        self.config.variant.wheel_count()
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut WheelSlot<A, C>> {
        let slot = self.wheels.get_mut(index);
        if slot.is_none() {
            warn!("wheel index {} out of range, ignored", index);
        }
        slot
    }

    // ---------------------------------------------------------------------
    // Wiring
    // ---------------------------------------------------------------------

    /// Install the actuator of one wheel.
    pub fn attach_motor(&mut self, index: usize, actuator: A) {
        if let Some(slot) = self.slot_mut(index) {
            slot.motor.attach_actuator(actuator);
        }
    }

    /// Install the encoder of one wheel.
    pub fn attach_encoder(&mut self, index: usize, counter: C, config: EncoderConfig) {
        if let Some(slot) = self.slot_mut(index) {
            slot.motor.attach_encoder(Encoder::new(counter, config));
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    fn ensure_idle(&self) -> Result<(), DriveError> {
        match self.state {
            DriveState::Idle => Ok(()),
            DriveState::Running => Err(DriveError::Running),
        }
    }

    /// Set kinematics and control mode. Idle only.
    pub fn configure(
        &mut self,
        variant: DriveVariant,
        wheel_radius_mm: f32,
        turning_radius_mm: f32,
        mode: ControlMode,
    ) -> Result<(), DriveError> {
        self.ensure_idle()?;

        self.config.variant = variant;
        self.config.wheel_radius_mm = wheel_radius_mm;
        self.config.turning_radius_mm = turning_radius_mm;
        self.config.mode = mode;
        self.model = model_for(&self.config);
        self.clear_targets();

        info!(
            "configured {} rw = {} R = {} mode {}",
            variant, wheel_radius_mm, turning_radius_mm, mode
        );
        Ok(())
    }

    /// Switch the drivebase variant. Idle only.
    pub fn set_variant(&mut self, variant: DriveVariant) -> Result<(), DriveError> {
        let cfg = self.config;
        self.configure(variant, cfg.wheel_radius_mm, cfg.turning_radius_mm, cfg.mode)
    }

    /// Change wheel and turning radius. Idle only.
    pub fn set_geometry(
        &mut self,
        wheel_radius_mm: f32,
        turning_radius_mm: f32,
    ) -> Result<(), DriveError> {
        let cfg = self.config;
        self.configure(cfg.variant, wheel_radius_mm, turning_radius_mm, cfg.mode)
    }

    /// Switch between open-loop duty and closed-loop velocity control. Idle only.
    pub fn set_control_mode(&mut self, mode: ControlMode) -> Result<(), DriveError> {
        let cfg = self.config;
        self.configure(cfg.variant, cfg.wheel_radius_mm, cfg.turning_radius_mm, mode)
    }

    /// Choose where every wheel PID applies its low-pass filter. Idle only.
    pub fn set_filter_mode(&mut self, mode: FilterMode) -> Result<(), DriveError> {
        self.ensure_idle()?;
        self.config.filter_mode = mode;
        for slot in self.wheels.iter_mut() {
            slot.pid.set_filter_mode(mode);
            slot.pid.reset();
        }
        Ok(())
    }

    /// Set how `stop()` leaves the actuators.
    pub fn set_stop_mode(&mut self, mode: StopMode) {
        self.config.stop_mode = mode;
    }

    /// Update one wheel's PID. Takes effect on the next tick.
    pub fn set_gains(&mut self, index: usize, kp: f32, ki: f32, kd: f32, tau: f32) {
        if let Some(slot) = self.slot_mut(index) {
            slot.pid.set_gains(kp, ki, kd, tau);
        }
    }

    /// Reset the integrator and filter state of every wheel PID.
    pub fn reset_pids(&mut self) {
        for slot in self.wheels.iter_mut() {
            slot.pid.reset();
        }
    }

    /// Change one wheel's encoder counts per revolution.
    pub fn set_encoder_resolution(&mut self, index: usize, pulses_per_rev: u32) {
        if let Some(slot) = self.slot_mut(index) {
            if let Some(encoder) = slot.motor.encoder_mut() {
                encoder.state_mut().set_pulses_per_rev(pulses_per_rev);
            }
        }
    }

    /// Zero the position of every attached encoder.
    pub fn reset_encoders(&mut self) {
        for slot in self.wheels.iter_mut() {
            slot.motor.reset_encoder();
        }
    }

    /// Feed one wheel's measured velocity from outside, replacing its encoder.
    pub fn set_external_velocity(&mut self, index: usize, velocity: f32) {
        if let Some(slot) = self.slot_mut(index) {
            slot.motor.set_external_velocity(Some(velocity));
        }
    }

    /// Return one wheel to encoder feedback.
    pub fn clear_external_velocity(&mut self, index: usize) {
        if let Some(slot) = self.slot_mut(index) {
            slot.motor.set_external_velocity(None);
        }
    }

    // ---------------------------------------------------------------------
    // Targets
    // ---------------------------------------------------------------------

    fn clear_targets(&mut self) {
        for slot in self.wheels.iter_mut() {
            slot.command.target = 0.0;
        }
    }

    /// Compute and store wheel targets for a body velocity (mm/s, mm/s, deg/s).
    ///
    /// Actuators are only driven by the next control tick.
    pub fn set_target_velocity(&mut self, vx: f32, vy: f32, omega_deg_s: f32) {
        let targets = self.model.forward(vx, vy, omega_deg_s);
        for (i, slot) in self.wheels.iter_mut().enumerate() {
            slot.command.target = targets.get(i);
        }
    }

    /// Store per-wheel targets directly. Entries past the wheel count are ignored.
    pub fn set_wheel_targets(&mut self, targets: &[f32]) {
        let count = self.wheel_count();
        for (slot, target) in self.wheels.iter_mut().zip(targets).take(count) {
            slot.command.target = *target;
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Begin ticking. No-op if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.reset_pids();
        self.last_tick_ms = None;
        self.state = DriveState::Running;
        info!("drivebase started");
    }

    /// Stop ticking and leave every actuator in the configured stop mode.
    pub fn stop(&mut self) {
        let mode = self.config.stop_mode;
        for slot in self.wheels.iter_mut() {
            slot.motor.stop(mode);
            slot.command.duty = 0.0;
        }
        self.state = DriveState::Idle;
        self.last_tick_ms = None;
        info!("drivebase stopped ({})", mode);
    }

    /// Run a tick if one is due. Returns `true` if it did.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }
        let due = match self.last_tick_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.config.control_period_ms,
        };
        if due {
            self.step(now_ms);
        }
        due
    }

    /// Run one control tick now. Ignored while idle.
    pub fn step(&mut self, now_ms: u32) {
        if !self.is_running() {
            return;
        }
        self.last_tick_ms = Some(now_ms);

        let dt = self.config.control_period_s();
        let limit = self.config.duty_limit;
        let unit = self.config.unit;
        let mode = self.config.mode;
        let count = self.wheel_count();

        for slot in self.wheels.iter_mut().take(count) {
            slot.motor.poll(now_ms);
            let measured = slot.motor.measured(unit);
            let target = slot.command.target;

            let duty = match mode {
                ControlMode::ClosedLoopVelocity => slot.pid.control(target, measured, dt),
                ControlMode::OpenLoopDuty => target,
            };
            let duty = duty.clamp(-limit, limit);

            slot.motor.drive(duty);
            slot.command.measured = measured;
            slot.command.duty = duty;
        }
    }

    // ---------------------------------------------------------------------
    // Diagnostics
    // ---------------------------------------------------------------------

    /// Last command of one wheel, default past the wheel slots.
    pub fn command(&self, index: usize) -> WheelCommand {
        self.wheels
            .get(index)
            .map(|slot| slot.command)
            .unwrap_or_default()
    }

    /// Measured velocity of every configured wheel, as used on the last tick.
    pub fn measured_velocities(&self) -> heapless::Vec<f32, MAX_WHEELS> {
        self.wheels
            .iter()
            .take(self.wheel_count())
            .map(|slot| slot.command.measured)
            .collect()
    }

    pub fn pid(&self, index: usize) -> Option<&Pid> {
        self.wheels.get(index).map(|slot| &slot.pid)
    }

    /// Last encoder reading of one wheel, `None` without an encoder.
    pub fn encoder_reading(&self, index: usize) -> Option<EncoderReading> {
        self.wheels.get(index).and_then(|slot| slot.motor.reading())
    }

    pub fn motor(&self, index: usize) -> Option<&DriveMotor<A, C>> {
        self.wheels.get(index).map(|slot| &slot.motor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Term;
    use crate::kinematics::VelocityUnit;
    use crate::test_util::assert_close;

    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    enum Output {
        #[default]
        Released,
        Duty(f32),
        Braked,
    }

    #[derive(Default)]
    struct FakeActuator {
        output: Output,
        writes: usize,
    }

    impl Actuator for FakeActuator {
        fn set_duty(&mut self, duty_percent: f32) {
            self.output = Output::Duty(duty_percent);
            self.writes += 1;
        }

        fn coast(&mut self) {
            self.output = Output::Released;
        }

        fn brake(&mut self) {
            self.output = Output::Braked;
        }
    }

    #[derive(Default)]
    struct FakeCounter {
        raw: i32,
    }

    impl TickCounter for FakeCounter {
        fn ticks(&self) -> i32 {
            self.raw
        }

        fn rewind(&mut self, ticks: i32) {
            self.raw -= ticks;
        }
    }

    type Controller = DriveController<FakeActuator, FakeCounter>;

    fn controller(config: DriveConfig) -> Controller {
        let mut c = Controller::new(config);
        for i in 0..MAX_WHEELS {
            c.attach_motor(i, FakeActuator::default());
        }
        c
    }

    fn output(c: &Controller, index: usize) -> Output {
        c.motor(index).and_then(|m| m.actuator()).map(|a| a.output).unwrap_or_default()
    }

    fn writes(c: &Controller, index: usize) -> usize {
        c.motor(index).and_then(|m| m.actuator()).map(|a| a.writes).unwrap_or(0)
    }

    #[test]
    fn targets_follow_kinematics_without_driving() {
        let cfg = DriveConfig::new(DriveVariant::Mecanum, 30.0, 150.0).with_unit(VelocityUnit::Linear);
        let mut c = controller(cfg);

        c.set_target_velocity(100.0, 0.0, 0.0);

        assert_close(c.command(0).target, 70.71, 0.01);
        assert_close(c.command(1).target, -70.71, 0.01);
        assert_eq!(writes(&c, 0), 0);
    }

    #[test]
    fn open_loop_passes_target_as_clamped_duty() {
        let cfg = DriveConfig::new(DriveVariant::Omni3, 30.0, 150.0)
            .with_mode(ControlMode::OpenLoopDuty)
            .with_duty_limit(80.0);
        let mut c = controller(cfg);
        c.set_wheel_targets(&[50.0, -120.0, 10.0, 99.0]);
        c.start();

        assert!(c.poll(0));

        assert_eq!(output(&c, 0), Output::Duty(50.0));
        assert_eq!(output(&c, 1), Output::Duty(-80.0));
        assert_eq!(output(&c, 2), Output::Duty(10.0));
        // Omni3 leaves the fourth slot alone.
        assert_eq!(writes(&c, 3), 0);
        assert_eq!(c.command(3).target, 0.0);
    }

    #[test]
    fn closed_loop_runs_pid_on_external_feedback() {
        let cfg = DriveConfig::new(DriveVariant::Differential, 30.0, 150.0);
        let mut c = controller(cfg);
        c.set_gains(0, 10.0, 0.0, 0.0, 0.0);
        c.set_gains(1, 10.0, 0.0, 0.0, 0.0);
        c.set_wheel_targets(&[2.0, 1.0]);
        c.set_external_velocity(0, 1.5);
        c.start();
        c.step(0);

        assert_close(c.command(0).duty, 5.0, 1.0e-5);
        assert_eq!(c.command(0).measured, 1.5);
        // No encoder, no override: measured is zero.
        assert_close(c.command(1).duty, 10.0, 1.0e-5);

        c.clear_external_velocity(0);
        c.step(10);
        assert_close(c.command(0).duty, 20.0, 1.0e-5);
    }

    #[test]
    fn closed_loop_reads_encoder_velocity() {
        let cfg = DriveConfig::new(DriveVariant::Differential, 30.0, 150.0);
        let mut c = controller(cfg);
        let enc = EncoderConfig::new(100, 60.0).with_sampling_period_ms(10);
        c.attach_encoder(0, FakeCounter::default(), enc);
        c.set_gains(0, 1.0, 0.0, 0.0, 0.0);
        c.set_wheel_targets(&[3.0, 0.0]);
        c.start();

        c.step(0);
        assert_eq!(c.command(0).measured, 0.0);

        // One rotation over 10 ms -> 100 rps after the next tick.
        if let Some(encoder) = c.wheels[0].motor.encoder_mut() {
            encoder.counter_mut().raw = 100;
        }
        c.step(10);
        let reading = c.encoder_reading(0).unwrap_or_default();
        assert_eq!(reading.count, 100);
        assert_close(c.command(0).measured, 100.0, 1.0e-3);
        assert_close(c.command(0).duty, -97.0, 1.0e-3);
    }

    #[test]
    fn duty_is_clamped_to_limit() {
        let cfg = DriveConfig::new(DriveVariant::Differential, 30.0, 150.0).with_duty_limit(100.0);
        let mut c = controller(cfg);
        c.set_gains(0, 1000.0, 0.0, 0.0, 0.0);
        c.set_wheel_targets(&[5.0, -5.0]);
        c.start();
        c.step(0);

        assert_eq!(c.command(0).duty, 100.0);
        assert_eq!(output(&c, 0), Output::Duty(100.0));
    }

    #[test]
    fn poll_respects_control_period() {
        let cfg = DriveConfig::default().with_control_period_ms(10);
        let mut c = controller(cfg);

        assert!(!c.poll(0), "idle controller must not tick");

        c.start();
        assert!(c.poll(100));
        assert!(!c.poll(105));
        assert!(c.poll(110));
        assert!(!c.poll(119));
        assert!(c.poll(120));
        assert_eq!(writes(&c, 0), 3);
    }

    #[test]
    fn start_is_idempotent_and_resets_pids() {
        let mut c = controller(DriveConfig::new(DriveVariant::Differential, 30.0, 150.0));
        c.set_gains(0, 0.0, 1.0, 0.0, 0.0);
        c.set_wheel_targets(&[1.0, 0.0]);
        c.start();
        c.step(0);
        c.step(10);
        let integral = c.pid(0).map(|p| p.integral()).unwrap_or_default();
        assert!(integral > 0.0);

        // Second start while running changes nothing.
        c.start();
        assert_eq!(c.pid(0).map(|p| p.integral()), Some(integral));

        c.stop();
        c.start();
        assert_eq!(c.pid(0).map(|p| p.component(Term::I)), Some(0.0));
    }

    #[test]
    fn stop_uses_configured_stop_mode() {
        let cfg = DriveConfig::new(DriveVariant::Differential, 30.0, 150.0)
            .with_mode(ControlMode::OpenLoopDuty);
        let mut c = controller(cfg);
        c.set_wheel_targets(&[40.0, 40.0]);
        c.start();
        c.step(0);

        c.stop();
        assert_eq!(c.state(), DriveState::Idle);
        assert_eq!(output(&c, 0), Output::Released);
        assert_eq!(c.command(0).duty, 0.0);

        c.set_stop_mode(StopMode::Brake);
        c.start();
        c.step(0);
        c.stop();
        assert_eq!(output(&c, 1), Output::Braked);

        // Ticks after stop do nothing.
        let before = writes(&c, 0);
        assert!(!c.poll(1_000));
        c.step(1_000);
        assert_eq!(writes(&c, 0), before);
    }

    #[test]
    fn reconfiguration_is_idle_only() {
        let mut c = controller(DriveConfig::default());
        c.start();

        assert_eq!(
            c.configure(DriveVariant::Omni3, 30.0, 100.0, ControlMode::OpenLoopDuty),
            Err(DriveError::Running)
        );
        assert_eq!(c.set_variant(DriveVariant::Mecanum), Err(DriveError::Running));
        assert_eq!(c.set_filter_mode(FilterMode::Output), Err(DriveError::Running));
        assert_eq!(c.config().variant, DriveVariant::Omni4);

        c.stop();
        c.configure(DriveVariant::Omni3, 30.0, 100.0, ControlMode::OpenLoopDuty)
            .unwrap();
        assert_eq!(c.wheel_count(), 3);
        assert_eq!(c.model().turning_radius_mm(), 100.0);
        assert_eq!(c.config().mode, ControlMode::OpenLoopDuty);
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut c = controller(DriveConfig::default());
        c.set_gains(7, 1.0, 2.0, 3.0, 0.0);
        c.set_external_velocity(4, 1.0);
        c.set_encoder_resolution(9, 100);
        c.attach_motor(12, FakeActuator::default());

        assert_eq!(c.command(4), WheelCommand::default());
        assert!(c.pid(4).is_none());
        assert!(c.encoder_reading(0).is_none());
    }

    #[test]
    fn encoder_resolution_updates_calibration() {
        let mut c = controller(DriveConfig::default());
        c.attach_encoder(2, FakeCounter::default(), EncoderConfig::new(1000, 60.0));
        c.set_encoder_resolution(2, 2048);

        let ppr = c
            .motor(2)
            .and_then(|m| m.encoder())
            .map(|e| e.state().config().pulses_per_rev);
        assert_eq!(ppr, Some(2048));
    }

    #[test]
    fn reset_encoders_zeroes_counter_and_position() {
        let mut c = controller(DriveConfig::new(DriveVariant::Differential, 30.0, 150.0));
        c.attach_encoder(1, FakeCounter::default(), EncoderConfig::new(100, 60.0));
        if let Some(encoder) = c.wheels[1].motor.encoder_mut() {
            encoder.counter_mut().raw = 250;
        }
        c.start();
        c.step(0);
        assert_eq!(c.encoder_reading(1).map(|r| r.count), Some(250));

        c.reset_encoders();

        let encoder = c.motor(1).and_then(|m| m.encoder());
        assert_eq!(encoder.map(|e| e.counter().raw), Some(0));
        assert_eq!(encoder.map(|e| e.state().logical()), Some(0));
        assert_eq!(c.encoder_reading(1), Some(EncoderReading::default()));
        // Wheels without an encoder are skipped.
        assert!(c.encoder_reading(0).is_none());
    }

    #[test]
    fn output_filter_mode_blends_dispatched_duty() {
        let cfg = DriveConfig::new(DriveVariant::Differential, 30.0, 150.0).with_duty_limit(100.0);
        let mut c = controller(cfg);
        c.set_filter_mode(FilterMode::Output).unwrap();
        c.set_gains(0, 1.0, 0.0, 0.0, 0.03);
        c.set_gains(1, 0.1, 0.0, 0.0, 0.03);
        c.set_wheel_targets(&[4.0, 0.2]);
        c.start();

        // dt = 0.01: (0 * 0.03 + 4) / 0.04 = 100
        c.step(0);
        assert_close(c.command(0).duty, 100.0, 1.0e-3);
        // (0 * 0.03 + 0.02) / 0.04 = 0.5
        assert_close(c.command(1).duty, 0.5, 1.0e-5);

        // (100 * 0.03 + 4) / 0.04 = 175, clamped to the limit
        c.step(10);
        assert_eq!(c.command(0).duty, 100.0);
        assert_eq!(output(&c, 0), Output::Duty(100.0));
        // (0.5 * 0.03 + 0.02) / 0.04 = 0.875
        assert_close(c.command(1).duty, 0.875, 1.0e-5);
    }

    #[test]
    fn measured_velocities_cover_configured_wheels() {
        let mut c = controller(DriveConfig::new(DriveVariant::Omni3, 30.0, 150.0));
        for i in 0..3 {
            c.set_external_velocity(i, i as f32);
        }
        c.start();
        c.step(0);
        assert_eq!(c.measured_velocities().as_slice(), &[0.0, 1.0, 2.0]);
    }
}
