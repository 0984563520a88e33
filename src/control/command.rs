// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Maps received command frames onto [`DriveController`] operations.

use crate::control::drive_controller::{ControlMode, DriveController, DriveError};
use crate::drivers::encoder::TickCounter;
use crate::drivers::Actuator;
use crate::kinematics::DriveVariant;
use crate::protocol::messages::{CommandFrame, CommandId};

impl<A: Actuator, C: TickCounter> DriveController<A, C> {
    /// Apply one command frame.
    ///
    /// Commands that change geometry, variant or control mode fail with [`DriveError::Running`]
    /// while the drivebase is running. A body-velocity command for another variant is accepted
    /// while idle (the variant is switched) and rejected while running.
    pub fn apply(&mut self, frame: &CommandFrame) -> Result<(), DriveError> {
        let data = &frame.data;

        match frame.id {
            CommandId::MotorRps => {
                self.require_mode(ControlMode::ClosedLoopVelocity)?;
                self.set_wheel_targets(data);
            }
            CommandId::MotorPwm => {
                self.require_mode(ControlMode::OpenLoopDuty)?;
                self.set_wheel_targets(data);
            }
            CommandId::Mecanum => self.body_velocity(DriveVariant::Mecanum, data)?,
            CommandId::Omni3 => self.body_velocity(DriveVariant::Omni3, data)?,
            CommandId::Omni4 => self.body_velocity(DriveVariant::Omni4, data)?,
            CommandId::M1PidGain
            | CommandId::M2PidGain
            | CommandId::M3PidGain
            | CommandId::M4PidGain => {
                if let Some(wheel) = frame.id.gain_wheel() {
                    self.set_gains(wheel, data[0], data[1], data[2], data[3]);
                }
            }
            CommandId::RobotDiameter => {
                let wheel_radius_mm = if data[1] > 0.0 {
                    data[1] / 2.0
                } else {
                    self.config().wheel_radius_mm
                };
                self.set_geometry(wheel_radius_mm, data[0] / 2.0)?;
            }
            CommandId::PidReset => self.reset_pids(),
            CommandId::CommandModeSelect => {
                let mode = if data[0] == 0.0 {
                    ControlMode::ClosedLoopVelocity
                } else {
                    ControlMode::OpenLoopDuty
                };
                self.set_control_mode(mode)?;
            }
            CommandId::EncoderResolution => {
                for (wheel, ppr) in data.iter().enumerate() {
                    if *ppr >= 1.0 {
                        self.set_encoder_resolution(wheel, *ppr as u32);
                    }
                }
            }
        }

        debug!("applied command {} seq {}", frame.id, frame.seq);
        Ok(())
    }

    fn require_mode(&mut self, mode: ControlMode) -> Result<(), DriveError> {
        if self.config().mode == mode {
            Ok(())
        } else {
            self.set_control_mode(mode)
        }
    }

    fn body_velocity(&mut self, variant: DriveVariant, data: &[f32; 4]) -> Result<(), DriveError> {
        let configured = self.config().variant;
        if configured != variant {
            if self.is_running() {
                return Err(DriveError::VariantMismatch {
                    configured,
                    requested: variant,
                });
            }
            self.set_variant(variant)?;
        }
        self.set_target_velocity(data[0], data[1], data[2]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DriveConfig, EncoderConfig};
    use crate::control::{ControlMode, DriveController, DriveError};
    use crate::drivers::encoder::TickCounter;
    use crate::drivers::Actuator;
    use crate::kinematics::{DriveVariant, VelocityUnit};
    use crate::protocol::messages::{CommandFrame, CommandId};
    use crate::test_util::assert_close;

    struct NullActuator;

    impl Actuator for NullActuator {
        fn set_duty(&mut self, _duty_percent: f32) {}
        fn coast(&mut self) {}
        fn brake(&mut self) {}
    }

    struct NullCounter;

    impl TickCounter for NullCounter {
        fn ticks(&self) -> i32 {
            0
        }
        fn rewind(&mut self, _ticks: i32) {}
    }

    type Controller = DriveController<NullActuator, NullCounter>;

    fn frame(id: CommandId, data: [f32; 4]) -> CommandFrame {
        CommandFrame::new(1, id, data)
    }

    fn linear_omni4() -> Controller {
        Controller::new(DriveConfig::default().with_unit(VelocityUnit::Linear))
    }

    #[test]
    fn body_velocity_switches_variant_while_idle() {
        let mut c = linear_omni4();
        c.apply(&frame(CommandId::Mecanum, [100.0, 0.0, 0.0, 0.0])).unwrap();

        assert_eq!(c.config().variant, DriveVariant::Mecanum);
        assert_close(c.command(0).target, 70.71, 0.01);
        assert_close(c.command(3).target, 70.71, 0.01);
    }

    #[test]
    fn body_velocity_for_other_variant_rejected_while_running() {
        let mut c = linear_omni4();
        c.start();

        assert_eq!(
            c.apply(&frame(CommandId::Omni3, [100.0, 0.0, 0.0, 0.0])),
            Err(DriveError::VariantMismatch {
                configured: DriveVariant::Omni4,
                requested: DriveVariant::Omni3,
            })
        );

        c.apply(&frame(CommandId::Omni4, [100.0, 0.0, 0.0, 0.0])).unwrap();
        assert_close(c.command(0).target, -70.71, 0.01);
    }

    #[test]
    fn wheel_target_commands_select_control_mode() {
        let mut c = linear_omni4();
        c.apply(&frame(CommandId::MotorPwm, [10.0, 20.0, 30.0, 40.0])).unwrap();
        assert_eq!(c.config().mode, ControlMode::OpenLoopDuty);
        assert_eq!(c.command(3).target, 40.0);

        c.start();
        // Mode change needed, refused while running.
        assert_eq!(
            c.apply(&frame(CommandId::MotorRps, [1.0; 4])),
            Err(DriveError::Running)
        );
        // Same mode is fine.
        c.apply(&frame(CommandId::MotorPwm, [5.0; 4])).unwrap();
        assert_eq!(c.command(0).target, 5.0);
    }

    #[test]
    fn gain_commands_address_one_wheel() {
        let mut c = linear_omni4();
        c.apply(&frame(CommandId::M3PidGain, [1.5, 0.25, 0.01, 0.02])).unwrap();

        let gains = c.pid(2).map(|p| p.gains()).unwrap_or_default();
        assert_eq!((gains.kp, gains.ki, gains.kd, gains.tau), (1.5, 0.25, 0.01, 0.02));
        assert_eq!(c.pid(1).map(|p| p.gains().kp), Some(0.0));
    }

    #[test]
    fn geometry_and_mode_select_are_idle_only() {
        let mut c = linear_omni4();
        c.apply(&frame(CommandId::RobotDiameter, [400.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(c.config().turning_radius_mm, 200.0);
        assert_eq!(c.config().wheel_radius_mm, 30.0);

        c.apply(&frame(CommandId::RobotDiameter, [400.0, 100.0, 0.0, 0.0])).unwrap();
        assert_eq!(c.config().wheel_radius_mm, 50.0);

        c.apply(&frame(CommandId::CommandModeSelect, [1.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(c.config().mode, ControlMode::OpenLoopDuty);

        c.start();
        assert_eq!(
            c.apply(&frame(CommandId::RobotDiameter, [300.0, 0.0, 0.0, 0.0])),
            Err(DriveError::Running)
        );
        assert_eq!(
            c.apply(&frame(CommandId::CommandModeSelect, [0.0; 4])),
            Err(DriveError::Running)
        );
        // PID reset is allowed at any time.
        assert_eq!(c.apply(&frame(CommandId::PidReset, [0.0; 4])), Ok(()));
    }

    #[test]
    fn encoder_resolution_skips_non_positive_entries() {
        let mut c = linear_omni4();
        c.attach_encoder(0, NullCounter, EncoderConfig::new(100, 60.0));
        c.attach_encoder(1, NullCounter, EncoderConfig::new(100, 60.0));

        c.apply(&frame(CommandId::EncoderResolution, [2048.0, 0.0, 512.0, 512.0]))
            .unwrap();

        let ppr = |i| {
            c.motor(i)
                .and_then(|m| m.encoder())
                .map(|e| e.state().config().pulses_per_rev)
        };
        assert_eq!(ppr(0), Some(2048));
        assert_eq!(ppr(1), Some(100));
        assert_eq!(ppr(2), None);
    }
}
