// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PID controller for closed-loop wheel velocity control.
//!
//! Works in `no_std` and does not allocate memory.
//!
//! Two low-pass filter placements are supported, selected with [`FilterMode`]:
//!
//! - [`FilterMode::Derivative`] filters the error before differentiating it.
//! - [`FilterMode::Output`] computes an unfiltered PID output and low-passes that against the
//!   previous output.
//!
//! In both cases a time constant of `0.0` turns the filter off. The controller never saturates:
//! the integrator keeps accumulating and the output is unbounded. Clamping to the actuator span is
//! the caller's job.

/// Where the first-order low-pass filter sits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterMode {
    /// Filter the error feeding the derivative term.
    #[default]
    Derivative,
    /// Filter the summed controller output.
    Output,
}

/// One of the three PID contributions, for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Term {
    P,
    I,
    D,
}

/// Gains and filter time constant.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    /// Filter time constant in seconds; `0.0` disables filtering.
    pub tau: f32,
}

impl Gains {
    /// Negative time constants are treated as `0.0`.
    pub fn new(kp: f32, ki: f32, kd: f32, tau: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            tau: if tau > 0.0 { tau } else { 0.0 },
        }
    }
}

/// PID controller with a selectable filter and no output clamp.
#[derive(Clone, Debug, Default)]
pub struct Pid {
    gains: Gains,
    mode: FilterMode,

    /// Integrator state (error · s)
    integral: f32,
    /// Error of the previous update
    prev_error: f32,
    /// Output of the previous update (output mode)
    prev_output: f32,

    /// Last computed contributions
    p_term: f32,
    i_term: f32,
    d_term: f32,
}

impl Pid {
    /// Create a new PID controller with filtering disabled.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            gains: Gains::new(kp, ki, kd, 0.0),
            ..Default::default()
        }
    }

    /// Set the filter time constant (seconds).
    pub fn with_time_constant(mut self, tau: f32) -> Self {
        self.gains = Gains::new(self.gains.kp, self.gains.ki, self.gains.kd, tau);
        self
    }

    /// Select where the filter is applied.
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace gains and time constant. Controller state is kept.
    pub fn set_gains(&mut self, kp: f32, ki: f32, kd: f32, tau: f32) {
        self.gains = Gains::new(kp, ki, kd, tau);
    }

    #[inline]
    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    #[inline]
    pub fn gains(&self) -> Gains {
        self.gains
    }

    #[inline]
    pub fn filter_mode(&self) -> FilterMode {
        self.mode
    }

    /// Accumulated error integral.
    #[inline]
    pub fn integral(&self) -> f32 {
        self.integral
    }

    /// Reset integrator, error history and filter state. Gains are untouched.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.prev_output = 0.0;
        self.p_term = 0.0;
        self.i_term = 0.0;
        self.d_term = 0.0;
    }

    /// Update the controller.
    ///
    /// `target`: desired value
    /// `measured`: current value
    /// `dt`: timestep in seconds (e.g. 0.01 for a 100 Hz loop)
    #[inline]
    pub fn control(&mut self, target: f32, measured: f32, dt: f32) -> f32 {
        self.control_error(target - measured, dt)
    }

    /// Update the controller from a precomputed error.
    pub fn control_error(&mut self, error: f32, dt: f32) -> f32 {
        let Gains { kp, ki, kd, tau } = self.gains;

        // ----- P term -----
        self.p_term = kp * error;

        // ----- I term (no clamp) -----
        self.integral += error * dt;
        self.i_term = ki * self.integral;

        let output = match self.mode {
            FilterMode::Derivative => {
                // ----- D term on the filtered error -----
                // The filter is seeded from the previous raw error and differenced against it.
                let filtered = if tau > 0.0 {
                    let alpha = tau / (tau + dt);
                    self.prev_error * alpha + error * (1.0 - alpha)
                } else {
                    error
                };
                let derivative = rate(filtered - self.prev_error, dt);
                self.d_term = kd * derivative;

                self.p_term + self.i_term + self.d_term
            }

            FilterMode::Output => {
                self.d_term = kd * rate(error - self.prev_error, dt);
                let raw = self.p_term + self.i_term + self.d_term;

                // ----- Low-pass on the output -----
                // `raw` is not weighted by `dt`.
                let filtered = if tau > 0.0 {
                    (self.prev_output * tau + raw) / (tau + dt)
                } else {
                    raw
                };
                self.prev_output = filtered;
                filtered
            }
        };

        self.prev_error = error;
        output
    }

    /// Last computed contribution of one term.
    pub fn component(&self, term: Term) -> f32 {
        match term {
            Term::P => self.p_term,
            Term::I => self.i_term,
            Term::D => self.d_term,
        }
    }
}

/// Backward difference, `0.0` for a non-positive timestep.
#[inline]
fn rate(delta: f32, dt: f32) -> f32 {
    if dt > 0.0 {
        delta / dt
    } else {
        0.0
    }
}
