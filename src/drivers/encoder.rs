// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Quadrature encoder processing.
//!
//! The hardware side is anything implementing [`TickCounter`]: a timer in encoder mode (see
//! `hw::encoder`) or a [`QuadratureTicks`] cell fed from pin-change interrupts.
//!
//! [`EncoderCounter`] turns the fixed-width raw count into an unbounded position. Whenever the raw
//! count passes `±wrap_threshold` the software wrap counter steps by one and the hardware counter
//! is asked to move back by `wrap_span`, so that
//!
//! ```text
//! logical = raw + wraps * wrap_span
//! ```
//!
//! holds after every sample. Velocity is recomputed at most once per sampling period; calls in
//! between return the cached value.

use core::f32::consts::PI;
use core::sync::atomic::{AtomicI32, Ordering};

use crate::config::EncoderConfig;

/// A hardware tick counter peer.
pub trait TickCounter {
    /// Current raw count, signed and centred on zero.
    fn ticks(&self) -> i32;

    /// Subtract `ticks` from the hardware count without losing pulses counted meanwhile.
    fn rewind(&mut self, ticks: i32);
}

impl<T: TickCounter + ?Sized> TickCounter for &mut T {
    #[inline]
    fn ticks(&self) -> i32 {
        (**self).ticks()
    }

    #[inline]
    fn rewind(&mut self, ticks: i32) {
        (**self).rewind(ticks)
    }
}

/// Result of [`EncoderCounter::sample`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Unbounded position in ticks.
    pub logical: i64,
    /// Ticks the hardware counter must be rewound by, if a wrap happened.
    pub recenter: Option<i32>,
}

/// Position and velocity snapshot of one wheel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderReading {
    pub count: i64,
    pub rotations: f32,
    pub degrees: f32,
    pub distance_mm: f32,
    /// Rotations per second.
    pub rps: f32,
    /// Rim speed (mm/s).
    pub linear_mm_s: f32,
}

/// Wrap tracking and time-gated velocity estimation for one encoder.
#[derive(Clone, Debug)]
pub struct EncoderCounter {
    config: EncoderConfig,

    /// Raw count after the last re-center
    raw: i32,
    /// Net threshold crossings
    wraps: i32,

    prev_rotations: f32,
    velocity_rps: f32,
    last_update_ms: Option<u32>,
}

impl EncoderCounter {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            raw: 0,
            wraps: 0,
            prev_rotations: 0.0,
            velocity_rps: 0.0,
            last_update_ms: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Change the counts-per-revolution calibration.
    pub fn set_pulses_per_rev(&mut self, ppr: u32) {
        self.config.pulses_per_rev = ppr.max(1);
    }

    #[inline]
    pub fn wraps(&self) -> i32 {
        self.wraps
    }

    /// Raw count as of the last sample, after any re-center.
    #[inline]
    pub fn raw(&self) -> i32 {
        self.raw
    }

    /// Unbounded position in ticks.
    #[inline]
    pub fn logical(&self) -> i64 {
        self.raw as i64 + self.wraps as i64 * self.config.wrap_span as i64
    }

    /// Feed a raw hardware count.
    ///
    /// If the count is past the wrap threshold the wrap counter moves one step in the direction of
    /// the crossing and the returned [`Sample::recenter`] tells the caller how far to rewind the
    /// hardware counter.
    pub fn sample(&mut self, raw: i32) -> Sample {
        let threshold = self.config.wrap_threshold;
        let span = self.config.wrap_span;

        let mut raw = raw;
        let mut recenter = None;

        if span > 0 {
            if raw > threshold {
                self.wraps += 1;
                raw -= span;
                recenter = Some(span);
            } else if raw < -threshold {
                self.wraps -= 1;
                raw += span;
                recenter = Some(-span);
            }
        }

        self.raw = raw;
        Sample {
            logical: self.logical(),
            recenter,
        }
    }

    #[inline]
    pub fn rotations(&self) -> f32 {
        self.logical() as f32 / self.config.pulses_per_rev as f32
    }

    /// Position readout with a velocity refreshed at most once per sampling period.
    ///
    /// The first call only primes the estimator, velocity stays at zero until a full period has
    /// elapsed.
    pub fn update_velocity(&mut self, now_ms: u32) -> EncoderReading {
        let rotations = self.rotations();
        let period_ms = self.config.sampling_period_ms.max(1);

        match self.last_update_ms {
            None => {
                self.prev_rotations = rotations;
                self.last_update_ms = Some(now_ms);
            }
            Some(last) if now_ms.wrapping_sub(last) >= period_ms => {
                self.velocity_rps = (rotations - self.prev_rotations) * 1000.0 / period_ms as f32;
                self.prev_rotations = rotations;
                self.last_update_ms = Some(now_ms);
            }
            Some(_) => {}
        }

        self.reading(rotations)
    }

    /// Position readout with the cached velocity, without touching the velocity gate.
    pub fn reading(&self, rotations: f32) -> EncoderReading {
        let circumference = PI * self.config.wheel_diameter_mm;
        EncoderReading {
            count: self.logical(),
            rotations,
            degrees: rotations * 360.0,
            distance_mm: rotations * circumference,
            rps: self.velocity_rps,
            linear_mm_s: self.velocity_rps * circumference,
        }
    }

    /// Zero the position and wrap count. Calibration is kept.
    pub fn reset(&mut self) {
        self.raw = 0;
        self.wraps = 0;
        self.prev_rotations = 0.0;
        self.velocity_rps = 0.0;
    }
}

/// An [`EncoderCounter`] bound to its hardware counter.
pub struct Encoder<C> {
    counter: C,
    state: EncoderCounter,
}

impl<C: TickCounter> Encoder<C> {
    pub fn new(counter: C, config: EncoderConfig) -> Self {
        Self {
            counter,
            state: EncoderCounter::new(config),
        }
    }

    /// Release the hardware counter.
    pub fn free(self) -> C {
        self.counter
    }

    /// Sample the hardware, re-center it if needed and return the current reading.
    pub fn poll(&mut self, now_ms: u32) -> EncoderReading {
        let sample = self.state.sample(self.counter.ticks());
        if let Some(shift) = sample.recenter {
            self.counter.rewind(shift);
            trace!("encoder wrap, wraps = {}", self.state.wraps());
        }
        self.state.update_velocity(now_ms)
    }

    /// Zero both the hardware count and the logical position.
    pub fn reset(&mut self) {
        let ticks = self.counter.ticks();
        self.counter.rewind(ticks);
        self.state.reset();
    }

    #[inline]
    pub fn state(&self) -> &EncoderCounter {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut EncoderCounter {
        &mut self.state
    }

    #[inline]
    pub fn counter(&self) -> &C {
        &self.counter
    }

    #[inline]
    pub fn counter_mut(&mut self) -> &mut C {
        &mut self.counter
    }
}

/// Quadrature signal edge seen by a pin-change interrupt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    ARise,
    AFall,
    BRise,
    BFall,
}

/// Tick count decoded in software from A/B edge interrupts.
///
/// The interrupt handler calls [`on_edge`](Self::on_edge); the control loop reads and re-centers
/// it through `&QuadratureTicks` as a [`TickCounter`]. Both sides only use atomic operations, so
/// the cell can live in a `static`.
pub struct QuadratureTicks {
    count: AtomicI32,
}

impl QuadratureTicks {
    pub const fn new() -> Self {
        Self {
            count: AtomicI32::new(0),
        }
    }

    /// Count one edge. `other_high` is the level of the opposite channel at the time of the edge.
    #[inline]
    pub fn on_edge(&self, edge: Edge, other_high: bool) {
        let forward = match edge {
            Edge::ARise => !other_high,
            Edge::AFall => other_high,
            Edge::BRise => other_high,
            Edge::BFall => !other_high,
        };
        let step = if forward { 1 } else { -1 };
        self.count.fetch_add(step, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> i32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for QuadratureTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter for &QuadratureTicks {
    #[inline]
    fn ticks(&self) -> i32 {
        self.get()
    }

    #[inline]
    fn rewind(&mut self, ticks: i32) {
        self.count.fetch_sub(ticks, Ordering::Relaxed);
    }
}
