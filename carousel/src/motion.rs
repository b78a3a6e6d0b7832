//! Position animation.
//!
//! The track position eases toward its target with a damped spring. How a
//! change is animated is plain data ([`Transition`]); the reducer picks
//! [`Transition::Instant`] while a loop reset is in progress so the snap back
//! to the first item is invisible.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Distance from the target below which a spring counts as settled, in pixels
pub const REST_DELTA: f64 = 0.5;

/// Upper bound on how long any animation may run
pub const MAX_SETTLE: Duration = Duration::from_secs(5);

/// Damped spring parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    /// Spring constant
    pub stiffness: f64,
    /// Damping coefficient
    pub damping: f64,
    /// Moving mass
    pub mass: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 1.0,
        }
    }
}

impl Spring {
    fn is_valid(&self) -> bool {
        self.stiffness > 0.0
            && self.mass > 0.0
            && self.damping >= 0.0
            && self.stiffness.is_finite()
            && self.mass.is_finite()
            && self.damping.is_finite()
    }

    /// Undamped angular frequency
    fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio: below 1 oscillates, 1 is critical, above 1 creeps
    fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// How a position change is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Jump straight to the target
    Instant,
    /// Ease toward the target with a spring
    Spring(Spring),
}

impl Default for Transition {
    fn default() -> Self {
        Self::Spring(Spring::default())
    }
}

/// Closed-form solution of one spring run, in displacement-from-target space
#[derive(Debug, Clone, Copy, PartialEq)]
enum Solution {
    Under {
        decay: f64,
        frequency: f64,
        a: f64,
        b: f64,
    },
    Critical {
        rate: f64,
        x0: f64,
        c: f64,
    },
    Over {
        r1: f64,
        r2: f64,
        c1: f64,
        c2: f64,
    },
}

impl Solution {
    fn new(spring: Spring, x0: f64, v0: f64) -> Self {
        let omega = spring.natural_frequency();
        let zeta = spring.damping_ratio();

        if (zeta - 1.0).abs() < 1e-6 {
            Self::Critical {
                rate: omega,
                x0,
                c: v0 + omega * x0,
            }
        } else if zeta < 1.0 {
            let decay = zeta * omega;
            let frequency = omega * (1.0 - zeta * zeta).sqrt();
            Self::Under {
                decay,
                frequency,
                a: x0,
                b: (v0 + decay * x0) / frequency,
            }
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            Self::Over {
                r1,
                r2,
                c1: x0 - c2,
                c2,
            }
        }
    }

    fn displacement(&self, t: f64) -> f64 {
        match *self {
            Self::Under {
                decay,
                frequency,
                a,
                b,
            } => (-decay * t).exp() * (a * (frequency * t).cos() + b * (frequency * t).sin()),
            Self::Critical { rate, x0, c } => (x0 + c * t) * (-rate * t).exp(),
            Self::Over { r1, r2, c1, c2 } => c1 * (r1 * t).exp() + c2 * (r2 * t).exp(),
        }
    }

    fn velocity(&self, t: f64) -> f64 {
        match *self {
            Self::Under {
                decay,
                frequency,
                a,
                b,
            } => {
                let v0 = b * frequency - decay * a;
                let sin_coeff = -(decay * v0 + (decay * decay + frequency * frequency) * a) / frequency;
                (-decay * t).exp() * (v0 * (frequency * t).cos() + sin_coeff * (frequency * t).sin())
            },
            Self::Critical { rate, x0, c } => {
                let v0 = c - rate * x0;
                (-rate * t).exp() * (v0 - rate * c * t)
            },
            Self::Over { r1, r2, c1, c2 } => r1 * c1 * (r1 * t).exp() + r2 * c2 * (r2 * t).exp(),
        }
    }

    /// Time after which `|displacement| <= REST_DELTA`, from an envelope bound
    fn settle_seconds(&self) -> f64 {
        let (amplitude, rate) = match *self {
            Self::Under { decay, a, b, .. } => (a.abs() + b.abs(), decay),
            // (|x0| + |c| t) e^(-rt) <= (|x0| + 2|c|/r) e^(-rt/2)
            Self::Critical { rate, x0, c } => (x0.abs() + 2.0 * c.abs() / rate, rate / 2.0),
            Self::Over { r1, c1, c2, .. } => (c1.abs() + c2.abs(), -r1),
        };

        if amplitude <= REST_DELTA {
            0.0
        } else if rate <= 0.0 {
            f64::INFINITY
        } else {
            (amplitude / REST_DELTA).ln() / rate
        }
    }
}

/// One in-flight move of the track position
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    from: f64,
    to: f64,
    started_at: DateTime<Utc>,
    solution: Solution,
    settle: Duration,
    generation: u64,
}

impl Animation {
    /// Start a spring run from `from` (moving at `velocity` px/s) toward `to`
    ///
    /// An invalid spring settles immediately.
    #[must_use]
    pub fn spring(
        spring: Spring,
        from: f64,
        to: f64,
        velocity: f64,
        started_at: DateTime<Utc>,
        generation: u64,
    ) -> Self {
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let solution = Solution::new(spring, from - to, velocity);
        let settle = if spring.is_valid() {
            to_duration(solution.settle_seconds())
        } else {
            Duration::ZERO
        };

        Self {
            from,
            to,
            started_at,
            solution,
            settle,
            generation,
        }
    }

    /// Where the animation started
    #[must_use]
    pub const fn origin(&self) -> f64 {
        self.from
    }

    /// Where the animation ends
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    /// Generation this animation was started under
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// How long until the animation has settled on its target
    #[must_use]
    pub const fn settle_duration(&self) -> Duration {
        self.settle
    }

    fn elapsed(&self, now: DateTime<Utc>) -> Option<f64> {
        let elapsed = (now - self.started_at).to_std().unwrap_or(Duration::ZERO);
        if elapsed >= self.settle {
            None
        } else {
            Some(elapsed.as_secs_f64())
        }
    }

    /// Position at `now`
    #[must_use]
    pub fn sample(&self, now: DateTime<Utc>) -> f64 {
        self.elapsed(now)
            .map_or(self.to, |t| self.to + self.solution.displacement(t))
    }

    /// Velocity at `now`, in px/s
    #[must_use]
    pub fn velocity(&self, now: DateTime<Utc>) -> f64 {
        self.elapsed(now).map_or(0.0, |t| self.solution.velocity(t))
    }

    /// Whether the animation has reached its target at `now`
    #[must_use]
    pub fn is_settled(&self, now: DateTime<Utc>) -> bool {
        self.elapsed(now).is_none()
    }
}

/// Round up to whole milliseconds, capped at [`MAX_SETTLE`]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0, MAX_SETTLE]
fn to_duration(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    let millis = (seconds * 1000.0).ceil().min(MAX_SETTLE.as_millis() as f64);
    Duration::from_millis(millis as u64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_735_689_600, 0).unwrap()
    }

    fn at(ms: i64) -> DateTime<Utc> {
        start() + TimeDelta::milliseconds(ms)
    }

    #[test]
    fn test_default_spring_settles_on_target() {
        let animation = Animation::spring(Spring::default(), 0.0, -384.0, 0.0, start(), 1);
        let settle = animation.settle_duration();

        assert!(settle > Duration::from_millis(100));
        assert!(settle < Duration::from_secs(2));
        assert!((animation.sample(at(0)) - 0.0).abs() < 1e-9);

        let midway = animation.sample(at(100));
        assert!(midway < 0.0 && midway > -384.0 - 50.0);

        let settle_ms = i64::try_from(settle.as_millis()).unwrap();
        assert!((animation.sample(at(settle_ms)) + 384.0).abs() < f64::EPSILON);
        assert!(animation.is_settled(at(settle_ms)));
        assert!(animation.velocity(at(settle_ms)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_envelope_is_within_rest_delta_when_settled() {
        for spring in [
            Spring::default(),
            Spring { stiffness: 100.0, damping: 20.0, mass: 1.0 },
            Spring { stiffness: 100.0, damping: 60.0, mass: 1.0 },
        ] {
            let animation = Animation::spring(spring, 500.0, 0.0, -2000.0, start(), 1);
            let solution = animation.solution;
            let t = animation.settle_duration().as_secs_f64();
            assert!(solution.displacement(t).abs() <= REST_DELTA + 1e-6, "{spring:?}");
        }
    }

    #[test]
    fn test_velocity_matches_initial_condition() {
        for spring in [
            Spring::default(),
            Spring { stiffness: 100.0, damping: 20.0, mass: 1.0 },
            Spring { stiffness: 100.0, damping: 60.0, mass: 1.0 },
        ] {
            let solution = Solution::new(spring, 120.0, -800.0);
            assert!((solution.displacement(0.0) - 120.0).abs() < 1e-9);
            assert!((solution.velocity(0.0) + 800.0).abs() < 1e-6, "{spring:?}");
        }
    }

    #[test]
    fn test_no_distance_no_velocity_settles_immediately() {
        let animation = Animation::spring(Spring::default(), -384.0, -384.0, 0.0, start(), 1);
        assert_eq!(animation.settle_duration(), Duration::ZERO);
        assert!(animation.is_settled(at(0)));
    }

    #[test]
    fn test_invalid_spring_settles_immediately() {
        let spring = Spring { stiffness: 0.0, damping: 30.0, mass: 1.0 };
        let animation = Animation::spring(spring, 0.0, -384.0, 0.0, start(), 1);
        assert_eq!(animation.settle_duration(), Duration::ZERO);
        assert!((animation.sample(at(0)) + 384.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_settle_is_capped() {
        let lazy = Spring { stiffness: 1.0, damping: 0.01, mass: 1.0 };
        let animation = Animation::spring(lazy, 0.0, -100_000.0, 0.0, start(), 1);
        assert_eq!(animation.settle_duration(), MAX_SETTLE);
    }
}
