//! Mass-spring-damper physics.
//!
//! Positions are in pixels and velocities in pixels per second. The
//! oscillator is solved in closed form so a frame's value depends only on the
//! time since the spring started, not on the frame rate.

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Spring constant `k`. Higher values pull harder toward the target.
    pub stiffness: f32,
    /// Mass of the animated value. Lower values react faster.
    pub mass: f32,
    /// Viscous damping coefficient `c`.
    pub damping: f32,
    /// Speed (px/s) below which the spring may come to rest.
    pub rest_speed: f32,
    /// Distance (px) from the target below which the spring may come to rest.
    pub rest_delta: f32,
}

impl SpringSpec {
    pub const DEFAULT_REST_SPEED: f32 = 0.5;
    pub const DEFAULT_REST_DELTA: f32 = 0.01;

    pub fn new(stiffness: f32, mass: f32, damping: f32) -> Self {
        Self {
            stiffness,
            mass,
            damping,
            rest_speed: Self::DEFAULT_REST_SPEED,
            rest_delta: Self::DEFAULT_REST_DELTA,
        }
    }

    /// The spring a slider uses to settle onto a slide: stiffness 75, mass
    /// 0.25, damping 10. Slightly over-damped, so it never overshoots from
    /// rest.
    pub fn slider_settle() -> Self {
        Self::new(75.0, 0.25, 10.0)
    }

    /// Replace the damping coefficient with the one giving `ratio`.
    /// 1.0 = critically damped, < 1.0 = under-damped, > 1.0 = over-damped.
    pub fn with_damping_ratio(mut self, ratio: f32) -> Self {
        self.damping = ratio * 2.0 * (self.stiffness * self.mass).sqrt();
        self
    }

    pub fn with_rest_thresholds(mut self, rest_speed: f32, rest_delta: f32) -> Self {
        self.rest_speed = rest_speed;
        self.rest_delta = rest_delta;
        self
    }

    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency in rad/s.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    pub fn is_at_rest(&self, displacement: f32, velocity: f32) -> bool {
        displacement.abs() <= self.rest_delta && velocity.abs() <= self.rest_speed
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::slider_settle()
    }
}

#[derive(Debug, Clone, Copy)]
enum Regime {
    Under { decay: f64, omega_d: f64 },
    Critical { omega: f64 },
    Over { r1: f64, r2: f64 },
}

/// One run of a spring from an initial displacement and velocity.
#[derive(Debug, Clone, Copy)]
pub struct SpringMotion {
    spec: SpringSpec,
    initial_displacement: f64,
    initial_velocity: f64,
    regime: Regime,
}

impl SpringMotion {
    /// A spring starting at `from`, pulled toward `to`, moving at
    /// `velocity` px/s.
    pub fn new(spec: SpringSpec, from: f32, to: f32, velocity: f32) -> Self {
        let stiffness = f64::from(spec.stiffness.max(f32::EPSILON));
        let mass = f64::from(spec.mass.max(f32::EPSILON));
        let damping = f64::from(spec.damping.max(0.0));

        let omega = (stiffness / mass).sqrt();
        let zeta = damping / (2.0 * (stiffness * mass).sqrt());

        let regime = if (zeta - 1.0).abs() < 1e-4 {
            Regime::Critical { omega }
        } else if zeta < 1.0 {
            Regime::Under {
                decay: zeta * omega,
                omega_d: omega * (1.0 - zeta * zeta).sqrt(),
            }
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            Regime::Over {
                r1: -omega * (zeta - root),
                r2: -omega * (zeta + root),
            }
        };

        Self {
            spec,
            initial_displacement: f64::from(from - to),
            initial_velocity: f64::from(velocity),
            regime,
        }
    }

    pub fn spec(&self) -> SpringSpec {
        self.spec
    }

    /// Signed distance from the target after `nanos`.
    pub fn displacement_at_nanos(&self, nanos: u64) -> f32 {
        self.sample(nanos).0
    }

    /// Velocity in px/s after `nanos`.
    pub fn velocity_at_nanos(&self, nanos: u64) -> f32 {
        self.sample(nanos).1
    }

    /// Displacement and velocity after `nanos`.
    pub fn sample(&self, nanos: u64) -> (f32, f32) {
        let t = nanos as f64 / 1_000_000_000.0;
        let x0 = self.initial_displacement;
        let v0 = self.initial_velocity;

        let (x, v) = match self.regime {
            Regime::Under { decay, omega_d } => {
                let envelope = (-decay * t).exp();
                let a = x0;
                let b = (v0 + decay * x0) / omega_d;
                let (sin, cos) = (omega_d * t).sin_cos();
                let x = envelope * (a * cos + b * sin);
                let v = envelope
                    * ((b * omega_d - decay * a) * cos - (a * omega_d + decay * b) * sin);
                (x, v)
            }
            Regime::Critical { omega } => {
                let envelope = (-omega * t).exp();
                let b = v0 + omega * x0;
                (envelope * (x0 + b * t), envelope * (v0 - omega * b * t))
            }
            Regime::Over { r1, r2 } => {
                let c1 = (v0 - r2 * x0) / (r1 - r2);
                let c2 = x0 - c1;
                let e1 = (r1 * t).exp();
                let e2 = (r2 * t).exp();
                (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
            }
        };

        (x as f32, v as f32)
    }
}
