use crate::config::SimConfig;
use crate::dynamics::state::EPS;

// ---------------------------------------------------------------------------
// Sign of velocity
// ---------------------------------------------------------------------------

/// Three-way sign of a scalar, with a band of width `EPS` around zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signum {
    Negative,
    Zero,
    Positive,
}

pub fn signum(x: f64) -> Signum {
    if x.abs() < EPS {
        Signum::Zero
    } else if x > 0.0 {
        Signum::Positive
    } else {
        Signum::Negative
    }
}

/// Multiplier applied to thrust. Zero velocity counts as upward so the
/// motor keeps pushing through the turnaround instead of switching off.
pub fn thrust_direction(velocity: f64) -> f64 {
    match signum(velocity) {
        Signum::Negative => -1.0,
        Signum::Zero | Signum::Positive => 1.0,
    }
}

// ---------------------------------------------------------------------------
// Force model
// ---------------------------------------------------------------------------

/// Forces acting on the vehicle at the start of a step (N).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub thrust: f64,
    pub drag: f64,
    pub weight: f64,
}

impl Forces {
    /// Evaluate thrust, signed drag and weight.
    ///
    /// Drag uses `v|v|` so it always opposes the direction of motion.
    pub fn evaluate(config: &SimConfig, mass_flow: f64, velocity: f64, mass: f64) -> Self {
        Self {
            thrust: mass_flow * config.exhaust_velocity,
            drag: drag_force(
                velocity,
                config.air_density,
                config.drag_coefficient,
                config.reference_area,
            ),
            weight: mass * config.gravity,
        }
    }

    /// Thrust minus drag minus weight.
    pub fn net(&self) -> f64 {
        self.thrust - self.drag - self.weight
    }

    /// `a = -g - D/m + sgn(V) T/m`
    pub fn acceleration(&self, gravity: f64, velocity: f64, mass: f64) -> f64 {
        -gravity - self.drag / mass + thrust_direction(velocity) * self.thrust / mass
    }
}

/// Quadratic drag, signed with the velocity.
pub fn drag_force(velocity: f64, air_density: f64, cd: f64, area: f64) -> f64 {
    0.5 * air_density * velocity * velocity.abs() * cd * area
}

/// True while the vehicle sits on (or below) the ground, is not climbing,
/// and the net force cannot lift it.
pub fn held_by_ground(altitude: f64, velocity: f64, forces: &Forces) -> bool {
    altitude <= EPS && velocity <= EPS && forces.net() <= 0.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn signum_has_zero_band() {
        assert_eq!(signum(0.0), Signum::Zero);
        assert_eq!(signum(5e-13), Signum::Zero);
        assert_eq!(signum(-5e-13), Signum::Zero);
        assert_eq!(signum(1e-6), Signum::Positive);
        assert_eq!(signum(-1e-6), Signum::Negative);
    }

    #[test]
    fn thrust_points_up_at_zero_velocity() {
        assert_eq!(thrust_direction(0.0), 1.0);
        assert_eq!(thrust_direction(-0.0), 1.0);
        assert_eq!(thrust_direction(3.0), 1.0);
        assert_eq!(thrust_direction(-3.0), -1.0);
    }

    #[test]
    fn drag_opposes_velocity() {
        assert!(drag_force(100.0, 1.225, 0.5, 0.01) > 0.0);
        assert!(drag_force(-100.0, 1.225, 0.5, 0.01) < 0.0);
        assert_eq!(drag_force(0.0, 1.225, 0.5, 0.01), 0.0);
        assert_relative_eq!(drag_force(100.0, 1.225, 0.5, 0.01), 30.625, epsilon = 1e-12);
    }

    #[test]
    fn acceleration_on_pad_without_thrust_is_minus_g() {
        let cfg = SimConfig::default();
        let f = Forces::evaluate(&cfg, 0.0, 0.0, 50.0);
        assert_eq!(f.thrust, 0.0);
        assert_relative_eq!(f.weight, 50.0 * 9.81);
        assert_relative_eq!(f.acceleration(cfg.gravity, 0.0, 50.0), -9.81);
        assert!(held_by_ground(0.0, 0.0, &f));
    }

    #[test]
    fn enough_thrust_releases_ground_hold() {
        let cfg = SimConfig::default();
        // 3 kg/s * 960 m/s = 2880 N against 490.5 N of weight
        let f = Forces::evaluate(&cfg, 3.0, 0.0, 50.0);
        assert!(f.net() > 0.0);
        assert!(!held_by_ground(0.0, 0.0, &f));
        assert_relative_eq!(f.acceleration(cfg.gravity, 0.0, 50.0), 2880.0 / 50.0 - 9.81);
    }

    #[test]
    fn thrust_reverses_when_descending() {
        let cfg = SimConfig::default();
        let f = Forces::evaluate(&cfg, 1.0, -10.0, 40.0);
        let a = f.acceleration(cfg.gravity, -10.0, 40.0);
        assert_relative_eq!(a, -9.81 - f.drag / 40.0 - 960.0 / 40.0);
    }

    #[test]
    fn airborne_vehicle_is_not_held() {
        let cfg = SimConfig::default();
        let f = Forces::evaluate(&cfg, 0.0, -20.0, 20.0);
        assert!(!held_by_ground(15.0, -20.0, &f));
        assert!(!held_by_ground(0.0, 5.0, &f));
    }
}
