//! Physics constants injected into every step.

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::types::Vector2;

/// Constants shared by all movers of a simulation.
///
/// Passed by reference into each call; the engine keeps no global copy.
/// Units are pixels and ticks.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Force added to every non-kinematic step.
    pub gravity: Vector2,
    /// Speed components with a smaller magnitude are snapped to zero.
    pub min_speed: Vector2,
    /// Max horizontal speed at which a mover stays glued to a ramp it
    /// momentarily lost contact with.
    pub ramp_contact_threshold: f64,
    /// Ramps with `ratio` above this make resting movers slide down.
    pub ramp_slip_threshold: f64,
    /// Scale of the down-slope force on ramps steeper than the threshold.
    pub ramp_slip_force: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vector2::new(0.0, 1.0),
            min_speed: Vector2::new(0.01, 0.01),
            ramp_contact_threshold: 4.0,
            ramp_slip_threshold: 1.0,
            ramp_slip_force: 1.0,
        }
    }
}

impl PhysicsConfig {
    /// Parse from JSON; missing fields fall back to [`Default`].
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: PhysicsConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would feed NaN or nonsense into a step.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig("gravity must be finite"));
        }
        if !self.min_speed.is_finite() || self.min_speed.x < 0.0 || self.min_speed.y < 0.0 {
            return Err(PhysicsError::InvalidConfig("min_speed must be finite and non-negative"));
        }
        if !(self.ramp_contact_threshold >= 0.0 && self.ramp_contact_threshold.is_finite()) {
            return Err(PhysicsError::InvalidConfig(
                "ramp_contact_threshold must be finite and non-negative",
            ));
        }
        if !(self.ramp_slip_threshold > 0.0 && self.ramp_slip_threshold.is_finite()) {
            return Err(PhysicsError::InvalidConfig("ramp_slip_threshold must be positive"));
        }
        if !self.ramp_slip_force.is_finite() {
            return Err(PhysicsError::InvalidConfig("ramp_slip_force must be finite"));
        }
        Ok(())
    }

    /// Same constants with gravity switched off (used for carried passengers).
    pub fn without_gravity(&self) -> Self {
        Self { gravity: Vector2::ZERO, ..*self }
    }
}
