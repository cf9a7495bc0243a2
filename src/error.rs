use thiserror::Error;

/// Errors raised when building bodies or loading a physics configuration.
///
/// A tick itself never fails; everything here is caught at construction time
/// so that NaN/Inf never reach the simulation.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Width/height not strictly positive (or not finite).
    #[error("invalid size {w}x{h}: width and height must be positive and finite")]
    InvalidSize { w: f64, h: f64 },

    /// Mass not strictly positive (or not finite).
    #[error("invalid mass {0}: mass must be positive and finite")]
    InvalidMass(f64),

    /// A configuration value is out of range.
    #[error("invalid physics config: {0}")]
    InvalidConfig(&'static str),

    /// Configuration text could not be parsed.
    #[error("failed to parse physics config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

pub(crate) fn check_size(w: f64, h: f64) -> Result<()> {
    if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidSize { w, h })
    }
}

pub(crate) fn check_mass(mass: f64) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_must_be_positive() {
        assert!(check_size(1.0, 1.0).is_ok());
        assert!(matches!(check_size(0.0, 1.0), Err(PhysicsError::InvalidSize { .. })));
        assert!(matches!(check_size(1.0, -2.0), Err(PhysicsError::InvalidSize { .. })));
        assert!(check_size(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_mass_must_be_positive() {
        assert!(check_mass(0.5).is_ok());
        assert!(matches!(check_mass(0.0), Err(PhysicsError::InvalidMass(m)) if m == 0.0));
        assert!(check_mass(f64::INFINITY).is_err());
    }

    #[test]
    fn test_messages_name_the_value() {
        let msg = PhysicsError::InvalidMass(-3.0).to_string();
        assert!(msg.contains("-3"));
    }
}
