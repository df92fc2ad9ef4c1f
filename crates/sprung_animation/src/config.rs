//! Oscillator configuration

use crate::error::{OscillatorError, Result};

/// Default restoring-force coefficient
pub const DEFAULT_STIFFNESS: f64 = 0.25;
/// Default velocity-opposing coefficient
pub const DEFAULT_DAMPING: f64 = 1.0;
/// Default mass. Changing mass mid-run makes the motion unpredictable, so it
/// is only read at construction.
pub const DEFAULT_MASS: f64 = 10.0;
/// Default settlement threshold on the net force
pub const DEFAULT_PRECISION: f64 = 0.0001;

/// Spring parameters for an [`Oscillator`](crate::Oscillator)
///
/// Every field has a default, so a config file only needs to name the
/// values it changes. In TOML the short names `k`, `d` and `v` are accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OscillatorConfig {
    /// Spring constant `k`
    #[cfg_attr(feature = "serde", serde(alias = "k"))]
    pub stiffness: f64,
    /// Damping coefficient `d`
    #[cfg_attr(feature = "serde", serde(alias = "d"))]
    pub damping: f64,
    /// Initial velocity `v`
    #[cfg_attr(feature = "serde", serde(alias = "v"))]
    pub velocity: f64,
    /// Mass `m`
    #[cfg_attr(feature = "serde", serde(alias = "m"))]
    pub mass: f64,
    /// Net force magnitude below which a frame counts as "small"
    pub precision: f64,
}

impl OscillatorConfig {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Builder: set the spring constant
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Builder: set the damping coefficient
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder: set the initial velocity
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: set the mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Builder: set the settlement threshold
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// True when no force can ever act on the body.
    ///
    /// The net force is then identically zero, which says nothing about
    /// being at rest: the body coasts at its initial velocity forever.
    pub fn is_degenerate(&self) -> bool {
        self.stiffness == 0.0 && self.damping == 0.0
    }

    /// Check every parameter, failing on the first bad one
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("velocity", self.velocity),
            ("mass", self.mass),
            ("precision", self.precision),
        ] {
            if !value.is_finite() {
                return Err(OscillatorError::NonFinite { field, value });
            }
        }

        if self.stiffness < 0.0 {
            return Err(OscillatorError::NegativeCoefficient {
                field: "stiffness",
                value: self.stiffness,
            });
        }
        if self.damping < 0.0 {
            return Err(OscillatorError::NegativeCoefficient {
                field: "damping",
                value: self.damping,
            });
        }
        if self.mass <= 0.0 {
            return Err(OscillatorError::NonPositiveMass(self.mass));
        }
        if self.precision <= 0.0 {
            return Err(OscillatorError::NonPositivePrecision(self.precision));
        }

        Ok(())
    }
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            velocity: 0.0,
            mass: DEFAULT_MASS,
            precision: DEFAULT_PRECISION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OscillatorConfig::default();
        assert_eq!(config.stiffness, 0.25);
        assert_eq!(config.damping, 1.0);
        assert_eq!(config.velocity, 0.0);
        assert_eq!(config.mass, 10.0);
        assert_eq!(config.precision, 0.0001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let zero = OscillatorConfig::default().with_mass(0.0);
        assert_eq!(zero.validate(), Err(OscillatorError::NonPositiveMass(0.0)));

        let negative = OscillatorConfig::default().with_mass(-2.0);
        assert_eq!(
            negative.validate(),
            Err(OscillatorError::NonPositiveMass(-2.0))
        );
    }

    #[test]
    fn test_rejects_non_positive_precision() {
        let config = OscillatorConfig::default().with_precision(0.0);
        assert_eq!(
            config.validate(),
            Err(OscillatorError::NonPositivePrecision(0.0))
        );
    }

    #[test]
    fn test_rejects_negative_coefficients() {
        let config = OscillatorConfig::new(-1.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(OscillatorError::NegativeCoefficient {
                field: "stiffness",
                ..
            })
        ));

        let config = OscillatorConfig::new(1.0, -0.5);
        assert!(matches!(
            config.validate(),
            Err(OscillatorError::NegativeCoefficient {
                field: "damping",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan_and_infinity() {
        let config = OscillatorConfig::default().with_velocity(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(OscillatorError::NonFinite {
                field: "velocity",
                ..
            })
        ));

        let config = OscillatorConfig::default().with_mass(f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(OscillatorError::NonFinite { field: "mass", .. })
        ));
    }

    #[test]
    fn test_zero_coefficients_are_valid_but_degenerate() {
        let config = OscillatorConfig::new(0.0, 0.0);
        assert!(config.validate().is_ok());
        assert!(config.is_degenerate());
        assert!(!OscillatorConfig::new(0.0, 1.0).is_degenerate());
    }
}
