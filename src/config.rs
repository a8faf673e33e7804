//! Engine input: vehicle, environment and integration parameters.
//!
//! The engine trusts its input. [`SimConfig::validate`] is the caller-side
//! check that front ends run before invoking [`crate::sim::simulate`].

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub dt: f64,               // integration timestep, s
    pub max_time: f64,         // hard stop, s
    pub gravity: f64,          // m/s^2
    pub air_density: f64,      // kg/m^3, constant with altitude
    pub drag_coefficient: f64, // dimensionless
    pub reference_area: f64,   // m^2
    pub dry_mass: f64,         // kg
    pub propellant_mass: f64,  // kg
    pub exhaust_velocity: f64, // m/s
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,        // 100 Hz
            max_time: 60.0,  // 1 min ceiling
            gravity: 9.81,
            air_density: 1.225,
            drag_coefficient: 0.5,
            reference_area: 0.01,
            dry_mass: 20.0,
            propellant_mass: 30.0,
            exhaust_velocity: 960.0,
        }
    }
}

impl SimConfig {
    /// Wet mass at ignition.
    pub fn initial_mass(&self) -> f64 {
        self.dry_mass + self.propellant_mass
    }

    /// Number of samples the run may produce: `ceil(max_time / dt) + 2`.
    pub fn step_budget(&self) -> usize {
        (self.max_time / self.dt).ceil() as usize + 2
    }

    /// Overlay a parameter file on top of this configuration.
    pub fn apply(&mut self, params: &ParamFile) {
        let fields = [
            (&mut self.dt, params.dt),
            (&mut self.max_time, params.tmax),
            (&mut self.gravity, params.g),
            (&mut self.air_density, params.rho),
            (&mut self.drag_coefficient, params.cd),
            (&mut self.dry_mass, params.m_dry),
            (&mut self.propellant_mass, params.m_prop),
            (&mut self.exhaust_velocity, params.ue),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                *field = v;
            }
        }

        match (params.diameter, params.area) {
            (Some(d), _) => self.reference_area = reference_area_from_diameter(d),
            (None, Some(a)) => self.reference_area = a,
            (None, None) => {}
        }
    }

    /// Load a JSON parameter file and overlay it on the defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let params = ParamFile::load(path)?;
        let mut config = Self::default();
        config.apply(&params);
        Ok(config)
    }

    /// Check every parameter against the accepted input ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("dt", self.dt, 1e-4, 0.1),
            ("tmax", self.max_time, 5.0, 1000.0),
            ("g", self.gravity, 0.0, 20.0),
            ("rho", self.air_density, 0.0, 5.0),
            ("Cd", self.drag_coefficient, 0.0, 2.5),
            ("A", self.reference_area, 0.0, 5.0),
            ("m_dry", self.dry_mass, 0.1, 10_000.0),
            ("m_prop", self.propellant_mass, 0.0, 10_000.0),
            ("ue", self.exhaust_velocity, 10.0, 6000.0),
        ];
        for (name, value, min, max) in checks {
            if !value.is_finite() || value < min || value > max {
                return Err(ConfigError::OutOfRange { name, value, min, max });
            }
        }
        Ok(())
    }
}

/// Circular cross-section area from a body diameter: `pi (d/2)^2`.
pub fn reference_area_from_diameter(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}

// ---------------------------------------------------------------------------
// Parameter file
// ---------------------------------------------------------------------------

/// Partial parameter set as stored on disk (`pdf_defaults.json` style).
/// Missing or `null` keys leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParamFile {
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default)]
    pub tmax: Option<f64>,
    #[serde(default)]
    pub g: Option<f64>,
    #[serde(default)]
    pub rho: Option<f64>,
    #[serde(default, rename = "Cd")]
    pub cd: Option<f64>,
    #[serde(default, rename = "A")]
    pub area: Option<f64>,
    #[serde(default, rename = "D")]
    pub diameter: Option<f64>,
    #[serde(default)]
    pub m_dry: Option<f64>,
    #[serde(default)]
    pub m_prop: Option<f64>,
    #[serde(default)]
    pub ue: Option<f64>,
}

impl ParamFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Errors that can occur while loading or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse parameter file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("parameter {name} = {value} outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
