//! Sensor package reading
//!
//! A sensor package is a workout tag plus a positional list of raw values.
//! This module holds the tag dispatch table that turns packages into validated
//! [`Workout`] values, and the NDJSON / JSON array readers used by the CLI.
//!
//! Raw value layouts by tag:
//! - `RUN`: action, duration (h), weight (kg)
//! - `WLK`: action, duration (h), weight (kg), height (cm)
//! - `SWM`: action, duration (h), weight (kg), pool length (m), pool count

use serde::{Deserialize, Serialize};

use crate::error::WorkoutError;
use crate::types::{ActivityKind, Workout, WorkoutSample};

/// Raw package as received from the sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PackageRepr")]
pub struct SensorPackage {
    /// Workout tag (`SWM`, `RUN`, `WLK`)
    pub workout_type: String,
    /// Positional raw values
    pub data: Vec<f64>,
}

/// Accepted wire shapes: `{"workout_type": .., "data": [..]}` or `["RUN", [..]]`
#[derive(Deserialize)]
#[serde(untagged)]
enum PackageRepr {
    Object { workout_type: String, data: Vec<f64> },
    Tuple(String, Vec<f64>),
}

impl From<PackageRepr> for SensorPackage {
    fn from(repr: PackageRepr) -> Self {
        match repr {
            PackageRepr::Object { workout_type, data } | PackageRepr::Tuple(workout_type, data) => {
                Self { workout_type, data }
            }
        }
    }
}

impl SensorPackage {
    pub fn new(workout_type: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }

    /// Dispatch this package to its workout variant
    pub fn to_workout(&self) -> Result<Workout, WorkoutError> {
        read_package(&self.workout_type, &self.data)
    }

    /// Parse newline-delimited packages, skipping blank lines
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<SensorPackage>, WorkoutError> {
        let mut packages = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<SensorPackage>(trimmed) {
                Ok(package) => packages.push(package),
                Err(e) => {
                    return Err(WorkoutError::InvalidInput(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(packages)
    }

    /// Parse a JSON array of packages
    pub fn parse_array(json: &str) -> Result<Vec<SensorPackage>, WorkoutError> {
        serde_json::from_str(json).map_err(|e| {
            WorkoutError::InvalidInput(format!("Failed to parse package array: {e}"))
        })
    }
}

/// Read the raw values of a package into the workout variant its tag selects.
///
/// Fails with [`WorkoutError::UnknownKind`] for tags outside the fixed set and
/// with [`WorkoutError::InvalidInput`] when the value count does not match the
/// kind or a value is out of range.
pub fn read_package(workout_type: &str, data: &[f64]) -> Result<Workout, WorkoutError> {
    let kind = ActivityKind::from_code(workout_type)?;

    if data.len() != kind.arity() {
        return Err(WorkoutError::InvalidInput(format!(
            "{} expects {} values, got {}",
            kind.code(),
            kind.arity(),
            data.len()
        )));
    }

    if let Some(value) = data.iter().find(|v| !v.is_finite()) {
        return Err(WorkoutError::InvalidInput(format!(
            "{} values must be finite, got {value}",
            kind.code()
        )));
    }

    let sample = WorkoutSample {
        action: whole_count("action", data[0])?,
        duration_h: positive("duration", data[1])?,
        weight_kg: positive("weight", data[2])?,
    };

    let workout = match kind {
        ActivityKind::Running => Workout::Running { sample },
        ActivityKind::SportsWalking => Workout::SportsWalking {
            sample,
            height_cm: positive("height", data[3])?,
        },
        ActivityKind::Swimming => Workout::Swimming {
            sample,
            pool_length_m: positive("pool length", data[3])?,
            pool_count: whole_count("pool count", data[4])?,
        },
    };

    Ok(workout)
}

/// Packages shipped with the CLI `demo` command
pub fn demo_packages() -> Vec<SensorPackage> {
    vec![
        SensorPackage::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
        SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

fn positive(field: &str, value: f64) -> Result<f64, WorkoutError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(WorkoutError::InvalidInput(format!(
            "{field} must be positive, got {value}"
        )))
    }
}

fn whole_count(field: &str, value: f64) -> Result<u32, WorkoutError> {
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(WorkoutError::InvalidInput(format!(
            "{field} must be a non-negative whole number, got {value}"
        )));
    }
    Ok(value as u32)
}
