//! Core types for the Workout Flux pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: validated workouts and the derived metrics record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WorkoutError;

/// Activity kind, selected by the sensor package tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Running,
    SportsWalking,
    Swimming,
}

impl ActivityKind {
    /// All supported kinds, in tag table order
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Swimming,
        ActivityKind::Running,
        ActivityKind::SportsWalking,
    ];

    /// Human-readable label used in summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Running => "Running",
            ActivityKind::SportsWalking => "SportsWalking",
            ActivityKind::Swimming => "Swimming",
        }
    }

    /// Short sensor tag for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ActivityKind::Running => "RUN",
            ActivityKind::SportsWalking => "WLK",
            ActivityKind::Swimming => "SWM",
        }
    }

    /// Resolve a sensor tag (`SWM`, `RUN`, `WLK`) to its kind
    pub fn from_code(code: &str) -> Result<Self, WorkoutError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| WorkoutError::UnknownKind(code.to_string()))
    }

    /// Number of values a raw sample of this kind carries
    pub fn arity(&self) -> usize {
        match self {
            ActivityKind::Running => 3,
            ActivityKind::SportsWalking => 4,
            ActivityKind::Swimming => 5,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values shared by every activity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkoutSample {
    /// Steps or strokes counted by the sensor
    pub action: u32,
    /// Workout duration (hours), strictly positive
    pub duration_h: f64,
    /// Athlete weight (kg)
    pub weight_kg: f64,
}

/// A validated workout, one variant per activity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Workout {
    Running {
        #[serde(flatten)]
        sample: WorkoutSample,
    },
    SportsWalking {
        #[serde(flatten)]
        sample: WorkoutSample,
        /// Athlete height (cm)
        height_cm: f64,
    },
    Swimming {
        #[serde(flatten)]
        sample: WorkoutSample,
        /// Pool length (meters)
        pool_length_m: f64,
        /// Number of pool lengths swum
        pool_count: u32,
    },
}

impl Workout {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Workout::Running { .. } => ActivityKind::Running,
            Workout::SportsWalking { .. } => ActivityKind::SportsWalking,
            Workout::Swimming { .. } => ActivityKind::Swimming,
        }
    }

    pub fn sample(&self) -> &WorkoutSample {
        match self {
            Workout::Running { sample }
            | Workout::SportsWalking { sample, .. }
            | Workout::Swimming { sample, .. } => sample,
        }
    }
}

/// Derived metrics for a single workout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Activity kind label
    pub training_type: ActivityKind,
    /// Duration (hours)
    pub duration_h: f64,
    /// Distance covered (km)
    pub distance_km: f64,
    /// Mean speed over the whole duration (km/h)
    pub mean_speed_kmh: f64,
    /// Calories spent (kcal)
    pub calories_kcal: f64,
}
