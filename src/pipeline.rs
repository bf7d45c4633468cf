//! Pipeline orchestration
//!
//! This module provides the public API for Workout Flux.
//! It wires the stages together: package dispatch → metrics calculation →
//! summary formatting.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculator::MetricsCalculator;
use crate::error::WorkoutError;
use crate::formatter::{MessageLocale, SummaryFormatter};
use crate::package::{read_package, SensorPackage};
use crate::types::MetricsRecord;

/// Compute the metrics record for one raw package.
///
/// # Example
/// ```
/// let record = workout_flux::compute_metrics("RUN", &[15000.0, 1.0, 75.0]).unwrap();
/// assert!((record.distance_km - 9.75).abs() < 1e-9);
/// ```
pub fn compute_metrics(workout_type: &str, data: &[f64]) -> Result<MetricsRecord, WorkoutError> {
    let workout = read_package(workout_type, data)?;
    let record = MetricsCalculator::compute(&workout);

    // Positive inputs can still overflow, e.g. a subnormal duration
    let derived = [
        record.distance_km,
        record.mean_speed_kmh,
        record.calories_kcal,
    ];
    if derived.iter().any(|v| !v.is_finite()) {
        return Err(WorkoutError::InvalidInput(format!(
            "{} metrics are not finite for duration {} h",
            record.training_type, record.duration_h
        )));
    }

    debug!(
        training_type = %record.training_type,
        distance_km = record.distance_km,
        calories_kcal = record.calories_kcal,
        "computed workout metrics"
    );
    Ok(record)
}

/// Convert one raw package to its English summary line.
///
/// # Example
/// ```
/// let line = workout_flux::package_to_summary("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
/// assert!(line.ends_with("Calories spent: 336.000."));
/// ```
pub fn package_to_summary(workout_type: &str, data: &[f64]) -> Result<String, WorkoutError> {
    let record = compute_metrics(workout_type, data)?;
    Ok(SummaryFormatter::new().render(&record))
}

/// Convert a JSON array of packages to English summary lines, failing on the
/// first invalid package.
pub fn packages_to_summaries(json: &str) -> Result<Vec<String>, WorkoutError> {
    let packages = SensorPackage::parse_array(json)?;
    let report = WorkoutProcessor::new().process(&packages)?;
    Ok(report.summaries().map(str::to_string).collect())
}

/// A package the processor computed
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedWorkout {
    /// Position of the package in the input
    pub index: usize,
    pub record: MetricsRecord,
    pub summary: String,
}

/// A package the processor rejected in lenient mode
#[derive(Debug, Clone, Serialize)]
pub struct RejectedPackage {
    /// Position of the package in the input
    pub index: usize,
    pub workout_type: String,
    pub error: String,
}

/// Outcome of processing a batch of packages
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<ProcessedWorkout>,
    pub rejected: Vec<RejectedPackage>,
}

impl BatchReport {
    /// Summary lines in input order
    pub fn summaries(&self) -> impl Iterator<Item = &str> {
        self.processed.iter().map(|p| p.summary.as_str())
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Batch processor for many sensor packages.
///
/// Strict processors stop at the first invalid package; lenient ones record the
/// rejection and keep going.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutProcessor {
    formatter: SummaryFormatter,
    strict: bool,
}

impl Default for WorkoutProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutProcessor {
    /// Create a strict processor with English summaries
    pub fn new() -> Self {
        Self {
            formatter: SummaryFormatter::new(),
            strict: true,
        }
    }

    /// Render summaries in the given locale
    pub fn with_locale(mut self, locale: MessageLocale) -> Self {
        self.formatter = SummaryFormatter::with_locale(locale);
        self
    }

    /// Keep going after invalid packages instead of failing the batch
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Process a single package
    pub fn process_one(
        &self,
        package: &SensorPackage,
    ) -> Result<(MetricsRecord, String), WorkoutError> {
        let record = compute_metrics(&package.workout_type, &package.data)?;
        let summary = self.formatter.render(&record);
        Ok((record, summary))
    }

    /// Process packages in order
    pub fn process(&self, packages: &[SensorPackage]) -> Result<BatchReport, WorkoutError> {
        let mut report = BatchReport::default();

        for (index, package) in packages.iter().enumerate() {
            match self.process_one(package) {
                Ok((record, summary)) => report.processed.push(ProcessedWorkout {
                    index,
                    record,
                    summary,
                }),
                Err(e) if !self.strict => {
                    warn!(
                        index,
                        workout_type = %package.workout_type,
                        error = %e,
                        "rejected package"
                    );
                    report.rejected.push(RejectedPackage {
                        index,
                        workout_type: package.workout_type.clone(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            processed = report.processed.len(),
            rejected = report.rejected.len(),
            "processed workout batch"
        );

        Ok(report)
    }
}
