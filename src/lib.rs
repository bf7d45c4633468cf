//! Workout Flux - Derived workout metrics from raw sensor packages
//!
//! Flux turns a raw sensor package (a workout tag plus positional values) into
//! a metrics record and a one-line training summary through a deterministic
//! pipeline: package dispatch → metrics calculation → summary formatting.
//!
//! ## Activity kinds
//!
//! - **Running** (`RUN`): step-based distance, speed-driven calorie formula
//! - **Sports walking** (`WLK`): step-based distance, calories scaled by height
//! - **Swimming** (`SWM`): distance from pool geometry

pub mod calculator;
pub mod error;
pub mod formatter;
pub mod package;
pub mod pipeline;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use error::WorkoutError;
pub use formatter::{MessageLocale, SummaryFormatter};
pub use package::{read_package, SensorPackage};
pub use pipeline::{
    compute_metrics, package_to_summary, packages_to_summaries, BatchReport, WorkoutProcessor,
};
pub use types::{ActivityKind, MetricsRecord, Workout};

/// Flux version
pub const FLUX_VERSION: &str = env!("CARGO_PKG_VERSION");
