//! Metrics calculation
//!
//! This module derives the metrics record of a validated workout:
//! - Distance from step count or pool geometry
//! - Mean speed over the full duration
//! - Calories spent, with one formula per activity kind
//!
//! Distance and speed are always derived before calories, since every calorie
//! formula consumes the mean speed.

use crate::types::{MetricsRecord, Workout, WorkoutSample};

/// Distance covered by a single step (meters)
pub const LEN_STEP_M: f64 = 0.65;
/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;

/// Running: calories per unit of mean speed
pub const RUN_SPEED_MULTIPLIER: f64 = 18.0;
/// Running: calorie speed shift
pub const RUN_SPEED_SHIFT: f64 = 1.79;

/// Sports walking: calories per kg of weight
pub const WLK_WEIGHT_MULTIPLIER: f64 = 0.035;
/// Sports walking: speed/height term multiplier
pub const WLK_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
/// km/h to m/s conversion factor
pub const KMH_IN_MSEC: f64 = 0.278;
/// Centimeters in a meter
pub const CM_IN_M: f64 = 100.0;

/// Swimming: calorie speed shift
pub const SWM_SPEED_SHIFT: f64 = 1.1;
/// Swimming: calorie weight multiplier
pub const SWM_WEIGHT_MULTIPLIER: f64 = 2.0;

/// Calculator turning workouts into metrics records
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Compute the full metrics record for a workout
    pub fn compute(workout: &Workout) -> MetricsRecord {
        let sample = workout.sample();
        let distance_km = workout_distance(workout);
        let mean_speed_kmh = mean_speed(distance_km, sample.duration_h);
        let calories_kcal = spent_calories(workout, mean_speed_kmh);

        MetricsRecord {
            training_type: workout.kind(),
            duration_h: sample.duration_h,
            distance_km,
            mean_speed_kmh,
            calories_kcal,
        }
    }
}

/// Distance in km for a step count and step length in meters
pub fn distance(action: u32, step_length_m: f64) -> f64 {
    f64::from(action) * step_length_m / M_IN_KM
}

/// Distance in km covered by swimming `pool_count` lengths of the pool
pub fn pool_distance(pool_length_m: f64, pool_count: u32) -> f64 {
    pool_length_m * f64::from(pool_count) / M_IN_KM
}

/// Mean speed in km/h; duration must be positive
pub fn mean_speed(distance_km: f64, duration_h: f64) -> f64 {
    distance_km / duration_h
}

fn workout_distance(workout: &Workout) -> f64 {
    match workout {
        Workout::Running { sample } | Workout::SportsWalking { sample, .. } => {
            distance(sample.action, LEN_STEP_M)
        }
        // Stroke count plays no part in swimming distance
        Workout::Swimming {
            pool_length_m,
            pool_count,
            ..
        } => pool_distance(*pool_length_m, *pool_count),
    }
}

/// Calories spent for a workout at the given mean speed
pub fn spent_calories(workout: &Workout, mean_speed_kmh: f64) -> f64 {
    match workout {
        Workout::Running { sample } => running_calories(sample, mean_speed_kmh),
        Workout::SportsWalking { sample, height_cm } => {
            walking_calories(sample, mean_speed_kmh, *height_cm)
        }
        Workout::Swimming { sample, .. } => swimming_calories(sample, mean_speed_kmh),
    }
}

fn running_calories(sample: &WorkoutSample, speed_kmh: f64) -> f64 {
    (RUN_SPEED_MULTIPLIER * speed_kmh + RUN_SPEED_SHIFT) * sample.weight_kg / M_IN_KM
        * (sample.duration_h * MIN_IN_H)
}

fn walking_calories(sample: &WorkoutSample, speed_kmh: f64, height_cm: f64) -> f64 {
    let speed_ms = speed_kmh * KMH_IN_MSEC;
    let height_m = height_cm / CM_IN_M;

    (WLK_WEIGHT_MULTIPLIER * sample.weight_kg
        + (speed_ms.powi(2) / height_m) * WLK_SPEED_HEIGHT_MULTIPLIER * sample.weight_kg)
        * (sample.duration_h * MIN_IN_H)
}

fn swimming_calories(sample: &WorkoutSample, speed_kmh: f64) -> f64 {
    (speed_kmh + SWM_SPEED_SHIFT) * SWM_WEIGHT_MULTIPLIER * sample.weight_kg * sample.duration_h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityKind;

    fn sample(action: u32, duration_h: f64, weight_kg: f64) -> WorkoutSample {
        WorkoutSample {
            action,
            duration_h,
            weight_kg,
        }
    }

    fn running(duration_h: f64, weight_kg: f64) -> Workout {
        Workout::Running {
            sample: sample(15000, duration_h, weight_kg),
        }
    }

    fn swimming(duration_h: f64, weight_kg: f64) -> Workout {
        Workout::Swimming {
            sample: sample(720, duration_h, weight_kg),
            pool_length_m: 25.0,
            pool_count: 40,
        }
    }

    fn walking(duration_h: f64, weight_kg: f64) -> Workout {
        Workout::SportsWalking {
            sample: sample(9000, duration_h, weight_kg),
            height_cm: 180.0,
        }
    }

    #[test]
    fn test_step_distance() {
        for action in [0, 1, 1000, 9000, 15000, 123_457] {
            let expected = f64::from(action) * 0.00065;
            assert!((distance(action, LEN_STEP_M) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_swimming() {
        let record = MetricsCalculator::compute(&swimming(1.0, 80.0));

        assert_eq!(record.training_type, ActivityKind::Swimming);
        // 25 m * 40 laps = 1 km, stroke count ignored
        assert!((record.distance_km - 1.0).abs() < 1e-9);
        assert!((record.mean_speed_kmh - 1.0).abs() < 1e-9);
        // (1.0 + 1.1) * 2 * 80 * 1
        assert!((record.calories_kcal - 336.0).abs() < 1e-9);
    }

    #[test]
    fn test_running() {
        let record = MetricsCalculator::compute(&running(1.0, 75.0));

        assert_eq!(record.training_type, ActivityKind::Running);
        assert!((record.distance_km - 9.75).abs() < 1e-9);
        assert!((record.mean_speed_kmh - 9.75).abs() < 1e-9);
        // (18 * 9.75 + 1.79) * 75 / 1000 * 60
        assert!((record.calories_kcal - 797.805).abs() < 1e-6);
    }

    #[test]
    fn test_sports_walking() {
        let record = MetricsCalculator::compute(&walking(1.0, 75.0));

        assert_eq!(record.training_type, ActivityKind::SportsWalking);
        assert!((record.distance_km - 5.85).abs() < 1e-9);
        assert!((record.mean_speed_kmh - 5.85).abs() < 1e-9);
        assert!((record.calories_kcal - 349.251_747_525).abs() < 1e-6);
    }

    #[test]
    fn test_speed_scales_with_duration() {
        let record = MetricsCalculator::compute(&running(2.0, 75.0));

        assert!((record.distance_km - 9.75).abs() < 1e-9);
        assert!((record.mean_speed_kmh - 4.875).abs() < 1e-9);
    }

    #[test]
    fn test_calories_increase_with_weight() {
        for build in [running, swimming, walking] {
            let light = spent_calories(&build(1.0, 60.0), 8.0);
            let heavy = spent_calories(&build(1.0, 90.0), 8.0);
            assert!(heavy > light);
        }
    }

    #[test]
    fn test_calories_increase_with_duration() {
        for build in [running, swimming, walking] {
            let short = spent_calories(&build(0.5, 75.0), 8.0);
            let long = spent_calories(&build(1.5, 75.0), 8.0);
            assert!(long > short);
        }
    }
}
