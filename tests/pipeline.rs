//! End-to-end checks of the public API

use pretty_assertions::assert_eq;
use workout_flux::{
    compute_metrics, package_to_summary, read_package, MessageLocale, SensorPackage,
    SummaryFormatter, WorkoutError, WorkoutProcessor,
};

#[test]
fn swimming_distance_ignores_stroke_count() {
    let few_strokes = compute_metrics("SWM", &[100.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
    let many_strokes = compute_metrics("SWM", &[5000.0, 1.0, 80.0, 25.0, 40.0]).unwrap();

    assert!((few_strokes.distance_km - 1.0).abs() < 1e-9);
    assert_eq!(few_strokes, many_strokes);
}

#[test]
fn formatted_record_keeps_field_values() {
    let record = compute_metrics("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();
    let line = SummaryFormatter::new().render(&record);

    assert!(line.contains(&format!("Duration: {:.3} h.", record.duration_h)));
    assert!(line.contains(&format!("Distance: {:.3} km", record.distance_km)));
    assert!(line.contains(&format!("Mean speed: {:.3} km/h", record.mean_speed_kmh)));
    assert!(line.contains(&format!("Calories spent: {:.3}.", record.calories_kcal)));
}

#[test]
fn running_summary_line() {
    let line = package_to_summary("RUN", &[15000.0, 1.0, 75.0]).unwrap();

    assert_eq!(
        line,
        "Training type: Running; Duration: 1.000 h.; Distance: 9.750 km; \
         Mean speed: 9.750 km/h; Calories spent: 797.805."
    );
}

#[test]
fn unknown_tag_is_rejected_before_arity() {
    let result = read_package("XYZ", &[]);
    assert!(matches!(result, Err(WorkoutError::UnknownKind(ref tag)) if tag == "XYZ"));
}

#[test]
fn ndjson_batch_in_russian() {
    let input = "[\"SWM\", [720, 1, 80, 25, 40]]\n[\"WLK\", [9000, 1, 75, 180]]\n";
    let packages = SensorPackage::parse_ndjson(input).unwrap();

    let report = WorkoutProcessor::new()
        .with_locale(MessageLocale::Ru)
        .process(&packages)
        .unwrap();
    let lines: Vec<&str> = report.summaries().collect();

    assert_eq!(
        lines,
        vec![
            "Тип тренировки: Swimming; Длительность: 1.000 ч.; Дистанция: 1.000 км; \
             Ср. скорость: 1.000 км/ч; Потрачено ккал: 336.000.",
            "Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; \
             Ср. скорость: 5.850 км/ч; Потрачено ккал: 349.252.",
        ]
    );
}

#[test]
fn records_can_be_computed_on_other_threads() {
    let handles: Vec<_> = [15000.0, 20000.0, 25000.0]
        .into_iter()
        .map(|steps| std::thread::spawn(move || compute_metrics("RUN", &[steps, 1.0, 75.0])))
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}
