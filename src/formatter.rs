//! Summary formatting
//!
//! This module renders metrics records into the fixed one-line training
//! summary. Field order, units, punctuation and the 3-decimal precision are
//! part of the output contract.

use serde::Serialize;

use crate::types::MetricsRecord;

/// Language of the rendered summary line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLocale {
    #[default]
    En,
    Ru,
}

/// Formatter producing summary lines
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryFormatter {
    locale: MessageLocale,
}

impl SummaryFormatter {
    /// Create a formatter with the default (English) template
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter for a specific locale
    pub fn with_locale(locale: MessageLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> MessageLocale {
        self.locale
    }

    /// Render a metrics record as a single summary line
    pub fn render(&self, record: &MetricsRecord) -> String {
        let MetricsRecord {
            training_type,
            duration_h,
            distance_km,
            mean_speed_kmh,
            calories_kcal,
        } = record;

        match self.locale {
            MessageLocale::En => format!(
                "Training type: {training_type}; \
                 Duration: {duration_h:.3} h.; \
                 Distance: {distance_km:.3} km; \
                 Mean speed: {mean_speed_kmh:.3} km/h; \
                 Calories spent: {calories_kcal:.3}."
            ),
            MessageLocale::Ru => format!(
                "Тип тренировки: {training_type}; \
                 Длительность: {duration_h:.3} ч.; \
                 Дистанция: {distance_km:.3} км; \
                 Ср. скорость: {mean_speed_kmh:.3} км/ч; \
                 Потрачено ккал: {calories_kcal:.3}."
            ),
        }
    }
}
