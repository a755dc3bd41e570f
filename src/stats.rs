use crate::models::{ExercisePoint, StatsSummary, WeightUnit, Workout};
use crate::range::{DateRange, local_date};
use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct DayAccumulator {
    weight_sum: f64,
    max_weight: Option<f64>,
    sets: u32,
    reps: i64,
}

impl DayAccumulator {
    fn push(&mut self, weight: f64, reps: i64) {
        self.weight_sum += weight;
        self.max_weight = Some(self.max_weight.map_or(weight, |max| max.max(weight)));
        self.sets += 1;
        self.reps += reps;
    }

    fn into_point(self, date: NaiveDate) -> ExercisePoint {
        ExercisePoint {
            date: date_key(date),
            avg_weight: round_one_decimal(self.weight_sum / f64::from(self.sets)),
            max_weight: self.max_weight.unwrap_or_default(),
            total_sets: self.sets,
            total_reps: self.reps,
        }
    }
}

/// Per-day statistics for `exercise_name` between the calendar dates of
/// `from` and `to`, inclusive.
pub fn exercise_stats(
    workouts: &[Workout],
    exercise_name: &str,
    from: DateTime<Local>,
    to: DateTime<Local>,
) -> Vec<ExercisePoint> {
    exercise_stats_in(workouts, exercise_name, DateRange::between(&from, &to))
}

pub fn exercise_stats_in(
    workouts: &[Workout],
    exercise_name: &str,
    range: DateRange,
) -> Vec<ExercisePoint> {
    if exercise_name.is_empty() || workouts.is_empty() {
        return Vec::new();
    }

    let target = exercise_name.to_lowercase();
    debug!(
        exercise = exercise_name,
        workouts = workouts.len(),
        from = %range.from,
        to = %range.to,
        "aggregating exercise stats"
    );

    // Keyed by date so iteration is already chronological.
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for workout in workouts {
        let day = local_date(&workout.start_time);
        if !range.contains(day) {
            trace!(workout = %workout.id, %day, "outside range");
            continue;
        }

        for exercise in workout
            .exercises
            .iter()
            .filter(|exercise| exercise.name.to_lowercase() == target)
        {
            for set in exercise.sets.iter().filter(|set| set.weight > 0.0) {
                days.entry(day).or_default().push(set.weight, set.reps);
            }
        }
    }

    let points: Vec<ExercisePoint> = days
        .into_iter()
        .map(|(date, acc)| acc.into_point(date))
        .collect();
    debug!(exercise = exercise_name, points = points.len(), "exercise stats ready");
    points
}

/// Totals across a series. `None` for an empty series so callers can show
/// a placeholder.
pub fn summarize(points: &[ExercisePoint], unit: WeightUnit) -> Option<StatsSummary> {
    let personal_record = points
        .iter()
        .map(|point| point.max_weight)
        .reduce(f64::max)?;

    Some(StatsSummary {
        personal_record,
        personal_record_display: unit.format(personal_record),
        sessions: points.len(),
        total_sets: points.iter().map(|point| point.total_sets).sum(),
        total_reps: points.iter().map(|point| point.total_reps).sum(),
    })
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
