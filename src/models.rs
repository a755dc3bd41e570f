use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SetEntry {
    #[serde(default)]
    pub id: String,
    pub weight: f64,
    pub reps: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl SetEntry {
    pub fn new(weight: f64, reps: i64) -> Self {
        Self {
            weight,
            reps,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Exercise {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_group: String,
    pub sets: Vec<SetEntry>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: Vec<SetEntry>) -> Self {
        Self {
            name: name.into(),
            sets,
            ..Self::default()
        }
    }
}

/// A logged session. `total_sets` and `total_weight` are denormalized and
/// only refreshed by the workout manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub start_time: DateTime<Local>,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub total_sets: u32,
    #[serde(default)]
    pub total_weight: f64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    const LBS_PER_KG: f64 = 2.20462;

    pub fn convert(self, kg: f64) -> f64 {
        match self {
            Self::Kg => kg,
            Self::Lbs => kg * Self::LBS_PER_KG,
        }
    }

    pub fn format(self, kg: f64) -> String {
        format!("{:.0}{}", self.convert(kg), self.label())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub settings: Settings,
}

/// One calendar day of aggregated sets for a single exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePoint {
    pub date: String,
    pub avg_weight: f64,
    pub max_weight: f64,
    pub total_sets: u32,
    pub total_reps: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewExerciseRequest {
    pub name: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub exercise: String,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub personal_record: f64,
    pub personal_record_display: String,
    pub sessions: usize,
    pub total_sets: u32,
    pub total_reps: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub exercise: String,
    pub from: String,
    pub to: String,
    pub unit: WeightUnit,
    pub points: Vec<ExercisePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<StatsSummary>,
}
