pub mod app;
pub mod cache;
pub mod catalog;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod range;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod workouts;

pub use app::router;
pub use models::{ExercisePoint, Workout};
pub use state::AppState;
pub use stats::{exercise_stats, exercise_stats_in};
pub use storage::{load_data, resolve_data_path};
