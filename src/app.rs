use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/workouts",
            get(handlers::list_workouts).post(handlers::start_workout),
        )
        .route(
            "/api/workouts/:id",
            get(handlers::get_workout)
                .put(handlers::update_workout)
                .delete(handlers::delete_workout),
        )
        .route("/api/workouts/:id/end", post(handlers::end_workout))
        .route("/api/workouts/:id/exercises", post(handlers::add_exercise))
        .route(
            "/api/workouts/:id/exercises/:exercise_id/sets",
            post(handlers::add_set),
        )
        .route("/api/exercises", get(handlers::list_exercises))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .with_state(state)
}
