use crate::catalog::{MUSCLE_GROUPS, MuscleGroup};
use crate::errors::AppError;
use crate::models::{
    NewExerciseRequest, Settings, StatsQuery, StatsResponse, Workout, WorkoutListQuery,
};
use crate::range::{DateRange, RangePreset, today};
use crate::state::{AppState, Store};
use crate::stats::{date_key, exercise_stats_in, summarize};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(
        &store.data.exercise_names(),
        &store.data.settings,
    ))
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Query(query): Query<WorkoutListQuery>,
) -> Result<Json<Vec<Workout>>, AppError> {
    let store = state.store.lock().await;
    let workouts = match query.status.as_deref() {
        None | Some("completed") => store.data.history(),
        Some("active") => store.data.active(),
        Some(other) => {
            return Err(AppError::bad_request(format!(
                "status must be 'active' or 'completed', got '{other}'"
            )));
        }
    };
    Ok(Json(workouts))
}

pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Workout>, AppError> {
    let store = state.store.lock().await;
    store
        .data
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::workout_not_found(&id))
}

pub async fn start_workout(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Workout>), AppError> {
    let workout = mutate(&state, |store| Ok(store.data.start_workout(Local::now()))).await?;
    info!(workout = %workout.id, "workout started");
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(workout): Json<Workout>,
) -> Result<Json<Workout>, AppError> {
    if workout.id != id {
        return Err(AppError::bad_request("workout id does not match path"));
    }
    let updated = mutate(&state, |store| store.data.update_workout(workout)).await?;
    Ok(Json(updated))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    mutate(&state, |store| store.data.delete_workout(&id)).await?;
    info!(workout = %id, "workout deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewExerciseRequest>,
) -> Result<Json<Workout>, AppError> {
    let updated = mutate(&state, |store| {
        store
            .data
            .add_exercise(&id, &payload.name, payload.muscle_group.as_deref())
    })
    .await?;
    Ok(Json(updated))
}

pub async fn add_set(
    State(state): State<AppState>,
    Path((id, exercise_id)): Path<(String, String)>,
) -> Result<Json<Workout>, AppError> {
    let updated = mutate(&state, |store| store.data.add_set(&id, &exercise_id)).await?;
    Ok(Json(updated))
}

pub async fn end_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Workout>, AppError> {
    let ended = mutate(&state, |store| store.data.end_workout(&id, Local::now())).await?;
    info!(workout = %ended.id, duration = ended.duration, sets = ended.total_sets, "workout ended");
    Ok(Json(ended))
}

pub async fn list_exercises(State(state): State<AppState>) -> Json<Vec<String>> {
    let store = state.store.lock().await;
    Json(store.data.exercise_names())
}

pub async fn get_catalog() -> Json<&'static [MuscleGroup]> {
    Json(MUSCLE_GROUPS)
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let store = state.store.lock().await;
    let range = resolve_range(&query, today(), store.data.earliest_workout_date())?;
    let exercise = query.exercise.trim();
    let unit = store.data.settings.weight_unit;

    let points = state
        .stats_cache
        .lock()
        .await
        .get_or_compute(store.version, exercise, range, || {
            exercise_stats_in(&store.data.completed_workouts(), exercise, range)
        });

    Ok(Json(StatsResponse {
        exercise: exercise.to_string(),
        from: date_key(range.from),
        to: date_key(range.to),
        unit,
        summary: summarize(&points, unit),
        points: (*points).clone(),
    }))
}

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    let store = state.store.lock().await;
    Json(store.data.settings.clone())
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, AppError> {
    let mut store = state.store.lock().await;
    store.data.settings = settings;
    persist_data(&state.data_path, &store.data).await?;
    Ok(Json(store.data.settings.clone()))
}

/// Applies an edit under the store lock, bumps the history version and
/// persists before returning.
async fn mutate<T>(
    state: &AppState,
    edit: impl FnOnce(&mut Store) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut store = state.store.lock().await;
    let result = edit(&mut *store)?;
    store.touch();
    persist_data(&state.data_path, &store.data).await?;
    Ok(result)
}

fn resolve_range(
    query: &StatsQuery,
    today: NaiveDate,
    earliest: Option<NaiveDate>,
) -> Result<DateRange, AppError> {
    match query.preset.as_deref() {
        Some(preset) => {
            let preset: RangePreset = preset.parse().map_err(AppError::bad_request)?;
            Ok(preset.resolve(today, earliest))
        }
        None if query.from.is_none() && query.to.is_none() => {
            Ok(RangePreset::Month.resolve(today, earliest))
        }
        None => DateRange::parse(query.from.as_deref(), query.to.as_deref(), today)
            .map_err(AppError::bad_request),
    }
}
