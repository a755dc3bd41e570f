//! Editing operations over the stored workout log.

use crate::catalog::muscle_group_of;
use crate::errors::AppError;
use crate::models::{AppData, Exercise, SetEntry, Workout};
use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeMap;

impl AppData {
    pub fn start_workout(&mut self, now: DateTime<Local>) -> Workout {
        let workout = Workout {
            id: self.unique_id(now.timestamp_millis()),
            start_time: now,
            duration: 0,
            total_sets: 0,
            total_weight: 0.0,
            is_active: true,
            exercises: Vec::new(),
        };
        self.workouts.push(workout.clone());
        workout
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Workout, AppError> {
        self.workouts
            .iter_mut()
            .find(|workout| workout.id == id)
            .ok_or_else(|| AppError::workout_not_found(id))
    }

    /// Appends an exercise seeded with one empty set.
    pub fn add_exercise(
        &mut self,
        id: &str,
        name: &str,
        muscle_group: Option<&str>,
    ) -> Result<Workout, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("exercise name must not be empty"));
        }

        let muscle_group = match muscle_group {
            Some(group) => group.to_string(),
            None => muscle_group_of(name)
                .map(|group| group.name.to_string())
                .unwrap_or_default(),
        };

        let workout = self.find_mut(id)?;
        let seed = workout.next_child_id();
        workout.exercises.push(Exercise {
            id: seed.clone(),
            name: name.to_string(),
            muscle_group,
            sets: vec![SetEntry {
                id: format!("{seed}-1"),
                ..SetEntry::default()
            }],
        });
        workout.refresh_totals();
        Ok(workout.clone())
    }

    /// Appends a set that repeats the exercise's last weight and reps.
    pub fn add_set(&mut self, id: &str, exercise_id: &str) -> Result<Workout, AppError> {
        let workout = self.find_mut(id)?;
        let exercise = workout
            .exercises
            .iter_mut()
            .find(|exercise| exercise.id == exercise_id)
            .ok_or_else(|| AppError::not_found(format!("exercise {exercise_id} not found")))?;

        let (weight, reps) = exercise
            .sets
            .last()
            .map_or((0.0, 0), |set| (set.weight, set.reps));
        let set_id = next_child_id(&exercise.id, exercise.sets.iter().map(|set| set.id.as_str()));
        exercise.sets.push(SetEntry {
            id: set_id,
            weight,
            reps,
            ..SetEntry::default()
        });

        workout.refresh_totals();
        Ok(workout.clone())
    }

    pub fn update_workout(&mut self, mut updated: Workout) -> Result<Workout, AppError> {
        let existing = self.find_mut(&updated.id)?;
        updated.refresh_totals();
        *existing = updated;
        Ok(existing.clone())
    }

    pub fn end_workout(&mut self, id: &str, now: DateTime<Local>) -> Result<Workout, AppError> {
        let workout = self.find_mut(id)?;
        if !workout.is_active {
            return Err(AppError::bad_request(format!("workout {id} already ended")));
        }
        workout.duration = (now - workout.start_time).num_seconds().max(0) as u64;
        workout.is_active = false;
        workout.refresh_totals();
        Ok(workout.clone())
    }

    pub fn delete_workout(&mut self, id: &str) -> Result<(), AppError> {
        let before = self.workouts.len();
        self.workouts.retain(|workout| workout.id != id);
        if self.workouts.len() == before {
            return Err(AppError::workout_not_found(id));
        }
        Ok(())
    }

    /// Completed workouts, newest first.
    pub fn history(&self) -> Vec<Workout> {
        self.sorted(|workout| !workout.is_active)
    }

    pub fn active(&self) -> Vec<Workout> {
        self.sorted(|workout| workout.is_active)
    }

    pub fn completed_workouts(&self) -> Vec<Workout> {
        self.workouts
            .iter()
            .filter(|workout| !workout.is_active)
            .cloned()
            .collect()
    }

    /// First day of the completed history, the same set `/api/stats` reads.
    pub fn earliest_workout_date(&self) -> Option<NaiveDate> {
        self.workouts
            .iter()
            .filter(|workout| !workout.is_active)
            .map(|workout| workout.start_time.date_naive())
            .min()
    }

    /// Distinct exercise names across the whole log. The first spelling seen
    /// wins when names differ only by case.
    pub fn exercise_names(&self) -> Vec<String> {
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for exercise in self.workouts.iter().flat_map(|workout| &workout.exercises) {
            names
                .entry(exercise.name.to_lowercase())
                .or_insert_with(|| exercise.name.clone());
        }
        names.into_values().collect()
    }

    fn sorted(&self, keep: impl Fn(&Workout) -> bool) -> Vec<Workout> {
        let mut workouts: Vec<Workout> = self.workouts.iter().filter(|w| keep(*w)).cloned().collect();
        workouts.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        workouts
    }

    fn unique_id(&self, millis: i64) -> String {
        let mut candidate = millis;
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl Workout {
    pub fn refresh_totals(&mut self) {
        self.total_sets = self
            .exercises
            .iter()
            .map(|exercise| exercise.sets.len() as u32)
            .sum();
        self.total_weight = self
            .exercises
            .iter()
            .flat_map(|exercise| &exercise.sets)
            .map(|set| set.weight * set.reps as f64)
            .sum();
    }

    fn next_child_id(&self) -> String {
        next_child_id(
            &self.id,
            self.exercises.iter().map(|exercise| exercise.id.as_str()),
        )
    }
}

/// `{parent}-{n}` where `n` is one past the highest suffix among `siblings`,
/// so ids stay unique after children are removed.
fn next_child_id<'a>(parent: &str, siblings: impl Iterator<Item = &'a str>) -> String {
    let prefix = format!("{parent}-");
    let highest = siblings
        .filter_map(|id| id.strip_prefix(&prefix)?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{}", highest + 1)
}
