//! Textual summaries of the workouts shown in the workout list.
//!
//! Reports are never stored. They are rebuilt from the sets on every listing, so they always
//! reflect the latest edits.

use std::collections::HashMap;

use sqlx::SqliteConnection;

use crate::db::{exercise_sets, workout_exercises, workouts, StoreResult};
use crate::models::exercise::ExerciseKind;
use crate::models::exercise_set::ExerciseSet;
use crate::models::report::{ExerciseReport, WorkoutReport};
use crate::models::workout::Workout;
use crate::models::workout_exercise::WorkoutExerciseDetail;

type SetFormatter = fn(&ExerciseSet) -> String;

impl ExerciseKind {
    /// How a single set of this kind reads in a report.
    pub fn set_formatter(&self) -> SetFormatter {
        match self {
            ExerciseKind::Strength => format_strength_set,
            ExerciseKind::CardioRepetitions => format_repetitions_set,
            ExerciseKind::CardioDistance => format_distance_set,
        }
    }
}

fn format_strength_set(set: &ExerciseSet) -> String {
    format!("{} x {} kg  ", set.reps, set.weight)
}

fn format_repetitions_set(set: &ExerciseSet) -> String {
    format!("{} in {}     ", set.reps, set.time)
}

fn format_distance_set(set: &ExerciseSet) -> String {
    format!("{} in {}   ", format_distance(set.distance), set.time)
}

/// Whole distances keep one decimal (`5.0`), others print as they are (`5.25`).
pub fn format_distance(distance: f64) -> String {
    if distance.fract() == 0.0 {
        format!("{:.1}", distance)
    } else {
        format!("{}", distance)
    }
}

/// `"<name>:"` followed by one fragment per set, in the given order.
pub fn summarize_exercise(name: &str, kind: ExerciseKind, sets: &[ExerciseSet]) -> String {
    let formatter = kind.set_formatter();
    sets.iter().fold(format!("{}:", name), |mut report, set| {
        report.push_str(&formatter(set));
        report
    })
}

/// Reports of all workouts of a user, newest workout first.
#[tracing::instrument(name = "Generate workout reports", skip(conn))]
pub async fn generate_reports(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Vec<WorkoutReport>> {
    let workouts = workouts::list_workouts(conn, user_id).await?;
    let details = workout_exercises::list_for_user(conn, user_id).await?;
    let sets = exercise_sets::list_for_user(conn, user_id).await?;

    Ok(build_reports(workouts, details, sets))
}

fn build_reports(
    workouts: Vec<Workout>,
    details: Vec<WorkoutExerciseDetail>,
    sets: Vec<ExerciseSet>,
) -> Vec<WorkoutReport> {
    // both lists arrive in ascending id order, which grouping preserves
    let mut sets_by_exercise: HashMap<i64, Vec<ExerciseSet>> = HashMap::new();
    for set in sets {
        sets_by_exercise.entry(set.workout_exercise_id).or_default().push(set);
    }

    let mut reports_by_workout: HashMap<i64, Vec<ExerciseReport>> = HashMap::new();
    for detail in details {
        let sets = sets_by_exercise.remove(&detail.id).unwrap_or_default();
        let report = summarize_exercise(&detail.exercise_name, detail.kind(), &sets);
        reports_by_workout
            .entry(detail.workout_id)
            .or_default()
            .push(ExerciseReport {
                workout_exercise_id: detail.id,
                report,
            });
    }

    workouts
        .into_iter()
        .map(|workout| WorkoutReport {
            exercise_reports: reports_by_workout.remove(&workout.id).unwrap_or_default(),
            workout_id: workout.id,
            name: workout.name,
            date: workout.date,
        })
        .collect()
}
