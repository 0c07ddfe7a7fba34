pub mod auth;
pub mod common;
pub mod exercise;
pub mod exercise_set;
pub mod report;
pub mod session;
pub mod user;
pub mod workout;
pub mod workout_exercise;
