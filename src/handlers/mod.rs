pub mod auth_handler;
pub mod backend_health_handler;
pub mod error;
pub mod exercise_handler;
pub mod exercise_set_handler;
pub mod index_handler;
pub mod registration_handler;
pub mod view;
pub mod workout_exercise_handler;
pub mod workout_handler;
