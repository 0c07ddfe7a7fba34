use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod exercises;
pub mod index;
pub mod registration;
pub mod workout_exercises;
pub mod workouts;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login)
        .service(index::index);

    // Workout routes (require authentication)
    cfg.service(
        web::scope("/workouts")
            .wrap(AuthMiddleware)
            .service(workouts::workout_list)
            .service(workouts::add_workout_form)
            .service(workouts::add_workout)
            .service(workouts::edit_workout_form)
            .service(workouts::edit_workout)
            .service(workouts::delete_workout)
            .service(workouts::add_workout_exercise)
            .service(workouts::update_workout_exercises)
            .service(workouts::delete_workout_exercise)
    );
    // Set logging routes (require authentication)
    cfg.service(
        web::scope("/workout_exercises")
            .wrap(AuthMiddleware)
            .service(workout_exercises::edit_workout_exercise_form)
            .service(workout_exercises::edit_workout_exercise)
            .service(workout_exercises::add_exercise_set)
            .service(workout_exercises::update_exercise_sets)
            .service(workout_exercises::delete_exercise_set)
    );
    // Exercise routes (require authentication)
    cfg.service(
        web::scope("/exercises")
            .wrap(AuthMiddleware)
            .service(exercises::exercise_list)
            .service(exercises::add_exercise)
            // before "/{id}" routes
            .service(exercises::edit_exercise)
            .service(exercises::edit_exercise_form)
            .service(exercises::delete_exercise)
    );
}
