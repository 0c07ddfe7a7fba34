use actix_web::HttpResponse;
use serde_json::json;

use crate::handlers::view::render;

pub async fn index() -> HttpResponse {
    render("index", json!({}))
}
