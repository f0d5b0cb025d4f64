use serde::Serialize;
use warp::reply::Json;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    version: &'static str,
    has_gemini_token: bool,
}

/// `GET /health`. Reports whether `GEMINI_TOKEN` is set, never its value.
pub fn health() -> Json {
    let has_gemini_token = std::env::var("GEMINI_TOKEN").is_ok_and(|t| !t.trim().is_empty());
    warp::reply::json(&HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        has_gemini_token,
    })
}
