use axum::Json;
use rand::Rng;
use serde_json::{json, Value};
use std::time::Duration;

/// Suspend the request for a uniformly random delay in [0.1, 0.5] seconds.
///
/// The sleep is cooperative; other in-flight requests keep making progress.
/// The reported `process_time` is the sampled delay itself, not a
/// re-measured elapsed time.
pub async fn random_sleep() -> Json<Value> {
    let process_time: f64 = rand::thread_rng().gen_range(0.1..=0.5);
    tokio::time::sleep(Duration::from_secs_f64(process_time)).await;

    Json(json!({
        "process_time": process_time
    }))
}
