//! Static topic catalog served to the setup screen, grouped by category.

use axum::Json;
use serde_json::{json, Value};

/// GET /api/topics
/// Returns `{category: [topic, ...]}`.
pub async fn topics_handler() -> Json<Value> {
    Json(json!({
        "Programming": ["Python", "JavaScript", "Java", "C++"],
        "Computer Science": [
            "Data Structures",
            "Algorithms",
            "Operating Systems",
            "Computer Networks",
            "DBMS"
        ],
        "Web Development": ["Frontend", "Backend", "REST APIs"],
        "Databases": ["SQL", "MongoDB"]
    }))
}
