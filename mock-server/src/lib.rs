use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graded_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct FormQuery {
    pub id: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, Grade>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/grades", get(list_grades).post(add_grade))
        .route("/grades/form", get(get_form))
        .route("/grades/{id}", get(get_grade))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_grades(State(db): State<Db>) -> Json<Vec<Grade>> {
    let grades = db.read().await;
    Json(grades.values().cloned().collect())
}

/// Stores the grade under a fresh id and answers with that id as plain text.
async fn add_grade(State(db): State<Db>, Json(input): Json<Grade>) -> (StatusCode, String) {
    let id = Uuid::new_v4().to_string();
    let grade = Grade {
        id: Some(id.clone()),
        ..input
    };
    log::info!("stored grade {id}");
    db.write().await.insert(id.clone(), grade);
    (StatusCode::CREATED, id)
}

async fn get_form(
    State(db): State<Db>,
    Query(query): Query<FormQuery>,
) -> Result<String, StatusCode> {
    let Some(id) = query.id else {
        return Ok("new grade form".to_string());
    };
    let grades = db.read().await;
    let grade = grades.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    log::debug!("rendering edit form for grade {id}");
    Ok(format!(
        "edit grade form for {id}: course={} score={}",
        grade.course.as_deref().unwrap_or(""),
        grade.score.map(|s| s.to_string()).unwrap_or_default()
    ))
}

async fn get_grade(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Grade>, StatusCode> {
    let grades = db.read().await;
    grades.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
