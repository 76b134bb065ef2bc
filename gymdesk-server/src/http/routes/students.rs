//! Student JSON endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use gymdesk_core::{Student, StudentDraft, StudentId};
use serde::Deserialize;

use crate::db::StudentRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Create/update student request
#[derive(Debug, Deserialize)]
pub struct StudentRequest {
    #[serde(default)]
    pub name: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub national_id: String,
}

impl StudentRequest {
    fn into_draft(self) -> Result<StudentDraft, ApiError> {
        Ok(StudentDraft::parse(
            &self.name,
            &self.birth_date,
            &self.national_id,
        )?)
    }
}

/// GET /api/students - every student in storage order
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = StudentRepo::new(&state.db).list_all().await?;
    Ok(Json(students))
}

/// POST /api/students - register a student
async fn create_student(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StudentRequest>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let draft = req.into_draft()?;
    let student = StudentRepo::new(&state.db).create(draft).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/students/{id} - a single student
async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, ApiError> {
    let student = StudentRepo::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "student",
            id: id.to_string(),
        })?;

    Ok(Json(student))
}

/// PUT /api/students/{id} - overwrite a student's fields
async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<StudentId>,
    Json(req): Json<StudentRequest>,
) -> Result<Json<Student>, ApiError> {
    let draft = req.into_draft()?;
    let student = StudentRepo::new(&state.db).update(id, draft).await?;

    Ok(Json(student))
}

/// DELETE /api/students/{id} - remove a student
async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, ApiError> {
    StudentRepo::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Student API routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/students", get(list_students).post(create_student))
        .route(
            "/api/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_schema, Database};
    use crate::http::server::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    async fn app() -> (TempDir, Router) {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("academia.db"));
        ensure_schema(&db).await.unwrap();
        (dir, build_router(AppState::new(db)))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_then_get() {
        let (_dir, app) = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/students",
                r#"{"name": "Ana Silva", "birth_date": "2001-05-10", "national_id": "111.111.111-11"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["id"], 1);

        let response = app
            .oneshot(Request::builder().uri("/api/students/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["name"], "Ana Silva");
        assert_eq!(fetched["birth_date"], "2001-05-10");
        assert_eq!(fetched["national_id"], "111.111.111-11");
    }

    #[tokio::test]
    async fn create_with_missing_field_is_400() {
        let (_dir, app) = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/students",
                r#"{"name": "Ana", "birth_date": "2001-05-10"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "validation_error");

        let response = app
            .oneshot(Request::builder().uri("/api/students").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_404() {
        let (_dir, app) = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/students/5",
                r#"{"name": "Ana", "birth_date": "2001-05-10", "national_id": "1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/students/5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_then_delete() {
        let (_dir, app) = app().await;
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/students",
                r#"{"name": "Ana", "birth_date": "2001-05-10", "national_id": "1"}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/students/1",
                r#"{"name": "Ana Souza", "birth_date": "2001-05-10", "national_id": "1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Ana Souza");

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/students/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
