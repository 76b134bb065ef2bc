//! Front-desk page and its form posts
//!
//! Each request performs at most one write, then re-reads the whole table
//! and renders the page. Successful writes answer with a 303 redirect so a
//! browser refresh never repeats them; the confirmation travels in the
//! query string.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{Local, NaiveDate};
use gymdesk_core::{StudentId, ValidationError};
use serde::Deserialize;

use crate::db::StudentRepo;
use crate::http::server::AppState;
use crate::views::{self, Flash, FormValues, Notice, PageModel, Tab};

/// Query string of `GET /`.
///
/// Kept as raw text so a hand-edited URL still renders the page: an
/// unparsable `selected` means no selection, an unknown `tab` the update tab.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub selected: Option<String>,
    pub tab: Option<String>,
    pub notice: Option<String>,
    pub name: Option<String>,
}

impl PageParams {
    pub fn selected(&self) -> Option<StudentId> {
        self.selected.as_deref().and_then(|s| s.trim().parse().ok())
    }

    pub fn tab(&self) -> Tab {
        self.tab.as_deref().map(Tab::from_param).unwrap_or_default()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_param)
    }
}

/// Body of `POST /students/{id}/delete`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

impl DeleteForm {
    /// Only the value the delete tab posts counts as confirmation.
    pub fn confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("true")
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Where to send the browser after a successful write
fn notice_url(selected: Option<StudentId>, notice: Notice, name: &str) -> String {
    let mut url = String::from("/?");
    if let Some(id) = selected {
        url.push_str(&format!("selected={}&", id));
    }
    url.push_str(&format!(
        "notice={}&name={}",
        notice.as_str(),
        urlencoding::encode(name)
    ));
    url
}

fn validation_flash(err: &ValidationError) -> Flash {
    if err.is_missing() {
        Flash::warning().text("Please fill in all fields.")
    } else {
        Flash::warning().text(format!("Please check the form: {}.", err))
    }
}

fn not_found_flash(id: StudentId) -> Flash {
    Flash::warning().text(format!("Student {} no longer exists.", id))
}

/// Re-read the table and render the page with `status`.
async fn render_page(state: &AppState, mut status: StatusCode, mut model: PageModel) -> Response {
    match StudentRepo::new(&state.db).list_all().await {
        Ok(students) => model.students = students,
        Err(e) => {
            tracing::error!(error = %e, "failed to list students");
            model
                .manage_flashes
                .push(Flash::error().text(format!("Failed to load students: {}", e)));
            status = StatusCode::INTERNAL_SERVER_ERROR;
        }
    }

    (status, Html(views::render(&model))).into_response()
}

/// GET / - the whole page
async fn index(State(state): State<Arc<AppState>>, Query(params): Query<PageParams>) -> Response {
    let mut model = PageModel::new(today());
    model.selected = params.selected();
    model.tab = params.tab();

    if let (Some(notice), Some(name)) = (params.notice(), params.name.as_deref()) {
        let flash = notice.flash(name);
        match notice {
            Notice::Created => model.create_flashes.push(flash),
            Notice::Updated | Notice::Deleted => model.manage_flashes.push(flash),
        }
    }

    render_page(&state, StatusCode::OK, model).await
}

/// POST /students - register a student from the create form
async fn create_student(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FormValues>,
) -> Response {
    let mut model = PageModel::new(today());

    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "create form rejected");
            model.create_flashes.push(validation_flash(&e));
            model.create_form = form;
            return render_page(&state, StatusCode::UNPROCESSABLE_ENTITY, model).await;
        }
    };

    match StudentRepo::new(&state.db).create(draft).await {
        Ok(student) => Redirect::to(&notice_url(None, Notice::Created, &student.name)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to insert student");
            model
                .create_flashes
                .push(Flash::error().text(format!("Failed to insert data: {}", e)));
            model.create_form = form;
            render_page(&state, StatusCode::INTERNAL_SERVER_ERROR, model).await
        }
    }
}

/// POST /students/{id}/update - overwrite a student from the update tab
async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<StudentId>,
    Form(form): Form<FormValues>,
) -> Response {
    let mut model = PageModel::new(today());
    model.selected = Some(id);
    model.tab = Tab::Update;

    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(id = %id, error = %e, "update form rejected");
            // a vanished student outranks the form problem
            if let Ok(None) = StudentRepo::new(&state.db).get(id).await {
                model.manage_flashes.push(not_found_flash(id));
                return render_page(&state, StatusCode::NOT_FOUND, model).await;
            }
            model.manage_flashes.push(validation_flash(&e));
            model.edit_form = Some(form);
            return render_page(&state, StatusCode::UNPROCESSABLE_ENTITY, model).await;
        }
    };

    match StudentRepo::new(&state.db).update(id, draft).await {
        Ok(student) => {
            Redirect::to(&notice_url(Some(id), Notice::Updated, &student.name)).into_response()
        }
        Err(e) if e.is_not_found() => {
            model.manage_flashes.push(not_found_flash(id));
            render_page(&state, StatusCode::NOT_FOUND, model).await
        }
        Err(e) => {
            tracing::error!(id = %id, error = %e, "failed to update student");
            model
                .manage_flashes
                .push(Flash::error().text(format!("Failed to update data: {}", e)));
            model.edit_form = Some(form);
            render_page(&state, StatusCode::INTERNAL_SERVER_ERROR, model).await
        }
    }
}

/// POST /students/{id}/delete - remove a student after explicit confirmation
async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<StudentId>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let mut model = PageModel::new(today());
    model.selected = Some(id);
    model.tab = Tab::Delete;

    if !form.confirmed() {
        model.manage_flashes.push(
            Flash::warning()
                .text("Press ")
                .strong("Confirm Deletion")
                .text(" to delete this student."),
        );
        return render_page(&state, StatusCode::UNPROCESSABLE_ENTITY, model).await;
    }

    match StudentRepo::new(&state.db).delete(id).await {
        Ok(student) => Redirect::to(&notice_url(None, Notice::Deleted, &student.name)).into_response(),
        Err(e) if e.is_not_found() => {
            model.manage_flashes.push(not_found_flash(id));
            render_page(&state, StatusCode::NOT_FOUND, model).await
        }
        Err(e) => {
            tracing::error!(id = %id, error = %e, "failed to delete student");
            model
                .manage_flashes
                .push(Flash::error().text(format!("Failed to delete data: {}", e)));
            render_page(&state, StatusCode::INTERNAL_SERVER_ERROR, model).await
        }
    }
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/students", post(create_student))
        .route("/students/{id}/update", post(update_student))
        .route("/students/{id}/delete", post(delete_student))
}
