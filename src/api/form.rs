use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppError,
    form::{FormError, FormView},
    model::attendance::AttendanceRecord,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectEmployee {
    /// Takes precedence when both fields are sent
    #[schema(example = "E001")]
    pub employee_id: Option<String>,
    #[schema(example = "Alice Rahman")]
    pub employee_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatus {
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTimeEntry {
    #[schema(example = "09:00")]
    pub in_time: Option<String>,
    #[schema(example = "17:00")]
    pub out_time: Option<String>,
}

fn form_view(state: &AppState) -> FormView {
    let date = state.today();
    state.session().form.view(&date)
}

/// Current form state
#[utoipa::path(
    get,
    path = "/api/form",
    responses(
        (status = 200, description = "Form state", body = FormView)
    ),
    tag = "Form"
)]
pub async fn get_form(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(form_view(&state))
}

/// Select the employee by id or by name
#[utoipa::path(
    put,
    path = "/api/form/employee",
    request_body = SelectEmployee,
    responses(
        (status = 200, description = "Employee fields synchronised", body = FormView),
        (status = 400, description = "Neither id nor name given", body = Object, example = json!({
            "message": "Employee ID or name is required"
        }))
    ),
    tag = "Form"
)]
pub async fn select_employee(
    state: web::Data<AppState>,
    payload: web::Json<SelectEmployee>,
) -> actix_web::Result<impl Responder> {
    {
        let mut session = state.session();
        match (&payload.employee_id, &payload.employee_name) {
            (Some(id), _) => session.form.select_employee_id(id, &state.directory),
            (None, Some(name)) => session.form.select_employee_name(name, &state.directory),
            (None, None) => {
                return Err(AppError::from(FormError::MissingField("Employee ID or name")).into());
            }
        }
    }

    Ok(HttpResponse::Ok().json(form_view(&state)))
}

/// Change the attendance status
#[utoipa::path(
    put,
    path = "/api/form/status",
    request_body = SetStatus,
    responses(
        (status = 200, description = "Status applied", body = FormView),
        (status = 400, description = "Unknown status", body = Object, example = json!({
            "message": "Unknown status \"Vacation\""
        }))
    ),
    tag = "Form"
)]
pub async fn set_status(
    state: web::Data<AppState>,
    payload: web::Json<SetStatus>,
) -> actix_web::Result<impl Responder> {
    state
        .session()
        .form
        .set_status(&payload.status)
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(form_view(&state)))
}

/// Add an empty time entry row
#[utoipa::path(
    post,
    path = "/api/form/entries",
    responses(
        (status = 201, description = "Row added", body = FormView),
        (status = 400, description = "Adding is disabled for the current status", body = Object, example = json!({
            "message": "Time entries cannot be added for the current status"
        }))
    ),
    tag = "Form"
)]
pub async fn add_time_entry(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let row_id = state
        .session()
        .form
        .add_time_entry_row()
        .map_err(AppError::from)?;
    debug!(%row_id, "Time entry added");

    Ok(HttpResponse::Created().json(form_view(&state)))
}

/// Edit the in/out time of one row
#[utoipa::path(
    put,
    path = "/api/form/entries/{row_id}",
    params(
        ("row_id" = String, Path, description = "Time entry row id")
    ),
    request_body = UpdateTimeEntry,
    responses(
        (status = 200, description = "Row updated", body = FormView),
        (status = 400, description = "Rows are disabled for the current status"),
        (status = 404, description = "Row not found")
    ),
    tag = "Form"
)]
pub async fn update_time_entry(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateTimeEntry>,
) -> actix_web::Result<impl Responder> {
    let row_id = path.into_inner();
    let UpdateTimeEntry { in_time, out_time } = payload.into_inner();

    state
        .session()
        .form
        .update_time_entry(row_id, in_time, out_time)
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(form_view(&state)))
}

/// Remove one time entry row
#[utoipa::path(
    delete,
    path = "/api/form/entries/{row_id}",
    params(
        ("row_id" = String, Path, description = "Time entry row id")
    ),
    responses(
        (status = 200, description = "Row removed", body = FormView),
        (status = 404, description = "Row not found")
    ),
    tag = "Form"
)]
pub async fn remove_time_entry(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    state
        .session()
        .form
        .remove_time_entry_row(path.into_inner())
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(form_view(&state)))
}

/// Submit the form as a new attendance record
#[utoipa::path(
    post,
    path = "/api/form/submit",
    responses(
        (status = 201, description = "Record saved", body = AttendanceRecord),
        (status = 400, description = "A required field is missing", body = Object, example = json!({
            "message": "In time is required for time entry 1"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Form"
)]
pub async fn submit_form(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let record = state.submit_form()?;
    Ok(HttpResponse::Created().json(record))
}
