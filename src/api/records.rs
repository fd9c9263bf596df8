use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{state::AppState, table::TableView};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RecordKey {
    /// Employee id of the records to remove
    #[schema(example = "E001")]
    pub employee_id: String,
    /// Submission date of the records to remove
    #[schema(example = "1/1/2024")]
    pub date: String,
}

/// The rendered attendance table
#[utoipa::path(
    get,
    path = "/api/records",
    responses(
        (status = 200, description = "Table rows in submission order", body = TableView)
    ),
    tag = "Attendance"
)]
pub async fn list_records(state: web::Data<AppState>) -> impl Responder {
    let view = state.session().table.view();
    HttpResponse::Ok().json(view)
}

/// Remove action of one table row
///
/// Deletes every saved record with the row's (employee id, date) pair and
/// takes the row out of the table.
#[utoipa::path(
    delete,
    path = "/api/records/rows/{row_id}",
    params(
        ("row_id" = String, Path, description = "Table row id")
    ),
    responses(
        (status = 200, description = "Row removed", body = Object, example = json!({
            "message": "Record removed"
        })),
        (status = 404, description = "Row not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn remove_row(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    let record = state.remove_row(path.into_inner())?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Record removed",
        "employee_id": record.employee_id,
        "date": record.date,
    })))
}

/// Remove every record for an employee on a date
#[utoipa::path(
    delete,
    path = "/api/records",
    params(RecordKey),
    responses(
        (status = 200, description = "Matching records removed", body = Object, example = json!({
            "message": "Records removed",
            "removed": 2
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn remove_records(
    state: web::Data<AppState>,
    query: web::Query<RecordKey>,
) -> actix_web::Result<impl Responder> {
    let removed = state.remove_matching(&query.employee_id, &query.date)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Records removed",
        "removed": removed,
    })))
}

/// Delete all saved attendance data
#[utoipa::path(
    post,
    path = "/api/records/reset",
    responses(
        (status = 200, description = "All data cleared", body = Object, example = json!({
            "message": "All attendance data cleared"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn reset_records(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    state.reset_all()?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "All attendance data cleared"
    })))
}
