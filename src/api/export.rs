use std::str::FromStr;

use actix_web::{
    HttpResponse, Responder,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
};
use serde_json::json;

use crate::{export::ExportFormat, state::AppState};

/// Download the current table as PDF or spreadsheet
#[utoipa::path(
    get,
    path = "/api/export/{format}",
    params(
        ("format" = String, Path, description = "pdf, spreadsheet or xlsx")
    ),
    responses(
        (status = 200, description = "File download (attendance_records.pdf / attendance_records.xlsx)"),
        (status = 404, description = "Unknown export format", body = Object, example = json!({
            "message": "Unknown export format"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Export"
)]
pub async fn export_table(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let Ok(format) = ExportFormat::from_str(&path) else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Unknown export format"
        })));
    };

    let state = state.clone();
    let file = web::block(move || state.export(format)).await??;

    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.file_name())],
        })
        .body(file.bytes))
}
