use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{model::employee::Employee, state::AppState};

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 5)]
    pub total: usize,
}

/// List the employee reference directory
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All known employees", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(state: web::Data<AppState>) -> impl Responder {
    let data = state.directory.all().to_vec();
    HttpResponse::Ok().json(EmployeeListResponse {
        total: data.len(),
        data,
    })
}
