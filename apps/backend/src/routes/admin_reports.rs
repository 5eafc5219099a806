use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::moderation::{self, ReportAction};
use crate::state::app_state::AppState;
use crate::validation::{self, Body, FromBody};

impl FromBody for ReportAction {
    fn from_body(body: &Body) -> Result<Self, AppError> {
        match validation::required_str(body, "action", "Action")?.as_str() {
            "approve" => Ok(ReportAction::Approve),
            "reject" => Ok(ReportAction::Reject),
            _ => Err(AppError::invalid(
                r#"Action must be either "approve" or "reject""#,
            )),
        }
    }
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reports = moderation::list_reports(app_state.store.as_ref()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "error": false,
        "reports": reports,
    })))
}

async fn manage(
    path: web::Path<String>,
    body: ValidatedJson<ReportAction>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let report_id = validation::path_id(&path, "Report ID")?;
    let action = body.into_inner();
    moderation::manage_report(app_state.store.as_ref(), &report_id, action).await?;

    let message = match action {
        ReportAction::Approve => "Report approved successfully",
        ReportAction::Reject => "Report rejected and deleted successfully",
    };
    Ok(HttpResponse::Ok().json(json!({
        "error": false,
        "message": message,
    })))
}

/// Routes relative to `/api/movie/admin/reports`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("/", web::get().to(list))
        .route("/manage/{report_id}", web::post().to(manage));
}
