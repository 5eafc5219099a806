//! Admin handling of movie reports.

use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::movies;
use crate::repos::reports::{self, Report, ReportStatus};
use crate::store::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    /// Flag the movie as reported and keep the report as approved
    Approve,
    /// Drop the report
    Reject,
}

pub async fn list_reports(store: &dyn DocumentStore) -> Result<Vec<Report>, AppError> {
    Ok(reports::list_reports(store).await?)
}

pub async fn manage_report(
    store: &dyn DocumentStore,
    report_id: &str,
    action: ReportAction,
) -> Result<(), AppError> {
    let report = reports::find_report(store, report_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::ReportNotFound, "Report not found"))?;

    match action {
        ReportAction::Approve => {
            movies::mark_reported(store, &report.movie_id).await?;
            reports::set_report_status(store, report_id, ReportStatus::Approved).await?;
        }
        ReportAction::Reject => reports::delete_report(store, report_id).await?,
    }

    info!(report_id, movie_id = %report.movie_id, ?action, "Report managed");
    Ok(())
}
