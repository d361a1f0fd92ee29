//! Detection report page.
//! Used by: server.

use axum::extract::State;
use axum::response::Html;

use crate::error::Result;
use crate::report::render_report;
use crate::state::AppState;

pub async fn report(State(state): State<AppState>) -> Result<Html<String>> {
    let report = {
        let conn = state.store.connect()?;
        render_report(&conn)?
    };
    tracing::info!(rows = report.rows, "detection report rendered");
    Ok(Html(report.html))
}
