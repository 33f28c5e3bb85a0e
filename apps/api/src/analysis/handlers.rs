//! Axum route handler for the per-student analysis report.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::chart::ChartRenderer;
use crate::analysis::summary::{classify_marks, summarize, SubjectShare, SubjectTier, SummaryError};
use crate::analysis::tier::Tier;
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::models::CurriculumRow;
use crate::store::Store;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub user_id: String,
    pub name: String,
    pub generated_at: DateTime<Utc>,
    /// Per-subject mark and tier, in marks-file column order.
    pub subjects: Vec<SubjectTier>,
    /// `None` when every subject is Low; see `notice`.
    pub summary: Option<ShareSummary>,
    pub notice: Option<String>,
    /// Only subjects with at least one curriculum row appear here.
    pub resources: Vec<SubjectResources>,
}

#[derive(Debug, Serialize)]
pub struct ShareSummary {
    /// `data:` URI of the rendered pie chart.
    pub chart: String,
    pub shares: Vec<SubjectShare>,
}

#[derive(Debug, Serialize)]
pub struct SubjectResources {
    pub subject: String,
    pub tier: Tier,
    /// Human-readable tier name, e.g. "Fast bloomer".
    pub tier_label: &'static str,
    pub rows: Vec<ResourceView>,
}

#[derive(Debug, Serialize)]
pub struct ResourceView {
    #[serde(flatten)]
    pub row: CurriculumRow,
    /// The guidance column matching the student's tier for this subject.
    pub guidance: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET|POST /analysis/:user_id
pub async fn handle_analysis(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let store = state.store.clone();
    let renderer = state.chart.clone();

    // Chart drawing is CPU-bound.
    let report =
        tokio::task::spawn_blocking(move || build_analysis(&store, renderer.as_ref(), &user_id))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(report))
}

/// Runs classifier, summary, chart and resource matching for one student.
pub fn build_analysis(
    store: &Store,
    renderer: &dyn ChartRenderer,
    user_id: &str,
) -> Result<AnalysisResponse, AppError> {
    let record = store
        .marks_for(user_id)
        .ok_or_else(|| AppError::NotFound(format!("No marks recorded for student {user_id}")))?;

    let subjects = classify_marks(&record.marks);

    let (summary, notice) = match summarize(&subjects) {
        Ok(shares) => {
            let chart = renderer.render(&shares)?;
            (
                Some(ShareSummary {
                    chart: chart.data_uri(),
                    shares,
                }),
                None,
            )
        }
        Err(e @ SummaryError::ZeroTotalWeight) => {
            warn!("Analysis for {user_id}: {e}");
            (
                None,
                Some(
                    "Every subject is in the slow bloomer tier, so there is no share chart yet. \
                     Start with the slow bloomer guidance below."
                        .to_string(),
                ),
            )
        }
    };

    let resources = subjects
        .iter()
        .filter_map(|s| {
            let rows = store.curriculum_for(&s.subject);
            if rows.is_empty() {
                return None;
            }
            Some(SubjectResources {
                subject: s.subject.clone(),
                tier: s.tier,
                tier_label: s.tier.label(),
                rows: rows
                    .iter()
                    .map(|row| ResourceView {
                        guidance: row.guidance_for(s.tier).to_string(),
                        row: row.clone(),
                    })
                    .collect(),
            })
        })
        .collect();

    info!(
        "Analysis for {user_id}: {} subject(s), summary {}",
        subjects.len(),
        if summary.is_some() { "rendered" } else { "skipped" }
    );

    Ok(AnalysisResponse {
        user_id: record.user_id.clone(),
        name: record.name.clone(),
        generated_at: Utc::now(),
        subjects,
        summary,
        notice,
        resources,
    })
}
