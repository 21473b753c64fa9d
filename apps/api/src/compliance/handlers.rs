//! Axum route handlers for the Compliance API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compliance::engine::run_compliance_check;
use crate::compliance::models::{ComplianceInput, ResumeComplianceReport};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub markdown: String,
    pub job_description: String,
    pub original_resume_text: String,
    #[serde(default)]
    pub target_keywords: Vec<String>,
    #[serde(default)]
    pub remove_risky_keywords: bool,
    /// Defaults to the service-configured threshold when omitted.
    pub jd_mirroring_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub report_id: Uuid,
    pub checked_at: DateTime<Utc>,
    pub report: ResumeComplianceReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/compliance/check
///
/// Runs the full compliance check on a rewritten resume and returns the
/// report. The engine itself never fails; only malformed requests error.
pub async fn handle_check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, AppError> {
    if request.markdown.trim().is_empty() {
        return Err(AppError::Validation("markdown cannot be empty".to_string()));
    }
    if let Some(threshold) = request.jd_mirroring_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AppError::Validation(
                "jd_mirroring_threshold must be within [0, 1]".to_string(),
            ));
        }
    }

    let input = ComplianceInput {
        markdown: request.markdown,
        job_description: request.job_description,
        original_resume_text: request.original_resume_text,
        target_keywords: request.target_keywords,
        remove_risky_keywords: request.remove_risky_keywords,
        jd_mirroring_threshold: request
            .jd_mirroring_threshold
            .unwrap_or(state.config.jd_mirroring_threshold),
    };

    let report = run_compliance_check(&input);

    Ok(Json(CheckResponse {
        report_id: Uuid::new_v4(),
        checked_at: Utc::now(),
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn make_state() -> AppState {
        AppState {
            config: Config {
                port: 8080,
                rust_log: "info".to_string(),
                jd_mirroring_threshold: 0.75,
            },
        }
    }

    fn make_request(markdown: &str) -> CheckRequest {
        CheckRequest {
            markdown: markdown.to_string(),
            job_description: "Operations analyst role".to_string(),
            original_resume_text: "Built dashboards in Excel for weekly reporting".to_string(),
            target_keywords: vec!["Excel".to_string()],
            remove_risky_keywords: false,
            jd_mirroring_threshold: None,
        }
    }

    #[tokio::test]
    async fn test_handle_check_returns_report() {
        let request = make_request("## Summary\nAnalyst.\n## Skills\nExcel");
        let response = handle_check(State(make_state()), Json(request))
            .await
            .expect("check should succeed");
        assert_eq!(response.0.report.keyword_justifications.len(), 1);
        assert!(response.0.report.scoring.ats_score <= 100);
    }

    #[tokio::test]
    async fn test_handle_check_rejects_empty_markdown() {
        let request = make_request("   ");
        let err = handle_check(State(make_state()), Json(request)).await;
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_check_rejects_out_of_range_threshold() {
        let mut request = make_request("## Skills\nExcel");
        request.jd_mirroring_threshold = Some(1.5);
        let err = handle_check(State(make_state()), Json(request)).await;
        assert!(matches!(err, Err(AppError::Validation(_))));
    }
}
