use serde_json::{json, Value};
use sqlx::PgPool;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ai_client::{AiClient, CHAT_MODEL};
use crate::analysis::parser::parse_summary_content;
use crate::analysis::prompts::build_system_prompt;
use crate::audit;
use crate::errors::AppError;
use crate::interviews::status::{advance, fetch_owned};
use crate::models::interview::InterviewStatus;
use crate::models::template::SummaryTemplateRow;

pub struct AnalysisOutcome {
    pub summary_id: Uuid,
    pub summary: Value,
}

/// The transcript-to-summary pipeline shared by `/process-interview` and the
/// tail of `/transcribe-audio`: resolve template, build prompt, call the chat
/// model, parse (with degraded fallback), persist, and complete the interview.
///
/// On an upstream or persistence failure the interview is left at whatever
/// status it had — there is no compensating `failed` transition. That mirrors
/// the product's observed behavior; the only recovery path is re-initiating.
pub async fn run_analysis(
    pool: &PgPool,
    ai: &AiClient,
    user_id: Uuid,
    interview_id: Uuid,
    transcript: &str,
    template_id: Option<Uuid>,
) -> Result<AnalysisOutcome, AppError> {
    let started = Instant::now();

    let interview = fetch_owned(pool, interview_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundOrForbidden("Interview not found".to_string()))?;

    advance(pool, interview_id, user_id, InterviewStatus::Processing).await?;

    // A missing or foreign-private template is tolerated, not an error:
    // the analysis silently falls back to the default prompt.
    let template = match template_id {
        Some(tid) => fetch_template(pool, tid, user_id).await?,
        None => None,
    };
    let resolved_template_id = template.as_ref().map(|t| t.id);
    if template_id.is_some() && resolved_template_id.is_none() {
        debug!("Template {template_id:?} not resolvable for user {user_id}, using default prompt");
    }

    let system_prompt = build_system_prompt(template.as_ref().map(|t| &t.template_content));
    let raw = ai.chat(&system_prompt, transcript).await?;

    let (summary_content, fell_back) = parse_summary_content(&raw);
    if fell_back {
        info!("Model output for interview {interview_id} was not valid JSON, storing fallback");
    }

    let processing_time_seconds = started.elapsed().as_secs() as i32;

    let summary_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO interview_summaries
            (interview_id, template_id, summary_content, transcript_text,
             ai_model_used, processing_time_seconds)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(interview_id)
    .bind(resolved_template_id)
    .bind(&summary_content)
    .bind(transcript)
    .bind(CHAT_MODEL)
    .bind(processing_time_seconds)
    .fetch_one(pool)
    .await?;

    advance(pool, interview_id, user_id, InterviewStatus::Completed).await?;

    info!(
        "Analysis completed for interview {interview_id} (summary {summary_id}, {processing_time_seconds}s)"
    );

    audit::record(
        pool,
        user_id,
        "interview.analyzed",
        "interview",
        interview_id,
        json!({ "summary_id": summary_id, "fallback_used": fell_back }),
    )
    .await;
    audit::track_usage(
        pool,
        user_id,
        "analysis_completed",
        json!({
            "interview_id": interview_id,
            "ai_model": CHAT_MODEL,
            "processing_time_seconds": processing_time_seconds,
            "position_title": interview.position_title,
        }),
    )
    .await;

    Ok(AnalysisOutcome {
        summary_id,
        summary: summary_content,
    })
}

/// Resolves a template the caller may use: their own, or a public one.
async fn fetch_template(
    pool: &PgPool,
    template_id: Uuid,
    user_id: Uuid,
) -> Result<Option<SummaryTemplateRow>, AppError> {
    let row = sqlx::query_as::<_, SummaryTemplateRow>(
        "SELECT * FROM summary_templates WHERE id = $1 AND (user_id = $2 OR is_public)",
    )
    .bind(template_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
