//! Upload handler
//!
//! One POST carries the three files and two header-row fields; processing is
//! synchronous and request-scoped. Failures surface as plain-text messages in
//! the mandated order: missing files, first sheet parse, feature column
//! check, Word document parse, VOCI sheet parse, VOCI column checks.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Json},
};
use tracing::{info, warn};

use wersmatch_models::{
    MatchReport, MatchRequest, EXCEL_FILE_FIELD, EXCEL_HEADER_FIELD, FEATURE_CODE_COLUMN,
    SALES_CODE_COLUMN, VOCI_EXCEL_FILE_FIELD, VOCI_HEADER_FIELD, WERS_CODE_COLUMN,
    WORD_FILE_FIELD,
};
use wersmatch_utils::{
    cross_reference, docx, validate_model, MatchError, MatchResult, SheetKind, SheetTable,
};

use crate::AppState;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "wersmatch-web",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Render the upload form.
///
/// GET /
pub async fn upload_form(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    state
        .templates
        .render_upload_form()
        .map(Html)
        .map_err(error_response)
}

/// Process one triple of files and render the matched pairs.
///
/// POST /upload
pub async fn process_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, (StatusCode, String)> {
    let form = read_form(&mut multipart).await.map_err(error_response)?;

    let report = match_uploads(&state, form).await.map_err(|e| {
        warn!(error = %e, "upload processing failed");
        error_response(e)
    })?;

    info!(
        report_id = %report.id,
        matched = report.matched_count(),
        total = report.total_feature_codes,
        "cross-reference complete"
    );

    state
        .templates
        .render_results(&report)
        .map(Html)
        .map_err(error_response)
}

async fn match_uploads(state: &AppState, form: UploadForm) -> MatchResult<MatchReport> {
    // Missing-files check comes before anything else
    let (excel, word, voci) = match (form.excel_file, form.word_file, form.voci_excel_file) {
        (Some(excel), Some(word), Some(voci)) => (excel, word, voci),
        _ => return Err(MatchError::MissingInput),
    };

    let request = MatchRequest {
        excel_header: parse_header_field(EXCEL_HEADER_FIELD, form.excel_header.as_deref())?,
        voci_header: parse_header_field(VOCI_HEADER_FIELD, form.voci_header.as_deref())?,
    };
    validate_model(&request)?;

    // Spool to transient storage, then read back for processing
    let excel_path = state.store.save(&excel.filename, &excel.data).await?;
    let word_path = state.store.save(&word.filename, &word.data).await?;
    let voci_path = state.store.save(&voci.filename, &voci.data).await?;

    let excel_data = state.store.read(&excel_path).await?;
    let word_data = state.store.read(&word_path).await?;
    let voci_data = state.store.read(&voci_path).await?;

    run_pipeline(&request, &excel_data, &word_data, &voci_data)
}

/// The three-stage cross-reference over raw file bytes, aborting at the first
/// failure.
pub(crate) fn run_pipeline(
    request: &MatchRequest,
    excel_data: &[u8],
    word_data: &[u8],
    voci_data: &[u8],
) -> MatchResult<MatchReport> {
    let feature_table =
        SheetTable::from_xlsx_bytes(SheetKind::Feature, excel_data, request.excel_header)?;
    feature_table.require_column(FEATURE_CODE_COLUMN)?;
    let feature_codes = feature_table.column_values(FEATURE_CODE_COLUMN)?;

    let document_text = docx::document_text(word_data)?;

    let voci_table = SheetTable::from_xlsx_bytes(SheetKind::Voci, voci_data, request.voci_header)?;
    voci_table.require_column(WERS_CODE_COLUMN)?;
    voci_table.require_column(SALES_CODE_COLUMN)?;
    let mapping_pairs = voci_table.paired_values(WERS_CODE_COLUMN, SALES_CODE_COLUMN)?;

    let matched = cross_reference(&feature_codes, &document_text, mapping_pairs);

    Ok(MatchReport::new(feature_codes.len(), matched))
}

struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

#[derive(Default)]
struct UploadForm {
    excel_file: Option<UploadedFile>,
    word_file: Option<UploadedFile>,
    voci_excel_file: Option<UploadedFile>,
    excel_header: Option<String>,
    voci_header: Option<String>,
}

async fn read_form(multipart: &mut Multipart) -> MatchResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MatchError::validation("multipart", e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            EXCEL_FILE_FIELD | WORD_FILE_FIELD | VOCI_EXCEL_FILE_FIELD => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| MatchError::validation(name.clone(), e.to_string()))?
                    .to_vec();

                // A file input submitted empty is treated as absent
                if filename.is_empty() && data.is_empty() {
                    continue;
                }

                let file = UploadedFile { filename, data };
                match name.as_str() {
                    EXCEL_FILE_FIELD => form.excel_file = Some(file),
                    WORD_FILE_FIELD => form.word_file = Some(file),
                    _ => form.voci_excel_file = Some(file),
                }
            }
            EXCEL_HEADER_FIELD => {
                form.excel_header = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| MatchError::validation(EXCEL_HEADER_FIELD, e.to_string()))?,
                );
            }
            VOCI_HEADER_FIELD => {
                form.voci_header = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| MatchError::validation(VOCI_HEADER_FIELD, e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    Ok(form)
}

fn parse_header_field(field: &str, value: Option<&str>) -> MatchResult<u32> {
    value
        .ok_or_else(|| MatchError::validation(field, "missing form field"))?
        .trim()
        .parse::<u32>()
        .map_err(|_| MatchError::validation(field, "must be a positive integer"))
}

fn error_response(error: MatchError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error.to_string())
}
