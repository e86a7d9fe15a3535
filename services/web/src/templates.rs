//! Result View Rendering
//!
//! Handlebars-based rendering for the upload form and the match results
//! table. Templates are compiled in; there is no template directory to
//! deploy alongside the binary.

use handlebars::Handlebars;
use serde::Serialize;

use wersmatch_models::MatchReport;
use wersmatch_utils::MatchResult;

const UPLOAD_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
<title>WERS / Sales Code Matcher</title>
<style>body{font-family:Arial,sans-serif;line-height:1.6;color:#333;max-width:640px;margin:40px auto;}.header{background:#2563eb;color:white;padding:20px;}.content{padding:20px;}label{display:block;margin-top:12px;font-weight:bold;}input{margin-top:4px;}button{margin-top:20px;padding:8px 24px;}</style>
</head>
<body>
<div class="header"><h2>WERS / Sales Code Matcher</h2></div>
<div class="content">
<form action="/upload" method="post" enctype="multipart/form-data">
<label>Feature code spreadsheet (.xlsx)</label>
<input type="file" name="excel_file" required>
<label>Header row (1-based)</label>
<input type="number" name="excel_header" value="1" min="1" required>
<label>Word document (.docx)</label>
<input type="file" name="word_file" required>
<label>VOCI mapping spreadsheet (.xlsx)</label>
<input type="file" name="voci_excel_file" required>
<label>Header row (1-based)</label>
<input type="number" name="voci_header" value="1" min="1" required>
<button type="submit">Match codes</button>
</form>
</div>
</body>
</html>
"#;

const RESULTS_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
<title>Match Results</title>
<style>body{font-family:Arial,sans-serif;line-height:1.6;color:#333;max-width:640px;margin:40px auto;}.header{background:#2563eb;color:white;padding:20px;}.content{padding:20px;}table{border-collapse:collapse;width:100%;}th,td{border:1px solid #d1d5db;padding:6px 12px;text-align:left;}th{background:#f3f4f6;}.footer{background:#f3f4f6;padding:12px 20px;font-size:12px;}</style>
</head>
<body>
<div class="header"><h2>Match Results</h2></div>
<div class="content">
<p>{{matched_count}} of {{total_feature_codes}} feature codes found in the document{{#if unmapped_count}} ({{unmapped_count}} without a sales code){{/if}}.</p>
{{#if matched}}
<table>
<tr><th>Feature WERS Code</th><th>Sales Code</th></tr>
{{#each matched}}<tr><td>{{feature_code}}</td><td>{{resolved_code}}</td></tr>
{{/each}}
</table>
{{else}}
<p>No feature codes were found in the document.</p>
{{/if}}
<p><a href="/">Match another set of files</a></p>
</div>
<div class="footer">Report {{report_id}} generated {{generated_at}}</div>
</body>
</html>
"#;

/// View model for the results page; counts are precomputed because the
/// template language has no length helper.
#[derive(Debug, Serialize)]
struct ResultsView<'a> {
    report_id: String,
    generated_at: String,
    total_feature_codes: usize,
    matched_count: usize,
    unmapped_count: usize,
    matched: &'a [wersmatch_models::MatchedCode],
}

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
        }
    }

    pub fn render_upload_form(&self) -> MatchResult<String> {
        Ok(self
            .handlebars
            .render_template(UPLOAD_PAGE, &serde_json::json!({}))?)
    }

    pub fn render_results(&self, report: &MatchReport) -> MatchResult<String> {
        let view = ResultsView {
            report_id: report.id.to_string(),
            generated_at: report.generated_at.to_rfc3339(),
            total_feature_codes: report.total_feature_codes,
            matched_count: report.matched_count(),
            unmapped_count: report.unmapped_count(),
            matched: &report.matched,
        };

        Ok(self.handlebars.render_template(RESULTS_PAGE, &view)?)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
