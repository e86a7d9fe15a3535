use serde::{Deserialize, Serialize};
use validator::Validate;

/// Column holding the feature codes in the first spreadsheet.
pub const FEATURE_CODE_COLUMN: &str = "Feature WERS Code";
/// Columns holding the code mapping in the VOCI spreadsheet.
pub const WERS_CODE_COLUMN: &str = "WERS Code";
pub const SALES_CODE_COLUMN: &str = "Sales Code";

/// Multipart form field names accepted by the upload endpoint.
pub const EXCEL_FILE_FIELD: &str = "excel_file";
pub const WORD_FILE_FIELD: &str = "word_file";
pub const VOCI_EXCEL_FILE_FIELD: &str = "voci_excel_file";
pub const EXCEL_HEADER_FIELD: &str = "excel_header";
pub const VOCI_HEADER_FIELD: &str = "voci_header";

/// Validated form parameters for one cross-reference request. Header rows are
/// 1-based, the way they are shown in a spreadsheet application.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(range(min = 1, message = "header row is 1-based"))]
    pub excel_header: u32,
    #[validate(range(min = 1, message = "header row is 1-based"))]
    pub voci_header: u32,
}
