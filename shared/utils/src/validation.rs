use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::error::{MatchError, MatchResult};

pub fn validate_model<T: Validate>(model: &T) -> MatchResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(MatchError::validation("form", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("Validation failed for field '{}': {}", field, error.code),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

/// Reduce a client-supplied filename to something safe to place under the
/// uploads directory. Path separators and shell-hostile characters collapse
/// to underscores.
pub fn sanitize_filename(name: &str) -> String {
    let safe = Regex::new(r"[^A-Za-z0-9._-]+")
        .unwrap()
        .replace_all(name, "_")
        .trim_matches('.')
        .to_string();

    if safe.is_empty() {
        "upload".to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wersmatch_models::MatchRequest;

    #[test]
    fn test_validate_match_request() {
        let request = MatchRequest {
            excel_header: 1,
            voci_header: 2,
        };
        assert!(validate_model(&request).is_ok());

        let request = MatchRequest {
            excel_header: 1,
            voci_header: 0,
        };
        let err = validate_model(&request).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("voci_header"));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("codes 2024.xlsx"), "codes_2024.xlsx");
        assert_eq!(sanitize_filename("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename("report.docx"), "report.docx");
    }
}
