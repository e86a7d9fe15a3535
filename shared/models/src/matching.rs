use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A feature code found in the Word document, paired with the sales code it
/// resolved to. When no mapping entry exists the feature code resolves to
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedCode {
    pub feature_code: String,
    pub resolved_code: String,
}

impl MatchedCode {
    pub fn new(feature_code: impl Into<String>, resolved_code: impl Into<String>) -> Self {
        Self {
            feature_code: feature_code.into(),
            resolved_code: resolved_code.into(),
        }
    }

    /// True when the code had no sales-code mapping and resolved to itself.
    pub fn is_unmapped(&self) -> bool {
        self.feature_code == self.resolved_code
    }
}

/// Result of one cross-reference run. Pairs keep the order of the feature
/// codes in the first spreadsheet; nothing is persisted across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Feature codes read from the first spreadsheet, matched or not.
    pub total_feature_codes: usize,
    pub matched: Vec<MatchedCode>,
}

impl MatchReport {
    pub fn new(total_feature_codes: usize, matched: Vec<MatchedCode>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            total_feature_codes,
            matched,
        }
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Pairs that fell back to the feature code itself.
    pub fn unmapped_count(&self) -> usize {
        self.matched.iter().filter(|m| m.is_unmapped()).count()
    }
}
