//! NDJSON ハーネスで入出力する行のスキーマ。
use serde::{Deserialize, Serialize};

use crate::partition::PredictionRow;

/// 入力行。`label` / `text` は欠損を許す。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InputRow {
    pub is_training: bool,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// 出力行。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputRow {
    pub text: Option<String>,
    pub actual_label: Option<String>,
    pub predicted_label: String,
}

impl From<PredictionRow> for OutputRow {
    fn from(row: PredictionRow) -> Self {
        Self {
            text: row.text,
            actual_label: Some(row.actual_label),
            predicted_label: row.predicted_label,
        }
    }
}
