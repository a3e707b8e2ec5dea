//! テキスト分類の中核: 正規化・学習・推論。
mod model;
mod predictor;
mod tokenizer;
mod trainer;

pub use model::NaiveBayesModel;
pub use predictor::{LabelScore, Predictor};
pub use tokenizer::{Normalizer, STOPWORDS};
pub use trainer::Trainer;

/// ラベル付きの文書。ラベルのない行はここに到達しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    pub label: String,
    pub text: Option<String>,
}

impl LabeledDocument {
    #[must_use]
    pub fn new(label: impl Into<String>, text: Option<impl Into<String>>) -> Self {
        Self {
            label: label.into(),
            text: text.map(Into::into),
        }
    }
}
