//! 学習済みの多項 Naive Bayes モデル。
use rustc_hash::{FxHashMap, FxHashSet};

/// 1ラベル分のパラメータ。
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabelParameters {
    pub(crate) label: String,
    pub(crate) log_prior: f64,
    pub(crate) word_total: usize,
    /// 語彙全体に対する密な対数条件付き確率表。
    pub(crate) conditionals: FxHashMap<String, f64>,
}

impl LabelParameters {
    /// 出現回数 0 の語に対する平滑化済み対数確率。
    pub(crate) fn unseen_log_probability(&self, vocab_size: usize) -> f64 {
        (1.0 / (self.word_total + vocab_size) as f64).ln()
    }
}

/// 1パーティション分の学習結果。パーティションを跨いで共有しない。
///
/// ラベルは学習データ中の初出順に保持され、推論時の同点処理はこの順序に従う。
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayesModel {
    pub(crate) labels: Vec<LabelParameters>,
    pub(crate) vocabulary: FxHashSet<String>,
}

impl NaiveBayesModel {
    /// ラベルを初出順に返す。
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|params| params.label.as_str())
    }

    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &FxHashSet<String> {
        &self.vocabulary
    }

    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn contains_token(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    /// `ln(P(label))`。
    #[must_use]
    pub fn log_prior(&self, label: &str) -> Option<f64> {
        self.parameters(label).map(|params| params.log_prior)
    }

    /// ラベルに属する文書のトークン所属数の合計。
    #[must_use]
    pub fn word_total(&self, label: &str) -> Option<usize> {
        self.parameters(label).map(|params| params.word_total)
    }

    /// `ln(P(token | label))`。未知語でも平滑化式の値を返す。
    ///
    /// ラベルが存在しない場合のみ `None`。
    #[must_use]
    pub fn log_conditional(&self, label: &str, token: &str) -> Option<f64> {
        let params = self.parameters(label)?;
        Some(
            params
                .conditionals
                .get(token)
                .copied()
                .unwrap_or_else(|| params.unseen_log_probability(self.vocab_size())),
        )
    }

    fn parameters(&self, label: &str) -> Option<&LabelParameters> {
        self.labels.iter().find(|params| params.label == label)
    }
}
