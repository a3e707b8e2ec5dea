//! 文書頻度の集計と Laplace 平滑化による学習。
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::model::{LabelParameters, NaiveBayesModel};
use super::tokenizer::Normalizer;
use super::LabeledDocument;
use crate::error::ClassifierError;

#[derive(Debug, Default)]
struct LabelCounts {
    documents: usize,
    /// トークンごとの、そのトークンを含む文書数。
    token_documents: FxHashMap<String, usize>,
}

#[derive(Debug, Default)]
pub struct Trainer {
    normalizer: Normalizer,
}

impl Trainer {
    #[must_use]
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// ラベル付き文書からモデルを学習する。
    ///
    /// 各文書は異なり語の集合として数え、1文書内の出現回数は無視する。
    /// 条件付き確率は語彙全体に対して密に計算する。
    ///
    /// # Errors
    /// 文書が1件もない場合は [`ClassifierError::EmptyTrainingSet`] を返す。
    pub fn train(&self, documents: &[LabeledDocument]) -> Result<NaiveBayesModel, ClassifierError> {
        if documents.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut order: Vec<String> = Vec::new();
        let mut counts: FxHashMap<String, LabelCounts> = FxHashMap::default();
        let mut vocabulary: FxHashSet<String> = FxHashSet::default();

        for document in documents {
            let entry = counts.entry(document.label.clone()).or_insert_with(|| {
                order.push(document.label.clone());
                LabelCounts::default()
            });
            entry.documents += 1;
            for token in self.normalizer.token_set(document.text.as_deref()) {
                *entry.token_documents.entry(token.clone()).or_insert(0) += 1;
                vocabulary.insert(token);
            }
        }

        let total_documents = documents.len() as f64;
        let vocab_size = vocabulary.len();
        let mut labels = Vec::with_capacity(order.len());

        for label in order {
            let Some(label_counts) = counts.remove(&label) else {
                continue;
            };
            let word_total: usize = label_counts.token_documents.values().sum();
            let denominator = (word_total + vocab_size) as f64;
            let conditionals = vocabulary
                .iter()
                .map(|token| {
                    let count = label_counts.token_documents.get(token).copied().unwrap_or(0);
                    (token.clone(), ((count as f64 + 1.0) / denominator).ln())
                })
                .collect::<FxHashMap<_, _>>();

            debug!(
                label = %label,
                documents = label_counts.documents,
                word_total,
                "label parameters estimated"
            );

            labels.push(LabelParameters {
                log_prior: (label_counts.documents as f64 / total_documents).ln(),
                label,
                word_total,
                conditionals,
            });
        }

        debug!(
            documents = documents.len(),
            labels = labels.len(),
            vocab_size,
            "naive bayes model trained"
        );

        Ok(NaiveBayesModel { labels, vocabulary })
    }
}
