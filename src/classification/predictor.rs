//! 対数事後確率によるラベル推論。
use super::model::NaiveBayesModel;
use super::tokenizer::Normalizer;
use crate::error::ClassifierError;

/// ラベルごとの対数事後スコア（正規化前）。
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Default)]
pub struct Predictor {
    normalizer: Normalizer,
}

impl Predictor {
    #[must_use]
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// 最大スコアのラベルを返す。
    ///
    /// 同点の場合は事前確率の挿入順（学習データでの初出順）で先のラベルを選ぶ。
    /// 同点とは f64 としてビット単位で等しいことを指し、数学的に等しくても加算順の違いで
    /// 1 ulp ずれたスコアは同点にならない。
    ///
    /// # Errors
    /// モデルにラベルがない場合は [`ClassifierError::NoLabelsInModel`]、
    /// 語彙が空のモデルにトークンを含む文書を渡した場合は
    /// [`ClassifierError::EmptyVocabulary`] を返す。
    pub fn predict(
        &self,
        text: Option<&str>,
        model: &NaiveBayesModel,
    ) -> Result<String, ClassifierError> {
        let mut best: Option<LabelScore> = None;
        for candidate in self.scores(text, model)? {
            // 厳密な大小比較なので、同点なら先に現れたラベルが残る。
            if best.as_ref().is_none_or(|current| candidate.score > current.score) {
                best = Some(candidate);
            }
        }
        best.map(|winner| winner.label)
            .ok_or(ClassifierError::NoLabelsInModel)
    }

    /// 全ラベルのスコアを降順で返す。同点はラベル順を保つ。
    ///
    /// # Errors
    /// [`Predictor::predict`] と同じ。
    pub fn rank(
        &self,
        text: Option<&str>,
        model: &NaiveBayesModel,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        let mut ranked = self.scores(text, model)?;
        if ranked.is_empty() {
            return Err(ClassifierError::NoLabelsInModel);
        }
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked)
    }

    /// ラベル順のスコア。
    ///
    /// 語彙が空のモデルでは未知語項の分母が 0 になるため、トークンが1つでもあればエラーにする。
    fn scores(
        &self,
        text: Option<&str>,
        model: &NaiveBayesModel,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        let vocab_size = model.vocab_size();
        let tokens = self.normalizer.token_set(text);
        if vocab_size == 0 && !tokens.is_empty() && !model.labels.is_empty() {
            return Err(ClassifierError::EmptyVocabulary {
                tokens: tokens.len(),
            });
        }

        let scores = model
            .labels
            .iter()
            .map(|params| {
                let mut score = params.log_prior;
                for token in &tokens {
                    score += if model.contains_token(token) {
                        params
                            .conditionals
                            .get(token)
                            .copied()
                            .unwrap_or_else(|| params.unseen_log_probability(vocab_size))
                    } else {
                        params.unseen_log_probability(vocab_size)
                    };
                }
                LabelScore {
                    label: params.label.clone(),
                    score,
                }
            })
            .collect();
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{LabeledDocument, Trainer};

    fn train(rows: &[(&str, &str)]) -> NaiveBayesModel {
        let documents = rows
            .iter()
            .map(|(label, text)| LabeledDocument::new(*label, Some(*text)))
            .collect::<Vec<_>>();
        Trainer::default().train(&documents).expect("training succeeds")
    }

    #[test]
    fn picks_label_sharing_vocabulary() {
        let model = train(&[("pos", "i love this"), ("neg", "i hate this")]);
        let predictor = Predictor::default();
        assert_eq!(predictor.predict(Some("i love it"), &model).as_deref(), Ok("pos"));
    }

    #[test]
    fn empty_text_falls_back_to_highest_prior() {
        let model = train(&[("a", "x"), ("b", "y"), ("b", "z")]);
        let predictor = Predictor::default();
        assert_eq!(predictor.predict(None, &model).as_deref(), Ok("b"));
        assert_eq!(predictor.predict(Some(""), &model).as_deref(), Ok("b"));

        let ranked = predictor.rank(None, &model).expect("ranking succeeds");
        assert_eq!(ranked[0].score, model.log_prior("b").expect("prior"));
        assert_eq!(ranked[1].score, model.log_prior("a").expect("prior"));
    }

    #[test]
    fn ties_resolve_to_first_inserted_label() {
        // 対称な学習データでは全ラベルが同点になる。
        let model = train(&[("zeta", "shared"), ("alpha", "shared")]);
        let predictor = Predictor::default();
        for _ in 0..10 {
            assert_eq!(predictor.predict(Some("shared"), &model).as_deref(), Ok("zeta"));
        }
        let ranked = predictor.rank(Some("shared"), &model).expect("ranking succeeds");
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].label, "zeta");
    }

    #[test]
    fn out_of_vocabulary_tokens_use_smoothed_zero_count() {
        let model = train(&[("a", "dog"), ("b", "cat")]);
        let predictor = Predictor::default();
        let ranked = predictor.rank(Some("bird"), &model).expect("ranking succeeds");
        let expected = 0.5_f64.ln() + (1.0_f64 / 3.0).ln();
        assert!(ranked.iter().all(|entry| entry.score == expected));
    }

    #[test]
    fn empty_vocabulary_rejects_text_with_tokens() {
        let model = train(&[("a", "the"), ("b", "and"), ("b", "")]);
        assert_eq!(model.vocab_size(), 0);
        let predictor = Predictor::default();
        assert_eq!(
            predictor.predict(Some("brand new words"), &model),
            Err(ClassifierError::EmptyVocabulary { tokens: 3 })
        );
        assert_eq!(
            predictor.rank(Some("brand new words"), &model),
            Err(ClassifierError::EmptyVocabulary { tokens: 3 })
        );
    }

    #[test]
    fn empty_vocabulary_still_scores_token_free_text_by_prior() {
        let model = train(&[("a", "the"), ("b", "and"), ("b", "")]);
        let predictor = Predictor::default();
        assert_eq!(predictor.predict(None, &model).as_deref(), Ok("b"));
        assert_eq!(predictor.predict(Some("the and"), &model).as_deref(), Ok("b"));
        let ranked = predictor.rank(Some(""), &model).expect("ranking succeeds");
        assert!(ranked.iter().all(|entry| entry.score.is_finite()));
    }

    #[test]
    fn model_without_labels_is_rejected() {
        let model = NaiveBayesModel {
            labels: Vec::new(),
            vocabulary: rustc_hash::FxHashSet::default(),
        };
        let predictor = Predictor::default();
        assert_eq!(
            predictor.predict(Some("anything"), &model),
            Err(ClassifierError::NoLabelsInModel)
        );
        assert_eq!(
            predictor.rank(Some("anything"), &model),
            Err(ClassifierError::NoLabelsInModel)
        );
    }
}
