//! パーティション単位のライフサイクル: 蓄積 → 学習 → 逐次推論。
use std::fmt;
use std::iter::FusedIterator;
use std::vec;

use tracing::{info, trace, warn};

use crate::classification::{LabeledDocument, NaiveBayesModel, Normalizer, Predictor, Trainer};
use crate::error::ClassifierError;

/// コントローラの状態。`Done` は終端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionState {
    Accumulating,
    Finalizing,
    Done,
}

impl fmt::Display for PartitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accumulating => "accumulating",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// 推論結果の1行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRow {
    pub text: Option<String>,
    pub actual_label: String,
    pub predicted_label: String,
}

/// 1パーティション分の行を蓄積し、閉じる時に学習と推論を行う。
///
/// ラベルが `None` の行は学習にもテストにも使われず、黙って捨てられる。
#[derive(Debug)]
pub struct PartitionController {
    state: PartitionState,
    training: Vec<LabeledDocument>,
    testing: Vec<LabeledDocument>,
    dropped: usize,
}

impl Default for PartitionController {
    fn default() -> Self {
        Self::new()
    }
}

impl PartitionController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PartitionState::Accumulating,
            training: Vec::new(),
            testing: Vec::new(),
            dropped: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> PartitionState {
        self.state
    }

    #[must_use]
    pub fn training_len(&self) -> usize {
        self.training.len()
    }

    #[must_use]
    pub fn testing_len(&self) -> usize {
        self.testing.len()
    }

    /// ラベルなしで破棄した行数。
    #[must_use]
    pub fn dropped_len(&self) -> usize {
        self.dropped
    }

    /// 1行を取り込む。
    ///
    /// # Errors
    /// `finalize` 開始後に呼ばれた場合は [`ClassifierError::InvalidPartitionState`] を返す。
    pub fn intake(
        &mut self,
        is_training: bool,
        label: Option<String>,
        text: Option<String>,
    ) -> Result<(), ClassifierError> {
        self.ensure_accumulating("intake")?;

        let Some(label) = label else {
            self.dropped += 1;
            trace!(is_training, "dropping row without label");
            return Ok(());
        };

        let document = LabeledDocument { label, text };
        if is_training {
            self.training.push(document);
        } else {
            self.testing.push(document);
        }
        Ok(())
    }

    /// パーティションを閉じ、学習したモデルでテスト行を順に推論するイテレータを返す。
    ///
    /// 一度しか呼べない。学習に失敗した場合も状態は `Done` になる。
    ///
    /// # Errors
    /// 二度目以降の呼び出しは [`ClassifierError::InvalidPartitionState`]、
    /// 学習行がない場合は [`ClassifierError::EmptyTrainingSet`] を返す。
    pub fn finalize(&mut self) -> Result<Predictions, ClassifierError> {
        self.ensure_accumulating("finalize")?;
        self.state = PartitionState::Finalizing;

        let training = std::mem::take(&mut self.training);
        let testing = std::mem::take(&mut self.testing);
        let normalizer = Normalizer::new();
        let trained = Trainer::new(normalizer).train(&training);
        self.state = PartitionState::Done;
        let model = trained?;

        if testing.is_empty() {
            warn!(training = training.len(), "partition closed without testing rows");
        }
        info!(
            training = training.len(),
            testing = testing.len(),
            dropped = self.dropped,
            labels = model.label_count(),
            vocab_size = model.vocab_size(),
            "partition finalized"
        );

        Ok(Predictions {
            model,
            predictor: Predictor::new(Normalizer::new()),
            pending: testing.into_iter(),
        })
    }

    fn ensure_accumulating(&self, operation: &'static str) -> Result<(), ClassifierError> {
        if self.state == PartitionState::Accumulating {
            Ok(())
        } else {
            Err(ClassifierError::InvalidPartitionState {
                operation,
                state: self.state,
            })
        }
    }
}

/// テスト行を1件ずつ推論する単回走査のイテレータ。
///
/// 学習済みモデルを所有し、使い切った後は `None` を返し続ける。
#[derive(Debug)]
pub struct Predictions {
    model: NaiveBayesModel,
    predictor: Predictor,
    pending: vec::IntoIter<LabeledDocument>,
}

impl Predictions {
    #[must_use]
    pub fn model(&self) -> &NaiveBayesModel {
        &self.model
    }
}

impl Iterator for Predictions {
    type Item = Result<PredictionRow, ClassifierError>;

    fn next(&mut self) -> Option<Self::Item> {
        let LabeledDocument { label, text } = self.pending.next()?;
        Some(
            self.predictor
                .predict(text.as_deref(), &self.model)
                .map(|predicted_label| PredictionRow {
                    text,
                    actual_label: label,
                    predicted_label,
                }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending.size_hint()
    }
}

impl ExactSizeIterator for Predictions {}

impl FusedIterator for Predictions {}
