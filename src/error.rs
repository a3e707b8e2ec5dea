use thiserror::Error;

use crate::partition::PartitionState;

/// パーティション単位の分類処理で発生するエラー。
///
/// いずれも決定的な入力に起因するため、リトライせず呼び出し元へ伝播させる。
/// ラベルが欠けた行はエラーではなく、`intake` で黙って破棄される。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("{operation} is not allowed while the partition is {state}")]
    InvalidPartitionState {
        operation: &'static str,
        state: PartitionState,
    },

    #[error("cannot train a model without at least one labeled training row")]
    EmptyTrainingSet,

    #[error("model has no labels to score against")]
    NoLabelsInModel,

    #[error("cannot score {tokens} token(s) against a model with an empty vocabulary")]
    EmptyVocabulary { tokens: usize },
}
