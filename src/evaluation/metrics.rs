use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Default, Clone, Copy)]
struct LabelStats {
    true_positive: f64,
    false_positive: f64,
    false_negative: f64,
    support: usize, // 正解ラベルとして現れた回数
}

impl LabelStats {
    fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    fn f1(&self) -> f64 {
        let (precision, recall) = (self.precision(), self.recall());
        if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// 単一ラベル分類のメトリクス。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    pub samples: usize,
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
    pub weighted_f1: f64,
}

/// 推論結果の行から集計するメトリクス計算器。
///
/// ラベルは辞書順で走査するため、集計結果は入力順に依存しない。
#[derive(Debug, Default)]
pub struct MetricsCalculator {
    per_label: BTreeMap<String, LabelStats>,
    total_samples: usize,
    correct_samples: usize,
}

impl MetricsCalculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 正解ラベルと予測ラベルを登録する。
    pub fn push(&mut self, expected: &str, predicted: &str) {
        self.total_samples += 1;
        self.per_label.entry(expected.to_string()).or_default().support += 1;

        if expected == predicted {
            self.correct_samples += 1;
            self.per_label
                .entry(expected.to_string())
                .or_default()
                .true_positive += 1.0;
        } else {
            self.per_label
                .entry(expected.to_string())
                .or_default()
                .false_negative += 1.0;
            self.per_label
                .entry(predicted.to_string())
                .or_default()
                .false_positive += 1.0;
        }
    }

    #[must_use]
    pub fn finalize(&self) -> ClassificationMetrics {
        if self.per_label.is_empty() {
            return ClassificationMetrics::default();
        }

        let mut precision_sum = 0.0;
        let mut recall_sum = 0.0;
        let mut f1_sum = 0.0;
        let mut weighted_f1_sum = 0.0;
        let mut total_support = 0;

        for stats in self.per_label.values() {
            precision_sum += stats.precision();
            recall_sum += stats.recall();
            f1_sum += stats.f1();
            weighted_f1_sum += stats.f1() * stats.support as f64;
            total_support += stats.support;
        }

        let counted_labels = self.per_label.len() as f64;
        ClassificationMetrics {
            samples: self.total_samples,
            accuracy: ratio(self.correct_samples as f64, self.total_samples as f64),
            macro_precision: precision_sum / counted_labels,
            macro_recall: recall_sum / counted_labels,
            macro_f1: f1_sum / counted_labels,
            weighted_f1: ratio(weighted_f1_sum, total_support as f64),
        }
    }
}
