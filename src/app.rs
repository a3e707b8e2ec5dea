//! NDJSON の1パーティションを読み込み、分類結果を書き出すハーネス。
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use crate::config::Config;
use crate::evaluation::{ClassificationMetrics, MetricsCalculator};
use crate::partition::PartitionController;
use crate::schema::{InputRow, OutputRow};

/// 1パーティションの処理結果の要約。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub training: usize,
    pub testing: usize,
    pub dropped: usize,
    pub metrics: ClassificationMetrics,
}

/// NDJSON を読み込む。空行は読み飛ばす。
///
/// # Errors
/// 読み込みに失敗した場合、または行の JSON が不正な場合は行番号付きのエラーを返す。
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<InputRow>> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let row: InputRow = serde_json::from_str(&line)
            .with_context(|| format!("invalid row on line {line_no}"))?;
        rows.push(row);
    }
    Ok(rows)
}

/// 行をコントローラに流し込み、推論結果を1行ずつ書き出す。
///
/// # Errors
/// パーティションの状態異常・学習データ不足・書き込み失敗をそのまま返す。
pub fn run_partition<W: Write>(rows: Vec<InputRow>, mut writer: W) -> Result<PartitionReport> {
    let span = info_span!("partition", rows = rows.len());
    let _guard = span.enter();

    let rows_in = rows.len();
    let mut controller = PartitionController::new();
    for row in rows {
        controller
            .intake(row.is_training, row.label, row.text)
            .context("failed to accept row")?;
    }
    let (training, testing, dropped) = (
        controller.training_len(),
        controller.testing_len(),
        controller.dropped_len(),
    );

    let predictions = controller.finalize().context("failed to finalize partition")?;
    let mut calculator = MetricsCalculator::new();
    let mut rows_out = 0;
    for prediction in predictions {
        let prediction = prediction.context("failed to predict row")?;
        calculator.push(&prediction.actual_label, &prediction.predicted_label);
        let output = OutputRow::from(prediction);
        serde_json::to_writer(&mut writer, &output).context("failed to encode output row")?;
        writer.write_all(b"\n").context("failed to write output row")?;
        rows_out += 1;
    }
    writer.flush().context("failed to flush output")?;

    let report = PartitionReport {
        rows_in,
        rows_out,
        training,
        testing,
        dropped,
        metrics: calculator.finalize(),
    };
    info!(
        rows_in,
        rows_out,
        training,
        testing,
        dropped,
        accuracy = report.metrics.accuracy,
        "partition processed"
    );
    Ok(report)
}

/// 設定に従って入出力を開き、1パーティションを処理する。
///
/// # Errors
/// ファイルの入出力、行の解析、パーティション処理のいずれかが失敗した場合に返す。
pub fn run(config: &Config) -> Result<PartitionReport> {
    let rows = match &config.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            read_rows(BufReader::new(file))?
        }
        None => read_rows(io::stdin().lock())?,
    };

    let report = match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output {}", path.display()))?;
            run_partition(rows, BufWriter::new(file))?
        }
        None => run_partition(rows, BufWriter::new(io::stdout().lock()))?,
    };

    if config.report_metrics {
        let summary =
            serde_json::to_string_pretty(&report).context("failed to encode metrics summary")?;
        match &config.metrics_output {
            Some(path) => std::fs::write(path, summary)
                .with_context(|| format!("failed to write metrics to {}", path.display()))?,
            None => info!(
                samples = report.metrics.samples,
                accuracy = report.metrics.accuracy,
                macro_precision = report.metrics.macro_precision,
                macro_recall = report.metrics.macro_recall,
                macro_f1 = report.metrics.macro_f1,
                weighted_f1 = report.metrics.weighted_f1,
                "evaluation summary"
            ),
        }
    }

    Ok(report)
}
