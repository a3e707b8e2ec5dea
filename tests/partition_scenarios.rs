// パーティション単位の学習・推論を通しで確認するシナリオテスト。
use bayes_partition::{ClassifierError, PartitionController, PartitionState, PredictionRow};

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn run(rows: &[(bool, Option<&str>, Option<&str>)]) -> Result<Vec<PredictionRow>, ClassifierError> {
    let mut controller = PartitionController::new();
    for (is_training, label, text) in rows {
        controller.intake(
            *is_training,
            label.map(ToString::to_string),
            text.map(ToString::to_string),
        )?;
    }
    controller.finalize()?.collect()
}

#[test]
fn sentiment_scenario_predicts_positive() {
    let rows = run(&[
        (true, Some("pos"), Some("i love this")),
        (true, Some("neg"), Some("i hate this")),
        (false, Some("pos"), Some("i love it")),
    ])
    .expect("partition succeeds");

    assert_eq!(
        rows,
        vec![PredictionRow {
            text: s("i love it"),
            actual_label: "pos".to_string(),
            predicted_label: "pos".to_string(),
        }]
    );
}

#[test]
fn shared_token_scenario_prefers_label_with_dog() {
    let rows = run(&[
        (true, Some("a"), Some("dog cat")),
        (true, Some("b"), Some("cat cat")),
        (false, Some("b"), Some("dog dog dog")),
    ])
    .expect("partition succeeds");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].actual_label, "b");
    assert_eq!(rows[0].predicted_label, "a");
}

#[test]
fn unlabeled_rows_never_reach_output() {
    let rows = run(&[
        (true, Some("pos"), Some("good")),
        (true, None, Some("bad")),
        (false, None, Some("good")),
        (false, Some("pos"), Some("good")),
        (false, None, None),
    ])
    .expect("partition succeeds");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text.as_deref(), Some("good"));
}

#[test]
fn null_text_rows_predict_highest_prior() {
    let rows = run(&[
        (true, Some("spam"), Some("buy now")),
        (true, Some("ham"), Some("meeting notes")),
        (true, Some("ham"), Some("lunch plans")),
        (false, Some("spam"), None),
        (false, Some("spam"), Some("")),
    ])
    .expect("partition succeeds");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.predicted_label == "ham"));
    assert_eq!(rows[0].text, None);
}

#[test]
fn output_order_mirrors_testing_intake_order() {
    let rows = run(&[
        (false, Some("x"), Some("first")),
        (true, Some("x"), Some("alpha")),
        (false, Some("y"), Some("second")),
        (true, Some("y"), Some("beta")),
        (false, Some("x"), Some("third")),
    ])
    .expect("partition succeeds");

    let texts: Vec<_> = rows.iter().filter_map(|row| row.text.as_deref()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn partition_without_training_rows_fails_loudly() {
    let result = run(&[(false, Some("x"), Some("only testing"))]);
    assert_eq!(result, Err(ClassifierError::EmptyTrainingSet));
}

#[test]
fn stopword_only_training_fails_on_tokenized_testing_rows() {
    let result = run(&[
        (true, Some("a"), Some("the")),
        (true, Some("b"), Some("and")),
        (true, Some("b"), Some("")),
        (false, Some("b"), Some("brand new words")),
    ]);
    assert_eq!(result, Err(ClassifierError::EmptyVocabulary { tokens: 3 }));

    let rows = run(&[
        (true, Some("a"), Some("the")),
        (true, Some("b"), Some("and")),
        (false, Some("a"), None),
    ])
    .expect("token-free rows still score by prior");
    assert_eq!(rows[0].predicted_label, "a");
}

#[test]
fn tie_break_is_stable_across_partitions() {
    for _ in 0..5 {
        let rows = run(&[
            (true, Some("second"), Some("same words")),
            (true, Some("first"), Some("same words")),
            (false, Some("first"), Some("same words")),
            (false, Some("first"), Some("unrelated")),
        ])
        .expect("partition succeeds");
        assert!(rows.iter().all(|row| row.predicted_label == "second"));
    }
}

#[test]
fn finalized_partition_rejects_further_rows() {
    let mut controller = PartitionController::new();
    controller.intake(true, s("a"), s("text")).expect("intake");
    let predictions = controller.finalize().expect("finalize");
    assert_eq!(predictions.len(), 0);

    let error = controller
        .intake(false, s("a"), s("late"))
        .expect_err("intake after finalize");
    assert_eq!(
        error,
        ClassifierError::InvalidPartitionState {
            operation: "intake",
            state: PartitionState::Done,
        }
    );
    assert_eq!(
        error.to_string(),
        "intake is not allowed while the partition is done"
    );
}
