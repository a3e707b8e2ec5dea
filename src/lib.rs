#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]

pub mod app;
pub mod classification;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod observability;
pub mod partition;
pub mod schema;

pub use classification::{
    LabelScore, LabeledDocument, NaiveBayesModel, Normalizer, Predictor, Trainer,
};
pub use error::ClassifierError;
pub use partition::{PartitionController, PartitionState, PredictionRow, Predictions};
