//! # mvaperf-sources
//!
//! Readers for the text files classifiers leave behind, one adapter per
//! layout, plus the helpers that turn a directory of neural-network outputs
//! into tagged configurations.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Directory scanning for score files.
pub mod discover;

/// One fill pass from a reader into a response pair.
pub mod fill;

/// Score file layouts and their line readers.
pub mod format;

/// Training configuration encoded in file names.
pub mod tags;

pub use discover::discover_files;
pub use fill::{fill_file, fill_response};
pub use format::{
    LabelFirstCsvReader, LabelledReader, ScoreFormat, ScoreReader, ScoredEvent, SplitHalvesReader,
};
pub use tags::{TrainingTags, features_title};
