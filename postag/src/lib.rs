//! # Postag
//!
//! Postag is a maximum-entropy (log-linear) part-of-speech tagger driven by
//! hand-crafted lexical and contextual features.
//!
//! Each token is classified independently given a small window of neighboring
//! tokens: the feature templates turn a token-in-context into a sparse set of
//! named indicator features, and the classifier picks the tag whose weighted
//! feature sum is maximal. Weights are fitted by an external optimizer and
//! stored together with the tag inventory as a [`Model`].
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{prelude::*, stdin, BufReader};
//!
//! use postag::{Model, Tagger};
//!
//! let mut f = BufReader::new(File::open("model.bin").unwrap());
//! let model = Model::read(&mut f).unwrap();
//! let tagger = Tagger::from_model(model).unwrap();
//!
//! for line in stdin().lock().lines() {
//!     let line = line.unwrap();
//!     let tokens: Vec<&str> = line.split_whitespace().collect();
//!     let tags = tagger.tag(&tokens).unwrap();
//!     for (token, tag) in tokens.iter().zip(&tags) {
//!         print!("{}/{} ", token, tag);
//!     }
//!     println!();
//! }
//! ```
//!
//! Training requires the **crate feature** `train`. For more details, see
//! [`ExternalOptimizer`].

mod classifier;
mod corpus;
mod document;
mod errors;
mod feature;
mod model;
mod optimizer;
mod tagger;

pub use classifier::Classifier;
pub use corpus::TrainingSet;
pub use document::Document;
pub use errors::{Result, TaggerError};
pub use feature::{FeatureExtractor, FeatureKey};
pub use model::{Model, WeightMap};
pub use optimizer::Optimizer;
pub use tagger::{FiredFeature, Tagger};

#[cfg(feature = "train")]
pub use optimizer::ExternalOptimizer;
