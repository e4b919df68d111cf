//! Weight-optimization contract and the external optimizer driver.

use crate::corpus::TrainingSet;
use crate::errors::Result;
use crate::feature::FeatureExtractor;
use crate::model::WeightMap;

#[cfg(feature = "train")]
use std::collections::{BTreeMap, HashMap};
#[cfg(feature = "train")]
use std::io::Write;
#[cfg(feature = "train")]
use std::path::PathBuf;
#[cfg(feature = "train")]
use std::process::{Command, Stdio};
#[cfg(feature = "train")]
use std::thread;

#[cfg(feature = "train")]
use serde::Serialize;

#[cfg(feature = "train")]
use crate::errors::TaggerError;
#[cfg(feature = "train")]
use crate::feature::FeatureKey;

/// Strategy that fits feature weights to a training set.
///
/// The tagger supplies the complete, order-stable training set together with
/// the feature extractor and the class inventory; an optimizer must return
/// weights maximizing the log-likelihood of the gold labels under a softmax
/// over the per-class linear scores. Failures surface as
/// [`TaggerError::Optimization`](crate::TaggerError::Optimization) and are
/// never retried by the caller.
pub trait Optimizer {
    fn optimize(
        &self,
        training_set: &TrainingSet,
        extractor: &FeatureExtractor,
        classes: &[String],
    ) -> Result<WeightMap>;
}

/// One training instance on the optimizer's standard input.
#[cfg(feature = "train")]
#[derive(Serialize)]
struct WireInstance<'a> {
    label: &'a str,
    features: BTreeMap<&'a str, Vec<String>>,
}

/// Drives an external gradient-descent executable as a subprocess.
///
/// The training set is encoded as one JSON object per line on the child's
/// standard input: the gold label and, for every candidate class, the list of
/// serialized feature identifiers firing for that class. After end of input
/// the child must print a single JSON object mapping serialized feature
/// identifiers to weights on its standard output and exit with status zero.
///
/// # Examples
///
/// ```no_run
/// use postag::{ExternalOptimizer, Tagger, TrainingSet};
///
/// let lines = ["The article", "cat noun", "sat verb"];
/// let training_set = TrainingSet::from_corpus_lines(lines, 1);
/// let optimizer = ExternalOptimizer::new("gradient-descent");
/// let mut tagger = Tagger::new();
/// let model = tagger.train(&training_set, &optimizer).unwrap();
/// ```
#[cfg(feature = "train")]
pub struct ExternalOptimizer {
    command: PathBuf,
}

#[cfg(feature = "train")]
impl ExternalOptimizer {
    /// Creates an optimizer driving the `command` executable.
    pub fn new<P>(command: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            command: command.into(),
        }
    }

    fn encode_instances(
        training_set: &TrainingSet,
        extractor: &FeatureExtractor,
        classes: &[String],
    ) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        for (label, doc) in training_set {
            let mut features = BTreeMap::new();
            for class in classes {
                let keys = extractor
                    .extract(class, doc)
                    .iter()
                    .map(|key| key.to_string())
                    .collect();
                features.insert(class.as_str(), keys);
            }
            let instance = WireInstance {
                label: label.as_str(),
                features,
            };
            serde_json::to_writer(&mut payload, &instance).map_err(|e| {
                TaggerError::optimization(format!("failed to encode the training set: {e}"))
            })?;
            payload.push(b'\n');
        }
        Ok(payload)
    }

    fn decode_weights(stdout: &[u8]) -> Result<WeightMap> {
        let raw: HashMap<String, f64> = serde_json::from_slice(stdout)
            .map_err(|e| TaggerError::optimization(format!("undecodable optimizer output: {e}")))?;
        let mut weights = WeightMap::new();
        for (key, weight) in raw {
            let key = FeatureKey::parse(&key).ok_or_else(|| {
                TaggerError::optimization(format!(
                    "malformed feature identifier in optimizer output: {key:?}"
                ))
            })?;
            weights.insert(key, weight);
        }
        Ok(weights)
    }
}

#[cfg(feature = "train")]
impl Optimizer for ExternalOptimizer {
    fn optimize(
        &self,
        training_set: &TrainingSet,
        extractor: &FeatureExtractor,
        classes: &[String],
    ) -> Result<WeightMap> {
        let payload = Self::encode_instances(training_set, extractor, classes)?;

        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TaggerError::optimization(format!("failed to launch {:?}: {e}", self.command))
            })?;
        let mut stdin = child.stdin.take().ok_or_else(|| {
            TaggerError::optimization("failed to open the optimizer's standard input")
        })?;

        // The child may start emitting output before the whole training set
        // has been written, so feed it from a separate thread to avoid a pipe
        // deadlock.
        let feeder = thread::spawn(move || stdin.write_all(&payload));
        let output = child.wait_with_output().map_err(|e| {
            TaggerError::optimization(format!("failed to wait for the optimizer: {e}"))
        })?;
        let fed = feeder
            .join()
            .map_err(|_| TaggerError::optimization("the optimizer feeder thread panicked"))?;

        if !output.status.success() {
            return Err(TaggerError::optimization(format!(
                "the optimizer exited abnormally: {}",
                output.status
            )));
        }
        fed.map_err(|e| TaggerError::optimization(format!("failed to feed the optimizer: {e}")))?;

        Self::decode_weights(&output.stdout)
    }
}
