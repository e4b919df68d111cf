use crate::document::Document;
use crate::errors::{Result, TaggerError};
use crate::feature::FeatureExtractor;
use crate::model::WeightMap;

/// Feature-based linear classifier implementing the decoded maximum-entropy
/// decision rule.
///
/// Scores are plain weighted feature sums. The softmax normalization used
/// during training is monotonic in these sums, so the arg-max over linear
/// scores selects the same class as the arg-max over probabilities and no
/// exponentiation is needed at decode time.
#[derive(Debug, Clone)]
pub struct Classifier {
    extractor: FeatureExtractor,
    weights: WeightMap,
}

impl Classifier {
    /// Creates a classifier from a feature extractor and a weight mapping.
    pub fn new(extractor: FeatureExtractor, weights: WeightMap) -> Self {
        Self { extractor, weights }
    }

    /// The weight mapping backing this classifier.
    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// The linear score of `label` for `doc`: the sum of the weights of all
    /// features firing for the pair. Unweighted features contribute nothing.
    pub fn score(&self, label: &str, doc: &Document) -> f64 {
        self.extractor
            .extract(label, doc)
            .iter()
            .map(|key| self.weights.weight(key))
            .sum()
    }

    /// Selects the highest-scoring class for `doc`.
    ///
    /// Ties resolve to the earliest class in `classes` order, so repeated
    /// calls with identical inputs always return the same class.
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidArgument`] will be returned if `classes` is
    /// empty.
    pub fn classify<'a>(&self, classes: &'a [String], doc: &Document) -> Result<&'a str> {
        let (first, rest) = classes
            .split_first()
            .ok_or_else(|| TaggerError::invalid_argument("classes", "must not be empty"))?;
        let mut best = first.as_str();
        let mut best_score = self.score(best, doc);
        for label in rest {
            let score = self.score(label, doc);
            if score > best_score {
                best = label;
                best_score = score;
            }
        }
        Ok(best)
    }
}
