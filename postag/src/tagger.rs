use crate::classifier::Classifier;
use crate::corpus::TrainingSet;
use crate::document::Document;
use crate::errors::{Result, TaggerError};
use crate::feature::FeatureExtractor;
use crate::model::{Model, WeightMap};
use crate::optimizer::Optimizer;

/// The tags a freshly constructed tagger recognizes, before a trained model
/// overrides them.
const DEFAULT_CLASSES: &[&str] = &[
    "other",
    "punctuation",
    "verb",
    "article",
    "noun",
    "preposition",
    "adjective",
    "conjunction",
    "adverb",
    "particle",
    "pronoun",
    "numeral",
];

/// Context radius used for both training and tagging.
const CONTEXT_SIZE: usize = 1;

/// A feature name together with the classes carrying a weight for it.
///
/// Produced by [`Tagger::features_fired`] for debugging why a token was
/// assigned its tag.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredFeature {
    /// The bare feature name, without the class prefix.
    pub name: String,

    /// (class, weight) pairs in tag-inventory order. Classes whose composite
    /// key carries no weight are omitted, so this may be empty.
    pub weights: Vec<(String, f64)>,
}

/// Part-of-speech tagger orchestrating the tag inventory, the feature
/// templates, and the current weights.
///
/// Once a model is in place a tagger contains only owned immutable data, so
/// it can be shared across threads for concurrent tagging.
pub struct Tagger {
    classes: Vec<String>,
    context_size: usize,
    extractor: FeatureExtractor,
    classifier: Classifier,
}

impl Tagger {
    /// Creates a tagger with the default 12-tag inventory and no weights.
    pub fn new() -> Self {
        let classes = DEFAULT_CLASSES.iter().map(|c| c.to_string()).collect();
        Self::with_classes(classes, WeightMap::new())
    }

    /// Creates a tagger adopting a model's tag inventory and weights.
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidModel`] will be returned if the model contains
    /// no classes.
    pub fn from_model(model: Model) -> Result<Self> {
        if model.classes().is_empty() {
            return Err(TaggerError::invalid_model("the model contains no classes"));
        }
        let Model { classes, weights } = model;
        Ok(Self::with_classes(classes, weights))
    }

    fn with_classes(classes: Vec<String>, weights: WeightMap) -> Self {
        let extractor = FeatureExtractor::new();
        Self {
            classifier: Classifier::new(extractor.clone(), weights),
            classes,
            context_size: CONTEXT_SIZE,
            extractor,
        }
    }

    /// Replaces the weight store, keeping the tag inventory fixed.
    ///
    /// Used for inference-only flows where the inventory was fixed at
    /// construction.
    pub fn set_weights(&mut self, weights: WeightMap) {
        self.classifier = Classifier::new(self.extractor.clone(), weights);
    }

    /// The classes this tagger recognizes, in classification order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The classifier used for tagging.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Tags a sequence of tokens.
    ///
    /// # Returns
    ///
    /// One tag per token, in input order; an empty input yields an empty
    /// sequence.
    pub fn tag<S>(&self, tokens: &[S]) -> Result<Vec<String>>
    where
        S: AsRef<str>,
    {
        let mut tags = Vec::with_capacity(tokens.len());
        for index in 0..tokens.len() {
            let doc = Document::at(tokens, index, self.context_size);
            tags.push(self.classifier.classify(&self.classes, &doc)?.to_string());
        }
        Ok(tags)
    }

    /// Trains a model on `training_set` and makes it the active model.
    ///
    /// The tag inventory is replaced by the distinct gold labels of the set,
    /// in first-occurrence order, before the optimizer runs.
    ///
    /// # Errors
    ///
    /// [`TaggerError::EmptySet`] will be returned if the set contains no
    /// documents; optimizer failures propagate unchanged.
    pub fn train(&mut self, training_set: &TrainingSet, optimizer: &dyn Optimizer) -> Result<Model> {
        if training_set.is_empty() {
            return Err(TaggerError::empty_set("train"));
        }
        let classes = training_set.class_set();
        let weights = optimizer.optimize(training_set, &self.extractor, &classes)?;
        let model = Model::new(classes, weights);
        self.classes = model.classes().to_vec();
        self.set_weights(model.weights().clone());
        Ok(model)
    }

    /// Computes the prediction accuracy of the current model on
    /// `training_set`.
    ///
    /// # Returns
    ///
    /// The fraction of documents whose predicted class equals the gold label,
    /// in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// [`TaggerError::EmptySet`] will be returned if the set contains no
    /// documents.
    pub fn evaluate(&self, training_set: &TrainingSet) -> Result<f64> {
        if training_set.is_empty() {
            return Err(TaggerError::empty_set("evaluate"));
        }
        let mut correct = 0usize;
        for (gold, doc) in training_set {
            if self.classifier.classify(&self.classes, doc)? == gold {
                correct += 1;
            }
        }
        Ok(correct as f64 / training_set.len() as f64)
    }

    /// Shows which features fire for the token at `index` and the weight each
    /// class assigns to them.
    ///
    /// Inverts the per-class feature view into a per-feature one: names are
    /// listed in emission order and, under each name, classes in inventory
    /// order. A (name, class) pair is included only when its composite key is
    /// present in `weights`; absent entries are omitted rather than shown as
    /// zero.
    ///
    /// # Errors
    ///
    /// [`TaggerError::InvalidArgument`] will be returned if `index` is out of
    /// range for `tokens`.
    pub fn features_fired<S>(
        &self,
        weights: &WeightMap,
        tokens: &[S],
        index: usize,
    ) -> Result<Vec<FiredFeature>>
    where
        S: AsRef<str>,
    {
        if index >= tokens.len() {
            return Err(TaggerError::invalid_argument(
                "index",
                format!("out of range for {} tokens", tokens.len()),
            ));
        }
        let doc = Document::at(tokens, index, self.context_size);
        let mut fired: Vec<FiredFeature> = vec![];
        for class in &self.classes {
            for key in self.extractor.extract(class, &doc) {
                let pos = match fired.iter().position(|f| f.name == key.name()) {
                    Some(pos) => pos,
                    None => {
                        fired.push(FiredFeature {
                            name: key.name().to_string(),
                            weights: vec![],
                        });
                        fired.len() - 1
                    }
                };
                if weights.contains(&key) {
                    fired[pos].weights.push((class.clone(), weights.weight(&key)));
                }
            }
        }
        Ok(fired)
    }
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureKey;

    struct StubOptimizer(WeightMap);

    impl Optimizer for StubOptimizer {
        fn optimize(
            &self,
            _training_set: &TrainingSet,
            _extractor: &FeatureExtractor,
            _classes: &[String],
        ) -> Result<WeightMap> {
            Ok(self.0.clone())
        }
    }

    struct FailingOptimizer;

    impl Optimizer for FailingOptimizer {
        fn optimize(
            &self,
            _training_set: &TrainingSet,
            _extractor: &FeatureExtractor,
            _classes: &[String],
        ) -> Result<WeightMap> {
            Err(TaggerError::optimization("did not converge"))
        }
    }

    #[test]
    fn test_tag_empty_sequence() {
        let tagger = Tagger::new();

        assert!(tagger.tag::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_tag_returns_one_tag_per_token() {
        let tagger = Tagger::new();
        let tokens = ["The", "cat", "sat"];

        let tags = tagger.tag(&tokens).unwrap();
        assert_eq!(3, tags.len());
    }

    #[test]
    fn test_tag_without_weights_falls_back_to_first_class() {
        // all scores are zero, so the tie-break picks the first class
        let tagger = Tagger::new();

        let tags = tagger.tag(&["The", "cat"]).unwrap();
        assert_eq!(vec!["other", "other"], tags);
    }

    #[test]
    fn test_tag_single_token() {
        let tagger = Tagger::new();

        assert_eq!(1, tagger.tag(&["alone"]).unwrap().len());
    }

    #[test]
    fn test_set_weights_changes_predictions() {
        let mut tagger = Tagger::new();
        let mut weights = WeightMap::new();
        weights.insert(FeatureKey::new("noun", "cat"), 1.0);
        tagger.set_weights(weights);

        assert_eq!(vec!["noun"], tagger.tag(&["cat"]).unwrap());
    }

    #[test]
    fn test_from_model_adopts_classes() {
        let model = Model::new(
            vec!["noun".to_string(), "verb".to_string()],
            WeightMap::new(),
        );

        let tagger = Tagger::from_model(model).unwrap();
        assert_eq!(vec!["noun", "verb"], tagger.classes());
    }

    #[test]
    fn test_from_model_rejects_empty_inventory() {
        let model = Model::new(vec![], WeightMap::new());

        let result = Tagger::from_model(model);
        assert!(matches!(result, Err(TaggerError::InvalidModel(_))));
    }

    #[test]
    fn test_train_rewires_inventory_in_first_occurrence_order() {
        let lines = ["the article", "cat noun", "ran verb", "a article"];
        let training_set = TrainingSet::from_corpus_lines(lines, 1);
        let mut tagger = Tagger::new();

        let model = tagger
            .train(&training_set, &StubOptimizer(WeightMap::new()))
            .unwrap();
        assert_eq!(vec!["article", "noun", "verb"], model.classes());
        assert_eq!(vec!["article", "noun", "verb"], tagger.classes());
    }

    #[test]
    fn test_train_adopts_optimizer_weights() {
        let training_set = TrainingSet::from_corpus_lines(["cat noun", "ran verb"], 1);
        let mut weights = WeightMap::new();
        weights.insert(FeatureKey::new("noun", "cat"), 1.0);
        weights.insert(FeatureKey::new("verb", "ran"), 1.0);
        let mut tagger = Tagger::new();

        let model = tagger.train(&training_set, &StubOptimizer(weights)).unwrap();
        assert_eq!(2, model.weights().len());
        assert_eq!(vec!["noun", "verb"], tagger.tag(&["cat", "ran"]).unwrap());
    }

    #[test]
    fn test_train_rejects_empty_set() {
        let mut tagger = Tagger::new();

        let result = tagger.train(&TrainingSet::new(), &StubOptimizer(WeightMap::new()));
        assert!(matches!(result, Err(TaggerError::EmptySet(_))));
    }

    #[test]
    fn test_train_propagates_optimizer_failure() {
        let training_set = TrainingSet::from_corpus_lines(["cat noun"], 1);
        let mut tagger = Tagger::new();

        let result = tagger.train(&training_set, &FailingOptimizer);
        assert!(matches!(result, Err(TaggerError::Optimization(_))));
    }

    #[test]
    fn test_evaluate_perfect_model() {
        let lines = ["The article", "cat noun"];
        let training_set = TrainingSet::from_corpus_lines(lines, 1);
        let mut tagger = Tagger::new();
        let mut weights = WeightMap::new();
        weights.insert(FeatureKey::new("article", "the"), 1.0);
        weights.insert(FeatureKey::new("noun", "cat"), 1.0);
        tagger.set_weights(weights);

        assert_eq!(1.0, tagger.evaluate(&training_set).unwrap());
    }

    #[test]
    fn test_evaluate_partial_accuracy() {
        let lines = ["The article", "cat noun"];
        let training_set = TrainingSet::from_corpus_lines(lines, 1);
        let mut tagger = Tagger::new();
        let mut weights = WeightMap::new();
        weights.insert(FeatureKey::new("article", "the"), 1.0);
        // "cat" keeps score zero everywhere and falls back to "other"
        tagger.set_weights(weights);

        assert_eq!(0.5, tagger.evaluate(&training_set).unwrap());
    }

    #[test]
    fn test_evaluate_rejects_empty_set() {
        let tagger = Tagger::new();

        let result = tagger.evaluate(&TrainingSet::new());
        assert!(matches!(result, Err(TaggerError::EmptySet(_))));
    }

    #[test]
    fn test_features_fired_collects_weights_per_class() {
        let tagger = Tagger::new();
        let mut weights = WeightMap::new();
        weights.insert(FeatureKey::new("noun", "cat"), 0.5);
        weights.insert(FeatureKey::new("verb", "cat"), -0.25);

        let fired = tagger
            .features_fired(&weights, &["The", "cat", "sat"], 1)
            .unwrap();
        let cat = fired.iter().find(|f| f.name == "cat").unwrap();
        // inventory order: "verb" precedes "noun"
        let expected = vec![("verb".to_string(), -0.25), ("noun".to_string(), 0.5)];
        assert_eq!(expected, cat.weights);
    }

    #[test]
    fn test_features_fired_omits_absent_weights() {
        let tagger = Tagger::new();
        let mut weights = WeightMap::new();
        weights.insert(FeatureKey::new("noun", "cat"), 0.5);

        let fired = tagger.features_fired(&weights, &["cat"], 0).unwrap();
        for feature in &fired {
            for (class, _) in &feature.weights {
                assert!(weights.contains(&FeatureKey::new(class.clone(), feature.name.clone())));
            }
        }
        let one_letter = fired.iter().find(|f| f.name == "one_letter");
        assert!(one_letter.is_none());
        let unweighted = fired.iter().find(|f| f.name == "cat").unwrap();
        assert_eq!(1, unweighted.weights.len());
    }

    #[test]
    fn test_features_fired_keeps_unweighted_names() {
        let tagger = Tagger::new();

        let fired = tagger
            .features_fired(&WeightMap::new(), &["The", "cat"], 1)
            .unwrap();
        let names: Vec<&str> = fired.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(vec!["cat", "ctx(-1)=the"], names);
        assert!(fired.iter().all(|f| f.weights.is_empty()));
    }

    #[test]
    fn test_features_fired_rejects_out_of_range_index() {
        let tagger = Tagger::new();

        let result = tagger.features_fired(&WeightMap::new(), &["cat"], 1);
        assert!(matches!(result, Err(TaggerError::InvalidArgument(_))));
    }
}
