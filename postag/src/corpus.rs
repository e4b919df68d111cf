//! Training-set construction from annotated corpora.

use crate::document::Document;

/// An ordered collection of (gold tag, [`Document`]) pairs.
#[derive(Debug, Default, Clone)]
pub struct TrainingSet {
    documents: Vec<(String, Document)>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses corpus lines of the form `"<token> <tag>"`.
    ///
    /// Each line is split on single ASCII spaces and its fields are trimmed.
    /// Lines with fewer than two fields are skipped by policy, never reported
    /// as errors, but their first field still occupies its position in the
    /// token sequence so that the context windows of surviving lines span the
    /// original token order.
    ///
    /// # Arguments
    ///
    /// * `lines` - Corpus lines, one token-tag pair per line.
    /// * `context_size` - Context radius of the generated documents.
    pub fn from_corpus_lines<I, S>(lines: I, context_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = vec![];
        let mut tags = vec![];
        for line in lines {
            let mut fields = line.as_ref().split(' ').map(str::trim);
            let word = fields.next().unwrap_or("");
            words.push(word.to_string());
            tags.push(fields.next().map(str::to_string));
        }
        let mut training_set = Self::new();
        for (index, tag) in tags.into_iter().enumerate() {
            if let Some(tag) = tag {
                let doc = Document::at(&words, index, context_size).with_label(tag.as_str());
                training_set.push(tag, doc);
            }
        }
        training_set
    }

    /// Appends a labeled document.
    pub fn push<S>(&mut self, tag: S, doc: Document)
    where
        S: Into<String>,
    {
        self.documents.push((tag.into(), doc));
    }

    /// The number of documents in the set.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The (gold tag, document) pairs in corpus order.
    pub fn documents(&self) -> &[(String, Document)] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, Document)> {
        self.documents.iter()
    }

    /// The distinct gold labels in first-occurrence order.
    pub fn class_set(&self) -> Vec<String> {
        let mut classes: Vec<String> = vec![];
        for (tag, _) in &self.documents {
            if !classes.iter().any(|c| c == tag) {
                classes.push(tag.clone());
            }
        }
        classes
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a (String, Document);
    type IntoIter = std::slice::Iter<'a, (String, Document)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
