/// A classification instance: one target token together with a bounded window
/// of its neighbors.
///
/// Contexts are stored in textual order and truncated at the sequence
/// boundaries, never padded with sentinel tokens. A document built from an
/// annotated corpus additionally carries its gold class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    word: String,
    left: Vec<String>,
    right: Vec<String>,
    label: Option<String>,
}

impl Document {
    /// Creates a document for the token at `index`.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The full token sequence.
    /// * `index` - Position of the target token.
    /// * `window` - Context radius; at most `window` tokens are kept on each
    ///   side.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for `tokens`.
    pub fn at<S>(tokens: &[S], index: usize, window: usize) -> Self
    where
        S: AsRef<str>,
    {
        let start = index.saturating_sub(window);
        let end = tokens.len().min(index + window + 1);
        Self {
            word: tokens[index].as_ref().to_string(),
            left: tokens[start..index]
                .iter()
                .map(|t| t.as_ref().to_string())
                .collect(),
            right: tokens[index + 1..end]
                .iter()
                .map(|t| t.as_ref().to_string())
                .collect(),
            label: None,
        }
    }

    /// Attaches a gold class label.
    pub fn with_label<S>(mut self, label: S) -> Self
    where
        S: Into<String>,
    {
        self.label = Some(label.into());
        self
    }

    /// The target token.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Left-context tokens in textual order; the last one is the immediate
    /// left neighbor.
    pub fn left(&self) -> &[String] {
        &self.left
    }

    /// Right-context tokens in textual order; the first one is the immediate
    /// right neighbor.
    pub fn right(&self) -> &[String] {
        &self.right
    }

    /// The gold class label, if this document was built from an annotated
    /// corpus.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
