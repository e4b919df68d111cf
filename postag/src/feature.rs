use core::fmt;

use bincode::{Decode, Encode};

use crate::document::Document;

/// Separator between the class and name parts of the serialized key form.
const KEY_SEPARATOR: &str = " ^ ";

/// Composite feature identifier: a candidate class label paired with a
/// feature name.
///
/// The serialized text form is `"<label> ^ <name>"` and is used only on
/// serialization boundaries such as the optimizer wire format. Inside the
/// crate the two parts are kept separate, so labels or names containing the
/// separator cannot collide.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Decode, Encode)]
pub struct FeatureKey {
    label: String,
    name: String,
}

impl FeatureKey {
    /// Creates a key from a class label and a feature name.
    pub fn new<L, N>(label: L, name: N) -> Self
    where
        L: Into<String>,
        N: Into<String>,
    {
        Self {
            label: label.into(),
            name: name.into(),
        }
    }

    /// Parses the serialized `"<label> ^ <name>"` form.
    ///
    /// Returns [`None`] when the separator is missing.
    pub fn parse(s: &str) -> Option<Self> {
        s.split_once(KEY_SEPARATOR)
            .map(|(label, name)| Self::new(label, name))
    }

    /// The class label part.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The feature name part.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.label, KEY_SEPARATOR, self.name)
    }
}

/// The fixed set of lexical and contextual feature templates.
///
/// All length and substring operations are codepoint-aware, so multi-byte
/// scripts behave the same as ASCII. Extraction is total: any Unicode string,
/// including the empty string, yields a feature list without failing.
#[derive(Debug, Default, Clone)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the features firing for `label` on `doc`.
    ///
    /// Every template output is wrapped into a class-prefixed [`FeatureKey`];
    /// the candidate class takes no part in deciding which features fire.
    pub fn extract(&self, label: &str, doc: &Document) -> Vec<FeatureKey> {
        self.feature_names(doc)
            .into_iter()
            .map(|name| FeatureKey::new(label, name))
            .collect()
    }

    /// The bare feature names firing on `doc`, in template order.
    pub(crate) fn feature_names(&self, doc: &Document) -> Vec<String> {
        let w = doc.word();
        let len = w.chars().count();
        let mut names = vec![w.to_lowercase()];
        if len > 3 {
            names.push(format!("sub(-1)={}", suffix(w, 1)));
            names.push(format!("sub(-2)={}", suffix(w, 2)));
            names.push(format!("sub(-3)={}", suffix(w, 3)));
        }
        if len > 5 {
            names.push(format!("pre(-3)={}", strip_suffix(w, 3)));
        }
        if len > 4 {
            names.push(format!("pre(-2)={}", strip_suffix(w, 2)));
        }
        if len > 3 {
            names.push(format!("pre(-1)={}", strip_suffix(w, 1)));
        }
        if let Some(prev) = doc.left().last() {
            names.push(format!("ctx(-1)={}", prev.to_lowercase()));
        }
        if let Some(next) = doc.right().first() {
            names.push(format!("ctx(1)={}", next.to_lowercase()));
        }
        if w.chars().any(char::is_numeric) {
            names.push("has_number".to_string());
        }
        if len == 1 {
            names.push("one_letter".to_string());
        }
        names
    }
}

/// The last `n` characters of `w`, lower-cased.
fn suffix(w: &str, n: usize) -> String {
    let skip = w.chars().count().saturating_sub(n);
    w.chars().skip(skip).collect::<String>().to_lowercase()
}

/// `w` with its last `n` characters removed, lower-cased.
fn strip_suffix(w: &str, n: usize) -> String {
    let keep = w.chars().count().saturating_sub(n);
    w.chars().take(keep).collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_of(tokens: &[&str], index: usize) -> Vec<String> {
        FeatureExtractor::new().feature_names(&Document::at(tokens, index, 1))
    }

    #[test]
    fn test_word_feature_is_lowercased() {
        assert_eq!(vec!["cat"], names_of(&["Cat"], 0));
    }

    #[test]
    fn test_no_affixes_at_length_3() {
        // strict > 3 boundary: a 3-character word has no affix features
        assert_eq!(vec!["cat"], names_of(&["cat"], 0));
    }

    #[test]
    fn test_affixes_at_length_4() {
        let expected = vec!["cats", "sub(-1)=s", "sub(-2)=ts", "sub(-3)=ats", "pre(-1)=cat"];
        assert_eq!(expected, names_of(&["Cats"], 0));
    }

    #[test]
    fn test_affixes_at_length_5() {
        let expected = vec![
            "walks",
            "sub(-1)=s",
            "sub(-2)=ks",
            "sub(-3)=lks",
            "pre(-2)=wal",
            "pre(-1)=walk",
        ];
        assert_eq!(expected, names_of(&["Walks"], 0));
    }

    #[test]
    fn test_affixes_at_length_6() {
        let expected = vec![
            "walked",
            "sub(-1)=d",
            "sub(-2)=ed",
            "sub(-3)=ked",
            "pre(-3)=wal",
            "pre(-2)=walk",
            "pre(-1)=walke",
        ];
        assert_eq!(expected, names_of(&["walked"], 0));
    }

    #[test]
    fn test_context_features() {
        let expected = vec!["cat", "ctx(-1)=the", "ctx(1)=sat"];
        assert_eq!(expected, names_of(&["The", "cat", "sat"], 1));
    }

    #[test]
    fn test_context_features_absent_at_boundaries() {
        assert_eq!(vec!["the", "ctx(1)=cat"], names_of(&["The", "cat"], 0));
        assert_eq!(vec!["cat", "ctx(-1)=the"], names_of(&["The", "cat"], 1));
    }

    #[test]
    fn test_has_number() {
        let expected = vec![
            "abc123",
            "sub(-1)=3",
            "sub(-2)=23",
            "sub(-3)=123",
            "pre(-3)=abc",
            "pre(-2)=abc1",
            "pre(-1)=abc12",
            "has_number",
        ];
        assert_eq!(expected, names_of(&["abc123"], 0));
        assert!(!names_of(&["abc"], 0).contains(&"has_number".to_string()));
    }

    #[test]
    fn test_has_number_non_ascii_digits() {
        // Arabic-Indic digits count as digits
        assert_eq!(vec!["١٢٣", "has_number"], names_of(&["١٢٣"], 0));
    }

    #[test]
    fn test_one_letter_multibyte() {
        assert_eq!(vec!["猫", "one_letter"], names_of(&["猫"], 0));
        assert_eq!(vec!["ω", "one_letter"], names_of(&["Ω"], 0));
    }

    #[test]
    fn test_extraction_is_total_on_empty_string() {
        assert_eq!(vec![""], names_of(&[""], 0));
    }

    #[test]
    fn test_multibyte_affix_boundaries() {
        // 4 codepoints, so affixes fire and slicing follows codepoints
        let expected = vec![
            "あいうえ",
            "sub(-1)=え",
            "sub(-2)=うえ",
            "sub(-3)=いうえ",
            "pre(-1)=あいう",
        ];
        assert_eq!(expected, names_of(&["あいうえ"], 0));
    }

    #[test]
    fn test_extract_wraps_names_into_class_keys() {
        let doc = Document::at(&["The", "cat", "sat"], 1, 1);
        let keys = FeatureExtractor::new().extract("noun", &doc);

        let expected = vec![
            FeatureKey::new("noun", "cat"),
            FeatureKey::new("noun", "ctx(-1)=the"),
            FeatureKey::new("noun", "ctx(1)=sat"),
        ];
        assert_eq!(expected, keys);
    }

    #[test]
    fn test_feature_key_display_and_parse() {
        let key = FeatureKey::new("noun", "sub(-1)=s");

        assert_eq!("noun ^ sub(-1)=s", key.to_string());
        assert_eq!(Some(key), FeatureKey::parse("noun ^ sub(-1)=s"));
        assert_eq!(None, FeatureKey::parse("no-separator"));
    }

    #[test]
    fn test_feature_key_parse_splits_on_first_separator() {
        let key = FeatureKey::parse("noun ^ a ^ b").unwrap();

        assert_eq!("noun", key.label());
        assert_eq!("a ^ b", key.name());
    }
}
