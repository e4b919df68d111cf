use std::io::{Read, Write};

use bincode::{
    de::Decoder,
    enc::Encoder,
    error::{DecodeError, EncodeError},
    Decode, Encode,
};
use hashbrown::HashMap;

use crate::errors::Result;
use crate::feature::FeatureKey;

/// Mapping from feature identifier to learned weight.
///
/// Missing entries read as weight 0, so an unseen feature simply contributes
/// nothing to a score. Weight keys whose class label is not part of the tag
/// inventory in use are tolerated; they are never looked up and never fire.
#[derive(Debug, Default, Clone)]
pub struct WeightMap(HashMap<FeatureKey, f64>);

impl WeightMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// The weight of `key`, or 0 when the key is absent.
    pub fn weight(&self, key: &FeatureKey) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    /// Whether `key` carries an explicit weight.
    pub fn contains(&self, key: &FeatureKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: FeatureKey, weight: f64) {
        self.0.insert(key, weight);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for WeightMap {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl FromIterator<(FeatureKey, f64)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (FeatureKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<Context> Decode<Context> for WeightMap {
    fn decode<D: Decoder<Context = Context>>(decoder: &mut D) -> Result<Self, DecodeError> {
        let raw: Vec<(FeatureKey, f64)> = Decode::decode(decoder)?;
        Ok(Self(raw.into_iter().collect()))
    }
}

impl<'de, Context> bincode::BorrowDecode<'de, Context> for WeightMap {
    fn borrow_decode<D: bincode::de::BorrowDecoder<'de, Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, DecodeError> {
        Decode::decode(decoder)
    }
}

impl Encode for WeightMap {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        let raw: Vec<(&FeatureKey, &f64)> = self.0.iter().collect();
        Encode::encode(&raw, encoder)?;
        Ok(())
    }
}

/// Model data: the tag inventory and the learned weights.
///
/// A model is an immutable value; training produces a fresh one instead of
/// mutating the tagger in place, so taggers can be rebuilt from or compared
/// against prior models safely.
#[derive(Debug, Clone, PartialEq, Decode, Encode)]
pub struct Model {
    pub(crate) classes: Vec<String>,
    pub(crate) weights: WeightMap,
}

impl Model {
    /// Creates a model from a tag inventory and a weight mapping.
    pub fn new(classes: Vec<String>, weights: WeightMap) -> Self {
        Self { classes, weights }
    }

    /// The tag inventory, in classification order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The weight mapping.
    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        bincode::encode_into_std_write(self, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        Ok(bincode::decode_from_std_read(
            rdr,
            bincode::config::standard(),
        )?)
    }
}
