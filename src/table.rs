//! Typed, row-oriented tables of training and prediction data.
use std::fmt::{self, Display};
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Marker stored for a missing value.
pub const MISSING: f64 = f64::NAN;

/// Whether `value` is the missing value marker.
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Type of the values held by a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Continuous values.
    Numeric,

    /// Discrete, unordered categories. Values are stored as the index of their label.
    Nominal(Vec<String>),

    /// Points in time, stored as a numeric timestamp.
    Date,
}

/// Named, typed column of a [`Table`](struct.Table.html).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    pub fn numeric<S: Into<String>>(name: S) -> Self {
        Attribute { name: name.into(), kind: AttributeKind::Numeric }
    }

    pub fn nominal<S: Into<String>, V: Into<String>>(name: S, labels: Vec<V>) -> Self {
        let labels = labels.into_iter().map(Into::into).collect();
        Attribute { name: name.into(), kind: AttributeKind::Nominal(labels) }
    }

    pub fn date<S: Into<String>>(name: S) -> Self {
        Attribute { name: name.into(), kind: AttributeKind::Date }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal(_))
    }

    pub fn is_date(&self) -> bool {
        self.kind == AttributeKind::Date
    }

    /// Number of category labels, or `None` for non-nominal attributes.
    pub fn num_labels(&self) -> Option<usize> {
        match self.kind {
            AttributeKind::Nominal(ref labels) => Some(labels.len()),
            _ => None,
        }
    }

    /// Index of the given category label.
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        match self.kind {
            AttributeKind::Nominal(ref labels) => labels.iter().position(|l| l == label),
            _ => None,
        }
    }
}

/// Ordered collection of typed columns and rows, with an optional class column.
///
/// Every row holds exactly one value per attribute; missing values are stored as
/// [`MISSING`](constant.MISSING.html).
///
/// ```
/// use lightgbm_tabular::{Attribute, Table};
///
/// let mut table = Table::new("weather", vec![
///     Attribute::numeric("temperature"),
///     Attribute::nominal("outlook", vec!["sunny", "rainy"]),
///     Attribute::nominal("play", vec!["no", "yes"]),
/// ]);
/// table.set_class_index(Some(2)).unwrap();
/// table.add_row(vec![21.5, 0.0, 1.0]).unwrap();
/// table.add_row(vec![12.0, 1.0, 0.0]).unwrap();
/// assert_eq!(table.num_rows(), 2);
/// assert_eq!(table.class_attribute().unwrap().name(), "play");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    relation: String,
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn new<S: Into<String>>(relation: S, attributes: Vec<Attribute>) -> Self {
        Table {
            relation: relation.into(),
            attributes,
            class_index: None,
            rows: Vec::new(),
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// Append a row; its length must match the number of attributes.
    pub fn add_row(&mut self, values: Vec<f64>) -> Result<()> {
        if values.len() != self.attributes.len() {
            return Err(Error::Data(format!(
                "row has {} values, but '{}' has {} attributes",
                values.len(),
                self.relation,
                self.attributes.len()
            )));
        }
        self.rows.push(values);
        Ok(())
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    /// Designate the class column, or `None` for no class.
    pub fn set_class_index(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            if index >= self.attributes.len() {
                return Err(Error::Data(format!(
                    "class index {} out of range for {} attributes",
                    index,
                    self.attributes.len()
                )));
            }
        }
        self.class_index = index;
        Ok(())
    }

    pub fn class_attribute(&self) -> Option<&Attribute> {
        self.class_index.map(|i| &self.attributes[i])
    }

    /// Whether the given row has no class value. Always `false` when no class is set.
    pub fn has_missing_class(&self, row: usize) -> bool {
        match self.class_index {
            Some(c) => is_missing(self.rows[row][c]),
            None => false,
        }
    }

    /// Number of rows with a missing class value.
    pub fn num_missing_class(&self) -> usize {
        (0..self.rows.len()).filter(|&i| self.has_missing_class(i)).count()
    }

    /// Remove all rows with a missing class value, keeping the order of the others.
    pub fn delete_with_missing_class(&mut self) {
        if let Some(c) = self.class_index {
            self.rows.retain(|row| !is_missing(row[c]));
        }
    }

    /// Whether any non-class value is missing.
    pub fn has_missing_attribute_values(&self) -> bool {
        self.rows.iter().any(|row| {
            row.iter()
                .enumerate()
                .any(|(i, v)| Some(i) != self.class_index && is_missing(*v))
        })
    }

    /// Shuffle the rows; the same seed always yields the same order, across releases too.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.rows.shuffle(&mut rng);
    }

    /// Copy of the rows in `range`, with the same attributes and class.
    pub fn subset(&self, range: Range<usize>) -> Table {
        Table {
            relation: self.relation.clone(),
            attributes: self.attributes.clone(),
            class_index: self.class_index,
            rows: self.rows[range].to_vec(),
        }
    }

    /// Attribute layout without any rows.
    pub fn header(&self) -> Table {
        self.subset(0..0)
    }

    /// Whether `other` has the same attributes (names and types) and class.
    pub fn equal_headers(&self, other: &Table) -> bool {
        self.attributes == other.attributes && self.class_index == other.class_index
    }

    /// All values of one column, in row order.
    pub fn attribute_values(&self, column: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[column]).collect()
    }

    /// Table positions of the nominal columns other than the class.
    pub fn categorical_columns(&self) -> Vec<usize> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|&(i, a)| Some(i) != self.class_index && a.is_nominal())
            .map(|(i, _)| i)
            .collect()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} attributes, {} rows", self.relation, self.attributes.len(), self.rows.len())?;
        if let Some(class) = self.class_attribute() {
            write!(f, ", class '{}'", class.name())?;
        }
        write!(f, ")")
    }
}
