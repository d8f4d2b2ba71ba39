//! Conversion of [`Table`](../struct.Table.html)s into LightGBM's dense matrix format.
use crate::dataset::Dataset;
use crate::error::LgbmResult;
use crate::table::Table;

/// Dense, row-major copy of a table's feature columns, with the class column split off.
///
/// Column order is the table's, minus the class column. A model trained from a matrix expects
/// rows in exactly this order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    values: Vec<f64>,
    num_rows: usize,
    num_features: usize,
    feature_names: Vec<String>,
    labels: Option<Vec<f32>>,
    categorical: Vec<usize>,
}

impl FeatureMatrix {
    /// Copy every non-class value of `table` into a flat buffer.
    pub fn from_table(table: &Table) -> Self {
        let class_index = table.class_index();

        let mut feature_names = Vec::with_capacity(table.num_attributes());
        let mut categorical = Vec::new();
        for (i, attr) in table.attributes().iter().enumerate() {
            if Some(i) == class_index {
                continue;
            }
            if attr.is_nominal() {
                categorical.push(feature_names.len());
            }
            feature_names.push(attr.name().to_owned());
        }
        let num_features = feature_names.len();

        let labels = class_index.map(|c| table.attribute_values(c).into_iter().map(|v| v as f32).collect());

        let mut values = vec![0.0; table.num_rows() * num_features];
        for (row_index, row) in table.rows().iter().enumerate() {
            let offset = row_index * num_features;
            let features = row
                .iter()
                .enumerate()
                .filter(|&(i, _)| Some(i) != class_index)
                .map(|(_, v)| *v);
            for (n, value) in features.enumerate() {
                values[offset + n] = value;
            }
        }

        FeatureMatrix {
            values,
            num_rows: table.num_rows(),
            num_features,
            feature_names,
            labels,
            categorical,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Value of one cell.
    pub fn get(&self, row: usize, feature: usize) -> f64 {
        self.values[row * self.num_features + feature]
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Class values per row, or `None` if the table has no class.
    pub fn labels(&self) -> Option<&[f32]> {
        self.labels.as_deref()
    }

    /// Matrix positions of the nominal feature columns.
    pub fn categorical(&self) -> &[usize] {
        &self.categorical
    }

    /// Build the engine dataset holding this matrix, its feature names and labels.
    ///
    /// Pass the training dataset as `reference` when building a validation or test dataset.
    pub fn to_dataset(&self, params: &str, reference: Option<&Dataset>) -> LgbmResult<Dataset> {
        Dataset::from_matrix(self, params, reference)
    }
}

/// Convert `table` straight into an engine dataset.
pub fn to_dataset(table: &Table, params: &str, reference: Option<&Dataset>) -> LgbmResult<Dataset> {
    FeatureMatrix::from_table(table).to_dataset(params, reference)
}

/// Feature values of a single row, i.e. every value except the class.
pub fn row_features(row: &[f64], class_index: Option<usize>) -> Vec<f64> {
    row.iter()
        .enumerate()
        .filter(|&(i, _)| Some(i) != class_index)
        .map(|(_, v)| *v)
        .collect()
}
