use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::booster::{Booster, ImportanceType, PredictType};
use crate::capabilities::{Capabilities, Capability};
use crate::convert::{self, FeatureMatrix};
use crate::error::{Error, Result};
use crate::parameters::{ClassifierOptions, EngineConfig, Objective, OptionInfo};
use crate::table::Table;

/// Contract between a learning scheme and the code driving it.
pub trait Classifier {
    /// Replace the current options by parsing command-line style flags.
    fn configure(&mut self, args: &[&str]) -> Result<()>;

    /// Current options as flags accepted by `configure`.
    fn option_args(&self) -> Vec<String>;

    /// Description of the flags accepted by `configure`.
    fn describe_options(&self) -> Vec<OptionInfo>;

    /// Data types that `build` accepts with the current options.
    fn capabilities(&self) -> Capabilities;

    /// Train on `table`, replacing any previous model.
    fn build(&mut self, table: &Table) -> Result<()>;

    /// Predict the class value of a row laid out like the training table.
    ///
    /// Nominal classes yield the index of the predicted label.
    fn classify(&mut self, row: &[f64]) -> Result<f64>;

    /// Per-label probabilities for nominal classes, the predicted value for numeric ones.
    fn distribution(&mut self, row: &[f64]) -> Result<Vec<f64>>;
}

/// Outcome of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
    /// Iteration count reached. On an early stop this is the 1-based number of the iteration
    /// that reported there were no further useful splits.
    pub iterations: usize,
    /// Whether LightGBM finished before the configured number of iterations.
    pub stopped_early: bool,
    pub training_rows: usize,
    pub validation_rows: usize,
}

/// Gradient boosted decision trees trained by LightGBM on a [`Table`](struct.Table.html).
///
/// LightGBM is a gradient boosting framework that uses tree based learning algorithms, see
/// <https://github.com/microsoft/LightGBM> and:
///
/// Guolin Ke, Qi Meng, Thomas Finley, Taifeng Wang, Wei Chen, Weidong Ma, Qiwei Ye, Tie-Yan Liu:
/// LightGBM: A Highly Efficient Gradient Boosting Decision Tree. In: Advances in Neural
/// Information Processing Systems, 3149-3157, 2017.
///
/// Only the model text, the parameters it was trained with and the training table's layout are
/// persisted; the native booster is rebuilt from the model text on the first prediction after
/// loading or after [`close`](#method.close).
///
/// ```no_run
/// use lightgbm_tabular::{Attribute, Classifier, LightGbm, Table};
/// use lightgbm_tabular::parameters::{ClassifierOptionsBuilder, Objective};
///
/// let mut table = Table::new("example", vec![
///     Attribute::numeric("x"),
///     Attribute::nominal("class", vec!["neg", "pos"]),
/// ]);
/// table.set_class_index(Some(1)).unwrap();
/// for i in 0..100 {
///     table.add_row(vec![i as f64, if i < 50 { 0.0 } else { 1.0 }]).unwrap();
/// }
///
/// let options = ClassifierOptionsBuilder::default()
///     .objective(Objective::Binary)
///     .num_iterations(20)
///     .build()
///     .unwrap();
/// let mut model = LightGbm::new(options);
/// model.train(&table).unwrap();
/// assert_eq!(model.classify(&[80.0, f64::NAN]).unwrap(), 1.0);
/// ```
#[derive(Default, Serialize, Deserialize)]
pub struct LightGbm {
    options: ClassifierOptions,
    model: Option<String>,
    actual_parameters: Option<String>,
    header: Option<Table>,
    #[serde(skip)]
    booster: Option<Booster<'static>>,
}

const PROJECT_URL: &str = "https://github.com/microsoft/LightGBM";

const REFERENCE: &str = "Guolin Ke, Qi Meng, Thomas Finley, Taifeng Wang, Wei Chen, Weidong Ma, Qiwei Ye, \
Tie-Yan Liu: LightGBM: A Highly Efficient Gradient Boosting Decision Tree. In: Advances in Neural \
Information Processing Systems, Curran Associates, Inc., 3149-3157, 2017. \
https://proceedings.neurips.cc/paper/2017/file/6449f44a102fde848669bdd9eb6b76fa-Paper.pdf";

impl LightGbm {
    pub fn new(options: ClassifierOptions) -> Self {
        LightGbm { options, ..Default::default() }
    }

    /// Short description of the learning scheme, with the paper it is based on.
    pub fn global_info() -> String {
        format!(
            "LightGBM is a gradient boosting framework that uses tree based learning algorithms. \
             It is designed to be distributed and efficient.\n\nFor more information see:\n\n{}\n\n{}",
            PROJECT_URL, REFERENCE
        )
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ClassifierOptions {
        &mut self.options
    }

    /// Model in LightGBM's text format, if trained.
    pub fn model_text(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Configuration string the current model was trained with.
    pub fn actual_parameters(&self) -> Option<&str> {
        self.actual_parameters.as_deref()
    }

    /// Layout (attributes and class) of the data the current model was trained on.
    pub fn header(&self) -> Option<&Table> {
        self.header.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Whether a native booster is currently held in memory.
    pub fn is_loaded(&self) -> bool {
        self.booster.is_some()
    }

    /// Train a new model on `table`.
    ///
    /// Rows with a missing class are ignored. With a validation percentage set, the last
    /// `round(rows × percentage / 100)` rows (after the optional shuffle) are held out and
    /// evaluated by LightGBM after each iteration.
    ///
    /// On error the previous model, if any, is kept.
    pub fn train(&mut self, table: &Table) -> Result<TrainingSummary> {
        self.capabilities().test(table)?;

        let mut data = table.clone();
        data.delete_with_missing_class();
        let (train, valid) = split_for_validation(data, &self.options)?;

        let matrix = FeatureMatrix::from_table(&train);
        let config = EngineConfig::for_table(&train, matrix.categorical(), &self.options);
        let dataset_params = config.dataset_parameters();
        let config = config.to_string();
        info!("Training on {} with parameters: {}", train, config);

        let dtrain = matrix.to_dataset(&dataset_params, None)?;
        let dvalid = match valid {
            Some(ref valid) => Some(convert::to_dataset(valid, &dataset_params, Some(&dtrain))?),
            None => None,
        };

        let mut booster = Booster::create(&dtrain, &config)?;
        if let Some(ref dvalid) = dvalid {
            booster.add_validation_data(dvalid)?;
        }

        let num_iterations = self.options.num_iterations() as usize;
        let mut iterations = num_iterations;
        let mut stopped_early = false;
        for i in 0..num_iterations {
            if booster.update_one_iter()? {
                info!("Stopping at iteration {} out of {}", i + 1, num_iterations);
                iterations = i + 1;
                stopped_early = true;
                break;
            }
            if dvalid.is_some() && log_enabled!(log::Level::Debug) {
                debug!("Iteration {}: validation metrics {:?}", i + 1, booster.eval(1)?);
            }
        }

        let model = booster.save_to_string(0, None, ImportanceType::Gain)?;
        // the training booster borrows the datasets, keep a standalone copy for predictions
        let resident = Booster::load_from_string(&model)?;

        let summary = TrainingSummary {
            iterations,
            stopped_early,
            training_rows: train.num_rows(),
            validation_rows: valid.as_ref().map_or(0, Table::num_rows),
        };
        self.model = Some(model);
        self.actual_parameters = Some(config);
        self.header = Some(train.header());
        self.booster = Some(resident);
        Ok(summary)
    }

    /// Get the resident booster, rebuilding it from the model text if necessary.
    fn ensure_loaded(&mut self) -> Result<&Booster<'static>> {
        if self.booster.is_none() {
            let model = self.model.as_ref().ok_or(Error::Untrained)?;
            self.booster = Some(Booster::load_from_string(model)?);
        }
        self.booster.as_ref().ok_or(Error::Untrained)
    }

    /// Raw output of LightGBM's normal prediction for one row.
    fn predict_row(&mut self, row: &[f64]) -> Result<Vec<f64>> {
        self.ensure_loaded()?;
        let header = self.header.as_ref().ok_or(Error::Untrained)?;
        if row.len() != header.num_attributes() {
            return Err(Error::Data(format!(
                "row has {} values, but the model was trained on {} attributes",
                row.len(),
                header.num_attributes()
            )));
        }
        let features = convert::row_features(row, header.class_index());

        let booster = self.booster.as_ref().ok_or(Error::Untrained)?;
        let output = booster.predict_single_row(&features, PredictType::Normal)?;
        if output.is_empty() {
            return Err(Error::Data("LightGBM returned no prediction".to_owned()));
        }
        Ok(output)
    }

    fn nominal_class(&self) -> bool {
        self.header
            .as_ref()
            .and_then(Table::class_attribute)
            .map_or(false, |c| c.is_nominal())
    }

    /// Release the native booster. The model text is kept, so later predictions reload it.
    pub fn close(&mut self) {
        if self.booster.take().is_some() {
            debug!("Released resident Booster");
        }
    }

    /// Write the model to a file in LightGBM's own text format.
    pub fn export_model<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let booster = self.ensure_loaded()?;
        booster.save_file(path, ImportanceType::Gain)?;
        Ok(())
    }

    /// Serialise options and model as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a classifier serialised by `to_json`. The booster is loaded on first use.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        debug!("Saving classifier to: {}", path.as_ref().display());
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Loading classifier from: {}", path.as_ref().display());
        LightGbm::from_json(&fs::read_to_string(path)?)
    }
}

impl Classifier for LightGbm {
    fn configure(&mut self, args: &[&str]) -> Result<()> {
        self.options = ClassifierOptions::from_args(args)?;
        Ok(())
    }

    fn option_args(&self) -> Vec<String> {
        self.options.to_args()
    }

    fn describe_options(&self) -> Vec<OptionInfo> {
        ClassifierOptions::describe()
    }

    fn capabilities(&self) -> Capabilities {
        let mut result = Capabilities::default();

        result.enable(Capability::NumericAttributes)
            .enable(Capability::NominalAttributes)
            .enable(Capability::DateAttributes)
            .enable(Capability::MissingValues)
            .enable(Capability::MissingClassValues);

        match self.options.objective() {
            Objective::Binary => {
                result.enable(Capability::BinaryClass);
            }
            Objective::Multiclass | Objective::MulticlassOva => {
                result.enable(Capability::NominalClass);
            }
            _ => {
                result.enable(Capability::NumericClass).enable(Capability::DateClass);
            }
        }

        result.set_minimum_instances(1);
        result
    }

    fn build(&mut self, table: &Table) -> Result<()> {
        self.train(table).map(|_| ())
    }

    fn classify(&mut self, row: &[f64]) -> Result<f64> {
        let output = self.predict_row(row)?;
        if !self.nominal_class() {
            return Ok(output[0]);
        }
        if output.len() == 1 {
            Ok(output[0].round())
        } else {
            Ok(argmax(&output) as f64)
        }
    }

    fn distribution(&mut self, row: &[f64]) -> Result<Vec<f64>> {
        let output = self.predict_row(row)?;
        if self.nominal_class() && output.len() == 1 {
            Ok(vec![1.0 - output[0], output[0]])
        } else {
            Ok(output)
        }
    }
}

impl Display for LightGbm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.model {
            Some(ref model) => f.write_str(model),
            None => f.write_str("No model built yet."),
        }
    }
}

/// Split off the validation rows: the last `round(rows × percentage / 100)` rows, after shuffling
/// with the configured seed if requested.
pub fn split_for_validation(mut data: Table, options: &ClassifierOptions) -> Result<(Table, Option<Table>)> {
    let percentage = options.validation_percentage();
    if percentage <= 0.0 {
        return Ok((data, None));
    }
    if !(percentage < 100.0) {
        return Err(Error::InvalidOption(format!(
            "validation percentage must be below 100, got {}",
            percentage
        )));
    }
    if options.randomize() {
        data.shuffle(options.seed());
    }

    let total = data.num_rows();
    let num_valid = (total as f64 * percentage / 100.0).round() as usize;
    if num_valid == 0 {
        warn!("Validation percentage {} of {} rows leaves no validation rows", percentage, total);
        return Ok((data, None));
    }
    if num_valid >= total {
        return Err(Error::Data(format!(
            "validation percentage {} leaves no training rows out of {}",
            percentage, total
        )));
    }
    let num_train = total - num_valid;
    debug!("Split {} rows into {} training and {} validation rows", total, num_train, num_valid);
    Ok((data.subset(0..num_train), Some(data.subset(num_train..total))))
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ClassifierOptionsBuilder;
    use crate::table::{Attribute, MISSING};
    use tempfile;

    /// Numeric feature "x" in 0..num_rows, nominal "colour", numeric class "y" = 3x + 1.
    fn regression_table(num_rows: usize) -> Table {
        let mut table = Table::new("linear", vec![
            Attribute::numeric("x"),
            Attribute::nominal("colour", vec!["red", "green", "blue"]),
            Attribute::numeric("y"),
        ]);
        table.set_class_index(Some(2)).unwrap();
        for i in 0..num_rows {
            let x = i as f64;
            table.add_row(vec![x, (i % 3) as f64, 3.0 * x + 1.0]).unwrap();
        }
        table
    }

    /// Class "label" is "1" whenever "x" is at least 50.
    fn binary_table() -> Table {
        let mut table = Table::new("threshold", vec![
            Attribute::numeric("x"),
            Attribute::nominal("colour", vec!["red", "green", "blue"]),
            Attribute::nominal("label", vec!["0", "1"]),
        ]);
        table.set_class_index(Some(2)).unwrap();
        for i in 0..100 {
            table.add_row(vec![i as f64, (i % 3) as f64, if i >= 50 { 1.0 } else { 0.0 }]).unwrap();
        }
        table
    }

    fn options(objective: Objective, num_iterations: u32) -> ClassifierOptions {
        ClassifierOptionsBuilder::default()
            .objective(objective)
            .num_iterations(num_iterations)
            .parameters("verbosity=-1")
            .build()
            .unwrap()
    }

    #[test]
    fn classify_before_training() {
        let mut model = LightGbm::default();
        match model.classify(&[1.0, 0.0, 2.0]) {
            Err(Error::Untrained) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(model.to_string(), "No model built yet.");
    }

    #[test]
    fn close_is_idempotent() {
        let mut model = LightGbm::default();
        model.close();
        model.close();
        assert!(!model.is_loaded());
    }

    #[test]
    fn capabilities_follow_objective() {
        let model = LightGbm::new(options(Objective::Binary, 10));
        let caps = model.capabilities();
        assert!(caps.handles(Capability::BinaryClass));
        assert!(!caps.handles(Capability::NumericClass));
        assert!(!caps.handles(Capability::UnaryClass));

        let model = LightGbm::new(options(Objective::Multiclass, 10));
        assert!(model.capabilities().handles(Capability::NominalClass));
        assert!(!model.capabilities().handles(Capability::BinaryClass));

        let model = LightGbm::new(options(Objective::Poisson, 10));
        assert!(model.capabilities().handles(Capability::NumericClass));
        assert!(model.capabilities().handles(Capability::NominalAttributes));
    }

    #[test]
    fn capability_mismatch_fails_before_training() {
        let mut model = LightGbm::new(options(Objective::Binary, 10));
        match model.train(&regression_table(30)) {
            Err(Error::Unsupported { capability, .. }) => assert_eq!(capability, Capability::NumericClass),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert!(!model.is_trained());
    }

    #[test]
    fn multiclass_rejects_binary_class() {
        let mut model = LightGbm::new(options(Objective::Multiclass, 10));
        match model.train(&binary_table()) {
            Err(Error::Unsupported { capability, .. }) => assert_eq!(capability, Capability::BinaryClass),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn split_sizes() {
        let mut opts = options(Objective::Regression, 10);
        opts.set_validation_percentage(20.0).unwrap();
        let (train, valid) = split_for_validation(regression_table(50), &opts).unwrap();
        let valid = valid.unwrap();
        assert_eq!(train.num_rows(), 40);
        assert_eq!(valid.num_rows(), 10);
        // order is kept without shuffling
        assert_eq!(train.row(0)[0], 0.0);
        assert_eq!(valid.row(0)[0], 40.0);

        opts.set_validation_percentage(33.0).unwrap();
        let (train, valid) = split_for_validation(regression_table(10), &opts).unwrap();
        assert_eq!((train.num_rows(), valid.unwrap().num_rows()), (7, 3));
    }

    #[test]
    fn split_partitions_rows() {
        let mut opts = options(Objective::Regression, 10);
        opts.set_validation_percentage(30.0).unwrap();
        opts.set_randomize(true);
        opts.set_seed(3);
        let (train, valid) = split_for_validation(regression_table(25), &opts).unwrap();

        let mut xs: Vec<f64> = train.attribute_values(0);
        xs.extend(valid.unwrap().attribute_values(0));
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, regression_table(25).attribute_values(0));
    }

    #[test]
    fn split_is_reproducible() {
        let mut opts = options(Objective::Regression, 10);
        opts.set_validation_percentage(20.0).unwrap();
        opts.set_randomize(true);
        opts.set_seed(17);

        let (train_a, valid_a) = split_for_validation(regression_table(50), &opts).unwrap();
        let (train_b, valid_b) = split_for_validation(regression_table(50), &opts).unwrap();
        assert_eq!(train_a.rows(), train_b.rows());
        assert_eq!(valid_a.unwrap().rows(), valid_b.unwrap().rows());
    }

    #[test]
    fn split_without_training_rows() {
        let mut opts = options(Objective::Regression, 10);
        opts.set_validation_percentage(60.0).unwrap();
        assert!(split_for_validation(regression_table(1), &opts).is_err());
    }

    #[test]
    fn split_rejects_out_of_range_percentage() {
        let json = r#"{"objective":"Regression","parameters":"","num_iterations":10,
            "validation_percentage":150.0,"randomize":false,"seed":1}"#;
        assert!(serde_json::from_str::<ClassifierOptions>(json).is_err());

        // options deserialised through a classifier are checked as well
        let json = format!(r#"{{"options":{}}}"#, json.replace("150.0", "20.0"));
        let model = LightGbm::from_json(&json).unwrap();
        assert_eq!(model.options().validation_percentage(), 20.0);
        assert!(LightGbm::from_json(&json.replace("20.0", "100.0")).is_err());
    }

    #[test]
    fn split_rounding_to_zero() {
        let mut opts = options(Objective::Regression, 10);
        opts.set_validation_percentage(1.0).unwrap();
        let (train, valid) = split_for_validation(regression_table(20), &opts).unwrap();
        assert_eq!(train.num_rows(), 20);
        assert!(valid.is_none());
    }

    #[test]
    fn binary_classification() {
        let table = binary_table();
        let mut model = LightGbm::new(options(Objective::Binary, 20));
        let summary = model.train(&table).unwrap();
        assert!(summary.iterations <= 20);
        assert_eq!(summary.training_rows, 100);
        assert_eq!(summary.validation_rows, 0);

        let actual = model.actual_parameters().unwrap();
        assert!(actual.starts_with("objective=binary label=name:label categorical_feature=1"));

        let mut correct = 0;
        for row in table.rows() {
            let predicted = model.classify(row).unwrap();
            assert!(predicted == 0.0 || predicted == 1.0);
            if predicted == row[2] {
                correct += 1;
            }
        }
        assert!(correct >= 90, "only {} of 100 correct", correct);

        let dist = model.distribution(&[90.0, 0.0, MISSING]).unwrap();
        assert_eq!(dist.len(), 2);
        assert!((dist[0] + dist[1] - 1.0).abs() < 1e-9);
        assert!(dist[1] > dist[0]);
    }

    #[test]
    fn multiclass_classification() {
        let mut table = Table::new("bands", vec![
            Attribute::numeric("x"),
            Attribute::nominal("band", vec!["low", "mid", "high"]),
        ]);
        table.set_class_index(Some(1)).unwrap();
        for i in 0..90 {
            table.add_row(vec![i as f64, (i / 30) as f64]).unwrap();
        }

        let mut model = LightGbm::new(options(Objective::Multiclass, 20));
        model.train(&table).unwrap();
        assert!(model.actual_parameters().unwrap().contains("num_class=3"));

        assert_eq!(model.classify(&[5.0, MISSING]).unwrap(), 0.0);
        assert_eq!(model.classify(&[85.0, MISSING]).unwrap(), 2.0);
        let dist = model.distribution(&[45.0, MISSING]).unwrap();
        assert_eq!(dist.len(), 3);
        assert!((dist.iter().sum::<f64>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn regression_with_validation_split() {
        let mut opts = options(Objective::Regression, 10);
        opts.set_validation_percentage(20.0).unwrap();
        opts.set_randomize(true);
        opts.set_seed(1);

        let mut model = LightGbm::new(opts);
        let summary = model.train(&regression_table(50)).unwrap();
        assert_eq!(summary.training_rows, 40);
        assert_eq!(summary.validation_rows, 10);
        assert!(model.classify(&[10.0, 1.0, MISSING]).unwrap().is_finite());
    }

    #[test]
    fn early_stop_when_no_split_possible() {
        // fewer rows than LightGBM's default minimum per leaf
        let mut model = LightGbm::new(options(Objective::Regression, 50));
        let summary = model.train(&regression_table(10)).unwrap();
        assert!(summary.stopped_early);
        assert_eq!(summary.iterations, 1);
        assert!(model.is_trained());
    }

    #[test]
    fn missing_class_rows_are_dropped() {
        let mut table = regression_table(60);
        table.add_row(vec![1.0, 0.0, MISSING]).unwrap();
        let mut model = LightGbm::new(options(Objective::Regression, 5));
        let summary = model.train(&table).unwrap();
        assert_eq!(summary.training_rows, 60);
    }

    #[test]
    fn reload_gives_same_prediction() {
        let mut model = LightGbm::new(options(Objective::Regression, 30));
        model.train(&regression_table(100)).unwrap();
        let row = [42.0, 0.0, MISSING];
        let resident = model.classify(&row).unwrap();

        model.close();
        assert!(!model.is_loaded());
        assert!(model.is_trained());
        let reloaded = model.classify(&row).unwrap();
        assert!(model.is_loaded());
        assert!((resident - reloaded).abs() < 1e-9);
    }

    #[test]
    fn json_round_trip() {
        let mut model = LightGbm::new(options(Objective::Regression, 30));
        model.train(&regression_table(100)).unwrap();
        let row = [12.0, 2.0, MISSING];
        let expected = model.classify(&row).unwrap();

        let tmp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp_dir.path().join("model.json");
        model.save(&path).unwrap();

        let mut restored = LightGbm::load(&path).unwrap();
        assert!(!restored.is_loaded());
        assert_eq!(restored.options(), model.options());
        assert_eq!(restored.actual_parameters(), model.actual_parameters());
        assert!((restored.classify(&row).unwrap() - expected).abs() < 1e-9);
        assert_eq!(restored.to_string(), model.to_string());
    }

    #[test]
    fn export_native_model() {
        let mut model = LightGbm::new(options(Objective::Regression, 5));
        model.train(&regression_table(60)).unwrap();

        let tmp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp_dir.path().join("model.txt");
        model.export_model(&path).unwrap();
        let booster = Booster::load_file(&path).unwrap();
        assert_eq!(booster.num_features().unwrap(), 2);
    }

    #[test]
    fn failed_training_keeps_previous_model() {
        let mut model = LightGbm::new(options(Objective::Regression, 5));
        model.train(&regression_table(60)).unwrap();
        let before = model.model_text().unwrap().to_owned();

        model.options_mut().set_parameters("objective=no_such_objective");
        match model.train(&regression_table(60)) {
            Err(Error::Engine(_)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(model.model_text().unwrap(), before);
        assert!(model.classify(&[3.0, 0.0, MISSING]).is_ok());
    }

    #[test]
    fn row_length_is_checked() {
        let mut model = LightGbm::new(options(Objective::Regression, 5));
        model.train(&regression_table(60)).unwrap();
        match model.classify(&[1.0, 2.0]) {
            Err(Error::Data(_)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn configure_from_args() {
        let mut model = LightGbm::default();
        model.configure(&["-O", "binary", "-I", "25"]).unwrap();
        assert_eq!(model.options().objective(), Objective::Binary);
        assert_eq!(model.option_args(), vec!["-O", "BINARY", "-I", "25", "-V", "0", "-S", "1"]);
        assert!(model.configure(&["-V", "100"]).is_err());
        assert_eq!(model.options().objective(), Objective::Binary);
    }

    #[test]
    fn global_info_cites_paper() {
        let info = LightGbm::global_info();
        assert!(info.starts_with("LightGBM is a gradient boosting framework"));
        assert!(info.contains("https://github.com/microsoft/LightGBM"));
        assert!(info.contains("A Highly Efficient Gradient Boosting Decision Tree"));
        assert!(info.contains("3149-3157, 2017"));
    }

    #[test]
    fn resident_booster_outlives_training_data() {
        let mut model = LightGbm::new(options(Objective::Regression, 8));
        let summary = model.train(&regression_table(100)).unwrap();
        assert!(model.is_loaded());

        // training datasets are gone, the resident booster still answers queries
        let booster = model.booster.as_ref().unwrap();
        assert_eq!(booster.current_iteration().unwrap(), summary.iterations);
        assert_eq!(booster.num_features().unwrap(), 2);
        assert!(model.classify(&[20.0, 1.0, MISSING]).is_ok());
    }

    #[test]
    fn argmax_picks_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[1.0]), 0);
    }
}
