//! Train and apply [LightGBM](https://github.com/microsoft/LightGBM) models on typed tabular data.
//!
//! Tables of numeric, nominal and date columns are converted into LightGBM's dense matrix format,
//! with nominal columns passed on as categorical features. A [`LightGbm`](struct.LightGbm.html)
//! classifier drives LightGBM's training loop, keeps the trained model as text, and maps
//! predictions back to class indices or numeric values.
//!
//! # Basic usage example
//!
//! ```no_run
//! use lightgbm_tabular::{Attribute, Classifier, LightGbm, Table};
//! use lightgbm_tabular::parameters::ClassifierOptions;
//!
//! // training table with a numeric feature, a nominal feature, and a numeric class
//! let mut table = Table::new("prices", vec![
//!     Attribute::numeric("area"),
//!     Attribute::nominal("district", vec!["north", "south"]),
//!     Attribute::numeric("price"),
//! ]);
//! table.set_class_index(Some(2)).unwrap();
//! for i in 0..200 {
//!     let area = 40.0 + i as f64;
//!     let district = (i % 2) as f64;
//!     table.add_row(vec![area, district, area * 2.5 + district * 30.0]).unwrap();
//! }
//!
//! // options in command-line form: regression, 100 iterations, 10% validation data
//! let options = ClassifierOptions::from_args(&["-O", "regression", "-I", "100", "-V", "10", "-R"]).unwrap();
//! let mut model = LightGbm::new(options);
//! let summary = model.train(&table).unwrap();
//! println!("trained for {} iterations", summary.iterations);
//!
//! // rows are laid out like the training table; the class value is ignored
//! let price = model.classify(&[75.0, 1.0, f64::NAN]).unwrap();
//! println!("predicted price: {}", price);
//!
//! // persist options and model, and restore them later
//! let json = model.to_json().unwrap();
//! let mut restored = LightGbm::from_json(&json).unwrap();
//! assert_eq!(restored.classify(&[75.0, 1.0, f64::NAN]).unwrap(), price);
//! ```
#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate log;

macro_rules! lgbm_call {
    ($x:expr) => {
        $crate::error::LgbmError::check_return_value(unsafe { $x })
    };
}

mod error;
pub use crate::error::{Error, LgbmError, LgbmResult, Result};

mod table;
pub use crate::table::{is_missing, Attribute, AttributeKind, Table, MISSING};

mod capabilities;
pub use crate::capabilities::{Capabilities, Capability};

mod dataset;
pub use crate::dataset::Dataset;

mod booster;
pub use crate::booster::{Booster, ImportanceType, PredictType};

pub mod convert;
pub use crate::convert::FeatureMatrix;

mod classifier;
pub use crate::classifier::{split_for_validation, Classifier, LightGbm, TrainingSummary};

pub mod parameters;
mod utils;
