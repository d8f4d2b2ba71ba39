//! Options controlling training, and the LightGBM configuration string derived from them.
use std::fmt::{self, Display};

mod objective;
mod options;

pub use self::objective::Objective;
pub use self::options::{ClassifierOptions, ClassifierOptionsBuilder, ClassifierOptionsBuilderError, OptionInfo};

use crate::table::Table;

/// Configuration string handed to LightGBM when creating datasets and boosters.
///
/// Rendered as blank-separated `key=value` pairs in a fixed order: objective, label, categorical
/// features, number of classes, then the user's own parameters verbatim. LightGBM keeps the last
/// occurrence of a key, so user parameters override the derived ones.
///
/// ```
/// use lightgbm_tabular::parameters::{EngineConfig, Objective};
///
/// let config = EngineConfig::new(Objective::Binary, "play")
///     .categorical_features(&[0, 3])
///     .user_parameters("num_leaves=7");
/// assert_eq!(config.to_string(), "objective=binary label=name:play categorical_feature=0,3 num_leaves=7");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    objective: Objective,
    label: String,
    categorical: Vec<usize>,
    num_class: Option<usize>,
    user_parameters: String,
}

impl EngineConfig {
    pub fn new<S: Into<String>>(objective: Objective, label: S) -> Self {
        EngineConfig {
            objective,
            label: label.into(),
            categorical: Vec::new(),
            num_class: None,
            user_parameters: String::new(),
        }
    }

    /// Derive the configuration for training on `table` with `options`.
    ///
    /// `categorical` are the matrix positions of the nominal features. The number of classes is
    /// only emitted for multi-class objectives.
    pub fn for_table(table: &Table, categorical: &[usize], options: &ClassifierOptions) -> Self {
        let class = table.class_attribute();
        let label = class.map_or("", |c| c.name());
        let mut config = EngineConfig::new(options.objective(), label)
            .categorical_features(categorical)
            .user_parameters(options.parameters());
        if options.objective().is_multiclass() {
            config.num_class = class.and_then(|c| c.num_labels());
        }
        config
    }

    /// Matrix positions of the features to treat as categorical.
    pub fn categorical_features(mut self, positions: &[usize]) -> Self {
        self.categorical = positions.to_vec();
        self
    }

    pub fn num_class(mut self, num_class: usize) -> Self {
        self.num_class = Some(num_class);
        self
    }

    /// Blank-separated `key=value` pairs appended after the derived parameters.
    pub fn user_parameters<S: Into<String>>(mut self, parameters: S) -> Self {
        self.user_parameters = parameters.into();
        self
    }

    pub(crate) fn as_string_pairs(&self) -> Vec<(String, String)> {
        let mut v = Vec::new();

        v.push(("objective".to_owned(), self.objective.token().to_owned()));
        v.push(("label".to_owned(), format!("name:{}", self.label)));

        if !self.categorical.is_empty() {
            let indices: Vec<String> = self.categorical.iter().map(|i| i.to_string()).collect();
            v.push(("categorical_feature".to_owned(), indices.join(",")));
        }

        if let Some(num_class) = self.num_class {
            v.push(("num_class".to_owned(), num_class.to_string()));
        }

        v
    }

    /// The subset of the configuration that affects dataset construction (feature binning and
    /// categorical handling): categorical features plus the user's parameters.
    pub fn dataset_parameters(&self) -> String {
        let mut params = Vec::new();
        if !self.categorical.is_empty() {
            let indices: Vec<String> = self.categorical.iter().map(|i| i.to_string()).collect();
            params.push(format!("categorical_feature={}", indices.join(",")));
        }
        let user = self.user_parameters.trim();
        if !user.is_empty() {
            params.push(user.to_owned());
        }
        params.join(" ")
    }
}

impl Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pairs: Vec<String> = self
            .as_string_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        f.write_str(&pairs.join(" "))?;
        let user = self.user_parameters.trim();
        if !user.is_empty() {
            write!(f, " {}", user)?;
        }
        Ok(())
    }
}

enum Inclusion {
    Open,
    Closed,
}

struct Interval<T> {
    min: T,
    min_inclusion: Inclusion,
    max: T,
    max_inclusion: Inclusion,
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lower = match self.min_inclusion {
            Inclusion::Closed => '[',
            Inclusion::Open => '(',
        };
        let upper = match self.max_inclusion {
            Inclusion::Closed => ']',
            Inclusion::Open => ')',
        };
        write!(f, "{}{}, {}{}", lower, self.min, self.max, upper)
    }
}

impl<T: PartialOrd + Display> Interval<T> {
    fn new(min: T, min_inclusion: Inclusion, max: T, max_inclusion: Inclusion) -> Self {
        Interval { min, min_inclusion, max, max_inclusion }
    }

    fn new_closed_closed(min: T, max: T) -> Self {
        Interval::new(min, Inclusion::Closed, max, Inclusion::Closed)
    }

    fn new_closed_open(min: T, max: T) -> Self {
        Interval::new(min, Inclusion::Closed, max, Inclusion::Open)
    }

    fn contains(&self, val: &T) -> bool {
        match self.min_inclusion {
            Inclusion::Closed => if !(val >= &self.min) { return false; },
            Inclusion::Open => if !(val > &self.min) { return false; },
        }
        match self.max_inclusion {
            Inclusion::Closed => if !(val <= &self.max) { return false; },
            Inclusion::Open => if !(val < &self.max) { return false; },
        }
        true
    }

    fn validate(&self, val: &Option<T>, name: &str) -> Result<(), String> {
        match val {
            Some(ref val) => {
                if self.contains(val) {
                    Ok(())
                } else {
                    Err(format!("Invalid value for '{}' parameter, {} is not in range {}.", name, val, self))
                }
            },
            None => Ok(())
        }
    }
}
