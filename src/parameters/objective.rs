use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Learning objective (loss function) used by LightGBM.
///
/// Parsed case-insensitively from either its option name (e.g. `REGRESSION_L1`) or its LightGBM
/// token (e.g. `regression_l1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    Regression,
    RegressionL1,
    Huber,
    Fair,
    Poisson,
    Quantile,
    Mape,
    Gamma,
    Tweedie,
    Binary,
    Multiclass,
    MulticlassOva,
    CrossEntropy,
    CrossEntropyLambda,
    LambdaRank,
    RankXendcg,
}

const OBJECTIVES: &[Objective] = &[
    Objective::Regression,
    Objective::RegressionL1,
    Objective::Huber,
    Objective::Fair,
    Objective::Poisson,
    Objective::Quantile,
    Objective::Mape,
    Objective::Gamma,
    Objective::Tweedie,
    Objective::Binary,
    Objective::Multiclass,
    Objective::MulticlassOva,
    Objective::CrossEntropy,
    Objective::CrossEntropyLambda,
    Objective::LambdaRank,
    Objective::RankXendcg,
];

impl Objective {
    /// Every objective, in option-listing order.
    pub fn all() -> impl Iterator<Item = Objective> {
        OBJECTIVES.iter().copied()
    }

    /// (option name, LightGBM token, description)
    fn entry(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Objective::Regression => ("REGRESSION", "regression", "Regression"),
            Objective::RegressionL1 => ("REGRESSION_L1", "regression_l1", "Regression L1"),
            Objective::Huber => ("HUBER", "huber", "Huber loss"),
            Objective::Fair => ("FAIR", "fair", "Fair loss"),
            Objective::Poisson => ("POISSON", "poisson", "Poisson regression"),
            Objective::Quantile => ("QUANTILE", "quantile", "Quantile regression"),
            Objective::Mape => ("MAPE", "mape", "MAPE loss"),
            Objective::Gamma => ("GAMMA", "gamma", "Gamma regression with log-link"),
            Objective::Tweedie => ("TWEEDIE", "tweedie", "Tweedie regression with log-link"),
            Objective::Binary => ("BINARY", "binary", "Binary log loss classification"),
            Objective::Multiclass => ("MULTICLASS", "multiclass", "Multi-class (softmax)"),
            Objective::MulticlassOva => ("MULTICLASSOVA", "multiclassova", "Multi-class (one-vs-all)"),
            Objective::CrossEntropy => ("CROSSENTROPY", "cross_entropy", "Cross-entropy"),
            Objective::CrossEntropyLambda => {
                ("CROSSENTROPY_LAMBDA", "cross_entropy_lambda", "Cross-entropy Lambda")
            }
            Objective::LambdaRank => ("LAMBDA_RANK", "lambdarank", "Lambda rank"),
            Objective::RankXendcg => ("RANK_XENDCG", "rank_xendcg", "Rank Xendcg"),
        }
    }

    /// Name used on the command line, e.g. `REGRESSION_L1`.
    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// Value of LightGBM's `objective` parameter, e.g. `regression_l1`.
    pub fn token(self) -> &'static str {
        self.entry().1
    }

    pub fn description(self) -> &'static str {
        self.entry().2
    }

    /// Whether the objective predicts class codes rather than numeric values.
    pub fn is_classification(self) -> bool {
        matches!(self, Objective::Binary | Objective::Multiclass | Objective::MulticlassOva)
    }

    pub fn is_multiclass(self) -> bool {
        matches!(self, Objective::Multiclass | Objective::MulticlassOva)
    }
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Regression
    }
}

impl Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Objective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Objective::all()
            .find(|o| o.name().eq_ignore_ascii_case(s) || o.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidOption(format!("unknown objective '{}'", s)))
    }
}
