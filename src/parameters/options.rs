use std::default::Default;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Interval, Objective};
use crate::error::{Error, Result};

const PARAMETERS_URL: &str = "https://lightgbm.readthedocs.io/en/latest/Parameters.html";

/// User-facing configuration of the [`LightGbm`](../struct.LightGbm.html) classifier.
///
/// Created using [`ClassifierOptionsBuilder`](struct.ClassifierOptionsBuilder.html), or parsed
/// from command-line style flags with [`from_args`](struct.ClassifierOptions.html#method.from_args).
///
/// ```
/// use lightgbm_tabular::parameters::{ClassifierOptionsBuilder, Objective};
///
/// let options = ClassifierOptionsBuilder::default()
///     .objective(Objective::Binary)
///     .parameters("num_leaves=15 learning_rate=0.05")
///     .num_iterations(200)
///     .build()
///     .unwrap();
/// assert_eq!(options.to_args(), vec![
///     "-O", "BINARY", "-P", "num_leaves=15 learning_rate=0.05", "-I", "200", "-V", "0", "-S", "1",
/// ]);
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[builder(derive(Deserialize))]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(try_from = "ClassifierOptionsBuilder")]
pub struct ClassifierOptions {
    /// Learning objective.
    ///
    /// *default*: `REGRESSION`
    objective: Objective,

    /// Additional LightGBM parameters as blank-separated `key=value` pairs, appended after the
    /// derived ones.
    ///
    /// *default*: empty
    #[builder(setter(into))]
    parameters: String,

    /// Number of boosting iterations to run.
    ///
    /// * range: [1, ∞)
    /// * *default*: 1000
    num_iterations: u32,

    /// Percentage of the training rows held out as validation data.
    ///
    /// * range: [0, 100)
    /// * *default*: 0
    validation_percentage: f64,

    /// Whether to shuffle the rows before splitting off the validation data.
    ///
    /// *default*: `false`
    randomize: bool,

    /// Seed for shuffling.
    ///
    /// *default*: 1
    seed: u64,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        ClassifierOptions {
            objective: Objective::default(),
            parameters: String::new(),
            num_iterations: 1000,
            validation_percentage: 0.0,
            randomize: false,
            seed: 1,
        }
    }
}

impl ClassifierOptionsBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        Interval::new_closed_closed(1, u32::MAX).validate(&self.num_iterations, "num_iterations")?;
        Interval::new_closed_open(0.0, 100.0).validate(&self.validation_percentage, "validation_percentage")?;
        Ok(())
    }
}

impl TryFrom<ClassifierOptionsBuilder> for ClassifierOptions {
    type Error = ClassifierOptionsBuilderError;

    fn try_from(builder: ClassifierOptionsBuilder) -> std::result::Result<Self, Self::Error> {
        builder.build()
    }
}

/// Description of one command-line flag.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionInfo {
    pub flag: &'static str,
    pub synopsis: String,
    pub description: String,
}

impl ClassifierOptions {
    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    pub fn set_parameters<S: Into<String>>(&mut self, parameters: S) {
        self.parameters = parameters.into();
    }

    pub fn num_iterations(&self) -> u32 {
        self.num_iterations
    }

    /// Set the number of iterations; must be positive.
    pub fn set_num_iterations(&mut self, num_iterations: u32) -> Result<()> {
        Interval::new_closed_closed(1, u32::MAX)
            .validate(&Some(num_iterations), "num_iterations")
            .map_err(Error::InvalidOption)?;
        self.num_iterations = num_iterations;
        Ok(())
    }

    pub fn validation_percentage(&self) -> f64 {
        self.validation_percentage
    }

    /// Set the validation percentage; must be in [0, 100).
    pub fn set_validation_percentage(&mut self, percentage: f64) -> Result<()> {
        Interval::new_closed_open(0.0, 100.0)
            .validate(&Some(percentage), "validation_percentage")
            .map_err(Error::InvalidOption)?;
        self.validation_percentage = percentage;
        Ok(())
    }

    pub fn randomize(&self) -> bool {
        self.randomize
    }

    pub fn set_randomize(&mut self, randomize: bool) {
        self.randomize = randomize;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Parse flags of the form `-O <objective> -P <parameters> -I <iterations> -V <percentage> -R -S <seed>`.
    ///
    /// Flags not given keep their default value; unknown flags are rejected.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut options = ClassifierOptions::default();
        let mut args = args.iter().map(AsRef::as_ref);
        while let Some(flag) = args.next() {
            if flag == "-R" {
                options.set_randomize(true);
                continue;
            }
            let mut value = || {
                args.next()
                    .ok_or_else(|| Error::InvalidOption(format!("missing value for {}", flag)))
            };
            match flag {
                "-O" => options.set_objective(value()?.parse()?),
                "-P" => options.set_parameters(value()?),
                "-I" => options.set_num_iterations(parse_value(flag, value()?)?)?,
                "-V" => options.set_validation_percentage(parse_value(flag, value()?)?)?,
                "-S" => options.set_seed(parse_value(flag, value()?)?),
                other => return Err(Error::InvalidOption(format!("unknown option '{}'", other))),
            }
        }
        debug!("Parsed options: {}", options);
        Ok(options)
    }

    /// Flags that reproduce these options through [`from_args`](#method.from_args).
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-O".to_owned(), self.objective.name().to_owned()];
        if !self.parameters.trim().is_empty() {
            args.push("-P".to_owned());
            args.push(self.parameters.clone());
        }
        args.push("-I".to_owned());
        args.push(self.num_iterations.to_string());
        args.push("-V".to_owned());
        args.push(self.validation_percentage.to_string());
        if self.randomize {
            args.push("-R".to_owned());
        }
        args.push("-S".to_owned());
        args.push(self.seed.to_string());
        args
    }

    /// Describe every recognised flag.
    pub fn describe() -> Vec<OptionInfo> {
        let objectives: String = Objective::all()
            .map(|o| format!("\t{} = {}\n", o.name(), o.description()))
            .collect();
        let names: Vec<&str> = Objective::all().map(Objective::name).collect();
        let defaults = ClassifierOptions::default();

        vec![
            OptionInfo {
                flag: "O",
                synopsis: format!("-O <{}>", names.join("|")),
                description: format!(
                    "The objective to use:\n{}(default: {})",
                    objectives, defaults.objective
                ),
            },
            OptionInfo {
                flag: "P",
                synopsis: "-P <parameters>".to_owned(),
                description: format!(
                    "The parameters for the booster (blank-separated key=value pairs).\nSee: {}\n(default: none)",
                    PARAMETERS_URL
                ),
            },
            OptionInfo {
                flag: "I",
                synopsis: "-I <iterations>".to_owned(),
                description: format!("The number of iterations to train for.\n(default: {})", defaults.num_iterations),
            },
            OptionInfo {
                flag: "V",
                synopsis: "-V <percentage>".to_owned(),
                description: format!(
                    "The percentage of the training data to use for validation (0 <= x < 100).\n(default: {})",
                    defaults.validation_percentage
                ),
            },
            OptionInfo {
                flag: "R",
                synopsis: "-R".to_owned(),
                description: "Randomize the data before splitting off the validation set.".to_owned(),
            },
            OptionInfo {
                flag: "S",
                synopsis: "-S <seed>".to_owned(),
                description: format!("The seed for randomizing the data.\n(default: {})", defaults.seed),
            },
        ]
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T>
where
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::InvalidOption(format!("invalid value '{}' for {}: {}", value, flag, e)))
}

impl Display for ClassifierOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let args: Vec<String> = self
            .to_args()
            .into_iter()
            .map(|a| if a.contains(char::is_whitespace) { format!("\"{}\"", a) } else { a })
            .collect();
        f.write_str(&args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ClassifierOptions::default();
        assert_eq!(options.objective(), Objective::Regression);
        assert_eq!(options.parameters(), "");
        assert_eq!(options.num_iterations(), 1000);
        assert_eq!(options.validation_percentage(), 0.0);
        assert!(!options.randomize());
        assert_eq!(options, ClassifierOptionsBuilder::default().build().unwrap());
    }

    #[test]
    fn builder_validates_ranges() {
        assert!(ClassifierOptionsBuilder::default().num_iterations(0).build().is_err());
        assert!(ClassifierOptionsBuilder::default().validation_percentage(100.0).build().is_err());
        assert!(ClassifierOptionsBuilder::default().validation_percentage(-1.0).build().is_err());
        assert!(ClassifierOptionsBuilder::default().validation_percentage(99.5).build().is_ok());
    }

    #[test]
    fn setters_validate_ranges() {
        let mut options = ClassifierOptions::default();
        assert!(options.set_num_iterations(0).is_err());
        assert_eq!(options.num_iterations(), 1000);
        assert!(options.set_validation_percentage(20.0).is_ok());
        assert_eq!(options.validation_percentage(), 20.0);
    }

    #[test]
    fn iterations_accept_upper_bound() {
        let mut options = ClassifierOptions::default();
        assert!(options.set_num_iterations(u32::MAX).is_ok());
        assert!(ClassifierOptionsBuilder::default().num_iterations(u32::MAX).build().is_ok());
    }

    #[test]
    fn deserialize_validates_ranges() {
        let options: ClassifierOptions =
            serde_json::from_str(r#"{"objective":"Binary","num_iterations":40}"#).unwrap();
        assert_eq!(options.objective(), Objective::Binary);
        assert_eq!(options.num_iterations(), 40);
        assert_eq!(options.seed(), 1);

        assert!(serde_json::from_str::<ClassifierOptions>(r#"{"validation_percentage":100.0}"#).is_err());
        assert!(serde_json::from_str::<ClassifierOptions>(r#"{"num_iterations":0}"#).is_err());

        let options = ClassifierOptionsBuilder::default().validation_percentage(12.5).build().unwrap();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(serde_json::from_str::<ClassifierOptions>(&json).unwrap(), options);
    }

    #[test]
    fn parse_args() {
        let options = ClassifierOptions::from_args(&[
            "-O", "multiclass", "-P", "num_leaves=7 max_depth=3", "-I", "50", "-V", "12.5", "-R", "-S", "42",
        ])
        .unwrap();
        assert_eq!(options.objective(), Objective::Multiclass);
        assert_eq!(options.parameters(), "num_leaves=7 max_depth=3");
        assert_eq!(options.num_iterations(), 50);
        assert_eq!(options.validation_percentage(), 12.5);
        assert!(options.randomize());
        assert_eq!(options.seed(), 42);
    }

    #[test]
    fn parse_args_errors() {
        assert!(ClassifierOptions::from_args(&["-I"]).is_err());
        assert!(ClassifierOptions::from_args(&["-I", "many"]).is_err());
        assert!(ClassifierOptions::from_args(&["-I", "0"]).is_err());
        assert!(ClassifierOptions::from_args(&["-O", "nope"]).is_err());
        assert!(ClassifierOptions::from_args(&["-X", "1"]).is_err());
    }

    #[test]
    fn args_round_trip() {
        let options = ClassifierOptionsBuilder::default()
            .objective(Objective::Huber)
            .parameters("alpha=0.5")
            .validation_percentage(20.0)
            .randomize(true)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(ClassifierOptions::from_args(&options.to_args()).unwrap(), options);
    }

    #[test]
    fn display_quotes_parameters() {
        let mut options = ClassifierOptions::default();
        options.set_parameters("a=1 b=2");
        assert_eq!(options.to_string(), "-O REGRESSION -P \"a=1 b=2\" -I 1000 -V 0 -S 1");
    }

    #[test]
    fn describe_lists_every_flag() {
        let flags: Vec<_> = ClassifierOptions::describe().iter().map(|o| o.flag).collect();
        assert_eq!(flags, vec!["O", "P", "I", "V", "R", "S"]);
        assert!(ClassifierOptions::describe()[0].description.contains("BINARY = Binary log loss classification"));
    }
}
