//! Error types returned by the native wrappers and by the classifier driver.
use std::error;
use std::ffi;
use std::fmt::{self, Display};

use lightgbm_sys;
use thiserror::Error;

use crate::capabilities::Capability;

/// Convenience return type for calls into LightGBM's C API.
pub type LgbmResult<T> = std::result::Result<T, LgbmError>;

/// Convenience return type for the classifier driver.
pub type Result<T> = std::result::Result<T, Error>;

/// Error reported by LightGBM's C API.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct LgbmError {
    desc: String,
}

impl LgbmError {
    pub(crate) fn new<S: Into<String>>(desc: S) -> Self {
        LgbmError { desc: desc.into() }
    }

    /// Check the return value from a LightGBM FFI call, and return the last error message on error.
    ///
    /// Return values of 0 are treated as success, returns values of -1 are treated as errors.
    ///
    /// Meaning of any other return values are undefined, and will cause a panic.
    pub(crate) fn check_return_value(ret_val: i32) -> LgbmResult<()> {
        match ret_val {
            0 => Ok(()),
            -1 => Err(LgbmError::from_lightgbm()),
            _ => panic!("unexpected return value '{}', expected 0 or -1", ret_val),
        }
    }

    /// Get the last error message from LightGBM.
    fn from_lightgbm() -> Self {
        let c_str = unsafe { ffi::CStr::from_ptr(lightgbm_sys::LGBM_GetLastError()) };
        LgbmError::new(c_str.to_string_lossy())
    }

    /// Error message as reported by LightGBM.
    pub fn description(&self) -> &str {
        &self.desc
    }
}

impl error::Error for LgbmError {}

impl Display for LgbmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LightGBM error: {}", &self.desc)
    }
}

/// Failures surfaced by the classifier.
#[derive(Debug, Error)]
pub enum Error {
    /// The native engine rejected a call (dataset creation, parameters, training, prediction).
    #[error(transparent)]
    Engine(#[from] LgbmError),

    /// The data uses attribute or class types the selected objective cannot handle.
    #[error("cannot handle {capability}: {detail}")]
    Unsupported { capability: Capability, detail: String },

    /// Prediction requested with neither a resident booster nor a stored model.
    #[error("no model trained")]
    Untrained,

    /// An option value or flag could not be parsed or is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Data does not match the layout the operation expects.
    #[error("invalid data: {0}")]
    Data(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unsupported<S: Into<String>>(capability: Capability, detail: S) -> Self {
        Error::Unsupported {
            capability,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_return_value_is_success() {
        assert_eq!(LgbmError::check_return_value(0), Ok(()));
    }

    #[test]
    fn unsupported_names_capability() {
        let err = Error::unsupported(Capability::NominalClass, "class attribute 'y' is numeric");
        assert_eq!(err.to_string(), "cannot handle nominal class: class attribute 'y' is numeric");
    }

    #[test]
    fn engine_error_is_transparent() {
        let err: Error = LgbmError::new("bad parameter").into();
        assert_eq!(err.to_string(), "LightGBM error: bad parameter");
    }
}
