use libc::{c_char, c_void};
use std::{ffi, ptr, slice};

use lightgbm_sys;

use crate::convert::FeatureMatrix;
use crate::error::{LgbmError, LgbmResult};

static KEY_LABEL: &str = "label";
static KEY_WEIGHT: &str = "weight";

/// Dataset used by LightGBM for training [`Booster`](struct.Booster.html) models.
///
/// Holds a dense matrix of features (one row per instance), their names, and the true label of
/// each row (as an `f32` value).
///
/// Features are binned when the dataset is constructed. A dataset used for validation has to be
/// created with the training dataset as its `reference`, so that both share the same bins.
///
/// # Examples
///
/// ```
/// use lightgbm_tabular::Dataset;
///
/// let data = &[1.0, 0.5, 0.2, 0.2,
///              0.7, 1.0, 0.1, 0.1,
///              0.2, 0.0, 0.0, 1.0];
/// let mut dataset = Dataset::from_dense(data, 3, 4, "", None).unwrap();
/// assert_eq!(dataset.shape().unwrap(), (3, 4));
///
/// // set true labels for each row
/// dataset.set_labels(&[1.0, 0.0, 1.0]).unwrap();
/// ```
#[derive(Debug)]
pub struct Dataset {
    pub(crate) handle: lightgbm_sys::DatasetHandle,
}

impl Dataset {
    /// Create a new `Dataset` from a dense matrix in row-major order.
    ///
    /// `params` holds the dataset-related engine parameters (e.g. `categorical_feature=0,2`) as
    /// blank-separated `key=value` pairs.
    pub fn from_dense(
        data: &[f64],
        num_rows: usize,
        num_cols: usize,
        params: &str,
        reference: Option<&Dataset>,
    ) -> LgbmResult<Self> {
        if data.len() != num_rows * num_cols {
            return Err(LgbmError::new(format!(
                "matrix of {} values does not have shape {}x{}",
                data.len(),
                num_rows,
                num_cols
            )));
        }
        let params = cstring(params)?;
        let reference = reference.map_or(ptr::null_mut(), |r| r.handle);
        let mut handle = ptr::null_mut();
        lgbm_call!(lightgbm_sys::LGBM_DatasetCreateFromMat(
            data.as_ptr() as *const c_void,
            lightgbm_sys::C_API_DTYPE_FLOAT64 as i32,
            num_rows as i32,
            num_cols as i32,
            1_i32, // is_row_major
            params.as_ptr(),
            reference,
            &mut handle
        ))?;

        info!("Created Dataset with shape: {}x{}", num_rows, num_cols);
        Ok(Dataset { handle })
    }

    /// Create a `Dataset` from a converted table, tagged with its feature names and labels.
    pub fn from_matrix(matrix: &FeatureMatrix, params: &str, reference: Option<&Dataset>) -> LgbmResult<Self> {
        let mut dataset =
            Dataset::from_dense(matrix.values(), matrix.num_rows(), matrix.num_features(), params, reference)?;
        dataset.set_feature_names(matrix.feature_names())?;
        if let Some(labels) = matrix.labels() {
            dataset.set_labels(labels)?;
        }
        Ok(dataset)
    }

    /// Name each feature column, in column order.
    pub fn set_feature_names<S: AsRef<str>>(&mut self, names: &[S]) -> LgbmResult<()> {
        let names = names
            .iter()
            .map(|n| cstring(n.as_ref()))
            .collect::<LgbmResult<Vec<_>>>()?;
        let mut name_ptrs: Vec<*const c_char> = names.iter().map(|n| n.as_ptr()).collect();
        lgbm_call!(lightgbm_sys::LGBM_DatasetSetFeatureNames(
            self.handle,
            name_ptrs.as_mut_ptr(),
            name_ptrs.len() as i32
        ))
    }

    /// Set ground truth labels for each row.
    pub fn set_labels(&mut self, labels: &[f32]) -> LgbmResult<()> {
        self.set_field(KEY_LABEL, labels)
    }

    /// Get the ground truth labels of each row.
    pub fn get_labels(&self) -> LgbmResult<&[f32]> {
        self.get_field(KEY_LABEL)
    }

    /// Set weights of each row.
    pub fn set_weights(&mut self, weights: &[f32]) -> LgbmResult<()> {
        self.set_field(KEY_WEIGHT, weights)
    }

    /// Set a per-row float field, e.g. `label` or `weight`.
    pub fn set_field(&mut self, field: &str, values: &[f32]) -> LgbmResult<()> {
        let field = cstring(field)?;
        lgbm_call!(lightgbm_sys::LGBM_DatasetSetField(
            self.handle,
            field.as_ptr(),
            values.as_ptr() as *const c_void,
            values.len() as i32,
            lightgbm_sys::C_API_DTYPE_FLOAT32 as i32
        ))
    }

    /// Get a per-row float field previously set with `set_field`.
    pub fn get_field(&self, field: &str) -> LgbmResult<&[f32]> {
        let field = cstring(field)?;
        let mut out_len = 0;
        let mut out_ptr = ptr::null();
        let mut out_type = 0;
        lgbm_call!(lightgbm_sys::LGBM_DatasetGetField(
            self.handle,
            field.as_ptr(),
            &mut out_len,
            &mut out_ptr,
            &mut out_type
        ))?;
        if out_type != lightgbm_sys::C_API_DTYPE_FLOAT32 as i32 {
            return Err(LgbmError::new(format!("field has type {}, expected float32", out_type)));
        }
        if out_ptr.is_null() {
            return Ok(&[]);
        }

        Ok(unsafe { slice::from_raw_parts(out_ptr as *const f32, out_len as usize) })
    }

    /// Get the number of rows in this dataset.
    pub fn num_data(&self) -> LgbmResult<usize> {
        let mut out = 0;
        lgbm_call!(lightgbm_sys::LGBM_DatasetGetNumData(self.handle, &mut out))?;
        Ok(out as usize)
    }

    /// Get the number of feature columns in this dataset.
    pub fn num_features(&self) -> LgbmResult<usize> {
        let mut out = 0;
        lgbm_call!(lightgbm_sys::LGBM_DatasetGetNumFeature(self.handle, &mut out))?;
        Ok(out as usize)
    }

    /// Get the shape (rows x features) of this dataset.
    pub fn shape(&self) -> LgbmResult<(usize, usize)> {
        Ok((self.num_data()?, self.num_features()?))
    }
}

impl Drop for Dataset {
    fn drop(&mut self) {
        debug!("Freeing Dataset");
        if let Err(e) = lgbm_call!(lightgbm_sys::LGBM_DatasetFree(self.handle)) {
            error!("Failed to free Dataset: {}", e);
        }
    }
}

pub(crate) fn cstring(s: &str) -> LgbmResult<ffi::CString> {
    ffi::CString::new(s).map_err(|e| LgbmError::new(format!("could not convert '{}' to C string: {}", s, e)))
}
