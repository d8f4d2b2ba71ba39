use libc::{c_char, c_double, c_void};
use std::marker::PhantomData;
use std::path::Path;
use std::{ffi, ptr};

use lightgbm_sys;

use crate::dataset::{cstring, Dataset};
use crate::error::{LgbmError, LgbmResult};
use crate::utils;

/// Kind of output requested from a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictType {
    /// Transformed score (e.g. probabilities for classification objectives).
    Normal,

    /// Raw margin, before the objective's transformation.
    RawScore,

    /// Index of the leaf each tree places the row in.
    LeafIndex,

    /// Per-feature contributions (SHAP values).
    Contrib,
}

impl PredictType {
    fn as_c_int(self) -> i32 {
        (match self {
            PredictType::Normal => lightgbm_sys::C_API_PREDICT_NORMAL,
            PredictType::RawScore => lightgbm_sys::C_API_PREDICT_RAW_SCORE,
            PredictType::LeafIndex => lightgbm_sys::C_API_PREDICT_LEAF_INDEX,
            PredictType::Contrib => lightgbm_sys::C_API_PREDICT_CONTRIB,
        }) as i32
    }
}

/// Feature importance written into saved models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceType {
    /// Number of times a feature is used in a split.
    Split,

    /// Total gain of the splits using a feature.
    Gain,
}

impl ImportanceType {
    fn as_c_int(self) -> i32 {
        (match self {
            ImportanceType::Split => lightgbm_sys::C_API_FEATURE_IMPORTANCE_SPLIT,
            ImportanceType::Gain => lightgbm_sys::C_API_FEATURE_IMPORTANCE_GAIN,
        }) as i32
    }
}

/// Tree ensemble held by LightGBM, with functions for training, saving and predicting.
///
/// Created from a training [`Dataset`](struct.Dataset.html) and trained by calling
/// [`update_one_iter`](struct.Booster.html#method.update_one_iter) in a loop, or restored from a
/// model previously written by [`save_to_string`](struct.Booster.html#method.save_to_string).
///
/// The native handle is released when the `Booster` is dropped.
///
/// LightGBM keeps pointers to the training and validation datasets, so a booster created for
/// training borrows them for its whole lifetime. Boosters loaded from a saved model borrow
/// nothing and are `Booster<'static>`.
pub struct Booster<'a> {
    handle: lightgbm_sys::BoosterHandle,
    datasets: PhantomData<&'a Dataset>,
}

impl<'a> Booster<'a> {
    /// Create a new Booster for `train`, configured by blank-separated `key=value` pairs.
    ///
    /// The booster cannot outlive its training data:
    ///
    /// ```compile_fail
    /// use lightgbm_tabular::{Booster, Dataset};
    ///
    /// let booster = {
    ///     let dataset = Dataset::from_dense(&[1.0, 2.0, 3.0], 3, 1, "", None).unwrap();
    ///     Booster::create(&dataset, "objective=regression").unwrap()
    /// };
    /// drop(booster);
    /// ```
    pub fn create(train: &'a Dataset, config: &str) -> LgbmResult<Self> {
        let config = cstring(config)?;
        let mut handle = ptr::null_mut();
        lgbm_call!(lightgbm_sys::LGBM_BoosterCreate(train.handle, config.as_ptr(), &mut handle))?;
        // wrap immediately so the handle is freed on any later error
        let booster = Booster::wrap(handle);
        debug!("Created Booster");
        Ok(booster)
    }

    fn wrap(handle: lightgbm_sys::BoosterHandle) -> Self {
        Booster { handle, datasets: PhantomData }
    }

    /// Restore a booster from the text written by `save_to_string`.
    pub fn load_from_string(model: &str) -> LgbmResult<Self> {
        let model = cstring(model)?;
        let mut num_iterations = 0;
        let mut handle = ptr::null_mut();
        lgbm_call!(lightgbm_sys::LGBM_BoosterLoadModelFromString(
            model.as_ptr(),
            &mut num_iterations,
            &mut handle
        ))?;
        let booster = Booster::wrap(handle);
        info!("Loaded Booster with {} iterations", num_iterations);
        Ok(booster)
    }

    /// Restore a booster from a model file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> LgbmResult<Self> {
        debug!("Loading Booster from: {}", path.as_ref().display());
        let fname = utils::cstring_from_path(path)?;
        let mut num_iterations = 0;
        let mut handle = ptr::null_mut();
        lgbm_call!(lightgbm_sys::LGBM_BoosterCreateFromModelfile(
            fname.as_ptr(),
            &mut num_iterations,
            &mut handle
        ))?;
        let booster = Booster::wrap(handle);
        info!("Loaded Booster with {} iterations", num_iterations);
        Ok(booster)
    }

    /// Register a validation dataset, evaluated after each iteration.
    ///
    /// The dataset must have been created with the training dataset as its reference.
    pub fn add_validation_data(&mut self, valid: &'a Dataset) -> LgbmResult<()> {
        lgbm_call!(lightgbm_sys::LGBM_BoosterAddValidData(self.handle, valid.handle))
    }

    /// Run one boosting iteration.
    ///
    /// Returns `true` when the engine could not add a useful tree, i.e. training is finished.
    pub fn update_one_iter(&mut self) -> LgbmResult<bool> {
        let mut is_finished = 0;
        lgbm_call!(lightgbm_sys::LGBM_BoosterUpdateOneIter(self.handle, &mut is_finished))?;
        Ok(is_finished == 1)
    }

    /// Number of completed iterations.
    pub fn current_iteration(&self) -> LgbmResult<usize> {
        let mut out = 0;
        lgbm_call!(lightgbm_sys::LGBM_BoosterGetCurrentIteration(self.handle, &mut out))?;
        Ok(out as usize)
    }

    /// Number of classes (1 for regression and binary objectives).
    pub fn num_classes(&self) -> LgbmResult<usize> {
        let mut out = 0;
        lgbm_call!(lightgbm_sys::LGBM_BoosterGetNumClasses(self.handle, &mut out))?;
        Ok(out as usize)
    }

    /// Number of features the model expects per row.
    pub fn num_features(&self) -> LgbmResult<usize> {
        let mut out = 0;
        lgbm_call!(lightgbm_sys::LGBM_BoosterGetNumFeature(self.handle, &mut out))?;
        Ok(out as usize)
    }

    /// Current metric values for a dataset: index 0 is the training data, 1.. the validation sets
    /// in the order they were added.
    pub fn eval(&self, data_idx: usize) -> LgbmResult<Vec<f64>> {
        let mut num_metrics = 0;
        lgbm_call!(lightgbm_sys::LGBM_BoosterGetEvalCounts(self.handle, &mut num_metrics))?;
        let mut results = vec![0.0; num_metrics as usize];
        let mut out_len = 0;
        lgbm_call!(lightgbm_sys::LGBM_BoosterGetEval(
            self.handle,
            data_idx as i32,
            &mut out_len,
            results.as_mut_ptr() as *mut c_double
        ))?;
        results.truncate(out_len as usize);
        Ok(results)
    }

    /// Serialise the model in LightGBM's text format.
    ///
    /// `num_iteration` of `None` saves every iteration from `start_iteration` on.
    pub fn save_to_string(
        &self,
        start_iteration: usize,
        num_iteration: Option<usize>,
        importance: ImportanceType,
    ) -> LgbmResult<String> {
        let num_iteration = num_iteration.map_or(-1, |n| n as i32);

        // first call only reports the required buffer size
        let mut out_len = 0_i64;
        let mut probe = [0 as c_char; 1];
        lgbm_call!(lightgbm_sys::LGBM_BoosterSaveModelToString(
            self.handle,
            start_iteration as i32,
            num_iteration,
            importance.as_c_int(),
            0,
            &mut out_len,
            probe.as_mut_ptr()
        ))?;

        let mut buffer = vec![0u8; out_len as usize];
        lgbm_call!(lightgbm_sys::LGBM_BoosterSaveModelToString(
            self.handle,
            start_iteration as i32,
            num_iteration,
            importance.as_c_int(),
            buffer.len() as i64,
            &mut out_len,
            buffer.as_mut_ptr() as *mut c_char
        ))?;

        let model = ffi::CStr::from_bytes_until_nul(&buffer)
            .map_err(|e| LgbmError::new(format!("model text is not terminated: {}", e)))?;
        Ok(model.to_string_lossy().into_owned())
    }

    /// Write the model to a file in LightGBM's text format.
    pub fn save_file<P: AsRef<Path>>(&self, path: P, importance: ImportanceType) -> LgbmResult<()> {
        debug!("Writing Booster to: {}", path.as_ref().display());
        let fname = utils::cstring_from_path(path)?;
        lgbm_call!(lightgbm_sys::LGBM_BoosterSaveModel(
            self.handle,
            0_i32,
            -1_i32,
            importance.as_c_int(),
            fname.as_ptr()
        ))
    }

    /// Predict a single row of feature values.
    ///
    /// Returns one value per class for multi-class models, a single value otherwise.
    pub fn predict_single_row(&self, values: &[f64], predict_type: PredictType) -> LgbmResult<Vec<f64>> {
        let mut num_outputs = 0_i64;
        lgbm_call!(lightgbm_sys::LGBM_BoosterCalcNumPredict(
            self.handle,
            1_i32,
            predict_type.as_c_int(),
            0_i32,  // start_iteration
            -1_i32, // num_iteration
            &mut num_outputs
        ))?;

        let params = cstring("")?;
        let mut out_result = vec![0.0; num_outputs as usize];
        let mut out_len = 0_i64;
        lgbm_call!(lightgbm_sys::LGBM_BoosterPredictForMatSingleRow(
            self.handle,
            values.as_ptr() as *const c_void,
            lightgbm_sys::C_API_DTYPE_FLOAT64 as i32,
            values.len() as i32,
            1_i32, // is_row_major
            predict_type.as_c_int(),
            0_i32,  // start_iteration
            -1_i32, // num_iteration
            params.as_ptr(),
            &mut out_len,
            out_result.as_mut_ptr() as *mut c_double
        ))?;

        out_result.truncate(out_len as usize);
        Ok(out_result)
    }
}

impl<'a> Drop for Booster<'a> {
    fn drop(&mut self) {
        debug!("Freeing Booster");
        if let Err(e) = lgbm_call!(lightgbm_sys::LGBM_BoosterFree(self.handle)) {
            error!("Failed to free Booster: {}", e);
        }
    }
}
