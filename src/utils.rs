use std::ffi::CString;
use std::path::Path;

use crate::error::{LgbmError, LgbmResult};

pub fn cstring_from_path<P: AsRef<Path>>(path: P) -> LgbmResult<CString> {
    let path = path.as_ref();
    let path_str = match path.to_str() {
        Some(s) => s,
        None => {
            let msg = format!("Could not encode path '{}' as UTF-8 string", path.to_string_lossy());
            return Err(LgbmError::new(msg));
        }
    };

    CString::new(path_str).map_err(|e| LgbmError::new(format!("Invalid path '{}': {}", path_str, e)))
}
