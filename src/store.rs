// src/store.rs

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::review::ReviewRecord;

/// Writes the reviews as a pretty-printed JSON array.
///
/// The whole document is serialised first and written to a sibling temporary
/// file, which is then renamed over `path`, so an interrupted run never leaves
/// a truncated export behind.
pub fn save_reviews(path: &Path, reviews: &[ReviewRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(reviews)?;

    let tmp = temp_path(path);
    fs::write(&tmp, &json).map_err(|source| io_error(&tmp, source))?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        io_error(path, source)
    })
}

/// Reads back an export written by [`save_reviews`].
pub fn load_reviews(path: &Path) -> Result<Vec<ReviewRecord>, StoreError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let reviews = serde_json::from_reader(BufReader::new(file))?;
    Ok(reviews)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
