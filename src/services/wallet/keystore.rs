//! Key store directory scanning

use alloy::primitives::Address;
use std::fs;
use std::path::Path;

use crate::error::KeyFileError;
use crate::models::KeyFileRecord;

/// What a scan visitor wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    /// Found what it was looking for; end the scan successfully
    Stop,
}

/// Parse every top-level file in `dir` as a key file and hand it to `visit`.
///
/// Subdirectories are skipped, not descended into. Files are visited in
/// file-name order. Any unreadable or malformed file, or any visitor error,
/// aborts the scan.
pub fn for_each_key_file<F>(dir: &Path, mut visit: F) -> Result<(), KeyFileError>
where
    F: FnMut(KeyFileRecord) -> Result<ScanControl, KeyFileError>,
{
    let io_err = |source: std::io::Error| KeyFileError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|source| KeyFileError::Io {
            path: path.clone(),
            source,
        })?;
        if metadata.is_dir() {
            continue;
        }

        let record = KeyFileRecord::load(&path)?;
        if visit(record)? == ScanControl::Stop {
            break;
        }
    }

    Ok(())
}

/// First key file in `dir` whose address matches `account`
pub fn find_key_file(
    dir: &Path,
    account: Address,
) -> Result<Option<KeyFileRecord>, KeyFileError> {
    let mut found = None;
    for_each_key_file(dir, |record| {
        if record.account() == account {
            found = Some(record);
            Ok(ScanControl::Stop)
        } else {
            Ok(ScanControl::Continue)
        }
    })?;
    Ok(found)
}
