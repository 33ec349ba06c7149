//! Output relocation
//!
//! The converter leaves `<stem>_done.csv` next to each input. These files are
//! moved into the output directory, overwriting results of earlier runs.

use std::fs::{read_dir, symlink_metadata};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use fs_extra::file::{CopyOptions, move_file};
use log::{debug, info};

use crate::errors::{Result, file_operation_error, invalid_filename_error};
use crate::utils::{file_name_str, is_hidden_file};

/// Moves `source` into `target_dir` if it exists
///
/// # Returns
/// * `Ok(Some(target))` - the file was moved to `target`
/// * `Ok(None)` - there was nothing to move
///
/// # Errors
/// Any other filesystem failure (permissions, full disk) is returned rather
/// than folded into the "nothing to move" case.
pub fn move_if_exists(source: &Path, target_dir: &Path) -> Result<Option<PathBuf>> {
    let file_name = source
        .file_name()
        .ok_or_else(|| invalid_filename_error(source.to_path_buf()))?;
    let target = target_dir.join(file_name);

    match symlink_metadata(source) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Nothing to move at {}", source.display());
            return Ok(None);
        }
        Err(e) => return Err(file_operation_error(e, source.to_path_buf(), "inspect")),
    }

    let options = CopyOptions::new().overwrite(true);
    move_file(source, &target, &options)
        .map_err(|e| file_operation_error(io::Error::other(e), source.to_path_buf(), "move"))?;

    debug!("Moved {} -> {}", source.display(), target.display());
    Ok(Some(target))
}

/// Lists the completed outputs waiting in `input_dir`
pub fn find_done_files(input_dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = match read_dir(input_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(file_operation_error(e, input_dir.to_path_buf(), "list")),
    };

    let mut done = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| file_operation_error(e, input_dir.to_path_buf(), "list"))?
            .path();
        if path.is_file() && !is_hidden_file(&path) && file_name_str(&path)?.ends_with(suffix) {
            done.push(path);
        }
    }
    done.sort();

    Ok(done)
}

/// Moves every completed output from `input_dir` into `output_dir`
///
/// Finding nothing is a normal outcome and returns an empty list.
pub fn relocate_done_files(
    input_dir: &Path,
    output_dir: &Path,
    suffix: &str,
) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::new();
    for candidate in find_done_files(input_dir, suffix)? {
        if let Some(target) = move_if_exists(&candidate, output_dir)? {
            moved.push(target);
        }
    }

    if moved.is_empty() {
        info!("No *{} files to relocate", suffix);
    } else {
        info!(
            "Relocated {} files into {}",
            moved.len(),
            output_dir.display()
        );
    }

    Ok(moved)
}
