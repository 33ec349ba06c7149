use std::path::Path;

use directories::ProjectDirs;

use crate::constants::{APPLICATION, ORGANIZATION, QUALIFIER};
use crate::errors::{Result, invalid_filename_error, path_operation_error};

/// Per-user directories of the application, if the platform has a home
pub(crate) fn project_folder() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the file name of a path as a string
pub(crate) fn file_name_str(path: &Path) -> Result<&str> {
    path.file_name()
        .ok_or_else(|| path_operation_error(path.to_path_buf(), "get filename of"))
        .and_then(|os_str| {
            os_str
                .to_str()
                .ok_or_else(|| invalid_filename_error(path.to_path_buf()))
        })
}

#[cfg(unix)]
pub(crate) fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(windows)]
pub(crate) fn is_hidden_file(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    if let Ok(metadata) = path.metadata() {
        metadata.file_attributes() & 0x2 != 0 // FILE_ATTRIBUTE_HIDDEN
    } else {
        false
    }
}
