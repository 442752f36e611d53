use std::path::{Path, PathBuf};

use crate::contract::PYTHON_RUNTIME;

/// Directory the installer targets inside the staging root. Lambda requires
/// this exact prefix inside the published archive for Python layers.
pub fn site_packages_dir(staging_root: &Path) -> PathBuf {
    staging_root
        .join("python")
        .join("lib")
        .join(PYTHON_RUNTIME)
        .join("site-packages")
}

/// Archive entry name for a staged file: its path relative to the staging
/// root, with `/` separators regardless of platform.
pub fn archive_entry_name(staging_root: &Path, file_path: &Path) -> Result<String, String> {
    let relative = file_path.strip_prefix(staging_root).map_err(|_| {
        format!(
            "staged file {} is outside the staging root {}",
            file_path.display(),
            staging_root.display()
        )
    })?;

    let segments: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return Err(format!(
            "staged file {} has no path relative to the staging root",
            file_path.display()
        ));
    }

    Ok(segments.join("/"))
}
