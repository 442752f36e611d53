use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use layer_forge_core::layout::archive_entry_name;
use walkdir::WalkDir;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

/// Walks the staging root and writes every regular file into a
/// deflate-compressed zip, named by its root-relative path. Returns the
/// number of entries written.
pub fn write_layer_archive(staging_root: &Path, archive_path: &Path) -> Result<usize, String> {
    let file = File::create(archive_path)
        .map_err(|error| format!("failed to create {}: {error}", archive_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    for entry in WalkDir::new(staging_root).sort_by_file_name() {
        let entry = entry.map_err(|error| format!("failed to walk staging root: {error}"))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let entry_name = archive_entry_name(staging_root, entry.path())?;
        let mut source = File::open(entry.path())
            .map_err(|error| format!("failed to open {}: {error}", entry.path().display()))?;
        let mut data = Vec::new();
        source
            .read_to_end(&mut data)
            .map_err(|error| format!("failed to read {}: {error}", entry.path().display()))?;

        zip.start_file(&entry_name, options)
            .map_err(|error| format!("failed to start archive entry {entry_name}: {error}"))?;
        zip.write_all(&data)
            .map_err(|error| format!("failed to write archive entry {entry_name}: {error}"))?;
        entries += 1;
    }

    zip.finish()
        .map_err(|error| format!("failed to finish {}: {error}", archive_path.display()))?;

    Ok(entries)
}
