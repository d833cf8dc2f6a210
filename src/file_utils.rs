use anyhow::{Context, Result};
use log::debug;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::errors::FileError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed; an existing directory is fine
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {:?}", path))
    }

    // @checks: Extension after the last '.' of the file name, ignoring case
    pub fn has_extension<P: AsRef<Path>>(path: P, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.eq_ignore_ascii_case(extension)))
            .unwrap_or(false)
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, extension) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Move a file into `target_dir`, keeping its file name
    ///
    /// Creates `target_dir` as needed and replaces a file of the same name.
    /// Falls back to copy-and-replace when a plain rename is not possible,
    /// e.g. across filesystems.
    pub fn move_file<P1: AsRef<Path>, P2: AsRef<Path>>(source: P1, target_dir: P2) -> Result<PathBuf, FileError> {
        let source = source.as_ref();
        let target_dir = target_dir.as_ref();

        if !Self::file_exists(source) {
            return Err(FileError::move_failed(source, target_dir, "source file does not exist"));
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| FileError::move_failed(source, target_dir, "source path has no file name"))?;

        Self::ensure_dir(target_dir)
            .map_err(|e| FileError::move_failed(source, target_dir, format!("{:#}", e)))?;

        let destination = target_dir.join(file_name);

        if let Err(rename_error) = fs::rename(source, &destination) {
            debug!("Rename of {:?} failed ({}), copying instead", source, rename_error);
            Self::copy_and_replace(source, target_dir, &destination).map_err(|e| {
                FileError::move_failed(source, target_dir, format!("{:#} (rename: {})", e, rename_error))
            })?;
        }

        Ok(destination)
    }

    // Stage a copy next to the destination, swap it in, then drop the source
    fn copy_and_replace(source: &Path, target_dir: &Path, destination: &Path) -> Result<()> {
        let mut staged = NamedTempFile::new_in(target_dir)
            .with_context(|| format!("Failed to create a temporary file in {:?}", target_dir))?;

        let mut reader = File::open(source)
            .with_context(|| format!("Failed to open {:?}", source))?;
        io::copy(&mut reader, staged.as_file_mut())
            .with_context(|| format!("Failed to copy {:?}", source))?;
        staged.as_file().sync_all()?;

        staged
            .persist(destination)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {:?}", destination))?;

        fs::remove_file(source)
            .with_context(|| format!("Copied but failed to remove {:?}", source))?;

        Ok(())
    }
}
