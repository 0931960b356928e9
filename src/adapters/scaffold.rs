use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{Dir, DirEntry, include_dir};

use crate::domain::AppError;

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

/// An embedded scaffold file with its path relative to the scaffold root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: PathBuf,
    pub content: &'static [u8],
}

/// All embedded scaffold files, sorted by path.
pub fn scaffold_files() -> Vec<ScaffoldFile> {
    let mut files = Vec::new();
    collect_files(&SCAFFOLD_DIR, &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn collect_files(dir: &Dir<'static>, out: &mut Vec<ScaffoldFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(subdir) => collect_files(subdir, out),
            DirEntry::File(file) => out.push(ScaffoldFile {
                path: file.path().to_path_buf(),
                content: file.contents(),
            }),
        }
    }
}

pub fn scaffold_file_content(path: &str) -> Option<&'static str> {
    SCAFFOLD_DIR.get_file(path).and_then(|file| file.contents_utf8())
}

/// Write the scaffold under `target`, creating directories as needed.
///
/// Nothing is written when any destination file already exists.
pub fn write_scaffold(target: &Path) -> Result<Vec<PathBuf>, AppError> {
    let files = scaffold_files();

    if let Some(existing) =
        files.iter().map(|f| target.join(&f.path)).find(|destination| destination.exists())
    {
        return Err(AppError::ScaffoldExists(existing));
    }

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let destination = target.join(&file.path);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&destination, file.content)?;
        tracing::debug!(path = %destination.display(), "Wrote scaffold file");
        written.push(destination);
    }
    Ok(written)
}
