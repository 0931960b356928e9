//! Feature discovery - builds the ordered catalog from a features directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, FeatureDescriptor, FeatureId, FeatureManifest, ManifestError};

/// Manifest file extension.
const MANIFEST_EXTENSION: &str = "toml";

/// Scan `directory` for feature manifests.
///
/// Descriptors are ordered lexicographically by file name; numeric prefixes
/// (`01-`, `02-`) exist only to control this order. A manifest whose
/// metadata cannot be extracted still yields a descriptor built from its
/// file name. Nothing found is an empty catalog, not an error.
pub fn discover(directory: &Path) -> Result<Vec<FeatureDescriptor>, AppError> {
    if !directory.is_dir() {
        return Err(AppError::FeaturesDirectoryMissing(directory.to_path_buf()));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if is_candidate(&path) {
            candidates.push(path);
        }
    }
    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut seen: BTreeSet<FeatureId> = BTreeSet::new();
    let mut descriptors = Vec::with_capacity(candidates.len());

    for (index, path) in candidates.iter().enumerate() {
        let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        let (id, naming_error) = assign_id(&stem, index + 1, &seen, path);
        seen.insert(id.clone());

        let descriptor = match naming_error {
            Some(err) => FeatureDescriptor::degraded(id, &stem, path, &err),
            None => describe(id, &stem, path),
        };
        descriptors.push(descriptor);
    }

    tracing::debug!(
        directory = %directory.display(),
        "Discovered {} feature(s)",
        descriptors.len()
    );
    Ok(descriptors)
}

/// Pick a unique id for the manifest at `position` (1-based).
///
/// The stem without its ordering prefix is preferred. When that id is taken
/// the full stem is tried, then numeric suffixes. A stem that cannot form an
/// id at all is sanitized and reported as a naming error.
fn assign_id(
    stem: &str,
    position: usize,
    seen: &BTreeSet<FeatureId>,
    path: &Path,
) -> (FeatureId, Option<ManifestError>) {
    let (base, naming_error) = match FeatureId::from_file_stem(stem) {
        Ok(id) if !seen.contains(&id) => return (id, None),
        Ok(id) => {
            if let Ok(full) = FeatureId::new(stem)
                && !seen.contains(&full)
            {
                tracing::warn!(
                    path = %path.display(),
                    "Feature id '{}' already taken, using '{}'",
                    id,
                    full
                );
                return (full, None);
            }
            (id, None)
        }
        Err(_) => {
            let id = FeatureId::sanitized(stem, position);
            tracing::warn!(
                path = %path.display(),
                "File name does not form a valid feature id, using '{}'",
                id
            );
            (id, Some(ManifestError::InvalidFileName(stem.to_string())))
        }
    };

    let mut id = base.clone();
    let mut n = 2;
    while seen.contains(&id) {
        id = base.with_suffix(n);
        n += 1;
    }
    if id != base {
        tracing::warn!(path = %path.display(), "Feature id '{}' already taken, using '{}'", base, id);
    }
    (id, naming_error)
}

fn describe(id: FeatureId, stem: &str, path: &Path) -> FeatureDescriptor {
    let extracted = fs::read_to_string(path)
        .map_err(|e| ManifestError::Unreadable(e.to_string()))
        .and_then(|content| FeatureManifest::parse(&content))
        .map(|manifest| FeatureDescriptor::from_manifest(id.clone(), stem, path, &manifest));

    match extracted {
        Ok(descriptor) => descriptor,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                "Metadata extraction failed, using file name defaults: {}",
                err
            );
            FeatureDescriptor::degraded(id, stem, path, &err)
        }
    }
}

fn is_candidate(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|name| name.starts_with('.'));
    let manifest = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION));

    !hidden && manifest && path.is_file()
}
