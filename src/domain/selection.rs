//! Include/exclude selection over a discovered catalog.

use crate::domain::{AppError, FeatureDescriptor};

/// Features chosen for a run, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub features: Vec<FeatureDescriptor>,
    /// Exclude names that matched nothing in the catalog.
    pub unmatched_excludes: Vec<String>,
}

/// Apply include and exclude lists to `catalog`.
///
/// An empty include list selects everything. Matching is case-insensitive.
/// Discovery order is kept regardless of the order names were given in.
/// An include name that matches nothing is an error; an unmatched exclude is
/// only reported back.
pub fn select(
    catalog: &[FeatureDescriptor],
    include: &[String],
    exclude: &[String],
) -> Result<Selection, AppError> {
    let include = normalized(include);
    let exclude = normalized(exclude);

    for name in &include {
        if !catalog.iter().any(|d| d.id.matches(name)) {
            return Err(AppError::FeatureNotFound {
                name: name.clone(),
                available: catalog.iter().map(|d| d.id.to_string()).collect::<Vec<_>>().join(", "),
            });
        }
    }

    let unmatched_excludes =
        exclude.iter().filter(|name| !catalog.iter().any(|d| d.id.matches(name))).cloned().collect();

    let features = catalog
        .iter()
        .filter(|d| include.is_empty() || include.iter().any(|name| d.id.matches(name)))
        .filter(|d| !exclude.iter().any(|name| d.id.matches(name)))
        .cloned()
        .collect();

    Ok(Selection { features, unmatched_excludes })
}

fn normalized(names: &[String]) -> Vec<String> {
    names.iter().map(|n| n.trim().to_string()).filter(|n| !n.is_empty()).collect()
}
