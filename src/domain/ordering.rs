//! Dependency ordering diagnostics.
//!
//! Discovery order is the only ordering primitive, so a declared dependency
//! is only satisfiable when it is ordered before its dependent.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{FeatureDescriptor, FeatureId};

/// A `depends_on` declaration that discovery order cannot honor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderingIssue {
    /// The dependency names no discovered feature.
    UnknownDependency { feature: FeatureId, dependency: FeatureId },
    /// The dependency runs at or after the dependent.
    OrderedAfter { feature: FeatureId, dependency: FeatureId },
}

impl OrderingIssue {
    pub fn feature(&self) -> &FeatureId {
        match self {
            OrderingIssue::UnknownDependency { feature, .. }
            | OrderingIssue::OrderedAfter { feature, .. } => feature,
        }
    }
}

impl fmt::Display for OrderingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingIssue::UnknownDependency { feature, dependency } => {
                write!(f, "'{}' depends on unknown feature '{}'", feature, dependency)
            }
            OrderingIssue::OrderedAfter { feature, dependency } => write!(
                f,
                "'{}' depends on '{}', which is not ordered before it (rename with a lower numeric prefix)",
                feature, dependency
            ),
        }
    }
}

/// Check every declared dependency of `descriptors` against their order.
pub fn check_ordering(descriptors: &[FeatureDescriptor]) -> Vec<OrderingIssue> {
    let positions: BTreeMap<&FeatureId, usize> =
        descriptors.iter().enumerate().map(|(i, d)| (&d.id, i)).collect();

    let mut issues = Vec::new();
    for (position, descriptor) in descriptors.iter().enumerate() {
        for dependency in &descriptor.depends_on {
            match positions.get(dependency) {
                None => issues.push(OrderingIssue::UnknownDependency {
                    feature: descriptor.id.clone(),
                    dependency: dependency.clone(),
                }),
                Some(&dep_position) if dep_position >= position => {
                    issues.push(OrderingIssue::OrderedAfter {
                        feature: descriptor.id.clone(),
                        dependency: dependency.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }
    issues
}
