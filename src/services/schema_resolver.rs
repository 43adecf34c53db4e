use thiserror::Error;
use tracing::debug;

use crate::domain::schema::{ColumnOverrides, ColumnRole, ResolvedColumns};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("could not identify the {} column(s); available columns: {}", join_roles(.roles), .available.join(", "))]
    Unresolved {
        roles: Vec<ColumnRole>,
        available: Vec<String>,
    },
    #[error("{role} column {column:?} does not exist; available columns: {}", .available.join(", "))]
    UnknownColumn {
        role: ColumnRole,
        column: String,
        available: Vec<String>,
    },
}

fn join_roles(roles: &[ColumnRole]) -> String {
    roles
        .iter()
        .map(|role| role.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A label variant a role may appear under in an export.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    label: &'static str,
    /// Whether the label may match as a substring. Generic labels such as
    /// "Estimate" only match whole column names.
    substring: bool,
}

const fn exact(label: &'static str) -> Candidate {
    Candidate {
        label,
        substring: false,
    }
}

const fn fuzzy(label: &'static str) -> Candidate {
    Candidate {
        label,
        substring: true,
    }
}

const GROUP_KEY: &[Candidate] = &[
    fuzzy("Iteration"),
    fuzzy("Release"),
    fuzzy("Iteration Name"),
    fuzzy("Sprint"),
    fuzzy("Fix Version"),
];

const ORIGINAL_ESTIMATE: &[Candidate] = &[
    fuzzy("Original Estimate"),
    fuzzy("OriginalEstimate"),
    fuzzy("Σ Original Estimate"),
    fuzzy("Σ Original"),
    fuzzy("Original"),
    exact("Estimate"),
];

const REMAINING_ESTIMATE: &[Candidate] = &[
    fuzzy("Remaining Estimate"),
    fuzzy("RemainingEstimate"),
    fuzzy("Σ Remaining Estimate"),
    fuzzy("Σ Remaining"),
    fuzzy("Remaining"),
    exact("Remaining Work"),
];

fn candidates(role: ColumnRole) -> &'static [Candidate] {
    match role {
        ColumnRole::GroupKey => GROUP_KEY,
        ColumnRole::OriginalEstimate => ORIGINAL_ESTIMATE,
        ColumnRole::RemainingEstimate => REMAINING_ESTIMATE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchStage {
    Exact,
    CaseInsensitive,
    Substring,
}

const STAGES: [MatchStage; 3] = [
    MatchStage::Exact,
    MatchStage::CaseInsensitive,
    MatchStage::Substring,
];

impl MatchStage {
    fn matches(&self, candidate: &Candidate, column: &str) -> bool {
        match self {
            MatchStage::Exact => column == candidate.label,
            MatchStage::CaseInsensitive => column.to_lowercase() == candidate.label.to_lowercase(),
            MatchStage::Substring => {
                if !candidate.substring {
                    return false;
                }
                let column = column.to_lowercase();
                let label = candidate.label.to_lowercase();
                column.contains(&label) || (label.contains(&column) && !is_whole_name_label(&column))
            }
        }
    }
}

/// Whether `column` (lowercased) is a generic label that only ever matches a
/// whole column name, so it must not be read as a fragment of a longer label.
fn is_whole_name_label(column: &str) -> bool {
    [GROUP_KEY, ORIGINAL_ESTIMATE, REMAINING_ESTIMATE]
        .iter()
        .flat_map(|list| list.iter())
        .any(|candidate| !candidate.substring && candidate.label.to_lowercase() == column)
}

/// Finds the column that most likely holds `role`.
///
/// Every candidate is tried for an exact match first, then a case-insensitive
/// match, then a substring match in either direction. Within a stage the
/// candidates are tried in priority order and columns left to right.
pub fn resolve<S: AsRef<str>>(columns: &[S], role: ColumnRole) -> Option<String> {
    for stage in STAGES {
        for candidate in candidates(role) {
            let found = columns
                .iter()
                .map(|column| column.as_ref())
                .filter(|column| !column.trim().is_empty())
                .find(|column| stage.matches(candidate, column.trim()));
            if let Some(column) = found {
                debug!(%role, column, label = candidate.label, ?stage, "resolved column");
                return Some(column.to_string());
            }
        }
    }
    None
}

/// Resolves all three roles, taking explicit overrides first.
///
/// A column taken by an override or by an earlier role is not offered to the
/// remaining roles.
///
/// # Errors
/// - [`SchemaError::UnknownColumn`] when an override names a column that is not present.
/// - [`SchemaError::Unresolved`] when any role has neither an override nor a heuristic match.
pub fn resolve_all<S: AsRef<str>>(
    columns: &[S],
    overrides: &ColumnOverrides,
) -> Result<ResolvedColumns, SchemaError> {
    let available = || columns.iter().map(|c| c.as_ref().to_string()).collect::<Vec<_>>();

    let mut claimed = Vec::new();
    for role in ColumnRole::ALL {
        if let Some(column) = overrides.get(role) {
            if !columns.iter().any(|c| c.as_ref() == column) {
                return Err(SchemaError::UnknownColumn {
                    role,
                    column: column.to_string(),
                    available: available(),
                });
            }
            claimed.push(column.to_string());
        }
    }

    let mut resolved = Vec::with_capacity(ColumnRole::ALL.len());
    let mut missing = Vec::new();
    for role in ColumnRole::ALL {
        let column = match overrides.get(role) {
            Some(column) => Some(column.to_string()),
            None => {
                let unclaimed: Vec<&str> = columns
                    .iter()
                    .map(|c| c.as_ref())
                    .filter(|c| !claimed.iter().any(|taken| taken == c))
                    .collect();
                resolve(&unclaimed, role)
            }
        };
        match &column {
            Some(name) => claimed.push(name.clone()),
            None => missing.push(role),
        }
        resolved.push(column);
    }

    if !missing.is_empty() {
        return Err(SchemaError::Unresolved {
            roles: missing,
            available: available(),
        });
    }

    match <[Option<String>; 3]>::try_from(resolved) {
        Ok([Some(group_key), Some(original_estimate), Some(remaining_estimate)]) => {
            Ok(ResolvedColumns {
                group_key,
                original_estimate,
                remaining_estimate,
            })
        }
        _ => Err(SchemaError::Unresolved {
            roles: ColumnRole::ALL.to_vec(),
            available: available(),
        }),
    }
}
