use std::fmt;

/// The columns the engine needs from every snapshot export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    GroupKey,
    OriginalEstimate,
    RemainingEstimate,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 3] = [
        ColumnRole::GroupKey,
        ColumnRole::OriginalEstimate,
        ColumnRole::RemainingEstimate,
    ];

    /// Name of the CLI flag that overrides this role.
    pub fn override_flag(&self) -> &'static str {
        match self {
            ColumnRole::GroupKey => "--iteration-column",
            ColumnRole::OriginalEstimate => "--original-column",
            ColumnRole::RemainingEstimate => "--remaining-column",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRole::GroupKey => "group key",
            ColumnRole::OriginalEstimate => "original estimate",
            ColumnRole::RemainingEstimate => "remaining estimate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub group_key: String,
    pub original_estimate: String,
    pub remaining_estimate: String,
}

/// Explicit column choices that bypass the heuristics for a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub group_key: Option<String>,
    pub original_estimate: Option<String>,
    pub remaining_estimate: Option<String>,
}

impl ColumnOverrides {
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::GroupKey => self.group_key.as_deref(),
            ColumnRole::OriginalEstimate => self.original_estimate.as_deref(),
            ColumnRole::RemainingEstimate => self.remaining_estimate.as_deref(),
        }
    }

    /// Fills every unset role from `fallback`.
    pub fn or(self, fallback: ColumnOverrides) -> ColumnOverrides {
        ColumnOverrides {
            group_key: self.group_key.or(fallback.group_key),
            original_estimate: self.original_estimate.or(fallback.original_estimate),
            remaining_estimate: self.remaining_estimate.or(fallback.remaining_estimate),
        }
    }
}
