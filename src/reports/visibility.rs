use std::collections::BTreeSet;

use crate::types::{Profile, Report, ReportKind, Role};

/// Roles whose reports `role` may read.
pub fn visible_roles_for(role: Role) -> BTreeSet<Role> {
    role.view_permission()
}

/// Like [`visible_roles_for`] for a raw role tag. Unknown tags see nothing.
pub fn visible_roles_for_tag(tag: &str) -> BTreeSet<Role> {
    Role::parse(tag).map(visible_roles_for).unwrap_or_default()
}

/// Distinct report kinds reachable from the roles `role` may read, one per
/// kind, in taxonomy order.
pub fn visible_kinds_for(role: Role) -> Vec<ReportKind> {
    visible_roles_for(role)
        .into_iter()
        .filter_map(Role::report_kind)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The identity reports are resolved for. A viewer without a role sees
/// nothing.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub id: String,
    pub role: Option<Role>,
}

impl Viewer {
    pub fn new(id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn visible_roles(&self) -> BTreeSet<Role> {
        self.role.map(visible_roles_for).unwrap_or_default()
    }

    pub fn visible_kinds(&self) -> Vec<ReportKind> {
        self.role.map(visible_kinds_for).unwrap_or_default()
    }

    /// Resolves what this viewer may read once, for checking many rows.
    pub fn scope(&self) -> ViewScope<'_> {
        ViewScope {
            viewer_id: &self.id,
            manager: self.role.is_some_and(Role::is_manager),
            roles: self.visible_roles(),
            kinds: self.visible_kinds().into_iter().collect(),
        }
    }

    pub fn can_view(&self, report: &Report, submitter_role: Option<Role>) -> bool {
        self.scope().allows(report, submitter_role)
    }
}

/// A viewer's visible roles and kinds, resolved up front.
#[derive(Debug)]
pub struct ViewScope<'a> {
    viewer_id: &'a str,
    manager: bool,
    roles: BTreeSet<Role>,
    kinds: BTreeSet<ReportKind>,
}

impl ViewScope<'_> {
    /// Managers read every report whose submitter role they may see; other
    /// roles only read their own.
    pub fn allows(&self, report: &Report, submitter_role: Option<Role>) -> bool {
        if !self.kinds.contains(&report.kind()) {
            return false;
        }
        if !self.manager {
            return report.user_id == self.viewer_id;
        }
        submitter_role.is_some_and(|r| self.roles.contains(&r))
    }
}

impl From<&Profile> for Viewer {
    fn from(profile: &Profile) -> Self {
        Viewer::new(profile.id.clone(), profile.role)
    }
}
