use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Job function of a profile. Determines which form a user submits and whose
/// reports they may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Accounting Staff")]
    AccountingStaff,
    #[serde(rename = "Cashier")]
    Cashier,
    #[serde(rename = "Cashier-Insentif")]
    CashierInsentif,
    #[serde(rename = "Consignment Staff")]
    ConsignmentStaff,
    #[serde(rename = "Consignment Supervisor")]
    ConsignmentSupervisor,
    #[serde(rename = "Accounting Manager")]
    AccountingManager,
    #[serde(rename = "Senior Manager")]
    SeniorManager,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::AccountingStaff,
        Role::Cashier,
        Role::CashierInsentif,
        Role::ConsignmentStaff,
        Role::ConsignmentSupervisor,
        Role::AccountingManager,
        Role::SeniorManager,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::AccountingStaff => "Accounting Staff",
            Role::Cashier => "Cashier",
            Role::CashierInsentif => "Cashier-Insentif",
            Role::ConsignmentStaff => "Consignment Staff",
            Role::ConsignmentSupervisor => "Consignment Supervisor",
            Role::AccountingManager => "Accounting Manager",
            Role::SeniorManager => "Senior Manager",
        }
    }

    /// Parses a stored role tag. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == tag)
    }

    /// Report form this role fills in, if it has one.
    pub const fn report_kind(self) -> Option<ReportKind> {
        match self {
            Role::AccountingStaff => Some(ReportKind::Accounting),
            Role::Cashier | Role::CashierInsentif => Some(ReportKind::Cashier),
            Role::ConsignmentStaff => Some(ReportKind::ConsignmentStaff),
            Role::ConsignmentSupervisor | Role::AccountingManager | Role::SeniorManager => {
                Some(ReportKind::SupervisorManager)
            }
        }
    }

    /// Submitter roles whose reports this role may read. Always contains `self`.
    pub fn view_permission(self) -> BTreeSet<Role> {
        let visible: &[Role] = match self {
            Role::AccountingStaff => &[Role::AccountingStaff],
            Role::Cashier => &[Role::Cashier],
            Role::CashierInsentif => &[Role::CashierInsentif],
            Role::ConsignmentStaff => &[Role::ConsignmentStaff],
            Role::ConsignmentSupervisor => &[Role::ConsignmentSupervisor, Role::ConsignmentStaff],
            Role::AccountingManager => &[
                Role::AccountingManager,
                Role::AccountingStaff,
                Role::Cashier,
                Role::CashierInsentif,
                Role::ConsignmentStaff,
                Role::ConsignmentSupervisor,
            ],
            Role::SeniorManager => &Role::ALL,
        };
        visible.iter().copied().collect()
    }

    /// Manager roles notified when this role submits. Never contains `self`.
    pub fn supervision_map(self) -> BTreeSet<Role> {
        let managers: &[Role] = match self {
            Role::AccountingStaff | Role::Cashier | Role::CashierInsentif => {
                &[Role::AccountingManager, Role::SeniorManager]
            }
            Role::ConsignmentStaff => &[Role::ConsignmentSupervisor, Role::SeniorManager],
            Role::ConsignmentSupervisor | Role::AccountingManager => &[Role::SeniorManager],
            Role::SeniorManager => &[],
        };
        managers.iter().copied().collect()
    }

    /// True for roles that may read reports of roles other than their own.
    pub fn is_manager(self) -> bool {
        self.view_permission().len() > 1
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report schema a submission belongs to. Each kind has its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Accounting,
    Cashier,
    ConsignmentStaff,
    SupervisorManager,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Accounting,
        ReportKind::Cashier,
        ReportKind::ConsignmentStaff,
        ReportKind::SupervisorManager,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ReportKind::Accounting => "accounting",
            ReportKind::Cashier => "cashier",
            ReportKind::ConsignmentStaff => "consignment_staff",
            ReportKind::SupervisorManager => "supervisor_manager",
        }
    }

    pub fn parse(s: &str) -> Option<ReportKind> {
        ReportKind::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Table holding reports of this kind.
    pub const fn storage_location(self) -> &'static str {
        match self {
            ReportKind::Accounting => "accounting_reports",
            ReportKind::Cashier => "cashier_reports",
            ReportKind::ConsignmentStaff => "consignment_staff_reports",
            ReportKind::SupervisorManager => "supervisor_manager_reports",
        }
    }

    /// Human-readable form name. The shared supervisor/manager form is
    /// labelled after the submitting role.
    pub fn label_for(self, role: Role) -> &'static str {
        match self {
            ReportKind::Accounting => "Accounting Report",
            ReportKind::Cashier => "Cashier Report",
            ReportKind::ConsignmentStaff => "Consignment Staff Report",
            ReportKind::SupervisorManager => match role {
                Role::ConsignmentSupervisor => "Supervisor Report",
                _ => "Manager Report",
            },
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-report timestamp column recording when a manager last opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewColumn {
    AccountingManager,
    SeniorManager,
}

impl ViewColumn {
    /// Only the two top manager roles have a tracking column.
    pub const fn for_role(role: Role) -> Option<ViewColumn> {
        match role {
            Role::AccountingManager => Some(ViewColumn::AccountingManager),
            Role::SeniorManager => Some(ViewColumn::SeniorManager),
            _ => None,
        }
    }

    pub const fn column(self) -> &'static str {
        match self {
            ViewColumn::AccountingManager => "accounting_manager_viewed_at",
            ViewColumn::SeniorManager => "senior_manager_viewed_at",
        }
    }
}

pub fn report_kind_for(role: Role) -> Option<ReportKind> {
    role.report_kind()
}

pub fn storage_location_for(kind: ReportKind) -> &'static str {
    kind.storage_location()
}
