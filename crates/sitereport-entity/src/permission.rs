//! Permission enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A capability a role grants on the reporting platform.
///
/// Permissions are only ever derived from a role via the role table;
/// they are never customized per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// View reports.
    ReadReports,
    /// Create new reports.
    CreateReports,
    /// Edit report content.
    EditReports,
    /// Delete reports.
    DeleteReports,
    /// Manage document templates.
    ManageTemplates,
    /// Manage users and grant elevated share permissions.
    ManageUsers,
    /// Manage projects.
    ManageProjects,
    /// Export reports to documents.
    ExportReports,
    /// Approve reports.
    ApproveReports,
    /// Acquire page editing locks.
    LockPages,
    /// Release other users' page locks.
    UnlockPages,
    /// Share reports with other users or publicly.
    ShareReports,
}

impl Permission {
    /// Return the permission as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadReports => "read_reports",
            Self::CreateReports => "create_reports",
            Self::EditReports => "edit_reports",
            Self::DeleteReports => "delete_reports",
            Self::ManageTemplates => "manage_templates",
            Self::ManageUsers => "manage_users",
            Self::ManageProjects => "manage_projects",
            Self::ExportReports => "export_reports",
            Self::ApproveReports => "approve_reports",
            Self::LockPages => "lock_pages",
            Self::UnlockPages => "unlock_pages",
            Self::ShareReports => "share_reports",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = sitereport_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read_reports" => Ok(Self::ReadReports),
            "create_reports" => Ok(Self::CreateReports),
            "edit_reports" => Ok(Self::EditReports),
            "delete_reports" => Ok(Self::DeleteReports),
            "manage_templates" => Ok(Self::ManageTemplates),
            "manage_users" => Ok(Self::ManageUsers),
            "manage_projects" => Ok(Self::ManageProjects),
            "export_reports" => Ok(Self::ExportReports),
            "approve_reports" => Ok(Self::ApproveReports),
            "lock_pages" => Ok(Self::LockPages),
            "unlock_pages" => Ok(Self::UnlockPages),
            "share_reports" => Ok(Self::ShareReports),
            _ => Err(sitereport_core::AppError::validation(format!(
                "Invalid permission: '{s}'"
            ))),
        }
    }
}
