use std::fmt;

use serde::{Deserialize, Serialize};

/// Roles that control which HTTP endpoints a principal can access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Editor,
    Writer,
}

impl Role {
    /// Parse a role from a string.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "writer" => Some(Self::Writer),
            _ => None,
        }
    }

    /// Check whether this role has a given permission.
    pub fn has_permission(self, perm: Permission) -> bool {
        match perm {
            Permission::AuditRead => matches!(self, Self::Owner | Self::Admin),
            Permission::CorrectionsWrite => true,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Admin => write!(f, "admin"),
            Self::Editor => write!(f, "editor"),
            Self::Writer => write!(f, "writer"),
        }
    }
}

/// Permissions that map to endpoint groups.
#[derive(Debug, Clone, Copy)]
pub enum Permission {
    AuditRead,
    CorrectionsWrite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_owner_and_admin_read_audit() {
        assert!(Role::Owner.has_permission(Permission::AuditRead));
        assert!(Role::Admin.has_permission(Permission::AuditRead));
        assert!(!Role::Editor.has_permission(Permission::AuditRead));
        assert!(!Role::Writer.has_permission(Permission::AuditRead));
    }

    #[test]
    fn every_role_writes_corrections() {
        for role in [Role::Owner, Role::Admin, Role::Editor, Role::Writer] {
            assert!(role.has_permission(Permission::CorrectionsWrite));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::from_str_loose("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str_loose("nobody"), None);
    }
}
