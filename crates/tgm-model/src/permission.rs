//! # Permission Profiles
//!
//! Named lists of `{roles, access}` rules. The model carries them so that
//! root entities can name one, but enforcement lives elsewhere; here they
//! are only checked for structural sanity.

use serde::{Deserialize, Serialize};
use tgm_core::SourceLocation;

use crate::config::PermissionProfileConfig;
use crate::validation::ValidationContext;

/// Profile applied to root entities that do not name one.
pub const DEFAULT_PERMISSION_PROFILE: &str = "default";

/// What a permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessKind {
    Read,
    ReadWrite,
}

impl AccessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadWrite => "readWrite",
        }
    }

    pub fn allows_write(&self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

/// One rule of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub roles: Vec<String>,
    pub access: AccessKind,
}

/// A named permission profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionProfile {
    name: String,
    permissions: Vec<Permission>,
    location: Option<SourceLocation>,
}

impl PermissionProfile {
    pub(crate) fn from_config(name: &str, config: PermissionProfileConfig) -> Self {
        Self {
            name: name.to_string(),
            permissions: config
                .permissions
                .into_iter()
                .map(|p| Permission {
                    roles: p.roles,
                    access: p.access,
                })
                .collect(),
            location: config.location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Roles granted at least `access`, in declaration order, deduplicated.
    pub fn roles_with(&self, access: AccessKind) -> Vec<&str> {
        let mut roles: Vec<&str> = Vec::new();
        for permission in &self.permissions {
            if access.allows_write() && !permission.access.allows_write() {
                continue;
            }
            for role in &permission.roles {
                if !roles.contains(&role.as_str()) {
                    roles.push(role);
                }
            }
        }
        roles
    }

    pub(crate) fn validate(&self, ctx: &mut ValidationContext) {
        if self.permissions.iter().any(|p| p.roles.is_empty()) {
            ctx.error(
                format!(
                    "Permission profile \"{}\" declares a permission without roles.",
                    self.name
                ),
                self.location.as_ref(),
            );
        }
    }
}
