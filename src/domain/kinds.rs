//! Resource kinds
//!
//! [`ResourceKind`] fixes the export sequence and the on-disk folder of each
//! collection. [`AccountStoreKind`] is the discriminant recorded for
//! polymorphic account-store references.

use super::errors::ExportError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of resources exported, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Tenant,
    Applications,
    Directories,
    Groups,
    Organizations,
    Accounts,
}

impl ResourceKind {
    /// The fixed export sequence
    pub const SEQUENCE: [ResourceKind; 6] = [
        ResourceKind::Tenant,
        ResourceKind::Applications,
        ResourceKind::Directories,
        ResourceKind::Groups,
        ResourceKind::Organizations,
        ResourceKind::Accounts,
    ];

    /// Collection kinds, i.e. everything exported below the tenant
    pub const COLLECTIONS: [ResourceKind; 5] = [
        ResourceKind::Applications,
        ResourceKind::Directories,
        ResourceKind::Groups,
        ResourceKind::Organizations,
        ResourceKind::Accounts,
    ];

    /// Name used for folders, log fields and CLI selection
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Tenant => "tenant",
            ResourceKind::Applications => "applications",
            ResourceKind::Directories => "directories",
            ResourceKind::Groups => "groups",
            ResourceKind::Organizations => "organizations",
            ResourceKind::Accounts => "accounts",
        }
    }

    /// Folder below `<root>/<tenantId>/`; the tenant writes `meta.json` directly there
    pub fn folder(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Tenant => None,
            other => Some(other.as_str()),
        }
    }

    /// Parses a comma-separated selection such as `"applications, accounts"`
    ///
    /// The result follows [`ResourceKind::SEQUENCE`] order regardless of the
    /// order given, and never contains duplicates.
    pub fn parse_selection(input: &str) -> Result<Vec<ResourceKind>> {
        let mut selected = Vec::new();
        for part in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            selected.push(part.parse::<ResourceKind>()?);
        }
        Ok(Self::SEQUENCE
            .into_iter()
            .filter(|kind| selected.contains(kind))
            .collect())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tenant" | "tenants" => Ok(Self::Tenant),
            "application" | "applications" => Ok(Self::Applications),
            "directory" | "directories" => Ok(Self::Directories),
            "group" | "groups" => Ok(Self::Groups),
            "organization" | "organizations" => Ok(Self::Organizations),
            "account" | "accounts" => Ok(Self::Accounts),
            _ => Err(ExportError::Configuration(format!(
                "Unknown resource kind: {s}. Expected one of: tenant, applications, \
                 directories, groups, organizations, accounts"
            ))),
        }
    }
}

/// Concrete kind behind an account-store reference
///
/// Serializes as `"Group"`, `"Directory"` or `"Organization"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStoreKind {
    Group,
    Directory,
    Organization,
}

impl AccountStoreKind {
    /// Infers the store kind from its locator (`.../directories/<id>` etc.)
    pub fn from_href(href: &str) -> Result<Self> {
        let mut segments = href.trim_end_matches('/').rsplit('/');
        let _id = segments.next();
        match segments.next() {
            Some("groups") => Ok(Self::Group),
            Some("directories") => Ok(Self::Directory),
            Some("organizations") => Ok(Self::Organization),
            _ => Err(ExportError::InvalidResource(format!(
                "Cannot determine account store type from href: {href}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStoreKind::Group => "Group",
            AccountStoreKind::Directory => "Directory",
            AccountStoreKind::Organization => "Organization",
        }
    }
}

impl fmt::Display for AccountStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        let names: Vec<&str> = ResourceKind::SEQUENCE.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "tenant",
                "applications",
                "directories",
                "groups",
                "organizations",
                "accounts"
            ]
        );
    }

    #[test]
    fn test_folder() {
        assert_eq!(ResourceKind::Tenant.folder(), None);
        assert_eq!(ResourceKind::Groups.folder(), Some("groups"));
    }

    #[test]
    fn test_parse_selection_keeps_sequence_order() {
        let kinds = ResourceKind::parse_selection("accounts, Applications,accounts").unwrap();
        assert_eq!(
            kinds,
            vec![ResourceKind::Applications, ResourceKind::Accounts]
        );
    }

    #[test]
    fn test_parse_selection_rejects_unknown() {
        assert!(ResourceKind::parse_selection("applications,widgets").is_err());
    }

    #[test]
    fn test_account_store_kind_from_href() {
        assert_eq!(
            AccountStoreKind::from_href("https://api.stormpath.com/v1/directories/d1").unwrap(),
            AccountStoreKind::Directory
        );
        assert_eq!(
            AccountStoreKind::from_href("https://api.stormpath.com/v1/groups/g1").unwrap(),
            AccountStoreKind::Group
        );
        assert_eq!(
            AccountStoreKind::from_href("https://api.stormpath.com/v1/organizations/o1").unwrap(),
            AccountStoreKind::Organization
        );
        assert!(AccountStoreKind::from_href("https://api.stormpath.com/v1/accounts/a1").is_err());
    }

    #[test]
    fn test_account_store_kind_serializes_as_type_tag() {
        let json = serde_json::to_string(&AccountStoreKind::Directory).unwrap();
        assert_eq!(json, "\"Directory\"");
    }
}
