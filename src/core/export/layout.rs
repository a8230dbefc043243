//! On-disk layout of an export
//!
//! ```text
//! <root>/<tenantId>/meta.json
//! <root>/<tenantId>/<kind>/<resourceId>.json
//! ```

use crate::domain::{ResourceId, ResourceKind};
use std::path::{Path, PathBuf};

/// Folder created under the working directory when no location is given
pub const DEFAULT_EXPORT_DIR: &str = "stormpath-exports";

const META_FILE: &str = "meta";

/// Resolves document paths for one tenant's export
///
/// Paths are returned without the `.json` extension; the writer appends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    root: PathBuf,
    tenant_id: ResourceId,
}

impl ExportLayout {
    pub fn new(root: impl Into<PathBuf>, tenant_id: ResourceId) -> Self {
        Self {
            root: root.into(),
            tenant_id,
        }
    }

    /// `<cwd>/stormpath-exports`, or a relative `stormpath-exports` when the
    /// working directory cannot be determined
    pub fn default_root() -> PathBuf {
        std::env::current_dir()
            .map(|cwd| cwd.join(DEFAULT_EXPORT_DIR))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EXPORT_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tenant_id(&self) -> &ResourceId {
        &self.tenant_id
    }

    /// `<root>/<tenantId>`
    pub fn tenant_dir(&self) -> PathBuf {
        self.root.join(self.tenant_id.as_str())
    }

    /// `<root>/<tenantId>/meta`
    pub fn meta_path(&self) -> PathBuf {
        self.tenant_dir().join(META_FILE)
    }

    /// `<root>/<tenantId>/<kind>/<id>`; the tenant kind maps to [`Self::meta_path`]
    pub fn resource_path(&self, kind: ResourceKind, id: &str) -> PathBuf {
        match kind.folder() {
            Some(folder) => self.tenant_dir().join(folder).join(id),
            None => self.meta_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::writer::json_path;

    fn layout() -> ExportLayout {
        ExportLayout::new("/tmp/out", ResourceId::new("abc123").unwrap())
    }

    #[test]
    fn test_application_path() {
        let path = layout().resource_path(ResourceKind::Applications, "app1");
        assert_eq!(
            json_path(&path),
            PathBuf::from("/tmp/out/abc123/applications/app1.json")
        );
    }

    #[test]
    fn test_meta_path() {
        assert_eq!(
            json_path(&layout().meta_path()),
            PathBuf::from("/tmp/out/abc123/meta.json")
        );
        assert_eq!(
            layout().resource_path(ResourceKind::Tenant, "ignored"),
            layout().meta_path()
        );
    }

    #[test]
    fn test_every_collection_has_its_folder() {
        for kind in ResourceKind::COLLECTIONS {
            let path = layout().resource_path(kind, "x1");
            assert_eq!(
                path,
                PathBuf::from(format!("/tmp/out/abc123/{}/x1", kind.as_str()))
            );
        }
    }

    #[test]
    fn test_default_root_ends_with_export_dir() {
        assert!(ExportLayout::default_root().ends_with(DEFAULT_EXPORT_DIR));
    }
}
