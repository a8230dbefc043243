//! Export coordinator - main orchestrator for the export process
//!
//! Runs the tenant and then each selected collection kind in fixed order.
//! Within a kind, items are taken one page at a time and each item is
//! resolved, projected and written before the next one is touched, so a
//! failure part-way through a kind leaves everything before it on disk.
//! Kinds are independent: a service failure inside one kind is recorded and
//! the next kind still runs. Item-scoped failures skip only that item.
//! Filesystem failures end the run.

use crate::adapters::stormpath::{IdentityService, ItemPage};
use crate::core::export::layout::ExportLayout;
use crate::core::export::summary::{ExportFailure, ExportSummary};
use crate::core::project::{self, ResourceDocument};
use crate::core::writer::write_document;
use crate::domain::{ExportError, ResourceId, ResourceKind, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    service: Arc<dyn IdentityService>,
    root: PathBuf,
    kinds: Vec<ResourceKind>,
}

impl ExportCoordinator {
    /// Create a coordinator exporting every kind under `root`
    pub fn new(service: Arc<dyn IdentityService>, root: impl Into<PathBuf>) -> Self {
        Self {
            service,
            root: root.into(),
            kinds: ResourceKind::COLLECTIONS.to_vec(),
        }
    }

    /// Restrict the run to `kinds`
    ///
    /// The tenant document is written regardless, and kinds always run in
    /// [`ResourceKind::SEQUENCE`] order.
    pub fn with_kinds(mut self, kinds: &[ResourceKind]) -> Self {
        self.kinds = ResourceKind::COLLECTIONS
            .into_iter()
            .filter(|kind| kinds.contains(kind))
            .collect();
        self
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn kinds(&self) -> &[ResourceKind] {
        &self.kinds
    }

    /// Execute the export
    ///
    /// 1. Fetches the tenant; its ID keys every output path
    /// 2. Writes `<root>/<tenantId>/meta.json`
    /// 3. For each selected kind, pages through the collection and writes one
    ///    document per item as soon as it is resolved
    /// 4. Returns the summary
    ///
    /// # Errors
    ///
    /// Fails when the tenant cannot be fetched or has no usable ID, and on
    /// any filesystem error. Everything else is recorded in the summary.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(
            base_url = %self.service.base_url(),
            root = %self.root.display(),
            kinds = ?self.kinds,
            "Starting export process"
        );

        let tenant = self.service.tenant().await?;
        let tenant_id = ResourceId::from_href(&tenant.href)?;
        let layout = ExportLayout::new(self.root.clone(), tenant_id);
        summary.tenant_id = Some(layout.tenant_id().to_string());

        crate::log_kind_start!(ResourceKind::Tenant);
        let tenant_started = Instant::now();
        self.persist(
            ResourceKind::Tenant,
            &tenant.href,
            project::project_tenant(&tenant),
            &layout,
            &mut summary,
        )?;
        let counts = summary.kind_mut(ResourceKind::Tenant).clone();
        crate::log_kind_complete!(
            ResourceKind::Tenant,
            counts.exported,
            counts.failed,
            tenant_started.elapsed()
        );

        for kind in &self.kinds {
            let kind = *kind;
            crate::log_kind_start!(kind);
            let kind_started = Instant::now();

            self.export_kind(kind, &tenant.href, &layout, &mut summary)
                .await?;

            let counts = summary.kind_mut(kind).clone();
            crate::log_kind_complete!(kind, counts.exported, counts.failed, kind_started.elapsed());
        }

        let summary = summary.with_duration(start_time.elapsed());
        Ok(summary)
    }

    async fn export_kind(
        &self,
        kind: ResourceKind,
        tenant_href: &str,
        layout: &ExportLayout,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let mut offset = Some(0);

        while let Some(current) = offset {
            let page = match self.service.list_page(tenant_href, kind, current).await {
                Ok(page) => page,
                Err(e) => {
                    self.abort_kind(kind, "", &e, summary);
                    return Ok(());
                }
            };
            tracing::debug!(kind = %kind, offset = current, count = page.items.len(), "Fetched page");

            for item in page.items {
                let href = ItemPage::item_href(&item).to_string();
                if let Some(e) = self.export_item(kind, &href, item, layout, summary).await? {
                    self.abort_kind(kind, &href, &e, summary);
                    return Ok(());
                }
            }

            offset = page.next_offset;
        }

        Ok(())
    }

    /// Resolves, projects and writes one item
    ///
    /// Returns the error that should end the kind, if any.
    async fn export_item(
        &self,
        kind: ResourceKind,
        href: &str,
        item: Value,
        layout: &ExportLayout,
        summary: &mut ExportSummary,
    ) -> Result<Option<ExportError>> {
        match kind {
            ResourceKind::Tenant => Ok(None),
            ResourceKind::Applications => {
                let resolved = self.service.application(item).await;
                self.settle(kind, href, resolved, project::project_application, layout, summary)
            }
            ResourceKind::Directories => {
                let resolved = self.service.directory(item).await;
                self.settle(kind, href, resolved, project::project_directory, layout, summary)
            }
            ResourceKind::Groups => {
                let resolved = self.service.group(item).await;
                self.settle(kind, href, resolved, project::project_group, layout, summary)
            }
            ResourceKind::Organizations => {
                let resolved = self.service.organization(item).await;
                self.settle(kind, href, resolved, project::project_organization, layout, summary)
            }
            ResourceKind::Accounts => {
                let resolved = self.service.account(item).await;
                self.settle(kind, href, resolved, project::project_account, layout, summary)
            }
        }
    }

    fn settle<T, D, F>(
        &self,
        kind: ResourceKind,
        href: &str,
        resolved: Result<T>,
        project: F,
        layout: &ExportLayout,
        summary: &mut ExportSummary,
    ) -> Result<Option<ExportError>>
    where
        D: ResourceDocument,
        F: Fn(&T) -> Result<D>,
    {
        match resolved {
            Ok(resource) => {
                self.persist(kind, href, project(&resource), layout, summary)?;
                Ok(None)
            }
            Err(e) if e.is_item_scoped() => {
                self.record_item_failure(kind, href, &e, summary);
                Ok(None)
            }
            Err(e) => Ok(Some(e)),
        }
    }

    fn persist<D: ResourceDocument>(
        &self,
        kind: ResourceKind,
        href: &str,
        document: Result<D>,
        layout: &ExportLayout,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        match document {
            Ok(document) => {
                let path = write_document(&layout.resource_path(kind, document.id()), &document)?;
                crate::log_item_exported!(kind, document.id(), path.display());
                summary.kind_mut(kind).exported += 1;
            }
            Err(e) => self.record_item_failure(kind, href, &e, summary),
        }
        Ok(())
    }

    fn abort_kind(&self, kind: ResourceKind, href: &str, error: &ExportError, summary: &mut ExportSummary) {
        crate::log_error_with_context!(error, format!("Aborting {kind}"));
        summary.kind_mut(kind).aborted = true;
        summary.add_failure(ExportFailure::from_error(error).with_context(failure_context(kind, href)));
    }

    fn record_item_failure(
        &self,
        kind: ResourceKind,
        href: &str,
        error: &ExportError,
        summary: &mut ExportSummary,
    ) {
        tracing::warn!(kind = %kind, href = %href, error = %error, "Skipping resource");

        summary.kind_mut(kind).failed += 1;
        summary.add_failure(ExportFailure::from_error(error).with_context(failure_context(kind, href)));
    }
}

fn failure_context(kind: ResourceKind, href: &str) -> String {
    if href.is_empty() {
        format!("kind={kind}")
    } else {
        format!("kind={kind}, href={href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Account, Application, CustomData, Directory, Group, IdentityError, Organization, Tenant,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use tempfile::TempDir;

    const BASE: &str = "https://api.stormpath.com/v1";

    fn stamped() -> CustomData {
        let ts = Utc.with_ymd_and_hms(2016, 6, 1, 9, 0, 0).unwrap();
        CustomData {
            created_at: Some(ts),
            modified_at: Some(ts),
            ..Default::default()
        }
    }

    struct StubService {
        tenant_href: String,
        fail_directories: bool,
        /// Application hrefs whose resolution hits a transport error
        unreachable: Vec<String>,
    }

    fn unavailable() -> ExportError {
        ExportError::Identity(IdentityError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    #[async_trait]
    impl IdentityService for StubService {
        async fn tenant(&self) -> Result<Tenant> {
            let ts = Utc.with_ymd_and_hms(2016, 6, 1, 9, 0, 0).unwrap();
            Ok(Tenant {
                href: self.tenant_href.clone(),
                created_at: Some(ts),
                modified_at: Some(ts),
                custom_data: stamped(),
                ..Default::default()
            })
        }

        async fn list_page(
            &self,
            _tenant_href: &str,
            kind: ResourceKind,
            offset: u64,
        ) -> Result<ItemPage> {
            let hrefs: Vec<String> = match kind {
                ResourceKind::Applications => (1..=3)
                    .map(|n| format!("{BASE}/applications/app{n}"))
                    .collect(),
                ResourceKind::Directories if self.fail_directories => return Err(unavailable()),
                ResourceKind::Accounts => vec![format!("{BASE}/accounts/acc1")],
                _ => Vec::new(),
            };

            // One item per page.
            let index = offset as usize;
            Ok(ItemPage {
                items: hrefs.get(index).map(|h| json!({ "href": h })).into_iter().collect(),
                next_offset: (index + 1 < hrefs.len()).then(|| offset + 1),
            })
        }

        async fn application(&self, item: Value) -> Result<Application> {
            let href = ItemPage::item_href(&item).to_string();
            if self.unreachable.contains(&href) {
                return Err(unavailable());
            }
            let ts = Utc.with_ymd_and_hms(2016, 6, 1, 9, 0, 0).unwrap();
            Ok(Application {
                href,
                created_at: Some(ts),
                modified_at: Some(ts),
                custom_data: stamped(),
                ..Default::default()
            })
        }

        async fn directory(&self, _item: Value) -> Result<Directory> {
            Err(ExportError::InvalidResource("unexpected".to_string()))
        }

        async fn group(&self, _item: Value) -> Result<Group> {
            Err(ExportError::InvalidResource("unexpected".to_string()))
        }

        async fn organization(&self, _item: Value) -> Result<Organization> {
            Err(ExportError::InvalidResource("unexpected".to_string()))
        }

        async fn account(&self, _item: Value) -> Result<Account> {
            Err(ExportError::InvalidResource(
                "Cannot determine account store type".to_string(),
            ))
        }

        fn base_url(&self) -> &str {
            BASE
        }
    }

    fn coordinator(root: &std::path::Path, fail_directories: bool) -> ExportCoordinator {
        coordinator_with(root, fail_directories, Vec::new())
    }

    fn coordinator_with(
        root: &std::path::Path,
        fail_directories: bool,
        unreachable: Vec<String>,
    ) -> ExportCoordinator {
        ExportCoordinator::new(
            Arc::new(StubService {
                tenant_href: format!("{BASE}/tenants/abc123"),
                fail_directories,
                unreachable,
            }),
            root,
        )
    }

    #[test]
    fn test_with_kinds_keeps_sequence_order() {
        let temp_dir = TempDir::new().unwrap();
        let coordinator = coordinator(temp_dir.path(), false).with_kinds(&[
            ResourceKind::Accounts,
            ResourceKind::Tenant,
            ResourceKind::Applications,
        ]);

        assert_eq!(
            coordinator.kinds(),
            &[ResourceKind::Applications, ResourceKind::Accounts]
        );
    }

    #[test]
    fn test_failure_context() {
        assert_eq!(failure_context(ResourceKind::Groups, ""), "kind=groups");
        assert_eq!(
            failure_context(ResourceKind::Groups, "https://x/groups/g1"),
            "kind=groups, href=https://x/groups/g1"
        );
    }

    #[tokio::test]
    async fn test_export_writes_meta_and_applications() {
        let temp_dir = TempDir::new().unwrap();
        let summary = coordinator(temp_dir.path(), false)
            .with_kinds(&[ResourceKind::Applications])
            .execute_export()
            .await
            .unwrap();

        assert!(temp_dir.path().join("abc123/meta.json").is_file());
        for id in ["app1", "app2", "app3"] {
            assert!(temp_dir.path().join(format!("abc123/applications/{id}.json")).is_file());
        }
        assert_eq!(summary.tenant_id.as_deref(), Some("abc123"));
        assert_eq!(summary.kind(ResourceKind::Applications).unwrap().exported, 3);
        assert!(summary.is_successful());
    }

    #[tokio::test]
    async fn test_kind_failure_does_not_stop_later_kinds() {
        let temp_dir = TempDir::new().unwrap();
        let summary = coordinator(temp_dir.path(), true)
            .execute_export()
            .await
            .unwrap();

        let directories = summary.kind(ResourceKind::Directories).unwrap();
        assert!(directories.aborted);
        assert_eq!(summary.kind(ResourceKind::Applications).unwrap().exported, 3);
        assert_eq!(summary.kind(ResourceKind::Accounts).unwrap().failed, 1);
        assert!(!summary.is_successful());
        assert_eq!(summary.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_mid_kind_keeps_earlier_items() {
        let temp_dir = TempDir::new().unwrap();
        let summary = coordinator_with(
            temp_dir.path(),
            false,
            vec![format!("{BASE}/applications/app2")],
        )
        .with_kinds(&[ResourceKind::Applications, ResourceKind::Accounts])
        .execute_export()
        .await
        .unwrap();

        let apps = summary.kind(ResourceKind::Applications).unwrap();
        assert!(apps.aborted);
        assert_eq!(apps.exported, 1);
        assert!(temp_dir.path().join("abc123/applications/app1.json").is_file());
        assert!(!temp_dir.path().join("abc123/applications/app3.json").exists());
        assert_eq!(
            summary.failures[0].context.as_deref(),
            Some(format!("kind=applications, href={BASE}/applications/app2").as_str())
        );

        // The next kind still runs.
        assert_eq!(summary.kind(ResourceKind::Accounts).unwrap().failed, 1);
    }
}
