//! Identity service contract
//!
//! [`IdentityService`] is everything the exporter needs from the remote side.
//! Collections are read one page at a time as raw items; each item is then
//! resolved on its own into a full record (custom data expanded, optional
//! branches checked once and expressed as `Option`/`Vec`). The caller decides
//! when to resolve, so nothing beyond the current page is held in memory.

use crate::domain::{
    Account, Application, Directory, Group, Organization, ResourceKind, Result, Tenant,
};
use async_trait::async_trait;
use serde_json::Value;

/// One page of a tenant collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPage {
    /// Items as listed, in remote order
    pub items: Vec<Value>,

    /// Offset of the following page; `None` on the last page
    pub next_offset: Option<u64>,
}

impl ItemPage {
    /// Locator of a raw item, empty if it has none
    pub fn item_href(item: &Value) -> &str {
        item.get("href").and_then(Value::as_str).unwrap_or_default()
    }
}

/// Read-only access to one tenant's identity data
///
/// A failing `list_page` fails the rest of that kind. A failing resolve call
/// fails only its item when the error is item-scoped
/// ([`ExportError::is_item_scoped`](crate::domain::ExportError::is_item_scoped));
/// anything else (transport, authentication) fails the rest of the kind.
///
/// # Example
///
/// ```no_run
/// use stormpath_export::adapters::stormpath::{IdentityService, StormpathClient};
/// use stormpath_export::config::{ApiCredentials, ClientConfig};
/// use stormpath_export::domain::ResourceKind;
///
/// # async fn example() -> stormpath_export::domain::Result<()> {
/// let credentials = ApiCredentials::new("ID".to_string(), "SECRET".to_string());
/// let client = StormpathClient::new(&ClientConfig::default(), credentials)?;
///
/// let tenant = client.tenant().await?;
/// let mut offset = Some(0);
/// while let Some(current) = offset {
///     let page = client
///         .list_page(&tenant.href, ResourceKind::Applications, current)
///         .await?;
///     for item in page.items {
///         println!("{:?}", client.application(item).await?.name);
///     }
///     offset = page.next_offset;
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// The tenant the credentials belong to
    async fn tenant(&self) -> Result<Tenant>;

    /// One page of the tenant's `kind` collection, starting at `offset`
    ///
    /// The tenant itself is not a collection and lists nothing.
    async fn list_page(
        &self,
        tenant_href: &str,
        kind: ResourceKind,
        offset: u64,
    ) -> Result<ItemPage>;

    /// Application with its store mappings
    async fn application(&self, item: Value) -> Result<Application>;

    /// Directory with groups, provider (and agent) and password policy
    async fn directory(&self, item: Value) -> Result<Directory>;

    /// Group with its directory and member accounts
    async fn group(&self, item: Value) -> Result<Group>;

    /// Organization with its store mappings
    async fn organization(&self, item: Value) -> Result<Organization>;

    /// Account with directory, groups and API keys
    async fn account(&self, item: Value) -> Result<Account>;

    /// Base URL of the service, for logging
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_href() {
        let item = json!({"href": "https://api.stormpath.com/v1/groups/g1", "name": "Admins"});
        assert_eq!(ItemPage::item_href(&item), "https://api.stormpath.com/v1/groups/g1");
        assert_eq!(ItemPage::item_href(&json!({"name": "x"})), "");
        assert_eq!(ItemPage::item_href(&json!("not an object")), "");
    }
}
