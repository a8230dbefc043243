//! Stormpath REST API models
//!
//! Wire shapes as returned by the API. Related resources arrive as link
//! objects (`{"href": "..."}`); a `null` or missing link means the branch
//! does not exist. Expandable attributes such as `customData` are kept as raw
//! maps until the client decides whether they still need fetching.

use crate::domain::resources::lenient_timestamp;
use crate::domain::Timestamp;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Reference to another resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub href: String,
}

/// One page of a collection resource
///
/// Items stay untyped so a malformed item fails on its own instead of
/// failing the page.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionPage {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Error body of a non-2xx response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status: Option<u16>,
    pub code: Option<u32>,
    pub message: Option<String>,
    pub developer_message: Option<String>,
    pub more_info: Option<String>,
}

impl ErrorBody {
    /// Most specific message the body carries
    pub fn best_message(&self) -> Option<String> {
        let message = self
            .developer_message
            .as_ref()
            .or(self.message.as_ref())?
            .clone();
        Some(match self.code {
            Some(code) => format!("{message} (code {code})"),
            None => message,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResource {
    pub href: String,
    pub name: Option<String>,
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub custom_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResource {
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub custom_data: Option<Map<String, Value>>,
    pub default_account_store_mapping: Option<Link>,
    pub default_group_store_mapping: Option<Link>,
    pub account_store_mappings: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResource {
    pub href: String,
    pub name: Option<String>,
    pub name_key: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub custom_data: Option<Map<String, Value>>,
    pub default_account_store_mapping: Option<Link>,
    pub default_group_store_mapping: Option<Link>,
    pub account_store_mappings: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStoreMappingResource {
    pub href: String,
    pub list_index: Option<u32>,
    #[serde(default)]
    pub is_default_account_store: bool,
    #[serde(default)]
    pub is_default_group_store: bool,
    /// Link, or the store itself when expanded
    pub account_store: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStoreResource {
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResource {
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub custom_data: Option<Map<String, Value>>,
    pub provider: Option<Link>,
    pub password_policy: Option<Link>,
    pub groups: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResource {
    pub href: String,
    pub provider_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub agent: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicyResource {
    pub href: String,
    pub reset_email_status: Option<String>,
    pub reset_success_email_status: Option<String>,
    pub strength: Option<Link>,
    pub reset_email_templates: Option<Link>,
    pub reset_success_email_templates: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResource {
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub custom_data: Option<Map<String, Value>>,
    pub directory: Option<Link>,
    pub accounts: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResource {
    pub href: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub custom_data: Option<Map<String, Value>>,
    pub directory: Option<Link>,
    pub groups: Option<Link>,
    pub api_keys: Option<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_application_links() {
        let app: ApplicationResource = serde_json::from_value(json!({
            "href": "https://api.stormpath.com/v1/applications/app1",
            "name": "My App",
            "createdAt": "2015-03-02T18:02:04.123Z",
            "modifiedAt": "not a date",
            "customData": {"href": "https://api.stormpath.com/v1/applications/app1/customData"},
            "defaultAccountStoreMapping": null,
            "accountStoreMappings": {
                "href": "https://api.stormpath.com/v1/applications/app1/accountStoreMappings"
            }
        }))
        .unwrap();

        assert!(app.created_at.is_some());
        assert!(app.modified_at.is_none());
        assert!(app.default_account_store_mapping.is_none());
        assert!(app.default_group_store_mapping.is_none());
        assert!(app.account_store_mappings.is_some());
    }

    #[test]
    fn test_collection_page_defaults() {
        let page: CollectionPage = serde_json::from_value(json!({
            "href": "https://api.stormpath.com/v1/tenants/t1/applications",
            "offset": 0,
            "limit": 25,
            "size": 2,
            "items": [{"href": "a"}, {"href": "b"}]
        }))
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.size, 2);

        let empty: CollectionPage = serde_json::from_value(json!({})).unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_error_body_prefers_developer_message() {
        let body: ErrorBody = serde_json::from_value(json!({
            "status": 401,
            "code": 22,
            "message": "Authentication required.",
            "developerMessage": "Invalid API key"
        }))
        .unwrap();
        assert_eq!(body.best_message().unwrap(), "Invalid API key (code 22)");
        assert!(ErrorBody::default().best_message().is_none());
    }
}
