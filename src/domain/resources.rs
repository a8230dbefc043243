//! Remote resource records
//!
//! These are the values the identity service hands to the projector: one
//! fully-resolved record per resource, with every optional branch already
//! checked and expressed as an `Option` or an empty `Vec`. Leaf types that the
//! REST API returns verbatim also derive `Deserialize` so the adapter can use
//! them straight off the wire.

use super::kinds::AccountStoreKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Timestamp as reported by the service
pub type Timestamp = DateTime<Utc>;

/// Free-form attribute bag attached to a resource
///
/// Built from the service's `customData` object: `createdAt`/`modifiedAt`
/// are lifted into typed fields and `href` is dropped, everything else stays
/// in [`CustomData::fields`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct CustomData {
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub fields: Map<String, Value>,
}

impl CustomData {
    /// Whether the bag holds nothing beyond a locator, i.e. was not expanded
    pub fn is_unexpanded(raw: &Map<String, Value>) -> bool {
        raw.keys().all(|key| key == "href")
    }
}

impl From<Map<String, Value>> for CustomData {
    fn from(mut raw: Map<String, Value>) -> Self {
        raw.remove("href");
        let created_at = take_timestamp(&mut raw, "createdAt");
        let modified_at = take_timestamp(&mut raw, "modifiedAt");
        Self {
            created_at,
            modified_at,
            fields: raw,
        }
    }
}

fn take_timestamp(raw: &mut Map<String, Value>, key: &str) -> Option<Timestamp> {
    parse_timestamp(raw.remove(key))
}

fn parse_timestamp(value: Option<Value>) -> Option<Timestamp> {
    match value {
        Some(Value::String(text)) => DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
        _ => None,
    }
}

/// Parses an RFC 3339 timestamp, treating anything else as absent
///
/// Absence is reported later by normalization where a timestamp is required.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse_timestamp(Option::<Value>::deserialize(deserializer)?))
}

/// The tenant that owns everything else
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tenant {
    pub href: String,
    pub name: Option<String>,
    pub key: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub custom_data: CustomData,
}

/// Summary of the Directory, Group or Organization a mapping points at
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStore {
    pub kind: AccountStoreKind,
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Ordered link between an application/organization and an account store
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStoreMapping {
    pub href: String,
    pub list_index: Option<u32>,
    pub is_default_account_store: bool,
    pub is_default_group_store: bool,
    pub account_store: AccountStore,
}

/// An application and its account store mappings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Application {
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub custom_data: CustomData,
    pub default_account_store_mapping: Option<AccountStoreMapping>,
    pub default_group_store_mapping: Option<AccountStoreMapping>,
    pub account_store_mappings: Vec<AccountStoreMapping>,
}

/// An organization; shaped like an application plus a `nameKey`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Organization {
    pub href: String,
    pub name: Option<String>,
    pub name_key: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub custom_data: CustomData,
    pub default_account_store_mapping: Option<AccountStoreMapping>,
    pub default_group_store_mapping: Option<AccountStoreMapping>,
    pub account_store_mappings: Vec<AccountStoreMapping>,
}

/// Group as embedded in directory and account documents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    #[serde(default)]
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
}

/// Directory as embedded in group and account documents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySummary {
    #[serde(default)]
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
}

/// Account as embedded in group documents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    #[serde(default)]
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
}

/// LDAP/AD account mapping rules of an agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAccountConfig {
    pub dn_suffix: Option<String>,
    pub object_class: Option<String>,
    pub object_filter: Option<String>,
    pub email_rdn: Option<String>,
    pub given_name_rdn: Option<String>,
    pub middle_name_rdn: Option<String>,
    pub surname_rdn: Option<String>,
    pub username_rdn: Option<String>,
    pub password_rdn: Option<String>,
}

/// LDAP/AD group mapping rules of an agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentGroupConfig {
    pub dn_suffix: Option<String>,
    pub object_class: Option<String>,
    pub object_filter: Option<String>,
    pub name_rdn: Option<String>,
    pub description_rdn: Option<String>,
    pub members_rdn: Option<String>,
}

/// Connection and sync configuration of an LDAP/AD agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub directory_host: Option<String>,
    pub directory_port: Option<Value>,
    pub ssl_required: Option<bool>,
    pub agent_user_dn: Option<String>,
    pub agent_user_dn_password: Option<String>,
    pub base_dn: Option<String>,
    pub poll_interval: Option<Value>,
    pub referral_mode: Option<String>,
    pub ignore_referral_issues: Option<bool>,
    pub account_config: Option<AgentAccountConfig>,
    pub group_config: Option<AgentGroupConfig>,
}

/// Connector process descriptor of an LDAP/AD directory
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(default)]
    pub href: String,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
    pub config: Option<AgentConfig>,
}

/// Authentication backend of a directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Provider {
    pub href: String,
    pub provider_id: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub agent: Option<Agent>,
}

/// Password strength rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrength {
    #[serde(default)]
    pub href: String,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub min_lower_case: Option<u32>,
    pub min_upper_case: Option<u32>,
    pub min_numeric: Option<u32>,
    pub min_symbol: Option<u32>,
    pub min_diacritic: Option<u32>,
}

/// Password reset email template
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    #[serde(default)]
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub from_name: Option<String>,
    pub from_email_address: Option<String>,
    pub subject: Option<String>,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub mime_type: Option<String>,
    pub default_model: Option<Value>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<Timestamp>,
}

/// Password policy of a directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordPolicy {
    pub href: String,
    pub reset_email_status: Option<String>,
    pub reset_success_email_status: Option<String>,
    pub strength: Option<PasswordStrength>,
    pub reset_email_templates: Vec<EmailTemplate>,
    pub reset_success_email_templates: Vec<EmailTemplate>,
}

/// A directory with its groups, provider and password policy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub custom_data: CustomData,
    pub groups: Vec<GroupSummary>,
    pub provider: Option<Provider>,
    pub password_policy: Option<PasswordPolicy>,
}

/// A group with its parent directory and member accounts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub custom_data: CustomData,
    pub directory: Option<DirectorySummary>,
    pub accounts: Vec<AccountSummary>,
}

/// API key pair issued to an account
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiKey {
    #[serde(default)]
    pub href: String,
    pub id: Option<String>,
    pub secret: Option<String>,
}

/// An account with its directory, groups and API keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub href: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified_at: Option<Timestamp>,
    pub custom_data: CustomData,
    pub directory: Option<DirectorySummary>,
    pub groups: Vec<GroupSummary>,
    pub api_keys: Vec<ApiKey>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_data_lifts_timestamps() {
        let custom_data: CustomData = serde_json::from_value(json!({
            "href": "https://api.stormpath.com/v1/accounts/a1/customData",
            "createdAt": "2015-03-02T18:02:04.123Z",
            "modifiedAt": "2016-01-01T00:00:00.000Z",
            "favoriteColor": "blue"
        }))
        .unwrap();

        assert!(custom_data.created_at.is_some());
        assert!(custom_data.modified_at.is_some());
        assert_eq!(custom_data.fields.len(), 1);
        assert_eq!(custom_data.fields["favoriteColor"], "blue");
    }

    #[test]
    fn test_custom_data_invalid_timestamp_is_absent() {
        let custom_data: CustomData = serde_json::from_value(json!({
            "createdAt": "yesterday",
        }))
        .unwrap();

        assert!(custom_data.created_at.is_none());
        assert!(custom_data.fields.is_empty());
    }

    #[test]
    fn test_is_unexpanded() {
        let mut raw = Map::new();
        raw.insert("href".to_string(), json!("https://x/customData"));
        assert!(CustomData::is_unexpanded(&raw));

        raw.insert("createdAt".to_string(), json!("2015-03-02T18:02:04.123Z"));
        assert!(!CustomData::is_unexpanded(&raw));
    }

    #[test]
    fn test_group_summary_from_wire() {
        let group: GroupSummary = serde_json::from_value(json!({
            "href": "https://api.stormpath.com/v1/groups/g1",
            "name": "Admins",
            "status": "ENABLED",
            "createdAt": "2015-03-02T18:02:04.123Z",
            "directory": {"href": "https://api.stormpath.com/v1/directories/d1"}
        }))
        .unwrap();

        assert_eq!(group.name.as_deref(), Some("Admins"));
        assert!(group.modified_at.is_none());
    }

    #[test]
    fn test_nested_records_tolerate_bad_timestamps() {
        let agent: Agent = serde_json::from_value(json!({
            "href": "https://api.stormpath.com/v1/agents/a1",
            "status": "ONLINE",
            "createdAt": "bogus",
            "modifiedAt": 42
        }))
        .unwrap();
        assert!(agent.created_at.is_none());
        assert!(agent.modified_at.is_none());
        assert_eq!(agent.status.as_deref(), Some("ONLINE"));

        let template: EmailTemplate = serde_json::from_value(json!({
            "href": "https://api.stormpath.com/v1/emailTemplates/t1",
            "createdAt": "2015-03-02T18:02:04.123Z",
            "modifiedAt": "last tuesday"
        }))
        .unwrap();
        assert!(template.created_at.is_some());
        assert!(template.modified_at.is_none());

        let account: AccountSummary = serde_json::from_value(json!({
            "href": "https://api.stormpath.com/v1/accounts/acc1",
            "createdAt": null
        }))
        .unwrap();
        assert!(account.created_at.is_none());
    }
}
