//! Export document shapes
//!
//! Field names follow the service's camelCase attributes, except the
//! store-mapping fields which keep their historical snake_case names in the
//! export format. Optional branches serialize as `null`, lists as `[]`.

use crate::domain::{AccountStoreKind, AgentConfig, PasswordStrength};
use serde::Serialize;
use serde_json::{Map, Value};

/// A top-level document written to its own file
pub trait ResourceDocument: Serialize {
    /// Short ID used as the file name
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDocument {
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub key: Option<String>,
    pub created_at: String,
    pub modified_at: String,
    pub custom_data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountStoreDocument {
    #[serde(rename = "type")]
    pub kind: AccountStoreKind,
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountStoreMappingDocument {
    pub id: String,
    pub href: String,
    pub list_index: Option<u32>,
    pub is_default_account_store: bool,
    pub is_default_group_store: bool,
    pub account_store: AccountStoreDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocument {
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub modified_at: String,
    pub custom_data: Map<String, Value>,
    #[serde(rename = "default_account_store_mapping")]
    pub default_account_store_mapping: Option<AccountStoreMappingDocument>,
    #[serde(rename = "default_group_store_mapping")]
    pub default_group_store_mapping: Option<AccountStoreMappingDocument>,
    #[serde(rename = "account_store_mappings")]
    pub account_store_mappings: Vec<AccountStoreMappingDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDocument {
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub name_key: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub modified_at: String,
    pub custom_data: Map<String, Value>,
    #[serde(rename = "default_account_store_mapping")]
    pub default_account_store_mapping: Option<AccountStoreMappingDocument>,
    #[serde(rename = "default_group_store_mapping")]
    pub default_group_store_mapping: Option<AccountStoreMappingDocument>,
    #[serde(rename = "account_store_mappings")]
    pub account_store_mappings: Vec<AccountStoreMappingDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummaryDocument {
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySummaryDocument {
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummaryDocument {
    pub id: String,
    pub href: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDocument {
    pub id: String,
    pub href: String,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub config: Option<AgentConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDocument {
    pub href: String,
    pub provider_id: Option<String>,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub agent: Option<AgentDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateDocument {
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
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicyDocument {
    pub id: String,
    pub href: String,
    pub reset_email_status: Option<String>,
    pub reset_success_email_status: Option<String>,
    pub strength: Option<PasswordStrength>,
    pub reset_email_templates: Vec<EmailTemplateDocument>,
    pub reset_success_email_templates: Vec<EmailTemplateDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryDocument {
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub modified_at: String,
    pub custom_data: Map<String, Value>,
    pub groups: Vec<GroupSummaryDocument>,
    pub provider: Option<ProviderDocument>,
    pub password_policy: Option<PasswordPolicyDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDocument {
    pub id: String,
    pub href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub modified_at: String,
    pub custom_data: Map<String, Value>,
    pub directory: Option<DirectorySummaryDocument>,
    pub accounts: Vec<AccountSummaryDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiKeyDocument {
    pub id: String,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDocument {
    pub id: String,
    pub href: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub modified_at: String,
    pub custom_data: Map<String, Value>,
    pub directory: Option<DirectorySummaryDocument>,
    pub groups: Vec<GroupSummaryDocument>,
    pub api_keys: Vec<ApiKeyDocument>,
}

impl ResourceDocument for TenantDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ResourceDocument for ApplicationDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ResourceDocument for OrganizationDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ResourceDocument for DirectoryDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ResourceDocument for GroupDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ResourceDocument for AccountDocument {
    fn id(&self) -> &str {
        &self.id
    }
}
