//! Resource projection
//!
//! One pure function per resource kind turns a remote record into its export
//! document. Projections never touch the network or the filesystem; every
//! optional branch arrives already checked as an `Option` or a `Vec`, so an
//! absent branch only ever yields `null` or `[]` for that field.
//!
//! Top-level timestamps and custom data are required and fail the item with
//! [`ExportError::Normalization`](crate::domain::ExportError::Normalization)
//! when missing. Timestamps on embedded sub-documents are rendered when
//! present and `null` otherwise.

pub mod documents;

pub use documents::{
    AccountDocument, AccountStoreDocument, AccountStoreMappingDocument, AccountSummaryDocument,
    AgentDocument, ApiKeyDocument, ApplicationDocument, DirectoryDocument,
    DirectorySummaryDocument, EmailTemplateDocument, GroupDocument, GroupSummaryDocument,
    OrganizationDocument, PasswordPolicyDocument, ProviderDocument, ResourceDocument,
    TenantDocument,
};

use crate::core::normalize::{normalize_custom_data, optional_iso8601, required_iso8601};
use crate::domain::{
    Account, AccountStore, AccountStoreMapping, AccountSummary, Agent, ApiKey, Application,
    Directory, DirectorySummary, EmailTemplate, Group, GroupSummary, Organization,
    PasswordPolicy, Provider, ResourceId, Result, Tenant,
};

fn short_id(href: &str) -> Result<String> {
    Ok(ResourceId::from_href(href)?.into_inner())
}

/// Projects the tenant into its `meta.json` document
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use stormpath_export::core::project::project_tenant;
/// use stormpath_export::domain::{CustomData, Tenant};
///
/// # fn example() -> stormpath_export::domain::Result<()> {
/// let now = Utc::now();
/// let tenant = Tenant {
///     href: "https://api.stormpath.com/v1/tenants/abc123".to_string(),
///     name: Some("acme".to_string()),
///     key: Some("acme".to_string()),
///     created_at: Some(now),
///     modified_at: Some(now),
///     custom_data: CustomData {
///         created_at: Some(now),
///         modified_at: Some(now),
///         ..Default::default()
///     },
/// };
///
/// let document = project_tenant(&tenant)?;
/// assert_eq!(document.id, "abc123");
/// # Ok(())
/// # }
/// ```
pub fn project_tenant(tenant: &Tenant) -> Result<TenantDocument> {
    Ok(TenantDocument {
        id: short_id(&tenant.href)?,
        href: tenant.href.clone(),
        name: tenant.name.clone(),
        key: tenant.key.clone(),
        created_at: required_iso8601(tenant.created_at.as_ref(), "createdAt", &tenant.href)?,
        modified_at: required_iso8601(tenant.modified_at.as_ref(), "modifiedAt", &tenant.href)?,
        custom_data: normalize_custom_data(&tenant.custom_data, &tenant.href)?,
    })
}

/// Projects an application with its store mappings
pub fn project_application(application: &Application) -> Result<ApplicationDocument> {
    let href = &application.href;
    Ok(ApplicationDocument {
        id: short_id(href)?,
        href: href.clone(),
        name: application.name.clone(),
        description: application.description.clone(),
        status: application.status.clone(),
        created_at: required_iso8601(application.created_at.as_ref(), "createdAt", href)?,
        modified_at: required_iso8601(application.modified_at.as_ref(), "modifiedAt", href)?,
        custom_data: normalize_custom_data(&application.custom_data, href)?,
        default_account_store_mapping: project_optional_mapping(
            application.default_account_store_mapping.as_ref(),
        )?,
        default_group_store_mapping: project_optional_mapping(
            application.default_group_store_mapping.as_ref(),
        )?,
        account_store_mappings: project_mappings(&application.account_store_mappings)?,
    })
}

/// Projects an organization with its store mappings
pub fn project_organization(organization: &Organization) -> Result<OrganizationDocument> {
    let href = &organization.href;
    Ok(OrganizationDocument {
        id: short_id(href)?,
        href: href.clone(),
        name: organization.name.clone(),
        name_key: organization.name_key.clone(),
        description: organization.description.clone(),
        status: organization.status.clone(),
        created_at: required_iso8601(organization.created_at.as_ref(), "createdAt", href)?,
        modified_at: required_iso8601(organization.modified_at.as_ref(), "modifiedAt", href)?,
        custom_data: normalize_custom_data(&organization.custom_data, href)?,
        default_account_store_mapping: project_optional_mapping(
            organization.default_account_store_mapping.as_ref(),
        )?,
        default_group_store_mapping: project_optional_mapping(
            organization.default_group_store_mapping.as_ref(),
        )?,
        account_store_mappings: project_mappings(&organization.account_store_mappings)?,
    })
}

/// Projects a directory with its groups, provider and password policy
pub fn project_directory(directory: &Directory) -> Result<DirectoryDocument> {
    let href = &directory.href;
    Ok(DirectoryDocument {
        id: short_id(href)?,
        href: href.clone(),
        name: directory.name.clone(),
        description: directory.description.clone(),
        status: directory.status.clone(),
        created_at: required_iso8601(directory.created_at.as_ref(), "createdAt", href)?,
        modified_at: required_iso8601(directory.modified_at.as_ref(), "modifiedAt", href)?,
        custom_data: normalize_custom_data(&directory.custom_data, href)?,
        groups: directory
            .groups
            .iter()
            .map(project_group_summary)
            .collect::<Result<Vec<_>>>()?,
        provider: directory.provider.as_ref().map(project_provider).transpose()?,
        password_policy: directory
            .password_policy
            .as_ref()
            .map(project_password_policy)
            .transpose()?,
    })
}

/// Projects a group with its directory and member accounts
pub fn project_group(group: &Group) -> Result<GroupDocument> {
    let href = &group.href;
    Ok(GroupDocument {
        id: short_id(href)?,
        href: href.clone(),
        name: group.name.clone(),
        description: group.description.clone(),
        status: group.status.clone(),
        created_at: required_iso8601(group.created_at.as_ref(), "createdAt", href)?,
        modified_at: required_iso8601(group.modified_at.as_ref(), "modifiedAt", href)?,
        custom_data: normalize_custom_data(&group.custom_data, href)?,
        directory: group
            .directory
            .as_ref()
            .map(project_directory_summary)
            .transpose()?,
        accounts: group
            .accounts
            .iter()
            .map(project_account_summary)
            .collect::<Result<Vec<_>>>()?,
    })
}

/// Projects an account with its directory, groups and API keys
pub fn project_account(account: &Account) -> Result<AccountDocument> {
    let href = &account.href;
    Ok(AccountDocument {
        id: short_id(href)?,
        href: href.clone(),
        username: account.username.clone(),
        email: account.email.clone(),
        full_name: account.full_name.clone(),
        given_name: account.given_name.clone(),
        middle_name: account.middle_name.clone(),
        surname: account.surname.clone(),
        status: account.status.clone(),
        created_at: required_iso8601(account.created_at.as_ref(), "createdAt", href)?,
        modified_at: required_iso8601(account.modified_at.as_ref(), "modifiedAt", href)?,
        custom_data: normalize_custom_data(&account.custom_data, href)?,
        directory: account
            .directory
            .as_ref()
            .map(project_directory_summary)
            .transpose()?,
        groups: account
            .groups
            .iter()
            .map(project_group_summary)
            .collect::<Result<Vec<_>>>()?,
        api_keys: account
            .api_keys
            .iter()
            .map(project_api_key)
            .collect::<Result<Vec<_>>>()?,
    })
}

fn project_mappings(mappings: &[AccountStoreMapping]) -> Result<Vec<AccountStoreMappingDocument>> {
    mappings.iter().map(project_mapping).collect()
}

fn project_optional_mapping(
    mapping: Option<&AccountStoreMapping>,
) -> Result<Option<AccountStoreMappingDocument>> {
    mapping.map(project_mapping).transpose()
}

fn project_mapping(mapping: &AccountStoreMapping) -> Result<AccountStoreMappingDocument> {
    Ok(AccountStoreMappingDocument {
        id: short_id(&mapping.href)?,
        href: mapping.href.clone(),
        list_index: mapping.list_index,
        is_default_account_store: mapping.is_default_account_store,
        is_default_group_store: mapping.is_default_group_store,
        account_store: project_account_store(&mapping.account_store)?,
    })
}

fn project_account_store(store: &AccountStore) -> Result<AccountStoreDocument> {
    Ok(AccountStoreDocument {
        kind: store.kind,
        id: short_id(&store.href)?,
        href: store.href.clone(),
        name: store.name.clone(),
        description: store.description.clone(),
        status: store.status.clone(),
    })
}

fn project_group_summary(group: &GroupSummary) -> Result<GroupSummaryDocument> {
    Ok(GroupSummaryDocument {
        id: short_id(&group.href)?,
        href: group.href.clone(),
        name: group.name.clone(),
        description: group.description.clone(),
        status: group.status.clone(),
        created_at: optional_iso8601(group.created_at.as_ref()),
        modified_at: optional_iso8601(group.modified_at.as_ref()),
    })
}

fn project_directory_summary(directory: &DirectorySummary) -> Result<DirectorySummaryDocument> {
    Ok(DirectorySummaryDocument {
        id: short_id(&directory.href)?,
        href: directory.href.clone(),
        name: directory.name.clone(),
        description: directory.description.clone(),
        status: directory.status.clone(),
        created_at: optional_iso8601(directory.created_at.as_ref()),
        modified_at: optional_iso8601(directory.modified_at.as_ref()),
    })
}

fn project_account_summary(account: &AccountSummary) -> Result<AccountSummaryDocument> {
    Ok(AccountSummaryDocument {
        id: short_id(&account.href)?,
        href: account.href.clone(),
        username: account.username.clone(),
        email: account.email.clone(),
        full_name: account.full_name.clone(),
        given_name: account.given_name.clone(),
        middle_name: account.middle_name.clone(),
        surname: account.surname.clone(),
        status: account.status.clone(),
        created_at: optional_iso8601(account.created_at.as_ref()),
        modified_at: optional_iso8601(account.modified_at.as_ref()),
    })
}

fn project_provider(provider: &Provider) -> Result<ProviderDocument> {
    Ok(ProviderDocument {
        href: provider.href.clone(),
        provider_id: provider.provider_id.clone(),
        created_at: optional_iso8601(provider.created_at.as_ref()),
        modified_at: optional_iso8601(provider.modified_at.as_ref()),
        client_id: provider.client_id.clone(),
        client_secret: provider.client_secret.clone(),
        redirect_uri: provider.redirect_uri.clone(),
        agent: provider.agent.as_ref().map(project_agent).transpose()?,
    })
}

fn project_agent(agent: &Agent) -> Result<AgentDocument> {
    Ok(AgentDocument {
        id: short_id(&agent.href)?,
        href: agent.href.clone(),
        status: agent.status.clone(),
        created_at: optional_iso8601(agent.created_at.as_ref()),
        modified_at: optional_iso8601(agent.modified_at.as_ref()),
        config: agent.config.clone(),
    })
}

fn project_password_policy(policy: &PasswordPolicy) -> Result<PasswordPolicyDocument> {
    Ok(PasswordPolicyDocument {
        id: short_id(&policy.href)?,
        href: policy.href.clone(),
        reset_email_status: policy.reset_email_status.clone(),
        reset_success_email_status: policy.reset_success_email_status.clone(),
        strength: policy.strength.clone(),
        reset_email_templates: policy
            .reset_email_templates
            .iter()
            .map(project_email_template)
            .collect(),
        reset_success_email_templates: policy
            .reset_success_email_templates
            .iter()
            .map(project_email_template)
            .collect(),
    })
}

fn project_email_template(template: &EmailTemplate) -> EmailTemplateDocument {
    EmailTemplateDocument {
        href: template.href.clone(),
        name: template.name.clone(),
        description: template.description.clone(),
        from_name: template.from_name.clone(),
        from_email_address: template.from_email_address.clone(),
        subject: template.subject.clone(),
        text_body: template.text_body.clone(),
        html_body: template.html_body.clone(),
        mime_type: template.mime_type.clone(),
        default_model: template.default_model.clone(),
        created_at: optional_iso8601(template.created_at.as_ref()),
        modified_at: optional_iso8601(template.modified_at.as_ref()),
    }
}

// API keys carry their own `id`; older payloads without one fall back to the href.
fn project_api_key(key: &ApiKey) -> Result<ApiKeyDocument> {
    let id = match &key.id {
        Some(id) if !id.is_empty() => id.clone(),
        _ => short_id(&key.href)?,
    };
    Ok(ApiKeyDocument {
        id,
        secret: key.secret.clone(),
    })
}
