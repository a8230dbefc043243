//! Stormpath REST client
//!
//! Implements [`IdentityService`] over the Stormpath REST API: HTTP Basic
//! auth with an API key pair, offset/limit pagination and
//! `expand=customData` on every collection that carries custom data. Every
//! request is awaited in turn; nothing is fetched concurrently.
//!
//! A linked resource whose body does not decode fails only the item that
//! links it.

use super::models::{
    AccountResource, AccountStoreMappingResource, AccountStoreResource, ApplicationResource,
    CollectionPage, DirectoryResource, ErrorBody, GroupResource, Link, OrganizationResource,
    PasswordPolicyResource, ProviderResource, TenantResource,
};
use super::service::{IdentityService, ItemPage};
use crate::config::schema::MAX_PAGE_SIZE;
use crate::config::{ApiCredentials, ClientConfig};
use crate::domain::{
    Account, AccountStore, AccountStoreKind, AccountStoreMapping, AccountSummary, Agent, ApiKey,
    Application, CustomData, Directory, DirectorySummary, EmailTemplate, ExportError, Group,
    GroupSummary, IdentityError, Organization, PasswordPolicy, PasswordStrength, Provider,
    ResourceKind, Result, Tenant,
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

const NO_QUERY: &[(&str, &str)] = &[];
const EXPAND_CUSTOM_DATA: &[(&str, &str)] = &[("expand", "customData")];
const EXPAND_ACCOUNT_STORE: &[(&str, &str)] = &[("expand", "accountStore")];
const PLAINTEXT_SECRETS: &[(&str, &str)] = &[("encryptSecret", "false")];

/// HTTP client for one Stormpath tenant
///
/// # Example
///
/// ```no_run
/// use stormpath_export::adapters::stormpath::{IdentityService, StormpathClient};
/// use stormpath_export::config::{ApiCredentials, ClientConfig};
///
/// # async fn example() -> stormpath_export::domain::Result<()> {
/// let credentials = ApiCredentials::new("ID".to_string(), "SECRET".to_string());
/// let client = StormpathClient::new(&ClientConfig::default(), credentials)?;
/// let tenant = client.tenant().await?;
/// println!("{}", tenant.href);
/// # Ok(())
/// # }
/// ```
pub struct StormpathClient {
    /// Base URL without a trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    credentials: ApiCredentials,

    page_size: u32,
}

impl StormpathClient {
    /// Create a client for `config.base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, credentials: ApiCredentials) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .user_agent(concat!("stormpath-export/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            credentials,
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    /// Build authorization header value
    fn auth_header_value(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.credentials.id(),
            self.credentials.secret().expose_secret().as_str()
        );
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {encoded}")
    }

    async fn get_json<T, Q>(&self, url: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .header(AUTHORIZATION, self.auth_header_value())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, url, &body).into());
        }

        response.json::<T>().await.map_err(|e| {
            IdentityError::InvalidResponse(format!("Unexpected response from {url}: {e}")).into()
        })
    }

    /// Follows an optional link; a missing link or a 404 is absence
    async fn get_optional<T, Q>(&self, link: Option<&Link>, query: &Q) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        let link = match link {
            Some(link) => link,
            None => return Ok(None),
        };

        match self.get_json(&link.href, query).await {
            Ok(resource) => Ok(Some(resource)),
            Err(ExportError::Identity(IdentityError::NotFound(href))) => {
                tracing::debug!(href = %href, "Linked resource not found, treating as absent");
                Ok(None)
            }
            Err(e) => Err(linked_shape_error(e)),
        }
    }

    /// Reads one page of a collection starting at `offset`
    ///
    /// Paging stops on an empty page, a short page, or once `size` items
    /// have been seen.
    async fn fetch_page(&self, href: &str, offset: u64, params: &[(&str, &str)]) -> Result<ItemPage> {
        let mut query: Vec<(&str, String)> = vec![
            ("offset", offset.to_string()),
            ("limit", self.page_size.to_string()),
        ];
        query.extend(params.iter().map(|(key, value)| (*key, value.to_string())));

        let page: CollectionPage = self.get_json(href, &query).await?;
        let received = page.items.len() as u64;
        let next = offset + received;
        let short_page = page.limit > 0 && received < page.limit;
        let next_offset = if received == 0 || next >= page.size || short_page {
            None
        } else {
            Some(next)
        };

        tracing::debug!(href = %href, offset, received, "Fetched page");
        Ok(ItemPage {
            items: page.items,
            next_offset,
        })
    }

    /// Reads a linked collection that is embedded in its parent
    ///
    /// A missing link or a 404 is an empty list. Any malformed item fails the
    /// parent.
    async fn list_link<T>(&self, link: Option<&Link>, params: &[(&str, &str)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let link = match link {
            Some(link) => link,
            None => return Ok(Vec::new()),
        };

        let mut items = Vec::new();
        let mut offset = Some(0);
        while let Some(current) = offset {
            let page = match self.fetch_page(&link.href, current, params).await {
                Ok(page) => page,
                Err(ExportError::Identity(IdentityError::NotFound(href))) => {
                    tracing::debug!(href = %href, "Linked collection not found, treating as empty");
                    return Ok(Vec::new());
                }
                Err(e) => return Err(linked_shape_error(e)),
            };
            for item in page.items {
                items.push(decode_item(&link.href, item)?);
            }
            offset = page.next_offset;
        }
        Ok(items)
    }

    /// Returns the custom data bag, fetching it when only a link was returned
    ///
    /// A resource without any bag gets an empty one, which normalization
    /// then rejects for that resource alone.
    async fn resolve_custom_data(
        &self,
        owner_href: &str,
        raw: Option<Map<String, Value>>,
    ) -> Result<CustomData> {
        let raw = match raw {
            Some(raw) => raw,
            None => {
                tracing::debug!(href = %owner_href, "Resource has no custom data");
                return Ok(CustomData::default());
            }
        };

        if !CustomData::is_unexpanded(&raw) {
            return Ok(CustomData::from(raw));
        }

        let href = match raw.get("href").and_then(Value::as_str) {
            Some(href) => href.to_string(),
            None => return Ok(CustomData::default()),
        };

        match self.get_json::<Map<String, Value>, _>(&href, NO_QUERY).await {
            Ok(fetched) => Ok(CustomData::from(fetched)),
            Err(ExportError::Identity(IdentityError::NotFound(_))) => Ok(CustomData::default()),
            Err(e) => Err(linked_shape_error(e)),
        }
    }

    async fn resolve_account_store(
        &self,
        mapping_href: &str,
        raw: Option<Map<String, Value>>,
    ) -> Result<AccountStore> {
        let raw = raw.ok_or_else(|| {
            ExportError::InvalidResource(format!("Mapping {mapping_href} has no account store"))
        })?;
        let href = raw
            .get("href")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                ExportError::InvalidResource(format!(
                    "Account store of mapping {mapping_href} has no href"
                ))
            })?;
        let kind = AccountStoreKind::from_href(&href)?;

        let expanded = raw.keys().any(|key| key != "href");
        let store: AccountStoreResource = if expanded {
            serde_json::from_value(Value::Object(raw)).map_err(|e| {
                ExportError::InvalidResource(format!("Malformed account store {href}: {e}"))
            })?
        } else {
            self.get_json(&href, NO_QUERY)
                .await
                .map_err(linked_shape_error)?
        };

        Ok(AccountStore {
            kind,
            href: store.href,
            name: store.name,
            description: store.description,
            status: store.status,
        })
    }

    async fn resolve_mapping(&self, raw: AccountStoreMappingResource) -> Result<AccountStoreMapping> {
        let account_store = self
            .resolve_account_store(&raw.href, raw.account_store)
            .await?;

        Ok(AccountStoreMapping {
            href: raw.href,
            list_index: raw.list_index,
            is_default_account_store: raw.is_default_account_store,
            is_default_group_store: raw.is_default_group_store,
            account_store,
        })
    }

    async fn default_mapping(&self, link: Option<&Link>) -> Result<Option<AccountStoreMapping>> {
        match self
            .get_optional::<AccountStoreMappingResource, _>(link, EXPAND_ACCOUNT_STORE)
            .await?
        {
            Some(raw) => Ok(Some(self.resolve_mapping(raw).await?)),
            None => Ok(None),
        }
    }

    /// Store mappings in the order the service lists them
    async fn mappings(&self, link: Option<&Link>) -> Result<Vec<AccountStoreMapping>> {
        let raws: Vec<AccountStoreMappingResource> =
            self.list_link(link, EXPAND_ACCOUNT_STORE).await?;

        let mut mappings = Vec::with_capacity(raws.len());
        for raw in raws {
            mappings.push(self.resolve_mapping(raw).await?);
        }
        Ok(mappings)
    }

    async fn resolve_application(&self, raw: ApplicationResource) -> Result<Application> {
        let custom_data = self.resolve_custom_data(&raw.href, raw.custom_data).await?;
        let default_account_store_mapping = self
            .default_mapping(raw.default_account_store_mapping.as_ref())
            .await?;
        let default_group_store_mapping = self
            .default_mapping(raw.default_group_store_mapping.as_ref())
            .await?;
        let account_store_mappings = self.mappings(raw.account_store_mappings.as_ref()).await?;

        Ok(Application {
            href: raw.href,
            name: raw.name,
            description: raw.description,
            status: raw.status,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            custom_data,
            default_account_store_mapping,
            default_group_store_mapping,
            account_store_mappings,
        })
    }

    async fn resolve_organization(&self, raw: OrganizationResource) -> Result<Organization> {
        let custom_data = self.resolve_custom_data(&raw.href, raw.custom_data).await?;
        let default_account_store_mapping = self
            .default_mapping(raw.default_account_store_mapping.as_ref())
            .await?;
        let default_group_store_mapping = self
            .default_mapping(raw.default_group_store_mapping.as_ref())
            .await?;
        let account_store_mappings = self.mappings(raw.account_store_mappings.as_ref()).await?;

        Ok(Organization {
            href: raw.href,
            name: raw.name,
            name_key: raw.name_key,
            description: raw.description,
            status: raw.status,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            custom_data,
            default_account_store_mapping,
            default_group_store_mapping,
            account_store_mappings,
        })
    }

    async fn resolve_provider(&self, raw: ProviderResource) -> Result<Provider> {
        // Only LDAP/AD providers link an agent.
        let agent = self
            .get_optional::<Agent, _>(raw.agent.as_ref(), NO_QUERY)
            .await?;

        Ok(Provider {
            href: raw.href,
            provider_id: raw.provider_id,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            client_id: raw.client_id,
            client_secret: raw.client_secret,
            redirect_uri: raw.redirect_uri,
            agent,
        })
    }

    async fn resolve_password_policy(&self, raw: PasswordPolicyResource) -> Result<PasswordPolicy> {
        let strength = self
            .get_optional::<PasswordStrength, _>(raw.strength.as_ref(), NO_QUERY)
            .await?;
        let reset_email_templates: Vec<EmailTemplate> = self
            .list_link(raw.reset_email_templates.as_ref(), NO_QUERY)
            .await?;
        let reset_success_email_templates: Vec<EmailTemplate> = self
            .list_link(raw.reset_success_email_templates.as_ref(), NO_QUERY)
            .await?;

        Ok(PasswordPolicy {
            href: raw.href,
            reset_email_status: raw.reset_email_status,
            reset_success_email_status: raw.reset_success_email_status,
            strength,
            reset_email_templates,
            reset_success_email_templates,
        })
    }

    async fn resolve_directory(&self, raw: DirectoryResource) -> Result<Directory> {
        let custom_data = self.resolve_custom_data(&raw.href, raw.custom_data).await?;
        let groups: Vec<GroupSummary> = self.list_link(raw.groups.as_ref(), NO_QUERY).await?;

        let provider = match self
            .get_optional::<ProviderResource, _>(raw.provider.as_ref(), NO_QUERY)
            .await?
        {
            Some(provider) => Some(self.resolve_provider(provider).await?),
            None => None,
        };

        let password_policy = match self
            .get_optional::<PasswordPolicyResource, _>(raw.password_policy.as_ref(), NO_QUERY)
            .await?
        {
            Some(policy) => Some(self.resolve_password_policy(policy).await?),
            None => None,
        };

        Ok(Directory {
            href: raw.href,
            name: raw.name,
            description: raw.description,
            status: raw.status,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            custom_data,
            groups,
            provider,
            password_policy,
        })
    }

    async fn resolve_group(&self, raw: GroupResource) -> Result<Group> {
        let custom_data = self.resolve_custom_data(&raw.href, raw.custom_data).await?;
        let directory = self
            .get_optional::<DirectorySummary, _>(raw.directory.as_ref(), NO_QUERY)
            .await?;
        let accounts: Vec<AccountSummary> =
            self.list_link(raw.accounts.as_ref(), NO_QUERY).await?;

        Ok(Group {
            href: raw.href,
            name: raw.name,
            description: raw.description,
            status: raw.status,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            custom_data,
            directory,
            accounts,
        })
    }

    async fn resolve_account(&self, raw: AccountResource) -> Result<Account> {
        let custom_data = self.resolve_custom_data(&raw.href, raw.custom_data).await?;
        let directory = self
            .get_optional::<DirectorySummary, _>(raw.directory.as_ref(), NO_QUERY)
            .await?;
        let groups: Vec<GroupSummary> = self.list_link(raw.groups.as_ref(), NO_QUERY).await?;
        let api_keys: Vec<ApiKey> = self
            .list_link(raw.api_keys.as_ref(), PLAINTEXT_SECRETS)
            .await?;

        Ok(Account {
            href: raw.href,
            username: raw.username,
            email: raw.email,
            full_name: raw.full_name,
            given_name: raw.given_name,
            middle_name: raw.middle_name,
            surname: raw.surname,
            status: raw.status,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            custom_data,
            directory,
            groups,
            api_keys,
        })
    }
}

#[async_trait]
impl IdentityService for StormpathClient {
    async fn tenant(&self) -> Result<Tenant> {
        // Redirects to the tenant's own href.
        let url = format!("{}/tenants/current", self.base_url);
        let raw: TenantResource = self.get_json(&url, EXPAND_CUSTOM_DATA).await?;
        let custom_data = self.resolve_custom_data(&raw.href, raw.custom_data).await?;

        tracing::info!(href = %raw.href, name = ?raw.name, "Fetched tenant");

        Ok(Tenant {
            href: raw.href,
            name: raw.name,
            key: raw.key,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            custom_data,
        })
    }

    async fn list_page(
        &self,
        tenant_href: &str,
        kind: ResourceKind,
        offset: u64,
    ) -> Result<ItemPage> {
        let folder = match kind.folder() {
            Some(folder) => folder,
            None => return Ok(ItemPage::default()),
        };
        let href = format!("{tenant_href}/{folder}");
        self.fetch_page(&href, offset, EXPAND_CUSTOM_DATA).await
    }

    async fn application(&self, item: Value) -> Result<Application> {
        let raw: ApplicationResource = decode_item("applications", item)?;
        self.resolve_application(raw).await
    }

    async fn directory(&self, item: Value) -> Result<Directory> {
        let raw: DirectoryResource = decode_item("directories", item)?;
        self.resolve_directory(raw).await
    }

    async fn group(&self, item: Value) -> Result<Group> {
        let raw: GroupResource = decode_item("groups", item)?;
        self.resolve_group(raw).await
    }

    async fn organization(&self, item: Value) -> Result<Organization> {
        let raw: OrganizationResource = decode_item("organizations", item)?;
        self.resolve_organization(raw).await
    }

    async fn account(&self, item: Value) -> Result<Account> {
        let raw: AccountResource = decode_item("accounts", item)?;
        self.resolve_account(raw).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Decodes one collection item; a malformed item fails only itself
fn decode_item<T: DeserializeOwned>(collection: &str, item: Value) -> Result<T> {
    let href = ItemPage::item_href(&item).to_string();
    serde_json::from_value(item).map_err(|e| {
        if href.is_empty() {
            ExportError::InvalidResource(format!("Malformed item in {collection}: {e}"))
        } else {
            ExportError::InvalidResource(format!("Malformed item {href}: {e}"))
        }
    })
}

/// Re-scopes an undecodable linked body to the item that links it
fn linked_shape_error(error: ExportError) -> ExportError {
    match error {
        ExportError::Identity(IdentityError::InvalidResponse(message)) => {
            ExportError::InvalidResource(message)
        }
        other => other,
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> ExportError {
    if error.is_timeout() {
        IdentityError::Timeout(format!("Request to {url} timed out")).into()
    } else {
        IdentityError::ConnectionFailed(format!("Request to {url} failed: {error}")).into()
    }
}

fn status_error(status: StatusCode, url: &str, body: &str) -> IdentityError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.best_message())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityError::AuthenticationFailed(message)
        }
        StatusCode::NOT_FOUND => IdentityError::NotFound(url.to_string()),
        _ if status.is_server_error() => IdentityError::ServerError {
            status: status.as_u16(),
            message,
        },
        _ => IdentityError::ClientError {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StormpathClient {
        let config = ClientConfig {
            base_url: "https://api.stormpath.com/v1/".to_string(),
            ..Default::default()
        };
        StormpathClient::new(&config, ApiCredentials::new("ID".to_string(), "SECRET".to_string()))
            .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(client().base_url(), "https://api.stormpath.com/v1");
    }

    #[test]
    fn test_auth_header_is_basic() {
        // base64("ID:SECRET")
        assert_eq!(client().auth_header_value(), "Basic SUQ6U0VDUkVU");
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"status":401,"code":22,"message":"Authentication required."}"#;
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "u", body),
            IdentityError::AuthenticationFailed(ref m) if m.contains("Authentication required")
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "u", ""),
            IdentityError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "https://x/y", ""),
            IdentityError::NotFound(ref u) if u == "https://x/y"
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "u", "upstream"),
            IdentityError::ServerError { status: 502, ref message } if message == "upstream"
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "u", ""),
            IdentityError::ClientError { status: 400, .. }
        ));
    }

    #[test]
    fn test_linked_shape_error_is_item_scoped() {
        let decoded = linked_shape_error(IdentityError::InvalidResponse("bad body".to_string()).into());
        assert!(matches!(decoded, ExportError::InvalidResource(ref m) if m == "bad body"));
        assert!(decoded.is_item_scoped());

        let transport = linked_shape_error(IdentityError::Timeout("t".to_string()).into());
        assert!(matches!(transport, ExportError::Identity(IdentityError::Timeout(_))));
    }

    #[test]
    fn test_decode_item() {
        let raw: ApplicationResource = decode_item(
            "applications",
            serde_json::json!({"href": "https://api.stormpath.com/v1/applications/a1"}),
        )
        .unwrap();
        assert_eq!(raw.href, "https://api.stormpath.com/v1/applications/a1");

        let err = decode_item::<ApplicationResource>(
            "applications",
            serde_json::json!({"href": "https://api.stormpath.com/v1/applications/a2", "name": 7}),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::InvalidResource(ref m) if m.contains("applications/a2")));
    }
}
