//! Asynchronous phpIPAM client implementation.
//!
//! [`PhpIpamClient`] owns the HTTP transport and the [`Session`]. Every
//! resource binding funnels its calls through [`PhpIpamClient::request`],
//! which makes sure a usable token is held, sends the call and decodes the
//! response [`Envelope`].

use crate::models::Resource;
use crate::services::{
    Addresses, Devices, L2Domains, Prefix, Search, Sections, Subnets, Tools, Vlans, Vrfs,
};
use crate::session::{Credentials, Session, TokenResponse};
use crate::Result;
use chrono::{DateTime, Utc};
use phpipam_core::client::ClientConfig;
use phpipam_core::config::PhpIpamConfig;
use phpipam_core::{Envelope, Error};
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

/// Alternate token header understood by some phpIPAM deployments.
pub const ALT_TOKEN_HEADER: &str = "phpipam-token";

const SESSION_PATH: &str = "user";

/// Builder for [`PhpIpamClient`].
#[derive(Debug)]
pub struct PhpIpamClientBuilder {
    base_url: Url,
    app_id: String,
    http_config: ClientConfig,
    credentials: Option<Credentials>,
}

impl PhpIpamClientBuilder {
    /// Create a new builder for the given endpoint and API application id.
    ///
    /// The endpoint may be given with or without a trailing slash or `/api`
    /// suffix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the endpoint is not a usable
    /// HTTP(S) URL or the application id is empty.
    pub fn new(endpoint: impl AsRef<str>, app_id: impl Into<String>) -> Result<Self> {
        let base_url = normalize_endpoint(endpoint.as_ref())?;
        let app_id = app_id.into();
        if app_id.trim().is_empty() {
            return Err(Error::ConfigError(
                "phpIPAM application id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            app_id: app_id.trim().trim_matches('/').to_string(),
            http_config: ClientConfig::new(),
            credentials: None,
        })
    }

    /// Authenticate with username and password.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::password(username, password));
        self
    }

    /// Use a pre-issued static token instead of username and password.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::token(token));
        self
    }

    /// Accept invalid TLS certificates.
    #[must_use]
    pub fn with_insecure_tls(mut self, insecure: bool) -> Self {
        self.http_config = self.http_config.with_insecure_tls(insecure);
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config = self.http_config.with_timeout(timeout);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_config = self.http_config.with_user_agent(user_agent);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Build the client instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<PhpIpamClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .user_agent(self.http_config.user_agent.clone());

        if !self.http_config.tls_verify {
            warn!(
                endpoint = %self.base_url,
                "TLS certificate verification disabled for phpIPAM client"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build phpIPAM HTTP client: {err}"))
        })?;

        let session = match &self.credentials {
            Some(Credentials::Token(token)) => {
                Session::with_static_token(token.expose_secret(), Utc::now())
            }
            _ => Session::new(),
        };

        Ok(PhpIpamClient {
            http,
            base_url: self.base_url,
            app_id: self.app_id,
            credentials: self.credentials,
            session: Mutex::new(session),
        })
    }
}

/// Asynchronous client for the phpIPAM REST API.
///
/// The session token lives behind an async mutex, so a single client can be
/// shared between tasks (e.g. in an `Arc`) without racing on
/// re-authentication.
#[derive(Debug)]
pub struct PhpIpamClient {
    http: Client,
    base_url: Url,
    app_id: String,
    credentials: Option<Credentials>,
    session: Mutex<Session>,
}

impl PhpIpamClient {
    /// Create a client that authenticates with username and password.
    ///
    /// No request is sent until the first call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the endpoint is malformed.
    pub fn new(
        endpoint: impl AsRef<str>,
        app_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        insecure_tls: bool,
    ) -> Result<Self> {
        PhpIpamClientBuilder::new(endpoint, app_id)?
            .with_credentials(username, password)
            .with_insecure_tls(insecure_tls)
            .build()
    }

    /// Create a client using a pre-issued static token.
    ///
    /// The token is treated as valid for one year and the authentication
    /// endpoint is never called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the endpoint is malformed.
    pub fn with_static_token(
        endpoint: impl AsRef<str>,
        app_id: impl Into<String>,
        token: impl Into<String>,
        insecure_tls: bool,
    ) -> Result<Self> {
        PhpIpamClientBuilder::new(endpoint, app_id)?
            .with_token(token)
            .with_insecure_tls(insecure_tls)
            .build()
    }

    /// Create a client from a [`PhpIpamConfig`].
    ///
    /// A configured token takes precedence over username and password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid or
    /// carries no credentials.
    pub fn from_config(config: &PhpIpamConfig) -> Result<Self> {
        let mut builder = PhpIpamClientBuilder::new(&config.url, config.app_id.clone())?
            .with_http_config(config.http_config());

        builder.credentials = match (&config.token, &config.username, &config.password) {
            (Some(token), _, _) => Some(Credentials::Token(token.clone())),
            (None, Some(username), Some(password)) => Some(Credentials::Password {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => {
                return Err(Error::ConfigError(
                    "phpIPAM configuration needs a token or username and password".to_string(),
                ))
            }
        };

        builder.build()
    }

    /// Normalized API base URL (always ends in `/api/`).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// API application identifier.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Section operations.
    #[must_use]
    pub fn sections(&self) -> Sections<'_> {
        Sections::new(self)
    }

    /// Subnet operations.
    #[must_use]
    pub fn subnets(&self) -> Subnets<'_> {
        Subnets::new(self)
    }

    /// Address operations.
    #[must_use]
    pub fn addresses(&self) -> Addresses<'_> {
        Addresses::new(self)
    }

    /// VLAN operations.
    #[must_use]
    pub fn vlans(&self) -> Vlans<'_> {
        Vlans::new(self)
    }

    /// L2 domain operations.
    #[must_use]
    pub fn l2domains(&self) -> L2Domains<'_> {
        L2Domains::new(self)
    }

    /// VRF operations.
    #[must_use]
    pub fn vrfs(&self) -> Vrfs<'_> {
        Vrfs::new(self)
    }

    /// Device operations.
    #[must_use]
    pub fn devices(&self) -> Devices<'_> {
        Devices::new(self)
    }

    /// Tools controller operations (tags, locations, racks, ...).
    #[must_use]
    pub fn tools(&self) -> Tools<'_> {
        Tools::new(self)
    }

    /// Prefix operations.
    #[must_use]
    pub fn prefix(&self) -> Prefix<'_> {
        Prefix::new(self)
    }

    /// Global search.
    #[must_use]
    pub fn search(&self) -> Search<'_> {
        Search::new(self)
    }

    /// Obtain a new session token with the configured username and password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] if phpIPAM rejects the
    /// credentials or none are configured, and [`Error::ParseError`] if the
    /// token expiry cannot be parsed.
    pub async fn authenticate(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        self.authenticate_locked(&mut session).await
    }

    /// Returns true while a token is held and is not within five minutes of
    /// expiring.
    pub async fn is_token_valid(&self) -> bool {
        self.session.lock().await.is_valid()
    }

    /// Authenticate if the current token is missing or about to expire.
    ///
    /// # Errors
    ///
    /// Same as [`PhpIpamClient::authenticate`].
    pub async fn ensure_authenticated(&self) -> Result<()> {
        self.session_token().await.map(|_| ())
    }

    /// Extend the validity of the current token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateError`] if no token is held,
    /// [`Error::AuthenticationFailed`] if phpIPAM rejects the refresh and
    /// [`Error::ParseError`] if the new expiry cannot be parsed.
    pub async fn refresh_token(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        let token = session
            .token()
            .map(|token| SecretString::from(token.to_string()))
            .ok_or_else(|| Error::StateError("no session token to refresh".to_string()))?;

        debug!("refreshing phpIPAM session token");
        let url = self.resource_url(SESSION_PATH)?;
        let request = with_token(self.http.request(Method::PATCH, url), &token);
        let envelope = self.execute(&Method::PATCH, SESSION_PATH, request).await?;
        if !envelope.success {
            return Err(Error::AuthenticationFailed(
                envelope
                    .message
                    .unwrap_or_else(|| "token refresh rejected".to_string()),
            ));
        }

        let response = envelope
            .decode::<TokenResponse>()?
            .ok_or_else(|| Error::ParseError("token refresh returned no data".to_string()))?;
        let expires = response.expiry()?;
        session.extend(response.token, expires);
        debug!(%expires, "phpIPAM session token refreshed");
        Ok(())
    }

    /// The current session token, if any.
    pub async fn token(&self) -> Option<SecretString> {
        self.session
            .lock()
            .await
            .token()
            .map(|token| SecretString::from(token.to_string()))
    }

    /// Expiry of the current session token, if any.
    pub async fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.session.lock().await.expires()
    }

    /// Perform an authenticated request and return the decoded envelope.
    ///
    /// `path` is relative to `{base}/{app_id}/`; a trailing slash is added.
    ///
    /// # Errors
    ///
    /// Propagates authentication, transport and decoding errors, and maps an
    /// unsuccessful envelope through [`Error::from_envelope`].
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<Envelope>
    where
        B: Serialize + ?Sized,
    {
        let token = self.session_token().await?;
        let url = self.resource_url(path)?;

        let mut request = with_token(self.http.request(method.clone(), url), &token).query(params);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        self.execute(&method, path, request).await?.into_result()
    }

    /// GET `path` and decode the payload; a missing payload is
    /// [`Error::NotFound`].
    pub(crate) async fn fetch<T>(&self, path: &str, params: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request::<()>(Method::GET, path, params, None)
            .await?
            .decode()?
            .ok_or_else(|| Error::NotFound(format!("phpIPAM returned no data for `{path}`")))
    }

    /// GET `path` and decode the payload; a missing payload yields
    /// `T::default()`.
    pub(crate) async fn fetch_or_default<T>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.request::<()>(Method::GET, path, params, None)
            .await?
            .decode()
            .map(Option::unwrap_or_default)
    }

    /// Send a request whose payload is not needed.
    pub(crate) async fn send_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.request(method, path, &[], body).await.map(|_| ())
    }

    /// POST `body` to `path` and return the complete created entity.
    ///
    /// phpIPAM often answers a create with only the new id in the envelope
    /// (and an empty object or a bare string as payload). In that case the
    /// entity is read back from `{lookup}/{id}`.
    pub(crate) async fn create_resource<B, T>(
        &self,
        path: &str,
        body: Option<&B>,
        lookup: &str,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Resource,
    {
        let envelope = self.request(Method::POST, path, &[], body).await?;
        let created = match &envelope.data {
            Some(Value::Object(_)) => envelope.decode::<T>()?,
            _ => None,
        };

        match (created, envelope.created_id()) {
            (Some(entity), _) if entity.id().is_some() => Ok(entity),
            (_, Some(id)) => {
                debug!(path, id, "fetching created {}", T::KIND);
                self.fetch(&format!("{lookup}/{}", encode_segment(id)), &[])
                    .await
            }
            (Some(entity), None) => Ok(entity),
            (None, None) => Err(Error::ParseError(format!(
                "phpIPAM returned neither the created {} nor its id for `{path}`",
                T::KIND
            ))),
        }
    }

    /// PATCH `entity` to `path` and return the updated entity.
    ///
    /// When phpIPAM does not echo the entity back it is read from
    /// `{lookup}/{id}`.
    pub(crate) async fn update_resource<T>(&self, path: &str, entity: &T, lookup: &str) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Resource,
    {
        let id = require_id(entity)?;
        let envelope = self.request(Method::PATCH, path, &[], Some(entity)).await?;
        let updated = match &envelope.data {
            Some(Value::Object(_)) => envelope.decode::<T>()?,
            _ => None,
        };

        match updated {
            Some(updated) if updated.id().is_some() => Ok(updated),
            _ => {
                debug!(path, id, "fetching updated {}", T::KIND);
                self.fetch(&format!("{lookup}/{}", encode_segment(id)), &[])
                    .await
            }
        }
    }

    async fn session_token(&self) -> Result<SecretString> {
        let mut session = self.session.lock().await;
        if !session.is_valid() {
            debug!("phpIPAM session token missing or expiring, authenticating");
            self.authenticate_locked(&mut session).await?;
        }

        session
            .token()
            .map(|token| SecretString::from(token.to_string()))
            .ok_or_else(|| Error::StateError("no session token after authentication".to_string()))
    }

    async fn authenticate_locked(&self, session: &mut Session) -> Result<()> {
        match self.acquire_token().await {
            Ok((token, expires)) => {
                session.set(token, expires);
                debug!(%expires, "phpIPAM session token acquired");
                Ok(())
            }
            Err(err) => {
                session.clear();
                Err(err)
            }
        }
    }

    async fn acquire_token(&self) -> Result<(String, DateTime<Utc>)> {
        let Some(Credentials::Password { username, password }) = &self.credentials else {
            return Err(Error::AuthenticationFailed(
                "no username/password credentials configured".to_string(),
            ));
        };

        debug!(%username, "requesting phpIPAM session token");
        let url = self.resource_url(SESSION_PATH)?;
        let request = self
            .http
            .request(Method::POST, url)
            .basic_auth(username, Some(password.expose_secret()))
            .header(ACCEPT, "application/json");

        let envelope = self.execute(&Method::POST, SESSION_PATH, request).await?;
        if !envelope.success {
            return Err(Error::AuthenticationFailed(
                envelope
                    .message
                    .unwrap_or_else(|| "authentication rejected".to_string()),
            ));
        }

        let response = envelope
            .decode::<TokenResponse>()?
            .ok_or_else(|| Error::ParseError("authentication returned no data".to_string()))?;
        let token = response
            .token
            .clone()
            .ok_or_else(|| Error::ParseError("authentication returned no token".to_string()))?;
        Ok((token, response.expiry()?))
    }

    async fn execute(&self, method: &Method, path: &str, request: RequestBuilder) -> Result<Envelope> {
        info!(%method, path, "phpIPAM request");

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            Error::HttpError(format!("Failed to read phpIPAM response body: {err}"))
        })?;

        decode_envelope(path, status, &bytes)
    }

    fn resource_url(&self, path: &str) -> Result<Url> {
        let path = path.trim_matches('/');
        let relative = if path.is_empty() {
            format!("{}/", self.app_id)
        } else {
            format!("{}/{path}/", self.app_id)
        };

        self.base_url.join(&relative).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid phpIPAM path `{path}`: {err}"))
        })
    }

    #[cfg(test)]
    pub(crate) async fn set_session(&self, token: &str, expires: DateTime<Utc>) {
        self.session.lock().await.set(token.to_string(), expires);
    }
}

/// Fail with [`Error::ValidationError`] unless the entity has an id.
pub(crate) fn require_id<T>(entity: &T) -> Result<&str>
where
    T: Resource,
{
    entity
        .id()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::ValidationError(format!("{} ID is required for update", T::KIND)))
}

/// Percent-encode a free-text value for use as a single path segment.
pub(crate) fn encode_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Normalize a phpIPAM endpoint so its path ends in exactly one `/api/`.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the endpoint is not an HTTP(S) URL.
pub fn normalize_endpoint(endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint.trim()).map_err(|err| {
        Error::ConfigError(format!("Invalid phpIPAM endpoint `{endpoint}`: {err}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::ConfigError(format!(
            "phpIPAM endpoint `{endpoint}` must be an http(s) URL"
        )));
    }

    let path = url.path().trim_end_matches('/');
    let path = path.strip_suffix("/api").unwrap_or(path).to_string();
    url.set_path(&format!("{path}/api/"));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn with_token(request: RequestBuilder, token: &SecretString) -> RequestBuilder {
    let token = token.expose_secret();
    request
        .header(TOKEN_HEADER, token)
        .header(ALT_TOKEN_HEADER, token)
        .header(ACCEPT, "application/json")
}

fn decode_envelope(path: &str, status: StatusCode, bytes: &[u8]) -> Result<Envelope> {
    match serde_json::from_slice::<Envelope>(bytes) {
        Ok(mut envelope) => {
            if envelope.code == 0 {
                envelope.code = status.as_u16();
            }
            Ok(envelope)
        }
        Err(err) if status.is_success() => Err(Error::ParseError(format!(
            "Failed to parse phpIPAM response for `{path}`: {err}"
        ))),
        Err(_) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            Err(status_error(status, text))
        }
    }
}

fn status_error(status: StatusCode, text: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::AuthenticationFailed(format!("phpIPAM rejected the request: {text}"))
        }
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("phpIPAM temporarily unavailable: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("phpIPAM server error {status}: {text}"))
        }
        _ => Error::HttpError(format!("phpIPAM error {status}: {text}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> PhpIpamClient {
        PhpIpamClient::new(server.uri(), "API", "admin", "secret", false).unwrap()
    }

    fn token_response() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "success": true,
            "data": {"token": "abc123", "expires": "2099-01-01 00:00:00"}
        }))
    }

    #[test]
    fn normalize_endpoint_is_idempotent() {
        for endpoint in [
            "https://ipam.example.com",
            "https://ipam.example.com/",
            "https://ipam.example.com/api",
            "https://ipam.example.com/api/",
            "https://ipam.example.com/api//",
        ] {
            let url = normalize_endpoint(endpoint).unwrap();
            assert_eq!(url.as_str(), "https://ipam.example.com/api/", "{endpoint}");
            assert_eq!(normalize_endpoint(url.as_str()).unwrap(), url);
        }

        let nested = normalize_endpoint("http://10.0.0.1:8080/phpipam").unwrap();
        assert_eq!(nested.as_str(), "http://10.0.0.1:8080/phpipam/api/");
    }

    #[test]
    fn normalize_endpoint_rejects_garbage() {
        assert!(matches!(
            normalize_endpoint("not a url"),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            normalize_endpoint("ftp://ipam.example.com"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn builder_rejects_empty_app_id() {
        let err = PhpIpamClientBuilder::new("https://ipam.example.com", " ").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn resource_urls_carry_app_id_and_trailing_slash() {
        let client =
            PhpIpamClient::with_static_token("https://ipam.example.com", "API", "t", false)
                .unwrap();
        assert_eq!(
            client.resource_url("sections").unwrap().as_str(),
            "https://ipam.example.com/api/API/sections/"
        );
        assert_eq!(
            client.resource_url("/subnets/cidr/10.0.0.0/24/").unwrap().as_str(),
            "https://ipam.example.com/api/API/subnets/cidr/10.0.0.0/24/"
        );
    }

    #[test]
    fn encode_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("host name"), "host+name");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_segment("00:11:22:33:44:55"), "00%3A11%3A22%3A33%3A44%3A55");
    }

    #[test]
    fn require_id_rejects_missing_and_empty_ids() {
        let mut section = Section::new("Customers");
        assert_eq!(
            require_id(&section).unwrap_err(),
            Error::ValidationError("Section ID is required for update".to_string())
        );
        section.id = Some(String::new());
        assert!(require_id(&section).is_err());
        section.id = Some("3".to_string());
        assert_eq!(require_id(&section).unwrap(), "3");
    }

    #[test]
    fn from_config_requires_credentials() {
        let config = PhpIpamConfig::new("https://ipam.example.com", "API").unwrap();
        assert!(matches!(
            PhpIpamClient::from_config(&config),
            Err(Error::ConfigError(_))
        ));

        let config = config.with_token("static");
        let client = PhpIpamClient::from_config(&config).unwrap();
        assert_eq!(client.app_id(), "API");
    }

    #[tokio::test]
    async fn authenticate_stores_token_and_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .and(basic_auth("admin", "secret"))
            .respond_with(token_response())
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(!client.is_token_valid().await);
        client.authenticate().await.unwrap();

        let token = client.token().await.unwrap();
        assert_eq!(token.expose_secret(), "abc123");
        assert_eq!(
            client.token_expiry().await,
            Some(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(client.is_token_valid().await);
    }

    #[tokio::test]
    async fn authenticate_rejected_leaves_token_unset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Invalid credentials"
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.authenticate().await.unwrap_err();
        assert_eq!(
            err,
            Error::AuthenticationFailed("Invalid credentials".to_string())
        );
        assert!(client.token().await.is_none());
        assert!(!client.is_token_valid().await);
    }

    #[tokio::test]
    async fn authenticate_rejected_with_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "code": 500,
                "success": false,
                "message": "Invalid username or password"
            })))
            .mount(&server)
            .await;

        let err = client(&server).authenticate().await.unwrap_err();
        assert_eq!(
            err,
            Error::AuthenticationFailed("Invalid username or password".to_string())
        );
    }

    #[tokio::test]
    async fn authenticate_bad_expiry_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": {"token": "abc123", "expires": "next tuesday"}
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
        assert!(client.token().await.is_none());
    }

    #[tokio::test]
    async fn failed_reauthentication_drops_stale_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": {"expires": "2099-01-01 00:00:00"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .set_session("stale", Utc::now() - ChronoDuration::minutes(1))
            .await;
        assert!(client.token().await.is_some());

        let err = client.authenticate().await.unwrap_err();
        assert_eq!(
            err,
            Error::ParseError("authentication returned no token".to_string())
        );
        assert!(client.token().await.is_none());
        assert!(client.token_expiry().await.is_none());
    }

    #[tokio::test]
    async fn from_config_password_credentials_authenticate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .and(basic_auth("admin", "hunter2"))
            .respond_with(token_response())
            .expect(1)
            .mount(&server)
            .await;

        let config = PhpIpamConfig::new(server.uri(), "API")
            .unwrap()
            .with_credentials("admin", "hunter2");
        let client = PhpIpamClient::from_config(&config).unwrap();
        client.authenticate().await.unwrap();
        assert_eq!(client.token().await.unwrap().expose_secret(), "abc123");
    }

    #[tokio::test]
    async fn static_token_never_authenticates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .respond_with(token_response())
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/sections/"))
            .and(header("token", "static"))
            .and(header("phpipam-token", "static"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "static", false)
            .unwrap();
        assert!(client.is_token_valid().await);

        let sections = client.sections().list().await.unwrap();
        assert!(sections.is_empty());
    }

    #[tokio::test]
    async fn static_token_without_credentials_cannot_authenticate() {
        let client =
            PhpIpamClient::with_static_token("https://ipam.example.com", "API", "t", false)
                .unwrap();
        assert!(matches!(
            client.authenticate().await,
            Err(Error::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn request_authenticates_once_before_first_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .respond_with(token_response())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/sections/"))
            .and(header("token", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": [{"id": "1", "name": "Customers"}]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server);
        assert_eq!(client.sections().list().await.unwrap().len(), 1);
        assert_eq!(client.sections().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn expired_token_triggers_exactly_one_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/user/"))
            .respond_with(token_response())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/sections/"))
            .and(header("token", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .set_session("stale", Utc::now() + ChronoDuration::minutes(4))
            .await;
        assert!(!client.is_token_valid().await);

        client.sections().list().await.unwrap();
        assert_eq!(client.token().await.unwrap().expose_secret(), "abc123");
    }

    #[tokio::test]
    async fn request_passes_query_parameters_separately() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/search/10.0.0.1/"))
            .and(query_param("addresses", "1"))
            .and(query_param("vlan", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": {"addresses": [{"id": "9", "ip": "10.0.0.1"}]}
            })))
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap();
        let params = vec![("addresses", "1".to_string()), ("vlan", "0".to_string())];
        let envelope = client
            .request::<()>(Method::GET, "search/10.0.0.1", &params, None)
            .await
            .unwrap();
        assert!(envelope.has_payload());
    }

    #[tokio::test]
    async fn unsuccessful_envelope_maps_to_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/sections/99/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 404,
                "success": false,
                "message": "Section not found"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/API/sections/"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": 409,
                "success": false,
                "message": "Section already exists"
            })))
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap();
        assert_eq!(
            client.sections().get("99").await.unwrap_err(),
            Error::NotFound("Section not found".to_string())
        );
        assert_eq!(
            client
                .sections()
                .create(&Section::new("Customers"))
                .await
                .unwrap_err(),
            Error::Api {
                code: 409,
                message: "Section already exists".to_string()
            }
        );
    }

    #[tokio::test]
    async fn non_json_error_status_maps_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/sections/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap();
        let err = client.sections().list().await.unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/API/sections/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap();
        assert!(matches!(
            client.sections().list().await,
            Err(Error::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn refresh_token_requires_a_token() {
        let server = MockServer::start().await;
        let err = client(&server).refresh_token().await.unwrap_err();
        assert!(matches!(err, Error::StateError(_)));
    }

    #[tokio::test]
    async fn refresh_token_extends_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/API/user/"))
            .and(header("token", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": {"expires": "2099-06-01 12:00:00"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .set_session("abc123", Utc::now() + ChronoDuration::hours(1))
            .await;
        client.refresh_token().await.unwrap();

        assert_eq!(client.token().await.unwrap().expose_secret(), "abc123");
        assert_eq!(
            client.token_expiry().await,
            Some(Utc.with_ymd_and_hms(2099, 6, 1, 12, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn refresh_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/API/user/"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": 403,
                "success": false,
                "message": "Invalid token"
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        client
            .set_session("abc123", Utc::now() + ChronoDuration::hours(1))
            .await;
        assert_eq!(
            client.refresh_token().await.unwrap_err(),
            Error::AuthenticationFailed("Invalid token".to_string())
        );
    }

    #[tokio::test]
    async fn create_without_payload_id_fetches_entity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/sections/"))
            .and(body_json(json!({"name": "Customers"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "code": 201,
                "success": true,
                "id": 42,
                "data": {}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/API/sections/42/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "success": true,
                "data": {"id": "42", "name": "Customers", "masterSection": "0"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap();
        let section = client
            .sections()
            .create(&Section::new("Customers"))
            .await
            .unwrap();
        assert_eq!(section.id.as_deref(), Some("42"));
        assert_eq!(section.master_section.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn create_without_any_id_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/API/sections/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "code": 201,
                "success": true,
                "message": "Section created"
            })))
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap();
        assert!(matches!(
            client.sections().create(&Section::new("Customers")).await,
            Err(Error::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn update_without_id_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = PhpIpamClient::with_static_token(server.uri(), "API", "t", false).unwrap();
        let err = client
            .sections()
            .update(&Section::new("Customers"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
