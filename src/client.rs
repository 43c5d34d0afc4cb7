//! Grafana API client.
//!
//! Low-level HTTP transport that handles authentication, organization
//! scoping and raw requests. Datasource operations are implemented via
//! traits on the model types.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{GrafanaError, Result};

const DEFAULT_API_URL: &str = "http://localhost:3000";
const USER_AGENT: &str = concat!("grafapi/", env!("CARGO_PKG_VERSION"));

/// Header used to scope a request to an organization.
pub const ORG_ID_HEADER: &str = "X-Grafana-Org-Id";

/// Organization scope for a request.
///
/// `OrgId::CURRENT` (zero) leaves the choice to the server, which uses the
/// authenticated user's current organization. Any other value is sent in
/// the `X-Grafana-Org-Id` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OrgId(pub u64);

impl OrgId {
    /// The authenticated user's current organization.
    pub const CURRENT: OrgId = OrgId(0);

    /// Header value for this scope, or `None` for the current organization.
    fn header_value(self) -> Option<HeaderValue> {
        match self.0 {
            0 => None,
            n => Some(HeaderValue::from(n)),
        }
    }
}

impl From<u64> for OrgId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Credentials attached to every request.
#[derive(Clone)]
pub enum Auth {
    /// API key or service account token, sent as a bearer token.
    Token(String),
    /// HTTP basic authentication.
    Basic { user: String, password: String },
}

impl Auth {
    /// Parse `user:password` into basic credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no `:` separator.
    pub fn parse_basic(credentials: &str) -> Result<Self> {
        let (user, password) = credentials.split_once(':').ok_or_else(|| {
            GrafanaError::ConfigMissing("basic auth must be in user:password form".to_string())
        })?;
        Ok(Self::Basic {
            user: user.to_string(),
            password: password.to_string(),
        })
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Token(token) => request.bearer_auth(token),
            Self::Basic { user, password } => request.basic_auth(user, Some(password)),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(..)"),
            Self::Basic { user, .. } => f.debug_struct("Basic").field("user", user).finish_non_exhaustive(),
        }
    }
}

/// Status and body of a completed request.
///
/// The transport never judges the status code; each operation decides what
/// counts as success.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON regardless of the status code.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Require exactly `200 OK`, otherwise wrap the code and raw body.
    ///
    /// # Errors
    ///
    /// Returns [`GrafanaError::Status`] for any other status.
    pub fn require_ok(self) -> Result<Self> {
        if self.status == StatusCode::OK {
            return Ok(self);
        }
        tracing::debug!(status = self.status.as_u16(), "unexpected response status");
        Err(GrafanaError::Status {
            status_code: self.status.as_u16(),
            body: self.text(),
        })
    }
}

/// Low-level Grafana API client.
///
/// Handles authentication, organization scoping and HTTP requests.
/// Datasource operations are implemented via the `Get`, `List`, `Create`,
/// `Update` and `Delete` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use grafapi::{Auth, GrafanaClient};
///
/// # fn example() -> grafapi::Result<()> {
/// // Create from environment variables
/// let client = GrafanaClient::from_env()?;
///
/// // Or configure manually
/// let client = GrafanaClient::new(Auth::Token("glsa_xxx".into()), "http://localhost:3000")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GrafanaClient {
    http: Client,
    base_url: Arc<Url>,
    auth: Auth,
}

impl fmt::Debug for GrafanaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrafanaClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GrafanaClient {
    /// Create a client from environment variables.
    ///
    /// Uses `GRAFANA_API_KEY` (bearer token) or `GRAFANA_BASIC_AUTH`
    /// (`user:password`) for authentication, and optionally `GRAFANA_URL`
    /// for the base URL (defaults to `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns an error if neither credential variable is set.
    pub fn from_env() -> Result<Self> {
        let auth = match (env::var("GRAFANA_API_KEY"), env::var("GRAFANA_BASIC_AUTH")) {
            (Ok(token), _) => Auth::Token(token),
            (Err(_), Ok(basic)) => Auth::parse_basic(&basic)?,
            _ => {
                return Err(GrafanaError::ConfigMissing(
                    "GRAFANA_API_KEY or GRAFANA_BASIC_AUTH environment variable not set"
                        .to_string(),
                ))
            }
        };

        let base_url = env::var("GRAFANA_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(auth, &base_url)
    }

    /// Create a new client with the provided credentials and base URL.
    ///
    /// # Arguments
    ///
    /// * `auth` - Token or basic credentials
    /// * `base_url` - Root of the Grafana instance (e.g., `http://localhost:3000`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(auth: Auth, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so relative joins keep any sub-path
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(GrafanaError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            auth,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str, org: OrgId) -> Result<RawResponse> {
        self.send(Method::GET, path, org, None::<&()>).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        org: OrgId,
    ) -> Result<RawResponse> {
        self.send(Method::POST, path, org, Some(body)).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        org: OrgId,
    ) -> Result<RawResponse> {
        self.send(Method::PUT, path, org, Some(body)).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str, org: OrgId) -> Result<RawResponse> {
        self.send(Method::DELETE, path, org, None::<&()>).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        org: OrgId,
        body: Option<&B>,
    ) -> Result<RawResponse> {
        let url = self.base_url.join(path)?;

        let mut request = self.auth.apply(self.http.request(method, url));
        if let Some(value) = org.header_value() {
            request = request.header(ORG_ID_HEADER, value);
        }
        if let Some(body) = body {
            // Encode here so a marshal failure surfaces as a parse error,
            // not as an opaque transport error.
            let encoded = serde_json::to_vec(body)?;
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(encoded);
        }

        let response = request.send().await.map_err(GrafanaError::HttpError)?;
        let status = response.status();
        let body = response.bytes().await.map_err(GrafanaError::HttpError)?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
