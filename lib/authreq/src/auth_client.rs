//! Requests bound to one authentication tenant.
//!
//! [`AuthClient`] pairs a transport with the tenant's base URL so requests can
//! be built from paths. It knows nothing about individual endpoints; callers
//! pick the path, the parameters and the decoder.

use authreq_core::{Credentials, Payload, UserProfile, decode};
use url::Url;

use crate::{HttpClient, HyperClient, Method, Request, Result, TransportError};

/// Factory for [`Request`]s against one base URL.
///
/// # Example
///
/// ```ignore
/// use authreq::{AuthClient, Method, Requestable};
///
/// let auth = AuthClient::new(HyperClient::new(), "https://tenant.auth0.com")?;
///
/// let credentials = auth
///     .credentials(Method::Post, "/oauth/token")?
///     .parameter("grant_type", "password")
///     .parameter("username", "alice@example.com")
///     .parameter("password", "secret")
///     .execute()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthClient<C = HyperClient> {
    client: C,
    base_url: Url,
}

impl<C> AuthClient<C> {
    /// Create a client for the given base URL.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(TransportError::InvalidUrl)?;
        Ok(Self::with_url(client, base_url))
    }

    /// Create a client with a pre-parsed URL.
    #[must_use]
    pub const fn with_url(client: C, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the transport.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the transport.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }

    /// Resolve `path` against the base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join(path)
            .map_err(TransportError::InvalidUrl)?)
    }
}

impl<C> AuthClient<C>
where
    C: HttpClient + Clone,
{
    /// Build a request decoded by `decoder`.
    pub fn request<T, D>(&self, method: Method, path: &str, decoder: D) -> Result<Request<T, C>>
    where
        D: Fn(Payload) -> Result<T> + Send + Sync + 'static,
    {
        Ok(Request::new(self.client.clone(), method, self.url(path)?, decoder))
    }

    /// Build a request producing a [`UserProfile`].
    pub fn user_profile(&self, method: Method, path: &str) -> Result<Request<UserProfile, C>> {
        self.request(method, path, decode::user_profile)
    }

    /// Build a request producing [`Credentials`].
    pub fn credentials(&self, method: Method, path: &str) -> Result<Request<Credentials, C>> {
        self.request(method, path, decode::credentials)
    }

    /// Build a request that only needs to succeed.
    pub fn no_body(&self, method: Method, path: &str) -> Result<Request<(), C>> {
        self.request(method, path, decode::no_body)
    }
}
