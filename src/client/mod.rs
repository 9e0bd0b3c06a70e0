//! Client layer: request orchestration over the transport seam.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    CodeLength, DeliveryStatus, ParamValue, PhoneNumber, StatusQuery, Ttl, ValidationError,
    VerificationOutcome, VerificationParams, field,
};
use crate::session::{MemorySessionStore, REQUEST_ID_KEY, SessionStore};

/// Root of the Telegram Gateway API.
pub const BASE_URL: &str = "https://gatewayapi.telegram.org/";

/// Endpoint names under [`BASE_URL`].
pub mod endpoint {
    pub const CHECK_SEND_ABILITY: &str = "checkSendAbility";
    pub const SEND_VERIFICATION_MESSAGE: &str = "sendVerificationMessage";
    pub const CHECK_VERIFICATION_STATUS: &str = "checkVerificationStatus";
    pub const REVOKE_VERIFICATION_MESSAGE: &str = "revokeVerificationMessage";
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        bearer: Option<&'a str>,
        form: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        bearer: Option<&'a str>,
        form: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).form(&form);
            if let Some(token) = bearer {
                request = request.bearer_auth(token);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
///
/// Every variant reachable from the remote operations is a locally-detectable
/// misuse: no phone number, no request id, no endpoint, or a parameter outside
/// its allowed range. Remote weirdness (network failures, non-2xx statuses,
/// malformed bodies) never surfaces here; it degrades into `false`, `None`,
/// or a raw-body fallback depending on the operation.
pub enum GatewayError {
    /// Send or ability check invoked with no phone number from any source.
    #[error("no phone number available: pass one or configure it on the client")]
    MissingPhoneNumber,

    /// Status check or revoke invoked with no request id from any source.
    #[error("no request id available: send a verification message first or pass one")]
    MissingRequestId,

    /// Transport invoked with no resolvable target endpoint.
    #[error("no resolvable target endpoint")]
    MissingEndpoint,

    /// `code_length` or `ttl` set outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),

    /// The HTTP client could not be constructed from the builder settings.
    #[error("http client setup failed: {0}")]
    Setup(#[source] Box<dyn StdError + Send + Sync>),
}

/// Builder for [`GatewayClient`].
///
/// Use this when you need a custom session store, timeout, user-agent, or
/// (in tests) a different base URL.
pub struct GatewayClientBuilder {
    token: String,
    base_url: String,
    endpoint: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    session: Option<Arc<dyn SessionStore>>,
}

impl GatewayClientBuilder {
    /// Create a builder with the production base URL and a 30 s timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: BASE_URL.to_owned(),
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            session: None,
        }
    }

    /// Override the gateway base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Configure a default endpoint used when a call names none.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the HTTP timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Inject the session store holding the cross-call request id slot.
    ///
    /// Clients of the same logical session should share one store.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| GatewayError::Setup(Box::new(err)))?;

        Ok(GatewayClient {
            token: self.token,
            base_url: normalize_base_url(self.base_url),
            endpoint: self.endpoint,
            phone_number: None,
            params: VerificationParams::new(),
            last_response: None,
            session: self
                .session
                .unwrap_or_else(|| Arc::new(MemorySessionStore::new())),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

// `Url::join` treats a base without a trailing slash as a file path and would
// drop its last segment.
fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

#[derive(Clone)]
/// Client for the Telegram Gateway verification API.
///
/// Holds the bearer token, the configured phone number, and the loose bag of
/// verification parameters, and performs the four remote operations: ability
/// check, send, status check, revoke. One instance serves one logical
/// verification flow; the crate adds no internal locking.
pub struct GatewayClient {
    token: String,
    base_url: String,
    endpoint: Option<String>,
    phone_number: Option<String>,
    params: VerificationParams,
    last_response: Option<String>,
    session: Arc<dyn SessionStore>,
    http: Arc<dyn HttpTransport>,
}

impl GatewayClient {
    /// Create a client against the production gateway.
    ///
    /// For a custom timeout, session store, or base URL, use
    /// [`GatewayClient::builder`].
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: BASE_URL.to_owned(),
            endpoint: None,
            phone_number: None,
            params: VerificationParams::new(),
            last_response: None,
            session: Arc::new(MemorySessionStore::new()),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(token: impl Into<String>) -> GatewayClientBuilder {
        GatewayClientBuilder::new(token)
    }

    /// Preflight: can the gateway currently deliver to this number?
    ///
    /// Resolves the number from the argument, else the configured one, and
    /// fails with [`GatewayError::MissingPhoneNumber`] when neither is set.
    /// Returns `true` iff the response carries a `result.request_id`; any
    /// transport or decode failure degrades to `false`. Does not touch the
    /// stored last response.
    pub async fn check_send_ability(
        &self,
        phone_number: Option<&str>,
    ) -> Result<bool, GatewayError> {
        let resolved = self.resolve_phone_number(phone_number)?;
        let form = crate::transport::encode_check_ability_form(&resolved);

        let Some(body) = self.call(endpoint::CHECK_SEND_ABILITY, form).await? else {
            return Ok(false);
        };
        Ok(crate::transport::decode_request_id(&body).is_some())
    }

    /// Send a verification message and return the raw response body.
    ///
    /// The resolved number is merged with the whole parameter bag. The raw
    /// body is stored for the inspection accessors and returned verbatim;
    /// `Ok(None)` means the round trip itself failed, in which case the
    /// stored response is untouched. On `ok == true` the returned request id
    /// is written into the session slot (cleared when absent) and the
    /// returned phone number is written back into the parameter bag.
    pub async fn send_verification_message(
        &mut self,
        phone_number: Option<&str>,
    ) -> Result<Option<String>, GatewayError> {
        let resolved = self.resolve_phone_number(phone_number)?;
        let form = crate::transport::encode_send_form(&resolved, &self.params);

        let Some(body) = self.call(endpoint::SEND_VERIFICATION_MESSAGE, form).await? else {
            return Ok(None);
        };
        self.last_response = Some(body.clone());

        if let Some(receipt) = crate::transport::decode_send_receipt(&body) {
            if receipt.ok {
                self.session.set(REQUEST_ID_KEY, receipt.request_id);
                if let Some(number) = receipt.phone_number {
                    self.params.set(field::PHONE_NUMBER, number);
                }
            }
        }

        Ok(Some(body))
    }

    /// Check the verification status of a request, optionally submitting a code.
    ///
    /// Identifier resolution: `query.request_id` first, then the remembered
    /// id (session slot, else local parameter); fails with
    /// [`GatewayError::MissingRequestId`] when none is available. `Ok(None)`
    /// means the round trip itself failed; a body with no readable status
    /// comes back untouched as [`VerificationOutcome::Raw`].
    pub async fn check_verification_status(
        &self,
        query: StatusQuery,
    ) -> Result<Option<VerificationOutcome>, GatewayError> {
        let request_id = query
            .request_id
            .or_else(|| self.request_id())
            .ok_or(GatewayError::MissingRequestId)?;
        let form = crate::transport::encode_check_status_form(&request_id, query.code.as_deref());

        let Some(body) = self.call(endpoint::CHECK_VERIFICATION_STATUS, form).await? else {
            return Ok(None);
        };
        Ok(Some(
            match crate::transport::decode_verification_status(&body) {
                Some(status) => VerificationOutcome::from_status(&status),
                None => VerificationOutcome::Raw(body),
            },
        ))
    }

    /// Revoke the in-flight verification message.
    ///
    /// Uses the remembered request id (session slot, else local parameter).
    /// Returns the decoded `result` object when the response carries one;
    /// its absence is not an error.
    pub async fn revoke_verification_message(
        &self,
    ) -> Result<Option<serde_json::Value>, GatewayError> {
        let request_id = self.request_id().ok_or(GatewayError::MissingRequestId)?;
        let form = crate::transport::encode_revoke_form(&request_id);

        let Some(body) = self.call(endpoint::REVOKE_VERIFICATION_MESSAGE, form).await? else {
            return Ok(None);
        };
        Ok(crate::transport::decode_result_value(&body))
    }

    // Configuration accessors.

    /// The configured bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Replace the bearer token. The empty string selects the anonymous
    /// `access_token=` query form.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// The configured phone number, if any.
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// Store a phone number verbatim for subsequent operations.
    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) {
        self.phone_number = Some(phone_number.into());
    }

    /// Store a parsed phone number, normalized to E.164.
    pub fn set_parsed_phone_number(&mut self, phone_number: &PhoneNumber) {
        self.phone_number = Some(phone_number.e164().to_owned());
    }

    /// The default endpoint override, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Configure a default endpoint. The core operations always name their
    /// own endpoint and ignore this.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = Some(endpoint.into());
    }

    /// The request id a status check or revoke would use.
    ///
    /// The session slot wins over the locally stored parameter.
    pub fn request_id(&self) -> Option<String> {
        self.session
            .get(REQUEST_ID_KEY)
            .or_else(|| self.params.get_str(field::REQUEST_ID).map(str::to_owned))
    }

    /// Store a request id locally. The session slot, when populated by a
    /// send, still takes precedence.
    pub fn set_request_id(&mut self, request_id: impl Into<String>) {
        self.params.set(field::REQUEST_ID, request_id.into());
    }

    /// The configured code length, defaulting to 6.
    pub fn code_length(&self) -> u8 {
        self.params
            .get_i64(CodeLength::FIELD)
            .and_then(|value| u8::try_from(value).ok())
            .unwrap_or(CodeLength::DEFAULT)
    }

    /// Set the generated-code length. Values outside `4..=8` fail with
    /// [`GatewayError::InvalidParameter`] and leave the previous value unchanged.
    pub fn set_code_length(&mut self, value: u8) -> Result<(), GatewayError> {
        let value = CodeLength::new(value)?;
        self.params
            .set(CodeLength::FIELD, i64::from(value.value()));
        Ok(())
    }

    /// The caller-supplied code, if one was set.
    pub fn code(&self) -> Option<&str> {
        self.params.get_str(field::CODE)
    }

    /// Supply your own code instead of a gateway-generated one.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.params.set(field::CODE, code.into());
    }

    /// The configured sender username, if any.
    pub fn sender_username(&self) -> Option<&str> {
        self.params.get_str(field::SENDER_USERNAME)
    }

    /// Set the username the message is sent from.
    pub fn set_sender_username(&mut self, username: impl Into<String>) {
        self.params.set(field::SENDER_USERNAME, username.into());
    }

    /// The configured callback URL, if any.
    pub fn callback_url(&self) -> Option<&str> {
        self.params.get_str(field::CALLBACK_URL)
    }

    /// Set the URL the gateway reports delivery events to.
    pub fn set_callback_url(&mut self, callback_url: impl Into<String>) {
        self.params.set(field::CALLBACK_URL, callback_url.into());
    }

    /// The stored payload, if any.
    pub fn payload(&self) -> Option<&ParamValue> {
        self.params.get(field::PAYLOAD)
    }

    /// Attach an opaque payload, forwarded verbatim.
    pub fn set_payload(&mut self, payload: impl Into<ParamValue>) {
        self.params.set(field::PAYLOAD, payload.into());
    }

    /// The configured TTL in seconds, if any.
    pub fn ttl(&self) -> Option<u32> {
        self.params
            .get_i64(Ttl::FIELD)
            .and_then(|value| u32::try_from(value).ok())
    }

    /// Set the code's validity window in seconds. Values outside
    /// `60..=86400` fail with [`GatewayError::InvalidParameter`] and leave
    /// the previous value unchanged.
    pub fn set_ttl(&mut self, value: u32) -> Result<(), GatewayError> {
        let value = Ttl::new(value)?;
        self.params.set(Ttl::FIELD, i64::from(value.value()));
        Ok(())
    }

    /// The whole verification-parameter bag.
    pub fn verification_params(&self) -> &VerificationParams {
        &self.params
    }

    /// Store an arbitrary parameter, forwarded verbatim with every send.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.set(key, value);
    }

    // Response inspection accessors. All operate on the body stored by the
    // last send; the other operations leave it alone.

    /// The raw body of the last send response.
    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    /// The last send response decoded into a generic JSON value.
    pub fn last_response_json(&self) -> Option<serde_json::Value> {
        crate::transport::decode_json(self.last_response.as_deref()?)
    }

    /// `result.request_cost` from the last send response.
    pub fn request_cost(&self) -> Option<f64> {
        crate::transport::decode_request_cost(self.last_response.as_deref()?)
    }

    /// `result.remaining_balance` from the last send response.
    pub fn remaining_balance(&self) -> Option<f64> {
        crate::transport::decode_remaining_balance(self.last_response.as_deref()?)
    }

    /// Delivery state reported in the last send response.
    pub fn delivery_status(&self) -> DeliveryStatus {
        let raw = self
            .last_response
            .as_deref()
            .and_then(crate::transport::decode_delivery_status);
        DeliveryStatus::from_raw(raw.as_deref())
    }

    // Internals.

    /// First non-empty of: the argument, the configured number.
    fn resolve_phone_number(&self, phone_number: Option<&str>) -> Result<String, GatewayError> {
        [phone_number, self.phone_number.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .map(str::to_owned)
            .ok_or(GatewayError::MissingPhoneNumber)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, GatewayError> {
        let endpoint = if endpoint.is_empty() {
            self.endpoint.as_deref().unwrap_or_default()
        } else {
            endpoint
        };
        if endpoint.is_empty() {
            return Err(GatewayError::MissingEndpoint);
        }

        let base = Url::parse(&self.base_url).map_err(|_| GatewayError::MissingEndpoint)?;
        let mut url = base
            .join(endpoint)
            .map_err(|_| GatewayError::MissingEndpoint)?;
        if self.token.is_empty() {
            // Anonymous form: an access_token query pair, empty value and all.
            url.query_pairs_mut().append_pair("access_token", &self.token);
        }
        Ok(url)
    }

    /// One POST round trip. `Ok(None)` is a transport-level failure; remote
    /// weirdness is the caller's decode problem, never an error here.
    async fn call(
        &self,
        endpoint: &str,
        form: Vec<(String, String)>,
    ) -> Result<Option<String>, GatewayError> {
        let url = self.endpoint_url(endpoint)?;
        let bearer = (!self.token.is_empty()).then_some(self.token.as_str());

        match self.http.post_form(url.as_str(), bearer, form).await {
            Ok(response) => {
                tracing::debug!(endpoint, status = response.status, "gateway response");
                Ok(Some(response.body))
            }
            Err(err) => {
                tracing::debug!(endpoint, error = %err, "transport failure");
                Ok(None)
            }
        }
    }
}
