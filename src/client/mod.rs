//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::domain::{
    AoMessage, Carrier, Channel, Country, CustomAttributes, SendAo, SendAoReceipt,
};
use crate::transport;

/// Characters that must be escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Percent-encode a caller-supplied value (iso code, guid, channel name) so it
/// stays one path segment even when it contains spaces or slashes.
fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    basic_auth: Option<(String, String)>,
    json_body: Option<String>,
}

impl HttpRequest {
    fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            basic_auth: None,
            json_body: None,
        }
    }

    fn post(url: String, json_body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            basic_auth: None,
            json_body: Some(json_body),
        }
    }

    fn put(url: String, json_body: String) -> Self {
        Self {
            method: HttpMethod::Put,
            url,
            basic_auth: None,
            json_body: Some(json_body),
        }
    }

    fn delete(url: String) -> Self {
        Self {
            method: HttpMethod::Delete,
            url,
            basic_auth: None,
            json_body: None,
        }
    }

    fn authenticated(mut self, credentials: (String, String)) -> Self {
        self.basic_auth = Some(credentials);
        self
    }
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            if let Some((username, password)) = request.basic_auth {
                builder = builder.basic_auth(username, Some(password));
            }
            if let Some(body) = request.json_body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_owned(), v.to_owned()))
                })
                .collect();
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                body,
                headers,
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NuntiumClient`].
///
/// "Not found" is not an error: single-entity lookups return `Ok(None)` when
/// the gateway signals absence (404 or an empty body). Callers that need
/// per-field detail from a rejected channel create/update match on
/// [`NuntiumError::Validation`].
pub enum NuntiumError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code without structured validation detail.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The gateway rejected a channel create/update, with per-field messages.
    #[error("channel validation failed: {summary}")]
    Validation {
        summary: String,
        properties: BTreeMap<String, String>,
    },

    /// A JSON body could not be encoded, or a response body could not be
    /// decoded as the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

fn parse_error(err: impl StdError + Send + Sync + 'static) -> NuntiumError {
    NuntiumError::Parse(Box::new(err))
}

fn http_status_error(response: HttpResponse) -> NuntiumError {
    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    NuntiumError::HttpStatus {
        status: response.status,
        body,
    }
}

fn ensure_success(response: HttpResponse) -> Result<HttpResponse, NuntiumError> {
    if (200..=299).contains(&response.status) {
        Ok(response)
    } else {
        Err(http_status_error(response))
    }
}

/// Lookup responses: 404 or an empty 2xx body mean "not found", anything else
/// non-2xx is an error.
fn lookup_body(response: HttpResponse) -> Result<Option<String>, NuntiumError> {
    if response.status == 404 {
        return Ok(None);
    }
    let response = ensure_success(response)?;
    if response.body.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(response.body))
    }
}

#[derive(Debug, Clone)]
/// Builder for [`NuntiumClient`].
///
/// Use this when you need to customize the timeout or user-agent.
pub struct NuntiumClientBuilder {
    base_url: String,
    account: String,
    application: String,
    password: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NuntiumClientBuilder {
    /// Create a builder with no timeout/user-agent override.
    pub fn new(
        base_url: impl Into<String>,
        account: impl Into<String>,
        application: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            account: account.into(),
            application: application.into(),
            password: password.into(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`NuntiumClient`].
    pub fn build(self) -> Result<NuntiumClient, NuntiumError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| NuntiumError::Transport(Box::new(err)))?;

        Ok(NuntiumClient {
            base_url: trim_base_url(self.base_url),
            account: self.account,
            application: self.application,
            password: self.password,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn trim_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_owned()
}

#[derive(Clone)]
/// Application-authenticated client for the Nuntium gateway's public API.
///
/// Holds only the base URL, the account/application pair, and the application
/// password; it is immutable after construction and each method issues exactly
/// one HTTP round trip, so a single instance can be shared across tasks.
/// Authenticated calls use HTTP basic auth with `"{account}/{application}"`
/// as the username.
///
/// No validation happens at construction: a malformed base URL surfaces as a
/// [`NuntiumError::Transport`] on first use.
pub struct NuntiumClient {
    base_url: String,
    account: String,
    application: String,
    password: String,
    http: Arc<dyn HttpTransport>,
}

impl NuntiumClient {
    /// Create a client with the transport's default timeout.
    ///
    /// For more customization, use [`NuntiumClient::builder`].
    pub fn new(
        base_url: impl Into<String>,
        account: impl Into<String>,
        application: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            account: account.into(),
            application: application.into(),
            password: password.into(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(
        base_url: impl Into<String>,
        account: impl Into<String>,
        application: impl Into<String>,
        password: impl Into<String>,
    ) -> NuntiumClientBuilder {
        NuntiumClientBuilder::new(base_url, account, application, password)
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    fn credentials(&self) -> (String, String) {
        (
            format!("{}/{}", self.account, self.application),
            self.password.clone(),
        )
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NuntiumError> {
        self.http
            .execute(request)
            .await
            .map_err(NuntiumError::Transport)
    }

    /// List the countries known to the gateway. Unauthenticated.
    pub async fn countries(&self) -> Result<Vec<Country>, NuntiumError> {
        let url = self.url("api/countries.json", &[]);
        let response = ensure_success(self.execute(HttpRequest::get(url)).await?)?;
        serde_json::from_str(&response.body).map_err(parse_error)
    }

    /// Look up a country by its iso2 or iso3 code. Returns `None` when no
    /// country has that code.
    pub async fn country(&self, iso: &str) -> Result<Option<Country>, NuntiumError> {
        let url = self.url(&format!("api/countries/{}.json", path_segment(iso)), &[]);
        let response = self.execute(HttpRequest::get(url)).await?;
        match lookup_body(response)? {
            Some(body) => serde_json::from_str(&body).map(Some).map_err(parse_error),
            None => Ok(None),
        }
    }

    /// List the carriers known to the gateway, optionally restricted to a
    /// country given its iso2 or iso3 code. Unauthenticated.
    pub async fn carriers(&self, country_id: Option<&str>) -> Result<Vec<Carrier>, NuntiumError> {
        let query = match country_id {
            Some(country_id) => vec![("country_id".to_owned(), country_id.to_owned())],
            None => Vec::new(),
        };
        let url = self.url("api/carriers.json", &query);
        let response = ensure_success(self.execute(HttpRequest::get(url)).await?)?;
        serde_json::from_str(&response.body).map_err(parse_error)
    }

    /// Look up a carrier by its guid. Returns `None` when no carrier has that
    /// guid.
    pub async fn carrier(&self, guid: &str) -> Result<Option<Carrier>, NuntiumError> {
        let url = self.url(&format!("api/carriers/{}.json", path_segment(guid)), &[]);
        let response = self.execute(HttpRequest::get(url)).await?;
        match lookup_body(response)? {
            Some(body) => serde_json::from_str(&body).map(Some).map_err(parse_error),
            None => Ok(None),
        }
    }

    /// List the channels belonging to the application, or that don't belong
    /// to any application.
    ///
    /// An empty 2xx body means "no channels" (legacy gateway behavior); any
    /// non-2xx status is an error.
    pub async fn channels(&self) -> Result<Vec<Channel>, NuntiumError> {
        let url = self.url("api/channels.json", &[]);
        let request = HttpRequest::get(url).authenticated(self.credentials());
        let response = ensure_success(self.execute(request).await?)?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        transport::decode_channel_list_json(&response.body).map_err(parse_error)
    }

    /// Look up a channel by name. Returns `None` when the channel doesn't
    /// exist.
    pub async fn channel(&self, name: &str) -> Result<Option<Channel>, NuntiumError> {
        let url = self.url(&format!("api/channels/{}.json", path_segment(name)), &[]);
        let request = HttpRequest::get(url).authenticated(self.credentials());
        let response = self.execute(request).await?;
        match lookup_body(response)? {
            Some(body) => transport::decode_channel_json(&body)
                .map(Some)
                .map_err(parse_error),
            None => Ok(None),
        }
    }

    /// Create a channel and return it as the gateway stored it.
    ///
    /// The input is only borrowed; its `configuration` mapping is reshaped
    /// into the wire form on a copy, never in place. A rejected create
    /// surfaces as [`NuntiumError::Validation`] with per-field messages.
    pub async fn create_channel(&self, channel: &Channel) -> Result<Channel, NuntiumError> {
        let body = transport::encode_channel_json(channel).map_err(parse_error)?;
        let url = self.url("api/channels.json", &[]);
        let request = HttpRequest::post(url, body).authenticated(self.credentials());
        let response = self.execute(request).await?;
        Self::channel_write_response(response)
    }

    /// Update a channel, addressed by its `name`, and return the stored
    /// result. Same reshaping and error classification as
    /// [`NuntiumClient::create_channel`].
    pub async fn update_channel(&self, channel: &Channel) -> Result<Channel, NuntiumError> {
        let body = transport::encode_channel_json(channel).map_err(parse_error)?;
        let url = self.url(
            &format!("api/channels/{}.json", path_segment(&channel.name)),
            &[],
        );
        let request = HttpRequest::put(url, body).authenticated(self.credentials());
        let response = self.execute(request).await?;
        Self::channel_write_response(response)
    }

    fn channel_write_response(response: HttpResponse) -> Result<Channel, NuntiumError> {
        if !(200..=299).contains(&response.status) {
            if (400..500).contains(&response.status) {
                if let Some((summary, properties)) =
                    transport::decode_validation_error_json(&response.body)
                {
                    return Err(NuntiumError::Validation {
                        summary,
                        properties,
                    });
                }
            }
            return Err(http_status_error(response));
        }
        transport::decode_channel_json(&response.body).map_err(parse_error)
    }

    /// Delete a channel by name.
    pub async fn delete_channel(&self, name: &str) -> Result<(), NuntiumError> {
        // Bare path: the delete endpoint has no `.json` suffix.
        let url = self.url(&format!("api/channels/{}", path_segment(name)), &[]);
        let request = HttpRequest::delete(url).authenticated(self.credentials());
        ensure_success(self.execute(request).await?)?;
        Ok(())
    }

    /// Ask the gateway which channels it would consider for routing the given
    /// AO message, without sending it.
    pub async fn candidate_channels_for_ao(
        &self,
        message: &AoMessage,
    ) -> Result<Vec<Channel>, NuntiumError> {
        let query = transport::encode_ao_query(message);
        let url = self.url("api/candidate/channels.json", &query);
        let request = HttpRequest::get(url).authenticated(self.credentials());
        let response = ensure_success(self.execute(request).await?)?;
        transport::decode_channel_list_json(&response.body).map_err(parse_error)
    }

    /// Send one or many AO messages in a single call.
    ///
    /// A [`SendAo::Single`] message goes out as a GET with the message in the
    /// query string and yields a receipt with `id`, `guid` and `token`. A
    /// [`SendAo::Batch`] goes out as one POST of the JSON array and yields a
    /// receipt with `token` only.
    pub async fn send_ao(&self, request: SendAo) -> Result<SendAoReceipt, NuntiumError> {
        match request {
            SendAo::Single(message) => {
                let query = transport::encode_ao_query(&message);
                let url = self.url(
                    &format!("{}/{}/send_ao", self.account, self.application),
                    &query,
                );
                let request = HttpRequest::get(url).authenticated(self.credentials());
                let response = ensure_success(self.execute(request).await?)?;
                Ok(SendAoReceipt {
                    id: header_value(&response, transport::HEADER_AO_ID),
                    guid: header_value(&response, transport::HEADER_AO_GUID),
                    token: header_value(&response, transport::HEADER_AO_TOKEN),
                })
            }
            SendAo::Batch(messages) => {
                let body = serde_json::to_string(&messages).map_err(parse_error)?;
                let url = self.url(
                    &format!("{}/{}/send_ao.json", self.account, self.application),
                    &[],
                );
                let request = HttpRequest::post(url, body).authenticated(self.credentials());
                let response = ensure_success(self.execute(request).await?)?;
                Ok(SendAoReceipt {
                    id: None,
                    guid: None,
                    token: header_value(&response, transport::HEADER_AO_TOKEN),
                })
            }
        }
    }

    /// Fetch the AO messages the gateway has accumulated for a send token.
    pub async fn get_ao(&self, token: &str) -> Result<Vec<AoMessage>, NuntiumError> {
        let query = vec![("token".to_owned(), token.to_owned())];
        let url = self.url(
            &format!("{}/{}/get_ao.json", self.account, self.application),
            &query,
        );
        let request = HttpRequest::get(url).authenticated(self.credentials());
        let response = ensure_success(self.execute(request).await?)?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        transport::decode_ao_list_json(&response.body).map_err(parse_error)
    }

    /// Fetch the custom attributes stored for an address. Returns `None` when
    /// the address has none.
    pub async fn get_custom_attributes(
        &self,
        address: &str,
    ) -> Result<Option<CustomAttributes>, NuntiumError> {
        let query = vec![("address".to_owned(), address.to_owned())];
        let url = self.url("api/custom_attributes", &query);
        let request = HttpRequest::get(url).authenticated(self.credentials());
        let response = self.execute(request).await?;
        match lookup_body(response)? {
            Some(body) => serde_json::from_str(&body).map(Some).map_err(parse_error),
            None => Ok(None),
        }
    }

    /// Store custom attributes for an address, replacing what was there.
    pub async fn set_custom_attributes(
        &self,
        address: &str,
        attributes: &CustomAttributes,
    ) -> Result<(), NuntiumError> {
        let body = serde_json::to_string(attributes).map_err(parse_error)?;
        let query = vec![("address".to_owned(), address.to_owned())];
        let url = self.url("api/custom_attributes", &query);
        let request = HttpRequest::post(url, body).authenticated(self.credentials());
        ensure_success(self.execute(request).await?)?;
        Ok(())
    }
}

fn header_value(response: &HttpResponse, name: &str) -> Option<String> {
    transport::find_header(&response.headers, name).map(str::to_owned)
}
