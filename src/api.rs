//! The Api system is responsible for talking to the notes service. It knows
//! how to build URLs, send requests through a `Transport` and turn non-2xx
//! responses into errors carrying the service's reason.

use std::time::Duration;

use config;
use reqwest;
use reqwest::header::CONTENT_TYPE;
pub use reqwest::Method;
use reqwest::Url;
use serde_json::{self, Value};

use crate::error::{NError, NResult};

/// Used when the service gives us an error without a `message`
pub const GENERIC_FAILURE: &'static str = "Request failed";

/// Where we send requests unless the config says otherwise
pub const DEFAULT_ENDPOINT: &'static str = "https://notes-api.dicoding.dev/v2";

/// A struct used for building API requests
pub struct ApiReq {
    timeout: Duration,
    data: Option<Value>,
}

impl ApiReq {
    /// Create a new builder
    pub fn new() -> Self {
        let secs: u64 = config::get_or(&["api", "timeout_secs"], 10);
        ApiReq {
            timeout: Duration::new(secs, 0),
            data: None,
        }
    }

    /// Set this request's JSON body
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// A fully-built request handed to the transport
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
    pub timeout: Duration,
}

/// What came back from the service, before any interpretation
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new<T: Into<String>>(status: u16, body: T) -> Response {
        Response {
            status: status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Moves requests over the wire. Failing to get any response at all must come
/// back as `NError::Network`.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, req: &Request) -> NResult<Response>;
}

impl<F> Transport for F
    where F: Fn(&Request) -> NResult<Response> + Send + Sync + 'static
{
    fn send(&self, req: &Request) -> NResult<Response> {
        (*self)(req)
    }
}

/// The real thing: blocking HTTP via reqwest
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> NResult<HttpTransport> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| NError::Network(format!("building client: {}", e)))?;
        Ok(HttpTransport { client: client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, req: &Request) -> NResult<Response> {
        let mut builder = self.client
            .request(req.method.clone(), &req.url[..])
            .timeout(req.timeout);
        if let Some(ref body) = req.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }
        let res = builder.send()
            .map_err(|e| NError::Network(format!("{}", e)))?;
        let status = res.status().as_u16();
        let body = res.text()
            .map_err(|e| NError::Network(format!("reading response: {}", e)))?;
        Ok(Response::new(status, body))
    }
}

/// Our Api object. Responsible for making outbound calls to the notes service.
pub struct Api {
    transport: Box<dyn Transport>,
}

impl Api {
    /// Create an Api that sends through the given transport
    pub fn new<T: Transport>(transport: T) -> Api {
        Api {
            transport: Box::new(transport),
        }
    }

    /// Create an Api over HTTP
    pub fn http() -> NResult<Api> {
        Ok(Api::new(HttpTransport::new()?))
    }

    /// Build a full URL given a resource
    fn build_url(&self, resource: &str) -> String {
        let endpoint: String = config::get_or(&["api", "endpoint"], String::from(DEFAULT_ENDPOINT));
        let endpoint = endpoint.trim_end_matches('/');
        let mut url = String::with_capacity(endpoint.len() + resource.len());
        url.push_str(endpoint);
        url.push_str(resource);
        url
    }

    /// Send out an API request
    pub fn call(&self, method: Method, resource: &str, builder: ApiReq) -> NResult<Value> {
        debug!("api::call() -- req: {} {}", method, resource);
        let ApiReq { timeout, data } = builder;
        let body = match data {
            Some(ref x) => Some(serde_json::to_string(x)?),
            None => None,
        };
        let req = Request {
            method: method,
            url: self.build_url(resource),
            body: body,
            timeout: timeout,
        };
        let res = self.transport.send(&req);
        self.call_end(res, &req, resource)
    }

    /// Finish an API request, interpreting whatever the transport got back
    fn call_end(&self, response: NResult<Response>, req: &Request, resource: &str) -> NResult<Value> {
        let res = match response {
            Ok(x) => x,
            Err(e) => {
                error!("api::call() -- {} {}: {}", req.method, resource, e);
                return Err(e);
            }
        };
        info!("api::call() -- res({}): {} {} {}", res.body.len(), res.status, req.method, resource);
        trace!("  api::call() -- body: {}", res.body);
        if !res.is_success() {
            let msg = error_message(&res.body);
            error!("api::call() -- service error: {} {}: {}", res.status, resource, msg);
            return Err(NError::Service(res.status, msg));
        }
        if res.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&res.body)?)
    }

    /// Convenience function for api.call(GET)
    pub fn get(&self, resource: &str, builder: ApiReq) -> NResult<Value> {
        self.call(Method::GET, resource, builder)
    }

    /// Convenience function for api.call(POST)
    pub fn post(&self, resource: &str, builder: ApiReq) -> NResult<Value> {
        self.call(Method::POST, resource, builder)
    }

    /// Convenience function for api.call(DELETE)
    pub fn delete(&self, resource: &str, builder: ApiReq) -> NResult<Value> {
        self.call(Method::DELETE, resource, builder)
    }
}

/// Join path segments into a resource, percent-encoding each one so an id
/// holding `/`, `?` or `#` stays a single segment.
pub fn resource(segments: &[&str]) -> NResult<String> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| NError::Msg(format!("api::resource() -- {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| NError::Msg(String::from("api::resource() -- url can't be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(String::from(url.path()))
}

/// Pull the `message` out of an error body, if there is one
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(val) => match val.get("message").and_then(|x| x.as_str()) {
            Some(msg) if !msg.is_empty() => String::from(msg),
            _ => String::from(GENERIC_FAILURE),
        },
        Err(_) => String::from(GENERIC_FAILURE),
    }
}
