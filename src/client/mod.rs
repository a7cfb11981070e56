use hyper::client::HttpConnector;
use hyper::header::{HeaderMap, HeaderValue, USER_AGENT};
use hyper::{Body as HyperBody, Client, Method, Request, StatusCode, Uri};
use hyper_tls::HttpsConnector;
use url::Url;

use crate::error::TriggerError;

pub type HttpsClient = Client<HttpsConnector<HttpConnector>>;

const AGENT: &str = concat!("loadforge-flood/", env!("CARGO_PKG_VERSION"));

/// One client per test run. Every attempt of the run shares its pool; the pool
/// goes away with the last clone, after the run's stragglers are done.
pub fn build_client() -> HttpsClient {
    let https = HttpsConnector::new();
    Client::builder().build::<_, HyperBody>(https)
}

/// The request every attempt of a run replays: same method, URI and headers.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl RequestTemplate {
    pub fn parse(target: &str) -> Result<Self, TriggerError> {
        let url = Url::parse(target).map_err(|e| {
            TriggerError::ConstructionFailure(format!("parse {:?}: {}", target, e))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TriggerError::ConstructionFailure(format!(
                    "unsupported protocol scheme {:?}",
                    other
                )))
            }
        }

        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| {
                TriggerError::ConstructionFailure(e.to_string())
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

        Ok(Self {
            method: Method::GET,
            uri,
            headers,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn build(&self) -> Request<HyperBody> {
        let mut request = Request::new(HyperBody::empty());
        *request.method_mut() = self.method.clone();
        *request.uri_mut() = self.uri.clone();
        *request.headers_mut() = self.headers.clone();
        request
    }
}

/// Issues one request and reads the response to the end so the connection
/// can go back to the pool.
pub async fn send_request(
    client: &HttpsClient,
    template: &RequestTemplate,
) -> Result<StatusCode, hyper::Error> {
    let response = client.request(template.build()).await?;
    let status = response.status();
    hyper::body::to_bytes(response.into_body()).await?;
    Ok(status)
}
