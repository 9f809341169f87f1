use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::signing::{build_hmac_signature, sign_clob_auth_message, EthSigner};
use crate::types::ApiCreds;

// Sent as POLY_ADDRESS etc.; header names are case-insensitive and `http` stores them lowercase.
const POLY_ADDRESS: &str = "poly_address";
const POLY_SIGNATURE: &str = "poly_signature";
const POLY_TIMESTAMP: &str = "poly_timestamp";
const POLY_NONCE: &str = "poly_nonce";
const POLY_API_KEY: &str = "poly_api_key";
const POLY_PASSPHRASE: &str = "poly_passphrase";

const USER_AGENT: &str = concat!("polymarket-orders/", env!("CARGO_PKG_VERSION"));

/// JSON-over-HTTP wrapper bound to one host
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: Client,
    host: String,
}

impl HttpClient {
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            client: Client::new(),
            host: host.trim_end_matches('/').to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        let request = self.request(Method::GET, path, headers);
        Self::handle(request.send().await?).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        let request = self.request(Method::POST, path, headers).json(body);
        Self::handle(request.send().await?).await
    }

    pub async fn delete_with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        let request = self.request(Method::DELETE, path, headers).json(body);
        Self::handle(request.send().await?).await
    }

    fn request(&self, method: Method, path: &str, headers: Option<HeaderMap>) -> RequestBuilder {
        let url = format!("{}{}", self.host, path);
        tracing::trace!(%method, %url, "sending request");
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "*/*");
        if let Some(headers) = headers {
            request = request.headers(headers);
        }
        request
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_message(&text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// `error` field of a JSON error body, or the raw body.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::validation(format!("invalid {name} header value: {e}")))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Headers for wallet-authenticated endpoints (API key creation and derivation).
pub(crate) fn create_l1_headers(signer: &dyn EthSigner, nonce: Option<u64>) -> Result<HeaderMap> {
    let timestamp = Utc::now().timestamp();
    let nonce = nonce.unwrap_or(0);
    let signature = sign_clob_auth_message(signer, timestamp, nonce)?;

    let mut headers = HeaderMap::new();
    insert(&mut headers, POLY_ADDRESS, &signer.address().to_string())?;
    insert(&mut headers, POLY_SIGNATURE, &signature)?;
    insert(&mut headers, POLY_TIMESTAMP, &timestamp.to_string())?;
    insert(&mut headers, POLY_NONCE, &nonce.to_string())?;
    Ok(headers)
}

/// Headers for API-key-authenticated endpoints.
///
/// The signed path must not include the query string.
pub(crate) fn create_l2_headers<B: Serialize + ?Sized>(
    signer: &dyn EthSigner,
    creds: &ApiCreds,
    method: &str,
    request_path: &str,
    body: Option<&B>,
) -> Result<HeaderMap> {
    let timestamp = Utc::now().timestamp().to_string();
    let body = body.map(serde_json::to_string).transpose()?;
    let signature = build_hmac_signature(
        &creds.secret,
        &timestamp,
        method,
        request_path,
        body.as_deref(),
    )?;

    let mut headers = HeaderMap::new();
    insert(&mut headers, POLY_ADDRESS, &signer.address().to_string())?;
    insert(&mut headers, POLY_SIGNATURE, &signature)?;
    insert(&mut headers, POLY_TIMESTAMP, &timestamp)?;
    insert(&mut headers, POLY_API_KEY, &creds.api_key)?;
    insert(&mut headers, POLY_PASSPHRASE, &creds.passphrase)?;
    Ok(headers)
}
