use alloy_primitives::Address;

use crate::error::Result;
use crate::http::{create_l1_headers, HttpClient};
use crate::signing::EthSigner;
use crate::types::ApiCreds;

/// Client for wallet-authenticated (L1) operations
///
/// Every request is signed with the `ClobAuth` EIP-712 statement, so only the
/// key is needed. The result is the L2 credentials the [`TradingClient`] uses.
///
/// [`TradingClient`]: crate::client::TradingClient
pub struct AuthenticatedClient {
    http_client: HttpClient,
    signer: Box<dyn EthSigner>,
}

impl AuthenticatedClient {
    /// Create a new AuthenticatedClient
    ///
    /// # Arguments
    /// * `host` - The base URL for the API
    /// * `signer` - Key whose address owns the API credentials
    pub fn new(host: impl Into<String>, signer: impl EthSigner + 'static) -> Self {
        Self {
            http_client: HttpClient::new(host),
            signer: Box::new(signer),
        }
    }

    /// Create a new API key for the signer's address.
    pub async fn create_api_key(&self, nonce: Option<u64>) -> Result<ApiCreds> {
        let headers = create_l1_headers(&*self.signer, nonce)?;
        self.http_client
            .post("/auth/api-key", &serde_json::json!({}), Some(headers))
            .await
    }

    /// Derive the API key previously created with `nonce`.
    pub async fn derive_api_key(&self, nonce: Option<u64>) -> Result<ApiCreds> {
        let headers = create_l1_headers(&*self.signer, nonce)?;
        self.http_client
            .get("/auth/derive-api-key", Some(headers))
            .await
    }

    /// Create an API key, deriving the existing one if creation is refused.
    pub async fn create_or_derive_api_key(&self, nonce: Option<u64>) -> Result<ApiCreds> {
        match self.create_api_key(nonce).await {
            Ok(creds) => Ok(creds),
            Err(e) => {
                tracing::debug!(error = %e, "api key creation failed, deriving");
                self.derive_api_key(nonce).await
            }
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::test_support::*;
    use mockito::{Matcher, Mock, Server};

    const CREDS: &str = r#"{"apiKey":"key-1","secret":"c2VjcmV0","passphrase":"pass"}"#;

    fn l1_mock(server: &mut Server, method: &str, path: &str) -> Mock {
        server
            .mock(method, path)
            .match_header("poly_address", Matcher::Regex(format!("(?i)^{TEST_ADDRESS}$")))
            .match_header("poly_signature", Matcher::Regex("^0x[0-9a-f]{130}$".to_string()))
            .match_header("poly_timestamp", Matcher::Regex(r"^\d+$".to_string()))
            .match_header("poly_nonce", "3")
    }

    #[tokio::test]
    async fn test_create_api_key() {
        let mut server = Server::new_async().await;
        let create = l1_mock(&mut server, "POST", "/auth/api-key")
            .with_status(200)
            .with_body(CREDS)
            .create_async()
            .await;
        let derive = server
            .mock("GET", "/auth/derive-api-key")
            .expect(0)
            .create_async()
            .await;

        let client = AuthenticatedClient::new(server.url(), test_signer(137));
        let creds = client.create_or_derive_api_key(Some(3)).await.unwrap();

        create.assert_async().await;
        derive.assert_async().await;
        assert_eq!(creds.api_key, "key-1");
        assert_eq!(creds.passphrase, "pass");
    }

    #[tokio::test]
    async fn test_refused_creation_falls_back_to_derive() {
        let mut server = Server::new_async().await;
        let create = l1_mock(&mut server, "POST", "/auth/api-key")
            .with_status(400)
            .with_body(r#"{"error":"Could not create api key"}"#)
            .expect(2)
            .create_async()
            .await;
        let derive = l1_mock(&mut server, "GET", "/auth/derive-api-key")
            .with_status(200)
            .with_body(CREDS)
            .create_async()
            .await;

        let client = AuthenticatedClient::new(server.url(), test_signer(137));
        assert!(matches!(
            client.create_api_key(Some(3)).await.unwrap_err(),
            crate::Error::Api { status: 400, .. }
        ));
        let creds = client.create_or_derive_api_key(Some(3)).await.unwrap();

        create.assert_async().await;
        derive.assert_async().await;
        assert_eq!(creds.secret, "c2VjcmV0");
    }
}
