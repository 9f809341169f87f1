use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over `timestamp + method + path + body`, keyed by the URL-safe
/// base64 API secret and returned URL-safe base64 encoded.
pub fn build_hmac_signature(
    secret: &str,
    timestamp: &str,
    method: &str,
    request_path: &str,
    body: Option<&str>,
) -> Result<String> {
    let key = URL_SAFE
        .decode(secret)
        .map_err(|e| Error::AuthRequired(format!("API secret is not valid base64: {e}")))?;

    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| Error::Signing(format!("invalid HMAC key: {e}")))?;
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(request_path.as_bytes());
    if let Some(body) = body {
        mac.update(body.as_bytes());
    }

    Ok(URL_SAFE.encode(mac.finalize().into_bytes()))
}
