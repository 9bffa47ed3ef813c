//! OAuth authentication module for Twitter/X API integration.
//!
//! Two schemes are used:
//! - OAuth 2.0 Bearer Token (app context) for read-only lookups
//! - OAuth 1.0a HMAC-SHA1 (user context) for calls made as the bot account,
//!   such as resolving the bot's own id and posting replies

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::TwitterConfig;
use crate::error::PlatformError;

type HmacSha1 = Hmac<Sha1>;

/// Builds the Authorization header for OAuth 2.0 Bearer Token authentication.
///
/// # Example
///
/// ```rust
/// use statsbot::build_bearer_auth_header;
///
/// let header = build_bearer_auth_header("your_bearer_token");
/// assert_eq!(header, "Bearer your_bearer_token");
/// ```
pub fn build_bearer_auth_header(bearer_token: &str) -> String {
    format!("Bearer {}", bearer_token)
}

/// Per-request values that make an OAuth 1.0a signature unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthNonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl OAuthNonce {
    /// A random 32-character hex nonce stamped with the current time.
    pub fn generate() -> Self {
        let nonce: String = (0..16)
            .map(|_| format!("{:02x}", rand::random::<u8>()))
            .collect();
        Self {
            nonce,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Builds the Authorization header for an OAuth 1.0a user-context request.
///
/// # Parameters
///
/// - `method`: HTTP method, e.g. `GET`
/// - `url`: Request URL without query string
/// - `params`: Query (or form) parameters, which are part of the signature
/// - `config`: Credentials holding the consumer key/secret and access token/secret
/// - `nonce`: Nonce and timestamp for this request
///
/// JSON request bodies are not signed.
///
/// # Returns
///
/// - `Ok(String)`: The `OAuth ...` header value
/// - `Err(PlatformError::Signing)`: If the HMAC key is rejected
pub fn build_oauth1_header(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    config: &TwitterConfig,
    nonce: &OAuthNonce,
) -> Result<String, PlatformError> {
    let timestamp = nonce.timestamp.to_string();
    let oauth_params = [
        ("oauth_consumer_key", config.api_key.as_str()),
        ("oauth_nonce", nonce.nonce.as_str()),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", config.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let mut signed: Vec<(String, String)> = oauth_params
        .iter()
        .chain(params.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    signed.sort();

    let param_string = signed
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    );
    let signing_key = format!(
        "{}&{}",
        percent_encode(&config.api_secret),
        percent_encode(&config.access_token_secret)
    );
    let signature = sign(&signing_key, &base_string)?;

    let header_params = oauth_params
        .iter()
        .copied()
        .chain(std::iter::once(("oauth_signature", signature.as_str())))
        .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", header_params))
}

fn sign(key: &str, base_string: &str) -> Result<String, PlatformError> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PlatformError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// RFC 3986 percent-encoding as OAuth 1.0a requires (unreserved characters kept).
pub fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs_config() -> TwitterConfig {
        TwitterConfig {
            api_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            api_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            bearer_token: "unused".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
            api_base_url: "https://api.x.com".to_string(),
        }
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(build_bearer_auth_header("abc"), "Bearer abc");
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("hello"), "hello");
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("a=b&c=d"), "a%3Db%26c%3Dd");
        assert_eq!(percent_encode("-._~"), "-._~");
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
    }

    /// Example request from the X developer documentation ("Creating a signature").
    #[test]
    fn test_oauth1_signature_matches_documentation() {
        let nonce = OAuthNonce {
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".to_string(),
            timestamp: 1318622958,
        };
        let header = build_oauth1_header(
            "post",
            "https://api.twitter.com/1.1/statuses/update.json",
            &[
                ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
                ("include_entities", "true"),
            ],
            &docs_config(),
            &nonce,
        )
        .unwrap();

        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_timestamp=\"1318622958\""));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(!header.contains("status="));
    }

    #[test]
    fn test_oauth1_accepts_empty_secrets() {
        let mut config = docs_config();
        config.api_secret.clear();
        config.access_token_secret.clear();
        let nonce = OAuthNonce {
            nonce: "abc".to_string(),
            timestamp: 1,
        };

        let header = build_oauth1_header("GET", "https://api.x.com/2/users/me", &[], &config, &nonce)
            .unwrap();
        assert!(header.contains("oauth_signature=\""));
        assert_eq!(sign("", "base").unwrap().len(), 28);
    }

    #[test]
    fn test_generated_nonce_is_unique_hex() {
        let a = OAuthNonce::generate();
        let b = OAuthNonce::generate();
        assert_eq!(a.nonce.len(), 32);
        assert!(a.nonce.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.nonce, b.nonce);
    }
}
