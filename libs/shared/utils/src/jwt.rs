use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::debug;

use shared_models::auth::TokenClaims;

/// Decode the claims segment of a bearer token. The client holds no signing
/// secret, so the signature is not verified here; the backend re-validates
/// every request. Expired tokens are rejected locally to fail before I/O.
pub fn decode_claims(token: &str) -> Result<TokenClaims, String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let claims_b64 = parts[1];

    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return Err("Invalid claims encoding".to_string()),
        },
        Err(_) => return Err("Invalid claims encoding".to_string()),
    };

    let claims: TokenClaims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err("Invalid claims format".to_string());
        }
    };

    if let Some(exp) = claims.exp {
        let now = chrono::Utc::now().timestamp() as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err("Token expired".to_string());
        }
    }

    debug!("Token decoded for user {}", claims.user_id);
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JwtTestUtils, TestUser};

    #[test]
    fn decodes_user_id_from_token() {
        let user = TestUser::with_id(42);
        let token = JwtTestUtils::create_test_token(&user, Some(24));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, 42);
    }

    #[test]
    fn rejects_expired_token() {
        let user = TestUser::with_id(42);
        let token = JwtTestUtils::create_expired_token(&user);

        assert_eq!(decode_claims(&token).unwrap_err(), "Token expired");
    }

    #[test]
    fn rejects_malformed_token() {
        assert!(decode_claims("not-a-token").is_err());
        assert!(decode_claims("a.b").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
    }
}
