//! JWT access and refresh token handling.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenPair};

#[cfg(test)]
mod tests {
    use snapbook_core::config::auth::AuthConfig;
    use snapbook_core::error::ErrorKind;

    use super::{Claims, JwtDecoder, JwtEncoder};

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            access_ttl_minutes: 30,
            refresh_ttl_days: 7,
            password_min_length: 8,
        }
    }

    #[test]
    fn pair_differs_in_discriminator_and_shares_subject() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let pair = encoder
            .issue_pair("alice@example.com", false)
            .expect("pair issued");
        assert_eq!(pair.token_type, "bearer");

        let access = decoder.decode_access_token(&pair.access_token).unwrap();
        let refresh = decoder.decode_refresh_token(&pair.refresh_token).unwrap();

        assert!(!access.is_refresh);
        assert!(refresh.is_refresh);
        assert_eq!(access.sub, "alice@example.com");
        assert_eq!(access.sub, refresh.sub);
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn refresh_token_rejected_where_access_required() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let pair = encoder.issue_pair("bob@example.com", true).unwrap();

        let err = decoder
            .decode_access_token(&pair.refresh_token)
            .expect_err("refresh token must not pass as access token");
        assert_eq!(err.kind, ErrorKind::Authentication);

        // And the reverse: an access token is not a refresh token.
        let err = decoder
            .decode_refresh_token(&pair.access_token)
            .expect_err("access token must not pass as refresh token");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn expired_token_always_fails() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "carol@example.com".to_string(),
            iat: now - 3600,
            exp: now - 60, // past the decoder's clock-skew leeway
            is_admin: false,
            is_refresh: false,
        };
        let token = encoder.sign(&claims).unwrap();

        let err = decoder.decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn garbage_token_fails_with_authentication_error() {
        let decoder = JwtDecoder::new(&test_config());
        let err = decoder.decode_access_token("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let encoder = JwtEncoder::new(&AuthConfig {
            jwt_secret: "a-completely-different-secret".to_string(),
            ..test_config()
        });
        let decoder = JwtDecoder::new(&test_config());

        let pair = encoder.issue_pair("dave@example.com", false).unwrap();
        let err = decoder.decode_access_token(&pair.access_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn admin_snapshot_round_trips() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let pair = encoder.issue_pair("root@example.com", true).unwrap();
        let claims = decoder.decode_access_token(&pair.access_token).unwrap();
        assert!(claims.is_admin);
    }
}
