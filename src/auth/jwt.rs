use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CryptResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub exp: i64,
}

impl UserClaims {
    /// Claims for `user_id`, expiring `ttl` from now.
    pub fn new(user_id: Uuid, ttl: chrono::Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: (chrono::Utc::now() + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> CryptResult<Uuid> {
        Ok(self.sub.parse::<Uuid>()?)
    }
}

pub fn generate_token<K: AsRef<[u8]>>(
    claims: UserClaims,
    key: K,
) -> jsonwebtoken::errors::Result<String> {
    let header = Header::default();
    let key = EncodingKey::from_secret(key.as_ref());

    let token = jsonwebtoken::encode(&header, &claims, &key)?;
    Ok(token)
}

pub fn process_token<K: AsRef<[u8]>>(
    token: &str,
    key: K,
) -> jsonwebtoken::errors::Result<TokenData<UserClaims>> {
    let validation = Validation::default();
    let key = DecodingKey::from_secret(key.as_ref());

    let claims = jsonwebtoken::decode::<UserClaims>(token, &key, &validation)?;
    Ok(claims)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    #[test]
    fn token_carries_user_id() {
        let id = Uuid::new_v4();
        let token = generate_token(UserClaims::new(id, Duration::hours(1)), "key").unwrap();
        let data = process_token(&token, "key").unwrap();
        assert_eq!(data.claims.user_id().unwrap(), id);
    }

    #[test]
    fn token_rejected_with_other_key() {
        let token =
            generate_token(UserClaims::new(Uuid::new_v4(), Duration::hours(1)), "key").unwrap();
        assert!(process_token(&token, "another key").is_err());
    }

    #[test]
    fn token_rejected_when_expired() {
        // past the default 60s leeway
        let token =
            generate_token(UserClaims::new(Uuid::new_v4(), Duration::hours(-1)), "key").unwrap();
        assert!(process_token(&token, "key").is_err());
    }

    #[test]
    fn subject_must_be_uuid() {
        let claims = UserClaims {
            sub: "not-a-uuid".into(),
            exp: 0,
        };
        assert!(claims.user_id().is_err());
    }
}
