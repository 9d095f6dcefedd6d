use std::collections::BTreeMap;

use axum::http::HeaderMap;
use lectio_core::{LectioError, UserId};

/// Resolves a bearer token to the user it belongs to.
///
/// Issuing and verifying credentials happens elsewhere; the gateway only
/// needs to know who is asking.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<UserId>;
}

/// Fixed token → user map, loaded from `[gateway.auth.tokens]`.
pub struct StaticTokens {
    tokens: BTreeMap<String, UserId>,
}

impl StaticTokens {
    pub fn new(tokens: &BTreeMap<String, String>) -> Self {
        Self {
            tokens: tokens
                .iter()
                .map(|(token, user)| (token.clone(), UserId(user.clone())))
                .collect(),
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

impl IdentityResolver for StaticTokens {
    fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).cloned()
    }
}

/// Identify the caller from the `Authorization: Bearer <token>` header.
pub fn authenticate(
    identity: &dyn IdentityResolver,
    headers: &HeaderMap,
) -> Result<UserId, LectioError> {
    let token = extract_bearer(headers).ok_or_else(|| {
        LectioError::Unauthorized("set 'Authorization: Bearer <token>' header".to_string())
    })?;
    identity
        .resolve(token)
        .ok_or_else(|| LectioError::Unauthorized("unknown token".to_string()))
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn resolver() -> StaticTokens {
        let mut map = BTreeMap::new();
        map.insert("s3cret".to_string(), "ana".to_string());
        StaticTokens::new(&map)
    }

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert("authorization", HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn known_token_resolves() {
        let user = authenticate(&resolver(), &headers("Bearer s3cret")).unwrap();
        assert_eq!(user, UserId::from("ana"));
    }

    #[test]
    fn missing_or_unknown_token_is_unauthorized() {
        let r = resolver();
        for h in [HeaderMap::new(), headers("Bearer nope"), headers("Basic s3cret"), headers("Bearer ")] {
            assert_eq!(authenticate(&r, &h).unwrap_err().code(), "UNAUTHORIZED");
        }
    }
}
