use rand::RngExt;
use rand::distr::Alphanumeric;

use super::prelude::*;

const CSRF_TOKEN_KEY: &str = "csrf_token";
const CSRF_TOKEN_CHARS: usize = 32;

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CSRF_TOKEN_CHARS)
        .map(char::from)
        .collect()
}

/// Returns the session's token, minting one on first use.
pub(crate) async fn csrf_token(session: &Session) -> Result<String, SceneForgeError> {
    let existing = session
        .get::<String>(CSRF_TOKEN_KEY)
        .await
        .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;
    let token = existing.unwrap_or_else(generate_token);
    session
        .insert(CSRF_TOKEN_KEY, token.clone())
        .await
        .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;
    Ok(token)
}

/// Rejects a synthesis form post whose token doesn't match the session.
pub(crate) async fn validate_csrf(session: &Session, token: &str) -> Result<(), SceneForgeError> {
    let stored = session
        .get::<String>(CSRF_TOKEN_KEY)
        .await
        .map_err(|err| SceneForgeError::InternalServerError(err.to_string()))?;
    match stored {
        Some(expected) if expected == token => Ok(()),
        _ => Err(SceneForgeError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_long_and_distinct() {
        let first = generate_token();
        let second = generate_token();
        assert_eq!(first.len(), CSRF_TOKEN_CHARS);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }
}
