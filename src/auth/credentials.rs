use crate::config::AuthConfig;

/// The single operator credential pair, fixed for the process lifetime.
#[derive(Clone)]
pub struct CredentialStore {
    username: String,
    password: String,
}

impl CredentialStore {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    /// Plain equality against the configured pair.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_exact_match_only() {
        let store = CredentialStore::new("ash", "pikachu");
        assert!(store.verify("ash", "pikachu"));
        assert!(!store.verify("ash", "raichu"));
        assert!(!store.verify("gary", "pikachu"));
        assert!(!store.verify("Ash", "pikachu"));
        assert!(!store.verify("ash ", "pikachu"));
        assert!(!store.verify("", ""));
    }

    #[test]
    fn test_debug_hides_password() {
        let store = CredentialStore::new("ash", "pikachu");
        let rendered = format!("{:?}", store);
        assert!(rendered.contains("ash"));
        assert!(!rendered.contains("pikachu"));
    }
}
