use std::io::Write;

use acct_core::{AuthError, FederatedCredential, FederatedProvider, Result as AuthResult};

use async_trait::async_trait;
use log::warn;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Google sign-in for a terminal: the ID token comes from `--id-token` or
/// is pasted at a prompt. An empty answer backs out of the flow.
pub struct PromptProvider {
    preset: Option<String>,
}

impl PromptProvider {
    pub fn new(preset: Option<String>) -> Self {
        Self { preset }
    }

    pub fn credential_from_answer(answer: &str) -> AuthResult<FederatedCredential> {
        let token = answer.trim();
        if token.is_empty() {
            return Err(AuthError::user_cancelled());
        }
        Ok(FederatedCredential::google(token.to_string()))
    }
}

#[async_trait]
impl FederatedProvider for PromptProvider {
    async fn obtain_credential(&self) -> AuthResult<FederatedCredential> {
        if let Some(token) = &self.preset {
            return Self::credential_from_answer(token);
        }

        eprint!("Google ID token (leave empty to cancel): ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = stdin.read_line(&mut answer).await {
            warn!("Could not read ID token from stdin: {e}");
            return Err(AuthError::user_cancelled());
        }

        Self::credential_from_answer(&answer)
    }
}
