//! Git authentication
//!
//! Credentials are tried in the order git itself would use them:
//! - default credentials (negotiate/NTLM)
//! - SSH agent, then `~/.ssh/id_{ed25519,rsa,ecdsa}`
//! - git credential helpers
//! - an interactive username/password prompt, when a prompter is available
//!
//! libgit2 calls the credential callback again every time the server rejects
//! what it was given, so each source is tried once and the prompt a bounded
//! number of times before giving up.

use std::cell::RefCell;

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode, RemoteCallbacks};

use crate::error::WpenvError;
use crate::prompt::Prompter;

/// Interactive username/password attempts per clone
pub const MAX_PROMPTS: u32 = 3;

const SSH_KEY_NAMES: [&str; 3] = ["id_ed25519", "id_rsa", "id_ecdsa"];

/// Mutable state shared with the credential callback for one clone
pub struct CredentialState<'p> {
    prompter: Option<&'p dyn Prompter>,
    ssh_attempts: u32,
    helper_tried: bool,
    prompts: u32,
    failure: Option<WpenvError>,
}

impl<'p> CredentialState<'p> {
    pub fn new(prompter: Option<&'p dyn Prompter>) -> Self {
        Self {
            prompter,
            ssh_attempts: 0,
            helper_tried: false,
            prompts: 0,
            failure: None,
        }
    }

    /// The prompt error (cancellation, no TTY) that aborted authentication
    pub fn take_failure(&mut self) -> Option<WpenvError> {
        self.failure.take()
    }

    fn ssh_credentials(&mut self, username: &str) -> std::result::Result<Cred, Error> {
        self.ssh_attempts += 1;
        match self.ssh_attempts {
            1 => Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_files(username)),
            2 => ssh_key_files(username),
            _ => Err(auth_error("SSH authentication failed")),
        }
    }

    fn user_pass_credentials(
        &mut self,
        url: &str,
        username_from_url: Option<&str>,
    ) -> std::result::Result<Cred, Error> {
        if !self.helper_tried {
            self.helper_tried = true;
            if let Ok(config) = git2::Config::open_default() {
                if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                    log::debug!("using credential helper for {url}");
                    return Ok(cred);
                }
            }
        }

        let Some(prompter) = self.prompter else {
            return Err(auth_error("authentication failed"));
        };
        if self.prompts >= MAX_PROMPTS {
            return Err(auth_error("authentication failed"));
        }
        self.prompts += 1;

        match ask_credentials(prompter, url, username_from_url) {
            Ok((username, password)) => Cred::userpass_plaintext(&username, &password),
            Err(err) => {
                let message = err.to_string();
                self.failure = Some(err);
                Err(auth_error(&message))
            }
        }
    }
}

fn ask_credentials(
    prompter: &dyn Prompter,
    url: &str,
    username_from_url: Option<&str>,
) -> crate::error::Result<(String, String)> {
    let username = match username_from_url {
        Some(username) if !username.is_empty() => username.to_string(),
        _ => prompter.text(&format!("Username for {url}:"), None)?,
    };
    let password = prompter.password(&format!("Password or access token for {url}:"))?;
    Ok((username, password))
}

fn ssh_key_files(username: &str) -> std::result::Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    for key_name in SSH_KEY_NAMES {
        let private_key = ssh_dir.join(key_name);
        if !private_key.exists() {
            continue;
        }
        let public_key = ssh_dir.join(format!("{key_name}.pub"));
        let public_key = public_key.exists().then_some(public_key.as_path());

        if let Ok(cred) = Cred::ssh_key(username, public_key, &private_key, None) {
            return Ok(cred);
        }
    }

    Err(auth_error("SSH key not found"))
}

fn auth_error(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Http, message)
}

/// Install the credential callback on `callbacks`
pub fn setup_auth_callbacks<'a, 'p: 'a>(
    callbacks: &mut RemoteCallbacks<'a>,
    state: &'a RefCell<CredentialState<'p>>,
) {
    callbacks.credentials(move |url, username_from_url, allowed_types| {
        let mut state = state.borrow_mut();

        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return state.ssh_credentials(username);
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return state.user_pass_credentials(url, username_from_url);
        }

        Err(auth_error("no supported authentication method"))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{Answer, ScriptedPrompter};

    #[test]
    fn test_prompts_for_username_and_password() {
        let prompter = ScriptedPrompter::new([
            Answer::Text("dev".into()),
            Answer::Text("s3cret".into()),
        ]);
        let (username, password) =
            ask_credentials(&prompter, "https://example.test/site.git", None).unwrap();
        assert_eq!(username, "dev");
        assert_eq!(password, "s3cret");
        assert_eq!(
            prompter.asked(),
            [
                "Username for https://example.test/site.git:",
                "Password or access token for https://example.test/site.git:",
            ]
        );
    }

    #[test]
    fn test_username_from_url_skips_question() {
        let prompter = ScriptedPrompter::new([Answer::Text("token".into())]);
        let (username, _) =
            ask_credentials(&prompter, "https://dev@example.test/site.git", Some("dev")).unwrap();
        assert_eq!(username, "dev");
        assert_eq!(
            prompter.asked(),
            ["Password or access token for https://dev@example.test/site.git:"]
        );
    }

    #[test]
    fn test_cancelled_prompt_is_recorded() {
        let prompter = ScriptedPrompter::new([Answer::Cancel]);
        let mut state = CredentialState::new(Some(&prompter));
        state.helper_tried = true;

        let result = state.user_pass_credentials("https://example.test/site.git", None);

        assert!(result.is_err());
        assert!(state.take_failure().is_some_and(|e| e.is_cancelled()));
    }

    #[test]
    fn test_prompt_attempts_are_bounded() {
        let answers = (0..MAX_PROMPTS).flat_map(|_| {
            [Answer::Text("dev".into()), Answer::Text("wrong".into())]
        });
        let prompter = ScriptedPrompter::new(answers);
        let mut state = CredentialState::new(Some(&prompter));
        state.helper_tried = true;

        for _ in 0..MAX_PROMPTS {
            assert!(state.user_pass_credentials("https://example.test/x.git", None).is_ok());
        }
        let last = state.user_pass_credentials("https://example.test/x.git", None);
        assert!(last.is_err());
        assert!(state.take_failure().is_none());
    }

    #[test]
    fn test_without_prompter_fails_after_helper() {
        let mut state = CredentialState::new(None);
        state.helper_tried = true;
        assert!(
            state
                .user_pass_credentials("https://example.test/x.git", None)
                .is_err()
        );
    }
}
