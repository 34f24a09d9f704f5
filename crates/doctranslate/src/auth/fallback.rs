use async_trait::async_trait;
use secrecy::SecretString;

use super::{AuthError, Authenticator, LocalAuthenticator, LoginResponse, RemoteAuthenticator};

/// Remote login with the local pair as a backstop.
///
/// The local pair is consulted when the service is unreachable, answers
/// with an error status, or sends a body that cannot be read. A well-formed
/// `success: false` answer stands. If the local pair does not match either,
/// the remote error is returned.
pub struct FallbackAuthenticator {
    remote: RemoteAuthenticator,
    local: LocalAuthenticator,
}

impl FallbackAuthenticator {
    pub fn new(remote: RemoteAuthenticator, local: LocalAuthenticator) -> Self {
        Self { remote, local }
    }
}

#[async_trait]
impl Authenticator for FallbackAuthenticator {
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AuthError> {
        let remote_error = match self.remote.login(username, password).await {
            Err(
                e @ (AuthError::Transport(_)
                | AuthError::Status { .. }
                | AuthError::InvalidResponse(_)),
            ) => e,
            other => return other,
        };

        log::warn!("{}, checking local credentials", remote_error);
        if self.local.matches(username, password) {
            return self.local.login(username, password).await;
        }
        Err(remote_error)
    }
}
