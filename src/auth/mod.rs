/// Contract and HTTP client for the hosted identity service.
mod client;
mod error;
mod hosted;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    AuthClient, OAuthRedirect, OAuthRequest, PasswordCredentials, Provider, Session,
    SignUpConfirmation, User,
};
pub use error::{ApiError, AuthError};
pub use hosted::{AuthConfig, HostedAuthClient};
