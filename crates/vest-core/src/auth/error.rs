use thiserror::Error;

/// Errors reported by the identity provider or network agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Login was cancelled or the provider window was closed")]
    UserInterrupt,

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors surfaced by session manager operations whose policy propagates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Failed to create identity client: {0}")]
    CreateClient(#[source] IdentityError),

    #[error("Failed to query session state: {0}")]
    SessionQuery(#[source] IdentityError),

    #[error("Failed to create network agent: {0}")]
    CreateAgent(#[source] IdentityError),

    #[error("Failed to fetch root key: {0}")]
    FetchRootKey(#[source] IdentityError),

    #[error("Login failed: {0}")]
    Login(#[source] IdentityError),

    #[error("Logout failed: {0}")]
    Logout(#[source] IdentityError),

    #[error("Session not initialized - call init first")]
    NotInitialized,
}
