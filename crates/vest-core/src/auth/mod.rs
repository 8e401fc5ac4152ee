//! Authentication module for managing the user's identity session.
//!
//! This module provides:
//! - `SessionManager`: `init`/`login`/`logout` against an identity provider
//! - `SessionStore`: the single-writer container holding the shared `Session`
//! - Capability traits for the identity client and network agent
//!
//! Sessions live in memory only; the identity provider keeps its own
//! storage of delegations.

pub mod client;
pub mod error;
pub mod manager;
pub mod session;
pub mod store;

pub use client::{
    Agent, AgentFactory, AgentOptions, AuthClientOptions, IdleOptions, Identity, IdentityClient,
    IdentityClientFactory, LoginOptions, MAX_TIME_TO_LIVE,
};
pub use error::{AuthError, IdentityError};
pub use manager::{ErrorPolicies, ErrorPolicy, SessionManager};
pub use session::{Session, SessionSnapshot};
pub use store::SessionStore;
