//! Capability contracts for the identity provider and network agent.
//!
//! These are implemented outside this crate (browser bindings, test mocks);
//! the session manager only ever talks to them through these traits.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::IdentityError;
use crate::principal::Principal;

/// Maximum lifetime of a delegation issued at login: 4 weeks.
pub const MAX_TIME_TO_LIVE: Duration = Duration::from_secs(4 * 7 * 24 * 60 * 60);

/// A verified session credential issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub principal: Principal,
    /// Expiry of the delegation chain, when the provider reports one.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            expires_at: None,
        }
    }

    pub fn with_expiry(principal: Principal, expires_at: DateTime<Utc>) -> Self {
        Self {
            principal,
            expires_at: Some(expires_at),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        crate::principal::is_anonymous(&self.principal)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|exp| Utc::now() > exp).unwrap_or(false)
    }

    pub fn time_until_expiry(&self) -> Option<chrono::Duration> {
        self.expires_at.map(|exp| exp - Utc::now())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleOptions {
    pub disable_idle: bool,
}

/// Options passed when creating an identity client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClientOptions {
    pub idle_options: IdleOptions,
}

impl Default for AuthClientOptions {
    fn default() -> Self {
        Self {
            idle_options: IdleOptions { disable_idle: true },
        }
    }
}

/// Options passed to the identity provider's login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOptions {
    pub identity_provider: Option<String>,
    pub derivation_origin: Option<String>,
    pub max_time_to_live: Duration,
}

impl LoginOptions {
    /// Lifetime in nanoseconds, the unit the provider expects.
    pub fn max_time_to_live_nanos(&self) -> u64 {
        self.max_time_to_live.as_nanos() as u64
    }
}

/// A handle to the identity provider.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Whether a stored, still valid session exists.
    async fn is_authenticated(&self) -> Result<bool, IdentityError>;

    /// The current identity. Anonymous when no session exists.
    fn identity(&self) -> Identity;

    /// Run the provider login flow. Resolves once the flow completes:
    /// `Ok` is the provider's success callback, `Err` its error callback.
    async fn login(&self, options: &LoginOptions) -> Result<(), IdentityError>;

    async fn logout(&self) -> Result<(), IdentityError>;
}

#[async_trait]
pub trait IdentityClientFactory: Send + Sync {
    async fn create(
        &self,
        options: &AuthClientOptions,
    ) -> Result<Arc<dyn IdentityClient>, IdentityError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOptions {
    /// `None` makes the agent call anonymously.
    pub identity: Option<Identity>,
    pub host: String,
}

/// A network agent that signs and sends calls to the replica.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Fetch the replica's root key. Only valid against a local replica,
    /// mainnet's key is hardcoded in the agent.
    async fn fetch_root_key(&self) -> Result<(), IdentityError>;
}

#[async_trait]
pub trait AgentFactory: Send + Sync {
    async fn create(&self, options: AgentOptions) -> Result<Arc<dyn Agent>, IdentityError>;
}
