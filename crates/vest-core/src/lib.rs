//! Core library for vest: identity sessions and token allowances.
//!
//! - [`auth`]: session lifecycle against an identity provider
//! - [`ledger`]: the allowance gate over an ICRC-2 token ledger
//! - [`config`]: environment resolved once at startup
//! - [`principal`]: the identifier shared by both
//!
//! External clients (identity provider, network agent, ledger) are consumed
//! through the traits in [`auth::client`] and [`ledger::client`].

pub mod auth;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod principal;

pub use auth::{
    AuthError, ErrorPolicies, ErrorPolicy, Identity, IdentityError, Session, SessionManager,
    SessionSnapshot, SessionStore,
};
pub use config::{EnvironmentConfig, Network, Runtime};
pub use ledger::{check_allowance, get_approval, AllowanceDecision, LedgerClient, LedgerError};
pub use principal::{Principal, PrincipalError};
