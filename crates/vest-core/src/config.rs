//! Runtime environment configuration.
//!
//! The environment is resolved once at startup into an `EnvironmentConfig`
//! and injected into the session manager. Nothing else in the crate reads
//! process environment variables.
//!
//! Recognized variables (a `.env` file is loaded first if present):
//! - `DFX_NETWORK`: `local` selects the local replica, anything else mainnet
//! - `CANISTER_ID_INTERNET_IDENTITY`: identity provider canister id
//! - `VEST_USER_AGENT`: browser user agent; unset means no browser window
//! - `VEST_DERIVATION_ORIGIN`, `VEST_HOST`: optional overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::principal::{self, Principal};

const ENV_NETWORK: &str = "DFX_NETWORK";
const ENV_II_CANISTER: &str = "CANISTER_ID_INTERNET_IDENTITY";
const ENV_USER_AGENT: &str = "VEST_USER_AGENT";
const ENV_DERIVATION_ORIGIN: &str = "VEST_DERIVATION_ORIGIN";
const ENV_HOST: &str = "VEST_HOST";

/// Port of the local replica started by `dfx start`.
const LOCAL_REPLICA_PORT: u16 = 4943;

const MAINNET_HOST: &str = "https://icp0.io";
const MAINNET_IDENTITY_PROVIDER: &str = "https://identity.ic0.app";

const LOCAL_DERIVATION_ORIGIN: &str = "http://localhost:3000";
const MAINNET_DERIVATION_ORIGIN: &str = "https://vestme.xyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Local,
    Ic,
}

impl Network {
    pub fn from_dfx_network(value: Option<&str>) -> Self {
        match value {
            Some("local") => Network::Local,
            _ => Network::Ic,
        }
    }

    pub fn is_local(self) -> bool {
        matches!(self, Network::Local)
    }
}

/// Where the frontend is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Runtime {
    Browser { user_agent: String },
    /// Server-side rendering or tests: there is no window to open a
    /// provider popup from.
    Headless,
}

impl Runtime {
    pub fn is_safari(&self) -> bool {
        match self {
            Runtime::Browser { user_agent } => is_safari_user_agent(user_agent),
            Runtime::Headless => false,
        }
    }

    pub fn has_window(&self) -> bool {
        matches!(self, Runtime::Browser { .. })
    }
}

/// Safari reports "Safari" in its user agent, but so do Chrome and the
/// Android stock browser. Only a "safari" not preceded by either counts.
pub fn is_safari_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    match ua.find("safari") {
        Some(pos) => {
            let prefix = &ua[..pos];
            !prefix.contains("chrome") && !prefix.contains("android")
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub network: Network,
    pub runtime: Runtime,
    pub identity_provider_canister: Option<Principal>,
    pub derivation_origin: Option<String>,
    pub host: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            network: Network::Ic,
            runtime: Runtime::Headless,
            identity_provider_canister: None,
            derivation_origin: None,
            host: None,
        }
    }
}

impl EnvironmentConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let network = Network::from_dfx_network(non_empty(ENV_NETWORK).as_deref());

        let runtime = match non_empty(ENV_USER_AGENT) {
            Some(user_agent) => Runtime::Browser { user_agent },
            None => Runtime::Headless,
        };

        let identity_provider_canister = non_empty(ENV_II_CANISTER)
            .map(|id| {
                principal::parse(&id)
                    .with_context(|| format!("Invalid {} value: {}", ENV_II_CANISTER, id))
            })
            .transpose()?;

        let config = Self {
            network,
            runtime,
            identity_provider_canister,
            derivation_origin: non_empty(ENV_DERIVATION_ORIGIN),
            host: non_empty(ENV_HOST),
        };
        debug!(
            network = ?config.network,
            has_window = config.runtime.has_window(),
            safari = config.runtime.is_safari(),
            "Environment resolved"
        );
        Ok(config)
    }

    /// Replica host the network agent talks to.
    pub fn host(&self) -> String {
        if let Some(ref host) = self.host {
            return host.clone();
        }
        match self.network {
            Network::Local => format!("http://localhost:{}", LOCAL_REPLICA_PORT),
            Network::Ic => MAINNET_HOST.to_string(),
        }
    }

    /// Identity provider URL for the login flow.
    ///
    /// Returns `None` when running locally without a window or without a
    /// known provider canister; the identity client then falls back to its
    /// own default.
    pub fn identity_provider(&self) -> Option<String> {
        match self.network {
            Network::Ic => Some(MAINNET_IDENTITY_PROVIDER.to_string()),
            Network::Local => {
                if !self.runtime.has_window() {
                    return None;
                }
                let canister = self.identity_provider_canister?;
                if self.runtime.is_safari() {
                    // Safari does not resolve localhost subdomains
                    Some(format!(
                        "http://localhost:{}/?canisterId={}",
                        LOCAL_REPLICA_PORT, canister
                    ))
                } else {
                    Some(format!("http://{}.localhost:{}", canister, LOCAL_REPLICA_PORT))
                }
            }
        }
    }

    pub fn derivation_origin(&self) -> String {
        if let Some(ref origin) = self.derivation_origin {
            return origin.clone();
        }
        match self.network {
            Network::Local => LOCAL_DERIVATION_ORIGIN.to_string(),
            Network::Ic => MAINNET_DERIVATION_ORIGIN.to_string(),
        }
    }

    /// Whether the agent must fetch the root key before verifying
    /// responses. Only ever true against a local replica.
    pub fn should_fetch_root_key(&self) -> bool {
        self.network.is_local()
    }
}
