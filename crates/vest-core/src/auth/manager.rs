//! Session lifecycle: `init`, `login`, `logout`.
//!
//! The manager owns the `SessionStore` and is the only writer to it. All
//! operations serialize through one async lock, so a logout triggered while
//! a login is still waiting on the provider runs after it.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use super::client::{
    Agent, AgentFactory, AgentOptions, AuthClientOptions, Identity, IdentityClient,
    IdentityClientFactory, LoginOptions, MAX_TIME_TO_LIVE,
};
use super::session::{Session, SessionSnapshot};
use super::store::SessionStore;
use super::AuthError;
use crate::config::EnvironmentConfig;

/// What a session operation does with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the error to the caller.
    Propagate,
    /// Log the error and report success; the session keeps whatever state
    /// the operation reached.
    LogAndSwallow,
}

impl ErrorPolicy {
    fn apply(self, operation: &'static str, result: Result<(), AuthError>) -> Result<(), AuthError> {
        match (self, result) {
            (_, Ok(())) => Ok(()),
            (ErrorPolicy::Propagate, Err(e)) => Err(e),
            (ErrorPolicy::LogAndSwallow, Err(e)) => {
                error!(operation, error = %e, "Session operation failed");
                Ok(())
            }
        }
    }
}

/// Error policy per operation.
///
/// The defaults are deliberately inconsistent: `init` propagates while
/// `login` and `logout` log and swallow. Whether `init` should swallow too
/// is an open product question, so both stay configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicies {
    pub init: ErrorPolicy,
    pub login: ErrorPolicy,
    pub logout: ErrorPolicy,
}

impl Default for ErrorPolicies {
    fn default() -> Self {
        Self {
            init: ErrorPolicy::Propagate,
            login: ErrorPolicy::LogAndSwallow,
            logout: ErrorPolicy::LogAndSwallow,
        }
    }
}

pub struct SessionManager {
    store: SessionStore,
    config: EnvironmentConfig,
    clients: Arc<dyn IdentityClientFactory>,
    agents: Option<Arc<dyn AgentFactory>>,
    policies: ErrorPolicies,
    op_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(config: EnvironmentConfig, clients: Arc<dyn IdentityClientFactory>) -> Self {
        Self {
            store: SessionStore::new(),
            config,
            clients,
            agents: None,
            policies: ErrorPolicies::default(),
            op_lock: Mutex::new(()),
        }
    }

    /// Derive a network agent on `init` (and on `refresh_agent`).
    pub fn with_agent_factory(mut self, agents: Arc<dyn AgentFactory>) -> Self {
        self.agents = Some(agents);
        self
    }

    pub fn with_policies(mut self, policies: ErrorPolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn session(&self) -> Session {
        self.store.get()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.store.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_authenticated()
    }

    pub fn client_options(&self) -> AuthClientOptions {
        AuthClientOptions::default()
    }

    pub fn login_options(&self) -> LoginOptions {
        LoginOptions {
            identity_provider: self.config.identity_provider(),
            derivation_origin: Some(self.config.derivation_origin()),
            max_time_to_live: MAX_TIME_TO_LIVE,
        }
    }

    /// Create a client, restore any existing session and derive the agent.
    pub async fn init(&self) -> Result<(), AuthError> {
        let _guard = self.op_lock.lock().await;
        let result = self.init_session().await;
        self.policies.init.apply("init", result)
    }

    /// Run the provider login flow.
    pub async fn login(&self) -> Result<(), AuthError> {
        let _guard = self.op_lock.lock().await;
        let result = self.login_session().await;
        self.policies.login.apply("login", result)
    }

    /// Log out and leave a fresh client ready for the next `login`.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.op_lock.lock().await;
        let result = self.logout_session().await;
        self.policies.logout.apply("logout", result)
    }

    /// Re-derive the agent for the current identity. The agent built by
    /// `init` stays bound to the identity at that time, so call this after
    /// a login when signed calls are needed.
    pub async fn refresh_agent(&self) -> Result<(), AuthError> {
        let _guard = self.op_lock.lock().await;
        let identity = self.store.get().identity;
        let agent = self.derive_agent(identity).await?;
        self.store.update(|s| s.agent = agent);
        Ok(())
    }

    async fn create_client(&self) -> Result<Arc<dyn IdentityClient>, AuthError> {
        self.clients
            .create(&self.client_options())
            .await
            .map_err(AuthError::CreateClient)
    }

    async fn init_session(&self) -> Result<(), AuthError> {
        let client = self.create_client().await?;
        let is_authenticated = client
            .is_authenticated()
            .await
            .map_err(AuthError::SessionQuery)?;
        let identity = is_authenticated.then(|| client.identity());
        debug!(is_authenticated, "Identity client created");

        self.store.set(Session {
            client: Some(client),
            identity: identity.clone(),
            agent: None,
        });

        let agent = self.derive_agent(identity).await?;
        self.store.update(|s| s.agent = agent);
        Ok(())
    }

    async fn login_session(&self) -> Result<(), AuthError> {
        let client = self.store.get().client.ok_or(AuthError::NotInitialized)?;
        let options = self.login_options();
        debug!(provider = ?options.identity_provider, "Starting login flow");

        client.login(&options).await.map_err(AuthError::Login)?;

        let identity = client.identity();
        info!(principal = %identity.principal, "Login successful");
        self.store.update(|s| s.identity = Some(identity));
        Ok(())
    }

    async fn logout_session(&self) -> Result<(), AuthError> {
        let client = match self.store.get().client {
            Some(client) => client,
            None => self.create_client().await?,
        };

        let logout_result = client.logout().await.map_err(AuthError::Logout);
        if let Err(ref e) = logout_result {
            warn!(error = %e, "Provider logout failed, clearing local session anyway");
        }

        // Local state is cleared even when the provider call failed
        self.store.set(Session::default());

        let fresh = self.create_client().await?;
        self.store.set(Session::with_client(fresh));

        if logout_result.is_ok() {
            info!("Logged out");
        }
        logout_result
    }

    async fn derive_agent(
        &self,
        identity: Option<Identity>,
    ) -> Result<Option<Arc<dyn Agent>>, AuthError> {
        let Some(ref agents) = self.agents else {
            return Ok(None);
        };

        let options = AgentOptions {
            identity,
            host: self.config.host(),
        };
        debug!(host = %options.host, "Creating network agent");
        let agent = agents.create(options).await.map_err(AuthError::CreateAgent)?;

        if self.config.should_fetch_root_key() {
            agent.fetch_root_key().await.map_err(AuthError::FetchRootKey)?;
        }
        Ok(Some(agent))
    }
}
