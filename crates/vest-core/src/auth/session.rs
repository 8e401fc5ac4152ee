use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::client::{Agent, Identity, IdentityClient};
use crate::principal::Principal;

/// The process-wide authentication state.
///
/// `is_authenticated` is derived from the identity, so an authenticated
/// session without an identity cannot be represented.
#[derive(Clone, Default)]
pub struct Session {
    pub client: Option<Arc<dyn IdentityClient>>,
    pub identity: Option<Identity>,
    pub agent: Option<Arc<dyn Agent>>,
}

impl Session {
    /// An unauthenticated session holding `client`.
    pub fn with_client(client: Arc<dyn IdentityClient>) -> Self {
        Self {
            client: Some(client),
            identity: None,
            agent: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn principal(&self) -> Option<Principal> {
        self.identity.as_ref().map(|i| i.principal)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: self.is_authenticated(),
            principal: self.principal().map(|p| p.to_text()),
            expires_at: self
                .identity
                .as_ref()
                .and_then(|i| i.expires_at)
                .map(|exp| exp.to_rfc3339()),
            has_client: self.client.is_some(),
            has_agent: self.agent.is_some(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_client", &self.client.is_some())
            .field("is_authenticated", &self.is_authenticated())
            .field("identity", &self.identity)
            .field("has_agent", &self.agent.is_some())
            .finish()
    }
}

/// Serializable view of the session handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub principal: Option<String>,
    pub expires_at: Option<String>,
    pub has_client: bool,
    pub has_agent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_default_session_is_empty() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.client.is_none());
        assert!(session.agent.is_none());
        assert_eq!(session.principal(), None);
    }

    #[test]
    fn test_with_client_is_unauthenticated() {
        struct NoopClient;

        #[async_trait::async_trait]
        impl IdentityClient for NoopClient {
            async fn is_authenticated(&self) -> Result<bool, crate::auth::IdentityError> {
                Ok(false)
            }

            fn identity(&self) -> Identity {
                Identity::new(Principal::anonymous())
            }

            async fn login(
                &self,
                _options: &crate::auth::LoginOptions,
            ) -> Result<(), crate::auth::IdentityError> {
                Ok(())
            }

            async fn logout(&self) -> Result<(), crate::auth::IdentityError> {
                Ok(())
            }
        }

        let session = Session::with_client(Arc::new(NoopClient));
        assert!(session.client.is_some());
        assert!(!session.is_authenticated());
        assert!(session.agent.is_none());
        assert!(!session.snapshot().has_agent);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let principal = Principal::from_text("rdmx6-jaaaa-aaaaa-aaadq-cai").unwrap();
        let expiry = Utc.with_ymd_and_hms(2026, 11, 15, 12, 0, 0).unwrap();
        let session = Session {
            client: None,
            identity: Some(Identity::with_expiry(principal, expiry)),
            agent: None,
        };

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["isAuthenticated"], true);
        assert_eq!(json["principal"], "rdmx6-jaaaa-aaaaa-aaadq-cai");
        assert_eq!(json["expiresAt"], "2026-11-15T12:00:00+00:00");
        assert_eq!(json["hasClient"], false);
    }
}
