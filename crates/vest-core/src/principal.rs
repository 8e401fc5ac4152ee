//! Principal identifiers shared by the identity provider and the ledger.
//!
//! The type itself comes from `ic_principal`, the same one `candid` and the
//! ICRC ledger records use. This module adds the few helpers the session and
//! allowance code need on top of it.

pub use ic_principal::{Principal, PrincipalError};

/// Parse the dashed textual form, ignoring surrounding whitespace as found
/// in environment files.
pub fn parse(text: &str) -> Result<Principal, PrincipalError> {
    Principal::from_text(text.trim())
}

pub fn is_anonymous(principal: &Principal) -> bool {
    *principal == Principal::anonymous()
}
