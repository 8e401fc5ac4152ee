use async_trait::async_trait;

use super::types::{Allowance, AllowanceArgs, ApproveArgs, ApproveResult};
use super::LedgerError;

/// A token ledger implementing the two-phase allowance standard (ICRC-2).
///
/// `Err` is reserved for calls that did not complete (rejects, transport
/// failures, undecodable replies). A completed approve call that the ledger
/// declined comes back as `Ok(Err(ApproveError))`.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn icrc2_allowance(&self, args: AllowanceArgs) -> Result<Allowance, LedgerError>;

    async fn icrc2_approve(&self, args: ApproveArgs) -> Result<ApproveResult, LedgerError>;
}
