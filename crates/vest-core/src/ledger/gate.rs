//! Allowance gate: make sure a backend spender may pull tokens from the user.
//!
//! The check runs `UNCHECKED -> query -> APPROVED | NEEDS_APPROVAL`, and
//! `NEEDS_APPROVAL -> approve -> APPROVED | DENIED`. Any positive allowance
//! counts as approved, whatever the size of the transfer that follows.
//!
//! `decide_allowance` and `request_approval` keep the reason for a negative
//! outcome; `check_allowance` and `get_approval` collapse it to a `bool` and
//! fail closed.

use candid::Nat;
use tracing::{debug, error, info, warn};

use super::client::LedgerClient;
use super::types::{unconstrained_approve, Account, AllowanceArgs, ApproveError};
use super::LedgerError;
use crate::principal::{self, Principal};

/// Standing approval requested when none exists: 10^19 base units.
/// The spender keeps this authority until it is spent or revoked.
pub const APPROVAL_AMOUNT: u128 = 10_000_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalPath {
    /// The ledger already held a positive allowance.
    ExistingAllowance(Nat),
    /// A new approval was recorded at `block_index`.
    NewApproval { block_index: Nat },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AllowanceDecision {
    Approved(ApprovalPath),
    /// The ledger processed the approve call and declined it.
    Denied(ApproveError),
    /// The allowance lookup did not complete.
    QueryFailed(LedgerError),
    /// The approve call did not complete.
    ApproveFailed(LedgerError),
}

impl AllowanceDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, AllowanceDecision::Approved(_))
    }
}

fn spender_account(spender_id: &str) -> Result<Account, LedgerError> {
    let owner = principal::parse(spender_id)
        .map_err(|e| LedgerError::invalid_spender(spender_id, e))?;
    Ok(Account {
        owner,
        subaccount: None,
    })
}

/// Query the allowance of `spender_id` over `owner`'s default account and
/// request a new approval when it is zero.
pub async fn decide_allowance<L>(ledger: &L, spender_id: &str, owner: Principal) -> AllowanceDecision
where
    L: LedgerClient + ?Sized,
{
    let spender = match spender_account(spender_id) {
        Ok(spender) => spender,
        Err(e) => {
            error!(spender = spender_id, error = %e, "Unexpected error during allowance check");
            return AllowanceDecision::QueryFailed(e);
        }
    };

    let args = AllowanceArgs {
        account: Account::from(owner),
        spender,
    };

    match ledger.icrc2_allowance(args).await {
        Ok(allowance) if allowance.allowance > Nat::from(0u8) => {
            debug!(owner = %owner, allowance = %allowance.allowance, "Existing allowance found");
            AllowanceDecision::Approved(ApprovalPath::ExistingAllowance(allowance.allowance))
        }
        Ok(_) => {
            debug!(owner = %owner, spender = spender_id, "No allowance, requesting approval");
            request_approval(ledger, spender_id).await
        }
        Err(e) => {
            error!(owner = %owner, error = %e, "Unexpected error during allowance check");
            AllowanceDecision::QueryFailed(e)
        }
    }
}

/// Ask the ledger to approve `APPROVAL_AMOUNT` for `spender_id`.
pub async fn request_approval<L>(ledger: &L, spender_id: &str) -> AllowanceDecision
where
    L: LedgerClient + ?Sized,
{
    let spender = match spender_account(spender_id) {
        Ok(spender) => spender,
        Err(e) => {
            error!(spender = spender_id, error = %e, "Unexpected error during approval");
            return AllowanceDecision::ApproveFailed(e);
        }
    };

    let args = unconstrained_approve(spender, Nat::from(APPROVAL_AMOUNT));

    match ledger.icrc2_approve(args).await {
        Ok(Ok(block_index)) => {
            info!(spender = spender_id, block_index = %block_index, "Approval granted");
            AllowanceDecision::Approved(ApprovalPath::NewApproval { block_index })
        }
        Ok(Err(reason)) => {
            warn!(spender = spender_id, reason = ?reason, "Approval declined by ledger");
            AllowanceDecision::Denied(reason)
        }
        Err(e) => {
            error!(spender = spender_id, error = %e, "Unexpected error during approval");
            AllowanceDecision::ApproveFailed(e)
        }
    }
}

/// True when `spender_id` holds, or was just granted, an allowance over
/// `owner`'s account. Errors are logged and yield `false`.
pub async fn check_allowance<L>(ledger: &L, spender_id: &str, owner: Principal) -> bool
where
    L: LedgerClient + ?Sized,
{
    decide_allowance(ledger, spender_id, owner).await.is_approved()
}

/// True when the ledger accepted a new approval for `spender_id`.
pub async fn get_approval<L>(ledger: &L, spender_id: &str) -> bool
where
    L: LedgerClient + ?Sized,
{
    request_approval(ledger, spender_id).await.is_approved()
}
