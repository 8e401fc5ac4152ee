//! Token ledger access for the allowance gate.
//!
//! This module provides:
//! - `LedgerClient`: capability contract of an ICRC-2 ledger
//! - ICRC-2 records (`Account`, `AllowanceArgs`, `ApproveArgs`, ...)
//! - The allowance gate (`check_allowance`, `get_approval`) and its
//!   detailed `AllowanceDecision`

pub mod client;
pub mod error;
pub mod gate;
pub mod types;

pub use client::LedgerClient;
pub use error::LedgerError;
pub use gate::{
    check_allowance, decide_allowance, get_approval, request_approval, AllowanceDecision,
    ApprovalPath, APPROVAL_AMOUNT,
};
pub use types::{
    unconstrained_approve, Account, Allowance, AllowanceArgs, ApproveArgs, ApproveError,
    ApproveResult, Subaccount,
};
