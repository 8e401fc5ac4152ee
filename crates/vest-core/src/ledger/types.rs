//! ICRC-2 records exchanged with the ledger.
//!
//! The records are the ones published in `icrc-ledger-types`; amounts are
//! `candid::Nat`.

use candid::Nat;

pub use icrc_ledger_types::icrc1::account::{Account, Subaccount};
pub use icrc_ledger_types::icrc2::allowance::{Allowance, AllowanceArgs};
pub use icrc_ledger_types::icrc2::approve::{ApproveArgs, ApproveError};

/// Outcome of an approve call: the block index on success.
pub type ApproveResult = Result<Nat, ApproveError>;

/// Approval of `amount` for `spender` from the caller's default account,
/// with no fee, memo, expiry or deduplication constraints.
pub fn unconstrained_approve(spender: Account, amount: Nat) -> ApproveArgs {
    ApproveArgs {
        from_subaccount: None,
        spender,
        amount,
        expected_allowance: None,
        expires_at: None,
        fee: None,
        memo: None,
        created_at_time: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Principal;

    #[test]
    fn test_unconstrained_approve_args() {
        let spender = Account::from(Principal::management_canister());
        let args = unconstrained_approve(spender.clone(), Nat::from(42u8));
        assert_eq!(args.amount, Nat::from(42u8));
        assert_eq!(args.spender, spender);
        assert!(args.fee.is_none());
        assert!(args.memo.is_none());
        assert!(args.expires_at.is_none());
        assert!(args.expected_allowance.is_none());
        assert!(args.from_subaccount.is_none());
        assert!(args.created_at_time.is_none());
    }

    #[test]
    fn test_account_from_principal_has_no_subaccount() {
        let account = Account::from(Principal::anonymous());
        assert_eq!(account.owner, Principal::anonymous());
        assert!(account.subaccount.is_none());
    }
}
