// CLASSIFICATION: COMMUNITY
// Filename: client.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Ledger client interface and the typed proposal record it returns.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use super::abi::{ParamType, Token};
use super::address::Address;
use crate::error::{DashboardError, DashboardResult};

/// One proposal as stored on the ledger, in the contract's field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRecord {
    pub purpose: String,
    pub purpose_toneform: String,
    pub recipient: Address,
    /// Minor units.
    pub amount: BigUint,
    pub approvals: u64,
    pub creation_block: u64,
    pub expiration_block: u64,
    pub executed: bool,
}

impl ProposalRecord {
    /// Output types of the contract's `proposals(uint256)` getter.
    pub fn abi_types() -> Vec<ParamType> {
        vec![
            ParamType::String,
            ParamType::String,
            ParamType::Address,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Uint,
            ParamType::Bool,
        ]
    }

    /// Validate decoded getter output into a typed record.
    pub fn from_tokens(tokens: Vec<Token>) -> DashboardResult<Self> {
        const CALL: &str = "proposals";
        let fail = |e: super::abi::AbiError| DashboardError::call_failure(CALL, e);
        if tokens.len() != 8 {
            return Err(DashboardError::call_failure(
                CALL,
                format!("expected 8 fields, got {}", tokens.len()),
            ));
        }
        let mut it = tokens.into_iter();
        let mut next = || {
            it.next()
                .ok_or_else(|| DashboardError::call_failure(CALL, "short tuple"))
        };
        let purpose = next()?.into_string().map_err(fail)?;
        let purpose_toneform = next()?.into_string().map_err(fail)?;
        let recipient = next()?.into_address().map_err(fail)?;
        let amount = next()?.into_uint().map_err(fail)?;
        let approvals = to_u64(CALL, "approvals", next()?.into_uint().map_err(fail)?)?;
        let creation_block = to_u64(CALL, "creationBlock", next()?.into_uint().map_err(fail)?)?;
        let expiration_block =
            to_u64(CALL, "expirationBlock", next()?.into_uint().map_err(fail)?)?;
        let executed = next()?.into_bool().map_err(fail)?;
        Ok(Self {
            purpose,
            purpose_toneform,
            recipient,
            amount,
            approvals,
            creation_block,
            expiration_block,
            executed,
        })
    }

    pub fn to_tokens(&self) -> Vec<Token> {
        vec![
            Token::String(self.purpose.clone()),
            Token::String(self.purpose_toneform.clone()),
            Token::Address(self.recipient),
            Token::Uint(self.amount.clone()),
            Token::Uint(self.approvals.into()),
            Token::Uint(self.creation_block.into()),
            Token::Uint(self.expiration_block.into()),
            Token::Bool(self.executed),
        ]
    }
}

/// Counters the dashboard treats as plain integers must fit in `u64`.
pub fn to_u64(call: &str, field: &str, value: BigUint) -> DashboardResult<u64> {
    value
        .to_u64()
        .ok_or_else(|| DashboardError::call_failure(call, format!("{field} {value} exceeds u64")))
}

/// Synchronous read interface to the cooperative contract.
///
/// Every method is one round-trip; implementations must not cache.
pub trait LedgerClient: Send + Sync {
    fn proposal_count(&self) -> DashboardResult<u64>;
    fn proposal(&self, index: u64) -> DashboardResult<ProposalRecord>;
    fn minimum_quorum(&self) -> DashboardResult<u64>;
    fn current_block(&self) -> DashboardResult<u64>;
    /// Balance of `address` in minor units.
    fn balance(&self, address: &Address) -> DashboardResult<BigUint>;
    fn steward(&self) -> DashboardResult<Address>;
}

impl<L: LedgerClient + ?Sized> LedgerClient for std::sync::Arc<L> {
    fn proposal_count(&self) -> DashboardResult<u64> {
        (**self).proposal_count()
    }
    fn proposal(&self, index: u64) -> DashboardResult<ProposalRecord> {
        (**self).proposal(index)
    }
    fn minimum_quorum(&self) -> DashboardResult<u64> {
        (**self).minimum_quorum()
    }
    fn current_block(&self) -> DashboardResult<u64> {
        (**self).current_block()
    }
    fn balance(&self, address: &Address) -> DashboardResult<BigUint> {
        (**self).balance(address)
    }
    fn steward(&self) -> DashboardResult<Address> {
        (**self).steward()
    }
}
