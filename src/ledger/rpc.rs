// CLASSIFICATION: COMMUNITY
// Filename: rpc.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Ethereum JSON-RPC ledger client over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, warn};
use num_bigint::BigUint;
use num_traits::Num;
use serde::Deserialize;
use serde_json::{json, Value};
use ureq::{Agent, AgentBuilder};

use super::abi::{self, ParamType, Token};
use super::address::Address;
use super::client::{to_u64, LedgerClient, ProposalRecord};
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Deserialize)]
struct RpcReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
struct RpcFault {
    code: i64,
    message: String,
}

/// Reads the cooperative contract through a JSON-RPC node.
pub struct RpcLedger {
    agent: Agent,
    url: String,
    contract: Address,
    next_id: AtomicU64,
}

impl RpcLedger {
    pub fn new(url: impl Into<String>, contract: Address, timeout: Duration) -> Self {
        let agent = AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            url: url.into(),
            contract,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    fn request(&self, method: &str, params: Value) -> DashboardResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        debug!("rpc {} id={} -> {}", method, id, self.url);
        let resp = self
            .agent
            .post(&self.url)
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Transport(t) => {
                    warn!("rpc {} transport failure: {}", method, t);
                    DashboardError::LedgerUnreachable(format!("{}: {}", self.url, t))
                }
                ureq::Error::Status(code, _) => {
                    DashboardError::call_failure(method, format!("http status {code}"))
                }
            })?;
        let reply: RpcReply = resp
            .into_json()
            .map_err(|e| DashboardError::call_failure(method, format!("bad json-rpc body: {e}")))?;
        if let Some(fault) = reply.error {
            return Err(DashboardError::call_failure(
                method,
                format!("rpc error {}: {}", fault.code, fault.message),
            ));
        }
        reply
            .result
            .ok_or_else(|| DashboardError::call_failure(method, "reply has no result"))
    }

    /// `eth_call` against the contract, returning decoded output tokens.
    fn call(
        &self,
        signature: &str,
        args: &[Token],
        outputs: &[ParamType],
    ) -> DashboardResult<Vec<Token>> {
        let data = abi::encode_call(signature, args)
            .map_err(|e| DashboardError::call_failure(signature, e))?;
        let params = json!([
            {
                "to": format!("0x{}", hex::encode(self.contract.as_bytes())),
                "data": format!("0x{}", hex::encode(data)),
            },
            "latest"
        ]);
        let result = self.request("eth_call", params)?;
        let raw = hex_bytes(signature, &result)?;
        abi::decode(outputs, &raw).map_err(|e| DashboardError::call_failure(signature, e))
    }

    fn call_single(&self, signature: &str, output: ParamType) -> DashboardResult<Token> {
        self.call(signature, &[], &[output])?
            .pop()
            .ok_or_else(|| DashboardError::call_failure(signature, "empty return"))
    }

    fn call_u64(&self, signature: &str) -> DashboardResult<u64> {
        let value = self
            .call_single(signature, ParamType::Uint)?
            .into_uint()
            .map_err(|e| DashboardError::call_failure(signature, e))?;
        to_u64(signature, "result", value)
    }
}

impl LedgerClient for RpcLedger {
    fn proposal_count(&self) -> DashboardResult<u64> {
        self.call_u64("proposalCount()")
    }

    fn proposal(&self, index: u64) -> DashboardResult<ProposalRecord> {
        let tokens = self.call(
            "proposals(uint256)",
            &[Token::Uint(index.into())],
            &ProposalRecord::abi_types(),
        )?;
        ProposalRecord::from_tokens(tokens)
    }

    fn minimum_quorum(&self) -> DashboardResult<u64> {
        self.call_u64("minimumQuorum()")
    }

    fn current_block(&self) -> DashboardResult<u64> {
        let result = self.request("eth_blockNumber", json!([]))?;
        to_u64("eth_blockNumber", "block", quantity("eth_blockNumber", &result)?)
    }

    fn balance(&self, address: &Address) -> DashboardResult<BigUint> {
        let params = json!([format!("0x{}", hex::encode(address.as_bytes())), "latest"]);
        let result = self.request("eth_getBalance", params)?;
        quantity("eth_getBalance", &result)
    }

    fn steward(&self) -> DashboardResult<Address> {
        self.call_single("steward()", ParamType::Address)?
            .into_address()
            .map_err(|e| DashboardError::call_failure("steward()", e))
    }
}

/// `0x`-prefixed hex data string.
fn hex_bytes(call: &str, value: &Value) -> DashboardResult<Vec<u8>> {
    let s = value
        .as_str()
        .ok_or_else(|| DashboardError::call_failure(call, "result is not a string"))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| DashboardError::call_failure(call, e))
}

/// `0x`-prefixed hex quantity, no fixed width.
fn quantity(call: &str, value: &Value) -> DashboardResult<BigUint> {
    let s = value
        .as_str()
        .ok_or_else(|| DashboardError::call_failure(call, "quantity is not a string"))?;
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| DashboardError::call_failure(call, format!("quantity {s} lacks 0x")))?;
    if digits.is_empty() {
        return Err(DashboardError::call_failure(call, "empty quantity"));
    }
    BigUint::from_str_radix(digits, 16).map_err(|e| DashboardError::call_failure(call, e))
}
