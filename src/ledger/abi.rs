// CLASSIFICATION: COMMUNITY
// Filename: abi.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Minimal Solidity ABI codec covering the types the cooperative contract uses:
//! `uint256`, `address`, `bool`, `string` and tuples of them.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use sha3::{Digest, Keccak256};
use thiserror::Error;

use super::address::Address;

const WORD: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("return data truncated: need {need} bytes at offset {at}, have {have}")]
    Truncated { at: usize, need: usize, have: usize },
    #[error("offset or length word does not fit in memory")]
    OffsetOverflow,
    #[error("address word has non-zero padding")]
    AddressPadding,
    #[error("bool word is neither 0 nor 1")]
    BadBool,
    #[error("string is not valid utf-8")]
    InvalidUtf8,
    #[error("integer does not fit in 256 bits")]
    UintOverflow,
    #[error("expected {expected}, decoded {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

pub type AbiResult<T> = Result<T, AbiError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Uint,
    Address,
    Bool,
    String,
    Tuple(Vec<ParamType>),
}

impl ParamType {
    fn is_dynamic(&self) -> bool {
        match self {
            ParamType::String => true,
            ParamType::Tuple(items) => items.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    fn head_size(&self) -> usize {
        match self {
            ParamType::Tuple(items) if !self.is_dynamic() => {
                items.iter().map(ParamType::head_size).sum()
            }
            _ => WORD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(BigUint),
    Address(Address),
    Bool(bool),
    String(String),
    Tuple(Vec<Token>),
}

impl Token {
    fn kind(&self) -> &'static str {
        match self {
            Token::Uint(_) => "uint256",
            Token::Address(_) => "address",
            Token::Bool(_) => "bool",
            Token::String(_) => "string",
            Token::Tuple(_) => "tuple",
        }
    }

    fn is_dynamic(&self) -> bool {
        match self {
            Token::String(_) => true,
            Token::Tuple(items) => items.iter().any(Token::is_dynamic),
            _ => false,
        }
    }

    fn head_size(&self) -> usize {
        match self {
            Token::Tuple(items) if !self.is_dynamic() => items.iter().map(Token::head_size).sum(),
            _ => WORD,
        }
    }

    pub fn into_uint(self) -> AbiResult<BigUint> {
        match self {
            Token::Uint(v) => Ok(v),
            other => Err(mismatch("uint256", &other)),
        }
    }

    pub fn into_address(self) -> AbiResult<Address> {
        match self {
            Token::Address(a) => Ok(a),
            other => Err(mismatch("address", &other)),
        }
    }

    pub fn into_bool(self) -> AbiResult<bool> {
        match self {
            Token::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }

    pub fn into_string(self) -> AbiResult<String> {
        match self {
            Token::String(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

fn mismatch(expected: &'static str, found: &Token) -> AbiError {
    AbiError::Mismatch {
        expected,
        found: found.kind(),
    }
}

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Selector followed by the encoded arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> AbiResult<Vec<u8>> {
    let mut out = selector(signature).to_vec();
    out.extend(encode(args)?);
    Ok(out)
}

/// Encode `tokens` as the members of one tuple.
pub fn encode(tokens: &[Token]) -> AbiResult<Vec<u8>> {
    let head_len: usize = tokens.iter().map(Token::head_size).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend(encode_dynamic(token)?);
        } else {
            head.extend(encode_static(token)?);
        }
    }
    head.extend(tail);
    Ok(head)
}

fn encode_static(token: &Token) -> AbiResult<Vec<u8>> {
    match token {
        Token::Uint(v) => Ok(uint_word(v)?.to_vec()),
        Token::Address(a) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(a.as_bytes());
            Ok(word.to_vec())
        }
        Token::Bool(b) => Ok(usize_word(usize::from(*b)).to_vec()),
        Token::Tuple(items) => encode(items),
        Token::String(_) => encode_dynamic(token),
    }
}

fn encode_dynamic(token: &Token) -> AbiResult<Vec<u8>> {
    match token {
        Token::String(s) => {
            let bytes = s.as_bytes();
            let mut out = usize_word(bytes.len()).to_vec();
            out.extend_from_slice(bytes);
            let padded = bytes.len().div_ceil(WORD) * WORD;
            out.resize(WORD + padded, 0);
            Ok(out)
        }
        Token::Tuple(items) => encode(items),
        other => encode_static(other),
    }
}

fn uint_word(v: &BigUint) -> AbiResult<[u8; WORD]> {
    let bytes = v.to_bytes_be();
    if v.is_zero() {
        return Ok([0u8; WORD]);
    }
    if bytes.len() > WORD {
        return Err(AbiError::UintOverflow);
    }
    let mut word = [0u8; WORD];
    word[WORD - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

fn usize_word(v: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(v as u64).to_be_bytes());
    word
}

/// Decode `data` as a tuple whose members have the given types.
pub fn decode(types: &[ParamType], data: &[u8]) -> AbiResult<Vec<Token>> {
    decode_tuple(types, data, 0)
}

fn decode_tuple(types: &[ParamType], data: &[u8], base: usize) -> AbiResult<Vec<Token>> {
    let mut cursor = base;
    let mut out = Vec::with_capacity(types.len());
    for ty in types {
        if ty.is_dynamic() {
            let rel = read_usize(data, cursor)?;
            let at = base.checked_add(rel).ok_or(AbiError::OffsetOverflow)?;
            out.push(decode_dynamic(ty, data, at)?);
            cursor += WORD;
        } else {
            out.push(decode_static(ty, data, cursor)?);
            cursor += ty.head_size();
        }
    }
    Ok(out)
}

fn decode_static(ty: &ParamType, data: &[u8], at: usize) -> AbiResult<Token> {
    match ty {
        ParamType::Uint => Ok(Token::Uint(BigUint::from_bytes_be(word(data, at)?))),
        ParamType::Address => {
            let w = word(data, at)?;
            if w[..12].iter().any(|b| *b != 0) {
                return Err(AbiError::AddressPadding);
            }
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&w[12..]);
            Ok(Token::Address(Address(bytes)))
        }
        ParamType::Bool => {
            let w = word(data, at)?;
            if w[..WORD - 1].iter().any(|b| *b != 0) || w[WORD - 1] > 1 {
                return Err(AbiError::BadBool);
            }
            Ok(Token::Bool(w[WORD - 1] == 1))
        }
        ParamType::Tuple(items) => Ok(Token::Tuple(decode_tuple(items, data, at)?)),
        ParamType::String => decode_dynamic(ty, data, at),
    }
}

fn decode_dynamic(ty: &ParamType, data: &[u8], at: usize) -> AbiResult<Token> {
    match ty {
        ParamType::String => {
            let len = read_usize(data, at)?;
            let start = at + WORD;
            let bytes = slice(data, start, len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| AbiError::InvalidUtf8)?;
            Ok(Token::String(s.to_owned()))
        }
        ParamType::Tuple(items) => Ok(Token::Tuple(decode_tuple(items, data, at)?)),
        other => decode_static(other, data, at),
    }
}

fn slice(data: &[u8], at: usize, len: usize) -> AbiResult<&[u8]> {
    let end = at.checked_add(len).ok_or(AbiError::OffsetOverflow)?;
    data.get(at..end).ok_or(AbiError::Truncated {
        at,
        need: len,
        have: data.len().saturating_sub(at),
    })
}

fn word(data: &[u8], at: usize) -> AbiResult<&[u8]> {
    slice(data, at, WORD)
}

fn read_usize(data: &[u8], at: usize) -> AbiResult<usize> {
    BigUint::from_bytes_be(word(data, at)?)
        .to_usize()
        .ok_or(AbiError::OffsetOverflow)
}
