//! Just enough of the Solidity ABI to talk to the FlightSurety contracts.

use crate::domain::model::Address;
use crate::utils::error::{DappError, Result};
use sha3::{Digest, Keccak256};

const WORD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    /// `uint8` through `uint256`; values used here always fit in 128 bits.
    Uint(u128),
    String(String),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Token::String(_))
    }
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of keccak256 over the canonical signature, e.g. `fund()`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn encode_call(signature: &str, tokens: &[Token]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend(encode_tokens(tokens));
    data
}

/// Head/tail encoding: static values inline, dynamic values as an offset into the tail.
pub fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend(uint_word((head_len + tail.len()) as u128));
            tail.extend(encode_dynamic(token));
        } else {
            head.extend(encode_static(token));
        }
    }

    head.extend(tail);
    head
}

fn encode_static(token: &Token) -> [u8; WORD] {
    match token {
        Token::Address(address) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(address.as_bytes());
            word
        }
        Token::Uint(value) => uint_word(*value),
        Token::String(_) => unreachable!("string is a dynamic type"),
    }
}

fn encode_dynamic(token: &Token) -> Vec<u8> {
    match token {
        Token::String(value) => {
            let bytes = value.as_bytes();
            let padded_len = bytes.len().div_ceil(WORD) * WORD;
            let mut out = Vec::with_capacity(WORD + padded_len);
            out.extend(uint_word(bytes.len() as u128));
            out.extend(bytes);
            out.resize(WORD + padded_len, 0);
            out
        }
        _ => unreachable!("only string is dynamic"),
    }
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn decode_bool(data: &[u8]) -> Result<bool> {
    let word = first_word(data)?;
    Ok(word.iter().any(|b| *b != 0))
}

fn first_word(data: &[u8]) -> Result<&[u8]> {
    if data.is_empty() {
        return Err(DappError::AbiError {
            message: "empty return data (is the contract deployed at this address?)".to_string(),
        });
    }
    data.get(..WORD).ok_or_else(|| DappError::AbiError {
        message: format!("expected at least {} bytes, got {}", WORD, data.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_value(word: &[u8]) -> u128 {
        assert!(word[..16].iter().all(|b| *b == 0));
        let mut low = [0u8; 16];
        low.copy_from_slice(&word[16..WORD]);
        u128::from_be_bytes(low)
    }

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
    }

    #[test]
    fn test_encode_static_arguments() {
        let mut bytes = [0u8; 20];
        bytes[19] = 0x42;
        let data = encode_tokens(&[Token::Address(Address(bytes)), Token::Uint(7)]);

        assert_eq!(data.len(), 2 * WORD);
        assert_eq!(data[31], 0x42);
        assert!(data[..12].iter().all(|b| *b == 0));
        assert_eq!(data[63], 7);
    }

    #[test]
    fn test_encode_string_argument() {
        // registerFlight("BC001", 5)
        let data = encode_tokens(&[Token::String("BC001".to_string()), Token::Uint(5)]);

        assert_eq!(data.len(), 4 * WORD);
        assert_eq!(word_value(&data[..WORD]), 64);
        assert_eq!(word_value(&data[WORD..2 * WORD]), 5);
        assert_eq!(word_value(&data[2 * WORD..3 * WORD]), 5);
        assert_eq!(&data[3 * WORD..3 * WORD + 5], b"BC001");
        assert!(data[3 * WORD + 5..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_two_strings_offsets() {
        let long = "x".repeat(40);
        let data = encode_tokens(&[Token::String(long), Token::String(String::new())]);

        // head 2 words, first tail = len + 2 words of data
        assert_eq!(word_value(&data[..WORD]), 64);
        assert_eq!(word_value(&data[WORD..2 * WORD]), 64 + 3 * 32);
        assert_eq!(data.len(), 2 * WORD + 3 * WORD + WORD);
    }

    #[test]
    fn test_encode_call_prefixes_selector() {
        let data = encode_call("fund()", &[]);
        assert_eq!(data, selector("fund()").to_vec());
    }

    #[test]
    fn test_decode_bool() {
        let mut word = [0u8; 32];
        assert!(!decode_bool(&word).unwrap());
        word[31] = 1;
        assert!(decode_bool(&word).unwrap());
        assert!(decode_bool(&[]).is_err());
        assert!(decode_bool(&[1, 2, 3]).is_err());
    }
}
