#![allow(dead_code)]

use flightsurety_dapp::core::abi::{self, Token};
use flightsurety_dapp::Address;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub const APP_ADDRESS: &str = "0x00000000000000000000000000000000000000aa";
pub const DATA_ADDRESS: &str = "0x00000000000000000000000000000000000000dd";

pub fn account(n: u8) -> Address {
    format!("0x{:040x}", n).parse().unwrap()
}

pub fn accounts(count: u8) -> Vec<String> {
    (0..count).map(|n| account(n).to_string()).collect()
}

pub fn bool_result(value: bool) -> String {
    format!("0x{:064x}", u8::from(value))
}

/// `"data":"0x…"` fragment for a call with the given arguments.
pub fn data_fragment(signature: &str, args: &[Token]) -> String {
    format!(
        "\"data\":\"0x{}\"",
        hex::encode(abi::encode_call(signature, args))
    )
}

pub fn rpc_ok(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "result": result})
}

pub fn rpc_err(code: i64, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "error": {"code": code, "message": message}})
}

pub fn mock_method<'a>(server: &'a MockServer, method: &str, response: Value) -> Mock<'a> {
    let fragment = format!("\"method\":\"{}\"", method);
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains(fragment.as_str());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(response);
    })
}

/// eth_call answered only when the call data matches exactly.
pub fn mock_call<'a>(
    server: &'a MockServer,
    signature: &str,
    args: &[Token],
    result: Value,
) -> Mock<'a> {
    let fragment = data_fragment(signature, args);
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("\"method\":\"eth_call\"")
            .body_contains(fragment.as_str());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(rpc_ok(result));
    })
}

/// Node with 11 accounts, an operational contract and the given registered airlines.
pub fn mock_node(server: &MockServer, registered: &[u8]) {
    mock_method(server, "eth_accounts", rpc_ok(json!(accounts(11))));
    mock_call(server, "isOperational()", &[], json!(bool_result(true)));
    for n in 1..=5u8 {
        mock_call(
            server,
            "isAirlineRegistered(address)",
            &[Token::Address(account(n))],
            json!(bool_result(registered.contains(&n))),
        );
    }
}
