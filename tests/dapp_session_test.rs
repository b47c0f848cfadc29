mod common;

use common::*;
use flightsurety_dapp::app::action::Action;
use flightsurety_dapp::app::session::run_session;
use flightsurety_dapp::core::abi::Token;
use flightsurety_dapp::{Dapp, FlightSuretyContract, JsonRpcProvider};
use httpmock::prelude::*;
use serde_json::json;

const BASE: u64 = 1_700_000_000_000;

async fn connect(server: &MockServer) -> Dapp<JsonRpcProvider> {
    let provider = JsonRpcProvider::new(server.url("/")).unwrap();
    let contract = FlightSuretyContract::connect(
        provider,
        APP_ADDRESS.parse().unwrap(),
        DATA_ADDRESS.parse().unwrap(),
    )
    .await
    .unwrap();
    let mut dapp = Dapp::new(contract, BASE).unwrap();
    dapp.load().await;
    dapp
}

async fn run(dapp: &mut Dapp<JsonRpcProvider>, script: &str) -> String {
    let mut out = Vec::new();
    run_session(dapp, script.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_load_against_node() {
    let server = MockServer::start();
    mock_node(&server, &[1, 2]);

    let dapp = connect(&server).await;

    let page = dapp.page();
    assert_eq!(page.display_wrapper[0].rows[0].value, "true");
    assert_eq!(page.populate_registered.options(), &[account(1), account(2)]);
    assert_eq!(page.passenger_list.options()[0], account(6));
}

#[tokio::test]
async fn test_session_register_airline() {
    let server = MockServer::start();
    mock_node(&server, &[1]);
    let register = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("\"method\":\"eth_sendTransaction\"")
            .body_contains(format!("\"from\":\"{}\"", account(1)).as_str())
            .body_contains("\"gas\":\"0x3d0900\"")
            .body_contains("\"gasPrice\":\"0x174876e800\"")
            .body_contains(
                data_fragment(
                    "registerAirline(address,string)",
                    &[Token::Address(account(2)), Token::String("AD001".to_string())],
                )
                .as_str(),
            );
        then.status(200).json_body(rpc_ok(json!("0xabc1")));
    });

    let mut dapp = connect(&server).await;
    let output = run(
        &mut dapp,
        "# airline 1 registers airline 2\nregister-airline --airline 1 --caller 0\nquit\nstatus\n",
    )
    .await;

    register.assert();
    assert!(output.contains("register-airline: 0xabc1"));
    assert!(output.contains("[populateRegistered]"));
    // everything after quit is ignored
    assert!(!output.contains("== Operational Status =="));
}

#[tokio::test]
async fn test_session_reports_parse_errors_and_continues() {
    let server = MockServer::start();
    mock_node(&server, &[]);

    let mut dapp = connect(&server).await;
    let output = run(&mut dapp, "fly-away\nselect-flight BC058\n").await;

    assert!(output.contains("fly-away"));
    assert!(output.contains("select-flight: BC058"));
    assert!(output.contains(&format!("Flight Time: {}", BASE + 3058)));
    assert!(output.contains(&format!("Airline: {}", account(3))));
}

#[tokio::test]
async fn test_session_oracles_and_balance() {
    let server = MockServer::start();
    mock_node(&server, &[1]);
    let fetch = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("\"method\":\"eth_sendTransaction\"")
            .body_contains(format!("\"from\":\"{}\"", account(0)).as_str())
            .body_contains(
                data_fragment(
                    "fetchFlightStatus(address,string,uint256)",
                    &[
                        Token::Address(account(1)),
                        Token::String("BC001".to_string()),
                        Token::Uint(u128::from(BASE + 1001)),
                    ],
                )
                .as_str(),
            );
        then.status(200).json_body(rpc_ok(json!("0x0racle")));
    });
    mock_method(&server, "eth_getBalance", rpc_ok(json!("0x56bc75e2d63100000")));

    let mut dapp = connect(&server).await;
    let output = run(&mut dapp, "submit-oracles\ncheck-balance --passenger 0\n").await;

    fetch.assert();
    assert!(output.contains("== Oracles =="));
    assert!(output.contains(&format!("BC001 {} 0x0racle", BASE + 1001)));
    assert!(output.contains(&format!("Balance of passenger {} : 100 ETH", account(6))));
    assert_eq!(dapp.oracle_key(), Some("0x0racle"));
}

#[tokio::test]
async fn test_fund_error_is_shown_verbatim() {
    let server = MockServer::start();
    mock_node(&server, &[1]);
    mock_method(
        &server,
        "eth_sendTransaction",
        rpc_err(-32000, "VM Exception while processing transaction: revert"),
    );

    let mut dapp = connect(&server).await;
    let mut out = Vec::new();
    Action::FundAirline { airline: 0 }
        .apply(&mut dapp, &mut out)
        .await
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert_eq!(
        output.trim(),
        "fund-airline failed: VM Exception while processing transaction: revert"
    );
}

#[tokio::test]
async fn test_populate_funded_uses_data_contract() {
    let server = MockServer::start();
    mock_node(&server, &[1]);
    let funded = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("\"method\":\"eth_call\"")
            .body_contains(format!("\"to\":\"{}\"", DATA_ADDRESS).as_str())
            .body_contains(
                data_fragment("isAirlineFunded(address)", &[Token::Address(account(1))]).as_str(),
            );
        then.status(200).json_body(rpc_ok(json!(bool_result(true))));
    });
    for n in 2..=5u8 {
        mock_call(
            &server,
            "isAirlineFunded(address)",
            &[Token::Address(account(n))],
            json!(bool_result(false)),
        );
    }

    let mut dapp = connect(&server).await;
    let output = run(&mut dapp, "populate-funded\n").await;

    funded.assert();
    assert!(output.contains(&format!("[populateFunded]\n  0: {}\n", account(1))));
}
