use crate::core::abi::{self, Token};
use crate::core::units::{self, Unit};
use crate::domain::model::{Accounts, Address, CallOptions, TxHash, TxOptions};
use crate::domain::ports::EthProvider;
use crate::utils::error::{DappError, Result};

pub const GAS: u64 = 4_000_000;
pub const GAS_PRICE: u128 = 100_000_000_000;
pub const FUND_AMOUNT_ETHER: &str = "10";
pub const INSURANCE_AMOUNT_ETHER: &str = "1";

/// Proxy over the deployed FlightSuretyApp and FlightSuretyData contracts.
///
/// Every operation builds one call or transaction and hands it to the
/// provider; results and errors come back untouched.
pub struct FlightSuretyContract<P: EthProvider> {
    provider: P,
    app_address: Address,
    data_address: Address,
    accounts: Accounts,
}

impl<P: EthProvider> FlightSuretyContract<P> {
    pub fn new(provider: P, app_address: Address, data_address: Address, accounts: Accounts) -> Self {
        Self {
            provider,
            app_address,
            data_address,
            accounts,
        }
    }

    /// 從節點取得帳號清單並建立 proxy
    pub async fn connect(provider: P, app_address: Address, data_address: Address) -> Result<Self> {
        let list = provider.accounts().await?;
        tracing::debug!("Node reported {} accounts", list.len());

        let accounts = Accounts::from_list(&list).ok_or_else(|| DappError::ResponseError {
            message: "node reported no accounts".to_string(),
        })?;

        tracing::info!(
            "Connected: owner {}, {} airlines, {} passengers",
            accounts.owner,
            accounts.airlines.len(),
            accounts.passengers.len()
        );

        Ok(Self::new(provider, app_address, data_address, accounts))
    }

    pub fn owner(&self) -> Address {
        self.accounts.owner
    }

    pub fn airlines(&self) -> &[Address] {
        &self.accounts.airlines
    }

    pub fn passengers(&self) -> &[Address] {
        &self.accounts.passengers
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn app_address(&self) -> Address {
        self.app_address
    }

    pub fn data_address(&self) -> Address {
        self.data_address
    }

    fn owner_call(&self) -> CallOptions {
        CallOptions {
            from: self.accounts.owner,
        }
    }

    fn write_options(from: Address) -> TxOptions {
        TxOptions::sender(from).with_gas(GAS, GAS_PRICE)
    }

    pub async fn is_operational(&self) -> Result<bool> {
        let data = abi::encode_call("isOperational()", &[]);
        let output = self
            .provider
            .call(&self.app_address, &self.owner_call(), &data)
            .await?;
        abi::decode_bool(&output)
    }

    pub async fn is_airline_registered(&self, airline: &Address) -> Result<bool> {
        let data = abi::encode_call("isAirlineRegistered(address)", &[Token::Address(*airline)]);
        let output = self
            .provider
            .call(&self.app_address, &self.owner_call(), &data)
            .await?;
        abi::decode_bool(&output)
    }

    pub async fn is_airline_funded(&self, airline: &Address) -> Result<bool> {
        let data = abi::encode_call("isAirlineFunded(address)", &[Token::Address(*airline)]);
        let output = self
            .provider
            .call(&self.data_address, &self.owner_call(), &data)
            .await?;
        abi::decode_bool(&output)
    }

    pub async fn register_airline(
        &self,
        airline: &Address,
        from: &Address,
        name: &str,
    ) -> Result<TxHash> {
        tracing::debug!("registerAirline: airline {} from {} name {}", airline, from, name);
        let data = abi::encode_call(
            "registerAirline(address,string)",
            &[Token::Address(*airline), Token::String(name.to_string())],
        );
        self.provider
            .send_transaction(&self.app_address, &Self::write_options(*from), &data)
            .await
    }

    /// Airline pays its participation fee from its own account.
    pub async fn fund(&self, airline: &Address) -> Result<TxHash> {
        tracing::debug!("fund: airline {}", airline);
        let value = units::to_wei(FUND_AMOUNT_ETHER, Unit::Ether)?;
        let data = abi::encode_call("fund()", &[]);
        self.provider
            .send_transaction(
                &self.app_address,
                &Self::write_options(*airline).with_value(value),
                &data,
            )
            .await
    }

    pub async fn buy_insurance(
        &self,
        passenger: &Address,
        airline: &Address,
        flight: &str,
        timestamp: u64,
    ) -> Result<TxHash> {
        tracing::debug!("buyInsurance: passenger {} flight {} {}", passenger, flight, timestamp);
        let value = units::to_wei(INSURANCE_AMOUNT_ETHER, Unit::Ether)?;
        let data = abi::encode_call(
            "buyInsurance(address,string,uint256)",
            &[
                Token::Address(*airline),
                Token::String(flight.to_string()),
                Token::Uint(u128::from(timestamp)),
            ],
        );
        self.provider
            .send_transaction(
                &self.app_address,
                &Self::write_options(*passenger).with_value(value),
                &data,
            )
            .await
    }

    pub async fn register_flight(
        &self,
        airline: &Address,
        flight: &str,
        timestamp: u64,
    ) -> Result<TxHash> {
        tracing::debug!("registerFlight: airline {} flight {} {}", airline, flight, timestamp);
        let data = abi::encode_call(
            "registerFlight(string,uint256)",
            &[Token::String(flight.to_string()), Token::Uint(u128::from(timestamp))],
        );
        self.provider
            .send_transaction(&self.app_address, &Self::write_options(*airline), &data)
            .await
    }

    /// Asks the oracles for a status update; sent by the owner with node-default gas.
    pub async fn fetch_flight_status(
        &self,
        airline: &Address,
        flight: &str,
        timestamp: u64,
    ) -> Result<TxHash> {
        let data = abi::encode_call(
            "fetchFlightStatus(address,string,uint256)",
            &[
                Token::Address(*airline),
                Token::String(flight.to_string()),
                Token::Uint(u128::from(timestamp)),
            ],
        );
        self.provider
            .send_transaction(&self.app_address, &TxOptions::sender(self.accounts.owner), &data)
            .await
    }

    pub async fn submit_oracle_response(
        &self,
        index: u8,
        airline: &Address,
        flight: &str,
        timestamp: u64,
        status_code: u8,
    ) -> Result<TxHash> {
        let data = abi::encode_call(
            "submitOracleResponse(uint8,address,string,uint256,uint8)",
            &[
                Token::Uint(u128::from(index)),
                Token::Address(*airline),
                Token::String(flight.to_string()),
                Token::Uint(u128::from(timestamp)),
                Token::Uint(u128::from(status_code)),
            ],
        );
        self.provider
            .send_transaction(&self.app_address, &TxOptions::sender(self.accounts.owner), &data)
            .await
    }

    /// Balance in ether, formatted like web3's `fromWei`.
    pub async fn account_balance(&self, account: &Address) -> Result<String> {
        let wei = self.provider.balance(account).await?;
        Ok(units::from_wei(wei))
    }

    pub async fn withdraw_credits(&self, passenger: &Address) -> Result<TxHash> {
        let data = abi::encode_call("withdrawCredits()", &[]);
        self.provider
            .send_transaction(&self.app_address, &TxOptions::sender(*passenger), &data)
            .await
    }
}
