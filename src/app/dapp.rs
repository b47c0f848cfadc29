use crate::app::page::{Page, Row, Section};
use crate::core::contract::FlightSuretyContract;
use crate::domain::model::{Flight, FlightTable, TxHash, FLIGHT_SCHEDULE};
use crate::domain::ports::EthProvider;
use crate::utils::error::{DappError, Result};

/// The page script: binds page controls to contract calls and writes results back to the page.
pub struct Dapp<P: EthProvider> {
    contract: FlightSuretyContract<P>,
    flights: FlightTable,
    page: Page,
    oracle_key: Option<TxHash>,
}

impl<P: EthProvider> Dapp<P> {
    /// Builds the flight table and fills the static lists; no calls are made yet.
    pub fn new(contract: FlightSuretyContract<P>, base_timestamp_ms: u64) -> Result<Self> {
        let flights = FlightTable::build(base_timestamp_ms, contract.airlines())?;

        let mut page = Page::default();
        page.select_airline.append(contract.airlines().iter().copied());
        page.populate_flights.append(flights.codes());
        page.passenger_list.append(contract.passengers().iter().copied());
        page.passenger_list2.append(contract.passengers().iter().copied());

        let mut dapp = Self {
            contract,
            flights,
            page,
            oracle_key: None,
        };
        dapp.refresh_flight_labels();
        Ok(dapp)
    }

    /// 頁面載入：顯示合約狀態並列出已註冊航空
    pub async fn load(&mut self) {
        self.show_operational_status().await;
        self.populate_registered().await;
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn flights(&self) -> &FlightTable {
        &self.flights
    }

    pub fn contract(&self) -> &FlightSuretyContract<P> {
        &self.contract
    }

    /// Result of the last oracle request.
    pub fn oracle_key(&self) -> Option<&str> {
        self.oracle_key.as_deref()
    }

    pub async fn show_operational_status(&mut self) {
        let outcome = self.contract.is_operational().await;
        self.page.display(
            Section::new("Operational Status")
                .with_description("Check if contract is operational")
                .with_row(Row::from_outcome("Operational Status", &outcome)),
        );
    }

    pub async fn populate_registered(&mut self) {
        self.page.populate_registered.clear();
        self.page.select_account.clear();

        for airline in self.contract.airlines().to_vec() {
            match self.contract.is_airline_registered(&airline).await {
                Ok(true) => {
                    self.page.populate_registered.append([airline]);
                    self.page.select_account.append([airline]);
                }
                Ok(false) => {}
                Err(e) => tracing::warn!("isAirlineRegistered({}) failed: {}", airline, e),
            }
        }
        tracing::debug!("{} registered airlines", self.page.populate_registered.len());
    }

    pub async fn populate_funded(&mut self) {
        self.page.populate_funded.clear();

        for airline in self.contract.airlines().to_vec() {
            match self.contract.is_airline_funded(&airline).await {
                Ok(true) => self.page.populate_funded.append([airline]),
                Ok(false) => {}
                Err(e) => tracing::warn!("isAirlineFunded({}) failed: {}", airline, e),
            }
        }
        tracing::debug!("{} funded airlines", self.page.populate_funded.len());
    }

    /// Registers the airline at `airline_index` of `selectAirline`, sent by the
    /// registered airline at `caller_index` of `selectAccount`. The airline name
    /// is the flight code at the same position.
    pub async fn register_airline(
        &mut self,
        airline_index: usize,
        caller_index: usize,
    ) -> Result<TxHash> {
        let airline = *self.page.select_airline.select(airline_index)?;
        let caller = *self.page.select_account.select(caller_index)?;
        let name = FLIGHT_SCHEDULE
            .get(airline_index)
            .map(|(code, _)| *code)
            .unwrap_or_default();

        let outcome = self.contract.register_airline(&airline, &caller, name).await;
        log_outcome("register-airline", &outcome);

        // 無論成功與否都重新整理清單
        self.populate_registered().await;
        outcome
    }

    pub async fn fund_airline(&mut self, index: usize) -> Result<TxHash> {
        let airline = *self.page.populate_registered.select(index)?;
        let outcome = self.contract.fund(&airline).await;
        log_outcome("fund-airline", &outcome);
        outcome
    }

    /// `populateFlights` change: select the flight and update its labels.
    pub fn select_flight(&mut self, code: &str) -> Result<()> {
        self.page.populate_flights.select_value(&code.to_string())?;
        self.refresh_flight_labels();
        Ok(())
    }

    pub async fn register_flight(&mut self, code: Option<&str>) -> Result<TxHash> {
        let flight = self.flight(code)?;
        tracing::info!(
            "Registering flight {} {} {}",
            flight.code,
            flight.airline,
            flight.timestamp
        );
        let outcome = self
            .contract
            .register_flight(&flight.airline, &flight.code, flight.timestamp)
            .await;
        log_outcome("register-flight", &outcome);
        outcome
    }

    pub async fn buy_insurance(
        &mut self,
        passenger_index: usize,
        code: Option<&str>,
    ) -> Result<TxHash> {
        let flight = self.flight(code)?;
        let passenger = *self.page.passenger_list.select(passenger_index)?;
        let outcome = self
            .contract
            .buy_insurance(&passenger, &flight.airline, &flight.code, flight.timestamp)
            .await;
        log_outcome("buy-insurance", &outcome);
        outcome
    }

    /// Triggers the oracles for the flight and shows the request in the display area.
    pub async fn submit_oracles(&mut self, code: Option<&str>) -> Result<TxHash> {
        let flight = self.flight(code)?;
        let outcome = self
            .contract
            .fetch_flight_status(&flight.airline, &flight.code, flight.timestamp)
            .await;
        log_outcome("submit-oracles", &outcome);

        let shown = outcome
            .as_ref()
            .map(|hash| format!("{} {} {}", flight.code, flight.timestamp, hash));
        self.page.display(
            Section::new("Oracles")
                .with_description("Trigger oracles")
                .with_row(match &shown {
                    Ok(text) => Row::new("Fetch Flight Status", text.as_str()),
                    Err(e) => Row::new("Fetch Flight Status", e.to_string()),
                }),
        );

        if let Ok(hash) = &outcome {
            self.oracle_key = Some(hash.clone());
        }
        outcome
    }

    pub async fn submit_oracle_response(
        &mut self,
        index: u8,
        status_code: u8,
        code: Option<&str>,
    ) -> Result<TxHash> {
        let flight = self.flight(code)?;
        let outcome = self
            .contract
            .submit_oracle_response(
                index,
                &flight.airline,
                &flight.code,
                flight.timestamp,
                status_code,
            )
            .await;
        log_outcome("submit-oracle-response", &outcome);

        self.page.display(
            Section::new("Oracles")
                .with_description(format!(
                    "Oracle response {} for {} (index {})",
                    status_code, flight.code, index
                ))
                .with_row(Row::from_outcome("Submit Oracle Response", &outcome)),
        );
        outcome
    }

    pub async fn check_balance(&mut self, passenger_index: usize) -> Result<String> {
        let account = *self.page.passenger_list2.select(passenger_index)?;
        let balance = self.contract.account_balance(&account).await?;

        self.page.display_balance = Some(Section::new(format!(
            "Balance of passenger {} : {} ETH",
            account, balance
        )));
        Ok(balance)
    }

    pub async fn withdraw_credits(&mut self, passenger_index: usize) -> Result<TxHash> {
        let passenger = *self.page.passenger_list2.select(passenger_index)?;
        let outcome = self.contract.withdraw_credits(&passenger).await;
        log_outcome("withdraw-credits", &outcome);
        outcome
    }

    /// The flight named by `code` (which also becomes the selection), or the selected one.
    fn flight(&mut self, code: Option<&str>) -> Result<Flight> {
        if let Some(code) = code {
            self.select_flight(code)?;
        }
        self.page
            .populate_flights
            .selected()
            .and_then(|code| self.flights.get(code))
            .cloned()
            .ok_or_else(|| DappError::SelectionError {
                list: self.page.populate_flights.id().to_string(),
                index: self.page.populate_flights.selected_index(),
            })
    }

    fn refresh_flight_labels(&mut self) {
        let selected = self
            .page
            .populate_flights
            .selected()
            .and_then(|code| self.flights.get(code));
        if let Some(flight) = selected {
            self.page.flight_time = format!("Flight Time: {}", flight.timestamp);
            self.page.flight_airline = format!("Airline: {}", flight.airline);
        }
    }
}

fn log_outcome(action: &str, outcome: &Result<TxHash>) {
    match outcome {
        Ok(hash) => tracing::info!("{}: {}", action, hash),
        Err(e) => tracing::error!("{} failed: {}", action, e),
    }
}

pub fn describe_flight(flight: &Flight) -> String {
    format!("{} {} {}", flight.code, flight.timestamp, flight.airline)
}
