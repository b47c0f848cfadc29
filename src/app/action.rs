use crate::app::dapp::{describe_flight, Dapp};
use crate::app::display;
use crate::domain::ports::EthProvider;
use crate::utils::error::Result;
use clap::Subcommand;
use std::fmt::Display;
use std::io::Write;

/// Page controls, one subcommand per button or selector.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// Check whether the contract is operational
    Status,
    /// List owner, airline and passenger accounts
    Accounts,
    /// List the flight table
    Flights,
    /// Print the whole page
    Show,
    /// Select a flight in `populateFlights`
    SelectFlight { code: String },
    /// Refresh the registered airline lists
    PopulateRegistered,
    /// Register an airline
    RegisterAirline {
        /// Index in `selectAirline`
        #[arg(long, default_value_t = 0)]
        airline: usize,
        /// Index in `selectAccount` (registered airlines)
        #[arg(long, default_value_t = 0)]
        caller: usize,
    },
    /// Pay the 10 ETH participation fee for a registered airline
    FundAirline {
        /// Index in `populateRegistered`
        #[arg(long, default_value_t = 0)]
        airline: usize,
    },
    /// Refresh the funded airline list
    PopulateFunded,
    /// Register the selected flight
    RegisterFlight {
        #[arg(long)]
        flight: Option<String>,
    },
    /// Buy 1 ETH of insurance for the selected flight
    BuyInsurance {
        /// Index in `passengerList`
        #[arg(long, default_value_t = 0)]
        passenger: usize,
        #[arg(long)]
        flight: Option<String>,
    },
    /// Ask the oracles for the selected flight's status
    SubmitOracles {
        #[arg(long)]
        flight: Option<String>,
    },
    /// Submit an oracle response for the selected flight
    SubmitOracleResponse {
        #[arg(long)]
        index: u8,
        #[arg(long)]
        status_code: u8,
        #[arg(long)]
        flight: Option<String>,
    },
    /// Show a passenger's balance
    CheckBalance {
        /// Index in `passengerList2`
        #[arg(long, default_value_t = 0)]
        passenger: usize,
    },
    /// Withdraw a passenger's insurance credits
    WithdrawCredits {
        /// Index in `passengerList2`
        #[arg(long, default_value_t = 0)]
        passenger: usize,
    },
}

impl Action {
    /// Runs the action and writes what changed on the page to `out`.
    pub async fn apply<P: EthProvider, W: Write>(self, dapp: &mut Dapp<P>, out: &mut W) -> Result<()> {
        let sections_before = dapp.page().display_wrapper.len();

        match self {
            Action::Status => dapp.show_operational_status().await,
            Action::Accounts => {
                let accounts = dapp.contract().accounts();
                writeln!(out, "owner      {}", accounts.owner)?;
                for (i, airline) in accounts.airlines.iter().enumerate() {
                    writeln!(out, "airline    {} {}", i, airline)?;
                }
                for (i, passenger) in accounts.passengers.iter().enumerate() {
                    writeln!(out, "passenger  {} {}", i, passenger)?;
                }
            }
            Action::Flights => {
                for flight in dapp.flights().iter() {
                    writeln!(out, "{}", describe_flight(flight))?;
                }
            }
            Action::Show => write!(out, "{}", display::render_page(dapp.page()))?,
            Action::SelectFlight { code } => {
                report(out, "select-flight", dapp.select_flight(&code).map(|_| code))?;
                writeln!(out, "{}", dapp.page().flight_time)?;
                writeln!(out, "{}", dapp.page().flight_airline)?;
            }
            Action::PopulateRegistered => {
                dapp.populate_registered().await;
                list(out, "populateRegistered", dapp.page().populate_registered.options())?;
            }
            Action::RegisterAirline { airline, caller } => {
                let outcome = dapp.register_airline(airline, caller).await;
                report(out, "register-airline", outcome)?;
                list(out, "populateRegistered", dapp.page().populate_registered.options())?;
            }
            Action::FundAirline { airline } => {
                report(out, "fund-airline", dapp.fund_airline(airline).await)?;
            }
            Action::PopulateFunded => {
                dapp.populate_funded().await;
                list(out, "populateFunded", dapp.page().populate_funded.options())?;
            }
            Action::RegisterFlight { flight } => {
                let outcome = dapp.register_flight(flight.as_deref()).await;
                report(out, "register-flight", outcome)?;
            }
            Action::BuyInsurance { passenger, flight } => {
                let outcome = dapp.buy_insurance(passenger, flight.as_deref()).await;
                report(out, "buy-insurance", outcome)?;
            }
            Action::SubmitOracles { flight } => {
                if let Err(e) = dapp.submit_oracles(flight.as_deref()).await {
                    // 交易錯誤已顯示在區塊中，這裡只處理選擇錯誤
                    if dapp.page().display_wrapper.len() == sections_before {
                        writeln!(out, "submit-oracles failed: {}", e)?;
                    }
                }
            }
            Action::SubmitOracleResponse {
                index,
                status_code,
                flight,
            } => {
                if let Err(e) = dapp
                    .submit_oracle_response(index, status_code, flight.as_deref())
                    .await
                {
                    if dapp.page().display_wrapper.len() == sections_before {
                        writeln!(out, "submit-oracle-response failed: {}", e)?;
                    }
                }
            }
            Action::CheckBalance { passenger } => match dapp.check_balance(passenger).await {
                Ok(_) => {
                    if let Some(section) = &dapp.page().display_balance {
                        write!(out, "{}", display::render_section(section))?;
                    }
                }
                Err(e) => writeln!(out, "check-balance failed: {}", e)?,
            },
            Action::WithdrawCredits { passenger } => {
                report(out, "withdraw-credits", dapp.withdraw_credits(passenger).await)?;
            }
        }

        for section in &dapp.page().display_wrapper[sections_before..] {
            write!(out, "{}", display::render_section(section))?;
        }
        Ok(())
    }
}

fn report<W: Write, T: Display>(out: &mut W, action: &str, outcome: Result<T>) -> Result<()> {
    match outcome {
        Ok(value) => writeln!(out, "{}: {}", action, value)?,
        Err(e) => writeln!(out, "{} failed: {}", action, e)?,
    }
    Ok(())
}

fn list<W: Write, T: Display>(out: &mut W, id: &str, options: &[T]) -> Result<()> {
    writeln!(out, "[{}]", id)?;
    if options.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "  {}: {}", i, option)?;
    }
    Ok(())
}
