pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::JsonRpcProvider;
pub use app::Dapp;
pub use config::DappConfig;
pub use crate::core::contract::FlightSuretyContract;
pub use domain::model::{Accounts, Address, Flight, FlightTable};
pub use domain::ports::EthProvider;
pub use utils::error::{DappError, Result};
