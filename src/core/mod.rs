pub mod abi;
pub mod contract;
pub mod units;

pub use crate::domain::model::{Accounts, Address, CallOptions, Flight, FlightTable, TxOptions};
pub use crate::domain::ports::EthProvider;
pub use crate::utils::error::Result;
