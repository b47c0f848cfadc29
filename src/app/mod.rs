#[cfg(feature = "cli")]
pub mod action;
pub mod dapp;
pub mod display;
pub mod page;
#[cfg(feature = "cli")]
pub mod session;

pub use dapp::Dapp;
