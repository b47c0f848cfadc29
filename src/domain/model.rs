use crate::utils::error::{DappError, Result as DappResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = DappError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DappError::InvalidAddressError {
            value: s.to_string(),
        };
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        if digits.len() != 40 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;
        Ok(Address(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Transaction hash as reported by the node.
pub type TxHash = String;

/// Read-call descriptor (`eth_call`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    pub from: Address,
}

/// Write-call descriptor (`eth_sendTransaction`).
///
/// `None` fields are left out of the request so the node fills in its defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOptions {
    pub from: Address,
    pub value: Option<u128>,
    pub gas: Option<u64>,
    pub gas_price: Option<u128>,
}

impl TxOptions {
    pub fn sender(from: Address) -> Self {
        Self {
            from,
            value: None,
            gas: None,
            gas_price: None,
        }
    }

    pub fn with_value(mut self, value: u128) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_gas(mut self, gas: u64, gas_price: u128) -> Self {
        self.gas = Some(gas);
        self.gas_price = Some(gas_price);
        self
    }
}

/// Accounts split by position: owner, then up to five airlines, then up to five passengers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accounts {
    pub owner: Address,
    pub airlines: Vec<Address>,
    pub passengers: Vec<Address>,
}

pub const MAX_AIRLINES: usize = 5;
pub const MAX_PASSENGERS: usize = 5;

impl Accounts {
    /// `None` when the node exposes no accounts at all.
    pub fn from_list(accounts: &[Address]) -> Option<Self> {
        Some(Self {
            owner: *accounts.first()?,
            airlines: accounts.iter().skip(1).take(MAX_AIRLINES).copied().collect(),
            passengers: accounts
                .iter()
                .skip(1 + MAX_AIRLINES)
                .take(MAX_PASSENGERS)
                .copied()
                .collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub code: String,
    pub timestamp: u64,
    pub airline: Address,
}

/// 航班代碼與時間偏移 (ms)，第 i 班屬於第 i 家航空
pub const FLIGHT_SCHEDULE: [(&str, u64); 5] = [
    ("BC001", 1001),
    ("AD001", 2001),
    ("BC058", 3058),
    ("AD058", 4058),
    ("AD019", 5029),
];

/// Largest base time that leaves room for every schedule offset.
pub const MAX_BASE_TIMESTAMP_MS: u64 = u64::MAX - 5029;

/// Static flight table, kept in schedule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightTable {
    flights: Vec<Flight>,
}

impl FlightTable {
    pub fn build(base_timestamp_ms: u64, airlines: &[Address]) -> DappResult<Self> {
        let flights = FLIGHT_SCHEDULE
            .iter()
            .zip(airlines)
            .map(|((code, offset), airline)| {
                let timestamp = base_timestamp_ms.checked_add(*offset).ok_or_else(|| {
                    DappError::InvalidConfigValueError {
                        field: "session.base_timestamp_ms".to_string(),
                        value: base_timestamp_ms.to_string(),
                        reason: format!("Value must be at most {}", MAX_BASE_TIMESTAMP_MS),
                    }
                })?;
                Ok(Flight {
                    code: code.to_string(),
                    timestamp,
                    airline: *airline,
                })
            })
            .collect::<DappResult<Vec<_>>>()?;
        Ok(Self { flights })
    }

    pub fn get(&self, code: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.code == code)
    }

    pub fn codes(&self) -> Vec<String> {
        self.flights.iter().map(|f| f.code.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flight> {
        self.flights.iter()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
