//! The tracked token contract.

use serde::Serialize;

/// Static description of an indexed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractInfo {
    pub name: &'static str,
    pub address: &'static str,
    pub network: &'static str,
}

/// Tether USD on Ethereum mainnet.
pub const TETHER_USDT: ContractInfo = ContractInfo {
    name: "Tether(USDT)",
    address: "0xdAC17F958D2ee523a2206206994597C13D831ec7",
    network: "Ethereum Mainnet",
};
