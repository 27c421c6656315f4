// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use alloy::primitives::{utils::format_ether, U256};

use color::Color;

pub mod color;

/// Pretty-prints an amount of gas.
pub fn format_gas(gas: u64) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// Pretty-prints a wei amount as ETH.
pub fn format_eth(wei: &U256) -> String {
    format!("{} ETH", format_ether(*wei))
}

/// Decodes a hex string, with or without a `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_and_without_prefix() {
        assert_eq!(decode0x("0x6080").unwrap(), vec![0x60, 0x80]);
        assert_eq!(decode0x(" 6080\n").unwrap(), vec![0x60, 0x80]);
        assert_eq!(decode0x("0x").unwrap(), Vec::<u8>::new());
        assert!(decode0x("0x__$abc$__").is_err());
    }

    #[test]
    fn formats_one_ether() {
        let one = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(format_eth(&one), "1.000000000000000000 ETH");
    }
}
