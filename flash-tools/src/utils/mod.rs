// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! General purpose utilities.

use alloy::primitives::{utils::format_units, U256};
use color::{Color, MINT, RED, YELLOW};

pub mod color;

/// Decodes a hex string, with or without a `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

/// Pretty-prints an amount of wei as ETH, colored by magnitude.
pub fn format_eth(wei: U256) -> String {
    let Ok(text) = format_units(wei, "ether") else {
        return "???".red();
    };
    let color = if wei <= U256::from(10).pow(U256::from(16)) {
        MINT
    } else if wei <= U256::from(10).pow(U256::from(17)) {
        YELLOW
    } else {
        RED
    };
    format!("{text} ETH").color(color)
}

/// Pretty-prints a gas amount.
pub fn format_gas(gas: u128) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Hides the credential parts of an RPC url.
///
/// Userinfo, query strings and long path segments (API keys embedded in the path, as most hosted
/// RPC providers do) are replaced with `***`. Unparseable input is hidden entirely.
pub fn redact_url(url: &str) -> String {
    const REDACTED: &str = "***";
    const MIN_SECRET_LEN: usize = 16;

    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return REDACTED.to_owned();
    };
    if !parsed.username().is_empty() {
        let _ = parsed.set_username(REDACTED);
    }
    if parsed.password().is_some() {
        let _ = parsed.set_password(Some(REDACTED));
    }
    if parsed.query().is_some() {
        parsed.set_query(Some(REDACTED));
    }
    let segments: Option<Vec<String>> = parsed.path_segments().map(|segments| {
        segments
            .map(|s| {
                if s.len() >= MIN_SECRET_LEN {
                    REDACTED.to_owned()
                } else {
                    s.to_owned()
                }
            })
            .collect()
    });
    if let Some(segments) = segments {
        parsed.set_path(&segments.join("/"));
    }
    parsed.to_string()
}

/// Converts a contract name to a snake case file stem, keeping digit runs attached to the
/// preceding word (`ERC20FlashTest` becomes `erc20_flash_test`).
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        if c == '-' {
            out.push('_');
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}
