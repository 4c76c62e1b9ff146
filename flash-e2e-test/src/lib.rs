// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Shared setup for the `ERC20FlashTest` end-to-end suite.

use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use eyre::{eyre, Result, WrapErr};
use flash_tools::core::config::{self, Config};

/// Contract under test.
pub const CONTRACT: &str = "ERC20FlashTest";

/// State every test case starts from.
#[derive(Debug)]
pub struct Fixture {
    pub config: Config,
    pub contract: &'static str,
    /// Flash lender the contract is constructed with.
    pub lender: Address,
}

/// Runs before each test case: loads the workspace configuration and the contract's
/// deployment defaults.
pub fn before_each() -> Result<Fixture> {
    let path = workspace_root().join(config::FILENAME);
    let config = Config::load(&path).wrap_err_with(|| format!("loading {}", path.display()))?;
    let defaults = config
        .contract(CONTRACT)
        .ok_or_else(|| eyre!("no [contracts.{CONTRACT}] table in {}", path.display()))?;
    let lender: Address = defaults
        .constructor_args
        .first()
        .ok_or_else(|| eyre!("{CONTRACT} has no configured lender"))?
        .parse()
        .wrap_err("configured lender is not an address")?;
    Ok(Fixture {
        config,
        contract: CONTRACT,
        lender,
    })
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
