// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Tools for configuring and deploying the `ERC20FlashTest` contract.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub mod deployer;
#[cfg(test)]
mod mock_node;
#[cfg(feature = "integration-tests")]
pub mod devnet;
pub use deployer::*;

pub use error::{Error, Result};
