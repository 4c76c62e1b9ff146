// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use crate::{common_args::ConfigArgs, error::FlashCliResult};

mod bindings;
mod deploy;
mod networks;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Generate typed bindings for a contract
    #[clap(visible_alias = "b")]
    Bindings(bindings::Args),
    /// Deploy a contract, printing its address and the deployment tx hash
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List the configured networks
    #[clap(visible_alias = "n")]
    Networks,
}

pub async fn exec(cmd: Command, config: &ConfigArgs) -> FlashCliResult {
    match cmd {
        Command::Bindings(args) => bindings::exec(args, config),
        Command::Deploy(args) => deploy::exec(args, config).await,
        Command::Networks => networks::exec(config),
    }
}
