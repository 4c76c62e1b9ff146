// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use std::path::PathBuf;

use flash_tools::{core::bindings::BindingTarget, ops};

use crate::{
    common_args::{ArtifactArgs, ConfigArgs},
    error::FlashCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contract to generate bindings for, optionally qualified by its source file.
    #[arg(default_value = "ERC20FlashTest")]
    contract: String,
    /// Output directory [default: `bindings.out_dir` from the configuration]
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Bindings flavor, `alloy` or `solidity` [default: `bindings.target` from the configuration]
    #[arg(long)]
    target: Option<BindingTarget>,

    #[command(flatten)]
    artifacts: ArtifactArgs,
}

pub fn exec(args: Args, config: &ConfigArgs) -> FlashCliResult {
    let mut config = config.load()?;
    if let Some(out_dir) = args.out_dir {
        config.bindings.out_dir = out_dir;
    }
    if let Some(target) = args.target {
        config.bindings.target = target;
    }

    let path = ops::bindings(&args.contract, &args.artifacts.store(&config), &config)?;
    println!("{}", path.display());
    Ok(())
}
