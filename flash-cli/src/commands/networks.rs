// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use std::io;

use flash_tools::ops;

use crate::{common_args::ConfigArgs, error::FlashCliResult};

pub fn exec(config: &ConfigArgs) -> FlashCliResult {
    let config = config.load()?;
    ops::networks(&config, &mut io::stdout())?;
    Ok(())
}
