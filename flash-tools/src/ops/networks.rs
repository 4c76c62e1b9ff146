// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! List configured networks.

use std::io::{self, Write};

use crate::{core::config::Config, utils::redact_url};

/// Writes one line per network profile, marking the default with `*`.
pub fn networks(config: &Config, out: &mut impl Write) -> io::Result<()> {
    let width = config
        .networks()
        .map(|network| network.name().len())
        .max()
        .unwrap_or_default();
    for network in config.networks() {
        let marker = if network.name() == config.default_network_name() {
            '*'
        } else {
            ' '
        };
        let accounts = match network.accounts().len() {
            1 => "1 account".to_owned(),
            n => format!("{n} accounts"),
        };
        writeln!(
            out,
            "{marker} {:<width$}  {}  ({accounts})",
            network.name(),
            redact_url(network.url()),
        )?;
    }
    Ok(())
}
