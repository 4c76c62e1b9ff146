// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Generate typed bindings for a contract.

use std::path::PathBuf;

use crate::{
    core::{artifact::ArtifactStore, bindings, config::Config},
    utils::color::DebugColor,
};

pub fn bindings(contract: &str, artifacts: &ArtifactStore, config: &Config) -> crate::Result<PathBuf> {
    let artifact = artifacts.resolve(contract)?;
    let path = bindings::generate(&artifact, &config.bindings, &config.compiler)?;
    info!(@grey, "wrote {} bindings for {} to {}", config.bindings.target, artifact.name, path.debug_lavender());
    Ok(path)
}
