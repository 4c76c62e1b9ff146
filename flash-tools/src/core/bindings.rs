// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Typed bindings generated from artifact ABIs.

use std::{fmt, fs, path::PathBuf, str::FromStr};

use serde::Deserialize;

use crate::{
    core::{
        artifact::Artifact,
        config::{BindingsConfig, CompilerConfig},
    },
    utils::snake_case,
};

/// Flavor of generated bindings.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BindingTarget {
    /// Rust module with an `alloy::sol!` contract binding.
    #[default]
    Alloy,
    /// Solidity interface.
    Solidity,
}

impl BindingTarget {
    pub fn file_name(&self, contract: &str) -> String {
        match self {
            Self::Alloy => format!("{}.rs", snake_case(contract)),
            Self::Solidity => format!("I{contract}.sol"),
        }
    }
}

impl fmt::Display for BindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloy => f.write_str("alloy"),
            Self::Solidity => f.write_str("solidity"),
        }
    }
}

impl FromStr for BindingTarget {
    type Err = BindingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alloy" => Ok(Self::Alloy),
            "solidity" => Ok(Self::Solidity),
            other => Err(BindingsError::UnknownTarget(other.to_owned())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BindingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown bindings target `{0}` (expected `alloy` or `solidity`)")]
    UnknownTarget(String),
}

/// Renders the bindings source for an artifact.
pub fn render(artifact: &Artifact, target: BindingTarget, compiler: &CompilerConfig) -> String {
    let interface = artifact.abi.to_sol(&artifact.name, None);
    let source = artifact.path.display();
    match target {
        BindingTarget::Alloy => {
            let body: String = interface
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        "\n".to_owned()
                    } else {
                        format!("    {line}\n")
                    }
                })
                .collect();
            format!(
                "//! Bindings for the `{name}` contract.\n\
                 //!\n\
                 //! Generated by `flash bindings` from `{source}`. Do not edit.\n\
                 \n\
                 alloy::sol! {{\n    \
                 #[sol(rpc)]\n\
                 {body}\
                 }}\n",
                name = artifact.name,
            )
        }
        BindingTarget::Solidity => {
            let pragma = match &compiler.version {
                Some(version) => format!("^{version}"),
                None => ">=0.6.0".to_owned(),
            };
            format!(
                "// SPDX-License-Identifier: UNLICENSED\n\
                 // Generated by `flash bindings` from `{source}`. Do not edit.\n\
                 pragma solidity {pragma};\n\
                 \n\
                 {interface}\n"
            )
        }
    }
}

/// Writes the bindings for an artifact into the configured output directory.
pub fn generate(
    artifact: &Artifact,
    config: &BindingsConfig,
    compiler: &CompilerConfig,
) -> Result<PathBuf, BindingsError> {
    fs::create_dir_all(&config.out_dir)?;
    let path = config.out_dir.join(config.target.file_name(&artifact.name));
    fs::write(&path, render(artifact, config.target, compiler))?;
    debug!(@grey, "wrote {} bindings to {}", config.target, path.display());
    Ok(path)
}
