// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Compiled contract artifacts.
//!
//! Artifacts are the JSON files written by the contract build: Hardhat style
//! (`artifacts/contracts/Foo.sol/Foo.json`, `bytecode` as a hex string) and Foundry style
//! (`out/Foo.sol/Foo.json`, `bytecode.object`) are both understood.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;

use crate::utils::decode0x;

/// Default directory searched for artifacts.
pub const DEFAULT_DIR: &str = "artifacts";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("artifact not found: no compiled artifact for `{name}` in {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error(
        "multiple artifacts for `{name}`, use a qualified name (Source.sol:{name}): {}",
        .paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("invalid artifact {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("artifact {} has no creation bytecode (abstract contract or interface?)", .0.display())]
    MissingBytecode(PathBuf),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<RawBytecode>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
    #[serde(default)]
    raw_metadata: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn as_str(&self) -> &str {
        match self {
            Self::Hex(hex) => hex,
            Self::Object { object } => object,
        }
    }
}

/// A compiled contract, ready to be deployed.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
    pub abi: JsonAbi,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
    /// Compiler version recorded in the artifact's metadata, if any.
    pub compiler_version: Option<String>,
}

impl Artifact {
    /// Reads an artifact file. `name` is the contract name it was resolved by.
    pub fn read(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let raw: RawArtifact =
            serde_json::from_str(&contents).map_err(|err| ArtifactError::Invalid {
                path: path.to_owned(),
                reason: err.to_string(),
            })?;

        let code = raw
            .bytecode
            .as_ref()
            .map(RawBytecode::as_str)
            .unwrap_or_default();
        if code.contains("__") {
            return Err(ArtifactError::Invalid {
                path: path.to_owned(),
                reason: "bytecode has unlinked library references".to_owned(),
            });
        }
        let bytecode = decode0x(code).map_err(|err| ArtifactError::Invalid {
            path: path.to_owned(),
            reason: format!("bytecode is not hex: {err}"),
        })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::MissingBytecode(path.to_owned()));
        }

        let compiler_version = raw
            .metadata
            .as_ref()
            .and_then(compiler_version)
            .or_else(|| {
                raw.raw_metadata
                    .as_deref()
                    .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
                    .as_ref()
                    .and_then(compiler_version)
            });

        Ok(Self {
            name: name.into(),
            path: path.to_owned(),
            abi: raw.abi,
            bytecode: bytecode.into(),
            compiler_version,
        })
    }

    /// Whether the artifact was built by the pinned compiler version.
    ///
    /// Returns `None` when the artifact doesn't record its compiler.
    pub fn matches_compiler(&self, pinned: &str) -> Option<bool> {
        let version = self.compiler_version.as_deref()?;
        let version = version.strip_prefix('v').unwrap_or(version);
        let release = version.split('+').next().unwrap_or(version);
        Some(release == pinned)
    }
}

/// Solc metadata is either inlined as an object or serialized into a string.
fn compiler_version(metadata: &serde_json::Value) -> Option<String> {
    match metadata {
        serde_json::Value::String(raw) => serde_json::from_str::<serde_json::Value>(raw)
            .ok()
            .as_ref()
            .and_then(compiler_version),
        value => value
            .get("compiler")?
            .get("version")?
            .as_str()
            .map(ToOwned::to_owned),
    }
}

/// Resolves contract names to artifacts under a root directory.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the artifact for `name`.
    ///
    /// `name` is either a bare contract name (`ERC20FlashTest`), which must be unique across the
    /// store, or qualified by its source file (`contracts/ERC20FlashTest.sol:ERC20FlashTest`).
    pub fn resolve(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let not_found = || ArtifactError::NotFound {
            name: name.to_owned(),
            dir: self.root.clone(),
        };
        if !self.root.is_dir() {
            return Err(not_found());
        }

        let (source, contract) = match name.rsplit_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };
        let mut pattern = glob::Pattern::escape(&self.root.to_string_lossy());
        pattern.push_str("/**/");
        if let Some(source) = source {
            let file = Path::new(source).file_name().ok_or_else(not_found)?;
            pattern.push_str(&glob::Pattern::escape(&file.to_string_lossy()));
            pattern.push('/');
        }
        pattern.push_str(&glob::Pattern::escape(contract));
        pattern.push_str(".json");

        let mut paths: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        match paths.len() {
            0 => Err(not_found()),
            1 => {
                debug!(@grey, "resolved {} to {}", name, paths[0].display());
                Artifact::read(contract, &paths[0])
            }
            _ => Err(ArtifactError::Ambiguous {
                name: contract.to_owned(),
                paths,
            }),
        }
    }
}
