// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! `Flash.toml` configuration.
//!
//! The configuration is read once at startup into an immutable [`Config`]. String values may
//! reference environment variables (see [`env`]) so that secrets never live in the file itself.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use self::env::{interpolate, Env, ProcessEnv};
use crate::core::{artifact, bindings::BindingTarget};

pub use network::{NetworkProfile, LOCALHOST, LOCALHOST_URL};

pub mod env;
mod network;

/// Filename of the configuration file looked up in the current directory.
pub const FILENAME: &str = "Flash.toml";

/// Default output directory for generated bindings.
pub const DEFAULT_BINDINGS_DIR: &str = "bindings";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("missing config file {}", .0.display())]
    Missing(PathBuf),
    #[error("environment variable `{var}` used by `{key}` is not set")]
    MissingEnv { key: String, var: String },
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),
    #[error("invalid url for network `{network}`: {url}")]
    InvalidUrl { network: String, url: String },
    #[error("invalid private key in `networks.{network}.accounts[{index}]`")]
    InvalidAccount { network: String, index: usize },
    #[error("invalid compiler version `{0}`, expected MAJOR.MINOR.PATCH")]
    InvalidCompilerVersion(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    default_network: Option<String>,
    #[serde(default)]
    compiler: CompilerConfig,
    #[serde(default)]
    networks: BTreeMap<String, network::TomlNetwork>,
    #[serde(default)]
    explorer: ExplorerConfig,
    #[serde(default)]
    bindings: BindingsConfig,
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    contracts: BTreeMap<String, ContractConfig>,
}

/// Solidity compiler the artifacts are expected to be built with.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    pub version: Option<String>,
}

/// Block explorer credentials.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub api_key: String,
}

impl std::fmt::Debug for ExplorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerConfig")
            .field("api_key", &(!self.api_key.is_empty()).then_some("***"))
            .finish()
    }
}

/// Where and how typed bindings are generated.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BindingsConfig {
    #[serde(default = "default_bindings_dir")]
    pub out_dir: PathBuf,
    #[serde(default)]
    pub target: BindingTarget,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            out_dir: default_bindings_dir(),
            target: BindingTarget::default(),
        }
    }
}

fn default_bindings_dir() -> PathBuf {
    DEFAULT_BINDINGS_DIR.into()
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    #[serde(default = "default_artifacts_dir")]
    pub artifacts: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts_dir(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    artifact::DEFAULT_DIR.into()
}

/// Deployment defaults for one contract.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    #[serde(default)]
    pub constructor_args: Vec<String>,
    /// Ether sent along with the deployment, in ETH units.
    pub constructor_value: Option<String>,
}

/// Resolved configuration.
#[derive(Debug)]
pub struct Config {
    default_network: String,
    pub compiler: CompilerConfig,
    networks: BTreeMap<String, NetworkProfile>,
    pub explorer: ExplorerConfig,
    pub bindings: BindingsConfig,
    pub paths: PathsConfig,
    contracts: BTreeMap<String, ContractConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(LOCALHOST.to_owned(), NetworkProfile::localhost());
        Self {
            default_network: LOCALHOST.to_owned(),
            compiler: CompilerConfig::default(),
            networks,
            explorer: ExplorerConfig::default(),
            bindings: BindingsConfig::default(),
            paths: PathsConfig::default(),
            contracts: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads the configuration at `path`, which must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_owned()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents, &ProcessEnv)
    }

    /// Loads `path` if given, otherwise `Flash.toml` in the current directory if present, falling
    /// back to the built-in defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(FILENAME).exists() => Self::load(FILENAME),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(contents: &str, env: &impl Env) -> Result<Self, ConfigError> {
        let toml: TomlConfig = toml::from_str(contents)?;

        if let Some(version) = &toml.compiler.version {
            check_compiler_version(version)?;
        }

        let mut networks = BTreeMap::new();
        for (name, network) in toml.networks {
            let profile = NetworkProfile::from_toml(&name, network, env)?;
            networks.insert(name, profile);
        }
        networks
            .entry(LOCALHOST.to_owned())
            .or_insert_with(NetworkProfile::localhost);

        let default_network = toml.default_network.unwrap_or_else(|| LOCALHOST.to_owned());
        if !networks.contains_key(&default_network) {
            return Err(ConfigError::UnknownNetwork(default_network));
        }

        let explorer = ExplorerConfig {
            api_key: interpolate("explorer.api_key", &toml.explorer.api_key, env)?,
        };

        let mut contracts = BTreeMap::new();
        for (name, contract) in toml.contracts {
            let constructor_args = contract
                .constructor_args
                .iter()
                .enumerate()
                .map(|(i, arg)| {
                    interpolate(&format!("contracts.{name}.constructor_args[{i}]"), arg, env)
                })
                .collect::<Result<_, _>>()?;
            let constructor_value = contract
                .constructor_value
                .map(|value| {
                    interpolate(&format!("contracts.{name}.constructor_value"), &value, env)
                })
                .transpose()?;
            contracts.insert(
                name,
                ContractConfig {
                    constructor_args,
                    constructor_value,
                },
            );
        }

        Ok(Self {
            default_network,
            compiler: toml.compiler,
            networks,
            explorer,
            bindings: toml.bindings,
            paths: toml.paths,
            contracts,
        })
    }

    pub fn default_network_name(&self) -> &str {
        &self.default_network
    }

    pub fn default_network(&self) -> &NetworkProfile {
        // checked on load
        &self.networks[&self.default_network]
    }

    pub fn network(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }

    /// All network profiles, ordered by name.
    pub fn networks(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.networks.values()
    }

    /// Deployment defaults for a contract, by bare (`Name`) or qualified (`Source.sol:Name`) name.
    pub fn contract(&self, name: &str) -> Option<&ContractConfig> {
        self.contracts
            .get(name)
            .or_else(|| name.rsplit_once(':').and_then(|(_, name)| self.contracts.get(name)))
    }
}

fn check_compiler_version(version: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = version.split('.').collect();
    let valid = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidCompilerVersion(version.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../../../Flash.toml");

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn kovan_env(name: &str) -> Option<String> {
        match name {
            "INFURA_API_KEY" => Some("9aa3d95b3bc440fa88ea12eaa4456161".to_owned()),
            "KOVAN_PRIVATE_KEY" => Some(KEY.to_owned()),
            "ETHERSCAN_API_KEY" => Some("explorer-key".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn sample_config_loads_without_secrets() {
        let config = Config::from_toml_str(SAMPLE, &no_env).unwrap();
        assert_eq!(config.default_network_name(), LOCALHOST);
        assert_eq!(config.compiler.version.as_deref(), Some("0.6.8"));
        assert!(config.explorer.api_key.is_empty());
        assert_eq!(config.bindings.target, BindingTarget::Alloy);

        let kovan = config.network("kovan").unwrap();
        assert_eq!(kovan.url(), "https://kovan.infura.io/v3/");
        assert!(kovan.accounts().is_empty());

        let coverage = config.network("coverage").unwrap();
        assert_eq!(coverage.url(), "http://127.0.0.1:8555");

        let flash = config.contract("ERC20FlashTest").unwrap();
        assert_eq!(
            flash.constructor_args,
            vec!["0x31d680f9B98899925B19C9455423527d3AC36172".to_owned()]
        );
    }

    #[test]
    fn sample_config_picks_up_secrets() {
        let config = Config::from_toml_str(SAMPLE, &kovan_env).unwrap();
        let kovan = config.network("kovan").unwrap();
        assert_eq!(
            kovan.url(),
            "https://kovan.infura.io/v3/9aa3d95b3bc440fa88ea12eaa4456161"
        );
        assert_eq!(kovan.accounts().len(), 1);
        assert_eq!(config.explorer.api_key, "explorer-key");
        assert!(!format!("{kovan:?}").contains("9aa3d95b"));
        assert!(!format!("{:?}", config.explorer).contains("explorer-key"));
    }

    #[test]
    fn one_profile_per_network_name() {
        let config = Config::from_toml_str(
            r#"
            [networks.a]
            url = "http://127.0.0.1:1"
            [networks.b]
            url = "http://127.0.0.1:2"
            "#,
            &no_env,
        )
        .unwrap();
        let names: Vec<_> = config.networks().map(|n| n.name()).collect();
        assert_eq!(names, vec!["a", "b", LOCALHOST]);
    }

    #[test]
    fn duplicate_networks_are_rejected() {
        let err = Config::from_toml_str(
            r#"
            [networks.kovan]
            url = "http://127.0.0.1:1"
            [networks.kovan]
            url = "http://127.0.0.1:2"
            "#,
            &no_env,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TomlRead(_)), "{err}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("solc = { version = \"0.6.8\" }", &no_env).unwrap_err();
        assert!(matches!(err, ConfigError::TomlRead(_)), "{err}");
    }

    #[test]
    fn empty_config_is_localhost() {
        let config = Config::from_toml_str("", &no_env).unwrap();
        assert_eq!(config.default_network().url(), LOCALHOST_URL);
        assert_eq!(config.paths.artifacts, PathBuf::from(artifact::DEFAULT_DIR));
        assert_eq!(config.bindings.out_dir, PathBuf::from(DEFAULT_BINDINGS_DIR));
        assert!(config.contract("ERC20FlashTest").is_none());
    }

    #[test]
    fn default_network_must_exist() {
        let err = Config::from_toml_str("default_network = \"kovan\"", &no_env).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(name) if name == "kovan"));
    }

    #[test]
    fn required_secrets_must_be_set() {
        let err = Config::from_toml_str(
            "[networks.kovan]\nurl = \"https://kovan.infura.io/v3/${INFURA_API_KEY}\"",
            &no_env,
        )
        .unwrap_err();
        assert!(
            matches!(&err, ConfigError::MissingEnv { key, var } if key == "networks.kovan.url" && var == "INFURA_API_KEY"),
            "{err}"
        );
    }

    #[test]
    fn rejects_malformed_values() {
        let err = Config::from_toml_str("[networks.x]\nurl = \"not a url\"", &no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }), "{err}");

        let err = Config::from_toml_str(
            "[networks.x]\nurl = \"http://127.0.0.1:1\"\naccounts = [\"0x1234\"]",
            &no_env,
        )
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidAccount { index: 0, .. }),
            "{err}"
        );

        let err = Config::from_toml_str("[compiler]\nversion = \"^0.6\"", &no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCompilerVersion(_)), "{err}");
    }

    #[test]
    fn qualified_contract_names_find_defaults() {
        let config = Config::from_toml_str(
            "[contracts.Token]\nconstructor_args = [\"${OWNER:-0x0000000000000000000000000000000000000001}\"]\nconstructor_value = \"0.5\"",
            &no_env,
        )
        .unwrap();
        let token = config.contract("contracts/Token.sol:Token").unwrap();
        assert_eq!(
            token.constructor_args,
            vec!["0x0000000000000000000000000000000000000001".to_owned()]
        );
        assert_eq!(token.constructor_value.as_deref(), Some("0.5"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        assert!(matches!(Config::load(&path), Err(ConfigError::Missing(p)) if p == path));

        fs::write(&path, "default_network = \"localhost\"").unwrap();
        assert_eq!(Config::load(&path).unwrap().default_network_name(), LOCALHOST);
    }
}
