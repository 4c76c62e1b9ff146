// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! `${VAR}` interpolation of configuration values.
//!
//! A reference is either `${NAME}`, which must be set, or `${NAME:-fallback}`, which resolves to
//! `fallback` when `NAME` is unset.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::ConfigError;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("valid reference pattern")
});

/// Source of environment variables.
pub trait Env {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<F> Env for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Resolves every variable reference in `value`. `key` names the configuration entry, for errors.
pub fn interpolate(key: &str, value: &str, env: &impl Env) -> Result<String, ConfigError> {
    let mut missing = None;
    let resolved = REFERENCE.replace_all(value, |caps: &Captures<'_>| {
        let name = &caps[1];
        match (env.var(name), caps.get(3)) {
            (Some(value), _) => value,
            (None, Some(fallback)) => fallback.as_str().to_owned(),
            (None, None) => {
                missing.get_or_insert_with(|| name.to_owned());
                String::new()
            }
        }
    });
    match missing {
        Some(var) => Err(ConfigError::MissingEnv {
            key: key.to_owned(),
            var,
        }),
        None => Ok(resolved.into_owned()),
    }
}
