// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use std::fmt;
use std::process::ExitCode;

pub type FlashCliResult = Result<(), FlashCliError>;

#[derive(Debug)]
pub struct FlashCliError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl FlashCliError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for FlashCliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for FlashCliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for FlashCliError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<flash_tools::Error> for FlashCliError {
    fn from(err: flash_tools::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<flash_tools::core::config::ConfigError> for FlashCliError {
    fn from(err: flash_tools::core::config::ConfigError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<flash_tools::core::deployment::DeploymentError> for FlashCliError {
    fn from(err: flash_tools::core::deployment::DeploymentError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}
