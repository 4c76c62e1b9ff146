// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

pub mod artifact;
pub mod bindings;
pub mod config;
pub mod deployment;
pub mod network;
