// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

pub use bindings::bindings;
pub use deploy::{deploy, estimate_gas, prepare};
pub use networks::networks;

mod bindings;
mod deploy;
mod networks;
