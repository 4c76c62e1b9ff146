// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{JsonAbi, StateMutability},
    primitives::{Bytes, U256},
};

use super::DeploymentError::{self, InvalidConstructor};

/// ABI-encodes constructor arguments given as strings.
///
/// Each argument is coerced to the Solidity type of the matching constructor input. Contracts
/// without a constructor accept no arguments.
pub fn encode_constructor_args(
    abi: &JsonAbi,
    args: &[String],
    value: U256,
) -> Result<Vec<u8>, DeploymentError> {
    let Some(constructor) = abi.constructor() else {
        if !args.is_empty() {
            return Err(InvalidConstructor(format!(
                "contract has no constructor but {} arguments were given",
                args.len()
            )));
        }
        if !value.is_zero() {
            return Err(InvalidConstructor(
                "attempting to send Ether to a contract without a payable constructor".to_owned(),
            ));
        }
        return Ok(Vec::new());
    };

    if constructor.state_mutability != StateMutability::Payable && !value.is_zero() {
        return Err(InvalidConstructor(
            "attempting to send Ether to non-payable constructor".to_owned(),
        ));
    }
    if args.len() != constructor.inputs.len() {
        return Err(InvalidConstructor(format!(
            "mismatch number of constructor arguments (want {} ({}); got {})",
            constructor
                .inputs
                .iter()
                .map(|param| param.ty.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            constructor.inputs.len(),
            args.len(),
        )));
    }

    let mut values = Vec::<DynSolValue>::with_capacity(args.len());
    for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
        let ty = param.resolve().map_err(|err| {
            InvalidConstructor(format!("could not resolve constructor arg {param}: {err}"))
        })?;
        let value = ty.coerce_str(arg).map_err(|err| {
            InvalidConstructor(format!("could not parse constructor arg {param}: {err}"))
        })?;
        values.push(value);
    }

    constructor
        .abi_encode_input(&values)
        .map_err(|err| InvalidConstructor(err.to_string()))
}

/// Creation code followed by the encoded constructor arguments.
pub fn init_code(bytecode: &Bytes, encoded_args: &[u8]) -> Bytes {
    let mut code = Vec::with_capacity(bytecode.len() + encoded_args.len());
    code.extend_from_slice(bytecode);
    code.extend_from_slice(encoded_args);
    code.into()
}
