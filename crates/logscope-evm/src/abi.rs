//! Contract ABI documents used for metadata calls.
//!
//! The resolver only needs zero-argument view functions (`name()`,
//! `symbol()`), so encoding is the 4-byte selector alone and decoding is the
//! function's output tuple.

use std::path::Path;

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_dyn_abi::Specifier;
use alloy_json_abi::{Function, JsonAbi};
use logscope_core::AbiError;

/// Minimal ERC-20 metadata ABI: `name()`, `symbol()`, `decimals()`.
pub const ERC20_METADATA_ABI: &str = r#"[
    {
        "name": "name",
        "type": "function",
        "inputs": [],
        "outputs": [{"name": "", "type": "string"}],
        "stateMutability": "view"
    },
    {
        "name": "symbol",
        "type": "function",
        "inputs": [],
        "outputs": [{"name": "", "type": "string"}],
        "stateMutability": "view"
    },
    {
        "name": "decimals",
        "type": "function",
        "inputs": [],
        "outputs": [{"name": "", "type": "uint8"}],
        "stateMutability": "view"
    }
]"#;

/// A parsed contract ABI.
#[derive(Debug, Clone)]
pub struct ContractAbi {
    abi: JsonAbi,
}

impl ContractAbi {
    /// Parse a standard Ethereum ABI JSON document.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let abi: JsonAbi =
            serde_json::from_str(json).map_err(|e| AbiError::InvalidJson(e.to_string()))?;
        Ok(Self { abi })
    }

    /// Read and parse an ABI file. Accepts either a bare ABI array or a
    /// compiler artifact with an `"abi"` key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AbiError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| AbiError::InvalidJson(e.to_string()))?;
        let abi_value = match value {
            serde_json::Value::Object(mut obj) if obj.contains_key("abi") => {
                obj.remove("abi").unwrap_or_default()
            }
            other => other,
        };
        let abi: JsonAbi = serde_json::from_value(abi_value)
            .map_err(|e| AbiError::InvalidJson(e.to_string()))?;
        Ok(Self { abi })
    }

    /// The built-in ERC-20 metadata ABI.
    pub fn erc20() -> Result<Self, AbiError> {
        Self::from_json(ERC20_METADATA_ABI)
    }

    pub fn has_function(&self, method: &str) -> bool {
        self.abi.function(method).is_some_and(|f| !f.is_empty())
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.abi.functions().map(|f| f.name.as_str()).collect()
    }

    fn function(&self, method: &str) -> Result<&Function, AbiError> {
        self.abi
            .function(method)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| AbiError::MissingFunction(method.to_string()))
    }

    /// Calldata for a zero-argument call to `method`.
    pub fn encode_call(&self, method: &str) -> Result<Vec<u8>, AbiError> {
        let func = self.function(method)?;
        if !func.inputs.is_empty() {
            return Err(AbiError::UnsupportedType {
                method: method.to_string(),
                reason: format!("expected no inputs, found {}", func.inputs.len()),
            });
        }
        Ok(func.selector().to_vec())
    }

    /// Decode the return data of `method` into its output values.
    pub fn decode_output(&self, method: &str, data: &[u8]) -> Result<Vec<DynSolValue>, AbiError> {
        let func = self.function(method)?;
        let types: Vec<DynSolType> = func
            .outputs
            .iter()
            .map(|p| {
                p.resolve().map_err(|e| AbiError::UnsupportedType {
                    method: method.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<_, _>>()?;

        if types.is_empty() {
            return Ok(vec![]);
        }

        let decoded = DynSolType::Tuple(types)
            .abi_decode_params(data)
            .map_err(|e| AbiError::OutputDecode {
                method: method.to_string(),
                reason: e.to_string(),
            })?;

        Ok(match decoded {
            DynSolValue::Tuple(vals) => vals,
            other => vec![other],
        })
    }
}

/// Text content of a `string` or `bytes32` return value.
///
/// Some early tokens (MKR, SAI) return `bytes32` from `name()`/`symbol()`;
/// trailing NUL padding is stripped.
pub fn as_text(value: &DynSolValue) -> Option<String> {
    match value {
        DynSolValue::String(s) => Some(s.clone()),
        DynSolValue::FixedBytes(word, size) => {
            let bytes = &word[..*size];
            let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
            std::str::from_utf8(&bytes[..end]).ok().map(str::to_string)
        }
        _ => None,
    }
}
