//! Method-call dispatch for platform channels.
//!
//! Platform code forwards a method name and a JSON argument map; paths are
//! decoded here into bridge-format bitmaps and handed to
//! [`ImageCompareBridge`]. Failures come back as `{ "code", "message" }`.

use super::{ImageCompareBridge, RawImage, BRIDGE_FORMAT};
use crate::core::codec;
use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;

/// Arguments of `computeSimilarity`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityArgs {
    pub image1_path: Option<String>,
    pub image2_path: Option<String>,
}

/// Arguments of `createComparisonImage`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonArgs {
    pub image1_path: Option<String>,
    pub image2_path: Option<String>,
    pub alpha: Option<f64>,
    pub vertical_cut: Option<bool>,
}

/// Dispatch a platform method call.
///
/// Returns the success payload, or an error payload with a stable code.
pub fn handle_method_call(
    bridge: &ImageCompareBridge,
    method: &str,
    args: &Value,
) -> Result<Value, Value> {
    debug!(method, "Bridge method call");
    dispatch(bridge, method, args).map_err(|e| error_payload(&e))
}

fn dispatch(bridge: &ImageCompareBridge, method: &str, args: &Value) -> Result<Value, BridgeError> {
    match method {
        "computeSimilarity" => {
            let args: SimilarityArgs = parse_args(args)?;
            let (first, second) = match (args.image1_path, args.image2_path) {
                (Some(first), Some(second)) => (first, second),
                _ => {
                    return Err(BridgeError::InvalidArguments(
                        "Image paths cannot be null".to_string(),
                    ))
                }
            };
            let (first, second) = load_pair(&first, &second)?;
            Ok(json!(bridge.compute_similarity(first, second)?))
        }
        "createComparisonImage" => {
            let args: ComparisonArgs = parse_args(args)?;
            let (first, second, alpha, vertical_cut) = match args {
                ComparisonArgs {
                    image1_path: Some(first),
                    image2_path: Some(second),
                    alpha: Some(alpha),
                    vertical_cut: Some(vertical_cut),
                } => (first, second, alpha, vertical_cut),
                _ => {
                    return Err(BridgeError::InvalidArguments(
                        "Arguments cannot be null".to_string(),
                    ))
                }
            };
            let (first, second) = load_pair(&first, &second)?;
            Ok(json!(bridge.create_comparison_image(first, second, alpha, vertical_cut)?))
        }
        other => Err(BridgeError::NotImplemented {
            method: other.to_string(),
        }),
    }
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: &Value) -> Result<T, BridgeError> {
    serde_json::from_value(args.clone()).map_err(|e| BridgeError::InvalidArguments(e.to_string()))
}

fn load_pair(first: &str, second: &str) -> Result<(RawImage, RawImage), BridgeError> {
    // both files are checked before either is decoded
    for path in [first, second] {
        if !Path::new(path).exists() {
            return Err(BridgeError::FileNotFound { path: path.into() });
        }
    }

    let first = codec::decode(Path::new(first), BRIDGE_FORMAT)?;
    let second = codec::decode(Path::new(second), BRIDGE_FORMAT)?;
    Ok((first.into(), second.into()))
}

fn error_payload(error: &BridgeError) -> Value {
    json!({
        "code": error.code(),
        "message": error.to_string(),
    })
}
