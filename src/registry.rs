use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{LossError, Result};
use crate::loss::{
    CategoricalCrossentropy, CosineDistance, L2Distance, SequenceCategoricalCrossentropy,
};

/// Key carrying the loss name inside a config block.
const SECTION_KEY: &str = "@losses";

/// Every versioned name [`make`] resolves.
pub const NAMES: [&str; 4] = [
    "CategoricalCrossentropy.v1",
    "SequenceCategoricalCrossentropy.v1",
    "L2Distance.v1",
    "CosineDistance.v1",
];

/// A loss constructed by name from a flat option mapping.
///
/// Callers match on the variant to reach the concrete [`crate::loss::Loss`]
/// impl. The sequence loss consumes slices of batches rather than single
/// batches, so the variants cannot share one boxed object surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisteredLoss {
    CategoricalCrossentropy(CategoricalCrossentropy),
    SequenceCategoricalCrossentropy(SequenceCategoricalCrossentropy),
    L2Distance(L2Distance),
    CosineDistance(CosineDistance),
}

impl RegisteredLoss {
    /// The versioned name this instance was built under.
    pub fn name(&self) -> &'static str {
        match self {
            RegisteredLoss::CategoricalCrossentropy(_) => "CategoricalCrossentropy.v1",
            RegisteredLoss::SequenceCategoricalCrossentropy(_) => {
                "SequenceCategoricalCrossentropy.v1"
            }
            RegisteredLoss::L2Distance(_) => "L2Distance.v1",
            RegisteredLoss::CosineDistance(_) => "CosineDistance.v1",
        }
    }
}

/// Builds the named loss from a flat mapping of option name to value.
///
/// Missing options fall back to their defaults. Unknown names, unknown
/// option keys and wrongly-typed values are all rejected here, before the
/// loss is ever used.
pub fn make(name: &str, options: &Map<String, Value>) -> Result<RegisteredLoss> {
    match name {
        "CategoricalCrossentropy.v1" => {
            Ok(RegisteredLoss::CategoricalCrossentropy(parse(name, options)?))
        }
        "SequenceCategoricalCrossentropy.v1" => Ok(
            RegisteredLoss::SequenceCategoricalCrossentropy(parse(name, options)?),
        ),
        "L2Distance.v1" => Ok(RegisteredLoss::L2Distance(parse(name, options)?)),
        "CosineDistance.v1" => Ok(RegisteredLoss::CosineDistance(parse(name, options)?)),
        _ => Err(LossError::InvalidConfig(format!(
            "unknown loss {name:?}; expected one of {NAMES:?}"
        ))),
    }
}

/// Builds a loss from one config block, e.g.
/// `{"@losses": "CosineDistance.v1", "normalize": true}`.
pub fn from_config(block: &Value) -> Result<RegisteredLoss> {
    let object = block
        .as_object()
        .ok_or_else(|| LossError::InvalidConfig("config block must be a JSON object".into()))?;
    let name = object
        .get(SECTION_KEY)
        .ok_or_else(|| LossError::InvalidConfig(format!("config block missing {SECTION_KEY:?}")))?
        .as_str()
        .ok_or_else(|| LossError::InvalidConfig(format!("{SECTION_KEY:?} must be a string")))?;

    let mut options = object.clone();
    options.remove(SECTION_KEY);
    make(name, &options)
}

fn parse<T: DeserializeOwned>(name: &str, options: &Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(options.clone()))
        .map_err(|e| LossError::InvalidConfig(format!("{name}: {e}")))
}
