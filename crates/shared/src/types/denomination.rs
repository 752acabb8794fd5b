//! Denomination references.
//!
//! Every monetary report is expressed in exactly one unit: either a global
//! unit (shared by all entities, e.g. a currency) or a custom unit defined by
//! the entity. The wire carries this as two nullable keys; here it is a sum
//! type so that the both-set and neither-set states cannot be constructed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{CustomUnitId, GlobalUnitId};
use crate::error::{TallyError, TallyResult};

/// Wire key carrying a global unit denomination.
pub const GLOBAL_UNIT_KEY: &str = "global_unit_denomination";
/// Wire key carrying a custom unit denomination.
pub const CUSTOM_UNIT_KEY: &str = "custom_unit_denomination";

/// The unit a report or ledger is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Denomination {
    /// A unit shared by all entities.
    GlobalUnit(GlobalUnitId),
    /// A unit defined by the requesting entity.
    CustomUnit(CustomUnitId),
}

impl Denomination {
    /// Denominates in a global unit.
    #[must_use]
    pub const fn global(id: GlobalUnitId) -> Self {
        Self::GlobalUnit(id)
    }

    /// Denominates in a custom unit.
    #[must_use]
    pub const fn custom(id: CustomUnitId) -> Self {
        Self::CustomUnit(id)
    }

    /// Returns the global unit, if this is one.
    #[must_use]
    pub const fn global_unit(&self) -> Option<GlobalUnitId> {
        match self {
            Self::GlobalUnit(id) => Some(*id),
            Self::CustomUnit(_) => None,
        }
    }

    /// Returns the custom unit, if this is one.
    #[must_use]
    pub const fn custom_unit(&self) -> Option<CustomUnitId> {
        match self {
            Self::CustomUnit(id) => Some(*id),
            Self::GlobalUnit(_) => None,
        }
    }

    /// Builds a denomination from the wire's nullable pair.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::MalformedResponse` unless exactly one side is present.
    pub fn from_wire(global: Option<i64>, custom: Option<i64>) -> TallyResult<Self> {
        match (global, custom) {
            (Some(id), None) => Ok(Self::GlobalUnit(GlobalUnitId(id))),
            (None, Some(id)) => Ok(Self::CustomUnit(CustomUnitId(id))),
            (Some(_), Some(_)) => Err(TallyError::malformed(
                "both global and custom unit denominations present",
            )),
            (None, None) => Err(TallyError::malformed("no denomination present")),
        }
    }

    /// Writes the wire's nullable pair into a JSON object.
    pub fn write_wire(&self, target: &mut Map<String, Value>) {
        let (global, custom) = match self {
            Self::GlobalUnit(id) => (Value::from(id.0), Value::Null),
            Self::CustomUnit(id) => (Value::Null, Value::from(id.0)),
        };
        target.insert(GLOBAL_UNIT_KEY.to_string(), global);
        target.insert(CUSTOM_UNIT_KEY.to_string(), custom);
    }
}

impl std::fmt::Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GlobalUnit(id) => write!(f, "global unit {id}"),
            Self::CustomUnit(id) => write!(f, "custom unit {id}"),
        }
    }
}
