// Measured parameters and the entity kinds they are reported for
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Power,
    Voltage,
    Current,
    Energy,
}

impl Parameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Power => "power",
            Parameter::Voltage => "voltage",
            Parameter::Current => "current",
            Parameter::Energy => "energy",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Power => "W",
            Parameter::Voltage => "V",
            Parameter::Current => "A",
            Parameter::Energy => "kWh",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Inverter,
    String,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Inverter => "inverter",
            EntityKind::String => "string",
        }
    }

    /// Tag carrying the entity id in the measurement store.
    pub fn id_tag(&self) -> &'static str {
        match self {
            EntityKind::Inverter => "inverter_id",
            EntityKind::String => "string_id",
        }
    }
}
