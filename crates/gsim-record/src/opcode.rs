//! The authoritative opcode table. Values are stable; new
//! opcodes may only be added, never renumbered.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    Terminate = 0x0000_0000,
    Simulate = 0x0000_0001,
    AgentCreate = 0x0100_0000,
    AgentDelete = 0x0100_0001,
    AgentCurrentNode = 0x0110_0000,
    AgentPrevNode = 0x0110_0001,
    AgentSensorRegister = 0x0111_0000,
    AgentSensorDeregister = 0x0111_0001,
    SensorCreate = 0x0200_0000,
    ComponentRegister = 0x0300_0000,
    ComponentCreate = 0x0300_0001,
    ComponentUpdate = 0x0300_0002,
}

impl Opcode {
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Opcode {
    type Error = RecordError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0x0000_0000 => Opcode::Terminate,
            0x0000_0001 => Opcode::Simulate,
            0x0100_0000 => Opcode::AgentCreate,
            0x0100_0001 => Opcode::AgentDelete,
            0x0110_0000 => Opcode::AgentCurrentNode,
            0x0110_0001 => Opcode::AgentPrevNode,
            0x0111_0000 => Opcode::AgentSensorRegister,
            0x0111_0001 => Opcode::AgentSensorDeregister,
            0x0200_0000 => Opcode::SensorCreate,
            0x0300_0000 => Opcode::ComponentRegister,
            0x0300_0001 => Opcode::ComponentCreate,
            0x0300_0002 => Opcode::ComponentUpdate,
            other => return Err(RecordError::UnknownOpcode(other)),
        })
    }
}

/// Manual `Serialize`/`Deserialize` so the literal spec-table values, not an
/// enum discriminant index, are what actually hits disk — and so a replayed
/// file with an opcode this binary doesn't know about fails loudly rather
/// than silently decoding as the wrong variant.
impl Serialize for Opcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.as_u32())
    }
}

impl<'de> Deserialize<'de> for Opcode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u32::deserialize(deserializer)?;
        Opcode::try_from(raw).map_err(de::Error::custom)
    }
}
