//! Primitive value types a [`super::PointAttribute`] can hold.

/// The primitive type of a single component of an attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Bool,
}

impl DataType {
    /// Size in bytes of one component.
    pub fn size_bytes(self) -> usize {
        match self {
            DataType::I8 | DataType::U8 | DataType::Bool => 1,
            DataType::I16 | DataType::U16 => 2,
            DataType::I32 | DataType::U32 | DataType::F32 => 4,
            DataType::I64 | DataType::U64 | DataType::F64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DataType::F32 | DataType::F64)
    }

    /// Wire tag used in attribute metadata (spec §4.H per-attribute block).
    pub fn wire_tag(self) -> u8 {
        match self {
            DataType::I8 => 0,
            DataType::U8 => 1,
            DataType::I16 => 2,
            DataType::U16 => 3,
            DataType::I32 => 4,
            DataType::U32 => 5,
            DataType::I64 => 6,
            DataType::U64 => 7,
            DataType::F32 => 8,
            DataType::F64 => 9,
            DataType::Bool => 10,
        }
    }

    pub fn from_wire_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => DataType::I8,
            1 => DataType::U8,
            2 => DataType::I16,
            3 => DataType::U16,
            4 => DataType::I32,
            5 => DataType::U32,
            6 => DataType::I64,
            7 => DataType::U64,
            8 => DataType::F32,
            9 => DataType::F64,
            10 => DataType::Bool,
            _ => return None,
        })
    }
}
