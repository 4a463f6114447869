//! Bitstream framing (spec §4.H): a fixed-size magic/version/type header
//! in front of every payload, followed by an optional length-prefixed
//! metadata block.

use crate::bitstream::{DecoderBuffer, EncoderBuffer};
use crate::error::{Error, Result};

pub const MAGIC: &[u8; 5] = b"DRACO";
pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 0;

/// Which top-level codec produced the payload that follows the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderType {
    PointCloudSequential,
    MeshSequential,
    MeshEdgebreaker,
}

impl EncoderType {
    fn wire_tag(self) -> u8 {
        match self {
            EncoderType::PointCloudSequential => 0,
            EncoderType::MeshSequential => 1,
            EncoderType::MeshEdgebreaker => 2,
        }
    }

    fn from_wire_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => EncoderType::PointCloudSequential,
            1 => EncoderType::MeshSequential,
            2 => EncoderType::MeshEdgebreaker,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Header {
    pub encoder_type: EncoderType,
    pub encoder_method: u8,
    pub flags: u16,
    pub metadata: Vec<u8>,
}

impl Header {
    pub fn new(encoder_type: EncoderType) -> Self {
        Self {
            encoder_type,
            encoder_method: 0,
            flags: 0,
            metadata: Vec::new(),
        }
    }

    pub fn write(&self, out: &mut EncoderBuffer) -> Result<()> {
        out.write_bytes(MAGIC)?;
        out.write_u8(VERSION_MAJOR)?;
        out.write_u8(VERSION_MINOR)?;
        out.write_u8(self.encoder_type.wire_tag())?;
        out.write_u8(self.encoder_method)?;
        out.write_u16(self.flags)?;
        out.write_varint(self.metadata.len() as u64)?;
        out.write_bytes(&self.metadata)?;
        Ok(())
    }

    pub fn read(data: &mut DecoderBuffer) -> Result<Self> {
        let magic = data.read_bytes(5)?;
        if magic != MAGIC.as_slice() {
            return Err(Error::corrupt("bitstream magic does not match \"DRACO\""));
        }
        let major = data.read_u8()?;
        let minor = data.read_u8()?;
        if major > VERSION_MAJOR {
            return Err(Error::UnsupportedVersion { major, minor });
        }
        let encoder_type = EncoderType::from_wire_tag(data.read_u8()?)
            .ok_or_else(|| Error::corrupt("unknown encoder type tag"))?;
        let encoder_method = data.read_u8()?;
        let flags = data.read_u16()?;
        let metadata_len = data.read_varint()? as usize;
        let metadata = data.read_bytes(metadata_len)?.to_vec();
        Ok(Self {
            encoder_type,
            encoder_method,
            flags,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_roundtrips() {
        let mut header = Header::new(EncoderType::MeshEdgebreaker);
        header.metadata = b"hello".to_vec();
        let mut out = EncoderBuffer::new();
        header.write(&mut out).unwrap();
        let bytes = out.into_bytes();
        let mut data = DecoderBuffer::new(&bytes);
        let back = Header::read(&mut data).unwrap();
        assert_eq!(back.encoder_type, EncoderType::MeshEdgebreaker);
        assert_eq!(back.metadata, b"hello");
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = vec![b'D', b'R', b'A', b'C', b'X'];
        bytes.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0]);
        let mut data = DecoderBuffer::new(&bytes);
        assert!(matches!(Header::read(&mut data), Err(Error::CorruptBitstream(_))));
    }

    #[test]
    fn rejects_future_major_version() {
        let mut header = Header::new(EncoderType::PointCloudSequential);
        header.metadata = Vec::new();
        let mut out = EncoderBuffer::new();
        out.write_bytes(MAGIC).unwrap();
        out.write_u8(VERSION_MAJOR + 1).unwrap();
        out.write_u8(0).unwrap();
        out.write_u8(0).unwrap();
        out.write_u8(0).unwrap();
        out.write_u16(0).unwrap();
        out.write_varint(0).unwrap();
        let bytes = out.into_bytes();
        let mut data = DecoderBuffer::new(&bytes);
        assert!(matches!(Header::read(&mut data), Err(Error::UnsupportedVersion { .. })));
        let _ = header;
    }
}
