//! `PointAttribute` (spec §3): a semantic type, a primitive data type, a
//! component count, a raw value buffer, and a point-to-value index map.
//!
//! Per spec §9 ("cyclic references"), an attribute never reaches back to
//! its owning cloud: callers pass the point count in explicitly wherever
//! it's needed (e.g. validation), rather than the attribute holding a
//! pointer to its owner.

use crate::attribute::DataType;
use crate::error::{Error, Result};
use crate::geometry::{AttributeValueIndex, PointIndex};

/// What an attribute's values represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeSemantic {
    Position,
    Normal,
    Color,
    TexCoord,
    Generic,
}

/// A single attribute attached to a point cloud or mesh.
///
/// Values are stored as `f64` regardless of `data_type`; `data_type`
/// records the attribute's *declared* wire type so quantization and
/// normalization can interpret it correctly, without this crate carrying
/// a value enum for every primitive width.
#[derive(Clone, Debug)]
pub struct PointAttribute {
    id: u32,
    semantic: AttributeSemantic,
    data_type: DataType,
    num_components: u8,
    normalized: bool,
    /// Raw value buffer, `values.len() == num_values * num_components`.
    values: Vec<f64>,
    /// `map[point] = value index`. Empty means identity (direct attribute);
    /// see [`Self::is_direct`].
    value_map: Vec<AttributeValueIndex>,
}

impl PointAttribute {
    pub fn new(
        id: u32,
        semantic: AttributeSemantic,
        data_type: DataType,
        num_components: u8,
        normalized: bool,
    ) -> Result<Self> {
        if !(1..=16).contains(&num_components) {
            return Err(Error::InvalidParameter(format!(
                "attribute component count must be 1..=16, got {num_components}"
            )));
        }
        Ok(Self {
            id,
            semantic,
            data_type,
            num_components,
            normalized,
            values: Vec::new(),
            value_map: Vec::new(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Used by `PointCloud::add_attribute` to assign the owner-issued
    /// stable id at insertion time.
    pub(crate) fn reassign_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn semantic(&self) -> AttributeSemantic {
        self.semantic
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn num_components(&self) -> u8 {
        self.num_components
    }

    pub fn normalized(&self) -> bool {
        self.normalized
    }

    /// Number of distinct values stored (`M` in spec §3), not the number
    /// of points it's mapped over.
    pub fn num_values(&self) -> usize {
        self.values.len() / self.num_components as usize
    }

    /// True when every point maps to its own value 1:1 (an identity map).
    pub fn is_direct(&self) -> bool {
        self.value_map.is_empty()
    }

    /// Appends one value (`num_components` components) to the raw buffer
    /// and returns its index.
    pub fn push_value(&mut self, components: &[f64]) -> Result<AttributeValueIndex> {
        if components.len() != self.num_components as usize {
            return Err(Error::InvalidParameter(format!(
                "expected {} components, got {}",
                self.num_components,
                components.len()
            )));
        }
        let idx = AttributeValueIndex::from(self.num_values());
        self.values.extend_from_slice(components);
        Ok(idx)
    }

    /// Sets an explicit point -> value mapping, switching the attribute to
    /// "mapped" mode. `map[i]` must index a value already pushed.
    pub fn set_value_map(&mut self, map: Vec<AttributeValueIndex>) -> Result<()> {
        let num_values = self.num_values();
        for &v in &map {
            if v.as_usize() >= num_values {
                return Err(Error::InvalidParameter(format!(
                    "value map entry {v} out of range for {num_values} values"
                )));
            }
        }
        self.value_map = map;
        Ok(())
    }

    /// Validates that this attribute is consistent for a cloud of
    /// `num_points` points (spec §3 invariants).
    pub fn validate(&self, num_points: usize) -> Result<()> {
        if self.values.len() % self.num_components as usize != 0 {
            return Err(Error::Internal(
                "attribute value buffer length is not a multiple of component count".into(),
            ));
        }
        if !self.value_map.is_empty() {
            if self.value_map.len() != num_points {
                return Err(Error::InvalidParameter(format!(
                    "attribute {} value map has {} entries, expected {num_points}",
                    self.id,
                    self.value_map.len()
                )));
            }
            let num_values = self.num_values();
            for &v in &self.value_map {
                if v.as_usize() >= num_values {
                    return Err(Error::InvalidParameter(format!(
                        "attribute {} value map entry {v} out of range",
                        self.id
                    )));
                }
            }
        } else if self.num_values() != num_points {
            return Err(Error::InvalidParameter(format!(
                "direct attribute {} has {} values, expected {num_points}",
                self.id,
                self.num_values()
            )));
        }
        Ok(())
    }

    /// Resolves the value index backing `point`, applying the identity map
    /// when direct.
    pub fn value_index_for_point(&self, point: PointIndex) -> AttributeValueIndex {
        if self.value_map.is_empty() {
            AttributeValueIndex::from(point.as_usize())
        } else {
            self.value_map[point.as_usize()]
        }
    }

    /// Components of the value at `value_index`.
    pub fn value(&self, value_index: AttributeValueIndex) -> &[f64] {
        let n = self.num_components as usize;
        let start = value_index.as_usize() * n;
        &self.values[start..start + n]
    }

    /// Components of the value mapped to `point`.
    pub fn value_for_point(&self, point: PointIndex) -> &[f64] {
        self.value(self.value_index_for_point(point))
    }

    pub fn all_values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_attribute_validates_one_value_per_point() {
        let mut attr = PointAttribute::new(0, AttributeSemantic::Position, DataType::F32, 3, false).unwrap();
        attr.push_value(&[0.0, 0.0, 0.0]).unwrap();
        attr.push_value(&[1.0, 0.0, 0.0]).unwrap();
        assert!(attr.validate(2).is_ok());
        assert!(attr.validate(3).is_err());
    }

    #[test]
    fn mapped_attribute_shares_values_across_points() {
        let mut attr = PointAttribute::new(1, AttributeSemantic::TexCoord, DataType::F32, 2, false).unwrap();
        let v0 = attr.push_value(&[0.0, 0.0]).unwrap();
        let v1 = attr.push_value(&[1.0, 1.0]).unwrap();
        attr.set_value_map(vec![v0, v0, v1]).unwrap();
        assert!(!attr.is_direct());
        assert!(attr.validate(3).is_ok());
        assert_eq!(attr.value_for_point(PointIndex::from(2usize)), &[1.0, 1.0]);
    }

    #[test]
    fn rejects_out_of_range_component_count() {
        assert!(PointAttribute::new(0, AttributeSemantic::Generic, DataType::F32, 0, false).is_err());
        assert!(PointAttribute::new(0, AttributeSemantic::Generic, DataType::F32, 17, false).is_err());
    }
}
