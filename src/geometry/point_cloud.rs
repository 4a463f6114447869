//! `PointCloud` (spec §3): an ordered collection of points with attached
//! attributes, each assigned a stable id at insertion.

use crate::attribute::{AttributeSemantic, PointAttribute};
use crate::error::{Error, Result};

/// An ordered collection of points with a set of attached attributes.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    num_points: usize,
    attributes: Vec<PointAttribute>,
    next_attribute_id: u32,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Sets the point count. Must be called before attributes are
    /// validated; existing attributes are not retroactively checked until
    /// [`Self::validate`] runs.
    pub fn set_num_points(&mut self, n: usize) {
        self.num_points = n;
    }

    /// Adds an attribute, assigning it the next stable id, and returns
    /// that id.
    pub fn add_attribute(&mut self, mut attribute: PointAttribute) -> u32 {
        let id = self.next_attribute_id;
        self.next_attribute_id += 1;
        attribute.reassign_id(id);
        self.attributes.push(attribute);
        id
    }

    pub fn attribute(&self, id: u32) -> Option<&PointAttribute> {
        self.attributes.iter().find(|a| a.id() == id)
    }

    pub fn attribute_mut(&mut self, id: u32) -> Option<&mut PointAttribute> {
        self.attributes.iter_mut().find(|a| a.id() == id)
    }

    pub fn attribute_by_semantic(&self, semantic: AttributeSemantic) -> Option<&PointAttribute> {
        self.attributes.iter().find(|a| a.semantic() == semantic)
    }

    pub fn attributes(&self) -> &[PointAttribute] {
        &self.attributes
    }

    /// Spec §3 invariants: a Position attribute exists; every attribute's
    /// map and buffer lengths are consistent with `num_points`.
    pub fn validate(&self) -> Result<()> {
        if self.attribute_by_semantic(AttributeSemantic::Position).is_none() {
            return Err(Error::InvalidParameter(
                "geometry has no Position attribute".into(),
            ));
        }
        for attribute in &self.attributes {
            attribute.validate(self.num_points)?;
        }
        let mut seen = std::collections::HashSet::new();
        for attribute in &self.attributes {
            if !seen.insert(attribute.id()) {
                return Err(Error::Internal(format!("duplicate attribute id {}", attribute.id())));
            }
        }
        Ok(())
    }
}
