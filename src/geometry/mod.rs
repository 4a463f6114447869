//! Geometry data model (spec §3): point clouds, meshes, and the transient
//! corner table built during mesh encode/decode.

mod corner_table;
mod index;
mod mesh;
mod point_cloud;

pub use corner_table::CornerTable;
pub use index::{AttributeValueIndex, CornerIndex, FaceIndex, PointIndex, VertexIndex};
pub use mesh::{Face, Mesh};
pub use point_cloud::PointCloud;

/// Either geometry kind this crate's codec accepts (spec §3): a loose
/// point cloud, or a mesh with triangle connectivity.
#[derive(Clone, Debug)]
pub enum Geometry {
    PointCloud(PointCloud),
    Mesh(Mesh),
}

impl Geometry {
    pub fn points(&self) -> &PointCloud {
        match self {
            Geometry::PointCloud(cloud) => cloud,
            Geometry::Mesh(mesh) => mesh.points(),
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Geometry::PointCloud(_) => None,
            Geometry::Mesh(mesh) => Some(mesh),
        }
    }
}
