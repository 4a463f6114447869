//! Integer newtypes for the geometry's various index spaces. Keeping
//! these distinct at the type level is cheap and catches the class of bug
//! where a face index slips into a call expecting a corner index.

macro_rules! index_type {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                Self(v)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self(v as u32)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(PointIndex, "Index of a point within a PointCloud, `[0, N)`.");
index_type!(FaceIndex, "Index of a triangular face within a Mesh, `[0, F)`.");
index_type!(CornerIndex, "Index of a corner in the corner table, `[0, 3F)`.");
index_type!(
    AttributeValueIndex,
    "Index into an attribute's raw value buffer, `[0, M)`."
);
index_type!(
    VertexIndex,
    "Index of a vertex in EdgeBreaker's traversal-order numbering."
);
