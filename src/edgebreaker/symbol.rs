//! The EdgeBreaker symbol alphabet (spec §4.F): five connectivity
//! symbols plus a terminal-hole variant of `E` for components that end at
//! an open mesh boundary rather than closing to a point.
//!
//! This alphabet has no handle symbols (`M`/`N` in some EdgeBreaker
//! literature) for stitching together two arms of a traversal that meet
//! on a genus-producing topology (a torus, say). [`super::encoder::check_genus_zero`]
//! rejects such components before traversal starts rather than emitting
//! a symbol this decoder couldn't reconstruct from.

/// One connectivity symbol per face, emitted in traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// Apex unvisited: grow the active boundary by one vertex.
    C,
    /// Apex visited, left neighbor previously visited: continue right.
    L,
    /// Apex visited, right neighbor previously visited: continue left.
    R,
    /// Apex visited, both neighbors unvisited: split the boundary.
    S,
    /// Apex visited, both neighbors visited: close the loop to a point.
    E,
    /// Like `E`, but the loop ends at an open mesh boundary (a hole)
    /// rather than closing with one final triangle.
    EHole,
}

impl Symbol {
    /// 3-bit wire tag (spec: "7 symbols -> 3-bit alphabet"; this crate
    /// uses 6 of the 7 slots and never emits the seventh, since it has no
    /// handle symbol).
    pub fn wire_tag(self) -> u16 {
        match self {
            Symbol::C => 0,
            Symbol::L => 1,
            Symbol::R => 2,
            Symbol::S => 3,
            Symbol::E => 4,
            Symbol::EHole => 5,
        }
    }

    pub fn from_wire_tag(tag: u16) -> Option<Self> {
        Some(match tag {
            0 => Symbol::C,
            1 => Symbol::L,
            2 => Symbol::R,
            3 => Symbol::S,
            4 => Symbol::E,
            5 => Symbol::EHole,
            _ => return None,
        })
    }

    /// Alphabet size used to size the rANS model for the connectivity
    /// stream.
    pub const ALPHABET_SIZE: usize = 7;
}
