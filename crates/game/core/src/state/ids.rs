//! Identifier newtypes shared across the run model.

use core::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id!(
    /// Identity of a hostile AI opponent (regular or blockade encounter).
    HostileId
);
string_id!(
    /// Identity of a boss encounter.
    BossId
);
string_id!(
    /// Key of a ship section (`bridge`, `power_cell`, ...).
    SectionKey
);
string_id!(
    /// Identity of a drone blueprint.
    BlueprintId
);
string_id!(
    /// Identity of a hostile deck used to parameterize salvage generation.
    DeckId
);

/// Axial hex coordinate of a point of interest.
///
/// Ordered so coordinate sets iterate deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_raw_value() {
        assert_eq!(HostileId::new("raider").to_string(), "raider");
        assert_eq!(HexCoord::new(2, -1).to_string(), "(2, -1)");
    }

    #[test]
    fn coords_order_by_q_then_r() {
        assert!(HexCoord::new(0, 5) < HexCoord::new(1, 0));
        assert!(HexCoord::new(1, 0) < HexCoord::new(1, 1));
    }
}
