use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Orientation of an entity relative to its underlying equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sense {
    #[default]
    Forward,
    Reversed,
}

impl Sense {
    pub fn is_reversed(&self) -> bool {
        matches!(self, Sense::Reversed)
    }
}

impl From<bool> for Sense {
    /// `true` means reversed, as kernels report it
    fn from(reversed: bool) -> Self {
        if reversed {
            Sense::Reversed
        } else {
            Sense::Forward
        }
    }
}

/// Serialized as a boolean flag, `true` when reversed.
impl Serialize for Sense {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(self.is_reversed())
    }
}

impl<'de> Deserialize<'de> for Sense {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(Sense::from)
    }
}
