use serde::{Deserialize, Serialize};

/// Id of the locally synthesized "All" pseudo-genre.
pub const ALL_GENRES_ID: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The "All" sentinel. Never sent to the catalog as a filter.
    pub fn all() -> Self {
        Self::new(ALL_GENRES_ID, "All")
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_GENRES_ID
    }

    /// Id to send as a catalog filter, if any.
    pub fn filter_id(&self) -> Option<u32> {
        (!self.is_all()).then_some(self.id)
    }
}
