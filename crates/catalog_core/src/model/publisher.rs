//! Publisher record.

use super::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A publishing company with optional contact details.
///
/// `address` and `phone` are free-form and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Publisher {
    id: EntityId,
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Publisher {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Creates a publisher with blank address and phone.
    pub fn named(id: EntityId, name: impl Into<String>) -> Self {
        Self::new(id, name, "", "")
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl Entity for Publisher {
    fn id(&self) -> EntityId {
        Publisher::id(self)
    }
}

impl Display for Publisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Publisher {} ({})", self.name, self.id)
    }
}
