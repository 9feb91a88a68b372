//! Author record.

use super::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An author of one or more books. Only the name is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    id: EntityId,
    pub name: String,
}

impl Author {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl Entity for Author {
    fn id(&self) -> EntityId {
        Author::id(self)
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author {} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::Author;

    #[test]
    fn equality_covers_id_and_name() {
        assert_eq!(Author::new(1, "Wrede"), Author::new(1, "Wrede"));
        assert_ne!(Author::new(1, "Wrede"), Author::new(2, "Wrede"));
        assert_ne!(Author::new(1, "Wrede"), Author::new(1, "McKinley"));
    }

    #[test]
    fn display_includes_name_and_id() {
        assert_eq!(Author::new(3, "Robin McKinley").to_string(), "Author Robin McKinley (3)");
    }
}
