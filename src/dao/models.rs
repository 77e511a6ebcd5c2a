/// Player record shared by every storage backend.
///
/// `id` holds the external string form of the backend-native identifier and is
/// empty until the record has been persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerEntity {
    /// External identifier assigned by the backend on create.
    pub id: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Account balance.
    pub balance: f64,
}

impl PlayerEntity {
    /// Copy of the record carrying `id` in place of whatever the caller supplied.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self
        }
    }

    /// True when the mutable fields match, ignoring the identifier.
    pub fn same_fields(&self, other: &Self) -> bool {
        self.name == other.name && self.surname == other.surname && self.balance == other.balance
    }
}
