/// The five entity kinds a store holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// An organization
    Account,
    Contact,
    Opportunity,
    Lead,
    Case,
}

impl EntityKind {
    /// Every kind, in the order their tables are created
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Account,
        EntityKind::Contact,
        EntityKind::Opportunity,
        EntityKind::Lead,
        EntityKind::Case,
    ];

    /// Display name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Account => "Account",
            EntityKind::Contact => "Contact",
            EntityKind::Opportunity => "Opportunity",
            EntityKind::Lead => "Lead",
            EntityKind::Case => "Case",
        }
    }

    /// Three-character prefix of every id minted for this kind
    pub fn key_prefix(&self) -> &'static str {
        match self {
            EntityKind::Account => "001",
            EntityKind::Contact => "003",
            EntityKind::Opportunity => "006",
            EntityKind::Lead => "00Q",
            EntityKind::Case => "500",
        }
    }

    /// Backing table name for relational stores
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Account => "accounts",
            EntityKind::Contact => "contacts",
            EntityKind::Opportunity => "opportunities",
            EntityKind::Lead => "leads",
            EntityKind::Case => "cases",
        }
    }

    /// Look a kind up by its table name
    pub fn from_table(table: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.table() == table)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
