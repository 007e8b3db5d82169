use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", &self.0.to_string()[..8])
            }
        }
    };
}

record_id!(
    /// Identifier of a registered user.
    UserId
);
record_id!(
    /// Identifier of a player character.
    CharacterId
);
record_id!(
    /// Identifier of a threat (NPC or adversary).
    ThreatId
);
record_id!(
    /// Identifier of a campaign.
    CampaignId
);
record_id!(
    /// Identifier of an inventory item, unique within its character.
    ItemId
);
record_id!(
    /// Identifier of a character ability or bloodline ability.
    AbilityId
);
record_id!(
    /// Identifier of a threat attack.
    AttackId
);
record_id!(
    /// Identifier of a campaign log entry.
    LogEntryId
);
record_id!(
    /// Identifier of a single dice roll.
    RollId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(CharacterId::new(), CharacterId::new());
    }

    #[test]
    fn display_is_short() {
        let id = ThreatId::new();
        assert_eq!(id.to_string().len(), 8);
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
    }
}
