//! Campaign roster and campaign event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CampaignId, CharacterId, LogEntryId, ThreatId, UserId};

/// Maximum number of entries a campaign log keeps.
pub const CAMPAIGN_LOG_LIMIT: usize = 100;

/// Coarse category of a campaign log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// A dice roll.
    Roll,
    /// Something lost hit points or another resource.
    Damage,
    /// Something recovered a resource.
    Heal,
    /// General activity.
    Info,
    /// Messages from the table itself.
    System,
}

/// One line in a campaign's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignLogEntry {
    /// Identifier.
    pub id: LogEntryId,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Human-readable text.
    pub message: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: LogKind,
    /// Who caused it (character name, threat name, or the system).
    pub source: String,
}

impl CampaignLogEntry {
    /// A new entry stamped now.
    pub fn new(message: impl Into<String>, source: impl Into<String>, kind: LogKind) -> Self {
        Self {
            id: LogEntryId::new(),
            timestamp: Utc::now(),
            message: message.into(),
            kind,
            source: source.into(),
        }
    }
}

/// A campaign run by a game master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Identifier.
    pub id: CampaignId,
    /// The game master.
    pub gm_id: UserId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Enrolled characters.
    #[serde(default)]
    pub players: Vec<CharacterId>,
    /// Threats on the table.
    #[serde(default)]
    pub threats: Vec<ThreatId>,
    /// Event log, newest first.
    #[serde(default)]
    pub logs: Vec<CampaignLogEntry>,
}

impl Campaign {
    /// An empty campaign.
    pub fn new(gm_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: CampaignId::new(),
            gm_id,
            name: name.into(),
            description: String::new(),
            players: Vec::new(),
            threats: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Returns true if the character is enrolled.
    pub fn has_player(&self, id: CharacterId) -> bool {
        self.players.contains(&id)
    }

    /// Returns true if the threat is on the table.
    pub fn has_threat(&self, id: ThreatId) -> bool {
        self.threats.contains(&id)
    }

    /// Enroll or unenroll a character. Returns true if now enrolled.
    pub fn toggle_player(&mut self, id: CharacterId) -> bool {
        toggle(&mut self.players, id)
    }

    /// Add or remove a threat. Returns true if now present.
    pub fn toggle_threat(&mut self, id: ThreatId) -> bool {
        toggle(&mut self.threats, id)
    }

    /// Remove a threat if present.
    pub fn remove_threat(&mut self, id: ThreatId) {
        self.threats.retain(|t| *t != id);
    }

    /// Prepend an entry and trim the log to [`CAMPAIGN_LOG_LIMIT`].
    pub fn push_log(&mut self, entry: CampaignLogEntry) {
        self.logs.insert(0, entry);
        self.logs.truncate(CAMPAIGN_LOG_LIMIT);
    }
}

fn toggle<T: PartialEq>(list: &mut Vec<T>, value: T) -> bool {
    if let Some(pos) = list.iter().position(|v| *v == value) {
        list.remove(pos);
        false
    } else {
        list.push(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_newest_first() {
        let mut c = Campaign::new(UserId::new(), "Night Shift");
        c.push_log(CampaignLogEntry::new("first", "System", LogKind::System));
        c.push_log(CampaignLogEntry::new("second", "System", LogKind::System));
        assert_eq!(c.logs[0].message, "second");
        assert_eq!(c.logs[1].message, "first");
    }

    #[test]
    fn log_is_trimmed() {
        let mut c = Campaign::new(UserId::new(), "Night Shift");
        for i in 0..(CAMPAIGN_LOG_LIMIT + 25) {
            c.push_log(CampaignLogEntry::new(format!("entry {i}"), "Ana", LogKind::Info));
        }
        assert_eq!(c.logs.len(), CAMPAIGN_LOG_LIMIT);
        assert_eq!(c.logs[0].message, format!("entry {}", CAMPAIGN_LOG_LIMIT + 24));
    }

    #[test]
    fn toggle_roster() {
        let mut c = Campaign::new(UserId::new(), "Night Shift");
        let hero = CharacterId::new();
        assert!(c.toggle_player(hero));
        assert!(c.has_player(hero));
        assert!(!c.toggle_player(hero));
        assert!(!c.has_player(hero));
    }

    #[test]
    fn kind_serializes_as_type() {
        let entry = CampaignLogEntry::new("Rolled", "Ana", LogKind::Roll);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "roll");
    }
}
