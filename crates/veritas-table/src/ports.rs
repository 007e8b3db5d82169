//! Collaborator ports: the persistence store, accounts, and campaign logging.
//!
//! A backend implements only [`Store::read`] and [`Store::write`] over whole
//! collection documents. Record-level access, accounts, and the campaign
//! logger are provided on top of that for every store.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use veritas_core::{
    Campaign, CampaignId, CampaignLogEntry, Character, CharacterId, LogKind, Threat, ThreatId,
    User, UserId,
};

use crate::error::{TableError, TableResult};

/// A stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Registered accounts.
    Users,
    /// Player characters.
    Characters,
    /// Adversaries.
    Threats,
    /// Campaigns.
    Campaigns,
}

impl Collection {
    /// Storage key of the collection document.
    pub fn key(self) -> &'static str {
        match self {
            Self::Users => "veritas_users",
            Self::Characters => "veritas_characters",
            Self::Threats => "veritas_threats",
            Self::Campaigns => "veritas_campaigns",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => write!(f, "user"),
            Self::Characters => write!(f, "character"),
            Self::Threats => write!(f, "threat"),
            Self::Campaigns => write!(f, "campaign"),
        }
    }
}

/// A top-level record kept in one collection, keyed by its id.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// The collection holding this record type.
    const COLLECTION: Collection;
    /// The record's identifier type.
    type Id: Copy + PartialEq + fmt::Display;

    /// The record's identifier.
    fn id(&self) -> Self::Id;
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

impl Record for Character {
    const COLLECTION: Collection = Collection::Characters;
    type Id = CharacterId;

    fn id(&self) -> CharacterId {
        self.id
    }
}

impl Record for Threat {
    const COLLECTION: Collection = Collection::Threats;
    type Id = ThreatId;

    fn id(&self) -> ThreatId {
        self.id
    }
}

impl Record for Campaign {
    const COLLECTION: Collection = Collection::Campaigns;
    type Id = CampaignId;

    fn id(&self) -> CampaignId {
        self.id
    }
}

/// Last-write-wins persistence over one JSON document per collection.
pub trait Store {
    /// Read the raw document stored under `key`, if any.
    fn read(&self, key: &str) -> TableResult<Option<String>>;

    /// Replace the document stored under `key`.
    fn write(&mut self, key: &str, document: String) -> TableResult<()>;

    /// Every record of one collection. A missing document is an empty list.
    fn get_all<R: Record>(&self) -> TableResult<Vec<R>> {
        match self.read(R::COLLECTION.key())? {
            Some(document) => Ok(serde_json::from_str(&document)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a whole collection.
    fn put_all<R: Record>(&mut self, records: &[R]) -> TableResult<()> {
        let document = serde_json::to_string(records)?;
        self.write(R::COLLECTION.key(), document)
    }

    /// Look up one record.
    fn find<R: Record>(&self, id: R::Id) -> TableResult<Option<R>> {
        Ok(self.get_all::<R>()?.into_iter().find(|r| r.id() == id))
    }

    /// Look up one record, failing with `NotFound` when it is missing.
    fn get<R: Record>(&self, id: R::Id) -> TableResult<R> {
        self.find(id)?.ok_or_else(|| TableError::NotFound {
            collection: R::COLLECTION,
            id: id.to_string(),
        })
    }

    /// Insert or replace a record by id.
    fn save<R: Record>(&mut self, record: &R) -> TableResult<()> {
        let mut records = self.get_all::<R>()?;
        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) => records[index] = record.clone(),
            None => records.push(record.clone()),
        }
        self.put_all(&records)
    }

    /// Remove a record. Returns false if it was not stored.
    fn delete<R: Record>(&mut self, id: R::Id) -> TableResult<bool> {
        let mut records = self.get_all::<R>()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.put_all(&records)?;
        Ok(true)
    }
}

/// Account registration and login.
pub trait Accounts: Store {
    /// Store a new user. The username is checked before the email; a rejected
    /// registration stores nothing.
    fn register(&mut self, user: User) -> TableResult<User> {
        let users: Vec<User> = self.get_all()?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(TableError::DuplicateUsername(user.username));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(TableError::DuplicateEmail(user.email));
        }
        self.save(&user)?;
        Ok(user)
    }

    /// The user whose username or email is `identifier` and whose stored
    /// secret equals `secret`.
    fn login(&self, identifier: &str, secret: &str) -> TableResult<Option<User>> {
        let users: Vec<User> = self.get_all()?;
        Ok(users
            .into_iter()
            .find(|u| u.answers_to(identifier) && u.password_hash == secret))
    }

    /// Case-insensitive username lookup.
    fn find_user_by_username(&self, username: &str) -> TableResult<Option<User>> {
        let wanted = username.trim().to_lowercase();
        let users: Vec<User> = self.get_all()?;
        Ok(users
            .into_iter()
            .find(|u| u.username.to_lowercase() == wanted))
    }
}

impl<T: Store> Accounts for T {}

/// Appends gameplay events to the campaign a character plays in.
pub trait CampaignLogger: Store {
    /// The first campaign whose roster contains `character`.
    fn campaign_of(&self, character: CharacterId) -> TableResult<Option<Campaign>> {
        let campaigns: Vec<Campaign> = self.get_all()?;
        Ok(campaigns.into_iter().find(|c| c.has_player(character)))
    }

    /// Prepend an entry to the character's campaign log.
    ///
    /// Returns the campaign written to, or `None` when the character is not
    /// enrolled anywhere, in which case nothing is stored.
    fn append_event(
        &mut self,
        character: CharacterId,
        message: &str,
        source: &str,
        kind: LogKind,
    ) -> TableResult<Option<CampaignId>> {
        let mut campaigns: Vec<Campaign> = self.get_all()?;
        let Some(campaign) = campaigns.iter_mut().find(|c| c.has_player(character)) else {
            return Ok(None);
        };
        campaign.push_log(CampaignLogEntry::new(message, source, kind));
        let id = campaign.id;
        self.put_all(&campaigns)?;
        Ok(Some(id))
    }
}

impl<T: Store> CampaignLogger for T {}
