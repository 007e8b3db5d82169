//! Table session management.
//!
//! `TableSession` is the explicit context every UI action goes through. It
//! owns the store, the dice source, and the recent-rolls feed, tracks who is
//! signed in, and turns the rule engine's returned effects into stored state
//! and campaign-log entries.

use rand::SeedableRng;
use rand::rngs::StdRng;

use veritas_core::{
    AbilityId, AttackId, AttributeKey, Campaign, CampaignId, Character, CharacterId, DiceFormula,
    ItemId, LogKind, ResourceKind, SkillId, Threat, ThreatId, User, UserId,
};
use veritas_mechanics::dice::formula_roll;
use veritas_mechanics::sheet::{self, Adjustment};
use veritas_mechanics::threat as threat_rules;
use veritas_mechanics::{
    ActionOutcome, CreatedCharacter, DiceSource, Effect, LevelRolls, LevelUp, MechResult,
    NewCharacter, RollResult, ThreatDraft, create_character,
};

use crate::campaign::{self, PlayerLookup, Roster, ThreatDamage};
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::ports::{Accounts, CampaignLogger, Store};
use crate::roll_log::RollLog;
use crate::stream::{self, StreamSnapshot};

/// Shortest secret accepted at registration.
pub const MIN_SECRET_LEN: usize = 6;

/// An interactive table session over a store.
pub struct TableSession<S: Store> {
    config: TableConfig,
    store: S,
    dice: Box<dyn DiceSource>,
    rolls: RollLog,
    current_user: Option<User>,
}

impl<S: Store> TableSession<S> {
    /// Create a session. Dice come from a `StdRng` seeded by the config, or
    /// from the OS when no seed is set.
    pub fn new(store: S, config: TableConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rolls: RollLog::new(config.roll_log_capacity),
            dice: Box::new(rng),
            store,
            config,
            current_user: None,
        }
    }

    /// Replace the dice source.
    pub fn with_dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Get the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Get the recent-rolls feed.
    pub fn rolls(&self) -> &RollLog {
        &self.rolls
    }

    /// The signed-in user.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    // -- Accounts -----------------------------------------------------------

    /// Register a new account. Does not sign it in.
    pub fn register(&mut self, username: &str, email: &str, secret: &str) -> TableResult<User> {
        let (username, email) = (username.trim(), email.trim());
        if username.is_empty() || email.is_empty() {
            return Err(TableError::Validation(
                "username and email are required".to_string(),
            ));
        }
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(TableError::Validation(format!(
                "password must be at least {MIN_SECRET_LEN} characters"
            )));
        }
        let user = self.store.register(User::new(username, email, secret))?;
        tracing::info!(user = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Sign in by username or email.
    pub fn login(&mut self, identifier: &str, secret: &str) -> TableResult<User> {
        let user = self
            .store
            .login(identifier.trim(), secret)?
            .ok_or(TableError::InvalidCredentials)?;
        tracing::info!(user = %user.id, "signed in");
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Restore a session from a stored user id.
    pub fn resume(&mut self, user: UserId) -> TableResult<User> {
        let user: User = self.store.get(user)?;
        self.current_user = Some(user.clone());
        Ok(user)
    }

    /// Sign out.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    fn require_user(&self) -> TableResult<&User> {
        self.current_user.as_ref().ok_or(TableError::NotSignedIn)
    }

    // -- Characters ---------------------------------------------------------

    /// Create and store a character owned by the signed-in user.
    pub fn create_character(&mut self, mut request: NewCharacter) -> TableResult<CreatedCharacter> {
        request.player_id = self.require_user()?.id;
        let created = create_character(request)?;
        self.store.save(&created.character)?;
        Ok(created)
    }

    /// Characters owned by the signed-in user.
    pub fn my_characters(&self) -> TableResult<Vec<Character>> {
        let owner = self.require_user()?.id;
        let characters: Vec<Character> = self.store.get_all()?;
        Ok(characters
            .into_iter()
            .filter(|c| c.player_id == owner)
            .collect())
    }

    /// Load a character.
    pub fn character(&self, id: CharacterId) -> TableResult<Character> {
        self.store.get(id)
    }

    /// Store edits made directly to a character record.
    pub fn save_character(&mut self, character: &Character) -> TableResult<()> {
        self.store.save(character)
    }

    /// Delete a character.
    pub fn delete_character(&mut self, id: CharacterId) -> TableResult<()> {
        if self.store.delete::<Character>(id)? {
            Ok(())
        } else {
            Err(TableError::NotFound {
                collection: crate::ports::Collection::Characters,
                id: id.to_string(),
            })
        }
    }

    /// Apply a rule-checked edit to a stored character. Nothing is stored if
    /// the edit fails.
    pub fn update_character<T>(
        &mut self,
        id: CharacterId,
        edit: impl FnOnce(&mut Character) -> MechResult<T>,
    ) -> TableResult<T> {
        let mut character: Character = self.store.get(id)?;
        let value = edit(&mut character)?;
        self.store.save(&character)?;
        Ok(value)
    }

    /// Roll a bare attribute check.
    pub fn roll_attribute(
        &mut self,
        id: CharacterId,
        key: AttributeKey,
    ) -> TableResult<RollResult> {
        let character: Character = self.store.get(id)?;
        let roll = sheet::attribute_test(&character, key, self.dice.as_mut());
        self.record_roll(roll.clone());
        Ok(roll)
    }

    /// Roll a skill check.
    pub fn roll_skill(&mut self, id: CharacterId, skill: SkillId) -> TableResult<RollResult> {
        let character: Character = self.store.get(id)?;
        let roll = sheet::skill_check(&character, skill, self.dice.as_mut())?;
        self.record_roll(roll.clone());
        Ok(roll)
    }

    /// Throw an unarmed strike.
    pub fn punch(&mut self, id: CharacterId) -> TableResult<RollResult> {
        let character: Character = self.store.get(id)?;
        let roll = sheet::punch(&character, self.dice.as_mut());
        self.record_roll(roll.clone());
        Ok(roll)
    }

    /// Roll a free formula from the dice tray, optionally on a character's behalf.
    pub fn roll_formula(
        &mut self,
        formula: DiceFormula,
        label: &str,
        character: Option<CharacterId>,
    ) -> TableResult<RollResult> {
        let roll = match character {
            Some(id) => {
                let character: Character = self.store.get(id)?;
                formula_roll(formula, label, character.name.as_str(), self.dice.as_mut())
                    .by(character.id)
            }
            None => {
                let actor = self
                    .current_user
                    .as_ref()
                    .map_or("Guest", |u| u.username.as_str())
                    .to_string();
                formula_roll(formula, label, actor, self.dice.as_mut())
            }
        };
        self.record_roll(roll.clone());
        Ok(roll)
    }

    /// Damage or heal a character resource.
    pub fn adjust_resource(
        &mut self,
        id: CharacterId,
        resource: ResourceKind,
        delta: i32,
    ) -> TableResult<Adjustment> {
        let mut character: Character = self.store.get(id)?;
        let adjustment = sheet::adjust_resource(&mut character, resource, delta);
        self.store.save(&character)?;
        self.log_event(
            character.id,
            &adjustment.event.message,
            &character.name,
            adjustment.event.kind,
        );
        Ok(adjustment)
    }

    /// Activate one of a character's abilities.
    pub fn use_ability(
        &mut self,
        id: CharacterId,
        ability: AbilityId,
    ) -> TableResult<ActionOutcome> {
        let mut character: Character = self.store.get(id)?;
        let outcome = sheet::use_ability(&mut character, ability, self.dice.as_mut())?;
        self.store.save(&character)?;
        self.apply(&character, &outcome);
        Ok(outcome)
    }

    /// Attack with an inventory weapon.
    pub fn attack_with(&mut self, id: CharacterId, item: ItemId) -> TableResult<ActionOutcome> {
        let mut character: Character = self.store.get(id)?;
        let outcome = sheet::attack_with(&mut character, item, self.dice.as_mut())?;
        self.store.save(&character)?;
        self.apply(&character, &outcome);
        Ok(outcome)
    }

    // -- Level-up -----------------------------------------------------------

    /// Start a level-up for a stored character.
    pub fn begin_level_up(&self, id: CharacterId) -> TableResult<LevelUp> {
        let character: Character = self.store.get(id)?;
        Ok(LevelUp::begin(&character)?)
    }

    /// Roll the level-up dice with the session's dice source.
    pub fn roll_level_up(&mut self, level_up: &mut LevelUp) -> TableResult<LevelRolls> {
        Ok(level_up.roll(self.dice.as_mut())?)
    }

    /// Commit a finished level-up, store the character, and announce it.
    ///
    /// Fails without touching the store if the stored character was edited
    /// after the level-up began.
    pub fn commit_level_up(&mut self, level_up: &mut LevelUp) -> TableResult<Character> {
        let stored: Character = self.store.get(level_up.pending().id)?;
        if stored != *level_up.original() {
            return Err(TableError::Validation(format!(
                "{} changed since the level-up began",
                stored.name
            )));
        }
        let (character, announcement) = level_up.commit()?;
        self.store.save(&character)?;
        self.record_roll(announcement);
        Ok(character)
    }

    // -- Threats ------------------------------------------------------------

    /// Build and store a threat.
    pub fn save_threat(&mut self, draft: ThreatDraft) -> TableResult<Threat> {
        let threat = draft.build()?;
        self.store.save(&threat)?;
        Ok(threat)
    }

    /// Every stored threat.
    pub fn threats(&self) -> TableResult<Vec<Threat>> {
        self.store.get_all()
    }

    /// Load a threat.
    pub fn threat(&self, id: ThreatId) -> TableResult<Threat> {
        self.store.get(id)
    }

    /// Delete a threat. Campaign rosters skip ids that no longer resolve.
    pub fn delete_threat(&mut self, id: ThreatId) -> TableResult<()> {
        if self.store.delete::<Threat>(id)? {
            Ok(())
        } else {
            Err(TableError::NotFound {
                collection: crate::ports::Collection::Threats,
                id: id.to_string(),
            })
        }
    }

    /// Roll a threat attribute check.
    pub fn threat_attribute_test(
        &mut self,
        id: ThreatId,
        key: AttributeKey,
    ) -> TableResult<RollResult> {
        let threat: Threat = self.store.get(id)?;
        let roll = threat_rules::threat_attribute_test(&threat, key, self.dice.as_mut());
        self.record_roll(roll.clone());
        Ok(roll)
    }

    /// Spend an attack's energy and roll to hit.
    pub fn threat_attack(&mut self, id: ThreatId, attack: AttackId) -> TableResult<RollResult> {
        let mut threat: Threat = self.store.get(id)?;
        let roll = threat_rules::fire_attack(&mut threat, attack, self.dice.as_mut())?;
        self.store.save(&threat)?;
        self.record_roll(roll.clone());
        Ok(roll)
    }

    /// Roll an attack's damage, if it has a formula.
    pub fn threat_damage(
        &mut self,
        id: ThreatId,
        attack: AttackId,
    ) -> TableResult<Option<RollResult>> {
        let threat: Threat = self.store.get(id)?;
        let roll = threat_rules::attack_damage(&threat, attack, self.dice.as_mut())?;
        if let Some(roll) = &roll {
            self.record_roll(roll.clone());
        }
        Ok(roll)
    }

    // -- Campaigns ----------------------------------------------------------

    /// Create a campaign with the signed-in user as GM.
    pub fn create_campaign(&mut self, name: &str, description: &str) -> TableResult<Campaign> {
        let gm = self.require_user()?.id;
        campaign::create_campaign(&mut self.store, gm, name, description)
    }

    /// Campaigns the signed-in user runs.
    pub fn my_campaigns(&self) -> TableResult<Vec<Campaign>> {
        let gm = self.require_user()?.id;
        campaign::campaigns_run_by(&self.store, gm)
    }

    /// Delete one of the signed-in user's campaigns.
    pub fn delete_campaign(&mut self, id: CampaignId) -> TableResult<()> {
        self.require_gm(id)?;
        campaign::delete_campaign(&mut self.store, id)
    }

    /// Enroll or remove a character. Returns true if it is now enrolled.
    pub fn toggle_campaign_player(
        &mut self,
        id: CampaignId,
        character: CharacterId,
    ) -> TableResult<bool> {
        self.require_gm(id)?;
        campaign::toggle_player(&mut self.store, id, character)
    }

    /// Add or remove a threat. Returns true if it is now on the roster.
    pub fn toggle_campaign_threat(
        &mut self,
        id: CampaignId,
        threat: ThreatId,
    ) -> TableResult<bool> {
        self.require_gm(id)?;
        campaign::toggle_threat(&mut self.store, id, threat)
    }

    /// Load a campaign's characters and threats.
    pub fn campaign_roster(&self, id: CampaignId) -> TableResult<Roster> {
        campaign::roster(&self.store, id)
    }

    /// GM damage to an enrolled character.
    pub fn gm_damage_player(
        &mut self,
        id: CampaignId,
        character: CharacterId,
        amount: i32,
    ) -> TableResult<Character> {
        self.require_gm(id)?;
        campaign::damage_player(&mut self.store, id, character, amount)
    }

    /// GM damage to an enrolled threat.
    pub fn gm_damage_threat(
        &mut self,
        id: CampaignId,
        threat: ThreatId,
        amount: i32,
    ) -> TableResult<ThreatDamage> {
        self.require_gm(id)?;
        campaign::damage_threat(&mut self.store, id, threat, amount)
    }

    /// Search for a player to invite.
    pub fn find_player(&self, username: &str) -> TableResult<Option<PlayerLookup>> {
        campaign::find_player(&self.store, username)
    }

    fn require_gm(&self, id: CampaignId) -> TableResult<()> {
        let user = self.require_user()?;
        let stored: Campaign = self.store.get(id)?;
        if stored.gm_id != user.id {
            return Err(TableError::Validation(format!(
                "only the GM can manage {}",
                stored.name
            )));
        }
        Ok(())
    }

    // -- Stream -------------------------------------------------------------

    /// What the live-stream overlay should show.
    pub fn stream_snapshot(
        &self,
        character: Option<CharacterId>,
    ) -> TableResult<Option<StreamSnapshot>> {
        stream::snapshot(
            &self.store,
            &self.rolls,
            character,
            self.config.stream_refresh_ms,
        )
    }

    // -- Effects ------------------------------------------------------------

    fn apply(&mut self, character: &Character, outcome: &ActionOutcome) {
        for effect in &outcome.effects {
            match effect {
                Effect::Roll(roll) => self.record_roll(roll.clone()),
                Effect::Event(event) => {
                    self.log_event(character.id, &event.message, &character.name, event.kind)
                }
            }
        }
    }

    /// Push a roll to the feed and, if a character made it, to their campaign log.
    fn record_roll(&mut self, roll: RollResult) {
        if let Some(character) = roll.character_id {
            let summary = roll.summary();
            self.log_event(character, &summary, &roll.actor, LogKind::Roll);
        }
        self.rolls.push(roll);
    }

    fn log_event(&mut self, character: CharacterId, message: &str, source: &str, kind: LogKind) {
        if let Err(err) = self.store.append_event(character, message, source, kind) {
            tracing::warn!(character = %character, error = %err, "campaign log append failed");
        }
    }
}
