//! Campaign management on top of a [`Store`].
//!
//! These are GM-side operations. Damage dealt through them is logged into
//! the campaign the GM is running, not looked up through the player.

use veritas_core::{
    Campaign, CampaignId, CampaignLogEntry, Character, CharacterId, LogKind, ResourceKind, Threat,
    ThreatId, User, UserId,
};
use veritas_mechanics::sheet::adjust_resource;
use veritas_mechanics::threat as threat_rules;

use crate::error::{TableError, TableResult};
use crate::ports::{Accounts, Store};

/// The characters and threats enrolled in a campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    /// Enrolled characters that still exist.
    pub characters: Vec<Character>,
    /// Enrolled threats that still exist.
    pub threats: Vec<Threat>,
}

/// A user found by the player search, with the characters they could bring.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLookup {
    /// The matched account.
    pub user: User,
    /// That user's characters.
    pub characters: Vec<Character>,
}

/// The result of GM damage to a threat.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatDamage {
    /// The threat after damage.
    pub threat: Threat,
    /// Whether it dropped to 0 hit points and left the roster.
    pub defeated: bool,
}

/// Create a campaign run by `gm`.
pub fn create_campaign<S: Store>(
    store: &mut S,
    gm: UserId,
    name: &str,
    description: &str,
) -> TableResult<Campaign> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TableError::Validation("campaign name is required".to_string()));
    }
    let mut campaign = Campaign::new(gm, name);
    campaign.description = description.to_string();
    store.save(&campaign)?;
    tracing::info!(campaign = %campaign.id, gm = %gm, "campaign created");
    Ok(campaign)
}

/// Campaigns run by `gm`.
pub fn campaigns_run_by<S: Store>(store: &S, gm: UserId) -> TableResult<Vec<Campaign>> {
    let campaigns: Vec<Campaign> = store.get_all()?;
    Ok(campaigns.into_iter().filter(|c| c.gm_id == gm).collect())
}

/// Delete a campaign. Enrolled characters and threats are untouched.
pub fn delete_campaign<S: Store>(store: &mut S, campaign: CampaignId) -> TableResult<()> {
    if store.delete::<Campaign>(campaign)? {
        Ok(())
    } else {
        Err(not_found_campaign(campaign))
    }
}

/// Enroll or remove a character. Returns true if it is now enrolled.
pub fn toggle_player<S: Store>(
    store: &mut S,
    campaign: CampaignId,
    character: CharacterId,
) -> TableResult<bool> {
    let mut stored: Campaign = store.get(campaign)?;
    store.get::<Character>(character)?;
    let enrolled = stored.toggle_player(character);
    store.save(&stored)?;
    tracing::info!(campaign = %campaign, character = %character, enrolled, "roster changed");
    Ok(enrolled)
}

/// Add or remove a threat. Returns true if it is now on the roster.
pub fn toggle_threat<S: Store>(
    store: &mut S,
    campaign: CampaignId,
    threat: ThreatId,
) -> TableResult<bool> {
    let mut stored: Campaign = store.get(campaign)?;
    store.get::<Threat>(threat)?;
    let enrolled = stored.toggle_threat(threat);
    store.save(&stored)?;
    tracing::info!(campaign = %campaign, threat = %threat, enrolled, "roster changed");
    Ok(enrolled)
}

/// Load a campaign's roster, skipping ids whose records no longer exist.
pub fn roster<S: Store>(store: &S, campaign: CampaignId) -> TableResult<Roster> {
    let stored: Campaign = store.get(campaign)?;
    let characters: Vec<Character> = store.get_all()?;
    let threats: Vec<Threat> = store.get_all()?;
    Ok(Roster {
        characters: characters
            .into_iter()
            .filter(|c| stored.has_player(c.id))
            .collect(),
        threats: threats
            .into_iter()
            .filter(|t| stored.has_threat(t.id))
            .collect(),
    })
}

/// Deal GM damage to an enrolled character and log it in this campaign.
pub fn damage_player<S: Store>(
    store: &mut S,
    campaign: CampaignId,
    character: CharacterId,
    amount: i32,
) -> TableResult<Character> {
    check_amount(amount)?;
    let mut stored: Campaign = store.get(campaign)?;
    if !stored.has_player(character) {
        return Err(TableError::Validation(format!(
            "character {character} is not in campaign {}",
            stored.name
        )));
    }
    let mut target: Character = store.get(character)?;
    adjust_resource(&mut target, ResourceKind::Hp, -amount);
    store.save(&target)?;

    stored.push_log(CampaignLogEntry::new(
        format!("Took {amount} damage (GM)"),
        target.name.as_str(),
        LogKind::Damage,
    ));
    store.save(&stored)?;
    Ok(target)
}

/// Deal GM damage to an enrolled threat. A threat brought to 0 hit points
/// leaves the roster; its record is kept.
pub fn damage_threat<S: Store>(
    store: &mut S,
    campaign: CampaignId,
    threat: ThreatId,
    amount: i32,
) -> TableResult<ThreatDamage> {
    check_amount(amount)?;
    let mut stored: Campaign = store.get(campaign)?;
    if !stored.has_threat(threat) {
        return Err(TableError::Validation(format!(
            "threat {threat} is not in campaign {}",
            stored.name
        )));
    }
    let mut target: Threat = store.get(threat)?;
    let defeated = threat_rules::damage_threat(&mut target, amount);
    store.save(&target)?;

    if defeated {
        stored.remove_threat(threat);
        store.save(&stored)?;
        tracing::info!(campaign = %campaign, threat = %threat, "threat defeated");
    }
    Ok(ThreatDamage {
        threat: target,
        defeated,
    })
}

/// Find a user by username (case-insensitive) and list their characters.
pub fn find_player<S: Store>(store: &S, username: &str) -> TableResult<Option<PlayerLookup>> {
    let Some(user) = store.find_user_by_username(username)? else {
        return Ok(None);
    };
    let characters: Vec<Character> = store.get_all()?;
    let characters = characters
        .into_iter()
        .filter(|c| c.player_id == user.id)
        .collect();
    Ok(Some(PlayerLookup { user, characters }))
}

fn check_amount(amount: i32) -> TableResult<()> {
    if amount < 0 {
        return Err(TableError::Validation(format!(
            "damage must not be negative, got {amount}"
        )));
    }
    Ok(())
}

fn not_found_campaign(id: CampaignId) -> TableError {
    TableError::NotFound {
        collection: crate::ports::Collection::Campaigns,
        id: id.to_string(),
    }
}
