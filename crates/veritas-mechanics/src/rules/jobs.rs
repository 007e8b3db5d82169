//! The job table: base skills and variant grants for character creation.

use serde::{Deserialize, Serialize};
use veritas_core::{Skill, SkillId, TrainingTier};

use crate::error::{MechError, MechResult};

use SkillGrant::{AnySkill, Skill as S};
use SkillId::*;

/// One entry in a variant's grant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillGrant {
    /// Train this skill.
    Skill(SkillId),
    /// The player picks any skill. Left to the caller.
    AnySkill,
}

/// A specialisation of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobVariant {
    /// Variant name.
    pub name: &'static str,
    /// Skills the variant trains.
    pub grants: &'static [SkillGrant],
}

/// A job and its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// Job name.
    pub name: &'static str,
    /// The two skills every variant of this job trains.
    pub base: [SkillId; 2],
    /// Available variants.
    pub variants: &'static [JobVariant],
}

impl Job {
    /// Look up a variant by exact name.
    pub fn variant(&self, name: &str) -> Option<&'static JobVariant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// Result of applying a job grant to a skill list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrainingGrant {
    /// Skills raised to [`TrainingTier::Trained`], in grant order.
    pub trained: Vec<SkillId>,
    /// Free skill choices the player still has to make.
    pub pending_choices: u32,
}

const fn variant(name: &'static str, grants: &'static [SkillGrant]) -> JobVariant {
    JobVariant { name, grants }
}

/// Every job, in menu order.
pub const JOBS: &[Job] = &[
    Job {
        name: "Academic",
        base: [Knowledge, Search],
        variants: &[
            variant("Archaeologist", &[S(Archaeology)]),
            variant("Scientist", &[S(Science)]),
            variant("Engineer", &[S(Engineering)]),
            variant("Geographer", &[S(Geography)]),
            variant("Historian", &[S(History)]),
            variant("Linguist", &[S(NativeLanguage), S(OtherLanguages)]),
            variant("Mechanic", &[S(Technology), S(Driving)]),
            variant("Psychologist", &[S(Psychology)]),
            variant("IT Specialist", &[S(Technology), S(Cryptography)]),
            variant("Sociologist", &[S(Anthropology)]),
        ],
    },
    Job {
        name: "Athlete",
        base: [Athletics, Search],
        variants: &[
            variant("Acrobat", &[S(Acrobatics)]),
            variant("Fencer", &[S(Blades)]),
            variant("Equestrian", &[S(Riding)]),
            variant("Fighter", &[S(Brawl)]),
            variant("Swimmer", &[S(Swimming)]),
            variant("Racer", &[S(Driving), S(Piloting)]),
        ],
    },
    Job {
        name: "Hunter",
        base: [Aim, Survival],
        variants: &[
            variant("Indigenous", &[S(Religion)]),
            variant("Fisher", &[S(Swimming)]),
        ],
    },
    Job {
        name: "Criminal",
        base: [Athletics, Stealth],
        variants: &[
            variant("Reformed", &[S(Intrusion), S(Forgery)]),
            variant("Bounty Hunter", &[S(Brawl), S(Aim)]),
            variant("Outlaw", &[S(Aim)]),
            variant("Con Artist", &[S(FastTalk), S(Persuasion)]),
        ],
    },
    Job {
        name: "Farmer",
        base: [Religion, Survival],
        variants: &[
            variant("Grower", &[S(Search)]),
            variant("Foreman", &[S(Intimidation)]),
            variant("Breeder", &[S(Science)]),
            variant("Cowhand", &[S(Riding)]),
        ],
    },
    Job {
        name: "Lawman",
        base: [FastTalk, Diplomacy],
        variants: &[
            variant("Firefighter", &[S(FirstAid), S(Brawl)]),
            variant("Investigator", &[S(Search), S(Aim)]),
            variant("Doctor", &[S(Medicine)]),
            variant("Gunslinger", &[S(Aim)]),
            variant("Police Officer", &[S(Brawl), S(Aim)]),
            variant("Paramedic", &[S(FirstAid)]),
        ],
    },
    Job {
        name: "Journalist",
        base: [Search, FastTalk],
        variants: &[
            variant("Crime Reporter", &[S(Diplomacy), S(Law)]),
            variant("Photojournalist", &[S(Intrusion), S(Technology)]),
            variant("Investigative", &[S(Listen)]),
            variant("Reporter", &[S(Knowledge), S(Technology)]),
        ],
    },
    Job {
        name: "Military",
        base: [Brawl, Aim],
        variants: &[
            variant("Combatant", &[S(Grapple)]),
            variant("Specialist", &[AnySkill]),
            variant("Technician", &[S(Technology)]),
            variant("Martial Artist", &[S(Reflexes)]),
            variant("Medic", &[S(Medicine), S(FirstAid)]),
            variant("Test Subject", &[S(Survival)]),
        ],
    },
    Job {
        name: "Religious",
        base: [Search, Religion],
        variants: &[
            variant("Bishop", &[S(Knowledge)]),
            variant("Monk", &[S(Survival)]),
            variant("Priest", &[S(Diplomacy), S(History)]),
            variant("Pastor", &[S(Persuasion)]),
        ],
    },
];

/// Look up a job by exact name.
pub fn job(name: &str) -> Option<&'static Job> {
    JOBS.iter().find(|j| j.name == name)
}

/// Train the job's base skills and the variant's grants on `skills`.
///
/// Each granted skill is set to [`TrainingTier::Trained`]. Wildcard grants
/// are counted in [`TrainingGrant::pending_choices`] and not resolved.
pub fn grant_training(
    skills: &mut [Skill],
    job_name: &str,
    variant_name: &str,
) -> MechResult<TrainingGrant> {
    let job =
        job(job_name).ok_or_else(|| MechError::validation(format!("unknown job: {job_name}")))?;
    let variant = job.variant(variant_name).ok_or_else(|| {
        MechError::validation(format!("unknown variant for {job_name}: {variant_name}"))
    })?;

    let mut grant = TrainingGrant::default();
    let granted = job
        .base
        .iter()
        .map(|id| S(*id))
        .chain(variant.grants.iter().copied());
    for entry in granted {
        match entry {
            S(id) => {
                if let Some(skill) = skills.iter_mut().find(|s| s.id == id) {
                    skill.training = TrainingTier::Trained;
                    if !grant.trained.contains(&id) {
                        grant.trained.push(id);
                    }
                }
            }
            AnySkill => grant.pending_choices += 1,
        }
    }
    Ok(grant)
}
