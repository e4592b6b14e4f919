//! The combat outcome state machine.
//!
//! ```text
//! AwaitingOutcome ──victory──▶ VictoryPendingLootReveal ──finalize──▶ resolved
//!        │                              │
//!        │                              └──(blueprint)──▶ VictoryPendingBlueprint ──accept──▶ resolved
//!        └──defeat──▶ MIA
//! ```

use super::{
    BattleResult, CombatPhase, Encounter, FailureReason, Outcome, OutcomeDescriptor, ResolveError,
    StagedReward, TransitionTarget, Winner,
};
use crate::config::RunConfig;
use crate::env::{BlueprintDraw, BossReward, MissionEvent, RunEnv};
use crate::lifecycle::terminate_failure;
use crate::state::{
    BossId, DeckId, HostileId, Interruption, InterruptionKind, LootItem, LootSource,
    PendingBlueprint, RunFlags, SessionState, ai_core_total, merge_bonus_salvage,
    salvage_credit_total,
};

/// Turns a finished battle into staged rewards and transitions.
///
/// Collaborators are injected at construction; the resolver holds no state
/// of its own between calls.
pub struct CombatOutcomeResolver<'a> {
    env: RunEnv<'a>,
    config: &'a RunConfig,
}

impl<'a> CombatOutcomeResolver<'a> {
    pub fn new(env: RunEnv<'a>, config: &'a RunConfig) -> Self {
        Self { env, config }
    }

    /// Blockade-ness from either the descriptor or the durable run flag.
    ///
    /// The descriptor may already be gone; the run flag was mirrored from it
    /// when the combat started.
    fn is_blockade(state: &SessionState) -> bool {
        state
            .encounter
            .as_ref()
            .is_some_and(|descriptor| descriptor.is_blockade())
            || state.run.as_ref().is_some_and(|run| run.is_blockade_combat())
    }

    fn expect_phase(state: &SessionState, expected: CombatPhase) -> Result<(), ResolveError> {
        let combat = state.combat.as_ref().ok_or(ResolveError::NoCombat)?;
        if combat.phase != expected {
            return Err(ResolveError::UnexpectedPhase {
                expected,
                found: combat.phase,
            });
        }
        Ok(())
    }

    /// Resolves the battle result against the combat in flight.
    ///
    /// Victories stage their reward and leave the combat context in place;
    /// defeats terminate the run immediately.
    pub fn resolve(
        &self,
        state: &mut SessionState,
        battle: &BattleResult,
    ) -> Result<OutcomeDescriptor, ResolveError> {
        Self::expect_phase(state, CombatPhase::AwaitingOutcome)?;
        let encounter = state
            .combat
            .as_ref()
            .and_then(|combat| combat.encounter(Self::is_blockade(state)))
            .ok_or(ResolveError::MissingIdentity)?;

        match (battle.winner, encounter) {
            (Winner::Player, Encounter::Boss { boss_id }) => {
                self.resolve_boss_victory(state, battle, boss_id)
            }
            (Winner::Player, Encounter::Regular { ai_id }) => {
                self.resolve_regular_victory(state, battle, ai_id, false)
            }
            (Winner::Player, Encounter::Blockade { ai_id }) => {
                self.resolve_regular_victory(state, battle, ai_id, true)
            }
            (Winner::Opponent, encounter) => Ok(self.resolve_defeat(state, &encounter)),
        }
    }

    fn resolve_regular_victory(
        &self,
        state: &mut SessionState,
        battle: &BattleResult,
        ai_id: HostileId,
        blockade: bool,
    ) -> Result<OutcomeDescriptor, ResolveError> {
        let loot = self.env.loot()?;
        let threat = self.env.threat()?;
        let reputation = self.env.reputation()?;
        let hostile = self.env.hostiles()?.hostile(&ai_id);

        let SessionState {
            profile,
            run,
            combat,
            ..
        } = &mut *state;
        let run = run.as_mut().ok_or(ResolveError::NoActiveRun)?;
        let combat = combat.as_mut().ok_or(ResolveError::NoCombat)?;

        if let Some(key) = battle
            .section_hull
            .keys()
            .find(|key| !run.sections.contains_key(*key))
        {
            return Err(ResolveError::UnknownSection(key.clone()));
        }
        let loadout_value = self
            .env
            .loadouts()?
            .loadout(run.ship_slot)
            .map_or(0, |loadout| loadout.value);

        let tier = combat.tier;
        let deck = hostile
            .as_ref()
            .map_or_else(|| DeckId::new(ai_id.as_str()), |profile| profile.deck.clone());
        let mut messages = vec![format!("Defeated {ai_id}.")];

        // Hull after combat.
        for (key, hull) in &battle.section_hull {
            if let Some(section) = run.sections.get_mut(key) {
                section.set_hull(*hull);
            }
        }
        run.refresh_hull();

        // Reputation, additive and capped per combat.
        let cap = self.config.reputation_cap(tier);
        let award = reputation.compute_combat_reputation(loadout_value, &ai_id, cap);
        run.combat_reputation_earned += award.earned.min(cap);
        if award.was_capped {
            messages.push(format!("Reputation capped at {cap}."));
        }

        // Salvage, with PoI loot in front unless the salvage screen owns it.
        let mut salvage = loot.generate_salvage(&deck, tier, combat.difficulty);
        let from_salvage = run
            .interruptions
            .poi_combat()
            .is_some_and(|poi| poi.from_salvage);
        if !from_salvage {
            if let Some(pending) = run.interruptions.take_salvage() {
                let mut merged = pending.loot;
                merged.append(&mut salvage);
                salvage = merged;
            }
        }

        // Drone-blueprint PoIs reveal their blueprint in a separate step.
        let poi_reward = run
            .interruptions
            .poi_combat()
            .map(|poi| (poi.reward.clone(), poi.coord));
        let blueprint_poi = poi_reward
            .as_ref()
            .is_some_and(|(reward, _)| reward.blueprint_category().is_some());
        if let Some((reward, coord)) = &poi_reward {
            if let Some(category) = reward.blueprint_category() {
                match loot.generate_blueprint(category, tier, &profile.unlocked_blueprints) {
                    BlueprintDraw::Granted(blueprint) => {
                        run.interruptions
                            .insert(Interruption::BlueprintReward(PendingBlueprint {
                                blueprint,
                                coord: Some(*coord),
                            }));
                        messages.push("A drone blueprint was recovered.".to_owned());
                    }
                    BlueprintDraw::Exhausted => {
                        let bonus = self.config.exhausted_blueprint_bonus(tier);
                        merge_bonus_salvage(&mut salvage, bonus);
                        messages.push(format!(
                            "All '{category}' blueprints already unlocked; {bonus} bonus credits added."
                        ));
                    }
                }
            }
        }

        combat.staged = Some(StagedReward::Salvage {
            loot: salvage.clone(),
        });
        combat.phase = CombatPhase::VictoryPendingLootReveal;

        // Engaging a blueprint PoI was the player's choice; tracking stays.
        if !blueprint_poi {
            threat.reset_tracking();
            run.set_detection(threat.current_level());
        }

        run.combats_won += 1;
        self.env.record(MissionEvent::CombatWon {
            hostile: ai_id,
            blockade,
        });

        Ok(OutcomeDescriptor {
            outcome: Outcome::Victory,
            loot: salvage,
            boss_reward: None,
            hull: run.hull,
            is_starter_deck: run.is_starter(),
            transition: None,
            message: messages.join(" "),
        })
    }

    fn resolve_boss_victory(
        &self,
        state: &mut SessionState,
        battle: &BattleResult,
        boss_id: BossId,
    ) -> Result<OutcomeDescriptor, ResolveError> {
        let boss = self.env.boss(&boss_id)?;
        let first_victory = state.profile.boss_progress.is_first_victory(&boss_id);
        let reward = boss.reward(first_victory);

        let combat = state.combat.as_mut().ok_or(ResolveError::NoCombat)?;
        combat.staged = Some(StagedReward::Boss {
            boss_id: boss_id.clone(),
            reward,
            first_victory,
        });
        combat.phase = CombatPhase::VictoryPendingLootReveal;

        let message = if first_victory {
            format!("{boss_id} destroyed for the first time.")
        } else {
            format!("{boss_id} destroyed again.")
        };

        Ok(OutcomeDescriptor {
            outcome: Outcome::Victory,
            loot: Vec::new(),
            boss_reward: Some(reward),
            hull: battle.section_hull.values().sum(),
            is_starter_deck: RunConfig::is_starter_slot(combat.ship_slot),
            transition: None,
            message,
        })
    }

    fn resolve_defeat(&self, state: &mut SessionState, encounter: &Encounter) -> OutcomeDescriptor {
        let reason = if encounter.is_boss() {
            FailureReason::Boss
        } else {
            FailureReason::Combat
        };

        let ship_slot = state
            .run
            .as_ref()
            .map(|run| run.ship_slot)
            .or_else(|| state.combat.as_ref().map(|combat| combat.ship_slot))
            .unwrap_or(RunConfig::STARTER_SHIP_SLOT);
        let is_starter_deck = RunConfig::is_starter_slot(ship_slot);

        if let Some(run) = state.run.as_mut() {
            run.combats_lost += 1;
            run.hull = 0;
        }
        let forfeited = terminate_failure(state, reason, &self.env)
            .map_or(0, |summary| summary.forfeited_items);

        OutcomeDescriptor {
            outcome: Outcome::Defeat,
            loot: Vec::new(),
            boss_reward: None,
            hull: 0,
            is_starter_deck,
            transition: Some(TransitionTarget::MissingInAction { reason }),
            message: format!("Ship lost ({reason}); {forfeited} collected items forfeited."),
        }
    }

    /// Banks the staged reward once the player has acknowledged it.
    ///
    /// Any interrupted PoI is left untouched so its own loot can still be
    /// offered afterwards.
    pub fn finalize_victory(
        &self,
        state: &mut SessionState,
    ) -> Result<TransitionTarget, ResolveError> {
        Self::expect_phase(state, CombatPhase::VictoryPendingLootReveal)?;
        let staged = state
            .combat
            .as_ref()
            .and_then(|combat| combat.staged.clone())
            .ok_or(ResolveError::NothingStaged)?;

        match staged {
            StagedReward::Salvage { loot } => self.finalize_salvage(state, loot),
            StagedReward::Boss {
                boss_id,
                reward,
                first_victory,
            } => Ok(self.finalize_boss(state, boss_id, reward, first_victory)),
        }
    }

    fn finalize_salvage(
        &self,
        state: &mut SessionState,
        loot: Vec<LootItem>,
    ) -> Result<TransitionTarget, ResolveError> {
        let blockade = Self::is_blockade(state);
        let run = state.run.as_mut().ok_or(ResolveError::NoActiveRun)?;

        run.credits_earned += salvage_credit_total(&loot);
        run.ai_cores_earned += ai_core_total(&loot);
        run.collected_loot.extend(loot);

        let blueprint_pending = run.interruptions.blueprint().is_some();
        let target = if blockade {
            run.interruptions.insert(Interruption::BlockadeExtraction);
            run.flags.insert(RunFlags::BLOCKADE_CLEARED);
            run.flags.remove(RunFlags::BLOCKADE_COMBAT);
            TransitionTarget::ReturnToMapAutoExtract
        } else if blueprint_pending {
            TransitionTarget::AwaitBlueprintAccept
        } else {
            TransitionTarget::ResumeRun
        };

        if !blueprint_pending {
            state.clear_combat();
        } else if let Some(combat) = state.combat.as_mut() {
            combat.phase = CombatPhase::VictoryPendingBlueprint;
            combat.staged = None;
        }
        Ok(target)
    }

    fn finalize_boss(
        &self,
        state: &mut SessionState,
        boss_id: BossId,
        reward: BossReward,
        first_victory: bool,
    ) -> TransitionTarget {
        let profile = &mut state.profile;
        profile.credits += reward.credits;
        profile.ai_cores += reward.ai_cores;
        profile.reputation += reward.reputation;
        profile.boss_progress.record_victory(&boss_id);
        state.clear_combat();

        self.env.record(MissionEvent::BossDefeated {
            boss: boss_id,
            first_victory,
        });
        TransitionTarget::ReturnToHub
    }

    /// Collects the pending drone blueprint and leaves the combat.
    pub fn accept_blueprint(
        &self,
        state: &mut SessionState,
    ) -> Result<TransitionTarget, ResolveError> {
        Self::expect_phase(state, CombatPhase::VictoryPendingBlueprint)?;
        let run = state.run.as_mut().ok_or(ResolveError::NoActiveRun)?;
        let pending = run
            .interruptions
            .take_blueprint()
            .ok_or(ResolveError::NoPendingBlueprint)?;

        let mut blueprint = pending.blueprint;
        blueprint.source = LootSource::BlueprintPoi;
        run.collected_loot.push(blueprint);

        let target = if run
            .interruptions
            .contains(InterruptionKind::BlockadeExtraction)
        {
            TransitionTarget::ReturnToMapAutoExtract
        } else {
            TransitionTarget::ResumeRun
        };
        state.clear_combat();
        Ok(target)
    }
}
