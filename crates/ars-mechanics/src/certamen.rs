//! Certamen: the formal magical duel.
//!
//! A duel moves Opening → Exchange → Resolution and never backwards. The
//! challenger declares Arts when opening, the defender answers with theirs,
//! and then both sides roll exchanges until one leads by the victory
//! margin. There is no cap on exchanges; a caller may also end a duel that
//! is still in Exchange, as long as someone is ahead.

use std::fmt;

use ars_core::{
    AccumulatesStrain, ArtPair, CharacterId, Form, HasArtScores, Participant, Technique,
};
use serde::{Deserialize, Serialize};

use crate::context::ResolveContext;
use crate::dice::DieRoll;
use crate::error::{MechError, MechResult};
use crate::event::{ResolutionEvent, ResolutionKind};

/// Where a duel stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DuelStage {
    /// Challenge issued, waiting for the defender.
    Opening,
    /// Both sides are rolling.
    Exchange,
    /// Someone has won.
    Resolution,
}

impl fmt::Display for DuelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening => write!(f, "Opening"),
            Self::Exchange => write!(f, "Exchange"),
            Self::Resolution => write!(f, "Resolution"),
        }
    }
}

/// One side of a duel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duelist {
    /// The character's id.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Declared Arts; `None` until the defender responds.
    pub arts: Option<ArtPair>,
    /// Sum of exchange totals so far.
    pub score: i32,
    /// Fatigue levels spent in exchanges.
    pub fatigue_spent: i32,
}

impl Duelist {
    fn new(who: &impl Participant, arts: Option<ArtPair>) -> Self {
        Self {
            id: who.id(),
            name: who.name().to_string(),
            arts,
            score: 0,
            fatigue_spent: 0,
        }
    }
}

/// One side's part of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRoll {
    /// Who rolled.
    pub id: CharacterId,
    /// The stress die.
    pub roll: DieRoll,
    /// Die + Technique + Form + modifier.
    pub total: i32,
    /// Fatigue levels charged for this exchange.
    pub fatigue_cost: i32,
}

/// The result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    /// Rolls, in the order the participants were passed.
    pub rolls: [ExchangeRoll; 2],
    /// Running scores, challenger first.
    pub scores: (i32, i32),
    /// Exchanges completed, including this one.
    pub round: u32,
    /// Stage after the exchange.
    pub stage: DuelStage,
    /// Set once someone leads by the victory margin.
    pub victor: Option<CharacterId>,
}

/// How a duel ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelSummary {
    /// The winner's id.
    pub winner: CharacterId,
    /// The loser's id.
    pub loser: CharacterId,
    /// The winner's final score.
    pub winning_score: i32,
    /// The loser's final score.
    pub losing_score: i32,
    /// Exchanges rolled.
    pub rounds: u32,
    /// Fatigue levels the winner spent.
    pub winner_fatigue: i32,
    /// Fatigue levels the loser spent.
    pub loser_fatigue: i32,
    /// Warping points each side gained.
    pub warping_gained: i32,
}

/// A Certamen duel between two magi.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duel {
    stage: DuelStage,
    challenger: Duelist,
    defender: Duelist,
    rounds_completed: u32,
    victor: Option<CharacterId>,
    ended: bool,
}

fn art_scores(who: &impl HasArtScores, arts: ArtPair) -> MechResult<(i32, i32)> {
    let technique = who
        .technique(arts.technique)
        .ok_or_else(|| MechError::UnknownArt {
            character: who.name().to_string(),
            art: arts.technique.to_string(),
        })?;
    let form = who.form(arts.form).ok_or_else(|| MechError::UnknownArt {
        character: who.name().to_string(),
        art: arts.form.to_string(),
    })?;
    Ok((technique, form))
}

fn exchange_fatigue(technique: i32, form: i32) -> i32 {
    ((technique + form) / 10).max(1)
}

impl Duel {
    /// Issue a challenge with the challenger's Technique and Form.
    pub fn initiate(
        ctx: &mut ResolveContext<'_>,
        challenger: &impl HasArtScores,
        defender: &impl HasArtScores,
        technique: Technique,
        form: Form,
    ) -> MechResult<Self> {
        if challenger.id() == defender.id() {
            return Err(MechError::InvalidConfiguration(format!(
                "{} cannot duel themselves",
                challenger.name()
            )));
        }
        let arts = ArtPair::new(technique, form);
        art_scores(challenger, arts)?;

        tracing::debug!(
            challenger = challenger.name(),
            defender = defender.name(),
            arts = %arts,
            "certamen opened"
        );
        ctx.emit(ResolutionEvent::new(
            ResolutionKind::CertamenOpened,
            vec![challenger.id(), defender.id()],
        ));

        Ok(Self {
            stage: DuelStage::Opening,
            challenger: Duelist::new(challenger, Some(arts)),
            defender: Duelist::new(defender, None),
            rounds_completed: 0,
            victor: None,
            ended: false,
        })
    }

    /// The defender answers with their own Arts, moving to Exchange.
    pub fn respond(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        defender: &impl HasArtScores,
        technique: Technique,
        form: Form,
    ) -> MechResult<()> {
        if self.stage != DuelStage::Opening {
            return Err(self.wrong_stage("respond to a challenge"));
        }
        if defender.id() != self.defender.id {
            return Err(MechError::UnknownParticipant(defender.name().to_string()));
        }
        let arts = ArtPair::new(technique, form);
        art_scores(defender, arts)?;

        self.defender.arts = Some(arts);
        self.stage = DuelStage::Exchange;

        tracing::debug!(defender = defender.name(), arts = %arts, "certamen answered");
        ctx.emit(ResolutionEvent::new(
            ResolutionKind::CertamenAnswered,
            vec![defender.id(), self.challenger.id],
        ));
        Ok(())
    }

    /// Roll one exchange. `modifiers` pair with `p1` and `p2` in order.
    ///
    /// Each side's exchange fatigue is charged to it straight away. Both
    /// participants may be passed in either order.
    pub fn resolve_exchange(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        p1: &mut (impl HasArtScores + AccumulatesStrain),
        p2: &mut (impl HasArtScores + AccumulatesStrain),
        modifiers: (i32, i32),
    ) -> MechResult<ExchangeOutcome> {
        if self.stage != DuelStage::Exchange {
            return Err(self.wrong_stage("resolve an exchange"));
        }
        let first_is_challenger = self.sides(&*p1, &*p2)?;
        let (arts1, arts2) = if first_is_challenger {
            (self.challenger.arts, self.defender.arts)
        } else {
            (self.defender.arts, self.challenger.arts)
        };
        let (Some(arts1), Some(arts2)) = (arts1, arts2) else {
            return Err(self.wrong_stage("resolve an exchange"));
        };
        let (t1, f1) = art_scores(&*p1, arts1)?;
        let (t2, f2) = art_scores(&*p2, arts2)?;

        let roll1 = ctx.stress_die();
        let total1 = roll1.total() + t1 + f1 + modifiers.0;
        let cost1 = exchange_fatigue(t1, f1);
        p1.add_fatigue(cost1);

        let roll2 = ctx.stress_die();
        let total2 = roll2.total() + t2 + f2 + modifiers.1;
        let cost2 = exchange_fatigue(t2, f2);
        p2.add_fatigue(cost2);

        {
            let (first, second) = if first_is_challenger {
                (&mut self.challenger, &mut self.defender)
            } else {
                (&mut self.defender, &mut self.challenger)
            };
            first.score += total1;
            first.fatigue_spent += cost1;
            second.score += total2;
            second.fatigue_spent += cost2;
        }
        self.rounds_completed += 1;

        let margin = ctx.rules.certamen_victory_margin;
        let diff = self.challenger.score - self.defender.score;
        if diff.abs() >= margin {
            self.stage = DuelStage::Resolution;
            self.victor = Some(if diff > 0 {
                self.challenger.id
            } else {
                self.defender.id
            });
        }

        tracing::debug!(
            round = self.rounds_completed,
            challenger_score = self.challenger.score,
            defender_score = self.defender.score,
            stage = %self.stage,
            "certamen exchange"
        );
        ctx.emit(
            ResolutionEvent::new(ResolutionKind::CertamenExchange, vec![p1.id(), p2.id()])
                .with_delta("total", total1)
                .with_delta("opponent_total", total2)
                .with_delta("round", self.rounds_completed as i32),
        );

        Ok(ExchangeOutcome {
            rolls: [
                ExchangeRoll {
                    id: p1.id(),
                    roll: roll1,
                    total: total1,
                    fatigue_cost: cost1,
                },
                ExchangeRoll {
                    id: p2.id(),
                    roll: roll2,
                    total: total2,
                    fatigue_cost: cost2,
                },
            ],
            scores: (self.challenger.score, self.defender.score),
            round: self.rounds_completed,
            stage: self.stage,
            victor: self.victor,
        })
    }

    /// Conclude the duel and charge both sides warping for its length.
    pub fn end(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        p1: &mut impl AccumulatesStrain,
        p2: &mut impl AccumulatesStrain,
    ) -> MechResult<DuelSummary> {
        if self.stage == DuelStage::Opening {
            return Err(self.wrong_stage("end a duel"));
        }
        if self.ended {
            return Err(MechError::InvalidConfiguration(
                "the duel has already ended".to_string(),
            ));
        }
        self.sides(&*p1, &*p2)?;
        if self.challenger.score == self.defender.score {
            return Err(MechError::InvalidConfiguration(
                "a tied duel has no winner".to_string(),
            ));
        }

        let divisor = ctx.rules.certamen_warping_divisor.max(1);
        let warping = (self.rounds_completed / divisor) as i32;
        if warping > 0 {
            p1.add_warping(warping);
            p2.add_warping(warping);
        }

        let (winner, loser) = if self.challenger.score > self.defender.score {
            (&self.challenger, &self.defender)
        } else {
            (&self.defender, &self.challenger)
        };
        let summary = DuelSummary {
            winner: winner.id,
            loser: loser.id,
            winning_score: winner.score,
            losing_score: loser.score,
            rounds: self.rounds_completed,
            winner_fatigue: winner.fatigue_spent,
            loser_fatigue: loser.fatigue_spent,
            warping_gained: warping,
        };
        tracing::debug!(
            winner = %winner.name,
            loser = %loser.name,
            rounds = self.rounds_completed,
            warping,
            "certamen ended"
        );

        self.victor = Some(summary.winner);
        self.stage = DuelStage::Resolution;
        self.ended = true;

        ctx.emit(
            ResolutionEvent::new(
                ResolutionKind::CertamenEnded,
                vec![summary.winner, summary.loser],
            )
            .with_delta("rounds", summary.rounds as i32)
            .with_delta("warping", warping),
        );
        Ok(summary)
    }

    /// Current stage.
    pub fn stage(&self) -> DuelStage {
        self.stage
    }

    /// The side that issued the challenge.
    pub fn challenger(&self) -> &Duelist {
        &self.challenger
    }

    /// The side that was challenged.
    pub fn defender(&self) -> &Duelist {
        &self.defender
    }

    /// Exchanges rolled so far.
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    /// The winner, once there is one.
    pub fn victor(&self) -> Option<CharacterId> {
        self.victor
    }

    /// True once [`Duel::end`] has succeeded.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Match two participants to the duel's sides. Returns whether the
    /// first is the challenger.
    fn sides(&self, a: &impl Participant, b: &impl Participant) -> MechResult<bool> {
        let challenger = self.challenger.id;
        let defender = self.defender.id;
        for who in [(a.id(), a.name()), (b.id(), b.name())] {
            if who.0 != challenger && who.0 != defender {
                return Err(MechError::UnknownParticipant(who.1.to_string()));
            }
        }
        if a.id() == b.id() {
            return Err(MechError::InvalidConfiguration(format!(
                "{} was passed as both duelists",
                a.name()
            )));
        }
        Ok(a.id() == challenger)
    }

    fn wrong_stage(&self, action: &'static str) -> MechError {
        MechError::InvalidStage {
            action,
            stage: self.stage.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::dice::ScriptedRolls;
    use crate::event::EventLog;
    use ars_core::{Character, FatigueLevel};

    fn magi() -> (Character, Character) {
        let a = Character::new("Flambeau")
            .with_technique(Technique::Perdo, 5)
            .with_form(Form::Ignem, 5);
        let b = Character::new("Tremere")
            .with_technique(Technique::Rego, 5)
            .with_form(Form::Vim, 5);
        (a, b)
    }

    fn opened(ctx: &mut ResolveContext<'_>, a: &Character, b: &Character) -> Duel {
        let mut duel = Duel::initiate(ctx, a, b, Technique::Perdo, Form::Ignem).unwrap();
        duel.respond(ctx, b, Technique::Rego, Form::Vim).unwrap();
        duel
    }

    #[test]
    fn cannot_duel_yourself() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (a, _) = magi();
        let err = Duel::initiate(&mut ctx, &a, &a, Technique::Perdo, Form::Ignem).unwrap_err();
        assert!(matches!(err, MechError::InvalidConfiguration(_)));
    }

    #[test]
    fn challenger_needs_the_arts() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (a, b) = magi();
        let err = Duel::initiate(&mut ctx, &a, &b, Technique::Creo, Form::Ignem).unwrap_err();
        assert!(matches!(err, MechError::UnknownArt { .. }));
    }

    #[test]
    fn only_the_defender_responds_once() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (a, b) = magi();
        let mut duel = Duel::initiate(&mut ctx, &a, &b, Technique::Perdo, Form::Ignem).unwrap();
        assert_eq!(duel.stage(), DuelStage::Opening);

        let err = duel
            .respond(&mut ctx, &a, Technique::Perdo, Form::Ignem)
            .unwrap_err();
        assert!(matches!(err, MechError::UnknownParticipant(_)));

        duel.respond(&mut ctx, &b, Technique::Rego, Form::Vim).unwrap();
        assert_eq!(duel.stage(), DuelStage::Exchange);

        let err = duel
            .respond(&mut ctx, &b, Technique::Rego, Form::Vim)
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidStage { .. }));
    }

    #[test]
    fn no_exchange_before_response() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([5, 5]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (mut a, mut b) = magi();
        let mut duel = Duel::initiate(&mut ctx, &a, &b, Technique::Perdo, Form::Ignem).unwrap();
        let err = duel
            .resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0))
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidStage { .. }));
        assert_eq!(a.fatigue, FatigueLevel::Fresh);
    }

    #[test]
    fn ends_when_lead_reaches_margin() {
        let rules = RulesConfig::default();
        // Leads of 3, 6, then exactly 10.
        let mut dice = ScriptedRolls::new([7, 4, 6, 3, 8, 4]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (mut a, mut b) = magi();
        let mut duel = opened(&mut ctx, &a, &b);

        let first = duel.resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0)).unwrap();
        assert_eq!(first.scores, (17, 14));
        assert_eq!(first.stage, DuelStage::Exchange);
        let second = duel.resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0)).unwrap();
        assert_eq!(second.victor, None);
        let third = duel.resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0)).unwrap();
        assert_eq!(third.scores, (51, 41));
        assert_eq!(third.stage, DuelStage::Resolution);
        assert_eq!(third.victor, Some(a.id));
        assert_eq!(duel.rounds_completed(), 3);

        // One fatigue level per exchange, charged as it happens.
        assert_eq!(a.fatigue, FatigueLevel::Tired);
        assert_eq!(b.fatigue, FatigueLevel::Tired);

        let err = duel
            .resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0))
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidStage { .. }));

        let summary = duel.end(&mut ctx, &mut a, &mut b).unwrap();
        assert_eq!(summary.winner, a.id);
        assert_eq!(summary.winning_score, 51);
        assert_eq!(summary.losing_score, 41);
        assert_eq!(summary.winner_fatigue, 3);
        assert_eq!(summary.warping_gained, 0);
        assert!(duel.is_ended());
    }

    #[test]
    fn participants_in_either_order() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([9, 2]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (mut a, mut b) = magi();
        let mut duel = opened(&mut ctx, &a, &b);
        let out = duel
            .resolve_exchange(&mut ctx, &mut b, &mut a, (0, 3))
            .unwrap();
        assert_eq!(out.rolls[0].id, b.id);
        // Challenger rolled 2 + 10 + 3, defender 9 + 10.
        assert_eq!(out.scores, (15, 19));
    }

    #[test]
    fn long_duel_warps_both() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([5, 5, 5, 5, 5, 5, 5, 5, 9, 2]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (mut a, mut b) = magi();
        let mut duel = opened(&mut ctx, &a, &b);
        for _ in 0..5 {
            duel.resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0)).unwrap();
        }
        assert_eq!(duel.stage(), DuelStage::Exchange);

        let summary = duel.end(&mut ctx, &mut a, &mut b).unwrap();
        assert_eq!(summary.rounds, 5);
        assert_eq!(summary.warping_gained, 1);
        assert_eq!(a.warping_points, 1);
        assert_eq!(b.warping_points, 1);
        assert_eq!(duel.stage(), DuelStage::Resolution);

        let err = duel.end(&mut ctx, &mut a, &mut b).unwrap_err();
        assert!(matches!(err, MechError::InvalidConfiguration(_)));
        assert_eq!(a.warping_points, 1);
    }

    #[test]
    fn tied_duel_cannot_end() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([6, 6]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (mut a, mut b) = magi();
        let mut duel = opened(&mut ctx, &a, &b);
        duel.resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0)).unwrap();
        let err = duel.end(&mut ctx, &mut a, &mut b).unwrap_err();
        assert!(matches!(err, MechError::InvalidConfiguration(_)));
        assert!(!duel.is_ended());
    }

    #[test]
    fn cannot_end_during_opening() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (mut a, mut b) = magi();
        let mut duel = Duel::initiate(&mut ctx, &a, &b, Technique::Perdo, Form::Ignem).unwrap();
        let err = duel.end(&mut ctx, &mut a, &mut b).unwrap_err();
        assert_eq!(err.to_string(), "cannot end a duel during Opening");
    }

    #[test]
    fn strangers_are_rejected() {
        let rules = RulesConfig::default();
        let mut dice = ScriptedRolls::new([5, 5]);
        let mut ctx = ResolveContext::new(&mut dice, &rules);
        let (mut a, b) = magi();
        let mut duel = opened(&mut ctx, &a, &b);
        let mut stranger = Character::new("Bonisagus").with_all_arts(5);
        let err = duel
            .resolve_exchange(&mut ctx, &mut a, &mut stranger, (0, 0))
            .unwrap_err();
        assert!(matches!(err, MechError::UnknownParticipant(_)));
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn margin_comes_from_rules() {
        let rules = RulesConfig::default().with_victory_margin(3);
        let mut dice = ScriptedRolls::new([7, 4]);
        let mut log = EventLog::new(0);
        let (mut a, mut b) = magi();
        {
            let mut ctx = ResolveContext::new(&mut dice, &rules).with_sink(&mut log);
            let mut duel = opened(&mut ctx, &a, &b);
            let out = duel
                .resolve_exchange(&mut ctx, &mut a, &mut b, (0, 0))
                .unwrap();
            assert_eq!(out.victor, Some(a.id));
        }
        assert_eq!(log.of_kind(ResolutionKind::CertamenExchange).len(), 1);
        assert_eq!(log.len(), 3);
    }
}
