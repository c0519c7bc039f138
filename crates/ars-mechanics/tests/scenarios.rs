//! End-to-end resolution scenarios driven by scripted and seeded dice.

use ars_core::{
    Armor, Character, Characteristic, FatigueLevel, Form, HitLocation, Technique, Weapon,
    WeaponKind, WoundSeverity,
};
use ars_mechanics::{
    AttackRequest, CastRequest, CombatAction, CombatRound, Duel, DuelStage, EventLog,
    MechError, ResolutionKind, ResolveContext, RulesConfig, ScriptedRolls, cast_spell,
    resolve_attack, stress_die,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn knight() -> Character {
    Character::new("Sir Aldric")
        .with_characteristic(Characteristic::Dexterity, 2)
        .with_characteristic(Characteristic::Quickness, 1)
        .with_characteristic(Characteristic::Strength, 2)
        .with_characteristic(Characteristic::Stamina, 1)
        .with_ability("Single Weapon", 4)
        .with_weapon(Weapon::new("Longsword", WeaponKind::Single).with_modifiers(1, 4, 1, 6))
        .with_armor(Armor::new("Chain Mail", 4))
}

fn grog() -> Character {
    Character::new("Hugo")
        .with_characteristic(Characteristic::Dexterity, 1)
        .with_characteristic(Characteristic::Stamina, 2)
        .with_ability("Single Weapon", 2)
        .with_weapon(Weapon::new("Mace", WeaponKind::Single).with_modifiers(0, 3, 0, 8))
}

#[test]
fn exploding_stress_die() {
    let mut dice = ScriptedRolls::new([0, 0, 7]);
    let roll = stress_die(&mut dice);
    assert_eq!(roll.multiplier, 4);
    assert_eq!(roll.total(), 28);
    assert!(!roll.is_botch);
}

#[test]
fn full_combat_round() {
    let rules = RulesConfig::default();
    // Initiative 6 and 3; knight attacks 7 vs 4 with location 5; grog
    // attacks 5 vs 3.
    let mut dice = ScriptedRolls::new([6, 3, 7, 4, 5, 5, 3]);
    let mut log = EventLog::new(0);
    let k = knight();
    let mut g = grog();

    let mut combat = CombatRound::new();
    {
        let mut ctx = ResolveContext::new(&mut dice, &rules).with_sink(&mut log);
        assert_eq!(combat.add_combatant(&mut ctx, &k, "Longsword", 0).unwrap(), 8);
        assert_eq!(combat.add_combatant(&mut ctx, &g, "Mace", 0).unwrap(), 3);
        assert_eq!(combat.current().unwrap().id, k.id);

        let outcome = combat
            .act(
                &mut ctx,
                CombatAction::Attack,
                &k,
                &g,
                &AttackRequest::default(),
            )
            .unwrap();
        let strike = outcome.as_strike().unwrap();
        assert_eq!(strike.attack_total, 17);
        assert_eq!(strike.defense_total, 6);
        assert_eq!(strike.damage, Some(11));
        assert_eq!(strike.final_damage, Some(9));
        let wound = strike.wound.clone().unwrap();
        assert_eq!(wound.severity, WoundSeverity::Heavy);
        assert_eq!(wound.location, HitLocation::RightArm);
        g.add_wound(wound);

        let again = combat.act(
            &mut ctx,
            CombatAction::Attack,
            &k,
            &g,
            &AttackRequest::default(),
        );
        assert!(matches!(again, Err(MechError::CannotAct(_))));

        assert!(!combat.next_turn().unwrap());
        assert_eq!(combat.current().unwrap().id, g.id);
        let reply = combat
            .act(
                &mut ctx,
                CombatAction::Attack,
                &g,
                &k,
                &AttackRequest::default(),
            )
            .unwrap();
        let strike = reply.as_strike().unwrap();
        // 5 + 6 - 5 for the heavy wound.
        assert_eq!(strike.attack_total, 6);
        assert_eq!(strike.defense_total, 9);
        assert!(!strike.is_hit);

        assert!(combat.next_turn().unwrap());
        assert_eq!(combat.round_number(), 2);
    }

    assert_eq!(log.of_kind(ResolutionKind::Initiative).len(), 2);
    assert_eq!(log.of_kind(ResolutionKind::Attack).len(), 2);
    assert_eq!(log.events_for(g.id).len(), 3);
    assert_eq!(dice.remaining(), 0);
}

#[test]
fn attack_is_a_pure_function_of_its_rolls() {
    let rules = RulesConfig::default();
    let k = knight();
    let g = grog();
    let faces = [8, 2, 4];

    let mut first_dice = ScriptedRolls::new(faces);
    let mut ctx = ResolveContext::new(&mut first_dice, &rules);
    let first = resolve_attack(&mut ctx, &k, &g, &AttackRequest::default()).unwrap();

    let mut second_dice = ScriptedRolls::new(faces);
    let mut log = EventLog::new(0);
    let mut ctx = ResolveContext::new(&mut second_dice, &rules).with_sink(&mut log);
    let second = resolve_attack(&mut ctx, &k, &g, &AttackRequest::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(log.len(), 1);
}

#[test]
fn unknown_weapon_rolls_nothing() {
    let rules = RulesConfig::default();
    let mut dice = ScriptedRolls::new([5, 5]);
    let mut ctx = ResolveContext::new(&mut dice, &rules);
    let err = resolve_attack(
        &mut ctx,
        &knight(),
        &grog(),
        &AttackRequest::with_weapon("Halberd"),
    )
    .unwrap_err();
    assert!(matches!(err, MechError::UnknownWeapon { .. }));
    assert_eq!(dice.remaining(), 2);
}

#[test]
fn duel_to_resolution_with_seeded_dice() {
    let rules = RulesConfig::default();
    let mut dice = StdRng::seed_from_u64(7);
    let mut ctx = ResolveContext::new(&mut dice, &rules);
    let mut strong = Character::new("Strong")
        .with_technique(Technique::Perdo, 15)
        .with_form(Form::Vim, 15);
    let mut weak = Character::new("Weak")
        .with_technique(Technique::Rego, 3)
        .with_form(Form::Vim, 3);

    let mut duel = Duel::initiate(&mut ctx, &strong, &weak, Technique::Perdo, Form::Vim).unwrap();
    duel.respond(&mut ctx, &weak, Technique::Rego, Form::Vim).unwrap();

    let mut exchanges = 0;
    while duel.stage() == DuelStage::Exchange && exchanges < 100 {
        duel.resolve_exchange(&mut ctx, &mut strong, &mut weak, (0, 0)).unwrap();
        exchanges += 1;
    }
    assert_eq!(duel.stage(), DuelStage::Resolution);
    assert_eq!(duel.victor(), Some(strong.id));

    let summary = duel.end(&mut ctx, &mut strong, &mut weak).unwrap();
    assert_eq!(summary.winner, strong.id);
    assert_eq!(summary.rounds, exchanges);
    assert!(summary.winning_score - summary.losing_score >= 10);
    // 30 / 10 = 3 levels per exchange for the strong magus.
    assert_eq!(summary.winner_fatigue, 3 * exchanges as i32);
    assert!(strong.fatigue >= FatigueLevel::Tired);
}

#[test]
fn rules_loaded_from_json_change_outcomes() {
    let rules = RulesConfig::from_json(r#"{ "defiant_bonus": 0, "min_spell_botch_dice": 3 }"#)
        .unwrap();
    assert_eq!(rules.certamen_victory_margin, 10);
    assert_eq!(rules.min_spell_botch_dice, 3);

    let magus = Character::new("Bjornaer")
        .with_technique(Technique::Muto, 6)
        .with_form(Form::Animal, 6);
    let spell = ars_core::Spell::new("Shape of the Wolf", Technique::Muto, Form::Animal, 5);
    // A 1, its check die, then three botch dice from the configured floor.
    let mut dice = ScriptedRolls::new([1, 6, 4, 4, 0]);
    let mut ctx = ResolveContext::new(&mut dice, &rules);
    let out = cast_spell(&mut ctx, &spell, &magus, &CastRequest::default()).unwrap();
    assert!(out.botched);
    assert_eq!(out.botch_zeros, 1);
    assert_eq!(dice.remaining(), 0);
}
