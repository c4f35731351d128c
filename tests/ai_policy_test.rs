//! Decision policies acting through the phase context

mod common;

use card_duel::core::{SpellCategory, SpellEffect, TrapEffect, TrapTrigger};
use card_duel::game::hard_controller::threat_level;
use card_duel::game::{policy_for, Difficulty, PhaseContext};
use common::{default_life, duelist_holding, duelist_with_field, monster, spell, trap};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use similar_asserts::assert_eq;

#[test]
fn test_hard_lethal_swings_with_everything() {
    let mut me = duelist_with_field(
        0,
        default_life(),
        &[monster(1, 900, 300), monster(2, 600, 300), monster(3, 500, 300)],
    );
    let backrow = [
        trap(4, TrapTrigger::OnSummon, TrapEffect::DamagePlayer, 0),
        trap(5, TrapTrigger::OnSpellActivation, TrapEffect::NegateSpell, 0),
    ];
    let mut opponent = duelist_with_field(1, 2000, &backrow);

    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let mut ctx = PhaseContext::new(&mut me, &mut opponent, &mut rng);
    policy_for(Difficulty::Hard).battle_phase(&mut ctx);

    for slot in 0..3 {
        assert!(me.player().has_monster_attacked(slot), "slot {slot} skipped");
    }
    assert_eq!(opponent.player().life(), 0);
    assert!(opponent.is_defeated());
}

#[test]
fn test_hard_stays_home_under_threat() {
    let mut me = duelist_with_field(0, default_life(), &[monster(1, 1000, 800)]);
    let mut opponent = duelist_with_field(
        1,
        default_life(),
        &[
            monster(2, 1500, 500),
            monster(3, 400, 500),
            trap(4, TrapTrigger::OnSummon, TrapEffect::DamagePlayer, 0),
        ],
    );

    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let mut ctx = PhaseContext::new(&mut me, &mut opponent, &mut rng);
    assert_eq!(threat_level(&ctx), 5);
    policy_for(Difficulty::Hard).battle_phase(&mut ctx);

    assert!(!me.player().has_monster_attacked(0));
    assert_eq!(opponent.player().monster_row().count(), 2);
}

#[test]
fn test_hard_turtles_when_low() {
    let mut me = duelist_holding(0, 1500, &[monster(1, 2000, 300), monster(2, 300, 1900)]);
    let mut opponent = duelist_with_field(1, default_life(), &[monster(3, 1000, 1000)]);

    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let mut ctx = PhaseContext::new(&mut me, &mut opponent, &mut rng);
    policy_for(Difficulty::Hard).main_phase(&mut ctx);

    assert_eq!(me.player().monster_at(0).map(|c| c.defense()), Some(Some(1900)));
}

#[test]
fn test_hard_removal_only_against_a_bigger_monster() {
    let shatter = spell(10, SpellCategory::Destroy, SpellEffect::DestroyWeak, 3000);
    let hand = [monster(1, 1200, 300), shatter.clone(), monster(2, 100, 100), monster(3, 100, 100)];

    let mut me = duelist_holding(0, default_life(), &hand);
    let mut opponent = duelist_with_field(1, default_life(), &[monster(4, 2500, 1000)]);
    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let mut ctx = PhaseContext::new(&mut me, &mut opponent, &mut rng);
    policy_for(Difficulty::Hard).main_phase(&mut ctx);
    assert_eq!(me.player().spell_trap_at(0).map(|c| c.id), Some(shatter.id));

    let mut me = duelist_holding(0, default_life(), &hand);
    let mut opponent = duelist_with_field(1, default_life(), &[monster(4, 1000, 1000)]);
    let mut ctx = PhaseContext::new(&mut me, &mut opponent, &mut rng);
    policy_for(Difficulty::Hard).main_phase(&mut ctx);
    assert!(me.player().hand().contains(shatter.id));
}

#[test]
fn test_medium_targets_weakest() {
    let mut me = duelist_with_field(0, default_life(), &[monster(1, 800, 300), monster(2, 1600, 300)]);
    let mut opponent =
        duelist_with_field(1, default_life(), &[monster(3, 1500, 1000), monster(4, 700, 1200)]);

    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let mut ctx = PhaseContext::new(&mut me, &mut opponent, &mut rng);
    policy_for(Difficulty::Medium).battle_phase(&mut ctx);

    assert!(me.player().has_monster_attacked(1));
    assert!(!me.player().has_monster_attacked(0));
    assert!(opponent.player().monster_at(1).is_none());
    assert!(opponent.player().monster_at(0).is_some());
}

#[test]
fn test_easy_never_breaks_rules() {
    for seed in 0..32 {
        let hand = [
            monster(1, 1000, 1000),
            monster(2, 1200, 800),
            spell(3, SpellCategory::Buff, SpellEffect::BoostAttack, 20),
            trap(4, TrapTrigger::OnAttack, TrapEffect::DamageAttacker, 0),
        ];
        let mut me = duelist_holding(0, default_life(), &hand);
        let mut opponent = duelist_with_field(1, default_life(), &[monster(5, 500, 500)]);
        let mut rng = ChaCha12Rng::seed_from_u64(seed);

        let mut easy = policy_for(Difficulty::Easy);
        let mut ctx = PhaseContext::new(&mut me, &mut opponent, &mut rng);
        easy.main_phase(&mut ctx);
        easy.battle_phase(&mut ctx);

        assert_eq!(me.player().monster_row().count(), 1, "seed {seed}");
        assert!(me.player().hand().len() >= 1, "seed {seed}");
    }
}
