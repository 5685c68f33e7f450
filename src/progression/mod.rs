//! Score, experience and boss escalation, plus the upgrade prompt.

use bevy::prelude::*;

use crate::shared::*;

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            choose_upgrade
                .in_set(ArenaSet::Requests)
                .run_if(in_state(GameState::UpgradeChoice)),
        )
        .add_systems(Update, reset_progression.in_set(ArenaSet::Resets))
        .add_systems(Update, award_kills.in_set(ArenaSet::Scoring));
    }
}

/// Credits kills, raises boss encounters and upgrade prompts.
pub fn award_kills(
    mut killed: EventReader<EnemyKilledEvent>,
    mut progression: ResMut<Progression>,
    balance: Res<Balance>,
    mut encounters: EventWriter<StartEncounterEvent>,
    mut next_state: ResMut<NextState<GameState>>,
    player: Query<&Health, With<Player>>,
) {
    let mut prompt = false;
    for event in killed.read() {
        let outcome = progression.award_kill(event.score, event.exp, &balance.progression);
        if outcome.boss_triggered {
            info!(
                "Score {} reached the boss mark; next mark at {}",
                progression.score(),
                progression.boss_mark()
            );
            encounters.send(StartEncounterEvent);
        }
        prompt |= outcome.upgrade_prompt;
    }

    // A dead player goes to GameOver instead; the queued prompt dies with the session.
    let alive = player.get_single().is_ok_and(|health| !health.is_dead());
    if prompt && alive {
        info!(
            "Level up! {} upgrade(s) pending, next at {} exp",
            progression.pending_upgrades(),
            progression.exp_to_next()
        );
        next_state.set(GameState::UpgradeChoice);
    }
}

/// Resolves one queued prompt per chosen weapon.
pub fn choose_upgrade(
    mut choices: EventReader<UpgradeChosenEvent>,
    mut progression: ResMut<Progression>,
    mut levels: ResMut<WeaponLevels>,
    mut rebuild: EventWriter<RebuildLoadoutEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // One choice per frame; extra presses are dropped.
    let Some(UpgradeChosenEvent(kind)) = choices.read().next().copied() else {
        return;
    };
    choices.clear();

    let level = levels.level_up(kind);
    info!("Upgraded {} to level {}", kind.label(), level);
    rebuild.send(RebuildLoadoutEvent(kind));

    if !progression.resolve_upgrade() {
        next_state.set(GameState::Playing);
    }
}

fn reset_progression(
    mut restarts: EventReader<SessionRestartEvent>,
    mut progression: ResMut<Progression>,
    balance: Res<Balance>,
) {
    if restarts.read().count() == 0 {
        return;
    }
    *progression = Progression::new(&balance.progression);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill_minions(progression: &mut Progression, tuning: &ProgressionTuning, count: u32) -> u32 {
        (0..count)
            .filter(|_| progression.award_kill(100, 1, tuning).upgrade_prompt)
            .count() as u32
    }

    #[test]
    fn test_experience_wraps_by_subtraction() {
        let tuning = ProgressionTuning::default();
        let mut progression = Progression::new(&tuning);

        assert_eq!(kill_minions(&mut progression, &tuning, 9), 0);
        assert_eq!(progression.exp(), 9);
        assert_eq!(kill_minions(&mut progression, &tuning, 1), 1);
        assert_eq!(progression.exp(), 0);
        assert_eq!(progression.exp_to_next(), 15);

        // 13 more kills: 23 total, still short of the raised threshold.
        assert_eq!(kill_minions(&mut progression, &tuning, 13), 0);
        assert_eq!(progression.exp(), 13);

        // The second prompt lands at 25 kills, then 3 more.
        assert_eq!(kill_minions(&mut progression, &tuning, 5), 1);
        assert_eq!(progression.exp(), 3);
        assert_eq!(progression.exp_to_next(), 20);
        assert_eq!(progression.pending_upgrades(), 2);
    }

    #[test]
    fn test_overflow_carries_into_next_level() {
        let tuning = ProgressionTuning::default();
        let mut progression = Progression::new(&tuning);
        kill_minions(&mut progression, &tuning, 9);
        // A boss kill (20 exp) at 9/10: one wrap, the remainder carries.
        let outcome = progression.award_kill(2000, 20, &tuning);
        assert!(outcome.upgrade_prompt);
        assert_eq!(progression.exp(), 19);
        assert_eq!(progression.exp_to_next(), 15);
        assert_eq!(progression.pending_upgrades(), 1);
    }

    #[test]
    fn test_boss_mark_advances_by_growing_step() {
        let tuning = ProgressionTuning::default();
        let mut progression = Progression::new(&tuning);

        let mut triggers = Vec::new();
        for kill in 1..=150 {
            if progression.award_kill(100, 1, &tuning).boss_triggered {
                triggers.push(kill);
            }
        }
        // 3000, then 3000 + 5000, then 8000 + 7000.
        assert_eq!(triggers, vec![30, 80, 150]);
        assert_eq!(progression.boss_mark(), 15000 + 9000);
    }

    #[test]
    fn test_resolve_upgrade_reports_remaining_prompts() {
        let tuning = ProgressionTuning {
            exp_initial: 1,
            exp_step: 0,
            ..default()
        };
        let mut progression = Progression::new(&tuning);
        progression.award_kill(100, 1, &tuning);
        progression.award_kill(100, 1, &tuning);
        assert_eq!(progression.pending_upgrades(), 2);
        assert!(progression.resolve_upgrade());
        assert!(!progression.resolve_upgrade());
        assert!(!progression.resolve_upgrade());
        assert_eq!(progression.pending_upgrades(), 0);
    }

    #[test]
    fn test_score_accumulates() {
        let tuning = ProgressionTuning::default();
        let mut progression = Progression::new(&tuning);
        progression.award_kill(100, 1, &tuning);
        progression.award_kill(2000, 20, &tuning);
        assert_eq!(progression.score(), 2100);
        assert_eq!(progression.exp(), 11);
        assert!((progression.exp_fraction() - 11.0 / 15.0).abs() < 1e-6);
    }
}
