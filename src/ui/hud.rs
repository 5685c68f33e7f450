use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS: used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudScoreText;

#[derive(Component)]
pub struct HudHealthText;

#[derive(Component)]
pub struct HudWeaponText;

#[derive(Component)]
pub struct HudExpFill;

/// Centre-screen message for Paused, UpgradeChoice and GameOver.
#[derive(Component)]
pub struct HudBanner;

const TEXT_SIZE: f32 = 20.0;
const BANNER_SIZE: f32 = 32.0;
const EXP_BAR_HEIGHT: f32 = 8.0;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HUD: always present, the banner hides itself while playing
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|root| {
            // ─── EXP BAR ───
            root.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(EXP_BAR_HEIGHT),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ))
            .with_children(|bar| {
                bar.spawn((
                    HudExpFill,
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.3, 0.8, 1.0)),
                ));
            });

            // ─── TOP ROW: score + health ───
            root.spawn(Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    HudScoreText,
                    Text::new("Score 0"),
                    TextFont {
                        font_size: TEXT_SIZE,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
                row.spawn((
                    HudHealthText,
                    Text::new(""),
                    TextFont {
                        font_size: TEXT_SIZE,
                        ..default()
                    },
                    TextColor(Color::srgb(1.0, 0.4, 0.4)),
                ));
            });

            // ─── BANNER ───
            root.spawn(Node {
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            })
            .with_children(|center| {
                center.spawn((
                    HudBanner,
                    Text::new(""),
                    TextFont {
                        font_size: BANNER_SIZE,
                        ..default()
                    },
                    TextColor(Color::srgb(1.0, 0.9, 0.3)),
                    Visibility::Hidden,
                ));
            });

            // ─── BOTTOM ROW: weapon levels ───
            root.spawn(Node {
                width: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    HudWeaponText,
                    Text::new(""),
                    TextFont {
                        font_size: TEXT_SIZE,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
        });
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn weapon_summary(levels: &WeaponLevels) -> String {
    WeaponKind::ALL
        .iter()
        .map(|kind| format!("{} Lv{}", kind.label(), levels.get(*kind)))
        .collect::<Vec<_>>()
        .join("   ")
}

pub fn update_hud_text(
    progression: Res<Progression>,
    levels: Res<WeaponLevels>,
    players: Query<&Health, With<Player>>,
    mut score_text: Query<&mut Text, (With<HudScoreText>, Without<HudHealthText>, Without<HudWeaponText>)>,
    mut health_text: Query<&mut Text, (With<HudHealthText>, Without<HudScoreText>, Without<HudWeaponText>)>,
    mut weapon_text: Query<&mut Text, (With<HudWeaponText>, Without<HudScoreText>, Without<HudHealthText>)>,
) {
    if let Ok(mut text) = score_text.get_single_mut() {
        text.0 = format!("Score {}", progression.score());
    }
    if let (Ok(mut text), Ok(health)) = (health_text.get_single_mut(), players.get_single()) {
        text.0 = format!("HP {:.0} / {:.0}", health.current, health.maximum);
    }
    if let Ok(mut text) = weapon_text.get_single_mut() {
        text.0 = weapon_summary(&levels);
    }
}

pub fn update_exp_bar(progression: Res<Progression>, mut fill: Query<&mut Node, With<HudExpFill>>) {
    if let Ok(mut node) = fill.get_single_mut() {
        node.width = Val::Percent(progression.exp_fraction() * 100.0);
    }
}

pub fn update_banner(
    state: Res<State<GameState>>,
    progression: Res<Progression>,
    levels: Res<WeaponLevels>,
    mut banner: Query<(&mut Text, &mut Visibility), With<HudBanner>>,
) {
    let Ok((mut text, mut visibility)) = banner.get_single_mut() else {
        return;
    };
    let message = match state.get() {
        GameState::Paused => "PAUSED\nEsc to resume".to_string(),
        GameState::UpgradeChoice => {
            let options = WeaponKind::ALL
                .iter()
                .enumerate()
                .map(|(i, kind)| format!("[{}] {} Lv{}", i + 1, kind.label(), levels.get(*kind) + 1))
                .collect::<Vec<_>>()
                .join("  ");
            format!("LEVEL UP\n{options}")
        }
        GameState::GameOver => format!("GAME OVER\nScore {}\nSpace to restart", progression.score()),
        GameState::Loading | GameState::Playing => String::new(),
    };

    *visibility = if message.is_empty() {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    if text.0 != message {
        text.0 = message;
    }
}
