//! Data layer: loads the balance table at startup.
//!
//! Runs in `OnEnter(GameState::Loading)`, replaces the default `Balance` with
//! `assets/data/balance.ron` when present, reseeds the resources derived from
//! it, then moves the game into `GameState::Playing`.

mod error;

pub use error::BalanceError;

use bevy::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::shared::*;

pub const BALANCE_PATH: &str = "assets/data/balance.ron";

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_balance);
    }
}

pub fn parse_balance(path: &str, contents: &str) -> Result<Balance, BalanceError> {
    ron::from_str(contents).map_err(|e| BalanceError::Parse {
        path: path.to_string(),
        details: e.to_string(),
    })
}

pub fn read_balance(path: &Path) -> Result<Balance, BalanceError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BalanceError::NotFound(display.clone()),
        _ => BalanceError::Read {
            path: display.clone(),
            details: e.to_string(),
        },
    })?;
    parse_balance(&display, &contents)
}

fn load_balance(
    mut commands: Commands,
    mut balance: ResMut<Balance>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    match read_balance(Path::new(BALANCE_PATH)) {
        Ok(loaded) => {
            info!("Loaded balance from {}", BALANCE_PATH);
            *balance = loaded;
        }
        Err(BalanceError::NotFound(path)) => {
            info!("No balance file at {}, using built-in tuning", path);
        }
        Err(e) => {
            error!("{}. Using built-in tuning.", e);
        }
    }

    commands.insert_resource(Progression::new(&balance.progression));
    commands.insert_resource(WaveDirector::new(balance.waves.spawn_interval));

    next_state.set(GameState::Playing);
}
