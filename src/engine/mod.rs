mod combat;
mod commands;
mod events;
mod items;
mod movement;
mod output;
mod progression;
mod render;
mod rng;

pub use combat::{AttackOutcome, handle_attack, strike_damage};
pub use commands::{Command, HELP_LINES, parse_command};
pub use events::maybe_random_event;
pub use items::{
    UseOutcome, apply_effect, find_in_inventory, handle_inventory, handle_take, handle_use,
};
pub use movement::{MoveOutcome, try_handle_movement};
pub use output::{Output, OutputBlock};
pub use progression::{apply_level_ups, required_experience};
pub use render::{MonsterView, PlayerSummary, RoomView, render_room};
pub use rng::{GameRng, RandomSource, ScriptedRolls, WeightedTable};
