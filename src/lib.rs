pub mod engine;
pub mod player;
pub mod world;

use engine::{
    AttackOutcome, Command, GameRng, HELP_LINES, Output, RandomSource, RoomView, apply_level_ups,
    handle_attack, handle_inventory, handle_take, handle_use, parse_command, render_room,
    try_handle_movement,
};
use player::Player;
use world::{Direction, LoadError, World};

pub use engine::PlayerSummary;
pub use world::{builtin_world, load_world_from_file, load_world_from_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Defeated,
}

/// One play session: the world, the player, and where the player stands.
pub struct GameState {
    pub world: World,
    pub player: Player,
    pub current_room: usize,
    pub turn_index: u64,
    ended: Option<SessionEnd>,
    rng: Box<dyn RandomSource>,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        room: Option<RoomView>,
        active: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML world string, or the built-in world when empty.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str, seed: u64) -> Result<WasmGame, JsValue> {
            let world = if world_toml.trim().is_empty() {
                builtin_world()
            } else {
                load_world_from_str(world_toml)
            }
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world, Box::new(GameRng::new(seed))),
            })
        }

        /// Render the current room; call once at start.
        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            let room = self.state.render_current_room();
            to_value(&WasmStepResult {
                blocks: room.to_output().blocks,
                room: Some(room),
                active: self.state.is_session_active(),
            })
            .unwrap_or(JsValue::NULL)
        }

        /// Process a player command and return the narrative plus the refreshed room.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            let mut out = self.state.process_command(input);
            let room = if self.state.is_session_active() {
                let room = self.state.render_current_room();
                room.write_to(&mut out);
                Some(room)
            } else {
                None
            };
            to_value(&WasmStepResult {
                blocks: out.blocks,
                room,
                active: self.state.is_session_active(),
            })
            .unwrap_or(JsValue::NULL)
        }
    }
}

impl GameState {
    /// Starts a session in `world`, drawing all randomness from `rng`.
    pub fn new(world: World, rng: Box<dyn RandomSource>) -> Self {
        let player = Player::from_template(&world.player);
        let current_room = world.start_room;

        GameState {
            world,
            player,
            current_room,
            turn_index: 0,
            ended: None,
            rng,
        }
    }

    /// Fresh session in the built-in world.
    pub fn new_game(seed: u64) -> Result<Self, LoadError> {
        let world = builtin_world()?;
        tracing::info!(seed, world = %world.name, "new game");
        Ok(GameState::new(world, Box::new(GameRng::new(seed))))
    }

    pub fn is_session_active(&self) -> bool {
        self.ended.is_none()
    }

    /// Why the session stopped, once it has.
    pub fn session_end(&self) -> Option<SessionEnd> {
        self.ended
    }

    /// What the player sees right now. The first look at a room pays the
    /// exploration bonus.
    pub fn render_current_room(&mut self) -> RoomView {
        match self.world.rooms.get_mut(self.current_room) {
            Some(room) => render_room(
                room,
                &self.world.items,
                &mut self.player,
                self.world.rules.exploration_xp,
            ),
            None => RoomView {
                description: "You are nowhere.".to_string(),
                exits: Vec::new(),
                monster: None,
                treasure: None,
                player: PlayerSummary::of(&self.player),
                exploration_bonus: None,
            },
        }
    }

    /// Process a single line of player input.
    ///
    /// Failures are narrated, never returned. Once the session has ended
    /// further input is ignored.
    pub fn process_command(&mut self, input: &str) -> Output {
        let mut out = Output::new();
        if !self.is_session_active() {
            return out;
        }

        self.turn_index = self.turn_index.wrapping_add(1);
        let _turn = tracing::debug_span!("turn", index = self.turn_index).entered();

        if let Some(command) = parse_command(input) {
            self.dispatch(&mut out, command);
        }

        apply_level_ups(&mut out, &mut self.player, &self.world.rules);

        out
    }

    fn dispatch(&mut self, out: &mut Output, command: Command) {
        match command {
            Command::Move(direction) => self.go(out, direction),
            Command::Attack => {
                let Some(room) = self.world.rooms.get_mut(self.current_room) else {
                    out.say("There is nothing here to attack.");
                    return;
                };
                let outcome = handle_attack(
                    out,
                    room,
                    &mut self.player,
                    &self.world.loot,
                    &self.world.items,
                    &self.world.rules,
                    self.rng.as_mut(),
                );
                if matches!(outcome, AttackOutcome::PlayerDefeated { .. }) {
                    self.ended = Some(SessionEnd::Defeated);
                }
            }
            Command::Take => match self.world.rooms.get_mut(self.current_room) {
                Some(room) => {
                    handle_take(out, room, &mut self.player, &self.world.items);
                }
                None => out.say("There is nothing valuable here."),
            },
            Command::Inventory => handle_inventory(out, &self.player, &self.world.items),
            Command::Use(None) => out.say("Use what?"),
            Command::Use(Some(query)) => {
                handle_use(out, &mut self.player, &self.world.items, &query);
            }
            Command::Status => self.write_status(out),
            Command::Help => {
                for line in HELP_LINES {
                    out.say(*line);
                }
            }
            Command::Quit => {
                out.say("Thanks for playing!");
                tracing::info!(turns = self.turn_index, "player quit");
                self.ended = Some(SessionEnd::Quit);
            }
            Command::Unknown(verb) => {
                tracing::debug!(%verb, "unrecognized command");
                out.say("I don't understand that command. Type 'help' for a list of commands.");
            }
        }
    }

    fn go(&mut self, out: &mut Output, direction: Direction) {
        try_handle_movement(
            out,
            &mut self.current_room,
            &self.world,
            &mut self.player,
            direction,
            self.rng.as_mut(),
        );
    }

    fn write_status(&self, out: &mut Output) {
        let p = &self.player;
        out.say("CHARACTER STATUS:");
        out.say(format!("  Name: {}", p.name()));
        out.say(format!("  Health: {}/{}", p.health(), p.max_health()));
        out.say(format!("  Attack: {}", p.attack));
        out.say(format!("  Defense: {}", p.defense));
        out.say(format!("  Level: {}", p.level));
        out.say(format!("  Experience: {}", p.experience));
        out.say(format!("  Items: {}", p.inventory.len()));
    }
}
