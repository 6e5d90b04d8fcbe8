use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::WeightedTable;

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Runtime world type used by the game loop.
///
/// Rooms are addressed by their index in `rooms`; indices never change once
/// the world is built.
#[derive(Debug, Clone)]
pub struct World {
    pub name: String,
    pub intro: String,
    pub start_room: usize,
    pub rooms: Vec<Room>,
    pub items: ItemRegistry,
    pub loot: WeightedTable<String>,
    pub events: WeightedTable<RandomEvent>,
    pub rules: Rules,
    pub player: PlayerTemplate,
}

impl World {
    pub fn room(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Accepts the full name or its first letter, case-insensitively.
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.trim();
        Direction::ALL.into_iter().find(|d| {
            d.as_str().eq_ignore_ascii_case(word)
                || (word.len() == 1 && d.as_str()[..1].eq_ignore_ascii_case(word))
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub desc: String,
    /// Sorted by direction, which keeps exit listings stable.
    pub exits: BTreeMap<Direction, usize>,
    pub monster: Option<Monster>,
    /// Item id of the single treasure lying here, if any.
    pub treasure: Option<String>,
    pub visited: bool,
}

impl Room {
    pub fn new(id: impl Into<String>, desc: impl Into<String>) -> Self {
        Room {
            id: id.into(),
            desc: desc.into(),
            exits: BTreeMap::new(),
            monster: None,
            treasure: None,
            visited: false,
        }
    }

    /// The monster in this room, if it can still fight.
    pub fn live_monster(&self) -> Option<&Monster> {
        self.monster.as_ref().filter(|m| !m.is_defeated())
    }

    pub fn live_monster_mut(&mut self) -> Option<&mut Monster> {
        self.monster.as_mut().filter(|m| !m.is_defeated())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Monster {
    pub name: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Experience granted when the monster is defeated.
    pub reward: u32,
}

impl Monster {
    /// Defeated monsters stay in their room but no longer fight or block exits.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ItemEffect {
    Heal { amount: i32 },
    BoostAttack { amount: i32 },
}

impl ItemEffect {
    pub fn amount(&self) -> i32 {
        match self {
            ItemEffect::Heal { amount } | ItemEffect::BoostAttack { amount } => *amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub on_use: Option<ItemEffect>,
    pub on_pickup: Option<ItemEffect>,
}

/// Item definitions keyed by item id. Display names are looked up here and
/// never used as identity.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: HashMap<String, ItemDef>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous definition if `def.id` was already registered.
    pub fn insert(&mut self, def: ItemDef) -> Option<ItemDef> {
        self.items.insert(def.id.clone(), def)
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Display name for an item id; unknown ids display as themselves.
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.items.get(id).map(|d| d.name.as_str()).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.values()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomEvent {
    pub text: String,
    /// Item id added to the inventory when the event fires.
    pub grant: Option<String>,
}

/// Tunable numbers of the ruleset. Every field has a default, so a world file
/// only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub exploration_xp: u32,
    pub random_event_chance_percent: u32,
    pub loot_chance_one_in: u32,
    /// Player damage roll is uniform over `0..player_roll_sides`.
    pub player_roll_sides: u32,
    pub monster_roll_sides: u32,
    pub xp_per_level: u32,
    pub level_up_max_health: i32,
    pub level_up_attack: i32,
    pub level_up_defense: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            exploration_xp: 5,
            random_event_chance_percent: 20,
            loot_chance_one_in: 3,
            player_roll_sides: 10,
            monster_roll_sides: 8,
            xp_per_level: 100,
            level_up_max_health: 20,
            level_up_attack: 5,
            level_up_defense: 2,
        }
    }
}

/// Starting stats for the player.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerTemplate {
    pub name: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Item ids, in inventory order.
    pub inventory: Vec<String>,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        PlayerTemplate {
            name: "Hero".to_string(),
            health: 100,
            attack: 20,
            defense: 10,
            inventory: vec!["health_potion".to_string(), "bread".to_string()],
        }
    }
}
