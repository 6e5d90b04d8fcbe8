use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use super::model::{
    Direction, ItemDef, ItemEffect, ItemRegistry, Monster, PlayerTemplate, RandomEvent, Room,
    Rules, World,
};
use super::validator::{ValidationError, validate_world};
use crate::engine::WeightedTable;

/// Built-in five room scenario.
pub const BUILTIN_WORLD: &str = include_str!("../../worlds/ruins.toml");

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read world file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse world file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid world: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    player: PlayerTemplate,
    #[serde(default)]
    rules: Rules,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
    #[serde(default)]
    item: Vec<ItemConfig>, // [[item]] blocks
    #[serde(default)]
    loot: Vec<LootConfig>,
    #[serde(default)]
    event: Vec<EventConfig>,
}

#[derive(Deserialize)]
struct WorldHeader {
    name: String,
    #[serde(default)]
    intro: String,
    /// Defaults to the first room in the file.
    #[serde(default)]
    start_room: Option<String>,
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    #[serde(default)]
    desc: String,
    /// direction -> room id
    #[serde(default)]
    exits: BTreeMap<String, String>,
    #[serde(default)]
    treasure: Option<String>,
    #[serde(default)]
    monster: Option<Monster>, // [room.monster]
}

#[derive(Deserialize)]
struct ItemConfig {
    id: String,
    name: String,
    #[serde(default)]
    on_use: Option<ItemEffect>,
    #[serde(default)]
    on_pickup: Option<ItemEffect>,
}

#[derive(Deserialize)]
struct LootConfig {
    item: String,
    #[serde(default = "default_weight")]
    weight: u32,
}

#[derive(Deserialize)]
struct EventConfig {
    text: String,
    #[serde(default)]
    grant: Option<String>,
    #[serde(default = "default_weight")]
    weight: u32,
}

// Helper for serde default
fn default_weight() -> u32 {
    1
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, LoadError> {
    let contents = fs::read_to_string(path)?;
    load_world_from_str(&contents)
}

/// The scenario that ships with the game.
pub fn builtin_world() -> Result<World, LoadError> {
    load_world_from_str(BUILTIN_WORLD)
}

pub fn load_world_from_str(contents: &str) -> Result<World, LoadError> {
    let world_file: WorldFile = toml::from_str(contents)?;
    let mut errors: Vec<ValidationError> = Vec::new();

    // Room ids become indices in file order
    let mut room_index: HashMap<String, usize> = HashMap::new();
    for (index, room_cfg) in world_file.room.iter().enumerate() {
        if room_index.insert(room_cfg.id.clone(), index).is_some() {
            errors.push(ValidationError::new(format!(
                "duplicate room id: {}",
                room_cfg.id
            )));
        }
    }

    let mut items = ItemRegistry::new();
    for item_cfg in world_file.item {
        let id = item_cfg.id.clone();
        let previous = items.insert(ItemDef {
            id: item_cfg.id,
            name: item_cfg.name,
            on_use: item_cfg.on_use,
            on_pickup: item_cfg.on_pickup,
        });
        if previous.is_some() {
            errors.push(ValidationError::new(format!("duplicate item id: {}", id)));
        }
    }

    let mut rooms: Vec<Room> = Vec::with_capacity(world_file.room.len());
    for room_cfg in world_file.room {
        let mut room = Room::new(room_cfg.id, normalize_multiline_desc(&room_cfg.desc));

        for (dir_name, target) in &room_cfg.exits {
            // exits must spell the direction out in full
            let direction =
                Direction::parse(dir_name).filter(|d| d.as_str().eq_ignore_ascii_case(dir_name));
            let Some(direction) = direction else {
                errors.push(ValidationError::new(format!(
                    "room '{}' has unknown exit direction '{}'",
                    room.id, dir_name
                )));
                continue;
            };
            match room_index.get(target) {
                Some(&index) => {
                    room.exits.insert(direction, index);
                }
                None => errors.push(ValidationError::new(format!(
                    "room '{}' exit '{}' targets missing room '{}'",
                    room.id, dir_name, target
                ))),
            }
        }

        room.treasure = room_cfg.treasure;
        room.monster = room_cfg.monster;
        rooms.push(room);
    }

    let start_room = match &world_file.world.start_room {
        Some(id) => match room_index.get(id) {
            Some(&index) => index,
            None => {
                errors.push(ValidationError::new(format!(
                    "start_room '{}' not found among rooms",
                    id
                )));
                0
            }
        },
        None => 0,
    };

    let mut loot = WeightedTable::new();
    for entry in world_file.loot {
        loot.push(entry.item, entry.weight);
    }

    let mut events = WeightedTable::new();
    for entry in world_file.event {
        events.push(
            RandomEvent {
                text: normalize_multiline_desc(&entry.text),
                grant: entry.grant,
            },
            entry.weight,
        );
    }

    let world = World {
        name: world_file.world.name,
        intro: normalize_multiline_desc(&world_file.world.intro),
        start_room,
        rooms,
        items,
        loot,
        events,
        rules: world_file.rules,
        player: world_file.player,
    };

    errors.extend(validate_world(&world));
    if !errors.is_empty() {
        return Err(LoadError::Invalid(errors));
    }

    tracing::debug!(
        world = %world.name,
        rooms = world.rooms.len(),
        items = world.items.len(),
        "world loaded"
    );
    Ok(world)
}

/// Collapses hard-wrapped TOML text into single spaced lines, keeping blank
/// lines as paragraph breaks.
fn normalize_multiline_desc(s: &str) -> String {
    s.trim()
        .split("\n\n")
        .map(|para| para.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|para| !para.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
