use serde::Serialize;

use crate::engine::output::Output;
use crate::player::Player;
use crate::world::{Direction, ItemRegistry, Room};

/// Snapshot of what the player sees in the current room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub description: String,
    pub exits: Vec<Direction>,
    pub monster: Option<MonsterView>,
    /// Display name of the treasure lying here.
    pub treasure: Option<String>,
    pub player: PlayerSummary,
    /// Experience granted because this was the first time the room was seen.
    pub exploration_bonus: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterView {
    pub name: String,
    pub health: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub experience: u32,
}

impl PlayerSummary {
    pub fn of(player: &Player) -> Self {
        PlayerSummary {
            name: player.name().to_string(),
            health: player.health(),
            max_health: player.max_health(),
            level: player.level,
            experience: player.experience,
        }
    }
}

/// Builds the view of `room`. The first view of a room marks it visited and
/// pays the exploration bonus; later views pay nothing.
pub fn render_room(
    room: &mut Room,
    items: &ItemRegistry,
    player: &mut Player,
    exploration_xp: u32,
) -> RoomView {
    let exploration_bonus = if room.visited {
        None
    } else {
        room.visited = true;
        player.gain_experience(exploration_xp);
        tracing::debug!(room = %room.id, xp = exploration_xp, "first visit");
        Some(exploration_xp)
    };

    RoomView {
        description: room.desc.trim().to_string(),
        exits: room.exits.keys().copied().collect(),
        monster: room.live_monster().map(|m| MonsterView {
            name: m.name.clone(),
            health: m.health,
        }),
        treasure: room
            .treasure
            .as_deref()
            .map(|id| items.name_of(id).to_string()),
        player: PlayerSummary::of(player),
        exploration_bonus,
    }
}

impl RoomView {
    pub fn write_to(&self, out: &mut Output) {
        out.title(self.description.clone());

        if let Some(xp) = self.exploration_bonus {
            out.event(format!("+{} experience for exploring!", xp));
        }

        if self.exits.is_empty() {
            out.set_exits("Exits: (none)");
        } else {
            let list = self
                .exits
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<&str>>()
                .join(", ");
            out.set_exits(format!("Exits: {}", list));
        }

        if let Some(monster) = &self.monster {
            out.say(format!("{} is here (HP: {}).", monster.name, monster.health));
        }

        if let Some(treasure) = &self.treasure {
            out.say(format!("Lying here: {}.", treasure));
        }

        let p = &self.player;
        out.status(format!(
            "{} | HP: {}/{} | Level: {} | Experience: {}",
            p.name, p.health, p.max_health, p.level, p.experience
        ));
    }

    pub fn to_output(&self) -> Output {
        let mut out = Output::new();
        self.write_to(&mut out);
        out
    }
}
