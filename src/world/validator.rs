use super::model::World;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

/// Checks a built world for broken references and impossible stats.
/// Returns every problem found; an empty list means the world is playable.
pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    // Rooms must not be empty
    if world.rooms.is_empty() {
        errors.push(ValidationError::new("world has no rooms"));
    }

    if world.room(world.start_room).is_none() {
        errors.push(ValidationError::new(format!(
            "start room index {} is out of range",
            world.start_room
        )));
    }

    let room_count = world.rooms.len();
    for room in &world.rooms {
        for (direction, target) in &room.exits {
            if *target >= room_count {
                errors.push(ValidationError::new(format!(
                    "room '{}' exit '{}' targets missing room index {}",
                    room.id, direction, target
                )));
            }
        }

        if let Some(treasure) = &room.treasure {
            if !world.items.contains(treasure) {
                errors.push(ValidationError::new(format!(
                    "room '{}' treasure '{}' is not a known item",
                    room.id, treasure
                )));
            }
        }

        if let Some(monster) = &room.monster {
            if monster.health < 0 || monster.attack < 0 || monster.defense < 0 {
                errors.push(ValidationError::new(format!(
                    "monster '{}' in room '{}' has negative health, attack or defense",
                    monster.name, room.id
                )));
            }
        }
    }

    for def in world.items.iter() {
        for effect in [def.on_use, def.on_pickup].into_iter().flatten() {
            if effect.amount() < 0 {
                errors.push(ValidationError::new(format!(
                    "item '{}' has a negative effect amount",
                    def.id
                )));
            }
        }
    }

    for id in world.loot.iter() {
        if !world.items.contains(id) {
            errors.push(ValidationError::new(format!(
                "loot item '{}' is not a known item",
                id
            )));
        }
    }
    check_weights(&mut errors, "loot", world.loot.is_empty(), world.loot.total_weight());

    for event in world.events.iter() {
        if let Some(grant) = &event.grant {
            if !world.items.contains(grant) {
                errors.push(ValidationError::new(format!(
                    "event '{}' grants unknown item '{}'",
                    event.text, grant
                )));
            }
        }
    }
    check_weights(&mut errors, "event", world.events.is_empty(), world.events.total_weight());

    let rules = &world.rules;
    if rules.level_up_max_health < 0 || rules.level_up_attack < 0 || rules.level_up_defense < 0 {
        errors.push(ValidationError::new("level-up gains may not be negative"));
    }

    let player = &world.player;
    if player.health <= 0 {
        errors.push(ValidationError::new("player health must be positive"));
    }
    if player.attack < 0 || player.defense < 0 {
        errors.push(ValidationError::new(
            "player attack and defense may not be negative",
        ));
    }
    for id in &player.inventory {
        if !world.items.contains(id) {
            errors.push(ValidationError::new(format!(
                "starting inventory item '{}' is not a known item",
                id
            )));
        }
    }

    errors
}

fn check_weights(
    errors: &mut Vec<ValidationError>,
    table: &str,
    empty: bool,
    total: Option<u32>,
) {
    match total {
        None => errors.push(ValidationError::new(format!("{table} table weights overflow"))),
        Some(0) if !empty => {
            errors.push(ValidationError::new(format!("{table} table has zero total weight")))
        }
        _ => {}
    }
}
