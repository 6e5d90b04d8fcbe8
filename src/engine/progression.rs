use crate::engine::output::Output;
use crate::player::Player;
use crate::world::Rules;

/// Experience needed to advance from `level` to the next one.
pub fn required_experience(level: u32, rules: &Rules) -> u32 {
    level.saturating_mul(rules.xp_per_level)
}

/// Converts banked experience into levels. Keeps going while enough is left,
/// so one large reward can grant several levels. Returns the levels gained.
///
/// A level restores a living player to full health; a defeated player stays
/// at zero.
pub fn apply_level_ups(out: &mut Output, player: &mut Player, rules: &Rules) -> u32 {
    let mut gained = 0;

    loop {
        let required = required_experience(player.level, rules);
        // a zero requirement would loop forever
        if required == 0 || player.experience < required {
            break;
        }

        player.experience -= required;
        player.level += 1;
        player.raise_max_health(rules.level_up_max_health);
        if player.is_alive() {
            player.restore_full_health();
        }
        player.attack += rules.level_up_attack;
        player.defense += rules.level_up_defense;
        gained += 1;

        tracing::info!(level = player.level, "level up");
        out.event("LEVEL UP!");
        out.event(format!("You are now level {}!", player.level));
        out.event(format!(
            "Attack +{}, Defense +{}, Max health +{}",
            rules.level_up_attack, rules.level_up_defense, rules.level_up_max_health
        ));
    }

    gained
}
