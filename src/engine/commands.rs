use crate::world::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Attack,
    Take,
    Inventory,
    /// `use` with whatever followed the verb; `None` when nothing did.
    Use(Option<String>),
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// Splits a raw line into verb and argument. The verb is matched
/// case-insensitively; blank input yields `None`.
pub fn parse_command(raw: &str) -> Option<Command> {
    let mut parts = raw.split_whitespace();
    let verb = parts.next()?.to_lowercase();
    let rest = parts.collect::<Vec<&str>>().join(" ");

    let command = match verb.as_str() {
        "attack" | "hit" => Command::Attack,
        "take" | "get" => Command::Take,
        "inventory" | "inv" | "i" => Command::Inventory,
        "use" => Command::Use(if rest.is_empty() { None } else { Some(rest) }),
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match Direction::parse(other) {
            Some(direction) => Command::Move(direction),
            None => Command::Unknown(other.to_string()),
        },
    };

    Some(command)
}

pub const HELP_LINES: &[&str] = &[
    "COMMANDS:",
    "  north/south/east/west (n/s/e/w) - move",
    "  attack - attack the monster here",
    "  take - pick up the treasure here",
    "  inventory - list what you carry",
    "  use [item] - use an item",
    "  status - show your stats",
    "  help - this list",
    "  quit - end the game",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_and_synonyms() {
        assert_eq!(parse_command("NORTH"), Some(Command::Move(Direction::North)));
        assert_eq!(parse_command("w"), Some(Command::Move(Direction::West)));
        assert_eq!(parse_command("hit"), Some(Command::Attack));
        assert_eq!(parse_command("get"), Some(Command::Take));
        assert_eq!(parse_command("inv"), Some(Command::Inventory));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
        assert_eq!(parse_command("status"), Some(Command::Status));
        assert_eq!(parse_command("help"), Some(Command::Help));
    }

    #[test]
    fn use_keeps_multi_word_argument() {
        assert_eq!(
            parse_command("use  Health   Potion"),
            Some(Command::Use(Some("Health Potion".to_string())))
        );
        assert_eq!(parse_command("use"), Some(Command::Use(None)));
    }

    #[test]
    fn unknown_and_blank_input() {
        assert_eq!(parse_command("dance wildly"), Some(Command::Unknown("dance".to_string())));
        assert_eq!(parse_command("   "), None);
    }
}
