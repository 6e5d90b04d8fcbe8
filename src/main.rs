use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rpg_quest::engine::{GameRng, Output, OutputBlock};
use rpg_quest::{GameState, SessionEnd, builtin_world, load_world_from_file};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A small turn-based text adventure.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// World file to play instead of the built-in ruins
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Seed for every random roll; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

fn flush_output(out: Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", "=".repeat(50));
                println!("{}", t);
                printed_anything = true;
            }
            OutputBlock::Text(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!(); // visual separation before first event
                    }
                    started_events = true;
                }
                println!("* {}", ev);
                printed_anything = true;
            }
            OutputBlock::Exits(exits) => {
                println!("{}", exits);
                printed_anything = true;
            }
            OutputBlock::Status(status) => {
                println!("\n{}", status);
                printed_anything = true;
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let world = match &args.world {
        Some(path) => load_world_from_file(path)
            .map_err(|e| format!("Failed to load world file '{}': {e}", path.display()))?,
        None => builtin_world()?,
    };

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    tracing::info!(seed = rng.seed(), world = %world.name, "session started");

    println!("WELCOME TO {}!", world.name.to_uppercase());
    if !world.intro.trim().is_empty() {
        println!("{}", world.intro.trim());
    }
    println!("Type 'help' for a list of commands.");

    let mut state = GameState::new(world, Box::new(rng));
    flush_output(state.render_current_room().to_output());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while state.is_session_active() {
        print!("\n> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut out = state.process_command(input);
        if state.is_session_active() {
            state.render_current_room().write_to(&mut out);
        }
        flush_output(out);
    }

    if state.session_end() == Some(SessionEnd::Defeated) {
        println!("Your adventure ends here.");
    }
    println!("Goodbye.");
    Ok(())
}
