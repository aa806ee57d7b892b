//! diceduel - interactive dice-duel CLI
//!
//! Thin presentation layer over the engine: parses commands, invokes the
//! four duel operations, and renders the resulting state. All legality
//! decisions live in the engine; this binary only mirrors them as hints.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diceduel::duel::{Duel, FighterView, PlayerId};

/// Two-player dice duel
#[derive(Parser, Debug)]
#[command(name = "diceduel", version, about = "Two-player dice duel")]
struct Args {
    /// Name of the first fighter
    #[arg(long, default_value = "Player 1")]
    player_one: String,

    /// Name of the second fighter
    #[arg(long, default_value = "Player 2")]
    player_two: String,
}

/// A parsed player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Buff(PlayerId),
    Attack(PlayerId),
    Defend(PlayerId),
    Reset,
    State,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("{0} needs a player id (use 1 or 2)")]
    MissingPlayer(String),

    #[error("invalid player id: {0} (use 1 or 2)")]
    InvalidPlayer(String),

    #[error("empty command")]
    Empty,
}

fn parse_player(verb: &str, arg: Option<&str>) -> Result<PlayerId, CommandError> {
    let arg = arg.ok_or_else(|| CommandError::MissingPlayer(verb.to_string()))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidPlayer(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().ok_or(CommandError::Empty)?.to_lowercase();

        match verb.as_str() {
            "buff" | "b" => Ok(Command::Buff(parse_player(&verb, parts.next())?)),
            "attack" | "a" => Ok(Command::Attack(parse_player(&verb, parts.next())?)),
            "defend" | "d" => Ok(Command::Defend(parse_player(&verb, parts.next())?)),
            "reset" => Ok(Command::Reset),
            "state" | "s" => Ok(Command::State),
            "json" => Ok(Command::Json),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(verb)),
        }
    }
}

/// Render a fixed-width text health bar
fn health_bar(health: i32, max_health: i32) -> String {
    const WIDTH: usize = 20;
    let filled = if max_health > 0 {
        (health.max(0) as usize * WIDTH) / max_health as usize
    } else {
        0
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

fn render_fighter(out: &mut impl Write, view: &FighterView) -> io::Result<()> {
    writeln!(
        out,
        "{:<12} HP {:>3}/{:<3} {}  ATK {:+} DEF {:+}",
        view.name,
        view.health,
        view.max_health,
        health_bar(view.health, view.max_health),
        view.modifiers.attack,
        view.modifiers.defense,
    )?;
    if !view.effects.is_empty() {
        let chips: Vec<String> = view
            .effects
            .iter()
            .map(|e| format!("{} ({})", e.kind, e.remaining_turns))
            .collect();
        writeln!(out, "{:<12} effects: {}", "", chips.join(", "))?;
    }
    Ok(())
}

/// Hints derived from the engine's own legality queries
fn available_actions(duel: &Duel) -> Vec<String> {
    let mut actions = Vec::new();
    for (id, n) in [(PlayerId::One, 1), (PlayerId::Two, 2)] {
        if duel.can_buff(id) {
            actions.push(format!("buff {}", n));
        }
        if duel.can_attack(id) {
            actions.push(format!("attack {}", n));
        }
        if duel.can_defend(id) {
            actions.push(format!("defend {}", n));
        }
    }
    actions
}

fn render(out: &mut impl Write, duel: &Duel) -> io::Result<()> {
    let snapshot = duel.snapshot();

    writeln!(out)?;
    for view in &snapshot.players {
        render_fighter(out, view)?;
    }

    if snapshot.game_over {
        if let Some(winner) = duel.winner() {
            writeln!(out, "Duel over. {} wins!", duel.fighter(winner).name)?;
        }
    } else {
        writeln!(
            out,
            "Turn: {}  Phase: {}",
            duel.fighter(snapshot.active).name,
            snapshot.phase
        )?;
        writeln!(out, "Available: {}", available_actions(duel).join(", "))?;
    }

    if !snapshot.log.is_empty() {
        writeln!(out, "--- log (newest first) ---")?;
        for line in snapshot.log.iter().take(8) {
            writeln!(out, "  {}", line)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  buff <1|2>    roll the buff die (active attacker only)")?;
    writeln!(out, "  attack <1|2>  roll 2d6 to attack")?;
    writeln!(out, "  defend <1|2>  roll 2d6 to defend the pending attack")?;
    writeln!(out, "  reset         restart the duel")?;
    writeln!(out, "  state         re-render the current state")?;
    writeln!(out, "  json          dump the state snapshot as JSON")?;
    writeln!(out, "  quit          leave")?;
    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diceduel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut duel = Duel::new(args.player_one, args.player_two);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    render(&mut stdout, &duel)?;
    print_help(&mut stdout)?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Buff(id)) => {
                duel.buff(id);
                render(&mut stdout, &duel)?;
            }
            Ok(Command::Attack(id)) => {
                duel.attack(id);
                render(&mut stdout, &duel)?;
            }
            Ok(Command::Defend(id)) => {
                duel.defend(id);
                render(&mut stdout, &duel)?;
            }
            Ok(Command::Reset) => {
                duel.reset();
                render(&mut stdout, &duel)?;
            }
            Ok(Command::State) => render(&mut stdout, &duel)?,
            Ok(Command::Json) => {
                let json = serde_json::to_string_pretty(&duel.snapshot())?;
                writeln!(stdout, "{}", json)?;
            }
            Ok(Command::Help) => print_help(&mut stdout)?,
            Ok(Command::Quit) => break,
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }

    Ok(())
}
