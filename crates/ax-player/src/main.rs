//! Autoplay bot for the Arena Nexus engine
//!
//! Plays whole runs unattended with a simple greedy policy. Useful for
//! soak-testing the engine and for eyeballing game balance across seeds.

use std::process::ExitCode;

use clap::Parser;

use ax_core::{GamePhase, GameSession, PlayerAction, Stats};

/// Arena Nexus autoplay bot
#[derive(Parser, Debug)]
#[command(name = "ax-player")]
#[command(author, version, about = "Play Arena Nexus runs unattended", long_about = None)]
struct Args {
    /// RNG seed; omit for a random run
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Stop once this dungeon level is reached
    #[arg(short = 'l', long = "levels", default_value_t = 3)]
    levels: u32,

    /// Hard cap on bot steps before giving up
    #[arg(long = "max-steps", default_value_t = 50_000)]
    max_steps: u32,

    /// Character name
    #[arg(short = 'n', long = "name", default_value = "Wanderer")]
    name: String,

    /// Print the full narration log as it happens
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Dump the final session as JSON instead of a summary
    #[arg(long = "json")]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand_seed);

    let stats = Stats::new(9, 8, 8, 5);
    let mut session = match GameSession::new(&args.name, stats, seed) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("character creation failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut printed = 0;
    for _ in 0..args.max_steps {
        if session.is_over() || session.dungeon().dungeon_level > args.levels {
            break;
        }
        if let Err(err) = step(&mut session) {
            eprintln!("bot stalled: {err}");
            return ExitCode::FAILURE;
        }
        if args.verbose {
            for line in &session.messages()[printed..] {
                println!("{line}");
            }
            printed = session.messages().len();
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&session) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize session: {err}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let c = session.character();
    let d = session.dungeon();
    println!("seed {seed}");
    println!(
        "{} the level-{} adventurer, dungeon level {}, {} rooms into it",
        c.name, c.level, d.dungeon_level, d.rooms_explored
    );
    println!(
        "health {}/{}  mana {}/{}  keys {}  reputation {}",
        c.health, c.max_health, c.mana, c.max_mana, d.keys, d.reputation
    );
    println!(
        "inventory {} items, {} skills known, {} story flags",
        c.inventory.len(),
        c.skills.len(),
        d.story_flags.len()
    );
    if session.is_over() {
        println!("the run ended in death");
    }
    ExitCode::SUCCESS
}

/// One bot decision, greedy but survivable
fn step(session: &mut GameSession) -> Result<(), ax_core::GameError> {
    match session.phase().clone() {
        GamePhase::Doors(doors) => {
            let keys = session.dungeon().keys;
            // Prefer rest when hurting, otherwise the rarest reachable door
            let hurting = session.character().health_fraction() < 0.4;
            let mut pick = 0;
            let mut best = None;
            for (i, door) in doors.iter().enumerate() {
                if door.locked && keys < door.keys_required {
                    continue;
                }
                let score = if hurting && door.kind == ax_core::DoorKind::Rest {
                    u32::MAX
                } else {
                    door.rarity as u32
                };
                if best.is_none_or(|b| score > b) {
                    best = Some(score);
                    pick = i;
                }
            }
            session.choose_door(pick)
        }
        GamePhase::Room(event) => {
            // Gated choices carry sweetened rewards; try them first
            let mut order: Vec<usize> = (0..event.choices.len()).collect();
            order.sort_by_key(|i| event.choices[*i].stat_requirement.is_none());
            let mut failure = ax_core::GameError::NotInRoom;
            for i in order {
                match session.choose_option(i) {
                    Ok(()) => return Ok(()),
                    Err(err) => failure = err,
                }
            }
            Err(failure)
        }
        GamePhase::Combat(combat) => {
            let player = combat.player();
            let action = player
                .skills
                .iter()
                .filter(|s| s.is_ready(player.mana))
                .find(|s| match s.kind {
                    ax_core::SkillKind::Support => player.health_fraction() < 0.5,
                    ax_core::SkillKind::Defensive => combat.enemy().level > player.level,
                    ax_core::SkillKind::Offensive => true,
                })
                .map(|s| PlayerAction::Skill(s.id.clone()))
                .unwrap_or(PlayerAction::Attack);
            session.combat_action(&action).map(|_| ())
        }
        GamePhase::GameOver => Ok(()),
    }
}

fn rand_seed() -> u64 {
    ax_core::GameRng::from_entropy().seed()
}
