//! Decide command implementation.

use super::output::{format_text, JsonTurn};
use super::{CliError, OutputFormat};
use lagash::game::parse_observation;
use lagash::genome::load_genome;
use lagash::{EngineConfig, GameState, MissionState, Session, Team};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of the decide command.
#[derive(Debug)]
pub(crate) struct DecideArgs {
    pub(crate) snapshot: PathBuf,
    pub(crate) genome: PathBuf,
    pub(crate) state: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) team: u8,
    pub(crate) turn: u32,
    pub(crate) format: OutputFormat,
}

/// Execute the decide command.
///
/// # Errors
///
/// Returns an error if any input cannot be loaded or the turn cannot be
/// decided.
pub(crate) fn execute(args: &DecideArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let (team, game) = load_snapshot(&args.snapshot, args.team, args.turn, &config)?;
    let genome = load_genome(&args.genome)
        .map_err(|e| CliError::new(format!("Failed to load {}: {e}", args.genome.display())))?;

    let missions = match &args.state {
        Some(path) if path.exists() => serde_json::from_str(&fs::read_to_string(path)?)?,
        _ => MissionState::new(),
    };

    // Each invocation is a fresh process; offset the seed so turns differ.
    let seed = config.seed.wrapping_add(u64::from(game.turn));
    let mut session = Session::new(team, config.with_seed(seed)).with_missions(missions);
    let output = session.decide(&game, &genome)?;

    if let Some(path) = &args.state {
        fs::write(path, serde_json::to_string_pretty(session.missions())?)?;
    }

    match args.format {
        OutputFormat::Text => print!("{}", format_text(&output)),
        OutputFormat::Json => {
            let json = JsonTurn::new(game.turn, team, &output, session.missions());
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

/// Read a JSON snapshot, or a text observation when the file ends in `.txt`.
fn load_snapshot(
    path: &Path,
    team: u8,
    turn: u32,
    config: &EngineConfig,
) -> Result<(Team, GameState), CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;

    if path.extension().is_some_and(|ext| ext == "txt") {
        let (team, mut game) = parse_observation(&text, turn)?;
        game.constants = config.constants;
        Ok((team, game))
    } else {
        if team > 1 {
            return Err(CliError::new(format!("team must be 0 or 1, got {team}")));
        }
        Ok((Team(team), config.parse_snapshot(&text)?))
    }
}
