//! Parser for the competition's line-based observation format.
//!
//! ```text
//! 0                         <- controlling team
//! 12 12                     <- width height
//! rp 0 30                   <- research points
//! r wood 3 4 500            <- resource deposit
//! u 0 0 u_1 2 2 0 10 0 0    <- unit: kind team id x y cooldown wood coal uranium
//! c 0 c_1 230 23            <- city: team id fuel light_upkeep
//! ct 0 c_1 2 3 0            <- city tile: team city x y cooldown
//! ccd 2 3 6                 <- road level: x y level
//! D_DONE
//! ```

use crate::error::ObservationError;
use crate::game::{
    Cargo, City, CityTile, Coord, GameState, Map, ResourceType, Team, Unit, UnitKind,
};
use std::str::{FromStr, SplitWhitespace};

/// Parse a complete observation into the controlling team and a snapshot.
///
/// # Errors
///
/// Returns an error if the header is missing or any line is malformed.
pub fn parse_observation(text: &str, turn: u32) -> Result<(Team, GameState), ObservationError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let team = lines
        .next()
        .and_then(|(_, l)| l.trim().parse::<u8>().ok())
        .filter(|&t| t < 2)
        .map(Team)
        .ok_or(ObservationError::MissingHeader)?;

    let (width, height) = lines
        .next()
        .and_then(|(_, l)| {
            let mut parts = l.split_whitespace();
            let w = parts.next()?.parse::<u16>().ok()?;
            let h = parts.next()?.parse::<u16>().ok()?;
            Some((w, h))
        })
        .ok_or(ObservationError::MissingHeader)?;

    let map = Map::new(width, height).ok_or(ObservationError::MissingHeader)?;
    let mut state = GameState::new(map);
    state.turn = turn;

    for (idx, line) in lines {
        apply_line(&mut state, line).map_err(|reason| ObservationError::MalformedLine {
            line: idx + 1,
            reason,
        })?;
    }

    Ok((team, state))
}

/// Apply one update line to the snapshot.
fn apply_line(state: &mut GameState, line: &str) -> Result<(), String> {
    let mut fields = Fields(line.split_whitespace());
    let tag = fields.text("tag")?;

    match tag {
        "rp" => {
            let team = fields.team()?;
            state.player_mut(team).research_points = fields.number("research points")?;
        }
        "r" => {
            let name = fields.text("resource type")?;
            let kind = ResourceType::from_name(name)
                .ok_or_else(|| format!("unknown resource type `{name}`"))?;
            let pos = fields.coord(state)?;
            let amount = fields.number("amount")?;
            state.map.set_resource(pos, kind, amount);
        }
        "u" => {
            let code: u8 = fields.number("unit type")?;
            let kind =
                UnitKind::from_code(code).ok_or_else(|| format!("unknown unit type {code}"))?;
            let team = fields.team()?;
            let id = fields.text("unit id")?.to_string();
            let pos = fields.coord(state)?;
            let cooldown = fields.number("cooldown")?;
            let cargo = Cargo {
                wood: fields.number("wood")?,
                coal: fields.number("coal")?,
                uranium: fields.number("uranium")?,
            };
            state.add_unit(Unit {
                id,
                kind,
                team,
                pos,
                cooldown,
                cargo,
            });
        }
        "c" => {
            let team = fields.team()?;
            let id = fields.text("city id")?.to_string();
            let fuel = fields.number("fuel")?;
            let light_upkeep = fields.number("light upkeep")?;
            state.cities.push(City {
                id,
                team,
                fuel,
                light_upkeep,
            });
        }
        "ct" => {
            let team = fields.team()?;
            let city_id = fields.text("city id")?.to_string();
            let pos = fields.coord(state)?;
            let cooldown = fields.number("cooldown")?;
            state.city_tiles.push(CityTile {
                city_id,
                team,
                pos,
                cooldown,
            });
        }
        "ccd" => {
            let pos = fields.coord(state)?;
            let level = fields.number("road level")?;
            state.map.set_road(pos, level);
        }
        "D_DONE" => {}
        other => return Err(format!("unknown tag `{other}`")),
    }

    Ok(())
}

/// Cursor over the whitespace-separated fields of one line.
struct Fields<'a>(SplitWhitespace<'a>);

impl<'a> Fields<'a> {
    fn text(&mut self, what: &str) -> Result<&'a str, String> {
        self.0.next().ok_or_else(|| format!("missing {what}"))
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T, String> {
        let raw = self.text(what)?;
        raw.parse().map_err(|_| format!("invalid {what} `{raw}`"))
    }

    fn team(&mut self) -> Result<Team, String> {
        let team: u8 = self.number("team")?;
        if team < 2 {
            Ok(Team(team))
        } else {
            Err(format!("invalid team {team}"))
        }
    }

    fn coord(&mut self, state: &GameState) -> Result<Coord, String> {
        let pos = Coord::new(self.number("x")?, self.number("y")?);
        if state.map.in_bounds(pos) {
            Ok(pos)
        } else {
            Err(format!("position {pos} is off the map"))
        }
    }
}
