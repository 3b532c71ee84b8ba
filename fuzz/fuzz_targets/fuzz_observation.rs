#![no_main]

use lagash::game::parse_observation;
use lagash::{Genome, Session, EngineConfig};
use libfuzzer_sys::fuzz_target;

/// Largest board the target lets the parser allocate.
const MAX_CELLS: u32 = 64 * 64;

/// Reject headers that would allocate an oversized map.
fn header_fits(text: &str) -> bool {
    let Some(dims) = text.lines().filter(|l| !l.trim().is_empty()).nth(1) else {
        return true;
    };
    let mut parts = dims.split_whitespace();
    let w = parts.next().and_then(|p| p.parse::<u16>().ok());
    let h = parts.next().and_then(|p| p.parse::<u16>().ok());
    match (w, h) {
        (Some(w), Some(h)) => u32::from(w) * u32::from(h) <= MAX_CELLS,
        _ => true,
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 16 * 1024 || !header_fits(text) {
        return;
    }

    // Malformed observations must be rejected, never panic.
    let Ok((team, state)) = parse_observation(text, 0) else {
        return;
    };

    // Whatever parses must be decidable.
    let genome = Genome::uniform(360, 5);
    let mut session = Session::new(team, EngineConfig::default());
    let _ = session.decide(&state, &genome);
});
