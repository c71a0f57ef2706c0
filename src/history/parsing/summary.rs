//! Summary block extraction
//!
//!     The summary is the site's own account of the hand: the total pot with its main and side
//!     parts, the rake, the board, and one result line per seat. Pot amounts are already implied
//!     by the contributions, so the summary serves as a second opinion and as the authoritative
//!     record of who won:
//!
//!         Total pot $230 Main pot $148. Side pot $80. | Rake $2
//!         Board [2c 7d Jh 9s 3d]
//!         Seat 1: Alice (button) showed [Qs Qh] and won ($148) with a pair of Queens
//!
//!     Nothing in the summary is mandatory and nothing here fails the parse. Lines that do not
//!     fit are skipped.

use super::amounts::{approx_eq, parse_amount, AMOUNT_PATTERN};
use crate::history::ast::{parse_cards, Amount, Card, CollectedAction, Player, PotType};
use crate::history::lexing::Cursor;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static TOTAL_POT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^Total pot (?P<total>{AMOUNT_PATTERN})")).unwrap());
static MAIN_POT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"Main pot (?P<amount>{AMOUNT_PATTERN})")).unwrap());
static SIDE_POT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"Side pot(?:-(?P<level>\d+))? (?P<amount>{AMOUNT_PATTERN})"
    ))
    .unwrap()
});
static RAKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\|\s*Rake (?P<amount>{AMOUNT_PATTERN})")).unwrap());
static BOARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Board \[(?P<cards>[^\]]*)\]").unwrap());
static SEAT_RESULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Seat (?P<seat>\d+): (?P<rest>.+)$").unwrap());
static POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\((?P<position>button|small blind|big blind)\)").unwrap());
static REVEALED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:showed|mucked) \[(?P<cards>[^\]]*)\]").unwrap());
static WON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?:won|collected) \((?P<amount>{AMOUNT_PATTERN})\)")).unwrap()
});

/// One seat's result line
#[derive(Debug, Clone, PartialEq)]
pub struct SeatResult {
    pub seat: u8,
    pub name: String,
    pub position: Option<String>,
    pub cards: Option<Vec<Card>>,
    pub won: Option<Amount>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_pot: Option<Amount>,
    pub main_pot: Option<Amount>,
    /// (level, amount); unnumbered side pots are numbered in order of appearance
    pub side_pots: Vec<(usize, Amount)>,
    pub rake: Option<Amount>,
    pub board: Vec<Card>,
    pub seats: Vec<SeatResult>,
}

impl Summary {
    pub fn lists_pot_breakdown(&self) -> bool {
        self.main_pot.is_some() || !self.side_pots.is_empty()
    }
}

/// Consume the summary block. The cursor may sit on the `*** SUMMARY ***` marker or past it.
pub fn parse_summary(cursor: &mut Cursor<'_>, players: &[Player]) -> Summary {
    let mut summary = Summary::default();
    while let Some(line) = cursor.current_line() {
        let text = line.text.as_str();
        if TOTAL_POT.is_match(text) {
            read_totals(text, &mut summary);
        } else if let Some(caps) = BOARD.captures(text) {
            match parse_cards(&caps["cards"]) {
                Ok(cards) => summary.board = cards,
                Err(err) => warn!("line {}: unreadable board: {err}", line.number),
            }
        } else if let Some(result) = read_seat(text, players) {
            summary.seats.push(result);
        } else {
            debug!("line {}: skipped summary line", line.number);
        }
        cursor.advance();
    }
    summary
}

fn read_totals(text: &str, summary: &mut Summary) {
    let (pots, extras) = text.split_once('|').unwrap_or((text, ""));
    summary.total_pot = TOTAL_POT
        .captures(pots)
        .and_then(|caps| parse_amount(&caps["total"]));
    summary.main_pot = MAIN_POT
        .captures(pots)
        .and_then(|caps| parse_amount(&caps["amount"]));
    for (i, caps) in SIDE_POT.captures_iter(pots).enumerate() {
        let level = caps
            .name("level")
            .and_then(|l| l.as_str().parse().ok())
            .unwrap_or(i + 1);
        if let Some(amount) = parse_amount(&caps["amount"]) {
            summary.side_pots.push((level, amount));
        }
    }
    let extras = format!("|{extras}");
    summary.rake = RAKE
        .captures(&extras)
        .and_then(|caps| parse_amount(&caps["amount"]));
}

fn read_seat(text: &str, players: &[Player]) -> Option<SeatResult> {
    let caps = SEAT_RESULT.captures(text)?;
    let seat: u8 = caps["seat"].parse().ok()?;
    let rest = caps.name("rest")?.as_str();
    let player = players
        .iter()
        .find(|p| p.seat == seat && rest.starts_with(p.name.as_str()))?;
    let after = &rest[player.name.len()..];

    let position = POSITION.captures(after).map(|p| match &p["position"] {
        "button" => "BTN".to_string(),
        "small blind" => "SB".to_string(),
        _ => "BB".to_string(),
    });
    let cards = REVEALED
        .captures(after)
        .and_then(|c| parse_cards(&c["cards"]).ok());
    let won: Vec<Amount> = WON
        .captures_iter(after)
        .filter_map(|c| parse_amount(&c["amount"]))
        .collect();

    Some(SeatResult {
        seat,
        name: player.name.clone(),
        position,
        cards,
        won: (!won.is_empty()).then(|| won.iter().sum()),
    })
}

/// Merge summary facts into the players and the collections.
///
/// Position labels and revealed cards fill in what the narrative left open. Collections taken
/// "from pot" while the summary names main and side pots are re-tagged by amount. With no
/// collection lines at all, the seat winnings stand in for them.
pub fn apply_summary(
    summary: &Summary,
    players: &mut [Player],
    collected: &mut Vec<CollectedAction>,
    tolerance: Amount,
) {
    for result in &summary.seats {
        let Some(player) = players.iter_mut().find(|p| p.name == result.name) else {
            continue;
        };
        if player.position.is_none() {
            player.position = result.position.clone();
        }
        if let Some(cards) = &result.cards {
            if !player.reveal_hole_cards(cards) {
                warn!("summary lists {} cards for {}", cards.len(), player.name);
            }
        }
    }

    if collected.is_empty() {
        if summary.side_pots.is_empty() {
            collected.extend(summary.seats.iter().filter_map(|s| {
                s.won
                    .map(|won| CollectedAction::new(s.name.clone(), won, PotType::Single, None))
            }));
        } else if summary.seats.iter().any(|s| s.won.is_some()) {
            warn!("summary winnings cannot be attributed to individual side pots");
        }
    }

    if summary.lists_pot_breakdown() {
        retag_collections(summary, collected, tolerance);
    }
}

/// Largest number of untagged collections searched for a combination matching a pot
const MAX_COMBINED_COLLECTIONS: usize = 16;

/// Assign "from pot" collections to the listed main and side pots.
///
/// A collection equal to a pot's amount claims that pot first. Pots still short are then
/// filled by the first combination of remaining collections that adds up to what they hold,
/// which covers split side pots. Collections that fit nowhere keep their tag.
fn retag_collections(summary: &Summary, collected: &mut [CollectedAction], tolerance: Amount) {
    let mut pots: Vec<(PotType, Option<usize>, Amount)> = summary
        .main_pot
        .map(|main| (PotType::Main, None, main))
        .into_iter()
        .chain(
            summary
                .side_pots
                .iter()
                .map(|(level, amount)| (PotType::Side, Some(*level), *amount)),
        )
        .collect();
    for collection in collected.iter().filter(|c| c.pot_type != PotType::Single) {
        let pot = pots.iter_mut().find(|(kind, level, _)| {
            *kind == collection.pot_type && *level == collection.side_pot_level
        });
        if let Some(pot) = pot {
            pot.2 -= collection.amount;
        }
    }

    let mut open: Vec<usize> = collected
        .iter()
        .enumerate()
        .filter(|(_, c)| c.pot_type == PotType::Single)
        .map(|(i, _)| i)
        .collect();

    for (kind, level, remaining) in pots.iter_mut() {
        if let Some(pos) = open
            .iter()
            .position(|&i| approx_eq(collected[i].amount, *remaining, tolerance))
        {
            let i = open.remove(pos);
            collected[i].pot_type = *kind;
            collected[i].side_pot_level = *level;
            *remaining = 0.0;
        }
    }

    for (kind, level, remaining) in pots.iter_mut() {
        if *remaining <= tolerance {
            continue;
        }
        let amounts: Vec<Amount> = open.iter().map(|&i| collected[i].amount).collect();
        let Some(chosen) = combination_summing_to(&amounts, *remaining, tolerance) else {
            continue;
        };
        for pos in chosen.into_iter().rev() {
            let i = open.remove(pos);
            collected[i].pot_type = *kind;
            collected[i].side_pot_level = *level;
        }
        *remaining = 0.0;
    }

    for &i in &open {
        warn!(
            "collection of {} by {} matches no listed pot",
            collected[i].amount, collected[i].player
        );
    }
}

/// Positions (ascending) of the first combination of `amounts` that adds up to `target`
fn combination_summing_to(
    amounts: &[Amount],
    target: Amount,
    tolerance: Amount,
) -> Option<Vec<usize>> {
    if amounts.is_empty() || amounts.len() > MAX_COMBINED_COLLECTIONS {
        return None;
    }
    let picked = |mask: u32| (0..amounts.len()).filter(move |i| mask & (1 << *i) != 0);
    (1u32..1 << amounts.len())
        .find(|&mask| {
            let sum: Amount = picked(mask).map(|i| amounts[i]).sum();
            approx_eq(sum, target, tolerance)
        })
        .map(|mask| picked(mask).collect())
}
