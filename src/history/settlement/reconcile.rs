//! Reconciling computed pots with reported collections

use super::PotError;
use crate::history::ast::{Amount, CollectedAction, Pot, PotType, TOLERANCE};
use crate::history::parsing::amounts::{approx_eq, round_cents};

/// Map the pot phrase of a "collected" line to a pot type and side-pot level.
///
/// `pot` and a missing phrase mean the single pot, `main pot` the main pot, `side pot` and
/// `side pot-N` a side pot (level N when given).
pub fn pot_target(phrase: Option<&str>) -> (PotType, Option<usize>) {
    let phrase = phrase.map(str::trim).unwrap_or("pot");
    if phrase.starts_with("main") {
        (PotType::Main, None)
    } else if phrase.starts_with("side") {
        let level = phrase
            .rsplit_once('-')
            .and_then(|(_, level)| level.parse().ok());
        (PotType::Side, level)
    } else {
        (PotType::Single, None)
    }
}

/// Check computed pots against collections with the default tolerance
pub fn validate_pot_math(
    pots: &[Pot],
    collected: &[CollectedAction],
    rake: Option<Amount>,
) -> Result<(), PotError> {
    validate_pot_math_within(pots, collected, rake, TOLERANCE)
}

/// Every pot's matching collections must add up to its amount, minus the rake for the main or
/// single pot. Every collection must match some pot.
pub fn validate_pot_math_within(
    pots: &[Pot],
    collected: &[CollectedAction],
    rake: Option<Amount>,
    tolerance: Amount,
) -> Result<(), PotError> {
    let rake = rake.unwrap_or(0.0);
    for pot in pots {
        let expected = match pot.pot_type {
            PotType::Single | PotType::Main => pot.amount - rake,
            PotType::Side => pot.amount,
        };
        let paid: Amount = collected
            .iter()
            .filter(|c| pot.accepts(c))
            .map(|c| c.amount)
            .sum();
        if !approx_eq(expected, paid, tolerance) {
            return Err(PotError::Mismatch {
                pot: pot.to_string(),
                expected: round_cents(expected),
                collected: round_cents(paid),
            });
        }
    }

    if let Some(stray) = collected.iter().find(|c| !pots.iter().any(|p| p.accepts(c))) {
        return Err(PotError::UnclaimedCollection {
            player: stray.player.clone(),
            amount: stray.amount,
        });
    }
    Ok(())
}

/// Take the rake out of the main (or single) pot
pub fn apply_rake(pots: &mut [Pot], rake: Amount) {
    if let Some(pot) = pots
        .iter_mut()
        .find(|p| matches!(p.pot_type, PotType::Single | PotType::Main))
    {
        pot.amount = round_cents((pot.amount - rake).max(0.0));
    }
}

/// Record winners, split pots and odd-chip winners.
///
/// Every collector of a pot becomes one of its players. A pot with more than one collection
/// is split; when its amount does not divide evenly among the collectors, the odd chip goes to
/// the collector with the largest single collection, the first one on a tie.
pub fn enhance_pots(pots: &mut [Pot], collected: &[CollectedAction]) {
    for pot in pots.iter_mut() {
        let matching: Vec<&CollectedAction> =
            collected.iter().filter(|c| pot.accepts(c)).collect();

        let mut winners: Vec<String> = Vec::new();
        for c in &matching {
            if !winners.contains(&c.player) {
                winners.push(c.player.clone());
            }
        }
        pot.players = winners;

        if matching.len() < 2 {
            continue;
        }
        pot.is_split = true;

        if has_odd_chip(pot.amount, matching.len()) {
            let mut largest: Option<&CollectedAction> = None;
            for c in &matching {
                if largest.map_or(true, |best| c.amount > best.amount) {
                    largest = Some(c);
                }
            }
            pot.odd_chip_winner = largest.map(|c| c.player.clone());
        }
    }
}

fn has_odd_chip(amount: Amount, splitters: usize) -> bool {
    let unit = if (amount - amount.round()).abs() < 1e-9 {
        1.0
    } else {
        0.01
    };
    let units = (amount / unit).round() as u64;
    units % splitters as u64 != 0
}
