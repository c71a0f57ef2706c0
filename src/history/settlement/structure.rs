//! Pot tiers and eligibility

use crate::history::ast::{Amount, Pot, TOLERANCE};
use crate::history::parsing::amounts::round_cents;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePot {
    pub level: usize,
    pub amount: Amount,
}

/// Main and side pot sizes derived from all-in amounts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotCalculation {
    pub main_pot: Amount,
    pub side_pots: Vec<SidePot>,
    pub total: Amount,
}

/// Pot sizes from all-in amounts, assuming every contesting player matched every level.
///
/// With `N` all-in plus active players, the tier at sorted all-in amount `a_i` holds
/// `(a_i - a_{i-1}) * (N - i)`. Tier 0 is the main pot, tier `i` is side pot `i`. Whatever
/// `total_contributions` has beyond the tiers becomes a final side pot for the active players.
pub fn calculate_pot_structure(
    all_in_amounts: &[Amount],
    total_contributions: Amount,
    active_players: &[String],
) -> PotCalculation {
    let mut amounts = all_in_amounts.to_vec();
    amounts.sort_by(|a, b| a.total_cmp(b));

    if amounts.is_empty() {
        return PotCalculation {
            main_pot: total_contributions,
            side_pots: Vec::new(),
            total: total_contributions,
        };
    }

    let contributors = amounts.len() + active_players.len();
    let mut main_pot = 0.0;
    let mut side_pots = Vec::new();
    let mut previous = 0.0;
    for (i, amount) in amounts.iter().enumerate() {
        let size = round_cents((amount - previous) * contributors.saturating_sub(i) as Amount);
        if i == 0 {
            main_pot = size;
        } else {
            side_pots.push(SidePot { level: i, amount: size });
        }
        previous = *amount;
    }

    let tiered = main_pot + side_pots.iter().map(|p| p.amount).sum::<Amount>();
    let remainder = round_cents(total_contributions - tiered);
    if remainder > TOLERANCE {
        if active_players.is_empty() {
            match side_pots.last_mut() {
                Some(last) => last.amount = round_cents(last.amount + remainder),
                None => main_pot = round_cents(main_pot + remainder),
            }
        } else {
            side_pots.push(SidePot {
                level: amounts.len(),
                amount: remainder,
            });
        }
    }

    let total = round_cents(main_pot + side_pots.iter().map(|p| p.amount).sum::<Amount>());
    PotCalculation {
        main_pot,
        side_pots,
        total,
    }
}

/// Players who may win the pot at `level`.
///
/// Level 0 is open to every all-in and active player. Higher levels are open to the all-in
/// players from sorted position `level` onward, plus every active player.
pub fn eligible_players(
    level: usize,
    all_in: &[(String, Amount)],
    active_players: &[String],
) -> Vec<String> {
    let mut sorted = all_in.to_vec();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut eligible: Vec<String> = sorted
        .into_iter()
        .skip(level)
        .map(|(name, _)| name)
        .collect();
    for name in active_players {
        if !eligible.contains(name) {
            eligible.push(name.clone());
        }
    }
    eligible
}

/// Pots from each player's actual contribution.
///
/// A tier between two consecutive all-in amounts collects, from every contributor (folded
/// players included), the part of their contribution that falls inside it. Empty tiers are
/// skipped and side-pot levels stay gapless. A remainder above the highest all-in that no
/// active player can win is folded into the pot below it. One resulting pot is published as
/// a single pot; otherwise the first is the main pot and the rest are side pots.
pub fn build_pots(
    contributions: &[(String, Amount)],
    all_in: &[(String, Amount)],
    active_players: &[String],
) -> Vec<Pot> {
    let contributed = |name: &str| {
        contributions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    };
    let contesting: Vec<String> = active_players
        .iter()
        .filter(|name| contributed(name) > 0.0)
        .cloned()
        .collect();

    let mut sorted = all_in.to_vec();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mut levels: Vec<Amount> = Vec::new();
    for (_, amount) in &sorted {
        if levels.last().map_or(true, |last| amount - last > TOLERANCE) {
            levels.push(*amount);
        }
    }

    let tier_amount = |floor: Amount, ceiling: Option<Amount>| -> Amount {
        let sum: Amount = contributions
            .iter()
            .map(|(_, c)| {
                let top = ceiling.map_or(*c, |ceiling| c.min(ceiling));
                (top - floor).max(0.0)
            })
            .sum();
        round_cents(sum)
    };

    let mut tiers: Vec<(Amount, Vec<String>)> = Vec::new();
    let mut previous = 0.0;
    for level in &levels {
        let amount = tier_amount(previous, Some(*level));
        if amount > TOLERANCE {
            let mut eligible: Vec<String> = sorted
                .iter()
                .filter(|(_, a)| *a >= level - TOLERANCE)
                .map(|(name, _)| name.clone())
                .collect();
            eligible.extend(contesting.iter().cloned());
            tiers.push((amount, eligible));
        }
        previous = *level;
    }

    let remainder = tier_amount(previous, None);
    if remainder > TOLERANCE {
        if contesting.is_empty() && !tiers.is_empty() {
            if let Some((amount, _)) = tiers.last_mut() {
                *amount = round_cents(*amount + remainder);
            }
        } else {
            let eligible = if contesting.is_empty() {
                contributions
                    .iter()
                    .filter(|(_, c)| *c > 0.0)
                    .map(|(name, _)| name.clone())
                    .collect()
            } else {
                contesting.clone()
            };
            tiers.push((remainder, eligible));
        }
    }

    if tiers.len() == 1 {
        let (amount, eligible) = tiers.remove(0);
        return vec![Pot::single(amount, eligible)];
    }
    tiers
        .into_iter()
        .enumerate()
        .map(|(level, (amount, eligible))| match level {
            0 => Pot::main(amount, eligible),
            _ => Pot::side(level, amount, eligible),
        })
        .collect()
}
