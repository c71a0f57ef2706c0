//! Property-based tests over generated hands

use handhistory::history::ast::Amount;
use handhistory::history::validation::{replayed_contributions, validate};
use handhistory::history::{parse, parse_all};
use proptest::prelude::*;

/// A single-street hand: P1 bets, the others call or fold, P1 takes the pot
#[derive(Debug, Clone)]
struct Scenario {
    id: u64,
    stacks: Vec<u32>,
    bet: u32,
    calls: Vec<bool>,
}

impl Scenario {
    fn pot(&self) -> Amount {
        let callers = self.calls.iter().filter(|c| **c).count();
        (self.bet as usize * (callers + 1)) as Amount
    }

    fn render(&self) -> String {
        let mut text = format!(
            "PokerStars Hand #{}:  Hold'em No Limit ($1/$2 USD) - 2024/01/15 20:30:00 ET\n\
             Table 'Prop' 9-max Seat #1 is the button\n",
            self.id
        );
        for (i, stack) in self.stacks.iter().enumerate() {
            text.push_str(&format!("Seat {}: P{} (${} in chips)\n", i + 1, i + 1, stack));
        }
        text.push_str("*** HOLE CARDS ***\n");
        text.push_str(&format!("P1: bets ${}\n", self.bet));
        for (i, calls) in self.calls.iter().enumerate() {
            if *calls {
                text.push_str(&format!("P{}: calls ${}\n", i + 2, self.bet));
            } else {
                text.push_str(&format!("P{}: folds\n", i + 2));
            }
        }
        text.push_str("*** SHOW DOWN ***\n");
        text.push_str(&format!("P1 collected ${} from pot\n", self.pot()));
        text.push_str("*** SUMMARY ***\n");
        text.push_str(&format!("Total pot ${} | Rake $0\n", self.pot()));
        text
    }
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (1u64..1_000_000, prop::collection::vec(100u32..1000, 2..9), 1u32..100)
        .prop_flat_map(|(id, stacks, bet)| {
            let others = stacks.len() - 1;
            (
                Just(id),
                Just(stacks),
                Just(bet),
                prop::collection::vec(any::<bool>(), others - 1),
            )
        })
        .prop_map(|(id, stacks, bet, rest)| {
            let mut calls = vec![true];
            calls.extend(rest);
            Scenario {
                id,
                stacks,
                bet,
                calls,
            }
        })
}

proptest! {
    #[test]
    fn generated_hands_parse_and_validate(scenario in scenario_strategy()) {
        let text = scenario.render();
        let hand = parse(&text).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(&hand.id, &scenario.id.to_string());
        prop_assert_eq!(hand.players.len(), scenario.stacks.len());
        let report = validate(&hand);
        prop_assert!(report.is_valid, "{:?}", report.errors);
    }

    #[test]
    fn action_indices_are_contiguous(scenario in scenario_strategy()) {
        let hand = parse(&scenario.render()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for (i, action) in hand.actions.iter().enumerate() {
            prop_assert_eq!(action.index, i);
        }
        prop_assert_eq!(hand.actions.len(), scenario.stacks.len() + 1);
    }

    #[test]
    fn pots_match_contributions(scenario in scenario_strategy()) {
        let hand = parse(&scenario.render()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let total: Amount = hand.pots.iter().map(|p| p.amount).sum();
        prop_assert!((total - scenario.pot()).abs() < 1e-6);
        prop_assert!((replayed_contributions(&hand) - scenario.pot()).abs() < 1e-6);
        prop_assert_eq!(hand.pots.len(), 1);
        prop_assert_eq!(&hand.pots[0].players, &vec!["P1".to_string()]);

        let callers = scenario.calls.iter().filter(|c| **c).count();
        prop_assert_eq!(hand.pots[0].eligible_players.len(), callers + 1);
    }

    #[test]
    fn parsing_is_deterministic(scenario in scenario_strategy()) {
        let text = scenario.render();
        prop_assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn parse_all_splits_every_hand(scenarios in prop::collection::vec(scenario_strategy(), 1..5)) {
        let text: String = scenarios
            .iter()
            .map(|s| s.render())
            .collect::<Vec<_>>()
            .join("\n\n");
        let results = parse_all(&text);
        prop_assert_eq!(results.len(), scenarios.len());
        for (result, scenario) in results.iter().zip(&scenarios) {
            let hand = result.as_ref().map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(&hand.id, &scenario.id.to_string());
        }
    }

    #[test]
    fn stray_lines_never_panic(
        scenario in scenario_strategy(),
        noise in prop::collection::vec("[ -~]{0,40}", 1..6),
    ) {
        let text = scenario
            .render()
            .replacen("*** HOLE CARDS ***\n", &format!("*** HOLE CARDS ***\n{}\n", noise.join("\n")), 1);
        prop_assert_eq!(parse(&text), parse(&text));
    }
}
