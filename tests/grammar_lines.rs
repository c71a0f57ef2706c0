//! Line-level recognition by the standard action grammar

use handhistory::history::ast::ActionType;
use handhistory::history::parsing::grammar::ActionGrammar;
use rstest::rstest;

#[rstest(
    line,
    rule,
    case("Player1: folds", "fold"),
    case("Player1: folds [Ah Kd]", "fold"),
    case("Player1: checks", "check"),
    case("Player1: calls $2", "call"),
    case("Player1: calls $200 and is all-in", "call_all_in"),
    case("Player1: bets €1,250.50", "bet"),
    case("Player1: bets 800 and is all-in", "bet_all_in"),
    case("Player5: raises $25 to $75", "raise"),
    case("Alice: raises $48 to $50 and is all-in", "raise_all_in"),
    case("Uncalled bet ($100) returned to Bob", "uncalled"),
    case("Bob collected $80 from side pot", "collected"),
    case("Dave collected 50 from side pot-2", "collected"),
    case("Player2 collected $51 from pot", "collected"),
    case("Bob: shows [Ac Kc] (high card Ace)", "show"),
    case("Player4: mucks hand", "muck"),
    case("Player4: doesn't show hand", "muck"),
    case("Frank has timed out", "timeout"),
    case("Frank has timed out while disconnected", "timeout"),
    case("Erin is disconnected", "disconnect"),
    case("Erin is connected", "reconnect"),
    case("Erin has reconnected", "reconnect"),
    case("Heidi is sitting out", "sitout"),
    case("Heidi: sits out", "sitout"),
    case("Heidi has returned", "return")
)]
fn recognizes_line(line: &str, rule: &str) {
    assert_eq!(ActionGrammar::standard().matching_rule(line), Some(rule));
}

#[rstest(line => [
    "Dave said, \"gl\"",
    "Player1 joins the table at seat #5",
    "Player1: raises to $50",
    "*** FLOP *** [2c 7d Jh]",
    ""
])]
fn ignores_line(line: &str) {
    assert!(ActionGrammar::standard().recognize(line).is_none());
}

#[rstest(
    line,
    kind,
    amount,
    all_in,
    case("Player1: calls $200 and is all-in", ActionType::Call, Some(200.0), true),
    case("Player5: raises $25 to $75", ActionType::Raise, Some(75.0), false),
    case("Player1: bets $1,000", ActionType::Bet, Some(1000.0), false),
    case("Uncalled bet ($0.30) returned to Hero", ActionType::Uncalled, Some(0.3), false),
    case("Player1: checks", ActionType::Check, None, false)
)]
fn extracts_details(line: &str, kind: ActionType, amount: Option<f64>, all_in: bool) {
    let details = ActionGrammar::standard().recognize(line).unwrap();
    assert_eq!(details.kind, kind);
    assert_eq!(details.amount, amount);
    assert_eq!(details.is_all_in, all_in);
}

#[test]
fn system_actions_carry_no_amount() {
    let grammar = ActionGrammar::standard();
    for line in ["Erin is disconnected", "Frank has timed out", "Heidi has returned"] {
        let details = grammar.recognize(line).unwrap();
        assert!(details.kind.is_system());
        assert!(details.amount.is_none());
    }
}
