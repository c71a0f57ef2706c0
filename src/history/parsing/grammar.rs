//! Action Grammar - priority-ordered line rules
//!
//!     Each rule pairs a line pattern with a handler that turns the captures into
//!     [`ActionDetails`]. Rules are tried top to bottom and the first match wins, so the order
//!     of the table is part of the grammar:
//!
//!         1. all-in variants      raise / call / bet lines ending in "and is all-in"
//!         2. special and system   muck, timeout, disconnect, reconnect, sit out, return
//!         3. standard actions     fold, check, call, bet, raise, uncalled bet, collected, show
//!
//!     All-in variants come first because the suffix changes the shape of the line; special
//!     actions come before standard ones because their phrasing can contain the standard verbs.
//!
//! Pattern Notation
//!
//!     Patterns are written with placeholders that expand to named capture groups:
//!
//!         {player}   the acting player's name (lazy, may contain spaces and colons)
//!         {amount}   a money amount (the "X" of "raises X to Y")
//!         {total}    a second money amount (the "Y" of "raises X to Y")
//!         {cards}    a bracketed card list
//!         {reason}   optional trailing free text
//!
//!     For raises the recorded amount is always the final total, never the increment. The
//!     uncalled-bet rule captures the amount before the player because the sentence places its
//!     subject last. A line that matches no rule yields `None`; that is not an error.

use super::amounts::{parse_amount, AMOUNT_PATTERN};
use crate::history::ast::{parse_cards, ActionDetails, ActionType, Amount, Card};
use log::error;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Builds action details from a matched line
pub type RuleHandler = fn(&Captures<'_>) -> Option<ActionDetails>;

/// Priority group of a rule. Groups are evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleGroup {
    AllIn,
    Special,
    Standard,
}

/// Standard rule table: (name, group, pattern, handler). Order matters.
const STANDARD_RULES: &[(&str, RuleGroup, &str, RuleHandler)] = &[
    (
        "raise_all_in",
        RuleGroup::AllIn,
        r"^{player}: raises {amount} to {total} and is all-in$",
        on_raise_all_in,
    ),
    (
        "call_all_in",
        RuleGroup::AllIn,
        r"^{player}: calls {amount} and is all-in$",
        on_call_all_in,
    ),
    (
        "bet_all_in",
        RuleGroup::AllIn,
        r"^{player}: bets {amount} and is all-in$",
        on_bet_all_in,
    ),
    (
        "muck",
        RuleGroup::Special,
        r"^{player}: (?P<reason>mucks hand|doesn't show hand)$",
        on_muck,
    ),
    (
        "timeout",
        RuleGroup::Special,
        r"^{player} has timed out{reason}$",
        on_timeout,
    ),
    (
        "disconnect",
        RuleGroup::Special,
        r"^{player} (?:is|has) disconnected{reason}$",
        on_disconnect,
    ),
    (
        "reconnect",
        RuleGroup::Special,
        r"^{player} (?:is|has) (?:re)?connected$",
        on_reconnect,
    ),
    (
        "sitout",
        RuleGroup::Special,
        r"^{player}:? (?:is sitting out|sits out){reason}$",
        on_sitout,
    ),
    (
        "return",
        RuleGroup::Special,
        r"^{player} has returned{reason}$",
        on_return,
    ),
    (
        "fold",
        RuleGroup::Standard,
        r"^{player}: folds(?:\s+{cards})?$",
        on_fold,
    ),
    ("check", RuleGroup::Standard, r"^{player}: checks$", on_check),
    ("call", RuleGroup::Standard, r"^{player}: calls {amount}$", on_call),
    ("bet", RuleGroup::Standard, r"^{player}: bets {amount}$", on_bet),
    (
        "raise",
        RuleGroup::Standard,
        r"^{player}: raises {amount} to {total}$",
        on_raise,
    ),
    (
        "uncalled",
        RuleGroup::Standard,
        r"^Uncalled bet \({amount}\) returned to {player}$",
        on_uncalled,
    ),
    (
        "collected",
        RuleGroup::Standard,
        r"^{player} collected {amount} from (?P<reason>(?:main |side )?pot(?:-\d+)?)\.?$",
        on_collected,
    ),
    (
        "show",
        RuleGroup::Standard,
        r"^{player}: shows {cards}(?:\s+\((?P<reason>.+)\))?$",
        on_show,
    ),
];

static STANDARD_GRAMMAR: Lazy<ActionGrammar> = Lazy::new(ActionGrammar::standard_rules);

/// Expand the placeholder notation into a regular expression
pub fn expand_pattern(pattern: &str) -> String {
    pattern
        .replace("{player}", r"(?P<player>.+?)")
        .replace("{amount}", &format!("(?P<amount>{AMOUNT_PATTERN})"))
        .replace("{total}", &format!("(?P<total>{AMOUNT_PATTERN})"))
        .replace("{cards}", r"\[(?P<cards>[^\]]*)\]")
        .replace("{reason}", r"(?:\s+(?P<reason>.+))?")
}

#[derive(Debug, Clone)]
pub struct GrammarRule {
    name: &'static str,
    group: RuleGroup,
    regex: Regex,
    handler: RuleHandler,
}

impl GrammarRule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> RuleGroup {
        self.group
    }

    fn apply(&self, line: &str) -> Option<ActionDetails> {
        self.regex
            .captures(line)
            .and_then(|caps| (self.handler)(&caps))
    }
}

/// Ordered (matcher, handler) table mapping a line to an action
#[derive(Debug, Clone, Default)]
pub struct ActionGrammar {
    rules: Vec<GrammarRule>,
}

impl ActionGrammar {
    /// An empty grammar
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared standard grammar
    pub fn standard() -> &'static ActionGrammar {
        &STANDARD_GRAMMAR
    }

    /// A fresh copy of the standard rules, for grammars that extend them.
    ///
    /// A rule whose pattern fails to compile is logged and left out.
    pub fn standard_rules() -> Self {
        let mut grammar = Self::new();
        for (name, group, pattern, handler) in STANDARD_RULES {
            if let Err(err) = grammar.add_rule(name, *group, pattern, *handler) {
                error!("grammar rule {name} is invalid: {err}");
            }
        }
        grammar
    }

    /// Add a rule at the end of its priority group.
    ///
    /// The pattern uses the placeholder notation described in the module docs.
    pub fn add_rule(
        &mut self,
        name: &'static str,
        group: RuleGroup,
        pattern: &str,
        handler: RuleHandler,
    ) -> Result<(), regex::Error> {
        let regex = Regex::new(&expand_pattern(pattern))?;
        let position = self
            .rules
            .iter()
            .position(|rule| rule.group > group)
            .unwrap_or(self.rules.len());
        self.rules.insert(
            position,
            GrammarRule {
                name,
                group,
                regex,
                handler,
            },
        );
        Ok(())
    }

    /// Resolve a line to an action; first matching rule wins
    pub fn recognize(&self, line: &str) -> Option<ActionDetails> {
        self.rules.iter().find_map(|rule| rule.apply(line))
    }

    /// Name of the rule that recognizes `line`, if any
    pub fn matching_rule(&self, line: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.apply(line).is_some())
            .map(|rule| rule.name)
    }

    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }
}

fn player(caps: &Captures<'_>) -> Option<String> {
    caps.name("player")
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

fn amount(caps: &Captures<'_>, group: &str) -> Option<Amount> {
    caps.name(group).and_then(|m| parse_amount(m.as_str()))
}

fn reason(caps: &Captures<'_>) -> Option<String> {
    caps.name("reason").map(|m| m.as_str().trim().to_string())
}

fn cards(caps: &Captures<'_>) -> Option<Vec<Card>> {
    caps.name("cards").and_then(|m| parse_cards(m.as_str()).ok())
}

fn with_amount(kind: ActionType, caps: &Captures<'_>, group: &str) -> Option<ActionDetails> {
    Some(
        ActionDetails::new(kind)
            .player(player(caps)?)
            .amount(amount(caps, group)?),
    )
}

fn system(kind: ActionType, caps: &Captures<'_>) -> Option<ActionDetails> {
    Some(ActionDetails::new(kind).player(player(caps)?).reason(reason(caps)))
}

fn on_raise_all_in(caps: &Captures<'_>) -> Option<ActionDetails> {
    on_raise(caps).map(ActionDetails::all_in)
}

fn on_call_all_in(caps: &Captures<'_>) -> Option<ActionDetails> {
    on_call(caps).map(ActionDetails::all_in)
}

fn on_bet_all_in(caps: &Captures<'_>) -> Option<ActionDetails> {
    on_bet(caps).map(ActionDetails::all_in)
}

fn on_muck(caps: &Captures<'_>) -> Option<ActionDetails> {
    let reason = reason(caps).filter(|r| r != "mucks hand");
    Some(
        ActionDetails::new(ActionType::Muck)
            .player(player(caps)?)
            .reason(reason),
    )
}

fn on_timeout(caps: &Captures<'_>) -> Option<ActionDetails> {
    system(ActionType::Timeout, caps)
}

fn on_disconnect(caps: &Captures<'_>) -> Option<ActionDetails> {
    system(ActionType::Disconnect, caps)
}

fn on_reconnect(caps: &Captures<'_>) -> Option<ActionDetails> {
    system(ActionType::Reconnect, caps)
}

fn on_sitout(caps: &Captures<'_>) -> Option<ActionDetails> {
    system(ActionType::Sitout, caps)
}

fn on_return(caps: &Captures<'_>) -> Option<ActionDetails> {
    system(ActionType::Return, caps)
}

fn on_fold(caps: &Captures<'_>) -> Option<ActionDetails> {
    let details = ActionDetails::new(ActionType::Fold).player(player(caps)?);
    Some(match cards(caps) {
        Some(shown) => details.cards(shown),
        None => details,
    })
}

fn on_check(caps: &Captures<'_>) -> Option<ActionDetails> {
    Some(ActionDetails::new(ActionType::Check).player(player(caps)?))
}

fn on_call(caps: &Captures<'_>) -> Option<ActionDetails> {
    with_amount(ActionType::Call, caps, "amount")
}

fn on_bet(caps: &Captures<'_>) -> Option<ActionDetails> {
    with_amount(ActionType::Bet, caps, "amount")
}

fn on_raise(caps: &Captures<'_>) -> Option<ActionDetails> {
    with_amount(ActionType::Raise, caps, "total")
}

fn on_uncalled(caps: &Captures<'_>) -> Option<ActionDetails> {
    let returned = amount(caps, "amount")?;
    Some(
        ActionDetails::new(ActionType::Uncalled)
            .player(player(caps)?)
            .amount(returned),
    )
}

fn on_collected(caps: &Captures<'_>) -> Option<ActionDetails> {
    with_amount(ActionType::Collected, caps, "amount").map(|d| d.reason(reason(caps)))
}

fn on_show(caps: &Captures<'_>) -> Option<ActionDetails> {
    Some(
        ActionDetails::new(ActionType::Show)
            .player(player(caps)?)
            .cards(cards(caps)?)
            .reason(reason(caps)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(line: &str) -> ActionDetails {
        ActionGrammar::standard()
            .recognize(line)
            .unwrap_or_else(|| panic!("no rule matched '{line}'"))
    }

    #[test]
    fn test_call_all_in() {
        let action = recognize("Player1: calls $200 and is all-in");
        assert_eq!(action.kind, ActionType::Call);
        assert_eq!(action.player.as_deref(), Some("Player1"));
        assert_eq!(action.amount, Some(200.0));
        assert!(action.is_all_in);
    }

    #[test]
    fn test_raise_records_total() {
        let action = recognize("Player5: raises $25 to $75");
        assert_eq!(action.kind, ActionType::Raise);
        assert_eq!(action.amount, Some(75.0));
        assert!(!action.is_all_in);

        let action = recognize("Alice: raises $48 to $50 and is all-in");
        assert_eq!(action.amount, Some(50.0));
        assert!(action.is_all_in);
    }

    #[test]
    fn test_uncalled_reversed_captures() {
        let action = recognize("Uncalled bet ($25) returned to Player 3");
        assert_eq!(action.kind, ActionType::Uncalled);
        assert_eq!(action.player.as_deref(), Some("Player 3"));
        assert_eq!(action.amount, Some(25.0));
    }

    #[test]
    fn test_collected_keeps_pot_phrase() {
        let action = recognize("Bob collected $80 from side pot-1");
        assert_eq!(action.kind, ActionType::Collected);
        assert_eq!(action.amount, Some(80.0));
        assert_eq!(action.reason.as_deref(), Some("side pot-1"));

        let action = recognize("Hero collected $0.53 from pot");
        assert_eq!(action.reason.as_deref(), Some("pot"));
    }

    #[test]
    fn test_special_actions() {
        let action = recognize("Grace has timed out while disconnected");
        assert_eq!(action.kind, ActionType::Timeout);
        assert_eq!(action.reason.as_deref(), Some("while disconnected"));
        assert_eq!(action.amount, None);

        assert_eq!(recognize("Erin is disconnected").kind, ActionType::Disconnect);
        assert_eq!(recognize("Erin is connected").kind, ActionType::Reconnect);
        assert_eq!(recognize("Erin has reconnected").kind, ActionType::Reconnect);
        assert_eq!(recognize("Grace is sitting out").kind, ActionType::Sitout);
        assert_eq!(recognize("Grace: sits out").kind, ActionType::Sitout);
        assert_eq!(recognize("Grace has returned").kind, ActionType::Return);

        let muck = recognize("Player3: doesn't show hand");
        assert_eq!(muck.kind, ActionType::Muck);
        assert_eq!(muck.reason.as_deref(), Some("doesn't show hand"));
        assert_eq!(recognize("Player3: mucks hand").reason, None);
    }

    #[test]
    fn test_standard_actions() {
        assert_eq!(recognize("Player4: folds").kind, ActionType::Fold);
        assert_eq!(recognize("Player1: checks").kind, ActionType::Check);
        assert_eq!(recognize("Player1: calls $5").amount, Some(5.0));
        assert_eq!(recognize("Player3: bets $1,000").amount, Some(1000.0));

        let shown = recognize("Player2: folds [Ks 9d]");
        assert_eq!(shown.cards.map(|c| c.len()), Some(2));

        let show = recognize("Alice: shows [Qs Qh] (a pair of Queens)");
        assert_eq!(show.kind, ActionType::Show);
        assert_eq!(show.cards.map(|c| c.len()), Some(2));
        assert_eq!(show.reason.as_deref(), Some("a pair of Queens"));
    }

    #[test]
    fn test_names_with_spaces_and_colons() {
        let action = recognize("Mr: Big Stack: bets $10");
        assert_eq!(action.player.as_deref(), Some("Mr: Big Stack"));
        let action = recognize("Big Stack 99: calls $10");
        assert_eq!(action.player.as_deref(), Some("Big Stack 99"));
    }

    #[test]
    fn test_unrecognized_lines() {
        let grammar = ActionGrammar::standard();
        assert!(grammar.recognize("Dave said, \"gl\"").is_none());
        assert!(grammar
            .recognize("Player3 will be allowed to play after the button")
            .is_none());
        assert!(grammar.recognize("").is_none());
    }

    #[test]
    fn test_priority_order() {
        let grammar = ActionGrammar::standard();
        assert_eq!(
            grammar.matching_rule("Player1: calls $200 and is all-in"),
            Some("call_all_in")
        );
        let groups: Vec<_> = grammar.rules().iter().map(|r| r.group()).collect();
        let mut sorted = groups.clone();
        sorted.sort();
        assert_eq!(groups, sorted);
    }

    fn on_straddle(caps: &Captures<'_>) -> Option<ActionDetails> {
        with_amount(ActionType::Bet, caps, "amount").map(|d| d.reason(Some("straddle".into())))
    }

    #[test]
    fn test_add_rule_respects_groups() {
        let mut grammar = ActionGrammar::standard_rules();
        grammar
            .add_rule(
                "straddle",
                RuleGroup::Special,
                r"^{player}: straddles {amount}$",
                on_straddle,
            )
            .unwrap();

        let names: Vec<_> = grammar.rules().iter().map(|r| r.name()).collect();
        let straddle = names.iter().position(|n| *n == "straddle").unwrap();
        let fold = names.iter().position(|n| *n == "fold").unwrap();
        let ret = names.iter().position(|n| *n == "return").unwrap();
        assert!(straddle > ret && straddle < fold);

        let action = grammar.recognize("Hero: straddles $4").unwrap();
        assert_eq!(action.reason.as_deref(), Some("straddle"));
    }

    #[test]
    fn test_standard_rules_all_compile() {
        let grammar = ActionGrammar::standard_rules();
        let names: Vec<_> = grammar.rules().iter().map(|r| r.name()).collect();
        let expected: Vec<_> = STANDARD_RULES.iter().map(|(name, ..)| *name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_expansion_keeps_literal_groups() {
        let expanded = expand_pattern(r"^{player}: (?P<reason>mucks hand)$");
        assert!(expanded.contains("(?P<reason>mucks hand)"));
        assert!(Regex::new(&expanded).is_ok());

        let expanded = expand_pattern(r"^{player} has timed out{reason}$");
        let caps = Regex::new(&expanded)
            .unwrap()
            .captures("Frank has timed out while disconnected")
            .unwrap();
        assert_eq!(&caps["player"], "Frank");
        assert_eq!(&caps["reason"], "while disconnected");
    }

    #[test]
    fn test_invalid_rule_pattern() {
        let mut grammar = ActionGrammar::new();
        assert!(grammar
            .add_rule("broken", RuleGroup::Standard, r"^({player}", on_check)
            .is_err());
    }
}
