//! Hand parser state machine
//!
//!     The engine walks the tokenized lines once, front to back, through a fixed sequence of
//!     stages. No stage ever moves the cursor backwards:
//!
//!         Header      hand id (required), tournament id, game, stakes, timestamp (required)
//!         Table       name, max seats, button seat (required line)
//!         Seats       one player per seat line (at least one required)
//!         Postings    blinds and antes
//!         Hole cards  optional "Dealt to" block naming the hero
//!         Streets     actions, interrupted by flop/turn/river/showdown markers
//!         Summary     totals, rake, board and seat results
//!
//!     Street markers may only move forward. Each one resets the per-street commitments, and
//!     the board markers record a `deal` action: all three cards on the flop, only the newly
//!     revealed card on the turn and river.
//!
//!     Lines inside the streets are resolved by the [grammar](super::grammar). Chip movement
//!     goes through a [tracker](crate::history::tracking::PlayerStateTracker) that belongs to
//!     the call, so a [`HandParser`] holds no mutable state and one instance can serve many
//!     threads. Once the lines are consumed the pots are built from the final contributions,
//!     reconciled against the collected amounts and published net of rake.
//!
//! Dialects
//!
//!     Sites that share the line grammar differ mostly in their header. A [`Dialect`] names the
//!     format and says how the hand id is written; everything else is common.

use super::amounts::{approx_eq, blinds_from_stakes, parse_amount, AMOUNT_PATTERN};
use super::grammar::ActionGrammar;
use super::summary::{apply_summary, parse_summary, Summary};
use super::{ParserError, ParserResult};
use crate::history::ast::{
    parse_cards, ActionDetails, ActionLog, ActionType, Amount, BlindKind, Card, CollectedAction,
    Player, PokerHand, Street, TableInfo, HOLE_CARD_COUNT,
};
use crate::history::config::{HandHistoryConfig, ParserConfig};
use crate::history::formats::FormatTag;
use crate::history::lexing::{tokenize, Cursor, Line};
use crate::history::settlement::{
    apply_rake, build_pots, enhance_pots, pot_target, validate_pot_math_within,
};
use crate::history::tracking::PlayerStateTracker;
use crate::history::validation;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static POKERSTARS_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"PokerStars (?:Zoom |Home Game )?(?:Hand|Game) #(?P<id>\d+):").unwrap()
});
static GGPOKER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Poker Hand #(?P<id>[A-Z]*\d+):").unwrap());

static TOURNAMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"Tournament #(?P<id>\d+)").unwrap());
static STAKES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((?P<stakes>[^()]*?/[^()]*?)\)").unwrap());
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}/\d{1,2}/\d{1,2} \d{1,2}:\d{2}:\d{2}(?: [A-Z]{2,4}\b)?").unwrap()
});
static GAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r":\s+(?:Tournament #\d+,\s+(?:[^ ]+\s+)?(?:[A-Z]{3}\s+)?)?(?P<game>[^(\-]+?)\s*[(\-]",
    )
    .unwrap()
});
static TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^Table '(?P<name>[^']*)'(?:\s+(?P<max>\d+)-max)?(?:\s+\([^)]*\))?(?:\s+Seat #(?P<button>\d+) is the button)?",
    )
    .unwrap()
});
static SEAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^Seat (?P<seat>\d+): (?P<name>.+?) \((?P<chips>{AMOUNT_PATTERN}) in chips(?:,[^)]*)?\)(?P<rest>.*)$"
    ))
    .unwrap()
});
static POSTING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<player>.+?): posts (?P<kind>small & big blinds|small blind|big blind|dead blind|straddle|the ante|ante) (?P<amount>{AMOUNT_PATTERN})(?P<all_in> and is all-in)?$"
    ))
    .unwrap()
});
static HOLE_CARDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\*\* HOLE CARDS \*\*\*").unwrap());
static DEALT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Dealt to (?P<player>.+?)(?:\s+\[(?P<cards>[^\]]*)\])?$").unwrap()
});
static STREET_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*\* (?P<street>FLOP|TURN|RIVER|SHOW ?DOWN|SUMMARY) \*\*\*").unwrap()
});
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(?P<cards>[^\]]*)\]").unwrap());

/// How one site writes its header
#[derive(Debug, Clone)]
pub struct Dialect {
    tag: FormatTag,
    hand_id: Regex,
}

impl Dialect {
    /// A dialect whose hand id is captured by the `id` group of `hand_id`
    pub fn new(tag: FormatTag, hand_id: Regex) -> Self {
        Self { tag, hand_id }
    }

    pub fn pokerstars() -> Self {
        Self::new(FormatTag::POKERSTARS, POKERSTARS_ID.clone())
    }

    pub fn ggpoker() -> Self {
        Self::new(FormatTag::GGPOKER, GGPOKER_ID.clone())
    }

    pub fn tag(&self) -> &FormatTag {
        &self.tag
    }

    /// Whether a line opens a hand in this dialect
    pub fn is_header(&self, line: &str) -> bool {
        self.hand_id.is_match(line)
    }

    /// Whether any line of `raw` opens a hand in this dialect
    pub fn recognizes(&self, raw: &str) -> bool {
        raw.lines().any(|line| self.is_header(line.trim()))
    }

    fn hand_id<'t>(&self, line: &'t str) -> Option<&'t str> {
        self.hand_id
            .captures(line)
            .and_then(|caps| caps.name("id"))
            .map(|m| m.as_str())
    }
}

/// Header line contents
#[derive(Debug, Clone, PartialEq)]
struct Header {
    id: String,
    tournament_id: Option<String>,
    game: Option<String>,
    stakes: String,
    date: String,
}

/// Parses one hand at a time. Holds configuration only; every call gets fresh state.
#[derive(Debug, Clone)]
pub struct HandParser {
    dialect: Dialect,
    grammar: ActionGrammar,
    config: ParserConfig,
    tolerance: Amount,
}

impl HandParser {
    pub fn new(dialect: Dialect) -> Self {
        let defaults = HandHistoryConfig::default();
        Self {
            dialect,
            grammar: ActionGrammar::standard().clone(),
            config: defaults.parser,
            tolerance: defaults.settlement.tolerance,
        }
    }

    pub fn with_config(mut self, config: &HandHistoryConfig) -> Self {
        self.config = config.parser.clone();
        self.tolerance = config.settlement.tolerance;
        self
    }

    /// Replace the action grammar, e.g. with one extended by site-specific rules
    pub fn with_grammar(mut self, grammar: ActionGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn grammar(&self) -> &ActionGrammar {
        &self.grammar
    }

    pub fn parse(&self, raw: &str) -> ParserResult {
        let lines = tokenize(raw);
        self.parse_lines(&lines)
    }

    /// Run the state machine over already tokenized lines
    pub fn parse_lines(&self, lines: &[Line]) -> ParserResult {
        let mut cursor = Cursor::new(lines);
        let header = self.parse_header(&mut cursor)?;
        let table = self.parse_table(&mut cursor)?;

        let mut hand = HandState::new(self, blinds_from_stakes(&header.stakes).map(|(_, bb)| bb));
        hand.parse_seats(&mut cursor)?;
        hand.parse_postings(&mut cursor);
        hand.parse_hole_cards(&mut cursor);
        hand.parse_streets(&mut cursor)?;
        let summary = parse_summary(&mut cursor, &hand.players);
        hand.finish(header, table, summary, &cursor)
    }

    fn parse_header(&self, cursor: &mut Cursor<'_>) -> Result<Header, ParserError> {
        let line = cursor.expect_line("hand header")?;
        let text = line.text.as_str();
        let id = self
            .dialect
            .hand_id(text)
            .ok_or_else(|| ParserError::at("Missing hand id", line))?;
        let date = TIMESTAMP
            .find(text)
            .ok_or_else(|| ParserError::at("Missing timestamp", line))?;

        let header = Header {
            id: id.to_string(),
            tournament_id: TOURNAMENT.captures(text).map(|c| c["id"].to_string()),
            game: GAME.captures(text).map(|c| c["game"].trim().to_string()),
            stakes: STAKES
                .captures(text)
                .map(|c| c["stakes"].trim().to_string())
                .unwrap_or_default(),
            date: date.as_str().to_string(),
        };
        debug!("hand {}: header parsed", header.id);
        cursor.advance();
        Ok(header)
    }

    fn parse_table(&self, cursor: &mut Cursor<'_>) -> Result<TableInfo, ParserError> {
        let line = cursor.expect_line("table line")?;
        let caps = TABLE
            .captures(&line.text)
            .ok_or_else(|| ParserError::at("Missing table information", line))?;
        let max_seats = caps
            .name("max")
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(self.config.default_max_seats);
        let button_seat = caps
            .name("button")
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(self.config.default_button_seat);
        let table = TableInfo::new(&caps["name"], max_seats, button_seat);
        cursor.advance();
        Ok(table)
    }
}

/// Everything one parse call owns
struct HandState<'p> {
    parser: &'p HandParser,
    big_blind: Option<Amount>,
    street: Street,
    players: Vec<Player>,
    tracker: PlayerStateTracker,
    log: ActionLog,
    board: Vec<Card>,
    collected: Vec<CollectedAction>,
}

impl<'p> HandState<'p> {
    fn new(parser: &'p HandParser, big_blind: Option<Amount>) -> Self {
        Self {
            parser,
            big_blind,
            street: Street::Preflop,
            players: Vec::new(),
            tracker: PlayerStateTracker::new(),
            log: ActionLog::new(),
            board: Vec::new(),
            collected: Vec::new(),
        }
    }

    fn parse_seats(&mut self, cursor: &mut Cursor<'_>) -> Result<(), ParserError> {
        while let Some(line) = cursor.current_line() {
            let Some(caps) = SEAT.captures(&line.text) else {
                break;
            };
            let seat: u8 = caps["seat"]
                .parse()
                .map_err(|_| ParserError::at("Invalid seat number", line))?;
            let chips = parse_amount(&caps["chips"])
                .ok_or_else(|| ParserError::at("Invalid chip count", line))?;
            let mut player = Player::new(seat, caps["name"].trim(), chips);
            player.sitting_out = caps["rest"].contains("is sitting out");

            self.tracker.initialize_player(&player.name, chips);
            self.players.push(player);
            cursor.advance();
        }

        if self.players.is_empty() {
            return Err(match cursor.current_line() {
                Some(line) => ParserError::at("No players found", line),
                None => ParserError::end_of_input("No players found", cursor),
            });
        }
        debug!("{} players seated", self.players.len());
        Ok(())
    }

    fn parse_postings(&mut self, cursor: &mut Cursor<'_>) {
        while let Some(line) = cursor.current_line() {
            if let Some(posting) = posting(&line.text) {
                self.record(posting, line);
            } else {
                match self.parser.grammar.recognize(&line.text) {
                    Some(details) if details.kind.is_system() => self.record(details, line),
                    _ => break,
                }
            }
            cursor.advance();
        }
    }

    fn parse_hole_cards(&mut self, cursor: &mut Cursor<'_>) {
        let Some(line) = cursor.current_line() else {
            return;
        };
        if !HOLE_CARDS.is_match(&line.text) {
            return;
        }
        cursor.advance();
        while let Some(line) = cursor.current_line() {
            if !self.dealt(line) {
                break;
            }
            cursor.advance();
        }
    }

    /// Handle a "Dealt to" line; returns false for any other line
    fn dealt(&mut self, line: &Line) -> bool {
        let Some(caps) = DEALT.captures(&line.text) else {
            return false;
        };
        let Some(cards) = caps.name("cards") else {
            return true;
        };
        let cards = match parse_cards(cards.as_str()) {
            Ok(cards) => cards,
            Err(err) => {
                warn!("line {}: unreadable hole cards: {err}", line.number);
                return true;
            }
        };
        if cards.len() != HOLE_CARD_COUNT {
            warn!(
                "line {}: expected {HOLE_CARD_COUNT} hole cards, found {}",
                line.number,
                cards.len()
            );
            return true;
        }
        let name = caps["player"].trim();
        let has_hero = self.players.iter().any(|p| p.is_hero);
        match self.players.iter_mut().find(|p| p.name == name) {
            Some(player) => {
                player.is_hero = player.is_hero || !has_hero;
                player.hole_cards = Some(cards);
            }
            None => warn!("line {}: cards dealt to unseated player {name}", line.number),
        }
        true
    }

    fn parse_streets(&mut self, cursor: &mut Cursor<'_>) -> Result<(), ParserError> {
        while let Some(line) = cursor.current_line() {
            if let Some(caps) = STREET_MARKER.captures(&line.text) {
                let street = match &caps["street"] {
                    "FLOP" => Street::Flop,
                    "TURN" => Street::Turn,
                    "RIVER" => Street::River,
                    "SUMMARY" => break,
                    _ => Street::Showdown,
                };
                self.enter_street(street, line)?;
            } else if let Some(posting) = posting(&line.text) {
                self.record(posting, line);
            } else if let Some(details) = self.parser.grammar.recognize(&line.text) {
                self.record(details, line);
            } else if !self.dealt(line) {
                debug!("line {}: skipped '{}'", line.number, line.text);
            }
            cursor.advance();
        }
        Ok(())
    }

    fn enter_street(&mut self, street: Street, line: &Line) -> Result<(), ParserError> {
        if street <= self.street {
            return Err(ParserError::at("Unexpected street marker", line));
        }
        debug!("line {}: entering {street}", line.number);
        self.street = street;
        self.tracker.start_street();
        if street == Street::Showdown {
            return Ok(());
        }

        let groups: Vec<&str> = BRACKETS
            .captures_iter(&line.text)
            .filter_map(|c| c.name("cards").map(|m| m.as_str()))
            .collect();
        let dealt = match street {
            Street::Flop => groups.first().copied(),
            _ => groups.last().copied(),
        }
        .ok_or_else(|| ParserError::at("Missing board cards", line))?;
        let mut cards = parse_cards(dealt)
            .map_err(|err| ParserError::at(format!("Invalid board cards: {err}"), line))?;
        if street != Street::Flop {
            cards = cards.split_off(cards.len().saturating_sub(1));
        }
        if cards.is_empty() {
            return Err(ParserError::at("Missing board cards", line));
        }

        self.board.extend(cards.iter().copied());
        self.log
            .push(street, ActionDetails::new(ActionType::Deal).cards(cards));
        Ok(())
    }

    /// Apply an action to the chip state and append it to the log
    fn record(&mut self, mut details: ActionDetails, line: &Line) {
        if let Some(name) = details.player.as_deref() {
            if !self.tracker.contains(name) {
                warn!(
                    "line {}: dropping {} by unseated player {name}",
                    line.number, details.kind
                );
                return;
            }
        }

        let all_in = self.tracker.apply(&details, self.big_blind);
        if details.kind.is_contribution() && all_in {
            details.is_all_in = true;
        }

        if let (Some(name), Some(amount)) = (details.player.as_deref(), details.amount) {
            if details.kind == ActionType::Collected {
                let (pot_type, level) = pot_target(details.reason.as_deref());
                self.collected
                    .push(CollectedAction::new(name, amount, pot_type, level));
            }
        }
        if let (ActionType::Show, Some(name), Some(cards)) =
            (details.kind, details.player.as_deref(), details.cards.as_ref())
        {
            if let Some(player) = self.players.iter_mut().find(|p| p.name == name) {
                if !player.reveal_hole_cards(cards) {
                    warn!("{name} shows {} cards, not a hole hand", cards.len());
                }
            }
        }

        self.log.push(self.street, details);
    }

    fn finish(
        mut self,
        header: Header,
        table: TableInfo,
        summary: Summary,
        cursor: &Cursor<'_>,
    ) -> ParserResult {
        let tolerance = self.parser.tolerance;
        apply_summary(&summary, &mut self.players, &mut self.collected, tolerance);
        if !summary.board.is_empty() && summary.board != self.board {
            warn!("hand {}: summary board differs from dealt cards", header.id);
        }

        for player in &mut self.players {
            player.all_in_amount = self.tracker.all_in_amount(&player.name);
            if player.position.is_none() && player.seat == table.button_seat {
                player.position = Some("BTN".to_string());
            }
        }

        let mut pots = build_pots(
            &self.tracker.contributions(),
            &self.tracker.all_in_players(),
            &self.tracker.active_players(),
        );
        let contributed = self.tracker.total_contributed();
        if let Some(total) = summary.total_pot {
            if !approx_eq(total, contributed, tolerance) {
                warn!(
                    "hand {}: summary total {total} differs from contributions {contributed}",
                    header.id
                );
            }
        }

        if self.collected.is_empty() {
            warn!("hand {}: no collections to reconcile pots against", header.id);
        } else if self.parser.config.reconcile_pots {
            validate_pot_math_within(&pots, &self.collected, summary.rake, tolerance).map_err(
                |err| {
                    let message = format!("Pot reconciliation failed: {err}");
                    match cursor.last_line() {
                        Some(line) => ParserError::at(message, line),
                        None => ParserError::end_of_input(message, cursor),
                    }
                },
            )?;
        }
        if let Some(rake) = summary.rake {
            apply_rake(&mut pots, rake);
        }
        enhance_pots(&mut pots, &self.collected);

        let hand = PokerHand {
            id: header.id,
            format: self.parser.dialect.tag().clone(),
            tournament_id: header.tournament_id,
            game: header.game,
            stakes: header.stakes,
            date: header.date,
            table,
            players: self.players,
            actions: self.log.into_vec(),
            board: self.board,
            pots,
            total_pot: summary.total_pot,
            rake: summary.rake,
        };

        let report = validation::validate(&hand);
        for error in &report.errors {
            warn!("hand {}: {error}", hand.id);
        }
        Ok(hand)
    }
}

/// A blind or ante posting line
fn posting(text: &str) -> Option<ActionDetails> {
    let caps = POSTING.captures(text)?;
    let kind = match &caps["kind"] {
        "small blind" => ActionType::Blind(BlindKind::Small),
        "big blind" => ActionType::Blind(BlindKind::Big),
        "small & big blinds" => ActionType::Blind(BlindKind::Combined),
        "dead blind" => ActionType::Blind(BlindKind::Dead),
        "straddle" => ActionType::Blind(BlindKind::Straddle),
        _ => ActionType::Ante,
    };
    let details = ActionDetails::new(kind)
        .player(caps["player"].trim())
        .amount(parse_amount(&caps["amount"])?);
    Some(match caps.name("all_in") {
        Some(_) => details.all_in(),
        None => details,
    })
}
