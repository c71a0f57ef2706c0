//! Curated hand histories
//!
//! Each sample is a complete, internally consistent hand: contributions, collections and the
//! summary agree. Edit with care; the integration tests pin their parsed shape.

/// Four-handed cash game won without showdown, raked
pub const CASH_GAME: &str = "\
PokerStars Hand #245678901234:  Hold'em No Limit ($1/$2 USD) - 2024/01/15 20:30:00 ET
Table 'Alpha III' 6-max Seat #3 is the button
Seat 1: Player1 ($200 in chips)
Seat 2: Player2 ($150 in chips)
Seat 3: Player3 ($300 in chips)
Seat 4: Player4 ($120.50 in chips)
Player4: posts small blind $1
Player1: posts big blind $2
*** HOLE CARDS ***
Dealt to Player3 [Ah Kd]
Player2: folds
Player3: raises $4 to $6
Player4: folds
Player1: calls $4
*** FLOP *** [2c 7d Jh]
Player1: checks
Player3: bets $10
Player1: calls $10
*** TURN *** [2c 7d Jh] [Qs]
Player1: checks
Player3: bets $25
Player1: folds
Uncalled bet ($25) returned to Player3
Player3 collected $32 from pot
Player3: doesn't show hand
*** SUMMARY ***
Total pot $33 | Rake $1
Board [2c 7d Jh Qs]
Seat 1: Player1 (big blind) folded on the Turn
Seat 2: Player2 folded before Flop (didn't bet)
Seat 3: Player3 (button) collected ($32)
Seat 4: Player4 (small blind) folded before Flop
";

/// Short stack all-in preflop; a folded player's money stays in the side pot
pub const ALL_IN_SIDE_POT: &str = "\
PokerStars Hand #245678901235:  Hold'em No Limit ($1/$2 USD) - 2024/01/15 20:45:00 ET
Table 'Alpha III' 6-max Seat #1 is the button
Seat 1: Alice ($50 in chips)
Seat 2: Bob ($200 in chips)
Seat 3: Carol ($300 in chips)
Bob: posts small blind $1
Carol: posts big blind $2
*** HOLE CARDS ***
Alice: raises $48 to $50 and is all-in
Bob: calls $49
Carol: calls $48
*** FLOP *** [2c 7d Jh]
Bob: bets $40
Carol: calls $40
*** TURN *** [2c 7d Jh] [9s]
Bob: bets $100
Carol: folds
Uncalled bet ($100) returned to Bob
*** RIVER *** [2c 7d Jh 9s] [3d]
*** SHOW DOWN ***
Bob: shows [Ac Kc] (high card Ace)
Alice: shows [Qs Qh] (a pair of Queens)
Bob collected $80 from side pot
Alice collected $148 from main pot
*** SUMMARY ***
Total pot $230 Main pot $148. Side pot $80. | Rake $2
Board [2c 7d Jh 9s 3d]
Seat 1: Alice (button) showed [Qs Qh] and won ($148) with a pair of Queens
Seat 2: Bob (small blind) showed [Ac Kc] and won ($80) with high card Ace
Seat 3: Carol (big blind) folded on the Turn
";

/// Two identical straights share an odd-sized pot
pub const SPLIT_POT: &str = "\
PokerStars Hand #245678901236:  Hold'em No Limit ($1/$2 USD) - 2024/01/15 20:50:00 ET
Table 'Alpha III' 6-max Seat #3 is the button
Seat 1: Player1 ($200 in chips)
Seat 2: Player2 ($200 in chips)
Seat 3: Player3 ($200 in chips)
Player1: posts small blind $1
Player2: posts big blind $2
*** HOLE CARDS ***
Player3: raises $48 to $50
Player1: folds
Player2: calls $48
*** FLOP *** [Th Jd Qc]
Player2: checks
Player3: checks
*** TURN *** [Th Jd Qc] [2s]
Player2: checks
Player3: checks
*** RIVER *** [Th Jd Qc 2s] [3h]
Player2: checks
Player3: checks
*** SHOW DOWN ***
Player2: shows [Ks 9d] (a straight, Nine to King)
Player3: shows [Kh 9c] (a straight, Nine to King)
Player2 collected $51 from pot
Player3 collected $50 from pot
*** SUMMARY ***
Total pot $101 | Rake $0
Board [Th Jd Qc 2s 3h]
Seat 1: Player1 (small blind) folded before Flop
Seat 2: Player2 (big blind) showed [Ks 9d] and won ($51) with a straight, Nine to King
Seat 3: Player3 (button) showed [Kh 9c] and won ($50) with a straight, Nine to King
";

/// Tournament hand with antes, two all-ins, three pots and table presence lines
pub const TOURNAMENT: &str = "\
PokerStars Hand #245678901237: Tournament #3456789012, $10+$1 USD Hold'em No Limit - Level V (100/200) - 2024/01/15 21:00:00 ET
Table '3456789012 7' 9-max Seat #2 is the button
Seat 1: Dave (1500 in chips)
Seat 2: Erin (800 in chips)
Seat 4: Frank (3000 in chips)
Seat 5: Grace (400 in chips)
Seat 6: Heidi (1200 in chips) is sitting out
Dave: posts the ante 25
Erin: posts the ante 25
Frank: posts the ante 25
Grace: posts the ante 25
Heidi: posts the ante 25
Frank: posts small blind 100
Grace: posts big blind 200
*** HOLE CARDS ***
Dealt to Dave [As Ad]
Heidi: folds
Dave: raises 600 to 800
Erin: calls 775 and is all-in
Frank: calls 700
Grace: calls 175 and is all-in
*** FLOP *** [Kc 8h 3s]
Frank: checks
Dave: bets 600
Erin is disconnected
Frank has timed out
Frank: folds
Uncalled bet (600) returned to Dave
*** TURN *** [Kc 8h 3s] [5d]
Erin is connected
*** RIVER *** [Kc 8h 3s 5d] [Jc]
*** SHOW DOWN ***
Erin: shows [Qd Qc] (a pair of Queens)
Grace: shows [7s 7h] (a pair of Sevens)
Dave: shows [As Ad] (a pair of Aces)
Dave said, \"gl\"
Dave collected 50 from side pot-2
Dave collected 1200 from side pot-1
Dave collected 1625 from main pot
*** SUMMARY ***
Total pot 2875 Main pot 1625. Side pot-1 1200. Side pot-2 50. | Rake 0
Board [Kc 8h 3s 5d Jc]
Seat 1: Dave showed [As Ad] and won (2875) with a pair of Aces
Seat 2: Erin (button) showed [Qd Qc] and lost with a pair of Queens
Seat 4: Frank (small blind) folded on the Flop
Seat 5: Grace (big blind) showed [7s 7h] and lost with a pair of Sevens
Seat 6: Heidi folded before Flop (didn't bet)
";

/// GGPoker cash hand with hidden opponent cards and fee extras on the total line
pub const GGPOKER: &str = "\
Poker Hand #RC1234567890: Hold'em No Limit ($0.05/$0.10) - 2024/03/02 18:22:10
Table 'RushAndCash12345' 6-max Seat #1 is the button
Seat 1: Hero ($10 in chips)
Seat 2: a1b2c3 ($12.35 in chips)
Seat 3: f00ba7 ($8.40 in chips)
a1b2c3: posts small blind $0.05
f00ba7: posts big blind $0.1
*** HOLE CARDS ***
Dealt to Hero [Ah Kd]
Dealt to a1b2c3
Dealt to f00ba7
Hero: raises $0.15 to $0.25
a1b2c3: folds
f00ba7: calls $0.15
*** FLOP *** [8h 4s 2d]
f00ba7: checks
Hero: bets $0.3
f00ba7: folds
Uncalled bet ($0.3) returned to Hero
*** SHOWDOWN ***
Hero collected $0.53 from pot
*** SUMMARY ***
Total pot $0.55 | Rake $0.02 | Jackpot $0 | Bingo $0 | Fortune $0 | Tax $0
Board [8h 4s 2d]
Seat 1: Hero (button) won ($0.53)
Seat 2: a1b2c3 (small blind) folded before Flop
Seat 3: f00ba7 (big blind) folded on the Flop
";

/// Header and table with no seat lines
pub const NO_PLAYERS: &str = "\
PokerStars Hand #245678901238:  Hold'em No Limit ($1/$2 USD) - 2024/01/15 22:00:00 ET
Table 'Alpha III' 6-max Seat #1 is the button
*** SUMMARY ***
Total pot $0 | Rake $0
";

/// Every well-formed sample, by name
pub const ALL: &[(&str, &str)] = &[
    ("cash_game", CASH_GAME),
    ("all_in_side_pot", ALL_IN_SIDE_POT),
    ("split_pot", SPLIT_POT),
    ("tournament", TOURNAMENT),
    ("ggpoker", GGPOKER),
];
