//! Tests for the automated move heuristic.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictac_core::{Board, GameError, Player, Tier, select_move};

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

#[test]
fn test_win_now_completes_row() {
    // O O _ / X X _ / _ _ _, O to move: 2 wins for O.
    let b = board("OO. XX. ...");
    let sel = select_move(&b, Player::O, &mut rng()).unwrap();
    assert_eq!(*sel.position(), 2);
    assert_eq!(*sel.tier(), Tier::WinNow);
}

#[test]
fn test_win_beats_block() {
    // O can win at 2, X threatens 5: winning takes priority.
    let b = board("OO. XX. X..");
    let sel = select_move(&b, Player::O, &mut rng()).unwrap();
    assert_eq!(*sel.position(), 2);
    assert_eq!(*sel.tier(), Tier::WinNow);
}

#[test]
fn test_block_opponent_row() {
    let b = board("XX. ... ...");
    let sel = select_move(&b, Player::O, &mut rng()).unwrap();
    assert_eq!(*sel.position(), 2);
    assert_eq!(*sel.tier(), Tier::Block);
}

#[test]
fn test_block_picks_lowest_threat() {
    // X threatens 2 (row 0) and 6 (column 0).
    let b = board("XX. XO. ..O");
    let sel = select_move(&b, Player::O, &mut rng()).unwrap();
    assert_eq!(*sel.position(), 2);
    assert_eq!(*sel.tier(), Tier::Block);
}

#[test]
fn test_random_tier_picks_an_empty_cell() {
    let b = board("... .X. ...");
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sel = select_move(&b, Player::O, &mut rng).unwrap();
        assert_eq!(*sel.tier(), Tier::Random);
        assert_ne!(*sel.position(), 4);
        assert!(b.is_empty(*sel.position()));
    }
}

#[test]
fn test_random_tier_reaches_every_empty_cell() {
    let b = board("... .X. ...");
    let mut seen = [false; 9];
    let mut rng = rng();
    for _ in 0..500 {
        seen[*select_move(&b, Player::O, &mut rng).unwrap().position()] = true;
    }
    let expected: Vec<bool> = (0..9).map(|i| i != 4).collect();
    assert_eq!(seen.to_vec(), expected);
}

#[test]
fn test_search_does_not_mutate_board() {
    for text in ["OO. XX. ...", "XX. ... ...", "... .X. ..."] {
        let b = board(text);
        let before = b;
        let _ = select_move(&b, Player::O, &mut rng()).unwrap();
        assert_eq!(b, before, "board changed while searching {text}");
    }
}

#[test]
fn test_terminal_board_rejected() {
    let won = board("XXX OO. ...");
    assert_eq!(
        select_move(&won, Player::O, &mut rng()),
        Err(GameError::GameAlreadyOver)
    );

    let drawn = board("XOX XOO OXX");
    assert_eq!(
        select_move(&drawn, Player::X, &mut rng()),
        Err(GameError::GameAlreadyOver)
    );
}
