//! Scoring tests - tables, branches and levels

use blockfall::core::{
    drop_points, level_for_lines, line_clear_points, CommandOutcome, Piece, RoundState,
};
use blockfall::types::{Command, PieceKind, RotationState, BOARD_WIDTH};

#[test]
fn test_tetris_and_tspin_double_use_their_own_tables() {
    for level in 1..=12 {
        assert_eq!(line_clear_points(4, false, level), 1200 * level);
        assert_eq!(line_clear_points(2, true, level), 1200 * level);
        // Swapping the flag picks the other table
        assert_eq!(line_clear_points(4, true, level), 0);
        assert_eq!(line_clear_points(2, false, level), 100 * level);
    }
}

#[test]
fn test_drop_points() {
    assert_eq!(drop_points(17, true), 34);
    assert_eq!(drop_points(17, false), 17);
}

#[test]
fn test_levels_start_at_one() {
    assert_eq!(level_for_lines(0), 1);
    assert_eq!(level_for_lines(10), 2);
    assert_eq!(level_for_lines(19), 2);
}

#[test]
fn test_tetris_in_play() {
    let mut round = RoundState::with_seed(11);
    round.start();
    for y in 16..20 {
        for x in 1..BOARD_WIDTH as i8 {
            round.board_mut().set(x, y, Some(PieceKind::L));
        }
    }
    assert!(round.replace_active(Piece::new(PieceKind::I, RotationState::Right, -2, 0)));

    assert_eq!(round.apply_command(Command::HardDrop), CommandOutcome::Locked);
    let event = round.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 4);
    assert!(!event.tspin);
    assert_eq!(event.points, 1200);
    assert_eq!(round.score(), 2 * 16 + 1200);
    assert!(round.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_tspin_single_in_play() {
    let mut round = RoundState::with_seed(11);
    round.start();
    // Bottom row full except the stem hole at x=4, plus one upper corner
    for x in 0..BOARD_WIDTH as i8 {
        if x != 4 {
            round.board_mut().set(x, 19, Some(PieceKind::S));
        }
    }
    round.board_mut().set(3, 17, Some(PieceKind::S));
    assert!(round.replace_active(Piece::new(PieceKind::T, RotationState::Right, 3, 17)));

    assert_eq!(round.apply_command(Command::RotateCw), CommandOutcome::Applied);
    assert_eq!(round.apply_command(Command::HardDrop), CommandOutcome::Locked);

    let event = round.take_last_event().unwrap();
    assert!(event.tspin);
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.points, 800);
}
