//! Tests for one game shared between threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use strictly_2048::{Board, Direction};
use strictly_2048_cli::SharedGame;

#[test]
fn test_concurrent_moves_keep_board_valid() {
    let game = SharedGame::new(4, Some(2024));
    let notified = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notified);
    game.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let handles: Vec<_> = Direction::ALL
        .into_iter()
        .map(|direction| {
            let game = game.clone();
            thread::spawn(move || (0..50).filter(|_| game.make_move(direction)).count())
        })
        .collect();
    let changed: usize = handles
        .into_iter()
        .map(|h| h.join().expect("Worker panicked"))
        .sum();

    assert_eq!(notified.load(Ordering::SeqCst), changed);

    let snapshot = game.status();
    let board = Board::from_rows(snapshot.board.clone()).expect("Board stays valid");
    // Every changing move spawns exactly one tile.
    let sum: u64 = board.cells().iter().sum();
    assert!(sum >= 4 + 2 * changed as u64);
    assert!(sum <= 8 + 4 * changed as u64);
}

#[test]
fn test_reset_while_reading() {
    let game = SharedGame::new(3, Some(8));
    let reader = {
        let game = game.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                let snapshot = game.status();
                assert_eq!(snapshot.size, 3);
                assert_eq!(snapshot.board.len(), 3);
            }
        })
    };
    for _ in 0..10 {
        game.reset();
    }
    reader.join().expect("Reader panicked");
    assert_eq!(game.generation(), 10);
}
