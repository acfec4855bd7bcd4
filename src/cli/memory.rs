//! Interactive memory game on the terminal

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use cyberfolio::app::App;
use cyberfolio::games::{BoardView, FlipOutcome};

use super::print_events;

const COLUMNS: usize = 4;

fn render(board: &BoardView) {
    let (cells, moves, matched, total) = board.with_game(|game| {
        let cells: Vec<String> = game
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| match card.face() {
                Some(symbol) => format!("[{:^3}]", symbol),
                None => format!("[{:>3}]", index),
            })
            .collect();
        (cells, game.moves(), game.matched_pairs(), game.total_pairs())
    });

    println!(
        "\nMOVES: {}  MATCHES: {}/{}  TIME: {}",
        moves,
        matched,
        total,
        board.clock()
    );
    for row in cells.chunks(COLUMNS) {
        println!("  {}", row.join(" "));
    }
}

/// Play until the board is cleared or the player quits
pub async fn memory_command(app: &mut App) -> Result<()> {
    print_events(&app.start_memory_game()?);
    println!("CYBER_MEMORY_MATRIX - enter a card number, 'n' for a new game, 'q' to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if let Some(board) = app.board() {
            render(board);
        }

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match line.trim() {
            "q" | "quit" => break,
            "n" | "new" => {
                app.new_memory_board()?;
                continue;
            }
            "" => continue,
            input => {
                let Ok(index) = input.parse::<usize>() else {
                    println!("Not a card number: {}", input);
                    continue;
                };

                let rewarded = app.flip_card(index)?;
                match rewarded.value {
                    FlipOutcome::Ignored => println!("Card {} cannot be flipped right now", index),
                    FlipOutcome::Mismatched { .. } => println!("No match"),
                    FlipOutcome::Matched { .. } => println!("MATCH!"),
                    FlipOutcome::Completed { moves, elapsed, .. } => {
                        if let Some(board) = app.board() {
                            render(board);
                        }
                        println!(
                            "MISSION COMPLETE! Time: {}s, Moves: {}",
                            elapsed.as_secs(),
                            moves
                        );
                        print_events(&rewarded.events);
                        break;
                    }
                    FlipOutcome::Revealed { .. } => {}
                }
            }
        }
    }

    app.close_board();
    Ok(())
}
