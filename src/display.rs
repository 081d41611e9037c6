use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_negamax::{Cell, GameState};

/// Draws the board with coloured discs, column numbers on top
pub fn draw(state: &GameState) -> Result<()> {
    let mut stdout = stdout();

    let columns: String = (1..=state.width()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(columns + "\n")))?;

    for row in (0..state.height()).rev() {
        for column in 0..state.width() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match state.cell_at(row, column) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
