use bohnen_core::{BoardView, Side, HOUSES_PER_SIDE};
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};

const CELL: usize = 4;
const MARGIN: usize = 10;

/// Terminal column under house `house` (1..=6) of the bottom row.
pub fn house_column(house: usize) -> usize {
    MARGIN + house * CELL - 1
}

/// Draws the board with `bottom`'s houses along the bottom edge, numbered left to right.
/// The opponent's houses run right to left across the top so sowing goes anticlockwise.
/// The house played last is highlighted and empty houses are dimmed.
pub fn draw_board(
    out: &mut impl Write,
    view: &BoardView,
    bottom: Side,
    newline: &str,
) -> io::Result<()> {
    let top = bottom.opponent();

    queue!(out, Print(format!("{:<width$}", side_label(view, top), width = MARGIN)))?;
    for house in (1..=HOUSES_PER_SIDE).rev() {
        queue!(out, Print(format!("{:>width$}", house, width = CELL)))?;
    }
    queue!(out, Print(newline))?;

    let store = format!("[{:>2}]", view.stores[top.index()]);
    queue!(out, Print(format!("{:<width$}", store, width = MARGIN)))?;
    draw_row(out, view, top, (1..=HOUSES_PER_SIDE).rev())?;
    queue!(out, Print(newline))?;

    queue!(out, Print(" ".repeat(MARGIN)))?;
    draw_row(out, view, bottom, 1..=HOUSES_PER_SIDE)?;
    queue!(
        out,
        Print(format!("   [{:>2}]", view.stores[bottom.index()])),
        Print(newline)
    )?;

    queue!(out, Print(format!("{:<width$}", side_label(view, bottom), width = MARGIN)))?;
    for house in 1..=HOUSES_PER_SIDE {
        queue!(out, Print(format!("{:>width$}", house, width = CELL)))?;
    }
    queue!(out, Print(newline))?;

    out.flush()
}

/// Side name, with an arrow when it is that side's turn.
fn side_label(view: &BoardView, side: Side) -> String {
    if view.turn == side && !view.finished {
        format!("{side} >")
    } else {
        side.to_string()
    }
}

fn draw_row(
    out: &mut impl Write,
    view: &BoardView,
    side: Side,
    houses: impl Iterator<Item = usize>,
) -> io::Result<()> {
    for house in houses {
        let index = side.first_house() + house - 1;
        let seeds = view.houses[index];

        if view.last_move == Some(index) {
            queue!(out, SetForegroundColor(Color::Yellow), SetAttribute(Attribute::Bold))?;
        } else if seeds == 0 {
            queue!(out, SetForegroundColor(Color::DarkGrey))?;
        }
        queue!(
            out,
            Print(format!("{:>width$}", seeds, width = CELL)),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    }
    Ok(())
}

/// One-line summary of whose turn it is or how the game ended.
pub fn status_line(view: &BoardView) -> String {
    let [first, second] = view.stores;
    if !view.finished {
        return format!("{} to move ({first}-{second})", view.turn);
    }
    match first.cmp(&second) {
        std::cmp::Ordering::Greater => format!("first wins {first}-{second}"),
        std::cmp::Ordering::Less => format!("second wins {second}-{first}"),
        std::cmp::Ordering::Equal => format!("draw {first}-{second}"),
    }
}
