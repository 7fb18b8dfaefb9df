use sweeper_core::{CellView, GameStatus, Observation};

/// Three-character counter, like the seven-segment displays on the classic game.
pub(crate) fn format_for_counter(num: i64) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

fn cell_glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from(b'0' + count),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
    }
}

/// Counters line followed by the grid, rows and columns labelled.
pub(crate) fn render(obs: &Observation, elapsed_secs: u32) -> String {
    let (rows, cols) = obs.size;
    let mut out = format!(
        "mines {}   time {}\n",
        format_for_counter(obs.mines_left as i64),
        format_for_counter(i64::from(elapsed_secs))
    );

    out.push_str("   ");
    for col in 0..cols {
        out.push_str(&format!("{:>3}", col));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{:>3}", row));
        for col in 0..cols {
            out.push_str(&format!("{:>3}", cell_glyph(obs.cell((row, col)))));
        }
        out.push('\n');
    }

    out
}

pub(crate) fn banner(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Won => Some("VICTORY!"),
        GameStatus::Lost => Some("DEFEAT!"),
    }
}
