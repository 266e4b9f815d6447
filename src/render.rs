//! Plain-text board rendering for the terminal.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use board::engine::BoardSnapshot;
use board::order::Order;
use time::OffsetDateTime;

/// `HH:MM` in UTC, or `--:--` when the timestamp is out of range.
#[must_use]
pub fn clock_time(created_ms: i64) -> String {
    match OffsetDateTime::from_unix_timestamp_nanos(i128::from(created_ms) * 1_000_000) {
        Ok(at) => format!("{:02}:{:02}", at.hour(), at.minute()),
        Err(_) => "--:--".to_owned(),
    }
}

fn card_line(order: &Order) -> String {
    format!("  {:<10} {:<24} table {:<4} {}", order.id, order.title, order.table, clock_time(order.created))
}

/// Every column as a heading followed by its cards.
pub struct TextBoard<'a>(pub &'a BoardSnapshot);

impl fmt::Display for TextBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        for lane in &snapshot.columns {
            let marker = if snapshot.hovered == Some(lane.column) { " *" } else { "" };
            writeln!(f, "{} ({}){marker}", lane.column.as_str().to_uppercase(), lane.orders.len())?;
            for order in &lane.orders {
                writeln!(f, "{}", card_line(order))?;
            }
        }
        Ok(())
    }
}

/// Render the board as text.
#[must_use]
pub fn render_text(snapshot: &BoardSnapshot) -> String {
    TextBoard(snapshot).to_string()
}
