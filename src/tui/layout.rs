//! # Frame Layout
//!
//! Pure grid-position computation, separated from the device writes in
//! `ui` so every formula is testable without a terminal.
//!
//! Positions (H rows, W columns, all zero-based):
//! - equation row `floor(2H/3)`, time/score row `ceil(H/3)`
//! - time column `floor(W/3)`, score column `floor(2W/3)`
//! - equation column `floor(W/2 - (len(display)+5)/2)`, measured on the
//!   equation display alone; the +5 allowance leaves room for the typed
//!   digits growing to its right
//!
//! A position or text extent outside the grid is an error, not a clip:
//! the frame is fatal to the session.

use std::fmt;

use ratatui::layout::Size;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedText {
    pub row: u16,
    pub col: u16,
    pub text: String,
}

/// Everything one frame draws, already positioned and bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub texts: Vec<PlacedText>,
}

#[derive(Debug)]
pub struct LayoutError {
    pub row: i64,
    pub col: i64,
    pub width: usize,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "text {} cells wide does not fit at row {}, column {}",
            self.width, self.row, self.col
        )
    }
}

impl std::error::Error for LayoutError {}

pub fn compute(
    area: Size,
    remaining_secs: i64,
    score: u32,
    equation_display: &str,
    typed: &str,
    debug: Option<&str>,
) -> Result<FrameLayout, LayoutError> {
    let h = i64::from(area.height);
    let w = i64::from(area.width);

    let time_score_row = (h + 2) / 3; // ceil(H/3)
    let equation_row = 2 * h / 3; // floor(2H/3)
    let time_col = w / 3;
    let score_col = 2 * w / 3;
    // floor((W - len - 5)/2), equivalent to floor(W/2 - (len+5)/2)
    let equation_col = (w - equation_display.width() as i64 - 5).div_euclid(2);

    let mut texts = Vec::with_capacity(4);
    texts.push(place(time_score_row, time_col, format!("{remaining_secs}s"), h, w)?);
    texts.push(place(time_score_row, score_col, score.to_string(), h, w)?);
    texts.push(place(
        equation_row,
        equation_col,
        format!("{equation_display} {typed}"),
        h,
        w,
    )?);
    if let Some(debug) = debug {
        texts.push(place(0, 0, debug.to_string(), h, w)?);
    }
    Ok(FrameLayout { texts })
}

fn place(row: i64, col: i64, text: String, h: i64, w: i64) -> Result<PlacedText, LayoutError> {
    let width = text.width();
    if row < 0 || row >= h || col < 0 || col + width as i64 > w {
        return Err(LayoutError { row, col, width });
    }
    Ok(PlacedText {
        row: row as u16,
        col: col as u16,
        text,
    })
}
