//! Mapping between field coordinates and terminal cells
//!
//! Row 0 is the HUD, the last row holds the hold buttons, everything in
//! between is the 0-100 playing field.

use crate::consts::{FIELD_BOTTOM, PLAYER_Y_THRESHOLD};
use crate::sim::Direction;

/// Smallest usable terminal: both buttons fit with a gap between them
pub const MIN_COLS: u16 = 2 * BUTTON_WIDTH + 2;
pub const MIN_ROWS: u16 = 8;

/// Columns taken by each hold button label
pub const BUTTON_WIDTH: u16 = 12;

/// On-screen hold control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub direction: Direction,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self.direction {
            Direction::Left => "[ <<< hold ]",
            Direction::Right => "[ hold >>> ]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
}

impl Layout {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(MIN_COLS),
            rows: rows.max(MIN_ROWS),
        }
    }

    /// Rows available to the playing field
    fn field_rows(&self) -> u16 {
        self.rows - 2
    }

    /// Terminal column for a field x in [0, 100]
    pub fn column_for(&self, x: f32) -> u16 {
        let col = (x.clamp(0.0, FIELD_BOTTOM) / FIELD_BOTTOM * self.cols as f32) as u16;
        col.min(self.cols - 1)
    }

    /// Terminal row for a field y in [0, 100]
    pub fn row_for(&self, y: f32) -> u16 {
        let field = self.field_rows();
        let row = (y.clamp(0.0, FIELD_BOTTOM) / FIELD_BOTTOM * field as f32) as u16;
        1 + row.min(field - 1)
    }

    /// Row the paddle is drawn on: just past the collision line
    pub fn player_row(&self) -> u16 {
        (self.row_for(PLAYER_Y_THRESHOLD) + 1).min(self.rows - 2)
    }

    pub fn controls_row(&self) -> u16 {
        self.rows - 1
    }

    /// First column of a button's label on the controls row
    pub fn button_col(&self, button: Button) -> u16 {
        match button.direction {
            Direction::Left => 0,
            Direction::Right => self.cols - BUTTON_WIDTH,
        }
    }

    /// Hold button whose label covers a terminal cell, if any
    pub fn button_at(&self, col: u16, row: u16) -> Option<Button> {
        if row != self.controls_row() {
            return None;
        }
        [Direction::Left, Direction::Right]
            .into_iter()
            .map(|direction| Button { direction })
            .find(|&button| {
                let start = self.button_col(button);
                (start..start + BUTTON_WIDTH).contains(&col)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_size() {
        let layout = Layout::new(1, 1);
        assert_eq!(layout.cols, MIN_COLS);
        assert_eq!(layout.rows, MIN_ROWS);
    }

    #[test]
    fn test_field_mapping() {
        let layout = Layout::new(100, 22);
        assert_eq!(layout.column_for(0.0), 0);
        assert_eq!(layout.column_for(50.0), 50);
        assert_eq!(layout.column_for(100.0), 99);
        assert_eq!(layout.row_for(0.0), 1);
        assert_eq!(layout.row_for(99.9), 20);
        assert!(layout.player_row() < layout.controls_row());
    }

    #[test]
    fn test_button_hit() {
        let layout = Layout::new(40, 10);
        assert_eq!(
            layout.button_at(3, 9),
            Some(Button {
                direction: Direction::Left
            })
        );
        assert_eq!(
            layout.button_at(30, 9),
            Some(Button {
                direction: Direction::Right
            })
        );
        assert_eq!(layout.button_at(3, 8), None);
    }

    #[test]
    fn test_button_hit_limited_to_labels() {
        let layout = Layout::new(40, 10);
        let left = Button {
            direction: Direction::Left,
        };
        let right = Button {
            direction: Direction::Right,
        };
        assert_eq!(layout.button_at(11, 9), Some(left));
        assert_eq!(layout.button_at(12, 9), None);
        assert_eq!(layout.button_at(20, 9), None);
        assert_eq!(layout.button_at(27, 9), None);
        assert_eq!(layout.button_at(28, 9), Some(right));
        assert_eq!(layout.button_at(39, 9), Some(right));
        assert_eq!(layout.button_at(40, 9), None);

        // Labels never overlap, even at the minimum width
        let narrow = Layout::new(1, 1);
        assert!(narrow.button_col(left) + BUTTON_WIDTH < narrow.button_col(right));
    }
}
