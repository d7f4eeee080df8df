//! Ball appearance: decade color buckets and the printed label.

use crate::draw::{MAX_BALL_NUMBER, MIN_BALL_NUMBER};

/// Width of the black outline around each ball, in points.
pub const BALL_STROKE_WIDTH: f32 = 4.0;

/// Fill color of a ball, keyed by the tens digit of its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallColor {
    White,
    Brown,
    Pink,
    Orange,
    Yellow,
    Green,
    Marine,
    Blue,
    Purple,
    Gray,
}

impl BallColor {
    pub fn for_number(number: u32) -> Self {
        match number {
            1..=9 => BallColor::White,
            10..=19 => BallColor::Brown,
            20..=29 => BallColor::Pink,
            30..=39 => BallColor::Orange,
            40..=49 => BallColor::Yellow,
            50..=59 => BallColor::Green,
            60..=69 => BallColor::Marine,
            70..=79 => BallColor::Blue,
            80..=89 => BallColor::Purple,
            _ => BallColor::Gray,
        }
    }

    /// sRGB components.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BallColor::White => [255, 255, 255],
            BallColor::Brown => [179, 102, 51],
            BallColor::Pink => [255, 0, 204],
            BallColor::Orange => [255, 128, 0],
            BallColor::Yellow => [255, 204, 0],
            BallColor::Green => [102, 204, 51],
            BallColor::Marine => [77, 230, 204],
            BallColor::Blue => [77, 153, 230],
            BallColor::Purple => [179, 0, 179],
            BallColor::Gray => [128, 128, 128],
        }
    }
}

/// Two-digit label, or `??` for an unassigned ball.
pub fn ball_label(number: u32) -> String {
    if (MIN_BALL_NUMBER..=MAX_BALL_NUMBER).contains(&number) {
        format!("{number:02}")
    } else {
        "??".to_string()
    }
}
