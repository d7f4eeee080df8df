//! Draw requests and the number sets they produce.
//!
//! A [`DrawRequest`] is validated once at construction so every source
//! (local or remote) can assume a satisfiable range.

use std::collections::BTreeSet;

use serde::Serialize;

/// Number of balls in a lottery draw.
pub const BALL_COUNT: usize = 6;
/// Lowest printable ball number.
pub const MIN_BALL_NUMBER: u32 = 1;
/// Highest printable ball number.
pub const MAX_BALL_NUMBER: u32 = 99;
/// Upper bound selected when the app starts.
pub const DEFAULT_MAX_NUMBER: u32 = 59;

/// Parameters for one draw of unique integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawRequest {
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub allow_replacement: bool,
}

/// Reasons a draw request cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRequestError {
    ZeroCount,
    MinAboveMax { min: u32, max: u32 },
    RangeTooSmall { count: usize, range: u64 },
}

impl std::fmt::Display for DrawRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawRequestError::ZeroCount => f.write_str("draw count must be at least 1"),
            DrawRequestError::MinAboveMax { min, max } => {
                write!(f, "minimum {min} is greater than maximum {max}")
            }
            DrawRequestError::RangeTooSmall { count, range } => write!(
                f,
                "cannot draw {count} unique numbers from a range of {range}"
            ),
        }
    }
}

impl std::error::Error for DrawRequestError {}

impl DrawRequest {
    /// Request `count` unique numbers in `[min, max]` without replacement.
    pub fn new(count: usize, min: u32, max: u32) -> Result<Self, DrawRequestError> {
        if count == 0 {
            return Err(DrawRequestError::ZeroCount);
        }
        if min > max {
            return Err(DrawRequestError::MinAboveMax { min, max });
        }
        let request = Self {
            count,
            min,
            max,
            allow_replacement: false,
        };
        if (count as u64) > request.range_size() {
            return Err(DrawRequestError::RangeTooSmall {
                count,
                range: request.range_size(),
            });
        }
        Ok(request)
    }

    /// The six-ball lottery draw over `[1, max]`.
    pub fn lottery(max: u32) -> Result<Self, DrawRequestError> {
        Self::new(BALL_COUNT, MIN_BALL_NUMBER, max)
    }

    pub fn range_size(&self) -> u64 {
        u64::from(self.max) - u64::from(self.min) + 1
    }

    pub fn contains(&self, number: u32) -> bool {
        (self.min..=self.max).contains(&number)
    }
}

/// Why a set of numbers does not satisfy its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawResultError {
    WrongCount { expected: usize, actual: usize },
    OutOfRange { number: u32, min: u32, max: u32 },
    Duplicate(u32),
}

impl std::fmt::Display for DrawResultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawResultError::WrongCount { expected, actual } => {
                write!(f, "expected {expected} numbers, got {actual}")
            }
            DrawResultError::OutOfRange { number, min, max } => {
                write!(f, "number {number} is outside [{min}, {max}]")
            }
            DrawResultError::Duplicate(number) => write!(f, "number {number} was drawn twice"),
        }
    }
}

impl std::error::Error for DrawResultError {}

/// An immutable set of drawn numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawResult {
    numbers: Vec<u32>,
}

impl DrawResult {
    /// Check `numbers` against `request`, keeping the order they arrived in.
    pub fn from_numbers(request: &DrawRequest, numbers: Vec<u32>) -> Result<Self, DrawResultError> {
        if numbers.len() != request.count {
            return Err(DrawResultError::WrongCount {
                expected: request.count,
                actual: numbers.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for &number in &numbers {
            if !request.contains(number) {
                return Err(DrawResultError::OutOfRange {
                    number,
                    min: request.min,
                    max: request.max,
                });
            }
            if !seen.insert(number) && !request.allow_replacement {
                return Err(DrawResultError::Duplicate(number));
            }
        }
        Ok(Self { numbers })
    }

    pub(crate) fn from_sorted_unchecked(numbers: Vec<u32>) -> Self {
        Self { numbers }
    }

    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Same numbers in ascending order.
    pub fn sorted(mut self) -> Self {
        self.numbers.sort_unstable();
        self
    }

    pub fn into_numbers(self) -> Vec<u32> {
        self.numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lottery_request_uses_six_balls_from_one() {
        let request = DrawRequest::lottery(59).expect("valid request");
        assert_eq!(request.count, 6);
        assert_eq!(request.min, 1);
        assert_eq!(request.max, 59);
        assert!(!request.allow_replacement);
        assert_eq!(request.range_size(), 59);
    }

    #[test]
    fn request_rejects_range_smaller_than_count() {
        assert_eq!(
            DrawRequest::lottery(5),
            Err(DrawRequestError::RangeTooSmall { count: 6, range: 5 })
        );
        assert_eq!(
            DrawRequest::new(1, 10, 3),
            Err(DrawRequestError::MinAboveMax { min: 10, max: 3 })
        );
        assert_eq!(DrawRequest::new(0, 1, 3), Err(DrawRequestError::ZeroCount));
    }

    #[test]
    fn request_accepts_exact_range() {
        let request = DrawRequest::new(6, 1, 6).expect("exact fit");
        assert_eq!(request.range_size(), 6);
    }

    #[test]
    fn result_keeps_arrival_order_until_sorted() {
        let request = DrawRequest::lottery(59).unwrap();
        let result = DrawResult::from_numbers(&request, vec![5, 3, 9, 1, 7, 2]).unwrap();
        assert_eq!(result.numbers(), &[5, 3, 9, 1, 7, 2]);
        assert_eq!(result.sorted().numbers(), &[1, 2, 3, 5, 7, 9]);
    }

    #[test]
    fn result_rejects_duplicates_and_out_of_range() {
        let request = DrawRequest::lottery(10).unwrap();
        assert_eq!(
            DrawResult::from_numbers(&request, vec![1, 2, 3, 4, 5, 5]),
            Err(DrawResultError::Duplicate(5))
        );
        assert_eq!(
            DrawResult::from_numbers(&request, vec![1, 2, 3, 4, 5, 11]),
            Err(DrawResultError::OutOfRange {
                number: 11,
                min: 1,
                max: 10
            })
        );
        assert_eq!(
            DrawResult::from_numbers(&request, vec![1, 2, 3]),
            Err(DrawResultError::WrongCount {
                expected: 6,
                actual: 3
            })
        );
    }
}
