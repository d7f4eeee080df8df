//! Local pseudo-random draws, used for the initial balls and as the
//! offline fallback when no API key is configured.

use std::collections::BTreeSet;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::draw::{DrawRequest, DrawResult};
use crate::error::DrawError;
use crate::service::RandomService;

/// Preconditions that make a local draw impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalGenerationError {
    ZeroCount,
    MinAboveMax { min: u32, max: u32 },
    RangeTooSmall { count: usize, available: u64 },
}

impl std::fmt::Display for LocalGenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalGenerationError::ZeroCount => f.write_str("cannot draw zero numbers"),
            LocalGenerationError::MinAboveMax { min, max } => {
                write!(f, "minimum {min} is greater than maximum {max}")
            }
            LocalGenerationError::RangeTooSmall { count, available } => write!(
                f,
                "cannot draw {count} unique numbers, only {available} available"
            ),
        }
    }
}

impl std::error::Error for LocalGenerationError {}

/// Draw `count` unique numbers in `[1, max]`, ascending.
pub fn generate_local<R: Rng + ?Sized>(
    count: usize,
    max: u32,
    rng: &mut R,
) -> Result<DrawResult, LocalGenerationError> {
    generate_in_range(count, 1, max, rng)
}

/// Draw `count` unique numbers in `[min, max]`, ascending.
///
/// Samples uniformly and discards repeats, so the range must hold at least
/// `count` values; that is checked before sampling starts.
pub fn generate_in_range<R: Rng + ?Sized>(
    count: usize,
    min: u32,
    max: u32,
    rng: &mut R,
) -> Result<DrawResult, LocalGenerationError> {
    if count == 0 {
        return Err(LocalGenerationError::ZeroCount);
    }
    if min > max {
        return Err(LocalGenerationError::MinAboveMax { min, max });
    }
    let available = u64::from(max) - u64::from(min) + 1;
    if (count as u64) > available {
        return Err(LocalGenerationError::RangeTooSmall { count, available });
    }

    let mut picked = BTreeSet::new();
    while picked.len() < count {
        picked.insert(rng.gen_range(min..=max));
    }
    Ok(DrawResult::from_sorted_unchecked(picked.into_iter().collect()))
}

/// [`RandomService`] backed by a local `StdRng`.
#[derive(Debug)]
pub struct LocalDrawSource {
    rng: Mutex<StdRng>,
}

impl LocalDrawSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible source for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn draw(&self, request: &DrawRequest) -> Result<DrawResult, LocalGenerationError> {
        // A poisoned lock only means another draw panicked; the rng state is still usable.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        generate_in_range(request.count, request.min, request.max, &mut *rng)
    }
}

impl Default for LocalDrawSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomService for LocalDrawSource {
    fn request_draw(&self, request: &DrawRequest) -> Result<DrawResult, DrawError> {
        self.draw(request).map_err(DrawError::Local)
    }

    fn describe(&self) -> &str {
        "local generator"
    }
}
