//! Wave configuration `(N, ε, R, expire)` and the derived sizing it
//! implies (§3, component D's config portion; §4.1, component A).

use crate::sizing;

/// Errors constructing or resizing a [`crate::Wave`]'s configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `N` (window size) must be strictly positive.
    #[error("N must be > 0, got {0}")]
    InvalidWindow(i64),
    /// `ε` (relative error) must be in `(0, 1)`.
    #[error("epsilon must be in (0, 1), got {0}")]
    InvalidEpsilon(f64),
    /// `R` (value bound) must be strictly positive.
    #[error("R must be > 0, got {0}")]
    InvalidBound(i64),
}

/// The validated `(N, ε, R, expire)` tuple plus its derived `M`
/// (modulus), level count, and per-level capacity (§3, §4.1).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveConfig {
    n: i64,
    eps: f64,
    r: i64,
    expire: bool,
    modulus: i64,
    levels: usize,
    level_cap: usize,
}

impl WaveConfig {
    /// Validates and derives sizing for `(N, ε, R, expire)`.
    pub fn new(n: i64, eps: f64, r: i64, expire: bool) -> Result<Self, ConfigError> {
        if n <= 0 {
            return Err(ConfigError::InvalidWindow(n));
        }
        if !(eps > 0.0 && eps < 1.0) {
            return Err(ConfigError::InvalidEpsilon(eps));
        }
        if r <= 0 {
            return Err(ConfigError::InvalidBound(r));
        }
        Ok(Self {
            n,
            eps,
            r,
            expire,
            modulus: sizing::modulus(n, r),
            levels: sizing::num_levels(n, eps, r),
            level_cap: sizing::level_cap(eps),
        })
    }

    pub fn n(&self) -> i64 {
        self.n
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn r(&self) -> i64 {
        self.r
    }

    pub fn expire(&self) -> bool {
        self.expire
    }

    pub fn set_expire(&mut self, expire: bool) {
        self.expire = expire;
    }

    pub fn modulus(&self) -> i64 {
        self.modulus
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn level_cap(&self) -> usize {
        self.level_cap
    }
}
