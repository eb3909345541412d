//! Sizing primitives (§4.1, component A).
//!
//! Pure functions of `(N, ε, R)` that size the wave's modulus, level
//! count, and per-level capacity. None of these touch a [`crate::Wave`]
//! instance; [`crate::config::WaveConfig`] calls them once at
//! construction/resize time and caches the results.

/// Largest per-item value that cannot overflow `total` within a single
/// window: `⌊i64::MAX / N⌋`.
pub fn max_increment(n: i64) -> i64 {
    debug_assert!(n > 0, "max_increment requires N > 0");
    i64::MAX / n
}

/// Smallest power of two `M ≥ 2*N*R`, as `2^i` for `i ∈ [0, 62]`.
/// Returns `i64::MAX` if `2*N*R` would overflow `i64`.
pub fn modulus(n: i64, r: i64) -> i64 {
    debug_assert!(n > 0 && r > 0, "modulus requires N > 0 and R > 0");
    let target = (n as i128) * (r as i128) * 2;
    if target > (1i128 << 62) {
        return i64::MAX;
    }
    let mut m: i64 = 1;
    while (m as i128) < target && m < (1i64 << 62) {
        m <<= 1;
    }
    m
}

/// Number of levels `L = 1 + |⌈log2(2εNr)⌉|`, where `r = R` if `R > 0`
/// else `max_increment(N)`. Clamped to `[1, 63]`.
pub fn num_levels(n: i64, eps: f64, r: i64) -> usize {
    debug_assert!(n > 0, "num_levels requires N > 0");
    let r = if r > 0 { r } else { max_increment(n) };
    let eps = normalize_eps(eps);
    let x = 2.0 * eps * (n as f64) * (r as f64);
    let levels = if x <= 0.0 || !x.is_finite() {
        1
    } else {
        1 + x.log2().ceil().abs() as i64
    };
    levels.clamp(1, 63) as usize
}

/// Per-level queue capacity `⌈1/ε⌉ + 1`. `ε` defaults to `0.01` when
/// zero (matching the source's tolerance for an unset error bound).
pub fn level_cap(eps: f64) -> usize {
    let eps = normalize_eps(eps);
    (1.0 / eps).ceil() as usize + 1
}

fn normalize_eps(eps: f64) -> f64 {
    if eps == 0.0 {
        0.01
    } else {
        eps
    }
}
