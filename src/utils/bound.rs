/// Liu & Layland utilisation bound `n * (2^(1/n) - 1)` for `n` tasks under
/// Rate-Monotonic priorities. An empty set is bounded by `1.0`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let n = n as f64;
    n * (2f64.powf(1.0 / n) - 1.0)
}
