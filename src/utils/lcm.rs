use crate::models::TimeStep;
use crate::SchedulingError;
use gcd::Gcd;

fn lcm(a: TimeStep, b: TimeStep) -> Option<TimeStep> {
    (a / a.gcd(b)).checked_mul(b)
}

/// Least common multiple of every value.
///
/// # Arguments
/// * `numbers` - The values, typically task periods.
///
/// # Returns
/// * `Ok(TimeStep)` - The least common multiple, `1` for an empty slice.
/// * `Err(SchedulingError::HorizonOverflow)` - The result does not fit in a `TimeStep`.
pub fn multiple_lcm(numbers: &[TimeStep]) -> Result<TimeStep, SchedulingError> {
    numbers.iter().try_fold(1, |acc, &x| {
        lcm(acc, x).ok_or_else(|| SchedulingError::HorizonOverflow(numbers.to_vec()))
    })
}
