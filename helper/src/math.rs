use num_integer::Integer;

pub fn gcd<T: Integer>(a: T, b: T) -> T {
    a.gcd(&b)
}

pub fn lcm<T: Integer>(a: T, b: T) -> T {
    a.lcm(&b)
}

/// Least common multiple of every value, `None` for an empty input.
pub fn lcm_all<T, I>(values: I) -> Option<T>
where
    T: Integer,
    I: IntoIterator<Item = T>,
{
    values.into_iter().reduce(|acc, value| acc.lcm(&value))
}

/// Non-negative remainder, always in `[0, dim)` even for negative `value`.
pub fn wrap(value: i32, dim: i32) -> i32 {
    value.rem_euclid(dim)
}
