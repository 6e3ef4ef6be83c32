//! Economic epoch resolution
//!
//! The dataset's macroeconomic indicators come from a closed set of ten
//! yearly observations. A triple that matches one exactly identifies the
//! year; anything else resolves to unknown. Matching is exact, so most
//! user-supplied inference inputs carry an unknown year.

/// (unemployment rate, inflation rate, GDP) → year
const EPOCHS: [((f64, f64, f64), i32); 10] = [
    ((10.8, 1.4, 1.74), 2010),
    ((13.9, -0.3, 0.79), 2011),
    ((9.4, -0.8, -3.12), 2012),
    ((16.2, 0.3, -0.92), 2013),
    ((15.5, 2.8, -4.06), 2014),
    ((8.9, 1.4, 3.51), 2015),
    ((12.7, 3.7, -1.70), 2016),
    ((11.1, 0.6, 2.02), 2017),
    ((7.6, 2.6, 0.32), 2018),
    ((12.4, 0.5, 1.79), 2019),
];

/// Resolve the year an indicator triple was observed in, or `None` when the
/// triple does not equal any historical observation.
#[allow(clippy::float_cmp)]
pub fn year_of(unemployment_rate: f64, inflation_rate: f64, gdp: f64) -> Option<i32> {
    EPOCHS
        .iter()
        .find(|((u, i, g), _)| *u == unemployment_rate && *i == inflation_rate && *g == gdp)
        .map(|(_, year)| *year)
}

/// All known epochs, oldest first
pub fn epochs() -> impl Iterator<Item = (f64, f64, f64, i32)> {
    EPOCHS.iter().map(|((u, i, g), year)| (*u, *i, *g, *year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_triple_resolves() {
        assert_eq!(year_of(10.8, 1.4, 1.74), Some(2010));
        assert_eq!(year_of(12.4, 0.5, 1.79), Some(2019));
        assert_eq!(year_of(12.7, 3.7, -1.7), Some(2016));
    }

    #[test]
    fn test_near_miss_is_unknown() {
        assert_eq!(year_of(10.8, 1.4, 1.75), None);
        assert_eq!(year_of(10.80001, 1.4, 1.74), None);
    }

    #[test]
    fn test_every_epoch_resolves_to_itself() {
        for (u, i, g, year) in epochs() {
            assert_eq!(year_of(u, i, g), Some(year));
        }
        assert_eq!(epochs().count(), 10);
    }
}
