//! Domain-specific assertion macros for stayboard harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! say which listing and which column broke.

/// Assert the cities of a view, in row order.
///
/// ```rust
/// assert_cities!(view, ["Pune", "Goa"]);
/// ```
#[macro_export]
macro_rules! assert_cities {
    ($view:expr, [$($city:expr),* $(,)?]) => {{
        let actual: Vec<Option<&str>> = $view.iter().map(|l| l.city.as_deref()).collect();
        let expected: Vec<Option<&str>> = vec![$(Some($city)),*];
        pretty_assertions::assert_eq!(actual, expected, "cities of view");
    }};
}

/// Assert that every listing in a view satisfies a predicate, naming the
/// first offender on failure.
///
/// ```rust
/// assert_all_listings!(view, |l| l.rating.is_some());
/// ```
#[macro_export]
macro_rules! assert_all_listings {
    ($view:expr, |$l:ident| $body:expr) => {{
        for (i, $l) in $view.iter().enumerate() {
            if !$body {
                panic!(
                    "assert_all_listings! failed at row {}: {:?}",
                    i, $l.hotel_name
                );
            }
        }
    }};
}

/// Assert two floats agree to within `1e-9`.
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {{
        let a: f64 = $actual;
        let e: f64 = $expected;
        if (a - e).abs() > 1e-9 {
            panic!("assert_close! failed:\n  expected: {}\n  actual:   {}", e, a);
        }
    }};
}
