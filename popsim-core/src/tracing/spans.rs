//! Span definitions per operation: balancing and meta control factoring.

/// Create a balancing span.
#[macro_export]
macro_rules! balance_span {
    ($sample_count:expr, $control_count:expr) => {
        ::tracing::info_span!(
            "popsim.balance",
            sample_count = $sample_count,
            control_count = $control_count
        )
    };
}

/// Create a meta control factoring span.
#[macro_export]
macro_rules! factoring_span {
    ($household_count:expr, $target_count:expr) => {
        ::tracing::info_span!(
            "popsim.factoring",
            household_count = $household_count,
            target_count = $target_count
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const BALANCE: &str = "popsim.balance";
    pub const FACTORING: &str = "popsim.factoring";
}
