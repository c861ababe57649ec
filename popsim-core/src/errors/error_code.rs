//! PopsimErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable code string
/// for callers that route errors by kind.
pub trait PopsimErrorCode {
    /// Returns the error code string (e.g., "BALANCE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const BALANCE_ERROR: &str = "BALANCE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const FACTORING_ERROR: &str = "FACTORING_ERROR";
