// Single source of truth for all default values.

// --- Balancer ---
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_MAX_GAP: f64 = 1.0e-9;
pub const DEFAULT_IMPORTANCE_ADJUST: f64 = 2.0;
pub const DEFAULT_IMPORTANCE_ADJUST_COUNT: usize = 100;
pub const DEFAULT_MINIMUM_IMPORTANCE: f64 = 1.0;
pub const DEFAULT_MAXIMUM_RELAXATION_FACTOR: f64 = 1_000_000.0;
pub const DEFAULT_MIN_CONTROL_VALUE: f64 = 0.1;
pub const DEFAULT_MAX_WEIGHT: f64 = 2_147_483_648.0; // 2^31

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "popsim=info";
pub const LOG_ENV_VAR: &str = "POPSIM_LOG";
