//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. They are further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit one line per pair request issued by the correlation analysis.
    pub print_pair_requests: bool,
    /// Emit every HTTP attempt (url, attempt number, status).
    pub print_http_attempts: bool,
    /// Emit the full matrix after assembly.
    pub print_matrix: bool,
    /// Emit which provider in a fallback chain produced the data.
    pub print_provider_choice: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_pair_requests: false,
    print_http_attempts: false,
    print_matrix: false,
    print_provider_choice: true,
};
