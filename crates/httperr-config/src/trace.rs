use serde::Deserialize;

/// Trace rendering switches
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Append domain, reason and location to structured frames
    #[serde(default = "default_detail")]
    pub detail: bool,
    /// Append the source location that built each structured error
    #[serde(default)]
    pub locations: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            detail: default_detail(),
            locations: false,
        }
    }
}

const fn default_detail() -> bool {
    true
}
