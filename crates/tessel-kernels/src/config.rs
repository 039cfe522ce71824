//! Execution configuration for the rearrangement kernels
//!
//! The copy kernel splits the output index space across the rayon thread
//! pool once a call is large enough for the fan-out to pay off.
//!
//! # Environment Variables
//!
//! - `TESSEL_MIN_PARALLEL_LEN`: element count at which the kernel goes parallel
//! - `TESSEL_PARALLEL`: `0`, `false` or `off` disables parallel execution

/// Default element count at which the copy kernel goes parallel
pub const DEFAULT_MIN_PARALLEL_LEN: usize = 10_000;

/// Configuration for one rearrangement call
///
/// # Examples
///
/// ```
/// use tessel_kernels::RearrangeConfig;
///
/// let config = RearrangeConfig::default().with_min_parallel_len(4096);
/// assert!(config.parallel);
/// assert_eq!(config.min_parallel_len, 4096);
///
/// assert!(!RearrangeConfig::sequential().parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RearrangeConfig {
    /// Minimum output size to use parallel processing (default: 10,000)
    pub min_parallel_len: usize,

    /// Allow parallel execution at all
    pub parallel: bool,

    /// Elements per parallel task (None = auto)
    pub chunk_size: Option<usize>,
}

impl Default for RearrangeConfig {
    fn default() -> Self {
        Self {
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
            parallel: true,
            chunk_size: None,
        }
    }
}

impl RearrangeConfig {
    /// Configuration that never spawns parallel work
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Defaults overridden by `TESSEL_MIN_PARALLEL_LEN` and `TESSEL_PARALLEL`
    ///
    /// Used by the entry points that take no explicit configuration.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(len) = std::env::var("TESSEL_MIN_PARALLEL_LEN")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
        {
            config.min_parallel_len = len;
        }
        if let Ok(flag) = std::env::var("TESSEL_PARALLEL") {
            if let Some(parallel) = parse_flag(&flag) {
                config.parallel = parallel;
            }
        }
        config
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_min_parallel_len(mut self, len: usize) -> Self {
        self.min_parallel_len = len;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size.max(1));
        self
    }

    /// Whether a call writing `len` elements should run in parallel.
    ///
    /// Always false when the `parallel` feature is disabled.
    pub fn use_parallel(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && len >= self.min_parallel_len
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RearrangeConfig::default();
        assert_eq!(config.min_parallel_len, 10_000);
        assert!(config.parallel);
        assert_eq!(config.chunk_size, None);
    }

    #[test]
    fn test_builders() {
        let config = RearrangeConfig::default()
            .with_parallel(false)
            .with_min_parallel_len(1)
            .with_chunk_size(0);
        assert!(!config.parallel);
        assert_eq!(config.min_parallel_len, 1);
        assert_eq!(config.chunk_size, Some(1));
    }

    #[test]
    fn test_use_parallel_threshold() {
        let config = RearrangeConfig::default().with_min_parallel_len(100);
        assert!(!config.use_parallel(99));
        assert_eq!(config.use_parallel(100), cfg!(feature = "parallel"));
        assert!(!RearrangeConfig::sequential().use_parallel(1_000_000));
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("TESSEL_MIN_PARALLEL_LEN", " 512 ");
        std::env::set_var("TESSEL_PARALLEL", "off");
        let config = RearrangeConfig::from_env();
        assert_eq!(config.min_parallel_len, 512);
        assert!(!config.parallel);

        std::env::set_var("TESSEL_MIN_PARALLEL_LEN", "lots");
        std::env::set_var("TESSEL_PARALLEL", "maybe");
        assert_eq!(RearrangeConfig::from_env(), RearrangeConfig::default());

        std::env::remove_var("TESSEL_MIN_PARALLEL_LEN");
        std::env::remove_var("TESSEL_PARALLEL");
        assert_eq!(RearrangeConfig::from_env(), RearrangeConfig::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("OFF"), Some(false));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
