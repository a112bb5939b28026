use std::path::PathBuf;

/// Input log read when no path is given on the command line.
pub const DEFAULT_LOG_PATH: &str = "pspnet50_ADE20K_1-150.log";

/// Output CSV written when no path is given on the command line.
pub const DEFAULT_CSV_PATH: &str = "result.csv";

/// Resolved paths for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub log_path: PathBuf,
    pub csv_path: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
        }
    }
}

impl ConvertConfig {
    /// Start from the defaults and apply whichever paths were given.
    pub fn with_overrides(log_path: Option<PathBuf>, csv_path: Option<PathBuf>) -> Self {
        let mut config = Self::default();
        if let Some(path) = log_path {
            config.log_path = path;
        }
        if let Some(path) = csv_path {
            config.csv_path = path;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.log_path, PathBuf::from("pspnet50_ADE20K_1-150.log"));
        assert_eq!(config.csv_path, PathBuf::from("result.csv"));
    }

    #[test]
    fn test_overrides_applied_independently() {
        let config = ConvertConfig::with_overrides(Some(PathBuf::from("eval.log")), None);
        assert_eq!(config.log_path, PathBuf::from("eval.log"));
        assert_eq!(config.csv_path, PathBuf::from(DEFAULT_CSV_PATH));

        let config = ConvertConfig::with_overrides(
            Some(PathBuf::from("eval.log")),
            Some(PathBuf::from("out/metrics.csv")),
        );
        assert_eq!(config.csv_path, PathBuf::from("out/metrics.csv"));
    }
}
