use crate::types::Region;
use clap::Parser;

/// GA4GH server queried when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://ga4gh-a1.westus.cloudapp.azure.com/ga4gh-count1-data/";

#[derive(Debug, Clone, Parser)]
#[command(name = "ga4gh-report")]
#[command(about = "Summarize reference-base lengths of GA4GH variants")]
pub struct Config {
    /// Base URL of the GA4GH API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Records per page requested from the server (server default if unset)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Reference name of the variant region
    #[arg(long, default_value = "1")]
    pub reference_name: String,

    /// Start of the variant region
    #[arg(long, default_value = "100000")]
    pub start: u64,

    /// End of the variant region
    #[arg(long, default_value = "900000")]
    pub end: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn region(&self) -> Region {
        Region::new(self.reference_name.clone(), self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: None,
            reference_name: "1".to_string(),
            start: 100000,
            end: 900000,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_region_default_matches_report_region() {
        assert_eq!(config().region(), Region::default());
    }

    #[test]
    fn test_region_custom() {
        let config = Config {
            reference_name: "X".to_string(),
            start: 10,
            end: 20,
            ..config()
        };
        assert_eq!(config.region(), Region::new("X", 10, 20));
    }

    #[test]
    fn test_parse_overrides() {
        let config = Config::try_parse_from([
            "ga4gh-report",
            "--base-url",
            "http://localhost:8000/",
            "--page-size",
            "50",
            "--start",
            "1",
        ])
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/");
        assert_eq!(config.page_size, Some(50));
        assert_eq!(config.start, 1);
        assert_eq!(config.end, 900000);
    }

    #[test]
    fn test_only_log_level_reads_env() {
        use clap::CommandFactory;

        let command = Config::command();
        let with_env: Vec<_> = command
            .get_arguments()
            .filter(|arg| arg.get_env().is_some())
            .map(|arg| arg.get_id().as_str())
            .collect();
        assert_eq!(with_env, vec!["log_level"]);
    }

    #[test]
    fn test_parse_rejects_bad_page_size() {
        assert!(Config::try_parse_from(["ga4gh-report", "--page-size", "lots"]).is_err());
    }
}
