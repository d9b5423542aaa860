use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

/// Serves the lines and timetables published on ctpcj.ro as json
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Settings {
    /// Port the web server listens on
    #[arg(long, env = "CTPCJ_PORT", default_value_t = 2015)]
    pub port: u16,

    /// Site the listing pages are resolved against
    #[arg(long, env = "CTPCJ_BASE_URL", default_value = "http://ctpcj.ro/")]
    pub base_url: Url,

    /// Directory holding the csv timetables
    #[arg(
        long,
        env = "CTPCJ_SCHEDULE_BASE_URL",
        default_value = "http://ctpcj.ro/orare/csv/"
    )]
    pub schedule_base_url: Url,

    #[arg(long, env = "CTPCJ_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Where the daily rolling log files go
    #[arg(long, env = "CTPCJ_LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,

    /// Traces are only exported when this is set
    #[arg(long, env = "OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Settings {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_from_args() -> Result<(), anyhow::Error> {
        let settings = Settings::try_parse_from([
            "ctpcj_timetables",
            "--port",
            "8080",
            "--base-url",
            "http://localhost:9000/",
            "--http-timeout-secs",
            "5",
        ])?;

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.base_url.as_str(), "http://localhost:9000/");
        assert_eq!(settings.http_timeout(), Duration::from_secs(5));

        Ok(())
    }

    #[test]
    fn rejects_invalid_urls() {
        assert!(
            Settings::try_parse_from(["ctpcj_timetables", "--schedule-base-url", "not a url"])
                .is_err()
        );
    }
}
