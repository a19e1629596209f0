use chrono::Offset;
use clap::Parser;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://107.20.32.82:8000/predict";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Building classifier page
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Classification endpoint receiving the multipart upload
    #[arg(long, env = "CLASSIFIER_API_URL", default_value = DEFAULT_API_URL, value_name = "URL")]
    pub api_url: String,

    /// Request deadline in seconds (0 waits forever)
    #[arg(long, env = "CLASSIFIER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, value_name = "SECONDS")]
    pub timeout_secs: u64,

    /// UTC offset in hours used for log timestamps
    #[arg(long, env = "CLASSIFIER_LOG_UTC_OFFSET", default_value_t = 0, allow_negative_numbers = true, value_name = "HOURS")]
    pub log_utc_offset: i32,

    /// Answer with random probabilities instead of calling the endpoint
    #[arg(long, env = "CLASSIFIER_OFFLINE")]
    pub offline: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid api url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api url must use http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("log utc offset must be within -23..=23 hours, got {0}")]
    InvalidUtcOffset(i32),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub request_timeout: Option<Duration>,
    pub logger_timezone: chrono::FixedOffset,
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            logger_timezone: utc(),
            offline: false,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let api_url = Url::parse(&args.api_url).map_err(|source| ConfigError::InvalidUrl {
            url: args.api_url.clone(),
            source,
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_url.scheme().to_string()));
        }

        let logger_timezone = args
            .log_utc_offset
            .checked_mul(3600)
            .and_then(chrono::FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidUtcOffset(args.log_utc_offset))?;

        let request_timeout = match args.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            api_url,
            request_timeout,
            logger_timezone,
            offline: args.offline,
        })
    }
}

fn default_api_url() -> Url {
    match Url::parse(DEFAULT_API_URL) {
        Ok(url) => url,
        Err(e) => unreachable!("DEFAULT_API_URL is a valid url: {}", e),
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
