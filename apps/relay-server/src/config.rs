use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use relay_core::messages::{DEFAULT_VIDEO_CHANNEL, DEFAULT_WELCOME_CHANNEL};
use security::DEFAULT_TOLERANCE_SECS;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct RelayConfig {
    pub signing_secret: String,
    pub bot_token: String,
    pub addr: SocketAddr,
    /// Overrides `https://slack.com/api`, e.g. to point at mock-slack.
    pub api_base: Option<String>,
    /// Channel that receives the join announcement.
    pub welcome_channel: String,
    /// Channel that receives the onboarding video playlist.
    pub video_channel: String,
    pub signature_tolerance_secs: i64,
    pub http_timeout: Duration,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("signing_secret", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("addr", &self.addr)
            .field("api_base", &self.api_base)
            .field("welcome_channel", &self.welcome_channel)
            .field("video_channel", &self.video_channel)
            .field("signature_tolerance_secs", &self.signature_tolerance_secs)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl RelayConfig {
    /// Loads configuration from the process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let signing_secret = get("SLACK_SIGNING_SECRET")
            .ok_or_else(|| anyhow!("SLACK_SIGNING_SECRET must be set"))?;
        let bot_token =
            get("SLACK_BOT_TOKEN").ok_or_else(|| anyhow!("SLACK_BOT_TOKEN must be set"))?;

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let ip = IpAddr::from_str(bind.trim()).context("invalid BIND_ADDR")?;

        let tolerance = parse_or(
            get("SLACK_SIGNATURE_TOLERANCE_SECS"),
            "SLACK_SIGNATURE_TOLERANCE_SECS",
            DEFAULT_TOLERANCE_SECS,
        )?;
        if tolerance < 0 {
            bail!("invalid SLACK_SIGNATURE_TOLERANCE_SECS: must not be negative");
        }
        let timeout_secs = parse_or(
            get("SLACK_HTTP_TIMEOUT_SECS"),
            "SLACK_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;

        Ok(Self {
            signing_secret,
            bot_token,
            addr: SocketAddr::new(ip, port),
            api_base: get("SLACK_API_BASE"),
            welcome_channel: get("WELCOME_CHANNEL_ID")
                .unwrap_or_else(|| DEFAULT_WELCOME_CHANNEL.into()),
            video_channel: get("VIDEO_CHANNEL_ID").unwrap_or_else(|| DEFAULT_VIDEO_CHANNEL.into()),
            signature_tolerance_secs: tolerance,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {value}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("SLACK_SIGNING_SECRET", "shh"),
        ("SLACK_BOT_TOKEN", "xoxb-1"),
    ];

    #[test]
    fn defaults_fill_optional_settings() {
        let cfg = RelayConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:4000".parse().unwrap());
        assert_eq!(cfg.welcome_channel, DEFAULT_WELCOME_CHANNEL);
        assert_eq!(cfg.video_channel, DEFAULT_VIDEO_CHANNEL);
        assert_eq!(cfg.signature_tolerance_secs, 300);
        assert_eq!(cfg.http_timeout, Duration::from_secs(10));
        assert!(cfg.api_base.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "8088"),
            ("BIND_ADDR", "127.0.0.1"),
            ("SLACK_API_BASE", "http://127.0.0.1:9082/api"),
            ("WELCOME_CHANNEL_ID", "CWELCOME"),
            ("VIDEO_CHANNEL_ID", "CVIDEO"),
            ("SLACK_SIGNATURE_TOLERANCE_SECS", "60"),
            ("SLACK_HTTP_TIMEOUT_SECS", "3"),
        ]);
        let cfg = RelayConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:8088".parse().unwrap());
        assert_eq!(cfg.api_base.as_deref(), Some("http://127.0.0.1:9082/api"));
        assert_eq!(cfg.welcome_channel, "CWELCOME");
        assert_eq!(cfg.video_channel, "CVIDEO");
        assert_eq!(cfg.signature_tolerance_secs, 60);
        assert_eq!(cfg.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_secrets_are_reported_by_name() {
        let err = RelayConfig::from_lookup(lookup(&[("SLACK_BOT_TOKEN", "x")])).unwrap_err();
        assert!(err.to_string().contains("SLACK_SIGNING_SECRET"));

        let err = RelayConfig::from_lookup(lookup(&[
            ("SLACK_SIGNING_SECRET", "s"),
            ("SLACK_BOT_TOKEN", "  "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SLACK_BOT_TOKEN"));
    }

    #[test]
    fn invalid_numbers_fail() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "not-a-port"));
        let err = RelayConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("invalid PORT"));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SLACK_SIGNATURE_TOLERANCE_SECS", "-5"));
        let err = RelayConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("SLACK_SIGNATURE_TOLERANCE_SECS"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let cfg = RelayConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("shh"));
        assert!(!rendered.contains("xoxb-1"));
    }
}
