use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bright_core::message::WHATSAPP_BASE_URL;
use bright_core::{ConfigError, RouteFields, SiteProfile};
use url::Url;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX: usize = 20;
const DEFAULT_BODY_LIMIT_BYTES: usize = 16 * 1024;

/// wa.me answers with a redirect to this host, so form posts must be allowed to land there too.
const WHATSAPP_API_ORIGIN: &str = "https://api.whatsapp.com";

/// Whether other sites may embed our pages in a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameOptions {
    #[default]
    Deny,
    SameOrigin,
}

impl FrameOptions {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deny" => Some(Self::Deny),
            "sameorigin" | "same_origin" | "same-origin" => Some(Self::SameOrigin),
            _ => None,
        }
    }

    pub fn header_value(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }

    fn frame_ancestors(self) -> &'static str {
        match self {
            Self::Deny => "'none'",
            Self::SameOrigin => "'self'",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind: String,
    pub profile: SiteProfile,
    pub route_fields: RouteFields,
    pub rate_limit_window: Duration,
    pub rate_limit_max: usize,
    pub body_limit_bytes: usize,
    /// Key rate limits on `x-forwarded-for` instead of the socket peer.
    /// Only safe behind a proxy that overwrites the header.
    pub trust_forwarded: bool,
    pub frame_options: FrameOptions,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            profile: SiteProfile::default(),
            route_fields: RouteFields::default(),
            rate_limit_window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            trust_forwarded: false,
            frame_options: FrameOptions::default(),
        }
    }
}

impl WebConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind = env::var("BRIGHT_BIND").unwrap_or(defaults.bind);

        let mut profile = defaults.profile;
        if let Ok(number) = env::var("BRIGHT_WHATSAPP_NUMBER") {
            profile = profile
                .with_whatsapp_number(&number)
                .context("invalid BRIGHT_WHATSAPP_NUMBER")?;
        }
        if let Ok(public_url) = env::var("BRIGHT_PUBLIC_URL") {
            let parsed = Url::parse(public_url.trim())
                .with_context(|| format!("invalid BRIGHT_PUBLIC_URL {public_url:?}"))?;
            profile.public_url = parsed.as_str().trim_end_matches('/').to_string();
        }

        let route_fields = match env::var("BRIGHT_ROUTE_FIELDS") {
            Ok(value) => RouteFields::parse(&value)
                .ok_or_else(|| ConfigError::UnknownRouteFields(value.clone()))?,
            Err(_) => defaults.route_fields,
        };

        let rate_limit_window = Duration::from_secs(
            env::var("BRIGHT_RATE_LIMIT_WINDOW_SECONDS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
        );
        let rate_limit_max = env::var("BRIGHT_RATE_LIMIT_MAX")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MAX);

        let trust_forwarded = match env::var("BRIGHT_TRUST_FORWARDED") {
            Ok(value) => parse_flag(&value)
                .with_context(|| format!("invalid BRIGHT_TRUST_FORWARDED {value:?}"))?,
            Err(_) => defaults.trust_forwarded,
        };

        let frame_options = match env::var("BRIGHT_FRAME_OPTIONS") {
            Ok(value) => match FrameOptions::parse(&value) {
                Some(options) => options,
                None => bail!("invalid BRIGHT_FRAME_OPTIONS {value:?}, expected `deny` or `sameorigin`"),
            },
            Err(_) => defaults.frame_options,
        };

        Ok(Self {
            bind,
            profile,
            route_fields,
            rate_limit_window,
            rate_limit_max,
            body_limit_bytes: defaults.body_limit_bytes,
            trust_forwarded,
            frame_options,
        })
    }

    /// CSP for every page, built from the site's own origin and the hosts it embeds or posts to.
    pub fn content_security_policy(&self) -> String {
        let site = origin_of(&self.profile.public_url);

        let mut default_src = vec!["'self'".to_string()];
        default_src.extend(site.clone());

        let frame_src = origin_of(&self.profile.map_embed_url).unwrap_or_else(|| "'none'".to_string());

        let mut form_action = vec!["'self'".to_string()];
        form_action.extend(site);
        form_action.extend(origin_of(WHATSAPP_BASE_URL));
        form_action.push(WHATSAPP_API_ORIGIN.to_string());

        format!(
            "default-src {}; img-src 'self' https: data:; style-src 'self' 'unsafe-inline'; frame-src {}; form-action {}; frame-ancestors {}; base-uri 'none'",
            default_src.join(" "),
            frame_src,
            form_action.join(" "),
            self.frame_options.frame_ancestors(),
        )
    }
}

fn origin_of(raw: &str) -> Option<String> {
    let origin = Url::parse(raw).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
