use std::{
    env,
    fmt::{self, Display, Formatter},
    net::SocketAddr,
    str::FromStr,
    time::Duration,
};

use url::Url;

use crate::registry::DEFAULT_BASE_URL;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RendererKind {
    #[default]
    Http,
    Chromium,
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "chromium" | "browser" => Ok(Self::Chromium),
            other => Err(format!("expected `http` or `chromium`, got `{other}`")),
        }
    }
}

#[derive(Debug)]
pub struct Error {
    var: &'static str,
    value: String,
    reason: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.var, self.value, self.reason)
    }
}

impl std::error::Error for Error {}

/// Process settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub base_url: Url,
    pub renderer: RendererKind,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_owned());
        let addr = parse("HOST/PORT", format!("{host}:{port}"))?;

        let base_url: Url = parse(
            "MENU_BASE_URL",
            lookup("MENU_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        )?;
        if base_url.cannot_be_a_base() {
            return Err(Error {
                var: "MENU_BASE_URL",
                value: base_url.into(),
                reason: "not a base url".to_owned(),
            });
        }

        let renderer = match lookup("MENU_RENDERER") {
            Some(value) => parse("MENU_RENDERER", value)?,
            None => RendererKind::default(),
        };

        let fetch_timeout = match lookup("FETCH_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse("FETCH_TIMEOUT_SECS", value)?),
            None => Duration::from_secs(30),
        };

        Ok(Self {
            addr,
            base_url,
            renderer,
            fetch_timeout,
        })
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| Error {
        var,
        reason: e.to_string(),
        value,
    })
}
