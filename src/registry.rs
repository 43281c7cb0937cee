use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use url::Url;

/// Dining halls with a published daily menu page.
pub const DINING_HALLS: [&str; 6] = [
    "south-quad",
    "east-quad",
    "markley",
    "bursley",
    "mosher-jordan",
    "north-quad",
];

pub const DEFAULT_BASE_URL: &str = "https://dining.umich.edu/menus-locations/dining-halls/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocation(String);

impl UnknownLocation {
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl Display for UnknownLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid dining hall: {}", self.0)
    }
}

impl std::error::Error for UnknownLocation {}

/// Fixed mapping from dining hall key to its menu page. Built once at startup and only read after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    urls: BTreeMap<&'static str, Url>,
}

impl Registry {
    /// Every key maps to `<base><key>/`.
    pub fn with_base(base: &Url) -> Result<Self, url::ParseError> {
        let mut urls = BTreeMap::new();
        for key in DINING_HALLS {
            urls.insert(key, base.join(&format!("{key}/"))?);
        }
        Ok(Self { urls })
    }

    /// Keys are case sensitive and must match exactly.
    pub fn resolve(&self, key: &str) -> Result<&Url, UnknownLocation> {
        self.urls
            .get(key)
            .ok_or_else(|| UnknownLocation(key.to_owned()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.urls.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        let base = Url::parse(DEFAULT_BASE_URL).expect("base url should be valid");
        Self::with_base(&base).expect("dining hall paths should join onto the base url")
    }
}
