//! The endpoint catalog.
//!
//! An [`Endpoint`] is the base URL concatenated with one relative API path.
//! A [`Catalog`] is the ordered list of endpoints probed in one run. The
//! built-in catalog mirrors the routes of the official Guild Wars 2 API;
//! routes that are known to misbehave are commented out of the list and are
//! never probed.

use std::fmt;
use std::fs;
use std::path::Path;

use url::Url;

use crate::error::{Error, Result};

/// Base URL of the official Guild Wars 2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.guildwars2.com";

/// Active routes of the built-in catalog, in probe order.
pub const BUILTIN_PATHS: &[&str] = &[
    "/v2/account",
    "/v2/account/achievements",
    "/v2/account/bank",
    "/v2/account/buildstorage",
    "/v2/account/dailycrafting",
    "/v2/account/dungeons",
    "/v2/account/dyes",
    "/v2/account/emotes",
    "/v2/account/finishers",
    "/v2/account/gliders",
    "/v2/account/home",
    "/v2/account/home/cats",
    "/v2/account/home/nodes",
    "/v2/account/inventory",
    "/v2/account/luck",
    "/v2/account/mailcarriers",
    "/v2/account/mapchests",
    "/v2/account/masteries",
    "/v2/account/mastery/points",
    "/v2/account/materials",
    "/v2/account/minis",
    "/v2/account/mounts",
    "/v2/account/mounts/skins",
    "/v2/account/mounts/types",
    "/v2/account/novelties",
    "/v2/account/outfits",
    "/v2/account/pvp/heroes",
    "/v2/account/raids",
    "/v2/account/recipes",
    "/v2/account/skins",
    "/v2/account/titles",
    "/v2/account/wallet",
    "/v2/account/worldbosses",
    "/v2/achievements",
    "/v2/achievements/categories",
    "/v2/achievements/daily",
    "/v2/achievements/daily/tomorrow",
    "/v2/achievements/groups",
    "/v2/backstory",
    "/v2/backstory/answers",
    "/v2/backstory/questions",
    "/v2/build",
    "/v2/characters",
    "/v2/colors",
    "/v2/commerce/delivery",
    "/v2/commerce/exchange",
    "/v2/commerce/exchange/coins",
    "/v2/commerce/exchange/gems",
    "/v2/commerce/listings",
    "/v2/commerce/prices",
    "/v2/commerce/transactions",
    "/v2/continents",
    "/v2/createsubtoken",
    "/v2/currencies",
    "/v2/dailycrafting",
    "/v2/dungeons",
    "/v2/emblem",
    "/v2/emblem/backgrounds",
    "/v2/emblem/foregrounds",
    "/v2/emotes",
    "/v2/files",
    "/v2/finishers",
    "/v2/gliders",
    // "/v2/guild" answers 404/503; only the sub-routes below are probed.
    // "/v2/guild/:id",
    // "/v2/guild/:id/log",
    // "/v2/guild/:id/members",
    // "/v2/guild/:id/ranks",
    // "/v2/guild/:id/stash",
    // "/v2/guild/:id/storage",
    // "/v2/guild/:id/teams",
    // "/v2/guild/:id/treasury",
    // "/v2/guild/:id/upgrades",
    "/v2/guild/permissions",
    "/v2/guild/search",
    "/v2/guild/upgrades",
    "/v2/home/cats",
    "/v2/home/nodes",
    "/v2/items",
    "/v2/itemstats",
    "/v2/legends",
    "/v2/mailcarriers",
    "/v2/mapchests",
    "/v2/maps",
    "/v2/masteries",
    "/v2/materials",
    "/v2/minis",
    "/v2/mounts",
    "/v2/mounts/skins",
    "/v2/mounts/types",
    "/v2/novelties",
    "/v2/outfits",
    "/v2/pets",
    "/v2/professions",
    "/v2/pvp",
    "/v2/pvp/amulets",
    "/v2/pvp/games",
    "/v2/pvp/heroes",
    "/v2/pvp/ranks",
    "/v2/pvp/seasons",
    "/v2/pvp/seasons/A54849B7-7DBD-4958-91EF-72E18CD659BA/leaderboards",
    "/v2/pvp/standings",
    "/v2/pvp/stats",
    "/v2/quaggans",
    "/v2/quests",
    "/v2/races",
    "/v2/raids",
    "/v2/recipes",
    "/v2/recipes/search",
    "/v2/skills",
    "/v2/skins",
    "/v2/specializations",
    "/v2/stories",
    "/v2/stories/seasons",
    "/v2/titles",
    "/v2/tokeninfo",
    "/v2/traits",
    "/v2/worldbosses",
    "/v2/worlds",
    "/v2/wvw",
    "/v2/wvw/abilities",
    "/v2/wvw/matches",
    "/v2/wvw/matches/stats/1-1/teams",
    "/v2/wvw/objectives",
    "/v2/wvw/ranks",
    "/v2/wvw/upgrades",
    "/v1/build.json",
    "/v1/colors.json",
    "/v1/continents.json",
    "/v1/event_details.json",
    "/v1/files.json",
    "/v1/guild_details.json",
    "/v1/item_details.json",
    "/v1/items.json",
    "/v1/map_floor.json",
    "/v1/map_names.json",
    "/v1/maps.json",
    // "/v1/recipe_details.json",
    // "/v1/recipes.json",
    "/v1/skin_details.json",
    "/v1/skins.json",
    "/v1/world_names.json",
    "/v1/wvw/match_details.json",
    "/v1/wvw/matches.json",
    "/v1/wvw/objective_names.json",
    // Disabled upstream.
    // "/v1/event_names.json",
    // "/v1/events.json",
];

/// One fully-qualified resource URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    url: String,
    relative_path: String,
}

impl Endpoint {
    /// Builds an endpoint by appending `relative_path` to `base_url`.
    ///
    /// The path must start with `/`, must not carry a query string or
    /// fragment, and must not contain `.` or `..` segments, since it doubles
    /// as the artifact location on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] for a malformed path and
    /// [`Error::InvalidBaseUrl`] when the joined URL does not parse and
    /// [`Error::UnsupportedScheme`] when it is not http(s).
    pub fn new(base_url: &str, relative_path: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidEndpoint {
            path: relative_path.to_string(),
            reason,
        };

        if !relative_path.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if relative_path.contains(['?', '#']) {
            return Err(invalid("query strings and fragments are not supported"));
        }
        if relative_path
            .split('/')
            .skip(1)
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid("empty, '.' or '..' segment"));
        }

        let url = format!("{}{relative_path}", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&url).map_err(|source| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme {
                url: base_url.to_string(),
                scheme: parsed.scheme().to_string(),
            });
        }

        Ok(Self {
            url,
            relative_path: relative_path.to_string(),
        })
    }

    /// The full URL that is requested.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The API route, e.g. `/v2/build`.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Ordered list of endpoints probed in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    endpoints: Vec<Endpoint>,
}

impl Catalog {
    /// The built-in Guild Wars 2 catalog against [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Never fails for the shipped route list; the `Result` mirrors
    /// [`Catalog::from_paths`].
    pub fn builtin() -> Result<Self> {
        Self::from_paths(DEFAULT_BASE_URL, BUILTIN_PATHS)
    }

    /// Builds a catalog from an explicit list of relative paths.
    ///
    /// # Errors
    ///
    /// Fails on the first path that [`Endpoint::new`] rejects.
    pub fn from_paths<I, S>(base_url: &str, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let endpoints = paths
            .into_iter()
            .map(|path| Endpoint::new(base_url, path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { endpoints })
    }

    /// Parses a catalog file: one relative path per line.
    ///
    /// Leading and trailing whitespace is ignored, as are blank lines and
    /// lines starting with `#`.
    ///
    /// # Errors
    ///
    /// Fails on the first line that [`Endpoint::new`] rejects.
    pub fn parse(base_url: &str, text: &str) -> Result<Self> {
        let paths = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Self::from_paths(base_url, paths)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`Catalog::parse`].
    pub fn load(base_url: &str, path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        Self::parse(base_url, &text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    #[must_use]
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }
}

impl FromIterator<Endpoint> for Catalog {
    fn from_iter<I: IntoIterator<Item = Endpoint>>(iter: I) -> Self {
        Self {
            endpoints: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
