//! HTTP client for the Quran, prayer-time, geolocation and names providers
//!
//! Every upstream call exists in two forms:
//! - `try_*` methods return [`Result`] and expose the real failure
//! - the plain methods never fail: they wrap the `try_*` result with
//!   [`OrFallback`] and return a [`FetchResult`]
//!
//! # Example
//!
//! ```no_run
//! use qmfetch::ResourceClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ResourceClient::new().await?;
//!
//!     let location = client.location().await;
//!     let times = client
//!         .prayer_times(&location.payload.city, &location.payload.country, 3)
//!         .await;
//!     println!("{:?} Fajr at {}", times.source, times.payload.timings.fajr);
//!
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::fallback;
use crate::models::*;
use crate::result::{FetchResult, OrFallback};
use crate::validate::Validate;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_QURAN_BASE_URL: &str = "http://api.alquran.cloud/v1";
pub const DEFAULT_PRAYER_BASE_URL: &str = "https://api.aladhan.com/v1";
pub const DEFAULT_NAMES_URL: &str = "https://raw.githubusercontent.com/islamic-network/api.aladhan.com/master/public/cdn/99-names-of-allah.json";

/// Timeout of the light index lookups (location, editions, surahs)
pub const DEFAULT_SHORT_TIMEOUT_SECS: u64 = 5;

/// Timeout of the content lookups (juz, surah, ayah, prayer times, names)
pub const DEFAULT_LONG_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_USER_AGENT: &str = "QuranMajeed/0.1 (qmfetch)";

pub const DEFAULT_JUZ_EDITION: &str = "quran-uthmani";
pub const DEFAULT_TEXT_EDITION: &str = "en.asad";
pub const URDU_EDITION: &str = "ur.jalandhry";

/// Muslim World League
pub const DEFAULT_CALCULATION_METHOD: u8 = 3;

/// Total number of verses, used to bound random picks
pub const AYAH_COUNT: u32 = 6236;

/// Upstream locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Full URL of the geolocation lookup
    pub geolocation: String,
    /// alquran.cloud API root
    pub quran: String,
    /// aladhan.com API root
    pub prayer: String,
    /// Full URL of the names list
    pub names: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geolocation: DEFAULT_GEOLOCATION_URL.to_string(),
            quran: DEFAULT_QURAN_BASE_URL.to_string(),
            prayer: DEFAULT_PRAYER_BASE_URL.to_string(),
            names: DEFAULT_NAMES_URL.to_string(),
        }
    }
}

/// The same verse in Arabic, English and Urdu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerseSet {
    pub number: u32,
    pub arabic: FetchResult<Ayah>,
    pub english: FetchResult<Ayah>,
    pub urdu: FetchResult<Ayah>,
}

/// Client for all upstream providers
///
/// Stateless: nothing is cached and each call performs a single attempt.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    pub(crate) client: Client,
    endpoints: Endpoints,
    short_timeout: Duration,
    long_timeout: Duration,
}

impl ResourceClient {
    /// Create a new client with default settings
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn short_timeout(&self) -> Duration {
        self.short_timeout
    }

    pub fn long_timeout(&self) -> Duration {
        self.long_timeout
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    /// Single GET, status check, JSON decode
    async fn get_json<T: DeserializeOwned>(&self, url: Url, timeout: Duration) -> Result<T> {
        tracing::debug!(%url, ?timeout, "Fetching upstream resource");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(Error::from_request)?;

        if !response.status().is_success() {
            return Err(Error::ApiError(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(Error::from_request)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET on an enveloped endpoint, returning the validated `data` field
    async fn get_data<T>(&self, url: Url, timeout: Duration) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let envelope: Envelope<T> = self.get_json(url, timeout).await?;
        envelope.data.validate()?;
        Ok(envelope.data)
    }

    fn url_with_segments<I>(base: &str, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = Url::parse(base)?;
        url.path_segments_mut()
            .map_err(|_| Error::other(format!("Cannot append a path to {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn quran_url<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::url_with_segments(&self.endpoints.quran, segments)
    }

    // ========================================================================
    // Geolocation
    // ========================================================================

    pub async fn try_location(&self) -> Result<Location> {
        let url = Url::parse(&self.endpoints.geolocation)?;
        let info: IpInfo = self.get_json(url, self.short_timeout).await?;

        let loc = info
            .loc
            .ok_or_else(|| Error::malformed("missing loc field"))?;
        let (lat, lng) = loc
            .split_once(',')
            .ok_or_else(|| Error::malformed(format!("loc is not a pair: {}", loc)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| Error::malformed(format!("bad coordinate '{}': {}", v, e)))
        };

        let location = Location {
            city: info.city.unwrap_or_else(|| "Unknown".to_string()),
            country: info.country.unwrap_or_else(|| "Unknown".to_string()),
            latitude: parse(lat)?,
            longitude: parse(lng)?,
        };
        location.validate()?;
        Ok(location)
    }

    /// Approximate location of the caller, Islamabad when unknown
    pub async fn location(&self) -> FetchResult<Location> {
        self.try_location()
            .await
            .or_fallback("location", fallback::location)
    }

    // ========================================================================
    // Quran text and audio metadata
    // ========================================================================

    pub async fn try_editions(&self) -> Result<Vec<Edition>> {
        let url = self.quran_url(["edition"])?;
        self.get_data(url, self.short_timeout).await
    }

    pub async fn editions(&self) -> FetchResult<Vec<Edition>> {
        self.try_editions()
            .await
            .or_fallback("editions", fallback::editions)
    }

    pub async fn try_surahs(&self) -> Result<Vec<SurahSummary>> {
        let url = self.quran_url(["surah"])?;
        self.get_data(url, self.short_timeout).await
    }

    pub async fn surahs(&self) -> FetchResult<Vec<SurahSummary>> {
        self.try_surahs().await.or_fallback("surahs", fallback::surahs)
    }

    pub async fn try_juz(&self, number: u8, edition: &str) -> Result<Juz> {
        let number = number.to_string();
        let url = self.quran_url(["juz", number.as_str(), edition])?;
        self.get_data(url, self.long_timeout).await
    }

    /// A section in the given edition (`quran-uthmani` by default upstream)
    pub async fn juz(&self, number: u8, edition: &str) -> FetchResult<Juz> {
        self.try_juz(number, edition)
            .await
            .or_fallback("juz", || fallback::juz(number))
    }

    pub async fn try_surah(&self, number: u16, edition: &str) -> Result<Surah> {
        let number = number.to_string();
        let url = self.quran_url(["surah", number.as_str(), edition])?;
        self.get_data(url, self.long_timeout).await
    }

    pub async fn surah(&self, number: u16, edition: &str) -> FetchResult<Surah> {
        self.try_surah(number, edition)
            .await
            .or_fallback("surah", || fallback::surah(number))
    }

    pub async fn try_ayah(&self, number: u32, edition: &str) -> Result<Ayah> {
        let number = number.to_string();
        let url = self.quran_url(["ayah", number.as_str(), edition])?;
        self.get_data(url, self.long_timeout).await
    }

    pub async fn ayah(&self, number: u32, edition: &str) -> FetchResult<Ayah> {
        self.try_ayah(number, edition)
            .await
            .or_fallback("ayah", || fallback::ayah(number, edition))
    }

    /// Fetches verse `number` in the three display editions concurrently
    pub async fn verse_set(&self, number: u32) -> VerseSet {
        let (arabic, english, urdu) = tokio::join!(
            self.ayah(number, DEFAULT_JUZ_EDITION),
            self.ayah(number, DEFAULT_TEXT_EDITION),
            self.ayah(number, URDU_EDITION),
        );
        VerseSet {
            number,
            arabic,
            english,
            urdu,
        }
    }

    // ========================================================================
    // Prayer times
    // ========================================================================

    pub async fn try_prayer_times_on(
        &self,
        date: NaiveDate,
        city: &str,
        country: &str,
        method: u8,
    ) -> Result<PrayerTimes> {
        let day = date.format("%d-%m-%Y").to_string();
        let mut url =
            Self::url_with_segments(&self.endpoints.prayer, ["timingsByCity", day.as_str()])?;
        url.query_pairs_mut()
            .append_pair("city", city)
            .append_pair("country", country)
            .append_pair("method", &method.to_string());
        self.get_data(url, self.long_timeout).await
    }

    /// Prayer times for `date`; the fallback is dated `date` as well
    pub async fn prayer_times_on(
        &self,
        date: NaiveDate,
        city: &str,
        country: &str,
        method: u8,
    ) -> FetchResult<PrayerTimes> {
        self.try_prayer_times_on(date, city, country, method)
            .await
            .or_fallback("prayer_times", || fallback::prayer_times(date))
    }

    /// Today's prayer times (local calendar)
    pub async fn prayer_times(
        &self,
        city: &str,
        country: &str,
        method: u8,
    ) -> FetchResult<PrayerTimes> {
        let today = chrono::Local::now().date_naive();
        self.prayer_times_on(today, city, country, method).await
    }

    // ========================================================================
    // Names
    // ========================================================================

    pub async fn try_asma_al_husna(&self) -> Result<Vec<DivineName>> {
        let url = Url::parse(&self.endpoints.names)?;
        let raw: Vec<RawDivineName> = self.get_json(url, self.long_timeout).await?;
        let names: Vec<DivineName> = raw.into_iter().map(DivineName::from).collect();
        names.validate()?;
        Ok(names)
    }

    /// The 99 names of God
    pub async fn asma_al_husna(&self) -> FetchResult<Vec<DivineName>> {
        self.try_asma_al_husna()
            .await
            .or_fallback("asma_al_husna", fallback::divine_names)
    }
}

/// Builder for configuring a [`ResourceClient`]
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    endpoints: Endpoints,
    short_timeout: Duration,
    long_timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            endpoints: Endpoints::default(),
            short_timeout: Duration::from_secs(DEFAULT_SHORT_TIMEOUT_SECS),
            long_timeout: Duration::from_secs(DEFAULT_LONG_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn geolocation_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.geolocation = url.into();
        self
    }

    pub fn quran_base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.quran = url.into();
        self
    }

    pub fn prayer_base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.prayer = url.into();
        self
    }

    pub fn names_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.names = url.into();
        self
    }

    /// Timeout of location, editions and surahs lookups
    pub fn short_timeout(mut self, timeout: Duration) -> Self {
        self.short_timeout = timeout;
        self
    }

    /// Timeout of juz, surah, ayah, prayer times and names lookups
    pub fn long_timeout(mut self, timeout: Duration) -> Self {
        self.long_timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<ResourceClient> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder().user_agent(&self.user_agent).build()?,
        };

        Ok(ResourceClient {
            client,
            endpoints: self.endpoints,
            short_timeout: self.short_timeout,
            long_timeout: self.long_timeout,
        })
    }
}
