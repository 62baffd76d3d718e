//! Tagged fetch results and the fallback combinator

use crate::error::Result;
use serde::Serialize;

/// Where a payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Fallback,
}

/// A payload tagged with its provenance
///
/// Public fetch methods always return one of these; a failure upstream
/// never surfaces as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult<T> {
    pub source: Source,
    pub payload: T,
}

impl<T> FetchResult<T> {
    pub fn live(payload: T) -> Self {
        Self {
            source: Source::Live,
            payload,
        }
    }

    pub fn fallback(payload: T) -> Self {
        Self {
            source: Source::Fallback,
            payload,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == Source::Live
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        FetchResult {
            source: self.source,
            payload: f(self.payload),
        }
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Turns a fallible fetch into a [`FetchResult`]
pub trait OrFallback<T> {
    /// Keeps the value on success, otherwise logs the failure and
    /// substitutes the static record built by `fallback`
    fn or_fallback(self, endpoint: &str, fallback: impl FnOnce() -> T) -> FetchResult<T>;
}

impl<T> OrFallback<T> for Result<T> {
    fn or_fallback(self, endpoint: &str, fallback: impl FnOnce() -> T) -> FetchResult<T> {
        match self {
            Ok(value) => FetchResult::live(value),
            Err(e) => {
                tracing::warn!(
                    endpoint,
                    kind = ?e.kind(),
                    "Upstream fetch failed, using static fallback: {}",
                    e
                );
                FetchResult::fallback(fallback())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_or_fallback() {
        let ok: Result<u32> = Ok(3);
        assert_eq!(ok.or_fallback("test", || 0), FetchResult::live(3));

        let err: Result<u32> = Err(Error::Timeout);
        let res = err.or_fallback("test", || 7);
        assert!(!res.is_live());
        assert_eq!(res.payload, 7);
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_value(FetchResult::fallback(1)).unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["payload"], 1);
    }
}
