//! Shape checks applied to decoded payloads before they are accepted
//!
//! A response can decode fine and still be useless (an empty edition list,
//! a verse with no text). Those are treated like any other upstream failure.

use crate::error::{Error, Result};
use crate::models::*;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::malformed("empty list"));
        }
        self.iter().try_for_each(|item| item.validate())
    }
}

fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::malformed(format!("empty {}", field)))
    } else {
        Ok(())
    }
}

impl Validate for Location {
    fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(Error::malformed(format!(
                "coordinates out of range: {},{}",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }
}

impl Validate for Edition {
    fn validate(&self) -> Result<()> {
        non_empty("identifier", &self.identifier)
    }
}

impl Validate for SurahSummary {
    fn validate(&self) -> Result<()> {
        if !(1..=114).contains(&self.number) {
            return Err(Error::malformed(format!("surah number {}", self.number)));
        }
        non_empty("surah name", &self.name)
    }
}

impl Validate for Ayah {
    fn validate(&self) -> Result<()> {
        non_empty("ayah text", &self.text)
    }
}

impl Validate for Juz {
    fn validate(&self) -> Result<()> {
        self.ayahs.validate()
    }
}

impl Validate for Surah {
    fn validate(&self) -> Result<()> {
        non_empty("surah name", &self.name)?;
        self.ayahs.validate()
    }
}

impl Validate for PrayerTimes {
    fn validate(&self) -> Result<()> {
        for prayer in Prayer::ALL {
            let raw = self.timings.get(prayer);
            if parse_clock(raw).is_none() {
                return Err(Error::malformed(format!("{} time '{}'", prayer, raw)));
            }
        }
        Ok(())
    }
}

impl Validate for DivineName {
    fn validate(&self) -> Result<()> {
        non_empty("name", &self.name)?;
        non_empty("transliteration", &self.transliteration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    #[test]
    fn test_fallbacks_are_valid() {
        fallback::location().validate().unwrap();
        fallback::editions().validate().unwrap();
        fallback::surahs().validate().unwrap();
        fallback::juz(3).validate().unwrap();
        fallback::surah(1).validate().unwrap();
        fallback::surah(42).validate().unwrap();
        fallback::ayah(262, "en.asad").validate().unwrap();
        fallback::prayer_times(chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .validate()
            .unwrap();
        fallback::divine_names().validate().unwrap();
    }

    #[test]
    fn test_empty_list_rejected() {
        let empty: Vec<Edition> = Vec::new();
        assert!(empty.validate().unwrap_err().is_malformed());
    }

    #[test]
    fn test_bad_prayer_time_rejected() {
        let mut times =
            fallback::prayer_times(chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        times.timings.asr = "soon".into();
        assert!(times.validate().is_err());
    }
}
