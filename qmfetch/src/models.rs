//! Data models for the upstream provider responses
//!
//! Every record serializes to the same camelCase shape whether it was
//! decoded from a live response or built by [`crate::fallback`], so the
//! rendering side never needs to know where it came from.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Envelopes
// ============================================================================

/// `{ "code": 200, "status": "OK", "data": ... }` wrapper used by
/// alquran.cloud and aladhan.com
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

// ============================================================================
// Geolocation
// ============================================================================

/// Approximate user location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub city: String,
    /// Two-letter country code as returned by the provider
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw ipinfo.io response; only the fields we read
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IpInfo {
    pub city: Option<String>,
    pub country: Option<String>,
    /// `"lat,lng"`
    pub loc: Option<String>,
}

// ============================================================================
// Quran text / audio metadata
// ============================================================================

/// A text or audio edition (translation, recitation...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    /// e.g. "quran-uthmani", "en.asad", "ar.alafasy"
    pub identifier: String,
    pub language: String,
    pub name: String,
    pub english_name: String,
    /// "text" or "audio"
    pub format: String,
}

impl Edition {
    pub fn is_audio(&self) -> bool {
        self.format == "audio"
    }
}

/// Entry of the chapter index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SurahSummary {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u16,
    pub revelation_type: String,
}

/// Chapter reference embedded in a verse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SurahRef {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
}

/// A single verse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    /// Global verse number (1..=6236)
    pub number: u32,
    pub text: String,
    pub number_in_surah: u16,
    pub juz: u8,
    /// Absent when the verse is listed inside its own surah
    #[serde(default)]
    pub surah: Option<SurahRef>,
    #[serde(default)]
    pub page: Option<u16>,
    /// Recitation URL, audio editions only
    #[serde(default)]
    pub audio: Option<String>,
}

/// One of the 30 sections (Para)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Juz {
    pub number: u8,
    pub ayahs: Vec<Ayah>,
}

/// A full chapter in a given edition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub revelation_type: String,
    pub number_of_ayahs: u16,
    pub ayahs: Vec<Ayah>,
}

// ============================================================================
// Prayer times
// ============================================================================

/// Daily prayer times and the dates they apply to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrayerTimes {
    pub timings: Timings,
    pub date: PrayerDate,
}

/// Time-of-day strings, `HH:MM` optionally followed by a suffix such as ` (PKT)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timings {
    #[serde(rename = "Fajr")]
    pub fajr: String,
    #[serde(rename = "Sunrise")]
    pub sunrise: String,
    #[serde(rename = "Dhuhr")]
    pub dhuhr: String,
    #[serde(rename = "Asr")]
    pub asr: String,
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
    #[serde(rename = "Isha")]
    pub isha: String,
    #[serde(rename = "Imsak", default)]
    pub imsak: Option<String>,
    #[serde(rename = "Midnight", default)]
    pub midnight: Option<String>,
    #[serde(rename = "Firstthird", default)]
    pub firstthird: Option<String>,
    #[serde(rename = "Lastthird", default)]
    pub lastthird: Option<String>,
}

/// Same day in the Gregorian and Hijri calendars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrayerDate {
    pub gregorian: CalendarDate,
    pub hijri: CalendarDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDate {
    /// `DD-MM-YYYY`
    pub date: String,
    pub weekday: Weekday,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Weekday {
    pub en: String,
}

/// The six daily markers shown on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        };
        f.write_str(name)
    }
}

/// Parses `"05:30"` or `"05:30 (PKT)"`
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let clock = value.split_whitespace().next()?;
    NaiveTime::parse_from_str(clock, "%H:%M").ok()
}

impl Timings {
    /// Raw string for a prayer
    pub fn get(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }
}

impl PrayerTimes {
    /// Daily prayers in order, suffixes dropped
    ///
    /// Unparsable entries are skipped; validated records always yield six.
    pub fn schedule(&self) -> Vec<(Prayer, NaiveTime)> {
        Prayer::ALL
            .iter()
            .filter_map(|p| parse_clock(self.timings.get(*p)).map(|t| (*p, t)))
            .collect()
    }

    /// First prayer strictly after `now`, wrapping to the next day's Fajr
    pub fn next_after(&self, now: NaiveTime) -> Option<(Prayer, NaiveTime)> {
        let schedule = self.schedule();
        schedule
            .iter()
            .find(|(_, t)| *t > now)
            .or_else(|| schedule.first())
            .copied()
    }
}

// ============================================================================
// Names of God
// ============================================================================

/// One of the 99 names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DivineName {
    pub number: u16,
    /// Arabic script
    pub name: String,
    pub transliteration: String,
    pub en: Meaning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meaning {
    pub meaning: String,
}

/// Raw CDN item; `number` comes either as a string or an integer
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDivineName {
    #[serde(deserialize_with = "number_or_string")]
    pub number: u16,
    pub arabic: String,
    pub transliteration: String,
    pub meaning: String,
}

impl From<RawDivineName> for DivineName {
    fn from(raw: RawDivineName) -> Self {
        Self {
            number: raw.number,
            name: raw.arabic,
            transliteration: raw.transliteration,
            en: Meaning {
                meaning: raw.meaning,
            },
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u16),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(fajr: &str, isha: &str) -> PrayerTimes {
        PrayerTimes {
            timings: Timings {
                fajr: fajr.into(),
                sunrise: "06:45".into(),
                dhuhr: "12:15".into(),
                asr: "15:30".into(),
                maghrib: "18:00".into(),
                isha: isha.into(),
                imsak: None,
                midnight: None,
                firstthird: None,
                lastthird: None,
            },
            date: PrayerDate {
                gregorian: CalendarDate {
                    date: "01-03-2025".into(),
                    weekday: Weekday { en: "Saturday".into() },
                },
                hijri: CalendarDate {
                    date: "01-09-1446".into(),
                    weekday: Weekday { en: "Al Sabt".into() },
                },
            },
        }
    }

    #[test]
    fn test_parse_clock_drops_suffix() {
        assert_eq!(
            parse_clock("05:12 (PKT)"),
            NaiveTime::from_hms_opt(5, 12, 0)
        );
        assert_eq!(parse_clock("19:30"), NaiveTime::from_hms_opt(19, 30, 0));
        assert_eq!(parse_clock("late"), None);
        assert_eq!(parse_clock(""), None);
    }

    #[test]
    fn test_schedule_order() {
        let schedule = times("05:30 (PKT)", "19:30 (PKT)").schedule();
        let order: Vec<Prayer> = schedule.iter().map(|(p, _)| *p).collect();
        assert_eq!(order, Prayer::ALL.to_vec());
    }

    #[test]
    fn test_next_after_wraps_to_fajr() {
        let t = times("05:30", "19:30");
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(t.next_after(noon).map(|(p, _)| p), Some(Prayer::Dhuhr));

        let late = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        assert_eq!(t.next_after(late).map(|(p, _)| p), Some(Prayer::Fajr));
    }

    #[test]
    fn test_raw_divine_name_accepts_string_number() {
        let raw: RawDivineName = serde_json::from_str(
            r#"{"number":"7","arabic":"المهيمن","transliteration":"Al-Muhaymin","meaning":"The Guardian"}"#,
        )
        .unwrap();
        let name = DivineName::from(raw);
        assert_eq!(name.number, 7);
        assert_eq!(name.en.meaning, "The Guardian");

        let raw: RawDivineName = serde_json::from_str(
            r#"{"number":8,"arabic":"العزيز","transliteration":"Al-Aziz","meaning":"The Mighty"}"#,
        )
        .unwrap();
        assert_eq!(raw.number, 8);
    }

    #[test]
    fn test_ayah_optional_fields_default() {
        let ayah: Ayah = serde_json::from_str(
            r#"{"number":1,"text":"t","numberInSurah":1,"juz":1,"hizbQuarter":1}"#,
        )
        .unwrap();
        assert!(ayah.surah.is_none());
        assert!(ayah.page.is_none());
    }
}
