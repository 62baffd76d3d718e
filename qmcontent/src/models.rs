//! Records of the static content tables

use serde::{Deserialize, Serialize};

/// One of the 30 sections with its recitation stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Para {
    pub number: u16,
    /// Opening words in Arabic script
    pub name: String,
    /// Surahs covered, comma separated
    pub surahs: String,
    pub stream_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dua {
    pub id: u32,
    pub title: String,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub urdu: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durood {
    pub id: u32,
    pub title: String,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub urdu: String,
    pub virtues: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Naat {
    pub id: u32,
    pub title: String,
    pub reciter: String,
    pub language: String,
    /// `m:ss`
    pub duration: String,
    pub audio_url: String,
    pub lyrics_excerpt: String,
}

/// A name of the Prophet with its commentary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProphetName {
    pub number: u16,
    pub name: String,
    pub transliteration: String,
    pub meaning: String,
    pub description: String,
    pub reference: String,
    pub significance: String,
}

/// An audio edition offered in the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reciter {
    /// Edition identifier, e.g. `ar.alafasy`
    pub id: String,
    pub name: String,
    pub language: String,
}

/// Prayer time calculation convention understood by aladhan.com
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculationMethod {
    pub id: u8,
    pub name: &'static str,
}
