//! Embedded content tables
//!
//! The JSON files under `data/` are compiled into the binary and parsed once
//! on first access.

use crate::models::*;
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;

const PARAS_JSON: &str = include_str!("data/paras.json");
const DUAS_JSON: &str = include_str!("data/duas.json");
const DUROOD_JSON: &str = include_str!("data/durood.json");
const NAATS_JSON: &str = include_str!("data/naats.json");
const NAMES_OF_MUHAMMAD_JSON: &str = include_str!("data/names_of_muhammad.json");
const RECITERS_JSON: &str = include_str!("data/reciters.json");

const CALCULATION_METHODS: &[CalculationMethod] = &[
    CalculationMethod { id: 0, name: "Shia Ithna-Ashari" },
    CalculationMethod { id: 1, name: "University of Islamic Sciences, Karachi" },
    CalculationMethod { id: 2, name: "Islamic Society of North America" },
    CalculationMethod { id: 3, name: "Muslim World League" },
    CalculationMethod { id: 4, name: "Umm Al-Qura University, Makkah" },
    CalculationMethod { id: 5, name: "Egyptian General Authority of Survey" },
    CalculationMethod { id: 7, name: "Institute of Geophysics, University of Tehran" },
    CalculationMethod { id: 8, name: "Gulf Region" },
    CalculationMethod { id: 9, name: "Kuwait" },
];

fn parse<T: DeserializeOwned>(name: &str, json: &str) -> Vec<T> {
    serde_json::from_str(json)
        .unwrap_or_else(|e| panic!("Embedded table {} is invalid: {}", name, e))
}

lazy_static! {
    static ref PARAS: Vec<Para> = parse("paras", PARAS_JSON);
    static ref DUAS: Vec<Dua> = parse("duas", DUAS_JSON);
    static ref DUROOD: Vec<Durood> = parse("durood", DUROOD_JSON);
    static ref NAATS: Vec<Naat> = parse("naats", NAATS_JSON);
    static ref NAMES_OF_MUHAMMAD: Vec<ProphetName> =
        parse("names_of_muhammad", NAMES_OF_MUHAMMAD_JSON);
    static ref RECITERS: Vec<Reciter> = parse("reciters", RECITERS_JSON);
}

/// The 30 Paras in order
pub fn paras() -> &'static [Para] {
    &PARAS
}

pub fn para(number: u16) -> Option<&'static Para> {
    PARAS.iter().find(|p| p.number == number)
}

pub fn duas() -> &'static [Dua] {
    &DUAS
}

pub fn durood() -> &'static [Durood] {
    &DUROOD
}

pub fn naats() -> &'static [Naat] {
    &NAATS
}

pub fn names_of_muhammad() -> &'static [ProphetName] {
    &NAMES_OF_MUHAMMAD
}

pub fn reciters() -> &'static [Reciter] {
    &RECITERS
}

pub fn calculation_methods() -> &'static [CalculationMethod] {
    CALCULATION_METHODS
}

pub fn calculation_method(id: u8) -> Option<&'static CalculationMethod> {
    CALCULATION_METHODS.iter().find(|m| m.id == id)
}
