//! Case-insensitive keyword filtering

use crate::models::{Dua, ProphetName};
use crate::tables;
use qmfetch::DivineName;

/// Records that can be matched by keyword
pub trait Searchable {
    /// Fields compared against the query
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, needle_lower: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

impl Searchable for Dua {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.translation.as_str(), self.urdu.as_str()]
    }
}

impl Searchable for ProphetName {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.transliteration.as_str(),
            self.meaning.as_str(),
            self.description.as_str(),
        ]
    }
}

impl Searchable for DivineName {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.transliteration.as_str(), self.en.meaning.as_str()]
    }
}

/// Items matching `query`; a blank query keeps everything
pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.matches(&needle)).collect()
}

pub fn search_duas(query: &str) -> Vec<&'static Dua> {
    search(tables::duas(), query)
}

pub fn search_names_of_muhammad(query: &str) -> Vec<&'static ProphetName> {
    search(tables::names_of_muhammad(), query)
}
