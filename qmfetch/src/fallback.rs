//! Static records substituted when an upstream provider is unreachable
//!
//! Each builder returns a value of exactly the type the matching live call
//! decodes, so both serialize with the same set of keys.

use crate::models::*;
use chrono::NaiveDate;

pub const FALLBACK_CITY: &str = "Islamabad";
pub const FALLBACK_COUNTRY: &str = "PK";
pub const FALLBACK_LATITUDE: f64 = 33.6844;
pub const FALLBACK_LONGITUDE: f64 = 73.0479;

const BASMALA_AR: &str = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";
const BASMALA_EN: &str = "In the name of Allah, the Most Gracious, the Most Merciful";
const BASMALA_UR: &str = "اللہ کے نام سے جو بڑا مہربان نہایت رحم والا ہے";
const HAMD_AR: &str = "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ";

const FALLBACK_HIJRI_DATE: &str = "15-06-1446";

/// (identifier, language, name, english name, format)
const EDITIONS: &[(&str, &str, &str, &str, &str)] = &[
    ("quran-uthmani", "ar", "Quran Uthmani", "Quran Uthmani", "text"),
    ("en.asad", "en", "Muhammad Asad", "Muhammad Asad", "text"),
    ("ur.jalandhry", "ur", "Jalandhry", "Jalandhry (Urdu)", "text"),
    ("ur.ahmedali", "ur", "Ahmed Ali", "Ahmed Ali (Urdu)", "text"),
    ("ar.alafasy", "ar", "Alafasy", "Alafasy", "audio"),
];

/// (number, name, english name, translation, ayahs, revelation type)
const SURAHS: &[(u16, &str, &str, &str, u16, &str)] = &[
    (1, "الفاتحة", "Al-Fatiha", "The Opening", 7, "Meccan"),
    (2, "البقرة", "Al-Baqara", "The Cow", 286, "Medinan"),
    (3, "آل عمران", "Aal-Imran", "The Family of Imran", 200, "Medinan"),
    (4, "النساء", "An-Nisa", "The Women", 176, "Medinan"),
    (5, "المائدة", "Al-Maida", "The Table Spread", 120, "Medinan"),
];

const FATIHA_EN: &[&str] = &[
    "In the name of Allah, the Entirely Merciful, the Especially Merciful.",
    "[All] praise is [due] to Allah, Lord of the worlds -",
    "The Entirely Merciful, the Especially Merciful,",
    "Sovereign of the Day of Recompense.",
    "It is You we worship and You we ask for help.",
    "Guide us to the straight path -",
    "The path of those upon whom You have bestowed favor, not of those who have evoked [Your] anger or of those who are astray.",
];

/// (number, arabic, transliteration, meaning)
const DIVINE_NAMES: &[(u16, &str, &str, &str)] = &[
    (1, "الرحمن", "Ar-Rahman", "The Most Compassionate"),
    (2, "الرحيم", "Ar-Raheem", "The Most Merciful"),
    (3, "الملك", "Al-Malik", "The King, The Sovereign"),
    (4, "القدوس", "Al-Quddus", "The Holy One"),
    (5, "السلام", "As-Salam", "The Source of Peace"),
    (6, "المؤمن", "Al-Mu'min", "The Guarantor of Faith"),
    (7, "المهيمن", "Al-Muhaymin", "The Guardian"),
    (8, "العزيز", "Al-Aziz", "The Mighty"),
    (9, "الجبار", "Al-Jabbar", "The Compeller"),
    (10, "المتكبر", "Al-Mutakabbir", "The Greatest"),
    (11, "الخالق", "Al-Khaliq", "The Creator"),
    (12, "البارئ", "Al-Bari'", "The Maker"),
    (13, "المصور", "Al-Musawwir", "The Fashioner"),
    (14, "الغفار", "Al-Ghaffar", "The Ever-Forgiving"),
    (15, "القهار", "Al-Qahhar", "The Subduer"),
    (16, "الوهاب", "Al-Wahhab", "The Bestower"),
    (17, "الرزاق", "Ar-Razzaq", "The Provider"),
    (18, "الفتاح", "Al-Fattah", "The Opener"),
    (19, "العليم", "Al-Alim", "The All-Knowing"),
    (20, "القابض", "Al-Qabid", "The Withholder"),
    (21, "الباسط", "Al-Basit", "The Extender"),
    (22, "الخافض", "Al-Khafid", "The Abaser"),
    (23, "الرافع", "Ar-Rafi", "The Exalter"),
    (24, "المعز", "Al-Mu'izz", "The Bestower of Honors"),
    (25, "المذل", "Al-Mudhill", "The Humiliator"),
    (26, "السميع", "As-Sami", "The All-Hearing"),
    (27, "البصير", "Al-Basir", "The All-Seeing"),
    (28, "الحكم", "Al-Hakam", "The Judge"),
    (29, "العدل", "Al-Adl", "The Just"),
    (30, "اللطيف", "Al-Latif", "The Subtle One"),
    (31, "الخبير", "Al-Khabir", "The All-Aware"),
    (32, "الحليم", "Al-Halim", "The Forbearing"),
    (33, "العظيم", "Al-Azim", "The Magnificent"),
    (34, "الغفور", "Al-Ghafur", "The Forgiving"),
    (35, "الشكور", "Ash-Shakur", "The Appreciative"),
    (36, "العلي", "Al-Ali", "The Most High"),
    (37, "الكبير", "Al-Kabir", "The Greatest"),
    (38, "الحفيظ", "Al-Hafiz", "The Preserver"),
    (39, "المقيت", "Al-Muqit", "The Sustainer"),
    (40, "الحسيب", "Al-Hasib", "The Reckoner"),
    (41, "الجليل", "Al-Jalil", "The Majestic"),
    (42, "الكريم", "Al-Karim", "The Generous"),
    (43, "الرقيب", "Ar-Raqib", "The Watchful"),
    (44, "المجيب", "Al-Mujib", "The Responsive"),
    (45, "الواسع", "Al-Wasi", "The All-Encompassing"),
    (46, "الحكيم", "Al-Hakim", "The Wise"),
    (47, "الودود", "Al-Wadud", "The Loving"),
    (48, "المجيد", "Al-Majid", "The Glorious"),
    (49, "الباعث", "Al-Ba'ith", "The Resurrector"),
    (50, "الشهيد", "Ash-Shahid", "The Witness"),
    (51, "الحق", "Al-Haqq", "The Truth"),
    (52, "الوكيل", "Al-Wakil", "The Trustee"),
    (53, "القوي", "Al-Qawiyy", "The Strong"),
    (54, "المتين", "Al-Matin", "The Firm"),
    (55, "الولي", "Al-Waliyy", "The Protecting Friend"),
    (56, "الحميد", "Al-Hamid", "The Praiseworthy"),
    (57, "المحصي", "Al-Muhsi", "The Enumerator"),
    (58, "المبدئ", "Al-Mubdi", "The Originator"),
    (59, "المعيد", "Al-Mu'id", "The Restorer"),
    (60, "المحيي", "Al-Muhyi", "The Giver of Life"),
    (61, "المميت", "Al-Mumit", "The Taker of Life"),
    (62, "الحي", "Al-Hayy", "The Ever-Living"),
    (63, "القيوم", "Al-Qayyum", "The Self-Subsisting"),
    (64, "الواجد", "Al-Wajid", "The Finder"),
    (65, "الماجد", "Al-Majid", "The Noble"),
    (66, "الواحد", "Al-Wahid", "The One"),
    (67, "الأحد", "Al-Ahad", "The Unique"),
    (68, "الصمد", "As-Samad", "The Eternal"),
    (69, "القادر", "Al-Qadir", "The Capable"),
    (70, "المقتدر", "Al-Muqtadir", "The Powerful"),
    (71, "المقدم", "Al-Muqaddim", "The Expediter"),
    (72, "المؤخر", "Al-Mu'akhkhir", "The Delayer"),
    (73, "الأول", "Al-Awwal", "The First"),
    (74, "الآخر", "Al-Akhir", "The Last"),
    (75, "الظاهر", "Az-Zahir", "The Manifest"),
    (76, "الباطن", "Al-Batin", "The Hidden"),
    (77, "الوالي", "Al-Wali", "The Governor"),
    (78, "المتعالي", "Al-Muta'ali", "The Most Exalted"),
    (79, "البر", "Al-Barr", "The Source of Goodness"),
    (80, "التواب", "At-Tawwab", "The Acceptor of Repentance"),
    (81, "المنتقم", "Al-Muntaqim", "The Avenger"),
    (82, "العفو", "Al-'Afuww", "The Pardoner"),
    (83, "الرؤوف", "Ar-Ra'uf", "The Kind"),
    (84, "مالك الملك", "Malik Al-Mulk", "The Owner of Sovereignty"),
    (85, "ذو الجلال والإكرام", "Dhul-Jalali wal-Ikram", "The Lord of Majesty and Honor"),
    (86, "المقسط", "Al-Muqsit", "The Equitable"),
    (87, "الجامع", "Al-Jami", "The Gatherer"),
    (88, "الغني", "Al-Ghani", "The Self-Sufficient"),
    (89, "المغني", "Al-Mughni", "The Enricher"),
    (90, "المانع", "Al-Mani'", "The Preventer"),
    (91, "الضار", "Ad-Darr", "The Distresser"),
    (92, "النافع", "An-Nafi'", "The Benefiter"),
    (93, "النور", "An-Nur", "The Light"),
    (94, "الهادي", "Al-Hadi", "The Guide"),
    (95, "البديع", "Al-Badi'", "The Originator"),
    (96, "الباقي", "Al-Baqi", "The Everlasting"),
    (97, "الوارث", "Al-Warith", "The Inheritor"),
    (98, "الرشيد", "Ar-Rashid", "The Guide to the Right Path"),
    (99, "الصبور", "As-Sabur", "The Patient"),
];

pub fn location() -> Location {
    Location {
        city: FALLBACK_CITY.to_string(),
        country: FALLBACK_COUNTRY.to_string(),
        latitude: FALLBACK_LATITUDE,
        longitude: FALLBACK_LONGITUDE,
    }
}

pub fn editions() -> Vec<Edition> {
    EDITIONS
        .iter()
        .map(|(identifier, language, name, english_name, format)| Edition {
            identifier: identifier.to_string(),
            language: language.to_string(),
            name: name.to_string(),
            english_name: english_name.to_string(),
            format: format.to_string(),
        })
        .collect()
}

pub fn surahs() -> Vec<SurahSummary> {
    SURAHS
        .iter()
        .map(|(number, name, english, translation, ayahs, revelation)| SurahSummary {
            number: *number,
            name: name.to_string(),
            english_name: english.to_string(),
            english_name_translation: translation.to_string(),
            number_of_ayahs: *ayahs,
            revelation_type: revelation.to_string(),
        })
        .collect()
}

fn known_surah(number: u16) -> Option<SurahSummary> {
    surahs().into_iter().find(|s| s.number == number)
}

fn fatiha_ref() -> SurahRef {
    SurahRef {
        number: 1,
        name: "الفاتحة".to_string(),
        english_name: "Al-Fatiha".to_string(),
        english_name_translation: "The Opening".to_string(),
    }
}

/// First two verses of Al-Fatiha, labelled with the requested juz
pub fn juz(number: u8) -> Juz {
    let ayahs = [BASMALA_AR, HAMD_AR]
        .iter()
        .enumerate()
        .map(|(i, text)| Ayah {
            number: i as u32 + 1,
            text: text.to_string(),
            number_in_surah: i as u16 + 1,
            juz: number,
            surah: Some(fatiha_ref()),
            page: None,
            audio: None,
        })
        .collect();
    Juz { number, ayahs }
}

/// Al-Fatiha in English for surah 1
///
/// Other surahs get their index metadata when it is known (a placeholder
/// name otherwise) and the basmala as single verse.
pub fn surah(number: u16) -> Surah {
    if number == 1 {
        let ayahs = FATIHA_EN
            .iter()
            .enumerate()
            .map(|(i, text)| Ayah {
                number: i as u32 + 1,
                text: text.to_string(),
                number_in_surah: i as u16 + 1,
                juz: 1,
                surah: None,
                page: Some(1),
                audio: None,
            })
            .collect();
        return Surah {
            number: 1,
            name: "الفاتحة".to_string(),
            english_name: "Al-Fatiha".to_string(),
            english_name_translation: "The Opening".to_string(),
            revelation_type: "Meccan".to_string(),
            number_of_ayahs: 7,
            ayahs,
        };
    }

    let summary = known_surah(number).unwrap_or_else(|| SurahSummary {
        number,
        name: format!("Surah {}", number),
        english_name: format!("Surah {}", number),
        english_name_translation: String::new(),
        number_of_ayahs: 1,
        revelation_type: String::new(),
    });

    Surah {
        number,
        name: summary.name,
        english_name: summary.english_name,
        english_name_translation: summary.english_name_translation,
        revelation_type: summary.revelation_type,
        number_of_ayahs: summary.number_of_ayahs,
        ayahs: vec![Ayah {
            number: 1,
            text: BASMALA_EN.to_string(),
            number_in_surah: 1,
            juz: 1,
            surah: None,
            page: Some(1),
            audio: None,
        }],
    }
}

/// Basmala in the script of `edition`
pub fn ayah(number: u32, edition: &str) -> Ayah {
    let text = match edition {
        "quran-uthmani" => BASMALA_AR,
        "ur.jalandhry" => BASMALA_UR,
        _ => BASMALA_EN,
    };
    Ayah {
        number,
        text: text.to_string(),
        number_in_surah: 1,
        juz: 1,
        surah: Some(fatiha_ref()),
        page: None,
        audio: None,
    }
}

/// Fixed timings dated `today`
pub fn prayer_times(today: NaiveDate) -> PrayerTimes {
    let weekday = Weekday {
        en: today.format("%A").to_string(),
    };
    PrayerTimes {
        timings: Timings {
            fajr: "05:30".to_string(),
            sunrise: "06:45".to_string(),
            dhuhr: "12:15".to_string(),
            asr: "15:30".to_string(),
            maghrib: "18:00".to_string(),
            isha: "19:30".to_string(),
            imsak: Some("05:20".to_string()),
            midnight: Some("00:15".to_string()),
            firstthird: Some("22:00".to_string()),
            lastthird: Some("02:30".to_string()),
        },
        date: PrayerDate {
            gregorian: CalendarDate {
                date: today.format("%d-%m-%Y").to_string(),
                weekday: weekday.clone(),
            },
            hijri: CalendarDate {
                date: FALLBACK_HIJRI_DATE.to_string(),
                weekday,
            },
        },
    }
}

/// The complete list of the 99 names
pub fn divine_names() -> Vec<DivineName> {
    DIVINE_NAMES
        .iter()
        .map(|(number, name, transliteration, meaning)| DivineName {
            number: *number,
            name: name.to_string(),
            transliteration: transliteration.to_string(),
            en: Meaning {
                meaning: meaning.to_string(),
            },
        })
        .collect()
}
