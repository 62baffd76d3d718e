//! Recitation URLs on the islamic.network CDN

/// Root of the recitation files, 128 kbps
pub const AUDIO_CDN: &str = "https://cdn.islamic.network/quran";

/// Full surah recitation
pub fn surah_audio_url(reciter: &str, surah: u16) -> String {
    format!("{}/audio-surah/128/{}/{}.mp3", AUDIO_CDN, reciter, surah)
}

/// Single verse recitation, `ayah` is the global verse number
pub fn ayah_audio_url(edition: &str, ayah: u32) -> String {
    format!("{}/audio/128/{}/{}.mp3", AUDIO_CDN, edition, ayah)
}
