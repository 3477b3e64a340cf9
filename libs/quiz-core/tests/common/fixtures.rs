//! Factory functions for verse data used across integration tests.

use quiz_core::{Surah, SurahCatalog};

/// Generate verse data text for a surah with `num_verses` synthetic verses.
pub fn sample_surah_data(number: u32, num_verses: u32) -> String {
    let verses = (1..=num_verses)
        .map(|v| {
            format!(
                "V: {v}\nAR: كَلِمَة{v} نَص{v}\nTR: Kalima{v} nass{v}\nEN: Word {v} text {v}\n"
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("SURAH: {number} | Sample {number} | عينة\n{verses}")
}

/// The built-in catalog.
pub fn builtin() -> SurahCatalog {
    SurahCatalog::builtin().expect("built-in data parses")
}

/// Every surah of the built-in catalog.
pub fn builtin_surahs() -> Vec<Surah> {
    builtin().available_surahs().to_vec()
}
