use bitflags::bitflags;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::utils::has_katakana,
    dictionary::DictionaryEntry,
};

/// Script and conjugation flags of a vocabulary record. Stored as the raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(u32);

bitflags! {
    impl Category: u32 {
        const KATAKANA = 1;
        const ICHIDAN = 1 << 1;
        const KANJI = 1 << 2;
        const GODAN_SU = 1 << 3;
        const GODAN_RU = 1 << 4;
        const GODAN_U = 1 << 5;
        const GODAN_TSU = 1 << 6;
        const GODAN_KU = 1 << 7;
        const GODAN_GU = 1 << 8;
        const GODAN_MU = 1 << 9;
        const GODAN_BU = 1 << 10;
        const GODAN_NU = 1 << 11;

        const GODAN = Self::GODAN_SU.bits()
            | Self::GODAN_RU.bits()
            | Self::GODAN_U.bits()
            | Self::GODAN_TSU.bits()
            | Self::GODAN_KU.bits()
            | Self::GODAN_GU.bits()
            | Self::GODAN_MU.bits()
            | Self::GODAN_BU.bits()
            | Self::GODAN_NU.bits();

        const VERB = Self::ICHIDAN.bits() | Self::GODAN.bits();
    }
}

// Short codes first, then the long labels some dataset builds carry instead.
const POS_CATEGORIES: &[(&str, Category)] = &[
    ("v1", Category::ICHIDAN),
    ("v1-s", Category::ICHIDAN),
    ("v5s", Category::GODAN_SU),
    ("v5k", Category::GODAN_KU),
    ("v5k-s", Category::GODAN_KU),
    ("v5g", Category::GODAN_GU),
    ("v5r", Category::GODAN_RU),
    ("v5r-i", Category::GODAN_RU),
    ("v5aru", Category::GODAN_RU),
    ("v5u", Category::GODAN_U),
    ("v5u-s", Category::GODAN_U),
    ("v5t", Category::GODAN_TSU),
    ("v5m", Category::GODAN_MU),
    ("v5b", Category::GODAN_BU),
    ("v5n", Category::GODAN_NU),
    ("Ichidan verb", Category::ICHIDAN),
    ("Godan verb with 'su' ending", Category::GODAN_SU),
    ("Godan verb with 'ku' ending", Category::GODAN_KU),
    ("Godan verb - Iku/Yuku special class", Category::GODAN_KU),
    ("Godan verb with 'gu' ending", Category::GODAN_GU),
    ("Godan verb with 'ru' ending", Category::GODAN_RU),
    ("Godan verb with 'ru' ending (irregular verb)", Category::GODAN_RU),
    ("Godan verb - -aru special class", Category::GODAN_RU),
    ("Godan verb with 'u' ending", Category::GODAN_U),
    ("Godan verb with 'u' ending (special class)", Category::GODAN_U),
    ("Godan verb with 'tsu' ending", Category::GODAN_TSU),
    ("Godan verb with 'mu' ending", Category::GODAN_MU),
    ("Godan verb with 'bu' ending", Category::GODAN_BU),
    ("Godan verb with 'nu' ending", Category::GODAN_NU),
];

impl Category {
    /// Conjugation bit implied by one part-of-speech tag; unknown tags give nothing.
    pub fn from_part_of_speech(tag: &str) -> Category {
        POS_CATEGORIES
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, category)| *category)
            .unwrap_or_else(Category::empty)
    }
}

/// Katakana bit from the base form, plus every conjugation bit any sense of any entry implies.
pub fn categorize(base_form: &str, entries: &[DictionaryEntry]) -> Category {
    let mut category = Category::empty();
    if has_katakana(base_form) {
        category |= Category::KATAKANA;
    }

    for sense in entries.iter().flat_map(|entry| entry.senses.iter()) {
        for tag in &sense.parts_of_speech {
            category |= Category::from_part_of_speech(tag);
        }
    }
    category
}

/// Named drill filter. Unknown names select nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Any(Category),
    Nothing,
}

impl CategoryFilter {
    pub fn parse(name: &str) -> Self {
        let mask = match name.trim().to_lowercase().as_str() {
            "" | "all" => return CategoryFilter::All,
            "katakana" => Category::KATAKANA,
            "kanji" => Category::KANJI,
            "ichidan" => Category::ICHIDAN,
            "godan" => Category::GODAN,
            "verb" => Category::VERB,
            "godan_su" => Category::GODAN_SU,
            "godan_ru" => Category::GODAN_RU,
            "godan_u" => Category::GODAN_U,
            "godan_tsu" => Category::GODAN_TSU,
            "godan_ku" => Category::GODAN_KU,
            "godan_gu" => Category::GODAN_GU,
            "godan_mu" => Category::GODAN_MU,
            "godan_bu" => Category::GODAN_BU,
            "godan_nu" => Category::GODAN_NU,
            _ => return CategoryFilter::Nothing,
        };
        CategoryFilter::Any(mask)
    }

    pub fn accepts(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Any(mask) => category.intersects(*mask),
            CategoryFilter::Nothing => false,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}
