use once_cell::sync::Lazy;
use regex::Regex;
use wana_kana::ConvertJapanese;

// CJK unified ideographs, the block the vocabulary treats as kanji.
static KANJI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{4E00}-\x{9FAF}]").unwrap());

static KANA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{3041}-\x{3096}\x{30A1}-\x{30FA}]").unwrap());

static KATAKANA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{30A1}-\x{30FA}]").unwrap());

pub fn has_kanji(text: &str) -> bool {
    KANJI_RE.is_match(text)
}

pub fn has_kana(text: &str) -> bool {
    KANA_RE.is_match(text)
}

pub fn has_katakana(text: &str) -> bool {
    KATAKANA_RE.is_match(text)
}

/// A lone kanji such as "日". These never become words; the kanji path owns them.
pub fn is_single_kanji(text: &str) -> bool {
    text.chars().count() == 1 && has_kanji(text)
}

/// Distinct kanji of `text`, in order of first appearance.
pub fn distinct_kanji(text: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for m in KANJI_RE.find_iter(text) {
        let literal = m.as_str();
        if !seen.iter().any(|k| k == literal) {
            seen.push(literal.to_string());
        }
    }
    seen
}

pub trait NormalizeQuery {
    fn normalize_query(&self) -> String;
}

//momo -> もも, もも -> もも
impl NormalizeQuery for str {
    fn normalize_query(&self) -> String {
        let trimmed = self.trim();
        let is_romaji = !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_alphabetic() || c == '-' || c == '\'');

        if is_romaji {
            trimmed.to_lowercase().to_hiragana()
        } else {
            trimmed.to_string()
        }
    }
}
