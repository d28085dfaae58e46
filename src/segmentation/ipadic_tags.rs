//IPADIC POS: https://taku910.github.io/mecab/posid.html

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpadicTag {
    // Main POS categories
    Meishi, // Noun (名詞)
    Doushi, // Verb (動詞)
    Keiyoushi, // Adjective (形容詞)
    Fukushi, // Adverb (副詞)
    Rentaishi, // Adnominal (連体詞) (この, あの, etc)
    Setsuzokushi, // Conjunction (接続詞)
    Joshi, // Particle (助詞)
    Jodoushi, // Auxiliary verb (助動詞)
    Kandoushi, // Interjection (感動詞)
    Kigou, // Symbol (記号)
    Settoushi, // Prefix (接頭詞)
    Firaa, // Filler (フィラー)
    Sonota, // Other (その他)

    // Independence
    Jiritsu, // Independent (自立)
    Hijiritsu, // Dependent (非自立)

    // Noun types
    Ippan, // General (一般)
    Koyuumeishi, // Proper noun (固有名詞)
    Daimeishi, // Pronoun (代名詞)
    Kazu, // Numeral (数)
    Setsubi, // Suffix (接尾)
    Sahensetsuzoku, // Takes "suru" (サ変接続)
    Keiyoudoushigokan, // Adjectival noun stem (形容動詞語幹)
    Fukushikanou, // Can act as adverb (副詞可能)
    Josuushi, // Counter (助数詞)
    Tokushu, // Special (特殊)

    // Particles (助詞)
    Kakujoshi, // Case-marking particle (格助詞)
    Setsuzokujoshi, // Conjunctive particle (接続助詞)
    Kakarijoshi, // Binding particle (係助詞)
    Fukujoshi, // Adverbial particle (副助詞)
    Shuujoshi, // Sentence-ending particle (終助詞)
    Rentaika, // Nominalizing の (連体化)
    Heiritsujoshi, // Coordinating particle (並立助詞)

    // Prefix types
    Meishisetsuzoku, // Attaches to nouns (名詞接続)

    // Symbols
    Kuten, // Period (句点)
    Touten, // Comma (読点)
    Kuuhaku, // Whitespace (空白)
    Kakkoaki, // Opening bracket (括弧開)
    Kakkotoji, // Closing bracket (括弧閉)

    //Non-ipadic types
    Unset, // * or missing
    Unknown, //If the analyzer ever hands us something outside this table
}

impl From<&str> for IpadicTag {
    fn from(value: &str) -> Self {
        match value {
            "名詞"          => Self::Meishi,
            "動詞"          => Self::Doushi,
            "形容詞"        => Self::Keiyoushi,
            "副詞"          => Self::Fukushi,
            "連体詞"        => Self::Rentaishi,
            "接続詞"        => Self::Setsuzokushi,
            "助詞"          => Self::Joshi,
            "助動詞"        => Self::Jodoushi,
            "感動詞"        => Self::Kandoushi,
            "記号"          => Self::Kigou,
            "接頭詞"        => Self::Settoushi,
            "フィラー"      => Self::Firaa,
            "その他"        => Self::Sonota,

            "自立"          => Self::Jiritsu,
            "非自立"        => Self::Hijiritsu,

            "一般"          => Self::Ippan,
            "固有名詞"      => Self::Koyuumeishi,
            "代名詞"        => Self::Daimeishi,
            "数"            => Self::Kazu,
            "接尾"          => Self::Setsubi,
            "サ変接続"      => Self::Sahensetsuzoku,
            "形容動詞語幹"  => Self::Keiyoudoushigokan,
            "副詞可能"      => Self::Fukushikanou,
            "助数詞"        => Self::Josuushi,
            "特殊"          => Self::Tokushu,

            "格助詞"        => Self::Kakujoshi,
            "接続助詞"      => Self::Setsuzokujoshi,
            "係助詞"        => Self::Kakarijoshi,
            "副助詞"        => Self::Fukujoshi,
            "終助詞"        => Self::Shuujoshi,
            "連体化"        => Self::Rentaika,
            "並立助詞"      => Self::Heiritsujoshi,

            "名詞接続"      => Self::Meishisetsuzoku,

            "句点"          => Self::Kuten,
            "読点"          => Self::Touten,
            "空白"          => Self::Kuuhaku,
            "括弧開"        => Self::Kakkoaki,
            "括弧閉"        => Self::Kakkotoji,

            "*" | ""        => Self::Unset,

            _ => Self::Unknown,
        }
    }
}
