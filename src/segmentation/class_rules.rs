use super::ipadic_tags::IpadicTag;
use super::rule_matcher::{
    Matcher,
    Rule,
    TokenMatcher,
};
use super::token::Token;
use super::word_class::WordClass;

const BREAK_SURFACES: &[&str] = &["。", "．", "！", "？", "!", "?", "\n", "\r\n", "\n\n", " ", "　"];

// Te-form connectives that glue an auxiliary onto the preceding verb.
const CONNECTIVE_SURFACES: &[&str] = &["て", "で"];

const AUXILIARY_VERBS: &[&str] = &["いる", "ある", "しまう", "おく", "いく", "くる", "みる"];

fn has_counter_tag(token: &Token) -> bool {
    token.has_tag(IpadicTag::Josuushi)
}

fn is_connective(token: &Token) -> bool {
    token.pos == IpadicTag::Joshi
        && CONNECTIVE_SURFACES.contains(&token.surface.as_str())
}

/**
 * These rules are conservative on purpose: a discarded token never reaches the vocabulary,
 * a misclassified one pollutes it. Order matters, first match wins.
 * */
pub fn create_default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "Sentence and line breaks",
            current: TokenMatcher {
                surface: Matcher::strings(BREAK_SURFACES),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Discard,
        },

        Rule {
            name: "Period and whitespace symbols",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Kigou]),
                pos1: Matcher::Any(vec![IpadicTag::Kuten, IpadicTag::Kuuhaku]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Discard,
        },

        Rule {
            name: "Verb suffix",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Doushi]),
                pos1: Matcher::Any(vec![IpadicTag::Setsubi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::VerbAuxiliary,
        },

        Rule {
            name: "Auxiliary verb",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Jodoushi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::VerbAuxiliary,
        },

        Rule {
            name: "Te-form connective",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Joshi]),
                pos1: Matcher::Any(vec![IpadicTag::Setsuzokujoshi]),
                surface: Matcher::strings(CONNECTIVE_SURFACES),
                ..Default::default()
            },
            prev: None,
            class: WordClass::VerbAuxiliary,
        },

        Rule {
            name: "Free-standing verb used as auxiliary",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Doushi]),
                base_form: Matcher::strings(AUXILIARY_VERBS),
                ..Default::default()
            },
            prev: Some(vec![TokenMatcher {
                tags_fn: Some(is_connective),
                ..Default::default()
            }]),
            class: WordClass::VerbAuxiliary,
        },

        Rule {
            name: "Dependent verb",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Doushi]),
                pos1: Matcher::Any(vec![IpadicTag::Hijiritsu]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::VerbAuxiliary,
        },

        Rule {
            name: "Particle",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Joshi]),
                pos1: Matcher::Any(vec![
                    IpadicTag::Kakujoshi,
                    IpadicTag::Setsuzokujoshi,
                    IpadicTag::Kakarijoshi,
                    IpadicTag::Fukujoshi,
                ]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Particle,
        },

        Rule {
            name: "Adverb",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Fukushi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Adverb,
        },

        Rule {
            name: "Conjunction",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Setsuzokushi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Conjunction,
        },

        Rule {
            name: "Nominalizing or coordinating particle",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Joshi]),
                pos1: Matcher::Any(vec![IpadicTag::Rentaika, IpadicTag::Heiritsujoshi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::ConnectingParticle,
        },

        Rule {
            name: "I-adjective",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Keiyoushi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::IAdjective,
        },

        Rule {
            name: "Pronoun",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Meishi]),
                pos1: Matcher::Any(vec![IpadicTag::Daimeishi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Pronoun,
        },

        Rule {
            name: "Adnominal adjective",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Rentaishi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::AdnominalAdjective,
        },

        Rule {
            name: "Verb",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Doushi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Verb,
        },

        Rule {
            name: "Noun suffix",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Meishi]),
                pos1: Matcher::Any(vec![IpadicTag::Setsubi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Noun,
        },

        Rule {
            name: "Noun after connecting particle or noun prefix",
            current: TokenMatcher::default(),
            prev: Some(vec![
                TokenMatcher {
                    pos: Matcher::Any(vec![IpadicTag::Joshi]),
                    pos1: Matcher::Any(vec![IpadicTag::Rentaika, IpadicTag::Heiritsujoshi]),
                    ..Default::default()
                },
                TokenMatcher {
                    pos: Matcher::Any(vec![IpadicTag::Settoushi]),
                    pos1: Matcher::Any(vec![IpadicTag::Meishisetsuzoku]),
                    ..Default::default()
                },
            ]),
            class: WordClass::Noun,
        },

        Rule {
            name: "Noun",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Meishi]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Noun,
        },

        Rule {
            name: "Symbol",
            current: TokenMatcher {
                pos: Matcher::Any(vec![IpadicTag::Kigou]),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Discard,
        },

        Rule {
            name: "Counter",
            current: TokenMatcher {
                tags_fn: Some(has_counter_tag),
                ..Default::default()
            },
            prev: None,
            class: WordClass::Counter,
        },
    ]
}
