use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(PartialEq, Clone, Copy, Debug, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordClass {
    Verb,
    VerbAuxiliary,
    Particle,
    Adverb,
    Conjunction,
    ConnectingParticle,
    IAdjective,
    Pronoun,
    AdnominalAdjective,
    Noun,
    Counter,
    Discard,
}

impl WordClass {
    pub const ALL: [WordClass; 12] = [
        WordClass::Verb,
        WordClass::VerbAuxiliary,
        WordClass::Particle,
        WordClass::Adverb,
        WordClass::Conjunction,
        WordClass::ConnectingParticle,
        WordClass::IAdjective,
        WordClass::Pronoun,
        WordClass::AdnominalAdjective,
        WordClass::Noun,
        WordClass::Counter,
        WordClass::Discard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WordClass::Verb => "verb",
            WordClass::VerbAuxiliary => "verb_auxiliary",
            WordClass::Particle => "particle",
            WordClass::Adverb => "adverb",
            WordClass::Conjunction => "conjunction",
            WordClass::ConnectingParticle => "connecting_particle",
            WordClass::IAdjective => "i_adjective",
            WordClass::Pronoun => "pronoun",
            WordClass::AdnominalAdjective => "adnominal_adjective",
            WordClass::Noun => "noun",
            WordClass::Counter => "counter",
            WordClass::Discard => "discard",
        }
    }

    pub fn is_discard(&self) -> bool {
        *self == WordClass::Discard
    }

    /// Content words that start a new visual unit when a line is displayed.
    pub fn pads_left(&self) -> bool {
        matches!(
            self,
            WordClass::IAdjective
                | WordClass::Pronoun
                | WordClass::AdnominalAdjective
                | WordClass::Verb
        )
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_serde_names() {
        for class in WordClass::ALL {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{}\"", class.label()));
        }
    }
}
