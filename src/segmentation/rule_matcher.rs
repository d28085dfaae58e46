use super::class_rules::create_default_rules;
use super::ipadic_tags::IpadicTag;
use super::token::Token;
use super::word_class::WordClass;

/**
 * Classification is an ordered rule table instead of nested conditionals.
 * The first rule whose matchers all accept the token (and the previous token, when the
 * rule looks back) decides the class. Nothing matching means discard.
 */

#[derive(Clone, Debug, Default)]
pub enum Matcher<T> {
    #[default]
    None,
    Any(Vec<T>),
    Not(Vec<T>),
}

impl<T: PartialEq> Matcher<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Matcher::None => true,
            Matcher::Any(values) => values.contains(value),
            Matcher::Not(values) => !values.contains(value),
        }
    }
}

impl Matcher<String> {
    pub fn accepts_str(&self, value: &str) -> bool {
        match self {
            Matcher::None => true,
            Matcher::Any(values) => values.iter().any(|v| v == value),
            Matcher::Not(values) => !values.iter().any(|v| v == value),
        }
    }

    pub fn strings(values: &[&str]) -> Self {
        Matcher::Any(values.iter().map(|v| v.to_string()).collect())
    }
}

#[derive(Default)]
pub struct TokenMatcher {
    pub pos: Matcher<IpadicTag>,
    pub pos1: Matcher<IpadicTag>,
    pub surface: Matcher<String>,
    pub base_form: Matcher<String>,
    pub tags_fn: Option<fn(&Token) -> bool>,
}

impl TokenMatcher {
    pub fn matches(&self, token: &Token) -> bool {
        self.pos.accepts(&token.pos)
            && self.pos1.accepts(&token.pos1)
            && self.surface.accepts_str(&token.surface)
            && self.base_form.accepts_str(&token.base_form)
            && self.tags_fn.map_or(true, |f| f(token))
    }
}

pub struct Rule {
    pub name: &'static str,
    pub current: TokenMatcher,
    pub prev: Option<Vec<TokenMatcher>>,
    pub class: WordClass,
}

impl Rule {
    pub fn applies(&self, current: &Token, prev: &Token) -> bool {
        let prev_matches = match &self.prev {
            Some(matchers) => matchers.iter().any(|m| m.matches(prev)),
            None => true,
        };
        prev_matches && self.current.matches(current)
    }
}

pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(create_default_rules())
    }
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, current: &Token, prev: &Token) -> WordClass {
        self.matching_rule(current, prev).map_or(WordClass::Discard, |rule| rule.class)
    }

    pub fn matching_rule(&self, current: &Token, prev: &Token) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.applies(current, prev))
    }

    /// Classifies a whole line, feeding each token its raw predecessor
    /// (discarded ones included) and the sentinel at line start.
    pub fn classify_line(&self, tokens: &[Token]) -> Vec<WordClass> {
        let sentinel = Token::sentinel();
        tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                let prev = if idx == 0 { &sentinel } else { &tokens[idx - 1] };
                self.classify(token, prev)
            })
            .collect()
    }
}
