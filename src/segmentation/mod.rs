pub mod analyzer;

pub mod class_rules;

pub mod ipadic_tags;

pub mod rule_matcher;

pub mod token;

pub mod word_class;

pub use analyzer::{
    Analyzer,
    VibratoAnalyzer,
};
pub use rule_matcher::Classifier;
pub use token::Token;
pub use word_class::WordClass;

#[cfg(test)]
