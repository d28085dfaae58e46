use super::ipadic_tags::IpadicTag;

// Full ipadic feature rows have exactly this many columns.
const FULL_FEATURE_COUNT: usize = 9;

pub struct VibratoToken {
    pub surface: String,
    pub features: String,
}

impl From<vibrato::token::Token<'_, '_>> for VibratoToken {
    fn from(value: vibrato::token::Token) -> Self {
        Self {
            surface: value.surface().into(),
            features: value.feature().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub surface: String,
    pub pos: IpadicTag,              // Column 1: Part of speech
    pub pos1: IpadicTag,             // Column 2: Sub-category
    pub pos2: IpadicTag,             // Column 3
    pub pos3: IpadicTag,             // Column 4
    pub conjugation_type: String,    // Column 5
    pub conjugation_form: String,    // Column 6
    pub base_form: String,           // Column 7, surface when the analyzer has none
    pub reading: String,             // Column 8
    pub pronunciation: String,       // Column 9
}

impl Token {
    /// Line-start stand-in for "the previous token".
    pub fn sentinel() -> Self {
        Token {
            surface: String::new(),
            pos: IpadicTag::Unset,
            pos1: IpadicTag::Unset,
            pos2: IpadicTag::Unset,
            pos3: IpadicTag::Unset,
            conjugation_type: String::new(),
            conjugation_form: String::new(),
            base_form: String::new(),
            reading: String::new(),
            pronunciation: String::new(),
        }
    }

    /// Builds a token from a comma separated feature row. Unknown words come back
    /// with a short row; only the first two tags are meaningful then.
    pub fn from_features(surface: &str, features: &str) -> Self {
        let fields: Vec<&str> = features.split(',').collect();

        if fields.len() < FULL_FEATURE_COUNT {
            let get_tag = |idx: usize| IpadicTag::from(fields.get(idx).copied().unwrap_or("*"));
            return Token {
                surface: surface.to_string(),
                pos: get_tag(0),
                pos1: get_tag(1),
                base_form: surface.to_string(),
                ..Token::sentinel()
            };
        }

        let base_form = match fields[6] {
            "*" | "" => surface.to_string(),
            base => base.to_string(),
        };

        Token {
            surface: surface.to_string(),
            pos: fields[0].into(),
            pos1: fields[1].into(),
            pos2: fields[2].into(),
            pos3: fields[3].into(),
            conjugation_type: fields[4].to_string(),
            conjugation_form: fields[5].to_string(),
            base_form,
            reading: fields[7].to_string(),
            pronunciation: fields[8].to_string(),
        }
    }

    pub fn tags(&self) -> [IpadicTag; 4] {
        [self.pos, self.pos1, self.pos2, self.pos3]
    }

    pub fn has_tag(&self, tag: IpadicTag) -> bool {
        self.tags().contains(&tag)
    }
}

impl From<VibratoToken> for Token {
    fn from(vt: VibratoToken) -> Self {
        Token::from_features(&vt.surface, &vt.features)
    }
}
