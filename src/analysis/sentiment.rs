use std::fmt;

/// Word polarities on a -1..1 scale, tuned for market headlines.
const LEXICON: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("strong", 0.43),
    ("stronger", 0.45),
    ("positive", 0.23),
    ("gain", 0.4),
    ("gains", 0.4),
    ("surge", 0.6),
    ("surges", 0.6),
    ("soar", 0.6),
    ("soars", 0.6),
    ("rally", 0.5),
    ("rallies", 0.5),
    ("jump", 0.4),
    ("jumps", 0.4),
    ("rise", 0.3),
    ("rises", 0.3),
    ("beat", 0.4),
    ("beats", 0.4),
    ("record", 0.3),
    ("growth", 0.3),
    ("profit", 0.3),
    ("profitable", 0.5),
    ("upgrade", 0.5),
    ("upgrades", 0.5),
    ("bullish", 0.6),
    ("success", 0.5),
    ("successful", 0.75),
    ("win", 0.8),
    ("wins", 0.8),
    ("boost", 0.4),
    ("boosts", 0.4),
    ("optimistic", 0.5),
    ("outperform", 0.5),
    ("top", 0.5),
    ("high", 0.16),
    ("higher", 0.25),
    ("new", 0.14),
    ("innovative", 0.5),
    ("breakthrough", 0.6),
    ("impressive", 1.0),
    ("excellent", 1.0),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("weak", -0.38),
    ("weaker", -0.4),
    ("negative", -0.3),
    ("loss", -0.4),
    ("losses", -0.4),
    ("lose", -0.4),
    ("falls", -0.3),
    ("fall", -0.3),
    ("drop", -0.3),
    ("drops", -0.3),
    ("plunge", -0.6),
    ("plunges", -0.6),
    ("tumble", -0.5),
    ("tumbles", -0.5),
    ("slump", -0.5),
    ("slumps", -0.5),
    ("crash", -0.8),
    ("miss", -0.4),
    ("misses", -0.4),
    ("downgrade", -0.5),
    ("downgrades", -0.5),
    ("bearish", -0.6),
    ("lawsuit", -0.4),
    ("fraud", -0.8),
    ("risk", -0.2),
    ("risky", -0.5),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("fear", -0.5),
    ("fears", -0.5),
    ("cut", -0.3),
    ("cuts", -0.3),
    ("decline", -0.3),
    ("declines", -0.3),
    ("low", -0.15),
    ("lower", -0.2),
    ("warning", -0.4),
    ("warns", -0.4),
    ("layoffs", -0.5),
    ("bankruptcy", -0.9),
    ("recall", -0.3),
    ("volatile", -0.2),
    ("disappointing", -0.6),
    ("terrible", -1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("really", 1.2),
    ("highly", 1.3),
    ("super", 1.4),
    ("slightly", 0.5),
    ("somewhat", 0.6),
];

const NEGATORS: &[&str] = &["not", "no", "never", "without", "nor", "neither"];

/// Unscored tokens a negator or intensifier may skip before it lapses.
const MODIFIER_REACH: usize = 2;

/// Polarity of `text` in [-1, 1]; 0 when no sentiment-bearing word is present.
///
/// The score is the mean of the scored words. A negator shortly before a word
/// flips and halves its polarity; an intensifier scales it.
pub fn polarity(text: &str) -> f64 {
    let mut scores = Vec::new();
    let mut negate = false;
    let mut intensity = 1.0;
    let mut gap = 0;

    for token in tokenize(text) {
        if is_negator(&token) {
            negate = true;
            gap = 0;
            continue;
        }
        if let Some(factor) = lookup(INTENSIFIERS, &token) {
            intensity *= factor;
            gap = 0;
            continue;
        }

        if let Some(score) = lookup(LEXICON, &token) {
            let mut score = (score * intensity).clamp(-1.0, 1.0);
            if negate {
                score *= -0.5;
            }
            scores.push(score);
            negate = false;
            intensity = 1.0;
            continue;
        }

        gap += 1;
        if gap > MODIFIER_REACH {
            negate = false;
            intensity = 1.0;
        }
    }

    if scores.is_empty() {
        return 0.0;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.clamp(-1.0, 1.0)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
        .filter(|token| !token.is_empty())
        .map(|token| token.trim_matches('\'').to_lowercase())
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

fn lookup(table: &[(&str, f64)], token: &str) -> Option<f64> {
    table
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, value)| *value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn classify(score: f64) -> Self {
        if score > 0.1 {
            SentimentLabel::Positive
        } else if score < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Negative => "NEGATIVE",
        };
        f.write_str(label)
    }
}

/// Aggregate outlook derived from the mean headline polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketMood {
    Bullish,
    Neutral,
    Bearish,
}

impl MarketMood {
    pub fn classify(score: f64) -> Self {
        match SentimentLabel::classify(score) {
            SentimentLabel::Positive => MarketMood::Bullish,
            SentimentLabel::Negative => MarketMood::Bearish,
            SentimentLabel::Neutral => MarketMood::Neutral,
        }
    }
}

impl fmt::Display for MarketMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MarketMood::Bullish => "BULLISH",
            MarketMood::Neutral => "NEUTRAL",
            MarketMood::Bearish => "BEARISH",
        };
        f.write_str(label)
    }
}
