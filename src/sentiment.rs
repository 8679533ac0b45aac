use crate::models::Sentiment;

const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;
const NORMALIZE_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const BOOST: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

const LEXICON: &[(&str, f64)] = &[
    ("accurate", 1.3),
    ("adore", 2.6),
    ("amazing", 2.8),
    ("appreciate", 2.1),
    ("appreciated", 2.2),
    ("attentive", 1.7),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("clean", 1.7),
    ("clear", 1.6),
    ("comfortable", 1.5),
    ("convenient", 1.8),
    ("cool", 1.3),
    ("delighted", 3.0),
    ("easy", 1.9),
    ("effective", 2.1),
    ("efficient", 1.8),
    ("enjoy", 2.2),
    ("enjoyable", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fantastic", 2.6),
    ("fast", 1.2),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("funny", 1.9),
    ("generous", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("handy", 1.5),
    ("happy", 2.7),
    ("helped", 1.6),
    ("helpful", 1.8),
    ("impressed", 2.1),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("intuitive", 1.4),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("polite", 1.6),
    ("positive", 2.6),
    ("professional", 1.5),
    ("quick", 1.0),
    ("quickly", 0.9),
    ("recommend", 1.5),
    ("reliable", 1.6),
    ("responsive", 1.1),
    ("satisfied", 1.8),
    ("simple", 0.8),
    ("smooth", 1.4),
    ("solid", 1.1),
    ("stable", 1.2),
    ("success", 2.7),
    ("successful", 2.8),
    ("super", 2.9),
    ("superb", 3.1),
    ("thank", 1.5),
    ("thankful", 2.7),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("well", 1.1),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worked", 1.0),
    ("works", 0.9),
    ("worth", 0.9),
    ("yay", 2.4),
    ("abysmal", -2.9),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.8),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bland", -1.0),
    ("blocked", -1.1),
    ("boring", -1.3),
    ("broken", -1.6),
    ("bug", -1.2),
    ("buggy", -1.5),
    ("careless", -1.8),
    ("cheated", -2.3),
    ("clunky", -1.2),
    ("complaint", -1.2),
    ("complicated", -1.3),
    ("confusing", -1.3),
    ("cramped", -1.2),
    ("crash", -1.7),
    ("crashed", -1.7),
    ("delay", -1.3),
    ("delayed", -1.2),
    ("difficult", -1.5),
    ("dirty", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("dislike", -1.6),
    ("error", -1.7),
    ("errors", -1.4),
    ("expensive", -0.9),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fault", -1.7),
    ("faulty", -1.8),
    ("freeze", -0.9),
    ("froze", -1.0),
    ("frustrated", -2.0),
    ("frustrating", -1.9),
    ("glitch", -1.2),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("ignored", -1.3),
    ("issue", -0.7),
    ("issues", -0.8),
    ("late", -0.9),
    ("lost", -1.3),
    ("mess", -1.5),
    ("messy", -1.5),
    ("missing", -1.2),
    ("mistake", -1.6),
    ("nasty", -2.6),
    ("negative", -2.7),
    ("overpriced", -1.7),
    ("pain", -2.3),
    ("pathetic", -2.6),
    ("poor", -2.1),
    ("problem", -1.7),
    ("ridiculous", -2.0),
    ("rude", -2.0),
    ("sad", -2.1),
    ("scam", -2.7),
    ("slow", -1.1),
    ("stupid", -2.4),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("unacceptable", -2.0),
    ("unfortunately", -1.9),
    ("unhappy", -1.8),
    ("unreliable", -1.6),
    ("unusable", -2.0),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("weak", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worthless", -2.9),
    ("wrong", -2.1),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST),
    ("completely", BOOST),
    ("extremely", BOOST),
    ("highly", BOOST),
    ("incredibly", BOOST),
    ("really", BOOST),
    ("so", BOOST),
    ("totally", BOOST),
    ("very", BOOST),
    ("barely", -BOOST),
    ("hardly", -BOOST),
    ("marginally", -BOOST),
    ("partly", -BOOST),
    ("slightly", -BOOST),
    ("somewhat", -BOOST),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "without", "cannot",
    "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "cant", "wont", "couldnt",
    "shouldnt", "wouldnt",
];

struct Token {
    lower: String,
    shouting: bool,
}

/// Classifies `message` into one of the three sentiment categories.
pub fn classify(message: &str) -> Sentiment {
    let score = compound(message);
    if score >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Normalised polarity in `-1.0..=1.0`. Lexicon valences are adjusted by
/// nearby boosters and negations before the sum is squashed.
pub fn compound(message: &str) -> f64 {
    let tokens = tokenize(message);
    let caps_differential = tokens.iter().any(|t| t.shouting) && tokens.iter().any(|t| !t.shouting);

    let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let Some(mut valence) = lookup(LEXICON, &token.lower) else {
            valences.push(0.0);
            continue;
        };

        if caps_differential && token.shouting {
            valence += valence.signum() * CAPS_INCREMENT;
        }

        for (back, decay) in BOOSTER_DECAY.iter().enumerate() {
            let Some(prior) = index.checked_sub(back + 1) else {
                break;
            };
            if let Some(boost) = lookup(BOOSTERS, &tokens[prior].lower) {
                valence += valence.signum() * boost * decay;
            }
        }

        let window = &tokens[index.saturating_sub(3)..index];
        if window.iter().any(|t| is_negation(&t.lower)) {
            valence *= NEGATION_SCALAR;
        }

        valences.push(valence);
    }

    if let Some(pivot) = tokens.iter().position(|t| t.lower == "but") {
        for (index, valence) in valences.iter_mut().enumerate() {
            if index < pivot {
                *valence *= 0.5;
            } else if index > pivot {
                *valence *= 1.5;
            }
        }
    }

    let mut sum: f64 = valences.iter().sum();
    if sum != 0.0 {
        let bangs = message.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
        sum += sum.signum() * bangs * EXCLAMATION_INCREMENT;
    }

    normalize(sum)
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn tokenize(message: &str) -> Vec<Token> {
    message
        .split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .filter(|word| !word.is_empty())
        .map(|word| Token {
            lower: word.to_lowercase().replace('\'', ""),
            shouting: word.chars().filter(|c| c.is_alphabetic()).count() > 1
                && word.chars().all(|c| !c.is_lowercase()),
        })
        .collect()
}

fn lookup(table: &[(&str, f64)], word: &str) -> Option<f64> {
    table
        .iter()
        .find(|(entry, _)| *entry == word)
        .map(|(_, value)| *value)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word)
}
