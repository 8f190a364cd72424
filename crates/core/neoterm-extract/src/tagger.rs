//! Part-of-speech tagging.
//!
//! [`PosTag`] is the Penn Treebank tag set used by the hybrid extractor;
//! [`UposTag`] is the coarse universal set used in composition signatures of
//! model-backed extractors. [`LexiconTagger`] is a dependency-free,
//! per-token tagger: closed-class lexicon, digit rule, suffix rules, and a
//! noun default.

use serde::{Deserialize, Serialize};

/// Penn Treebank part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum PosTag {
    CC,
    CD,
    DT,
    EX,
    FW,
    IN,
    JJ,
    JJR,
    JJS,
    LS,
    MD,
    NN,
    NNS,
    NNP,
    NNPS,
    PDT,
    POS,
    PRP,
    /// `PRP$`
    PRPS,
    RB,
    RBR,
    RBS,
    RP,
    SYM,
    TO,
    UH,
    VB,
    VBD,
    VBG,
    VBN,
    VBP,
    VBZ,
    WDT,
    WP,
    /// `WP$`
    WPS,
    WRB,
    /// Sentence-final punctuation (`.`)
    Period,
    /// `,`
    Comma,
    /// Mid-sentence punctuation (`:`)
    Colon,
    /// Opening bracket (`-LRB-`)
    LeftBracket,
    /// Closing bracket (`-RRB-`)
    RightBracket,
    /// Quotation mark (`''`)
    Quote,
}

impl PosTag {
    /// Penn Treebank spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::CC => "CC",
            PosTag::CD => "CD",
            PosTag::DT => "DT",
            PosTag::EX => "EX",
            PosTag::FW => "FW",
            PosTag::IN => "IN",
            PosTag::JJ => "JJ",
            PosTag::JJR => "JJR",
            PosTag::JJS => "JJS",
            PosTag::LS => "LS",
            PosTag::MD => "MD",
            PosTag::NN => "NN",
            PosTag::NNS => "NNS",
            PosTag::NNP => "NNP",
            PosTag::NNPS => "NNPS",
            PosTag::PDT => "PDT",
            PosTag::POS => "POS",
            PosTag::PRP => "PRP",
            PosTag::PRPS => "PRP$",
            PosTag::RB => "RB",
            PosTag::RBR => "RBR",
            PosTag::RBS => "RBS",
            PosTag::RP => "RP",
            PosTag::SYM => "SYM",
            PosTag::TO => "TO",
            PosTag::UH => "UH",
            PosTag::VB => "VB",
            PosTag::VBD => "VBD",
            PosTag::VBG => "VBG",
            PosTag::VBN => "VBN",
            PosTag::VBP => "VBP",
            PosTag::VBZ => "VBZ",
            PosTag::WDT => "WDT",
            PosTag::WP => "WP",
            PosTag::WPS => "WP$",
            PosTag::WRB => "WRB",
            PosTag::Period => ".",
            PosTag::Comma => ",",
            PosTag::Colon => ":",
            PosTag::LeftBracket => "-LRB-",
            PosTag::RightBracket => "-RRB-",
            PosTag::Quote => "''",
        }
    }

    /// Noun (`NN*`), foreign word (`FW`) or gerund (`VBG`): the tags that let
    /// a word take part in a term.
    pub fn is_term_tag(&self) -> bool {
        matches!(
            self,
            PosTag::NN | PosTag::NNS | PosTag::NNP | PosTag::NNPS | PosTag::FW | PosTag::VBG
        )
    }

    /// Map to the universal tag set.
    pub fn to_upos(&self) -> UposTag {
        match self {
            PosTag::NN | PosTag::NNS => UposTag::Noun,
            PosTag::NNP | PosTag::NNPS => UposTag::Propn,
            PosTag::VB | PosTag::VBD | PosTag::VBG | PosTag::VBN | PosTag::VBP | PosTag::VBZ => {
                UposTag::Verb
            }
            PosTag::MD => UposTag::Aux,
            PosTag::JJ | PosTag::JJR | PosTag::JJS => UposTag::Adj,
            PosTag::RB | PosTag::RBR | PosTag::RBS | PosTag::WRB => UposTag::Adv,
            PosTag::IN => UposTag::Adp,
            PosTag::DT | PosTag::PDT | PosTag::WDT => UposTag::Det,
            PosTag::CC => UposTag::Cconj,
            PosTag::CD => UposTag::Num,
            PosTag::PRP | PosTag::PRPS | PosTag::WP | PosTag::WPS | PosTag::EX => UposTag::Pron,
            PosTag::POS | PosTag::RP | PosTag::TO => UposTag::Part,
            PosTag::UH => UposTag::Intj,
            PosTag::SYM => UposTag::Sym,
            PosTag::Period
            | PosTag::Comma
            | PosTag::Colon
            | PosTag::LeftBracket
            | PosTag::RightBracket
            | PosTag::Quote => UposTag::Punct,
            PosTag::FW | PosTag::LS => UposTag::X,
        }
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UposTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl UposTag {
    /// Upper-case spelling, e.g. `NOUN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UposTag::Adj => "ADJ",
            UposTag::Adp => "ADP",
            UposTag::Adv => "ADV",
            UposTag::Aux => "AUX",
            UposTag::Cconj => "CCONJ",
            UposTag::Det => "DET",
            UposTag::Intj => "INTJ",
            UposTag::Noun => "NOUN",
            UposTag::Num => "NUM",
            UposTag::Part => "PART",
            UposTag::Pron => "PRON",
            UposTag::Propn => "PROPN",
            UposTag::Punct => "PUNCT",
            UposTag::Sconj => "SCONJ",
            UposTag::Sym => "SYM",
            UposTag::Verb => "VERB",
            UposTag::X => "X",
        }
    }

    /// Punctuation, symbol or numeral.
    pub fn is_bad_part(&self) -> bool {
        matches!(self, UposTag::Punct | UposTag::Sym | UposTag::Num)
    }
}

impl std::fmt::Display for UposTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assigns one Penn tag per token.
pub trait PosTagger: Send + Sync {
    /// Tag a token sequence. The result has the same length as `tokens`.
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag>;
}

impl<T: PosTagger + ?Sized> PosTagger for Box<T> {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        (**self).tag(tokens)
    }
}

/// Split text into word and punctuation tokens.
///
/// Splits on whitespace, then peels leading and trailing punctuation and a
/// trailing possessive `'s` into separate tokens. Internal punctuation
/// (`COVID-19`, `2.5`) stays inside the word.
pub fn word_tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let mut rest = chunk;

        let mut leading = Vec::new();
        while let Some(c) = rest.chars().next() {
            if c.is_alphanumeric() {
                break;
            }
            let (head, tail) = rest.split_at(c.len_utf8());
            leading.push(head);
            rest = tail;
        }

        let mut trailing = Vec::new();
        while let Some(c) = rest.chars().next_back() {
            if c.is_alphanumeric() {
                break;
            }
            let (head, tail) = rest.split_at(rest.len() - c.len_utf8());
            trailing.push(tail);
            rest = head;
        }

        let possessive = ["'s", "'S", "\u{2019}s"]
            .iter()
            .find(|suffix| rest.len() > suffix.len() && rest.ends_with(*suffix));
        let (word, suffix) = match possessive {
            Some(suffix) => rest.split_at(rest.len() - suffix.len()),
            None => (rest, ""),
        };

        tokens.extend(leading);
        if !word.is_empty() {
            tokens.push(word);
        }
        if !suffix.is_empty() {
            tokens.push(suffix);
        }
        tokens.extend(trailing.into_iter().rev());
    }
    tokens
}

/// Dependency-free per-token tagger.
///
/// Context-free by construction: each token is tagged in isolation, so the
/// same word always receives the same tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    /// Create a tagger.
    pub fn new() -> Self {
        Self
    }

    /// Tag a single token.
    pub fn tag_word(&self, word: &str) -> PosTag {
        if word.is_empty() {
            return PosTag::SYM;
        }
        if !word.chars().any(char::is_alphanumeric) {
            return punctuation_tag(word);
        }
        if word.eq_ignore_ascii_case("'s") || word == "\u{2019}s" {
            return PosTag::POS;
        }
        if is_numeric(word) {
            return PosTag::CD;
        }

        let lower = word.to_lowercase();
        if let Some(tag) = closed_class(&lower) {
            return tag;
        }
        if NOUN_EXCEPTIONS.contains(&lower.as_str()) {
            return PosTag::NN;
        }
        // Lone lowercase letters are list markers or enumerations, never nouns.
        // Capitals stay nouns: "T cell", "vitamin D".
        if is_lone_lowercase_letter(word) {
            return PosTag::LS;
        }
        suffix_tag(&lower)
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        tokens.iter().map(|t| self.tag_word(t)).collect()
    }
}

fn punctuation_tag(token: &str) -> PosTag {
    match token {
        "." | "!" | "?" => PosTag::Period,
        "," => PosTag::Comma,
        ":" | ";" | "-" | "--" | "..." | "\u{2013}" | "\u{2014}" => PosTag::Colon,
        "(" | "[" | "{" => PosTag::LeftBracket,
        ")" | "]" | "}" => PosTag::RightBracket,
        "\"" | "'" | "''" | "``" | "\u{201c}" | "\u{201d}" | "\u{2018}" | "\u{2019}" => {
            PosTag::Quote
        }
        _ => PosTag::SYM,
    }
}

fn is_lone_lowercase_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_lowercase())
}

fn is_numeric(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '/' | '-' | ':' | '%'))
}

fn suffix_tag(lower: &str) -> PosTag {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ing") {
        return PosTag::VBG;
    }
    if len > 3 && lower.ends_with("ly") {
        return PosTag::RB;
    }
    if len > 3 && lower.ends_with("ed") {
        return PosTag::VBN;
    }
    if len > 4
        && ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| lower.ends_with(suffix))
    {
        return PosTag::JJ;
    }
    if len > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return PosTag::NNS;
    }
    PosTag::NN
}

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ical", "ic", "al", "ant",
];

/// Words whose suffix suggests another class but which are nouns.
const NOUN_EXCEPTIONS: &[&str] = &[
    // -ing
    "thing", "something", "nothing", "anything", "everything", "morning", "evening", "spring",
    "string", "ceiling", "king", "ring", "wing", "sibling", "offspring",
    // -ly
    "family", "supply", "anomaly", "assembly", "reply", "ally", "rally", "belly", "jelly",
    "monopoly", "butterfly", "italy",
    // -ed
    "need", "seed", "speed", "bed", "hundred", "feed", "breed", "weed", "shed",
    // -al
    "trial", "signal", "animal", "hospital", "interval", "material", "individual", "journal",
    "proposal", "approval", "survival", "arrival", "removal", "withdrawal", "denial",
    "referral", "rival", "festival", "potential", "principal", "capital", "terminal",
    "professional", "metal", "vial", "portal", "canal", "crystal", "dial", "total", "rational",
    "chemical", "steroidal", "recital", "tribunal", "arsenal", "pedal", "petal",
    // -ic
    "clinic", "topic", "logic", "music", "panic", "republic", "traffic", "epidemic", "pandemic",
    "mechanic", "critic", "arsenic", "antibiotic", "mimic", "tonic", "tunic", "magic", "garlic",
    "plastic", "mosaic", "fabric", "graphic", "diagnostic", "cosmetic", "analgesic",
    "anesthetic", "antiseptic", "narcotic", "psychotic", "heuristic", "characteristic", "basic",
    "relic",
    // -ive
    "objective", "alternative", "initiative", "derivative", "relative", "representative",
    "detective", "incentive", "perspective", "narrative", "preservative", "sedative",
    "laxative", "contraceptive", "adhesive", "explosive", "olive", "archive", "hive", "drive",
    "motive", "native", "executive", "directive", "additive",
    // -able / -ible
    "table", "variable", "vegetable", "cable", "timetable", "constable", "fable", "syllable",
    "bible", "crucible",
    // -ant
    "patient", "agent", "infant", "participant", "variant", "mutant", "plant", "implant",
    "transplant", "antioxidant", "inhibitant", "assistant", "consultant", "applicant",
    "inhabitant", "pollutant", "coolant", "sealant", "stimulant", "anticoagulant",
    "antidepressant", "relaxant", "descendant", "defendant", "tenant", "servant", "merchant",
    "elephant", "restaurant", "grant", "quadrant", "determinant", "contaminant", "reactant",
    "surfactant", "toxicant", "adjuvant", "suppressant", "propellant", "irritant", "attendant",
    "lubricant",
    // -ful
    "handful", "spoonful",
    // -less
    "wireless",
];

fn closed_class(lower: &str) -> Option<PosTag> {
    let tag = match lower {
        // Determiners
        "the" | "a" | "an" | "this" | "that" | "these" | "those" | "each" | "every" | "either"
        | "neither" | "some" | "any" | "no" | "another" | "all" | "both" | "half" => PosTag::DT,
        "such" => PosTag::PDT,
        "which" | "whatever" | "whichever" => PosTag::WDT,

        // Pronouns
        "i" | "me" | "we" | "us" | "you" | "he" | "him" | "she" | "her" | "it" | "they"
        | "them" | "myself" | "ourselves" | "yourself" | "himself" | "herself" | "itself"
        | "themselves" | "one's" => PosTag::PRP,
        "my" | "our" | "your" | "his" | "its" | "their" => PosTag::PRPS,
        "who" | "whom" | "what" => PosTag::WP,
        "whose" => PosTag::WPS,
        "there" => PosTag::EX,

        // Conjunctions and prepositions
        "and" | "or" | "but" | "nor" | "yet" | "plus" | "versus" | "vs" => PosTag::CC,
        "of" | "in" | "on" | "at" | "by" | "for" | "with" | "from" | "into" | "onto" | "upon"
        | "about" | "above" | "across" | "after" | "against" | "along" | "among" | "amongst"
        | "around" | "as" | "because" | "before" | "behind" | "below" | "beneath" | "beside"
        | "besides" | "between" | "beyond" | "despite" | "down" | "during" | "except"
        | "if" | "inside" | "like" | "near" | "off" | "out" | "outside" | "over" | "per"
        | "since" | "than" | "through" | "throughout" | "toward" | "towards" | "under"
        | "underneath" | "unless" | "unlike" | "until" | "up" | "via" | "whereas"
        | "whether" | "while" | "within" | "without" | "although" | "though" | "whilst"
        | "following" | "regarding" | "including" | "concerning" => PosTag::IN,
        "to" => PosTag::TO,

        // Modals and auxiliaries
        "can" | "could" | "may" | "might" | "must" | "shall" | "should" | "will" | "would" => {
            PosTag::MD
        }
        "be" | "have" | "do" => PosTag::VB,
        "is" | "has" | "does" => PosTag::VBZ,
        "are" | "am" => PosTag::VBP,
        "was" | "were" | "had" | "did" => PosTag::VBD,
        "been" | "done" => PosTag::VBN,
        "being" | "having" | "doing" => PosTag::VBG,

        // Frequent verbs the suffix rules would read as nouns
        "show" | "suggest" | "indicate" | "reveal" | "remain" | "include" | "compare"
        | "demonstrate" | "provide" | "require" | "affect" | "occur" | "seem" | "appear"
        | "exhibit" | "identify" | "evaluate" | "investigate" | "examine" | "assess"
        | "determine" | "improve" | "reduce" | "induce" | "promote" | "inhibit" | "enhance"
        | "contribute" | "become" | "undergo" | "represent" | "allow" | "lead" | "cause"
        | "explore" | "describe" | "propose" | "confirm" | "observe" => PosTag::VBP,
        "shows" | "suggests" | "indicates" | "reveals" | "remains" | "includes" | "compares"
        | "demonstrates" | "provides" | "requires" | "affects" | "occurs" | "seems"
        | "appears" | "exhibits" | "identifies" | "evaluates" | "investigates" | "examines"
        | "assesses" | "determines" | "improves" | "reduces" | "induces" | "promotes"
        | "inhibits" | "enhances" | "contributes" | "becomes" | "undergoes" | "represents"
        | "allows" | "leads" | "causes" | "explores" | "describes" | "proposes" | "confirms"
        | "observes" => PosTag::VBZ,
        "found" | "made" | "given" | "known" | "shown" | "seen" | "taken" | "led" | "held"
        | "kept" | "left" | "met" | "brought" | "thought" | "undergone" | "written"
        | "grown" | "begun" | "chosen" => PosTag::VBN,
        "became" | "underwent" | "took" | "saw" | "knew" | "began" | "grew" | "wrote"
        | "gave" => PosTag::VBD,

        // Adverbs
        "not" | "also" | "very" | "however" | "thus" | "therefore" | "furthermore"
        | "moreover" | "only" | "then" | "here" | "now" | "often" | "still" | "even" | "well"
        | "again" | "further" | "almost" | "already" | "always" | "never" | "rather"
        | "quite" | "too" | "so" | "hence" | "instead" | "once" | "twice" | "otherwise"
        | "nevertheless" | "nonetheless" | "perhaps" | "respectively" | "alone" | "ever"
        | "soon" | "yet_" => PosTag::RB,
        "more" | "less" => PosTag::RBR,
        "most" | "least" => PosTag::RBS,
        "when" | "where" | "why" | "how" => PosTag::WRB,

        // Adjectives the suffix rules miss
        "high" | "low" | "new" | "old" | "large" | "small" | "important" | "different"
        | "common" | "several" | "many" | "much" | "other" | "same" | "first" | "second"
        | "third" | "last" | "recent" | "early" | "late" | "good" | "poor" | "major"
        | "minor" | "severe" | "acute" | "chronic" | "mild" | "moderate" | "present"
        | "similar" | "particular" | "previous" | "novel" | "current" | "prior" | "few"
        | "long" | "short" | "due" | "free" | "main" | "overall" | "own" | "whole"
        | "complete" | "positive" | "negative" | "strong" | "weak" | "open" | "clear"
        | "certain" | "able" | "likely" | "unlikely" | "elderly" | "daily" | "weekly"
        | "monthly" | "yearly" | "early-stage" => PosTag::JJ,
        "higher" | "lower" | "greater" | "larger" | "smaller" | "better" | "worse"
        | "older" | "younger" | "longer" | "shorter" | "fewer" => PosTag::JJR,
        "highest" | "lowest" | "greatest" | "largest" | "smallest" | "best" | "worst"
        | "oldest" | "youngest" | "longest" | "shortest" => PosTag::JJS,

        // Numerals
        "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
        | "ten" | "eleven" | "twelve" | "twenty" | "thirty" | "hundred" | "thousand"
        | "million" | "billion" => PosTag::CD,

        "oh" | "yes" => PosTag::UH,
        _ => return None,
    };
    Some(tag)
}
