//! Rule-based English lemmatizer.

use crate::tagger::UposTag;

/// Reduces an inflected word to its dictionary form.
///
/// Driven by the universal tag of the word: nouns lose plural endings,
/// verbs lose inflection, a handful of adjectives map to their positive
/// degree. Everything else is lower-cased and returned as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    /// Create a lemmatizer.
    pub fn new() -> Self {
        Self
    }

    /// Lemma of `word` read as `upos`.
    pub fn lemmatize(&self, word: &str, upos: UposTag) -> String {
        if upos.is_bad_part() {
            return word.to_string();
        }
        let lower = word.to_lowercase();
        match upos {
            UposTag::Noun => noun_lemma(&lower),
            UposTag::Verb | UposTag::Aux => verb_lemma(&lower),
            UposTag::Adj => adjective_lemma(&lower),
            _ => lower,
        }
    }
}

fn noun_lemma(word: &str) -> String {
    if let Some(lemma) = lookup(IRREGULAR_NOUNS, word) {
        return lemma.to_string();
    }
    if INVARIANT_NOUNS.contains(&word) || !word.is_ascii() || word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if ["sses", "xes", "ches", "shes", "zzes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn verb_lemma(word: &str) -> String {
    if let Some(lemma) = lookup(IRREGULAR_VERBS, word) {
        return lemma.to_string();
    }
    if !word.is_ascii() || word.len() <= 3 {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ing") {
        if stem.len() >= 2 {
            return restore_stem(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ied") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if stem.len() >= 2 {
            return restore_stem(stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if ["sses", "xes", "ches", "shes", "zes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Undo consonant doubling or restore a dropped final `e`.
fn restore_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes[n - 1]) {
        let keep = match bytes[n - 1] {
            b's' | b'z' | b'f' => true,
            b'l' => n < 6 || stem.ends_with("all") || stem.ends_with("ill"),
            _ => false,
        };
        if keep {
            return stem.to_string();
        }
        return stem[..n - 1].to_string();
    }
    if stem.ends_with("eat") || stem.ends_with("ect") {
        return stem.to_string();
    }
    if E_RESTORING_ENDINGS.iter().any(|ending| stem.ends_with(ending)) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn adjective_lemma(word: &str) -> String {
    lookup(IRREGULAR_ADJECTIVES, word)
        .unwrap_or(word)
        .to_string()
}

fn lookup(table: &[(&'static str, &'static str)], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| *lemma)
}

/// Stem endings after which an inflection removed a silent `e`.
const E_RESTORING_ENDINGS: &[&str] = &[
    "at", "ut", "iz", "yz", "ag", "ak", "us", "as", "uc", "nc", "rc", "lv", "iv", "rg", "ang",
    "dg", "ac", "ic", "ov", "id", "od", "ir", "ur", "ar", "bl", "pl", "tl", "rs", "ps", "ib",
    "om", "os", "ys",
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("women", "woman"),
    ("men", "man"),
    ("people", "person"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("lice", "louse"),
    ("analyses", "analysis"),
    ("diagnoses", "diagnosis"),
    ("prognoses", "prognosis"),
    ("hypotheses", "hypothesis"),
    ("metastases", "metastasis"),
    ("syntheses", "synthesis"),
    ("theses", "thesis"),
    ("bacteria", "bacterium"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("nuclei", "nucleus"),
    ("fungi", "fungus"),
    ("stimuli", "stimulus"),
    ("bacilli", "bacillus"),
    ("foci", "focus"),
    ("emboli", "embolus"),
    ("thrombi", "thrombus"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
    ("cortices", "cortex"),
    ("apices", "apex"),
    ("vertebrae", "vertebra"),
    ("larvae", "larva"),
    ("sequelae", "sequela"),
    ("ova", "ovum"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("halves", "half"),
    ("wives", "wife"),
];

const INVARIANT_NOUNS: &[&str] = &[
    "series", "species", "news", "diabetes", "measles", "mumps", "herpes", "rabies", "scabies",
    "rickets", "mellitus", "lupus", "sepsis", "data", "physics", "genetics", "economics",
    "statistics", "ethics", "pharmacokinetics", "pharmacodynamics", "diagnostics",
    "therapeutics", "genomics", "proteomics", "metabolomics", "biologics", "aids", "covid",
    "gas", "lens", "bias", "iris", "pelvis",
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("is", "be"),
    ("are", "be"),
    ("am", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("found", "find"),
    ("made", "make"),
    ("shown", "show"),
    ("given", "give"),
    ("gave", "give"),
    ("taken", "take"),
    ("took", "take"),
    ("led", "lead"),
    ("seen", "see"),
    ("saw", "see"),
    ("known", "know"),
    ("knew", "know"),
    ("began", "begin"),
    ("begun", "begin"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("underwent", "undergo"),
    ("undergone", "undergo"),
    ("became", "become"),
    ("brought", "bring"),
    ("thought", "think"),
    ("held", "hold"),
    ("kept", "keep"),
    ("left", "leave"),
    ("met", "meet"),
    ("wrote", "write"),
    ("written", "write"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("ran", "run"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("spread", "spread"),
    ("sought", "seek"),
    ("bound", "bind"),
    ("arose", "arise"),
    ("arisen", "arise"),
    ("driven", "drive"),
    ("drove", "drive"),
    ("lying", "lie"),
    ("dying", "die"),
];

const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("higher", "high"),
    ("highest", "high"),
    ("lower", "low"),
    ("lowest", "low"),
    ("greater", "great"),
    ("greatest", "great"),
    ("larger", "large"),
    ("largest", "large"),
    ("smaller", "small"),
    ("smallest", "small"),
    ("older", "old"),
    ("oldest", "old"),
    ("younger", "young"),
    ("youngest", "young"),
    ("longer", "long"),
    ("longest", "long"),
    ("shorter", "short"),
    ("shortest", "short"),
    ("fewer", "few"),
    ("fewest", "few"),
    ("earlier", "early"),
    ("earliest", "early"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str, upos: UposTag) -> String {
        Lemmatizer::new().lemmatize(word, upos)
    }

    #[test]
    fn test_noun_plurals() {
        assert_eq!(lemma("cells", UposTag::Noun), "cell");
        assert_eq!(lemma("therapies", UposTag::Noun), "therapy");
        assert_eq!(lemma("Patients", UposTag::Noun), "patient");
        assert_eq!(lemma("boxes", UposTag::Noun), "box");
        assert_eq!(lemma("lesions", UposTag::Noun), "lesion");
    }

    #[test]
    fn test_noun_invariants_and_irregulars() {
        assert_eq!(lemma("virus", UposTag::Noun), "virus");
        assert_eq!(lemma("diabetes", UposTag::Noun), "diabetes");
        assert_eq!(lemma("class", UposTag::Noun), "class");
        assert_eq!(lemma("analysis", UposTag::Noun), "analysis");
        assert_eq!(lemma("children", UposTag::Noun), "child");
        assert_eq!(lemma("criteria", UposTag::Noun), "criterion");
    }

    #[test]
    fn test_verb_inflections() {
        assert_eq!(lemma("evaluating", UposTag::Verb), "evaluate");
        assert_eq!(lemma("treated", UposTag::Verb), "treat");
        assert_eq!(lemma("studied", UposTag::Verb), "study");
        assert_eq!(lemma("running", UposTag::Verb), "run");
        assert_eq!(lemma("controlled", UposTag::Verb), "control");
        assert_eq!(lemma("screening", UposTag::Verb), "screen");
        assert_eq!(lemma("imaging", UposTag::Verb), "image");
        assert_eq!(lemma("was", UposTag::Aux), "be");
    }

    #[test]
    fn test_adjectives() {
        assert_eq!(lemma("higher", UposTag::Adj), "high");
        assert_eq!(lemma("clinical", UposTag::Adj), "clinical");
    }

    #[test]
    fn test_bad_parts_keep_their_text() {
        assert_eq!(lemma("19", UposTag::Num), "19");
        assert_eq!(lemma("-", UposTag::Punct), "-");
        assert_eq!(lemma("%", UposTag::Sym), "%");
    }
}
