//! English noun inflection used to turn controller names into REST route bases.
//!
//! [`Inflector`] is a small, stateless service. In classical mode Latin and
//! Greek loan words keep their classical plurals (`formula` → `formulae`,
//! `index` → `indices`). Both modes share the irregular table, where
//! `person` pluralizes to `people`.
//!
//! Words are handled in lowercase.

/// Nouns whose plural equals the singular.
const UNCOUNTABLE: &[&str] = &[
    "advice",
    "aircraft",
    "analytics",
    "bison",
    "chassis",
    "corps",
    "deer",
    "diabetes",
    "economics",
    "equipment",
    "ethics",
    "evidence",
    "feedback",
    "fish",
    "furniture",
    "hardware",
    "headquarters",
    "homework",
    "information",
    "knowledge",
    "luggage",
    "mathematics",
    "metadata",
    "money",
    "moose",
    "music",
    "news",
    "offspring",
    "physics",
    "police",
    "politics",
    "research",
    "rice",
    "salmon",
    "series",
    "sheep",
    "software",
    "species",
    "swine",
    "tennis",
    "traffic",
    "trout",
];

/// Irregular nouns matched on the whole word only.
const IRREGULAR: &[(&str, &str)] = &[
    ("die", "dice"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("louse", "lice"),
    ("ox", "oxen"),
    ("tooth", "teeth"),
];

/// Irregular nouns that also inflect as the tail of a compound
/// (`salesperson`, `grandchild`, `chairman`, `dormouse`).
const IRREGULAR_TAILS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("mouse", "mice"),
    ("man", "men"),
];

/// Words ending in `man` that pluralize regularly.
const REGULAR_MAN: &[&str] = &[
    "caiman", "cayman", "doberman", "dolman", "german", "human", "ottoman", "roman", "shaman",
    "talisman", "walkman",
];

/// Singular words ending in `men`.
const SINGULAR_MEN: &[&str] = &[
    "abdomen", "amen", "hymen", "lumen", "omen", "ramen", "regimen", "specimen", "stamen",
    "yemen",
];

/// Latin and Greek plurals, used for pluralization in classical mode and
/// always recognized when singularizing.
const CLASSICAL: &[(&str, &str)] = &[
    // -a → -ae
    ("alga", "algae"),
    ("alumna", "alumnae"),
    ("antenna", "antennae"),
    ("formula", "formulae"),
    ("larva", "larvae"),
    ("minutia", "minutiae"),
    ("nebula", "nebulae"),
    ("vertebra", "vertebrae"),
    // -um → -a
    ("addendum", "addenda"),
    ("aquarium", "aquaria"),
    ("bacterium", "bacteria"),
    ("consortium", "consortia"),
    ("curriculum", "curricula"),
    ("datum", "data"),
    ("erratum", "errata"),
    ("forum", "fora"),
    ("maximum", "maxima"),
    ("medium", "media"),
    ("memorandum", "memoranda"),
    ("millennium", "millennia"),
    ("minimum", "minima"),
    ("ovum", "ova"),
    ("quantum", "quanta"),
    ("spectrum", "spectra"),
    ("stadium", "stadia"),
    ("stratum", "strata"),
    ("symposium", "symposia"),
    // -on → -a
    ("automaton", "automata"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("polyhedron", "polyhedra"),
    // -us → -i
    ("alumnus", "alumni"),
    ("bacillus", "bacilli"),
    ("cactus", "cacti"),
    ("focus", "foci"),
    ("fungus", "fungi"),
    ("locus", "loci"),
    ("nucleus", "nuclei"),
    ("octopus", "octopi"),
    ("radius", "radii"),
    ("stimulus", "stimuli"),
    ("syllabus", "syllabi"),
    ("terminus", "termini"),
    // -us → -era / -ora
    ("corpus", "corpora"),
    ("genus", "genera"),
    ("opus", "opera"),
    // -ex / -ix → -ices
    ("apex", "apices"),
    ("appendix", "appendices"),
    ("codex", "codices"),
    ("cortex", "cortices"),
    ("helix", "helices"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("radix", "radices"),
    ("vertex", "vertices"),
    ("vortex", "vortices"),
    // -ma → -mata
    ("dogma", "dogmata"),
    ("lemma", "lemmata"),
    ("schema", "schemata"),
    ("stigma", "stigmata"),
    // -eau → -eaux
    ("bureau", "bureaux"),
    ("chateau", "chateaux"),
    ("plateau", "plateaux"),
    ("tableau", "tableaux"),
];

/// `-f`/`-fe` tails that become `-ves`. `life` is matched on the whole word
/// only so that `olives` singularizes to `olive`.
const F_TO_VES: &[(&str, &str)] = &[
    ("calf", "calves"),
    ("elf", "elves"),
    ("half", "halves"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("loaf", "loaves"),
    ("scarf", "scarves"),
    ("sheaf", "sheaves"),
    ("thief", "thieves"),
    ("wife", "wives"),
    ("wolf", "wolves"),
];

/// Words ending in a consonant + `o` that take `-es`.
const O_TO_OES: &[&str] = &[
    "buffalo", "cargo", "domino", "echo", "embargo", "hero", "mosquito", "potato", "tomato",
    "tornado", "torpedo", "veto", "volcano",
];

/// Singular words that end in `s` and are not caught by a suffix rule.
const SINGULAR_S: &[&str] = &[
    "alias", "asbestos", "atlas", "bias", "canvas", "chaos", "christmas", "cosmos", "ethos",
    "gas", "iris", "kudos", "lens", "pancreas", "pathos", "penis", "thermos", "this", "trellis",
    "yes",
];

/// Plurals ending in `us` (`menu` → `menus`).
const PLURAL_US: &[&str] = &["emus", "gnus", "gurus", "haikus", "menus", "tofus", "tutus"];

/// Singulars ending in `-ie` whose plural is `-ies`.
const IE_WORDS: &[&str] = &[
    "brownie", "calorie", "cookie", "genie", "goalie", "hippie", "hoodie", "lie", "movie", "pie",
    "prairie", "rookie", "selfie", "smoothie", "tie", "zombie",
];

/// Singulars ending in `-use` whose plural would otherwise read as `-us` + `es`.
const USE_WORDS: &[&str] = &[
    "abuse", "accuse", "amuse", "confuse", "diffuse", "excuse", "fuse", "infuse", "misuse",
    "muse", "peruse", "recluse", "refuse", "ruse", "use",
];

/// Singulars ending in `-che`.
const CHE_WORDS: &[&str] = &[
    "ache", "avalanche", "cache", "cliche", "headache", "moustache", "mustache", "niche",
    "psyche", "quiche",
];

/// Greek `-is` plurals recognized by their tail.
const IS_TAILS: &[(&str, &str)] = &[
    ("crises", "crisis"),
    ("emphases", "emphasis"),
    ("gnoses", "gnosis"),
    ("oases", "oasis"),
    ("theses", "thesis"),
    ("yses", "ysis"),
];

/// Stateless English pluralization service.
///
/// ```rust
/// use axum_convention::Inflector;
///
/// let inflector = Inflector::classical();
/// assert_eq!(inflector.plural("category"), "categories");
/// assert_eq!(inflector.plural("person"), "people");
/// assert_eq!(inflector.plural("formula"), "formulae");
/// assert_eq!(inflector.singular("people").as_deref(), Some("person"));
/// assert_eq!(inflector.singular("user"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inflector {
    classical: bool,
}

impl Default for Inflector {
    fn default() -> Self {
        Self::classical()
    }
}

impl Inflector {
    /// Inflector that prefers classical Latin/Greek plurals.
    pub const fn classical() -> Self {
        Self { classical: true }
    }

    /// Inflector that anglicizes loan words (`formula` → `formulas`).
    pub const fn modern() -> Self {
        Self { classical: false }
    }

    pub fn is_classical(&self) -> bool {
        self.classical
    }

    /// Returns the plural form of a singular noun.
    ///
    /// Passing a word that is already plural is not guaranteed to return it
    /// unchanged; normalize through [`Inflector::singular`] first.
    pub fn plural(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if word.is_empty() || UNCOUNTABLE.contains(&word.as_str()) {
            return word;
        }
        if let Some(plural) = irregular_plural(&word) {
            return plural;
        }
        if self.classical
            && let Some((_, plural)) = CLASSICAL.iter().find(|(singular, _)| *singular == word)
        {
            return plural.to_string();
        }
        if let Some(plural) = f_plural(&word) {
            return plural;
        }
        if let Some(stem) = word.strip_suffix("is")
            && !stem.is_empty()
        {
            return format!("{stem}es");
        }
        if ends_with_single_z_after_vowel(&word) {
            return format!("{word}zes");
        }
        if ["s", "x", "z", "ch", "sh"]
            .iter()
            .any(|tail| word.ends_with(tail))
        {
            return format!("{word}es");
        }
        if let Some(stem) = word.strip_suffix('y')
            && stem.chars().last().is_some_and(is_consonant)
        {
            return format!("{stem}ies");
        }
        if O_TO_OES.contains(&word.as_str()) {
            return format!("{word}es");
        }
        format!("{word}s")
    }

    /// Returns the singular form of a plural noun, or `None` when the word
    /// is already singular. Uncountable nouns return themselves.
    pub fn singular(&self, word: &str) -> Option<String> {
        let word = word.to_lowercase();
        if word.is_empty() {
            return None;
        }
        if UNCOUNTABLE.contains(&word.as_str()) {
            return Some(word);
        }
        if let Some(singular) = irregular_singular(&word) {
            return Some(singular);
        }
        if let Some((singular, _)) = CLASSICAL.iter().find(|(_, plural)| *plural == word) {
            return Some(singular.to_string());
        }
        if let Some(singular) = f_singular(&word) {
            return Some(singular);
        }

        let stem_s = word.strip_suffix('s')?;
        if SINGULAR_S.contains(&word.as_str()) {
            return None;
        }
        if PLURAL_US.iter().any(|plural| word.ends_with(plural)) {
            return Some(stem_s.to_string());
        }
        if ["ss", "us", "sis", "xis", "tis"]
            .iter()
            .any(|tail| word.ends_with(tail))
        {
            return None;
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if IE_WORDS.contains(&stem_s) {
                return Some(stem_s.to_string());
            }
            return Some(format!("{stem}y"));
        }
        if let Some(stem) = word.strip_suffix("oes") {
            let candidate = format!("{stem}o");
            if O_TO_OES.contains(&candidate.as_str()) {
                return Some(candidate);
            }
            return Some(stem_s.to_string());
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return Some(format!("{stem}ss"));
        }
        if let Some(stem) = word.strip_suffix("uses") {
            if stem.ends_with('o') || stem.ends_with('a') || USE_WORDS.contains(&stem_s) {
                return Some(stem_s.to_string());
            }
            return Some(format!("{stem}us"));
        }
        for (plural_tail, singular_tail) in IS_TAILS {
            if let Some(stem) = word.strip_suffix(plural_tail) {
                return Some(format!("{stem}{singular_tail}"));
            }
        }
        if let Some(stem) = word.strip_suffix("ases") {
            let candidate = format!("{stem}as");
            if SINGULAR_S.contains(&candidate.as_str()) {
                return Some(candidate);
            }
            return Some(stem_s.to_string());
        }
        if word.ends_with("ches") {
            if CHE_WORDS.iter().any(|che| stem_s.ends_with(che)) {
                return Some(stem_s.to_string());
            }
            return word.strip_suffix("es").map(String::from);
        }
        if word.ends_with("shes") || word.ends_with("xes") {
            return word.strip_suffix("es").map(String::from);
        }
        if let Some(stem) = word.strip_suffix("izzes") {
            return Some(format!("{stem}iz"));
        }
        if word.ends_with("zzes") {
            return word.strip_suffix("es").map(String::from);
        }
        Some(stem_s.to_string())
    }
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn ends_with_single_z_after_vowel(word: &str) -> bool {
    let mut tail = word.chars().rev();
    matches!(
        (tail.next(), tail.next()),
        (Some('z'), Some('a' | 'e' | 'i' | 'o' | 'u'))
    )
}

fn irregular_plural(word: &str) -> Option<String> {
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return Some(plural.to_string());
    }
    for (singular, plural) in IRREGULAR_TAILS {
        if let Some(stem) = word.strip_suffix(singular) {
            if *singular == "man" && REGULAR_MAN.iter().any(|regular| word.ends_with(regular)) {
                continue;
            }
            return Some(format!("{stem}{plural}"));
        }
    }
    None
}

fn irregular_singular(word: &str) -> Option<String> {
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return Some(singular.to_string());
    }
    for (singular, plural) in IRREGULAR_TAILS {
        if let Some(stem) = word.strip_suffix(plural) {
            if *plural == "men" && SINGULAR_MEN.contains(&word) {
                continue;
            }
            return Some(format!("{stem}{singular}"));
        }
    }
    None
}

fn f_plural(word: &str) -> Option<String> {
    if word == "life" {
        return Some("lives".into());
    }
    F_TO_VES.iter().find_map(|(singular, plural)| {
        word.strip_suffix(singular)
            .map(|stem| format!("{stem}{plural}"))
    })
}

fn f_singular(word: &str) -> Option<String> {
    if word == "lives" {
        return Some("life".into());
    }
    F_TO_VES.iter().find_map(|(singular, plural)| {
        word.strip_suffix(plural)
            .map(|stem| format!("{stem}{singular}"))
    })
}
