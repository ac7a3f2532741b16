//! The localized keyword table.
//!
//! Entries keep their authoring order: completion lists follow it, and the
//! order groups related words (control flow, literals, builtins).

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::VocabularyError;
use crate::lexer::is_ident_char;

/// One localized keyword and the token it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyEntry {
    /// Spelling shown in the editor
    pub localized: &'static str,
    /// Underlying scripting-language token, `None` for highlight-only words
    pub canonical: Option<&'static str>,
}

/// The built-in Ukrainian table, in authoring order.
const UKRAINIAN: &[(&str, Option<&str>)] = &[
    ("функція", Some("def")),
    ("метод", Some("def")),
    ("повернути", Some("return")),
    ("якщо", Some("if")),
    ("інакше", Some("else")),
    ("інакше_якщо", Some("elif")),
    ("для", Some("for")),
    ("доки", Some("while")),
    ("вийди", Some("break")),
    ("продовжити", Some("continue")),
    ("в", Some("in")),
    ("і", Some("and")),
    ("або", Some("or")),
    ("не", Some("not")),
    ("вивести", Some("print")),
    ("ДонтПушЗеХорсес", Some("pass")),
    ("Правда", Some("True")),
    ("Брехня", Some("False")),
    ("Ніц", Some("None")),
    ("клас", Some("class")),
    ("спробувати", Some("try")),
    ("лови", Some("except")),
    ("нарешті", Some("finally")),
    ("з", Some("with")),
    ("як", Some("as")),
    ("лямбда", Some("lambda")),
    ("глобально", Some("global")),
    ("не_локально", Some("nonlocal")),
    ("певне", Some("assert")),
    ("видалити", Some("del")),
    ("поруч", Some("yield")),
    ("викинути", Some("raise")),
    ("імпорт", Some("import")),
    ("з_", Some("from")),
    ("ввести", Some("input")),
    ("діапазон", Some("range")),
    ("довжина", Some("len")),
    ("сума", Some("sum")),
    ("мінімум", Some("min")),
    ("максимум", Some("max")),
    ("від", Some("abs")),
    ("круг", Some("round")),
    ("список", Some("list")),
    ("кортеж", Some("tuple")),
    ("словник", Some("dict")),
    ("множина", Some("set")),
    ("фільтр", Some("filter")),
    ("мапа", Some("map")),
    ("зменшити", Some("reduce")),
    ("виклик", Some("callable")),
    ("існує", Some("isinstance")),
    ("відкрити", Some("open")),
    ("рядок", Some("str")),
    ("число", Some("int")),
    ("число_з_плав", Some("float")),
    ("байти", Some("bytes")),
    ("байт_масив", Some("bytearray")),
    ("декілька", Some("enumerate")),
    ("спроба_поділити", Some("divmod")),
    ("співставити", Some("zip")),
    ("відновити", Some("reversed")),
    ("викликати", Some("eval")),
    ("від_рядка", Some("exec")),
    ("допомога", Some("help")),
    ("тип", Some("type")),
    ("глобальні", Some("globals")),
    ("локальні", Some("locals")),
    ("ідентифікатор", Some("id")),
    ("приєднати", Some("dir")),
    ("хеш", Some("hash")),
    ("відкрити_файл", Some("open")),
    ("сорт", Some("sorted")),
    ("повернути_рядок", Some("repr")),
    ("дійсне", Some("float")),
    ("ціле", Some("int")),
    ("Слава", None),
    ("Ісусу", None),
    ("Христу", None),
];

static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::new(UKRAINIAN).expect("built-in vocabulary table is well-formed")
});

/// An ordered, immutable keyword table with a hash index.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    index: HashMap<&'static str, usize>,
}

impl Vocabulary {
    /// Builds a table, rejecting duplicates and non-identifier spellings.
    pub fn new(table: &[(&'static str, Option<&'static str>)]) -> Result<Self, VocabularyError> {
        let mut entries = Vec::with_capacity(table.len());
        let mut index = HashMap::with_capacity(table.len());

        for (i, &(localized, canonical)) in table.iter().enumerate() {
            if localized.is_empty() {
                return Err(VocabularyError::EmptyKeyword(i));
            }
            if !localized.chars().all(is_ident_char) {
                return Err(VocabularyError::NotAnIdentifier(localized.to_string()));
            }
            if index.insert(localized, i).is_some() {
                return Err(VocabularyError::DuplicateKeyword(localized.to_string()));
            }
            entries.push(VocabularyEntry {
                localized,
                canonical,
            });
        }

        tracing::debug!(keywords = entries.len(), "vocabulary built");
        Ok(Self { entries, index })
    }

    /// The process-wide Ukrainian vocabulary.
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// All localized keywords in declaration order.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.localized)
    }

    pub fn get(&self, word: &str) -> Option<&VocabularyEntry> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    /// Returns true if `word` is exactly a localized keyword.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Looks up the canonical token for a localized keyword.
    pub fn canonical(&self, word: &str) -> Option<&'static str> {
        self.get(word).and_then(|e| e.canonical)
    }

    /// Entries whose spelling starts with `prefix`, in declaration order.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a VocabularyEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.localized.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
