//! UI strings.
//!
//! Built-in dictionaries ship for a few languages. Sites override or extend
//! them with files in the i18n directory, one per language tag:
//!
//! ```text
//! i18n/
//! ├── en.toml      # "search.label" = "Find"
//! └── pt-BR.json   # { "search.label": "Buscar" }
//! ```
//!
//! Lookup for a language layers, lowest first: built-in strings of the
//! default language, user strings of the default language, built-in
//! strings of the language (or its base language), user strings of the
//! language.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub type Dictionary = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid translations in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid translations in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

const EN: &[(&str, &str)] = &[
    ("skipLink.label", "Skip to content"),
    ("navbar.label", "Main"),
    ("search.label", "Search"),
    ("themeToggle.label", "Toggle theme"),
    ("page.lastUpdated", "Last updated:"),
    ("page.draft", "This content is a draft and will not be included in production builds."),
    ("page.fallbackNotice", "This content is not available in your language yet."),
    ("404.text", "Page not found. Check the URL or try using the search bar."),
    ("projects.current", "Current projects"),
    ("projects.past", "Past projects"),
];

const ES: &[(&str, &str)] = &[
    ("skipLink.label", "Ir al contenido"),
    ("navbar.label", "Principal"),
    ("search.label", "Buscar"),
    ("themeToggle.label", "Cambiar tema"),
    ("page.lastUpdated", "Última actualización:"),
    ("page.draft", "Este contenido es un borrador y no se incluirá en producción."),
    ("page.fallbackNotice", "Este contenido aún no está disponible en tu idioma."),
    ("404.text", "Página no encontrada. Revisa la URL o intenta usar la barra de búsqueda."),
    ("projects.current", "Proyectos actuales"),
    ("projects.past", "Proyectos anteriores"),
];

const FR: &[(&str, &str)] = &[
    ("skipLink.label", "Aller au contenu"),
    ("navbar.label", "Principale"),
    ("search.label", "Rechercher"),
    ("themeToggle.label", "Changer de thème"),
    ("page.lastUpdated", "Dernière mise à jour :"),
    ("page.draft", "Ce contenu est un brouillon et ne sera pas inclus dans les builds de production."),
    ("page.fallbackNotice", "Ce contenu n’est pas encore disponible dans votre langue."),
    ("404.text", "Page non trouvée. Vérifiez l’URL ou essayez d’utiliser la barre de recherche."),
    ("projects.current", "Projets en cours"),
    ("projects.past", "Projets passés"),
];

const DE: &[(&str, &str)] = &[
    ("skipLink.label", "Zum Inhalt springen"),
    ("navbar.label", "Hauptnavigation"),
    ("search.label", "Suchen"),
    ("themeToggle.label", "Farbschema wechseln"),
    ("page.lastUpdated", "Zuletzt bearbeitet:"),
    ("page.draft", "Dieser Inhalt ist ein Entwurf und wird nicht in Produktions-Builds aufgenommen."),
    ("page.fallbackNotice", "Dieser Inhalt ist noch nicht in deiner Sprache verfügbar."),
    ("404.text", "Seite nicht gefunden. Überprüfe die URL oder nutze die Suchleiste."),
    ("projects.current", "Aktuelle Projekte"),
    ("projects.past", "Frühere Projekte"),
];

/// Language part of a tag: `pt-BR` → `pt`.
pub fn base_lang(lang: &str) -> &str {
    lang.split('-').next().unwrap_or(lang)
}

/// Built-in strings for a language tag, falling back to its base language.
fn built_in(lang: &str) -> Option<&'static [(&'static str, &'static str)]> {
    let find = |tag: &str| match tag.to_ascii_lowercase().as_str() {
        "en" => Some(EN),
        "es" => Some(ES),
        "fr" => Some(FR),
        "de" => Some(DE),
        _ => None,
    };
    find(lang).or_else(|| find(base_lang(lang)))
}

/// Non-empty value for `lang` in a per-language map, trying the base
/// language when the exact tag is missing.
pub fn pick_lang<'m>(map: &'m BTreeMap<String, String>, lang: &str) -> Option<&'m str> {
    let get = |tag: &str| map.get(tag).map(String::as_str).filter(|v| !v.is_empty());
    get(lang).or_else(|| get(base_lang(lang)))
}

/// Resolved strings for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiStrings {
    strings: Dictionary,
}

impl UiStrings {
    /// String for `key`, or the key itself when no dictionary defines it.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Built-in plus user dictionaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translations {
    default_lang: String,
    user: BTreeMap<String, Dictionary>,
}

impl Translations {
    pub fn new(default_lang: &str, user: BTreeMap<String, Dictionary>) -> Self {
        Self {
            default_lang: default_lang.to_string(),
            user,
        }
    }

    /// Read user dictionaries from `dir`. A missing directory means no
    /// overrides.
    pub fn load(dir: &Path, default_lang: &str) -> Result<Self, TranslationError> {
        let mut user = BTreeMap::new();
        if !dir.is_dir() {
            log::debug!("no translations directory at {}", dir.display());
            return Ok(Self::new(default_lang, user));
        }

        let mut files: Vec<_> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        for path in files {
            let (Some(lang), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            let raw = match ext {
                "toml" | "json" => fs::read_to_string(&path)?,
                _ => continue,
            };
            let display = path.display().to_string();
            let dict: Dictionary = if ext == "toml" {
                toml::from_str(&raw).map_err(|source| TranslationError::Toml {
                    path: display,
                    source,
                })?
            } else {
                serde_json::from_str(&raw).map_err(|source| TranslationError::Json {
                    path: display,
                    source,
                })?
            };
            log::debug!("loaded {} UI strings for {lang}", dict.len());
            user.entry(lang.to_string())
                .or_insert_with(Dictionary::new)
                .extend(dict);
        }
        Ok(Self::new(default_lang, user))
    }

    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    /// Languages with user dictionaries.
    pub fn user_langs(&self) -> impl Iterator<Item = &str> {
        self.user.keys().map(String::as_str)
    }

    /// Layered strings for `lang`.
    pub fn for_lang(&self, lang: &str) -> UiStrings {
        let mut strings = Dictionary::new();
        let mut layer = |tag: &str| {
            if let Some(pairs) = built_in(tag) {
                strings.extend(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())));
            }
            if let Some(dict) = self.user.get(tag) {
                strings.extend(dict.clone());
            }
        };
        layer(&self.default_lang);
        if lang != self.default_lang {
            layer(lang);
        }
        UiStrings { strings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dict(pairs: &[(&str, &str)]) -> Dictionary {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn built_in_strings_by_language() {
        let t = Translations::new("en", BTreeMap::new());
        assert_eq!(t.for_lang("en").t("search.label"), "Search");
        assert_eq!(t.for_lang("es").t("search.label"), "Buscar");
        assert_eq!(t.for_lang("fr-CA").t("search.label"), "Rechercher");
    }

    #[test]
    fn unknown_language_uses_default_strings() {
        let t = Translations::new("es", BTreeMap::new());
        assert_eq!(t.for_lang("xx").t("search.label"), "Buscar");
    }

    #[test]
    fn missing_key_returns_key() {
        let t = Translations::new("en", BTreeMap::new());
        assert_eq!(t.for_lang("en").t("no.such.key"), "no.such.key");
    }

    #[test]
    fn user_strings_layer_over_built_ins() {
        let user = BTreeMap::from([
            ("en".to_string(), dict(&[("search.label", "Find"), ("custom", "Custom")])),
            ("es".to_string(), dict(&[("custom", "Propio")])),
        ]);
        let t = Translations::new("en", user);

        let en = t.for_lang("en");
        assert_eq!(en.t("search.label"), "Find");
        assert_eq!(en.t("custom"), "Custom");

        let es = t.for_lang("es");
        // Built-in Spanish beats the user's English default.
        assert_eq!(es.t("search.label"), "Buscar");
        assert_eq!(es.t("custom"), "Propio");

        let fr = t.for_lang("fr");
        assert_eq!(fr.t("custom"), "Custom");
    }

    #[test]
    fn pick_lang_prefers_exact_tag() {
        let map = dict(&[("pt", "Olá"), ("pt-BR", "Oi"), ("de", "")]);
        assert_eq!(pick_lang(&map, "pt-BR"), Some("Oi"));
        assert_eq!(pick_lang(&map, "pt-PT"), Some("Olá"));
        assert_eq!(pick_lang(&map, "de"), None);
        assert_eq!(pick_lang(&map, "en"), None);
    }

    #[test]
    fn load_reads_toml_and_json() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("en.toml"), "\"search.label\" = \"Find\"\n").unwrap();
        fs::write(tmp.path().join("pt-BR.json"), r#"{"search.label": "Buscar"}"#).unwrap();
        fs::write(tmp.path().join("README.md"), "ignored").unwrap();

        let t = Translations::load(tmp.path(), "en").unwrap();
        assert_eq!(t.user_langs().collect::<Vec<_>>(), vec!["en", "pt-BR"]);
        assert_eq!(t.for_lang("en").t("search.label"), "Find");
        assert_eq!(t.for_lang("pt-BR").t("search.label"), "Buscar");
    }

    #[test]
    fn load_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let t = Translations::load(&tmp.path().join("nope"), "en").unwrap();
        assert_eq!(t.user_langs().count(), 0);
        assert_eq!(t.default_lang(), "en");
    }

    #[test]
    fn load_rejects_malformed_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("es.json"), "{ not json").unwrap();
        let err = Translations::load(tmp.path(), "en").unwrap_err();
        assert!(matches!(err, TranslationError::Json { .. }));
    }
}
