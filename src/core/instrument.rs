use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use crate::core::fingering::{ChordRecord, Fingering};
use crate::core::types::CoreError;

/// Builds a [`Fingering`] from a stored record for one instrument
pub type RecordConstructor = fn(&Arc<InstrumentProfile>, &ChordRecord) -> Fingering;

/// Guitar strings, high to low
pub const GUITAR_STRINGS: &[&str] = &["e", "b", "g", "D", "A", "E"];

/// Guitar chord modifiers, most common first
pub const GUITAR_MODIFIERS: &[&str] = &[
    "major", "minor", "7", "m7", "maj7", "mmaj7", "6", "m6", "sus", "dim", "aug", "7sus4", "5",
    "-5", "7-5", "7maj5", "m9", "maj9", "add9", "11", "13", "6add9",
];

/// Static knowledge about one fretted instrument
#[derive(Debug, Clone)]
pub struct InstrumentProfile {
    /// Instrument identifier as it appears in URLs (e.g. "guitar")
    pub name: String,

    /// String identifiers in their fixed display order
    pub strings: Vec<String>,

    /// Recognized modifier names ordered by commonness (index 0 = most common)
    pub modifiers: Vec<String>,

    /// Turns a stored record into a fingering for this instrument
    pub constructor: RecordConstructor,
}

impl InstrumentProfile {
    pub fn new(
        name: impl Into<String>,
        strings: &[&str],
        modifiers: &[&str],
        constructor: RecordConstructor,
    ) -> Self {
        Self {
            name: name.into(),
            strings: strings.iter().map(|s| (*s).to_string()).collect(),
            modifiers: modifiers.iter().map(|m| (*m).to_string()).collect(),
            constructor,
        }
    }

    /// Standard six-string guitar
    #[must_use]
    pub fn guitar() -> Self {
        Self::new(
            "guitar",
            GUITAR_STRINGS,
            GUITAR_MODIFIERS,
            Fingering::from_record,
        )
    }

    /// Does this instrument have a string with the given identifier?
    pub fn has_string(&self, string: &str) -> bool {
        self.strings.iter().any(|s| s == string)
    }
}

/// Instrument name -> profile, populated once and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct InstrumentRegistry {
    profiles: BTreeMap<String, Arc<InstrumentProfile>>,
}

static BUILTIN: LazyLock<InstrumentRegistry> = LazyLock::new(InstrumentRegistry::with_builtins);

impl InstrumentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every instrument shipped with the crate
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(InstrumentProfile::guitar());
        registry
    }

    /// The process-wide registry of built-in instruments
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Add (or replace) a profile under its name
    pub fn register(&mut self, profile: InstrumentProfile) {
        tracing::debug!(
            instrument = %profile.name,
            strings = profile.strings.len(),
            modifiers = profile.modifiers.len(),
            "Registering instrument"
        );
        self.profiles
            .insert(profile.name.clone(), Arc::new(profile));
    }

    /// Look up a profile by instrument name
    pub fn get(&self, name: &str) -> Option<&Arc<InstrumentProfile>> {
        self.profiles.get(name)
    }

    /// Look up a profile, reporting an unknown instrument as an error
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownInstrument` if no profile is registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&Arc<InstrumentProfile>, CoreError> {
        self.get(name)
            .ok_or_else(|| CoreError::UnknownInstrument(name.to_string()))
    }

    /// Registered instrument names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// All registered profiles in name order
    pub fn profiles(&self) -> impl Iterator<Item = &Arc<InstrumentProfile>> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guitar_profile() {
        let guitar = InstrumentProfile::guitar();
        assert_eq!(guitar.strings, vec!["e", "b", "g", "D", "A", "E"]);
        assert_eq!(guitar.modifiers.len(), 22);
        assert_eq!(guitar.modifiers[0], "major");
        assert_eq!(guitar.modifiers[21], "6add9");
        assert!(guitar.has_string("D"));
        assert!(!guitar.has_string("d"));
    }

    #[test]
    fn test_builtin_registry_has_guitar() {
        let registry = InstrumentRegistry::builtin();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("guitar").is_some());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["guitar"]);
    }

    #[test]
    fn test_unknown_instrument_is_not_found() {
        let registry = InstrumentRegistry::builtin();
        assert!(registry.get("banjo").is_none());
        match registry.lookup("banjo") {
            Err(CoreError::UnknownInstrument(name)) => assert_eq!(name, "banjo"),
            other => panic!("Expected UnknownInstrument, got {other:?}"),
        }
    }

    #[test]
    fn test_register_additional_instrument() {
        let mut registry = InstrumentRegistry::with_builtins();
        registry.register(InstrumentProfile::new(
            "ukulele",
            &["A", "E", "C", "G"],
            &["major", "minor", "7"],
            Fingering::from_record,
        ));

        assert_eq!(registry.len(), 2);
        let ukulele = registry.lookup("ukulele").unwrap();
        assert_eq!(ukulele.strings.len(), 4);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["guitar", "ukulele"]
        );
    }
}
