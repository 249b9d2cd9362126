//! Per-language voice profiles and local voice selection.

use vocabtutor_core::model::Language;

/// How each language should sound on each backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Locale tag, e.g. `nl-NL`.
    pub locale: &'static str,
    /// Google Cloud voice name.
    pub google_voice: &'static str,
    /// Identifiers matched against installed voice locales and names when no
    /// exact locale match exists.
    pub fallback_names: &'static [&'static str],
}

const DUTCH: VoiceProfile = VoiceProfile {
    locale: "nl-NL",
    google_voice: "nl-NL-Standard-A",
    fallback_names: &["nl-NL", "Dutch", "Ellen"],
};

const FRENCH: VoiceProfile = VoiceProfile {
    locale: "fr-FR",
    google_voice: "fr-FR-Standard-C",
    fallback_names: &["fr-FR", "French", "Amélie"],
};

pub fn profile(language: Language) -> &'static VoiceProfile {
    match language {
        Language::Dutch => &DUTCH,
        Language::French => &FRENCH,
    }
}

/// A voice installed in the local engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// Locale as reported by the engine, e.g. `nl` or `fr-fr`.
    pub locale: String,
}

/// Pick the best installed voice for `language`.
///
/// Priority:
/// 1. locale starts with the profile locale
/// 2. locale or name contains one of the fallback identifiers
/// 3. locale starts with the bare language code
///
/// Returns `None` when the engine default should be used.
pub fn select_voice(voices: &[Voice], language: Language) -> Option<&Voice> {
    let profile = profile(language);
    let locale = profile.locale.to_lowercase();

    if let Some(v) = voices
        .iter()
        .find(|v| v.locale.to_lowercase().starts_with(&locale))
    {
        return Some(v);
    }

    for name in profile.fallback_names {
        let name = name.to_lowercase();
        if let Some(v) = voices.iter().find(|v| {
            v.locale.to_lowercase().contains(&name) || v.name.to_lowercase().contains(&name)
        }) {
            return Some(v);
        }
    }

    voices
        .iter()
        .find(|v| v.locale.to_lowercase().starts_with(language.code()))
}
