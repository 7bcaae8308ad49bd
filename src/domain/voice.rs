/// Voice selection for one of the app's interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceSpec {
    pub language_code: &'static str,
    pub voice_name: &'static str,
}

/// Two-letter codes the speech endpoint accepts.
pub const SUPPORTED_LANGUAGES: [&str; 7] = ["en", "de", "hi", "fr", "ta", "kn", "es"];

/// Looks up the fixed voice for a two-letter language code. Codes outside
/// the table are rejected rather than passed through.
pub fn voice_for_language(code: &str) -> Option<VoiceSpec> {
    let spec = match code {
        "en" => VoiceSpec {
            language_code: "en-US",
            voice_name: "en-US-Neural2-F",
        },
        "de" => VoiceSpec {
            language_code: "de-DE",
            voice_name: "de-DE-Neural2-F",
        },
        "hi" => VoiceSpec {
            language_code: "hi-IN",
            voice_name: "hi-IN-Neural2-D",
        },
        "fr" => VoiceSpec {
            language_code: "fr-FR",
            voice_name: "fr-FR-Neural2-A",
        },
        "ta" => VoiceSpec {
            language_code: "ta-IN",
            voice_name: "ta-IN-Neural2-A",
        },
        "kn" => VoiceSpec {
            language_code: "kn-IN",
            voice_name: "kn-IN-Neural2-A",
        },
        "es" => VoiceSpec {
            language_code: "es-ES",
            voice_name: "es-ES-Neural2-A",
        },
        _ => return None,
    };
    Some(spec)
}
