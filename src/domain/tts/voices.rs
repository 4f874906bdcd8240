use std::collections::BTreeMap;

/// Voices shipped with the Kokoro model, grouped by lang_code.
/// `a` is American English, `b` British English.
const BUILTIN_VOICES: &[(&str, &[&str])] = &[
    (
        "a",
        &[
            "af_heart",
            "af_sky",
            "af_sarah",
            "af_nicole",
            "af_sweet",
            "am_adam",
            "am_michael",
        ],
    ),
    ("b", &["bf_ema", "bm_isaac"]),
];

pub const DEFAULT_VOICE: &str = "af_heart";

/// Language variant → voices the service accepts
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceCatalog {
    voices: BTreeMap<String, Vec<String>>,
}

impl VoiceCatalog {
    pub fn new(voices: BTreeMap<String, Vec<String>>) -> Self {
        Self { voices }
    }

    pub fn contains_variant(&self, variant: &str) -> bool {
        self.voices.contains_key(variant)
    }

    /// Voices for a variant, `None` when the variant is unknown
    pub fn voices_for(&self, variant: &str) -> Option<&[String]> {
        self.voices.get(variant).map(Vec::as_slice)
    }

    pub fn has_voice(&self, variant: &str, voice: &str) -> bool {
        self.voices_for(variant)
            .map(|voices| voices.iter().any(|v| v == voice))
            .unwrap_or(false)
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.voices.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.voices
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        let voices = BUILTIN_VOICES
            .iter()
            .map(|(variant, voices)| {
                (
                    variant.to_string(),
                    voices.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect();
        Self::new(voices)
    }
}
