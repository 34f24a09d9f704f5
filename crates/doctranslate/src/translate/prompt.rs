use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            source: "Vietnamese".to_string(),
            target: "Japanese".to_string(),
        }
    }
}

/// Builds the translation instruction around `text`.
pub fn build_prompt(text: &str, languages: &LanguagePair) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are a professional translator engine.\n");
    prompt.push_str(&format!(
        "Translate the following text from {} to {}.\n\n",
        languages.source, languages.target
    ));

    prompt.push_str("IMPORTANT RULES:\n");
    prompt.push_str(
        "1. Preserve all original formatting, special characters, and code-like structures strictly.\n",
    );
    prompt.push_str("2. Do not explain the translation. Return ONLY the translated text.\n");
    prompt.push_str(
        "3. If the text appears to be a formula or code (e.g., starts with =, contains variable names), keep it intact or only translate string literals inside it.\n",
    );
    prompt.push_str("4. For CSV or structured data, maintain the delimiters exactly.\n\n");

    prompt.push_str("Text to translate:\n\"\"\"\n");
    prompt.push_str(text);
    prompt.push_str("\n\"\"\"\n");

    prompt
}
