/// Model used for summary, theses and post generation, and for the theses
/// step of the illustration pipeline.
pub const TEXT_MODEL: &str = "deepseek/deepseek-r1-0528:free";
/// Model used for translations.
pub const TRANSLATION_MODEL: &str = "deepseek/deepseek-chat";
/// Model that turns theses into an English image description.
pub const IMAGE_PROMPT_MODEL: &str = "nex-agi/deepseek-v3.1-nex-n1:free";
/// Image-generation model on the inference provider.
pub const IMAGE_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";

/// The five generation features. All of them are one parameterized chat
/// round trip except [`ActionKind::Illustration`], which chains two chat
/// calls and an image call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Summary,
    Theses,
    Post,
    Translation,
    Illustration,
}

impl ActionKind {
    pub fn from_path(value: &str) -> Option<Self> {
        match value {
            "summary" => Some(Self::Summary),
            "theses" => Some(Self::Theses),
            "post" => Some(Self::Post),
            "translation" => Some(Self::Translation),
            "illustration" => Some(Self::Illustration),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Theses => "theses",
            Self::Post => "post",
            Self::Translation => "translation",
            Self::Illustration => "illustration",
        }
    }

    /// Character budget for article content embedded into the prompt; `None`
    /// means the action sends the full text. The budgets leave headroom for
    /// the system prompt within the upstream model's context window.
    pub fn max_content_length(&self) -> Option<usize> {
        match self {
            Self::Summary | Self::Post => Some(20_000),
            Self::Theses | Self::Illustration => Some(18_000),
            Self::Translation => None,
        }
    }

    pub fn temperature(&self) -> f32 {
        match self {
            Self::Summary => 0.4,
            Self::Theses | Self::Illustration => 0.5,
            Self::Post => 0.6,
            Self::Translation => 0.3,
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            Self::Translation => TRANSLATION_MODEL,
            _ => TEXT_MODEL,
        }
    }

    /// Error code surfaced when the provider call for this action fails. For
    /// the illustration pipeline this covers the first (theses) step; later
    /// steps carry their own codes.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Summary => "SUMMARY_ERROR",
            Self::Theses | Self::Illustration => "THESES_ERROR",
            Self::Post => "TELEGRAM_ERROR",
            Self::Translation => "TRANSLATION_ERROR",
        }
    }

    /// Request tag sent to the provider as the `X-Title` header.
    pub fn request_title(&self) -> &'static str {
        match self {
            Self::Summary => "Referent - Article Summary",
            Self::Theses => "Referent - Article Theses",
            Self::Post => "Referent - Telegram Post Generator",
            Self::Translation => "Referent - Article Translator",
            Self::Illustration => "Referent - Article Theses for Illustration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_known_actions() {
        assert_eq!(ActionKind::from_path("summary"), Some(ActionKind::Summary));
        assert_eq!(
            ActionKind::from_path("illustration"),
            Some(ActionKind::Illustration)
        );
        assert_eq!(ActionKind::from_path("unknown"), None);
    }

    #[test]
    fn test_translation_is_never_truncated() {
        assert_eq!(ActionKind::Translation.max_content_length(), None);
    }
}
