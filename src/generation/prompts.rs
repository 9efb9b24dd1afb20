//! Static, per-language prompt tables and prompt assembly.
//!
//! Every action carries a Russian, English and Spanish `PromptSet`, each
//! written entirely in its language; the system instructions tell the model
//! to answer only in that language. Unrecognized language codes fall back to
//! Russian.

use crate::generation::action::ActionKind;

/// Supported response languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Ru,
    En,
    Es,
}

impl Language {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("en") => Self::En,
            Some("es") => Self::Es,
            _ => Self::Ru,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Ru => 0,
            Self::En => 1,
            Self::Es => 2,
        }
    }
}

/// Localized pieces of one action's prompt.
#[derive(Debug)]
pub struct PromptSet {
    pub system: &'static str,
    pub question: &'static str,
    pub truncation_note: &'static str,
}

/// Localized field labels used when assembling user prompts.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub content: &'static str,
    pub theses: &'static str,
}

const LABELS: [Labels; 3] = [
    Labels {
        title: "Заголовок",
        content: "Контент",
        theses: "Тезисы",
    },
    Labels {
        title: "Title",
        content: "Content",
        theses: "Theses",
    },
    Labels {
        title: "Título",
        content: "Contenido",
        theses: "Tesis",
    },
];

pub fn labels(language: Language) -> &'static Labels {
    &LABELS[language.index()]
}

const SUMMARY_PROMPTS: [PromptSet; 3] = [
    PromptSet {
        system: "Ты эксперт по анализу статей. ВАЖНО: Отвечай ТОЛЬКО на русском языке. Создай краткое, но информативное описание статьи в 2-3 предложениях. Опиши основную тему статьи и ключевые моменты, которые в ней рассматриваются. Будь точным и лаконичным.",
        question: "О чем эта статья?",
        truncation_note: "[Примечание: статья была обрезана из-за ограничений модели, анализ выполнен на основе начала статьи]",
    },
    PromptSet {
        system: "You are an expert in article analysis. IMPORTANT: Respond ONLY in English. Create a brief but informative description of the article in 2-3 sentences. Describe the main topic of the article and the key points it covers. Be precise and concise.",
        question: "What is this article about?",
        truncation_note: "[Note: the article was truncated due to model limitations, the analysis is based on the beginning of the article]",
    },
    PromptSet {
        system: "Eres un experto en análisis de artículos. IMPORTANTE: Responde SOLO en español. Crea una descripción breve pero informativa del artículo en 2-3 oraciones. Describe el tema principal del artículo y los puntos clave que trata. Sé preciso y conciso.",
        question: "¿De qué trata este artículo?",
        truncation_note: "[Nota: el artículo fue truncado debido a las limitaciones del modelo, el análisis se basa en el comienzo del artículo]",
    },
];

const THESES_PROMPTS: [PromptSet; 3] = [
    PromptSet {
        system: "Ты эксперт по анализу статей. ВАЖНО: Отвечай ТОЛЬКО на русском языке. Создай список основных тезисов статьи в формате маркированного списка (используй символы • или -). Каждый тезис должен быть кратким (1-2 предложения), информативным и отражать ключевую мысль. Выдели 5-8 наиболее важных тезисов. Все тезисы должны быть написаны на русском языке.",
        question: "Создай тезисы для этой статьи на русском языке.",
        truncation_note: "[Примечание: статья была обрезана из-за ограничений модели, тезисы созданы на основе начала статьи]",
    },
    PromptSet {
        system: "You are an expert in article analysis. IMPORTANT: Respond ONLY in English. Create a list of main theses of the article in bullet list format (use • or - symbols). Each thesis should be brief (1-2 sentences), informative and reflect the key idea. Highlight 5-8 most important theses. All theses must be written in English.",
        question: "Create theses for this article in English.",
        truncation_note: "[Note: the article was truncated due to model limitations, theses are created based on the beginning of the article]",
    },
    PromptSet {
        system: "Eres un experto en análisis de artículos. IMPORTANTE: Responde SOLO en español. Crea una lista de las tesis principales del artículo en formato de lista con viñetas (usa símbolos • o -). Cada tesis debe ser breve (1-2 oraciones), informativa y reflejar la idea clave. Destaca 5-8 tesis más importantes. Todas las tesis deben estar escritas en español.",
        question: "Crea tesis para este artículo en español.",
        truncation_note: "[Nota: el artículo fue truncado debido a las limitaciones del modelo, las tesis se crean basándose en el comienzo del artículo]",
    },
];

const POST_PROMPTS: [PromptSet; 3] = [
    PromptSet {
        system: "Ты создаешь посты для Telegram канала. ВАЖНО: Отвечай ТОЛЬКО на русском языке. Выводи только готовый пост, без предисловий, комментариев или объяснений. Не пиши 'Вот пост:', 'Я создал пост:' или подобные фразы. Начинай сразу с текста поста. Пост должен быть кратким, информативным, привлекательным и содержать призыв к действию. В конце поста обязательно добавь ссылку на источник статьи.",
        question: "Создай пост для Telegram на основе этой статьи.",
        truncation_note: "[Примечание: статья была обрезана из-за ограничений модели, пост создан на основе начала статьи]",
    },
    PromptSet {
        system: "You create posts for a Telegram channel. IMPORTANT: Respond ONLY in English. Output only the finished post, without preambles, comments or explanations. Do not write 'Here is the post:' or similar phrases. Start immediately with the post text. The post must be brief, informative, engaging and contain a call to action. At the end of the post always add a link to the source article.",
        question: "Create a Telegram post based on this article.",
        truncation_note: "[Note: the article was truncated due to model limitations, the post is based on the beginning of the article]",
    },
    PromptSet {
        system: "Creas publicaciones para un canal de Telegram. IMPORTANTE: Responde SOLO en español. Muestra solo la publicación terminada, sin preámbulos, comentarios ni explicaciones. No escribas 'Aquí está la publicación:' ni frases similares. Comienza inmediatamente con el texto de la publicación. La publicación debe ser breve, informativa, atractiva y contener una llamada a la acción. Al final de la publicación añade siempre el enlace al artículo original.",
        question: "Crea una publicación de Telegram basada en este artículo.",
        truncation_note: "[Nota: el artículo fue truncado debido a las limitaciones del modelo, la publicación se basa en el comienzo del artículo]",
    },
];

const TRANSLATION_PROMPTS: [PromptSet; 3] = [
    PromptSet {
        system: "Ты профессиональный переводчик. Переведи следующий текст на русский язык, сохраняя структуру и стиль оригинала. Отвечай ТОЛЬКО на русском языке.",
        question: "Переведи следующую статью на русский язык:",
        truncation_note: "[Примечание: статья была обрезана из-за ограничений модели]",
    },
    PromptSet {
        system: "You are a professional translator. Translate the following text into English, preserving the structure and style of the original. Respond ONLY in English.",
        question: "Translate the following article into English:",
        truncation_note: "[Note: the article was truncated due to model limitations]",
    },
    PromptSet {
        system: "Eres un traductor profesional. Traduce el siguiente texto al español, conservando la estructura y el estilo del original. Responde SOLO en español.",
        question: "Traduce el siguiente artículo al español:",
        truncation_note: "[Nota: el artículo fue truncado debido a las limitaciones del modelo]",
    },
];

/// Second step of the illustration pipeline: the question is localized but
/// the produced description must always be English, which is what the image
/// model understands.
const ILLUSTRATION_PROMPTS: [PromptSet; 3] = [
    PromptSet {
        system: "Ты эксперт по созданию промптов для генерации изображений. На основе тезисов статьи создай детальный промпт для генерации иллюстрации на английском языке. Промпт должен описывать визуальную сцену, основные элементы, стиль и настроение. Промпт должен быть на английском языке и содержать только описание без дополнительных комментариев. Ответ должен начинаться сразу с описания изображения.",
        question: "Создай промпт для генерации иллюстрации на основе этих тезисов статьи. Промпт должен быть на английском языке.",
        truncation_note: "[Примечание: тезисы были обрезаны из-за ограничений модели]",
    },
    PromptSet {
        system: "You are an expert at creating prompts for image generation. Based on the article theses, create a detailed prompt for generating an illustration in English. The prompt should describe the visual scene, main elements, style and mood. The prompt should be in English and contain only the description without additional comments. The response should start immediately with the image description.",
        question: "Create a prompt for generating an illustration based on these article theses. The prompt should be in English.",
        truncation_note: "[Note: the theses were truncated due to model limitations]",
    },
    PromptSet {
        system: "Eres un experto en crear prompts para generación de imágenes. Basándote en las tesis del artículo, crea un prompt detallado para generar una ilustración en inglés. El prompt debe describir la escena visual, los elementos principales, el estilo y el estado de ánimo. El prompt debe estar en inglés y contener solo la descripción sin comentarios adicionales. La respuesta debe comenzar inmediatamente con la descripción de la imagen.",
        question: "Crea un prompt para generar una ilustración basada en estas tesis del artículo. El prompt debe estar en inglés.",
        truncation_note: "[Nota: las tesis fueron truncadas debido a las limitaciones del modelo]",
    },
];

/// Localized instruction appended to post prompts when a source URL is
/// supplied.
const SOURCE_INSTRUCTIONS: [&str; 3] = [
    "Обязательно добавь в конце поста ссылку на источник",
    "Always add the source link at the end of the post",
    "Añade siempre el enlace a la fuente al final de la publicación",
];

/// Prompt table for an action. For [`ActionKind::Illustration`] this is the
/// first (theses) step; the image-description step uses
/// [`illustration_prompt_set`].
pub fn prompt_set(action: ActionKind, language: Language) -> &'static PromptSet {
    let table = match action {
        ActionKind::Summary => &SUMMARY_PROMPTS,
        ActionKind::Theses | ActionKind::Illustration => &THESES_PROMPTS,
        ActionKind::Post => &POST_PROMPTS,
        ActionKind::Translation => &TRANSLATION_PROMPTS,
    };
    &table[language.index()]
}

pub fn illustration_prompt_set(language: Language) -> &'static PromptSet {
    &ILLUSTRATION_PROMPTS[language.index()]
}

/// A fully assembled prompt pair ready to send upstream.
#[derive(Debug)]
pub struct BuiltPrompt {
    pub system: &'static str,
    pub user: String,
    pub truncated: bool,
}

/// Assemble the user prompt for a text action: localized question, optional
/// title, (possibly truncated) content, the post's source-link instruction,
/// and the truncation notice when content was cut.
pub fn build_prompt(
    action: ActionKind,
    language: Language,
    content: &str,
    title: Option<&str>,
    source_url: Option<&str>,
) -> BuiltPrompt {
    let set = prompt_set(action, language);
    let labels = labels(language);
    let (content, truncated) = truncate_content(content, action.max_content_length());

    // Translation sends the bare text after the instruction.
    if action == ActionKind::Translation {
        return BuiltPrompt {
            system: set.system,
            user: format!("{}\n\n{}", set.question, content),
            truncated,
        };
    }

    let mut user = String::with_capacity(content.len() + 256);
    user.push_str(set.question);
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        user.push(' ');
        user.push_str(labels.title);
        user.push_str(": ");
        user.push_str(title);
    }
    user.push_str("\n\n");
    user.push_str(labels.content);
    user.push_str(": ");
    user.push_str(content);
    if action == ActionKind::Post
        && let Some(url) = source_url.filter(|u| !u.is_empty())
    {
        user.push_str("\n\n");
        user.push_str(SOURCE_INSTRUCTIONS[language.index()]);
        user.push_str(": ");
        user.push_str(url);
    }
    if truncated {
        user.push_str("\n\n");
        user.push_str(set.truncation_note);
    }

    BuiltPrompt {
        system: set.system,
        user,
        truncated,
    }
}

/// User prompt for the illustration pipeline's image-description step.
pub fn build_illustration_prompt(language: Language, theses: &str) -> String {
    let set = illustration_prompt_set(language);
    format!("{}\n\n{}:\n{}", set.question, labels(language).theses, theses)
}

/// Take at most `limit` characters of `content` (on a char boundary) and
/// report whether anything was cut.
fn truncate_content(content: &str, limit: Option<usize>) -> (&str, bool) {
    let Some(limit) = limit else {
        return (content, false);
    };
    match content.char_indices().nth(limit) {
        Some((index, _)) => (&content[..index], true),
        None => (content, false),
    }
}
