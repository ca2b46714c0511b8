//! Generative AI chat assistant.
//!
//! The assistant is a thin wrapper around the generative language API: a prompt
//! is assembled from static templates and the most recent chat history, sent
//! with fixed sampling parameters, and the markdown-like reply is converted into
//! sanitized HTML fragments suitable for direct rendering by the web client.

use std::time::Duration;

use derive_more::{Display, Error, From};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config;

/// Count of previous messages included into a prompt.
pub const HISTORY_LENGTH: usize = 3;

const SYSTEM_PROMPT: &str = "You are an AI assistant for FarmBazaar, an agricultural marketplace in India. \
Keep responses concise, practical, and focused on the user's needs.

Formatting guidelines:
- Use simple bullet points (•) for lists
- Use numbered lists only for step-by-step instructions
- Keep paragraphs short (2-3 sentences max)
- Bold only the most critical information
- Avoid unnecessary introductions or conclusions

User types:
- Farmers: Need farming advice, pest control, pricing help
- Buyers: Need crop info, quality assessment, market trends

Always consider the user's region and respond in their preferred language.";

const FARMER_CONTEXT: &str = "Current user is a farmer. \
Focus on practical farming advice, crop management, and marketplace selling tips.";

const BUYER_CONTEXT: &str = "Current user is a buyer. \
Focus on product quality, seasonal availability, and purchasing advice.";

const FARMER_WELCOME: &str = "<p>How can I help with your farming needs today?</p>\
<ul><li>Crop advice</li><li>Pest control</li><li>Market prices</li></ul>";

const BUYER_WELCOME: &str = "<p>How can I assist with your agricultural purchases?</p>\
<ul><li>Product info</li><li>Quality tips</li><li>Seasonal availability</li></ul>";

static BOLD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("invalid regex string"));

static BULLET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*•][ \t]+").expect("invalid regex string"));

static NUMBERED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\.\s*").expect("invalid regex string"));

static BLANK_LINES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n(\s*\n)*").expect("invalid regex string"));

/// Errors that may occur while talking to the assistant.
#[derive(Debug, Display, From, Error)]
pub enum AssistantError {
    /// HTTP request error.
    Http(reqwest::Error),

    /// API key was not configured.
    #[display(fmt = "chat assistant is not configured")]
    NotConfigured,

    /// Generative API response did not contain any text.
    #[display(fmt = "empty response from the generative API")]
    EmptyResponse,
}

/// Kind of a user that talks to the assistant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Farmer,
    Buyer,
    #[default]
    Guest,
}

/// Author of a chat message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat history entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub sender: Sender,
    pub content: String,
}

/// Information about a user used to tailor assistant responses.
#[derive(Clone, Debug)]
pub struct PromptContext {
    pub user_type: UserType,
    pub language: String,
    pub region: Option<String>,
}

impl Default for PromptContext {
    fn default() -> Self {
        Self {
            user_type: UserType::Guest,
            language: String::from("English"),
            region: None,
        }
    }
}

impl PromptContext {
    /// Assemble the instruction part of a prompt.
    pub fn instructions(&self) -> String {
        let mut prompt = String::from(SYSTEM_PROMPT);

        match self.user_type {
            UserType::Farmer => {
                prompt.push_str("\n\n");
                prompt.push_str(FARMER_CONTEXT);
            }
            UserType::Buyer => {
                prompt.push_str("\n\n");
                prompt.push_str(BUYER_CONTEXT);
            }
            UserType::Guest => {}
        }

        if let Some(region) = self.region.as_deref().filter(|region| !region.is_empty()) {
            prompt.push_str(&format!(
                "\n\nUser is from {region}, India. Provide region-specific advice when possible."
            ));
        }

        prompt.push_str(&format!(
            "\n\nResponse requirements:\n- Maximum 2-3 paragraphs\n- Use simple {}\n- Directly answer the question\n- Skip unnecessary details",
            self.language
        ));

        prompt
    }

    /// Assemble the full prompt from instructions, recent history and the new message.
    ///
    /// Only the last [`HISTORY_LENGTH`] history entries are kept to avoid long prompts.
    pub fn prompt(&self, history: &[ChatMessage], message: &str) -> String {
        let recent = &history[history.len().saturating_sub(HISTORY_LENGTH)..];

        let history_text = recent
            .iter()
            .map(|entry| {
                let author = match entry.sender {
                    Sender::User => "User",
                    Sender::Bot => "Assistant",
                };

                format!("{author}: {}", entry.content)
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nCurrent conversation:\n{history_text}\n\nUser: {message}\nAssistant: (respond concisely)",
            self.instructions()
        )
    }
}

/// Welcome message displayed when a chat is opened.
pub fn welcome_message(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Farmer => FARMER_WELCOME,
        UserType::Buyer | UserType::Guest => BUYER_WELCOME,
    }
}

/// Convert a markdown-like assistant reply into sanitized HTML.
///
/// Bold text, bullet lists and numbered lists are recognized;
/// everything else becomes paragraphs.
pub fn format_reply(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = BOLD_REGEX.replace_all(&text, "<strong>$1</strong>");
    let text = BULLET_REGEX.replace_all(&text, "• ");
    let text = BLANK_LINES_REGEX.replace_all(&text, "\n\n");

    let html: String = text
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if block.starts_with('•') {
                list("ul", block, |line| line.trim_start_matches('•').to_string())
            } else if NUMBERED_REGEX.is_match(block) {
                list("ol", block, |line| NUMBERED_REGEX.replace(line, "").into_owned())
            } else {
                format!("<p>{block}</p>")
            }
        })
        .collect();

    ammonia::clean(&html)
}

fn list<F>(tag: &str, block: &str, item: F) -> String
where
    F: Fn(&str) -> String,
{
    let items: String = block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<li>{}</li>", item(line).trim()))
        .collect();

    format!("<{tag}>{items}</{tag}>")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_k: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

fn generation_request(prompt: &str) -> GenerateContentRequest<'_> {
    let safety_settings = [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    })
    .collect();

    GenerateContentRequest {
        contents: [Content {
            role: "user",
            parts: [RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.7,
            max_output_tokens: 500,
            top_k: 40,
            top_p: 0.95,
        },
        safety_settings,
    }
}

/// Configured generative language API client.
pub struct AssistantClient<'a> {
    config: &'a config::Assistant,
    api_key: &'a str,
    client: Client,
}

impl<'a> AssistantClient<'a> {
    /// Create new [`AssistantClient`] from the provided [`Assistant`] configuration.
    ///
    /// [`Assistant`]: config::Assistant
    pub fn new(config: &'a config::Assistant) -> Result<AssistantClient<'a>, AssistantError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AssistantError::NotConfigured)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(AssistantClient {
            config,
            api_key,
            client,
        })
    }

    /// Send a raw prompt and return the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );

        let response: GenerateContentResponse = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key)
            .json(&generation_request(prompt))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            Err(AssistantError::EmptyResponse)
        } else {
            Ok(text)
        }
    }

    /// Ask the assistant and return its reply formatted as HTML.
    pub async fn reply(
        &self,
        context: &PromptContext,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AssistantError> {
        let text = self.generate(&context.prompt(history, message)).await?;

        Ok(format_reply(&text))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Assistant;

    use super::{
        format_reply, generation_request, welcome_message, AssistantClient, AssistantError,
        ChatMessage, PromptContext, Sender, UserType,
    };

    fn message(sender: Sender, content: &str) -> ChatMessage {
        ChatMessage {
            sender,
            content: content.to_string(),
        }
    }

    #[test]
    fn farmer_instructions() {
        let context = PromptContext {
            user_type: UserType::Farmer,
            language: String::from("Hindi"),
            region: Some(String::from("Punjab")),
        };

        let instructions = context.instructions();

        assert!(instructions.starts_with("You are an AI assistant for FarmBazaar"));
        assert!(instructions.contains("Current user is a farmer."));
        assert!(instructions.contains("User is from Punjab, India."));
        assert!(instructions.contains("- Use simple Hindi"));
        assert!(!instructions.contains("Current user is a buyer."));
    }

    #[test]
    fn guest_instructions() {
        let instructions = PromptContext::default().instructions();

        assert!(!instructions.contains("Current user is"));
        assert!(!instructions.contains("User is from"));
        assert!(instructions.contains("- Use simple English"));
    }

    #[test]
    fn prompt_keeps_recent_history() {
        let history = [
            message(Sender::User, "first"),
            message(Sender::Bot, "second"),
            message(Sender::User, "third"),
            message(Sender::Bot, "fourth"),
        ];

        let prompt = PromptContext::default().prompt(&history, "When to sow wheat?");

        assert!(!prompt.contains("first"));
        assert!(prompt.contains(
            "Current conversation:\nAssistant: second\nUser: third\nAssistant: fourth\n\nUser: When to sow wheat?\nAssistant: (respond concisely)"
        ));
    }

    #[test]
    fn paragraphs_and_bold() {
        assert_eq!(
            format_reply("Sow **wheat** in November.\n\n\n\nIrrigate after 21 days."),
            "<p>Sow <strong>wheat</strong> in November.</p><p>Irrigate after 21 days.</p>"
        );
    }

    #[test]
    fn empty_bold() {
        assert_eq!(
            format_reply("Yield: **** quintals"),
            "<p>Yield: <strong></strong> quintals</p>"
        );
    }

    #[test]
    fn bullet_list() {
        assert_eq!(
            format_reply("Tips:\n\n- Test soil\n  * Use compost\n• Rotate crops"),
            "<p>Tips:</p><ul><li>Test soil</li><li>Use compost</li><li>Rotate crops</li></ul>"
        );
    }

    #[test]
    fn numbered_list() {
        assert_eq!(
            format_reply("1. Plough the field\n2. Sow seeds\n10. Harvest"),
            "<ol><li>Plough the field</li><li>Sow seeds</li><li>Harvest</li></ol>"
        );
    }

    #[test]
    fn sanitized() {
        assert_eq!(
            format_reply("Hello <script>alert(1)</script><b onclick=\"x()\">world</b>"),
            "<p>Hello <b>world</b></p>"
        );
    }

    #[test]
    fn welcome() {
        assert!(welcome_message(UserType::Farmer).contains("farming needs"));
        assert!(welcome_message(UserType::Buyer).contains("agricultural purchases"));
        assert_eq!(
            welcome_message(UserType::Guest),
            welcome_message(UserType::Buyer)
        );
    }

    #[test]
    fn request_body() {
        let body = serde_json::to_value(generation_request("hi")).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn missing_api_key() {
        let config = Assistant::default();

        assert!(matches!(
            AssistantClient::new(&config),
            Err(AssistantError::NotConfigured)
        ));
    }
}
