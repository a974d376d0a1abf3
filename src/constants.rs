// Endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/ask";
pub const ENDPOINT_ENV: &str = "ASK_CHAT_ENDPOINT";
pub const LOG_LEVEL_ENV: &str = "ASK_CHAT_LOG_LEVEL";
pub const APP_NAME: &str = "ask-chat";

// Bubble text
pub const PLACEHOLDER_TEXT: &str = "...";
pub const FALLBACK_TEXT: &str = "Sorry, something went wrong.";

// UI Constants
pub const SEND_LABEL: &str = "[ Send ]";
pub const INPUT_PROMPT: &str = "→ ";
pub const TICK_RATE_MS: u64 = 100;
pub const SCROLL_STEP: usize = 3;
