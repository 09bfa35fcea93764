// API Constants
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_API_VERSION: &str = "v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// Conversation Constants
pub const ASSISTANT_NAME: &str = "Tomsistant";
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble responding right now. Please try again or contact me directly! 😅";
pub const PROMPT_SEPARATOR: &str = "\n\nUser question: ";
pub const PRIVATE_PROJECT_PLACEHOLDER: &str = "Private project";
pub const MAX_KEY_TECH: usize = 3;

pub const QUICK_QUESTIONS: [&str; 4] = [
    "What are your main skills?",
    "Tell me about your projects",
    "What's your experience?",
    "How can I contact you?",
];

// UI Constants
pub const BULLET: char = '•';
pub const HEADER_WIDTH: usize = 60;
