//! Static keyword tables shared by the analysis passes
//!
//! Everything here is immutable data. Keywords are lowercase; callers
//! lowercase the prompt before matching.

use crate::types::{ConstraintCategory, IntentKind};

/// Ordered intent rules. The first rule with a matching keyword wins, so the
/// order of this table decides ties.
pub const INTENT_RULES: &[(IntentKind, &[&str])] = &[
    (
        IntentKind::CodeGeneration,
        &[
            "write a function",
            "write code",
            "write a script",
            "write a program",
            "code for",
            "implement",
            "create a function",
            "create a class",
            "build an app",
            "build a",
            "generate code",
            "snippet",
        ],
    ),
    (
        IntentKind::Explanation,
        &[
            "explain",
            "what is",
            "what are",
            "how does",
            "how do",
            "why does",
            "why is",
            "meaning of",
            "understand",
            "clarify",
        ],
    ),
    (
        IntentKind::Debugging,
        &[
            "fix",
            "debug",
            "bug",
            "error",
            "not working",
            "doesn't work",
            "crash",
            "exception",
            "broken",
            "traceback",
        ],
    ),
    (
        IntentKind::CreativeWriting,
        &[
            "story",
            "poem",
            "essay",
            "blog post",
            "song",
            "lyrics",
            "creative",
            "fiction",
            "narrative",
            "slogan",
        ],
    ),
    (
        IntentKind::DataAnalysis,
        &[
            "analyze",
            "analyse",
            "analysis",
            "dataset",
            "data set",
            "statistics",
            "trend",
            "correlation",
            "chart",
            "visualize",
        ],
    ),
    (
        IntentKind::Summarization,
        &["summarize", "summarise", "summary", "tl;dr", "tldr", "key points", "condense"],
    ),
    (
        IntentKind::Translation,
        &["translate", "translation", "in spanish", "in french", "in german", "into english"],
    ),
    (
        IntentKind::Comparison,
        &["compare", "comparison", "versus", " vs ", "difference between", "pros and cons", "better than"],
    ),
    (
        IntentKind::Instruction,
        &["how to", "steps to", "guide", "tutorial", "instructions", "teach me", "show me how"],
    ),
];

// Indicators of three characters or fewer are matched on word boundaries.
const LANGUAGE_INDICATORS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "rust",
    "golang",
    "go",
    "c++",
    "c#",
    "r",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "sql",
    "html",
    "css",
    "bash",
    "english",
    "spanish",
    "french",
    "german",
    "language",
];

const LEVEL_INDICATORS: &[&str] = &[
    "beginner",
    "intermediate",
    "advanced",
    "expert",
    "novice",
    "basic",
    "simple",
    "in-depth",
    "eli5",
    "for kids",
    "professional",
    "senior",
    "junior",
    "level",
];

const OUTPUT_FORMAT_INDICATORS: &[&str] = &[
    "bullet",
    "list",
    "table",
    "json",
    "markdown",
    "code block",
    "step by step",
    "step-by-step",
    "paragraph",
    "outline",
    "csv",
    "yaml",
    "diagram",
    "format",
];

const SCOPE_INDICATORS: &[&str] = &[
    "only",
    "limit",
    "within",
    "focus on",
    "scope",
    "words",
    "brief",
    "concise",
    "short",
    "detailed",
    "at most",
    "no more than",
    "maximum",
    "specifically",
];

const EXAMPLE_INDICATORS: &[&str] = &[
    "example",
    "e.g.",
    "for instance",
    "such as",
    "sample",
    "demo",
    "illustrate",
    "use case",
];

// Default chips offered for each missing category
const LANGUAGE_SUGGESTIONS: &[&str] = &[
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "Go",
    "Rust",
];

const LEVEL_SUGGESTIONS: &[&str] = &[
    "Beginner",
    "Intermediate",
    "Advanced",
    "Expert",
];

const OUTPUT_FORMAT_SUGGESTIONS: &[&str] = &[
    "Bullet points",
    "Step-by-step guide",
    "Code with comments",
    "Table",
    "JSON",
    "Short paragraph",
];

const SCOPE_SUGGESTIONS: &[&str] = &[
    "Brief overview",
    "Detailed explanation",
    "Under 200 words",
    "Focus on key points",
];

const EXAMPLE_SUGGESTIONS: &[&str] = &[
    "Include examples",
    "One worked example",
    "Real-world use case",
    "No examples needed",
];

/// Verbs that signal a clear request
pub const ACTION_VERBS: &[&str] = &[
    "write", "create", "build", "explain", "fix", "debug", "analyze", "compare", "list", "generate",
    "design", "implement", "describe", "summarize", "translate", "convert", "show", "tell", "help",
    "make",
];

/// Function words ignored when extracting drift keywords
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was", "one",
    "our", "out", "has", "have", "him", "his", "how", "its", "may", "new", "now", "old", "see",
    "two", "way", "who", "did", "get", "she", "too", "use", "that", "with", "this", "from", "they",
    "will", "would", "there", "their", "what", "about", "which", "when", "your", "said", "each",
    "then", "them", "these", "some", "than", "been", "into", "could", "should", "also", "just",
    "more", "very", "only", "over", "such", "make", "like", "please", "want", "need", "using",
];

/// Presence indicators for a constraint category
pub fn indicators_for(category: ConstraintCategory) -> &'static [&'static str] {
    match category {
        ConstraintCategory::Language => LANGUAGE_INDICATORS,
        ConstraintCategory::Level => LEVEL_INDICATORS,
        ConstraintCategory::OutputFormat => OUTPUT_FORMAT_INDICATORS,
        ConstraintCategory::Scope => SCOPE_INDICATORS,
        ConstraintCategory::Examples => EXAMPLE_INDICATORS,
    }
}

/// Chips offered when a category is missing
pub fn default_suggestions(category: ConstraintCategory) -> &'static [&'static str] {
    match category {
        ConstraintCategory::Language => LANGUAGE_SUGGESTIONS,
        ConstraintCategory::Level => LEVEL_SUGGESTIONS,
        ConstraintCategory::OutputFormat => OUTPUT_FORMAT_SUGGESTIONS,
        ConstraintCategory::Scope => SCOPE_SUGGESTIONS,
        ConstraintCategory::Examples => EXAMPLE_SUGGESTIONS,
    }
}
