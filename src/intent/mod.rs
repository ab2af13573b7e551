//! Validation intent parsing.
//!
//! The chat front-end lets users ask for drawing validation in free text
//! ("check ABC-123 for GD&T errors"). This module guesses what they meant:
//! which validation to run, against which file or part, and how sure we are.
//!
//! It is a keyword heuristic, not a parser with a grammar. It is explicitly
//! best-effort UI convenience; the caller is expected to ask the user for a
//! file when none was found, and to let the user correct a wrong guess.

use regex::Regex;
use serde::Serialize;

/// The validation flavours the desktop server can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    /// Geometric dimensioning and tolerancing checks.
    Gdt,
    /// Weld symbol and weldment checks.
    Welding,
    /// Material and specification checks.
    Material,
    /// Generic whole-drawing check (also the collapse target when a message
    /// asks for several specific categories at once).
    Drawing,
    /// The full ACHE validation suite.
    Comprehensive,
}

impl IntentType {
    /// Tool name in the dispatch catalog that runs this validation.
    #[must_use]
    pub const fn tool_name(self) -> &'static str {
        match self {
            Self::Gdt => "check_gdt",
            Self::Welding => "check_welds",
            Self::Material => "check_materials",
            Self::Drawing => "check_drawing",
            Self::Comprehensive => "validate_comprehensive",
        }
    }
}

/// A parsed validation request.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIntent {
    /// The action keyword that triggered the parse ("validate", "check", ...).
    pub action: &'static str,
    /// The chosen validation type after precedence rules.
    #[serde(rename = "type")]
    pub intent_type: IntentType,
    /// File or part reference extracted from the raw text, if any.
    pub file_reference: Option<String>,
    /// Every category group the message mentioned, before precedence.
    pub categories: Vec<IntentType>,
    /// Heuristic confidence in [0, 1].
    pub confidence: f64,
}

/// Words that signal the user wants something validated at all.
const ACTION_KEYWORDS: &[&str] = &[
    "validate", "check", "verify", "inspect", "review", "analyze", "analyse", "audit",
];

const GDT_KEYWORDS: &[&str] = &["gd&t", "gdt", "tolerance", "datum", "geometric"];
const WELDING_KEYWORDS: &[&str] = &["weld", "welding", "weldment"];
const MATERIAL_KEYWORDS: &[&str] = &["material", "steel", "aluminum", "aluminium", "alloy"];
const COMPREHENSIVE_KEYWORDS: &[&str] = &["comprehensive", "ache", "everything", "full validation"];
// Deliberately narrow: a bare "drawing" is how users name the artefact, not a
// request for the generic drawing check, and must not out-rank a specific
// category ("check drawing ABC-123 for GD&T errors" is a GD&T request).
const DRAWING_KEYWORDS: &[&str] = &["title block", "border", "annotation", "drawing standards"];

/// Ordered patterns for extracting a file or part reference from the RAW
/// (not lower-cased) message. First capture group of the first match wins.
const FILE_REFERENCE_PATTERNS: &[&str] = &[
    // Explicit CAD/drawing filename.
    r"([\w][\w.-]*\.(?i:sldprt|sldasm|slddrw|ipt|iam|idw|step|stp|dwg|pdf))",
    // Part-number style reference, e.g. ABC-123 or HX-2024-007.
    r"\b([A-Z]{2,}-[A-Z0-9]*\d[A-Z0-9-]*)\b",
    // "file X" / "part X" / "drawing X" with an explicit token.
    r"(?:file|part|drawing)\s+([A-Za-z0-9][A-Za-z0-9._-]+)",
];

/// Confidence weights. Tuned so a message with an action, one category and a
/// file reference lands comfortably above 0.5.
const WEIGHT_ACTION: f64 = 0.3;
const WEIGHT_PER_CATEGORY: f64 = 0.2;
const WEIGHT_FILE_REFERENCE: f64 = 0.2;
const WEIGHT_DEFAULTED: f64 = 0.1;

/// Parses a free-text message into a validation intent.
///
/// Returns `None` when the message contains no action keyword at all; that is
/// the "no intent detected" outcome, not an error.
///
/// Pure function: identical input always yields identical output.
#[must_use]
pub fn parse(message: &str) -> Option<ValidationIntent> {
    let lowered = message.to_lowercase();

    let action = ACTION_KEYWORDS
        .iter()
        .find(|kw| lowered.contains(*kw))
        .copied()?;

    let mut categories = Vec::new();
    let mut push_if = |matched: bool, category: IntentType| {
        if matched {
            categories.push(category);
        }
    };
    push_if(contains_any(&lowered, GDT_KEYWORDS), IntentType::Gdt);
    push_if(contains_any(&lowered, WELDING_KEYWORDS), IntentType::Welding);
    push_if(contains_any(&lowered, MATERIAL_KEYWORDS), IntentType::Material);
    push_if(contains_any(&lowered, DRAWING_KEYWORDS), IntentType::Drawing);
    push_if(
        contains_any(&lowered, COMPREHENSIVE_KEYWORDS),
        IntentType::Comprehensive,
    );

    let (intent_type, defaulted) = resolve_type(&categories);
    let file_reference = extract_file_reference(message);

    let mut confidence = WEIGHT_ACTION + WEIGHT_PER_CATEGORY * categories.len() as f64;
    if file_reference.is_some() {
        confidence += WEIGHT_FILE_REFERENCE;
    }
    if defaulted {
        confidence += WEIGHT_DEFAULTED;
    }

    Some(ValidationIntent {
        action,
        intent_type,
        file_reference,
        categories,
        confidence: confidence.min(1.0),
    })
}

/// Applies the fixed precedence policy.
///
/// Comprehensive beats everything; exactly one specific category is taken as
/// is; several specific categories collapse to the generic drawing check; no
/// category at all defaults to comprehensive. The returned flag records that
/// the type was defaulted rather than requested.
fn resolve_type(categories: &[IntentType]) -> (IntentType, bool) {
    if categories.contains(&IntentType::Comprehensive) {
        return (IntentType::Comprehensive, false);
    }

    let specific: Vec<IntentType> = categories
        .iter()
        .copied()
        .filter(|c| *c != IntentType::Comprehensive)
        .collect();

    match specific.as_slice() {
        [] => (IntentType::Comprehensive, true),
        [only] => (*only, false),
        _ => (IntentType::Drawing, false),
    }
}

fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lowered.contains(kw))
}

/// Tries each reference pattern against the raw text, first capture wins.
fn extract_file_reference(message: &str) -> Option<String> {
    FILE_REFERENCE_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .find_map(|re| {
            re.captures(message)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}
