//! Lexical matcher for risky `raw_call` usage in Vyper source.
//!
//! Nothing here parses Vyper. The matcher looks for the payability marker, then
//! extracts the balanced argument list that follows every `raw_call` occurrence
//! and checks it against a short list of ERC20 call signatures that cannot
//! re-enter the caller. The result is a triage verdict for humans to audit, so
//! false positives are expected.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Any occurrence of this token flags the contract outright.
pub const PAYABLE_MARKER: &str = "@payable";

/// The low-level external call primitive the scanner is looking for.
pub const RAW_CALL_KEYWORD: &str = "raw_call";

/// Call signatures that make a `raw_call` span safe when present anywhere inside it.
pub const SAFE_SIGNATURES: [&str; 3] = [
    "transfer(address,uint256)",
    "transferFrom(address,address,uint256)",
    "approve(address,uint256)",
];

/// File-level triage verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    PossiblyVulnerable,
    Safe,
}

impl Verdict {
    pub fn is_vulnerable(self) -> bool {
        matches!(self, Verdict::PossiblyVulnerable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::PossiblyVulnerable => "possibly-vulnerable",
            Verdict::Safe => "safe",
        }
    }
}

/// Which rule decided the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictReason {
    /// `@payable` appears somewhere in the text.
    PayableMarker,
    /// No `raw_call` occurrence at all.
    NoRawCall,
    /// At least one `raw_call` span lacks a safe signature.
    SuspiciousCall,
    /// Every extractable `raw_call` span carried a safe signature.
    NoSuspiciousCall,
}

/// A balanced argument span following one `raw_call` occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSpan {
    /// Byte offset of the `raw_call` keyword that produced this span.
    pub offset: usize,
    /// The span text, both parentheses included.
    pub text: String,
    /// First safe signature found inside the span, if any.
    pub safe_signature: Option<String>,
}

impl CallSpan {
    pub fn is_suspicious(&self) -> bool {
        self.safe_signature.is_none()
    }
}

/// Full result of classifying one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    pub reason: VerdictReason,
    /// Every span that was evaluated, in source order.
    pub spans: Vec<CallSpan>,
    /// `raw_call` occurrences with no balanced argument list after them.
    pub skipped_occurrences: usize,
}

impl Classification {
    pub fn suspicious_spans(&self) -> impl Iterator<Item = &CallSpan> {
        self.spans.iter().filter(|span| span.is_suspicious())
    }
}

/// Byte range of the first complete outermost parenthesised span at or after `start`.
///
/// Returns `None` when `start` is out of bounds or not a char boundary, when a `)`
/// shows up with nothing open, or when the text ends before the span closes.
pub fn balanced_span(text: &str, start: usize) -> Option<Range<usize>> {
    let tail = text.get(start..)?;
    let mut open: Vec<usize> = Vec::new();

    for (idx, byte) in tail.bytes().enumerate() {
        match byte {
            b'(' => open.push(idx),
            b')' => {
                let opened_at = open.pop()?;
                if open.is_empty() {
                    return Some(start + opened_at..start + idx + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Text of the span returned by [`balanced_span`].
pub fn extract_span(text: &str, start: usize) -> Option<&str> {
    balanced_span(text, start).map(|range| &text[range])
}

/// First safe signature contained in `span`.
pub fn safe_signature_in(span: &str) -> Option<&'static str> {
    SAFE_SIGNATURES.iter().copied().find(|signature| span.contains(signature))
}

/// Classify `text` and keep the evidence.
pub fn analyze(text: &str) -> Classification {
    if text.contains(PAYABLE_MARKER) {
        info!("has {PAYABLE_MARKER}");
        return Classification {
            verdict: Verdict::PossiblyVulnerable,
            reason: VerdictReason::PayableMarker,
            spans: Vec::new(),
            skipped_occurrences: 0,
        };
    }

    let mut spans = Vec::new();
    let mut skipped_occurrences = 0;
    let mut seen_keyword = false;

    for (offset, _) in text.match_indices(RAW_CALL_KEYWORD) {
        seen_keyword = true;
        let Some(span) = extract_span(text, offset) else {
            debug!(offset, "raw_call without a balanced argument list, skipping");
            skipped_occurrences += 1;
            continue;
        };

        let safe_signature = safe_signature_in(span);
        match safe_signature {
            Some(signature) => debug!(offset, call = span, signature, "raw_call guarded"),
            None => info!(offset, call = span, "raw_call without a safe call signature"),
        }

        spans.push(CallSpan {
            offset,
            text: span.to_string(),
            safe_signature: safe_signature.map(str::to_string),
        });
    }

    let (verdict, reason) = if !seen_keyword {
        (Verdict::Safe, VerdictReason::NoRawCall)
    } else if spans.iter().any(CallSpan::is_suspicious) {
        (Verdict::PossiblyVulnerable, VerdictReason::SuspiciousCall)
    } else {
        (Verdict::Safe, VerdictReason::NoSuspiciousCall)
    };

    Classification { verdict, reason, spans, skipped_occurrences }
}

/// Verdict for `text`. Pure; the same text always yields the same verdict.
pub fn classify(text: &str) -> Verdict {
    analyze(text).verdict
}
