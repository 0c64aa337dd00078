/// Canonicalize text for comparison: trim surrounding whitespace, then apply
/// full Unicode case folding.
///
/// Every equality check in the engine (entry lookup, tag comparison,
/// round-robin keys) goes through this function. Answers shown to the user
/// are never normalized.
#[must_use]
pub fn normalize(s: &str) -> String {
    caseless::default_case_fold_str(s.trim())
}
