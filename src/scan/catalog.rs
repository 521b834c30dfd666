//! Per-country VAT identifier shapes and the combined matcher built from them.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// The structural shape of one country's VAT identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    /// Country code reported for this rule (VIES spelling, e.g. "EL").
    pub country_code: &'static str,
    /// Two-letter prefixes that introduce the identifier. The first one is
    /// always `country_code`.
    pub prefixes: &'static [&'static str],
    /// Regex source for the part after the prefix. ASCII only, no captures.
    pub shape: &'static str,
}

impl PatternRule {
    /// Regex source matching prefix and shape, as a non-capturing group.
    pub fn pattern(&self) -> String {
        format!("(?:(?:{}){})", self.prefixes.join("|"), self.shape)
    }
}

const fn rule(
    country_code: &'static str,
    prefixes: &'static [&'static str],
    shape: &'static str,
) -> PatternRule {
    PatternRule {
        country_code,
        prefixes,
        shape,
    }
}

/// Ordered rule list. Alternation is leftmost-first, so inside a shape the
/// longer alternative must come before any alternative that is its prefix.
static RULES: &[PatternRule] = &[
    rule("AT", &["AT"], "U[0-9]{8}"),
    rule("BE", &["BE"], "0[0-9]{9}"),
    rule("BG", &["BG"], "[0-9]{9,10}"),
    rule("CY", &["CY"], "[0-9]{8}L"),
    rule("CZ", &["CZ"], "[0-9]{8,10}"),
    rule("DE", &["DE"], "[0-9]{9}"),
    rule("DK", &["DK"], "[0-9]{8}"),
    rule("EE", &["EE"], "[0-9]{9}"),
    // Greece registers under EL in VIES but GR is printed on many invoices.
    rule("EL", &["EL", "GR"], "[0-9]{9}"),
    rule("ES", &["ES"], "[0-9A-Z][0-9]{7}[0-9A-Z]"),
    rule("FI", &["FI"], "[0-9]{8}"),
    rule("FR", &["FR"], "[0-9A-Z]{2}[0-9]{9}"),
    // Standard (9 or 12 digits), then government/health authority (GD/HA + 3).
    rule("GB", &["GB"], "(?:[0-9]{9}(?:[0-9]{3})?|[A-Z]{2}[0-9]{3})"),
    rule("HR", &["HR"], "[0-9]{11}"),
    rule("HU", &["HU"], "[0-9]{8}"),
    // Two-letter suffix first: the one-letter form is a prefix of it. The
    // second letter is limited to the ones Revenue issues (A-I, W), so a
    // following word such as "Total" is not swallowed once separators are
    // stripped. A following word starting with A-I or W ("Amount") still is.
    rule("IE", &["IE"], "(?:[0-9]{7}[A-Z][A-IW]|[0-9]{7}[A-Z]|[0-9]S[0-9]{5}L)"),
    rule("IT", &["IT"], "[0-9]{11}"),
    // 12 digits first for the same reason.
    rule("LT", &["LT"], "(?:[0-9]{12}|[0-9]{9})"),
    rule("LU", &["LU"], "[0-9]{8}"),
    rule("LV", &["LV"], "[0-9]{11}"),
    rule("MT", &["MT"], "[0-9]{8}"),
    rule("NL", &["NL"], "[0-9]{9}B[0-9]{2}"),
    rule("PL", &["PL"], "[0-9]{10}"),
    rule("PT", &["PT"], "[0-9]{9}"),
    rule("RO", &["RO"], "[0-9]{2,10}"),
    rule("SE", &["SE"], "[0-9]{12}"),
    rule("SI", &["SI"], "[0-9]{8}"),
    rule("SK", &["SK"], "[0-9]{10}"),
];

static MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(&combined_pattern())
        .case_insensitive(true)
        .unicode(false)
        .build()
        .expect("VAT pattern catalog must compile")
});

/// All supported rules, in matching order.
pub fn rules() -> &'static [PatternRule] {
    RULES
}

/// Look up the rule for a country code or one of its prefixes.
pub fn rule_for(code: &str) -> Option<&'static PatternRule> {
    RULES
        .iter()
        .find(|r| r.prefixes.iter().any(|p| p.eq_ignore_ascii_case(code)))
}

/// Regex source of the logical OR of every rule.
pub fn combined_pattern() -> String {
    RULES
        .iter()
        .map(PatternRule::pattern)
        .collect::<Vec<_>>()
        .join("|")
}

/// The compiled, case-insensitive combined matcher.
///
/// `Regex` keeps no scan cursor; every `find_iter` starts fresh.
pub fn matcher() -> &'static Regex {
    &MATCHER
}
