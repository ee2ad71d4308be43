//! Named character reference lookup table.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The full spec defines 2,231 entities; this table carries the ones that
//! actually occur in word-processor and CMS exports: core markup escapes,
//! typographic punctuation, and Latin-1 accented letters.

use std::collections::HashMap;
use std::sync::LazyLock;

/// The named character reference table.
/// Maps entity names (without the leading '&') to their replacement strings.
///
/// Entities are matched longest-first WITH the trailing semicolon when
/// present; a few legacy entities also work without it (e.g. `&amp` matches).
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Core markup escapes
        ("amp;", "&"),
        ("amp", "&"), // Legacy (no semicolon)
        ("lt;", "<"),
        ("lt", "<"), // Legacy
        ("gt;", ">"),
        ("gt", ">"), // Legacy
        ("quot;", "\""),
        ("quot", "\""), // Legacy
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        // Typographic punctuation
        ("hellip;", "\u{2026}"), // …
        ("mdash;", "\u{2014}"),  // —
        ("ndash;", "\u{2013}"),  // –
        ("lsquo;", "\u{2018}"),  // '
        ("rsquo;", "\u{2019}"),  // '
        ("ldquo;", "\u{201C}"),  // "
        ("rdquo;", "\u{201D}"),  // "
        ("laquo;", "\u{00AB}"),  // «
        ("raquo;", "\u{00BB}"),  // »
        ("middot;", "\u{00B7}"), // ·
        ("bull;", "\u{2022}"),   // •
        ("copy;", "\u{00A9}"),   // ©
        ("reg;", "\u{00AE}"),    // ®
        ("trade;", "\u{2122}"),  // ™
        ("deg;", "\u{00B0}"),    // °
        ("euro;", "\u{20AC}"),   // €
        ("pound;", "\u{00A3}"),  // £
        // Accented letters (the Latin-1 set legacy exports lean on)
        ("Agrave;", "\u{00C0}"),
        ("Acirc;", "\u{00C2}"),
        ("Ccedil;", "\u{00C7}"),
        ("Egrave;", "\u{00C8}"),
        ("Eacute;", "\u{00C9}"),
        ("Ecirc;", "\u{00CA}"),
        ("Euml;", "\u{00CB}"),
        ("Icirc;", "\u{00CE}"),
        ("Iuml;", "\u{00CF}"),
        ("Ocirc;", "\u{00D4}"),
        ("Ugrave;", "\u{00D9}"),
        ("Ucirc;", "\u{00DB}"),
        ("Uuml;", "\u{00DC}"),
        ("agrave;", "\u{00E0}"),
        ("acirc;", "\u{00E2}"),
        ("ccedil;", "\u{00E7}"),
        ("egrave;", "\u{00E8}"),
        ("eacute;", "\u{00E9}"),
        ("ecirc;", "\u{00EA}"),
        ("euml;", "\u{00EB}"),
        ("icirc;", "\u{00EE}"),
        ("iuml;", "\u{00EF}"),
        ("ocirc;", "\u{00F4}"),
        ("ugrave;", "\u{00F9}"),
        ("ucirc;", "\u{00FB}"),
        ("uuml;", "\u{00FC}"),
        ("ntilde;", "\u{00F1}"),
        ("Ntilde;", "\u{00D1}"),
        ("oelig;", "\u{0153}"),
        ("OElig;", "\u{0152}"),
        ("aelig;", "\u{00E6}"),
        ("AElig;", "\u{00C6}"),
        ("szlig;", "\u{00DF}"),
    ])
});

/// Look up a named character reference.
///
/// Returns the replacement string if found. The `name` should NOT include
/// the leading '&'.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Check if any entity name starts with the given prefix.
///
/// Used to decide whether to keep consuming characters while looking for
/// the longest match.
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    NAMED_ENTITIES.keys().any(|name| name.starts_with(prefix))
}
