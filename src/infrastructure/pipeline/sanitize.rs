//! Response sanitization - best-effort repair of model output
//!
//! The model occasionally emits HTML fragments, malformed Markdown links, or
//! protocol-relative URLs despite the prompt rules. These passes repair the
//! common cases with pattern replacement; free-form model output has no
//! grammar, so a parser would buy nothing here. The passes are ordered
//! (later ones assume anchors and Markdown are already normalized) and run
//! until the text stops changing, so the whole transform is idempotent even
//! on nested forms that shed one layer per run.

use once_cell::sync::Lazy;
use regex::Regex;

/// Orphaned HTML fragments like `presse.aspx" target="_blank">text`, emitted
/// when the model truncates an anchor tag. Keeps only the link text.
static HTML_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[a-zA-Z0-9\-_.]+\.(?:aspx|html|php|htm)["'][^>]*>([^<\n]+)"#).unwrap()
});

/// Well-formed anchor tags, converted to Markdown links.
static ANCHOR_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a\s+[^>]*href=["']([^"']+)["'][^>]*>([^<]+)</a>"#).unwrap()
});

/// Leftover opening/closing anchor tags with no usable href.
static ORPHAN_ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?a[^>]*>").unwrap());

/// Dangling HTML attributes outside any tag.
static ORPHAN_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\b(?:target|rel|class)=["'][^"']*["']"#).unwrap());

/// Colon followed by inline text on the same line: break into a paragraph.
static COLON_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r":[ \t]+(\S)").unwrap());

/// Colon at end of line with the list starting on the very next line:
/// widen to a blank line.
static COLON_EOL: Lazy<Regex> = Lazy::new(|| Regex::new(r":\n([^\n])").unwrap());

/// Numbered list item crammed onto the previous line.
static LIST_ITEM_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+(\d+\. )").unwrap());

/// Missing space after a list number at the start of a line.
static LIST_ITEM_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\d+\.)(\S)").unwrap());

/// Markdown link missing the parentheses around its URL.
static LINK_MISSING_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\](https?://[^\s)]+)").unwrap());

/// Stray whitespace inside an email address.
static EMAIL_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)@\s+(\S+)").unwrap());

/// Protocol-relative URL inside a Markdown link.
static PROTOCOL_RELATIVE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\((//[^)]+)\)").unwrap());

/// Bare protocol-relative URL. The leading capture excludes the `//` of an
/// explicit scheme (preceded by `:`) and path-internal double slashes
/// (preceded by a word character).
static PROTOCOL_RELATIVE_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|[^:\w])(//[a-zA-Z0-9][^\s)]*)").unwrap());

/// Redundant parentheses around a bare URL that is not a Markdown link
/// target.
static PARENTHESIZED_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|[^\]])\((https?://[^\s)]+)\)").unwrap());

/// Repeated horizontal whitespace, newlines untouched.
static HORIZONTAL_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// More than one consecutive blank line.
static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean up raw generation output. Pure text-to-text, idempotent.
pub fn sanitize(text: &str) -> String {
    // Nested forms (double-parenthesized URLs, chained email whitespace)
    // lose one layer per run; every pass only strips or normalizes, so the
    // sequence converges.
    let mut cleaned = run_passes(text);
    loop {
        let next = run_passes(&cleaned);
        if next == cleaned {
            return cleaned;
        }
        cleaned = next;
    }
}

fn run_passes(text: &str) -> String {
    let cleaned = HTML_FRAGMENT.replace_all(text, "${1}");
    let cleaned = ANCHOR_TAG.replace_all(&cleaned, "[${2}](${1})");
    let cleaned = ORPHAN_ANCHOR.replace_all(&cleaned, "");
    let cleaned = ORPHAN_ATTRIBUTE.replace_all(&cleaned, "");

    let cleaned = COLON_INLINE.replace_all(&cleaned, ":\n\n${1}");
    let cleaned = COLON_EOL.replace_all(&cleaned, ":\n\n${1}");
    let cleaned = LIST_ITEM_INLINE.replace_all(&cleaned, "\n${1}");
    let cleaned = LIST_ITEM_SPACING.replace_all(&cleaned, "${1} ${2}");

    let cleaned = LINK_MISSING_PARENS.replace_all(&cleaned, "[${1}](${2})");
    let cleaned = EMAIL_SPACE.replace_all(&cleaned, "${1}@${2}");
    let cleaned = PROTOCOL_RELATIVE_LINK.replace_all(&cleaned, "[${1}](https:${2})");
    let cleaned = PROTOCOL_RELATIVE_BARE.replace_all(&cleaned, "${1}https:${2}");
    let cleaned = PARENTHESIZED_URL.replace_all(&cleaned, "${1}${2}");

    let cleaned = HORIZONTAL_WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = EXCESS_BLANK_LINES.replace_all(&cleaned, "\n\n");

    cleaned.trim().to_string()
}
