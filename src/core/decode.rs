// src/core/decode.rs
//! Escape-normalizing JSON parser.
//!
//! An extracted blob may be plain JSON, the body of a JS string literal
//! (quotes escaped once), a whole quoted JSON string, or something mangled in
//! between. Strategies run in a fixed order and the first one producing a
//! JSON array or object wins. A bare string/number/bool never counts as a
//! success, so a quoted blob falls through to the unwrapping strategy.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Parse as-is.
    Direct,
    /// Process JS template-literal escapes, then parse.
    TemplateLiteral,
    /// Unwrap a quoted JSON string, then parse its contents.
    QuotedString,
    /// Regex cleanup of `\"`, `\/` and `\uXXXX`, then parse.
    Regex,
}

impl Strategy {
    pub const ORDER: [Strategy; 4] = [
        Strategy::Direct,
        Strategy::TemplateLiteral,
        Strategy::QuotedString,
        Strategy::Regex,
    ];

    fn apply(self, raw: &str) -> Result<Value, String> {
        let text: Cow<'_, str> = match self {
            Strategy::Direct => Cow::Borrowed(raw),
            Strategy::TemplateLiteral => {
                Cow::Owned(unescape_template(raw).ok_or("invalid escape sequence")?)
            }
            Strategy::QuotedString => {
                let t = raw.trim();
                if t.len() < 2 || !t.starts_with('"') || !t.ends_with('"') {
                    return Err(s!("not quote-wrapped"));
                }
                Cow::Owned(serde_json::from_str::<String>(t).map_err(|e| e.to_string())?)
            }
            Strategy::Regex => Cow::Owned(strip_escapes(raw)),
        };

        let value: Value = serde_json::from_str(text.trim()).map_err(|e| e.to_string())?;
        match value {
            Value::Array(_) | Value::Object(_) => Ok(value),
            other => Err(format!("expected an array or object, got {}", kind(&other))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Direct => "direct",
            Strategy::TemplateLiteral => "template-literal",
            Strategy::QuotedString => "quoted-string",
            Strategy::Regex => "regex",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct Decoded {
    pub value: Value,
    pub strategy: Strategy,
}

/// Every strategy failed. Keeps the raw blob so the caller can dump it.
#[derive(Debug, Error)]
#[error("no decoder could parse the embedded blob ({})", summarize(.attempts))]
pub struct DecodeError {
    pub raw: String,
    pub attempts: Vec<(Strategy, String)>,
}

fn summarize(attempts: &[(Strategy, String)]) -> String {
    attempts
        .iter()
        .map(|(s, msg)| format!("{s}: {msg}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn decode(raw: &str) -> Result<Decoded, DecodeError> {
    let mut attempts = Vec::with_capacity(Strategy::ORDER.len());
    for strategy in Strategy::ORDER {
        match strategy.apply(raw) {
            Ok(value) => {
                logd!("Decoded blob with the {strategy} strategy");
                return Ok(Decoded { value, strategy });
            }
            Err(msg) => {
                logd!("Decoder {strategy} failed: {msg}");
                attempts.push((strategy, msg));
            }
        }
    }
    Err(DecodeError { raw: s!(raw), attempts })
}

/// Evaluate `s` as the body of a JS template literal. Backticks and `${` are
/// plain text; escape sequences are processed. `None` on a malformed escape.
pub fn unescape_template(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let hex: String = [chars.next()?, chars.next()?].iter().collect();
                out.push(char::from(u8::from_str_radix(&hex, 16).ok()?));
            }
            'u' => {
                let unit = read_unicode_escape(&mut chars)?;
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate; pair it with a following \uDCxx when present
                    let mut look = chars.clone();
                    let low = match (look.next(), look.next()) {
                        (Some('\\'), Some('u')) => read_unicode_escape(&mut look)
                            .filter(|lo| (0xDC00..0xE000).contains(lo)),
                        _ => None,
                    };
                    match low {
                        Some(lo) => {
                            chars = look;
                            let code = 0x10000 + ((unit - 0xD800) << 10) + (lo - 0xDC00);
                            out.push(char::from_u32(code)?);
                        }
                        None => out.push(char::REPLACEMENT_CHARACTER),
                    }
                } else {
                    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            // Line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            d if d.is_ascii_digit() => return None,
            other => out.push(other),
        }
    }
    Some(out)
}

/// Reads the part after `\u`: either `XXXX` or `{X...}`.
fn read_unicode_escape<I>(chars: &mut std::iter::Peekable<I>) -> Option<u32>
where
    I: Iterator<Item = char>,
{
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut hex = s!();
        loop {
            match chars.next()? {
                '}' => break,
                h if h.is_ascii_hexdigit() && hex.len() < 6 => hex.push(h),
                _ => return None,
            }
        }
        return u32::from_str_radix(&hex, 16).ok();
    }
    let hex: String = (0..4).map(|_| chars.next()).collect::<Option<String>>()?;
    if !hex.chars().all(|h| h.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

static QUOTE_SLASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\\(["/])"#).unwrap());
static UNICODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u([0-9a-fA-F]{4})").unwrap());

/// Blunt last resort: `\"` → `"`, `\/` → `/`, `\uXXXX` → char.
pub fn strip_escapes(s: &str) -> String {
    let s = QUOTE_SLASH_RE.replace_all(s, "$1");
    UNICODE_RE
        .replace_all(&s, |caps: &regex::Captures<'_>| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| s!(&caps[0]))
        })
        .into_owned()
}
