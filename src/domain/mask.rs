//! Positional input mask codec.
//!
//! A mask is a template string where `9` marks a decimal-digit slot and any
//! other character is a literal separator inserted verbatim, e.g.
//! `"(99) 99999-9999"` for a phone number or `"999.999.999-99"` for a CPF.
//!
//! The codec is bidirectional: [`apply_mask`] formats a raw digit string for
//! display, [`remove_mask`] recovers the canonical digits-only form, and
//! [`mask_to_pattern`] compiles the mask into an anchored pattern that
//! accepts exactly the fully formatted values.

use regex::Regex;

/// Placeholder character marking a digit slot in a mask.
pub const DIGIT_SLOT: char = '9';

/// Format a raw input string against a positional mask.
///
/// Walks the mask left to right. A `9` slot consumes the next digit from the
/// input; non-digit input characters are silently dropped rather than
/// rejected. A literal mask character is emitted as-is, and additionally
/// absorbs an equal input character so that pasting an already formatted
/// value does not duplicate separators.
///
/// Stops as soon as the input is exhausted, so partial input yields a
/// partial (prefix) result. The output is never longer than the mask.
pub fn apply_mask(raw: &str, mask: &str) -> String {
    let mut out = String::with_capacity(mask.len());
    let mut input = raw.chars().peekable();

    for slot in mask.chars() {
        if input.peek().is_none() {
            break;
        }
        if slot == DIGIT_SLOT {
            // Skip over non-digit input until a digit fills the slot.
            while let Some(&c) = input.peek() {
                if c.is_ascii_digit() {
                    break;
                }
                input.next();
            }
            match input.next() {
                Some(c) => out.push(c),
                None => break,
            }
        } else {
            out.push(slot);
            if input.peek() == Some(&slot) {
                input.next();
            }
        }
    }

    out
}

/// Strip every non-digit character, returning the canonical digit string.
///
/// Idempotent: applying it twice gives the same result as applying it once.
pub fn remove_mask(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Compile a mask into an anchored full-match pattern.
///
/// Each `9` becomes a decimal-digit class; every literal is escaped so that
/// mask characters like `.` or `(` match themselves. The pattern accepts
/// only fully formatted values, never partial input.
pub fn mask_to_pattern(mask: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(mask.len() * 4 + 2);
    pattern.push('^');
    for c in mask.chars() {
        if c == DIGIT_SLOT {
            pattern.push_str("[0-9]");
        } else {
            pattern.push_str(&regex::escape(&c.to_string()));
        }
    }
    pattern.push('$');
    Regex::new(&pattern)
}
