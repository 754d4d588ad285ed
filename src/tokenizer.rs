//! Identifier tokenization
//!
//! Splits an identifier into word-like tokens at camelCase boundaries and
//! letter/digit transitions, then folds runs of single uppercase letters
//! back into acronyms (`myURLVariable` -> `my`, `URL`, `Variable`).
//!
//! Boundaries use Unicode general categories: uppercase letters (Lu) and
//! decimal digits (Nd). Other numerals and symbols (`²`, `½`, `Ⅻ`, `Ⓐ`)
//! stay inside the surrounding token.

use unicode_general_category::{get_general_category, GeneralCategory};

/// One word-like unit of an identifier
pub type Token = String;

/// Ordered tokens of a single identifier
pub type TokenSequence = Vec<Token>;

/// Tokenize an identifier
///
/// Concatenating the returned tokens always reproduces `identifier`.
/// An empty identifier yields an empty sequence.
pub fn tokenize(identifier: &str) -> TokenSequence {
    let mut tokens = TokenSequence::new();
    let mut current = String::new();

    for ch in identifier.chars() {
        let boundary = if is_upper_letter(ch) {
            !current.is_empty()
        } else if is_decimal_digit(ch) {
            !current.is_empty() && !is_numeric(&current)
        } else {
            false
        };

        if boundary {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    merge_acronyms(tokens)
}

/// Fold adjacent fully uppercase tokens into one acronym token
fn merge_acronyms(tokens: TokenSequence) -> TokenSequence {
    tokens.into_iter().fold(TokenSequence::new(), |mut merged, token| {
        match merged.last_mut() {
            Some(last) if is_uppercase(last) && is_uppercase(&token) => last.push_str(&token),
            _ => merged.push(token),
        }
        merged
    })
}

/// Non-empty and made only of uppercase letters
pub fn is_uppercase(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_upper_letter)
}

fn is_numeric(token: &str) -> bool {
    token.chars().all(is_decimal_digit)
}

fn is_upper_letter(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::UppercaseLetter
}

fn is_decimal_digit(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::DecimalNumber
}
