//! Ordered rule table for lexeme classification.
//!
//! Each raw lexeme produced by the scanner belongs to exactly one rule class.
//! The table lists the classes in matching priority: when a lexeme could be
//! read as more than one class, the earlier class wins. Prohibited forms sit
//! at the top so a banned word such as `or` is never re-read as an
//! identifier, and the catch-all `Mismatch` sits at the bottom.

use super::token::LogosToken;

/// Rule classes in strict matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LexRule {
    /// `or`, increment/decrement, compound assignment, `?` and raw bitwise operators.
    Prohibited,
    /// `//` comments and double-quoted string literals.
    Literal,
    /// `@net`, `@data`, `@math`, `@core`, `@env`, `@cache`.
    ResourceRoot,
    /// Reserved keywords and type names.
    Reserved,
    /// `->`, comparators, numbers and identifiers.
    Operand,
    /// `{ } ( ) [ ] : , .`
    Structural,
    /// Newlines. Spaces and tabs are skipped before classification.
    Layout,
    /// Anything not covered above.
    Mismatch,
}

/// The rule table, highest priority first.
pub const RULES: [LexRule; 8] = [
    LexRule::Prohibited,
    LexRule::Literal,
    LexRule::ResourceRoot,
    LexRule::Reserved,
    LexRule::Operand,
    LexRule::Structural,
    LexRule::Layout,
    LexRule::Mismatch,
];

impl LexRule {
    /// Position of this rule in [`RULES`].
    pub fn priority(self) -> usize {
        RULES
            .iter()
            .position(|rule| *rule == self)
            .unwrap_or(RULES.len())
    }

    /// Whether a match of this rule aborts lexing.
    pub fn is_fatal(self) -> bool {
        matches!(self, LexRule::Prohibited | LexRule::Mismatch)
    }
}

/// Classify a raw lexeme. `None` (a byte the scanner could not read at all)
/// falls through to [`LexRule::Mismatch`].
pub fn classify(token: Option<LogosToken>) -> LexRule {
    let Some(token) = token else {
        return LexRule::Mismatch;
    };

    RULES
        .iter()
        .copied()
        .find(|rule| matches_rule(*rule, token))
        .unwrap_or(LexRule::Mismatch)
}

fn matches_rule(rule: LexRule, token: LogosToken) -> bool {
    use LogosToken as T;

    match rule {
        LexRule::Prohibited => matches!(
            token,
            T::Or
                | T::PlusPlus
                | T::MinusMinus
                | T::PlusEqual
                | T::MinusEqual
                | T::StarEqual
                | T::SlashEqual
                | T::PercentEqual
                | T::AmpersandEqual
                | T::PipeEqual
                | T::CaretEqual
                | T::Question
                | T::Ampersand
                | T::Pipe
                | T::Caret
                | T::Tilde
                | T::LeftShift
                | T::RightShift
        ),
        LexRule::Literal => matches!(token, T::Comment | T::String),
        LexRule::ResourceRoot => matches!(token, T::Resource),
        LexRule::Reserved => token.keyword().is_some() || token == T::TypeName,
        LexRule::Operand => matches!(token, T::Arrow | T::Comparator | T::Number | T::Ident),
        LexRule::Structural => matches!(
            token,
            T::LeftBrace
                | T::RightBrace
                | T::LeftParen
                | T::RightParen
                | T::LeftBracket
                | T::RightBracket
                | T::Colon
                | T::Comma
                | T::Dot
        ),
        LexRule::Layout => token == T::Newline,
        LexRule::Mismatch => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prohibited_outranks_everything() {
        assert_eq!(LexRule::Prohibited.priority(), 0);
        assert_eq!(LexRule::Mismatch.priority(), RULES.len() - 1);
        assert!(LexRule::Prohibited < LexRule::Reserved);
    }

    #[test]
    fn classifies_representative_lexemes() {
        assert_eq!(classify(Some(LogosToken::Or)), LexRule::Prohibited);
        assert_eq!(classify(Some(LogosToken::Question)), LexRule::Prohibited);
        assert_eq!(classify(Some(LogosToken::Comment)), LexRule::Literal);
        assert_eq!(classify(Some(LogosToken::Resource)), LexRule::ResourceRoot);
        assert_eq!(classify(Some(LogosToken::Grow)), LexRule::Reserved);
        assert_eq!(classify(Some(LogosToken::TypeName)), LexRule::Reserved);
        assert_eq!(classify(Some(LogosToken::Arrow)), LexRule::Operand);
        assert_eq!(classify(Some(LogosToken::Dot)), LexRule::Structural);
        assert_eq!(classify(Some(LogosToken::Newline)), LexRule::Layout);
        assert_eq!(classify(None), LexRule::Mismatch);
    }

    #[test]
    fn only_prohibited_and_mismatch_are_fatal() {
        let fatal: Vec<_> = RULES.iter().filter(|rule| rule.is_fatal()).collect();
        assert_eq!(fatal, vec![&LexRule::Prohibited, &LexRule::Mismatch]);
    }
}
