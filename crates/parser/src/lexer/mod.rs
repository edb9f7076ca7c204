mod core;
mod cursor;
mod guard;
mod rules;
mod token;

pub use self::core::{Lexer, TokenStream};
pub use guard::{ComplexityGuard, MAX_CONNECTIVES};
pub use rules::{LexRule, RULES, classify};
pub use token::{Keyword, LogosToken, Namespace, Token, TokenKind};
