use crate::ops::{Operation, Output};
use crate::template::Template;
use solas_parser::ast::Emission;

/// Template text is carried as data and never spliced into other operations,
/// so quotes and braces inside it need no escaping.
pub(super) fn lower(emission: &Emission) -> Operation {
    match emission {
        Emission::Template(text) => Operation::Print(Output::Template(Template::parse(text))),
        Emission::Value(expr) => Operation::Print(Output::Value(expr.clone())),
    }
}
