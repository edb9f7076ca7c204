use crate::ops::Operation;
use solas_parser::ast::StorageDirective;

pub(super) fn lower(directive: &StorageDirective) -> Operation {
    match directive {
        StorageDirective::Store { value, key } => Operation::MapPut {
            key: key.clone(),
            value: value.clone(),
        },
        StorageDirective::Recall { key, target } => Operation::MapGet {
            key: key.clone(),
            target: target.clone(),
        },
    }
}
