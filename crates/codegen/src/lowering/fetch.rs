//! `stream` lowers to a single bounded-retry fetch operation.

use super::Lowerer;
use crate::credentials::MISSING_CREDENTIAL;
use crate::ops::{AUTHORIZATION_HEADER, Operation, RetryPolicy};
use indexmap::IndexMap;
use solas_parser::ast::FetchStatement;

pub(super) fn lower(lowerer: &Lowerer<'_>, fetch: &FetchStatement) -> Operation {
    let mut headers = IndexMap::new();

    if let Some(name) = &fetch.directives.credential {
        let token = match lowerer.credentials.get(name) {
            Some(token) => token,
            None => {
                tracing::warn!(
                    credential = %name,
                    "credential not found, sending {} instead",
                    MISSING_CREDENTIAL
                );
                MISSING_CREDENTIAL
            }
        };
        headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
    }

    Operation::HttpFetch {
        target: fetch.target.clone(),
        url: fetch.endpoint.url.clone(),
        policy: RetryPolicy::new(fetch.directives.attempts, headers),
        body: lowerer.lower_block(&fetch.body),
    }
}
