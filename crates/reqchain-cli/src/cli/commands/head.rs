//! `reqchain head <url>`

use super::output::print_outcome;
use anyhow::Result;
use reqchain_core::RequestBuilder;

pub fn run_head(builder: RequestBuilder, url: &str, include: bool) -> Result<()> {
    let outcome = builder.head(url).send()?;
    // HEAD has no body; always show headers.
    print_outcome(outcome.as_ref(), include || outcome.is_some())
}
