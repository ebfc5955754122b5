//! `reqchain get <url> [-q key=value]...`

use super::output::print_outcome;
use anyhow::Result;
use reqchain_core::{RequestBuilder, Values};

pub fn run_get(builder: RequestBuilder, url: &str, query: &[(String, String)], include: bool) -> Result<()> {
    let params: Values = query.iter().cloned().collect();
    let outcome = builder.get(url, &params).send()?;
    print_outcome(outcome.as_ref(), include)
}
