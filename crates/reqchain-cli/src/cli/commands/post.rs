//! `reqchain post <url> [--json STR | -f key=value ...]`

use super::output::print_outcome;
use anyhow::{Context, Result};
use reqchain_core::{Body, RequestBuilder, Values};

pub fn run_post(
    builder: RequestBuilder,
    url: &str,
    json: Option<&str>,
    form: &[(String, String)],
    include: bool,
) -> Result<()> {
    let body = request_body(json, form)?;
    let outcome = builder.post(url, body).send()?;
    print_outcome(outcome.as_ref(), include)
}

/// `--json` wins; otherwise form fields if any; otherwise no body.
pub(crate) fn request_body(json: Option<&str>, form: &[(String, String)]) -> Result<Option<Body>> {
    if let Some(raw) = json {
        let value: serde_json::Value = serde_json::from_str(raw).context("parse --json body")?;
        return Ok(Some(Body::Json(value)));
    }
    if form.is_empty() {
        return Ok(None);
    }
    Ok(Some(Body::Form(form.iter().cloned().collect::<Values>())))
}
