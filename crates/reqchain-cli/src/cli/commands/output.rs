//! Printing responses to stdout.

use anyhow::Result;
use reqchain_core::Response;
use std::io::{self, Write};

pub fn print_outcome(outcome: Option<&Response>, include_headers: bool) -> Result<()> {
    let Some(response) = outcome else {
        eprintln!("no request sent (retry count is 0)");
        return Ok(());
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_response(&mut out, response, include_headers)?;
    out.flush()?;
    Ok(())
}

pub(crate) fn write_response<W: Write>(out: &mut W, response: &Response, include_headers: bool) -> io::Result<()> {
    if include_headers {
        writeln!(out, "HTTP {}", response.status)?;
        for (name, value) in &response.headers {
            writeln!(out, "{}: {}", name, value)?;
        }
        writeln!(out)?;
    } else if !response.is_success() {
        tracing::warn!(status = response.status, "server returned an error status");
    }
    out.write_all(&response.body)?;
    if !response.body.is_empty() && !response.body.ends_with(b"\n") {
        writeln!(out)?;
    }
    Ok(())
}
