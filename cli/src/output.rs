use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::CliError;
use crate::run::CaseReport;

#[derive(Serialize)]
struct BatchReport<'a> {
    cases: &'a [CaseReport],
}

/// Render one line per case: integer costs separated by single spaces.
///
/// Costs are truncated toward zero. A failed case renders as an empty line
/// so later cases keep their line positions. A case with a single node also
/// has no costs to print, so the two look the same here; use
/// [`render_json`], where a failed case carries `error`, to tell them apart.
pub fn render_plain(reports: &[CaseReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let line: Vec<String> = report
            .costs
            .iter()
            .map(|c| (c.cost.trunc() as i64).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

pub fn render_json(reports: &[CaseReport]) -> Result<String, CliError> {
    let mut out = serde_json::to_string_pretty(&BatchReport { cases: reports })?;
    out.push('\n');
    Ok(out)
}

pub fn render(reports: &[CaseReport], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Plain => Ok(render_plain(reports)),
        OutputFormat::Json => render_json(reports),
    }
}
