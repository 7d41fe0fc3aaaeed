//! Classify command: preview how raw status codes are displayed.

use serde::Serialize;
use tabled::Tabled;

use chargewatch_core::{Classification, classify};

use crate::cli::ClassifyArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ClassifiedCode {
    code: String,
    #[serde(flatten)]
    classification: Classification,
}

#[derive(Tabled)]
struct ClassifyRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Badge")]
    badge: String,
    #[tabled(rename = "State")]
    state: String,
}

fn to_row(c: &ClassifiedCode) -> ClassifyRow {
    ClassifyRow {
        code: c.code.clone(),
        label: c.classification.text.clone(),
        badge: c.classification.badge.to_string(),
        state: c.classification.state_text(),
    }
}

pub fn handle(args: ClassifyArgs, settings: &Settings) -> Result<(), CliError> {
    let classified: Vec<ClassifiedCode> = args
        .codes
        .into_iter()
        .map(|code| {
            let classification = classify(Some(code.trim()));
            ClassifiedCode {
                code,
                classification,
            }
        })
        .collect();

    let out = output::render_list(
        settings.output,
        &classified,
        to_row,
        |c| format!("{}\t{}", c.code, c.classification.text),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
