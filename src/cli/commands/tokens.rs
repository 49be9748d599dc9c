//! Tokens command: show how text was tokenized and tagged

use clap::Parser;
use serde::Serialize;

use super::super::output::write_output;
use super::super::utils::{build_pipeline, get_input_text};

use crate::config::{Config, OutputFormat};
use crate::Doc;

/// Print tokens with their index, tag and sentence
#[derive(Parser, Debug, Default)]
pub struct TokensArgs {
    /// Input text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read input from file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Pipeline preset (overrides the config file)
    #[arg(short, long, value_name = "NAME")]
    pub pipeline: Option<String>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Positional text argument
    #[arg(trailing_var_arg = true)]
    pub positional: Vec<String>,
}

#[derive(Serialize)]
struct TokenRow<'a> {
    index: usize,
    text: &'a str,
    start: usize,
    end: usize,
    tag: &'static str,
    sentence: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity: Option<&'static str>,
}

fn rows(doc: &Doc) -> Vec<TokenRow<'_>> {
    doc.tokens()
        .iter()
        .map(|t| TokenRow {
            index: t.index,
            text: &t.text,
            start: t.span.char_start,
            end: t.span.char_end,
            tag: t.tag.as_label(),
            sentence: t.sentence,
            entity: doc.entity_at(t.index).map(|e| e.label.as_label()),
        })
        .collect()
}

fn to_tsv(doc: &Doc) -> String {
    let mut out = String::new();
    for row in rows(doc) {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}",
            row.index, row.text, row.tag, row.sentence
        ));
        if let Some(label) = row.entity {
            out.push_str(&format!("\t{}", label));
        }
        out.push('\n');
    }
    out
}

/// Print one row per token.
pub fn cmd_tokens(args: TokensArgs, config: &Config) -> Result<(), String> {
    let text = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;
    let nlp = build_pipeline(config, args.pipeline.as_deref(), &[])?;
    let doc = nlp.process(&text).map_err(|e| e.to_string())?;

    let output = match args.format.unwrap_or(config.output.format) {
        OutputFormat::Text => to_tsv(&doc),
        OutputFormat::Json => serde_json::to_string_pretty(&rows(&doc))
            .map(|s| s + "\n")
            .map_err(|e| format!("Failed to serialize tokens: {}", e))?,
    };
    write_output(&output, args.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;

    #[test]
    fn tsv_columns() {
        let nlp = Pipeline::load("en_literary").unwrap();
        let doc = nlp.process("My brother Laird sat.").unwrap();
        let tsv = to_tsv(&doc);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "0\tMy\tPRON\t0");
        assert_eq!(lines[2], "2\tLaird\tPROPN\t0\tPER");
        assert_eq!(lines[4], "4\t.\tPUNCT\t0");
    }

    #[test]
    fn json_rows_carry_offsets() {
        let nlp = Pipeline::load("en_blank").unwrap();
        let doc = nlp.process("Hi there.").unwrap();
        let json = serde_json::to_value(rows(&doc)).unwrap();
        assert_eq!(json[1]["text"], "there");
        assert_eq!(json[1]["start"], 3);
        assert_eq!(json[1]["end"], 8);
    }
}
