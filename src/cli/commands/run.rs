//! Run command: process text and print coreference chains

use clap::Parser;
use std::time::Instant;

use super::super::output::{write_output, RunReport};
use super::super::utils::{build_pipeline, get_input_text};

use crate::config::{Config, OutputFormat};
use crate::{sample, Error};

/// Run the pipeline over text and print its coreference chains
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Input text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read input from file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Pipeline preset (overrides the config file)
    #[arg(short, long, value_name = "NAME")]
    pub pipeline: Option<String>,

    /// Token index to resolve (repeatable)
    #[arg(short, long, value_name = "TOKEN")]
    pub resolve: Vec<usize>,

    /// Also list the characters of the text
    #[arg(short, long)]
    pub characters: bool,

    /// Also group paragraphs into story stages
    #[arg(short, long)]
    pub segments: bool,

    /// Also measure sentence length, readability and style
    #[arg(long)]
    pub features: bool,

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

impl RunArgs {
    /// Arguments of the bare `litcoref` invocation.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            text: Some(sample::EXCERPT.to_string()),
            resolve: vec![sample::DEMO_TOKEN],
            ..Self::default()
        }
    }
}

/// Process text and write chains, resolutions and the optional roster.
pub fn cmd_run(args: RunArgs, config: &Config) -> Result<(), String> {
    let text = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;

    let mut ensure = vec!["coref"];
    if args.characters {
        ensure.push("characters");
    }
    if args.segments {
        ensure.push("segmenter");
    }
    if args.features {
        ensure.push("linguistic");
    }
    let nlp = build_pipeline(config, args.pipeline.as_deref(), &ensure)?;

    let start = Instant::now();
    let doc = nlp.process(&text).map_err(|e| e.to_string())?;
    log::info!(
        "processed {} tokens in {} sentences in {:.2}ms",
        doc.len(),
        doc.sentences().len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(&bad) = args.resolve.iter().find(|&&t| t >= doc.len()) {
        return Err(Error::invalid_input(format!(
            "token {} is out of range (document has {} tokens)",
            bad,
            doc.len()
        ))
        .to_string());
    }

    let chains = doc
        .coref_chains()
        .ok_or_else(|| Error::pipeline("coref did not run").to_string())?;
    let report = RunReport::new(nlp.name(), &doc, chains, &args.resolve);

    let output = match args.format.unwrap_or(config.output.format) {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => report.to_json()?,
    };
    write_output(&output, args.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str) -> RunArgs {
        RunArgs {
            text: Some(text.to_string()),
            ..RunArgs::default()
        }
    }

    #[test]
    fn writes_chains_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("chains.txt");
        let run = RunArgs {
            resolve: vec![6],
            output: Some(out.to_str().unwrap().to_string()),
            ..args("My father was a farmer. He raised foxes.")
        };
        cmd_run(run, &Config::default()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "0: father(1), He(6)\n[father]\n"
        );
    }

    #[test]
    fn out_of_range_token() {
        let run = RunArgs {
            resolve: vec![99],
            ..args("He left.")
        };
        let err = cmd_run(run, &Config::default()).unwrap_err();
        assert!(err.contains("token 99 is out of range"), "{}", err);
    }

    #[test]
    fn unknown_preset() {
        let run = RunArgs {
            pipeline: Some("xx_missing".into()),
            ..args("He left.")
        };
        assert!(cmd_run(run, &Config::default()).is_err());
    }

    #[test]
    fn optional_layers() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.txt");
        let run = RunArgs {
            segments: true,
            features: true,
            output: Some(out.to_str().unwrap().to_string()),
            ..args("I sat.\n\nHe came.\n\nWe left.")
        };
        cmd_run(run, &Config::default()).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("\nsegments:\n  introduction [0..3]"), "{}", written);
        assert!(written.contains("\nstyle:\n  3 sentences, 6 words"), "{}", written);
    }

    #[test]
    fn demo_arguments() {
        let demo = RunArgs::demo();
        assert_eq!(demo.resolve, [sample::DEMO_TOKEN]);
        assert_eq!(demo.text.as_deref(), Some(sample::EXCERPT));
    }
}
