//! Output formatting utilities for CLI commands

use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};

use crate::{Character, CorefChains, Doc, Resolution, Segment, TextFeatures};

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    if let Some(path) = path {
        std::fs::write(path, content).map_err(|e| format!("Failed to write to {}: {}", path, e))?;
        log::info!("wrote {} bytes to {}", content.len(), path);
    } else {
        print!("{}", content);
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {}", e))?;
    }
    Ok(())
}

/// Wrap `text` in an ANSI color when stdout is a terminal.
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Resolution requested with `--resolve`.
#[derive(Debug, Serialize)]
pub struct ResolvedToken {
    /// Token index
    pub token: usize,
    /// Token text
    pub text: String,
    /// What it refers to, if it is in a chain
    pub resolution: Option<Resolution>,
}

/// Everything `run` reports.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Pipeline preset
    pub pipeline: &'a str,
    /// Pipes that ran
    pub pipes: &'a [String],
    /// Number of tokens
    pub tokens: usize,
    /// Number of sentences
    pub sentences: usize,
    /// Coreference chains
    pub chains: &'a CorefChains,
    /// Requested resolutions
    pub resolved: Vec<ResolvedToken>,
    /// Character roster, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<&'a [Character]>,
    /// Story segments, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<&'a [Segment]>,
    /// Style measurements, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<&'a TextFeatures>,
}

impl<'a> RunReport<'a> {
    /// Collect the report for a processed document.
    pub fn new(pipeline: &'a str, doc: &'a Doc, chains: &'a CorefChains, resolve: &[usize]) -> Self {
        let resolved = resolve
            .iter()
            .map(|&token| ResolvedToken {
                token,
                text: doc.token(token).map(|t| t.text.clone()).unwrap_or_default(),
                resolution: chains.resolve(doc, token),
            })
            .collect();
        Self {
            pipeline,
            pipes: doc.processed_by(),
            tokens: doc.len(),
            sentences: doc.sentences().len(),
            chains,
            resolved,
            characters: doc.characters(),
            segments: doc.segments(),
            features: doc.features(),
        }
    }

    /// Plain text: chains, one resolution per line (`None` if unresolved),
    /// then the roster, segments and style when present.
    pub fn to_text(&self) -> String {
        let mut out = self.chains.to_string();
        for item in &self.resolved {
            match &item.resolution {
                Some(resolution) => out.push_str(&format!("{}\n", resolution)),
                None => out.push_str("None\n"),
            }
        }
        if let Some(characters) = self.characters {
            out.push_str("\ncharacters:\n");
            for character in characters {
                out.push_str(&format!("  {}\n", character));
            }
        }
        if let Some(segments) = self.segments {
            out.push_str("\nsegments:\n");
            for segment in segments {
                out.push_str(&format!("  {}\n", segment));
            }
        }
        if let Some(features) = self.features {
            out.push_str("\nstyle:\n");
            for line in features.to_string().lines() {
                out.push_str(&format!("  {}\n", line));
            }
        }
        out
    }

    /// Pretty JSON.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| format!("Failed to serialize report: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;

    fn report_for(text: &str, resolve: &[usize], f: impl FnOnce(&RunReport<'_>)) {
        let mut nlp = Pipeline::load("en_literary").unwrap();
        nlp.add_pipe("coref").unwrap();
        let doc = nlp.process(text).unwrap();
        let chains = doc.coref_chains().unwrap();
        let report = RunReport::new(nlp.name(), &doc, chains, resolve);
        f(&report);
    }

    #[test]
    fn text_report() {
        report_for("My father was a farmer. He raised foxes.", &[6, 2], |report| {
            assert_eq!(report.to_text(), "0: father(1), He(6)\n[father]\nNone\n");
        });
    }

    #[test]
    fn json_report() {
        report_for("My father was a farmer. He raised foxes.", &[6], |report| {
            let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
            assert_eq!(value["pipeline"], "en_literary");
            assert_eq!(value["sentences"], 2);
            assert_eq!(value["resolved"][0]["text"], "He");
            assert_eq!(value["resolved"][0]["resolution"]["texts"][0], "father");
            assert!(value.get("characters").is_none());
        });
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let path = path.to_str().unwrap();
        write_output("hello\n", Some(path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
        assert!(write_output("x", Some("/no/such/dir/out.txt")).is_err());
    }
}
