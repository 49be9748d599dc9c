//! Utility functions for CLI commands

use is_terminal::IsTerminal;
use std::io::{self, Read};

use crate::config::Config;
use crate::sample;
use crate::Pipeline;

/// Get input text from the `--text` flag, a file, positional words, or stdin.
///
/// With no input at all and an interactive stdin, the built-in excerpt is
/// used.
pub fn get_input_text(
    text: &Option<String>,
    file: Option<&str>,
    positional: &[String],
) -> Result<String, String> {
    if let Some(t) = text {
        Ok(t.clone())
    } else if let Some(f) = file {
        read_input_file(f)
    } else if !positional.is_empty() {
        Ok(positional.join(" "))
    } else if io::stdin().is_terminal() {
        log::info!("no input given, using the built-in excerpt");
        Ok(sample::EXCERPT.to_string())
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    }
}

/// Read input from file
pub fn read_input_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path, e))
}

/// Build the configured pipeline, overriding the preset if asked, and make
/// sure the listed pipes are present.
pub fn build_pipeline(
    config: &Config,
    preset: Option<&str>,
    ensure: &[&str],
) -> Result<Pipeline, String> {
    let mut config = config.clone();
    if let Some(name) = preset {
        config.pipeline = name.to_string();
    }
    let mut nlp = Pipeline::from_config(&config).map_err(|e| e.to_string())?;
    for pipe in ensure {
        if !nlp.has_pipe(pipe) {
            nlp.add_pipe(pipe).map_err(|e| e.to_string())?;
        }
    }
    Ok(nlp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_text_wins() {
        let text = get_input_text(&Some("a b".into()), None, &["c".into()]).unwrap();
        assert_eq!(text, "a b");
    }

    #[test]
    fn positional_words_are_joined() {
        let text = get_input_text(&None, None, &["He".into(), "left.".into()]).unwrap();
        assert_eq!(text, "He left.");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = get_input_text(&None, Some("/no/such/file.txt"), &[]).unwrap_err();
        assert!(err.contains("/no/such/file.txt"));
    }

    #[test]
    fn pipeline_with_required_pipes() {
        let config = Config {
            pipes: Vec::new(),
            ..Config::default()
        };
        let nlp = build_pipeline(&config, None, &["coref", "characters"]).unwrap();
        assert_eq!(
            nlp.pipe_names(),
            ["senter", "tagger", "ner", "coref", "characters"]
        );
        assert!(build_pipeline(&config, Some("nope"), &[]).is_err());
    }
}
