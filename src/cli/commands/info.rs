//! Info command: presets, components and configuration

use std::path::Path;

use super::super::output::color;

use crate::config::{Config, CONFIG_ENV};
use crate::pipeline::{FACTORIES, PRESETS};

/// Print presets, components and the active configuration.
pub fn cmd_info(config: &Config, explicit: Option<&Path>) -> Result<(), String> {
    println!();
    println!("{}", color("1;36", "litcoref"));
    println!("  Rule-based coreference chains for English prose");
    println!();
    println!("{}:", color("1;33", "Version"));
    println!("  {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("{}:", color("1;33", "Pipeline Presets"));
    for preset in PRESETS {
        let marker = if preset.name == config.pipeline {
            color("32", "*")
        } else {
            " ".to_string()
        };
        println!(
            "  {} {:<12} {:<24} {}",
            marker,
            preset.name,
            preset.pipes.join(", "),
            preset.description
        );
    }
    println!();

    println!("{}:", color("1;33", "Components"));
    for (name, description) in FACTORIES {
        println!("  {:<12} {}", name, description);
    }
    println!();

    println!("{}:", color("1;33", "Configuration"));
    let source = match explicit {
        Some(path) => path.display().to_string(),
        None => match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => format!("{} (from ${})", path, CONFIG_ENV),
            _ => Config::default_path()
                .map(|p| {
                    if p.is_file() {
                        p.display().to_string()
                    } else {
                        format!("{} (not present, using defaults)", p.display())
                    }
                })
                .unwrap_or_else(|| "(no config directory)".to_string()),
        },
    };
    println!("  file:     {}", source);
    println!("  pipeline: {}", config.pipeline);
    println!("  pipes:    {}", config.pipes.join(", "));
    println!("  format:   {:?}", config.output.format);
    println!();
    Ok(())
}
