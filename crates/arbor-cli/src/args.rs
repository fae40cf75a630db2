//! Command-line argument definitions for the Arbor CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the diagram
//! settings, configuration file selection, and logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

use arbor::{
    palette::Palette,
    settings::{DiagramType, LayoutStyle},
};

/// Command-line arguments for the Arbor mind-map tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input tree: JSON (optionally inside a fenced model reply) or a `.md` outline
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; derived from the format and diagram type when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Diagram type (mind-map, logical-structure, logical-structure-left, fishbone, horizontal, markdown)
    #[arg(short = 't', long)]
    pub diagram_type: Option<DiagramType>,

    /// Color palette name
    #[arg(short, long)]
    pub palette: Option<Palette>,

    /// Node style (standard, rect, diamond)
    #[arg(short, long)]
    pub style: Option<LayoutStyle>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// What the CLI writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Png,
    /// Markdown outline
    Md,
    /// Tree JSON
    Json,
}

impl OutputFormat {
    /// Guesses the format from a file extension, defaulting to SVG.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Self::Png,
            Some("md") | Some("markdown") => Self::Md,
            Some("json") => Self::Json,
            _ => Self::Svg,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Md => "md",
            Self::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("out.PNG"), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path("notes.md"), OutputFormat::Md);
        assert_eq!(OutputFormat::from_path("tree.json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("diagram"), OutputFormat::Svg);
    }

    #[test]
    fn test_parse_settings_flags() {
        let args = Args::try_parse_from([
            "arbor",
            "topic.json",
            "-t",
            "fishbone",
            "--palette",
            "pastel",
            "-s",
            "rect",
            "-f",
            "png",
        ])
        .unwrap();

        assert_eq!(args.diagram_type, Some(DiagramType::Fishbone));
        assert_eq!(args.palette, Some(Palette::Pastel));
        assert_eq!(args.style, Some(LayoutStyle::Rect));
        assert_eq!(args.format, Some(OutputFormat::Png));
        assert_eq!(args.log_level, "info");
        assert!(args.output.is_none());
    }

    #[test]
    fn test_unknown_diagram_type_rejected() {
        assert!(Args::try_parse_from(["arbor", "topic.json", "-t", "spiral"]).is_err());
    }
}
