//! CLI logic for the Arbor mind-map tool.
//!
//! This module reads a tree, lays it out and writes it in the requested
//! output format.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::{fs, path::Path};

use log::{debug, info};

use arbor::{
    ArborError, DiagramBuilder,
    export::{Exporter, png::PngExporter, svg::SvgExporter},
    settings::Settings,
    source::extract_json,
    tree::Tree,
};

/// Run the Arbor CLI application
///
/// This function reads the input tree, applies the display settings and
/// writes the result to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArborError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid tree JSON or outline text
/// - Export errors
pub fn run(args: &Args) -> Result<(), ArborError> {
    info!(input_path = args.input; "Processing mind map");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let tree = read_tree(&builder, &args.input, &source)?;
    let settings = settings(builder.config().diagram(), args);

    let format = args.format.unwrap_or_else(|| match &args.output {
        Some(output) => OutputFormat::from_path(output),
        None => OutputFormat::Svg,
    });
    let output = output_path(args, format, &settings);
    debug!(format:? = format, settings:? = settings; "Resolved output");

    match format {
        OutputFormat::Svg => {
            let scene = builder.render(&tree, &settings)?;
            SvgExporter::new(&output).export_scene(&scene)?;
        }
        OutputFormat::Png => {
            let scene = builder.render(&tree, &settings)?;
            let options = builder
                .config()
                .export()
                .raster_options()
                .map_err(ArborError::Config)?;
            PngExporter::new(&output, options).export_scene(&scene)?;
        }
        OutputFormat::Md => fs::write(&output, builder.to_outline(&tree))?,
        OutputFormat::Json => fs::write(&output, tree.to_json()?)?,
    }

    info!(output_file = output; "Mind map exported successfully");

    Ok(())
}

/// Outlines are recognized by extension; anything else is JSON, possibly
/// wrapped in a fenced model reply.
fn read_tree(builder: &DiagramBuilder, input: &str, source: &str) -> Result<Tree, ArborError> {
    let is_outline = Path::new(input)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"));

    if is_outline {
        builder.parse_outline(source)
    } else {
        builder.parse_json(extract_json(source))
    }
}

fn settings(defaults: &Settings, args: &Args) -> Settings {
    let mut settings = *defaults;
    if let Some(diagram_type) = args.diagram_type {
        settings.set_diagram_type(diagram_type);
    }
    if let Some(palette) = args.palette {
        settings.set_color_palette(palette);
    }
    if let Some(style) = args.style {
        settings.set_layout_style(style);
    }
    settings
}

fn output_path(args: &Args, format: OutputFormat, settings: &Settings) -> String {
    if let Some(output) = &args.output {
        return output.clone();
    }
    match format {
        OutputFormat::Md => settings.diagram_type().outline_file_name().to_string(),
        _ => format!("mind-map.{}", format.extension()),
    }
}

#[cfg(test)]
mod tests {
    use arbor::{palette::Palette, settings::{DiagramType, LayoutStyle}};
    use clap::Parser;

    use super::*;

    #[test]
    fn test_flags_override_config_settings() {
        let args =
            Args::try_parse_from(["arbor", "in.json", "-t", "horizontal", "-p", "earth"]).unwrap();
        let defaults = Settings::new(DiagramType::Fishbone, Palette::Blue, LayoutStyle::Diamond);

        let settings = settings(&defaults, &args);
        assert_eq!(settings.diagram_type(), DiagramType::Horizontal);
        assert_eq!(settings.color_palette(), Palette::Earth);
        assert_eq!(settings.layout_style(), LayoutStyle::Diamond);
    }

    #[test]
    fn test_default_output_names() {
        let args = Args::try_parse_from(["arbor", "in.json"]).unwrap();
        let horizontal =
            Settings::new(DiagramType::Horizontal, Palette::Default, LayoutStyle::Standard);

        assert_eq!(output_path(&args, OutputFormat::Md, &horizontal), "horizontal-mind-map.md");
        assert_eq!(output_path(&args, OutputFormat::Md, &Settings::default()), "mind-map.md");
        assert_eq!(output_path(&args, OutputFormat::Png, &Settings::default()), "mind-map.png");
    }
}
