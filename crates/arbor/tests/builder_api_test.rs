//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the public pipeline from tree input to exported output.

use float_cmp::assert_approx_eq;

use arbor::{
    ArborError, DiagramBuilder,
    config::AppConfig,
    geometry::Point,
    palette::Palette,
    settings::{DiagramType, LayoutStyle, Settings},
    tree::TreeError,
};

const FOUR_NODES: &str = r#"{
    "id": "root",
    "name": "Topic",
    "children": [
        {"id": 1, "name": "A", "children": [{"id": "1-1", "name": "A1"}]},
        {"id": 2, "name": "B"}
    ]
}"#;

fn settings(diagram_type: DiagramType) -> Settings {
    Settings::new(diagram_type, Palette::Default, LayoutStyle::Standard)
}

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
    let _builder = DiagramBuilder::new(AppConfig::default());
}

#[test]
fn test_four_node_logical_structure() {
    let builder = DiagramBuilder::default();
    let tree = builder.parse_json(FOUR_NODES).expect("Failed to parse tree");

    let layout = builder.layout(&tree, &settings(DiagramType::LogicalStructure));
    assert_eq!(layout.nodes().len(), 4);
    assert_eq!(layout.edges().len(), 3);
    assert_eq!(layout.origin(), Point::new(150.0, 50.0));

    let a1 = layout
        .nodes()
        .iter()
        .find(|node| node.name() == "A1")
        .expect("A1 is positioned");
    assert_eq!(a1.depth(), 2);
    assert_approx_eq!(f32, a1.x(), 500.0);
    assert_approx_eq!(f32, a1.y(), 100.0, epsilon = 0.001);

    for edge in layout.edges() {
        assert!(layout.node(edge.from()).is_some());
        assert!(layout.node(edge.to()).is_some());
    }
}

#[test]
fn test_every_diagram_type_renders() {
    let builder = DiagramBuilder::default();
    let tree = builder.parse_json(FOUR_NODES).expect("Failed to parse tree");

    for diagram_type in [
        DiagramType::MindMap,
        DiagramType::LogicalStructure,
        DiagramType::LogicalStructureLeft,
        DiagramType::Fishbone,
        DiagramType::Horizontal,
        DiagramType::Markdown,
    ] {
        let scene = builder
            .render(&tree, &settings(diagram_type))
            .expect("Failed to render");
        assert!(!scene.is_placeholder());
        assert_eq!(scene.node_bounds().len(), 4, "{diagram_type:?}");

        let svg = scene.to_svg_string();
        assert!(svg.contains("<svg"), "Output should contain SVG tag");
        assert!(svg.contains("</svg>"), "Output should be complete SVG");
        assert!(svg.contains("A1"));
    }
}

#[test]
fn test_invalid_json_is_input_error() {
    let builder = DiagramBuilder::default();

    let err = builder.parse_json("{not json").unwrap_err();
    assert!(matches!(err, ArborError::Input(TreeError::Json(_))));

    let err = builder
        .parse_json(
            r#"{"id": "root", "name": "Topic", "children": [{"id": "root", "name": "Again"}]}"#,
        )
        .unwrap_err();
    assert!(matches!(err, ArborError::Input(TreeError::DuplicateId { .. })));
}

#[test]
fn test_placeholder_for_missing_tree() {
    let builder = DiagramBuilder::default();
    let tree = builder.parse_json("[]").ok();

    let scene = builder
        .render_or_placeholder(tree.as_ref(), &Settings::default())
        .expect("Failed to render placeholder");
    assert!(scene.is_placeholder());
    assert!(scene.node_bounds().is_empty());
    assert!(scene.to_svg_string().contains(arbor::render::PLACEHOLDER_MESSAGE));

    let viewport = builder.fit(&scene);
    assert_approx_eq!(f32, viewport.zoom(), 1.0);
}

#[test]
fn test_outline_round_trip() {
    let builder = DiagramBuilder::default();
    let tree = builder.parse_json(FOUR_NODES).expect("Failed to parse tree");

    let text = builder.to_outline(&tree);
    assert_eq!(text, "# Topic\n\n## A\n\n### A1\n\n## B\n\n");

    let parsed = builder.parse_outline(&text).expect("Failed to parse outline");
    let names: Vec<&str> = parsed.iter().map(|visit| visit.node.name()).collect();
    assert_eq!(names, ["Topic", "A", "A1", "B"]);
}

#[test]
fn test_outline_errors_keep_source() {
    let builder = DiagramBuilder::default();
    let source = "intro text\n# One\n# Two\n";

    match builder.parse_outline(source).unwrap_err() {
        ArborError::Outline { err, src } => {
            assert_eq!(src, source);
            assert!(!err.diagnostics().is_empty());
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn test_fit_stays_within_bound() {
    let builder = DiagramBuilder::default();
    let tree = builder.parse_json(FOUR_NODES).expect("Failed to parse tree");
    let scene = builder
        .render(&tree, &settings(DiagramType::MindMap))
        .expect("Failed to render");

    let viewport = builder.fit(&scene);
    assert!(viewport.zoom() > 0.0);
    assert!(viewport.zoom() <= 0.9 + f32::EPSILON);
}

#[test]
fn test_render_png() {
    let builder = DiagramBuilder::default();
    let tree = builder.parse_json(FOUR_NODES).expect("Failed to parse tree");

    let png = builder
        .render_png(&tree, &settings(DiagramType::Fishbone))
        .expect("Failed to render PNG");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_invalid_background_is_config_error() {
    let config: AppConfig =
        serde_json::from_str(r#"{"style": {"background_color": "not-a-color"}}"#).unwrap();
    let builder = DiagramBuilder::new(config);
    let tree = builder.parse_json(FOUR_NODES).expect("Failed to parse tree");

    let err = builder.render_svg(&tree, &Settings::default()).unwrap_err();
    assert!(matches!(err, ArborError::Config(_)));
}
