use std::io::Write;

use snooper::style::STYLE_NOT_FOUND;
use snooper::{
    render_runs, CatalogOptions, InspectOptions, Inspector, LoadError, ModuleManifest,
    OutputMode, ResourceKey, SnooperConfig, Theme, TypeCatalog,
};
use snooper_markup::{runs_to_string, Classification, MarkupDocument, StyledRun};

fn builtin() -> Inspector {
    Inspector::with_builtin(CatalogOptions::default()).unwrap()
}

fn display_names(inspector: &Inspector) -> Vec<&str> {
    inspector
        .descriptors()
        .iter()
        .map(|descriptor| descriptor.display_name.as_str())
        .collect()
}

#[test]
fn test_builtin_catalog_listing() {
    let inspector = builtin();
    assert_eq!(
        display_names(&inspector),
        vec![
            "Button",
            "CheckBox",
            "ContentControl",
            "GridSplitter",
            "Label",
            "MenuItem",
            "MenuItem.SeparatorStyleKey",
            "Popup",
            "ProgressBar",
            "Separator",
            "ToggleButton",
            "ToolBar",
            "ToolBar.ButtonStyleKey",
            "ToolBar.ToggleButtonStyleKey",
            "ToolBar.SeparatorStyleKey",
        ]
    );
}

#[test]
fn test_auxiliary_keys_belong_to_their_type() {
    let inspector = builtin();
    let separator = inspector.find("ToolBar.SeparatorStyleKey").unwrap();
    assert_eq!(separator.owner_type.as_str(), "ToolBar");
    assert_eq!(
        separator.resource_key,
        Some(ResourceKey::new("ToolBar.SeparatorStyleKey"))
    );
}

#[test]
fn test_button_margin_collapses_to_single_value() {
    let inspector = builtin();
    let button = inspector.find("Button").unwrap();
    let inspection = inspector.inspect(button, InspectOptions::default());
    assert!(inspection.success);

    let expected = [
        StyledRun::new(" Property", Classification::AttributeName),
        StyledRun::new("=", Classification::Bracket),
        StyledRun::new("\"", Classification::Quote),
        StyledRun::new("FrameworkElement.Margin", Classification::Text),
        StyledRun::new("\"", Classification::Quote),
        StyledRun::new(" Value", Classification::AttributeName),
        StyledRun::new("=", Classification::Bracket),
        StyledRun::new("\"", Classification::Quote),
        StyledRun::new("4", Classification::Text),
        StyledRun::new("\"", Classification::Quote),
    ];
    assert!(inspection
        .runs
        .windows(expected.len())
        .any(|window| window == expected));

    let text = runs_to_string(&inspection.runs);
    assert!(text.contains("Property=\"Control.Padding\" Value=\"2,1\" />"));
    assert!(text.contains("Value=\"{DynamicResource {x:Static SystemColors.ControlTextBrushKey}}\""));
    assert!(text.contains("Property=\"Control.HorizontalContentAlignment\" Value=\"Center\" />"));
    assert!(text.contains("<ControlTemplate TargetType=\"{x:Type Button}\">"));
}

#[test]
fn test_style_without_resource_is_not_found() {
    let inspector = builtin();
    let toggle = inspector.find("ToggleButton").unwrap();
    let inspection = inspector.inspect(toggle, InspectOptions::default());

    assert!(!inspection.success);
    assert_eq!(inspection.runs, vec![StyledRun::plain(STYLE_NOT_FOUND)]);
}

#[test]
fn test_unsupported_value_shows_failure_detail() {
    let inspector = builtin();
    let splitter = inspector.find("GridSplitter").unwrap();
    let serialized = inspector.serialize(splitter);

    assert!(!serialized.success);
    assert!(serialized
        .text
        .starts_with("[Exception thrown while serializing style]\n\n"));
    assert!(serialized.text.contains("GridSplitterPreviewAdorner"));
}

#[test]
fn test_every_successful_style_is_well_formed() {
    let inspector = builtin();
    for descriptor in inspector.descriptors() {
        let serialized = inspector.serialize(descriptor);
        if serialized.success {
            let doc = MarkupDocument::parse(&serialized.text).unwrap();
            assert_eq!(doc.root.tag_name, "Style", "{}", descriptor.display_name);
        }
    }
}

#[test]
fn test_empty_alternate_module_keeps_catalog() {
    let mut inspector = builtin();
    let before = inspector.descriptors().len();

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"name: Utilities\ntypes:\n  - name: StringHelpers\n")
        .unwrap();

    let err = inspector.load_path(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::NoCompatibleTypes { .. }));
    assert_eq!(inspector.descriptors().len(), before);
    assert_eq!(inspector.module().name, "PresentationFramework");
}

#[test]
fn test_non_module_file_is_rejected() {
    let mut inspector = builtin();
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let err = inspector.load_path(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Module(_)));
    assert!(inspector.find("Button").is_some());
}

#[test]
fn test_alternate_module_uses_framework_resources() {
    let mut inspector = builtin();
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(
        br#"{
            "name": "Controls",
            "types": [
                { "name": "FrameworkElement" },
                { "name": "SplitButton", "base": "FrameworkElement", "default_style_key": "Button" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(inspector.load_path(file.path()).unwrap(), 1);
    let split = inspector.find("SplitButton").unwrap();
    assert!(inspector.inspect(split, InspectOptions::default()).success);
}

#[test]
fn test_alternate_module_derives_from_framework_controls() {
    let mut inspector = builtin();
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(
        b"name: Controls\ntypes:\n  - name: FancyButton\n    base: Button\n    default_style_key: Button\n",
    )
    .unwrap();

    assert_eq!(inspector.load_path(file.path()).unwrap(), 1);
    assert_eq!(inspector.module().name, "Controls");
    let fancy = inspector.find("FancyButton").unwrap();
    let inspection = inspector.inspect(fancy, InspectOptions::default());
    assert!(inspection.success);
    assert!(runs_to_string(&inspection.runs).contains("<ControlTemplate TargetType=\"{x:Type Button}\">"));
}

#[test]
fn test_config_drives_the_pipeline() {
    let config =
        SnooperConfig::from_yaml_str("align_attributes: true\nsimplify: false\n", "test").unwrap();
    let inspector = Inspector::with_builtin(config.catalog_options()).unwrap();
    let initial = inspector.find(&config.initial_selection).unwrap();
    let text = runs_to_string(&inspector.inspect(initial, config.inspect_options()).runs);

    assert!(text.contains("<Setter.Value>"));
    // The namespace declarations are aligned under TargetType.
    assert!(text.contains("\n       xmlns="));
}

#[test]
fn test_scan_is_deterministic() {
    let module = ModuleManifest::builtin().unwrap();
    let catalog = TypeCatalog::default();
    assert_eq!(catalog.scan(&module), catalog.scan(&module));
}

#[test]
fn test_rendered_text_matches_runs() {
    let inspector = builtin();
    let label = inspector.find("Label").unwrap();
    let inspection = inspector.inspect(label, InspectOptions::default());
    let output = render_runs(&inspection.runs, &Theme::light(), OutputMode::Text).unwrap();
    assert_eq!(output, runs_to_string(&inspection.runs));
    assert!(output.contains("Value=\"5\""));
}

#[test]
fn test_descriptor_without_key_is_not_found() {
    let inspector = builtin();
    let descriptor = snooper::StyleDescriptor {
        display_name: "Adorner".to_string(),
        resource_key: None,
        owner_type: snooper::TypeName::new("Adorner"),
    };
    let inspection = inspector.inspect(&descriptor, InspectOptions::default());
    assert_eq!(inspection.runs, vec![StyledRun::plain(STYLE_NOT_FOUND)]);
}
