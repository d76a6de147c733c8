use std::path::{Path, PathBuf};

use layment_cli::io::read_json;
use layment_cli::tasks;
use layment_rs::io::ext_repr::{ExtExportDocument, ExtWorkspace, LaymentType};
use layment_rs::util::EngineConfig;
use test_case::test_case;

fn asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets").join(name)
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("layment-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn session(workspace: &str) -> tasks::Session {
    let cfg = tasks::load_config(Some(asset("config.json").as_path())).unwrap();
    let catalog = tasks::load_catalog(&asset("manifest.json")).unwrap();
    tasks::open_session(catalog, cfg, &asset(workspace)).unwrap()
}

#[test]
fn config_file_overrides_defaults_partially() {
    let cfg = tasks::load_config(Some(asset("config.json").as_path())).unwrap();
    let default = EngineConfig::default();
    assert_eq!(cfg.clearance, 6.0);
    assert_eq!(cfg.pricing.rrc_multiplier, default.pricing.rrc_multiplier);
    assert_eq!(cfg.layment, default.layment);
    assert_eq!(tasks::load_config(None).unwrap(), default);
}

#[test]
fn missing_files_are_reported() {
    assert!(tasks::load_catalog(&asset("no_such_manifest.json")).is_err());
    assert!(tasks::load_config(Some(asset("no_such_config.json").as_path())).is_err());
}

#[test_case("rect_limits.json", r#"{"primitives": {"rect_max_width": 5.0}}"#; "inverted rect limits")]
#[test_case("scale.json", r#"{"scale": {"min": 12.0}}"#; "scale min above max")]
#[test_case("tool.json", r#"{"pricing": {"tool_diameter_mm": 0}}"#; "zero tool diameter")]
fn inconsistent_config_is_rejected(file: &str, json: &str) {
    let path = scratch(file);
    std::fs::write(&path, json).unwrap();
    assert!(tasks::load_config(Some(path.as_path())).is_err());
}

#[test_case("workspace_valid.json", true, 0, 0; "valid")]
#[test_case("workspace_collision.json", false, 2, 1; "collision")]
fn validate_fixture(workspace: &str, valid: bool, collisions: usize, oob_primitives: usize) {
    let mut session = session(workspace);
    let output = tasks::validate(&mut session, None).unwrap();
    assert_eq!(output.valid, valid);
    assert_eq!(output.issues.collision_contours, collisions);
    assert_eq!(output.issues.out_of_bounds_primitives, oob_primitives);
    assert_eq!(output.message, output.issues.message());
}

#[test]
fn export_writes_order_document() {
    let mut session = session("workspace_valid.json");
    let output = scratch("order.json");
    let svg = scratch("order.svg");
    let document = tasks::export(&mut session, &output, Some(svg.as_path())).unwrap();

    let written: ExtExportDocument = read_json(&output).unwrap();
    assert_eq!(written, document);
    assert_eq!(written.order_meta.width, 565.0);
    assert_eq!(written.order_meta.layment_type, LaymentType::WithTools);
    assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
}

#[test]
fn export_refuses_colliding_layout() {
    let mut session = session("workspace_collision.json");
    let output = scratch("refused.json");
    let svg = scratch("refused.svg");
    let _ = std::fs::remove_file(&output);

    assert!(tasks::export(&mut session, &output, Some(svg.as_path())).is_err());
    assert!(!output.exists());
    // the preview showing the offenders is still written
    assert!(svg.exists());
}

#[test]
fn normalize_stamps_the_save_time() {
    let mut session = session("workspace_valid.json");
    let output = scratch("normalized.json");
    let doc = tasks::normalize(&mut session, &output).unwrap();
    let saved_at = doc.saved_at.clone().unwrap();
    assert!(saved_at.parse::<jiff::Timestamp>().is_ok());

    let written: ExtWorkspace = read_json(&output).unwrap();
    assert_eq!(written, doc);
    let original: ExtWorkspace = read_json(&asset("workspace_valid.json")).unwrap();
    assert_eq!(written.contours, original.contours);
    assert_eq!(written.labels, original.labels);
}
