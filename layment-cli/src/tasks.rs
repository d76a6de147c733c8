use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use layment_rs::collision_detection::{LayoutIssues, TinySkiaRasterizer};
use layment_rs::entities::Catalog;
use layment_rs::io::ext_repr::{ExtExportDocument, ExtManifest, ExtWorkspace};
use layment_rs::io::import;
use layment_rs::io::svg::{SvgDrawOptions, layout_to_svg};
use layment_rs::session::EditingSession;
use layment_rs::util::EngineConfig;

use crate::io;

pub type Session = EditingSession<TinySkiaRasterizer>;

/// Reads the engine configuration, falling back to the defaults if no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        None => {
            warn!("[MAIN] no config file provided, use --config-file to provide a custom config");
            warn!(
                "[MAIN] falling back default config:\n{}",
                serde_json::to_string(&EngineConfig::default())?
            );
            Ok(EngineConfig::default())
        }
        Some(path) => {
            let cfg: EngineConfig = io::read_json(path).context("incorrect config file format")?;
            cfg.validate().context("invalid config values")?;
            Ok(cfg)
        }
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let manifest: ExtManifest = io::read_json(path).context("incorrect manifest format")?;
    Ok(import::import_manifest(&manifest))
}

/// Opens a session on the saved workspace at `path`.
pub fn open_session(catalog: Catalog, cfg: EngineConfig, path: &Path) -> Result<Session> {
    let doc: ExtWorkspace = io::read_json(path).context("incorrect workspace format")?;
    let mut session = Session::with_default_rasterizer(catalog, cfg);
    let summary = session.restore(&doc)?;
    if !summary.is_complete() {
        warn!("[MAIN] workspace restored partially: {summary:?}");
    }
    Ok(session)
}

/// Result of validating a workspace, as printed by the `validate` task.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ValidationOutput {
    pub valid: bool,
    pub issues: LayoutIssues,
    pub message: String,
}

pub fn validate(session: &mut Session, svg_path: Option<&Path>) -> Result<ValidationOutput> {
    let issues = session.check()?.issues();
    if let Some(path) = svg_path {
        let doc = layout_to_svg(
            session.layout(),
            session.config(),
            SvgDrawOptions::default(),
            "validation",
        );
        io::write_svg(&doc, path)?;
    }
    Ok(ValidationOutput {
        valid: issues.is_empty(),
        message: issues.message(),
        issues,
    })
}

/// Exports the order document of a valid workspace.
pub fn export(session: &mut Session, output: &Path, svg_path: Option<&Path>) -> Result<ExtExportDocument> {
    // export validates, so the preview is drawn afterwards with fresh highlights
    let exported = session.export();
    if let Some(path) = svg_path {
        let doc = layout_to_svg(
            session.layout(),
            session.config(),
            SvgDrawOptions::default(),
            "order preview",
        );
        io::write_svg(&doc, path)?;
    }
    let document = exported.context("cannot export")?;
    io::write_json(&document, output)?;
    info!(
        "[MAIN] order of {}x{} mm exported, total {}",
        document.order_meta.width, document.order_meta.height, document.order_meta.price_preview.total
    );
    Ok(document)
}

/// Saves the session's layout, stamped with the current time.
pub fn normalize(session: &mut Session, output: &Path) -> Result<ExtWorkspace> {
    let mut doc = session.save();
    doc.saved_at = Some(jiff::Timestamp::now().to_string());
    io::write_json(&doc, output)?;
    Ok(doc)
}
