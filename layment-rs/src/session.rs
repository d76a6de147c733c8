use std::time::Instant;

use log::{debug, info, warn};

use crate::LaymentError;
use crate::collision_detection::{Rasterizer, ValidationReport};
#[cfg(feature = "raster")]
use crate::collision_detection::TinySkiaRasterizer;
use crate::entities::{Catalog, Command, CommandOutcome, Layment, Layout};
use crate::geometry::WorkspaceScale;
use crate::io::ext_repr::{ExtExportDocument, ExtWorkspace};
use crate::io::import::{self, RestoreSummary};
use crate::util::{EngineConfig, PersistDebouncer, clamp};

/// An interactive editing session.
///
/// Owns the [`Layout`] being edited, the [`Catalog`] it draws from and the configuration.
/// Every edit goes through [`EditingSession::submit`]; edits that change the persisted state
/// schedule a save that is handed out by [`EditingSession::poll_autosave`] once the
/// user has been idle for the configured delay.
pub struct EditingSession<R: Rasterizer> {
    layout: Layout,
    catalog: Catalog,
    cfg: EngineConfig,
    rasterizer: R,
    debouncer: PersistDebouncer,
}

impl<R: Rasterizer> EditingSession<R> {
    pub fn new(catalog: Catalog, cfg: EngineConfig, rasterizer: R) -> Self {
        let layment = Layment::new(
            cfg.layment.default_width,
            cfg.layment.default_height,
            &cfg.layment,
        );
        let mut layout = Layout::new(layment);
        if let Err(e) = layout.set_scale(cfg.scale.default, &cfg) {
            warn!("[SESSION] default scale ignored: {e}");
        }
        let debouncer = PersistDebouncer::new(cfg.autosave_delay());
        Self {
            layout,
            catalog,
            cfg,
            rasterizer,
            debouncer,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Applies `command`, issued at `now`. Edits of the persisted state schedule a save.
    pub fn submit(
        &mut self,
        command: Command,
        now: Instant,
    ) -> Result<CommandOutcome, LaymentError> {
        let outcome = self.layout.apply(command, &self.catalog, &self.cfg)?;
        if outcome.persist {
            self.debouncer.notify(now);
        }
        Ok(outcome)
    }

    /// True if an edit has not been saved yet
    pub fn has_unsaved_changes(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Returns the workspace document to persist, once the autosave delay has elapsed
    /// since the last edit. Yields at most one document per burst of edits.
    pub fn poll_autosave(&mut self, now: Instant) -> Option<ExtWorkspace> {
        self.debouncer.poll(now).then(|| {
            debug!("[SESSION] autosave");
            self.layout.save()
        })
    }

    /// Saves right away, dropping any pending autosave.
    pub fn save(&mut self) -> ExtWorkspace {
        self.debouncer.cancel();
        self.layout.save()
    }

    /// Replaces the layout by a previously saved workspace.
    pub fn restore(&mut self, doc: &ExtWorkspace) -> Result<RestoreSummary, LaymentError> {
        let summary = import::restore(&mut self.layout, doc, &self.catalog, &self.cfg)?;
        self.debouncer.cancel();
        Ok(summary)
    }

    /// Zooms by `steps` regular (or coarse) increments, staying within the configured bounds.
    pub fn zoom(&mut self, steps: i32, coarse: bool) -> Result<WorkspaceScale, LaymentError> {
        let bounds = &self.cfg.scale;
        let increment = match coarse {
            true => bounds.coarse_step,
            false => bounds.step,
        };
        let target = self.layout.scale().value() + steps as f32 * increment;
        // avoids drift from repeated float increments
        let target = clamp((target * 100.0).round() / 100.0, bounds.min, bounds.max);
        self.layout.set_scale(target, &self.cfg)?;
        Ok(self.layout.scale())
    }

    /// Validates the layout at scale 1.0 and highlights the offending entities.
    pub fn check(&mut self) -> Result<ValidationReport, LaymentError> {
        let report = self.layout.check(&self.rasterizer, &self.cfg)?;
        info!("[SESSION] check: {}", report.issues().message());
        Ok(report)
    }

    /// Validates the layout and builds the order document.
    pub fn export(&mut self) -> Result<ExtExportDocument, LaymentError> {
        self.layout.export(&self.rasterizer, &self.cfg)
    }
}

#[cfg(feature = "raster")]
impl EditingSession<TinySkiaRasterizer> {
    /// Creates a session that validates with the `tiny-skia` rasterizer.
    pub fn with_default_rasterizer(catalog: Catalog, cfg: EngineConfig) -> Self {
        let rasterizer = TinySkiaRasterizer::new(&cfg.raster);
        Self::new(catalog, cfg, rasterizer)
    }
}
