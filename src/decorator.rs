//! The owning façade over assets, geometry, canvases, renderer, and log.

use crate::adjacency::{Face, FaceAdjacencyModel};
use crate::assets::AssetSet;
use crate::canvas::TextureCanvasSet;
use crate::error::{CubestampError, CubestampResult};
use crate::event::{Command, EventTranslator, SurfaceHit};
use crate::log::{Placement, PlacementLog, SeedReport};
use crate::render::StampRenderer;

/// A decorated cube: six face canvases plus the placement log that defines
/// their contents.
///
/// Construction requires a fully loaded [`AssetSet`], so a decorator only
/// exists in the Ready state; there is no partially interactive phase. All
/// mutation goes through `&mut self`, which serializes add/undo with any
/// replay they trigger.
pub struct CubeDecorator {
    assets: AssetSet,
    renderer: StampRenderer,
    canvases: TextureCanvasSet,
    log: PlacementLog,
    seeded: bool,
    interacted: bool,
}

impl CubeDecorator {
    pub fn new(assets: AssetSet) -> CubestampResult<Self> {
        if assets.stamp_count() == 0 {
            return Err(CubestampError::validation(
                "at least one stamp image is required",
            ));
        }
        let canvases = TextureCanvasSet::new(&assets)?;
        Ok(Self {
            assets,
            renderer: StampRenderer::new(FaceAdjacencyModel::new()),
            canvases,
            log: PlacementLog::new(),
            seeded: false,
            interacted: false,
        })
    }

    /// Override the stamp footprint fraction before first use.
    pub fn with_stamp_scale(mut self, stamp_scale: f64) -> Self {
        self.renderer = self.renderer.with_stamp_scale(stamp_scale);
        self
    }

    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    pub fn canvases(&self) -> &TextureCanvasSet {
        &self.canvases
    }

    /// The full placement history in order (the canonical export).
    pub fn export(&self) -> &[Placement] {
        self.log.as_slice()
    }

    /// The history serialized as the flat array of 5-tuples.
    pub fn export_json(&self) -> CubestampResult<String> {
        self.log.to_json()
    }

    /// Per-face needs-redisplay flags, cleared by the read.
    pub fn take_dirty(&mut self) -> [bool; crate::FACE_COUNT] {
        self.canvases.take_dirty()
    }

    /// Append one placement and draw it incrementally (no rebuild).
    pub fn add(&mut self, placement: Placement) -> CubestampResult<()> {
        self.interacted = true;
        self.validate(&placement)?;
        self.log.push(placement);
        self.place_entry(placement)
    }

    /// Remove the last placement and rebuild from pristine bases.
    ///
    /// Returns `false` (and does nothing) on an empty log. The full replay is
    /// mandatory: compositing is order dependent and stamps may overlap, so a
    /// removed entry cannot be selectively erased.
    pub fn undo(&mut self) -> CubestampResult<bool> {
        self.interacted = true;
        if self.log.pop().is_none() {
            return Ok(false);
        }
        self.rebuild()?;
        Ok(true)
    }

    /// Empty the log and restore all six bases. No replay needed.
    pub fn clear(&mut self) {
        self.log.clear();
        self.canvases.reset();
        self.canvases.mark_all_dirty();
    }

    /// Replay an imported history. Callable exactly once, before any
    /// `add`/`undo`. Entries with an out-of-range `face` or `stamp` are
    /// skipped with a warning and dropped from the log; this is never fatal.
    #[tracing::instrument(skip(self, placements), fields(count = placements.len()))]
    pub fn seed(&mut self, placements: &[Placement]) -> CubestampResult<SeedReport> {
        if self.seeded {
            return Err(CubestampError::validation("seed may only be called once"));
        }
        if self.interacted {
            return Err(CubestampError::validation(
                "seed must run before any add or undo",
            ));
        }
        self.seeded = true;

        self.canvases.reset();
        let mut report = SeedReport::default();
        for (i, placement) in placements.iter().enumerate() {
            if self.validate(placement).is_err() {
                tracing::warn!(
                    index = i,
                    stamp = placement.stamp,
                    face = placement.face,
                    "skipping out-of-range placement during seed"
                );
                report.skipped.push(i);
                continue;
            }
            self.log.push(*placement);
            self.place_entry(*placement)?;
            report.applied += 1;
        }
        self.canvases.mark_all_dirty();
        Ok(report)
    }

    /// Translate a surface hit into a command and apply it synchronously.
    pub fn handle(
        &mut self,
        hit: SurfaceHit,
        translator: &mut EventTranslator,
    ) -> CubestampResult<Command> {
        let command = translator.translate(hit, self.assets.stamp_count());
        match command {
            Command::Add(placement) => self.add(placement)?,
            Command::Undo => {
                self.undo()?;
            }
        }
        Ok(command)
    }

    fn validate(&self, placement: &Placement) -> CubestampResult<()> {
        if Face::from_index(placement.face as usize).is_none() {
            return Err(CubestampError::validation(format!(
                "face index {} out of range",
                placement.face
            )));
        }
        if self.assets.stamp(placement.stamp as usize).is_none() {
            return Err(CubestampError::validation(format!(
                "stamp index {} out of range",
                placement.stamp
            )));
        }
        Ok(())
    }

    fn place_entry(&mut self, placement: Placement) -> CubestampResult<()> {
        let face = Face::from_index(placement.face as usize).ok_or_else(|| {
            CubestampError::validation(format!("face index {} out of range", placement.face))
        })?;
        let stamp = self.assets.stamp(placement.stamp as usize).ok_or_else(|| {
            CubestampError::validation(format!("stamp index {} out of range", placement.stamp))
        })?;
        self.renderer.place(
            &mut self.canvases,
            &stamp.image,
            face,
            placement.u,
            placement.v,
            placement.angle,
        );
        Ok(())
    }

    /// Reset to pristine bases, replay the whole log in order, then flag
    /// every face for re-upload (every buffer was recopied).
    fn rebuild(&mut self) -> CubestampResult<()> {
        self.canvases.reset();
        for i in 0..self.log.len() {
            let placement = self.log.as_slice()[i];
            self.place_entry(placement)?;
        }
        self.canvases.mark_all_dirty();
        Ok(())
    }
}
