use crate::overlay::{build_overlay, OverlayConfig, OverlaySnapshot, SeasonOverlay};
use log::debug;

/// Caches the last built overlay and rebuilds only when the snapshot or the
/// config changes.
///
/// Inputs are compared with `==`, so a snapshot holding a NaN never equals
/// itself and is rebuilt on every call.
#[derive(Debug, Default)]
pub struct OverlayMemo {
    last: Option<CachedOverlay>,
    builds: usize,
}

#[derive(Debug)]
struct CachedOverlay {
    snapshot: OverlaySnapshot,
    config: OverlayConfig,
    overlay: SeasonOverlay,
}

impl OverlayMemo {
    pub fn new() -> Self {
        OverlayMemo::default()
    }

    pub fn get_or_build(
        &mut self,
        snapshot: &OverlaySnapshot,
        config: &OverlayConfig,
    ) -> &SeasonOverlay {
        let fresh = matches!(
            &self.last,
            Some(cached) if cached.snapshot == *snapshot && cached.config == *config
        );
        if !fresh {
            debug!("memo: rebuilding overlay");
            self.last = None;
            self.builds += 1;
        }
        &self
            .last
            .get_or_insert_with(|| CachedOverlay {
                snapshot: snapshot.clone(),
                config: config.clone(),
                overlay: build_overlay(snapshot, config),
            })
            .overlay
    }

    /// Drop the cached overlay.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// How many times an overlay was actually built.
    pub fn builds(&self) -> usize {
        self.builds
    }
}
