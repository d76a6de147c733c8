use std::collections::HashSet;

use log::error;

use crate::entities::{Layout, allowed_rect};
use crate::util::{EngineConfig, FPA};

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

pub fn placement_ids_unique(layout: &Layout) -> bool {
    let mut seen = HashSet::new();
    let unique = layout.contours().iter().all(|c| seen.insert(c.id));
    let below_counter = layout
        .contours()
        .iter()
        .all(|c| c.id < layout.contours().next_id());
    unique && below_counter
}

pub fn rotations_allowed(layout: &Layout, cfg: &EngineConfig) -> bool {
    layout
        .contours()
        .iter()
        .all(|c| cfg.allowed_rotations.contains(&c.rotation))
}

/// Every label is inside the padded box of its owner, or aligned to its top-left edges when it is too large to fit
pub fn labels_within_owners(layout: &Layout, cfg: &EngineConfig) -> bool {
    let scale = layout.scale();
    for (_, label) in layout.labels().iter() {
        let Ok(allowed) = allowed_rect(label.placement_id, layout.contours(), scale, cfg) else {
            error!("label refers to unknown placement {}", label.placement_id);
            return false;
        };
        let bbox = label.bbox(&cfg.labels, scale);
        let axis_ok = |lo: f32, hi: f32, l_lo: f32, l_hi: f32| match l_hi - l_lo > hi - lo {
            true => FPA(l_lo) == FPA(lo),
            false => FPA(l_lo) >= FPA(lo) && FPA(l_hi) <= FPA(hi),
        };
        let inside = axis_ok(allowed.x_min, allowed.x_max, bbox.x_min, bbox.x_max)
            && axis_ok(allowed.y_min, allowed.y_max, bbox.y_min, bbox.y_max);
        if !inside {
            error!(
                "label of {} escaped its owner: {bbox:?} not in {allowed:?}",
                label.placement_id
            );
            return false;
        }
    }
    true
}
