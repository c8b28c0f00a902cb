//! Single-active-panel visibility policy.
//!
//! Only this module flips panel visibility. Data pushes that find their panel
//! hidden ask for a refresh instead of showing the panel themselves.

use tracing::{debug, warn};

use crate::config::{HIDE_CLASS, PANEL_CLASS, SHOW_CLASS, TieBreak};
use crate::fleet::FleetManager;
use crate::indicators::panel_id;
use crate::instruments::InstrumentBackend;
use crate::nodes::NodeFactory;
use crate::registry::PanelContext;
use crate::telemetry::VehicleId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RefreshOutcome {
    /// Vehicle whose panel is now shown
    pub shown: Option<VehicleId>,
    /// Every vehicle with an active view and a panel, in fleet order
    pub contenders: Vec<VehicleId>,
    /// A warning was logged for this contender set; repeats are not re-warned
    pub warned: bool,
}

impl RefreshOutcome {
    /// More than one vehicle claimed the active view
    pub fn contested(&self) -> bool {
        self.contenders.len() > 1
    }
}

/// Hides every panel, then shows the one belonging to the active vehicle.
///
/// When several vehicles claim the active view at once the configured
/// `TieBreak` picks the winner; the others stay hidden so at most one panel
/// is ever shown.
pub fn refresh<N, B, F>(ctx: &mut PanelContext<N, B>, fleet: &F) -> RefreshOutcome
where
    N: NodeFactory,
    B: InstrumentBackend,
    F: FleetManager + ?Sized,
{
    for panel in ctx.nodes.find_by_class(PANEL_CLASS) {
        // Handles come straight from the tree, so a stale one means it is already gone
        let _ = ctx.nodes.replace_class(panel, SHOW_CLASS, HIDE_CLASS);
    }
    for set in ctx.registry.iter_mut() {
        set.show = false;
    }

    let mut contenders = Vec::new();
    for vehicle in fleet.vehicle_list() {
        if !vehicle.active_view {
            continue;
        }
        if ctx.registry.contains(vehicle.id) {
            contenders.push(vehicle.id);
        } else {
            debug!(vehicle = %vehicle.id, "active vehicle has no indicator panel yet");
        }
    }

    let shown = match ctx.config.tie_break {
        TieBreak::LowestId => contenders.iter().min().copied(),
        TieBreak::LastInOrder => contenders.last().copied(),
    };

    // A contested view persists across ticks; only a new contender set is warned about
    let mut warned = false;
    if contenders.len() > 1 {
        if ctx.reported_contenders != contenders {
            warn!(
                contenders = ?contenders,
                shown = ?shown,
                policy = ?ctx.config.tie_break,
                "several vehicles claim the active view"
            );
            ctx.reported_contenders = contenders.clone();
            warned = true;
        } else {
            debug!(contenders = ?contenders, shown = ?shown, "active view still contested");
        }
    } else {
        ctx.reported_contenders.clear();
    }

    if let Some(id) = shown {
        if let Some(set) = ctx.registry.get_mut(id) {
            set.show = true;
        }
        match ctx.nodes.find_by_id(&panel_id(id)) {
            Some(panel) => {
                let _ = ctx.nodes.replace_class(panel, HIDE_CLASS, SHOW_CLASS);
            }
            None => debug!(vehicle = %id, "panel container not in view tree"),
        }
    }

    debug!(shown = ?shown, "indicator visibility refreshed");
    RefreshOutcome {
        shown,
        contenders,
        warned,
    }
}
