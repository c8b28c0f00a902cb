use tracing::info;

use crate::config::PANEL_CLASS;
use crate::instruments::InstrumentBackend;
use crate::nodes::NodeFactory;
use crate::registry::PanelContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownOutcome {
    Removed(usize),
    /// No panel containers were in the view tree
    NothingToRemove,
}

/// Removes every panel container and forgets all indicator sets.
///
/// Finding nothing to remove is normal when no vehicle is tracked; it is
/// logged and reported, never treated as a failure.
pub fn remove_all_panels<N, B>(ctx: &mut PanelContext<N, B>) -> TeardownOutcome
where
    N: NodeFactory,
    B: InstrumentBackend,
{
    let panels = ctx.nodes.find_by_class(PANEL_CLASS);
    ctx.registry.clear();

    if panels.is_empty() {
        info!("no indicator panels to remove");
        return TeardownOutcome::NothingToRemove;
    }

    let removed = panels.len();
    for panel in panels {
        ctx.nodes.remove_node(panel);
    }
    info!(removed, "removed indicator panels");
    TeardownOutcome::Removed(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HIDE_CLASS, IndicatorConfig};
    use crate::fleet::Fleet;
    use crate::instruments::GaugeBackend;
    use crate::nodes::ViewTree;
    use crate::registry::EnsureOutcome;
    use crate::telemetry::{Vehicle, VehicleId};

    fn context() -> PanelContext<ViewTree, GaugeBackend> {
        PanelContext::new(
            ViewTree::new(),
            GaugeBackend::new(),
            1280.0,
            IndicatorConfig::default(),
        )
    }

    #[test]
    fn teardown_without_panels_is_a_no_op() {
        let mut ctx = context();
        assert_eq!(ctx.remove_all_panels(), TeardownOutcome::NothingToRemove);
        assert!(ctx.nodes.is_empty());
    }

    #[test]
    fn teardown_removes_every_panel() {
        let mut ctx = context();
        let fleet: Fleet = (1..=2).map(|i| Vehicle::new(VehicleId(i))).collect();
        ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(1));
        ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(2));

        assert_eq!(ctx.remove_all_panels(), TeardownOutcome::Removed(2));
        assert!(ctx.registry.is_empty());
        assert!(ctx.nodes.is_empty());
        assert_eq!(ctx.remove_all_panels(), TeardownOutcome::NothingToRemove);
    }

    #[test]
    fn panel_is_recreated_fresh_after_teardown() {
        let mut ctx = context();
        let mut fleet: Fleet = [Vehicle::new(VehicleId(1))].into_iter().collect();
        fleet.select_active_view(VehicleId(1));
        ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(1));
        assert!(ctx.registry.get(VehicleId(1)).unwrap().show);

        ctx.remove_all_panels();
        fleet.vehicle_mut(VehicleId(1)).unwrap().active_view = false;

        assert_eq!(
            ctx.ensure_indicators_for_vehicle(&fleet, VehicleId(1)),
            EnsureOutcome::Created
        );
        let set = ctx.registry.get(VehicleId(1)).unwrap();
        assert!(!set.show);
        assert!(ctx.nodes.node(set.container).unwrap().has_class(HIDE_CLASS));
        assert_eq!(ctx.nodes.text_of("battery_text_1"), Some("0"));
    }
}
