use tracing::debug;

use crate::indicators::AnalogWidgets;
use crate::instruments::InstrumentBackend;
use crate::nodes::NodeFactory;
use crate::registry::PanelContext;

/// Analog widget edge length for a viewport width
pub fn instrument_size(viewport_width: f32, divisor: f32) -> u32 {
    if divisor <= 0.0 || !viewport_width.is_finite() {
        return 0;
    }
    (viewport_width / divisor).floor().max(0.0) as u32
}

/// Rebuilds every panel's analog widgets at the size for `viewport_width`.
///
/// Widgets are reconstructed, not resized in place, and every registered
/// panel is rebuilt on every call. Digital readouts are left untouched.
/// Returns the number of panels rebuilt.
pub fn on_viewport_resize<N, B>(ctx: &mut PanelContext<N, B>, viewport_width: f32) -> usize
where
    N: NodeFactory,
    B: InstrumentBackend,
{
    ctx.viewport_width = viewport_width;
    let size = ctx.instrument_size();

    let mut rebuilt = 0;
    for set in ctx.registry.iter_mut() {
        set.analog = AnalogWidgets::build(&mut ctx.backend, set.id, size, &ctx.config);
        rebuilt += 1;
    }

    debug!(viewport_width, size, rebuilt, "rebuilt analog indicators");
    rebuilt
}
