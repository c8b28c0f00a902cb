//! Flight-instrument panels for a multi-vehicle ground station.
//!
//! Each tracked vehicle lazily gets one panel of analog instruments plus
//! digital readouts. At most one panel is shown at a time, following the
//! fleet's active view. The core operations are plain functions over a
//! [`PanelContext`]; [`plugin`] wires them into a bevy app and [`ui`]
//! paints the shown panel with egui.

pub mod config;
pub mod error;
pub mod fleet;
pub mod indicators;
pub mod instruments;
pub mod nodes;
pub mod plugin;
pub mod registry;
pub mod resize;
pub mod sim;
pub mod teardown;
pub mod telemetry;
pub mod ui;
pub mod update;
pub mod visibility;

pub use config::{IndicatorConfig, TieBreak};
pub use error::{ConfigError, PanelError};
pub use fleet::{Fleet, FleetManager};
pub use plugin::{
    IndicatorPanels, IndicatorPanelsPlugin, RemoveAllPanels, SelectVehicle, SelectionSource,
};
pub use registry::{EnsureOutcome, PanelContext, PanelRegistry};
pub use teardown::TeardownOutcome;
pub use telemetry::{Vehicle, VehicleId, VehicleTelemetry};
pub use ui::IndicatorUiPlugin;
pub use update::PushOutcome;
pub use visibility::RefreshOutcome;
