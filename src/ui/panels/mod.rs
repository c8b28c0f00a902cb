pub mod fleet;
pub mod indicators;
pub mod menu;

pub use fleet::render_fleet_list;
pub use indicators::render_indicator_panel;
pub use menu::render_vehicle_menu;
