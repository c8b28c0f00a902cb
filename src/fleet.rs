use bevy::prelude::*;
use chrono::Local;

use crate::telemetry::{Vehicle, VehicleId, VehicleTelemetry};

/// What the panel layer needs from whoever owns the vehicles
pub trait FleetManager {
    fn vehicle_by_id(&self, id: VehicleId) -> Option<&Vehicle>;

    /// Vehicles in fleet order. Order decides `TieBreak::LastInOrder`.
    fn vehicle_list(&self) -> &[Vehicle];
}

/// In-process fleet manager backing the demo app and the tests
#[derive(Resource, Default, Debug, Clone)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vehicle, replacing any vehicle with the same id in place
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        match self.vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => *existing = vehicle,
            None => self.vehicles.push(vehicle),
        }
    }

    /// Drops the vehicle. Its panel, if any, stays behind until teardown.
    pub fn remove_vehicle(&mut self, id: VehicleId) -> Option<Vehicle> {
        let index = self.vehicles.iter().position(|v| v.id == id)?;
        Some(self.vehicles.remove(index))
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    pub fn vehicles_mut(&mut self) -> impl Iterator<Item = &mut Vehicle> {
        self.vehicles.iter_mut()
    }

    pub fn update_telemetry(&mut self, id: VehicleId, telemetry: VehicleTelemetry) -> bool {
        let Some(vehicle) = self.vehicle_mut(id) else {
            return false;
        };
        vehicle.telemetry = telemetry;
        vehicle.last_update = Local::now();
        true
    }

    /// Makes `id` the only vehicle with an active view.
    /// Returns false, leaving every flag untouched, if `id` is unknown.
    pub fn select_active_view(&mut self, id: VehicleId) -> bool {
        if self.vehicle_by_id(id).is_none() {
            return false;
        }
        for vehicle in &mut self.vehicles {
            vehicle.active_view = vehicle.id == id;
        }
        true
    }

    pub fn active_vehicle(&self) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.active_view)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl FleetManager for Fleet {
    fn vehicle_by_id(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn vehicle_list(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

impl FromIterator<Vehicle> for Fleet {
    fn from_iter<I: IntoIterator<Item = Vehicle>>(iter: I) -> Self {
        let mut fleet = Fleet::new();
        for vehicle in iter {
            fleet.add_vehicle(vehicle);
        }
        fleet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_active_view_is_exclusive() {
        let mut fleet: Fleet = (1..=3)
            .map(|i| Vehicle::new(VehicleId(i)).with_active_view(true))
            .collect();

        assert!(fleet.select_active_view(VehicleId(2)));
        let active: Vec<_> = fleet
            .vehicle_list()
            .iter()
            .filter(|v| v.active_view)
            .map(|v| v.id)
            .collect();
        assert_eq!(active, vec![VehicleId(2)]);
    }

    #[test]
    fn unknown_selection_changes_nothing() {
        let mut fleet: Fleet = [Vehicle::new(VehicleId(1)).with_active_view(true)]
            .into_iter()
            .collect();
        assert!(!fleet.select_active_view(VehicleId(9)));
        assert_eq!(fleet.active_vehicle().map(|v| v.id), Some(VehicleId(1)));
    }

    #[test]
    fn add_vehicle_keeps_order_and_replaces_duplicates() {
        let mut fleet = Fleet::new();
        fleet.add_vehicle(Vehicle::new(VehicleId(5)));
        fleet.add_vehicle(Vehicle::new(VehicleId(2)));
        fleet.add_vehicle(Vehicle::new(VehicleId(5)).with_active_view(true));

        let ids: Vec<_> = fleet.vehicle_list().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![VehicleId(5), VehicleId(2)]);
        assert!(fleet.vehicle_by_id(VehicleId(5)).unwrap().active_view);
    }
}
