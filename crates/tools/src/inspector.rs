use serde::Serialize;
use tinytown_scene::{CameraMode, SceneState};
use tinytown_traffic::{Heading, Vehicle};

/// Scene inspector for developer tooling.
///
/// Read-only queries against the scene for the CLI and the desktop overlay.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &SceneState) -> SceneSummary {
        let layout = scene.layout();
        let buildings = layout.iter().filter(|(_, c)| c.is_building()).count();
        let vehicles = scene.traffic().vehicles();
        SceneSummary {
            frame: scene.frames(),
            seed: scene.config().seed,
            fleet_size: vehicles.len(),
            headings: HeadingCounts::tally(vehicles),
            buildings,
            grass: layout.len() - buildings,
            camera: scene.mode(),
            lead_position: scene.traffic().lead().map(|v| v.position().to_array()),
        }
    }

    /// Details of the vehicle at fleet index `index`.
    pub fn inspect_vehicle(scene: &SceneState, index: usize) -> Option<VehicleInfo> {
        scene
            .traffic()
            .vehicles()
            .get(index)
            .map(|v| VehicleInfo::new(index, v))
    }

    /// Every vehicle in fleet order.
    pub fn list_vehicles(scene: &SceneState) -> Vec<VehicleInfo> {
        scene
            .traffic()
            .vehicles()
            .iter()
            .enumerate()
            .map(|(i, v)| VehicleInfo::new(i, v))
            .collect()
    }
}

/// How many vehicles hold each heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingCounts {
    pub right: usize,
    pub left: usize,
    pub up: usize,
    pub down: usize,
    pub stop: usize,
}

impl HeadingCounts {
    pub fn tally(vehicles: &[Vehicle]) -> Self {
        let mut counts = Self::default();
        for v in vehicles {
            match v.heading() {
                Heading::Right => counts.right += 1,
                Heading::Left => counts.left += 1,
                Heading::Up => counts.up += 1,
                Heading::Down => counts.down += 1,
                Heading::Stop => counts.stop += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.right + self.left + self.up + self.down + self.stop
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub seed: u64,
    pub fleet_size: usize,
    pub headings: HeadingCounts,
    pub buildings: usize,
    pub grass: usize,
    pub camera: CameraMode,
    /// Block-plane position of the followed vehicle.
    pub lead_position: Option<[f32; 2]>,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} seed={} vehicles={} (R{} L{} U{} D{} S{}) buildings={} grass={} camera={:?}",
            self.frame,
            self.seed,
            self.fleet_size,
            self.headings.right,
            self.headings.left,
            self.headings.up,
            self.headings.down,
            self.headings.stop,
            self.buildings,
            self.grass,
            self.camera,
        )?;
        if let Some([x, y]) = self.lead_position {
            write!(f, " lead=({x:.2}, {y:.2})")?;
        }
        Ok(())
    }
}

/// Detailed info about a single vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleInfo {
    pub index: usize,
    pub position: [f32; 2],
    pub heading: Heading,
    pub speed: f32,
    pub ticks: u32,
    pub color: [f32; 3],
}

impl VehicleInfo {
    fn new(index: usize, v: &Vehicle) -> Self {
        Self {
            index,
            position: v.position().to_array(),
            heading: v.heading(),
            speed: v.speed(),
            ticks: v.ticks(),
            color: v.color().to_array(),
        }
    }
}

impl std::fmt::Display for VehicleInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle [{}] pos=({:.2}, {:.2}) heading={:?} speed={:.3} ticks={}",
            self.index, self.position[0], self.position[1], self.heading, self.speed, self.ticks,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinytown_common::TownConfig;
    use tinytown_input::Action;

    fn scene() -> SceneState {
        SceneState::new(TownConfig::default())
    }

    #[test]
    fn summary_fresh_scene() {
        let s = scene();
        let summary = SceneInspector::summary(&s);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.fleet_size, 40);
        assert_eq!(summary.headings.up, 40);
        assert_eq!(summary.buildings + summary.grass, 100);
        assert_eq!(summary.camera, CameraMode::Free);
        assert!(summary.lead_position.is_some());
    }

    #[test]
    fn summary_tracks_camera_mode() {
        let mut s = scene();
        s.apply(Action::ToggleFollow);
        assert_eq!(SceneInspector::summary(&s).camera, CameraMode::Follow);
    }

    #[test]
    fn heading_counts_cover_fleet() {
        let s = scene();
        let counts = HeadingCounts::tally(s.traffic().vehicles());
        assert_eq!(counts.total(), s.traffic().len());
    }

    #[test]
    fn inspect_vehicle_found_and_missing() {
        let s = scene();
        let info = SceneInspector::inspect_vehicle(&s, 0).unwrap();
        assert_eq!(info.heading, Heading::Up);
        assert_eq!(info.speed, 0.01);
        assert!(SceneInspector::inspect_vehicle(&s, 40).is_none());
        assert_eq!(SceneInspector::list_vehicles(&s).len(), 40);
    }

    #[test]
    fn summary_display_and_json() {
        let s = scene();
        let summary = SceneInspector::summary(&s);
        let text = format!("{summary}");
        assert!(text.contains("frame=0"));
        assert!(text.contains("vehicles=40"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["fleet_size"], 40);
        assert_eq!(json["camera"], "Free");
    }
}
