use bevy::prelude::*;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};


// fixed ground grid with world axes
// so user can determine their bearings in 3d space, and for sense of scale
pub struct GridPlugin;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GridGizmoGroup;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(GridConfig::default())
            .init_gizmo_group::<GridGizmoGroup>()
            .add_systems(Startup, setup_gizmos)
            .add_systems(Update, draw_grid);
    }
}

// setting theese parameters as a resource allows for runtime modifications
#[derive(Resource)]
pub struct GridConfig {
    pub size: f32,      // full edge length, centered on the origin
    pub spacing: f32,
    pub axis_length: f32,
    pub color: Color,
    pub enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            spacing: 1.0,
            axis_length: 5.0,
            color: Color::srgba(0.5, 0.5, 0.5, 0.25),
            enabled: true,
        }
    }
}

impl GridConfig {
    /// Line segments of the grid, x-parallel lines first
    pub fn lines(&self) -> Vec<(Vec3, Vec3)> {
        let half = self.size / 2.0;
        let count = (self.size / self.spacing).round() as usize;

        let mut lines = Vec::with_capacity(2 * (count + 1));
        for i in 0..=count {
            let z = -half + i as f32 * self.spacing;
            lines.push((Vec3::new(-half, 0.0, z), Vec3::new(half, 0.0, z)));
        }
        for i in 0..=count {
            let x = -half + i as f32 * self.spacing;
            lines.push((Vec3::new(x, 0.0, -half), Vec3::new(x, 0.0, half)));
        }
        lines
    }
}

fn setup_gizmos(
    mut config_store: ResMut<GizmoConfigStore>
) {
    let (config, _) = config_store.config_mut::<GridGizmoGroup>();
    config.depth_bias = 0.1; // render depth
}

fn draw_grid(
    mut gizmos: Gizmos<GridGizmoGroup>,
    params: Res<GridConfig>,
) {
    if !params.enabled {
        return;
    }

    for (start, end) in params.lines() {
        gizmos.line(start, end, params.color);
    }

    // axes, x red, y green, z blue
    let length = params.axis_length;
    gizmos.line(Vec3::ZERO, Vec3::X * length, Color::srgb(1.0, 0.0, 0.0));
    gizmos.line(Vec3::ZERO, Vec3::Y * length, Color::srgb(0.0, 1.0, 0.0));
    gizmos.line(Vec3::ZERO, Vec3::Z * length, Color::srgb(0.0, 0.0, 1.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_covers_twenty_meters() {
        let lines = GridConfig::default().lines();
        assert_eq!(lines.len(), 42);
        assert_eq!(lines[0], (Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 0.0, -10.0)));
        assert_eq!(lines[41], (Vec3::new(10.0, 0.0, -10.0), Vec3::new(10.0, 0.0, 10.0)));
    }
}
