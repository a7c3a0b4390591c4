// this is the entry point for the assembly generation plugin
use bevy::prelude::*;

use crate::config::*;

pub mod generator;
pub mod structure;

pub use generator::AssemblyParams;

// Event for regeneration
#[derive(Event, Clone, Copy, Debug)]
pub struct RegenerateEvent {
    pub seed: f64,
    pub height: f32,
    pub cell_size: f32,
}

// main plugin for generation
pub struct AssemblyPlugin;

impl Plugin for AssemblyPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(AssemblyParams::default())
            .add_event::<RegenerateEvent>()
            .add_systems(Startup, (validate_catalog, structure::spawn_initial).chain())
            .add_systems(Update, (structure::handle_regeneration, turntable));
    }
}

fn validate_catalog() {
    let catalog = generator::catalog::catalog();
    match catalog.validate() {
        Ok(()) => debug!("catalog ok: {} prototypes", catalog.len()),
        Err(err) => error!("catalog invalid: {}", err),
    }
}

// slow spin about the vertical axis
fn turntable(
    time: Res<Time>,
    mut roots: Query<&mut Transform, With<structure::AssemblyRoot>>,
) {
    for mut transform in roots.iter_mut() {
        transform.rotate_y(TURNTABLE_SPEED * time.delta_secs());
    }
}
