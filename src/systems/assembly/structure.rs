use bevy::prelude::*;

use super::generator::element::{Element, ElementType};
use super::generator::mesh_gen::{self, PrimitiveTag};
use super::generator::{self, AssemblyParams};
use super::RegenerateEvent;

// entity hierarchy components
#[derive(Component)]
pub struct AssemblyRoot {
    pub seed: f64,
    pub element_count: usize,
}

/// Identifies the element a spawned box came from
#[derive(Component, Clone, Debug)]
pub struct ElementTag {
    pub id: String,
    pub element_type: ElementType,
    pub allowed_connections: Vec<String>,
}

/// Marks a box that stands in for something that failed to build
#[derive(Component, Clone, Debug)]
pub struct FallbackMarker {
    pub reason: String,
    pub original_element_id: Option<String>,
}

/// Spawns one box entity per element under a fresh `AssemblyRoot`.
pub fn spawn_assembly(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    seed: f64,
    elements: &[Element],
) -> Entity {
    let root = commands.spawn((
        AssemblyRoot { seed, element_count: elements.len() },
        Transform::default(),
        Visibility::Visible,
    )).id();

    let children: Vec<Entity> = mesh_gen::plan_primitives(elements)
        .into_iter()
        .map(|primitive| {
            let mesh = meshes.add(mesh_gen::primitive_mesh(&primitive));
            let material = materials.add(mesh_gen::primitive_material(&primitive));
            let mut entity = commands.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                primitive.transform,
            ));

            match primitive.tag {
                PrimitiveTag::Element { element_id, element_type, allowed_connections } => {
                    entity.insert((
                        Name::new(format!("{} {}", element_type.as_str(), element_id)),
                        ElementTag { id: element_id, element_type, allowed_connections },
                    ));
                }
                PrimitiveTag::Fallback { reason, original_element_id } => {
                    entity.insert((
                        Name::new("fallback"),
                        FallbackMarker { reason, original_element_id },
                    ));
                }
            }
            entity.id()
        })
        .collect();

    commands.entity(root).add_children(&children);
    root
}

pub fn spawn_initial(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    params: Res<AssemblyParams>,
) {
    match generator::generate(&params) {
        Ok(elements) => {
            info!("initial assembly: seed {}, {} elements", params.seed, elements.len());
            spawn_assembly(&mut commands, &mut meshes, &mut materials, params.seed, &elements);
        }
        Err(err) => error!("initial generation failed: {}", err),
    }
}

pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut params: ResMut<AssemblyParams>,
    query: Query<Entity, With<AssemblyRoot>>,
) {
    // only the latest request matters
    let Some(event) = events.read().last().copied() else {
        return;
    };

    // panel inputs change, the rest of the configuration carries over
    let next = AssemblyParams {
        complexity: params.complexity,
        symmetry: params.symmetry,
        floating_density: params.floating_density,
        aggregation_factor: params.aggregation_factor,
        composition: params.composition,
        ..AssemblyParams::new(event.cell_size, event.height, event.seed)
    };
    let elements = match generator::generate(&next) {
        Ok(elements) => elements,
        Err(err) => {
            // keep whatever is on screen
            error!("regeneration rejected: {}", err);
            return;
        }
    };

    // cleanup existing assembly, children go with it
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }

    info!(
        "regenerated: seed {:.6}, height {}, cell size {}, {} elements",
        next.seed, next.height, next.cell_size, elements.len()
    );
    spawn_assembly(&mut commands, &mut meshes, &mut materials, next.seed, &elements);
    *params = next;
}
