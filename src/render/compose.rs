//! Scene composition: turns the registry into entities, exactly once.
//!
//! Layout per body:
//! - Central star: one unlit sphere at the origin, no pivot.
//! - Orbiting body: an invisible pivot at the origin with the sphere as a
//!   child offset along +X. Rotating the pivot revolves the body; rotating
//!   the sphere spins it.
//! - Ring: annulus child of the same pivot, centered on the body and laid
//!   flat in the orbital plane.
//! - Orbit guide: a static line strip at the scene root.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::bodies::{
    BodyHandles, CelestialBody, OrbitRegistry, RegistryError, pivot_rotation, spin_rotation,
};
use crate::render::orbits::{OrbitGuide, OrbitPathSettings, guide_visibility, orbit_guide_mesh};
use crate::render::textures::{
    BodyTextures, MissingTexture, TextureError, TextureSet, textures_ready,
};
use crate::types::AnimationPhase;

/// Plugin composing the scene once textures are resolved.
pub struct ComposePlugin;

impl Plugin for ComposePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .init_resource::<OrbitPathSettings>()
            .init_resource::<BodyTextures>()
            .add_systems(
                Update,
                compose_scene
                    .after(TextureSet)
                    .run_if(in_state(AnimationPhase::Idle))
                    .run_if(textures_ready),
            );
    }
}

/// Geometry and failure-handling tunables for composition.
#[derive(Resource, Clone, Debug)]
pub struct SceneSettings {
    /// Longitudinal segments of body spheres.
    pub sphere_sectors: u32,
    /// Latitudinal segments of body spheres.
    pub sphere_stacks: u32,
    /// Segments around ring annuli.
    pub ring_resolution: u32,
    pub missing_texture: MissingTexture,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_sectors: 48,
            sphere_stacks: 24,
            ring_resolution: 96,
            missing_texture: MissingTexture::Abort,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CompositionError {
    #[error("cannot compose an empty registry")]
    EmptyRegistry,

    #[error("registry has no central body at the origin")]
    MissingCentralBody,

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Marker for the central star's mesh.
#[derive(Component, Debug)]
pub struct CentralBody;

/// Marker for any body's visible sphere.
#[derive(Component, Debug)]
pub struct BodyMesh;

/// Marker for the invisible node carrying a body's revolution.
#[derive(Component, Debug)]
pub struct OrbitPivot;

/// Marker for ring geometry.
#[derive(Component, Debug)]
pub struct RingMesh;

/// Validated description of what will be spawned.
#[derive(Clone, Debug)]
pub struct ScenePlan {
    pub central: CelestialBody,
    /// Everything except the central star, in registry order.
    pub orbiting: Vec<CelestialBody>,
}

impl ScenePlan {
    pub fn from_registry(registry: &OrbitRegistry) -> Result<Self, CompositionError> {
        if registry.is_empty() {
            return Err(CompositionError::EmptyRegistry);
        }
        let central = registry
            .central()
            .cloned()
            .ok_or(CompositionError::MissingCentralBody)?;
        let orbiting = registry
            .all()
            .filter(|b| b.name != central.name)
            .cloned()
            .collect();
        Ok(Self { central, orbiting })
    }

    pub fn pivot_count(&self) -> usize {
        self.orbiting.len()
    }

    pub fn guide_count(&self) -> usize {
        self.orbiting.len()
    }

    pub fn ring_count(&self) -> usize {
        self.orbiting.iter().filter(|b| b.ring.is_some()).count()
    }
}

/// Counts of what composition spawned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositionSummary {
    pub bodies: usize,
    pub pivots: usize,
    pub rings: usize,
    pub guides: usize,
}

/// Texture for `path` from the loaded set, or `None` when the placeholder
/// policy allows it.
fn resolve_texture(
    textures: &BodyTextures,
    settings: &SceneSettings,
    path: &str,
) -> Result<Option<Handle<Image>>, TextureError> {
    match textures.handle(path) {
        Some(handle) => Ok(Some(handle)),
        None if settings.missing_texture == MissingTexture::Placeholder => Ok(None),
        None => Err(TextureError::Failed {
            path: path.to_string(),
            reason: "texture was not resolved before composition".to_string(),
        }),
    }
}

/// Textures of one body, resolved before anything is spawned.
struct ResolvedBody<'p> {
    body: &'p CelestialBody,
    surface: Option<Handle<Image>>,
    /// Outer `None`: no ring. Inner `None`: ring drawn with a placeholder.
    ring: Option<Option<Handle<Image>>>,
}

impl<'p> ResolvedBody<'p> {
    fn resolve(
        body: &'p CelestialBody,
        registry: &OrbitRegistry,
        textures: &BodyTextures,
        settings: &SceneSettings,
    ) -> Result<Self, CompositionError> {
        registry.get(&body.name)?;
        let surface = resolve_texture(textures, settings, &body.texture)?;
        let ring = body
            .ring
            .as_ref()
            .map(|ring| resolve_texture(textures, settings, &ring.texture))
            .transpose()?;
        Ok(Self {
            body,
            surface,
            ring,
        })
    }
}

/// Asset stores and settings used while spawning.
struct SceneBuilder<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    settings: &'a SceneSettings,
}

impl SceneBuilder<'_> {
    fn sphere(&mut self, radius: f32) -> Handle<Mesh> {
        self.meshes.add(
            Sphere::new(radius)
                .mesh()
                .uv(self.settings.sphere_sectors, self.settings.sphere_stacks),
        )
    }

    /// Textured material, or a flat placeholder if the texture is unavailable.
    fn surface(
        &mut self,
        texture: Option<Handle<Image>>,
        unlit: bool,
        placeholder: Color,
    ) -> Handle<StandardMaterial> {
        let base_color = if texture.is_some() { Color::WHITE } else { placeholder };
        self.materials.add(StandardMaterial {
            base_color,
            base_color_texture: texture,
            perceptual_roughness: 1.0,
            unlit,
            ..default()
        })
    }

    fn ring(
        &mut self,
        inner: f32,
        outer: f32,
        texture: Option<Handle<Image>>,
    ) -> (Handle<Mesh>, Handle<StandardMaterial>) {
        let base_color = if texture.is_some() {
            Color::WHITE
        } else {
            Color::srgba(0.8, 0.75, 0.6, 0.6)
        };
        let mesh = self.meshes.add(
            Annulus::new(inner, outer)
                .mesh()
                .resolution(self.settings.ring_resolution),
        );
        let material = self.materials.add(StandardMaterial {
            base_color,
            base_color_texture: texture,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        (mesh, material)
    }
}

/// Spawn `plan` and record every body's entities in `registry`.
///
/// Every fallible check runs before the first spawn: on error no entity is
/// queued and the registry is left untouched.
pub fn spawn_scene(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &BodyTextures,
    settings: &SceneSettings,
    guides: &OrbitPathSettings,
    plan: &ScenePlan,
    registry: &mut OrbitRegistry,
) -> Result<CompositionSummary, CompositionError> {
    let star = ResolvedBody::resolve(&plan.central, registry, textures, settings)?;
    let orbiting = plan
        .orbiting
        .iter()
        .map(|body| ResolvedBody::resolve(body, registry, textures, settings))
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = SceneBuilder {
        meshes,
        materials,
        settings,
    };
    let mut summary = CompositionSummary::default();
    let mut spawned: Vec<(&str, BodyHandles)> = Vec::with_capacity(orbiting.len() + 1);

    // Central star: unlit, since it is the light source.
    let mesh = builder.sphere(star.body.radius);
    let material = builder.surface(star.surface, true, Color::srgb(1.0, 0.85, 0.4));
    let star_entity = commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_rotation(spin_rotation(star.body.angles.spin)),
            BodyMesh,
            CentralBody,
            Name::new(star.body.name.clone()),
        ))
        .id();
    spawned.push((
        &star.body.name,
        BodyHandles {
            mesh: star_entity,
            pivot: None,
            ring: None,
        },
    ));
    summary.bodies += 1;

    let guide_material = builder.materials.add(StandardMaterial {
        base_color: guides.color(),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for resolved in orbiting {
        let body = resolved.body;
        let offset = Vec3::X * body.orbital_distance;

        let pivot = commands
            .spawn((
                Transform::from_rotation(pivot_rotation(body.angles.orbit)),
                Visibility::default(),
                OrbitPivot,
                Name::new(format!("{} pivot", body.name)),
            ))
            .id();

        let mesh = builder.sphere(body.radius);
        let material = builder.surface(resolved.surface, false, Color::srgb(0.55, 0.55, 0.6));
        let body_entity = commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(offset).with_rotation(spin_rotation(body.angles.spin)),
                BodyMesh,
                Name::new(body.name.clone()),
                ChildOf(pivot),
            ))
            .id();

        let ring_entity = match (&body.ring, resolved.ring) {
            (Some(ring), Some(texture)) => {
                let (mesh, material) = builder.ring(
                    ring.inner_radius(body.radius),
                    ring.outer_radius(body.radius),
                    texture,
                );
                let entity = commands
                    .spawn((
                        Mesh3d(mesh),
                        MeshMaterial3d(material),
                        // Annulus faces +Z; tip it so it lies in the XZ plane facing up.
                        Transform::from_translation(offset)
                            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
                        RingMesh,
                        Name::new(format!("{} ring", body.name)),
                        ChildOf(pivot),
                    ))
                    .id();
                Some(entity)
            }
            _ => None,
        };

        commands.spawn((
            Mesh3d(builder.meshes.add(orbit_guide_mesh(
                body.orbital_distance,
                guides.effective_segments(),
            ))),
            MeshMaterial3d(guide_material.clone()),
            Transform::IDENTITY,
            guide_visibility(guides),
            OrbitGuide {
                radius: body.orbital_distance,
            },
            Name::new(format!("{} orbit", body.name)),
        ));

        spawned.push((
            &body.name,
            BodyHandles {
                mesh: body_entity,
                pivot: Some(pivot),
                ring: ring_entity,
            },
        ));

        summary.bodies += 1;
        summary.pivots += 1;
        summary.guides += 1;
        summary.rings += usize::from(ring_entity.is_some());
    }

    // Every name was checked against the registry above.
    for (name, handles) in spawned {
        registry.register(name, handles)?;
    }

    Ok(summary)
}

/// Compose the scene once and start the animation, or abort startup.
fn compose_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut registry: ResMut<OrbitRegistry>,
    textures: Res<BodyTextures>,
    settings: Res<SceneSettings>,
    guides: Res<OrbitPathSettings>,
    mut next_phase: ResMut<NextState<AnimationPhase>>,
    mut exit: MessageWriter<AppExit>,
    mut attempted: Local<bool>,
) {
    if *attempted {
        return;
    }
    *attempted = true;

    let result = ScenePlan::from_registry(&registry).and_then(|plan| {
        spawn_scene(
            &mut commands,
            &mut meshes,
            &mut materials,
            &textures,
            &settings,
            &guides,
            &plan,
            &mut registry,
        )
    });

    match result {
        Ok(summary) => {
            info!(
                "Composed scene: {} bodies, {} pivots, {} rings, {} orbit guides",
                summary.bodies, summary.pivots, summary.rings, summary.guides
            );
            next_phase.set(AnimationPhase::Running);
        }
        Err(err) => {
            error!("Scene composition failed: {err}");
            exit.write(AppExit::error());
        }
    }
}
