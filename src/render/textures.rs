//! Texture loading and the gate that holds composition until it finishes.
//!
//! Every texture the registry names is requested once at startup. While the
//! animation is idle, load states are polled each frame; composition only
//! starts once every texture is decoded, or once the missing-texture policy
//! has decided what to do about the ones that failed.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::bodies::OrbitRegistry;
use crate::render::compose::SceneSettings;
use crate::types::AnimationPhase;

/// Plugin requesting body textures and gating composition on them.
pub struct TexturePlugin;

impl Plugin for TexturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BodyTextures>()
            .add_systems(Startup, request_textures)
            .add_systems(
                Update,
                (poll_texture_loads, gate_textures)
                    .chain()
                    .in_set(TextureSet)
                    .run_if(in_state(AnimationPhase::Idle)),
            );
    }
}

/// System set covering texture polling and gating.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureSet;

/// What to do when a texture cannot be loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingTexture {
    /// Abort startup before the first frame.
    #[default]
    Abort,
    /// Render the surface with a flat placeholder color and carry on.
    Placeholder,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TextureError {
    #[error("failed to load texture {path:?}: {reason}")]
    Failed { path: String, reason: String },
}

/// Load progress of a single texture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TextureLoad {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

impl From<LoadState> for TextureLoad {
    fn from(state: LoadState) -> Self {
        match state {
            LoadState::Loaded => TextureLoad::Loaded,
            LoadState::Failed(err) => TextureLoad::Failed(err.to_string()),
            _ => TextureLoad::Pending,
        }
    }
}

/// Whether composition may proceed.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TextureGate {
    /// Some textures are still loading.
    #[default]
    Waiting,
    /// Every texture is resolved (or replaced by a placeholder).
    Ready,
    /// A texture failed under [`MissingTexture::Abort`].
    Failed(TextureError),
}

#[derive(Clone, Debug)]
struct TextureEntry {
    path: String,
    handle: Handle<Image>,
    load: TextureLoad,
}

/// Resource holding every requested texture and the gate state.
#[derive(Resource, Debug, Default)]
pub struct BodyTextures {
    entries: Vec<TextureEntry>,
    pub gate: TextureGate,
}

impl BodyTextures {
    /// Track `path` with its handle. Paths are only tracked once.
    pub fn insert(&mut self, path: impl Into<String>, handle: Handle<Image>) {
        let path = path.into();
        if self.entries.iter().any(|e| e.path == path) {
            return;
        }
        self.entries.push(TextureEntry {
            path,
            handle,
            load: TextureLoad::Pending,
        });
    }

    /// Update the load progress of a tracked path.
    pub fn record(&mut self, path: &str, load: TextureLoad) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.path == path) {
            entry.load = load;
        }
    }

    /// Handle to use for `path`, or `None` if it failed or was never requested.
    pub fn handle(&self, path: &str) -> Option<Handle<Image>> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .filter(|e| !matches!(e.load, TextureLoad::Failed(_)))
            .map(|e| e.handle.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.gate == TextureGate::Ready
    }

    /// Decide the gate from the current load states.
    ///
    /// Under [`MissingTexture::Abort`] the first failure is fatal even while
    /// other textures are still pending. Under [`MissingTexture::Placeholder`]
    /// failures count as resolved.
    pub fn evaluate(&self, policy: MissingTexture) -> TextureGate {
        let mut waiting = false;
        for entry in &self.entries {
            match &entry.load {
                TextureLoad::Loaded => {}
                TextureLoad::Pending => waiting = true,
                TextureLoad::Failed(reason) => {
                    if policy == MissingTexture::Abort {
                        return TextureGate::Failed(TextureError::Failed {
                            path: entry.path.clone(),
                            reason: reason.clone(),
                        });
                    }
                }
            }
        }
        if waiting {
            TextureGate::Waiting
        } else {
            TextureGate::Ready
        }
    }

    /// Paths of textures that failed and will be drawn as placeholders.
    pub fn failed_paths(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| matches!(e.load, TextureLoad::Failed(_)))
            .map(|e| e.path.as_str())
    }
}

/// Run condition: composition may start.
pub fn textures_ready(textures: Res<BodyTextures>) -> bool {
    textures.is_ready()
}

/// Request every body and ring texture from the asset server.
fn request_textures(
    asset_server: Res<AssetServer>,
    registry: Res<OrbitRegistry>,
    mut textures: ResMut<BodyTextures>,
) {
    for body in registry.all() {
        for path in body.texture_paths() {
            textures.insert(path, asset_server.load(path.to_string()));
        }
    }
    info!("Requested {} textures", textures.len());
}

/// Copy asset-server load states into [`BodyTextures`].
fn poll_texture_loads(asset_server: Res<AssetServer>, mut textures: ResMut<BodyTextures>) {
    if textures.gate != TextureGate::Waiting {
        return;
    }

    let states: Vec<(String, TextureLoad)> = textures
        .entries
        .iter()
        .map(|e| {
            let state = asset_server
                .get_load_state(e.handle.id())
                .unwrap_or(LoadState::NotLoaded);
            (e.path.clone(), state.into())
        })
        .collect();

    for (path, load) in states {
        textures.record(&path, load);
    }
}

/// Resolve the gate once all load states are known.
///
/// A fatal texture failure stops the app before the first frame is drawn.
pub fn gate_textures(
    settings: Res<SceneSettings>,
    mut textures: ResMut<BodyTextures>,
    mut exit: MessageWriter<AppExit>,
) {
    if textures.gate != TextureGate::Waiting {
        return;
    }

    match textures.evaluate(settings.missing_texture) {
        TextureGate::Waiting => {}
        TextureGate::Ready => {
            for path in textures.failed_paths() {
                warn!("Texture {path:?} unavailable, using placeholder color");
            }
            info!("All {} textures resolved", textures.len());
            textures.gate = TextureGate::Ready;
        }
        TextureGate::Failed(err) => {
            error!("Startup aborted: {err}");
            textures.gate = TextureGate::Failed(err);
            exit.write(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textures(paths: &[&str]) -> BodyTextures {
        let mut textures = BodyTextures::default();
        for path in paths {
            textures.insert(*path, Handle::default());
        }
        textures
    }

    #[test]
    fn test_duplicate_paths_tracked_once() {
        let t = textures(&["a.jpg", "a.jpg", "b.jpg"]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_pending_keeps_gate_waiting() {
        let mut t = textures(&["a.jpg", "b.jpg"]);
        t.record("a.jpg", TextureLoad::Loaded);
        assert_eq!(t.evaluate(MissingTexture::Abort), TextureGate::Waiting);

        t.record("b.jpg", TextureLoad::Loaded);
        assert_eq!(t.evaluate(MissingTexture::Abort), TextureGate::Ready);
    }

    #[test]
    fn test_failure_aborts_immediately() {
        let mut t = textures(&["a.jpg", "b.jpg"]);
        t.record("b.jpg", TextureLoad::Failed("not found".into()));

        let gate = t.evaluate(MissingTexture::Abort);
        assert_eq!(
            gate,
            TextureGate::Failed(TextureError::Failed {
                path: "b.jpg".into(),
                reason: "not found".into(),
            })
        );
    }

    #[test]
    fn test_placeholder_policy_tolerates_failure() {
        let mut t = textures(&["a.jpg", "b.jpg"]);
        t.record("a.jpg", TextureLoad::Loaded);
        t.record("b.jpg", TextureLoad::Failed("corrupt".into()));

        assert_eq!(t.evaluate(MissingTexture::Placeholder), TextureGate::Ready);
        assert!(t.handle("a.jpg").is_some());
        assert!(t.handle("b.jpg").is_none());
        assert_eq!(t.failed_paths().collect::<Vec<_>>(), vec!["b.jpg"]);
    }

    #[test]
    fn test_no_textures_is_ready() {
        let t = BodyTextures::default();
        assert_eq!(t.evaluate(MissingTexture::Abort), TextureGate::Ready);
    }
}
