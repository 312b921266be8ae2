//! Beat catalog for source-work scenes.

use std::collections::BTreeMap;
use tintoretto_error::{TransposeError, TransposeErrorKind};
use tintoretto_interface::SceneRef;

/// An ordered table of narrative beats keyed by source scene.
///
/// Lookup is total: a key with no catalog entry resolves to the default
/// scene's beats, so callers can request any act/scene combination without
/// checking membership first.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tintoretto_interface::SceneRef;
/// use tintoretto_transpose::BeatCatalog;
///
/// let mut scenes = BTreeMap::new();
/// scenes.insert(
///     SceneRef::new(1, 3),
///     vec!["Three predictions are delivered".to_string()],
/// );
/// let catalog = BeatCatalog::new(scenes, SceneRef::new(1, 3)).unwrap();
///
/// // Unknown scenes fall back to the default.
/// assert_eq!(
///     catalog.lookup(SceneRef::new(9, 9)),
///     catalog.lookup(SceneRef::new(1, 3)),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatCatalog {
    scenes: BTreeMap<SceneRef, Vec<String>>,
    default_scene: SceneRef,
}

impl BeatCatalog {
    /// Create a catalog from a scene table and a default key.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, the default key has no
    /// entry, or any entry has an empty beat list.
    pub fn new(
        scenes: BTreeMap<SceneRef, Vec<String>>,
        default_scene: SceneRef,
    ) -> Result<Self, TransposeError> {
        if scenes.is_empty() {
            return Err(TransposeError::new(TransposeErrorKind::EmptyCatalog));
        }
        if !scenes.contains_key(&default_scene) {
            return Err(TransposeError::new(
                TransposeErrorKind::MissingDefaultScene {
                    act: default_scene.act,
                    scene: default_scene.scene,
                },
            ));
        }
        for (scene, beats) in &scenes {
            if beats.is_empty() {
                return Err(TransposeError::new(TransposeErrorKind::EmptyBeats {
                    act: scene.act,
                    scene: scene.scene,
                }));
            }
        }
        Ok(Self {
            scenes,
            default_scene,
        })
    }

    /// Build a catalog from data already known to satisfy the `new`
    /// invariants, such as the built-in profile constants.
    pub(crate) fn from_validated(
        scenes: BTreeMap<SceneRef, Vec<String>>,
        default_scene: SceneRef,
    ) -> Self {
        Self {
            scenes,
            default_scene,
        }
    }

    /// Return the beats for a scene, falling back to the default scene
    /// when the key is not in the catalog.
    pub fn lookup(&self, scene: SceneRef) -> &[String] {
        self.scenes
            .get(&scene)
            .unwrap_or_else(|| &self.scenes[&self.default_scene])
    }

    /// True when the catalog holds an entry for this exact key.
    pub fn contains(&self, scene: SceneRef) -> bool {
        self.scenes.contains_key(&scene)
    }

    /// The key that unknown lookups resolve to.
    pub fn default_scene(&self) -> SceneRef {
        self.default_scene
    }

    /// Number of catalogued scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True when the catalog has no scenes. Unreachable through `new`,
    /// which rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Iterate catalogued scene keys in order.
    pub fn scene_refs(&self) -> impl Iterator<Item = SceneRef> + '_ {
        self.scenes.keys().copied()
    }
}
