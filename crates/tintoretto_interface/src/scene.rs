//! Scene selection and scene result types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tintoretto_error::ConfigError;

/// A reference to a scene of the source work, by act and scene number.
///
/// Both numbers are 1-based; zero is rejected when parsing.
///
/// # Examples
///
/// ```
/// use tintoretto_interface::SceneRef;
///
/// let scene: SceneRef = "1:3".parse().unwrap();
/// assert_eq!(scene.act, 1);
/// assert_eq!(scene.scene, 3);
/// assert_eq!(format!("{}", scene), "Act 1, Scene 3");
///
/// assert!("0:3".parse::<SceneRef>().is_err());
/// assert!("one:three".parse::<SceneRef>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("Act {}, Scene {}", act, scene)]
pub struct SceneRef {
    /// Act number in the source work (1-based).
    pub act: u32,

    /// Scene number within the act (1-based).
    pub scene: u32,
}

impl SceneRef {
    /// Create a scene reference.
    pub fn new(act: u32, scene: u32) -> Self {
        Self { act, scene }
    }
}

impl FromStr for SceneRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ConfigError::new(format!(
                "invalid scene selector '{s}': expected ACT:SCENE with positive integers"
            ))
        };
        let (act, scene) = s.split_once(':').ok_or_else(invalid)?;
        let act: u32 = act.trim().parse().map_err(|_| invalid())?;
        let scene: u32 = scene.trim().parse().map_err(|_| invalid())?;
        if act == 0 || scene == 0 {
            return Err(invalid());
        }
        Ok(Self { act, scene })
    }
}

/// Generated prose for a single scene of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneResult {
    /// Act number of the source scene.
    pub original_act: u32,

    /// Scene number of the source scene.
    pub original_scene: u32,

    /// The beats the prose was generated from, in order.
    pub beats: Vec<String>,

    /// The generated prose, stored verbatim.
    pub generated_text: String,
}
