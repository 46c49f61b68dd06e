//! Gesture scripts: seed elements, replay pointer gestures, report the result.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use transform::TransformError;
use transform::bounds::Size;
use transform::compass::CompassDirection;
use transform::engine::Transformer;
use transform::math::Point;
use transform::matrix::element_rotation;
use transform::overlay::Overlay;
use transform::surface::{Element, ElementId, ElementStore, VendorPrefix};
use uuid::Uuid;

use crate::error::ReplayError;

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub gestures: Vec<Gesture>,
}

/// An element placed on the surface before any gesture runs.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub transform: Option<String>,
}

/// One pointer-down, a run of pointer samples, and a release or cancel.
#[derive(Debug, Clone, Deserialize)]
pub struct Gesture {
    #[serde(flatten)]
    pub start: GestureStart,
    /// Pointer-down position.
    pub at: [f64; 2],
    #[serde(default)]
    pub samples: Vec<[f64; 2]>,
    /// Abandon the gesture instead of releasing it.
    #[serde(default)]
    pub cancel: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GestureStart {
    Create {
        #[serde(default)]
        name: Option<String>,
    },
    Rotate {
        target: String,
    },
    Resize {
        target: String,
        handle: CompassDirection,
    },
    Move {
        target: String,
    },
}

impl GestureStart {
    fn mode(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Rotate { .. } => "rotate",
            Self::Resize { .. } => "resize",
            Self::Move { .. } => "move",
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Debug, Serialize)]
pub struct Report {
    /// Transform property the surface writes, e.g. `-webkit-transform`.
    pub property: String,
    pub elements: Vec<ElementReport>,
    pub gestures: Vec<GestureReport>,
    pub overlay: Overlay,
}

#[derive(Debug, Serialize)]
pub struct ElementReport {
    pub name: Option<String>,
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub transform: Option<String>,
    /// `None` when the transform cannot be parsed.
    pub rotation_degrees: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct GestureReport {
    pub mode: &'static str,
    pub element: ElementId,
    pub cancelled: bool,
}

// =============================================================================
// REPLAY
// =============================================================================

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns `InvalidJson` when the text is not a valid script.
pub fn parse(text: &str) -> Result<Script, ReplayError> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a report, pretty-printed or on one line.
///
/// # Errors
///
/// Returns `Render` when the report cannot be serialized.
pub fn render(report: &Report, pretty: bool) -> Result<String, ReplayError> {
    let rendered = if pretty { serde_json::to_string_pretty(report) } else { serde_json::to_string(report) };
    rendered.map_err(ReplayError::Render)
}

/// Run every gesture in `script` against a fresh in-memory surface.
///
/// # Errors
///
/// Stops at the first gesture that names an unknown element, reuses a name,
/// or is rejected by the engine.
pub fn replay(script: &Script, prefix: VendorPrefix) -> Result<Report, ReplayError> {
    let mut replay = Replay::new(prefix);
    for spec in &script.elements {
        replay.seed(spec)?;
    }
    for (index, gesture) in script.gestures.iter().enumerate() {
        replay.run(index, gesture)?;
    }
    Ok(replay.into_report())
}

struct Replay {
    transformer: Transformer<ElementStore>,
    ids: HashMap<String, ElementId>,
    names: HashMap<ElementId, String>,
    gestures: Vec<GestureReport>,
}

impl Replay {
    fn new(prefix: VendorPrefix) -> Self {
        Self {
            transformer: Transformer::new(ElementStore::with_prefix(prefix)),
            ids: HashMap::new(),
            names: HashMap::new(),
            gestures: Vec::new(),
        }
    }

    fn seed(&mut self, spec: &ElementSpec) -> Result<(), ReplayError> {
        self.ensure_free(&spec.name)?;
        let id = Uuid::new_v4();
        self.transformer.surface.insert(Element {
            id,
            offset: Point::new(spec.x, spec.y),
            size: Size::new(spec.width, spec.height),
            transform: spec.transform.clone(),
        });
        self.bind(&spec.name, id);
        tracing::debug!(name = %spec.name, %id, "element seeded");
        Ok(())
    }

    fn run(&mut self, index: usize, gesture: &Gesture) -> Result<(), ReplayError> {
        let mode = gesture.start.mode();
        let fail = |source: TransformError| ReplayError::Gesture { index, mode, source };
        let [x, y] = gesture.at;

        let element = match &gesture.start {
            GestureStart::Create { name } => {
                if let Some(name) = name {
                    self.ensure_free(name)?;
                }
                let id = self.transformer.begin_create(x, y).map_err(fail)?;
                if let Some(name) = name {
                    self.bind(name, id);
                }
                id
            }
            GestureStart::Rotate { target } => {
                let id = self.lookup(target)?;
                self.transformer.begin_rotate(id, x, y).map_err(fail)?
            }
            GestureStart::Resize { target, handle } => {
                let id = self.lookup(target)?;
                self.transformer.begin_resize(id, *handle, x, y).map_err(fail)?
            }
            GestureStart::Move { target } => {
                let id = self.lookup(target)?;
                self.transformer.begin_move(id, x, y).map_err(fail)?
            }
        };

        for &[sx, sy] in &gesture.samples {
            if let Err(source) = self.transformer.pointer_move(sx, sy) {
                self.transformer.cancel();
                return Err(fail(source));
            }
        }

        if gesture.cancel {
            self.transformer.cancel();
        } else {
            self.transformer.pointer_up().map_err(fail)?;
        }

        tracing::info!(index, mode, %element, samples = gesture.samples.len(), cancelled = gesture.cancel, "gesture replayed");
        self.gestures.push(GestureReport { mode, element, cancelled: gesture.cancel });
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<ElementId, ReplayError> {
        self.ids.get(name).copied().ok_or_else(|| ReplayError::UnknownElement(name.to_owned()))
    }

    fn ensure_free(&self, name: &str) -> Result<(), ReplayError> {
        if self.ids.contains_key(name) {
            return Err(ReplayError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    fn bind(&mut self, name: &str, id: ElementId) {
        self.ids.insert(name.to_owned(), id);
        self.names.insert(id, name.to_owned());
    }

    fn into_report(self) -> Report {
        let surface = &self.transformer.surface;
        let elements = surface
            .elements()
            .into_iter()
            .map(|element| {
                let rotation_degrees = match element_rotation(surface, element.id) {
                    Ok(rotation) => Some(rotation.to_degrees()),
                    Err(error) => {
                        tracing::warn!(id = %element.id, %error, "unreadable transform");
                        None
                    }
                };
                ElementReport {
                    name: self.names.get(&element.id).cloned(),
                    id: element.id,
                    x: element.offset.x,
                    y: element.offset.y,
                    width: element.size.width,
                    height: element.size.height,
                    transform: element.transform.clone(),
                    rotation_degrees,
                }
            })
            .collect();

        Report {
            property: surface.prefix().transform_property(),
            elements,
            gestures: self.gestures,
            overlay: self.transformer.overlay,
        }
    }
}
