//! Rendering surface: the host side that actually holds and paints elements.
//!
//! The engine never draws anything. It reads and writes element geometry and
//! the transform property through the [`Surface`] trait, and toggles text
//! selection while a gesture is in progress. [`ElementStore`] is the
//! in-memory implementation used by the replay tool and the tests.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::Size;
use crate::error::TransformError;
use crate::math::Point;

/// Unique identifier for an element on the surface.
pub type ElementId = Uuid;

/// Where text selection is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionScope {
    /// The whole document.
    Document,
    /// A single element.
    Element(ElementId),
}

/// Vendor prefix of the host's transform property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorPrefix {
    /// Unprefixed `transform`.
    #[default]
    None,
    Webkit,
    Moz,
    O,
}

impl VendorPrefix {
    /// Prefixed candidates, in probing order.
    pub const CANDIDATES: [Self; 3] = [Self::Webkit, Self::Moz, Self::O];

    /// Pick the first prefix whose transform property the host supports.
    ///
    /// Falls back to the unprefixed property when no candidate matches.
    #[must_use]
    pub fn detect(mut supports: impl FnMut(&str) -> bool) -> Self {
        Self::CANDIDATES
            .into_iter()
            .find(|prefix| supports(&prefix.transform_property()))
            .unwrap_or_default()
    }

    /// The prefix string, e.g. `-webkit`. Empty when unprefixed.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Webkit => "-webkit",
            Self::Moz => "-moz",
            Self::O => "-o",
        }
    }

    /// Name of the transform property under this prefix.
    #[must_use]
    pub fn transform_property(self) -> String {
        match self {
            Self::None => "transform".to_string(),
            prefixed => format!("{}-transform", prefixed.as_str()),
        }
    }
}

/// The host rendering surface.
///
/// Offsets and pointer samples share one coordinate space. Lookups of an id
/// the surface does not hold fail with [`TransformError::ElementNotFound`].
pub trait Surface {
    /// Create a new, empty element with its top-left corner at `at`.
    fn create_element(&mut self, at: Point) -> ElementId;

    /// Remove an element.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` for an unknown id.
    fn remove_element(&mut self, id: ElementId) -> Result<(), TransformError>;

    /// Unrotated size of an element.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` for an unknown id.
    fn size(&self, id: ElementId) -> Result<Size, TransformError>;

    /// # Errors
    ///
    /// Returns `ElementNotFound` for an unknown id.
    fn set_size(&mut self, id: ElementId, size: Size) -> Result<(), TransformError>;

    /// Top-left offset of an element.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` for an unknown id.
    fn offset(&self, id: ElementId) -> Result<Point, TransformError>;

    /// # Errors
    ///
    /// Returns `ElementNotFound` for an unknown id.
    fn set_offset(&mut self, id: ElementId, offset: Point) -> Result<(), TransformError>;

    /// Raw transform property value, `None` when the element has none.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` for an unknown id.
    fn transform(&self, id: ElementId) -> Result<Option<String>, TransformError>;

    /// # Errors
    ///
    /// Returns `ElementNotFound` for an unknown id.
    fn set_transform(&mut self, id: ElementId, value: &str) -> Result<(), TransformError>;

    /// Allow or block text selection within `scope`.
    fn set_selectable(&mut self, scope: SelectionScope, selectable: bool);
}

/// Re-enable text selection within `scope`. Idempotent.
pub fn enable_selection<S: Surface + ?Sized>(surface: &mut S, scope: SelectionScope) {
    surface.set_selectable(scope, true);
}

/// Block text selection within `scope` while a gesture drags across it. Idempotent.
pub fn disable_selection<S: Surface + ?Sized>(surface: &mut S, scope: SelectionScope) {
    surface.set_selectable(scope, false);
}

/// An element as held by [`ElementStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Top-left corner in surface coordinates.
    pub offset: Point,
    pub size: Size,
    /// Transform property value, if any.
    pub transform: Option<String>,
}

/// In-memory surface.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
    order: Vec<ElementId>,
    unselectable: HashSet<SelectionScope>,
    prefix: VendorPrefix,
}

impl ElementStore {
    /// Create an empty store using the unprefixed transform property.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose transform property carries `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: VendorPrefix) -> Self {
        Self { prefix, ..Self::default() }
    }

    /// The vendor prefix resolved for this store.
    #[must_use]
    pub fn prefix(&self) -> VendorPrefix {
        self.prefix
    }

    /// Insert or replace an element. Replacing keeps the original position in
    /// [`ElementStore::elements`].
    pub fn insert(&mut self, element: Element) {
        let id = element.id;
        if self.elements.insert(id, element).is_none() {
            self.order.push(id);
        }
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// All elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> Vec<&Element> {
        self.order.iter().filter_map(|id| self.elements.get(id)).collect()
    }

    /// Whether text selection is currently allowed within `scope`.
    #[must_use]
    pub fn is_selectable(&self, scope: SelectionScope) -> bool {
        !self.unselectable.contains(&scope)
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn element(&self, id: ElementId) -> Result<&Element, TransformError> {
        self.elements.get(&id).ok_or(TransformError::ElementNotFound(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, TransformError> {
        self.elements.get_mut(&id).ok_or(TransformError::ElementNotFound(id))
    }
}

impl Surface for ElementStore {
    fn create_element(&mut self, at: Point) -> ElementId {
        let id = Uuid::new_v4();
        self.insert(Element { id, offset: at, size: Size::default(), transform: None });
        id
    }

    fn remove_element(&mut self, id: ElementId) -> Result<(), TransformError> {
        self.elements.remove(&id).ok_or(TransformError::ElementNotFound(id))?;
        self.order.retain(|other| *other != id);
        self.unselectable.remove(&SelectionScope::Element(id));
        Ok(())
    }

    fn size(&self, id: ElementId) -> Result<Size, TransformError> {
        Ok(self.element(id)?.size)
    }

    fn set_size(&mut self, id: ElementId, size: Size) -> Result<(), TransformError> {
        self.element_mut(id)?.size = size;
        Ok(())
    }

    fn offset(&self, id: ElementId) -> Result<Point, TransformError> {
        Ok(self.element(id)?.offset)
    }

    fn set_offset(&mut self, id: ElementId, offset: Point) -> Result<(), TransformError> {
        self.element_mut(id)?.offset = offset;
        Ok(())
    }

    fn transform(&self, id: ElementId) -> Result<Option<String>, TransformError> {
        Ok(self.element(id)?.transform.clone())
    }

    fn set_transform(&mut self, id: ElementId, value: &str) -> Result<(), TransformError> {
        self.element_mut(id)?.transform = Some(value.to_string());
        Ok(())
    }

    fn set_selectable(&mut self, scope: SelectionScope, selectable: bool) {
        if selectable {
            self.unselectable.remove(&scope);
        } else {
            self.unselectable.insert(scope);
        }
    }
}
