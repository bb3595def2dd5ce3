//! Editing session state.

use crate::codec;
use crate::error::DecodeError;
use crate::icon::{BaseShape, Color, ElementKind, IconDescription, InnerElement};
use crate::log::debug;
use crate::render::{RenderReport, SvgDocument};
use crate::settings::ExportSettings;

/// Offset applied to both coordinates of a duplicated element.
const DUPLICATE_OFFSET: i32 = 10;

/// Integer element properties that can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementField {
    X,
    Y,
    Width,
    Height,
    Rotation,
    Roundness,
    StrokeWidth,
}

/// Direction for z-order moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// One step towards the front (drawn later).
    Forward,
    /// One step towards the back (drawn earlier).
    Backward,
}

/// Holds the one icon being edited.
///
/// Every mutation goes through a method here; rendering and encoding are
/// pure functions of [`IconEditor::icon`].
///
/// # Example
///
/// ```
/// use bauhaus_icon::{ElementField, ElementKind, IconEditor};
///
/// let mut editor = IconEditor::new();
/// let id = editor.add_element(ElementKind::Circle);
/// editor.update_element(id, ElementField::Width, 60);
///
/// // Circles stay round.
/// assert_eq!(editor.element(id).unwrap().height, 60);
///
/// let code = editor.code();
/// let mut other = IconEditor::new();
/// other.load_code(&code).unwrap();
/// assert_eq!(other.icon(), editor.icon());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IconEditor {
    icon: IconDescription,
    /// Next element id. Ids are never handed out twice in a session.
    next_id: u32,
}

impl IconEditor {
    /// Starts a session with the default icon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session on an existing icon, renumbering its elements.
    pub fn from_icon(mut icon: IconDescription) -> Self {
        icon.renumber();
        let next_id = icon.elements.len() as u32;
        Self { icon, next_id }
    }

    pub fn icon(&self) -> &IconDescription {
        &self.icon
    }

    // ---- Base shape ----

    pub fn set_base_shape(&mut self, shape: BaseShape) {
        self.icon.base_shape = shape;
    }

    pub fn set_base_roundness(&mut self, roundness: i32) {
        self.icon.base_roundness = roundness;
    }

    pub fn set_base_rotation(&mut self, rotation: i32) {
        self.icon.base_rotation = rotation;
    }

    pub fn set_base_color(&mut self, color: impl Into<Color>) {
        self.icon.base_color = color.into();
    }

    pub fn set_stroke_color(&mut self, color: impl Into<Color>) {
        self.icon.stroke_color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: i32) {
        self.icon.stroke_width = width;
    }

    pub fn set_has_stroke(&mut self, has_stroke: bool) {
        self.icon.has_stroke = has_stroke;
    }

    // ---- Elements ----

    /// Appends a new element with default placement and returns its id.
    pub fn add_element(&mut self, kind: ElementKind) -> u32 {
        let id = self.allocate_id();
        self.icon.elements.push(InnerElement::new(id, kind));
        id
    }

    pub fn element(&self, id: u32) -> Option<&InnerElement> {
        self.icon.element(id)
    }

    /// Sets one integer property. Returns false if no element has `id`.
    ///
    /// Width and height of circles are kept equal: setting either sets both.
    pub fn update_element(&mut self, id: u32, field: ElementField, value: i32) -> bool {
        let Some(element) = self.icon.element_mut(id) else {
            return false;
        };
        let circular = element.kind.is_circular();
        match field {
            ElementField::X => element.x = value,
            ElementField::Y => element.y = value,
            ElementField::Width | ElementField::Height if circular => {
                element.width = value;
                element.height = value;
            }
            ElementField::Width => element.width = value,
            ElementField::Height => element.height = value,
            ElementField::Rotation => element.rotation = value,
            ElementField::Roundness => element.roundness = value,
            ElementField::StrokeWidth => element.stroke_width = value,
        }
        true
    }

    pub fn set_element_color(&mut self, id: u32, color: impl Into<Color>) -> bool {
        match self.icon.element_mut(id) {
            Some(element) => {
                element.color = color.into();
                true
            }
            None => false,
        }
    }

    /// Sets stroke colour and visibility of one element.
    pub fn set_element_stroke(&mut self, id: u32, color: impl Into<Color>, has_stroke: bool) -> bool {
        match self.icon.element_mut(id) {
            Some(element) => {
                element.stroke_color = color.into();
                element.has_stroke = has_stroke;
                true
            }
            None => false,
        }
    }

    pub fn remove_element(&mut self, id: u32) -> bool {
        let before = self.icon.elements.len();
        self.icon.elements.retain(|e| e.id != id);
        self.icon.elements.len() != before
    }

    /// Copies an element to the top of the stack, shifted down and right.
    ///
    /// Returns the new element's id.
    pub fn duplicate_element(&mut self, id: u32) -> Option<u32> {
        let mut copy = self.icon.element(id)?.clone();
        copy.id = self.allocate_id();
        copy.x = copy.x.saturating_add(DUPLICATE_OFFSET).min(100);
        copy.y = copy.y.saturating_add(DUPLICATE_OFFSET).min(100);
        let new_id = copy.id;
        self.icon.elements.push(copy);
        Some(new_id)
    }

    /// Moves an element one step in z-order. Returns false at either end or
    /// for an unknown id.
    pub fn move_element(&mut self, id: u32, direction: ZOrder) -> bool {
        let Some(index) = self.icon.elements.iter().position(|e| e.id == id) else {
            return false;
        };
        let target = match direction {
            ZOrder::Forward if index + 1 < self.icon.elements.len() => index + 1,
            ZOrder::Backward if index > 0 => index - 1,
            _ => return false,
        };
        self.icon.elements.swap(index, target);
        true
    }

    /// Restores the default icon. Ids keep counting up.
    pub fn reset(&mut self) {
        self.icon = IconDescription::default();
    }

    // ---- Codes and output ----

    /// The canonical code of the current icon.
    pub fn code(&self) -> String {
        codec::encode(&self.icon)
    }

    /// Replaces the icon with a decoded one.
    ///
    /// On error the current icon is left untouched.
    pub fn load_code(&mut self, code: &str) -> Result<(), DecodeError> {
        let icon = codec::decode(code)?;
        debug!(elements = icon.elements.len(), "loaded icon code");
        *self = Self::from_icon(icon);
        Ok(())
    }

    /// Renders the current icon as an SVG document string.
    pub fn render_svg(&self, settings: &ExportSettings) -> (String, RenderReport) {
        let (doc, report) = SvgDocument::from_icon(&self.icon);
        (doc.with_size(settings.size).to_svg_string(), report)
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increment_and_are_not_reused() {
        let mut editor = IconEditor::new();
        let a = editor.add_element(ElementKind::Dot);
        let b = editor.add_element(ElementKind::Line);
        assert_ne!(a, b);

        assert!(editor.remove_element(b));
        let c = editor.add_element(ElementKind::Arc);
        assert_ne!(c, b);
        assert!(!editor.remove_element(b));
    }

    #[test]
    fn circle_width_and_height_are_coupled() {
        let mut editor = IconEditor::new();
        let circle = editor.add_element(ElementKind::Circle);
        let ring = editor.add_element(ElementKind::CircleOutline);

        editor.update_element(circle, ElementField::Width, 45);
        assert_eq!(editor.element(circle).unwrap().height, 45);

        editor.update_element(ring, ElementField::Height, 12);
        assert_eq!(editor.element(ring).unwrap().width, 12);
    }

    #[test]
    fn other_kinds_size_independently() {
        let mut editor = IconEditor::new();
        let square = editor.add_element(ElementKind::Square);
        editor.update_element(square, ElementField::Width, 80);
        let element = editor.element(square).unwrap();
        assert_eq!((element.width, element.height), (80, 30));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut editor = IconEditor::new();
        assert!(!editor.update_element(99, ElementField::X, 1));
        assert!(!editor.set_element_color(99, "red"));
    }

    #[test]
    fn duplicate_offsets_and_clamps() {
        let mut editor = IconEditor::new();
        let id = editor.add_element(ElementKind::Triangle);
        editor.update_element(id, ElementField::X, 95);
        editor.set_element_color(id, "blue");

        let copy = editor.duplicate_element(id).unwrap();
        assert_ne!(copy, id);
        let element = editor.element(copy).unwrap();
        assert_eq!((element.x, element.y), (100, 60));
        assert_eq!(element.color, Color::new("blue"));
        assert_eq!(editor.icon().elements.last().unwrap().id, copy);

        assert_eq!(editor.duplicate_element(42), None);
    }

    #[test]
    fn duplicate_of_extreme_position_clamps() {
        let icon = IconDescription::default()
            .with_element(InnerElement::new(0, ElementKind::Dot).with_position(i32::MAX, i32::MIN));
        let mut editor = IconEditor::new();
        editor.load_code(&codec::encode(&icon)).unwrap();

        let copy = editor.duplicate_element(0).unwrap();
        let element = editor.element(copy).unwrap();
        assert_eq!((element.x, element.y), (100, i32::MIN + DUPLICATE_OFFSET));
    }

    #[test]
    fn z_order_moves() {
        let mut editor = IconEditor::new();
        let a = editor.add_element(ElementKind::Dot);
        let b = editor.add_element(ElementKind::Square);

        assert!(!editor.move_element(b, ZOrder::Forward));
        assert!(editor.move_element(a, ZOrder::Forward));
        let order: Vec<_> = editor.icon().elements.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![b, a]);
        assert!(!editor.move_element(b, ZOrder::Backward));
    }

    #[test]
    fn bad_code_leaves_state_untouched() {
        let mut editor = IconEditor::new();
        editor.set_base_shape(BaseShape::Star);
        editor.add_element(ElementKind::Zigzag);
        let before = editor.icon().clone();

        assert!(editor.load_code("not-valid").is_err());
        assert_eq!(editor.icon(), &before);
    }

    #[test]
    fn load_code_continues_ids_after_decoded_elements() {
        let mut editor = IconEditor::new();
        editor.load_code("square:20:0|circle:50:50:30:30:0:0|dot:10:10:5:5:0:0").unwrap();
        assert_eq!(editor.icon().elements.len(), 2);
        let id = editor.add_element(ElementKind::Cross);
        assert_eq!(id, 2);
    }

    #[test]
    fn code_round_trips_through_editor() {
        let mut editor = IconEditor::new();
        editor.set_base_shape(BaseShape::Semicircle);
        editor.set_base_rotation(180);
        editor.set_has_stroke(false);
        let id = editor.add_element(ElementKind::Line);
        editor.set_element_stroke(id, "red", true);

        let mut other = IconEditor::new();
        other.load_code(&editor.code()).unwrap();
        assert_eq!(other.icon(), editor.icon());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut editor = IconEditor::new();
        editor.set_base_shape(BaseShape::Hexagon);
        editor.add_element(ElementKind::Dot);
        editor.reset();
        assert_eq!(editor.icon(), &IconDescription::default());
        assert_eq!(editor.add_element(ElementKind::Dot), 1);
    }

    #[test]
    fn render_svg_uses_settings_size() {
        let editor = IconEditor::new();
        let (svg, report) = editor.render_svg(&ExportSettings::new().with_size(32));
        assert!(svg.contains(r#"width="32""#));
        assert_eq!(report.drawn, 1);
    }
}
