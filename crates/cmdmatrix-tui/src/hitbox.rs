use cmdmatrix::Record;
use ratatui::layout::Rect;

use crate::detail::copy_button_offset;
use crate::layout::Geometry;

/// Named buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Copy,
    Help,
    Refresh,
    Export,
}

/// What a clickable region stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Group tab by group index.
    Group(usize),
    SearchBar,
    /// List row by index into the filtered view.
    Row(usize),
    Button(Button),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitBox {
    pub rect: Rect,
    pub kind: HitKind,
}

impl HitBox {
    pub fn new(rect: Rect, kind: HitKind) -> Self {
        Self { rect, kind }
    }

    /// Inclusive on the top-left edge, exclusive on the bottom-right edge.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (u32::from(x), u32::from(y));
        let left = u32::from(self.rect.x);
        let top = u32::from(self.rect.y);
        x >= left
            && x < left + u32::from(self.rect.width)
            && y >= top
            && y < top + u32::from(self.rect.height)
    }
}

/// Frame arena of hit boxes.
///
/// Cleared and refilled after every dispatched message; the backing buffer
/// is reused between frames. Registration order is priority order: the
/// first box containing a point wins.
#[derive(Debug, Clone, Default)]
pub struct HitRegistry {
    boxes: Vec<HitBox>,
}

impl HitRegistry {
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn push(&mut self, rect: Rect, kind: HitKind) {
        self.boxes.push(HitBox::new(rect, kind));
    }

    pub fn resolve(&self, x: u16, y: u16) -> Option<HitBox> {
        self.boxes.iter().copied().find(|b| b.contains(x, y))
    }

    pub fn boxes(&self) -> &[HitBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// The slice of UI state the registry depends on.
#[derive(Debug, Clone, Copy)]
pub struct HitInputs<'a> {
    pub group_count: usize,
    pub scroll_offset: usize,
    pub filtered_len: usize,
    pub selected: Option<&'a Record>,
    /// Metrics view adds refresh and export buttons.
    pub action_buttons: bool,
}

/// Refill `registry` for `geometry`.
///
/// Order: tabs, search bar, visible rows, copy button, help button, then the
/// refresh and export buttons.
pub fn rebuild(registry: &mut HitRegistry, geometry: &Geometry, inputs: &HitInputs<'_>) {
    registry.clear();

    for index in 0..inputs.group_count {
        registry.push(geometry.tab_rect(index), HitKind::Group(index));
    }

    let search = geometry.search_input_rect();
    registry.push(search, HitKind::SearchBar);

    for slot in 0..geometry.visible_rows() {
        let index = slot + inputs.scroll_offset;
        if index >= inputs.filtered_len {
            break;
        }
        registry.push(geometry.list_row_rect(slot), HitKind::Row(index));
    }

    if geometry.has_detail()
        && let Some(record) = inputs.selected
    {
        let offset = copy_button_offset(record, geometry.detail_width);
        // clipped away by the panel border when the details run long
        if offset < geometry.detail_inner_rows() {
            registry.push(
                geometry.copy_button_rect(offset),
                HitKind::Button(Button::Copy),
            );
        }
    }

    registry.push(geometry.help_button_rect(), HitKind::Button(Button::Help));

    if inputs.action_buttons {
        registry.push(
            geometry.refresh_button_rect(),
            HitKind::Button(Button::Refresh),
        );
        registry.push(
            geometry.export_button_rect(),
            HitKind::Button(Button::Export),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;

    fn inputs<'a>(filtered_len: usize, scroll_offset: usize) -> HitInputs<'a> {
        HitInputs {
            group_count: 8,
            scroll_offset,
            filtered_len,
            selected: None,
            action_buttons: false,
        }
    }

    // --- Containment ---

    #[test]
    fn contains_is_half_open() {
        let b = HitBox::new(Rect::new(2, 3, 4, 1), HitKind::SearchBar);
        assert!(b.contains(2, 3));
        assert!(b.contains(5, 3));
        assert!(!b.contains(6, 3));
        assert!(!b.contains(2, 4));
        assert!(!b.contains(1, 3));
    }

    #[test]
    fn zero_sized_box_contains_nothing() {
        let b = HitBox::new(Rect::new(2, 3, 0, 1), HitKind::SearchBar);
        assert!(!b.contains(2, 3));
    }

    // --- Priority ---

    #[test]
    fn first_registered_wins_on_overlap() {
        let mut registry = HitRegistry::default();
        registry.push(Rect::new(0, 0, 10, 10), HitKind::Row(0));
        registry.push(Rect::new(5, 5, 10, 10), HitKind::Row(1));
        assert_eq!(registry.resolve(7, 7).unwrap().kind, HitKind::Row(0));
        assert_eq!(registry.resolve(12, 12).unwrap().kind, HitKind::Row(1));
        assert!(registry.resolve(30, 30).is_none());
    }

    // --- Rebuild ---

    #[test]
    fn rebuild_registers_in_documented_order() {
        let geometry = compute_layout(120, 40, 8);
        let record = Record::new("ls", "list");
        let mut registry = HitRegistry::default();
        rebuild(
            &mut registry,
            &geometry,
            &HitInputs {
                selected: Some(&record),
                action_buttons: true,
                ..inputs(3, 0)
            },
        );

        let kinds: Vec<HitKind> = registry.boxes().iter().map(|b| b.kind).collect();
        let mut expected: Vec<HitKind> = (0..8).map(HitKind::Group).collect();
        expected.push(HitKind::SearchBar);
        expected.extend((0..3).map(HitKind::Row));
        expected.push(HitKind::Button(Button::Copy));
        expected.push(HitKind::Button(Button::Help));
        expected.push(HitKind::Button(Button::Refresh));
        expected.push(HitKind::Button(Button::Export));
        assert_eq!(kinds, expected);
    }

    #[test]
    fn rows_are_offset_by_scroll() {
        let geometry = compute_layout(120, 40, 8);
        let mut registry = HitRegistry::default();
        rebuild(&mut registry, &geometry, &inputs(40, 5));

        let rows: Vec<usize> = registry
            .boxes()
            .iter()
            .filter_map(|b| match b.kind {
                HitKind::Row(i) => Some(i),
                _ => None,
            })
            .collect();
        assert_eq!(rows.len(), geometry.visible_rows());
        assert_eq!(rows[0], 5);

        let top = registry.resolve(3, geometry.list_start_y()).unwrap();
        assert_eq!(top.kind, HitKind::Row(5));
    }

    #[test]
    fn no_rows_for_empty_view() {
        let geometry = compute_layout(120, 40, 8);
        let mut registry = HitRegistry::default();
        rebuild(&mut registry, &geometry, &inputs(0, 0));
        assert!(
            registry
                .boxes()
                .iter()
                .all(|b| !matches!(b.kind, HitKind::Row(_)))
        );
    }

    #[test]
    fn no_copy_button_without_detail_panel() {
        let geometry = compute_layout(80, 30, 8);
        let record = Record::new("ls", "list");
        let mut registry = HitRegistry::default();
        rebuild(
            &mut registry,
            &geometry,
            &HitInputs {
                selected: Some(&record),
                ..inputs(1, 0)
            },
        );
        assert!(
            registry
                .boxes()
                .iter()
                .all(|b| b.kind != HitKind::Button(Button::Copy))
        );
    }

    #[test]
    fn no_copy_button_when_it_falls_below_the_panel() {
        let geometry = compute_layout(100, 33, 8);
        let record = Record::new("dl", "Navigate to Downloads folder")
            .with_hotkey("Ctrl+D")
            .with_tags(["download", "folder"]);
        let offset = copy_button_offset(&record, geometry.detail_width);
        assert!(offset >= geometry.detail_inner_rows());

        let mut registry = HitRegistry::default();
        rebuild(
            &mut registry,
            &geometry,
            &HitInputs {
                selected: Some(&record),
                ..inputs(1, 0)
            },
        );
        assert!(
            registry
                .boxes()
                .iter()
                .all(|b| b.kind != HitKind::Button(Button::Copy))
        );
        let hidden = geometry.copy_button_rect(offset);
        assert!(
            registry
                .resolve(hidden.x, hidden.y)
                .is_none_or(|b| b.kind != HitKind::Button(Button::Copy))
        );
    }

    #[test]
    fn copy_button_stays_inside_the_detail_panel() {
        let record = Record::new("dl", "Navigate to Downloads folder")
            .with_hotkey("Ctrl+D")
            .with_tags(["download"]);
        for height in 20..=50 {
            let geometry = compute_layout(120, height, 8);
            let Some(detail) = geometry.detail_rect() else {
                continue;
            };
            let mut registry = HitRegistry::default();
            rebuild(
                &mut registry,
                &geometry,
                &HitInputs {
                    selected: Some(&record),
                    ..inputs(1, 0)
                },
            );
            if let Some(copy) = registry
                .boxes()
                .iter()
                .find(|b| b.kind == HitKind::Button(Button::Copy))
            {
                assert!(copy.rect.y > detail.y, "height {height}");
                assert!(
                    copy.rect.y < detail.y + detail.height - 1,
                    "height {height}"
                );
            }
        }
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let geometry = compute_layout(120, 40, 8);
        let mut registry = HitRegistry::default();
        rebuild(&mut registry, &geometry, &inputs(10, 0));
        let first = registry.len();
        rebuild(&mut registry, &geometry, &inputs(10, 0));
        assert_eq!(registry.len(), first);
    }

    #[test]
    fn clicks_resolve_to_tabs_and_help() {
        let geometry = compute_layout(120, 40, 8);
        let mut registry = HitRegistry::default();
        rebuild(&mut registry, &geometry, &inputs(0, 0));
        assert_eq!(registry.resolve(21, 9).unwrap().kind, HitKind::Group(1));
        assert_eq!(
            registry.resolve(112, 38).unwrap().kind,
            HitKind::Button(Button::Help)
        );
        assert_eq!(
            registry.resolve(10, geometry.search_input_rect().y).unwrap().kind,
            HitKind::SearchBar
        );
    }
}
