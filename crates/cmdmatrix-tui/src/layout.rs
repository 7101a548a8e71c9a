use ratatui::layout::Rect;

pub const HEADER_HEIGHT: u16 = 8;
pub const SEARCH_HEIGHT: u16 = 5;
pub const STATUS_HEIGHT: u16 = 2;
pub const MARGIN: u16 = 2;
/// Columns between the list and detail panels.
pub const GUTTER: u16 = 2;

pub const COPY_BUTTON_WIDTH: u16 = 24;
pub const HELP_BUTTON_WIDTH: u16 = 8;
pub const ACTION_BUTTON_WIDTH: u16 = 10;

/// Responsive width classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Breakpoint {
    #[default]
    Small,
    Medium,
    Wide,
}

impl Breakpoint {
    pub fn for_width(width: u16) -> Self {
        match width {
            0..100 => Self::Small,
            100..140 => Self::Medium,
            _ => Self::Wide,
        }
    }

    pub fn tabs_per_row(self) -> u16 {
        match self {
            Self::Small => 4,
            Self::Medium => 6,
            Self::Wide => 8,
        }
    }

    pub fn padding(self) -> u16 {
        match self {
            Self::Small => 1,
            Self::Medium | Self::Wide => 2,
        }
    }
}

/// Panel sizes for one terminal size and group count.
///
/// All values are non-negative cell counts; every helper returns frame
/// coordinates. Rectangles may extend past the terminal on tiny sizes, the
/// renderer clips them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub breakpoint: Breakpoint,
    pub padding: u16,
    pub tabs_per_row: u16,
    pub tab_width: u16,
    pub header_height: u16,
    pub tabs_height: u16,
    pub search_height: u16,
    pub content_height: u16,
    pub status_height: u16,
    pub content_width: u16,
    pub list_width: u16,
    /// Zero on the small breakpoint, where no detail panel exists.
    pub detail_width: u16,
}

/// Compute the panel geometry. Pure and total over all inputs.
pub fn compute_layout(width: u16, height: u16, group_count: usize) -> Geometry {
    let breakpoint = Breakpoint::for_width(width);
    let per_row = breakpoint.tabs_per_row();
    let padding = breakpoint.padding();

    let w = i64::from(width);
    let h = i64::from(height);

    let tab_width = ((w - i64::from(per_row)) / i64::from(per_row)).max(2);
    let tab_rows = group_count.div_ceil(usize::from(per_row));
    let tabs_height = clamp_cells(i64::try_from(tab_rows).unwrap_or(i64::MAX).saturating_add(1));

    let content_height = (h
        - i64::from(HEADER_HEIGHT)
        - i64::from(tabs_height)
        - i64::from(SEARCH_HEIGHT)
        - i64::from(STATUS_HEIGHT)
        - i64::from(MARGIN))
    .max(1);

    let content_width = (w - 2 * i64::from(padding) - 2).max(1);
    let (list_width, detail_width) = if breakpoint == Breakpoint::Small {
        (content_width, 0)
    } else {
        let list = (content_width * 45 / 100).max(1);
        let detail = (content_width - list - i64::from(GUTTER)).max(0);
        (list, detail)
    };

    Geometry {
        width,
        height,
        breakpoint,
        padding,
        tabs_per_row: per_row,
        tab_width: clamp_cells(tab_width),
        header_height: HEADER_HEIGHT,
        tabs_height,
        search_height: SEARCH_HEIGHT,
        content_height: clamp_cells(content_height),
        status_height: STATUS_HEIGHT,
        content_width: clamp_cells(content_width),
        list_width: clamp_cells(list_width),
        detail_width: clamp_cells(detail_width),
    }
}

fn clamp_cells(value: i64) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

impl Geometry {
    pub fn has_detail(&self) -> bool {
        self.detail_width > 0
    }

    /// Rows of the list panel that hold records. The last inner row of the
    /// panel is the position footer.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.content_height.saturating_sub(3)).max(1)
    }

    pub fn header_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.header_height)
    }

    pub fn tabs_rect(&self) -> Rect {
        Rect::new(0, self.header_height, self.width, self.tabs_height)
    }

    /// Clickable cell strip of tab `index`.
    pub fn tab_rect(&self, index: usize) -> Rect {
        let per_row = usize::from(self.tabs_per_row.max(1));
        let col = cell(index % per_row);
        let row = cell(index / per_row);
        let step = self.tab_width.saturating_sub(1);
        Rect::new(
            self.padding.saturating_add(col.saturating_mul(step)),
            self.header_height.saturating_add(row).saturating_add(1),
            step,
            1,
        )
    }

    /// The bordered search input box.
    pub fn search_rect(&self) -> Rect {
        Rect::new(
            self.padding,
            self.header_height.saturating_add(self.tabs_height),
            self.inner_width(),
            3,
        )
    }

    /// The input line inside the search box.
    pub fn search_input_rect(&self) -> Rect {
        let outer = self.search_rect();
        Rect::new(outer.x, outer.y.saturating_add(1), outer.width, 1)
    }

    /// Counter line below the search box.
    pub fn search_hint_rect(&self) -> Rect {
        let outer = self.search_rect();
        Rect::new(outer.x, outer.y.saturating_add(3), outer.width, 1)
    }

    pub fn content_top(&self) -> u16 {
        self.header_height
            .saturating_add(self.tabs_height)
            .saturating_add(self.search_height)
    }

    /// First record row inside the list panel border.
    pub fn list_start_y(&self) -> u16 {
        self.content_top().saturating_add(1)
    }

    pub fn list_rect(&self) -> Rect {
        Rect::new(
            self.padding,
            self.content_top(),
            self.list_width,
            self.content_height,
        )
    }

    /// Clickable strip of visible list row `slot` (0 is the top visible row).
    pub fn list_row_rect(&self, slot: usize) -> Rect {
        Rect::new(
            self.padding,
            self.list_start_y().saturating_add(cell(slot)),
            self.list_width.saturating_sub(1),
            1,
        )
    }

    pub fn detail_rect(&self) -> Option<Rect> {
        self.has_detail().then(|| {
            Rect::new(
                self.padding
                    .saturating_add(self.list_width)
                    .saturating_add(GUTTER),
                self.content_top(),
                self.detail_width,
                self.content_height,
            )
        })
    }

    /// Rows inside the detail panel's border.
    pub fn detail_inner_rows(&self) -> usize {
        usize::from(self.content_height.saturating_sub(2))
    }

    /// Copy button placed `line_budget` lines below the detail panel's first
    /// inner row.
    pub fn copy_button_rect(&self, line_budget: usize) -> Rect {
        Rect::new(
            self.padding
                .saturating_add(self.list_width)
                .saturating_add(4),
            self.list_start_y().saturating_add(cell(line_budget)),
            COPY_BUTTON_WIDTH,
            1,
        )
    }

    pub fn status_rect(&self) -> Rect {
        Rect::new(
            0,
            self.height.saturating_sub(self.status_height),
            self.width,
            self.status_height,
        )
    }

    pub fn help_button_rect(&self) -> Rect {
        Rect::new(
            self.width.saturating_sub(10),
            self.height.saturating_sub(2),
            HELP_BUTTON_WIDTH,
            1,
        )
    }

    pub fn refresh_button_rect(&self) -> Rect {
        Rect::new(
            self.width.saturating_sub(32),
            self.height.saturating_sub(2),
            ACTION_BUTTON_WIDTH,
            1,
        )
    }

    pub fn export_button_rect(&self) -> Rect {
        Rect::new(
            self.width.saturating_sub(21),
            self.height.saturating_sub(2),
            ACTION_BUTTON_WIDTH,
            1,
        )
    }

    fn inner_width(&self) -> u16 {
        self.width.saturating_sub(self.padding.saturating_mul(2))
    }
}

fn cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Breakpoints ---

    #[test]
    fn breakpoint_boundaries() {
        assert_eq!(Breakpoint::for_width(99), Breakpoint::Small);
        assert_eq!(Breakpoint::for_width(100), Breakpoint::Medium);
        assert_eq!(Breakpoint::for_width(139), Breakpoint::Medium);
        assert_eq!(Breakpoint::for_width(140), Breakpoint::Wide);
    }

    #[test]
    fn small_has_no_detail_panel() {
        let g = compute_layout(80, 30, 8);
        assert_eq!(g.padding, 1);
        assert_eq!(g.tabs_per_row, 4);
        assert_eq!(g.detail_width, 0);
        assert_eq!(g.list_width, g.content_width);
        assert!(g.detail_rect().is_none());
    }

    // --- Sizes ---

    #[test]
    fn medium_scenario_120_by_40() {
        let g = compute_layout(120, 40, 8);
        assert_eq!(g.tabs_per_row, 6);
        assert_eq!(g.padding, 2);
        assert_eq!(g.tab_width, 19);
        assert_eq!(g.tabs_height, 3);
        assert_eq!(g.content_width, 114);
        assert_eq!(g.list_width, 51);
        assert_eq!(g.detail_width, 61);
        assert_eq!(g.list_width + g.detail_width + GUTTER, g.content_width);
        assert_eq!(g.content_height, 40 - 8 - 3 - 5 - 2 - 2);
        assert_eq!(g.visible_rows(), 17);
    }

    #[test]
    fn wide_packs_eight_tabs_per_row() {
        let g = compute_layout(160, 50, 9);
        assert_eq!(g.tabs_per_row, 8);
        assert_eq!(g.tabs_height, 3);
    }

    #[test]
    fn tiny_terminal_floors_content() {
        let g = compute_layout(3, 2, 20);
        assert_eq!(g.content_height, 1);
        assert!(g.content_width >= 1);
        assert!(g.list_width >= 1);
        assert_eq!(g.visible_rows(), 1);
    }

    #[test]
    fn zero_groups_keeps_border_row() {
        let g = compute_layout(120, 40, 0);
        assert_eq!(g.tabs_height, 1);
    }

    // --- Rectangles ---

    #[test]
    fn tab_rects_follow_grid() {
        let g = compute_layout(120, 40, 8);
        assert_eq!(g.tab_rect(0), Rect::new(2, 9, 18, 1));
        assert_eq!(g.tab_rect(1), Rect::new(20, 9, 18, 1));
        assert_eq!(g.tab_rect(6), Rect::new(2, 10, 18, 1));
    }

    #[test]
    fn rows_start_below_list_border() {
        let g = compute_layout(120, 40, 8);
        assert_eq!(g.list_start_y(), 8 + 3 + 5 + 1);
        assert_eq!(g.list_row_rect(2), Rect::new(2, 19, 50, 1));
    }

    #[test]
    fn copy_button_sits_inside_detail_panel() {
        let g = compute_layout(120, 40, 8);
        let detail = g.detail_rect().unwrap();
        let button = g.copy_button_rect(7);
        assert_eq!(button.x, detail.x + 2);
        assert_eq!(button.y, g.list_start_y() + 7);
    }

    #[test]
    fn status_buttons_share_help_row() {
        let g = compute_layout(120, 40, 8);
        assert_eq!(g.help_button_rect(), Rect::new(110, 38, 8, 1));
        assert_eq!(g.refresh_button_rect(), Rect::new(88, 38, 10, 1));
        assert_eq!(g.export_button_rect(), Rect::new(99, 38, 10, 1));
    }
}
