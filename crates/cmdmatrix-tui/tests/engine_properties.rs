//! Property tests for the pure engine pieces: filtering, layout, hit
//! resolution and selection/scroll bookkeeping.

use std::collections::HashSet;
use std::time::Instant;

use cmdmatrix::{Catalogue, Group, Record};
use cmdmatrix_tui::app::App;
use cmdmatrix_tui::config::EngineConfig;
use cmdmatrix_tui::filter::{filter, filter_indices};
use cmdmatrix_tui::hitbox::{HitKind, HitRegistry};
use cmdmatrix_tui::input::InputEvent;
use cmdmatrix_tui::layout::{Breakpoint, GUTTER, compute_layout};
use proptest::prelude::*;
use ratatui::layout::Rect;

// --- Helpers ---

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        "[a-z]{1,6}",
        "[a-zA-Z ]{0,20}",
        prop::collection::vec("[a-z]{1,5}", 0..3),
    )
        .prop_map(|(id, description, tags)| Record::new(id, description).with_tags(tags))
}

/// Records with unique ids, as a loaded group guarantees.
fn unique_records(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..max).prop_map(|records| {
        let mut seen = HashSet::new();
        records
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect()
    })
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    unique_records(30)
}

fn catalogue_strategy() -> impl Strategy<Value = Catalogue> {
    prop::collection::vec(unique_records(40), 1..5).prop_map(
        |groups| {
            Catalogue::new(
                groups
                    .into_iter()
                    .enumerate()
                    .map(|(i, records)| {
                        Group::new(format!("g{i}"), format!("Group {i}"), "#00FFFF")
                            .with_records(records)
                    })
                    .collect(),
            )
        },
    )
}

fn input_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        Just(InputEvent::MoveUp),
        Just(InputEvent::MoveDown),
        Just(InputEvent::PageUp),
        Just(InputEvent::PageDown),
        Just(InputEvent::Top),
        Just(InputEvent::Bottom),
        Just(InputEvent::NextGroup),
        Just(InputEvent::PrevGroup),
        (0usize..9).prop_map(InputEvent::JumpGroup),
        Just(InputEvent::OpenSearch),
        Just(InputEvent::CloseSearch),
        prop::char::range('a', 'e').prop_map(InputEvent::QueryInput),
        Just(InputEvent::QueryBackspace),
        Just(InputEvent::ClearQuery),
    ]
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..50, 0u16..50, 0u16..20, 0u16..5).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

// --- Filter ---

proptest! {
    #[test]
    fn empty_query_is_identity(records in records_strategy()) {
        let all: Vec<usize> = (0..records.len()).collect();
        prop_assert_eq!(filter_indices(&records, ""), all.clone());
        prop_assert_eq!(filter_indices(&records, "   "), all);
    }

    #[test]
    fn filter_never_duplicates_ids(records in records_strategy(), query in "[a-z]{0,3}") {
        let result = filter(&records, &query);
        let mut seen = HashSet::new();
        for record in &result {
            prop_assert!(seen.insert(record.id.as_str()), "duplicate id {}", record.id);
        }
    }

    #[test]
    fn filter_is_idempotent(records in records_strategy(), query in "[a-z]{0,3}") {
        let once: Vec<Record> = filter(&records, &query).into_iter().cloned().collect();
        let twice: Vec<Record> = filter(&once, &query).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn longer_query_narrows(records in records_strategy(), base in "[a-z]{0,2}", extra in "[a-z]") {
        let wide: HashSet<String> = filter(&records, &base).into_iter().map(|r| r.id.clone()).collect();
        let narrow = filter(&records, &format!("{base}{extra}"));
        for record in narrow {
            prop_assert!(wide.contains(&record.id));
        }
    }

    #[test]
    fn filter_ignores_case(records in records_strategy(), query in "[a-z]{0,3}") {
        prop_assert_eq!(
            filter_indices(&records, &query),
            filter_indices(&records, &query.to_uppercase())
        );
    }
}

// --- Layout ---

proptest! {
    #[test]
    fn layout_is_total(width in any::<u16>(), height in any::<u16>(), groups in 0usize..100) {
        let g = compute_layout(width, height, groups);
        prop_assert!(g.content_height >= 1);
        prop_assert!(g.content_width >= 1);
        prop_assert!(g.list_width >= 1);
        prop_assert!(g.tab_width >= 2);
        prop_assert!(g.visible_rows() >= 1);
    }

    #[test]
    fn panels_fill_content_width(width in 100u16..1000, height in 20u16..200, groups in 0usize..20) {
        let g = compute_layout(width, height, groups);
        prop_assert!(g.breakpoint != Breakpoint::Small);
        prop_assert_eq!(g.list_width + g.detail_width + GUTTER, g.content_width);
    }

    #[test]
    fn small_breakpoint_has_single_panel(width in 0u16..100, height in any::<u16>()) {
        let g = compute_layout(width, height, 8);
        prop_assert_eq!(g.detail_width, 0);
        prop_assert_eq!(g.list_width, g.content_width);
    }

    #[test]
    fn tab_rows_cover_groups(width in 50u16..400, groups in 0usize..40) {
        let g = compute_layout(width, 40, groups);
        let per_row = usize::from(g.tabs_per_row);
        prop_assert_eq!(usize::from(g.tabs_height), groups.div_ceil(per_row) + 1);
    }
}

// --- Hit resolution ---

proptest! {
    #[test]
    fn first_registered_box_wins(
        rects in prop::collection::vec(rect_strategy(), 1..10),
        x in 0u16..70,
        y in 0u16..55,
    ) {
        let mut registry = HitRegistry::default();
        for (i, rect) in rects.iter().enumerate() {
            registry.push(*rect, HitKind::Row(i));
        }

        let expected = rects.iter().position(|r| {
            x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
        });
        let resolved = registry.resolve(x, y).map(|hit| hit.kind);
        prop_assert_eq!(resolved, expected.map(HitKind::Row));
    }
}

// --- Selection and scrolling ---

proptest! {
    #[test]
    fn selection_stays_visible_and_in_bounds(
        catalogue in catalogue_strategy(),
        inputs in prop::collection::vec(input_strategy(), 0..60),
        height in 15u16..60,
    ) {
        let mut app = App::new(catalogue, EngineConfig::catalogue());
        app.resize(120, height);
        let now = Instant::now();

        for input in inputs {
            app.handle_input(input, now);

            let len = app.filtered.len();
            let rows = app.visible_rows();
            prop_assert!(app.active_group < app.catalogue.groups.len());
            if len == 0 {
                prop_assert_eq!(app.selected, 0);
                prop_assert_eq!(app.scroll_offset, 0);
            } else {
                prop_assert!(app.selected < len);
                prop_assert!(app.scroll_offset <= app.selected);
                prop_assert!(app.selected < app.scroll_offset + rows);
            }
            prop_assert!(app.scroll_offset <= len.saturating_sub(rows));
        }
    }

    #[test]
    fn wheel_never_overscrolls(
        catalogue in catalogue_strategy(),
        wheel in prop::collection::vec(any::<bool>(), 0..80),
    ) {
        let mut app = App::new(catalogue, EngineConfig::catalogue());
        app.resize(120, 30);
        let now = Instant::now();
        for down in wheel {
            let input = if down { InputEvent::ScrollDown } else { InputEvent::ScrollUp };
            app.handle_input(input, now);
            prop_assert!(app.scroll_offset <= app.filtered.len().saturating_sub(app.visible_rows()));
        }
    }
}
