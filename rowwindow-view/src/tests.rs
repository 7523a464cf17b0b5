use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use proptest::prelude::*;
use rowwindow::{Align, WindowError};

#[derive(Clone, Debug, PartialEq)]
struct Booking {
    guest: String,
    room: u32,
    total_cents: u64,
}

fn booking(guest: &str, room: u32, total_cents: u64) -> Booking {
    Booking {
        guest: guest.to_string(),
        room,
        total_cents,
    }
}

const OKAFOR_ROWS: [usize; 3] = [17, 512, 900];

/// 1000 bookings; three of them belong to guest "Okafor".
fn bookings() -> Vec<Booking> {
    (0..1000)
        .map(|i| {
            let guest = if OKAFOR_ROWS.contains(&i) {
                String::from("Okafor")
            } else {
                format!("Guest {i:04}")
            };
            Booking {
                guest,
                room: 100 + (i as u32 % 400),
                total_cents: (i as u64 * 7_919) % 100_000,
            }
        })
        .collect()
}

fn columns() -> Vec<Column<Booking>> {
    vec![
        Column::new("guest", |b: &Booking| b.guest.clone()).with_header("Guest"),
        Column::new("room", |b: &Booking| b.room.to_string())
            .with_header("Room")
            .sortable_by_key(|b: &Booking| b.room),
        Column::new("total", |b: &Booking| {
            format!("${}.{:02}", b.total_cents / 100, b.total_cents % 100)
        })
        .with_header("Total")
        .sortable_by_key(|b: &Booking| b.total_cents)
        .with_searchable(false),
    ]
}

fn table() -> TableView<Booking> {
    TableView::new(
        bookings(),
        columns(),
        TableOptions::new()
            .with_row_height(48)
            .with_container_height(480),
    )
    .unwrap()
}

fn assert_window_invariants<T>(t: &TableView<T>) {
    let w = t.window();
    assert!(w.start_index <= w.end_index, "{w:?}");
    assert!(w.end_index <= t.len(), "{w:?} len={}", t.len());
    assert_eq!(w.total_height, t.len() as u64 * 48);
    assert_eq!(w.offset_y, w.start_index as u64 * 48);
}

#[test]
fn search_is_case_insensitive_substring() {
    let rows = bookings();
    let cols = columns();
    let q = QueryState::new().with_search("  oKaF ");
    assert!(q.is_filtering());
    assert_eq!(q.apply(&rows, &cols), OKAFOR_ROWS.to_vec());
}

#[test]
fn blank_search_matches_everything() {
    let rows = bookings();
    let cols = columns();
    let q = QueryState::new().with_search("   ");
    assert!(!q.is_filtering());
    assert_eq!(q.apply(&rows, &cols).len(), rows.len());
}

#[test]
fn unsearchable_columns_are_skipped() {
    let rows = vec![booking("Ada", 101, 12_345), booking("Grace", 102, 500)];
    let cols = columns();
    // "$123.45" only appears in the total column.
    assert!(QueryState::new().with_search("123.45").apply(&rows, &cols).is_empty());
    assert_eq!(QueryState::new().with_search("102").apply(&rows, &cols), vec![1]);
    assert!(matches_search(&rows[0], &cols, "ada"));
    assert!(!matches_search(&rows[0], &cols, "ADA"));
}

#[test]
fn sort_uses_typed_keys_and_is_stable() {
    let rows = vec![
        booking("Cleo", 300, 900),
        booking("Abe", 120, 10_000),
        booking("Bea", 300, 50),
        booking("Dov", 120, 700),
    ];
    let cols = columns();

    // Rendered text would put "$100.00" before "$7.00"; the typed key must not.
    let by_total = QueryState::new().with_sort("total", SortDirection::Ascending);
    assert_eq!(by_total.apply(&rows, &cols), vec![2, 3, 0, 1]);

    // Ties on room keep collection order in both directions.
    let asc = QueryState::new().with_sort("room", SortDirection::Ascending);
    assert_eq!(asc.apply(&rows, &cols), vec![1, 3, 0, 2]);
    let desc = QueryState::new().with_sort("room", SortDirection::Descending);
    assert_eq!(desc.apply(&rows, &cols), vec![0, 2, 1, 3]);

    // Columns without a comparator sort by rendered text.
    let by_guest = QueryState::new().with_sort("guest", SortDirection::Descending);
    assert_eq!(by_guest.apply(&rows, &cols), vec![3, 0, 2, 1]);
}

#[test]
fn toggle_sort_flips_the_active_column() {
    let mut q = QueryState::new();
    q.toggle_sort("room");
    assert_eq!(q.sort, Some(SortState::new("room", SortDirection::Ascending)));
    q.toggle_sort("room");
    assert_eq!(q.sort, Some(SortState::new("room", SortDirection::Descending)));
    q.toggle_sort("guest");
    assert_eq!(q.sort, Some(SortState::new("guest", SortDirection::Ascending)));
    assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
}

#[test]
fn unknown_sort_key_keeps_collection_order() {
    let rows = vec![booking("b", 2, 0), booking("a", 1, 0)];
    let q = QueryState::new().with_sort("nights", SortDirection::Descending);
    assert_eq!(q.apply(&rows, &columns()), vec![0, 1]);
}

#[test]
fn debouncer_restarts_on_each_start() {
    let mut d = Debouncer::new(300);
    assert!(!d.is_pending());
    assert!(d.start(1, 0));
    assert_eq!(d.deadline(), Some(300));
    assert!(d.start(2, 250));
    assert_eq!(d.deadline(), Some(550));
    assert_eq!(d.pending_value(), Some(&2));
    assert_eq!(d.poll(549), None);
    assert_eq!(d.poll(550), Some(2));
    assert_eq!(d.poll(10_000), None);
}

#[test]
fn debouncer_cancel_flush_and_dispose() {
    let mut d = Debouncer::<&str>::default();
    assert_eq!(d.delay_ms(), DEFAULT_SEARCH_DEBOUNCE_MS);

    d.start("a", 0);
    assert_eq!(d.cancel(), Some("a"));
    assert!(!d.is_pending());
    assert_eq!(d.cancel(), None);

    d.start("b", 0);
    assert_eq!(d.flush(), Some("b"));
    assert_eq!(d.flush(), None);

    d.set_delay_ms(50);
    d.start("c", 10);
    assert_eq!(d.deadline(), Some(60));
    d.dispose();
    assert!(d.is_disposed());
    assert!(!d.is_pending());
    assert!(!d.start("d", 100));
    assert_eq!(d.poll(u64::MAX), None);
}

#[test]
fn search_phase_follows_debounce() {
    let mut t = table();
    assert_eq!(t.phase(), SearchPhase::Idle);

    t.on_search_input("oka", 1_000);
    assert_eq!(t.phase(), SearchPhase::PendingSearch);
    assert_eq!(t.len(), 1000);

    // a second keystroke restarts the quiet period
    t.on_search_input("okafor", 1_200);
    assert!(!t.tick(1_300));
    assert_eq!(t.phase(), SearchPhase::PendingSearch);
    assert!(!t.tick(1_499));

    assert!(t.tick(1_500));
    assert_eq!(t.phase(), SearchPhase::Idle);
    assert_eq!(t.query().search_term, "okafor");
    assert_eq!(t.view_indexes(), &OKAFOR_ROWS);
}

#[test]
fn repeated_term_does_not_refresh() {
    let mut t = table();
    t.search_now("okafor");
    t.on_search_input("okafor", 0);
    assert!(!t.tick(1_000));
    assert_eq!(t.phase(), SearchPhase::Idle);
}

#[test]
fn search_terms_differing_only_in_case_or_padding_do_not_refresh() {
    let mut t = table();
    t.search_now("guest");
    t.on_scroll(10_000);

    t.on_search_input("GUEST ", 0);
    assert!(!t.tick(300));
    assert_eq!(t.query().search_term, "GUEST ");
    assert_eq!(t.query().needle(), "guest");
    assert_eq!(t.scroll_top(), 10_000);
    assert_eq!(t.len(), 997);

    t.on_search_input(" Guest 009", 400);
    assert!(t.tick(700));
    assert_eq!(t.len(), 10);
}

#[test]
fn text_sort_renders_each_row_once() {
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);
    let cols = vec![Column::new("guest", move |b: &Booking| {
        counter.fetch_add(1, AtomicOrdering::SeqCst);
        b.guest.clone()
    })];
    assert!(!cols[0].has_comparator());

    let rows: Vec<Booking> = (0..200)
        .map(|i| booking(&format!("Guest {:03}", (i * 37) % 200), i, 0))
        .collect();
    let q = QueryState::new().with_sort("guest", SortDirection::Descending);
    let order = q.apply(&rows, &cols);

    assert_eq!(renders.load(AtomicOrdering::SeqCst), rows.len());
    let names: Vec<&str> = order.iter().map(|&i| rows[i].guest.as_str()).collect();
    assert!(names.windows(2).all(|w| w[0] >= w[1]), "{names:?}");
}

#[test]
fn commit_search_applies_pending_input() {
    let mut t = table();
    assert!(!t.commit_search());
    t.on_search_input("Guest 000", 0);
    assert!(t.commit_search());
    assert_eq!(t.phase(), SearchPhase::Idle);
    assert_eq!(t.len(), 10);
}

#[test]
fn scrolling_is_not_debounced() {
    let mut t = table();
    t.on_search_input("okafor", 0);
    t.on_scroll(4_800);
    assert_eq!(t.scroll_top(), 4_800);
    assert_eq!(t.window().range(), 95..115);
    assert_eq!(t.phase(), SearchPhase::PendingSearch);
}

#[test]
fn filtering_mid_scroll_clamps_the_viewport() {
    let mut t = table();
    t.on_scroll(30_000);
    assert_eq!(t.window().range(), 620..640);
    assert_window_invariants(&t);

    t.search_now("okafor");
    assert_eq!(t.len(), 3);
    assert_eq!(t.scroll_top(), 0);
    assert_window_invariants(&t);
    assert_eq!(t.window().range(), 0..3);
    assert_eq!(t.spacer_height(), 144);

    let rows: Vec<_> = t.visible_rows().map(|r| (r.index, r.source_index, r.top)).collect();
    assert_eq!(rows, vec![(0, 17, 0), (1, 512, 48), (2, 900, 96)]);

    // clearing the search brings the full list back at the top
    t.search_now("");
    assert_eq!(t.len(), 1000);
    assert_eq!(t.window().range(), 0..15);
}

#[test]
fn a_stale_scroll_event_after_filtering_is_harmless() {
    let mut t = table();
    t.search_now("okafor");
    // the host may still deliver the scroll position it had before the filter applied
    t.on_scroll(30_000);
    assert_window_invariants(&t);
    assert!(t.window().is_empty());
    assert_eq!(t.visible_rows().count(), 0);
}

#[test]
fn sorting_reorders_the_view() {
    let mut t = table();
    t.search_now("okafor");
    t.sort_by("total", SortDirection::Descending);
    let totals: Vec<u64> = t.render(|b, _| b.total_cents);
    assert!(totals.windows(2).all(|w| w[0] >= w[1]), "{totals:?}");

    t.toggle_sort("total");
    let totals: Vec<u64> = t.render(|b, _| b.total_cents);
    assert!(totals.windows(2).all(|w| w[0] <= w[1]), "{totals:?}");

    t.clear_sort();
    assert_eq!(t.view_indexes(), &OKAFOR_ROWS);
    assert_eq!(t.query().sort, None);
}

#[test]
fn render_and_cells_follow_the_window() {
    let rows = vec![
        booking("Ada", 101, 12_345),
        booking("Grace", 102, 500),
        booking("Linus", 103, 0),
        booking("Barbara", 104, 99),
    ];
    let mut t = TableView::new(
        rows,
        columns(),
        TableOptions::new()
            .with_row_height(40)
            .with_container_height(80)
            .with_overscan(0),
    )
    .unwrap();

    t.on_scroll(40);
    assert_eq!(t.offset_y(), 40);
    assert_eq!(
        t.render(|b, i| format!("{i}:{}", b.guest)),
        vec!["1:Grace", "2:Linus"]
    );
    assert_eq!(
        t.visible_cells(),
        vec![
            vec!["Grace".to_string(), "102".to_string(), "$5.00".to_string()],
            vec!["Linus".to_string(), "103".to_string(), "$0.00".to_string()],
        ]
    );
    assert_eq!(t.columns()[2].header(), "Total");
}

#[test]
fn set_rows_reapplies_the_query_and_clamps() {
    let mut t = table();
    t.search_now("guest");
    t.on_scroll(40_000);
    assert_window_invariants(&t);

    t.set_rows(vec![booking("Guest A", 1, 0), booking("Walk-in", 2, 0)]);
    assert_eq!(t.rows().len(), 2);
    assert_eq!(t.view_indexes(), &[0]);
    assert_eq!(t.scroll_top(), 0);
    assert_window_invariants(&t);
}

#[test]
fn viewport_pixels_are_validated() {
    let mut t = table();
    t.on_viewport_pixels(960.6, 479.2).unwrap();
    assert_eq!(t.scroll_top(), 960);
    assert_eq!(t.windower().container_height(), 480);

    assert!(matches!(
        t.on_viewport_pixels(-1.0, 480.0),
        Err(WindowError::InvalidScrollTop(_))
    ));
    assert!(matches!(
        t.on_viewport_pixels(f64::NAN, 480.0),
        Err(WindowError::InvalidScrollTop(_))
    ));
    // rejected input leaves the viewport alone
    assert_eq!(t.scroll_top(), 960);

    t.on_viewport_pixels(0.0, f64::NAN).unwrap();
    assert_eq!(t.windower().container_height(), 0);
    assert_eq!(t.window().range(), 0..5);

    t.on_resize(240);
    assert_eq!(t.window().range(), 0..10);
}

#[test]
fn zero_row_height_is_rejected() {
    let err = TableView::new(bookings(), columns(), TableOptions::new().with_row_height(0))
        .unwrap_err();
    assert_eq!(err, WindowError::ZeroItemHeight);
}

#[test]
fn scroll_to_row_brings_a_row_into_view() {
    let mut t = table();
    assert_eq!(t.scroll_to_row(100, Align::Start), 4_800);
    assert_eq!(t.scroll_to_row(100, Align::Auto), 4_800);
    assert_eq!(t.scroll_to_row(999, Align::End), 47_520);
    assert_eq!(t.window().end_index, 1000);
}

#[test]
fn dispose_cancels_the_pending_search() {
    let mut t = table();
    t.on_search_input("okafor", 0);
    t.dispose();
    assert_eq!(t.phase(), SearchPhase::Idle);
    assert!(!t.tick(10_000));
    t.on_search_input("guest", 10_000);
    assert_eq!(t.phase(), SearchPhase::Idle);
    assert_eq!(t.len(), 1000);
}

#[test]
fn toasts_evict_oldest_first() {
    let mut q = ToastQueue::new(ToastConfig::new().with_capacity(3));
    let ids: Vec<ToastId> = (0..3)
        .map(|i| q.push(ToastKind::Info, format!("toast {i}"), i).id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let out = q.push(ToastKind::Success, "Payment captured", 10);
    assert_eq!(out.evicted, Some(ids[0]));
    assert_eq!(q.len(), 3);
    let order: Vec<ToastId> = q.iter().map(|t| t.id).collect();
    assert_eq!(order, vec![ids[1], ids[2], out.id]);
    assert_eq!(q.stats().evicted, 1);
    assert_eq!(q.stats().pushed, 4);
}

#[test]
fn toasts_expire_on_tick() {
    let mut q = ToastQueue::new(ToastConfig::new().with_default_duration_ms(1_000));
    let info = q.push(ToastKind::Info, "Room 204 checked in", 0).id;
    let error = q.push(ToastKind::Error, "Card declined", 0).id;
    let custom = q
        .push_toast(Toast::new(ToastKind::Warning, "Overbooked").duration_ms(300), 0)
        .id;
    let sticky = q
        .push_toast(
            Toast::new(ToastKind::Info, "Night audit running")
                .title("Audit")
                .sticky(),
            0,
        )
        .id;

    assert_eq!(q.get(error).and_then(|t| t.expires_at_ms), Some(2_000));
    assert_eq!(q.get(sticky).and_then(|t| t.expires_at_ms), None);
    assert_eq!(q.get(sticky).and_then(|t| t.toast.title.as_deref()), Some("Audit"));

    assert!(q.tick(299).is_empty());
    assert_eq!(q.tick(300), vec![custom]);
    assert_eq!(q.tick(1_000), vec![info]);
    assert!(q.tick(1_999).is_empty());
    assert_eq!(q.tick(2_000), vec![error]);
    assert!(q.tick(u64::MAX).is_empty());
    assert_eq!(q.iter().map(|t| t.id).collect::<Vec<_>>(), vec![sticky]);
    assert_eq!(q.stats().expired, 3);
}

#[test]
fn toasts_can_be_dismissed_and_cleared() {
    let mut q = ToastQueue::default();
    let a = q.push(ToastKind::Info, "a", 0).id;
    let b = q.push(ToastKind::Info, "b", 0).id;
    let c = q.push(ToastKind::Info, "c", 0).id;

    assert!(q.dismiss(b));
    assert!(!q.dismiss(b));
    assert!(q.get(b).is_none());
    assert_eq!(q.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a, c]);

    q.clear();
    assert!(q.is_empty());
    assert_eq!(q.stats().dismissed, 3);
}

#[test]
fn zero_toast_capacity_holds_one() {
    let mut q = ToastQueue::new(ToastConfig::new().with_capacity(0));
    assert_eq!(q.capacity(), 1);
    let first = q.push(ToastKind::Info, "first", 0).id;
    let out = q.push(ToastKind::Info, "second", 0);
    assert_eq!(out.evicted, Some(first));
    assert_eq!(q.len(), 1);
    assert_eq!(ToastQueue::default().capacity(), DEFAULT_TOAST_CAPACITY);
}

#[cfg(feature = "serde")]
#[test]
fn options_load_from_partial_config() {
    let opts: TableOptions = serde_json::from_str(r#"{ "row_height": 32 }"#).unwrap();
    assert_eq!(opts.row_height, 32);
    assert_eq!(opts.container_height, 0);
    assert_eq!(opts.search_debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS);
    assert_eq!(opts.window.overscan, rowwindow::DEFAULT_OVERSCAN);

    let cfg: ToastConfig = serde_json::from_str(r#"{ "capacity": 2 }"#).unwrap();
    assert_eq!(cfg.default_duration_ms, DEFAULT_TOAST_DURATION_MS);

    let q: QueryState =
        serde_json::from_str(r#"{ "sort": { "key": "room", "direction": "Descending" } }"#)
            .unwrap();
    assert_eq!(q.search_term, "");
    assert_eq!(q.sort, Some(SortState::new("room", SortDirection::Descending)));
}

proptest! {
    #[test]
    fn filtered_views_keep_window_invariants(
        term in "[a-z0-9 ]{0,4}",
        before in 0u64..60_000,
        after in 0u64..60_000,
        container in 0u32..1_000,
    ) {
        let mut t = table();
        t.on_resize(container);
        t.on_scroll(before);
        t.search_now(term.clone());

        let w = t.window();
        prop_assert!(w.start_index <= w.end_index && w.end_index <= t.len());
        prop_assert_eq!(w.total_height, t.len() as u64 * 48);
        // an unchanged (empty) term does not refresh, so only a real filter clamps
        if !term.is_empty() {
            prop_assert!(t.scroll_top() <= t.windower().max_scroll_top());
        }

        t.on_scroll(after);
        let w = t.window();
        prop_assert!(w.start_index <= w.end_index && w.end_index <= t.len());

        let needle = normalize_search(&term);
        let cols = columns();
        for row in t.visible_rows() {
            prop_assert!(matches_search(row.item, &cols, &needle));
            prop_assert_eq!(row.top, row.index as u64 * 48);
        }
    }
}
