use super::*;
use crate::raster::font::BlockFont;
use crate::test_support::manual_clock;

const LONG_NAME: &str = "Soldering for all"; // 17 cells of 5 px = 85 px

fn renderer(clock: Arc<ScaledClock>) -> ListRenderer {
    ListRenderer::new(
        ListConfig::default(),
        ListFonts::uniform(Arc::new(BlockFont::default())),
        128,
        64,
        None,
        clock,
        LogHandle::disabled(),
    )
}

fn items(n: usize) -> Vec<ListItem> {
    (0..n)
        .map(|i| ListItem::new(format!("{i}"), format!("ws{i}"), format!("@ room {i}")))
        .collect()
}

#[test]
fn layout_follows_panel_size() {
    let (_src, clock) = manual_clock();
    let list = renderer(clock);
    assert_eq!(list.capacity(), 2);
    assert_eq!(list.name_viewport_width(), 70);
    assert_eq!(list.value_column_width(), 45);
    assert_eq!(list.chevron_column_width(), 10);
}

#[test]
fn set_items_resets_out_of_range_active_index() {
    let (src, clock) = manual_clock();
    let mut list = renderer(clock);
    list.set_items(items(3));
    assert!(list.set_active(2));
    src.advance(2.0);
    list.set_items(items(1));
    assert_eq!(list.active_index(), 0);
    assert_eq!(list.active_since(), 2.0);
    assert!(!list.set_active(1));
    assert_eq!(list.active_index(), 0);
}

#[test]
fn set_items_within_range_keeps_active_row_and_dwell() {
    let (src, clock) = manual_clock();
    let mut list = renderer(clock);
    list.set_items(items(3));
    list.set_active(1);
    src.advance(4.0);
    list.set_items(items(2));
    assert_eq!(list.active_index(), 1);
    assert_eq!(list.active_since(), 0.0);
}

#[test]
fn needs_scroll_compares_against_the_name_column() {
    let (_src, clock) = manual_clock();
    let mut list = renderer(clock);
    list.set_items(vec![
        ListItem::new("1", LONG_NAME, ""),
        ListItem::new("2", "short", ""),
    ]);
    assert!(list.needs_scroll(0));
    assert!(!list.needs_scroll(1));
    assert!(!list.needs_scroll(7));
}

#[test]
fn active_name_scrolls_and_chevron_marks_only_the_active_row() {
    let (src, clock) = manual_clock();
    let mut list = renderer(clock);
    list.set_items(vec![
        ListItem::new("5", LONG_NAME, "@ lab"),
        ListItem::new("9", LONG_NAME, "@ hall"),
    ]);
    list.set_active(0);

    let mut s = Surface::new(128, 64);
    let res = list.render(&mut s);
    assert!(!res.finished);
    // Name starts at x = 20; x = 24 is the gap after the first cell.
    assert_eq!(s.get_pixel(24, 5), Some(Color::BLACK));
    assert_eq!(s.get_pixel(115, 10), Some(Color::RED));
    assert_eq!(s.get_pixel(115, 25), Some(Color::BLACK));

    // After 1 s the name has moved about 7 px left, putting a lit cell on x = 24.
    src.advance(1.0);
    list.render(&mut s);
    assert_eq!(s.get_pixel(24, 5), Some(Color::RED));
    // The inactive row did not move.
    assert_eq!(s.get_pixel(24, 20), Some(Color::BLACK));
}

#[test]
fn footer_shows_active_description_even_past_capacity() {
    let (_src, clock) = manual_clock();
    let mut list = renderer(clock);
    let mut rows = items(3);
    rows[2].description = "@ X".into();
    list.set_items(rows);
    list.set_active(2);

    let mut s = Surface::new(128, 64);
    list.render(&mut s);
    let footer_lit = (49..64)
        .flat_map(|y| (0..128).map(move |x| (x, y)))
        .filter(|&(x, y)| s.get_pixel(x, y) != Some(Color::BLACK))
        .count();
    // "@" and "X" are two 4x7 cells.
    assert_eq!(footer_lit, 2 * 4 * 7);
    assert_eq!(s.get_pixel(115, 10), Some(Color::BLACK));
}

#[test]
fn empty_list_renders_blank() {
    let (_src, clock) = manual_clock();
    let mut list = renderer(clock);
    let mut s = Surface::new(128, 64);
    s.fill_rect(0, 0, 128, 64, Color::RED);
    list.render(&mut s);
    assert_eq!(s.lit_pixel_count(), 0);
}
