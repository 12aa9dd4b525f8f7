use super::*;
use crate::core::actions::Action;
use crate::core::DropIntent;
use crate::ui::GalleryPanel;
use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use std::fs;
use tempfile::TempDir;

fn scan_dir_with(names: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for name in names {
        fs::write(temp.path().join(name), b"not really an image").unwrap();
    }
    temp
}

fn make_test_app(names: &[&str]) -> (TempDir, App) {
    let temp = scan_dir_with(names);
    let mut app = App::new_for_test(temp.path());
    app.layout.update(Rect::new(0, 0, 100, 30));
    (temp, app)
}

fn names(items: &[String]) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}

/// 왼쪽(Source) 패널 항목 행의 y 좌표 (테두리 + 헤더 2줄 다음)
fn item_row(index: usize) -> u16 {
    4 + index as u16
}

fn press(app: &mut App, column: u16, row: u16) {
    app.handle_mouse(MouseEventKind::Down(MouseButton::Left), column, row);
}

fn drag_to(app: &mut App, column: u16, row: u16) {
    app.handle_mouse(MouseEventKind::Drag(MouseButton::Left), column, row);
}

fn release(app: &mut App, column: u16, row: u16) {
    app.handle_mouse(MouseEventKind::Up(MouseButton::Left), column, row);
}

// === 열거 ===

#[test]
fn test_source_is_populated_on_appear() {
    let (_temp, app) = make_test_app(&["b.jpg", "a.jpg", ".hidden", "Select"]);

    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg", "b.jpg"]);
    assert!(app.items(ListId::Destination).is_empty());
    assert_eq!(app.active_list(), ListId::Source);
}

#[test]
fn test_missing_scan_dir_gives_empty_source() {
    let temp = TempDir::new().unwrap();
    let app = App::new_for_test(&temp.path().join("does-not-exist"));

    assert!(app.items(ListId::Source).is_empty());
    assert!(!app.should_quit());
}

#[cfg(unix)]
#[test]
fn test_unreadable_scan_dir_gives_empty_source() {
    use std::os::unix::fs::PermissionsExt;

    let temp = scan_dir_with(&["a.jpg"]);
    fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o000)).unwrap();
    let readable_anyway = fs::read_dir(temp.path()).is_ok();

    let app = App::new_for_test(temp.path());
    fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o755)).unwrap();

    // root 권한이면 권한 제한이 무시됨
    if !readable_anyway {
        assert!(app.items(ListId::Source).is_empty());
    }
}

#[test]
fn test_refresh_replaces_source_and_keeps_destination() {
    let (temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::Drop);
    assert_eq!(names(app.items(ListId::Destination)), vec!["a.jpg"]);

    fs::remove_file(temp.path().join("a.jpg")).unwrap();
    fs::write(temp.path().join("c.jpg"), b"").unwrap();
    app.execute_action(Action::Refresh);

    assert_eq!(names(app.items(ListId::Source)), vec!["b.jpg", "c.jpg"]);
    assert_eq!(names(app.items(ListId::Destination)), vec!["a.jpg"]);
    assert_eq!(app.toast_display(), Some("Rescanned: 2 images"));
}

// === 키보드 드래그 ===

#[test]
fn test_keyboard_reorder_first_to_last() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);

    app.execute_action(Action::BeginDrag);
    assert!(app.is_dragging());
    app.execute_action(Action::MoveDown);
    app.execute_action(Action::MoveDown);
    app.execute_action(Action::Drop);

    assert!(!app.is_dragging());
    assert_eq!(
        names(app.items(ListId::Source)),
        vec!["b.jpg", "c.jpg", "a.jpg"]
    );
    assert_eq!(app.pane(ListId::Source).selected_index, 2);
}

#[test]
fn test_keyboard_copy_marked_items_into_empty_destination() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);

    app.execute_action(Action::ToggleMark);
    app.execute_action(Action::ToggleMark);
    app.execute_action(Action::BeginDrag);
    assert_eq!(app.drag_payload().map(|p| p.len()), Some(2));

    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::Drop);

    assert_eq!(
        names(app.items(ListId::Destination)),
        vec!["a.jpg", "b.jpg"]
    );
    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg", "b.jpg"]);
    assert_eq!(app.active_list(), ListId::Destination);
    assert!(app.pane(ListId::Source).marked.is_empty());
}

#[test]
fn test_explicit_move_removes_from_source() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);

    app.execute_action(Action::MoveDown);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::DropMove);

    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg", "c.jpg"]);
    assert_eq!(names(app.items(ListId::Destination)), vec!["b.jpg"]);
}

#[test]
fn test_multi_item_reorder_is_noop() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);

    app.execute_action(Action::ToggleMark);
    app.execute_action(Action::ToggleMark);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::GoToBottom);
    app.execute_action(Action::Drop);

    assert!(!app.is_dragging());
    assert_eq!(
        names(app.items(ListId::Source)),
        vec!["a.jpg", "b.jpg", "c.jpg"]
    );
}

#[test]
fn test_mark_while_dragging_extends_payload() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);

    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::MoveDown);
    app.execute_action(Action::ToggleMark);

    let payload = app.drag_payload().unwrap();
    assert_eq!(payload.items().collect::<Vec<_>>(), vec!["a.jpg", "b.jpg"]);
    assert_eq!(app.dragged_indices(ListId::Source).len(), 2);
    assert!(app.dragged_indices(ListId::Destination).is_empty());
}

#[test]
fn test_keyboard_end_slot_appends() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::Drop);

    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::MoveDown);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    // Destination 길이 1: 끝에 놓기 칸은 인덱스 1
    app.execute_action(Action::GoToBottom);
    assert_eq!(app.pane(ListId::Destination).selected_index, 1);
    app.execute_action(Action::Drop);

    assert_eq!(
        names(app.items(ListId::Destination)),
        vec!["a.jpg", "b.jpg"]
    );
    assert_eq!(app.pane(ListId::Destination).selected_index, 1);
}

#[test]
fn test_end_slot_is_gone_after_drag() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);

    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::GoToBottom);
    assert_eq!(app.pane(ListId::Source).selected_index, 2);

    app.execute_action(Action::CancelDrag);
    assert!(!app.is_dragging());
    assert_eq!(app.pane(ListId::Source).selected_index, 1);
    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg", "b.jpg"]);
}

#[test]
fn test_destination_to_source_is_forbidden_by_default() {
    let (_temp, mut app) = make_test_app(&["a.jpg"]);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::Drop);

    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::DropMove);

    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg"]);
    assert_eq!(names(app.items(ListId::Destination)), vec!["a.jpg"]);
    assert!(app
        .toast_display()
        .is_some_and(|t| t.starts_with("Drop rejected")));
}

#[test]
fn test_destination_to_source_allowed_by_setting() {
    let temp = scan_dir_with(&["a.jpg"]);
    let settings = Settings {
        scan_dir: temp.path().to_path_buf(),
        allow_drop_into_source: true,
        ..Settings::default()
    };
    let mut app = App::with_settings(settings, ThemeManager::new());

    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::Drop);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::TogglePanel);
    app.execute_action(Action::Drop);

    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg", "a.jpg"]);
    assert!(app.items(ListId::Destination).is_empty());
}

#[test]
fn test_drop_without_drag_shows_toast() {
    let (_temp, mut app) = make_test_app(&["a.jpg"]);
    app.execute_action(Action::Drop);

    assert_eq!(app.toast_display(), Some("Nothing to drag"));
    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg"]);
}

#[test]
fn test_begin_drag_on_empty_list() {
    let (_temp, mut app) = make_test_app(&[]);
    app.execute_action(Action::BeginDrag);

    assert!(!app.is_dragging());
    assert_eq!(app.toast_display(), Some("Nothing to drag"));
}

#[test]
fn test_rescan_during_drag_cancels_it() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);
    app.execute_action(Action::BeginDrag);
    app.execute_action(Action::Refresh);

    assert!(!app.is_dragging());
}

#[test]
fn test_drop_at_reports_batch() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);
    app.execute_action(Action::BeginDrag);
    let payload = app.drag.take().unwrap();

    let batch = app
        .drop_at(payload, ListId::Destination, None, DropIntent::Copy)
        .unwrap();

    let change = batch.for_list(ListId::Destination).unwrap();
    assert_eq!(change.inserts, vec![0]);
    assert!(batch.for_list(ListId::Source).is_none());
}

// === 마우스 ===

#[test]
fn test_mouse_drag_copies_into_destination() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);

    press(&mut app, 5, item_row(1));
    drag_to(&mut app, 20, item_row(1));
    assert!(app.is_dragging());
    // 빈 Destination 아래쪽에 놓으면 목록 끝
    release(&mut app, 70, 20);

    assert_eq!(names(app.items(ListId::Destination)), vec!["b.jpg"]);
    assert_eq!(app.active_list(), ListId::Destination);
}

#[test]
fn test_mouse_reorder_within_source() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);

    press(&mut app, 5, item_row(0));
    drag_to(&mut app, 5, item_row(1));
    release(&mut app, 5, item_row(2));

    assert_eq!(
        names(app.items(ListId::Source)),
        vec!["b.jpg", "c.jpg", "a.jpg"]
    );
}

#[test]
fn test_mouse_drop_below_last_row_reorders_to_end() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);

    press(&mut app, 5, item_row(0));
    drag_to(&mut app, 5, item_row(1));
    release(&mut app, 5, item_row(10));

    assert_eq!(
        names(app.items(ListId::Source)),
        vec!["b.jpg", "c.jpg", "a.jpg"]
    );
}

#[test]
fn test_mouse_drop_on_bottom_border_stays_visible() {
    let files: Vec<String> = (0..60).map(|i| format!("f{:02}.jpg", i)).collect();
    let file_refs: Vec<&str> = files.iter().map(String::as_str).collect();
    let (_temp, mut app) = make_test_app(&file_refs);
    let area = app.layout.panel_area(ListId::Source);
    let visible = GalleryPanel::visible_rows(area);
    let bottom_border = area.y + area.height - 1;

    press(&mut app, 5, item_row(0));
    drag_to(&mut app, 5, item_row(1));
    release(&mut app, 5, bottom_border);

    // 보이는 마지막 행에 놓이고 스크롤되지 않음
    let items = app.items(ListId::Source);
    assert_eq!(items[visible - 1], "f00.jpg");
    assert_eq!(items.len(), 60);
    assert_eq!(app.pane(ListId::Source).scroll_offset, 0);
}

#[test]
fn test_mouse_drag_takes_marked_items() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);
    app.pane_mut(ListId::Source).toggle_mark(0);
    app.pane_mut(ListId::Source).toggle_mark(2);

    press(&mut app, 5, item_row(2));
    drag_to(&mut app, 60, 10);
    release(&mut app, 60, 10);

    assert_eq!(
        names(app.items(ListId::Destination)),
        vec!["a.jpg", "c.jpg"]
    );
}

#[test]
fn test_mouse_release_outside_panels_cancels() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);

    press(&mut app, 5, item_row(0));
    drag_to(&mut app, 5, item_row(1));
    release(&mut app, 5, 29);

    assert!(!app.is_dragging());
    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg", "b.jpg"]);
    assert!(app.items(ListId::Destination).is_empty());
}

#[test]
fn test_click_without_drag_only_moves_cursor() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg"]);

    press(&mut app, 5, item_row(1));
    release(&mut app, 5, item_row(1));

    assert!(!app.is_dragging());
    assert_eq!(app.pane(ListId::Source).selected_index, 1);
    assert_eq!(names(app.items(ListId::Source)), vec!["a.jpg", "b.jpg"]);
}

// === 제목 표시줄 버튼 ===

#[test]
fn test_cancel_button_quits() {
    let (_temp, mut app) = make_test_app(&["a.jpg"]);
    press(&mut app, 2, 0);
    assert!(app.should_quit());
}

#[test]
fn test_save_button_keeps_running() {
    let (_temp, mut app) = make_test_app(&["a.jpg"]);
    press(&mut app, 97, 0);

    assert!(!app.should_quit());
    assert_eq!(app.toast_display(), Some("Save is not available yet"));
}

#[test]
fn test_cancel_action_quits() {
    let (_temp, mut app) = make_test_app(&[]);
    app.execute_action(Action::Cancel);
    assert!(app.should_quit());
}

// === 기타 ===

#[test]
fn test_cycle_theme_updates_settings() {
    let (_temp, mut app) = make_test_app(&[]);
    let before = app.theme_manager.current_name().to_string();
    app.execute_action(Action::CycleTheme);

    assert_ne!(app.theme_manager.current_name(), before);
    assert_eq!(app.settings.theme, app.theme_manager.current_name());
}

#[test]
fn test_visible_images_are_requested_and_resolved() {
    let (_temp, mut app) = make_test_app(&["a.jpg"]);
    app.request_visible_images();
    assert_eq!(app.images().get("a.jpg"), Some(&ImageStatus::Loading));

    let mut guard = 0;
    while app.is_loading_images() && guard < 500 {
        app.poll_image_loader();
        std::thread::sleep(std::time::Duration::from_millis(5));
        guard += 1;
    }
    app.poll_image_loader();

    // 이미지 형식이 아닌 내용은 읽을 수 없음으로 표시
    assert_eq!(app.images().get("a.jpg"), Some(&ImageStatus::Corrupt));
}

#[test]
fn test_pending_key_gg_sequence() {
    let (_temp, mut app) = make_test_app(&["a.jpg", "b.jpg", "c.jpg"]);
    app.execute_action(Action::GoToBottom);
    app.set_pending_key('g');
    assert_eq!(app.pending_key, Some('g'));
    assert!(!app.is_pending_key_expired());

    app.clear_pending_key();
    app.execute_action(Action::GoToTop);
    assert_eq!(app.pane(ListId::Source).selected_index, 0);
    assert!(app.pending_key.is_none());
}
