mod app;
mod core;
mod logging;
mod models;
mod system;
mod ui;
mod utils;

use app::{App, Settings};
use core::actions::{find_action, find_sequence_action, generate_command_bar_items, is_sequence_prefix};
use core::ListId;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use ui::{
    ActivePanel, CommandBar, GalleryPanel, LayoutMode, MessageKey, PanelStatus, StatusBar,
    TextKey, Theme, TitleBar, WarningScreen,
};
use models::ImageStatus;
use utils::{error::Result, formatter::format_date};

fn main() -> Result<()> {
    // 첫 번째 위치 인자는 스캔 디렉토리
    let scan_dir = std::env::args_os().nth(1).map(PathBuf::from);
    let (settings, settings_error) = Settings::load(scan_dir);

    if let Err(err) = logging::init(&settings.log_level) {
        eprintln!("Logging disabled: {}", err);
    }
    // 설정 오류는 로거가 준비된 뒤에 기록
    if let Some(err) = settings_error {
        let path = Settings::store_path().unwrap_or_default();
        tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
    }
    tracing::info!(scan_dir = %settings.scan_dir.display(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.area();
            app.layout.update(size);

            match app.layout.mode() {
                LayoutMode::TooSmall => {
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .i18n(app.i18n())
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                LayoutMode::DualPanel | LayoutMode::SinglePanel => {
                    render_main_ui(f, app);
                }
            }
        })?;

        // 그린 뒤 보이는 셀의 메타데이터 요청
        app.request_visible_images();

        let poll_timeout = if app.is_loading_images() || app.pending_key.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_normal_keys(app, key.modifiers, key.code);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse.kind, mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        // pending 키 타임아웃 체크
        if app.pending_key.is_some() && app.is_pending_key_expired() {
            app.clear_pending_key();
        }

        app.poll_image_loader();
        app.clear_expired_toast();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    // 1) pending 키 시퀀스 처리
    if let Some(pending) = app.pending_key {
        app.clear_pending_key();
        if let KeyCode::Char(c) = code {
            if let Some(action) = find_sequence_action(pending, c) {
                app.execute_action(action);
                return;
            }
        }
    }

    // 2) 시퀀스 시작 키면 대기
    if modifiers == KeyModifiers::NONE {
        if let KeyCode::Char(c) = code {
            if is_sequence_prefix(c) {
                app.set_pending_key(c);
                return;
            }
        }
    }

    // 3) 테이블 조회 → 액션 실행
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme_manager.current();
    let i18n = app.i18n();

    let title_bar = TitleBar::new().i18n(i18n).theme(theme);
    f.render_widget(title_bar, areas.title_bar);

    render_list(f, app, ListId::Source, theme, areas.left_panel);
    render_list(f, app, ListId::Destination, theme, areas.right_panel);

    render_status_bar(f, app, theme, areas.status_bar);

    let command_bar = CommandBar::new()
        .commands(generate_command_bar_items(app.language, app.is_dragging()))
        .theme(theme);
    f.render_widget(command_bar, areas.command_bar);
}

fn render_list(f: &mut ratatui::Frame<'_>, app: &App, list: ListId, theme: &Theme, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let i18n = app.i18n();
    let pane = app.pane(list);
    let dragged = app.dragged_indices(list);
    let is_active = app.layout.active_panel() == ActivePanel::for_list(list);
    let title = match list {
        ListId::Source => i18n.tr(TextKey::Source),
        ListId::Destination => i18n.tr(TextKey::Destination),
    };

    let panel = GalleryPanel::new()
        .title(title)
        .status(if is_active {
            PanelStatus::Active
        } else {
            PanelStatus::Inactive
        })
        .items(app.items(list))
        .images(app.images())
        .selected_index(pane.selected_index)
        .scroll_offset(pane.scroll_offset)
        .marked(&pane.marked)
        .dragged(&dragged)
        .monochrome(list == ListId::Destination)
        .drop_slot(app.is_dragging())
        .i18n(i18n)
        .theme(theme);
    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &Theme, area: Rect) {
    let i18n = app.i18n();

    let count_of = |list: ListId, key: TextKey| {
        i18n.fmt(
            MessageKey::ItemCount,
            &[
                ("name", i18n.tr(key).to_string()),
                ("count", app.items(list).len().to_string()),
            ],
        )
    };
    let counts = format!(
        "{}  {}",
        count_of(ListId::Source, TextKey::Source),
        count_of(ListId::Destination, TextKey::Destination)
    );

    let marked_count = app.pane(app.active_list()).marked.len();
    let marked = (marked_count > 0).then(|| {
        i18n.fmt(
            MessageKey::MarkedCount,
            &[("count", marked_count.to_string())],
        )
    });

    let drag = app.drag_payload().map(|payload| {
        let origin = match payload.origin() {
            ListId::Source => i18n.tr(TextKey::Source),
            ListId::Destination => i18n.tr(TextKey::Destination),
        };
        i18n.fmt(
            MessageKey::DragStatus,
            &[
                ("count", payload.len().to_string()),
                ("origin", origin.to_string()),
            ],
        )
    });

    // 드래그 중이면 드래그 표시, 아니면 커서 이미지의 크기와 수정 시각
    let theme_name = app.theme_manager.current_name();
    let detail = if app.is_dragging() {
        Some(i18n.tr(TextKey::Dragging).to_string())
    } else {
        app.focused_image()
            .and_then(ImageStatus::info)
            .map(|info| format!("{} {}", info.dimensions(), format_date(info.modified)))
    };
    let right = match detail {
        Some(detail) => format!("{} | {}", detail, theme_name),
        None => theme_name.to_string(),
    };

    let status_bar = StatusBar::new()
        .counts(&counts)
        .marked(marked.as_deref())
        .drag(drag.as_deref())
        .toast(app.toast_display())
        .right(&right)
        .theme(theme);
    f.render_widget(status_bar, area);
}
