use std::fs;

use anyhow::Result;
use tempfile::TempDir;

use kanban_panel::app::{App, Message};
use kanban_panel::panel::{
    FileStore, NoAffordance, PanelConfig, ResizablePanelController, STORAGE_KEY, SharedViewport,
    WidthStore,
};
use kanban_panel::settings::Settings;

#[test]
fn width_survives_a_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("state").join("panel-state.json");
    let viewport = SharedViewport::new(Some(1440));

    {
        let mut panel = ResizablePanelController::new(
            PanelConfig::default(),
            FileStore::open(&path),
            viewport.clone(),
        );
        assert_eq!(panel.width(), 800);

        panel.begin_drag(640);
        panel.on_pointer_move(520);
        panel.end_drag();
        assert_eq!(panel.width(), 920);
    }

    let contents = fs::read_to_string(&path)?;
    assert!(contents.contains("\"920\""));

    let panel = ResizablePanelController::new(
        PanelConfig::default(),
        FileStore::open(&path),
        viewport.clone(),
    );
    assert_eq!(panel.width(), 920);
    Ok(())
}

#[test]
fn stored_width_too_wide_for_new_viewport_falls_back() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("panel-state.json");

    let mut store = FileStore::open(&path);
    store.set(STORAGE_KEY, "1300")?;

    let panel = ResizablePanelController::new(
        PanelConfig::default(),
        FileStore::open(&path),
        SharedViewport::new(Some(1000)),
    );
    assert_eq!(panel.width(), 800);
    assert_eq!(FileStore::open(&path).get(STORAGE_KEY).as_deref(), Some("800"));
    Ok(())
}

#[test]
fn corrupt_state_file_degrades_to_default() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("panel-state.json");
    fs::write(&path, "not json at all")?;

    let panel = ResizablePanelController::new(
        PanelConfig::default(),
        FileStore::open(&path),
        SharedViewport::new(None),
    );
    assert_eq!(panel.width(), 800);
    assert_eq!(panel.max_width(), 1600);
    Ok(())
}

#[test]
fn terminal_host_drag_session_persists_cells() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("panel-state.json");
    let settings = Settings::default();
    let viewport = SharedViewport::new(Some(100));

    let mut app = App::with_parts(
        &settings,
        FileStore::open(&path),
        viewport.clone(),
        NoAffordance,
        (100, 30),
    );
    let handle_x = app.layout().handle_x.expect("wide terminal shows the handle");
    assert_eq!(handle_x, 40);

    app.update(Message::PointerDown {
        column: handle_x,
        row: 5,
    })?;
    for column in (30..40).rev() {
        app.update(Message::PointerMove { column, row: 5 })?;
    }
    app.update(Message::PointerUp)?;
    assert_eq!(app.panel.width(), 70);

    viewport.set(Some(60));
    app.update(Message::Resize(60, 30))?;
    assert_eq!(app.panel.width(), 51);

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get(&settings.storage_key).as_deref(), Some("51"));
    Ok(())
}
