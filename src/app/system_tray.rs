use tauri::menu::{MenuBuilder, MenuEvent};
use tauri::tray::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent, TrayIconId};
use tauri::AppHandle;
use window_lifecycle::MenuItem;

use super::AppManager;
use crate::constants::{APP_NAME, TRAY_ID};

pub fn create_tray(app_handle: &AppHandle, items: &[MenuItem]) -> tauri::Result<TrayIconId> {
    let tray_menu = items
        .iter()
        .fold(MenuBuilder::new(app_handle), |menu, item| menu.text(item.id(), item.label()))
        .build()?;

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .tooltip(APP_NAME)
        .menu(&tray_menu)
        .show_menu_on_left_click(false)
        .on_tray_icon_event(handle_system_tray_event);

    let tray_builder = match app_handle.default_window_icon() {
        Some(icon) => tray_builder.icon(icon.clone()),
        None => tray_builder,
    };

    let tray_icon = tray_builder.build(app_handle)?;
    Ok(tray_icon.id().clone())
}

pub fn remove_tray(app_handle: &AppHandle, id: &TrayIconId) -> bool {
    app_handle.remove_tray_by_id::<str>(id.as_ref()).is_some()
}

fn handle_system_tray_event(tray_icon: &TrayIcon, event: TrayIconEvent) {
    if let TrayIconEvent::Click {
        button: MouseButton::Left,
        button_state: MouseButtonState::Up,
        ..
    } = event
    {
        if let Some(coordinator) = tray_icon.app_handle().coordinator() {
            coordinator.handle_tray_click();
        }
    }
}

// tray menu and window menus share their ids, so one handler serves both
pub fn process_menu_event(app_handle: &AppHandle, event: MenuEvent) {
    let Some(item) = MenuItem::from_id(event.id().as_ref()) else {
        log::warn!("unknown menu item: {:?}", event.id());
        return;
    };

    if let Some(coordinator) = app_handle.coordinator() {
        coordinator.handle_menu_item(item);
    }
}
