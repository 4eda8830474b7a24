const BINDINGS_DIR: &str = "bindings";

#[test]
fn generate_bindings() -> anyhow::Result<()> {
    use crate::{app::AppEvent, commands};
    use specta_typescript::Typescript;
    use tauri_specta::{collect_commands, collect_events};

    std::fs::create_dir_all(BINDINGS_DIR)?;
    tauri_specta::Builder::<tauri::Wry>::new()
        .commands(collect_commands![
            commands::show_window,
            commands::minimize_window,
            commands::maximize_window,
            commands::close_window,
            commands::show_profile,
            commands::reload_all_windows,
            commands::get_state,
            commands::dispatch
        ])
        .events(collect_events![AppEvent])
        .export(
            Typescript::new().bigint(specta_typescript::BigIntExportBehavior::Number),
            format!("{BINDINGS_DIR}/bindings.ts"),
        )?;

    Ok(())
}

#[test]
fn generate_type_bindings() -> anyhow::Result<()> {
    use specta::{function::fn_datatype, TypeMap};
    use specta_typescript::{export_named_datatype, BigIntExportBehavior, Typescript};
    use window_lifecycle::{Action, ApplicationState, WindowName};

    #[specta::specta]
    fn _tmp(_types: (ApplicationState, Action, WindowName)) {}

    let mut type_map = TypeMap::default();
    _ = fn_datatype!(_tmp)(&mut type_map);

    let exports = type_map
        .iter()
        .map(|(_sid, ndt)| {
            export_named_datatype(
                &Typescript::default().bigint(BigIntExportBehavior::Number),
                ndt,
                &type_map,
            )
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|v| v.join("\n"))?;

    std::fs::create_dir_all(BINDINGS_DIR)?;
    std::fs::write(format!("{BINDINGS_DIR}/index.d.ts"), exports)?;

    Ok(())
}
