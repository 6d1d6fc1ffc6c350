/// Lab3D Terminal Demo - camera flythrough of a table, chair and ceiling fan
///
/// Usage: lab3d-terminal [options.toml]
/// Controls:
///   - W/S/A/D/E/R: Move forward/back/left/right/up/down
///   - Arrow keys, [ ]: Yaw, pitch and roll the camera; mouse drag looks around
///   - +/- or mouse wheel: Zoom
///   - I/K/J/L/O/P, X/Y/Z (shift reverses), N/M: Move, turn and scale the selected object
///   - Tab: Next scene
///   - Q/ESC: Quit
use lab3d_core::Options;
use lab3d_terminal::TerminalApp;
use log::info;
use std::env;
use std::io;
use std::path::Path;

fn main() -> io::Result<()> {
    env_logger::init();

    let options = match env::args().nth(1) {
        Some(path) => {
            info!("loading options from {path}");
            Options::load(Path::new(&path))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        }
        None => Options::default(),
    };

    println!("Lab3D Terminal Renderer - Loading...");
    std::thread::sleep(std::time::Duration::from_millis(500));

    let mut app = TerminalApp::new(options)?;
    app.run()?;

    println!("Thank you for using Lab3D Terminal Renderer!");
    Ok(())
}
