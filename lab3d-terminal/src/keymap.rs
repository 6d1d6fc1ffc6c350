/// Keyboard and mouse bindings for the terminal viewer
use crossterm::event::{KeyCode, MouseEventKind};
use lab3d_core::{Adjust, Movement, Rotation};
use nalgebra::Vector3;

/// Degrees of zoom per key press or wheel notch
pub const ZOOM_STEP: f32 = 1.0;
/// Units per second for object translation
pub const NUDGE_SPEED: f32 = 1.0;
/// Degrees per second for object rotation
pub const TURN_SPEED: f32 = 90.0;
/// Scale change per second
pub const GROW_SPEED: f32 = 0.5;

/// Everything the viewer can be asked to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(Movement),
    Rotate(Rotation),
    Zoom(f32),
    /// Mouse-look offsets in cells, y pointing up
    Look(f32, f32),
    Adjust(Adjust),
    NextScene,
    Quit,
}

pub fn key_command(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Tab => Command::NextScene,

        KeyCode::Char('w') => Command::Move(Movement::Forward),
        KeyCode::Char('s') => Command::Move(Movement::Backward),
        KeyCode::Char('a') => Command::Move(Movement::Left),
        KeyCode::Char('d') => Command::Move(Movement::Right),
        KeyCode::Char('e') => Command::Move(Movement::Up),
        KeyCode::Char('r') => Command::Move(Movement::Down),

        KeyCode::Left => Command::Rotate(Rotation::YawLeft),
        KeyCode::Right => Command::Rotate(Rotation::YawRight),
        KeyCode::Up => Command::Rotate(Rotation::PitchUp),
        KeyCode::Down => Command::Rotate(Rotation::PitchDown),
        KeyCode::Char('[') => Command::Rotate(Rotation::RollLeft),
        KeyCode::Char(']') => Command::Rotate(Rotation::RollRight),

        KeyCode::Char('+') | KeyCode::Char('=') => Command::Zoom(ZOOM_STEP),
        KeyCode::Char('-') => Command::Zoom(-ZOOM_STEP),

        KeyCode::Char('i') => nudge(0.0, NUDGE_SPEED, 0.0),
        KeyCode::Char('k') => nudge(0.0, -NUDGE_SPEED, 0.0),
        KeyCode::Char('l') => nudge(NUDGE_SPEED, 0.0, 0.0),
        KeyCode::Char('j') => nudge(-NUDGE_SPEED, 0.0, 0.0),
        KeyCode::Char('o') => nudge(0.0, 0.0, NUDGE_SPEED),
        KeyCode::Char('p') => nudge(0.0, 0.0, -NUDGE_SPEED),

        KeyCode::Char('x') => turn(TURN_SPEED, 0.0, 0.0),
        KeyCode::Char('y') => turn(0.0, TURN_SPEED, 0.0),
        KeyCode::Char('z') => turn(0.0, 0.0, TURN_SPEED),
        KeyCode::Char('X') => turn(-TURN_SPEED, 0.0, 0.0),
        KeyCode::Char('Y') => turn(0.0, -TURN_SPEED, 0.0),
        KeyCode::Char('Z') => turn(0.0, 0.0, -TURN_SPEED),

        KeyCode::Char('m') => Command::Adjust(Adjust::Scale(GROW_SPEED)),
        KeyCode::Char('n') => Command::Adjust(Adjust::Scale(-GROW_SPEED)),
        _ => return None,
    };
    Some(command)
}

/// Wheel notches zoom; drags are turned into look offsets by the caller
pub fn scroll_command(kind: MouseEventKind) -> Option<Command> {
    match kind {
        MouseEventKind::ScrollUp => Some(Command::Zoom(ZOOM_STEP)),
        MouseEventKind::ScrollDown => Some(Command::Zoom(-ZOOM_STEP)),
        _ => None,
    }
}

fn nudge(x: f32, y: f32, z: f32) -> Command {
    Command::Adjust(Adjust::Translate(Vector3::new(x, y, z)))
}

fn turn(x: f32, y: f32, z: f32) -> Command {
    Command::Adjust(Adjust::Rotate(Vector3::new(x, y, z)))
}
