/// Terminal front end: input, frame timing and ASCII output around lab3d-core
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use lab3d_core::{Camera, Lab3dError, Mesh, Options, Scene};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod keymap;
pub mod renderer;

pub use keymap::Command;
pub use renderer::AsciiRenderer;

/// Rows reserved above the viewport for the status line
const HUD_ROWS: u16 = 1;
/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;
/// Mouse-look units per dragged cell; with the default sensitivity one cell turns 1 degree
const LOOK_PER_CELL: f32 = 10.0;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    options: Options,
    camera: Camera,
    scenes: Vec<Scene>,
    current: usize,
    mesh: Mesh,
    renderer: AsciiRenderer,
    pending: Vec<Command>,
    last_mouse: Option<(u16, u16)>,
    running: bool,
    last_frame: Instant,
    fps_window: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(options: Options) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(options, width, height)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Build the app for a `width` x `height` cell terminal without touching the tty
    pub fn with_size(options: Options, width: u16, height: u16) -> Result<Self, Lab3dError> {
        let scenes = Scene::presets(&options.scene)?;

        Ok(Self {
            camera: Camera::from_options(&options.camera),
            options,
            scenes,
            current: 0,
            mesh: Mesh::cube(lab3d_core::scene::PART_SIZE),
            renderer: AsciiRenderer::new(width as usize, height.saturating_sub(HUD_ROWS) as usize),
            pending: Vec::new(),
            last_mouse: None,
            running: true,
            last_frame: Instant::now(),
            fps_window: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), cursor::Show, DisableMouseCapture, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();
            let dt = (frame_start - self.last_frame).as_secs_f32();
            self.last_frame = frame_start;

            // Drain every event that arrived since the last frame
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.update(dt);
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.fps_window).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.fps_window).as_secs_f32();
                self.frame_count = 0;
                self.fps_window = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(command) = keymap::key_command(key.code) {
                    self.pending.push(command);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Drag(_) => {
                    if let Some((col, row)) = self.last_mouse {
                        let dx = (mouse.column as f32 - col as f32) * LOOK_PER_CELL;
                        let dy = (row as f32 - mouse.row as f32) * LOOK_PER_CELL * CELL_ASPECT;
                        self.pending.push(Command::Look(dx, dy));
                    }
                    self.last_mouse = Some((mouse.column, mouse.row));
                }
                MouseEventKind::Up(_) => self.last_mouse = None,
                MouseEventKind::Down(_) => self.last_mouse = Some((mouse.column, mouse.row)),
                kind => self.pending.extend(keymap::scroll_command(kind)),
            },
            Event::Resize(width, height) => {
                self.renderer
                    .resize(width as usize, height.saturating_sub(HUD_ROWS) as usize);
            }
            _ => {}
        }
    }

    /// Apply queued commands with this frame's delta time, then animate
    pub fn update(&mut self, dt: f32) {
        for command in std::mem::take(&mut self.pending) {
            self.apply(command, dt);
        }
        self.scenes[self.current].update(dt);
    }

    pub fn apply(&mut self, command: Command, dt: f32) {
        match command {
            Command::Move(movement) => self.camera.move_by(movement, dt),
            Command::Rotate(rotation) => self.camera.rotate(rotation, dt),
            Command::Zoom(offset) => self.camera.zoom(offset),
            Command::Look(dx, dy) => self.camera.look(dx, dy),
            Command::Adjust(adjust) => self.scenes[self.current].adjust(adjust, dt),
            Command::NextScene => {
                self.current = (self.current + 1) % self.scenes.len();
                info!("switched to scene '{}'", self.scenes[self.current].name);
            }
            Command::Quit => self.running = false,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scenes[self.current]
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rasterize the current scene into the off-screen cell buffer
    pub fn draw_scene(&mut self) {
        let aspect = self.renderer.width() as f32
            / (self.renderer.height().max(1) as f32 * CELL_ASPECT);
        let camera = &self.options.camera;
        let view_projection = self.camera.projection_matrix(aspect, camera.near, camera.far)
            * self.camera.view_matrix();
        // Headlight: faces toward the viewer are brightest.
        let light_dir = -self.camera.direction();

        self.renderer.clear();
        let items = self.scenes[self.current].draw_list();
        debug!("drawing {} items", items.len());
        for item in items {
            self.renderer
                .render_mesh(&self.mesh, &item.model, &view_projection, item.color, &light_dir);
        }
    }

    /// HUD text, cut to the viewport width so it never wraps into the frame
    fn status_line(&self) -> String {
        let position = self.camera.position();
        format!(
            "Lab3D [{}] | FPS {:.1} | pos ({:.1}, {:.1}, {:.1}) fov {:.0} | WASDER move, arrows/[] turn, +/- zoom, IJKLOP XYZ nm edit, Tab scene, Q quit",
            self.scenes[self.current].name,
            self.fps,
            position.x,
            position.y,
            position.z,
            self.camera.fov_degrees(),
        )
        .chars()
        .take(self.renderer.width())
        .collect()
    }

    fn render(&mut self) -> io::Result<()> {
        self.draw_scene();

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, HUD_ROWS)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
