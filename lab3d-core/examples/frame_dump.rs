/// Example: step the room scene for a few frames and print what a renderer would receive
///
/// Usage: cargo run -p lab3d-core --example frame_dump
use lab3d_core::{Camera, Movement, Options, Rotation, Scene};

fn main() -> Result<(), lab3d_core::Lab3dError> {
    let options = Options::default();
    let mut camera = Camera::from_options(&options.camera);
    let mut scene = Scene::room(&options.scene)?;

    let dt = 1.0 / 30.0;
    for frame in 0..3 {
        camera.move_by(Movement::Forward, dt);
        camera.rotate(Rotation::YawRight, dt);
        scene.update(dt);

        println!("frame {frame}: fan at {:.1} deg", scene.fans()[0].angle());
        println!("view = {}", camera.view_matrix());
        for item in scene.draw_list().iter().take(3) {
            let name = scene.graph.node(item.node).map_or("?", |n| n.name.as_str());
            println!("  {name} color={:?} model={}", item.color.to_array(), item.model);
        }
    }
    Ok(())
}
