//! Composite rigid bodies built from unit cubes.
//!
//! Every part is a `0.5` cube (see [`Mesh::cube`](crate::geometry::Mesh::cube))
//! recentered with a `-0.25` pivot, so a part's translation is its center and
//! its scale is `size / 0.5`.

use log::debug;
use nalgebra::{Matrix4, Vector3};

use crate::color::Rgba;
use crate::error::Lab3dError;
use crate::hierarchy::{DrawItem, NodeId, SceneGraph};
use crate::options::SceneOptions;
use crate::transform::{Adjust, Spin, TransformParams};

/// Edge length of the shared cube mesh
pub const PART_SIZE: f32 = 0.5;

/// Yaw offsets placing the blades symmetrically around the rotor
pub const BLADE_YAWS: [f32; 3] = [0.0, 120.0, 240.0];

/// World axis markers run from the origin to this distance
pub const AXIS_LENGTH: f32 = 2.0;
const AXIS_WIDTH: f32 = 0.03;

const PIVOT: f32 = -PART_SIZE / 2.0;

/// A centered box part of the given world-space size
pub fn part(center: [f32; 3], size: [f32; 3]) -> TransformParams {
    TransformParams::new()
        .with_translation(center[0], center[1], center[2])
        .with_scale(size[0] / PART_SIZE, size[1] / PART_SIZE, size[2] / PART_SIZE)
        .with_pivot(PIVOT, PIVOT, PIVOT)
}

fn add_part(
    graph: &mut SceneGraph,
    parent: NodeId,
    name: &str,
    params: TransformParams,
    color: Rgba,
) -> Result<NodeId, Lab3dError> {
    let id = graph.add_child(parent, name, params)?;
    graph.set_color(id, color)?;
    Ok(id)
}

/// Ceiling fan: a spinning rotor carrying a hub and three blades
#[derive(Debug, Clone)]
pub struct Fan {
    rotor: NodeId,
    blades: [NodeId; 3],
    spin: Spin,
}

impl Fan {
    pub const BLADE_LENGTH: f32 = 1.6;

    /// Add a fan whose rotor hangs at `position`, spinning at `speed` deg/s
    pub fn build(
        graph: &mut SceneGraph,
        position: Vector3<f32>,
        speed: f32,
    ) -> Result<Self, Lab3dError> {
        let mount = graph.add_root(
            "fan",
            TransformParams::new().with_translation(position.x, position.y, position.z),
        );
        add_part(graph, mount, "fan_rod", part([0.0, 0.3, 0.0], [0.06, 0.6, 0.06]), Rgba::STEEL)?;

        let rotor = graph.add_child(mount, "fan_rotor", TransformParams::new())?;
        add_part(graph, rotor, "fan_hub", part([0.0, 0.0, 0.0], [0.4, 0.15, 0.4]), Rgba::STEEL)?;

        let mut blades = [rotor; 3];
        for (slot, yaw) in blades.iter_mut().zip(BLADE_YAWS) {
            // Blades extend along the rotor's +X from the axis.
            let blade = TransformParams::new()
                .with_rotation(0.0, yaw, 0.0)
                .with_scale(Self::BLADE_LENGTH / PART_SIZE, 0.03 / PART_SIZE, 0.3 / PART_SIZE)
                .with_pivot(0.0, PIVOT, PIVOT);
            *slot = add_part(graph, rotor, &format!("fan_blade_{yaw}"), blade, Rgba::BLADE)?;
        }

        debug!("fan built at {position:?} spinning {speed} deg/s");
        Ok(Self {
            rotor,
            blades,
            spin: Spin::new(speed),
        })
    }

    pub fn rotor(&self) -> NodeId {
        self.rotor
    }

    pub fn blades(&self) -> [NodeId; 3] {
        self.blades
    }

    pub fn angle(&self) -> f32 {
        self.spin.angle()
    }

    /// Advance the spin by `dt` seconds and push the angle into the rotor
    pub fn update(&mut self, graph: &mut SceneGraph, dt: f32) {
        let angle = self.spin.advance(dt);
        if let Some(params) = graph.params_mut(self.rotor) {
            params.rotation.y = angle;
        }
    }
}

/// Table with four legs and a chair tucked in front of it
pub fn furniture(graph: &mut SceneGraph) -> Result<NodeId, Lab3dError> {
    let table = graph.add_root("table", TransformParams::new());
    add_part(graph, table, "table_top", part([0.0, 1.0, 0.0], [2.0, 0.1, 1.2]), Rgba::WOOD)?;
    for (i, (x, z)) in [(-0.9, -0.5), (0.9, -0.5), (-0.9, 0.5), (0.9, 0.5)].into_iter().enumerate() {
        let name = format!("table_leg_{i}");
        add_part(graph, table, &name, part([x, 0.475, z], [0.1, 0.95, 0.1]), Rgba::DARK_WOOD)?;
    }

    let chair = graph.add_child(table, "chair", TransformParams::new().with_translation(0.0, 0.0, 1.0))?;
    add_part(graph, chair, "chair_seat", part([0.0, 0.55, 0.0], [0.6, 0.08, 0.6]), Rgba::WOOD)?;
    add_part(graph, chair, "chair_back", part([0.0, 0.95, 0.27], [0.6, 0.8, 0.06]), Rgba::WOOD)?;
    for (i, (x, z)) in [(-0.25, -0.25), (0.25, -0.25), (-0.25, 0.25), (0.25, 0.25)].into_iter().enumerate() {
        let name = format!("chair_leg_{i}");
        add_part(graph, chair, &name, part([x, 0.255, z], [0.06, 0.51, 0.06]), Rgba::DARK_WOOD)?;
    }
    Ok(chair)
}

/// Thin red, green and blue bars along +X, +Y and +Z
pub fn axes(graph: &mut SceneGraph) -> Result<NodeId, Lab3dError> {
    let root = graph.add_root("axes", TransformParams::new());
    let (half, w) = (AXIS_LENGTH / 2.0, AXIS_WIDTH);
    add_part(graph, root, "axis_x", part([half, 0.0, 0.0], [AXIS_LENGTH, w, w]), Rgba::RED)?;
    add_part(graph, root, "axis_y", part([0.0, half, 0.0], [w, AXIS_LENGTH, w]), Rgba::GREEN)?;
    add_part(graph, root, "axis_z", part([0.0, 0.0, half], [w, w, AXIS_LENGTH]), Rgba::BLUE)?;
    Ok(root)
}

/// A scene graph plus the animation and selection state driving it
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: &'static str,
    pub graph: SceneGraph,
    fans: Vec<Fan>,
    /// Node that receives `Adjust` commands
    selected: Option<NodeId>,
}

impl Scene {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            graph: SceneGraph::new(),
            fans: Vec::new(),
            selected: None,
        }
    }

    /// One colored cube whose local parameters the user edits directly, over world axes
    pub fn cube() -> Result<Self, Lab3dError> {
        let mut scene = Self::new("cube");
        axes(&mut scene.graph)?;
        let cube = scene.graph.add_root("cube", part([0.0, 0.0, 0.0], [0.5, 0.5, 0.5]));
        scene.graph.set_color(cube, Rgba::YELLOW)?;
        scene.selected = Some(cube);
        Ok(scene)
    }

    pub fn ceiling_fan(options: &SceneOptions) -> Result<Self, Lab3dError> {
        let mut scene = Self::new("ceiling fan");
        let fan = Fan::build(&mut scene.graph, Vector3::new(0.0, 1.5, 0.0), options.fan_speed)?;
        scene.fans.push(fan);
        Ok(scene)
    }

    /// Table, chair and a fan above them
    pub fn room(options: &SceneOptions) -> Result<Self, Lab3dError> {
        let mut scene = Self::new("room");
        let chair = furniture(&mut scene.graph)?;
        let fan = Fan::build(&mut scene.graph, Vector3::new(0.0, 2.6, 0.0), options.fan_speed)?;
        scene.fans.push(fan);
        scene.selected = Some(chair);
        Ok(scene)
    }

    /// Every preset, in display order
    pub fn presets(options: &SceneOptions) -> Result<Vec<Self>, Lab3dError> {
        Ok(vec![Self::room(options)?, Self::ceiling_fan(options)?, Self::cube()?])
    }

    pub fn fans(&self) -> &[Fan] {
        &self.fans
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn update(&mut self, dt: f32) {
        for fan in &mut self.fans {
            fan.update(&mut self.graph, dt);
        }
    }

    /// Edit the selected node; a scene without a selection ignores it
    pub fn adjust(&mut self, adjust: Adjust, dt: f32) {
        if let Some(params) = self.selected.and_then(|id| self.graph.params_mut(id)) {
            params.apply(adjust, dt);
        }
    }

    pub fn draw_list(&self) -> Vec<DrawItem> {
        self.graph.draw_list()
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Matrix4<f32>> {
        self.graph.evaluate().get(id.index()).copied()
    }
}
