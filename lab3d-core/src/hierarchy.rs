//! Parent/child transform hierarchy.
//!
//! Nodes live in a flat list. A child can only be added once its parent
//! exists, so list order is already parent-before-child and the whole graph
//! evaluates in a single forward pass.

use log::debug;
use nalgebra::Matrix4;

use crate::color::Rgba;
use crate::error::Lab3dError;
use crate::transform::TransformParams;

/// Index of a node inside its `SceneGraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub params: TransformParams,
    /// Nodes without a color are pure grouping transforms and are never drawn
    pub color: Option<Rgba>,
}

/// A drawable resolved to world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub model: Matrix4<f32>,
    pub color: Rgba,
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_root(&mut self, name: impl Into<String>, params: TransformParams) -> NodeId {
        self.push(name.into(), None, params)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        params: TransformParams,
    ) -> Result<NodeId, Lab3dError> {
        if parent.0 >= self.nodes.len() {
            return Err(Lab3dError::UnknownNode(parent));
        }
        Ok(self.push(name.into(), Some(parent), params))
    }

    fn push(&mut self, name: String, parent: Option<NodeId>, params: TransformParams) -> NodeId {
        let id = NodeId(self.nodes.len());
        debug!("scene node {} '{name}' parent={:?}", id.0, parent.map(NodeId::index));
        self.nodes.push(Node {
            name,
            parent,
            params,
            color: None,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn params_mut(&mut self, id: NodeId) -> Option<&mut TransformParams> {
        self.nodes.get_mut(id.0).map(|node| &mut node.params)
    }

    pub fn set_color(&mut self, id: NodeId, color: Rgba) -> Result<(), Lab3dError> {
        let node = self.nodes.get_mut(id.0).ok_or(Lab3dError::UnknownNode(id))?;
        node.color = Some(color);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// World matrix of every node, indexed by `NodeId`
    pub fn evaluate(&self) -> Vec<Matrix4<f32>> {
        let mut world: Vec<Matrix4<f32>> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = match node.parent {
                Some(p) => world[p.0],
                None => Matrix4::identity(),
            };
            world.push(node.params.compose(&parent));
        }
        world
    }

    /// Colored nodes with their world matrices, in insertion order
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let world = self.evaluate();
        self.iter()
            .filter_map(|(id, node)| {
                node.color.map(|color| DrawItem {
                    node: id,
                    model: world[id.0],
                    color,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_roots_are_local_transforms() {
        let mut graph = SceneGraph::new();
        let params = TransformParams::new().with_translation(1.0, 2.0, 3.0);
        let root = graph.add_root("root", params);
        let world = graph.evaluate();
        assert_eq!(world[root.index()], params.compose(&Matrix4::identity()));
    }

    #[test]
    fn test_children_inherit_parent() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(
            "root",
            TransformParams::new()
                .with_translation(0.0, 5.0, 0.0)
                .with_rotation(0.0, 90.0, 0.0),
        );
        let child = graph
            .add_child(root, "child", TransformParams::new().with_translation(1.0, 0.0, 0.0))
            .unwrap();
        let grandchild = graph
            .add_child(child, "grandchild", TransformParams::new().with_translation(1.0, 0.0, 0.0))
            .unwrap();

        let world = graph.evaluate();
        let p = world[grandchild.index()].transform_point(&Point3::origin());
        // Two units along the parent's rotated +X, which is world -Z.
        assert_relative_eq!(p, Point3::new(0.0, 5.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let mut graph = SceneGraph::new();
        let err = graph
            .add_child(NodeId(3), "orphan", TransformParams::new())
            .unwrap_err();
        assert!(matches!(err, Lab3dError::UnknownNode(id) if id.index() == 3));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_draw_list_skips_groups() {
        let mut graph = SceneGraph::new();
        let group = graph.add_root("group", TransformParams::new());
        let a = graph.add_child(group, "a", TransformParams::new()).unwrap();
        let b = graph.add_child(group, "b", TransformParams::new()).unwrap();
        graph.set_color(a, Rgba::RED).unwrap();
        graph.set_color(b, Rgba::YELLOW).unwrap();

        let items = graph.draw_list();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].node, a);
        assert_eq!(items[1].color, Rgba::YELLOW);
        assert_eq!(graph.find("b"), Some(b));
        assert_eq!(graph.find("missing"), None);
    }

    #[test]
    fn test_params_mut_is_seen_by_children() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("root", TransformParams::new());
        let child = graph
            .add_child(root, "child", TransformParams::new().with_translation(0.0, 0.0, 1.0))
            .unwrap();
        graph.params_mut(root).unwrap().translation.x = 4.0;

        let world = graph.evaluate();
        let p = world[child.index()].transform_point(&Point3::origin());
        assert_relative_eq!(p, Point3::new(4.0, 0.0, 1.0), epsilon = 1e-6);
    }
}
