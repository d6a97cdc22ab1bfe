use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::math::euler::to_euler_xyz;

/// Handle into a [`TransformTree`]. Cheap to copy, only meaningful for the
/// tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
struct OrbitNode {
    translation: Vector3<f64>,
    rotation: UnitQuaternion<f64>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl OrbitNode {
    fn new(parent: Option<NodeId>) -> Self {
        OrbitNode {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            parent,
            children: vec![],
        }
    }

    fn local_transform(&self) -> Isometry3<f64> {
        // Translate-then-rotate, so a static radial offset swings around the
        // parent while the node's own rotation spins its children in place.
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }
}

/// Arena of transform nodes. Strictly a tree: every node except the root has
/// exactly one parent, and nodes are never removed.
#[derive(Debug, Clone)]
pub struct TransformTree {
    nodes: Vec<OrbitNode>,
}

impl TransformTree {
    /// Creates a tree containing only the root node.
    pub fn new() -> Self {
        TransformTree {
            nodes: vec![OrbitNode::new(None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a fresh node under `parent` and returns its handle.
    pub fn attach(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(OrbitNode::new(Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Sets the node's static positional offset from its parent.
    pub fn set_translation(&mut self, id: NodeId, offset: Vector3<f64>) {
        self.nodes[id.0].translation = offset;
    }

    /// Sets the node's rotation outright, replacing whatever was there.
    /// Used for static offsets (axial tilt, orbital-plane inclination).
    pub fn set_rotation(&mut self, id: NodeId, rotation: UnitQuaternion<f64>) {
        self.nodes[id.0].rotation = rotation;
    }

    /// Rotates the node about one of its *local* axes by `angle` radians.
    /// Composes on the right, so repeated calls accumulate; the quaternion is
    /// not renormalized or canonicalized between calls.
    pub fn append_rotation(&mut self, id: NodeId, axis: &Unit<Vector3<f64>>, angle: f64) {
        let node = &mut self.nodes[id.0];
        node.rotation = node.rotation * UnitQuaternion::from_axis_angle(axis, angle);
    }

    /// The node's current local rotation, decomposed as XYZ Euler angles.
    pub fn rotation_angles(&self, id: NodeId) -> Vector3<f64> {
        to_euler_xyz(&self.nodes[id.0].rotation)
    }

    pub fn local_transform(&self, id: NodeId) -> Isometry3<f64> {
        self.nodes[id.0].local_transform()
    }

    /// Composed transform from the root frame down to this node.
    pub fn world_transform(&self, id: NodeId) -> Isometry3<f64> {
        let node = &self.nodes[id.0];
        match node.parent {
            None => node.local_transform(),
            Some(parent) => self.world_transform(parent) * node.local_transform(),
        }
    }
}

impl Default for TransformTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use nalgebra::Point3;

    use super::*;

    #[test]
    fn test_attach_and_links() {
        let mut tree = TransformTree::new();
        let a = tree.attach(tree.root());
        let b = tree.attach(a);

        assert_eq!(tree.parent(a), Some(tree.root()));
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.children(a), &[b]);
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn test_world_transform_composes_down_the_chain() {
        // A radial arm of length 2, swung a quarter turn about the root's
        // y axis, should land on the -z axis.
        let mut tree = TransformTree::new();
        let pivot = tree.attach(tree.root());
        let tip = tree.attach(pivot);
        tree.set_translation(tip, Vector3::new(2.0, 0.0, 0.0));
        tree.append_rotation(pivot, &Vector3::y_axis(), FRAC_PI_2);

        let pos = tree.world_transform(tip) * Point3::origin();
        approx::assert_relative_eq!(pos, Point3::new(0.0, 0.0, -2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_counter_rotation_cancels_in_world_frame() {
        // Opposite rotations on parent and child leave the child's world
        // orientation fixed, while the child's offset still orbits.
        let mut tree = TransformTree::new();
        let orbit = tree.attach(tree.root());
        let arm = tree.attach(orbit);
        tree.set_translation(arm, Vector3::new(3.0, 0.0, 0.0));

        tree.append_rotation(orbit, &Vector3::y_axis(), 1.2);
        tree.append_rotation(arm, &Vector3::y_axis(), -1.2);

        let world = tree.world_transform(arm);
        approx::assert_relative_eq!(
            world.rotation.angle(),
            0.0,
            epsilon = 1e-12
        );
        approx::assert_relative_eq!(
            (world * Point3::origin()).coords.norm(),
            3.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_append_rotation_accumulates_past_half_turn() {
        let mut tree = TransformTree::new();
        let node = tree.attach(tree.root());
        for _ in 0..10 {
            tree.append_rotation(node, &Vector3::y_axis(), 0.2);
        }

        // 2.0 radians total: y folds, x reflects.
        let angles = tree.rotation_angles(node);
        approx::assert_relative_eq!(angles.y, PI - 2.0, epsilon = 1e-12);
        assert_eq!(angles.x.abs(), PI);
    }
}
