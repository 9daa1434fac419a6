pub mod render;

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Architectural layers, declared in top-to-bottom band order.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Layer {
    Api,
    Application,
    Domain,
    Infrastructure,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::Api,
        Layer::Application,
        Layer::Domain,
        Layer::Infrastructure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::Application => "Application",
            Self::Domain => "Domain",
            Self::Infrastructure => "Infrastructure",
        }
    }

    /// Node stroke color, one fixed color per layer.
    pub fn color(self) -> &'static str {
        match self {
            Self::Api => "#00FF95",
            Self::Application => "#17CFBF",
            Self::Domain => "#FFC61A",
            Self::Infrastructure => "#8C47D1",
        }
    }
}

/// A project node at a fixed canvas position. Positions are fixture data, not
/// the output of a layout pass.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    pub layer: Layer,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, layer: Layer, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            layer,
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub violation: bool,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, violation: bool) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            violation,
        }
    }
}

/// Translucent horizontal band behind one layer of nodes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayerBand {
    pub layer: Layer,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge {edge} references unknown node `{node}`")]
    UnknownNode { edge: usize, node: String },
    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphDataset {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub bands: Vec<LayerBand>,
}

impl GraphDataset {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Checks referential integrity: node ids must be unique and every edge
    /// endpoint must name an existing node. The renderer relies on this
    /// holding before it emits anything.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        for (index, edge) in self.edges.iter().enumerate() {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(GraphError::UnknownNode {
                        edge: index,
                        node: endpoint.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nodes() -> Vec<Node> {
        vec![
            Node::new("OrderService", Layer::Application, 100.0, 180.0),
            Node::new("Order", Layer::Domain, 150.0, 300.0),
        ]
    }

    #[test]
    fn valid_dataset_passes_validation() {
        let dataset = GraphDataset {
            nodes: two_nodes(),
            edges: vec![Edge::new("OrderService", "Order", false)],
            bands: vec![],
        };
        assert_eq!(dataset.validate(), Ok(()));
    }

    #[test]
    fn edge_to_missing_node_is_rejected() {
        let dataset = GraphDataset {
            nodes: two_nodes(),
            edges: vec![Edge::new("OrderService", "PaymentService", true)],
            bands: vec![],
        };
        assert_eq!(
            dataset.validate(),
            Err(GraphError::UnknownNode {
                edge: 0,
                node: "PaymentService".to_string(),
            })
        );
    }

    #[test]
    fn duplicate_node_ids_are_rejected() {
        let mut nodes = two_nodes();
        nodes.push(Node::new("Order", Layer::Domain, 340.0, 300.0));
        let dataset = GraphDataset {
            nodes,
            edges: vec![],
            bands: vec![],
        };
        assert_eq!(
            dataset.validate(),
            Err(GraphError::DuplicateNode("Order".to_string()))
        );
    }
}
