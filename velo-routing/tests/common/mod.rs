//! Builds small graph directories for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use velo_geometry::SwissBounds;
use velo_io::{EdgeId, NodeId};
use velo_routing::Graph;

/// Origin of the test area; every node within ±500 m stays in one sector.
pub const E0: f64 = 2_600_000.0;
pub const N0: f64 = 1_200_000.0;

#[derive(Debug, Clone)]
pub struct EdgeSpec {
    from: NodeId,
    to: NodeId,
    length: f64,
    gain: f64,
    attributes: u16,
    inverted: bool,
    samples: Option<Vec<f32>>,
}

impl EdgeSpec {
    pub fn new(from: NodeId, to: NodeId, length: f64) -> Self {
        Self {
            from,
            to,
            length,
            gain: 0.0,
            attributes: 0,
            inverted: false,
            samples: None,
        }
    }

    pub fn gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn attributes(mut self, index: u16) -> Self {
        self.attributes = index;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    /// Raw samples in storage order, `1 + ceil(length * 16 / 32)` of them.
    pub fn samples(mut self, samples: Vec<f32>) -> Self {
        self.samples = Some(samples);
        self
    }
}

#[derive(Debug, Clone)]
pub struct GraphBuilder {
    nodes: Vec<(f64, f64)>,
    edges: Vec<EdgeSpec>,
    attributes: Vec<u64>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            attributes: vec![0],
        }
    }
}

fn q4(value: f64) -> u32 {
    (value * 16.0).round() as u32
}

fn sector_of(e: f64, n: f64) -> usize {
    let col = ((e - SwissBounds::MIN_E) / (SwissBounds::WIDTH / 128.0)).floor().clamp(0.0, 127.0);
    let row = ((n - SwissBounds::MIN_N) / (SwissBounds::HEIGHT / 128.0)).floor().clamp(0.0, 127.0);
    row as usize * 128 + col as usize
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at absolute coordinates. Nodes must be added in sector order.
    pub fn node_at(&mut self, e: f64, n: f64) -> NodeId {
        self.nodes.push((e, n));
        (self.nodes.len() - 1) as NodeId
    }

    /// Adds a node at an offset from (`E0`, `N0`).
    pub fn node(&mut self, de: f64, dn: f64) -> NodeId {
        self.node_at(E0 + de, N0 + dn)
    }

    pub fn attribute_set(&mut self, bits: u64) -> u16 {
        self.attributes.push(bits);
        (self.attributes.len() - 1) as u16
    }

    pub fn edge(&mut self, spec: EdgeSpec) -> &mut Self {
        self.edges.push(spec);
        self
    }

    /// Edges both ways, each as long as the straight line rounded up to 1/16 m.
    pub fn road(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        let length = self.straight(a, b);
        self.edge(EdgeSpec::new(a, b, length));
        self.edge(EdgeSpec::new(b, a, length))
    }

    pub fn straight(&self, a: NodeId, b: NodeId) -> f64 {
        let (ae, an) = self.nodes[a as usize];
        let (be, bn) = self.nodes[b as usize];
        let d = ((be - ae).powi(2) + (bn - an).powi(2)).sqrt();
        (d * 16.0).ceil() / 16.0
    }

    pub fn write(&self, dir: &Path) {
        let mut edges = self.edges.clone();
        edges.sort_by_key(|e| e.from);

        let sectors: Vec<usize> = self.nodes.iter().map(|&(e, n)| sector_of(e, n)).collect();
        assert!(sectors.windows(2).all(|w| w[0] <= w[1]), "nodes must be added in sector order");

        let mut buf = Vec::new();
        let mut next = 0usize;
        for sector in 0..128 * 128 {
            let count = sectors[next..].iter().take_while(|&&s| s == sector).count();
            buf.extend_from_slice(&(next as i32).to_be_bytes());
            buf.extend_from_slice(&(count as u16).to_be_bytes());
            next += count;
        }
        fs::write(dir.join("sectors.bin"), buf).unwrap();

        let mut buf = Vec::new();
        for (id, &(e, n)) in self.nodes.iter().enumerate() {
            let first = edges.iter().position(|s| s.from as usize >= id).unwrap_or(edges.len());
            let degree = edges.iter().filter(|s| s.from as usize == id).count() as u32;
            buf.extend_from_slice(&q4(e).to_be_bytes());
            buf.extend_from_slice(&q4(n).to_be_bytes());
            buf.extend_from_slice(&((degree << 28) | first as u32).to_be_bytes());
        }
        fs::write(dir.join("nodes.bin"), buf).unwrap();

        let (mut edge_buf, mut profile_buf, mut elevation_buf) = (Vec::new(), Vec::new(), Vec::new());
        let mut sample_count = 0u32;
        for spec in &edges {
            let target = if spec.inverted { !(spec.to as i32) } else { spec.to as i32 };
            edge_buf.extend_from_slice(&target.to_be_bytes());
            edge_buf.extend_from_slice(&(q4(spec.length) as u16).to_be_bytes());
            edge_buf.extend_from_slice(&(q4(spec.gain) as u16).to_be_bytes());
            edge_buf.extend_from_slice(&spec.attributes.to_be_bytes());

            let descriptor = match &spec.samples {
                None => 0u32,
                Some(samples) => {
                    for &s in samples {
                        elevation_buf.extend_from_slice(&(q4(f64::from(s)) as u16).to_be_bytes());
                    }
                    let descriptor = (1 << 30) | sample_count;
                    sample_count += samples.len() as u32;
                    descriptor
                }
            };
            profile_buf.extend_from_slice(&descriptor.to_be_bytes());
        }
        fs::write(dir.join("edges.bin"), edge_buf).unwrap();
        fs::write(dir.join("profile_ids.bin"), profile_buf).unwrap();
        fs::write(dir.join("elevations.bin"), elevation_buf).unwrap();

        let buf: Vec<u8> = self.attributes.iter().flat_map(|a| a.to_be_bytes()).collect();
        fs::write(dir.join("attributes.bin"), buf).unwrap();
    }

    /// Writes the graph to a fresh temporary directory and loads it back.
    pub fn load(&self) -> (TempDir, Graph) {
        let dir = TempDir::new().unwrap();
        self.write(dir.path());
        let graph = Graph::load_from(dir.path()).unwrap();
        (dir, graph)
    }
}

/// Id of the first edge leaving `from` towards `to`.
pub fn edge_between(graph: &Graph, from: NodeId, to: NodeId) -> EdgeId {
    (0..graph.node_out_degree(from).unwrap())
        .map(|i| graph.node_out_edge_id(from, i).unwrap())
        .find(|&e| graph.edge_target_node_id(e).unwrap() == to)
        .unwrap_or_else(|| panic!("no edge from {from} to {to}"))
}
