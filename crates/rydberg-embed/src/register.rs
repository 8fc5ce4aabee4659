use rydberg_layout::{Device, Layout, Point};

/// Atom positions keyed by qubit id, ready for pulse generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    device: String,
    qubits: Vec<(String, Point)>,
}

impl Register {
    /// Variable `i` becomes qubit `q{i}`.
    pub fn from_layout(layout: &Layout, device: &Device) -> Self {
        let qubits = layout
            .iter()
            .map(|(i, p)| (format!("q{i}"), *p))
            .collect();
        Self {
            device: device.name().to_string(),
            qubits,
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device
    }

    pub fn qubits(&self) -> &[(String, Point)] {
        &self.qubits
    }

    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Point> {
        self.qubits.iter().find(|(q, _)| q == id).map(|(_, p)| p)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.qubits.iter().map(|(q, _)| q.as_str())
    }

    pub fn to_layout(&self) -> Layout {
        self.qubits.iter().map(|(_, p)| *p).collect()
    }

    pub fn to_coords(&self) -> Vec<(f64, f64)> {
        self.qubits.iter().map(|(_, p)| (p.x, p.y)).collect()
    }
}
