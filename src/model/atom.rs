use super::types::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub position: [f64; 3],
    pub formal_charge: i8,
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self {
            element,
            position,
            formal_charge: 0,
        }
    }

    pub fn with_charge(mut self, formal_charge: i8) -> Self {
        self.formal_charge = formal_charge;
        self
    }

    #[inline]
    pub fn distance_to(&self, other: &Atom) -> f64 {
        let dx = self.position[0] - other.position[0];
        let dy = self.position[1] - other.position[1];
        let dz = self.position[2] - other.position[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
