use geo::Geometry;

#[derive(Debug, Clone, PartialEq)]
pub struct Neighbourhood {
    pub neighbourhood: String,
    pub neighbourhood_group: String,
    pub boundary: Geometry<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Waterway {
    /// Square metres; taken from the feature's `area` property when present.
    pub area: f64,
    pub shape: Geometry<f64>,
}
