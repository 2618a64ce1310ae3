pub mod dsa {
    pub mod bitset;
    pub mod graph;
}
pub mod linear_algebra {
    pub mod matrix;
}
pub mod fog_placement;
