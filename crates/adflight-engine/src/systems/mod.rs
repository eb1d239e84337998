pub mod ad_gate;
pub mod celebration;
pub mod effects;
pub mod label;
pub mod render;
pub mod rotor;
