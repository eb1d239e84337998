pub mod emitter;
pub mod label;
pub mod sprite;
pub mod vehicle;
