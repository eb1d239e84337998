pub mod motion;
pub mod scene;
pub mod time;
pub mod timeline;

#[cfg(test)]
mod proptest_scene;
