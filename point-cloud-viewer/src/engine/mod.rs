pub mod camera;
pub mod core;
pub mod loading;
pub mod render;
pub mod scene;
pub mod systems;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_support;
