pub mod assets;
pub mod camera;
pub mod compute;
pub mod core;
pub mod loading;
pub mod mesh;
pub mod morph;
pub mod render;
pub mod simulation;
pub mod systems;
