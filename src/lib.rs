pub mod agents;
pub mod components;
pub mod plugins;
pub mod resources;
pub mod sensors;
pub mod systems;
pub mod utils;
