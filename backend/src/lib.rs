pub mod glutils;
pub mod math;
pub mod shaders;
pub mod system;
