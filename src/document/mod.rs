//! The exported document: schema types and assembly from a scene.

mod assemble;
mod schema;

pub use assemble::*;
pub use schema::*;
