pub mod blade;

pub use blade::BladeConfig;
