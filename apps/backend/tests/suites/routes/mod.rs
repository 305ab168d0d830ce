pub mod error_shape;
