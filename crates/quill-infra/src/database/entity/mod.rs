//! SeaORM entities used for row mapping.

pub mod post;
