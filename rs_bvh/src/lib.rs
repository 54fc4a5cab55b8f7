pub mod bvh_parser;
pub mod channel;
pub mod error;
pub mod joint;
pub mod motion;
pub mod skeleton;
