pub mod configure;
pub mod generate;
pub mod render;
pub mod screens;
pub mod serve;
