// Domain layer - analysis pipeline, chatbot and plant models
pub mod axis;
pub mod chart;
pub mod chat;
pub mod color;
pub mod fleet;
pub mod grid;
pub mod heatmap;
pub mod measurement;
pub mod plant;
pub mod sample;
