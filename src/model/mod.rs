pub mod content;
pub mod data_core;
pub mod navigation;
pub mod performance;
pub mod topic_tree;
pub mod view;
