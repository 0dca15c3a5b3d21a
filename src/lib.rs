//! 法语/中文对照公民手册
//!
//! 提供主题树索引、导航状态机与双语内容块渲染模型
//! 遵循MVVM架构模式，界面层只消费这里产出的布局描述

pub mod config;
pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::content::{render_content, BlockKind, ContentBlock, ContentLayout, LayoutRow};
pub use model::data_core::{AppError, AppState};
pub use model::navigation::{click_event, NavEvent, NavigationState};
pub use model::topic_tree::{index, lookup, Topic, TopicKind, TopicTree, TreeError};
pub use model::view::ActiveView;
