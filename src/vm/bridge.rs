//! VM桥接层：连接Slint UI与AppState数据模型
//!
//! 注意：回调绑定在main.rs中，因为依赖于Slint生成的类型
//! 这里只提供界面文案与状态消息常量

// === 状态消息 ===
pub const STATUS_READY: &str = "就绪";
pub const STATUS_LOADED: &str = "资料加载完成";
pub const STATUS_NO_SELECTION: &str = "未找到该主题";

// === 应用标题 ===
pub const APP_TITLE_FR: &str = "Livret Citoyen";
pub const APP_TITLE_CN: &str = "法国公民入籍指南";
pub const APP_MOTTO: &str = "Liberté • Égalité • Fraternité";

// === 栏目标题 ===
pub const COLUMN_HEADER_FR: &str = "Version Française";
pub const COLUMN_HEADER_CN: &str = "中文翻译";

// === 内容块标签 ===
pub const LABEL_OBJECTIVES_FR: &str = "Objectifs";
pub const LABEL_OBJECTIVES_CN: &str = "学习目标";
pub const LABEL_FURTHER_READING_CN: &str = "延伸阅读";
pub const LABEL_KEY_POINTS_CN: &str = "考试要点";
pub const LABEL_EMPTY_FR: &str = "Contenu à venir.";
pub const LABEL_EMPTY_CN: &str = "内容暂未提供。";

// === 分类页与主题页 ===
pub const LABEL_CATEGORY_EYEBROW: &str = "Thématique";
pub const LABEL_SOURCE_LINK: &str = "查看官方原文 / Voir la source officielle";
pub const BADGE_LEAF: &str = "FICHE";
pub const BADGE_CHAPTERS_SUFFIX: &str = "CHAPITRES";

// === 未选中主题 ===
pub const PROMPT_SELECT_CN: &str = "请从左侧菜单选择一个具体的子主题。";
pub const PROMPT_SELECT_FR: &str = "Veuillez sélectionner un sujet dans le menu.";
