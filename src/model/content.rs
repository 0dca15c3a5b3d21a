//! 双语内容块渲染模型
//!
//! 每个内容块同时携带法文与中文，渲染结果是一串布局行：
//! 标题是一个语义单元（一个分节标记，两种语言各一份标题），
//! 其他块一律输出一行“法文格 + 中文格”，任何一侧为空也不会跳过。

use serde::Deserialize;

use crate::model::topic_tree::null_as_default;
use crate::vm::bridge::{
    LABEL_EMPTY_CN, LABEL_EMPTY_FR, LABEL_FURTHER_READING_CN, LABEL_OBJECTIVES_CN, LABEL_OBJECTIVES_FR,
};

/// 内容块类型标签；未知标签归入 `Unknown`，按段落处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading,
    IntroBox,
    Callout,
    ListItem,
    Image,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    /// 法文内容；图片块为图片地址
    #[serde(default, deserialize_with = "null_as_default")]
    pub fr: String,
    /// 中文内容；图片块为可选说明，可能为空（未翻译）
    #[serde(default, deserialize_with = "null_as_default")]
    pub cn: String,
    /// 仅标题块有意义：1 为大节，其余任意整数为小节
    #[serde(default)]
    pub level: Option<i64>,
}

impl ContentBlock {
    pub fn new(kind: BlockKind, fr: &str, cn: &str) -> Self {
        Self {
            kind,
            fr: fr.to_string(),
            cn: cn.to_string(),
            level: None,
        }
    }

    pub fn heading(level: i64, fr: &str, cn: &str) -> Self {
        Self {
            level: Some(level),
            ..Self::new(BlockKind::Heading, fr, cn)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// 大节：开启新分节，带上边距/分隔线
    Major,
    Minor,
}

impl HeadingLevel {
    /// 缺省按大节处理
    pub fn from_level(level: Option<i64>) -> Self {
        match level {
            None | Some(1) => HeadingLevel::Major,
            Some(_) => HeadingLevel::Minor,
        }
    }
}

/// 一个单元格的呈现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// 两端对齐的正文
    Prose,
    /// 法文“Objectifs”强调框
    ObjectivesBox,
    /// 中文“学习目标”卡片
    ObjectivesCard,
    /// 法文延伸阅读：强调色边框
    AccentBox,
    /// 中文延伸阅读：浅色伴随框
    LightBox,
    Bullet,
    /// 法文侧图片引用
    Image,
    /// 中文侧图片说明
    Caption,
    /// 中文侧无说明时的占位框
    ImagePlaceholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub style: CellStyle,
    pub label: Option<&'static str>,
    pub text: String,
}

impl Cell {
    fn new(style: CellStyle, text: &str) -> Self {
        Self {
            style,
            label: None,
            text: text.to_string(),
        }
    }

    fn labelled(style: CellStyle, label: &'static str, text: &str) -> Self {
        Self {
            style,
            label: Some(label),
            text: text.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// 行类型，对应源块的语义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Paragraph,
    Objectives,
    FurtherReading,
    ListItem,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedRow {
    pub kind: RowKind,
    pub fr: Cell,
    pub cn: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMarker {
    pub level: HeadingLevel,
    pub fr: String,
    pub cn: String,
}

impl SectionMarker {
    pub fn starts_section(&self) -> bool {
        self.level == HeadingLevel::Major
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutRow {
    Section(SectionMarker),
    Pair(PairedRow),
    /// 空内容占位，两种语言各一句
    Empty { fr: &'static str, cn: &'static str },
}

/// 渲染结果：按源块顺序排列的布局行
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentLayout {
    pub rows: Vec<LayoutRow>,
}

impl ContentLayout {
    /// 成对行的数量（不含标题与占位）
    pub fn pair_count(&self) -> usize {
        self.rows.iter().filter(|r| matches!(r, LayoutRow::Pair(_))).count()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [LayoutRow::Empty { .. }])
    }
}

/// 将内容块序列渲染为双栏布局描述
pub fn render_content(blocks: &[ContentBlock]) -> ContentLayout {
    if blocks.is_empty() {
        return ContentLayout {
            rows: vec![LayoutRow::Empty {
                fr: LABEL_EMPTY_FR,
                cn: LABEL_EMPTY_CN,
            }],
        };
    }
    ContentLayout {
        rows: blocks.iter().map(render_block).collect(),
    }
}

fn render_block(block: &ContentBlock) -> LayoutRow {
    let (kind, fr, cn) = match block.kind {
        BlockKind::Heading => {
            return LayoutRow::Section(SectionMarker {
                level: HeadingLevel::from_level(block.level),
                fr: block.fr.clone(),
                cn: block.cn.clone(),
            });
        }
        BlockKind::IntroBox => (
            RowKind::Objectives,
            Cell::labelled(CellStyle::ObjectivesBox, LABEL_OBJECTIVES_FR, &block.fr),
            Cell::labelled(CellStyle::ObjectivesCard, LABEL_OBJECTIVES_CN, &block.cn),
        ),
        BlockKind::Callout => (
            RowKind::FurtherReading,
            Cell::new(CellStyle::AccentBox, &block.fr),
            Cell::labelled(CellStyle::LightBox, LABEL_FURTHER_READING_CN, &block.cn),
        ),
        BlockKind::ListItem => (
            RowKind::ListItem,
            Cell::new(CellStyle::Bullet, &block.fr),
            Cell::new(CellStyle::Bullet, &block.cn),
        ),
        BlockKind::Image => {
            let caption = if block.cn.trim().is_empty() {
                Cell::new(CellStyle::ImagePlaceholder, "")
            } else {
                Cell::new(CellStyle::Caption, &block.cn)
            };
            (RowKind::Image, Cell::new(CellStyle::Image, &block.fr), caption)
        }
        BlockKind::Paragraph | BlockKind::Unknown => (
            RowKind::Paragraph,
            Cell::new(CellStyle::Prose, &block.fr),
            Cell::new(CellStyle::Prose, &block.cn),
        ),
    };
    LayoutRow::Pair(PairedRow { kind, fr, cn })
}
