//! 程序入口：解析配置、初始化日志、加载数据集并绑定 Slint UI

use std::{cell::RefCell, rc::Rc, time::Instant};

use anyhow::{anyhow, Context};
use clap::Parser;
use slint::{ComponentHandle, ModelRc, SharedString, VecModel};
use tracing_subscriber::fmt::SubscriberBuilder;

use livret_citoyen::config::Args;
use livret_citoyen::model::content::{Cell, CellStyle, HeadingLevel, LayoutRow, RowKind};
use livret_citoyen::model::topic_tree::SidebarRow;
use livret_citoyen::model::view::{ActiveView, CategoryCard};
use livret_citoyen::utils::fs::is_web_url;
use livret_citoyen::vm::bridge::*;
use livret_citoyen::AppState;

slint::include_modules!();

/// 内置数据集（未配置 --dataset 时使用）
const BUNDLED_DATASET: &str = include_str!("../data/livret.json");

// SidebarRowData转换实现
impl From<&SidebarRow> for SidebarRowData {
    fn from(row: &SidebarRow) -> Self {
        Self {
            id: row.id.clone().into(),
            title_fr: row.title_fr.clone().into(),
            title_cn: row.title_cn.clone().into(),
            depth: row.depth as i32,
            has_children: row.has_children,
            expanded: row.expanded,
            active: row.active,
            icon: row.icon.map(|i| i.glyph()).unwrap_or_default().into(),
        }
    }
}

impl From<&CategoryCard> for CardData {
    fn from(card: &CategoryCard) -> Self {
        Self {
            id: card.id.clone().into(),
            title_fr: card.title_fr.clone().into(),
            title_cn: card.title_cn.clone().into(),
            badge: card.badge.clone().into(),
        }
    }
}

// ContentRowData转换实现：kind 字符串与 app.slint 中的分支一一对应
impl From<&LayoutRow> for ContentRowData {
    fn from(row: &LayoutRow) -> Self {
        fn label(cell: &Cell) -> SharedString {
            cell.label.unwrap_or_default().into()
        }

        match row {
            LayoutRow::Section(marker) => Self {
                kind: match marker.level {
                    HeadingLevel::Major => "section-major",
                    HeadingLevel::Minor => "section-minor",
                }
                .into(),
                fr: marker.fr.clone().into(),
                cn: marker.cn.clone().into(),
                fr_label: SharedString::default(),
                cn_label: SharedString::default(),
                cn_placeholder: false,
                picture: slint::Image::default(),
            },
            LayoutRow::Pair(pair) => Self {
                kind: match pair.kind {
                    RowKind::Paragraph => "paragraph",
                    RowKind::Objectives => "objectives",
                    RowKind::FurtherReading => "further-reading",
                    RowKind::ListItem => "list-item",
                    RowKind::Image => "image",
                }
                .into(),
                fr: pair.fr.text.clone().into(),
                cn: pair.cn.text.clone().into(),
                fr_label: label(&pair.fr),
                cn_label: label(&pair.cn),
                cn_placeholder: pair.cn.style == CellStyle::ImagePlaceholder,
                picture: slint::Image::default(),
            },
            LayoutRow::Empty { fr, cn } => Self {
                kind: "empty".into(),
                fr: (*fr).into(),
                cn: (*cn).into(),
                fr_label: SharedString::default(),
                cn_label: SharedString::default(),
                cn_placeholder: false,
                picture: slint::Image::default(),
            },
        }
    }
}

/// VM桥接器：管理UI与数据层的交互
struct ViewModelBridge {
    app_state: Rc<RefCell<AppState>>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, app_state: Rc<RefCell<AppState>>) -> Self {
        let bridge = Self { app_state };
        bridge.setup_callbacks(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        // === 侧边栏点击回调 ===
        {
            let app_state = self.app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_sidebar_clicked(move |id| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_state.borrow_mut().click_sidebar(id.as_str());
                    Self::refresh(&app_window, &app_state);
                }
            });
        }

        // === 分类卡片点击回调 ===
        {
            let app_state = self.app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_card_clicked(move |id| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_state.borrow_mut().open_card(id.as_str());
                    Self::refresh(&app_window, &app_state);
                }
            });
        }

        // === 官方原文链接回调 ===
        app_window.on_source_clicked(|url| {
            if !is_web_url(url.as_str()) {
                tracing::warn!("忽略非网页链接: {}", url);
                return;
            }
            match open::that(url.as_str()) {
                Ok(()) => tracing::info!("已在浏览器中打开: {}", url),
                Err(e) => tracing::warn!("无法打开链接 {}: {}", url, e),
            }
        });
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_app_title_fr(APP_TITLE_FR.into());
        app_window.set_app_title_cn(APP_TITLE_CN.into());
        app_window.set_motto(APP_MOTTO.into());
        app_window.set_column_header_fr(COLUMN_HEADER_FR.into());
        app_window.set_column_header_cn(COLUMN_HEADER_CN.into());
        app_window.set_prompt_fr(PROMPT_SELECT_FR.into());
        app_window.set_prompt_cn(PROMPT_SELECT_CN.into());
        app_window.set_page_eyebrow(LABEL_CATEGORY_EYEBROW.into());
        app_window.set_key_points_label(LABEL_KEY_POINTS_CN.into());
        app_window.set_status_message(STATUS_READY.into());

        Self::refresh(app_window, &self.app_state);
    }

    /// 按当前导航快照重建侧边栏与主区域
    fn refresh(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let start_time = Instant::now();
        let state = app_state.borrow();

        let sidebar: Vec<SidebarRowData> = state.sidebar_rows().iter().map(SidebarRowData::from).collect();
        app_window.set_sidebar_model(ModelRc::new(VecModel::from(sidebar)));

        match state.active_view() {
            ActiveView::Category(listing) => {
                app_window.set_view_mode("category".into());
                app_window.set_page_title_fr(listing.title_fr.into());
                app_window.set_page_title_cn(listing.title_cn.into());
                let cards: Vec<CardData> = listing.cards.iter().map(CardData::from).collect();
                app_window.set_card_model(ModelRc::new(VecModel::from(cards)));
                app_window.set_status_message(STATUS_LOADED.into());
            }
            ActiveView::Topic(page) => {
                app_window.set_view_mode("topic".into());
                app_window.set_page_title_fr(page.title_fr.into());
                app_window.set_page_title_cn(page.title_cn.into());
                let (source_label, source_url): (SharedString, SharedString) = page
                    .source
                    .map(|s| (s.label.into(), s.url.into()))
                    .unwrap_or_default();
                app_window.set_source_label(source_label);
                app_window.set_source_url(source_url);
                let key_points: Vec<SharedString> = page.key_points.into_iter().map(SharedString::from).collect();
                app_window.set_key_points(ModelRc::new(VecModel::from(key_points)));
                let rows: Vec<ContentRowData> = page
                    .body
                    .rows
                    .iter()
                    .map(|row| {
                        let mut data = ContentRowData::from(row);
                        if let LayoutRow::Pair(pair) = row {
                            if pair.kind == RowKind::Image {
                                data.picture = Self::load_picture(&state, &pair.fr.text);
                            }
                        }
                        data
                    })
                    .collect();
                app_window.set_content_model(ModelRc::new(VecModel::from(rows)));
                app_window.set_status_message(STATUS_LOADED.into());
            }
            ActiveView::NoSelection => {
                app_window.set_view_mode("none".into());
                app_window.set_status_message(
                    format!("{}: {}", STATUS_NO_SELECTION, state.navigation().active_id()).into(),
                );
            }
        }

        tracing::debug!("界面刷新完成，耗时: {:.1}ms", start_time.elapsed().as_secs_f64() * 1000.0);
    }

    /// 加载图片块引用的本地图片；找不到或解码失败时返回空图片
    fn load_picture(state: &AppState, reference: &str) -> slint::Image {
        let Some(path) = state.resolve_asset(reference) else {
            tracing::debug!("图片未找到本地文件: {}", reference);
            return slint::Image::default();
        };
        slint::Image::load_from_path(&path).unwrap_or_else(|_| {
            tracing::warn!("图片加载失败: {}", path.display());
            slint::Image::default()
        })
    }
}

fn load_state(args: &Args) -> anyhow::Result<AppState> {
    match &args.dataset {
        Some(path) => AppState::load_file(path, &args.start_topic)
            .with_context(|| format!("无法加载数据集: {}", path.display())),
        None => AppState::from_json_str(BUNDLED_DATASET, &args.start_topic).context("内置数据集无效"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.validate().map_err(|e| anyhow!(e))?;

    // 初始化日志输出
    let max_level = args.max_level().map_err(|e| anyhow!(e))?;
    let _ = SubscriberBuilder::default().with_max_level(max_level).try_init();

    let start_time = Instant::now();
    let state = match load_state(&args) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("数据集加载失败: {:#}", e);
            return Err(e);
        }
    };
    tracing::info!(
        "数据集加载成功: {}，耗时: {:.1}ms",
        state
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "内置".to_string()),
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    let app = AppWindow::new().context("UI 初始化失败")?;
    let state = Rc::new(RefCell::new(state));

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, state);
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run().context("UI 事件循环异常退出")?;
    Ok(())
}
