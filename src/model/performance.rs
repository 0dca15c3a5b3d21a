//! 性能基准测试模块
//!
//! 用合成的大型主题森林测试索引构建、侧边栏投影和内容渲染的耗时

use std::time::Instant;

use crate::model::content::{render_content, BlockKind, ContentBlock};
use crate::model::navigation::NavigationState;
use crate::model::topic_tree::{index, Topic, TopicTree};

/// 性能测试结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

const BLOCK_CYCLE: [BlockKind; 6] = [
    BlockKind::Heading,
    BlockKind::IntroBox,
    BlockKind::Paragraph,
    BlockKind::ListItem,
    BlockKind::Callout,
    BlockKind::Image,
];

/// 生成合成主题森林：`width` 个根，每层 `width` 个子节点，叶子带混合内容块
pub fn generate_forest(depth: usize, width: usize) -> Vec<Topic> {
    fn make_topic(id: String, current_depth: usize, max_depth: usize, width: usize) -> Topic {
        let mut topic = Topic {
            title_fr: format!("Sujet {}", id),
            title_cn: format!("主题 {}", id),
            id,
            ..Topic::default()
        };
        if current_depth + 1 >= max_depth {
            topic.content = (0..width * 2)
                .map(|i| {
                    let kind = BLOCK_CYCLE[i % BLOCK_CYCLE.len()];
                    // 每隔三块留一个未翻译的中文格
                    let cn = if i % 3 == 0 { String::new() } else { format!("第{}段", i) };
                    ContentBlock {
                        kind,
                        fr: format!("Bloc {}", i),
                        cn,
                        level: (kind == BlockKind::Heading).then_some(1 + (i % 2) as i64),
                    }
                })
                .collect();
        } else {
            topic.children = (0..width)
                .map(|i| make_topic(format!("{}-{}", topic.id, i), current_depth + 1, max_depth, width))
                .collect();
        }
        topic
    }

    (0..width).map(|i| make_topic(format!("t{}", i), 0, depth, width)).collect()
}

fn count_nodes(roots: &[Topic]) -> usize {
    roots.iter().map(|t| 1 + count_nodes(&t.children)).sum()
}

/// 测试扁平索引与 arena 构建
pub fn benchmark_index(forest: &[Topic]) -> PerformanceResult {
    let expected = count_nodes(forest);
    let start = Instant::now();
    let map_len = index(forest).len();
    let arena = TopicTree::build(forest.to_vec());
    let duration = start.elapsed();

    match arena {
        Ok(tree) => PerformanceResult::new(
            "索引构建",
            duration.as_millis(),
            map_len == expected && tree.len() == expected,
            &format!("索引了 {} 个节点", tree.len()),
        ),
        Err(e) => PerformanceResult::new("索引构建", duration.as_millis(), false, &format!("构建失败: {}", e)),
    }
}

/// 测试全部展开时的侧边栏投影
pub fn benchmark_sidebar(tree: &TopicTree) -> PerformanceResult {
    let mut state = NavigationState::new("");
    for node in tree.iter().filter(|n| n.has_children()) {
        state = state.toggle_expand(&node.id);
    }

    let start = Instant::now();
    let rows = tree.sidebar_rows(&state);
    let duration = start.elapsed();

    PerformanceResult::new(
        "侧边栏投影",
        duration.as_millis(),
        rows.len() == tree.len(),
        &format!("生成了 {} 行", rows.len()),
    )
}

/// 测试所有叶子主题的内容渲染
pub fn benchmark_render(tree: &TopicTree) -> PerformanceResult {
    let start = Instant::now();
    let mut rows = 0;
    let mut success = true;
    for node in tree.iter().filter(|n| !n.has_children()) {
        let layout = render_content(&node.content);
        success &= layout.rows.len() == node.content.len().max(1);
        rows += layout.rows.len();
    }
    let duration = start.elapsed();

    PerformanceResult::new("内容渲染", duration.as_millis(), success, &format!("渲染了 {} 行", rows))
}

/// 运行综合性能测试
pub fn run_performance_suite() -> Vec<PerformanceResult> {
    let mut results = Vec::new();

    // 测试不同规模的数据
    let test_cases = [
        (2, 5),  // 小型：深度2，宽度5
        (3, 8),  // 中型：深度3，宽度8
        (4, 10), // 大型：深度4，宽度10
    ];

    for (depth, width) in test_cases {
        tracing::info!("测试规模：深度{}，宽度{}", depth, width);

        let start = Instant::now();
        let forest = generate_forest(depth, width);
        results.push(PerformanceResult::new(
            &format!("数据生成({}x{})", depth, width),
            start.elapsed().as_millis(),
            true,
            &format!("生成了 {} 个节点", count_nodes(&forest)),
        ));

        results.push(benchmark_index(&forest));

        match TopicTree::build(forest) {
            Ok(tree) => {
                results.push(benchmark_sidebar(&tree));
                results.push(benchmark_render(&tree));
            }
            Err(e) => tracing::error!("合成数据构建失败: {}", e),
        }
    }

    results
}
