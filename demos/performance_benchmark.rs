//! 性能基准：运行合成数据上的综合测试并打印结果
//!
//! cargo run --release --example performance_benchmark

use livret_citoyen::model::performance::run_performance_suite;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() {
    let _ = SubscriberBuilder::default().with_max_level(tracing::Level::INFO).try_init();

    let results = run_performance_suite();
    println!("{:<20} {:>10} {:>6}  详情", "操作", "耗时(ms)", "结果");
    for result in &results {
        println!(
            "{:<20} {:>10} {:>6}  {}",
            result.operation,
            result.duration_ms,
            if result.success { "✓" } else { "✗" },
            result.details
        );
    }

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        eprintln!("{} 项测试失败", failed);
        std::process::exit(1);
    }
}
