use sentinel_core::{feed_rows, AnalysisStatus, Sentinel, SentinelConfig};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging / tracing
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,sentinel_core=info,console_hud=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(target = "console_hud", "Starting Sentinel console HUD");

    let cfg = SentinelConfig::from_env();
    let mut sentinel = Sentinel::new(cfg);

    let mut arcs_rx = sentinel.state.subscribe_arcs();
    let mut summary_rx = sentinel.state.subscribe_summary();
    let mut analysis_rx = sentinel.state.subscribe_analysis();

    sentinel.start();

    // Live feed panel: re-derive the display rows on every arc batch.
    let feed_task = tokio::spawn(async move {
        while arcs_rx.changed().await.is_ok() {
            let arcs = arcs_rx.borrow_and_update().clone();
            println!("── incoming packets ({} arcs) ──", arcs.len());
            for row in feed_rows(&arcs).iter().take(8) {
                println!(
                    "  [{}] {:<18} {:.2}, {:.2}",
                    row.tier.as_str(),
                    row.label,
                    row.lat,
                    row.lng
                );
            }
        }
    });

    // Active signatures panel: the view shows the top 4.
    let summary_task = tokio::spawn(async move {
        while summary_rx.changed().await.is_ok() {
            let summary = summary_rx.borrow_and_update().clone();
            println!("── active signatures ──");
            for entry in summary.iter().take(4) {
                println!("  {:<24} {}", entry.label, entry.count);
            }
        }
    });

    // SITREP panel.
    let analysis_task = tokio::spawn(async move {
        while analysis_rx.changed().await.is_ok() {
            let report = analysis_rx.borrow_and_update().clone();
            match report.status {
                AnalysisStatus::Pending => println!("── SITREP: decrypting... ──"),
                AnalysisStatus::Ready | AnalysisStatus::Failed => {
                    println!("── SITREP ──\n{}", report.text.unwrap_or_default());
                }
                AnalysisStatus::Idle => {}
            }
        }
    });

    // Ask for one report after the first data has landed.
    let analysis = sentinel.analysis.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        analysis.trigger();
    });

    signal::ctrl_c().await?;
    info!(target = "console_hud", "Ctrl-C received; shutting down");

    sentinel.shutdown().await;
    feed_task.abort();
    summary_task.abort();
    analysis_task.abort();

    Ok(())
}
