use ess_portal::api::notification::notification_feed;
use ess_portal::api::slip_page::PageKind;
use ess_portal::config::Config;
use ess_portal::db::LoadState;
use ess_portal::session::Session;
use tracing::{info, warn};
use tracing_appender::rolling;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Portal session starting...");

    let session = Session::open(&config)?;

    for kind in [PageKind::Salary, PageKind::Incentive, PageKind::Allowance] {
        match session.slip_page(kind) {
            LoadState::Ready(page) => {
                let view = page.view();
                info!(?kind, year = view.criteria.year, "{}", view.found_label);
            }
            LoadState::Failed { reason } => warn!(?kind, %reason, "Slip list unavailable"),
        }
    }

    let feed = notification_feed(&session.notifications);
    info!(
        unread = feed.unread_count,
        today = feed.today.len(),
        older = feed.older.len(),
        "Notifications ready"
    );

    let dashboard = session.dashboard();
    info!(
        user = %dashboard.display_name,
        authenticated = session.auth.is_authenticated(),
        latest_slip = ?dashboard.latest_salary_slip.as_ref().map(|s| &s.id),
        "Dashboard ready"
    );

    Ok(())
}
