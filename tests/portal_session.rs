use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use ess_portal::api::slip_page::PageKind;
use ess_portal::auth::session::AuthError;
use ess_portal::config::Config;
use ess_portal::db::{Catalog, LoadState};
use ess_portal::model::notification::NotificationId;
use ess_portal::session::{Session, SharedStorage};
use ess_portal::utils::local_storage::{keys, FileStorage, LocalStorage};
use ess_portal::utils::record_filter::MonthSelection;
use tempfile::TempDir;

struct TestEnvironment {
    config: Config,
    _storage_dir: TempDir,
}

impl TestEnvironment {
    fn new() -> Self {
        let storage_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"),
            storage_dir: storage_dir.path().join("storage"),
            display_name: "Jane Doe".into(),
            ..Config::default()
        };
        Self {
            config,
            _storage_dir: storage_dir,
        }
    }

    fn open(&self) -> Session {
        Session::open(&self.config).unwrap()
    }

    fn storage(&self) -> FileStorage {
        FileStorage::open(&self.config.storage_dir).unwrap()
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn salary_page_over_bundled_fixtures() {
    let env = TestEnvironment::new();
    let session = env.open();

    let page = match session.slip_page_on(PageKind::Salary, day(2025, 6, 15)) {
        LoadState::Ready(page) => page,
        LoadState::Failed { reason } => panic!("fixtures failed to load: {reason}"),
    };
    let view = page.view();

    assert_eq!(view.years, vec![2026, 2025, 2024]);
    assert_eq!(view.criteria.year, 2025);
    assert_eq!(view.found_label, "12 slips found");
    assert_eq!(view.items.first().map(|s| s.id.as_str()), Some("SAL-2025-12"));
    assert_eq!(view.items.last().map(|s| s.id.as_str()), Some("SAL-2025-01"));
}

#[test]
fn allowance_page_defaults_to_current_month() {
    let env = TestEnvironment::new();
    let session = env.open();

    let LoadState::Ready(mut page) = session.slip_page_on(PageKind::Allowance, day(2025, 3, 2)) else {
        panic!("allowances failed to load");
    };
    assert_eq!(page.criteria().month, MonthSelection::Only("March".into()));

    let ids: Vec<String> = page.view().items.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["AL-2025-03-F", "AL-2025-03-M", "AL-2025-03-S"]);

    // 2024 starts in July and has no spouse allowance
    page.select_year(2024);
    assert_eq!(page.criteria().month, MonthSelection::Only("July".into()));
    assert_eq!(page.view().found_label, "2 allowances found");
}

#[test]
fn read_state_survives_a_new_session() {
    let env = TestEnvironment::new();
    {
        let mut session = env.open();
        assert_eq!(session.notifications.unread_count(), 3);
        assert!(session.notifications.mark_as_read(&NotificationId::Number(1)));
    }

    let mut session = env.open();
    assert_eq!(session.notifications.unread_count(), 2);
    assert!(session.notifications.notifications()[0].read);

    session.notifications.mark_all_as_read();
    assert_eq!(env.open().notifications.unread_count(), 0);
}

#[test]
fn corrupt_notifications_are_reseeded() {
    let env = TestEnvironment::new();
    env.storage()
        .set_item(keys::NOTIFICATIONS, "[{\"id\": 1, \"title\": ")
        .unwrap();

    let session = env.open();
    assert_eq!(session.notifications.notifications().len(), 3);
    assert_eq!(session.notifications.unread_count(), 3);

    // the bad value was replaced by the seed
    let raw = env.storage().get_item(keys::NOTIFICATIONS).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.as_array().map(Vec::len), Some(3));
}

#[test]
fn login_is_remembered_until_logout() {
    let env = TestEnvironment::new();
    {
        let mut session = env.open();
        assert_eq!(
            session.login("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        session.login("admin", "password").unwrap();
    }

    let mut session = env.open();
    assert!(session.auth.is_authenticated());
    assert_eq!(session.dashboard().display_name, "Jane Doe");

    session.logout().unwrap();
    assert!(!env.open().auth.is_authenticated());
}

#[test]
fn dashboard_shows_latest_slip_of_default_year() {
    let env = TestEnvironment::new();
    let session = env.open();

    let dashboard = session.dashboard_on(day(2026, 10, 18));
    assert_eq!(dashboard.unread_notifications, 3);
    assert_eq!(dashboard.display_name, "User");
    assert_eq!(
        dashboard.latest_salary_slip.map(|s| s.id),
        Some("SAL-2026-09".to_string())
    );
}

#[test]
fn missing_fixtures_surface_as_failed_pages() {
    let storage_dir = TempDir::new().unwrap();
    let empty_data = TempDir::new().unwrap();
    let config = Config::default();
    let storage: SharedStorage = Arc::new(FileStorage::open(storage_dir.path()).unwrap());

    let session = Session::with_storage(&config, storage, Catalog::load(empty_data.path()));
    assert!(session.slip_page(PageKind::Incentive).is_failed());
    assert_eq!(session.dashboard().latest_salary_slip, None);
    assert_eq!(session.notifications.unread_count(), 3);
}
