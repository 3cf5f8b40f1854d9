use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::api::slip_page::{default_year, PageKind, SlipPage};
use crate::auth::session::{AuthError, AuthState, Credentials};
use crate::config::Config;
use crate::db::{Catalog, LoadState};
use crate::model::slip::SlipRecord;
use crate::models::LoginReqDto;
use crate::utils::local_storage::{FileStorage, LocalStorage};
use crate::utils::notification_center::NotificationCenter;
use crate::utils::notification_store::LocalNotificationStore;
use crate::utils::record_filter::{distinct_years, filter_and_sort, FilterCriteria};

pub type SharedStorage = Arc<dyn LocalStorage>;

/// Home page summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub display_name: String,
    pub unread_notifications: usize,
    pub latest_salary_slip: Option<SlipRecord>,
}

/// All per-session state, owned in one place and handed out by reference.
pub struct Session {
    pub catalog: Catalog,
    pub auth: AuthState<SharedStorage>,
    pub notifications: NotificationCenter<LocalNotificationStore<SharedStorage>>,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self> {
        let storage: SharedStorage = Arc::new(FileStorage::open(&config.storage_dir)?);
        let catalog = Catalog::load(&config.data_dir);
        Ok(Self::with_storage(config, storage, catalog))
    }

    pub fn with_storage(config: &Config, storage: SharedStorage, catalog: Catalog) -> Self {
        let credentials = Credentials {
            username: config.portal_username.clone(),
            password: config.portal_password.clone(),
            display_name: config.display_name.clone(),
        };

        let auth = AuthState::restore(storage.clone(), credentials);
        let notifications = NotificationCenter::open(LocalNotificationStore::new(storage));
        info!(authenticated = auth.is_authenticated(), "Session opened");

        Self {
            catalog,
            auth,
            notifications,
        }
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        self.auth.login(&LoginReqDto {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn logout(&mut self) -> Result<()> {
        self.auth.logout()
    }

    fn records(&self, kind: PageKind) -> &LoadState<Vec<SlipRecord>> {
        match kind {
            PageKind::Salary => &self.catalog.salary_slips,
            PageKind::Incentive => &self.catalog.incentive_slips,
            PageKind::Allowance => &self.catalog.allowances,
        }
    }

    pub fn slip_page(&self, kind: PageKind) -> LoadState<SlipPage<'_>> {
        self.slip_page_on(kind, Local::now().date_naive())
    }

    pub fn slip_page_on(&self, kind: PageKind, today: NaiveDate) -> LoadState<SlipPage<'_>> {
        match self.records(kind) {
            LoadState::Ready(records) => LoadState::Ready(SlipPage::open(kind, records, today)),
            LoadState::Failed { reason } => LoadState::Failed {
                reason: reason.clone(),
            },
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        self.dashboard_on(Local::now().date_naive())
    }

    /// Latest slip of the year the salary page would open on.
    pub fn dashboard_on(&self, today: NaiveDate) -> Dashboard {
        let latest_salary_slip = self.catalog.salary_slips.ready().and_then(|records| {
            let view = PageKind::Salary.view();
            let year = default_year(&distinct_years(records, view), today.year());
            filter_and_sort(records, &FilterCriteria::for_year(year), view)
                .first()
                .map(|r| (*r).clone())
        });

        Dashboard {
            display_name: self.auth.display_name(),
            unread_notifications: self.notifications.unread_count(),
            latest_salary_slip,
        }
    }
}
