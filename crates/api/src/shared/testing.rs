use chrono::{TimeZone, Utc};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use upkeep_domain::{NaiveDate, Notification, Property, Reminder, ID};
use upkeep_infra::{
    setup_context, INotificationRepo, IReminderRepo, InMemoryNotificationRepo,
    InMemoryReminderRepo, SaveReminderError, StaticTimeSys, UpkeepContext,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Noon UTC of the given day in millis
pub fn noon_millis(day: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
        .timestamp_millis()
}

/// In-memory context whose clock is frozen at noon of `today`
pub async fn setup_at(today: NaiveDate) -> UpkeepContext {
    let mut ctx = setup_context().await;
    ctx.sys = Arc::new(StaticTimeSys(noon_millis(today)));
    ctx
}

pub async fn insert_property(
    ctx: &UpkeepContext,
    name: &str,
    service_type: &str,
    service_date: Option<NaiveDate>,
) -> Property {
    let mut property = Property::new(
        name.into(),
        service_type.into(),
        ctx.sys.get_timestamp_millis(),
    );
    property.contact = "555-0199".into();
    property.location = "Ring Road".into();
    property.service_date = service_date;
    property.is_on_hold = property.should_be_on_hold();
    ctx.repos.properties.insert(&property).await.unwrap();
    property
}

/// In-memory reminders where the next `conflicts` saves lose the
/// compare-and-set as if another writer got there first
pub struct ContendedReminderRepo {
    inner: InMemoryReminderRepo,
    conflicts: AtomicUsize,
    pub saves: AtomicUsize,
}

impl ContendedReminderRepo {
    pub fn install(ctx: &mut UpkeepContext, conflicts: usize) -> Arc<Self> {
        let repo = Arc::new(Self {
            inner: InMemoryReminderRepo::new(),
            conflicts: AtomicUsize::new(conflicts),
            saves: AtomicUsize::new(0),
        });
        ctx.repos.reminders = repo.clone();
        repo
    }
}

#[async_trait::async_trait]
impl IReminderRepo for ContendedReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn insert_if_no_active(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        self.inner.insert_if_no_active(reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> Result<(), SaveReminderError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let lost = self
            .conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if lost {
            return Err(SaveReminderError::Conflict);
        }
        self.inner.save(reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.find(reminder_id).await
    }

    async fn find_by_property_service(
        &self,
        property_id: &ID,
        service_type: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        self.inner
            .find_by_property_service(property_id, service_type)
            .await
    }

    async fn find_active(&self) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_active().await
    }

    async fn find_completed_since(&self, since: i64) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_completed_since(since).await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.delete(reminder_id).await
    }

    async fn delete_by_property(&self, property_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        self.inner.delete_by_property(property_id).await
    }
}

/// In-memory notification feed that rejects writes while `unavailable` is set
pub struct FlakyNotificationRepo {
    inner: InMemoryNotificationRepo,
    pub unavailable: AtomicBool,
}

impl FlakyNotificationRepo {
    pub fn install(ctx: &mut UpkeepContext) -> Arc<Self> {
        let repo = Arc::new(Self {
            inner: InMemoryNotificationRepo::new(),
            unavailable: AtomicBool::new(true),
        });
        ctx.repos.notifications = repo.clone();
        repo
    }
}

#[async_trait::async_trait]
impl INotificationRepo for FlakyNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("notification feed is unavailable"));
        }
        self.inner.insert(notification).await
    }

    async fn find_since(&self, since: i64) -> anyhow::Result<Vec<Notification>> {
        self.inner.find_since(since).await
    }
}
