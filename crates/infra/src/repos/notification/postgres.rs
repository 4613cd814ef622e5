use super::INotificationRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use upkeep_domain::{EscalationLevel, Notification};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    reminder_uid: Uuid,
    kind: String,
    message: String,
    urgency: i16,
    created: i64,
}

impl TryFrom<NotificationRaw> for Notification {
    type Error = anyhow::Error;

    fn try_from(n: NotificationRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: n.notification_uid.into(),
            reminder_id: n.reminder_uid.into(),
            kind: n.kind.parse()?,
            message: n.message,
            urgency: EscalationLevel::from_level(n.urgency as i64),
            created: n.created,
        })
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, reminder_uid, kind, message, urgency, created)
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (notification_uid) DO NOTHING
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.reminder_id.inner_ref())
        .bind(notification.kind.as_str())
        .bind(&notification.message)
        .bind(notification.urgency.as_level() as i16)
        .bind(notification.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_since(&self, since: i64) -> anyhow::Result<Vec<Notification>> {
        let notifications: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.created >= $1
            ORDER BY n.created
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        notifications.into_iter().map(Notification::try_from).collect()
    }
}
