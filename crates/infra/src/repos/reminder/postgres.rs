use super::{IReminderRepo, SaveReminderError};
use chrono::NaiveDate;
use sqlx::{
    postgres::PgArguments,
    query::Query,
    types::{Json, Uuid},
    FromRow, PgPool, Postgres,
};
use std::convert::TryFrom;
use tracing::error;
use upkeep_domain::{
    EscalationLevel, NotificationRecord, PropertySnapshot, Reminder, ReminderState,
    ReminderStatus, ScheduleOrigin, ID,
};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    property_uid: Uuid,
    service_type: String,
    property_name: String,
    key_person: String,
    contact: String,
    location: String,
    service_details: String,
    last_service_date: Option<NaiveDate>,
    status: String,
    scheduled_date: Option<NaiveDate>,
    schedule_origin: Option<String>,
    is_new_service: bool,
    call_attempts: i64,
    last_call_attempt: Option<i64>,
    escalation_level: i16,
    notes: Option<String>,
    notification_sent: bool,
    notification_history: Json<Vec<NotificationRecord>>,
    created: i64,
    updated: i64,
    version: i64,
}

fn parse_status(status: &str) -> anyhow::Result<ReminderStatus> {
    let status = match status {
        "pending" => ReminderStatus::Pending,
        "called" => ReminderStatus::Called,
        "scheduled" => ReminderStatus::Scheduled,
        "completed" => ReminderStatus::Completed,
        "on_hold" => ReminderStatus::OnHold,
        other => return Err(anyhow::Error::msg(format!("Unknown reminder status: {}", other))),
    };
    Ok(status)
}

fn parse_origin(origin: &str) -> anyhow::Result<ScheduleOrigin> {
    let origin = match origin {
        "generated" => ScheduleOrigin::Generated,
        "rollover" => ScheduleOrigin::Rollover,
        "operator" => ScheduleOrigin::Operator,
        other => return Err(anyhow::Error::msg(format!("Unknown schedule origin: {}", other))),
    };
    Ok(origin)
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(r: ReminderRaw) -> anyhow::Result<Self> {
        let origin = r.schedule_origin.as_deref().map(parse_origin).transpose()?;
        let state = ReminderState::from_parts(parse_status(&r.status)?, r.scheduled_date, origin)?;
        Ok(Self {
            id: r.reminder_uid.into(),
            property_id: r.property_uid.into(),
            service_type: r.service_type,
            snapshot: PropertySnapshot {
                property_name: r.property_name,
                key_person: r.key_person,
                contact: r.contact,
                location: r.location,
                service_details: r.service_details,
            },
            last_service_date: r.last_service_date,
            state,
            is_new_service: r.is_new_service,
            call_attempts: r.call_attempts,
            last_call_attempt: r.last_call_attempt,
            escalation_level: EscalationLevel::from_level(r.escalation_level as i64),
            notes: r.notes,
            notification_sent: r.notification_sent,
            notification_history: r.notification_history.0,
            created: r.created,
            updated: r.updated,
            version: r.version,
        })
    }
}

/// Rows that cannot be read are logged and left out
fn into_reminders(rows: Vec<ReminderRaw>) -> Vec<Reminder> {
    rows.into_iter()
        .filter_map(|row| {
            let reminder_uid = row.reminder_uid;
            match Reminder::try_from(row) {
                Ok(reminder) => Some(reminder),
                Err(e) => {
                    error!("Skipping unreadable reminder {}: {:?}", reminder_uid, e);
                    None
                }
            }
        })
        .collect()
}

const INSERT_REMINDER: &str = r#"
    INSERT INTO reminders
    (reminder_uid, property_uid, service_type, property_name, key_person, contact,
     location, service_details, last_service_date, status, scheduled_date,
     schedule_origin, is_new_service, call_attempts, last_call_attempt,
     escalation_level, notes, notification_sent, notification_history,
     created, updated, version)
    VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
           $17, $18, $19, $20, $21, $22)
"#;

fn bind_insert<'q>(
    query: Query<'q, Postgres, PgArguments>,
    reminder: &'q Reminder,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(reminder.id.inner_ref())
        .bind(reminder.property_id.inner_ref())
        .bind(&reminder.service_type)
        .bind(&reminder.snapshot.property_name)
        .bind(&reminder.snapshot.key_person)
        .bind(&reminder.snapshot.contact)
        .bind(&reminder.snapshot.location)
        .bind(&reminder.snapshot.service_details)
        .bind(reminder.last_service_date)
        .bind(reminder.status().as_str())
        .bind(reminder.scheduled_date())
        .bind(reminder.state.origin().map(|o| o.as_str()))
        .bind(reminder.is_new_service)
        .bind(reminder.call_attempts)
        .bind(reminder.last_call_attempt)
        .bind(reminder.escalation_level.as_level() as i16)
        .bind(&reminder.notes)
        .bind(reminder.notification_sent)
        .bind(Json(&reminder.notification_history))
        .bind(reminder.created)
        .bind(reminder.updated)
        .bind(reminder.version)
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        bind_insert(sqlx::query(INSERT_REMINDER), reminder)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Unable to insert reminder: {:?}", e);
                e
            })?;

        Ok(())
    }

    async fn insert_if_no_active(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        let query = format!(
            "{} ON CONFLICT (property_uid, service_type) WHERE status <> 'completed' DO NOTHING",
            INSERT_REMINDER
        );
        let rows_affected = bind_insert(sqlx::query(&query), reminder)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Unable to insert reminder: {:?}", e);
                e
            })?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    async fn save(&self, reminder: &Reminder) -> Result<(), SaveReminderError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE reminders
            SET property_name = $3,
            key_person = $4,
            contact = $5,
            location = $6,
            service_details = $7,
            last_service_date = $8,
            status = $9,
            scheduled_date = $10,
            schedule_origin = $11,
            is_new_service = $12,
            call_attempts = $13,
            last_call_attempt = $14,
            escalation_level = $15,
            notes = $16,
            notification_sent = $17,
            notification_history = $18,
            updated = $19,
            version = version + 1
            WHERE reminder_uid = $1 AND version = $2
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.version)
        .bind(&reminder.snapshot.property_name)
        .bind(&reminder.snapshot.key_person)
        .bind(&reminder.snapshot.contact)
        .bind(&reminder.snapshot.location)
        .bind(&reminder.snapshot.service_details)
        .bind(reminder.last_service_date)
        .bind(reminder.status().as_str())
        .bind(reminder.scheduled_date())
        .bind(reminder.state.origin().map(|o| o.as_str()))
        .bind(reminder.is_new_service)
        .bind(reminder.call_attempts)
        .bind(reminder.last_call_attempt)
        .bind(reminder.escalation_level.as_level() as i16)
        .bind(&reminder.notes)
        .bind(reminder.notification_sent)
        .bind(Json(&reminder.notification_history))
        .bind(reminder.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to update reminder: {:?}", e);
            anyhow::Error::new(e)
        })?
        .rows_affected();

        if rows_affected == 0 {
            return Err(SaveReminderError::Conflict);
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        reminder.map(Reminder::try_from).transpose()
    }

    async fn find_by_property_service(
        &self,
        property_id: &ID,
        service_type: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.property_uid = $1 AND r.service_type = $2
            "#,
        )
        .bind(property_id.inner_ref())
        .bind(service_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_reminders(reminders))
    }

    async fn find_active(&self) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.status <> 'completed'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(into_reminders(reminders))
    }

    async fn find_completed_since(&self, since: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.status = 'completed' AND r.updated >= $1
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_reminders(reminders))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        reminder.map(Reminder::try_from).transpose()
    }

    async fn delete_by_property(&self, property_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.property_uid = $1
            RETURNING *
            "#,
        )
        .bind(property_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_reminders(reminders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> ReminderRaw {
        ReminderRaw {
            reminder_uid: Uuid::new_v4(),
            property_uid: Uuid::new_v4(),
            service_type: "Housekeeping".into(),
            property_name: "Oak House".into(),
            key_person: "".into(),
            contact: "".into(),
            location: "".into(),
            service_details: "".into(),
            last_service_date: None,
            status: status.into(),
            scheduled_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            schedule_origin: Some("generated".into()),
            is_new_service: true,
            call_attempts: 0,
            last_call_attempt: None,
            escalation_level: 0,
            notes: None,
            notification_sent: false,
            notification_history: Json(Vec::new()),
            created: 0,
            updated: 0,
            version: 0,
        }
    }

    #[test]
    fn unreadable_rows_are_skipped() {
        let readable = row("scheduled");
        let readable_uid = readable.reminder_uid;
        let mut missing_date = row("pending");
        missing_date.scheduled_date = None;

        let reminders = into_reminders(vec![row("archived"), readable, missing_date]);
        assert_eq!(reminders.len(), 1);
        assert_eq!(*reminders[0].id.inner_ref(), readable_uid);
        assert_eq!(reminders[0].status(), ReminderStatus::Scheduled);
    }
}
