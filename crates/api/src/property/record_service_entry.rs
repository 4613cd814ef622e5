use crate::{
    error::UpkeepError,
    reminder::roll_forward_reminder::{
        RollForwardReminderUseCase, UseCaseError as RollForwardError,
    },
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use tracing::error;
use upkeep_api_structs::record_service_entry::*;
use upkeep_domain::{NaiveDate, Reminder, ReminderError, ServiceEntry, ID};
use upkeep_infra::UpkeepContext;

pub async fn record_service_entry_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let body = body.0;
    let completion_date = Guard::against_malformed_date("completionDate", &body.completion_date)?;
    let next_service_date =
        Guard::against_malformed_optional_date("nextServiceDate", &body.next_service_date)?;

    let usecase = RecordServiceEntryUseCase {
        property_id: path.property_id.clone(),
        service_type: body.service_type,
        completion_date,
        amount: body.amount,
        next_service_date,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.entry)))
        .map_err(UpkeepError::from)
}

/// Daily book entry for a completed visit. The active reminder of the pair
/// is rolled into its next cycle before the entry is stored, so a failed
/// request can be repeated without leaving a duplicate entry behind.
#[derive(Debug)]
pub struct RecordServiceEntryUseCase {
    pub property_id: ID,
    /// Defaults to the service type of the property
    pub service_type: Option<String>,
    pub completion_date: NaiveDate,
    pub amount: f64,
    pub next_service_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub entry: ServiceEntry,
    pub reminder: Reminder,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    PropertyNotFound(ID),
    MissingServiceType,
    InvalidAmount,
    ReminderRejected(ReminderError),
    ReminderContended(ID),
    StorageError,
}

impl From<UseCaseError> for UpkeepError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::PropertyNotFound(id) => Self::NotFound(format!(
                "The property with id: {}, was not found.",
                id
            )),
            UseCaseError::MissingServiceType => Self::BadClientData(
                "A service type is required when the property has none".into(),
            ),
            UseCaseError::InvalidAmount => {
                Self::BadClientData("The amount cannot be negative".into())
            }
            UseCaseError::ReminderRejected(e) => Self::BadClientData(e.to_string()),
            UseCaseError::ReminderContended(id) => Self::Conflict(format!(
                "The reminders of property: {} are being modified by another request, try again.",
                id
            )),
            UseCaseError::StorageError => Self::ServiceUnavailable,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecordServiceEntryUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "RecordServiceEntry";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(UseCaseError::InvalidAmount);
        }

        let property = match ctx.repos.properties.find(&self.property_id).await {
            Ok(Some(property)) => property,
            Ok(None) => return Err(UseCaseError::PropertyNotFound(self.property_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let service_type = match &self.service_type {
            Some(service_type) if !service_type.trim().is_empty() => service_type.clone(),
            _ if !property.service_type.trim().is_empty() => property.service_type.clone(),
            _ => return Err(UseCaseError::MissingServiceType),
        };

        let entry = ServiceEntry {
            id: Default::default(),
            property_id: property.id.clone(),
            service_type,
            completion_date: self.completion_date,
            amount: self.amount,
            next_service_date: self.next_service_date,
            notes: self.notes.clone(),
            created: ctx.sys.get_timestamp_millis(),
        };

        let roll_forward = RollForwardReminderUseCase {
            property,
            service_type: entry.service_type.clone(),
            completion_date: entry.completion_date,
            next_service_date: entry.next_service_date,
        };
        let reminder = execute(roll_forward, ctx).await.map_err(|e| match e {
            RollForwardError::PropertyNotFound(id) => UseCaseError::PropertyNotFound(id),
            RollForwardError::Rejected(e) => UseCaseError::ReminderRejected(e),
            RollForwardError::Contended(id) => UseCaseError::ReminderContended(id),
            RollForwardError::StorageError => UseCaseError::StorageError,
        })?;

        ctx.repos.service_entries.insert(&entry).await.map_err(|e| {
            error!("Unable to insert service entry: {:?}", e);
            UseCaseError::StorageError
        })?;

        Ok(UseCaseResponse { entry, reminder })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, insert_property, setup_at, ContendedReminderRepo};

    #[actix_web::main]
    #[test]
    async fn recorded_visit_rolls_reminder_forward() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property =
            insert_property(&ctx, "Harbor Point", "Pest Control", Some(date(2025, 1, 10))).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = RecordServiceEntryUseCase {
            property_id: property.id.clone(),
            service_type: None,
            completion_date: date(2025, 1, 13),
            amount: 1500.0,
            next_service_date: None,
            notes: Some("Kitchen and stairwell".into()),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.entry.service_type, "Pest Control");
        assert_eq!(res.reminder.id, reminder.id);

        let entries = ctx
            .repos
            .service_entries
            .find_by_property(&property.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.last_service_date, Some(date(2025, 1, 13)));
        assert_eq!(stored.scheduled_date(), Some(date(2025, 5, 13)));
        assert!(!stored.is_new_service);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_property() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property_id = ID::default();
        let mut usecase = RecordServiceEntryUseCase {
            property_id: property_id.clone(),
            service_type: Some("Housekeeping".into()),
            completion_date: date(2025, 1, 13),
            amount: 10.0,
            next_service_date: None,
            notes: None,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::PropertyNotFound(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn failed_roll_forward_fails_the_request() {
        let mut ctx = setup_at(date(2025, 1, 15)).await;
        ContendedReminderRepo::install(&mut ctx, usize::MAX);
        let property =
            insert_property(&ctx, "Harbor Point", "Pest Control", Some(date(2025, 1, 10))).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = RecordServiceEntryUseCase {
            property_id: property.id.clone(),
            service_type: None,
            completion_date: date(2025, 1, 13),
            amount: 1500.0,
            next_service_date: None,
            notes: None,
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.map(|res| res.entry),
            Err(UseCaseError::ReminderContended(reminder.id.clone()))
        );

        // Neither the entry nor the new cycle was stored, so the request can be repeated
        let entries = ctx
            .repos
            .service_entries
            .find_by_property(&property.id)
            .await
            .unwrap();
        assert!(entries.is_empty());
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored, reminder);
    }
}
