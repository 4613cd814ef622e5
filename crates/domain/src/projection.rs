use crate::reminder::{Reminder, ReminderState};
use chrono::NaiveDate;
use itertools::Itertools;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderStats {
    /// Every reminder that is not completed, on hold included
    pub total_reminders: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub on_hold: usize,
}

/// Disjoint buckets of reminders for one `today`
#[derive(Debug, Clone, Default)]
pub struct ReminderProjection {
    pub due_today: Vec<Reminder>,
    pub overdue: Vec<Reminder>,
    pub scheduled: Vec<Reminder>,
    pub completed: Vec<Reminder>,
    pub on_hold: Vec<Reminder>,
    pub stats: ReminderStats,
}

enum Bucket {
    DueToday,
    Overdue,
    Scheduled,
    Completed,
    OnHold,
    Hidden,
}

fn bucket_of(reminder: &Reminder, today: NaiveDate, completed_since: i64) -> Bucket {
    match reminder.state {
        ReminderState::Completed { .. } if reminder.updated >= completed_since => {
            Bucket::Completed
        }
        ReminderState::Completed { .. } => Bucket::Hidden,
        ReminderState::OnHold => Bucket::OnHold,
        _ => match reminder.scheduled_date() {
            Some(d) if d < today => Bucket::Overdue,
            Some(d) if d == today => Bucket::DueToday,
            _ => Bucket::Scheduled,
        },
    }
}

/// Most escalated first, then the oldest due date
fn urgency_order(a: &Reminder, b: &Reminder) -> Ordering {
    b.escalation_level
        .cmp(&a.escalation_level)
        .then_with(|| match (a.scheduled_date(), b.scheduled_date()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.created.cmp(&b.created))
}

/// Partitions `reminders` into the buckets served to read consumers.
/// Completed reminders last updated before `completed_since` (millis) are
/// left out. The stats are counted from the same pass so they always add up.
pub fn project_reminders(
    reminders: Vec<Reminder>,
    today: NaiveDate,
    completed_since: i64,
) -> ReminderProjection {
    let mut projection = ReminderProjection::default();

    for reminder in reminders {
        match bucket_of(&reminder, today, completed_since) {
            Bucket::DueToday => projection.due_today.push(reminder),
            Bucket::Overdue => projection.overdue.push(reminder),
            Bucket::Scheduled => projection.scheduled.push(reminder),
            Bucket::Completed => projection.completed.push(reminder),
            Bucket::OnHold => projection.on_hold.push(reminder),
            Bucket::Hidden => (),
        }
    }

    let sort = |bucket: Vec<Reminder>| bucket.into_iter().sorted_by(urgency_order).collect_vec();
    projection.due_today = sort(projection.due_today);
    projection.overdue = sort(projection.overdue);
    projection.scheduled = sort(projection.scheduled);
    projection.completed = sort(projection.completed);
    projection.on_hold = sort(projection.on_hold);

    projection.stats = ReminderStats {
        total_reminders: projection.overdue.len()
            + projection.due_today.len()
            + projection.scheduled.len()
            + projection.on_hold.len(),
        overdue: projection.overdue.len(),
        due_today: projection.due_today.len(),
        upcoming: projection.scheduled.len(),
        completed: projection.completed.len(),
        on_hold: projection.on_hold.len(),
    };

    projection
}
