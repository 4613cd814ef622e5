use chrono_tz::Tz;
use std::str::FromStr;
use tracing::warn;
use upkeep_domain::EscalationPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Timezone of the business. "Today" for every date comparison is the
    /// calendar day in this timezone.
    pub timezone: Tz,
    /// How often the background job runs the reminders refresh pass
    pub reminder_refresh_interval_secs: u64,
    /// Completed reminders updated within this many days are listed
    pub completed_visibility_days: i64,
    /// A reminder completed within this many days still counts as covering
    /// its property + service type, so no new one is generated
    pub recent_completion_window_days: i64,
    /// Default months between a completed visit and the next one for the
    /// `service_done` and `update_service` actions
    pub service_done_rollover_months: u32,
    /// Default months between a completed visit and the next one when the
    /// visit is recorded through a daily book service entry
    pub service_entry_rollover_months: u32,
    pub escalation: EscalationPolicy,
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T
where
    T: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let timezone = match std::env::var("UPKEEP_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given UPKEEP_TIMEZONE: {} is not a valid timezone, falling back to UTC.",
                        tz
                    );
                    chrono_tz::UTC
                }
            },
            Err(_) => chrono_tz::UTC,
        };

        let defaults = EscalationPolicy::default();
        let escalation = EscalationPolicy {
            urgent_after_attempts: parse_env(
                "ESCALATION_URGENT_AFTER_ATTEMPTS",
                defaults.urgent_after_attempts,
            ),
            critical_after_attempts: parse_env(
                "ESCALATION_CRITICAL_AFTER_ATTEMPTS",
                defaults.critical_after_attempts,
            ),
            urgent_after_overdue_days: parse_env(
                "ESCALATION_URGENT_AFTER_OVERDUE_DAYS",
                defaults.urgent_after_overdue_days,
            ),
            critical_after_overdue_days: parse_env(
                "ESCALATION_CRITICAL_AFTER_OVERDUE_DAYS",
                defaults.critical_after_overdue_days,
            ),
        };

        Self {
            port: parse_env("PORT", 5000),
            timezone,
            reminder_refresh_interval_secs: parse_env("REMINDER_REFRESH_INTERVAL_SECS", 5 * 60),
            completed_visibility_days: parse_env("COMPLETED_VISIBILITY_DAYS", 30),
            recent_completion_window_days: parse_env("RECENT_COMPLETION_WINDOW_DAYS", 30),
            service_done_rollover_months: parse_env("SERVICE_DONE_ROLLOVER_MONTHS", 1),
            service_entry_rollover_months: parse_env("SERVICE_ENTRY_ROLLOVER_MONTHS", 4),
            escalation,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
