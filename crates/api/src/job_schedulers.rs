use crate::{reminder::refresh_reminders::RefreshRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval, sleep};
use std::time::Duration;
use tracing::info;
use upkeep_infra::UpkeepContext;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs the refresh pass on a timer so that overdue notifications do not
/// depend on read traffic. The first tick is aligned to the next full minute.
pub fn start_refresh_reminders_job(ctx: UpkeepContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let period = ctx.config.reminder_refresh_interval_secs.max(1);
        let mut refresh_interval = interval(Duration::from_secs(period));
        loop {
            refresh_interval.tick().await;

            if let Ok(summary) = execute(RefreshRemindersUseCase {}, &ctx).await {
                info!("Scheduled refresh pass done: {:?}", summary);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
