//! Reports each run's outcome to the operator channel.

use chrono::NaiveDate;
use teloxide::prelude::*;
use tracing::{info, warn};

use super::ingest_service::RunOutcome;

pub struct Notifier {
    bot: Bot,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(bot_token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(bot_token),
            chat_id: ChatId(chat_id),
        }
    }

    /// Send one message for the run. Delivery failure is logged and
    /// swallowed: it must never mask the run outcome it reports.
    pub async fn notify(&self, report_date: NaiveDate, outcome: &RunOutcome) {
        let message = render_message(report_date, outcome);
        info!(message = %message, "sending outcome notification");
        if let Err(e) = self.bot.send_message(self.chat_id, message).await {
            warn!(error = %e, "failed to deliver outcome notification");
        }
    }
}

fn render_message(report_date: NaiveDate, outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Success { .. } => format!("[TWSE] {} success", report_date),
        RunOutcome::Failure { reason } => format!("[TWSE] {} error: {}", report_date, reason),
    }
}
