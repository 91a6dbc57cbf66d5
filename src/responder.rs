use crate::{context::Context, log_internal, text, volatile_state::Turn};
use serenity::all::UserId;

/// Ask the model to continue `user_id`'s conversation with `message`.
///
/// Only successful exchanges are recorded.  A failed request leaves the history exactly as it
/// was, so a retried question is not stored twice.  Never fails: errors become a user-facing
/// apology.
pub async fn respond(ctx: &Context<'_>, user_id: UserId, message: &str) -> String {
    let mut turns = ctx.vstate.read().await.history.turns(user_id).to_vec();
    turns.push(Turn::user(message));
    log_internal!("Continuing conversation of {} turn(s)", turns.len());

    match ctx.backend.generate(&turns, &ctx.cfg.gemini.system).await {
        Ok(reply) => {
            let reply = if reply.is_empty() {
                text::NO_ANSWER.to_owned()
            } else {
                reply
            };
            ctx.vstate
                .write()
                .await
                .history
                .record_exchange(user_id, message, &reply);
            reply
        }
        Err(err) => {
            tracing::error!(user = %user_id, "Gemini request failed: {}", err);
            text::BACKEND_FAILURE.to_owned()
        }
    }
}
