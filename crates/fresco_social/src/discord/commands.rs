//! Operator commands.
//!
//! Each command is invoked by the event handler after prefix parsing and,
//! for the privileged ones, after authorization. The structure copy is the
//! centerpiece: it confirms with the operator via reactions, then hands the
//! pair of guilds to the reconciliation engine.

use super::{BotConfig, DiscordError, DiscordErrorKind, DiscordResult};
use super::{OperatorNotifier, SerenityHost};
use fresco_sync::{run_guarded, ProgressSink, SyncOutcome, Verdict};
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::client::Context;
use serenity::http::Http;
use serenity::model::channel::{Message, ReactionType};
use serenity::model::colour::Colour;
use serenity::model::id::GuildId;
use serenity::model::prelude::ChannelType;
use serenity::model::user::User;
use std::future::ready;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

const APPROVE: &str = "\u{2705}";
const DECLINE: &str = "\u{274c}";
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

/// Whether the invoker may run privileged commands.
///
/// Authorized means: guild owner, holder of the Administrator permission
/// through any role, or holder of one of the configured admin roles.
pub(crate) async fn is_authorized(
    http: &Arc<Http>,
    guild_id: GuildId,
    user: &User,
    config: &BotConfig,
) -> DiscordResult<bool> {
    let member = guild_id.member(http, user.id).await?;
    if member.roles.iter().any(|r| config.admin_roles.contains(r)) {
        return Ok(true);
    }
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user.id {
        return Ok(true);
    }
    Ok(member
        .roles
        .iter()
        .filter_map(|id| guild.roles.get(id))
        .any(|r| r.permissions.administrator()))
}

/// Parse `copy_template` arguments: a source guild id and an optional
/// target guild id.
fn parse_copy_args(args: &[&str]) -> Result<(u64, Option<u64>), String> {
    fn parse_id(raw: &str, which: &str) -> Result<u64, String> {
        match raw.parse::<u64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(format!("{which} server id must be a positive number")),
        }
    }
    let source = parse_id(args.first().ok_or("Missing source server id")?, "Source")?;
    let target = args.get(1).map(|raw| parse_id(raw, "Target")).transpose()?;
    Ok((source, target))
}

/// Map the operator's reaction (or its absence) to a verdict.
fn verdict_from(reaction: Option<&ReactionType>) -> Verdict {
    match reaction {
        Some(emoji) if emoji.unicode_eq(APPROVE) => Verdict::Approved,
        Some(_) => Verdict::Declined,
        None => Verdict::TimedOut,
    }
}

/// Mirror a source guild's structure onto a target guild.
///
/// The target defaults to the invoking guild. Both guilds are validated
/// and the operator is asked to confirm by reaction before the engine
/// runs; a decline or a 60-second timeout aborts with no mutation.
#[instrument(skip(ctx, msg, config), fields(invoker = %msg.author.id))]
pub(crate) async fn copy_template(
    ctx: &Context,
    msg: &Message,
    config: &BotConfig,
    args: &[&str],
) -> DiscordResult<()> {
    let (source_id, target_id) = match parse_copy_args(args) {
        Ok(parsed) => parsed,
        Err(reason) => {
            say(
                ctx,
                msg,
                &format!(
                    "{DECLINE} {reason}. Usage: `{}copy_template <source_id> [target_id]`",
                    config.prefix
                ),
            )
            .await;
            return Ok(());
        }
    };
    let source = GuildId::new(source_id);
    let target = match target_id {
        Some(id) => GuildId::new(id),
        None => match msg.guild_id {
            Some(id) => id,
            None => {
                say(
                    ctx,
                    msg,
                    &format!("{DECLINE} Give a target server id or run this inside a server."),
                )
                .await;
                return Ok(());
            }
        },
    };

    // Pre-flight: both guilds must exist and be visible before anything
    // is touched.
    let Ok(source_guild) = source.to_partial_guild(&ctx.http).await else {
        say(ctx, msg, &format!("{DECLINE} Source server {source_id} not found.")).await;
        return Ok(());
    };
    let Ok(target_guild) = target.to_partial_guild(&ctx.http).await else {
        say(ctx, msg, &format!("{DECLINE} Target server {target} not found.")).await;
        return Ok(());
    };

    let prompt = msg
        .channel_id
        .say(
            &ctx.http,
            format!(
                "\u{26a0} This will copy all channels, categories, roles, and permissions \
                 from **{}** to **{}**, and delete anything in the target that the source \
                 does not have. This cannot be undone. React with {APPROVE} to continue \
                 or {DECLINE} to cancel.",
                source_guild.name, target_guild.name
            ),
        )
        .await
        .map_err(|e| DiscordError::new(DiscordErrorKind::MessageSendFailed(e.to_string())))?;
    prompt.react(&ctx.http, ReactionType::Unicode(APPROVE.to_string())).await?;
    prompt.react(&ctx.http, ReactionType::Unicode(DECLINE.to_string())).await?;

    let reaction = prompt
        .await_reaction(&ctx.shard)
        .timeout(CONFIRM_TIMEOUT)
        .author_id(msg.author.id)
        .filter(|r| r.emoji.unicode_eq(APPROVE) || r.emoji.unicode_eq(DECLINE))
        .await;
    let verdict = verdict_from(reaction.as_ref().map(|r| &r.emoji));

    if verdict == Verdict::Approved {
        say(
            ctx,
            msg,
            "Starting the structure copy. This may take a while; further updates go to \
             your direct messages since this channel may be deleted.",
        )
        .await;
    }

    let notifier = OperatorNotifier::new(ctx.http.clone(), msg).await;
    if verdict == Verdict::Approved && !notifier.has_dm() {
        say(
            ctx,
            msg,
            "\u{26a0} I could not open your direct messages; progress will be posted here \
             while this channel survives.",
        )
        .await;
    }

    let host = SerenityHost::new(ctx.http.clone())
        .await
        .map_err(|e| DiscordError::new(DiscordErrorKind::SyncFailed(e.to_string())))?;

    let outcome = run_guarded(
        ready(verdict),
        &host,
        fresco_core::GuildId(source.get()),
        fresco_core::GuildId(target.get()),
        &notifier,
    )
    .await;

    match outcome {
        Ok(SyncOutcome::Aborted(Verdict::Declined)) => {
            say(ctx, msg, "Operation cancelled.").await;
            Ok(())
        }
        Ok(SyncOutcome::Aborted(_)) => {
            say(ctx, msg, "Operation timed out.").await;
            Ok(())
        }
        Ok(SyncOutcome::Completed(report)) => {
            info!(failed = report.failed(), "Structure copy finished");
            for failure in report.stages.iter().flat_map(|s| s.failures()) {
                warn!(
                    kind = %failure.kind,
                    name = %failure.name,
                    action = %failure.action,
                    "Item failed during structure copy"
                );
            }
            announce_completion(
                &ctx.http,
                target,
                &format!(
                    "{APPROVE} Structure from **{}** has been applied to this server ({}).",
                    source_guild.name,
                    report.summary()
                ),
            )
            .await;
            Ok(())
        }
        Err(e) => {
            let text = format!("{DECLINE} The structure copy failed: {e}");
            notifier.emit(&text).await;
            Err(DiscordError::new(DiscordErrorKind::SyncFailed(e.to_string())))
        }
    }
}

/// Post a completion note into the rebuilt guild, first text channel that
/// accepts it.
async fn announce_completion(http: &Arc<Http>, target: GuildId, text: &str) {
    let Ok(channels) = target.channels(http).await else {
        return;
    };
    let mut candidates: Vec<_> = channels
        .into_values()
        .filter(|c| c.kind == ChannelType::Text)
        .collect();
    candidates.sort_by_key(|c| c.position);
    for channel in candidates {
        if channel.id.say(http, text).await.is_ok() {
            break;
        }
    }
}

/// List every guild the bot is a member of, with ids.
pub(crate) async fn list_guilds(ctx: &Context, msg: &Message) -> DiscordResult<()> {
    let guilds = ctx.http.get_guilds(None, None).await?;
    if guilds.is_empty() {
        say(ctx, msg, "I am not in any servers.").await;
        return Ok(());
    }
    let listing = guilds
        .iter()
        .map(|g| format!("**{}** (ID: {})", g.name, g.id))
        .collect::<Vec<_>>()
        .join("\n");
    say(ctx, msg, &format!("I am in the following servers:\n{listing}")).await;
    Ok(())
}

/// Report the invoking guild's id and a structure summary for later
/// restoration.
pub(crate) async fn create_backup(
    ctx: &Context,
    msg: &Message,
    config: &BotConfig,
) -> DiscordResult<()> {
    let Some(guild_id) = msg.guild_id else {
        say(ctx, msg, "Run this inside the server you want to back up.").await;
        return Ok(());
    };
    let guild = guild_id.to_partial_guild(&ctx.http).await?;
    let channels = guild_id.channels(&ctx.http).await?;

    let everyone = serenity::model::id::RoleId::new(guild_id.get());
    let role_count = guild
        .roles
        .values()
        .filter(|r| !r.managed && r.id != everyone)
        .count();
    let category_count = channels
        .values()
        .filter(|c| c.kind == ChannelType::Category)
        .count();
    let text_count = channels.values().filter(|c| c.kind == ChannelType::Text).count();
    let voice_count = channels
        .values()
        .filter(|c| c.kind == ChannelType::Voice)
        .count();

    say(
        ctx,
        msg,
        &format!(
            "To restore this server's structure elsewhere, use \
             `{}copy_template {} <target_id>`\nServer ID: `{}`",
            config.prefix, guild_id, guild_id
        ),
    )
    .await;
    say(
        ctx,
        msg,
        &format!(
            "Server structure: {role_count} roles, {category_count} categories, \
             {text_count} text channels, {voice_count} voice channels ({})",
            guild.name
        ),
    )
    .await;
    Ok(())
}

/// Show help for the structure commands.
pub(crate) async fn help_template(ctx: &Context, msg: &Message, prefix: &str) -> DiscordResult<()> {
    let embed = CreateEmbed::new()
        .title("Structure Mirror Commands")
        .description("Commands for mirroring a server's structure")
        .colour(Colour::BLUE)
        .field(
            format!("{prefix}list_guilds"),
            "List all servers the bot is in, with their IDs",
            false,
        )
        .field(
            format!("{prefix}create_backup"),
            "Get the current server's ID and a structure summary for later restoration",
            false,
        )
        .field(
            format!("{prefix}copy_template <source_id> [target_id]"),
            "Mirror a source server's structure onto a target server. \
             The current server is the target when no target is given.",
            false,
        )
        .field(
            "Warning",
            format!(
                "\u{26a0} `{prefix}copy_template` deletes all existing channels, categories, \
                 and non-managed roles in the target server."
            ),
            false,
        );
    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
        .map_err(|e| DiscordError::new(DiscordErrorKind::MessageSendFailed(e.to_string())))?;
    Ok(())
}

/// Best-effort reply into the invoking channel.
async fn say(ctx: &Context, msg: &Message, text: &str) {
    if let Err(e) = msg.channel_id.say(&ctx.http, text).await {
        error!(error = %e, "Failed to send reply");
    }
}
