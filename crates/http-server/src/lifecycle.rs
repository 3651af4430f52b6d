use crate::core::AppState;
use chrono::Utc;
use db::models::mailbox::{Mailbox, NewMailbox};
use db::services::error::ServiceError;
use db::services::{domain, generator, mailbox};
use tracing::warn;

/// Last-resort domain when the registry is empty.
const FALLBACK_DOMAIN: &str = "fastmail.tech";

/// Creates a temporary mailbox.
///
/// Upstream binding is best effort: account creation or token issuance
/// failing leaves `mail_tm_token`/`mail_tm_id` NULL and the mailbox is
/// created anyway. The visible address is the user-facing contract; the
/// worst a flaky provider can cause is an inbox that stays empty.
pub async fn generate_mailbox(
    state: &AppState,
    requested_domain: Option<&str>,
) -> Result<Mailbox, ServiceError> {
    let config = &state.config;
    let domains = domain::list_active(&state.db_pool).await?;

    // Requested domain only counts if the registry knows it as active.
    let resolved = requested_domain
        .filter(|name| domains.iter().any(|d| d.domain == *name))
        .map(str::to_string)
        .or_else(|| domains.first().map(|d| d.domain.clone()))
        .unwrap_or_else(|| FALLBACK_DOMAIN.to_string());

    let local_part = generator::random_local_part(config.local_part_len);
    let email = format!("{local_part}@{resolved}");
    // The provider only accepts accounts under its own domain, so the
    // upstream account always uses the compatible one. The user never sees
    // this address.
    let actual_email = format!("{local_part}@{}", config.upstream_domain);

    // The password exists only long enough to create the account and obtain
    // a token; it is never persisted. Known limitation: the token cannot be
    // refreshed later within the TTL window.
    let password = generator::random_password(config.password_len);

    let mut mail_tm_id = None;
    let mut mail_tm_token = None;
    match state.mailtm.create_account(&actual_email, &password).await {
        Ok(account) => {
            mail_tm_id = Some(account.id);
            match state.mailtm.issue_token(&actual_email, &password).await {
                Ok(token) => mail_tm_token = Some(token),
                Err(e) => {
                    warn!(email = %email, "token issuance failed, mailbox continues unbound: {e}")
                }
            }
        }
        Err(e) => {
            warn!(email = %email, "upstream account creation failed, mailbox continues unbound: {e}")
        }
    }

    let created_at = Utc::now();
    let expires_at = created_at + config.ttl;

    mailbox::create_mailbox(
        &state.db_pool,
        &NewMailbox {
            email: &email,
            domain: &resolved,
            actual_email: Some(&actual_email),
            mail_tm_token: mail_tm_token.as_deref(),
            mail_tm_id: mail_tm_id.as_deref(),
            expires_at,
            created_at,
        },
    )
    .await
}
