use crate::core::AppState;
use db::services::domain;
use tracing::{error, info, warn};

/// Seeds the domain registry on boot.
///
/// The primary domain is always ensured. Upstream-provided domains are
/// imported only when the registry was empty beforehand (first-write-wins);
/// later upstream lists never overwrite what is already registered. Every
/// failure is absorbed: a boot with a flaky provider or database still
/// proceeds with whatever domains exist.
pub async fn initialize_domains(state: &AppState) {
    let existing = match domain::count(&state.db_pool).await {
        Ok(count) => count,
        Err(e) => {
            error!("domain registry init failed: {e}");
            return;
        }
    };

    if let Err(e) = domain::ensure_domain(&state.db_pool, &state.config.primary_domain).await {
        error!(
            domain = %state.config.primary_domain,
            "failed to seed primary domain: {e}"
        );
    }

    if existing == 0 {
        match state.mailtm.list_domains().await {
            Ok(names) => {
                for name in &names {
                    if let Err(e) = domain::ensure_domain(&state.db_pool, name).await {
                        error!(domain = %name, "failed to import upstream domain: {e}");
                    }
                }
                info!(count = names.len(), "imported upstream fallback domains");
            }
            Err(e) => {
                warn!("upstream domain fetch failed, continuing with seeded domains: {e}")
            }
        }
    }
}
