//! Account lookups shared by the CLI commands.

use village_gov::{ApiError, ApiResult, VillageClient, session::UserProfile};

/// Profile of the signed-in user, fetched from the server.
///
/// Without a stored session this is a validation error and nothing is sent.
/// Otherwise the server's answer is returned as is, so a transport failure
/// or rejection keeps its own message.
pub async fn current_profile(client: &VillageClient) -> ApiResult<UserProfile> {
    if !client.store().is_authenticated().await {
        return Err(ApiError::Validation("Not logged in".to_string()));
    }

    let profile = client.users().me().await?;
    // Keep the shared cache in step with what was shown.
    client.profile().fetch().await;
    Ok(profile)
}
