//! Integration tests for the client wiring used by the command-line tool.
//!
//! Covers offline behavior: unreachable servers, credentials persisted on
//! disk between client instances, and logging out without a network.

use std::time::Duration;
use tempfile::TempDir;
use vg_client::{
    account::current_profile,
    commands::{Command, parse_command},
};
use village_gov::{ApiError, ClientConfig, VillageClient, storage::CredentialPair};

fn offline_config(dir: &TempDir) -> ClientConfig {
    ClientConfig {
        // Discard port, nothing listens there
        api_url: "http://127.0.0.1:9/api".to_string(),
        credentials_path: dir.path().join("credentials.json"),
        poll_interval: Duration::from_millis(20),
        request_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    let dir = TempDir::new().unwrap();
    let client = VillageClient::new(offline_config(&dir)).unwrap();

    let result = client.auth().login("9876543210", "secret").await;

    let err = result.unwrap_err();
    assert_eq!(
        err.client_message(),
        "Unable to reach the server, check your connection"
    );
    assert!(!client.store().is_authenticated().await);
}

#[tokio::test]
async fn test_credentials_survive_restart() {
    let dir = TempDir::new().unwrap();

    let first = VillageClient::new(offline_config(&dir)).unwrap();
    first
        .store()
        .save_pair(&CredentialPair {
            access_token: "AT1".to_string(),
            refresh_token: "RT1".to_string(),
        })
        .await
        .unwrap();
    drop(first);

    let second = VillageClient::new(offline_config(&dir)).unwrap();
    assert!(second.store().is_authenticated().await);
    assert_eq!(second.store().access_token().await.as_deref(), Some("AT1"));
}

#[tokio::test]
async fn test_logout_works_offline() {
    let dir = TempDir::new().unwrap();
    let client = VillageClient::new(offline_config(&dir)).unwrap();
    client.store().save("AT1", "RT1").await.unwrap();

    client.auth().logout().await.unwrap();

    let reopened = VillageClient::new(offline_config(&dir)).unwrap();
    assert!(!reopened.store().is_authenticated().await);
}

#[tokio::test]
async fn test_invalid_login_input_never_reaches_network() {
    let dir = TempDir::new().unwrap();
    let client = VillageClient::new(offline_config(&dir)).unwrap();

    let command = parse_command(pico_args::Arguments::from_vec(vec![
        "login".into(),
        "--mobile".into(),
        "12345".into(),
        "--password".into(),
        "secret".into(),
    ]))
    .unwrap();

    let Command::Login {
        mobile: Some(mobile),
        password: Some(password),
    } = command
    else {
        panic!("expected a login command, got {:?}", command);
    };

    let err = client.auth().login(&mobile, &password).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_profile_without_session_reports_not_logged_in() {
    let dir = TempDir::new().unwrap();
    let client = VillageClient::new(offline_config(&dir)).unwrap();

    let err = current_profile(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.client_message(), "Not logged in");
}

#[tokio::test]
async fn test_profile_transport_failure_keeps_its_message() {
    let dir = TempDir::new().unwrap();
    let client = VillageClient::new(offline_config(&dir)).unwrap();
    client.store().save("AT1", "RT1").await.unwrap();

    let err = current_profile(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(
        err.client_message(),
        "Unable to reach the server, check your connection"
    );
    assert!(client.store().is_authenticated().await);
}
