//! Interface prober tests.

mod helpers;

use asktheeu_client::{probe, FoiError, InterfaceKind};
use helpers::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_premium_preferred_when_both_work() {
    let (server, session) = signed_in().await;
    mount_premium_page(&server).await;
    mount_standard_page(&server).await;

    assert_eq!(probe(&session).await.unwrap(), InterfaceKind::Premium);
}

#[tokio::test]
async fn test_only_standard_available() {
    let (server, session) = signed_in().await;
    // Premium path is not mounted and answers 404
    mount_standard_page(&server).await;

    assert_eq!(probe(&session).await.unwrap(), InterfaceKind::Standard);
}

#[tokio::test]
async fn test_premium_paywall_redirect_falls_back() {
    let (server, session) = signed_in().await;
    Mock::given(method("GET"))
        .and(path(PREMIUM_NEW))
        .respond_with(redirect("/en/pro/plans"))
        .mount(&server)
        .await;
    mount_standard_page(&server).await;

    assert_eq!(probe(&session).await.unwrap(), InterfaceKind::Standard);
}

#[tokio::test]
async fn test_both_interfaces_failing() {
    let (server, session) = signed_in().await;
    Mock::given(method("GET"))
        .and(path(PREMIUM_NEW))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(STANDARD_NEW))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    match probe(&session).await.unwrap_err() {
        FoiError::InterfaceUnavailable { premium, standard } => {
            assert!(premium.contains("403"), "{}", premium);
            assert!(standard.contains("500"), "{}", standard);
        }
        other => panic!("expected InterfaceUnavailable, got {:?}", other),
    }
}
