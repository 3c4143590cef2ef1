//! Registration over a real socket.

mod common;

use common::server::PASSWORD;
use common::TestServer;

#[tokio::test]
async fn welcome_burst_after_full_registration() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.connect("alice").await?;

    alice.send_raw(&format!("PASS {PASSWORD}")).await?;
    alice.send_raw("NICK alice").await?;
    alice.send_raw("USER alice 0 * :Alice").await?;

    let welcome = alice.expect_numeric(1).await?;
    assert_eq!(welcome.source_nick(), Some("test.server"));
    assert_eq!(welcome.param(0), Some("alice"));
    assert!(welcome.params[1].starts_with("Welcome to the TestNet Network"));
    alice.expect_numeric(2).await?;
    alice.expect_numeric(3).await?;
    Ok(())
}

#[tokio::test]
async fn wrong_password_then_right_one() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut client = server.connect("bob").await?;

    client.send_raw("PASS nope").await?;
    let refusal = client.expect_numeric(464).await?;
    assert_eq!(refusal.param(0), Some("*"));

    client.register(PASSWORD).await?;
    Ok(())
}

#[tokio::test]
async fn commands_before_registration_are_refused() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut client = server.connect("carol").await?;

    client.send_raw("JOIN #early").await?;
    client.expect_numeric(451).await?;

    client.send_raw("PING abc").await?;
    let pong = client.expect_command("PONG").await?;
    assert_eq!(pong.params, vec!["test.server", "abc"]);
    Ok(())
}

#[tokio::test]
async fn nickname_collision() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let _alice = server.register("alice").await?;

    let mut imposter = server.connect("alice").await?;
    imposter.send_raw(&format!("PASS {PASSWORD}")).await?;
    imposter.send_raw("NICK alice").await?;
    let in_use = imposter.expect_numeric(433).await?;
    assert_eq!(in_use.params[1], "alice");
    Ok(())
}

#[tokio::test]
async fn unauthenticated_nick_does_not_block_registration() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut squatter = server.connect("alice").await?;
    squatter.send_raw("NICK alice").await?;
    squatter.expect_silence().await?;

    let _alice = server.register("alice").await?;
    Ok(())
}

#[tokio::test]
async fn quit_closes_with_error_line() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.register("alice").await?;

    alice.quit("done here").await?;
    let error = alice.expect_command("ERROR").await?;
    assert!(error.params[0].starts_with("Closing Link"));
    assert!(alice.recv().await.is_err());
    Ok(())
}

#[tokio::test]
async fn overlong_line_closes_connection() -> anyhow::Result<()> {
    let server = TestServer::spawn_with_limits("max_line_len = 128").await?;
    let mut alice = server.register("alice").await?;

    alice
        .send_raw(&format!("PRIVMSG alice :{}", "x".repeat(300)))
        .await?;
    assert!(alice.recv().await.is_err());

    // The nickname is free again once the server has cleaned up.
    let mut again = None;
    for _ in 0..20 {
        let mut client = server.connect("alice").await?;
        client.send_raw(&format!("PASS {PASSWORD}")).await?;
        client.send_raw("NICK alice").await?;
        client.send_raw("USER alice 0 * :Alice").await?;
        let first = client.recv().await?;
        if first.numeric().is_some_and(|r| r.code() == 1) {
            again = Some(client);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    assert!(again.is_some());
    Ok(())
}
