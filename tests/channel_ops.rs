//! Operator-controlled channel features over real sockets.

mod common;

use common::TestServer;

#[tokio::test]
async fn invite_only_channel() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.register("alice").await?;
    let mut bob = server.register("bob").await?;

    alice.join("#secret").await?;
    alice.send_raw("MODE #secret +i").await?;
    let mode = alice.expect_command("MODE").await?;
    assert_eq!(mode.params, vec!["#secret", "+i"]);

    bob.send_raw("JOIN #secret").await?;
    bob.expect_numeric(473).await?;

    alice.send_raw("INVITE bob #secret").await?;
    alice.expect_numeric(341).await?;
    let invite = bob.expect_command("INVITE").await?;
    assert_eq!(invite.source_nick(), Some("alice"));
    assert_eq!(invite.params, vec!["bob", "#secret"]);

    bob.join("#secret").await?;
    alice.expect_command("JOIN").await?;
    Ok(())
}

#[tokio::test]
async fn kick_and_topic_need_operator() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.register("alice").await?;
    let mut bob = server.register("bob").await?;
    alice.join("#ops").await?;
    bob.join("#ops").await?;
    alice.expect_command("JOIN").await?;

    bob.send_raw("KICK #ops alice").await?;
    bob.expect_numeric(482).await?;
    bob.send_raw("TOPIC #ops :bob rules").await?;
    bob.expect_numeric(482).await?;
    alice.expect_silence().await?;

    alice.send_raw("TOPIC #ops :alice rules").await?;
    let topic = bob.expect_command("TOPIC").await?;
    assert_eq!(topic.params, vec!["#ops", "alice rules"]);

    alice.send_raw("KICK #ops bob :out").await?;
    let kick = bob.expect_command("KICK").await?;
    assert_eq!(kick.params, vec!["#ops", "bob", "out"]);
    alice.expect_command("KICK").await?;

    bob.send_raw("TOPIC #ops").await?;
    bob.expect_numeric(442).await?;
    Ok(())
}

#[tokio::test]
async fn operator_grant_and_key() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.register("alice").await?;
    let mut bob = server.register("bob").await?;
    let mut carol = server.register("carol").await?;
    alice.join("#keyed").await?;
    bob.join("#keyed").await?;
    alice.expect_command("JOIN").await?;

    alice.send_raw("MODE #keyed +o bob").await?;
    let grant = bob.expect_command("MODE").await?;
    assert_eq!(grant.params, vec!["#keyed", "+o", "bob"]);
    alice.expect_command("MODE").await?;

    bob.send_raw("MODE #keyed +k sesame").await?;
    alice.expect_command("MODE").await?;

    carol.send_raw("JOIN #keyed").await?;
    carol.expect_numeric(475).await?;
    carol.send_raw("JOIN #keyed sesame").await?;
    carol.expect_command("JOIN").await?;

    carol.send_raw("MODE #keyed").await?;
    let modes = carol.expect_numeric(324).await?;
    assert_eq!(modes.params, vec!["carol", "#keyed", "+tk", "sesame"]);
    Ok(())
}
