//! Command Flow Tests
//!
//! Drive the message pipeline end to end over the in-memory ledger.

use pretty_assertions::assert_eq;

use cheapo_bot::application::dto::ReplyStatus;

use crate::common::{TestApp, ALICE, BOB, CAROL};

fn pay(recipient: i64, amount: i64) -> String {
    format!("c!pay <@{}> {}", recipient, amount)
}

#[tokio::test]
async fn test_pay_wager_and_reward_scenario() {
    let app = TestApp::new();
    app.seed(ALICE, 100);

    let reply = app.command(ALICE, &pay(BOB, 30)).await;
    assert_eq!(reply.status, ReplyStatus::Success);
    assert_eq!(app.balance_of(ALICE).await, 70);
    assert_eq!(app.balance_of(BOB).await, 30);

    let reply = app.command(ALICE, "c!bet coinflip 200").await;
    assert_eq!(reply.status, ReplyStatus::Failure);
    assert!(reply.message.contains("Insufficient funds"));
    assert_eq!(app.balance_of(ALICE).await, 70);

    // Both commands counted as messages; eight more reach the tenth.
    let mut grants = Vec::new();
    for i in 0..8 {
        let (reply, grant) = app.send(ALICE, &format!("hello {}", i)).await;
        assert!(reply.is_none());
        grants.extend(grant);
    }

    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].message_count, 10);
    assert_eq!(grants[0].amount, 10);
    assert_eq!(app.balance_of(ALICE).await, 80);
}

#[tokio::test]
async fn test_wager_above_balance_after_rewards_leaves_balance() {
    let app = TestApp::new();
    app.seed(ALICE, 70);

    for _ in 0..10 {
        app.send(ALICE, "chatting").await;
    }
    let before = app.balance_of(ALICE).await;
    assert_eq!(before, 80);

    let reply = app.command(ALICE, "c!coinflip 200").await;

    assert_eq!(reply.status, ReplyStatus::Failure);
    assert_eq!(app.balance_of(ALICE).await, before);
    assert_eq!(app.store.record_count(), 0);
}

#[tokio::test]
async fn test_reward_count_is_floor_of_messages_over_ten() {
    let app = TestApp::new();

    let mut grants = 0;
    for _ in 0..37 {
        if app.send(CAROL, "msg").await.1.is_some() {
            grants += 1;
        }
    }

    assert_eq!(grants, 3);
    assert_eq!(app.balance_of(CAROL).await, 30);
}

#[tokio::test]
async fn test_concurrent_messages_grant_each_milestone_once() {
    let app = std::sync::Arc::new(TestApp::new());

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { app.send(CAROL, "spam").await.1.is_some() })
        })
        .collect();

    let mut grants = 0;
    for task in tasks {
        if task.await.unwrap() {
            grants += 1;
        }
    }

    assert_eq!(grants, 5);
    assert_eq!(app.balance_of(CAROL).await, 50);
}

#[tokio::test]
async fn test_transfer_conserves_total() {
    let app = TestApp::new();
    app.seed(ALICE, 500);
    app.seed(BOB, 120);
    let total = app.store.total_coins();

    app.command(ALICE, &pay(BOB, 75)).await;
    app.command(BOB, &pay(CAROL, 195)).await;

    assert_eq!(app.balance_of(ALICE).await, 425);
    assert_eq!(app.balance_of(BOB).await, 0);
    assert_eq!(app.balance_of(CAROL).await, 195);
    assert_eq!(app.store.total_coins(), total);
}

#[tokio::test]
async fn test_transfer_above_balance_is_rejected() {
    let app = TestApp::new();
    app.seed(ALICE, 10);

    let reply = app.command(ALICE, &pay(BOB, 11)).await;

    assert_eq!(reply.status, ReplyStatus::Failure);
    assert_eq!(
        reply.message,
        "❌ Insufficient funds: you have **10** coins but need **11**."
    );
    assert_eq!(app.balance_of(ALICE).await, 10);
    assert_eq!(app.balance_of(BOB).await, 0);
}

#[tokio::test]
async fn test_non_positive_amounts_are_rejected() {
    let app = TestApp::new();
    app.seed(ALICE, 50);

    for amount in [0, -5] {
        let reply = app.command(ALICE, &pay(BOB, amount)).await;
        assert_eq!(reply.status, ReplyStatus::Failure);
        assert_eq!(reply.message, "❌ The amount must be a positive number of coins.");
    }

    let reply = app.command(ALICE, "c!dice 0").await;
    assert_eq!(reply.status, ReplyStatus::Failure);

    assert_eq!(app.balance_of(ALICE).await, 50);
    assert_eq!(app.balance_of(BOB).await, 0);
}

#[tokio::test]
async fn test_self_transfer_is_rejected() {
    let app = TestApp::new();
    app.seed(ALICE, 50);

    let reply = app.command(ALICE, &pay(ALICE, 10)).await;

    assert_eq!(reply.message, "❌ You can't pay yourself.");
    assert_eq!(app.balance_of(ALICE).await, 50);
}

#[tokio::test]
async fn test_gambling_win_and_loss_settle_balance() {
    let app = TestApp::new();
    app.seed(ALICE, 100);

    app.roller.set_win(true);
    let reply = app.command(ALICE, "c!dice 10").await;
    assert_eq!(reply.status, ReplyStatus::Success);
    assert!(reply.message.contains("won **50**"));
    assert_eq!(app.balance_of(ALICE).await, 150);

    app.roller.set_win(false);
    let reply = app.command(ALICE, "c!bet slots 150").await;
    assert_eq!(reply.status, ReplyStatus::Success);
    assert!(reply.message.contains("lost **150**"));
    assert_eq!(app.balance_of(ALICE).await, 0);

    assert_eq!(app.store.record_count(), 2);
}

#[tokio::test]
async fn test_history_lists_recent_plays() {
    let app = TestApp::new();
    app.seed(ALICE, 100);

    let reply = app.command(ALICE, "c!history").await;
    assert_eq!(reply.message, "📜 You haven't played any games yet.");

    app.roller.set_win(true);
    app.command(ALICE, "c!cf 20").await;

    let reply = app.command(ALICE, "c!history").await;
    assert!(reply.message.contains("coinflip wagered **20**"));
    assert!(reply.message.contains("+20"));
}

#[tokio::test]
async fn test_unknown_game_lists_available_games() {
    let app = TestApp::new();
    app.seed(ALICE, 100);

    let reply = app.command(ALICE, "c!bet roulette 10").await;

    assert_eq!(reply.status, ReplyStatus::Failure);
    assert_eq!(
        reply.message,
        "❌ Unknown game `roulette`. Available games: coinflip, dice, slots."
    );
}

#[tokio::test]
async fn test_balance_and_leaderboard() {
    let app = TestApp::new();
    app.seed(ALICE, 40);
    app.seed(BOB, 90);

    let reply = app.command(CAROL, "c!bal").await;
    assert_eq!(
        reply.message,
        format!("💰 <@{}> has **0** coins.", CAROL)
    );

    let reply = app.command(ALICE, "c!top").await;
    let lines: Vec<&str> = reply.message.lines().collect();
    assert_eq!(lines[1], format!("1. <@{}>: **90** coins", BOB));
    assert_eq!(lines[2], format!("2. <@{}>: **40** coins", ALICE));
}

#[tokio::test]
async fn test_malformed_input_still_gets_one_reply() {
    let app = TestApp::new();

    let reply = app.command(ALICE, "c!dance").await;
    assert_eq!(reply.message, "❌ Unknown command `dance`. Try `c!help`.");

    let reply = app.command(ALICE, "c!pay").await;
    assert!(reply.message.starts_with("❌ Missing <user>"));

    let reply = app.command(ALICE, "c!pay <@42> lots").await;
    assert_eq!(reply.message, "❌ `lots` is not a valid amount of coins.");

    let reply = app.command(ALICE, "c!pay nobody 5").await;
    assert_eq!(reply.message, "❌ `nobody` is not a user mention or id.");
}

#[tokio::test]
async fn test_plain_messages_are_not_commands() {
    let app = TestApp::new();

    let (reply, _) = app.send(ALICE, "what is c!balance?").await;

    assert!(reply.is_none());
}

#[tokio::test]
async fn test_help_lists_commands_and_games() {
    let app = TestApp::new();

    let reply = app.command(ALICE, "c!help").await;

    assert_eq!(reply.status, ReplyStatus::Success);
    for needle in ["c!balance", "c!pay", "c!bet", "c!top", "c!coinflip", "c!dice", "c!slots"] {
        assert!(reply.message.contains(needle), "help is missing {}", needle);
    }
}
