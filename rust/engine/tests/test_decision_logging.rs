mod helpers;

use std::io::Write;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::Level;

use helpers::{c, Scripted};
use tablemind_engine::cards::Rank::*;
use tablemind_engine::context::{action_context, bet_context};
use tablemind_engine::player::{Player, PlayerAction};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let buf = Captured::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (buf, tracing::subscriber::set_default(subscriber))
}

#[tokio::test]
async fn each_decision_emits_a_debug_event() {
    let (logs, _guard) = capture();
    let mut rng = ChaCha20Rng::seed_from_u64(3);

    let (provider, _) = Scripted::new(25, &[PlayerAction::Hit]);
    let mut players = vec![
        Player::with_provider("Ann", 100, provider),
        Player::new("Bob", 100),
    ];

    let ctx = bet_context(&players, 0, 5);
    let (bet, _) = players[0].decide_bet(&ctx, &mut rng, None).await;
    assert_eq!(bet.amount, 25);
    let ctx = bet_context(&players, 1, 5);
    players[1].decide_bet(&ctx, &mut rng, None).await;

    players[0].place_bet(25).unwrap();
    players[0].receive(c(Ten));
    players[0].receive(c(Two));
    let ctx = action_context(&players, &[0, 1], 0, c(Seven));
    let (action, _) = players[0].decide_action(&ctx, None).await;
    assert_eq!(action.action, PlayerAction::Hit);

    let text = logs.text();
    assert!(text.contains("bet decided"), "{text}");
    assert!(text.contains("player=Ann source=[provider] amount=25"), "{text}");
    assert!(text.contains("player=Bob source=[engine]"), "{text}");
    assert!(text.contains("action decided"), "{text}");
    assert!(text.contains("action=Hit value=12"), "{text}");
}
