//! Terminal driver for the battle engine: stdin stands in for the chat
//! channel, stdout for the presentation layer.

use std::env;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use oc_arena::battle::runner::{BattleEnd, BattleEvent, BattleRunner, TargetCommand};
use oc_arena::{Battlefield, Catalog, Combatant, Party};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "data/catalog.json".to_string());
    let catalog = Arc::new(
        Catalog::load(&path).with_context(|| format!("loading catalog from {path}"))?,
    );

    // Preset lineups, player vs AI.
    let player = build_party(&catalog, [0, 3, 2], "Player", Some("1001"))?;
    let ai = build_party(&catalog, [0, 2, 3], "AI", None)?;
    let field = Battlefield::new(player, ai);

    let (command_tx, command_rx) = mpsc::channel(16);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if let Some(command) = TargetCommand::parse(&line) {
                if command_tx.send(command).await.is_err() {
                    break;
                }
            }
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    let end = BattleRunner::new(field, command_rx, event_tx).run().await;
    printer.await.ok();

    match end {
        BattleEnd::Winner { owner_nickname, .. } => {
            println!("battle over, {owner_nickname} wins");
        }
        BattleEnd::Aborted => println!("battle aborted, no winner"),
    }
    Ok(())
}

fn build_party(
    catalog: &Catalog,
    ids: [u32; 3],
    nickname: &str,
    owner_id: Option<&str>,
) -> anyhow::Result<Party> {
    let cards = ids
        .iter()
        .map(|&id| Combatant::from_catalog(catalog, id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Party::new(cards, nickname, owner_id)?)
}

fn print_event(event: &BattleEvent) {
    match event {
        BattleEvent::Board { header, cards, .. } | BattleEvent::TurnOrder { header, cards } => {
            println!("{header}");
            for card in cards {
                let marker = if card.defeated { " [KO]" } else { "" };
                println!("  {} ({}){}", card.name, card.hp, marker);
            }
        }
        BattleEvent::SelectionPrompt(text)
        | BattleEvent::SelectionAck(text)
        | BattleEvent::RoundDivider(text)
        | BattleEvent::Timeout(text)
        | BattleEvent::Winner(text) => println!("{text}"),
        BattleEvent::RoundResults(text) => print!("{text}"),
    }
}
